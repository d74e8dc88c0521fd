//! CLI argument parsing for exekit.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Exekit: locate executables, build argument lists, and run processes.
#[derive(Parser, Debug)]
#[command(name = "exekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a config file (default: ./exekit.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for exekit.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the absolute path of an executable found on the search path.
    Which(WhichArgs),

    /// Locate a tool through the registry, including configured fallbacks.
    Find(FindArgs),

    /// Split a command line into tokens, one per line.
    Tokenize(TokenizeArgs),

    /// Convert a flat JSON object into command-line arguments.
    Args(ArgsArgs),

    /// Run a program with inherited stdio and exit with its code.
    Run(RunArgs),

    /// Run a script through an interpreter and exit with its code.
    Exec(ExecArgs),
}

/// Arguments for the `which` command.
#[derive(Parser, Debug)]
pub struct WhichArgs {
    /// Executable name.
    pub name: String,

    /// Directories searched before the search path (repeatable).
    #[arg(long = "path", value_name = "DIR")]
    pub paths: Vec<PathBuf>,

    /// Do not read the resolver cache.
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the `find` command.
#[derive(Parser, Debug)]
pub struct FindArgs {
    /// Tool name.
    pub name: String,
}

/// Arguments for the `tokenize` command.
#[derive(Parser, Debug)]
pub struct TokenizeArgs {
    /// Command line to split.
    pub input: String,
}

/// Arguments for the `args` command.
#[derive(Parser, Debug)]
pub struct ArgsArgs {
    /// JSON value: a flat object, an array, a string, or null.
    pub json: String,

    /// Prefix placed before flag names.
    #[arg(long, default_value = "--")]
    pub prefix: String,

    /// Field names to skip (repeatable).
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Field names emitted positionally before all flags (repeatable).
    #[arg(long)]
    pub append: Vec<String>,

    /// Field names emitted positionally after all flags (repeatable).
    #[arg(long)]
    pub prepend: Vec<String>,

    /// Field names whose list values are joined into one token (repeatable).
    #[arg(long)]
    pub concat: Vec<String>,

    /// Delimiter used for `--concat` fields.
    #[arg(long, default_value = ",")]
    pub delimiter: String,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Program name or path.
    pub program: String,

    /// Run the program through sudo (ignored on Windows).
    #[arg(long)]
    pub sudo: bool,

    /// Arguments passed to the program verbatim.
    #[arg(last = true)]
    pub args: Vec<String>,
}

/// Arguments for the `exec` command.
#[derive(Parser, Debug)]
pub struct ExecArgs {
    /// Script source.
    pub script: String,

    /// Interpreter (cmd, powershell, pwsh, bash, zsh, sh, python, ruby, deno, deno-ts).
    #[arg(long)]
    pub shell: Option<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
