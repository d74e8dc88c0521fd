//! Command implementations for exekit.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every handler returns the process exit code so `run` and
//! `exec` can pass the child's code through.

mod convert;
mod lookup;
mod spawn;

use crate::cli::Command;
use exekit::config::Config;
use exekit::error::{ExekitError, Result};
use exekit::registry::Registry;
use exekit::tools::age;
use std::path::Path;

/// Shared state for one CLI invocation.
pub struct Context {
    pub config: Config,
    pub registry: &'static Registry,
}

impl Context {
    /// Load the config and seed the global registry from it.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            ExekitError::Io(format!("failed to read current directory: {}", e))
        })?;
        let config = Config::discover(config_path, &cwd)?;

        let registry = Registry::global();
        age::register(registry);
        config.register_tools(registry);

        Ok(Self { config, registry })
    }
}

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, ctx: &Context) -> Result<i32> {
    match command {
        Command::Which(args) => lookup::cmd_which(args, ctx),
        Command::Find(args) => lookup::cmd_find(args, ctx),
        Command::Tokenize(args) => convert::cmd_tokenize(args),
        Command::Args(args) => convert::cmd_args(args),
        Command::Run(args) => spawn::cmd_run(args),
        Command::Exec(args) => spawn::cmd_exec(args, ctx),
    }
}
