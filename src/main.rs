//! Exekit: locate executables, build argument lists, and run processes.
//!
//! This is the main entry point for the `exekit` CLI. It parses arguments,
//! installs logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod cli;
mod commands;

use cli::Cli;
use commands::Context;
use exekit::exit_codes;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "EXEKIT_LOG";

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // An explicit EXEKIT_LOG wins over -v.
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so they never mix with command output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Codes outside 0..=255 (Windows status values) become `PROCESS_FAILURE`.
fn to_exit_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(exit_codes::PROCESS_FAILURE as u8)
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let result = Context::load(cli.config.as_deref())
        .and_then(|ctx| commands::dispatch(cli.command, &ctx));

    match result {
        Ok(code) => ExitCode::from(to_exit_byte(code)),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            tracing::debug!(exit_code = err.exit_code(), "command failed");
            ExitCode::from(to_exit_byte(err.exit_code()))
        }
    }
}
