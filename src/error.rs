//! Error types for exekit.
//!
//! Uses thiserror for derive macros. Every variant maps to an exit code so the
//! CLI can report failures consistently.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for exekit operations.
#[derive(Error, Debug)]
pub enum ExekitError {
    /// A required input was missing or empty.
    #[error("{0}")]
    Argument(String),

    /// An argument source had a shape the converter cannot handle.
    #[error("cannot convert {0} to process arguments")]
    TypeConversion(String),

    /// A `${VAR?message}` reference named an unset variable.
    #[error("environment expansion failed: {0}")]
    Expansion(String),

    /// The configuration file could not be read, parsed, or validated.
    #[error("{0}")]
    Config(String),

    /// Resolution exhausted all search locations.
    #[error("executable not found: {0}")]
    ExecutableNotFound(String),

    /// The requested script interpreter is not registered.
    #[error("shell {0} not supported")]
    UnsupportedShell(String),

    /// The process could not be started.
    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process finished but was not accepted as successful.
    #[error("process {file} failed with code {} and signal {}", fmt_opt(.code), fmt_opt(.signal))]
    ProcessFailure {
        file: String,
        code: Option<i32>,
        signal: Option<i32>,
    },

    /// Other I/O failure (temporary script files and similar).
    #[error("{0}")]
    Io(String),
}

fn fmt_opt(value: &Option<i32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "none".to_string(),
    }
}

impl ExekitError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExekitError::Argument(_)
            | ExekitError::TypeConversion(_)
            | ExekitError::Expansion(_)
            | ExekitError::Config(_)
            | ExekitError::UnsupportedShell(_)
            | ExekitError::Io(_) => exit_codes::USER_ERROR,
            ExekitError::ExecutableNotFound(_) => exit_codes::NOT_FOUND,
            ExekitError::Spawn { .. } => exit_codes::SPAWN_FAILURE,
            ExekitError::ProcessFailure { code, .. } => match code {
                Some(c) if (1..=255).contains(c) => *c,
                _ => exit_codes::PROCESS_FAILURE,
            },
        }
    }
}

/// Result type alias for exekit operations.
pub type Result<T> = std::result::Result<T, ExekitError>;
