//! Exit code constants for the exekit CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad config, unsupported shell)
//! - 2: Executable not found
//! - 3: Process could not be spawned
//! - 4: Process failed without a usable exit code (killed by a signal)
//!
//! `run` and `exec` pass the child's own exit code through unchanged.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or unsupported shell.
pub const USER_ERROR: i32 = 1;

/// Executable resolution exhausted every search location.
pub const NOT_FOUND: i32 = 2;

/// The operating system refused to start the process.
pub const SPAWN_FAILURE: i32 = 3;

/// The process failed and reported no exit code of its own.
pub const PROCESS_FAILURE: i32 = 4;
