//! Exekit: process-execution toolkit.
//!
//! - [`args`]: tokenizing command lines and converting structured fields to flags
//! - [`env`]: host platform detection and `${VAR}` / `%VAR%` expansion
//! - [`which`]: cached executable resolution over the search path
//! - [`registry`]: named tools with per-platform fallback locations
//! - [`process`]: spawning with hooks, observers, and captured output
//! - [`tools`]: one-step wrappers plus `shell`, `sudo`, and `age` helpers
//! - [`config`]: the `exekit.yaml` configuration file

pub mod args;
pub mod config;
pub mod env;
pub mod error;
pub mod exit_codes;
pub mod process;
pub mod registry;
pub mod tools;
pub mod which;

#[cfg(test)]
mod test_support;

pub use error::{ExekitError, Result};
