//! The outcome of one finished process.

use super::{StartInfo, StdioMode};
use crate::error::{ExekitError, Result};
use std::sync::OnceLock;

/// Exit status and captured output of a finished process.
///
/// Output views are only populated for streams that were [`StdioMode::Piped`];
/// for any other mode they are empty regardless of what the child wrote.
/// Decoded text and line views are computed once and then reused.
#[derive(Debug)]
pub struct ProcessResult {
    start: StartInfo,
    code: Option<i32>,
    signal: Option<i32>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    stdout_text: OnceLock<String>,
    stderr_text: OnceLock<String>,
    stdout_lines: OnceLock<Vec<String>>,
    stderr_lines: OnceLock<Vec<String>>,
}

impl ProcessResult {
    pub fn new(
        start: StartInfo,
        code: Option<i32>,
        signal: Option<i32>,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    ) -> Self {
        let stdout = if start.options.stdout == StdioMode::Piped {
            stdout
        } else {
            Vec::new()
        };
        let stderr = if start.options.stderr == StdioMode::Piped {
            stderr
        } else {
            Vec::new()
        };

        Self {
            start,
            code,
            signal,
            stdout,
            stderr,
            stdout_text: OnceLock::new(),
            stderr_text: OnceLock::new(),
            stdout_lines: OnceLock::new(),
            stderr_lines: OnceLock::new(),
        }
    }

    /// The start-info the process was launched with, after hooks ran.
    pub fn start_info(&self) -> &StartInfo {
        &self.start
    }

    pub fn file(&self) -> &str {
        &self.start.file
    }

    pub fn args(&self) -> &[String] {
        &self.start.args
    }

    /// Exit code; `None` when the process was terminated by a signal.
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    /// Terminating signal (Unix only).
    pub fn signal(&self) -> Option<i32> {
        self.signal
    }

    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    /// Stdout decoded as UTF-8, with invalid sequences replaced.
    pub fn stdout_str(&self) -> &str {
        self.stdout_text
            .get_or_init(|| String::from_utf8_lossy(&self.stdout).into_owned())
    }

    pub fn stderr_str(&self) -> &str {
        self.stderr_text
            .get_or_init(|| String::from_utf8_lossy(&self.stderr).into_owned())
    }

    /// Stdout split on `\n` or `\r\n`.
    pub fn stdout_lines(&self) -> &[String] {
        self.stdout_lines
            .get_or_init(|| self.stdout_str().lines().map(str::to_string).collect())
    }

    pub fn stderr_lines(&self) -> &[String] {
        self.stderr_lines
            .get_or_init(|| self.stderr_str().lines().map(str::to_string).collect())
    }

    /// True when the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// True when the process exited with a code accepted by `accept`.
    ///
    /// A signal-terminated process is never successful.
    pub fn success_with<F: Fn(i32) -> bool>(&self, accept: F) -> bool {
        self.code.is_some_and(accept)
    }

    /// Pass the result through when successful, otherwise fail with
    /// [`ExekitError::ProcessFailure`].
    pub fn throw_or_continue(self) -> Result<Self> {
        self.throw_or_continue_with(|code| code == 0)
    }

    /// Like [`throw_or_continue`](Self::throw_or_continue) with a custom
    /// success predicate.
    pub fn throw_or_continue_with<F: Fn(i32) -> bool>(self, accept: F) -> Result<Self> {
        if self.success_with(accept) {
            return Ok(self);
        }

        Err(ExekitError::ProcessFailure {
            file: self.start.file,
            code: self.code,
            signal: self.signal,
        })
    }
}
