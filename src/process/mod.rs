//! Process invocation.
//!
//! A [`StartInfo`] describes one spawn: target file, arguments, and
//! [`CommandOptions`]. An [`Invoker`] applies its request hooks to the
//! start-info, spawns the process, waits for it, and hands the
//! [`ProcessResult`] to its observers.
//!
//! Non-zero exit codes are not errors here. Callers opt in with
//! [`ProcessResult::throw_or_continue`].

mod invoker;
mod result;
mod spawn;


pub use invoker::{Invoker, RequestHook, ResultObserver};
pub use result::ProcessResult;

use crate::args::ProcessArgs;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// How one standard stream of the child is connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdioMode {
    /// Captured into the result.
    Piped,
    /// Shared with the parent process.
    Inherit,
    /// Discarded.
    Null,
}

impl From<StdioMode> for std::process::Stdio {
    fn from(mode: StdioMode) -> Self {
        match mode {
            StdioMode::Piped => std::process::Stdio::piped(),
            StdioMode::Inherit => std::process::Stdio::inherit(),
            StdioMode::Null => std::process::Stdio::null(),
        }
    }
}

/// Spawn options shared by every call style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOptions {
    /// Working directory; the parent's when unset.
    pub cwd: Option<PathBuf>,

    /// Variables added to (or overriding) the inherited environment.
    pub env: BTreeMap<String, String>,

    /// Start from an empty environment instead of inheriting the parent's.
    pub clear_env: bool,

    /// User id for the child (Unix only; ignored elsewhere).
    pub uid: Option<u32>,

    /// Group id for the child (Unix only; ignored elsewhere).
    pub gid: Option<u32>,

    pub stdin: StdioMode,
    pub stdout: StdioMode,
    pub stderr: StdioMode,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            env: BTreeMap::new(),
            clear_env: false,
            uid: None,
            gid: None,
            stdin: StdioMode::Null,
            stdout: StdioMode::Piped,
            stderr: StdioMode::Piped,
        }
    }
}

impl CommandOptions {
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn clear_env(mut self) -> Self {
        self.clear_env = true;
        self
    }

    pub fn stdin(mut self, mode: StdioMode) -> Self {
        self.stdin = mode;
        self
    }

    pub fn stdout(mut self, mode: StdioMode) -> Self {
        self.stdout = mode;
        self
    }

    pub fn stderr(mut self, mode: StdioMode) -> Self {
        self.stderr = mode;
        self
    }

    /// Connect stdout and stderr to the parent's streams.
    pub fn inherit_output(self) -> Self {
        self.stdout(StdioMode::Inherit).stderr(StdioMode::Inherit)
    }

    /// Capture stdout and stderr into the result.
    pub fn pipe_output(self) -> Self {
        self.stdout(StdioMode::Piped).stderr(StdioMode::Piped)
    }
}

/// Everything needed to start one process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartInfo {
    /// Program to run: a bare name (looked up by the OS) or a path.
    pub file: String,
    pub args: ProcessArgs,
    pub options: CommandOptions,
}

impl StartInfo {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn with_args(mut self, args: ProcessArgs) -> Self {
        self.args = args;
        self
    }

    pub fn with_options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }
}

/// Spawn with the default invoker and wait for completion.
pub fn call(start: StartInfo) -> Result<ProcessResult> {
    Invoker::default().call(start)
}

/// Async variant of [`call`].
pub async fn call_async(start: StartInfo) -> Result<ProcessResult> {
    Invoker::default().call_async(start).await
}

/// Spawn with stdout and stderr inherited from the parent.
pub fn run(start: StartInfo) -> Result<ProcessResult> {
    Invoker::default().run(start)
}

/// Async variant of [`run`].
pub async fn run_async(start: StartInfo) -> Result<ProcessResult> {
    Invoker::default().run_async(start).await
}

/// Spawn with stdout and stderr captured.
pub fn output(start: StartInfo) -> Result<ProcessResult> {
    Invoker::default().output(start)
}

/// Async variant of [`output`].
pub async fn output_async(start: StartInfo) -> Result<ProcessResult> {
    Invoker::default().output_async(start).await
}
