//! Invocation with request hooks and result observers.

use super::{ProcessResult, StartInfo, spawn};
use crate::error::Result;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Rewrites a start-info before spawning.
pub type RequestHook = Arc<dyn Fn(&mut StartInfo) + Send + Sync>;

/// Sees every completed result.
pub type ResultObserver = Arc<dyn Fn(&StartInfo, &ProcessResult) + Send + Sync>;

/// Spawns processes, running request hooks before and observers after.
///
/// Hooks run in the order they were added. Cloning an invoker shares its
/// hooks, so a derived invoker (see [`crate::tools::sudo::elevate`]) can add
/// more without touching the original.
#[derive(Clone, Default)]
pub struct Invoker {
    hooks: Vec<RequestHook>,
    observers: Vec<ResultObserver>,
}

impl fmt::Debug for Invoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invoker")
            .field("hooks", &self.hooks.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Invoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook that may rewrite the start-info before spawning.
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut StartInfo) + Send + Sync + 'static,
    {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Add an observer that receives every completed result.
    pub fn after<F>(mut self, observer: F) -> Self
    where
        F: Fn(&StartInfo, &ProcessResult) + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Apply the request hooks to `start`.
    pub fn prepare(&self, mut start: StartInfo) -> StartInfo {
        for hook in &self.hooks {
            hook(&mut start);
        }
        start
    }

    /// Spawn and wait, honoring the stdio modes in `start.options`.
    pub fn call(&self, start: StartInfo) -> Result<ProcessResult> {
        let start = self.prepare(start);
        debug!(file = %start.file, args = %start.args, "spawning process");
        let result = spawn::execute(start)?;
        self.observe(&result);
        Ok(result)
    }

    /// Async variant of [`call`](Self::call). Dropping the future kills the child.
    pub async fn call_async(&self, start: StartInfo) -> Result<ProcessResult> {
        let start = self.prepare(start);
        debug!(file = %start.file, args = %start.args, "spawning process");
        let result = spawn::execute_async(start).await?;
        self.observe(&result);
        Ok(result)
    }

    /// Spawn with stdout and stderr shared with the parent.
    pub fn run(&self, mut start: StartInfo) -> Result<ProcessResult> {
        start.options = start.options.inherit_output();
        self.call(start)
    }

    pub async fn run_async(&self, mut start: StartInfo) -> Result<ProcessResult> {
        start.options = start.options.inherit_output();
        self.call_async(start).await
    }

    /// Spawn with stdout and stderr captured.
    pub fn output(&self, mut start: StartInfo) -> Result<ProcessResult> {
        start.options = start.options.pipe_output();
        self.call(start)
    }

    pub async fn output_async(&self, mut start: StartInfo) -> Result<ProcessResult> {
        start.options = start.options.pipe_output();
        self.call_async(start).await
    }

    fn observe(&self, result: &ProcessResult) {
        debug!(
            file = %result.file(),
            code = ?result.code(),
            signal = ?result.signal(),
            "process finished"
        );
        for observer in &self.observers {
            observer(result.start_info(), result);
        }
    }
}
