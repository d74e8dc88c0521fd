//! Convenience wrappers that convert an argument source and spawn in one step.
//!
//! [`Cmd`] collects a program, an [`ArgSource`], optional conversion rules,
//! spawn options, and the [`Invoker`] to run through. The free functions
//! cover the common case of a default invoker and default options.

pub mod age;
pub mod shell;
pub mod sudo;


use crate::args::{ArgSource, ConvertOptions, ProcessArgs};
use crate::error::Result;
use crate::process::{CommandOptions, Invoker, ProcessResult, StartInfo};

/// A pending tool invocation.
#[derive(Debug, Clone, Default)]
pub struct Cmd {
    program: String,
    source: ArgSource,
    convert: Option<ConvertOptions>,
    options: CommandOptions,
    invoker: Invoker,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn args(mut self, source: impl Into<ArgSource>) -> Self {
        self.source = source.into();
        self
    }

    /// Rules applied when the source is [`ArgSource::Fields`].
    pub fn convert(mut self, options: ConvertOptions) -> Self {
        self.convert = Some(options);
        self
    }

    pub fn options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }

    pub fn invoker(mut self, invoker: Invoker) -> Self {
        self.invoker = invoker;
        self
    }

    /// Convert the argument source and build the start-info.
    ///
    /// Request hooks are not applied here; they run when the command is spawned.
    pub fn start_info(&self) -> Result<StartInfo> {
        let args = ProcessArgs::convert(self.source.clone(), self.convert.as_ref())?;
        Ok(StartInfo::new(self.program.clone())
            .with_args(args)
            .with_options(self.options.clone()))
    }

    pub fn call(self) -> Result<ProcessResult> {
        let start = self.start_info()?;
        self.invoker.call(start)
    }

    pub async fn call_async(self) -> Result<ProcessResult> {
        let start = self.start_info()?;
        self.invoker.call_async(start).await
    }

    pub fn run(self) -> Result<ProcessResult> {
        let start = self.start_info()?;
        self.invoker.run(start)
    }

    pub async fn run_async(self) -> Result<ProcessResult> {
        let start = self.start_info()?;
        self.invoker.run_async(start).await
    }

    pub fn output(self) -> Result<ProcessResult> {
        let start = self.start_info()?;
        self.invoker.output(start)
    }

    pub async fn output_async(self) -> Result<ProcessResult> {
        let start = self.start_info()?;
        self.invoker.output_async(start).await
    }
}

/// Convert `source` and spawn `program`, honoring default stdio modes.
pub fn call(program: &str, source: impl Into<ArgSource>) -> Result<ProcessResult> {
    Cmd::new(program).args(source).call()
}

pub async fn call_async(program: &str, source: impl Into<ArgSource>) -> Result<ProcessResult> {
    Cmd::new(program).args(source).call_async().await
}

/// Convert `source` and spawn `program` with inherited stdout and stderr.
pub fn run(program: &str, source: impl Into<ArgSource>) -> Result<ProcessResult> {
    Cmd::new(program).args(source).run()
}

pub async fn run_async(program: &str, source: impl Into<ArgSource>) -> Result<ProcessResult> {
    Cmd::new(program).args(source).run_async().await
}

/// Convert `source` and spawn `program` with captured stdout and stderr.
pub fn output(program: &str, source: impl Into<ArgSource>) -> Result<ProcessResult> {
    Cmd::new(program).args(source).output()
}

pub async fn output_async(program: &str, source: impl Into<ArgSource>) -> Result<ProcessResult> {
    Cmd::new(program).args(source).output_async().await
}
