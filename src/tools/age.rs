//! Wrapper for the [age](https://age-encryption.org) encryption tool.

use super::Cmd;
use crate::args::{ArgSource, ConvertOptions, Fields};
use crate::error::Result;
use crate::process::{CommandOptions, Invoker, ProcessResult};
use crate::registry::{ExecutableEntry, Registry};
use serde::{Deserialize, Serialize};

pub const AGE: &str = "age";
pub const AGE_KEYGEN: &str = "age-keygen";

/// Register both binaries, keeping any entries that already exist.
pub fn register(registry: &Registry) {
    registry.register_default(ExecutableEntry::new(AGE));
    registry.register_default(ExecutableEntry::new(AGE_KEYGEN));
}

/// Typed `age` flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgeOptions {
    pub decrypt: bool,
    pub encrypt: bool,
    pub identity: Option<String>,
    pub output: Option<String>,
    pub recipients: Vec<String>,
    pub armor: bool,
    pub recipients_file: Vec<String>,
    /// Input file, emitted as a positional argument.
    pub input: Option<String>,
}

impl From<AgeOptions> for Fields {
    fn from(o: AgeOptions) -> Self {
        Fields::new()
            .with("decrypt", o.decrypt)
            .with("encrypt", o.encrypt)
            .with("identity", o.identity)
            .with("output", o.output)
            .with("recipients", o.recipients)
            .with("armor", o.armor)
            .with("recipientsFile", o.recipients_file)
            .with("input", o.input)
    }
}

impl From<AgeOptions> for ArgSource {
    fn from(o: AgeOptions) -> Self {
        ArgSource::Fields(o.into())
    }
}

/// Conversion rules for `age`: the `input` field is positional.
pub fn convert_options() -> ConvertOptions {
    ConvertOptions::default().with_append(["input"])
}

/// `age` and `age-keygen`, located through a registry.
#[derive(Debug, Clone)]
pub struct Age<'r> {
    registry: &'r Registry,
    invoker: Invoker,
    options: CommandOptions,
}

impl<'r> Age<'r> {
    /// Bind to `registry`, registering both binaries in it.
    pub fn new(registry: &'r Registry) -> Self {
        register(registry);
        Self {
            registry,
            invoker: Invoker::default(),
            options: CommandOptions::default(),
        }
    }

    pub fn with_invoker(mut self, invoker: Invoker) -> Self {
        self.invoker = invoker;
        self
    }

    pub fn with_options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }

    /// Run `age`. Fails with `ExecutableNotFound` when the binary is missing.
    pub fn age(&self, source: impl Into<ArgSource>) -> Result<ProcessResult> {
        let program = self.registry.find_or_err(AGE)?;
        self.cmd(&program, source)
            .convert(convert_options())
            .call()
    }

    pub async fn age_async(&self, source: impl Into<ArgSource>) -> Result<ProcessResult> {
        let program = self.registry.find_or_err_async(AGE).await?;
        self.cmd(&program, source)
            .convert(convert_options())
            .call_async()
            .await
    }

    /// Run `age-keygen`.
    pub fn keygen(&self, source: impl Into<ArgSource>) -> Result<ProcessResult> {
        let program = self.registry.find_or_err(AGE_KEYGEN)?;
        self.cmd(&program, source).call()
    }

    pub async fn keygen_async(&self, source: impl Into<ArgSource>) -> Result<ProcessResult> {
        let program = self.registry.find_or_err_async(AGE_KEYGEN).await?;
        self.cmd(&program, source).call_async().await
    }

    fn cmd(&self, program: &std::path::Path, source: impl Into<ArgSource>) -> Cmd {
        Cmd::new(program.to_string_lossy())
            .args(source)
            .options(self.options.clone())
            .invoker(self.invoker.clone())
    }
}

/// Run `age` located through the global registry.
pub fn age(source: impl Into<ArgSource>) -> Result<ProcessResult> {
    Age::new(Registry::global()).age(source)
}

/// Async variant of [`age`].
pub async fn age_async(source: impl Into<ArgSource>) -> Result<ProcessResult> {
    Age::new(Registry::global()).age_async(source).await
}

/// Run `age-keygen` located through the global registry.
pub fn keygen(source: impl Into<ArgSource>) -> Result<ProcessResult> {
    Age::new(Registry::global()).keygen(source)
}

/// Async variant of [`keygen`].
pub async fn keygen_async(source: impl Into<ArgSource>) -> Result<ProcessResult> {
    Age::new(Registry::global()).keygen_async(source).await
}
