//! Running scripts through an interpreter.
//!
//! The script is written to a temporary file with the interpreter's
//! extension, the interpreter is invoked on that file, and the file is
//! removed when the call returns, whether it succeeded or not.

use crate::env::Platform;
use crate::error::{ExekitError, Result};
use crate::process::{CommandOptions, Invoker, ProcessResult, StartInfo};
use std::io::Write;
use std::path::Path;
use tempfile::TempPath;
use tracing::debug;

const POWERSHELL_TEMPLATE: &str = "$ErrorActionPreference = 'Stop';\n\n{script}\n\nif ((Test-Path -LiteralPath variable:\\LASTEXITCODE))\n{\n    exit $LASTEXITCODE\n}\n";

/// A script interpreter.
#[derive(Debug, Clone, Copy)]
pub struct Shell {
    /// Registry key, e.g. `deno-ts`.
    pub name: &'static str,
    /// Program to spawn.
    pub program: &'static str,
    /// Extension of the temporary script file, including the dot.
    pub ext: &'static str,
    args: fn(&str) -> Vec<String>,
    format: Option<fn(&str) -> String>,
}

impl Shell {
    /// Arguments that make the interpreter run `file`.
    pub fn args(&self, file: &str) -> Vec<String> {
        (self.args)(file)
    }

    /// The script as it is written to disk.
    pub fn format(&self, script: &str) -> String {
        match self.format {
            Some(format) => format(script),
            None => script.to_string(),
        }
    }
}

fn file_only(file: &str) -> Vec<String> {
    vec![file.to_string()]
}

fn cmd_args(file: &str) -> Vec<String> {
    vec!["/c".to_string(), file.to_string()]
}

fn cmd_format(script: &str) -> String {
    format!("@echo off\n{script}")
}

fn powershell_args(file: &str) -> Vec<String> {
    [
        "-NoLogo",
        "-ExecutionPolicy",
        "ByPass",
        "-NonInteractive",
        "-Command",
    ]
    .into_iter()
    .map(str::to_string)
    .chain([format!(". '{}'", file.replace('\'', "''"))])
    .collect()
}

fn powershell_format(script: &str) -> String {
    POWERSHELL_TEMPLATE.replace("{script}", script)
}

fn bash_args(file: &str) -> Vec<String> {
    ["--noprofile", "--norc", "-e", "-o", "pipefail", file]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn zsh_args(file: &str) -> Vec<String> {
    ["-f", "-e", "-o", "pipefail", file]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn sh_args(file: &str) -> Vec<String> {
    vec!["-e".to_string(), file.to_string()]
}

fn deno_args(file: &str) -> Vec<String> {
    vec!["run".to_string(), "--allow-all".to_string(), file.to_string()]
}

/// Every supported interpreter.
pub static SHELLS: &[Shell] = &[
    Shell {
        name: "cmd",
        program: "cmd",
        ext: ".cmd",
        args: cmd_args,
        format: Some(cmd_format),
    },
    Shell {
        name: "powershell",
        program: "powershell",
        ext: ".ps1",
        args: powershell_args,
        format: Some(powershell_format),
    },
    Shell {
        name: "pwsh",
        program: "pwsh",
        ext: ".ps1",
        args: powershell_args,
        format: Some(powershell_format),
    },
    Shell {
        name: "bash",
        program: "bash",
        ext: ".sh",
        args: bash_args,
        format: None,
    },
    Shell {
        name: "zsh",
        program: "zsh",
        ext: ".sh",
        args: zsh_args,
        format: None,
    },
    Shell {
        name: "sh",
        program: "sh",
        ext: ".sh",
        args: sh_args,
        format: None,
    },
    Shell {
        name: "python",
        program: "python",
        ext: ".py",
        args: file_only,
        format: None,
    },
    Shell {
        name: "ruby",
        program: "ruby",
        ext: ".rb",
        args: file_only,
        format: None,
    },
    Shell {
        name: "deno",
        program: "deno",
        ext: ".js",
        args: deno_args,
        format: None,
    },
    Shell {
        name: "deno-ts",
        program: "deno",
        ext: ".ts",
        args: deno_args,
        format: None,
    },
];

/// Look up an interpreter by name.
pub fn lookup(name: &str) -> Result<&'static Shell> {
    SHELLS
        .iter()
        .find(|shell| shell.name == name)
        .ok_or_else(|| ExekitError::UnsupportedShell(name.to_string()))
}

/// The interpreter used when none is requested.
pub fn default_shell(platform: Platform) -> &'static str {
    if platform.is_windows() {
        "powershell"
    } else {
        "bash"
    }
}

/// Options for [`exec`].
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Interpreter name; see [`default_shell`] when unset.
    pub shell: Option<String>,
    pub options: CommandOptions,
    pub invoker: Invoker,
}

impl ExecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shell(mut self, name: impl Into<String>) -> Self {
        self.shell = Some(name.into());
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

    fn resolve_shell(&self) -> Result<&'static Shell> {
        let name = self
            .shell
            .as_deref()
            .unwrap_or_else(|| default_shell(Platform::current()));
        lookup(name)
    }
}

/// Write `script` to a temporary file and run it with the chosen interpreter.
pub fn exec(script: &str, options: ExecOptions) -> Result<ProcessResult> {
    let shell = options.resolve_shell()?;
    let file = write_script(shell, script)?;
    let start = start_info(shell, &file, options.options);

    // `file` is removed when it drops at the end of this scope.
    options.invoker.call(start)
}

/// Async variant of [`exec`].
pub async fn exec_async(script: &str, options: ExecOptions) -> Result<ProcessResult> {
    let shell = options.resolve_shell()?;
    let file = write_script_async(shell, script).await?;
    let start = start_info(shell, &file, options.options);

    options.invoker.call_async(start).await
}

fn start_info(shell: &Shell, file: &Path, options: CommandOptions) -> StartInfo {
    let file = file.to_string_lossy();
    debug!(shell = shell.name, script = %file, "executing script");
    StartInfo::new(shell.program)
        .with_args(shell.args(&file).into())
        .with_options(options)
}

fn temp_error(e: std::io::Error) -> ExekitError {
    ExekitError::Io(format!("failed to write temporary script: {}", e))
}

fn write_script(shell: &Shell, script: &str) -> Result<TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix("exec_")
        .suffix(shell.ext)
        .tempfile()
        .map_err(temp_error)?;

    file.write_all(shell.format(script).as_bytes())
        .map_err(temp_error)?;

    // Close the handle so the interpreter can open the file on every platform.
    Ok(file.into_temp_path())
}

async fn write_script_async(shell: &Shell, script: &str) -> Result<TempPath> {
    let path = tempfile::Builder::new()
        .prefix("exec_")
        .suffix(shell.ext)
        .tempfile()
        .map_err(temp_error)?
        .into_temp_path();

    tokio::fs::write(&path, shell.format(script))
        .await
        .map_err(temp_error)?;
    Ok(path)
}
