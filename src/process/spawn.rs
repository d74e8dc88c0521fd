//! Building and running `std`/`tokio` commands from a [`StartInfo`].

use super::{ProcessResult, StartInfo};
use crate::error::{ExekitError, Result};
use std::process::{Command, ExitStatus, Output};

fn build_command(start: &StartInfo) -> Command {
    let mut command = Command::new(&start.file);
    command.args(start.args.iter());

    if let Some(cwd) = &start.options.cwd {
        command.current_dir(cwd);
    }

    if start.options.clear_env {
        command.env_clear();
    }
    for (key, value) in &start.options.env {
        command.env(key, value);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        if let Some(uid) = start.options.uid {
            command.uid(uid);
        }
        if let Some(gid) = start.options.gid {
            command.gid(gid);
        }
    }

    command
        .stdin(start.options.stdin)
        .stdout(start.options.stdout)
        .stderr(start.options.stderr);
    command
}

fn spawn_error(start: &StartInfo, source: std::io::Error) -> ExekitError {
    ExekitError::Spawn {
        program: start.file.clone(),
        source,
    }
}

#[cfg(unix)]
fn signal_of(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: &ExitStatus) -> Option<i32> {
    None
}

fn into_result(start: StartInfo, output: Output) -> ProcessResult {
    let code = output.status.code();
    let signal = signal_of(&output.status);
    ProcessResult::new(start, code, signal, output.stdout, output.stderr)
}

/// Spawn the process and block until it exits.
pub(super) fn execute(start: StartInfo) -> Result<ProcessResult> {
    let output = build_command(&start)
        .output()
        .map_err(|e| spawn_error(&start, e))?;
    Ok(into_result(start, output))
}

/// Spawn the process on the tokio runtime and await its exit.
///
/// Dropping the returned future kills the child.
pub(super) async fn execute_async(start: StartInfo) -> Result<ProcessResult> {
    let mut command = tokio::process::Command::from(build_command(&start));
    command.kill_on_drop(true);

    // `output()` would force both streams to piped; spawn keeps the configured modes.
    let child = command.spawn().map_err(|e| spawn_error(&start, e))?;
    let output = child
        .wait_with_output()
        .await
        .map_err(|e| spawn_error(&start, e))?;
    Ok(into_result(start, output))
}
