//! `run` and `exec`.

use super::Context;
use crate::cli::{ExecArgs, RunArgs};
use exekit::args::ProcessArgs;
use exekit::env::Platform;
use exekit::error::Result;
use exekit::exit_codes;
use exekit::process::{CommandOptions, Invoker, ProcessResult, StartInfo, StdioMode};
use exekit::tools::shell::{self, ExecOptions};
use exekit::tools::sudo;

pub fn cmd_run(args: RunArgs) -> Result<i32> {
    let mut invoker = Invoker::new();
    if args.sudo {
        invoker = sudo::elevate(&invoker);
    }

    let start = StartInfo::new(args.program)
        .with_args(ProcessArgs::from(args.args))
        .with_options(CommandOptions::default().stdin(StdioMode::Inherit));
    let result = invoker.run(start)?;
    Ok(exit_code(&result))
}

pub fn cmd_exec(args: ExecArgs, ctx: &Context) -> Result<i32> {
    let name = args
        .shell
        .unwrap_or_else(|| ctx.config.shell_for(Platform::current()).to_string());

    let options = ExecOptions::new()
        .shell(name)
        .options(CommandOptions::default().inherit_output());
    let result = shell::exec(&args.script, options)?;
    Ok(exit_code(&result))
}

/// The child's exit code, or `PROCESS_FAILURE` when it was killed by a signal.
fn exit_code(result: &ProcessResult) -> i32 {
    result.code().unwrap_or(exit_codes::PROCESS_FAILURE)
}
