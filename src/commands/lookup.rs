//! `which` and `find`.

use super::Context;
use crate::cli::{FindArgs, WhichArgs};
use exekit::error::{ExekitError, Result};
use exekit::exit_codes;
use exekit::which::Resolver;

pub fn cmd_which(args: WhichArgs, ctx: &Context) -> Result<i32> {
    let use_cache = ctx.config.use_cache && !args.no_cache;
    let found = Resolver::global().resolve(&args.name, &args.paths, use_cache)?;

    match found {
        Some(path) => {
            println!("{}", path.display());
            Ok(exit_codes::SUCCESS)
        }
        None => Err(ExekitError::ExecutableNotFound(args.name)),
    }
}

pub fn cmd_find(args: FindArgs, ctx: &Context) -> Result<i32> {
    let path = ctx.registry.find_or_err(&args.name)?;
    println!("{}", path.display());
    Ok(exit_codes::SUCCESS)
}
