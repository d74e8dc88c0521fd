//! Privilege elevation through `sudo`.
//!
//! Elevation is a request hook: the original target becomes the first
//! argument and `sudo` becomes the target. It only applies to the invoker
//! returned by [`elevate`], so the scope ends when that invoker is dropped.

use crate::env::Platform;
use crate::process::{Invoker, StartInfo};
use std::future::Future;

/// Rewrite `start` to run its target through `sudo`.
pub fn wrap(start: &mut StartInfo) {
    let target = std::mem::replace(&mut start.file, "sudo".to_string());
    start.args.unshift([target]);
}

/// A copy of `invoker` that runs every process through `sudo`.
///
/// On Windows hosts the copy is returned unchanged.
pub fn elevate(invoker: &Invoker) -> Invoker {
    elevate_on(invoker, Platform::current())
}

/// [`elevate`] for an explicit platform.
pub fn elevate_on(invoker: &Invoker, platform: Platform) -> Invoker {
    if platform.is_windows() {
        return invoker.clone();
    }
    invoker.clone().before(wrap)
}

/// Run `action` with an elevated copy of `invoker`.
pub fn with_sudo<T, F>(invoker: &Invoker, action: F) -> T
where
    F: FnOnce(&Invoker) -> T,
{
    action(&elevate(invoker))
}

/// Async variant of [`with_sudo`].
pub async fn with_sudo_async<T, F, Fut>(invoker: &Invoker, action: F) -> T
where
    F: FnOnce(Invoker) -> Fut,
    Fut: Future<Output = T>,
{
    action(elevate(invoker)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ProcessArgs;

    fn start() -> StartInfo {
        StartInfo::new("/usr/bin/apt").with_args(ProcessArgs::from(&["install", "jq"][..]))
    }

    #[test]
    fn wrap_moves_target_into_arguments() {
        let mut start = start();
        wrap(&mut start);
        assert_eq!(start.file, "sudo");
        assert_eq!(&*start.args, ["/usr/bin/apt", "install", "jq"]);
    }

    #[test]
    fn elevated_invoker_rewrites_on_unix_hosts() {
        let base = Invoker::new();
        let prepared = elevate_on(&base, Platform::Linux).prepare(start());
        assert_eq!(prepared.file, "sudo");
        assert_eq!(prepared.args[0], "/usr/bin/apt");
    }

    #[test]
    fn elevation_is_a_no_op_on_windows() {
        let prepared = elevate_on(&Invoker::new(), Platform::Windows).prepare(start());
        assert_eq!(prepared, start());
    }

    #[test]
    fn base_invoker_is_untouched() {
        let base = Invoker::new();
        let _elevated = elevate_on(&base, Platform::Darwin);
        assert_eq!(base.prepare(start()).file, "/usr/bin/apt");
    }

    #[cfg(unix)]
    #[test]
    fn with_sudo_scopes_the_hook() {
        let base = Invoker::new();
        let inside = with_sudo(&base, |invoker| invoker.prepare(start()));
        let outside = base.prepare(start());

        assert_eq!(inside.file, "sudo");
        assert_eq!(outside.file, "/usr/bin/apt");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn with_sudo_async_scopes_the_hook() {
        let base = Invoker::new();
        let inside = with_sudo_async(&base, |invoker| async move { invoker.prepare(start()) }).await;
        assert_eq!(inside.args.len(), 3);
        assert_eq!(base.prepare(start()).args.len(), 2);
    }
}
