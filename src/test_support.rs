use crate::env::{Host, Platform};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A simulated host whose search path is exactly `dirs`.
pub(crate) fn host_with_path(platform: Platform, dirs: &[&Path]) -> Host {
    let path = dirs
        .iter()
        .map(|d| d.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(&platform.path_separator().to_string());
    Host::with_vars(platform, [("PATH".to_string(), path)])
}

/// A simulated host with the given search path and extra variables.
pub(crate) fn host_with_vars(platform: Platform, vars: &[(&str, &str)]) -> Host {
    Host::with_vars(
        platform,
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())),
    )
}

/// Create an executable file named `name` in `dir` and return its path.
pub(crate) fn create_executable(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    path
}
