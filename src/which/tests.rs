//! Tests for executable resolution.

use super::*;
use crate::env::Platform;
use crate::test_support::{DirGuard, create_executable, host_with_path, host_with_vars};
use serial_test::serial;
use tempfile::TempDir;

fn resolver_for(dirs: &[&Path]) -> Resolver {
    Resolver::with_host(host_with_path(Platform::Linux, dirs))
}

#[test]
fn empty_name_is_an_argument_error() {
    let resolver = resolver_for(&[]);
    let err = resolver.resolve("", &[], true).unwrap_err();
    assert!(matches!(err, ExekitError::Argument(_)));
    assert!(err.to_string().contains("required"));
}

#[test]
fn finds_executable_on_search_path() {
    let bin = TempDir::new().unwrap();
    let tool = create_executable(bin.path(), "tool");

    let resolver = resolver_for(&[bin.path()]);
    assert_eq!(resolver.resolve("tool", &[], true).unwrap(), Some(tool));
}

#[test]
fn match_ignores_case() {
    let bin = TempDir::new().unwrap();
    let tool = create_executable(bin.path(), "Tool");

    let resolver = resolver_for(&[bin.path()]);
    assert_eq!(resolver.resolve("TOOL", &[], true).unwrap(), Some(tool));
}

#[test]
fn earlier_directories_win() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let expected = create_executable(first.path(), "tool");
    create_executable(second.path(), "tool");

    let resolver = resolver_for(&[first.path(), second.path()]);
    assert_eq!(resolver.resolve("tool", &[], true).unwrap(), Some(expected));
}

#[test]
fn prepended_paths_are_searched_first() {
    let system = TempDir::new().unwrap();
    let extra = TempDir::new().unwrap();
    create_executable(system.path(), "tool");
    let expected = create_executable(extra.path(), "tool");

    let resolver = resolver_for(&[system.path()]);
    let found = resolver
        .resolve("tool", &[extra.path().to_path_buf()], false)
        .unwrap();
    assert_eq!(found, Some(expected));
}

#[test]
#[serial]
fn relative_prepended_paths_resolve_against_cwd() {
    let work = TempDir::new().unwrap();
    std::fs::create_dir(work.path().join("bin")).unwrap();
    create_executable(&work.path().join("bin"), "local-tool");

    let resolver = resolver_for(&[]);
    let found = {
        let _guard = DirGuard::new(work.path());
        resolver
            .resolve("local-tool", &[PathBuf::from("bin")], true)
            .unwrap()
    };

    let found = found.expect("tool should be found in relative prepend path");
    assert!(found.is_absolute());
    assert_eq!(
        found.canonicalize().unwrap(),
        work.path().join("bin").join("local-tool").canonicalize().unwrap()
    );
}

#[test]
fn skips_missing_and_non_directory_entries() {
    let bin = TempDir::new().unwrap();
    let not_a_dir = create_executable(bin.path(), "plain-file");
    let missing = bin.path().join("does-not-exist");
    let real = TempDir::new().unwrap();
    let tool = create_executable(real.path(), "tool");

    let resolver = resolver_for(&[missing.as_path(), not_a_dir.as_path(), real.path()]);
    assert_eq!(resolver.resolve("tool", &[], true).unwrap(), Some(tool));
}

#[test]
fn directories_with_matching_names_are_ignored() {
    let bin = TempDir::new().unwrap();
    std::fs::create_dir(bin.path().join("tool")).unwrap();

    let resolver = resolver_for(&[bin.path()]);
    assert_eq!(resolver.resolve("tool", &[], true).unwrap(), None);
}

#[test]
fn missing_executable_returns_none() {
    let bin = TempDir::new().unwrap();
    let resolver = resolver_for(&[bin.path()]);
    assert_eq!(resolver.resolve("nope", &[], true).unwrap(), None);
}

#[test]
fn cached_lookups_scan_once() {
    let bin = TempDir::new().unwrap();
    create_executable(bin.path(), "tool");
    let resolver = resolver_for(&[bin.path()]);

    let first = resolver.resolve("tool", &[], true).unwrap();
    let second = resolver.resolve("tool", &[], true).unwrap();

    assert_eq!(first, second);
    assert_eq!(resolver.scan_count(), 1);
}

#[test]
fn disabling_cache_always_rescans() {
    let bin = TempDir::new().unwrap();
    create_executable(bin.path(), "tool");
    let resolver = resolver_for(&[bin.path()]);

    resolver.resolve("tool", &[], false).unwrap();
    resolver.resolve("tool", &[], false).unwrap();
    resolver.resolve("tool", &[], false).unwrap();

    assert_eq!(resolver.scan_count(), 3);
}

#[test]
fn cache_survives_file_removal_until_bypassed() {
    let bin = TempDir::new().unwrap();
    let tool = create_executable(bin.path(), "tool");
    let resolver = resolver_for(&[bin.path()]);

    assert_eq!(resolver.resolve("tool", &[], true).unwrap(), Some(tool.clone()));
    std::fs::remove_file(&tool).unwrap();

    assert_eq!(resolver.resolve("tool", &[], true).unwrap(), Some(tool));
    assert_eq!(resolver.resolve("tool", &[], false).unwrap(), None);
}

#[test]
fn cache_is_keyed_by_root_name() {
    let bin = TempDir::new().unwrap();
    let script = create_executable(bin.path(), "deploy.sh");
    let resolver = resolver_for(&[bin.path()]);

    assert_eq!(resolver.resolve("deploy.sh", &[], true).unwrap(), Some(script.clone()));
    assert_eq!(resolver.cached("deploy"), Some(script.clone()));
    assert_eq!(resolver.resolve("deploy", &[], true).unwrap(), Some(script));
    assert_eq!(resolver.scan_count(), 1);
}

#[test]
fn failures_are_not_cached() {
    let bin = TempDir::new().unwrap();
    let resolver = resolver_for(&[bin.path()]);

    assert_eq!(resolver.resolve("late", &[], true).unwrap(), None);
    let late = create_executable(bin.path(), "late");
    assert_eq!(resolver.resolve("late", &[], true).unwrap(), Some(late));
    assert_eq!(resolver.scan_count(), 2);
}

#[test]
fn clear_cache_forces_rescan() {
    let bin = TempDir::new().unwrap();
    create_executable(bin.path(), "tool");
    let resolver = resolver_for(&[bin.path()]);

    resolver.resolve("tool", &[], true).unwrap();
    resolver.clear_cache();
    assert!(resolver.cached("tool").is_none());
    resolver.resolve("tool", &[], true).unwrap();
    assert_eq!(resolver.scan_count(), 2);
}

#[test]
fn absolute_path_short_circuits_search() {
    let bin = TempDir::new().unwrap();
    let tool = create_executable(bin.path(), "tool");
    let resolver = resolver_for(&[]);

    let name = tool.to_string_lossy().into_owned();
    assert_eq!(resolver.resolve(&name, &[], true).unwrap(), Some(tool.clone()));
    assert_eq!(resolver.scan_count(), 0);
    assert_eq!(resolver.cached("tool"), Some(tool));
}

#[test]
fn absolute_path_without_cache_is_not_stored() {
    let bin = TempDir::new().unwrap();
    let tool = create_executable(bin.path(), "tool");
    let resolver = resolver_for(&[]);

    let name = tool.to_string_lossy().into_owned();
    assert_eq!(resolver.resolve(&name, &[], false).unwrap(), Some(tool));
    assert!(resolver.cached("tool").is_none());
}

#[test]
fn missing_absolute_path_falls_back_to_search() {
    let bin = TempDir::new().unwrap();
    let tool = create_executable(bin.path(), "tool");
    let resolver = resolver_for(&[bin.path()]);

    let name = Path::new("/definitely/not/here/tool");
    let found = resolver.resolve(&name.to_string_lossy(), &[], true).unwrap();
    assert_eq!(found, Some(tool));
    assert_eq!(resolver.scan_count(), 1);
}

#[test]
fn search_path_entries_are_expanded() {
    let bin = TempDir::new().unwrap();
    let tool = create_executable(bin.path(), "tool");
    let bin_dir = bin.path().to_string_lossy().into_owned();

    let host = host_with_vars(
        Platform::Linux,
        &[("PATH", "${TOOLS_HOME}:$OTHER"), ("TOOLS_HOME", bin_dir.as_str())],
    );
    let resolver = Resolver::with_host(host);
    assert_eq!(resolver.resolve("tool", &[], true).unwrap(), Some(tool));
}

#[test]
fn required_variable_in_search_path_propagates_error() {
    let host = host_with_vars(Platform::Linux, &[("PATH", "${TOOLS_HOME?TOOLS_HOME must be set}")]);
    let resolver = Resolver::with_host(host);
    let err = resolver.resolve("tool", &[], true).unwrap_err();
    assert!(matches!(err, ExekitError::Expansion(_)));
}

#[test]
fn windows_host_matches_extension_case_insensitively() {
    let bin = TempDir::new().unwrap();
    let tool = create_executable(bin.path(), "AGE.EXE");

    let host = host_with_path(Platform::Windows, &[bin.path()]);
    let resolver = Resolver::with_host(host);
    assert_eq!(resolver.resolve("age.exe", &[], true).unwrap(), Some(tool));
}

#[test]
fn windows_host_does_not_append_extensions() {
    let bin = TempDir::new().unwrap();
    create_executable(bin.path(), "age.exe");

    let host = host_with_path(Platform::Windows, &[bin.path()]);
    let resolver = Resolver::with_host(host);
    assert_eq!(resolver.resolve("age", &[], true).unwrap(), None);
}

#[cfg(unix)]
#[test]
fn symlinked_executables_are_found() {
    let real = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let target = create_executable(real.path(), "python3.12");
    let link = bin.path().join("python3");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let resolver = resolver_for(&[bin.path()]);
    assert_eq!(resolver.resolve("python3", &[], false).unwrap(), Some(link));
}

#[tokio::test]
async fn async_resolution_matches_sync() {
    let bin = TempDir::new().unwrap();
    let tool = create_executable(bin.path(), "tool");
    let resolver = resolver_for(&[bin.path()]);

    let found = resolver.resolve_async("tool", &[], true).await.unwrap();
    assert_eq!(found, Some(tool.clone()));

    // Sync lookup reuses the cache filled by the async one.
    assert_eq!(resolver.resolve("tool", &[], true).unwrap(), Some(tool));
    assert_eq!(resolver.scan_count(), 1);
}

#[tokio::test]
async fn async_resolution_rejects_empty_name() {
    let resolver = resolver_for(&[]);
    let err = resolver.resolve_async("  ", &[], true).await.unwrap_err();
    assert!(matches!(err, ExekitError::Argument(_)));
}

#[tokio::test]
async fn async_absolute_path_fast_path() {
    let bin = TempDir::new().unwrap();
    let tool = create_executable(bin.path(), "tool");
    let resolver = resolver_for(&[]);

    let name = tool.to_string_lossy().into_owned();
    let found = resolver.resolve_async(&name, &[], true).await.unwrap();
    assert_eq!(found, Some(tool));
    assert_eq!(resolver.scan_count(), 0);
}

#[cfg(unix)]
#[test]
fn global_which_finds_sh() {
    let found = which("sh").unwrap().expect("sh should be on PATH");
    assert!(found.is_absolute());
}

#[cfg(unix)]
mod unreadable {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// A directory holding `tool` that the current user cannot list.
    ///
    /// Returns `None` when permissions are not enforced (running as root).
    fn locked_dir(parent: &Path) -> Option<PathBuf> {
        let dir = parent.join("locked");
        std::fs::create_dir(&dir).unwrap();
        create_executable(&dir, "tool");
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o000)).unwrap();

        if std::fs::read_dir(&dir).is_ok() {
            unlock(&dir);
            return None;
        }
        Some(dir)
    }

    fn unlock(dir: &Path) {
        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn unreadable_directory_is_skipped() {
        let root = TempDir::new().unwrap();
        let Some(locked) = locked_dir(root.path()) else {
            return;
        };
        let bin = TempDir::new().unwrap();
        let tool = create_executable(bin.path(), "tool");

        assert_eq!(scan_dir(&locked, "tool"), None);
        let resolver = resolver_for(&[locked.as_path(), bin.path()]);
        let found = resolver.resolve("tool", &[], false).unwrap();

        unlock(&locked);
        assert_eq!(found, Some(tool));
    }

    #[tokio::test]
    async fn unreadable_directory_is_skipped_async() {
        let root = TempDir::new().unwrap();
        let Some(locked) = locked_dir(root.path()) else {
            return;
        };
        let bin = TempDir::new().unwrap();
        let tool = create_executable(bin.path(), "tool");

        assert_eq!(scan_dir_async(&locked, "tool").await, None);
        let resolver = resolver_for(&[locked.as_path(), bin.path()]);
        let found = resolver.resolve_async("tool", &[], false).await.unwrap();

        unlock(&locked);
        assert_eq!(found, Some(tool));
    }
}
