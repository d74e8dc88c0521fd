//! Executable resolution, in the spirit of `which`.
//!
//! A [`Resolver`] owns a path cache and a [`Host`]. Lookups go, in order:
//! cache, absolute-path fast case, prepended search paths, then every entry
//! of the host's search-path variable (with environment references expanded).
//! File names are compared case-insensitively on every platform.
//!
//! Only successful lookups are cached. A miss always searches again, so a
//! tool installed after a failed lookup is found on the next call.

#[cfg(test)]
mod tests;

use crate::env::Host;
use crate::error::{ExekitError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};
use tracing::{debug, trace};

static GLOBAL: LazyLock<Arc<Resolver>> = LazyLock::new(|| Arc::new(Resolver::new()));

/// Executable resolver with its own path cache.
#[derive(Debug)]
pub struct Resolver {
    host: Host,
    cache: Mutex<HashMap<String, PathBuf>>,
    scans: AtomicUsize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a directory search needs, computed once per lookup.
struct SearchPlan {
    root: String,
    base_lower: String,
    dirs: Vec<PathBuf>,
}

impl Resolver {
    /// A resolver for the running host with an empty cache.
    pub fn new() -> Self {
        Self::with_host(Host::current())
    }

    pub fn with_host(host: Host) -> Self {
        Self {
            host,
            cache: Mutex::new(HashMap::new()),
            scans: AtomicUsize::new(0),
        }
    }

    /// The process-wide resolver used by [`which`] and the global registry.
    pub fn global() -> &'static Arc<Resolver> {
        &GLOBAL
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Number of directory searches performed so far.
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    /// The cached location for `name`, keyed by its extension-stripped root.
    pub fn cached(&self, name: &str) -> Option<PathBuf> {
        self.lock_cache().get(&root_name(name)).cloned()
    }

    /// Resolve `name` to the absolute path of an executable file.
    ///
    /// `prepend` directories are searched before the search-path variable;
    /// relative entries are made absolute against the current directory.
    /// With `use_cache` false the cache is never read and an absolute-path
    /// hit is not stored; search hits are stored either way.
    ///
    /// Returns `Ok(None)` when nothing matches. Fails with
    /// [`ExekitError::Argument`] when `name` is empty.
    pub fn resolve(
        &self,
        name: &str,
        prepend: &[PathBuf],
        use_cache: bool,
    ) -> Result<Option<PathBuf>> {
        require_name(name)?;

        if use_cache && let Some(hit) = self.cached(name) {
            trace!(name, path = %hit.display(), "resolver cache hit");
            return Ok(Some(hit));
        }

        let path = Path::new(name);
        if path.is_absolute() && is_file(path) {
            if use_cache {
                self.remember(&root_name(name), name, path);
            }
            return Ok(Some(path.to_path_buf()));
        }

        let plan = self.plan(name, prepend)?;
        self.scans.fetch_add(1, Ordering::Relaxed);

        for dir in &plan.dirs {
            if !dir.is_dir() {
                continue;
            }

            if let Some(found) = scan_dir(dir, &plan.base_lower) {
                debug!(name, path = %found.display(), "resolved executable");
                self.remember(&plan.root, name, &found);
                return Ok(Some(found));
            }
        }

        debug!(name, searched = plan.dirs.len(), "executable not found");
        Ok(None)
    }

    /// Async variant of [`resolve`](Self::resolve) using non-blocking filesystem calls.
    pub async fn resolve_async(
        &self,
        name: &str,
        prepend: &[PathBuf],
        use_cache: bool,
    ) -> Result<Option<PathBuf>> {
        require_name(name)?;

        if use_cache && let Some(hit) = self.cached(name) {
            trace!(name, path = %hit.display(), "resolver cache hit");
            return Ok(Some(hit));
        }

        let path = Path::new(name);
        if path.is_absolute() && is_file_async(path).await {
            if use_cache {
                self.remember(&root_name(name), name, path);
            }
            return Ok(Some(path.to_path_buf()));
        }

        let plan = self.plan(name, prepend)?;
        self.scans.fetch_add(1, Ordering::Relaxed);

        for dir in &plan.dirs {
            let is_dir = tokio::fs::metadata(dir)
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }

            if let Some(found) = scan_dir_async(dir, &plan.base_lower).await {
                debug!(name, path = %found.display(), "resolved executable");
                self.remember(&plan.root, name, &found);
                return Ok(Some(found));
            }
        }

        debug!(name, searched = plan.dirs.len(), "executable not found");
        Ok(None)
    }

    /// Build the ordered directory list for a search.
    fn plan(&self, name: &str, prepend: &[PathBuf]) -> Result<SearchPlan> {
        let mut dirs = Vec::with_capacity(prepend.len());
        for dir in prepend {
            if dir.as_os_str().is_empty() {
                continue;
            }
            let absolute = std::path::absolute(dir).map_err(|e| {
                ExekitError::Io(format!(
                    "failed to make search path '{}' absolute: {}",
                    dir.display(),
                    e
                ))
            })?;
            dirs.push(absolute);
        }

        for segment in self.host.search_paths() {
            let expanded = self.host.expand(&segment)?;
            if expanded.trim().is_empty() {
                continue;
            }
            dirs.push(PathBuf::from(expanded));
        }

        let base = Path::new(name)
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        let base_lower = base.to_lowercase();

        if self.host.platform().is_windows() {
            let has_ext = self
                .host
                .path_extensions()
                .iter()
                .any(|ext| base_lower.ends_with(ext.as_str()));
            trace!(name, has_ext, "matching windows executable by exact file name");
        }

        Ok(SearchPlan {
            root: root_name(name),
            base_lower,
            dirs,
        })
    }

    fn remember(&self, root: &str, name: &str, path: &Path) {
        let mut cache = self.lock_cache();
        cache.insert(root.to_string(), path.to_path_buf());
        cache.insert(name.to_string(), path.to_path_buf());
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<String, PathBuf>> {
        // Writes are whole-entry inserts, so a poisoned map is still consistent.
        self.cache.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

/// Resolve `name` with the global resolver, using its cache.
pub fn which(name: &str) -> Result<Option<PathBuf>> {
    Resolver::global().resolve(name, &[], true)
}

/// Async variant of [`which`].
pub async fn which_async(name: &str) -> Result<Option<PathBuf>> {
    Resolver::global().resolve_async(name, &[], true).await
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ExekitError::Argument(
            "executable name is required".to_string(),
        ));
    }
    Ok(())
}

/// File name without directories or extension, used as the cache key.
fn root_name(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

fn is_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

async fn is_file_async(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// First regular file in `dir` whose name matches `base_lower` ignoring case.
///
/// Symlinks are followed. Read errors are logged and treated as no match.
fn scan_dir(dir: &Path, base_lower: &str) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "skipping unreadable search directory");
            return None;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        if entry.file_name().to_string_lossy().to_lowercase() != base_lower {
            continue;
        }

        let path = entry.path();
        if is_file(&path) {
            return Some(path);
        }
    }

    None
}

async fn scan_dir_async(dir: &Path, base_lower: &str) -> Option<PathBuf> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "skipping unreadable search directory");
            return None;
        }
    };

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "stopping scan of search directory");
                return None;
            }
        };

        if entry.file_name().to_string_lossy().to_lowercase() != base_lower {
            continue;
        }

        let path = entry.path();
        if is_file_async(&path).await {
            return Some(path);
        }
    }
}
