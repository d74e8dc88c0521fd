//! Registry of named tools and their per-platform fallback locations.
//!
//! Wrapper modules register the tools they drive (for example `age`), then
//! locate them with [`Registry::find`]. A lookup tries, in order:
//! - the path remembered from an earlier successful lookup
//! - the resolver, using the search-path variable
//! - the fallback list for the current platform (Darwin also tries `linux`)
//!
//! Fallback entries are path templates; environment references are expanded
//! before the existence check.


use crate::env::Platform;
use crate::error::{ExekitError, Result};
use crate::which::Resolver;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};
use tracing::debug;

static GLOBAL: LazyLock<Registry> =
    LazyLock::new(|| Registry::with_resolver(Arc::clone(Resolver::global())));

/// A registered tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutableEntry {
    /// Logical name, also the file name handed to the resolver.
    pub name: String,

    /// Resolved location; set explicitly or filled in by a successful lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linux: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub darwin: Vec<String>,
}

impl ExecutableEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_fallbacks<S: Into<String>>(
        mut self,
        platform: Platform,
        paths: impl IntoIterator<Item = S>,
    ) -> Self {
        let paths = paths.into_iter().map(Into::into);
        match platform {
            Platform::Windows => self.windows.extend(paths),
            Platform::Linux => self.linux.extend(paths),
            Platform::Darwin => self.darwin.extend(paths),
            Platform::Other => {}
        }
        self
    }

    /// Fallback templates to try on `platform`, in order.
    ///
    /// Darwin hosts try their own list, then the Linux list.
    pub fn fallbacks(&self, platform: Platform) -> Vec<&str> {
        let primary: &[String] = match platform {
            Platform::Windows => &self.windows,
            Platform::Linux => &self.linux,
            Platform::Darwin => &self.darwin,
            Platform::Other => &[],
        };

        let mut out: Vec<&str> = primary.iter().map(String::as_str).collect();
        if platform == Platform::Darwin {
            out.extend(self.linux.iter().map(String::as_str));
        }
        out
    }
}

/// Name-keyed tool registry backed by a [`Resolver`].
#[derive(Debug)]
pub struct Registry {
    resolver: Arc<Resolver>,
    entries: Mutex<HashMap<String, ExecutableEntry>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_resolver(Arc::new(Resolver::new()))
    }
}

/// What a lookup should do after consulting the entry table.
enum Plan {
    Known(PathBuf),
    Unregistered,
    Search(ExecutableEntry),
}

impl Registry {
    pub fn with_resolver(resolver: Arc<Resolver>) -> Self {
        Self {
            resolver,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide registry, sharing the global resolver.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Insert or replace an entry, keyed by its lowercased name.
    pub fn register(&self, entry: ExecutableEntry) {
        self.lock_entries().insert(entry.name.to_lowercase(), entry);
    }

    /// Register `entry` unless a tool with the same name already exists.
    pub fn register_default(&self, entry: ExecutableEntry) {
        self.lock_entries()
            .entry(entry.name.to_lowercase())
            .or_insert(entry);
    }

    /// Snapshot of the entry registered under `name`.
    pub fn entry(&self, name: &str) -> Option<ExecutableEntry> {
        self.lock_entries().get(&name.to_lowercase()).cloned()
    }

    /// Names of all registered tools, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .lock_entries()
            .values()
            .map(|e| e.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Locate a tool, registering it on first use.
    pub fn find(&self, name: &str) -> Result<Option<PathBuf>> {
        let entry = match self.plan(name)? {
            Plan::Known(path) => return Ok(Some(path)),
            Plan::Unregistered => {
                let found = self.resolver.resolve(name, &[], true)?;
                self.auto_register(name, found.clone());
                return Ok(found);
            }
            Plan::Search(entry) => entry,
        };

        if let Some(found) = self.resolver.resolve(&entry.name, &[], true)? {
            self.persist(&entry.name, &found);
            return Ok(Some(found));
        }

        let platform = self.resolver.host().platform();
        for template in entry.fallbacks(platform) {
            let location = PathBuf::from(self.resolver.host().expand(template)?);
            if location.exists() {
                debug!(name, path = %location.display(), %platform, "using fallback location");
                self.persist(&entry.name, &location);
                return Ok(Some(location));
            }
        }

        debug!(name, %platform, "no fallback location exists");
        Ok(None)
    }

    /// Async variant of [`find`](Self::find).
    pub async fn find_async(&self, name: &str) -> Result<Option<PathBuf>> {
        let entry = match self.plan(name)? {
            Plan::Known(path) => return Ok(Some(path)),
            Plan::Unregistered => {
                let found = self.resolver.resolve_async(name, &[], true).await?;
                self.auto_register(name, found.clone());
                return Ok(found);
            }
            Plan::Search(entry) => entry,
        };

        if let Some(found) = self.resolver.resolve_async(&entry.name, &[], true).await? {
            self.persist(&entry.name, &found);
            return Ok(Some(found));
        }

        let platform = self.resolver.host().platform();
        for template in entry.fallbacks(platform) {
            let location = PathBuf::from(self.resolver.host().expand(template)?);
            if tokio::fs::try_exists(&location).await.unwrap_or(false) {
                debug!(name, path = %location.display(), %platform, "using fallback location");
                self.persist(&entry.name, &location);
                return Ok(Some(location));
            }
        }

        debug!(name, %platform, "no fallback location exists");
        Ok(None)
    }

    /// Like [`find`](Self::find), but absence is an error.
    pub fn find_or_err(&self, name: &str) -> Result<PathBuf> {
        self.find(name)?
            .ok_or_else(|| ExekitError::ExecutableNotFound(name.to_string()))
    }

    /// Async variant of [`find_or_err`](Self::find_or_err).
    pub async fn find_or_err_async(&self, name: &str) -> Result<PathBuf> {
        self.find_async(name)
            .await?
            .ok_or_else(|| ExekitError::ExecutableNotFound(name.to_string()))
    }

    fn plan(&self, name: &str) -> Result<Plan> {
        if name.trim().is_empty() {
            return Err(ExekitError::Argument(
                "executable name is required".to_string(),
            ));
        }

        Ok(match self.lock_entries().get(&name.to_lowercase()) {
            None => Plan::Unregistered,
            Some(ExecutableEntry {
                path: Some(path), ..
            }) => Plan::Known(path.clone()),
            Some(entry) => Plan::Search(entry.clone()),
        })
    }

    fn auto_register(&self, name: &str, path: Option<PathBuf>) {
        let mut entry = ExecutableEntry::new(name);
        entry.path = path;
        self.register_default(entry);
    }

    fn persist(&self, name: &str, path: &std::path::Path) {
        if let Some(entry) = self.lock_entries().get_mut(&name.to_lowercase()) {
            entry.path = Some(path.to_path_buf());
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, ExecutableEntry>> {
        self.entries.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}
