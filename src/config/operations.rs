//! Config loading, validation, and registry setup.

use super::model::{CONFIG_FILE, Config};
use crate::env::Platform;
use crate::error::{ExekitError, Result};
use crate::registry::Registry;
use crate::tools::shell;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ExekitError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), "loaded config");
        Self::from_yaml(&content)
    }

    /// Load `explicit` when given, else `exekit.yaml` in `dir` when present,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Self::load(candidate);
        }

        Ok(Self::default())
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ExekitError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ExekitError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `default_shell`, when set, must name a supported interpreter
    /// - every tool needs a non-empty name
    /// - tool names must be unique, ignoring case
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.default_shell
            && shell::lookup(name).is_err()
        {
            return Err(ExekitError::Config(format!(
                "config validation failed: default_shell '{}' is not supported (expected one of: {})",
                name,
                shell::SHELLS
                    .iter()
                    .map(|s| s.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        let mut seen = HashSet::new();
        for tool in &self.tools {
            if tool.name.trim().is_empty() {
                return Err(ExekitError::Config(
                    "config validation failed: tool entries must have a non-empty name"
                        .to_string(),
                ));
            }
            if !seen.insert(tool.name.to_lowercase()) {
                return Err(ExekitError::Config(format!(
                    "config validation failed: tool '{}' is listed more than once",
                    tool.name
                )));
            }
        }

        Ok(())
    }

    /// The interpreter `exec` uses by default on `platform`.
    pub fn shell_for(&self, platform: Platform) -> &str {
        self.default_shell
            .as_deref()
            .unwrap_or_else(|| shell::default_shell(platform))
    }

    /// Register every configured tool, replacing existing entries.
    pub fn register_tools(&self, registry: &Registry) {
        for tool in &self.tools {
            registry.register(tool.clone());
        }
    }
}
