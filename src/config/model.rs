//! Config struct definition and default implementation.

use crate::registry::ExecutableEntry;
use serde::{Deserialize, Serialize};

/// File name looked up in the current directory when no path is given.
pub const CONFIG_FILE: &str = "exekit.yaml";

/// Configuration for exekit.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interpreter used by `exec` when none is requested.
    /// Unset means `powershell` on Windows and `bash` elsewhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_shell: Option<String>,

    /// Whether executable lookups read the resolver cache.
    #[serde(default = "default_true")]
    pub use_cache: bool,

    /// Tools added to the registry, with their fallback locations.
    pub tools: Vec<ExecutableEntry>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_shell: None,
            use_cache: default_true(),
            tools: Vec::new(),
        }
    }
}
