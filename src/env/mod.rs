//! Host environment access.
//!
//! A [`Host`] bundles the platform family with a source of environment
//! variables. Resolution code reads the search path, `PATHEXT`, and variable
//! references through it, so tests can simulate another platform or a fixed
//! environment without touching the real process state.

mod expand;

pub use expand::expand;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Default executable extensions used on Windows when `PATHEXT` is unset or blank.
pub const DEFAULT_PATHEXT: &str = ".com;.exe;.bat;.cmd;.vbs;.vbe;.js;.jse;.wsf;.wsh";

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
    Darwin,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Darwin
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }

    /// Separator between entries of the search-path variable.
    pub fn path_separator(self) -> char {
        if self.is_windows() { ';' } else { ':' }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
enum VarSource {
    Process,
    Fixed(HashMap<String, String>),
}

/// Platform identity plus environment variable source.
#[derive(Debug, Clone)]
pub struct Host {
    platform: Platform,
    vars: VarSource,
}

impl Default for Host {
    fn default() -> Self {
        Self::current()
    }
}

impl Host {
    /// The running platform, reading the live process environment.
    pub fn current() -> Self {
        Self {
            platform: Platform::current(),
            vars: VarSource::Process,
        }
    }

    /// A simulated host with a fixed set of variables.
    pub fn with_vars<I, K, V>(platform: Platform, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            platform,
            vars: VarSource::Fixed(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Look up a variable. Windows hosts compare names case-insensitively.
    pub fn var(&self, name: &str) -> Option<String> {
        match &self.vars {
            VarSource::Process => std::env::var(name).ok(),
            VarSource::Fixed(map) => {
                if let Some(v) = map.get(name) {
                    return Some(v.clone());
                }
                if self.platform.is_windows() {
                    map.iter()
                        .find(|(k, _)| k.eq_ignore_ascii_case(name))
                        .map(|(_, v)| v.clone())
                } else {
                    None
                }
            }
        }
    }

    /// Entries of the search-path variable, blank segments removed.
    pub fn search_paths(&self) -> Vec<String> {
        let path = self.var("PATH").unwrap_or_default();
        path.split(self.platform.path_separator())
            .filter(|segment| !segment.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Recognized executable extensions, lowercased, from `PATHEXT`.
    pub fn path_extensions(&self) -> Vec<String> {
        let pathext = self
            .var("PATHEXT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PATHEXT.to_string())
            .to_lowercase();

        pathext
            .split(';')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Expand variable references using this host's variables.
    ///
    /// `%VAR%` references are only expanded on Windows hosts.
    pub fn expand(&self, value: &str) -> Result<String> {
        expand(value, self.platform.is_windows(), |name| self.var(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_paths_split_on_platform_separator() {
        let unix = Host::with_vars(Platform::Linux, [("PATH", "/usr/bin::/bin: ")]);
        assert_eq!(unix.search_paths(), vec!["/usr/bin", "/bin"]);

        let windows = Host::with_vars(
            Platform::Windows,
            [("Path", "C:\\Windows;;C:\\Tools")],
        );
        assert_eq!(windows.search_paths(), vec!["C:\\Windows", "C:\\Tools"]);
    }

    #[test]
    fn missing_path_yields_no_entries() {
        let host = Host::with_vars(Platform::Linux, Vec::<(String, String)>::new());
        assert!(host.search_paths().is_empty());
    }

    #[test]
    fn windows_lookup_ignores_case() {
        let host = Host::with_vars(Platform::Windows, [("PathExt", ".EXE")]);
        assert_eq!(host.var("PATHEXT").as_deref(), Some(".EXE"));

        let linux = Host::with_vars(Platform::Linux, [("PathExt", ".EXE")]);
        assert_eq!(linux.var("PATHEXT"), None);
    }

    #[test]
    fn path_extensions_default_when_blank() {
        let host = Host::with_vars(Platform::Windows, [("PATHEXT", "   ")]);
        assert_eq!(
            host.path_extensions(),
            vec![".com", ".exe", ".bat", ".cmd", ".vbs", ".vbe", ".js", ".jse", ".wsf", ".wsh"]
        );
    }

    #[test]
    fn path_extensions_are_lowercased() {
        let host = Host::with_vars(Platform::Windows, [("PATHEXT", ".EXE;.PS1;;")]);
        assert_eq!(host.path_extensions(), vec![".exe", ".ps1"]);
    }

    #[test]
    fn expand_uses_percent_form_only_on_windows() {
        let windows = Host::with_vars(Platform::Windows, [("TOOLS", "C:\\tools")]);
        assert_eq!(windows.expand("%TOOLS%\\age.exe").unwrap(), "C:\\tools\\age.exe");

        let darwin = Host::with_vars(Platform::Darwin, [("TOOLS", "/opt")]);
        assert_eq!(darwin.expand("%TOOLS%/age").unwrap(), "%TOOLS%/age");
        assert_eq!(darwin.expand("${TOOLS}/age").unwrap(), "/opt/age");
    }

    #[test]
    fn platform_names_round_trip_through_serde() {
        let platform: Platform = serde_yaml::from_str("darwin").unwrap();
        assert_eq!(platform, Platform::Darwin);
        assert_eq!(platform.to_string(), "darwin");
    }
}
