//! Environment-reference expansion for path templates.

use crate::error::{ExekitError, Result};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PERCENT_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([^%]+)%").expect("Invalid percent variable regex"));

static BRACED_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("Invalid braced variable regex"));

static BARE_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Za-z0-9_]+)").expect("Invalid bare variable regex"));

/// Expand environment references in `value`.
///
/// Supported forms, applied in this order:
/// - `%VAR%` (only when `windows` is true)
/// - `${VAR:-default}`, `${VAR?message}`, `${VAR}`
/// - `$VAR`
///
/// Unset variables expand to an empty string, except `${VAR?message}` which
/// fails with `message`. A variable set to an empty string counts as unset
/// for the `:-` and `?` forms.
pub fn expand<F>(value: &str, windows: bool, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup_non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

    let mut value = if windows {
        PERCENT_VAR
            .replace_all(value, |caps: &Captures| {
                lookup_non_empty(&caps[1]).unwrap_or_default()
            })
            .into_owned()
    } else {
        value.to_string()
    };

    value = replace_braced(&value, &lookup_non_empty)?;

    Ok(BARE_VAR
        .replace_all(&value, |caps: &Captures| {
            lookup_non_empty(&caps[1]).unwrap_or_default()
        })
        .into_owned())
}

fn replace_braced<F>(value: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(value.len());
    let mut last = 0;

    for caps in BRACED_VAR.captures_iter(value) {
        let whole = caps.get(0).expect("capture group 0 always matches");
        out.push_str(&value[last..whole.start()]);
        out.push_str(&expand_braced(&caps[1], lookup)?);
        last = whole.end();
    }

    out.push_str(&value[last..]);
    Ok(out)
}

fn expand_braced<F>(expr: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some((name, default)) = expr.split_once(":-") {
        return Ok(lookup(name).unwrap_or_else(|| default.to_string()));
    }

    if let Some((name, message)) = expr.split_once('?') {
        return lookup(name).ok_or_else(|| {
            let message = if message.is_empty() {
                format!("{} is not set", name)
            } else {
                message.to_string()
            };
            ExekitError::Expansion(message)
        });
    }

    Ok(lookup(expr).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("HOME", "/home/dev"),
            ("ProgramFiles", "C:\\Program Files"),
            ("EMPTY", ""),
            ("TOOL_DIR", "/opt/tools"),
        ])
    }

    fn run(value: &str, windows: bool) -> Result<String> {
        let vars = vars();
        expand(value, windows, |name| vars.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn expands_braced_variables() {
        assert_eq!(run("${HOME}/bin", false).unwrap(), "/home/dev/bin");
    }

    #[test]
    fn expands_bare_variables() {
        assert_eq!(run("$HOME/.cargo/bin", false).unwrap(), "/home/dev/.cargo/bin");
        assert_eq!(run("$TOOL_DIR/age", false).unwrap(), "/opt/tools/age");
    }

    #[test]
    fn unset_variables_expand_to_empty() {
        assert_eq!(run("${MISSING}/x", false).unwrap(), "/x");
        assert_eq!(run("$MISSING/x", false).unwrap(), "/x");
    }

    #[test]
    fn default_applies_when_unset_or_empty() {
        assert_eq!(run("${MISSING:-/usr}/bin", false).unwrap(), "/usr/bin");
        assert_eq!(run("${EMPTY:-fallback}", false).unwrap(), "fallback");
        assert_eq!(run("${HOME:-/root}", false).unwrap(), "/home/dev");
    }

    #[test]
    fn question_form_fails_with_message() {
        let err = run("${MISSING?install the tool first}", false).unwrap_err();
        assert!(matches!(err, ExekitError::Expansion(_)));
        assert!(err.to_string().contains("install the tool first"));
        assert_eq!(run("${HOME?unused}", false).unwrap(), "/home/dev");
    }

    #[test]
    fn question_form_without_message_names_variable() {
        let err = run("${MISSING?}", false).unwrap_err();
        assert!(err.to_string().contains("MISSING is not set"));
    }

    #[test]
    fn percent_form_only_on_windows() {
        assert_eq!(
            run("%ProgramFiles%\\age\\age.exe", true).unwrap(),
            "C:\\Program Files\\age\\age.exe"
        );
        assert_eq!(run("%ProgramFiles%\\age", false).unwrap(), "%ProgramFiles%\\age");
    }

    #[test]
    fn text_without_references_is_unchanged() {
        assert_eq!(run("/usr/local/bin", false).unwrap(), "/usr/local/bin");
        assert_eq!(run("", true).unwrap(), "");
    }
}
