//! Structured-fields to command-line flags conversion.

use super::list::ProcessArgs;
use super::source::{ArgValue, Fields};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Function overriding the default camelCase to kebab-case key transform.
pub type KeyTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Options controlling [`convert_fields`].
///
/// Everything except `transform_key` can be read from YAML or JSON, so tool
/// wrappers can keep their conversion rules in configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Prefix placed before every flag name.
    pub prefix: String,

    /// Field names that are never emitted.
    pub exclude: Vec<String>,

    /// Field name to flag name overrides, applied before the key transform.
    pub map: HashMap<String, String>,

    #[serde(skip)]
    pub transform_key: Option<KeyTransform>,

    /// Field names emitted as positional values after all flags.
    pub prepend: Vec<String>,

    /// Field names emitted as positional values before all flags.
    pub append: Vec<String>,

    /// Field names whose list values are joined into one token.
    pub concat_args: Vec<String>,

    /// Delimiter used for `concat_args`.
    pub concat_delimiter: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            prefix: "--".to_string(),
            exclude: Vec::new(),
            map: HashMap::new(),
            transform_key: None,
            prepend: Vec::new(),
            append: Vec::new(),
            concat_args: Vec::new(),
            concat_delimiter: ",".to_string(),
        }
    }
}

impl fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertOptions")
            .field("prefix", &self.prefix)
            .field("exclude", &self.exclude)
            .field("map", &self.map)
            .field("transform_key", &self.transform_key.as_ref().map(|_| "<fn>"))
            .field("prepend", &self.prepend)
            .field("append", &self.append)
            .field("concat_args", &self.concat_args)
            .field("concat_delimiter", &self.concat_delimiter)
            .finish()
    }
}

impl ConvertOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_append<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.append.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_prepend<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.prepend.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_exclude<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_concat<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.concat_args.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_map(mut self, field: impl Into<String>, flag: impl Into<String>) -> Self {
        self.map.insert(field.into(), flag.into());
        self
    }

    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transform_key = Some(Arc::new(transform));
        self
    }

    fn transform(&self, key: &str) -> String {
        match &self.transform_key {
            Some(f) => f(key),
            None => kebab_case(key),
        }
    }
}

/// Default key transform: every uppercase letter starts a new `-` segment.
///
/// `maxRetries` becomes `max-retries`; already-kebab or snake names pass
/// through unchanged.
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_uppercase() {
            out.push('-');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert structured fields into flag tokens.
///
/// Fields are processed in order. `append` fields are collected and spliced
/// to the front of the result, `prepend` fields to the back.
pub fn convert_fields(fields: &Fields, options: &ConvertOptions) -> ProcessArgs {
    let mut args = ProcessArgs::new();
    let mut leading: Vec<String> = Vec::new();
    let mut trailing: Vec<String> = Vec::new();

    for (key, value) in fields.iter() {
        if matches!(value, ArgValue::Null) {
            continue;
        }

        if options.exclude.iter().any(|n| n == key) {
            continue;
        }

        if options.append.iter().any(|n| n == key) {
            push_positional(&mut leading, value);
            continue;
        }

        if options.prepend.iter().any(|n| n == key) {
            push_positional(&mut trailing, value);
            continue;
        }

        let name = options.map.get(key).map(String::as_str).unwrap_or(key);
        let flag = format!("{}{}", options.prefix, options.transform(name));

        match value {
            ArgValue::Null => {}
            ArgValue::Bool(true) => {
                args.extend_tokens([flag]);
            }
            ArgValue::Bool(false) => {}
            ArgValue::List(items) => {
                if options.concat_args.iter().any(|n| n == key) {
                    args.extend_tokens([flag, items.join(&options.concat_delimiter)]);
                } else {
                    for item in items {
                        args.extend_tokens([flag.clone(), item.clone()]);
                    }
                }
            }
            ArgValue::Str(_) | ArgValue::Int(_) | ArgValue::Float(_) => {
                args.extend_tokens([flag, value.to_string()]);
            }
        }
    }

    if !leading.is_empty() {
        args.unshift(leading);
    }

    if !trailing.is_empty() {
        args.extend_tokens(trailing);
    }

    args
}

fn push_positional(queue: &mut Vec<String>, value: &ArgValue) {
    match value {
        ArgValue::List(items) => queue.extend(items.iter().cloned()),
        other => queue.push(other.to_string()),
    }
}
