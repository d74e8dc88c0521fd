//! Argument sources accepted at call boundaries.

use super::list::ProcessArgs;
use crate::error::{ExekitError, Result};
use std::fmt;

/// Where a call site's arguments come from.
#[derive(Debug, Clone, Default)]
pub enum ArgSource {
    /// No arguments.
    #[default]
    None,
    /// A single command-line string, tokenized on conversion.
    Raw(String),
    /// Already-split tokens, used verbatim.
    Tokens(Vec<String>),
    /// An already-built list, passed through unchanged.
    Args(ProcessArgs),
    /// Structured fields converted into flags.
    Fields(Fields),
}

impl From<&str> for ArgSource {
    fn from(value: &str) -> Self {
        ArgSource::Raw(value.to_string())
    }
}

impl From<String> for ArgSource {
    fn from(value: String) -> Self {
        ArgSource::Raw(value)
    }
}

impl From<Vec<String>> for ArgSource {
    fn from(value: Vec<String>) -> Self {
        ArgSource::Tokens(value)
    }
}

impl From<&[&str]> for ArgSource {
    fn from(value: &[&str]) -> Self {
        ArgSource::Tokens(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<ProcessArgs> for ArgSource {
    fn from(value: ProcessArgs) -> Self {
        ArgSource::Args(value)
    }
}

impl From<Fields> for ArgSource {
    fn from(value: Fields) -> Self {
        ArgSource::Fields(value)
    }
}

impl TryFrom<serde_json::Value> for ArgSource {
    type Error = ExekitError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(ArgSource::None),
            Value::String(s) => Ok(ArgSource::Raw(s)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    Value::Number(n) => Ok(n.to_string()),
                    Value::Bool(b) => Ok(b.to_string()),
                    other => Err(ExekitError::TypeConversion(other.to_string())),
                })
                .collect::<Result<Vec<_>>>()
                .map(ArgSource::Tokens),
            object @ Value::Object(_) => Fields::try_from(object).map(ArgSource::Fields),
            other => Err(ExekitError::TypeConversion(other.to_string())),
        }
    }
}

/// A single field value in a structured argument source.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
    List(Vec<String>),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Null => Ok(()),
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Str(s) => f.write_str(s),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Float(x) => write!(f, "{}", x),
            ArgValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<&std::path::Path> for ArgValue {
    fn from(value: &std::path::Path) -> Self {
        ArgValue::Str(value.to_string_lossy().into_owned())
    }
}

macro_rules! int_arg_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ArgValue {
                fn from(value: $t) -> Self {
                    ArgValue::Int(value as i64)
                }
            }
        )*
    };
}

int_arg_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl<T: ToString> From<Vec<T>> for ArgValue {
    fn from(value: Vec<T>) -> Self {
        ArgValue::List(value.iter().map(ToString::to_string).collect())
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ArgValue::Null)
    }
}

/// Ordered field mapping for the structured converter.
///
/// Iteration follows insertion order. Setting an existing name replaces its
/// value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, ArgValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<serde_json::Value> for Fields {
    type Error = ExekitError;

    /// Only flat objects convert; nested objects and arrays of objects fail.
    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        let map = match value {
            Value::Object(map) => map,
            other => return Err(ExekitError::TypeConversion(other.to_string())),
        };

        let mut fields = Fields::new();
        for (name, value) in map {
            let value = match value {
                Value::Null => ArgValue::Null,
                Value::Bool(b) => ArgValue::Bool(b),
                Value::String(s) => ArgValue::Str(s),
                Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                    (Some(i), _) => ArgValue::Int(i),
                    (None, Some(f)) if n.is_f64() => ArgValue::Float(f),
                    // Integers beyond i64 keep their exact text.
                    _ => ArgValue::Str(n.to_string()),
                },
                Value::Array(items) => {
                    let mut list = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            Value::String(s) => list.push(s),
                            Value::Number(n) => list.push(n.to_string()),
                            Value::Bool(b) => list.push(b.to_string()),
                            other => {
                                return Err(ExekitError::TypeConversion(format!(
                                    "{} (field '{}')",
                                    other, name
                                )));
                            }
                        }
                    }
                    ArgValue::List(list)
                }
                nested @ Value::Object(_) => {
                    return Err(ExekitError::TypeConversion(format!(
                        "{} (field '{}')",
                        nested, name
                    )));
                }
            };
            fields.insert(name, value);
        }

        Ok(fields)
    }
}
