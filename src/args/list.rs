//! The ordered argument container passed to spawned processes.

use super::convert::{ConvertOptions, convert_fields};
use super::source::ArgSource;
use super::tokenizer::tokenize;
use crate::error::Result;
use std::fmt;
use std::ops::Deref;

/// Ordered list of process arguments.
///
/// Every element is a single token with quoting already resolved. Strings
/// entering through [`append`](Self::append) or [`push`](Self::push) are
/// tokenized first; [`extend_tokens`](Self::extend_tokens) takes tokens as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessArgs {
    tokens: Vec<String>,
}

impl ProcessArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize `value` and append the resulting tokens.
    pub fn append(&mut self, value: &str) -> &mut Self {
        self.tokens.extend(tokenize(value));
        self
    }

    /// Append tokens verbatim, without re-tokenizing.
    pub fn extend_tokens<I, S>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Flatten key/value pairs into alternating key and value tokens.
    pub fn append_pairs<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        for (key, value) in pairs {
            self.tokens.push(key.into());
            self.tokens.push(value.to_string());
        }
        self
    }

    /// Tokenize each value and push every resulting token.
    ///
    /// Returns the number of tokens pushed.
    pub fn push<S: AsRef<str>>(&mut self, values: &[S]) -> usize {
        let before = self.tokens.len();
        for value in values {
            self.tokens.extend(tokenize(value.as_ref()));
        }
        self.tokens.len() - before
    }

    /// Insert tokens verbatim at the front, keeping their relative order.
    pub fn unshift<I, S>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let front: Vec<String> = tokens.into_iter().map(Into::into).collect();
        self.tokens.splice(0..0, front);
        self
    }

    /// Normalize any argument source into a `ProcessArgs`.
    ///
    /// `options` only applies to [`ArgSource::Fields`].
    pub fn convert(source: ArgSource, options: Option<&ConvertOptions>) -> Result<Self> {
        match source {
            ArgSource::None => Ok(Self::new()),
            ArgSource::Args(args) => Ok(args),
            ArgSource::Tokens(tokens) => Ok(Self::from(tokens)),
            ArgSource::Raw(line) => {
                let mut args = Self::new();
                args.append(&line);
                Ok(args)
            }
            ArgSource::Fields(fields) => {
                let default_options;
                let options = match options {
                    Some(o) => o,
                    None => {
                        default_options = ConvertOptions::default();
                        &default_options
                    }
                };
                Ok(convert_fields(&fields, options))
            }
        }
    }

    /// Convert a JSON value: null, a string, an array of scalars, or a flat object.
    pub fn from_json(value: serde_json::Value, options: Option<&ConvertOptions>) -> Result<Self> {
        Self::convert(ArgSource::try_from(value)?, options)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}

impl Deref for ProcessArgs {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.tokens
    }
}

impl From<Vec<String>> for ProcessArgs {
    fn from(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

impl From<&[&str]> for ProcessArgs {
    fn from(tokens: &[&str]) -> Self {
        let mut args = Self::new();
        args.extend_tokens(tokens.iter().copied());
        args
    }
}

impl IntoIterator for ProcessArgs {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a ProcessArgs {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Renders the arguments quoted for a POSIX shell, for logs and dry runs.
impl fmt::Display for ProcessArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_words::join(&self.tokens))
    }
}
