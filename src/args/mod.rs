//! Process argument construction.
//!
//! Three layers, each usable on its own:
//! - [`tokenize`] splits a free-form command string into shell-like tokens
//! - [`ProcessArgs`] is the ordered token list handed to a spawned process
//! - [`convert_fields`] turns structured [`Fields`] into `--flag value` tokens
//!
//! Call sites accept an [`ArgSource`] and normalize it with
//! [`ProcessArgs::convert`].

mod convert;
mod list;
mod source;
mod tokenizer;


pub use convert::{ConvertOptions, KeyTransform, convert_fields, kebab_case};
pub use list::ProcessArgs;
pub use source::{ArgSource, ArgValue, Fields};
pub use tokenizer::tokenize;
