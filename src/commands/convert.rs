//! `tokenize` and `args`.

use crate::cli::{ArgsArgs, TokenizeArgs};
use exekit::args::{ConvertOptions, ProcessArgs, tokenize};
use exekit::error::{ExekitError, Result};
use exekit::exit_codes;

pub fn cmd_tokenize(args: TokenizeArgs) -> Result<i32> {
    for token in tokenize(&args.input) {
        println!("{}", token);
    }
    Ok(exit_codes::SUCCESS)
}

pub fn cmd_args(args: ArgsArgs) -> Result<i32> {
    println!("{}", render_args(&args)?);
    Ok(exit_codes::SUCCESS)
}

/// Convert the JSON input and render it quoted for a POSIX shell.
fn render_args(args: &ArgsArgs) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(&args.json)
        .map_err(|e| ExekitError::Argument(format!("invalid JSON input: {}", e)))?;

    let options = ConvertOptions {
        prefix: args.prefix.clone(),
        exclude: args.exclude.clone(),
        append: args.append.clone(),
        prepend: args.prepend.clone(),
        concat_args: args.concat.clone(),
        concat_delimiter: args.delimiter.clone(),
        ..Default::default()
    };

    Ok(ProcessArgs::from_json(value, Some(&options))?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(json: &str) -> ArgsArgs {
        ArgsArgs {
            json: json.to_string(),
            prefix: "--".to_string(),
            exclude: Vec::new(),
            append: Vec::new(),
            prepend: Vec::new(),
            concat: Vec::new(),
            delimiter: ",".to_string(),
        }
    }

    #[test]
    fn renders_flags_quoted() {
        let rendered = render_args(&args_for(r#"{"message": "two words", "force": true}"#)).unwrap();
        assert_eq!(rendered, "--message 'two words' --force");
    }

    #[test]
    fn applies_conversion_flags() {
        let mut args = args_for(r#"{"input": "in.txt", "tags": ["a", "b"], "skip": 1}"#);
        args.append = vec!["input".to_string()];
        args.concat = vec!["tags".to_string()];
        args.exclude = vec!["skip".to_string()];
        args.delimiter = ";".to_string();

        assert_eq!(render_args(&args).unwrap(), "in.txt --tags 'a;b'");
    }

    #[test]
    fn rejects_invalid_json() {
        let err = render_args(&args_for("{not json")).unwrap_err();
        assert!(matches!(err, ExekitError::Argument(_)));
    }

    #[test]
    fn rejects_nested_objects() {
        let err = render_args(&args_for(r#"{"a": {"b": 1}}"#)).unwrap_err();
        assert!(matches!(err, ExekitError::TypeConversion(_)));
    }
}
