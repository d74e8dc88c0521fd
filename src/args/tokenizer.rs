//! Shell-like tokenization of free-form command strings.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Split `input` into shell-like tokens.
///
/// Single and double quotes group characters into one token; inside a quote
/// the other quote style is literal. A space followed by `'` or a backtick and
/// a newline (`\n` or `\r\n`) is a line continuation, which lets multi-line
/// commands be flattened into one token stream.
///
/// An unterminated quote is not an error. Whatever was buffered after the
/// opening quote is dropped at end of input.
///
/// # Examples
///
/// ```
/// use exekit::args::tokenize;
///
/// assert_eq!(tokenize("git commit -m 'first commit'"), vec!["git", "commit", "-m", "first commit"]);
/// ```
pub fn tokenize(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut quote = Quote::None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if quote != Quote::None {
            let closes = matches!((quote, c), (Quote::Single, '\'') | (Quote::Double, '"'));
            if closes {
                quote = Quote::None;
                tokens.push(std::mem::take(&mut token));
            } else {
                token.push(c);
            }
            i += 1;
            continue;
        }

        if c == ' ' {
            if let Some(skip) = continuation_len(&chars, i) {
                i += skip;
            }
            if !token.is_empty() {
                tokens.push(std::mem::take(&mut token));
            }
            i += 1;
            continue;
        }

        if token.is_empty() {
            match c {
                '\'' => {
                    quote = Quote::Single;
                    i += 1;
                    continue;
                }
                '"' => {
                    quote = Quote::Double;
                    i += 1;
                    continue;
                }
                _ => {}
            }
        }

        token.push(c);
        i += 1;
    }

    if quote == Quote::None && !token.is_empty() {
        tokens.push(token);
    }

    tokens
}

/// Number of characters after the space at `i` that form a line continuation
/// (` '\n`, ` '\r\n`, `` `\n``, `` `\r\n``), if any.
fn continuation_len(chars: &[char], i: usize) -> Option<usize> {
    let remaining = chars.len() - 1 - i;
    if remaining <= 2 {
        return None;
    }

    let marker = chars[i + 1];
    if marker != '\'' && marker != '`' {
        return None;
    }

    match chars[i + 2] {
        '\n' => Some(2),
        '\r' if remaining > 3 && chars[i + 3] == '\n' => Some(3),
        _ => None,
    }
}
