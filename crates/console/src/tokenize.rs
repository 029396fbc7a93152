//! Submitted-line tokenizer

/// Split a line into arguments.
///
/// Whitespace separates tokens outside double quotes. A `"` toggles quoting
/// and ends the current token if it has any characters; there is no escape
/// character. Whatever remains at the end is trimmed and always appended, so
/// a line ending in a closing quote yields a trailing empty token.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        if c == '"' {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            quoted = !quoted;
        } else if quoted {
            current.push(c);
        } else if c.is_whitespace() {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }

    args.push(current.trim().to_string());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_argument() {
        assert_eq!(parse_line(r#"a "b c" d"#), vec!["a", "b c", "d"]);
    }

    #[test]
    fn test_trailing_quote_yields_empty_token() {
        assert_eq!(parse_line(r#""a b""#), vec!["a b", ""]);
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(parse_line("echo  hello\tworld"), vec!["echo", "hello", "world"]);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse_line(""), vec![""]);
        assert_eq!(parse_line("cmd "), vec!["cmd", ""]);
    }

    #[test]
    fn test_quote_splits_adjacent_text() {
        assert_eq!(parse_line(r#"ab"cd"ef"#), vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn test_unterminated_quote_keeps_spaces_then_trims() {
        assert_eq!(parse_line(r#"say "hi there "#), vec!["say", "hi there"]);
    }
}
