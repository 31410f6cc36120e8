//! Helpers for splitting shorthand strings.

use crate::error::{Result, StyleError};

const QUOTES: [char; 2] = ['\'', '"'];
const DELIMITER: char = ',';
const ESCAPE: char = '\\';

/// Split a comma-delimited list, respecting quotes.
///
/// Items may be wrapped in single or double quotes, inside which commas are
/// literal and `\'`/`\"` escape a quote. Whitespace around items is trimmed.
///
/// ```
/// use strata_style::shorthand::split_quoted;
///
/// let families = split_quoted(r#""Comic Sans", 'George\'s Font', serif"#).unwrap();
/// assert_eq!(families, ["Comic Sans", "George's Font", "serif"]);
/// ```
///
/// # Errors
///
/// Returns [`StyleError::InvalidShorthandString`] for content after a
/// closing quote, a quote that doesn't start its item, an unknown escape or
/// an unterminated quote.
pub fn split_quoted(input: &str) -> Result<Vec<String>> {
    let invalid = |reason: &str| StyleError::InvalidShorthandString(format!("{reason}: {input}"));

    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut need_delimiter = false;

    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if need_delimiter {
            if c == DELIMITER {
                need_delimiter = false;
            } else if !c.is_whitespace() {
                return Err(invalid("content after quotes in item"));
            }
            continue;
        }

        match quote {
            Some(open) => {
                if c == ESCAPE {
                    match chars.next() {
                        Some(escaped) if QUOTES.contains(&escaped) => current.push(escaped),
                        _ => return Err(invalid("unrecognized escape sequence")),
                    }
                } else if c == open {
                    quote = None;
                    items.push(current.trim().to_string());
                    current.clear();
                    need_delimiter = true;
                } else {
                    current.push(c);
                }
            }
            None => {
                if QUOTES.contains(&c) {
                    if !current.trim().is_empty() {
                        return Err(invalid("quote not at beginning of item"));
                    }
                    quote = Some(c);
                } else if c == DELIMITER {
                    items.push(current.trim().to_string());
                    current.clear();
                } else {
                    current.push(c);
                }
            }
        }
    }

    if quote.is_some() {
        return Err(invalid("unterminated quote"));
    }
    if !current.is_empty() {
        items.push(current.trim().to_string());
    }
    Ok(items)
}
