//! Literal text for synthesized nodes.
//!
//! Parsed literals keep their raw source text and print it back. Nodes
//! built by transforms carry only a value, printed here.

use std::fmt::Write;

use crate::Quotes;

/// Quote `value`, escaping what a string literal cannot hold verbatim.
pub(crate) fn quote_string(value: &str, quotes: Quotes) -> String {
    let quote = match quotes {
        Quotes::Double => '"',
        Quotes::Single => '\'',
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{b}' => out.push_str("\\v"),
            '\0' => out.push_str("\\x00"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Shortest decimal text that reads back as `value`.
///
/// Returns `None` for values a numeric literal cannot spell: NaN,
/// infinities and negative numbers.
pub(crate) fn format_number(value: f64) -> Option<String> {
    if value == 0.0 {
        return Some("0".to_owned());
    }
    if !value.is_finite() || value.is_sign_negative() {
        return None;
    }
    // Rust prints integral floats without a fraction and never uses
    // exponent notation, so very large or small values stay exact.
    Some(format!("{value}"))
}

/// Whether the raw text of a number would absorb a following `.`.
pub(crate) fn is_plain_integer(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::{format_number, is_plain_integer, quote_string};
    use crate::Quotes;

    #[test]
    fn quotes_and_escapes() {
        assert_eq!(quote_string("a\"b", Quotes::Double), r#""a\"b""#);
        assert_eq!(quote_string("a\"b", Quotes::Single), r#"'a"b'"#);
        assert_eq!(quote_string("it's", Quotes::Single), r"'it\'s'");
        assert_eq!(quote_string("a\nb\\", Quotes::Double), r#""a\nb\\""#);
        assert_eq!(quote_string("\u{2028}", Quotes::Double), r#""\u2028""#);
        assert_eq!(quote_string("\u{1}", Quotes::Double), r#""\u0001""#);
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(2.0).as_deref(), Some("2"));
        assert_eq!(format_number(0.5).as_deref(), Some("0.5"));
        assert_eq!(format_number(1e21).as_deref(), Some("1000000000000000000000"));
        assert_eq!(format_number(f64::NAN), None);
        assert_eq!(format_number(-1.0), None);
        assert_eq!(format_number(-0.0).as_deref(), Some("0"));
    }

    #[test]
    fn plain_integers() {
        assert!(is_plain_integer("10"));
        assert!(is_plain_integer("0"));
        assert!(!is_plain_integer("1.5"));
        assert!(!is_plain_integer("1e3"));
        assert!(!is_plain_integer("0x1f"));
        assert!(is_plain_integer("07"));
    }
}
