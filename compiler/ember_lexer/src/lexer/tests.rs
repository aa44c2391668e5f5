#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use ember_ir::{Position, SourceType, Span, TokenKind, TokenValue};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::{is_reserved_word, tokenize};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).unwrap().iter().map(|t| t.kind).collect()
}

fn single(source: &str) -> Token {
    Lexer::new(source).next_token().unwrap()
}

#[test]
fn test_punctuators_maximal_munch() {
    use TokenKind as T;
    assert_eq!(
        kinds("a >>>= b >> c ** d ?? e ... f => g !== h"),
        vec![
            T::Ident,
            T::UShrEq,
            T::Ident,
            T::Shr,
            T::Ident,
            T::StarStar,
            T::Ident,
            T::QuestionQuestion,
            T::Ident,
            T::Ellipsis,
            T::Ident,
            T::Arrow,
            T::Ident,
            T::NotEqEq,
            T::Ident,
            T::Eof,
        ]
    );
}

#[test]
fn test_contextual_words_are_identifiers() {
    for word in ["let", "static", "yield", "await", "async", "of", "get", "set"] {
        assert_eq!(single(word).kind, TokenKind::Ident, "{word}");
    }
    assert_eq!(single("typeof").kind, TokenKind::Typeof);
    assert_eq!(single("enum").kind, TokenKind::Enum);
}

#[test]
fn test_await_reserved_only_in_modules() {
    let token = single("await");
    let word = token.raw("await");
    assert!(!is_reserved_word(word, SourceType::Script));
    assert!(is_reserved_word(word, SourceType::Module));
}

#[test]
fn test_positions_and_newline_flag() {
    let mut lexer = Lexer::new("a\n  bc");
    let a = lexer.next_token().unwrap();
    let bc = lexer.next_token().unwrap();
    assert!(!a.newline_before);
    assert!(bc.newline_before);
    assert_eq!(bc.start, Position::new(4, 2, 2));
    assert_eq!(bc.end, Position::new(6, 2, 4));
    assert_eq!(bc.span, Span::new(4, 6));
}

#[test]
fn test_block_comment_with_newline_sets_flag() {
    let mut lexer = Lexer::new("a /*\n*/ b /* x */ c");
    lexer.next_token().unwrap();
    assert!(lexer.next_token().unwrap().newline_before);
    assert!(!lexer.next_token().unwrap().newline_before);
    let comments = lexer.comments();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].text, " x ");
    assert_eq!(comments[1].kind, CommentKind::Block);
}

#[test]
fn test_line_comment_recorded() {
    let mut lexer = Lexer::new("x // trailing\ny");
    lexer.next_token().unwrap();
    assert!(lexer.next_token().unwrap().newline_before);
    assert_eq!(lexer.comments()[0].text, " trailing");
    assert_eq!(lexer.comments()[0].kind, CommentKind::Line);
}

#[test]
fn test_hashbang_skipped_and_recorded() {
    let mut lexer = Lexer::new("#!/usr/bin/env node\nfoo");
    assert_eq!(lexer.hashbang(), Some("/usr/bin/env node"));
    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::Ident);
    assert_eq!(token.start.line, 2);
}

#[test]
fn test_string_escapes_are_cooked() {
    let token = single(r#""a\n\x41B\u{1F600}\101\
b""#);
    assert_eq!(token.kind, TokenKind::Str);
    assert_eq!(token.value, TokenValue::Str("a\nAB\u{1F600}Ab".into()));
}

#[test]
fn test_surrogate_pair_escape_combines() {
    let token = single(r"'\uD83D\uDE00'");
    assert_eq!(token.value, TokenValue::Str("\u{1F600}".into()));
}

#[test]
fn test_numbers() {
    let cases: &[(&str, f64)] = &[
        ("42", 42.0),
        ("3.25", 3.25),
        (".5", 0.5),
        ("1e3", 1000.0),
        ("2E-2", 0.02),
        ("0x1F", 31.0),
        ("0o17", 15.0),
        ("0b101", 5.0),
        ("017", 15.0),
        ("089", 89.0),
    ];
    for (source, expected) in cases {
        let token = single(source);
        assert_eq!(token.kind, TokenKind::Num, "{source}");
        assert_eq!(token.value, TokenValue::Number(*expected), "{source}");
    }
}

#[test]
fn test_bigint_keeps_digits() {
    let token = single("123n");
    assert_eq!(token.kind, TokenKind::BigInt);
    assert_eq!(token.value, TokenValue::Str("123".into()));
    assert_eq!(token.raw("123n"), "123n");
}

#[test]
fn test_malformed_numbers() {
    for source in ["0x", "1e", "3in", "1.5n", "0b2"] {
        let err = tokenize(source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::MalformedNumber, "{source}");
    }
}

#[test]
fn test_unterminated_literals() {
    assert_eq!(tokenize("'abc").unwrap_err().kind, LexErrorKind::UnterminatedString);
    assert_eq!(tokenize("'ab\ncd'").unwrap_err().kind, LexErrorKind::UnterminatedString);
    assert_eq!(tokenize("`abc").unwrap_err().kind, LexErrorKind::UnterminatedTemplate);
    assert_eq!(tokenize("/* open").unwrap_err().kind, LexErrorKind::UnterminatedComment);
    assert_eq!(tokenize("x = /abc").unwrap_err().kind, LexErrorKind::UnterminatedRegex);
}

#[test]
fn test_error_position() {
    let err = tokenize("let a = 1;\nlet b = #;").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedChar('#'));
    assert_eq!(err.position, Position::new(19, 2, 8));
    assert_eq!(err.to_string(), "Unexpected character '#' (2:9)");
}

#[test]
fn test_regex_rescan() {
    let mut lexer = Lexer::new("/[/]+\\//gi");
    let slash = lexer.next_token().unwrap();
    assert_eq!(slash.kind, TokenKind::Slash);
    let regex = lexer.rescan_regex(&slash).unwrap();
    assert_eq!(regex.kind, TokenKind::Regex);
    assert_eq!(
        regex.value,
        TokenValue::Regex {
            pattern: "[/]+\\/".into(),
            flags: "gi".into()
        }
    );
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_division_vs_regex_heuristic() {
    use TokenKind as T;
    assert_eq!(kinds("a / b / c"), vec![T::Ident, T::Slash, T::Ident, T::Slash, T::Ident, T::Eof]);
    assert_eq!(kinds("(/x/)"), vec![T::LParen, T::Regex, T::RParen, T::Eof]);
}

#[test]
fn test_template_with_substitutions() {
    use TokenKind as T;
    let tokens = tokenize("`a${b}c${ {d} }e`").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            T::TemplateHead,
            T::Ident,
            T::TemplateMiddle,
            T::LBrace,
            T::Ident,
            T::RBrace,
            T::TemplateTail,
            T::Eof,
        ]
    );
    assert_eq!(
        tokens[6].value,
        TokenValue::Template {
            raw: "e".into(),
            cooked: Some("e".into())
        }
    );
}

#[test]
fn test_template_invalid_escape_has_no_cooked_value() {
    let token = single("`\\unicode and \\u{55}`");
    assert_eq!(token.kind, TokenKind::NoSubstitutionTemplate);
    assert_eq!(
        token.value,
        TokenValue::Template {
            raw: "\\unicode and \\u{55}".into(),
            cooked: None
        }
    );
}

#[test]
fn test_template_normalizes_carriage_returns() {
    let token = single("`a\r\nb\rc`");
    assert_eq!(
        token.value,
        TokenValue::Template {
            raw: "a\nb\nc".into(),
            cooked: Some("a\nb\nc".into())
        }
    );
}

#[test]
fn test_escaped_identifier() {
    let token = single("\\u0061bc");
    assert_eq!(token.kind, TokenKind::Ident);
    assert_eq!(token.value, TokenValue::Str("abc".into()));
}

#[test]
fn test_unicode_identifier() {
    let token = single("café = 1");
    assert_eq!(token.kind, TokenKind::Ident);
    assert_eq!(token.raw("café = 1"), "café");
}

#[test]
fn test_checkpoint_restore() {
    let mut lexer = Lexer::new("a /* c */ b");
    lexer.next_token().unwrap();
    let saved = lexer.checkpoint();
    let b = lexer.next_token().unwrap();
    assert_eq!(lexer.comments().len(), 1);
    lexer.restore(saved);
    assert!(lexer.comments().is_empty());
    assert_eq!(lexer.next_token().unwrap(), b);
}

#[test]
fn test_rescan_gt_splits_shift() {
    let mut lexer = Lexer::new(">>x");
    let shr = lexer.next_token().unwrap();
    assert_eq!(shr.kind, TokenKind::Shr);
    let gt = lexer.rescan_gt(&shr);
    assert_eq!(gt.kind, TokenKind::Gt);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Gt);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Ident);
}

proptest! {
    #[test]
    fn prop_spans_are_ordered(words in proptest::collection::vec("[a-z]{1,6}|[0-9]{1,4}|[-+*%<>=!&|^~?:;,.()\\[\\]{}]", 0..30)) {
        let source = words.join(" ");
        if let Ok(tokens) = tokenize(&source) {
            let mut last_end = 0;
            for token in &tokens {
                prop_assert!(token.span.start >= last_end);
                prop_assert!(token.span.end >= token.span.start);
                last_end = token.span.end;
            }
        }
    }
}
