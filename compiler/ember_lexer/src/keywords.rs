//! Reserved-word tables.
//!
//! Only unconditionally reserved words become keyword tokens. The
//! classification functions below let the parser decide the rest from
//! context: `await` depends on the source type, and strict code reserves
//! a further set.

use ember_ir::{SourceType, TokenKind};

/// Look up a reserved keyword by text.
///
/// Uses length-bucketing for fast rejection: all keywords are 2-10 chars.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let len = text.len();
    if !(2..=10).contains(&len) || !text.as_bytes()[0].is_ascii_lowercase() {
        return None;
    }

    match len {
        2 => match text {
            "do" => Some(TokenKind::Do),
            "if" => Some(TokenKind::If),
            "in" => Some(TokenKind::In),
            _ => None,
        },
        3 => match text {
            "for" => Some(TokenKind::For),
            "new" => Some(TokenKind::New),
            "try" => Some(TokenKind::Try),
            "var" => Some(TokenKind::Var),
            _ => None,
        },
        4 => match text {
            "case" => Some(TokenKind::Case),
            "else" => Some(TokenKind::Else),
            "enum" => Some(TokenKind::Enum),
            "null" => Some(TokenKind::Null),
            "this" => Some(TokenKind::This),
            "true" => Some(TokenKind::True),
            "void" => Some(TokenKind::Void),
            "with" => Some(TokenKind::With),
            _ => None,
        },
        5 => match text {
            "break" => Some(TokenKind::Break),
            "catch" => Some(TokenKind::Catch),
            "class" => Some(TokenKind::Class),
            "const" => Some(TokenKind::Const),
            "false" => Some(TokenKind::False),
            "super" => Some(TokenKind::Super),
            "throw" => Some(TokenKind::Throw),
            "while" => Some(TokenKind::While),
            _ => None,
        },
        6 => match text {
            "delete" => Some(TokenKind::Delete),
            "export" => Some(TokenKind::Export),
            "import" => Some(TokenKind::Import),
            "return" => Some(TokenKind::Return),
            "switch" => Some(TokenKind::Switch),
            "typeof" => Some(TokenKind::Typeof),
            _ => None,
        },
        7 => match text {
            "default" => Some(TokenKind::Default),
            "extends" => Some(TokenKind::Extends),
            "finally" => Some(TokenKind::Finally),
            _ => None,
        },
        8 => match text {
            "continue" => Some(TokenKind::Continue),
            "debugger" => Some(TokenKind::Debugger),
            "function" => Some(TokenKind::Function),
            _ => None,
        },
        10 => match text {
            "instanceof" => Some(TokenKind::Instanceof),
            _ => None,
        },
        _ => None,
    }
}

/// Whether `word` can never be an identifier in code of `source_type`.
///
/// `await` is reserved only in modules; `enum` and the keywords are
/// always reserved.
pub fn is_reserved_word(word: &str, source_type: SourceType) -> bool {
    if word == "await" {
        return source_type.is_module();
    }
    lookup(word).is_some()
}

/// Reserved in strict code: the always-reserved set plus `let`,
/// `static`, `yield` and the future reserved words.
pub fn is_strict_reserved_word(word: &str, source_type: SourceType) -> bool {
    is_reserved_word(word, source_type)
        || matches!(
            word,
            "implements"
                | "interface"
                | "let"
                | "package"
                | "private"
                | "protected"
                | "public"
                | "static"
                | "yield"
        )
}

/// Not bindable in strict code: the strict set plus `eval` and
/// `arguments`.
pub fn is_strict_bind_reserved_word(word: &str, source_type: SourceType) -> bool {
    is_strict_reserved_word(word, source_type) || matches!(word, "eval" | "arguments")
}
