//! Lexer errors.

use ember_diagnostic::{Diagnostic, ErrorCode};
use ember_ir::{Position, Span};

/// A fatal tokenizer error.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind} ({position})")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub position: Position,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    #[error("Unterminated string constant")]
    UnterminatedString,
    #[error("Unterminated template")]
    UnterminatedTemplate,
    #[error("Unterminated comment")]
    UnterminatedComment,
    #[error("Unterminated regular expression")]
    UnterminatedRegex,
    #[error("Invalid number")]
    MalformedNumber,
    #[error("Bad character escape sequence")]
    InvalidEscape,
    #[error("Unexpected character '{0}'")]
    UnexpectedChar(char),
}

impl LexErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::UnexpectedChar(_) => ErrorCode::E0002,
            LexErrorKind::MalformedNumber => ErrorCode::E0003,
            LexErrorKind::UnterminatedComment => ErrorCode::E0004,
            LexErrorKind::InvalidEscape => ErrorCode::E0005,
            LexErrorKind::UnterminatedTemplate => ErrorCode::E0006,
            LexErrorKind::UnterminatedRegex => ErrorCode::E0007,
        }
    }
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span, position: Position) -> Self {
        LexError {
            kind,
            span,
            position,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.kind.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, "")
    }
}
