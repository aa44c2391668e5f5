//! Parse errors.
//!
//! Parsing stops at the first error. A lexical failure is carried through
//! unchanged; grammar failures become [`SyntaxError`]s with an error code,
//! a message and the position of the offending token.

use ember_diagnostic::{Diagnostic, ErrorCode};
use ember_ir::{Position, Span};
use ember_lexer::LexError;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message} ({position})")]
pub struct SyntaxError {
    pub code: ErrorCode,
    pub message: String,
    pub position: Position,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(err) => err.position,
            ParseError::Syntax(err) => err.position,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span,
            ParseError::Syntax(err) => err.span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Lex(err) => err.kind.code(),
            ParseError::Syntax(err) => err.code,
        }
    }

    /// Message without the trailing position.
    pub fn message(&self) -> String {
        match self {
            ParseError::Lex(err) => err.kind.to_string(),
            ParseError::Syntax(err) => err.message.clone(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::Lex(err) => err.to_diagnostic(),
            ParseError::Syntax(err) => Diagnostic::error(err.code)
                .with_message(err.message.clone())
                .with_label(err.span, ""),
        }
    }
}
