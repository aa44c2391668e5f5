//! Pipeline errors.
//!
//! Every stage stops the unit at its first error. [`CompileError`] wraps
//! the stage's own error type so callers can match on the stage, and
//! renders any of them as a [`Diagnostic`] or a message with a code frame.

use std::fmt;

use ember_codegen::CodegenError;
use ember_diagnostic::span_utils::span_start_line_col;
use ember_diagnostic::{code_frame, CodeFrameOptions, Diagnostic, ErrorCode};
use ember_ir::{Position, Span};
use ember_lexer::LexError;
use ember_parse::{ParseError, SyntaxError};
use ember_scope::ScopeError;
use ember_traverse::{RegistryError, TransformError};

/// The stage a [`CompileError`] came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    DuplicateBinding,
    Transform,
    MalformedNode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Lexical => "lexical error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::DuplicateBinding => "duplicate binding",
            ErrorKind::Transform => "transform error",
            ErrorKind::MalformedNode => "malformed node",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(err) => CompileError::Lex(err),
            ParseError::Syntax(err) => CompileError::Syntax(err),
        }
    }
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Lex(_) => ErrorKind::Lexical,
            CompileError::Syntax(_) => ErrorKind::Syntax,
            CompileError::Scope(_) => ErrorKind::DuplicateBinding,
            CompileError::Transform(err) if err.code() == ErrorCode::E2001 => ErrorKind::DuplicateBinding,
            CompileError::Registry(_) | CompileError::Transform(_) => ErrorKind::Transform,
            CompileError::Codegen(_) => ErrorKind::MalformedNode,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CompileError::Lex(err) => err.kind.code(),
            CompileError::Syntax(err) => err.code,
            CompileError::Scope(err) => err.code(),
            CompileError::Registry(err) => err.code(),
            CompileError::Transform(err) => err.code(),
            CompileError::Codegen(err) => err.code(),
        }
    }

    /// The message without a trailing position.
    pub fn message(&self) -> String {
        match self {
            CompileError::Lex(err) => err.kind.to_string(),
            CompileError::Syntax(err) => err.message.clone(),
            _ => self.to_string(),
        }
    }

    /// Line and column reported by the tokenizer or parser.
    pub fn position(&self) -> Option<Position> {
        match self {
            CompileError::Lex(err) => Some(err.position),
            CompileError::Syntax(err) => Some(err.position),
            _ => None,
        }
    }

    /// Source range of the failure. Nodes built by transforms have no
    /// range and report `None`.
    pub fn span(&self) -> Option<Span> {
        let span = match self {
            CompileError::Lex(err) => err.span,
            CompileError::Syntax(err) => err.span,
            CompileError::Scope(err) => err.span(),
            CompileError::Registry(_) => return None,
            CompileError::Transform(err) => err.span,
            CompileError::Codegen(err) => err.span(),
        };
        (!span.is_dummy()).then_some(span)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::Lex(err) => err.to_diagnostic(),
            CompileError::Syntax(err) => Diagnostic::error(err.code)
                .with_message(err.message.clone())
                .with_label(err.span, ""),
            CompileError::Scope(err) => err.to_diagnostic(),
            CompileError::Registry(err) => Diagnostic::error(err.code()).with_message(err.to_string()),
            CompileError::Transform(err) => err.to_diagnostic(),
            CompileError::Codegen(err) => err.to_diagnostic(),
        }
    }
}

/// `CODE: message`, followed by a code frame at the error when it has a
/// location in `source`.
///
/// ```
/// use ember_diagnostic::CodeFrameOptions;
///
/// let err = emberc::compile("let x = ;", &emberc::CompileOptions::default()).unwrap_err();
/// let rendered = emberc::render_error("let x = ;", &err, &CodeFrameOptions::default());
/// assert!(rendered.ends_with("> 1 | let x = ;\n    |         ^"));
/// ```
pub fn render_error(source: &str, err: &CompileError, options: &CodeFrameOptions) -> String {
    let header = format!("{}: {}", err.code(), err.message());
    let location = match (err.position(), err.span()) {
        (Some(position), _) => Some((position.line, position.column + 1)),
        (None, Some(span)) => Some(span_start_line_col(source, span)),
        (None, None) => None,
    };
    let Some((line, column)) = location else {
        return header;
    };
    let frame = code_frame(
        source,
        Some(line as usize),
        isize::try_from(column).ok(),
        options,
    );
    if frame.is_empty() {
        header
    } else {
        format!("{header}\n{frame}")
    }
}
