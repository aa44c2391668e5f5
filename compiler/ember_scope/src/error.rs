use ember_diagnostic::{Diagnostic, ErrorCode};
use ember_ir::Span;

/// Failure raised while registering declarations.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ScopeError {
    /// A name was declared twice in one scope in a way the collision rules
    /// reject (for example `let a; var a;`).
    #[error("Duplicate declaration \"{name}\"")]
    DuplicateBinding { name: String, span: Span },
}

impl ScopeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ScopeError::DuplicateBinding { .. } => ErrorCode::E2001,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ScopeError::DuplicateBinding { span, .. } => *span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ScopeError::DuplicateBinding { name, span } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_label(*span, format!("`{name}` redeclared here")),
        }
    }
}
