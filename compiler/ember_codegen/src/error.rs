//! Generator errors.

use ember_diagnostic::{Diagnostic, ErrorCode};
use ember_ir::{NodeType, Span};

/// A tree the generator cannot print as valid source.
///
/// Parsed trees never produce these; they come from transforms that
/// assemble nodes by hand.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CodegenError {
    #[error("malformed {node_type}: {reason}")]
    MalformedNode {
        node_type: NodeType,
        reason: &'static str,
        span: Span,
    },
}

impl CodegenError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::E9001
    }

    pub fn span(&self) -> Span {
        match self {
            CodegenError::MalformedNode { span, .. } => *span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span(), "cannot print this node")
    }
}

pub type CodegenResult<T = ()> = Result<T, CodegenError>;
