//! Transform errors.
//!
//! Handlers return [`HandlerError`], a boxed error of any type. The engine
//! wraps the first one it sees in a [`TransformError`] naming the plugin
//! and the node being visited, and aborts the pass. Path operations fail
//! with [`PathError`], which handlers usually propagate with `?`.

use ember_diagnostic::{Diagnostic, ErrorCode};
use ember_ir::{NodeType, Span};
use ember_scope::ScopeError;

/// Error returned from a visitor handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

pub type HandlerResult = Result<(), HandlerError>;

/// A handler failed; the pass stopped at this node.
///
/// Mutations made before the failure are kept.
#[derive(Debug, thiserror::Error)]
#[error("{plugin}: {source}")]
pub struct TransformError {
    pub plugin: String,
    pub node_type: NodeType,
    pub span: Span,
    pub source: HandlerError,
}

impl TransformError {
    /// `E3002` when the handler misused a path, `E2001` when a mutation
    /// introduced a conflicting declaration, `E3001` otherwise.
    pub fn code(&self) -> ErrorCode {
        match self.source.downcast_ref::<PathError>() {
            Some(PathError::Scope(err)) => err.code(),
            Some(_) => ErrorCode::E3002,
            None => ErrorCode::E3001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span, format!("while visiting {}", self.node_type))
    }
}

/// Misuse of a [`NodePath`](crate::NodePath) operation.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("the node has already been removed or replaced")]
    Removed,
    #[error("the root node cannot be {0}")]
    Root(&'static str),
    #[error("{node_type} has no list field `{field}`")]
    NoSuchList { node_type: NodeType, field: String },
    #[error("{node_type} is not inside a list")]
    NotInList { node_type: NodeType },
    #[error("{node_type} cannot be removed from `{field}` of {parent}")]
    CannotRemove {
        node_type: NodeType,
        parent: NodeType,
        field: &'static str,
    },
    #[error("a statement cannot replace the expression {node_type}")]
    StatementForExpression { node_type: NodeType },
    #[error("{node_type} is not an expression")]
    NotAnExpression { node_type: NodeType },
    #[error("{node_type} is already in the tree; clone it before reusing it")]
    AlreadyAttached { node_type: NodeType },
    #[error("{message} - make sure this is an expression.\n{frame}")]
    SourceString { message: String, frame: String },
    #[error(transparent)]
    Scope(#[from] ScopeError),
}

/// Failure assembling the visitors for a unit.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown transform `{name}`")]
    UnknownTransform { name: String },
}

impl RegistryError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::E3001
    }
}
