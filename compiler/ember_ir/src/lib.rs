//! Ember IR - shared representation types.
//!
//! This crate holds the data every pipeline stage agrees on:
//! - Spans for source locations
//! - Names for interned strings
//! - Tokens produced by the lexer
//! - The closed AST node enum and its arena
//!
//! # Design
//!
//! - **Flat tree**: children are `NodeId(u32)` indices into [`Ast`], never
//!   boxed subtrees. Back-references from analysis tables are ids too.
//! - **Closed kinds**: [`NodeKind`] is matched exhaustively everywhere; a
//!   new node shape is a compile error at every dispatch site until handled.
//! - **Per-unit state**: each [`Ast`] owns its interner. Nothing here is
//!   shared between compilation units.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod build;
mod name;
mod node_id;
mod span;
mod token;

pub use arena::Ast;
pub use ast::{
    AssignOp, BinaryOp, Class, Field, FieldMut, Function, LiteralValue, LogicalOp, MethodKind,
    Node, NodeKind, NodeType, SourceType, UnaryOp, UpdateOp, VarKind,
};
pub use name::{Name, StringInterner};
pub use node_id::NodeId;
pub use span::{Span, SpanError};
pub use token::{Position, Token, TokenKind, TokenValue};
