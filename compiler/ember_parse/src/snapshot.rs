//! Parser snapshots for speculative parsing.
//!
//! Arrow functions cannot be told apart from parenthesized expressions
//! until the `=>` shows up, and `async (...)` may be either a call or an
//! async arrow. The parser tries the arrow reading first and, if it does
//! not pan out, restores a snapshot and re-parses.
//!
//! Unlike a token-list parser, restoring must also rewind the lexer and
//! drop any nodes the failed attempt allocated, so the snapshot records
//! the lexer checkpoint and the arena length.

use ember_ir::Token;
use ember_lexer::LexerCheckpoint;

use crate::context::ParseContext;

#[derive(Clone, Debug)]
pub struct ParserSnapshot {
    pub(crate) lexer: LexerCheckpoint,
    pub(crate) token: Token,
    pub(crate) prev_end: u32,
    pub(crate) arena_len: usize,
    pub(crate) context: ParseContext,
    pub(crate) labels_len: usize,
    pub(crate) shorthand_init: Option<ember_ir::Position>,
}
