//! Recursive descent parser for the Ember pipeline.
//!
//! Produces a flat AST in an [`Ast`] arena. The grammar is extended by
//! syntax plugins: a [`PluginRegistry`] is built once and shared, and
//! [`PluginRegistry::load`] yields the [`ActivePlugins`] for one unit.
//!
//! ```
//! use ember_parse::{parse, ParseOptions, PluginRegistry};
//!
//! let registry = PluginRegistry::with_builtins();
//! let plugins = registry.load(&["flow"]);
//! let output = parse("let x: number = 1;", &ParseOptions::default(), &plugins);
//! assert!(output.is_ok());
//! ```

mod context;
mod error;
mod grammar;
mod parser;
pub mod plugins;
mod snapshot;

use ember_ir::{Ast, NodeId, SourceType, TokenKind};
use ember_lexer::Comment;
use tracing::debug;

pub use context::ParseContext;
pub use error::{ParseError, ParseResult, SyntaxError};
pub use parser::Parser;
pub use plugins::{
    ActivePlugins, Extensions, PluginFactory, PluginRegistry, SyntaxHandler, TypeAnnotationHandler,
    WILDCARD_LEGACY_PLUGINS,
};
pub use snapshot::ParserSnapshot;

/// Parser options that are not syntax plugins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub source_type: SourceType,
    /// Accept `return` at the top level.
    pub allow_return_outside_function: bool,
    /// Accept `import`/`export` anywhere, in any source type.
    pub allow_import_export_everywhere: bool,
}

impl ParseOptions {
    pub fn new(source_type: SourceType) -> Self {
        ParseOptions {
            source_type,
            ..ParseOptions::default()
        }
    }

    #[must_use]
    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    #[must_use]
    pub fn with_allow_return_outside_function(mut self, allow: bool) -> Self {
        self.allow_return_outside_function = allow;
        self
    }

    #[must_use]
    pub fn with_allow_import_export_everywhere(mut self, allow: bool) -> Self {
        self.allow_import_export_everywhere = allow;
        self
    }
}

/// A parsed compilation unit.
#[derive(Clone, Debug)]
pub struct ParseOutput {
    pub ast: Ast,
    /// The `Program` node, or the expression for [`parse_expression`].
    pub root: NodeId,
    pub comments: Vec<Comment>,
}

/// Parse a whole program.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len(), source_type = ?options.source_type))]
pub fn parse(source: &str, options: &ParseOptions, plugins: &ActivePlugins) -> ParseResult<ParseOutput> {
    let mut parser = Parser::new(source, options, plugins)?;
    let root = parser.parse_program()?;
    let (ast, comments) = parser.into_parts();
    debug!(nodes = ast.len(), comments = comments.len(), "parsed program");
    Ok(ParseOutput { ast, root, comments })
}

/// Parse a single expression spanning the whole input.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_expression(source: &str, options: &ParseOptions, plugins: &ActivePlugins) -> ParseResult<ParseOutput> {
    let mut parser = Parser::new(source, options, plugins)?;
    let root = parser.parse_expression()?;
    if !parser.at(TokenKind::Eof) {
        return parser.unexpected();
    }
    let (ast, comments) = parser.into_parts();
    debug!(nodes = ast.len(), "parsed expression");
    Ok(ParseOutput { ast, root, comments })
}

#[cfg(test)]
mod tests;
