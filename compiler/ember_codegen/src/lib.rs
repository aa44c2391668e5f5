//! Ember code generator.
//!
//! Prints an [`Ast`] back to JavaScript source. Output re-parses to a tree
//! that is structurally equal to the input (spans aside): raw literal text
//! is printed as written, and parentheses are inserted wherever precedence
//! or statement position would otherwise change how the text parses.
//!
//! # Layout
//!
//! - Two-space indentation ([`INDENT_WIDTH`]).
//! - Statement lists, class bodies and object literals are one item per
//!   line; an empty body prints `{}`.
//! - Object patterns, specifier lists and Flow object types stay inline.
//! - Comments are not re-emitted.
//!
//! [`GeneratorOptions::compact`] drops every optional space and newline.
//!
//! # Example
//!
//! ```
//! use ember_codegen::{generate, GeneratorOptions};
//! use ember_parse::{parse, ActivePlugins, ParseOptions};
//!
//! let out = parse("if (a) b(); else { c }", &ParseOptions::default(), &ActivePlugins::none()).unwrap();
//! let code = generate(&out.ast, out.root, &GeneratorOptions::default()).unwrap();
//! assert_eq!(code, "if (a) b();\nelse {\n  c;\n}");
//! ```

mod error;
mod generator;
mod literals;
mod precedence;
mod printer;

pub use error::{CodegenError, CodegenResult};
pub use printer::INDENT_WIDTH;

use ember_ir::{Ast, NodeId};

use crate::generator::Generator;

/// Quote style for strings the generator has to spell itself.
///
/// Parsed strings keep their original quotes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Quotes {
    #[default]
    Double,
    Single,
}

/// Output settings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GeneratorOptions {
    /// Drop optional whitespace and line breaks.
    pub compact: bool,
    pub quotes: Quotes,
}

impl GeneratorOptions {
    #[must_use]
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    #[must_use]
    pub fn with_quotes(mut self, quotes: Quotes) -> Self {
        self.quotes = quotes;
        self
    }
}

/// Print the subtree at `root`.
///
/// `root` is usually a `Program`, but any statement or expression prints
/// on its own.
///
/// # Errors
///
/// Returns [`CodegenError::MalformedNode`] for trees no parse could have
/// produced, such as an anonymous function declaration outside
/// `export default` or a child id that points nowhere.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = ast.len()))]
pub fn generate(ast: &Ast, root: NodeId, options: &GeneratorOptions) -> CodegenResult<String> {
    let mut generator = Generator::new(ast, options);
    generator.emit_root(root)?;
    let code = generator.finish();
    tracing::debug!(bytes = code.len(), "generated");
    Ok(code)
}
