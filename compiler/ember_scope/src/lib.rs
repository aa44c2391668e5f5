//! Scope and binding analysis for the Ember pipeline.
//!
//! [`analyze`] walks a parsed tree once and builds a [`ScopeTree`]: one
//! [`Scope`] per program, function, block, loop head, `switch`, catch
//! clause and class, and one [`Binding`] per declared name with its reads
//! and writes. Transforms keep the tree current through
//! [`ScopeTree::crawl_subtree`] and [`ScopeTree::remove_subtree`] instead of
//! re-running the analysis.
//!
//! # Hoisting
//!
//! - Parameters are registered first in their function scope.
//! - `var` declarations land in the nearest function or program scope,
//!   found by searching through nested blocks but not nested functions.
//! - `let`, `const`, `class` and function declarations land in the scope
//!   whose statement list contains them.
//!
//! Redeclaring a `var` or function merges into the existing binding. The
//! earlier declaration is then recorded as a constant violation.
//! Conflicting declarations fail with [`ScopeError::DuplicateBinding`].
//!
//! ```
//! use ember_parse::{parse, ActivePlugins, ParseOptions};
//!
//! let out = parse("const x = 1; x = 2;", &ParseOptions::default(), &ActivePlugins::none()).unwrap();
//! let tree = ember_scope::analyze(&out.ast, out.root).unwrap();
//! let x = tree.resolve(&out.ast, tree.root(), "x").unwrap();
//! assert!(!tree.binding(x).is_constant());
//! ```

mod binding;
mod collect;
mod error;
mod scope;
mod tree;

pub use binding::{Binding, BindingId, BindingKind};
pub use collect::{binding_identifiers, is_referenced};
pub use error::ScopeError;
pub use scope::{Scope, ScopeId, ScopeKind};
pub use tree::ScopeTree;

use ember_ir::{Ast, NodeId};
use tracing::debug;

use crate::collect::Collector;

/// Build the scope tree for the subtree at `root`, normally a `Program`.
#[tracing::instrument(level = "debug", skip_all, fields(root = root.index()))]
pub fn analyze(ast: &Ast, root: NodeId) -> Result<ScopeTree, ScopeError> {
    let mut tree = ScopeTree::new();
    let program = tree.push_scope(ScopeKind::Program, None, root);
    tree.node_scopes.insert(root, program);

    let mut collector = Collector::new(ast, &mut tree);
    if ast.node_type(root) == ember_ir::NodeType::Program {
        collector.register_scope(root, program)?;
        for child in ast.kind(root).children() {
            collector.walk(child, Some(root), None, program)?;
        }
    } else {
        collector.hoist_vars(&[root], program)?;
        collector.declare_lexical(root, program)?;
        collector.walk(root, None, None, program)?;
    }

    debug!(
        scopes = tree.scopes.len(),
        bindings = tree.bindings.len(),
        globals = tree.globals.len(),
        "scope analysis complete"
    );
    Ok(tree)
}
