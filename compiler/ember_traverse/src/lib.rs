//! Traversal and transformation for the Ember pipeline.
//!
//! [`traverse`] walks a tree depth first and hands every node to each
//! [`Visitor`] in order, on enter and on exit. Handlers receive a
//! [`NodePath`] for inspecting the node and its surroundings and for
//! mutating the tree; every mutation also updates the
//! [`ScopeTree`](ember_scope::ScopeTree) so later handlers see current
//! bindings.
//!
//! Transform plugins are registered by name in a [`TransformRegistry`]
//! and instantiated per compilation unit with their [`PluginOptions`].
//!
//! ```
//! use ember_ir::{NodeKind, NodeType};
//! use ember_parse::{parse, ActivePlugins, ParseOptions};
//! use ember_traverse::{traverse, Handlers, TraverseOptions, Visitor};
//!
//! let mut out = parse("a + b;", &ParseOptions::default(), &ActivePlugins::none()).unwrap();
//! let mut scopes = ember_scope::analyze(&out.ast, out.root).unwrap();
//!
//! let mut rename = Handlers::new("rename").on_enter(NodeType::Identifier, |path| {
//!     let node = path.node();
//!     let name = path.ast_mut().intern("c");
//!     if let Some(NodeKind::Identifier { name: slot, .. }) = path.ast_mut().kind_mut(node) {
//!         *slot = name;
//!     }
//!     Ok(())
//! });
//! let mut visitors: [&mut dyn Visitor; 1] = [&mut rename];
//! traverse(&mut out.ast, out.root, &mut scopes, &mut visitors, &TraverseOptions::default()).unwrap();
//!
//! let code = ember_codegen::generate(&out.ast, out.root, &Default::default()).unwrap();
//! assert_eq!(code, "c + c;");
//! ```

mod engine;
mod error;
mod location;
mod path;
mod registry;
pub mod transforms;
mod visitor;

pub use error::{HandlerError, HandlerResult, PathError, RegistryError, TransformError};
pub use path::{matches_pattern, NodePath, Phase};
pub use registry::{OptionValue, PluginOptions, TransformFactory, TransformRegistry, TransformSpec};
pub use visitor::{Handler, Handlers, Visitor};

use ember_ir::{Ast, NodeId, NodeType};
use ember_scope::ScopeTree;

use crate::engine::Engine;

/// Traversal options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraverseOptions {
    /// Node types skipped together with their subtrees.
    pub denylist: Vec<NodeType>,
}

impl TraverseOptions {
    #[must_use]
    pub fn with_denylist(mut self, denylist: Vec<NodeType>) -> Self {
        self.denylist = denylist;
        self
    }
}

/// Visit the subtree at `root` with `visitors`, in order.
///
/// The first handler error aborts the pass; mutations made before it are
/// kept.
#[tracing::instrument(level = "debug", skip_all, fields(root = root.index(), visitors = visitors.len()))]
pub fn traverse(
    ast: &mut Ast,
    root: NodeId,
    scopes: &mut ScopeTree,
    visitors: &mut [&mut dyn Visitor],
    options: &TraverseOptions,
) -> Result<(), TransformError> {
    Engine::new(ast, root, scopes, options).run(visitors)
}

/// Whether the subtree at `root` contains a node of type `ty` outside
/// denylisted subtrees.
pub fn has_type(ast: &Ast, root: NodeId, ty: NodeType, denylist: &[NodeType]) -> bool {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let node_type = ast.node_type(node);
        if denylist.contains(&node_type) {
            continue;
        }
        if node_type == ty {
            return true;
        }
        stack.extend(ast.kind(node).children());
    }
    false
}

#[cfg(test)]
mod tests;
