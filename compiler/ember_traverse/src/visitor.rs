//! Visitors.
//!
//! A transform plugin is a [`Visitor`]: a named value whose `enter` and
//! `exit` methods are called for every node the engine reaches, with
//! `pre` and `post` bracketing the whole walk. Plugins
//! that only care about a few node types can be written as [`Handlers`],
//! a table of closures keyed by [`NodeType`].

use std::fmt;

use ember_ir::{Ast, NodeType};
use ember_scope::ScopeTree;
use rustc_hash::FxHashMap;

use crate::{HandlerResult, NodePath};

/// A transform plugin instance for one compilation unit.
///
/// Every hook defaults to doing nothing.
pub trait Visitor {
    /// Plugin name, reported when a handler fails.
    fn name(&self) -> &str;

    /// Called once before the walk, in visitor order.
    fn pre(&mut self, ast: &Ast, scopes: &ScopeTree) -> HandlerResult {
        let _ = (ast, scopes);
        Ok(())
    }

    /// Called once after the walk, in visitor order. Runs after a
    /// [`stop`](NodePath::stop) too, but not after a handler error.
    fn post(&mut self, ast: &Ast, scopes: &ScopeTree) -> HandlerResult {
        let _ = (ast, scopes);
        Ok(())
    }

    fn enter(&mut self, path: &mut NodePath<'_>) -> HandlerResult {
        let _ = path;
        Ok(())
    }

    fn exit(&mut self, path: &mut NodePath<'_>) -> HandlerResult {
        let _ = path;
        Ok(())
    }
}

pub type Handler = Box<dyn FnMut(&mut NodePath<'_>) -> HandlerResult>;

/// A visitor built from per-node-type closures.
///
/// Handlers for one type run in the order they were added; a handler that
/// removes, replaces or skips the node ends the run for that node.
///
/// ```
/// use ember_ir::NodeType;
/// use ember_traverse::Handlers;
///
/// let visitor = Handlers::new("count-calls").on_enter(NodeType::CallExpression, |_path| Ok(()));
/// assert!(visitor.handles(NodeType::CallExpression));
/// ```
pub struct Handlers {
    name: String,
    enter: FxHashMap<NodeType, Vec<Handler>>,
    exit: FxHashMap<NodeType, Vec<Handler>>,
}

impl Handlers {
    pub fn new(name: impl Into<String>) -> Self {
        Handlers {
            name: name.into(),
            enter: FxHashMap::default(),
            exit: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn on_enter(
        mut self,
        node_type: NodeType,
        handler: impl FnMut(&mut NodePath<'_>) -> HandlerResult + 'static,
    ) -> Self {
        self.enter.entry(node_type).or_default().push(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_exit(
        mut self,
        node_type: NodeType,
        handler: impl FnMut(&mut NodePath<'_>) -> HandlerResult + 'static,
    ) -> Self {
        self.exit.entry(node_type).or_default().push(Box::new(handler));
        self
    }

    pub fn handles(&self, node_type: NodeType) -> bool {
        self.enter.contains_key(&node_type) || self.exit.contains_key(&node_type)
    }
}

fn run(table: &mut FxHashMap<NodeType, Vec<Handler>>, path: &mut NodePath<'_>) -> HandlerResult {
    let Some(handlers) = table.get_mut(&path.node_type()) else {
        return Ok(());
    };
    for handler in handlers {
        handler(path)?;
        if path.is_halted() {
            break;
        }
    }
    Ok(())
}

impl Visitor for Handlers {
    fn name(&self) -> &str {
        &self.name
    }

    fn enter(&mut self, path: &mut NodePath<'_>) -> HandlerResult {
        run(&mut self.enter, path)
    }

    fn exit(&mut self, path: &mut NodePath<'_>) -> HandlerResult {
        run(&mut self.exit, path)
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self
            .enter
            .keys()
            .chain(self.exit.keys())
            .map(|ty| ty.as_str())
            .collect();
        types.sort_unstable();
        types.dedup();
        f.debug_struct("Handlers")
            .field("name", &self.name)
            .field("types", &types)
            .finish()
    }
}
