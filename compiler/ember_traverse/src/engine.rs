//! The traversal worklist.
//!
//! Traversal is iterative: a stack of `(node, phase)` entries replaces
//! recursion, so deep trees cannot overflow and handlers can schedule
//! extra visits by pushing entries. An entry whose node was detached by
//! an earlier mutation is dropped when it is popped.

use ember_ir::{Ast, NodeId};
use ember_scope::ScopeTree;
use tracing::{debug, trace};

use crate::location::{self, Links, Location};
use crate::path::{NodePath, PathState, Phase};
use crate::{HandlerResult, TransformError, TraverseOptions, Visitor};

#[derive(Copy, Clone, Debug)]
struct Entry {
    node: NodeId,
    phase: Phase,
}

pub(crate) struct Engine<'a> {
    ast: &'a mut Ast,
    scopes: &'a mut ScopeTree,
    options: &'a TraverseOptions,
    root: NodeId,
    links: Links,
    stack: Vec<Entry>,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(
        ast: &'a mut Ast,
        root: NodeId,
        scopes: &'a mut ScopeTree,
        options: &'a TraverseOptions,
    ) -> Self {
        Engine {
            ast,
            scopes,
            options,
            root,
            links: Links::default(),
            stack: Vec::new(),
        }
    }

    fn push(&mut self, nodes: &[NodeId], phase: Phase) {
        self.stack
            .extend(nodes.iter().rev().map(|&node| Entry { node, phase }));
    }

    /// Run a whole-unit hook on every visitor, in order.
    fn hook(
        &self,
        visitors: &mut [&mut dyn Visitor],
        call: impl Fn(&mut dyn Visitor, &Ast, &ScopeTree) -> HandlerResult,
    ) -> Result<(), TransformError> {
        for visitor in visitors.iter_mut() {
            if let Err(source) = call(&mut **visitor, &*self.ast, &*self.scopes) {
                let node_type = self.ast.node_type(self.root);
                debug!(plugin = visitor.name(), "unit hook failed");
                return Err(TransformError {
                    plugin: visitor.name().to_owned(),
                    node_type,
                    span: self.ast.span(self.root),
                    source,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn run(mut self, visitors: &mut [&mut dyn Visitor]) -> Result<(), TransformError> {
        self.hook(visitors, |visitor, ast, scopes| visitor.pre(ast, scopes))?;
        self.walk(visitors)?;
        self.hook(visitors, |visitor, ast, scopes| visitor.post(ast, scopes))
    }

    fn walk(&mut self, visitors: &mut [&mut dyn Visitor]) -> Result<(), TransformError> {
        let root = self.root;
        self.push(&[root], Phase::Enter);
        let mut visited = 0usize;

        while let Some(entry) = self.stack.pop() {
            if !location::is_attached(self.ast, &self.links, self.root, entry.node) {
                trace!(node = entry.node.index(), "skip detached node");
                continue;
            }
            let node_type = self.ast.node_type(entry.node);
            if self.options.denylist.contains(&node_type) {
                continue;
            }
            visited += 1;

            let mut state = PathState::default();
            for visitor in visitors.iter_mut() {
                let span = self.ast.span(entry.node);
                let mut path = NodePath {
                    ast: &mut *self.ast,
                    scopes: &mut *self.scopes,
                    links: &mut self.links,
                    state: &mut state,
                    root: self.root,
                    node: entry.node,
                    phase: entry.phase,
                };
                let result = match entry.phase {
                    Phase::Enter => visitor.enter(&mut path),
                    Phase::Exit => visitor.exit(&mut path),
                };
                if let Err(source) = result {
                    debug!(plugin = visitor.name(), %node_type, "handler failed");
                    return Err(TransformError {
                        plugin: visitor.name().to_owned(),
                        node_type,
                        span,
                        source,
                    });
                }
                if state.is_halted() {
                    break;
                }
            }

            if state.stop {
                debug!(node = entry.node.index(), "traversal stopped");
                return Ok(());
            }

            // Popped after the subtree below, before-nodes first.
            self.push(&state.inserted_after, Phase::Enter);
            self.push(&state.inserted_before, Phase::Enter);

            if let Some(replacements) = state.replaced {
                self.push(&replacements, Phase::Enter);
                continue;
            }
            if state.removed {
                continue;
            }

            match entry.phase {
                Phase::Enter if !state.skip => {
                    self.push(&[entry.node], Phase::Exit);
                    let mut children = Vec::new();
                    for (field, (_, value)) in self.ast.kind(entry.node).fields().into_iter().enumerate() {
                        for child in value.ids() {
                            self.links.insert(
                                child,
                                Location {
                                    parent: entry.node,
                                    field,
                                },
                            );
                            children.push(child);
                        }
                    }
                    self.push(&children, Phase::Enter);
                }
                Phase::Enter => {}
                Phase::Exit => self.push(&state.container_inserts, Phase::Enter),
            }
        }

        debug!(visited, "traversal finished");
        Ok(())
    }
}
