//! Path mutations.
//!
//! Every mutation keeps three things in step: the arena, the engine's
//! parent links and the scope tree. Detached subtrees go through
//! [`ScopeTree::remove_subtree`](ember_scope::ScopeTree::remove_subtree),
//! attached ones through
//! [`ScopeTree::crawl_subtree`](ember_scope::ScopeTree::crawl_subtree).

use ember_diagnostic::{code_frame, CodeFrameOptions};
use ember_ir::{NodeId, NodeKind, NodeType, Span};
use ember_parse::{parse_expression, ActivePlugins, ParseOptions};
use smallvec::{smallvec, SmallVec};
use tracing::trace;

use super::{NodePath, Phase};
use crate::location::{self, Location};
use crate::PathError;

impl NodePath<'_> {
    pub(super) fn check_live(&self) -> Result<(), PathError> {
        if self.state.removed || self.state.replaced.is_some() {
            return Err(PathError::Removed);
        }
        Ok(())
    }

    pub(super) fn attached_location(&self, action: &'static str) -> Result<Location, PathError> {
        self.check_live()?;
        if self.node == self.root {
            return Err(PathError::Root(action));
        }
        self.location().ok_or(PathError::Root(action))
    }

    /// Reject nodes the walk has already linked into the tree, except
    /// those inside `within`, the subtree about to be detached.
    pub(super) fn check_detached(&self, nodes: &[NodeId], within: Option<NodeId>) -> Result<(), PathError> {
        for (index, &node) in nodes.iter().enumerate() {
            let attached = node == self.root
                || nodes[..index].contains(&node)
                || (location::is_attached(self.ast, self.links, self.root, node)
                    && !within.is_some_and(|within| self.is_inside(node, within)));
            if attached {
                return Err(PathError::AlreadyAttached {
                    node_type: self.ast.node_type(node),
                });
            }
        }
        Ok(())
    }

    /// Whether `node` is `ancestor` or linked below it.
    fn is_inside(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == ancestor {
                return true;
            }
            match self.links.get(&current) {
                Some(loc) => current = loc.parent,
                None => return false,
            }
        }
    }

    fn grandparent(&self, loc: Location) -> Option<NodeId> {
        self.links.get(&loc.parent).map(|up| up.parent)
    }

    /// Record `node` at `loc` and register its declarations and reads.
    pub(super) fn attach(&mut self, node: NodeId, loc: Location) -> Result<(), PathError> {
        self.links.insert(node, loc);
        let scope = self.position_scope(loc);
        let grandparent = self.grandparent(loc);
        self.scopes
            .crawl_subtree(self.ast, node, Some(loc.parent), grandparent, scope)?;
        Ok(())
    }

    /// Wrap expressions bound for a statement list.
    pub(super) fn to_statements(&mut self, nodes: &[NodeId]) -> SmallVec<[NodeId; 2]> {
        nodes
            .iter()
            .map(|&node| {
                if self.ast.node_type(node).is_expression() {
                    self.ast.expression_statement(node)
                } else {
                    node
                }
            })
            .collect()
    }

    /// Adapt `replacement` to the slot `self.node` occupies.
    fn adapt_replacement(&mut self, replacement: NodeId) -> Result<NodeId, PathError> {
        let current = self.node_type();
        let incoming = self.ast.node_type(replacement);
        if current.is_statement() && incoming.is_expression() {
            return Ok(self.ast.expression_statement(replacement));
        }
        if current.is_expression() && incoming.is_statement() && !incoming.is_expression() {
            return Err(PathError::StatementForExpression { node_type: current });
        }
        Ok(replacement)
    }

    /// Put `replacement` where this node is and visit it next.
    ///
    /// An expression replacing a statement is wrapped in an
    /// `ExpressionStatement`; a statement cannot replace an expression.
    /// `replacement` must be detached or lie inside this node.
    pub fn replace_with(&mut self, replacement: NodeId) -> Result<(), PathError> {
        let loc = self.attached_location("replaced")?;
        self.check_detached(&[replacement], Some(self.node))?;
        let replacement = self.adapt_replacement(replacement)?;
        let old = self.node;
        if !location::replace(self.ast, loc, old, &[replacement]) {
            return Err(PathError::Removed);
        }
        trace!(
            old = old.index(),
            new = replacement.index(),
            node_type = %self.ast.node_type(replacement),
            "replace node"
        );

        self.scopes.remove_subtree(self.ast, old);
        self.links.remove(&old);
        self.attach(replacement, loc)?;
        self.state.replaced = Some(smallvec![replacement]);
        self.node = replacement;
        Ok(())
    }

    /// Replace this list entry with several nodes. An empty list removes
    /// the node; a single node behaves like [`replace_with`](Self::replace_with).
    pub fn replace_with_multiple(&mut self, nodes: Vec<NodeId>) -> Result<(), PathError> {
        match nodes.as_slice() {
            [] => return self.remove(),
            [single] => return self.replace_with(*single),
            _ => {}
        }

        let loc = self.attached_location("replaced")?;
        self.check_detached(&nodes, Some(self.node))?;
        if !location::is_list(self.ast, loc) {
            return Err(PathError::NotInList {
                node_type: self.node_type(),
            });
        }
        let nodes = if self.node_type().is_statement() {
            self.to_statements(&nodes)
        } else {
            nodes.into_iter().collect()
        };

        let old = self.node;
        if !location::replace(self.ast, loc, old, &nodes) {
            return Err(PathError::Removed);
        }
        trace!(old = old.index(), count = nodes.len(), "replace node with multiple");

        self.scopes.remove_subtree(self.ast, old);
        self.links.remove(&old);
        for &node in &nodes {
            self.attach(node, loc)?;
        }
        self.state.replaced = Some(nodes);
        Ok(())
    }

    /// Parse `source` as an expression and replace this node with it.
    ///
    /// On a syntax error the message carries a code frame of the
    /// parenthesized source.
    pub fn replace_with_source_string(&mut self, source: &str) -> Result<(), PathError> {
        self.check_live()?;
        let wrapped = format!("({source})");
        let parsed = parse_expression(&wrapped, &ParseOptions::default(), &ActivePlugins::none())
            .map_err(|err| {
                let position = err.position();
                let column = isize::try_from(position.column).map_or(isize::MAX, |c| c + 1);
                let frame = code_frame(
                    &wrapped,
                    usize::try_from(position.line).ok(),
                    Some(column),
                    &CodeFrameOptions::default(),
                );
                PathError::SourceString {
                    message: err.message(),
                    frame,
                }
            })?;
        let replacement = self.ast.import_subtree(&parsed.ast, parsed.root);
        self.replace_with(replacement)
    }

    /// Detach this node.
    ///
    /// Some positions cannot be left empty, so removal reaches further:
    /// - the expression of an `ExpressionStatement` removes the statement
    /// - the only declarator of a declaration removes the declaration
    /// - the body of a labeled statement removes the labeled statement
    /// - a required loop, `if` or `with` body becomes `{}`
    pub fn remove(&mut self) -> Result<(), PathError> {
        self.attached_location("removed")?;
        let node = self.node;
        self.remove_node(node)?;
        self.state.removed = true;
        Ok(())
    }

    fn remove_node(&mut self, node: NodeId) -> Result<(), PathError> {
        let Some(loc) = self.links.get(&node).copied() else {
            return Err(PathError::Root("removed"));
        };
        let parent_kind = self.ast.kind(loc.parent);
        let field = location::field_name(self.ast, loc);

        let remove_parent = match parent_kind {
            NodeKind::ExpressionStatement { .. } => field == "expression",
            NodeKind::VariableDeclaration { declarations, .. } => declarations.len() == 1,
            NodeKind::LabeledStatement { .. } => field == "body",
            _ => false,
        };
        if remove_parent {
            return self.remove_node(loc.parent);
        }

        if location::is_list(self.ast, loc) || is_optional(self.ast, loc) {
            if !location::replace(self.ast, loc, node, &[]) {
                return Err(PathError::Removed);
            }
            trace!(node = node.index(), field, "remove node");
            self.scopes.remove_subtree(self.ast, node);
            self.links.remove(&node);
            return Ok(());
        }

        let parent_type = self.ast.node_type(loc.parent);
        let requires_body = match field {
            "consequent" => parent_type == NodeType::IfStatement,
            "body" => matches!(
                parent_type,
                NodeType::WhileStatement
                    | NodeType::DoWhileStatement
                    | NodeType::ForStatement
                    | NodeType::ForInStatement
                    | NodeType::ForOfStatement
                    | NodeType::WithStatement
            ),
            _ => false,
        };
        if !requires_body {
            return Err(PathError::CannotRemove {
                node_type: self.ast.node_type(node),
                parent: parent_type,
                field,
            });
        }

        let block = self.ast.alloc(
            NodeKind::BlockStatement {
                directives: Vec::new(),
                body: Vec::new(),
            },
            Span::DUMMY,
        );
        if !location::replace(self.ast, loc, node, &[block]) {
            return Err(PathError::Removed);
        }
        trace!(node = node.index(), field, "replace removed body with empty block");
        self.scopes.remove_subtree(self.ast, node);
        self.links.remove(&node);
        self.attach(block, loc)
    }

    /// The statement list entry that insertions are relative to: this
    /// node, or its `ExpressionStatement` when this is the expression.
    fn insertion_target(&self) -> Result<(NodeId, Location), PathError> {
        let loc = self.attached_location("inserted around")?;
        if location::is_list(self.ast, loc) {
            return Ok((self.node, loc));
        }
        if matches!(self.ast.kind(loc.parent), NodeKind::ExpressionStatement { .. }) {
            if let Some(up) = self.links.get(&loc.parent).copied() {
                if location::is_list(self.ast, up) {
                    return Ok((loc.parent, up));
                }
            }
        }
        Err(PathError::NotInList {
            node_type: self.node_type(),
        })
    }

    fn insert_at(&mut self, offset: usize, nodes: &[NodeId]) -> Result<SmallVec<[NodeId; 2]>, PathError> {
        let (target, loc) = self.insertion_target()?;
        self.check_detached(nodes, None)?;
        let nodes = if self.ast.node_type(target).is_statement() {
            self.to_statements(nodes)
        } else {
            nodes.iter().copied().collect()
        };
        let index = location::position(self.ast, loc, target).ok_or(PathError::Removed)? + offset;
        location::insert(self.ast, loc, index, &nodes);
        for &node in &nodes {
            self.attach(node, loc)?;
        }
        Ok(nodes)
    }

    /// Insert siblings before this node. They are visited after this
    /// node's subtree, ahead of nodes inserted after it.
    pub fn insert_before(&mut self, nodes: Vec<NodeId>) -> Result<(), PathError> {
        let inserted = self.insert_at(0, &nodes)?;
        trace!(count = inserted.len(), "insert before");
        self.state.inserted_before.extend(inserted);
        Ok(())
    }

    /// Insert siblings after this node, visited after this node's subtree.
    pub fn insert_after(&mut self, nodes: Vec<NodeId>) -> Result<(), PathError> {
        let inserted = self.insert_at(1, &nodes)?;
        trace!(count = inserted.len(), "insert after");
        self.state.inserted_after.extend(inserted);
        Ok(())
    }

    fn container_insert(&mut self, field: &str, at_end: bool, nodes: &[NodeId]) -> Result<Vec<NodeId>, PathError> {
        self.check_live()?;
        self.check_detached(nodes, None)?;
        let node_type = self.node_type();
        let index = self
            .ast
            .kind(self.node)
            .field_index(field)
            .filter(|&index| {
                self.ast
                    .kind(self.node)
                    .fields()
                    .into_iter()
                    .nth(index)
                    .is_some_and(|(_, value)| value.is_list())
            })
            .ok_or_else(|| PathError::NoSuchList {
                node_type,
                field: field.to_owned(),
            })?;
        let loc = Location {
            parent: self.node,
            field: index,
        };

        let holds_statements = matches!(
            (node_type, field),
            (NodeType::Program | NodeType::BlockStatement, "body") | (NodeType::SwitchCase, "consequent")
        );
        let nodes: Vec<NodeId> = if holds_statements {
            self.to_statements(nodes).into_vec()
        } else {
            nodes.to_vec()
        };

        let at = if at_end {
            location::list(self.ast, loc).map_or(0, |items| items.len())
        } else {
            0
        };
        location::insert(self.ast, loc, at, &nodes);
        for &node in &nodes {
            self.attach(node, loc)?;
        }
        trace!(field, count = nodes.len(), at_end, "container insert");

        // Children of an entered node are queued after its handlers run.
        if self.phase == Phase::Exit {
            self.state.container_inserts.extend(nodes.iter().copied());
        }
        Ok(nodes)
    }

    /// Insert at the front of this node's list field `field`. Returns the
    /// inserted nodes, after any statement wrapping.
    pub fn unshift_container(&mut self, field: &str, nodes: Vec<NodeId>) -> Result<Vec<NodeId>, PathError> {
        self.container_insert(field, false, &nodes)
    }

    /// Append to this node's list field `field`.
    pub fn push_container(&mut self, field: &str, nodes: Vec<NodeId>) -> Result<Vec<NodeId>, PathError> {
        self.container_insert(field, true, &nodes)
    }

    /// Do not visit this node's children, and skip its exit.
    pub fn skip(&mut self) {
        self.state.skip = true;
    }

    /// End the whole traversal after the current handler.
    pub fn stop(&mut self) {
        self.state.stop = true;
    }
}

fn is_optional(ast: &ember_ir::Ast, loc: Location) -> bool {
    ast.kind(loc.parent)
        .fields()
        .into_iter()
        .nth(loc.field)
        .is_some_and(|(_, field)| matches!(field, ember_ir::Field::Opt(_)))
}
