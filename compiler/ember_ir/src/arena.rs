//! Node arena.
//!
//! One `Ast` per compilation unit holds every node and the unit's string
//! interner. Nodes are never freed: removal detaches a node from its parent
//! and leaves the slot in place, so ids held elsewhere stay valid.

use rustc_hash::FxHashMap;

use crate::ast::{Node, NodeKind, NodeType};
use crate::{Name, NodeId, Span, StringInterner};

#[derive(Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl Ast {
    pub fn new() -> Self {
        Ast {
            nodes: Vec::new(),
            interner: StringInterner::new(),
        }
    }

    /// Allocate a node, returning its id.
    #[inline]
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::new(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX - 1));
        self.nodes.push(Node { kind, span });
        id
    }

    /// Number of allocated nodes (including detached ones).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node allocated after the first `len`.
    ///
    /// Parser backtracking uses this to discard speculative nodes.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Node kind. Invalid ids resolve to an empty statement.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        self.nodes
            .get(id.index())
            .map_or(&NodeKind::EmptyStatement, |n| &n.kind)
    }

    #[inline]
    pub fn kind_mut(&mut self, id: NodeId) -> Option<&mut NodeKind> {
        self.nodes.get_mut(id.index()).map(|n| &mut n.kind)
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes.get(id.index()).map_or(Span::DUMMY, |n| n.span)
    }

    pub fn set_span(&mut self, id: NodeId, span: Span) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.span = span;
        }
    }

    #[inline]
    pub fn node_type(&self, id: NodeId) -> NodeType {
        self.kind(id).node_type()
    }

    /// Replace a node's kind in place, keeping its id and span.
    pub fn replace_kind(&mut self, id: NodeId, kind: NodeKind) -> Option<NodeKind> {
        self.nodes
            .get_mut(id.index())
            .map(|n| std::mem::replace(&mut n.kind, kind))
    }

    #[inline]
    pub fn intern(&mut self, text: &str) -> Name {
        self.interner.intern(text)
    }

    #[inline]
    pub fn name(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Name of an `Identifier` node.
    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Identifier { name, .. } => Some(self.name(*name)),
            _ => None,
        }
    }

    /// Pre-order list of `root` and every node below it.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.get(id).is_none() {
                continue;
            }
            out.push(id);
            let children = self.kind(id).children();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Deep-copy a subtree inside this arena, returning the new root.
    ///
    /// Spans are copied; the clone shares no node with the original.
    pub fn clone_subtree(&mut self, root: NodeId) -> NodeId {
        let order = self.descendants(root);
        let mut remap: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        for &old in &order {
            let node = self.nodes[old.index()].clone();
            let new = self.alloc(node.kind, node.span);
            remap.insert(old, new);
        }
        for &old in &order {
            let new = remap[&old];
            if let Some(kind) = self.kind_mut(new) {
                for (_, mut field) in kind.fields_mut() {
                    field.for_each_id(|id| {
                        if let Some(mapped) = remap.get(id) {
                            *id = *mapped;
                        }
                    });
                }
            }
        }
        remap.get(&root).copied().unwrap_or(NodeId::INVALID)
    }

    /// Copy a subtree out of another arena, re-interning its names.
    pub fn import_subtree(&mut self, from: &Ast, root: NodeId) -> NodeId {
        let order = from.descendants(root);
        let mut remap: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        for &old in &order {
            let Some(node) = from.get(old) else { continue };
            let mut kind = node.kind.clone();
            for name in kind.names_mut() {
                *name = self.interner.intern(from.name(*name));
            }
            let new = self.alloc(kind, node.span);
            remap.insert(old, new);
        }
        for new in remap.values().copied().collect::<Vec<_>>() {
            if let Some(kind) = self.kind_mut(new) {
                for (_, mut field) in kind.fields_mut() {
                    field.for_each_id(|id| {
                        if let Some(mapped) = remap.get(id) {
                            *id = *mapped;
                        }
                    });
                }
            }
        }
        remap.get(&root).copied().unwrap_or(NodeId::INVALID)
    }

    /// Compare two subtrees by shape: node types, attributes and children,
    /// ignoring spans. The trees may live in different arenas.
    pub fn structurally_eq(&self, a: NodeId, other: &Ast, b: NodeId) -> bool {
        let mut pending = vec![(a, b)];
        while let Some((a, b)) = pending.pop() {
            let (Some(left), Some(right)) = (self.get(a), other.get(b)) else {
                return false;
            };
            let mut left = left.kind.clone();
            let mut right = right.kind.clone();
            if left.node_type() != right.node_type() {
                return false;
            }

            // Resolve names to text; different interners assign different ids.
            let left_names: Vec<&str> = left.names_mut().iter().map(|n| self.name(**n)).collect();
            let right_names: Vec<&str> =
                right.names_mut().iter().map(|n| other.name(**n)).collect();
            if left_names != right_names {
                return false;
            }
            for name in left.names_mut() {
                *name = Name::EMPTY;
            }
            for name in right.names_mut() {
                *name = Name::EMPTY;
            }

            let left_children = left.children();
            let right_children = right.children();
            if left_children.len() != right_children.len() {
                return false;
            }
            for kind in [&mut left, &mut right] {
                for (_, mut field) in kind.fields_mut() {
                    field.for_each_id(|id| *id = NodeId::INVALID);
                }
            }
            if left != right {
                return false;
            }
            pending.extend(left_children.into_iter().zip(right_children));
        }
        true
    }
}

impl std::fmt::Debug for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ast")
            .field("nodes", &self.nodes.len())
            .field("interner", &self.interner)
            .finish()
    }
}

#[cfg(test)]
mod tests;
