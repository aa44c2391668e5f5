//! The handler's view of the node being visited.
//!
//! A [`NodePath`] is built fresh for every handler call. It borrows the
//! tree, the scope tree and the engine's parent links, and records what
//! the handler asked for (removal, replacement, insertions, skip, stop)
//! so the engine can schedule follow-up visits once the handler returns.

mod completion;
mod inline;
mod modification;

use ember_ir::{Ast, Field, LiteralValue, Name, NodeId, NodeKind, NodeType, Span};
use ember_scope::{is_referenced, BindingId, BindingKind, ScopeId, ScopeTree};
use smallvec::SmallVec;

use crate::location::{self, Links, Location};

/// Enter or exit half of a visit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Enter,
    Exit,
}

/// What handlers asked for while visiting one node.
#[derive(Default, Debug)]
pub(crate) struct PathState {
    pub(crate) removed: bool,
    pub(crate) replaced: Option<SmallVec<[NodeId; 2]>>,
    pub(crate) skip: bool,
    pub(crate) stop: bool,
    pub(crate) inserted_before: Vec<NodeId>,
    pub(crate) inserted_after: Vec<NodeId>,
    /// Container insertions made during exit, visited explicitly.
    pub(crate) container_inserts: Vec<NodeId>,
}

impl PathState {
    pub(crate) fn is_halted(&self) -> bool {
        self.removed || self.replaced.is_some() || self.skip || self.stop
    }
}

pub struct NodePath<'a> {
    pub(crate) ast: &'a mut Ast,
    pub(crate) scopes: &'a mut ScopeTree,
    pub(crate) links: &'a mut Links,
    pub(crate) state: &'a mut PathState,
    pub(crate) root: NodeId,
    pub(crate) node: NodeId,
    pub(crate) phase: Phase,
}

impl<'a> NodePath<'a> {
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[inline]
    pub fn node_type(&self) -> NodeType {
        self.ast.node_type(self.node)
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        self.ast.kind(self.node)
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.ast.span(self.node)
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ast(&self) -> &Ast {
        self.ast
    }

    /// Direct tree access, for building nodes. Edits made here bypass
    /// scope bookkeeping and scheduling; prefer the path operations for
    /// anything attached to the tree.
    pub fn ast_mut(&mut self) -> &mut Ast {
        self.ast
    }

    pub fn scopes(&self) -> &ScopeTree {
        self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut ScopeTree {
        self.scopes
    }

    /// Whether a handler already removed, replaced or skipped this node,
    /// or stopped the traversal.
    pub fn is_halted(&self) -> bool {
        self.state.is_halted()
    }

    pub fn is_removed(&self) -> bool {
        self.state.removed
    }

    pub(crate) fn location(&self) -> Option<Location> {
        self.links.get(&self.node).copied()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.location().map(|loc| loc.parent)
    }

    /// Name of the parent field holding this node (`"body"`, `"params"`).
    pub fn parent_key(&self) -> Option<&'static str> {
        self.location().map(|loc| location::field_name(self.ast, loc))
    }

    /// Index of this node in its parent list, if it is in one.
    pub fn list_index(&self) -> Option<usize> {
        let loc = self.location()?;
        location::position(self.ast, loc, self.node)
    }

    pub fn is_in_list(&self) -> bool {
        self.location().is_some_and(|loc| location::is_list(self.ast, loc))
    }

    /// A child field of this node by name.
    pub fn get(&self, field: &str) -> Option<Field<'_>> {
        self.ast
            .kind(self.node)
            .fields()
            .into_iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// The node in a single or optional child field.
    pub fn get_node(&self, field: &str) -> Option<NodeId> {
        match self.get(field)? {
            Field::One(id) => Some(id),
            Field::Opt(id) => id,
            Field::Many(_) => None,
        }
    }

    /// The item at `index` of the list holding this node.
    pub fn get_sibling(&self, index: usize) -> Option<NodeId> {
        let loc = self.location()?;
        location::list(self.ast, loc)?.get(index).copied()
    }

    pub fn get_prev_sibling(&self) -> Option<NodeId> {
        self.get_sibling(self.list_index()?.checked_sub(1)?)
    }

    pub fn get_next_sibling(&self) -> Option<NodeId> {
        self.get_sibling(self.list_index()? + 1)
    }

    /// Every later item of the list holding this node, nearest first.
    pub fn get_all_next_siblings(&self) -> Vec<NodeId> {
        let (Some(loc), Some(index)) = (self.location(), self.list_index()) else {
            return Vec::new();
        };
        location::list(self.ast, loc).map_or_else(Vec::new, |items| items[index + 1..].to_vec())
    }

    /// Statements whose value this node evaluates to, in source order.
    ///
    /// Blocks complete with their last statement, `if` with both branches,
    /// loops and labels with their body, `try` with every clause, and a
    /// `switch` with the last value of each case. For a function it is
    /// the records of its body; any other node is its own record.
    pub fn get_completion_records(&self) -> Vec<NodeId> {
        completion::completion_records(self.ast, self.node)
            .into_iter()
            .map(|record| record.node)
            .collect()
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.node;
        while let Some(loc) = self.links.get(&current) {
            out.push(loc.parent);
            current = loc.parent;
        }
        out
    }

    /// First ancestor satisfying `predicate`, nearest first.
    pub fn find_parent(&self, mut predicate: impl FnMut(&Ast, NodeId) -> bool) -> Option<NodeId> {
        self.ancestors()
            .into_iter()
            .find(|id| predicate(self.ast, *id))
    }

    /// This node or its nearest ancestor that is a statement inside a list.
    pub fn get_statement_parent(&self) -> Option<NodeId> {
        let mut current = self.node;
        loop {
            let loc = self.links.get(&current)?;
            if self.ast.node_type(current).is_statement() && location::is_list(self.ast, *loc) {
                return Some(current);
            }
            current = loc.parent;
        }
    }

    /// Whether this node is a member chain spelling `pattern`
    /// (`"process.env.NODE_ENV"`).
    pub fn matches_pattern(&self, pattern: &str) -> bool {
        matches_pattern(self.ast, self.node, pattern, false)
    }

    /// Whether this node is an identifier read at its position.
    pub fn is_referenced_identifier(&self) -> bool {
        if !matches!(self.kind(), NodeKind::Identifier { .. }) {
            return false;
        }
        match self.location() {
            Some(loc) => {
                let grandparent = self.links.get(&loc.parent).map(|l| l.parent);
                is_referenced(self.ast, self.node, loc.parent, grandparent)
            }
            None => true,
        }
    }

    /// Whether this node reads a binding imported from `source`.
    ///
    /// `import_name` narrows the match to one import: `"default"` for a
    /// default import, `"*"` for a namespace import, or the imported name.
    pub fn references_import(&self, source: &str, import_name: Option<&str>) -> bool {
        if !self.is_referenced_identifier() {
            return false;
        }
        let Some(binding) = self
            .ast
            .identifier_name(self.node)
            .and_then(|name| self.get_binding(name))
            .map(|id| self.scopes.binding(id))
        else {
            return false;
        };
        if binding.kind() != BindingKind::Module {
            return false;
        }
        let specifier = binding.path();
        let Some(declaration) = self.import_declaration_of(specifier) else {
            return false;
        };
        let NodeKind::ImportDeclaration { source: from, .. } = self.ast.kind(declaration) else {
            return false;
        };
        if string_value(self.ast, *from) != Some(source) {
            return false;
        }

        let Some(import_name) = import_name else {
            return true;
        };
        match self.ast.kind(specifier) {
            NodeKind::ImportDefaultSpecifier { .. } => import_name == "default",
            NodeKind::ImportNamespaceSpecifier { .. } => import_name == "*",
            NodeKind::ImportSpecifier { imported, .. } => {
                self.ast
                    .identifier_name(*imported)
                    .or_else(|| string_value(self.ast, *imported))
                    == Some(import_name)
            }
            _ => false,
        }
    }

    /// The top-level import declaration holding `specifier`.
    fn import_declaration_of(&self, specifier: NodeId) -> Option<NodeId> {
        let NodeKind::Program { body, .. } = self.ast.kind(self.root) else {
            return None;
        };
        body.iter().copied().find(|statement| {
            matches!(
                self.ast.kind(*statement),
                NodeKind::ImportDeclaration { specifiers, .. } if specifiers.contains(&specifier)
            )
        })
    }

    /// Scope enclosing this node.
    pub fn scope(&self) -> ScopeId {
        if let Some(scope) = self.scopes.scope_of(self.node) {
            return scope;
        }
        match self.location() {
            Some(loc) => self.position_scope(loc),
            None => self.scopes.root(),
        }
    }

    /// Resolve `name` from this node's scope.
    pub fn get_binding(&self, name: &str) -> Option<BindingId> {
        self.scopes.resolve(self.ast, self.scope(), name)
    }

    /// A fresh identifier name unused anywhere in the unit.
    pub fn generate_uid(&mut self, base: &str) -> Name {
        self.scopes.generate_uid(self.ast, base)
    }

    /// Scope for a node placed at `loc`.
    pub(crate) fn position_scope(&self, loc: Location) -> ScopeId {
        let mut parent = loc.parent;
        let mut field = location::field_name(self.ast, loc);
        loop {
            if let Some(scope) = self.scopes.scope_of(parent) {
                let introduces = self.scopes.scope(scope).node() == parent;
                if introduces && matches!(field, "decorators" | "key") {
                    return self.scopes.scope(scope).parent().unwrap_or(scope);
                }
                return scope;
            }
            match self.links.get(&parent) {
                Some(up) => {
                    field = location::field_name(self.ast, *up);
                    parent = up.parent;
                }
                None => return self.scopes.root(),
            }
        }
    }
}

/// Value of a string literal in either AST mode.
fn string_value(ast: &Ast, node: NodeId) -> Option<&str> {
    match ast.kind(node) {
        NodeKind::StringLiteral { value, .. }
        | NodeKind::Literal {
            value: LiteralValue::String(value),
            ..
        } => Some(ast.name(*value)),
        _ => None,
    }
}

/// Whether `node` is a member chain spelling the dotted `pattern`.
///
/// Computed string keys count as names and `this` as `"this"`. With
/// `allow_partial`, a chain that spells a prefix of the pattern matches.
pub fn matches_pattern(ast: &Ast, node: NodeId, pattern: &str, allow_partial: bool) -> bool {
    let mut parts: Vec<&str> = Vec::new();
    let mut current = node;
    loop {
        match ast.kind(current) {
            NodeKind::MemberExpression {
                object,
                property,
                computed,
            } => {
                let name = match ast.kind(*property) {
                    NodeKind::Identifier { name, .. } if !computed => ast.name(*name),
                    NodeKind::StringLiteral { value, .. } if *computed => ast.name(*value),
                    _ => return false,
                };
                parts.push(name);
                current = *object;
            }
            NodeKind::Identifier { name, .. } => {
                parts.push(ast.name(*name));
                break;
            }
            NodeKind::ThisExpression => {
                parts.push("this");
                break;
            }
            _ => return false,
        }
    }
    parts.reverse();

    let expected: Vec<&str> = pattern.split('.').collect();
    if allow_partial {
        parts.len() <= expected.len() && expected.iter().zip(&parts).all(|(a, b)| a == b)
    } else {
        parts == expected
    }
}
