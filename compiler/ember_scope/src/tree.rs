//! The scope tree of one compilation unit.

use ember_ir::{Ast, Name, NodeId, NodeKind};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::collect::Collector;
use crate::{Binding, BindingId, BindingKind, Scope, ScopeError, ScopeId, ScopeKind};

/// Every scope and binding of an analyzed tree, plus the node→scope map.
///
/// Scopes and bindings live in flat vectors addressed by [`ScopeId`] and
/// [`BindingId`]. Removing a subtree detaches its scopes and unregisters
/// its bindings but keeps their slots, so ids handed out earlier stay
/// valid.
#[derive(Clone, Debug)]
pub struct ScopeTree {
    pub(crate) scopes: Vec<Scope>,
    pub(crate) bindings: Vec<Binding>,
    pub(crate) node_scopes: FxHashMap<NodeId, ScopeId>,
    /// Reference site → the binding it resolved to.
    pub(crate) reference_owners: FxHashMap<NodeId, BindingId>,
    /// Violation site → the bindings it writes.
    pub(crate) violation_owners: FxHashMap<NodeId, SmallVec<[BindingId; 2]>>,
    /// Free names and the identifiers that read them.
    pub(crate) globals: FxHashMap<Name, Vec<NodeId>>,
    uids: FxHashSet<Name>,
}

impl ScopeTree {
    pub(crate) fn new() -> Self {
        ScopeTree {
            scopes: Vec::new(),
            bindings: Vec::new(),
            node_scopes: FxHashMap::default(),
            reference_owners: FxHashMap::default(),
            violation_owners: FxHashMap::default(),
            globals: FxHashMap::default(),
            uids: FxHashSet::default(),
        }
    }

    pub(crate) fn push_scope(&mut self, kind: ScopeKind, parent: Option<ScopeId>, node: NodeId) -> ScopeId {
        let id = ScopeId::new(u32::try_from(self.scopes.len()).unwrap_or(u32::MAX));
        self.scopes.push(Scope::new(id, kind, parent, node));
        if let Some(parent) = parent {
            self.scopes[parent.index()].children.push(id);
        }
        trace!(scope = id.index(), ?kind, "enter scope");
        id
    }

    pub(crate) fn push_binding(
        &mut self,
        name: Name,
        scope: ScopeId,
        ident: NodeId,
        path: NodeId,
        kind: BindingKind,
    ) -> BindingId {
        let id = BindingId::new(u32::try_from(self.bindings.len()).unwrap_or(u32::MAX));
        self.bindings.push(Binding::new(name, scope, ident, path, kind));
        self.scopes[scope.index()].bindings.insert(name, id);
        id
    }

    /// The program scope.
    #[inline]
    pub fn root(&self) -> ScopeId {
        ScopeId::new(0)
    }

    #[inline]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    #[inline]
    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.index()]
    }

    #[inline]
    pub fn binding_mut(&mut self, id: BindingId) -> &mut Binding {
        &mut self.bindings[id.index()]
    }

    /// Scope enclosing `node`: its own scope if it introduces one.
    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.node_scopes.get(&node).copied()
    }

    /// Nearest function or program scope at or above `scope`.
    pub fn var_scope(&self, scope: ScopeId) -> ScopeId {
        let mut current = scope;
        loop {
            let s = self.scope(current);
            match s.parent {
                Some(parent) if !s.kind.is_var_target() => current = parent,
                _ => return current,
            }
        }
    }

    /// Resolve `name` from `scope` outwards.
    pub fn get_binding(&self, scope: ScopeId, name: Name) -> Option<BindingId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.scope(id);
            if let Some(binding) = s.bindings.get(&name) {
                return Some(*binding);
            }
            current = s.parent;
        }
        None
    }

    /// Binding declared directly in `scope`.
    pub fn get_own_binding(&self, scope: ScopeId, name: Name) -> Option<BindingId> {
        self.scope(scope).bindings.get(&name).copied()
    }

    pub fn has_binding(&self, scope: ScopeId, name: Name) -> bool {
        self.get_binding(scope, name).is_some()
    }

    /// [`ScopeTree::get_binding`] by source text.
    ///
    /// A name the unit never interned cannot be bound.
    pub fn resolve(&self, ast: &Ast, scope: ScopeId, name: &str) -> Option<BindingId> {
        let name = ast.interner().find(name)?;
        self.get_binding(scope, name)
    }

    /// Names read without a binding, with their read sites.
    pub fn global_references(&self) -> &FxHashMap<Name, Vec<NodeId>> {
        &self.globals
    }

    pub fn has_global(&self, name: Name) -> bool {
        self.globals.contains_key(&name)
    }

    /// Binding a reference site resolved to.
    pub fn binding_of_reference(&self, site: NodeId) -> Option<BindingId> {
        self.reference_owners.get(&site).copied()
    }

    /// Register a subtree attached after analysis.
    ///
    /// `scope` is the scope enclosing `node`'s new position and `parent`
    /// and `grandparent` are its new ancestors. Declarations the subtree
    /// introduces land in `scope` (or its var scope for `var`), nested
    /// scopes are created, and reads and writes are resolved.
    pub fn crawl_subtree(
        &mut self,
        ast: &Ast,
        node: NodeId,
        parent: Option<NodeId>,
        grandparent: Option<NodeId>,
        scope: ScopeId,
    ) -> Result<(), ScopeError> {
        trace!(node = node.index(), scope = scope.index(), "crawl subtree");
        let var_scope = self.var_scope(scope);
        let mut collector = Collector::new(ast, self);
        collector.hoist_vars(&[node], var_scope)?;
        collector.declare_lexical(node, scope)?;
        collector.walk(node, parent, grandparent, scope)
    }

    /// Unregister a subtree that was detached from the tree.
    ///
    /// Reads inside it are removed from their bindings, writes inside it
    /// stop counting as violations, bindings it declared leave their
    /// scopes and scopes it introduced are detached from their parents.
    pub fn remove_subtree(&mut self, ast: &Ast, node: NodeId) {
        let nodes = ast.descendants(node);
        trace!(node = node.index(), count = nodes.len(), "remove subtree");
        let inside: FxHashSet<NodeId> = nodes.iter().copied().collect();

        for id in &nodes {
            if let Some(binding) = self.reference_owners.remove(id) {
                self.bindings[binding.index()].remove_reference(*id);
            }
            if let Some(owners) = self.violation_owners.remove(id) {
                for binding in owners {
                    self.bindings[binding.index()].remove_violation(*id);
                }
            }
            if let NodeKind::Identifier { name, .. } = ast.kind(*id) {
                if let Some(sites) = self.globals.get_mut(name) {
                    sites.retain(|site| site != id);
                    if sites.is_empty() {
                        self.globals.remove(name);
                    }
                }
            }
        }

        for (index, binding) in self.bindings.iter().enumerate() {
            if !inside.contains(&binding.identifier()) {
                continue;
            }
            let id = BindingId::new(u32::try_from(index).unwrap_or(u32::MAX));
            let scope = &mut self.scopes[binding.scope().index()];
            if scope.bindings.get(&binding.name()) == Some(&id) {
                scope.bindings.remove(&binding.name());
            }
        }

        let detached: Vec<ScopeId> = self
            .scopes
            .iter()
            .filter(|s| s.parent.is_some() && inside.contains(&s.node))
            .map(|s| s.id)
            .collect();
        for id in detached {
            if let Some(parent) = self.scopes[id.index()].parent.take() {
                self.scopes[parent.index()].children.retain(|child| *child != id);
            }
        }

        for id in &nodes {
            self.node_scopes.remove(id);
        }
    }

    /// A fresh name no binding, global read or earlier uid uses.
    ///
    /// `base` is reduced to identifier characters without leading
    /// underscores or trailing digits; candidates are `_base`, `_base2`,
    /// `_base3` and so on.
    pub fn generate_uid(&mut self, ast: &mut Ast, base: &str) -> Name {
        let cleaned: String = base
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
            .collect();
        let trimmed = cleaned
            .trim_start_matches('_')
            .trim_end_matches(|c: char| c.is_ascii_digit());
        let stem = if trimmed.is_empty() || trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            "ref"
        } else {
            trimmed
        };

        let mut counter = 1usize;
        loop {
            let candidate = if counter > 1 {
                format!("_{stem}{counter}")
            } else {
                format!("_{stem}")
            };
            counter += 1;
            if let Some(existing) = ast.interner().find(&candidate) {
                if self.is_name_taken(existing) {
                    continue;
                }
            }
            let name = ast.intern(&candidate);
            self.uids.insert(name);
            debug!(uid = %candidate, "generate uid");
            return name;
        }
    }

    fn is_name_taken(&self, name: Name) -> bool {
        self.uids.contains(&name)
            || self.globals.contains_key(&name)
            || self
                .scopes
                .iter()
                .any(|scope| scope.bindings.contains_key(&name))
    }
}
