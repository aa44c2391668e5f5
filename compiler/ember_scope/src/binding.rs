//! Variable bindings.
//!
//! A [`Binding`] records one declared name: where it was declared, every
//! read of it and every write to it after the declaration. Sites are node
//! ids into the owning [`Ast`](ember_ir::Ast). The `constant` flag is kept
//! in lockstep with the violation list: a binding is constant exactly when
//! nothing reassigns it.

use std::fmt;

use ember_ir::{Name, NodeId};

use crate::ScopeId;

/// Index of a binding in its [`ScopeTree`](crate::ScopeTree).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct BindingId(u32);

impl BindingId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        BindingId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a name was introduced.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BindingKind {
    /// Function or arrow parameter.
    Param,
    Var,
    Let,
    Const,
    /// Function declaration.
    Hoisted,
    /// Class declaration.
    Class,
    /// Catch clause parameter.
    Catch,
    /// Import specifier.
    Module,
    /// Name of a function or class expression, visible only inside it.
    Local,
}

impl BindingKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            BindingKind::Param => "param",
            BindingKind::Var => "var",
            BindingKind::Let => "let",
            BindingKind::Const => "const",
            BindingKind::Hoisted => "hoisted",
            BindingKind::Class => "class",
            BindingKind::Catch => "catch",
            BindingKind::Module => "module",
            BindingKind::Local => "local",
        }
    }

    /// Block-scoped kinds that reject any redeclaration.
    pub const fn is_lexical(self) -> bool {
        matches!(
            self,
            BindingKind::Let | BindingKind::Const | BindingKind::Class | BindingKind::Module
        )
    }

    /// Whether declaring `self` over an existing `existing` binding of the
    /// same name in the same scope is an error.
    pub const fn collides_with(self, existing: BindingKind) -> bool {
        match (self, existing) {
            (BindingKind::Param, _) | (_, BindingKind::Local) => false,
            (BindingKind::Hoisted, BindingKind::Let) => false,
            (BindingKind::Let | BindingKind::Const, BindingKind::Param) => true,
            _ => self.is_lexical() || existing.is_lexical(),
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    name: Name,
    scope: ScopeId,
    /// The binding identifier itself.
    identifier: NodeId,
    /// The construct that declared it: declarator, function, class,
    /// import specifier, catch clause or the function owning a param.
    path: NodeId,
    kind: BindingKind,

    reference_sites: Vec<NodeId>,
    references: u32,
    referenced: bool,

    constant_violations: Vec<NodeId>,
    constant: bool,

    value: Option<NodeId>,
    has_deopted_value: bool,
}

impl Binding {
    pub(crate) fn new(
        name: Name,
        scope: ScopeId,
        identifier: NodeId,
        path: NodeId,
        kind: BindingKind,
    ) -> Self {
        Binding {
            name,
            scope,
            identifier,
            path,
            kind,
            reference_sites: Vec::new(),
            references: 0,
            referenced: false,
            constant_violations: Vec::new(),
            constant: true,
            value: None,
            has_deopted_value: false,
        }
    }

    /// Fold a redeclaration into this binding.
    ///
    /// The previous declaration becomes the first violation, ahead of the
    /// violations already recorded; references are kept.
    pub(crate) fn redeclare(&mut self, identifier: NodeId, path: NodeId, kind: BindingKind) {
        let previous = self.path;
        self.constant_violations.retain(|site| *site != previous);
        self.constant_violations.insert(0, previous);
        self.identifier = identifier;
        self.path = path;
        self.kind = kind;
        self.constant = false;
        self.deopt_value();
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    #[inline]
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    #[inline]
    pub fn identifier(&self) -> NodeId {
        self.identifier
    }

    #[inline]
    pub fn path(&self) -> NodeId {
        self.path
    }

    #[inline]
    pub fn kind(&self) -> BindingKind {
        self.kind
    }

    /// Reads of this binding, in the order they were registered.
    pub fn reference_sites(&self) -> &[NodeId] {
        &self.reference_sites
    }

    /// Live reference count. Can drop below `reference_sites().len()` after
    /// [`Binding::dereference`].
    pub fn references(&self) -> u32 {
        self.references
    }

    pub fn is_referenced(&self) -> bool {
        self.referenced
    }

    /// Writes after the declaration: assignments, updates, loop heads and
    /// folded redeclarations.
    pub fn constant_violations(&self) -> &[NodeId] {
        &self.constant_violations
    }

    pub fn is_constant(&self) -> bool {
        self.constant
    }

    /// Cached literal value, if one is known and has not been deopted.
    pub fn value(&self) -> Option<NodeId> {
        self.value
    }

    pub fn has_deopted_value(&self) -> bool {
        self.has_deopted_value
    }

    /// Record a read. A site already on the list is ignored.
    pub fn reference(&mut self, site: NodeId) {
        if self.reference_sites.contains(&site) {
            return;
        }
        self.reference_sites.push(site);
        self.referenced = true;
        self.references += 1;
    }

    /// Decrement the live count without forgetting the site.
    pub fn dereference(&mut self) {
        self.references = self.references.saturating_sub(1);
        self.referenced = self.references != 0;
    }

    /// Forget a read site entirely. Returns whether it was present.
    pub fn remove_reference(&mut self, site: NodeId) -> bool {
        let Some(pos) = self.reference_sites.iter().position(|s| *s == site) else {
            return false;
        };
        self.reference_sites.remove(pos);
        self.dereference();
        true
    }

    /// Record a write. The binding stops being constant.
    pub fn reassign(&mut self, site: NodeId) {
        self.constant = false;
        if !self.constant_violations.contains(&site) {
            self.constant_violations.push(site);
        }
    }

    /// Forget a write site. Returns whether it was present.
    pub(crate) fn remove_violation(&mut self, site: NodeId) -> bool {
        let before = self.constant_violations.len();
        self.constant_violations.retain(|s| *s != site);
        self.constant = self.constant_violations.is_empty();
        self.constant_violations.len() != before
    }

    /// Cache a literal value. Ignored once the value has been deopted.
    pub fn set_value(&mut self, literal: NodeId) {
        if self.has_deopted_value {
            return;
        }
        self.value = Some(literal);
    }

    pub fn deopt_value(&mut self) {
        self.has_deopted_value = true;
        self.value = None;
    }

    /// Drop the cached value and the deopt mark.
    pub fn clear_value(&mut self) {
        self.has_deopted_value = false;
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding() -> Binding {
        Binding::new(
            Name::EMPTY,
            ScopeId::new(0),
            NodeId::new(1),
            NodeId::new(2),
            BindingKind::Let,
        )
    }

    #[test]
    fn test_reference_is_unique_per_site() {
        let mut b = binding();
        b.reference(NodeId::new(5));
        b.reference(NodeId::new(5));
        b.reference(NodeId::new(6));
        assert_eq!(b.references(), 2);
        assert_eq!(b.reference_sites(), &[NodeId::new(5), NodeId::new(6)]);
        assert!(b.is_referenced());
    }

    #[test]
    fn test_dereference_keeps_sites() {
        let mut b = binding();
        b.reference(NodeId::new(5));
        b.dereference();
        assert_eq!(b.references(), 0);
        assert!(!b.is_referenced());
        assert_eq!(b.reference_sites().len(), 1);
        b.dereference();
        assert_eq!(b.references(), 0);
    }

    #[test]
    fn test_remove_reference() {
        let mut b = binding();
        b.reference(NodeId::new(5));
        b.reference(NodeId::new(6));
        assert!(b.remove_reference(NodeId::new(5)));
        assert!(!b.remove_reference(NodeId::new(5)));
        assert_eq!(b.references(), 1);
        assert_eq!(b.reference_sites(), &[NodeId::new(6)]);
    }

    #[test]
    fn test_reassign_tracks_constant() {
        let mut b = binding();
        assert!(b.is_constant());
        b.reassign(NodeId::new(9));
        b.reassign(NodeId::new(9));
        assert!(!b.is_constant());
        assert_eq!(b.constant_violations(), &[NodeId::new(9)]);
        assert!(b.remove_violation(NodeId::new(9)));
        assert!(b.is_constant());
    }

    #[test]
    fn test_value_after_deopt_is_ignored() {
        let mut b = binding();
        b.set_value(NodeId::new(3));
        assert_eq!(b.value(), Some(NodeId::new(3)));
        b.deopt_value();
        b.set_value(NodeId::new(4));
        assert_eq!(b.value(), None);
        b.clear_value();
        assert!(!b.has_deopted_value());
        b.set_value(NodeId::new(4));
        assert_eq!(b.value(), Some(NodeId::new(4)));
    }

    #[test]
    fn test_redeclare_seeds_violations() {
        let mut b = binding();
        b.reference(NodeId::new(7));
        b.reassign(NodeId::new(8));
        b.redeclare(NodeId::new(10), NodeId::new(11), BindingKind::Var);
        assert_eq!(
            b.constant_violations(),
            &[NodeId::new(2), NodeId::new(8)]
        );
        assert_eq!(b.references(), 1);
        assert_eq!(b.path(), NodeId::new(11));
        assert_eq!(b.kind(), BindingKind::Var);
    }

    #[test]
    fn test_collision_table() {
        use BindingKind::{Class, Const, Hoisted, Let, Local, Module, Param, Var};
        assert!(Let.collides_with(Var));
        assert!(Var.collides_with(Let));
        assert!(Var.collides_with(Const));
        assert!(Var.collides_with(Module));
        assert!(Class.collides_with(Hoisted));
        assert!(Let.collides_with(Param));
        assert!(Const.collides_with(Param));
        assert!(!Var.collides_with(Param));
        assert!(!Param.collides_with(Let));
        assert!(!Hoisted.collides_with(Let));
        assert!(!Var.collides_with(Var));
        assert!(!Hoisted.collides_with(Var));
        assert!(!Let.collides_with(Local));
    }
}
