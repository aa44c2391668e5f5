//! Lexical scopes.

use ember_ir::{Name, NodeId};
use rustc_hash::FxHashMap;

use crate::BindingId;

/// Index of a scope in its [`ScopeTree`](crate::ScopeTree).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ScopeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What introduced a scope. Drives where declarations land.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeKind {
    /// Script or module top level.
    Program,
    /// Function, arrow or method. The body block shares this scope.
    Function,
    /// Block statement, `for` head, or `switch`.
    Block,
    /// Catch clause. The clause body shares this scope.
    Catch,
    Class,
}

impl ScopeKind {
    /// `var` declarations hoist to the nearest scope of these kinds.
    #[inline]
    pub const fn is_var_target(self) -> bool {
        matches!(self, ScopeKind::Program | ScopeKind::Function)
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub(crate) id: ScopeId,
    pub(crate) kind: ScopeKind,
    pub(crate) parent: Option<ScopeId>,
    /// The node that introduced this scope.
    pub(crate) node: NodeId,
    pub(crate) children: Vec<ScopeId>,
    pub(crate) bindings: FxHashMap<Name, BindingId>,
}

impl Scope {
    pub(crate) fn new(id: ScopeId, kind: ScopeKind, parent: Option<ScopeId>, node: NodeId) -> Self {
        Scope {
            id,
            kind,
            parent,
            node,
            children: Vec::new(),
            bindings: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> ScopeId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Enclosing scope; `None` for the program scope and detached scopes.
    #[inline]
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    /// Bindings declared directly in this scope.
    pub fn bindings(&self) -> impl Iterator<Item = (Name, BindingId)> + '_ {
        self.bindings.iter().map(|(name, id)| (*name, *id))
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}
