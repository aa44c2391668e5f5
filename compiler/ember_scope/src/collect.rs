//! The declaration and reference walk.
//!
//! Entering a scope-introducing node creates its [`Scope`](crate::Scope)
//! and registers everything declared there before any child is visited:
//! parameters, hoisted `var`s and the lexical declarations of the scope's
//! own statement list. The walk then resolves every referenced identifier
//! against the scope chain and records writes as constant violations.
//!
//! Registration-before-visit means forward references (`f(); function
//! f() {}`) resolve without a second pass.

use ember_ir::{Ast, LiteralValue, NodeId, NodeKind, VarKind};
use ember_stack::ensure_sufficient_stack;
use smallvec::SmallVec;
use tracing::trace;

use crate::{BindingId, BindingKind, ScopeError, ScopeId, ScopeKind, ScopeTree};

pub(crate) struct Collector<'a> {
    ast: &'a Ast,
    tree: &'a mut ScopeTree,
}

impl<'a> Collector<'a> {
    pub(crate) fn new(ast: &'a Ast, tree: &'a mut ScopeTree) -> Self {
        Collector { ast, tree }
    }

    /// Register the declarations of a scope-introducing node in `scope`.
    pub(crate) fn register_scope(&mut self, node: NodeId, scope: ScopeId) -> Result<(), ScopeError> {
        let ast = self.ast;
        match ast.kind(node) {
            NodeKind::Program { body, .. } => {
                self.hoist_vars(body, scope)?;
                self.declare_lexical_list(body, scope)?;
            }
            NodeKind::FunctionDeclaration(f)
            | NodeKind::FunctionExpression(f)
            | NodeKind::ClassMethod { function: f, .. }
            | NodeKind::ObjectMethod { function: f, .. } => {
                if let (NodeKind::FunctionExpression(_), Some(id)) = (ast.kind(node), f.id) {
                    self.declare(scope, id, node, BindingKind::Local)?;
                }
                self.declare_params(&f.params, node, scope)?;
                if let NodeKind::BlockStatement { body, .. } = ast.kind(f.body) {
                    self.hoist_vars(body, scope)?;
                    self.declare_lexical_list(body, scope)?;
                }
            }
            NodeKind::ArrowFunctionExpression { params, body, .. } => {
                self.declare_params(params, node, scope)?;
                if let NodeKind::BlockStatement { body, .. } = ast.kind(*body) {
                    self.hoist_vars(body, scope)?;
                    self.declare_lexical_list(body, scope)?;
                }
            }
            NodeKind::BlockStatement { body, .. } => self.declare_lexical_list(body, scope)?,
            NodeKind::ForStatement { init: Some(head), .. }
            | NodeKind::ForInStatement { left: head, .. }
            | NodeKind::ForOfStatement { left: head, .. } => self.declare_lexical(*head, scope)?,
            NodeKind::SwitchStatement { cases, .. } => {
                for case in cases {
                    if let NodeKind::SwitchCase { consequent, .. } = ast.kind(*case) {
                        self.declare_lexical_list(consequent, scope)?;
                    }
                }
            }
            NodeKind::CatchClause { param, body } => {
                if let Some(param) = param {
                    for id in binding_identifiers(ast, *param) {
                        self.declare(scope, id, node, BindingKind::Catch)?;
                    }
                }
                if let NodeKind::BlockStatement { body, .. } = ast.kind(*body) {
                    self.declare_lexical_list(body, scope)?;
                }
            }
            NodeKind::ClassExpression(c) => {
                if let Some(id) = c.id {
                    self.declare(scope, id, node, BindingKind::Local)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn declare_params(&mut self, params: &[NodeId], owner: NodeId, scope: ScopeId) -> Result<(), ScopeError> {
        for param in params {
            for id in binding_identifiers(self.ast, *param) {
                self.declare(scope, id, owner, BindingKind::Param)?;
            }
        }
        Ok(())
    }

    /// Register every `var` below `roots` in `target`, stopping at nested
    /// functions and classes.
    pub(crate) fn hoist_vars(&mut self, roots: &[NodeId], target: ScopeId) -> Result<(), ScopeError> {
        let ast = self.ast;
        let mut stack: Vec<NodeId> = roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let kind = ast.kind(id);
            let ty = kind.node_type();
            if ty.is_function() || ty.is_flow_type() || kind.class().is_some() {
                continue;
            }
            if let NodeKind::VariableDeclaration {
                kind: VarKind::Var,
                declarations,
            } = kind
            {
                self.declare_declarators(declarations, BindingKind::Var, target)?;
            }
            stack.extend(kind.children().into_iter().rev());
        }
        Ok(())
    }

    pub(crate) fn declare_lexical_list(&mut self, statements: &[NodeId], scope: ScopeId) -> Result<(), ScopeError> {
        for statement in statements {
            self.declare_lexical(*statement, scope)?;
        }
        Ok(())
    }

    /// Register a statement's own block-scoped declarations in `scope`.
    pub(crate) fn declare_lexical(&mut self, statement: NodeId, scope: ScopeId) -> Result<(), ScopeError> {
        let ast = self.ast;
        match ast.kind(statement) {
            NodeKind::VariableDeclaration { kind, declarations } => {
                let binding_kind = match kind {
                    VarKind::Var => return Ok(()),
                    VarKind::Let => BindingKind::Let,
                    VarKind::Const => BindingKind::Const,
                };
                self.declare_declarators(declarations, binding_kind, scope)?;
            }
            NodeKind::FunctionDeclaration(f) => {
                if let Some(id) = f.id {
                    self.declare(scope, id, statement, BindingKind::Hoisted)?;
                }
            }
            NodeKind::ClassDeclaration(c) => {
                if let Some(id) = c.id {
                    self.declare(scope, id, statement, BindingKind::Class)?;
                }
            }
            NodeKind::ImportDeclaration { specifiers, .. } => {
                for spec in specifiers {
                    if let NodeKind::ImportSpecifier { local, .. }
                    | NodeKind::ImportDefaultSpecifier { local }
                    | NodeKind::ImportNamespaceSpecifier { local } = ast.kind(*spec)
                    {
                        self.declare(scope, *local, *spec, BindingKind::Module)?;
                    }
                }
            }
            NodeKind::ExportNamedDeclaration {
                declaration: Some(declaration),
                ..
            }
            | NodeKind::ExportDefaultDeclaration { declaration } => {
                self.declare_lexical(*declaration, scope)?;
            }
            NodeKind::LabeledStatement { body, .. } => self.declare_lexical(*body, scope)?,
            _ => {}
        }
        Ok(())
    }

    fn declare_declarators(
        &mut self,
        declarations: &[NodeId],
        kind: BindingKind,
        scope: ScopeId,
    ) -> Result<(), ScopeError> {
        let ast = self.ast;
        for declarator in declarations {
            let NodeKind::VariableDeclarator { id, init } = ast.kind(*declarator) else {
                continue;
            };
            for ident in binding_identifiers(ast, *id) {
                let binding = self.declare(scope, ident, *declarator, kind)?;
                let literal = init.filter(|init| ident == *id && is_static_literal(ast.kind(*init)));
                if let (Some(binding), Some(literal)) = (binding, literal) {
                    self.tree.bindings[binding.index()].set_value(literal);
                }
            }
        }
        Ok(())
    }

    /// Register one binding identifier, merging with or rejecting an
    /// existing binding of the same name.
    pub(crate) fn declare(
        &mut self,
        scope: ScopeId,
        ident: NodeId,
        path: NodeId,
        kind: BindingKind,
    ) -> Result<Option<BindingId>, ScopeError> {
        let NodeKind::Identifier { name, .. } = self.ast.kind(ident) else {
            return Ok(None);
        };
        let name = *name;

        if let Some(existing) = self.tree.scopes[scope.index()].bindings.get(&name).copied() {
            let binding = &mut self.tree.bindings[existing.index()];
            if binding.identifier() == ident {
                return Ok(Some(existing));
            }
            if kind.collides_with(binding.kind()) {
                return Err(ScopeError::DuplicateBinding {
                    name: self.ast.name(name).to_string(),
                    span: self.ast.span(ident),
                });
            }
            if binding.kind() != BindingKind::Local {
                trace!(name = self.ast.name(name), kind = %kind, "redeclare");
                binding.redeclare(ident, path, kind);
                return Ok(Some(existing));
            }
        }

        let id = self.tree.push_binding(name, scope, ident, path, kind);
        trace!(name = self.ast.name(name), kind = %kind, scope = scope.index(), "declare");
        Ok(Some(id))
    }

    /// Visit `node` and everything below it.
    pub(crate) fn walk(
        &mut self,
        node: NodeId,
        parent: Option<NodeId>,
        grandparent: Option<NodeId>,
        scope: ScopeId,
    ) -> Result<(), ScopeError> {
        ensure_sufficient_stack(|| self.walk_inner(node, parent, grandparent, scope))
    }

    fn walk_inner(
        &mut self,
        node: NodeId,
        parent: Option<NodeId>,
        grandparent: Option<NodeId>,
        outer: ScopeId,
    ) -> Result<(), ScopeError> {
        let ast = self.ast;
        if ast.get(node).is_none() {
            return Ok(());
        }
        let kind = ast.kind(node);

        if kind.node_type().is_flow_type() {
            for id in ast.descendants(node) {
                self.tree.node_scopes.insert(id, outer);
            }
            return Ok(());
        }

        let scope = match scope_kind(ast, node, parent) {
            Some(scope_kind) => {
                let scope = self.tree.push_scope(scope_kind, Some(outer), node);
                self.register_scope(node, scope)?;
                scope
            }
            None => outer,
        };
        self.tree.node_scopes.insert(node, scope);

        match kind {
            NodeKind::Identifier { .. } => {
                if parent.map_or(true, |p| is_referenced(ast, node, p, grandparent)) {
                    self.reference(node, scope);
                }
            }
            NodeKind::AssignmentExpression { left, .. } => self.violation(node, *left, scope),
            NodeKind::UpdateExpression { argument, .. } => self.violation(node, *argument, scope),
            NodeKind::ForInStatement { left, .. } | NodeKind::ForOfStatement { left, .. }
                if !matches!(ast.kind(*left), NodeKind::VariableDeclaration { .. }) =>
            {
                self.violation(node, *left, scope);
            }
            _ => {}
        }

        let introduces_scope = scope != outer;
        for (field, value) in kind.fields() {
            // Decorators and method keys are evaluated outside the scope
            // their owner introduces.
            let child_scope = if introduces_scope && matches!(field, "decorators" | "key") {
                outer
            } else {
                scope
            };
            for child in value.ids() {
                self.walk(child, Some(node), parent, child_scope)?;
            }
        }
        Ok(())
    }

    fn reference(&mut self, ident: NodeId, scope: ScopeId) {
        let NodeKind::Identifier { name, .. } = self.ast.kind(ident) else {
            return;
        };
        match self.tree.get_binding(scope, *name) {
            Some(binding) => {
                self.tree.bindings[binding.index()].reference(ident);
                self.tree.reference_owners.insert(ident, binding);
            }
            None => {
                let sites = self.tree.globals.entry(*name).or_default();
                if !sites.contains(&ident) {
                    sites.push(ident);
                }
            }
        }
    }

    /// Record `site` as a write to every binding `target` names.
    fn violation(&mut self, site: NodeId, target: NodeId, scope: ScopeId) {
        for ident in binding_identifiers(self.ast, target) {
            let NodeKind::Identifier { name, .. } = self.ast.kind(ident) else {
                continue;
            };
            let Some(binding) = self.tree.get_binding(scope, *name) else {
                continue;
            };
            let entry = &mut self.tree.bindings[binding.index()];
            entry.reassign(site);
            entry.deopt_value();
            let owners = self.tree.violation_owners.entry(site).or_default();
            if !owners.contains(&binding) {
                owners.push(binding);
            }
        }
    }
}

/// Scope introduced by `node`, if any.
///
/// Function bodies and catch bodies share the scope of their owner.
fn scope_kind(ast: &Ast, node: NodeId, parent: Option<NodeId>) -> Option<ScopeKind> {
    match ast.kind(node) {
        NodeKind::Program { .. } => Some(ScopeKind::Program),
        NodeKind::FunctionDeclaration(_)
        | NodeKind::FunctionExpression(_)
        | NodeKind::ArrowFunctionExpression { .. }
        | NodeKind::ClassMethod { .. }
        | NodeKind::ObjectMethod { .. } => Some(ScopeKind::Function),
        NodeKind::BlockStatement { .. } => {
            let shares_owner = parent.is_some_and(|p| {
                let ty = ast.node_type(p);
                ty.is_function() || matches!(ast.kind(p), NodeKind::CatchClause { .. })
            });
            (!shares_owner).then_some(ScopeKind::Block)
        }
        NodeKind::ForStatement { .. }
        | NodeKind::ForInStatement { .. }
        | NodeKind::ForOfStatement { .. }
        | NodeKind::SwitchStatement { .. } => Some(ScopeKind::Block),
        NodeKind::CatchClause { .. } => Some(ScopeKind::Catch),
        NodeKind::ClassDeclaration(_) | NodeKind::ClassExpression(_) => Some(ScopeKind::Class),
        _ => None,
    }
}

/// Identifier nodes bound by a declaration or assignment target, in source
/// order. Member expressions inside a target bind nothing.
pub fn binding_identifiers(ast: &Ast, target: NodeId) -> SmallVec<[NodeId; 4]> {
    let mut out = SmallVec::new();
    let mut stack = vec![target];
    while let Some(id) = stack.pop() {
        match ast.kind(id) {
            NodeKind::Identifier { .. } => out.push(id),
            NodeKind::ObjectPattern { properties, .. } => stack.extend(properties.iter().rev()),
            NodeKind::ArrayPattern { elements, .. } => stack.extend(elements.iter().rev()),
            NodeKind::ObjectProperty { value, .. } => stack.push(*value),
            NodeKind::RestElement { argument, .. } => stack.push(*argument),
            NodeKind::AssignmentPattern { left, .. } => stack.push(*left),
            _ => {}
        }
    }
    out
}

/// Whether the identifier `node` is read at its position under `parent`.
///
/// Declarations, assignment targets, property keys, labels and import or
/// export names are not reads. `grandparent` separates an object pattern
/// property (a binding) from an object literal property (a read), and a
/// local export (a read) from a re-export.
pub fn is_referenced(ast: &Ast, node: NodeId, parent: NodeId, grandparent: Option<NodeId>) -> bool {
    match ast.kind(parent) {
        NodeKind::MemberExpression {
            property, computed, ..
        } => node != *property || *computed,
        NodeKind::ObjectProperty { key, computed, .. } => {
            if node == *key {
                *computed
            } else {
                !grandparent.is_some_and(|g| matches!(ast.kind(g), NodeKind::ObjectPattern { .. }))
            }
        }
        NodeKind::ClassProperty { key, computed, .. } => node != *key || *computed,
        NodeKind::ClassMethod { key, computed, .. } | NodeKind::ObjectMethod { key, computed, .. } => {
            node == *key && *computed
        }
        NodeKind::ArrowFunctionExpression { body, .. } => node == *body,
        NodeKind::VariableDeclarator { init, .. } => Some(node) == *init,
        NodeKind::ClassDeclaration(c) | NodeKind::ClassExpression(c) => Some(node) == c.super_class,
        NodeKind::ExportSpecifier { local, .. } => {
            node == *local
                && grandparent.is_some_and(|g| {
                    matches!(ast.kind(g), NodeKind::ExportNamedDeclaration { source: None, .. })
                })
        }
        NodeKind::AssignmentPattern { right, .. } | NodeKind::AssignmentExpression { right, .. } => {
            node == *right
        }
        NodeKind::ForInStatement { left, .. } | NodeKind::ForOfStatement { left, .. } => node != *left,
        NodeKind::FunctionDeclaration(_)
        | NodeKind::FunctionExpression(_)
        | NodeKind::MetaProperty { .. }
        | NodeKind::ImportSpecifier { .. }
        | NodeKind::ImportDefaultSpecifier { .. }
        | NodeKind::ImportNamespaceSpecifier { .. }
        | NodeKind::ExportNamespaceSpecifier { .. }
        | NodeKind::LabeledStatement { .. }
        | NodeKind::BreakStatement { .. }
        | NodeKind::ContinueStatement { .. }
        | NodeKind::CatchClause { .. }
        | NodeKind::RestElement { .. }
        | NodeKind::ObjectPattern { .. }
        | NodeKind::ArrayPattern { .. }
        | NodeKind::TypeAlias { .. } => false,
        kind => !kind.node_type().is_flow_type(),
    }
}

/// Initializers whose value can be cached on a binding.
pub(crate) fn is_static_literal(kind: &NodeKind) -> bool {
    match kind {
        NodeKind::StringLiteral { .. }
        | NodeKind::NumericLiteral { .. }
        | NodeKind::BigIntLiteral { .. }
        | NodeKind::BooleanLiteral { .. }
        | NodeKind::NullLiteral => true,
        NodeKind::Literal { value, .. } => !matches!(value, LiteralValue::RegExp { .. }),
        _ => false,
    }
}
