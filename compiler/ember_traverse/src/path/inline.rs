//! Statements in expression position.
//!
//! Statements that only compute values fold into a sequence or
//! conditional expression. Anything else runs inside an immediately
//! invoked arrow whose completion records become `return`s. `var`
//! declarations in it move to the enclosing function first, so their
//! bindings stay visible around the call.

use ember_ir::{Ast, AssignOp, Name, NodeId, NodeKind, NodeType, Span, UnaryOp, VarKind};
use ember_scope::binding_identifiers;
use tracing::trace;

use super::completion::completion_records;
use super::NodePath;
use crate::location::{self, Location};
use crate::PathError;

fn is_statement_only(ast: &Ast, node: NodeId) -> bool {
    let ty = ast.node_type(node);
    ty.is_statement() && !ty.is_expression()
}

impl NodePath<'_> {
    /// Replace this node with `nodes`, picking the operation its position
    /// allows. A list entry takes them all in its place, a single node is
    /// a plain replacement and an expression takes the value they
    /// complete with. No nodes removes this one.
    pub fn replace_inline(&mut self, nodes: Vec<NodeId>) -> Result<(), PathError> {
        if nodes.is_empty() {
            return self.remove();
        }
        let is_expression = self.node_type().is_expression();
        let has_statements = nodes.iter().any(|&node| is_statement_only(self.ast, node));
        if let &[single] = nodes.as_slice() {
            if !(is_expression && has_statements) {
                return self.replace_with(single);
            }
        }
        if self.is_in_list() && !(is_expression && has_statements) {
            return self.replace_with_multiple(nodes);
        }
        if is_expression {
            return self.replace_expression_with_statements(nodes);
        }
        Err(PathError::NotInList {
            node_type: self.node_type(),
        })
    }

    /// Replace this expression with the value `nodes` complete with.
    ///
    /// `a; b;` becomes `(a, b)` and `if (t) a; else b;` becomes
    /// `t ? a : b`. Other statements are wrapped in `(() => { ... })()`.
    pub fn replace_expression_with_statements(&mut self, nodes: Vec<NodeId>) -> Result<(), PathError> {
        let node_type = self.node_type();
        if !node_type.is_expression() {
            return Err(PathError::NotAnExpression { node_type });
        }
        self.attached_location("replaced")?;
        self.check_detached(&nodes, None)?;

        if let Some(expression) = self.to_sequence(&nodes) {
            trace!(count = nodes.len(), "replace expression with sequence");
            return self.replace_with(expression);
        }

        let statements = self.to_statements(&nodes).into_vec();
        let hoisted = self.hoist_vars(&statements)?;
        let block = self.ast.alloc(
            NodeKind::BlockStatement {
                directives: Vec::new(),
                body: statements,
            },
            Span::DUMMY,
        );
        self.add_returns(block, &hoisted);
        let arrow = self.ast.alloc(
            NodeKind::ArrowFunctionExpression {
                is_async: false,
                params: Vec::new(),
                return_type: None,
                body: block,
                expression: false,
            },
            Span::DUMMY,
        );
        let call = self.ast.call_expression(arrow, Vec::new());
        trace!(count = nodes.len(), "replace expression with arrow call");
        self.replace_with(call)
    }

    /// Fold `nodes` into one expression if they only compute values.
    fn to_sequence(&mut self, nodes: &[NodeId]) -> Option<NodeId> {
        let mut expressions = Vec::new();
        if !self.gather_expressions(nodes, &mut expressions) {
            return None;
        }
        Some(match expressions.len() {
            0 => self.void_zero(),
            1 => expressions[0],
            _ => self
                .ast
                .alloc(NodeKind::SequenceExpression { expressions }, Span::DUMMY),
        })
    }

    fn gather_expressions(&mut self, nodes: &[NodeId], out: &mut Vec<NodeId>) -> bool {
        for &node in nodes {
            match self.ast.kind(node) {
                NodeKind::EmptyStatement => {}
                NodeKind::ExpressionStatement { expression, .. } => out.push(*expression),
                NodeKind::BlockStatement { directives, body } if directives.is_empty() => {
                    let body = body.clone();
                    if !self.gather_expressions(&body, out) {
                        return false;
                    }
                }
                NodeKind::IfStatement {
                    test,
                    consequent,
                    alternate,
                } => {
                    let (test, consequent, alternate) = (*test, *consequent, *alternate);
                    let Some(consequent) = self.to_sequence(&[consequent]) else {
                        return false;
                    };
                    let alternate = match alternate {
                        Some(alternate) => match self.to_sequence(&[alternate]) {
                            Some(alternate) => alternate,
                            None => return false,
                        },
                        None => self.void_zero(),
                    };
                    out.push(self.ast.alloc(
                        NodeKind::ConditionalExpression {
                            test,
                            consequent,
                            alternate,
                        },
                        Span::DUMMY,
                    ));
                }
                kind if kind.node_type().is_expression() => out.push(node),
                _ => return false,
            }
        }
        true
    }

    fn void_zero(&mut self) -> NodeId {
        let zero = self.ast.numeric_literal(0.0);
        self.ast.alloc(
            NodeKind::UnaryExpression {
                operator: UnaryOp::Void,
                argument: zero,
            },
            Span::DUMMY,
        )
    }

    fn identifier_named(&mut self, name: Name) -> NodeId {
        self.ast.alloc(
            NodeKind::Identifier {
                name,
                type_annotation: None,
            },
            Span::DUMMY,
        )
    }

    /// `var a, b;` with no initializers.
    fn var_declaration(&mut self, names: &[Name]) -> NodeId {
        let declarations = names
            .iter()
            .map(|&name| {
                let id = self.identifier_named(name);
                self.ast
                    .alloc(NodeKind::VariableDeclarator { id, init: None }, Span::DUMMY)
            })
            .collect();
        self.ast.alloc(
            NodeKind::VariableDeclaration {
                kind: VarKind::Var,
                declarations,
            },
            Span::DUMMY,
        )
    }

    /// Rewrite `var` declarations in the detached `statements` as
    /// assignments and declare their names in the enclosing function.
    /// Returns the statements that held a declaration.
    fn hoist_vars(&mut self, statements: &[NodeId]) -> Result<Vec<NodeId>, PathError> {
        let mut names: Vec<Name> = Vec::new();
        let mut rewritten = Vec::new();
        let mut stack: Vec<(NodeId, Option<NodeId>)> = statements.iter().rev().map(|&node| (node, None)).collect();
        while let Some((node, parent)) = stack.pop() {
            let kind = self.ast.kind(node);
            if kind.node_type().is_function() || kind.class().is_some() {
                continue;
            }
            if let NodeKind::VariableDeclaration {
                kind: VarKind::Var,
                declarations,
            } = kind
            {
                let declarations = declarations.clone();
                let inits = self.rewrite_var(node, parent, &declarations, &mut names);
                stack.extend(inits.into_iter().rev().map(|init| (init, None)));
                rewritten.push(node);
                continue;
            }
            stack.extend(kind.children().into_iter().rev().map(|child| (child, Some(node))));
        }
        if names.is_empty() {
            return Ok(rewritten);
        }

        let container = self.var_container()?;
        let declaration = self.var_declaration(&names);
        location::insert(self.ast, container, 0, &[declaration]);
        self.attach(declaration, container)?;
        trace!(count = names.len(), "hoist vars");
        Ok(rewritten)
    }

    /// Replace one `var` declaration with its assignments. Returns the
    /// initializers, which now sit inside those assignments.
    fn rewrite_var(
        &mut self,
        node: NodeId,
        parent: Option<NodeId>,
        declarations: &[NodeId],
        names: &mut Vec<Name>,
    ) -> Vec<NodeId> {
        let mut targets = Vec::new();
        let mut inits = Vec::new();
        let mut assignments = Vec::new();
        for &declarator in declarations {
            let NodeKind::VariableDeclarator { id, init } = self.ast.kind(declarator) else {
                continue;
            };
            let (id, init) = (*id, *init);
            for ident in binding_identifiers(self.ast, id) {
                if let NodeKind::Identifier { name, .. } = self.ast.kind(ident) {
                    if !names.contains(name) {
                        names.push(*name);
                    }
                }
            }
            targets.push(id);
            if let Some(init) = init {
                inits.push(init);
                assignments.push(self.ast.alloc(
                    NodeKind::AssignmentExpression {
                        operator: AssignOp::Assign,
                        left: id,
                        right: init,
                    },
                    Span::DUMMY,
                ));
            }
        }
        let expression = match assignments.len() {
            0 => None,
            1 => Some(assignments[0]),
            _ => Some(self.ast.alloc(
                NodeKind::SequenceExpression {
                    expressions: assignments,
                },
                Span::DUMMY,
            )),
        };

        let parent_kind = parent.map(|parent| self.ast.kind(parent));
        let for_init = matches!(
            parent_kind,
            Some(NodeKind::ForStatement { init: Some(init), .. }) if *init == node
        );
        let for_left = matches!(
            parent_kind,
            Some(NodeKind::ForInStatement { left, .. } | NodeKind::ForOfStatement { left, .. }) if *left == node
        );
        match parent.and_then(|parent| self.ast.kind_mut(parent)) {
            Some(NodeKind::ForStatement { init, .. }) if for_init => *init = expression,
            Some(NodeKind::ForInStatement { left, .. } | NodeKind::ForOfStatement { left, .. }) if for_left => {
                if let Some(target) = targets.first() {
                    *left = *target;
                }
            }
            _ => {
                let statement = match expression {
                    Some(expression) => NodeKind::ExpressionStatement {
                        expression,
                        directive: None,
                    },
                    None => NodeKind::EmptyStatement,
                };
                self.ast.replace_kind(node, statement);
            }
        }
        inits
    }

    /// The statement list of the nearest function or program around
    /// this node.
    fn var_container(&self) -> Result<Location, PathError> {
        let owner = self
            .find_parent(|ast, id| {
                let ty = ast.node_type(id);
                ty.is_function() || ty == NodeType::Program
            })
            .unwrap_or(self.root);
        let list_owner = match self.ast.kind(owner) {
            NodeKind::ArrowFunctionExpression {
                body,
                expression: false,
                ..
            } => *body,
            kind => kind.function().map_or(owner, |function| function.body),
        };
        let kind = self.ast.kind(list_owner);
        kind.field_index("body")
            .map(|field| Location {
                parent: list_owner,
                field,
            })
            .filter(|&loc| location::is_list(self.ast, loc))
            .ok_or_else(|| PathError::NoSuchList {
                node_type: kind.node_type(),
                field: "body".to_owned(),
            })
    }

    /// Turn the completion records of `block` into `return`s. Records in
    /// a loop assign a shared `_ret` instead, returned after the block.
    fn add_returns(&mut self, block: NodeId, skip: &[NodeId]) {
        let mut result: Option<Name> = None;
        for record in completion_records(self.ast, block) {
            if skip.contains(&record.node) {
                continue;
            }
            let NodeKind::ExpressionStatement { expression, .. } = self.ast.kind(record.node) else {
                continue;
            };
            let expression = *expression;
            let replacement = if record.in_loop {
                let name = match result {
                    Some(name) => name,
                    None => {
                        let name = self.generate_uid("ret");
                        result = Some(name);
                        name
                    }
                };
                let left = self.identifier_named(name);
                let assignment = self.ast.alloc(
                    NodeKind::AssignmentExpression {
                        operator: AssignOp::Assign,
                        left,
                        right: expression,
                    },
                    Span::DUMMY,
                );
                NodeKind::ExpressionStatement {
                    expression: assignment,
                    directive: None,
                }
            } else {
                NodeKind::ReturnStatement {
                    argument: Some(expression),
                }
            };
            self.ast.replace_kind(record.node, replacement);
        }

        let Some(name) = result else {
            return;
        };
        let declaration = self.var_declaration(&[name]);
        let argument = self.identifier_named(name);
        let ret = self.ast.alloc(
            NodeKind::ReturnStatement {
                argument: Some(argument),
            },
            Span::DUMMY,
        );
        if let Some(NodeKind::BlockStatement { body, .. }) = self.ast.kind_mut(block) {
            body.insert(0, declaration);
            body.push(ret);
        }
    }
}
