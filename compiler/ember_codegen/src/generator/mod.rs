//! Tree printer.
//!
//! [`Generator::emit_node`] is the single dispatch over [`NodeKind`]; the
//! submodules print each family of nodes:
//!
//! - [`statements`]: statements, blocks and declarations
//! - [`expressions`]: expressions, literals and patterns
//! - [`functions`]: functions, methods and classes
//! - [`modules`]: `import` and `export`
//! - [`flow`]: Flow type annotations
//!
//! Expressions go through [`Generator::emit_expression`] with the minimum
//! [`Level`] their position requires; it adds parentheses when the child
//! binds looser than that.

mod expressions;
mod flow;
mod functions;
mod modules;
mod statements;

use ember_ir::{Ast, BinaryOp, NodeId, NodeKind};
use ember_stack::ensure_sufficient_stack;

use crate::precedence::{self, Level};
use crate::printer::Printer;
use crate::{CodegenError, CodegenResult, GeneratorOptions};

pub(crate) struct Generator<'a> {
    ast: &'a Ast,
    options: &'a GeneratorOptions,
    printer: Printer,
    /// Inside a `for` initializer, where a bare `in` would end the init.
    no_in: bool,
}

impl<'a> Generator<'a> {
    pub(crate) fn new(ast: &'a Ast, options: &'a GeneratorOptions) -> Self {
        Generator {
            ast,
            options,
            printer: Printer::new(options.compact, ast.len() * 4),
            no_in: false,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.printer.finish()
    }

    /// Print a whole program, a statement or a lone expression.
    pub(crate) fn emit_root(&mut self, root: NodeId) -> CodegenResult {
        if self.ast.get(root).is_none() {
            return Err(CodegenError::MalformedNode {
                node_type: ember_ir::NodeType::Program,
                reason: "root id does not exist",
                span: ember_ir::Span::DUMMY,
            });
        }
        if self.ast.node_type(root).is_expression() {
            self.emit_expression(root, precedence::SEQUENCE)
        } else {
            self.emit_node(root)
        }
    }

    pub(super) fn malformed(&self, id: NodeId, reason: &'static str) -> CodegenError {
        CodegenError::MalformedNode {
            node_type: self.ast.node_type(id),
            reason,
            span: self.ast.span(id),
        }
    }

    #[inline]
    pub(super) fn text(&self, name: ember_ir::Name) -> &'a str {
        self.ast.name(name)
    }

    /// Print `id` as an expression needing at least `min`.
    pub(super) fn emit_expression(&mut self, id: NodeId, min: Level) -> CodegenResult {
        let kind = self.ast.kind(id);
        let needs_parens = precedence::level(kind) < min
            || (self.no_in
                && matches!(
                    kind,
                    NodeKind::BinaryExpression {
                        operator: BinaryOp::In,
                        ..
                    }
                ));
        if needs_parens {
            self.emit_parenthesized(id)
        } else {
            self.emit_node(id)
        }
    }

    pub(super) fn emit_parenthesized(&mut self, id: NodeId) -> CodegenResult {
        let no_in = std::mem::replace(&mut self.no_in, false);
        self.printer.token("(");
        self.emit_node(id)?;
        self.printer.token(")");
        self.no_in = no_in;
        Ok(())
    }

    /// Expressions joined by `, `, each at assignment level.
    pub(super) fn emit_comma_list(&mut self, items: &[NodeId]) -> CodegenResult {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.printer.token(",");
                self.printer.space();
            }
            self.emit_expression(item, precedence::ASSIGN)?;
        }
        Ok(())
    }

    /// `{` items `}` with one item per line; `{}` when empty.
    pub(super) fn emit_braced_lines(
        &mut self,
        items: impl IntoIterator<Item = NodeId>,
        separator: &str,
    ) -> CodegenResult {
        self.printer.token("{");
        let mut any = false;
        self.printer.indent();
        for item in items {
            if any {
                self.printer.token(separator);
            }
            any = true;
            self.printer.newline();
            self.emit_node(item)?;
        }
        self.printer.dedent();
        if any {
            self.printer.newline();
        }
        self.printer.token("}");
        Ok(())
    }

    /// Print a node as written, without outer parentheses.
    pub(super) fn emit_node(&mut self, id: NodeId) -> CodegenResult {
        ensure_sufficient_stack(|| self.emit_node_inner(id))
    }

    fn emit_node_inner(&mut self, id: NodeId) -> CodegenResult {
        let ast = self.ast;
        let Some(node) = ast.get(id) else {
            return Err(self.malformed(id, "node id does not exist"));
        };
        if node.kind.children().into_iter().any(|child| ast.get(child).is_none()) {
            return Err(self.malformed(id, "child id does not exist"));
        }

        match &node.kind {
            NodeKind::Program {
                interpreter,
                directives,
                body,
                ..
            } => self.emit_program(*interpreter, directives, body),
            NodeKind::Directive { value, raw } => self.emit_directive(*value, *raw),

            NodeKind::ExpressionStatement { expression, directive } => {
                self.emit_expression_statement(*expression, directive.is_some())
            }
            NodeKind::BlockStatement { directives, body } => self.emit_block(directives, body),
            NodeKind::EmptyStatement => {
                self.printer.token(";");
                Ok(())
            }
            NodeKind::DebuggerStatement => {
                self.printer.word("debugger");
                self.printer.token(";");
                Ok(())
            }
            NodeKind::WithStatement { object, body } => self.emit_with(*object, *body),
            NodeKind::ReturnStatement { argument } => self.emit_keyword_argument("return", *argument),
            NodeKind::ThrowStatement { argument } => self.emit_keyword_argument("throw", Some(*argument)),
            NodeKind::LabeledStatement { label, body } => self.emit_labeled(*label, *body),
            NodeKind::BreakStatement { label } => self.emit_jump("break", *label),
            NodeKind::ContinueStatement { label } => self.emit_jump("continue", *label),
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => self.emit_if(*test, *consequent, *alternate),
            NodeKind::SwitchStatement { discriminant, cases } => self.emit_switch(*discriminant, cases),
            NodeKind::SwitchCase { test, consequent } => self.emit_switch_case(*test, consequent),
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            } => self.emit_try(*block, *handler, *finalizer),
            NodeKind::CatchClause { param, body } => self.emit_catch(*param, *body),
            NodeKind::WhileStatement { test, body } => self.emit_while(*test, *body),
            NodeKind::DoWhileStatement { body, test } => self.emit_do_while(*body, *test),
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => self.emit_for(*init, *test, *update, *body),
            NodeKind::ForInStatement { left, right, body } => {
                self.emit_for_in_of(false, *left, "in", *right, *body)
            }
            NodeKind::ForOfStatement {
                is_await,
                left,
                right,
                body,
            } => self.emit_for_in_of(*is_await, *left, "of", *right, *body),

            NodeKind::FunctionDeclaration(function) => self.emit_function(id, function, false),
            NodeKind::VariableDeclaration { kind, declarations } => {
                self.emit_variable_declaration(id, *kind, declarations, true)
            }
            NodeKind::VariableDeclarator { id: target, init } => self.emit_declarator(*target, *init),
            NodeKind::ClassDeclaration(class) => self.emit_class(id, class, false),
            NodeKind::TypeAlias { id: name, right } => self.emit_type_alias(*name, *right),

            NodeKind::ImportDeclaration { specifiers, source } => self.emit_import(specifiers, *source),
            NodeKind::ImportSpecifier { imported, local } => self.emit_aliased(*imported, *local),
            NodeKind::ImportDefaultSpecifier { local } => self.emit_node(*local),
            NodeKind::ImportNamespaceSpecifier { local } | NodeKind::ExportNamespaceSpecifier { exported: local } => {
                self.emit_namespace(*local)
            }
            NodeKind::ExportNamedDeclaration {
                declaration,
                specifiers,
                source,
            } => self.emit_export_named(*declaration, specifiers, *source),
            NodeKind::ExportSpecifier { local, exported } => self.emit_aliased(*local, *exported),
            NodeKind::ExportDefaultDeclaration { declaration } => self.emit_export_default(*declaration),
            NodeKind::ExportAllDeclaration { source } => self.emit_export_all(*source),

            NodeKind::ClassBody { body } => self.emit_braced_lines(body.iter().copied(), ""),
            NodeKind::ClassMethod {
                decorators,
                is_static,
                kind,
                computed,
                key,
                function,
            } => self.emit_method(decorators, *is_static, *kind, *computed, *key, function),
            NodeKind::ClassProperty {
                decorators,
                is_static,
                computed,
                key,
                type_annotation,
                value,
            } => self.emit_class_property(decorators, *is_static, *computed, *key, *type_annotation, *value),
            NodeKind::Decorator { expression } => {
                self.printer.token("@");
                self.emit_expression(*expression, precedence::LEFT_HAND_SIDE)
            }

            NodeKind::Identifier { name, type_annotation } => {
                self.emit_identifier(id, *name, *type_annotation)
            }
            NodeKind::StringLiteral { value, raw } => {
                self.emit_string(*value, *raw);
                Ok(())
            }
            NodeKind::NumericLiteral { value, raw } => self.emit_number(id, *value, *raw),
            NodeKind::BigIntLiteral { raw } => {
                self.printer.token(self.text(*raw));
                Ok(())
            }
            NodeKind::BooleanLiteral { value } => {
                self.printer.word(if *value { "true" } else { "false" });
                Ok(())
            }
            NodeKind::NullLiteral => {
                self.printer.word("null");
                Ok(())
            }
            NodeKind::RegExpLiteral { pattern, flags } => {
                self.emit_regexp(*pattern, *flags);
                Ok(())
            }
            NodeKind::Literal { value, raw } => self.emit_estree_literal(id, value, *raw),
            NodeKind::TemplateLiteral { quasis, expressions } => self.emit_template(quasis, expressions),
            NodeKind::TemplateElement { raw, .. } => {
                self.printer.raw(self.text(*raw));
                Ok(())
            }
            NodeKind::TaggedTemplateExpression { tag, quasi } => {
                self.emit_expression(*tag, precedence::LEFT_HAND_SIDE)?;
                self.emit_node(*quasi)
            }
            NodeKind::ThisExpression => {
                self.printer.word("this");
                Ok(())
            }
            NodeKind::Super => {
                self.printer.word("super");
                Ok(())
            }
            NodeKind::Import => {
                self.printer.word("import");
                Ok(())
            }
            NodeKind::ArrayExpression { elements } => self.emit_elements(elements),
            NodeKind::Hole => Err(self.malformed(id, "hole outside an array")),
            NodeKind::ObjectExpression { properties } => {
                self.emit_braced_lines(properties.iter().copied(), ",")
            }
            NodeKind::ObjectProperty {
                computed,
                shorthand,
                key,
                value,
            } => self.emit_object_property(*computed, *shorthand, *key, *value),
            NodeKind::ObjectMethod {
                kind,
                computed,
                key,
                function,
            } => self.emit_method(&[], false, *kind, *computed, *key, function),
            NodeKind::SpreadElement { argument } => self.emit_spread(*argument, None),
            NodeKind::FunctionExpression(function) => self.emit_function(id, function, true),
            NodeKind::ArrowFunctionExpression {
                is_async,
                params,
                return_type,
                body,
                expression,
            } => self.emit_arrow(*is_async, params, *return_type, *body, *expression),
            NodeKind::ClassExpression(class) => self.emit_class(id, class, true),
            NodeKind::UnaryExpression { operator, argument } => self.emit_unary(*operator, *argument),
            NodeKind::UpdateExpression {
                operator,
                prefix,
                argument,
            } => self.emit_update(*operator, *prefix, *argument),
            NodeKind::BinaryExpression { operator, left, right } => self.emit_binary(*operator, *left, *right),
            NodeKind::LogicalExpression { operator, left, right } => self.emit_logical(*operator, *left, *right),
            NodeKind::AssignmentExpression { operator, left, right } => {
                self.emit_expression(*left, precedence::LEFT_HAND_SIDE)?;
                self.emit_operator(operator.as_str());
                self.emit_expression(*right, precedence::ASSIGN)
            }
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => self.emit_conditional(*test, *consequent, *alternate),
            NodeKind::SequenceExpression { expressions } => {
                for (i, &expression) in expressions.iter().enumerate() {
                    if i > 0 {
                        self.printer.token(",");
                        self.printer.space();
                    }
                    self.emit_expression(expression, precedence::ASSIGN)?;
                }
                Ok(())
            }
            NodeKind::CallExpression { callee, arguments } => self.emit_call(*callee, arguments),
            NodeKind::NewExpression { callee, arguments } => self.emit_new(*callee, arguments),
            NodeKind::MemberExpression {
                object,
                property,
                computed,
            } => self.emit_member(*object, *property, *computed),
            NodeKind::BindExpression { object, callee } => {
                if let Some(object) = object {
                    self.emit_expression(*object, precedence::LEFT_HAND_SIDE)?;
                }
                self.printer.token("::");
                self.emit_expression(*callee, precedence::LEFT_HAND_SIDE)
            }
            NodeKind::YieldExpression { delegate, argument } => self.emit_yield(*delegate, *argument),
            NodeKind::AwaitExpression { argument } => {
                self.printer.word("await");
                self.printer.space();
                self.emit_expression(*argument, precedence::UNARY)
            }
            NodeKind::MetaProperty { meta, property } => {
                self.emit_node(*meta)?;
                self.printer.token(".");
                self.emit_node(*property)
            }
            NodeKind::DoExpression { body } => {
                self.printer.word("do");
                self.printer.space();
                self.emit_node(*body)
            }

            NodeKind::ObjectPattern {
                properties,
                type_annotation,
            } => self.emit_object_pattern(properties, *type_annotation),
            NodeKind::ArrayPattern {
                elements,
                type_annotation,
            } => {
                self.emit_elements(elements)?;
                self.emit_annotation(*type_annotation)
            }
            NodeKind::RestElement {
                argument,
                type_annotation,
            } => self.emit_spread(*argument, *type_annotation),
            NodeKind::AssignmentPattern { left, right } => {
                self.emit_node(*left)?;
                self.emit_operator("=");
                self.emit_expression(*right, precedence::ASSIGN)
            }

            NodeKind::TypeAnnotation { type_annotation } => {
                self.printer.token(":");
                self.printer.space();
                self.emit_type(*type_annotation)
            }
            NodeKind::GenericTypeAnnotation { .. }
            | NodeKind::NullableTypeAnnotation { .. }
            | NodeKind::ArrayTypeAnnotation { .. }
            | NodeKind::UnionTypeAnnotation { .. }
            | NodeKind::IntersectionTypeAnnotation { .. }
            | NodeKind::StringLiteralTypeAnnotation { .. }
            | NodeKind::NumberLiteralTypeAnnotation { .. }
            | NodeKind::ObjectTypeAnnotation { .. } => self.emit_type(id),
            NodeKind::ObjectTypeProperty { key, optional, value } => {
                self.emit_object_type_property(*key, *optional, *value)
            }
        }
    }

    /// A binary-style operator with optional spaces around it.
    pub(super) fn emit_operator(&mut self, operator: &str) {
        self.printer.space();
        self.printer.token(operator);
        self.printer.space();
    }

    /// Flow annotation on a binding, if present.
    pub(super) fn emit_annotation(&mut self, annotation: Option<NodeId>) -> CodegenResult {
        match annotation {
            Some(annotation) => self.emit_node(annotation),
            None => Ok(()),
        }
    }
}
