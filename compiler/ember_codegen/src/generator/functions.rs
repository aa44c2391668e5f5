//! Functions, methods and classes.

use ember_ir::{Class, Function, MethodKind, NodeId, NodeKind};

use super::Generator;
use crate::precedence::{self, starts_ambiguously, Start};
use crate::CodegenResult;

impl Generator<'_> {
    /// `function` declarations and expressions. Only expressions and
    /// default exports may be anonymous.
    pub(super) fn emit_function(&mut self, id: NodeId, function: &Function, anonymous: bool) -> CodegenResult {
        if function.id.is_none() && !anonymous {
            return Err(self.malformed(id, "function declaration without a name"));
        }
        if function.is_async {
            self.printer.word("async");
        }
        self.printer.word("function");
        if function.is_generator {
            self.printer.token("*");
        }
        self.printer.space();
        if let Some(name) = function.id {
            self.emit_node(name)?;
        }
        self.emit_signature(&function.params, function.return_type)?;
        self.printer.space();
        self.emit_node(function.body)
    }

    /// Parameter list and return annotation.
    fn emit_signature(&mut self, params: &[NodeId], return_type: Option<NodeId>) -> CodegenResult {
        self.printer.token("(");
        self.emit_comma_list(params)?;
        self.printer.token(")");
        self.emit_annotation(return_type)
    }

    pub(super) fn emit_arrow(
        &mut self,
        is_async: bool,
        params: &[NodeId],
        return_type: Option<NodeId>,
        body: NodeId,
        expression: bool,
    ) -> CodegenResult {
        if is_async {
            self.printer.word("async");
            self.printer.space();
        }
        self.emit_signature(params, return_type)?;
        self.printer.space();
        self.printer.token("=>");
        self.printer.space();
        if !expression {
            return self.emit_node(body);
        }
        if starts_ambiguously(self.ast, body, Start::ArrowBody) {
            self.emit_parenthesized(body)
        } else {
            self.emit_expression(body, precedence::ASSIGN)
        }
    }

    fn emit_decorators(&mut self, decorators: &[NodeId]) -> CodegenResult {
        for &decorator in decorators {
            self.emit_node(decorator)?;
            self.printer.space();
        }
        Ok(())
    }

    /// Class and object methods: modifiers in source order, then key,
    /// signature and body.
    pub(super) fn emit_method(
        &mut self,
        decorators: &[NodeId],
        is_static: bool,
        kind: MethodKind,
        computed: bool,
        key: NodeId,
        function: &Function,
    ) -> CodegenResult {
        self.emit_decorators(decorators)?;
        if is_static {
            self.printer.word("static");
            self.printer.space();
        }
        if function.is_async {
            self.printer.word("async");
            self.printer.space();
        }
        match kind {
            MethodKind::Get => {
                self.printer.word("get");
                self.printer.space();
            }
            MethodKind::Set => {
                self.printer.word("set");
                self.printer.space();
            }
            MethodKind::Method | MethodKind::Constructor => {}
        }
        if function.is_generator {
            self.printer.token("*");
        }
        self.emit_property_key(key, computed)?;
        self.emit_signature(&function.params, function.return_type)?;
        self.printer.space();
        self.emit_node(function.body)
    }

    pub(super) fn emit_class_property(
        &mut self,
        decorators: &[NodeId],
        is_static: bool,
        computed: bool,
        key: NodeId,
        type_annotation: Option<NodeId>,
        value: Option<NodeId>,
    ) -> CodegenResult {
        self.emit_decorators(decorators)?;
        if is_static {
            self.printer.word("static");
            self.printer.space();
        }
        self.emit_property_key(key, computed)?;
        self.emit_annotation(type_annotation)?;
        if let Some(value) = value {
            self.emit_operator("=");
            self.emit_expression(value, precedence::ASSIGN)?;
        }
        self.printer.token(";");
        Ok(())
    }

    pub(super) fn emit_class(&mut self, id: NodeId, class: &Class, anonymous: bool) -> CodegenResult {
        if class.id.is_none() && !anonymous {
            return Err(self.malformed(id, "class declaration without a name"));
        }
        self.emit_decorators(&class.decorators)?;
        self.printer.word("class");
        if let Some(name) = class.id {
            self.emit_node(name)?;
        }
        if let Some(super_class) = class.super_class {
            self.printer.word("extends");
            self.printer.space();
            self.emit_expression(super_class, precedence::LEFT_HAND_SIDE)?;
        }
        self.printer.space();
        self.emit_node(class.body)
    }

    /// `export default function () {}` and `export default class {}` may
    /// leave out the name.
    pub(super) fn emit_default_declaration(&mut self, declaration: NodeId) -> CodegenResult {
        match self.ast.kind(declaration) {
            NodeKind::FunctionDeclaration(function) => self.emit_function(declaration, function, true),
            NodeKind::ClassDeclaration(class) => self.emit_class(declaration, class, true),
            _ => self.emit_node(declaration),
        }
    }
}
