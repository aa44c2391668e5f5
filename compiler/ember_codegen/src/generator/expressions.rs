//! Expressions, literals and patterns.

use ember_ir::{BinaryOp, LiteralValue, LogicalOp, Name, NodeId, NodeKind, UnaryOp, UpdateOp};

use super::Generator;
use crate::literals::{format_number, is_plain_integer, quote_string};
use crate::precedence::{self, callee_contains_call, mixes_nullish};
use crate::CodegenResult;

impl Generator<'_> {
    pub(super) fn emit_identifier(
        &mut self,
        id: NodeId,
        name: Name,
        type_annotation: Option<NodeId>,
    ) -> CodegenResult {
        let name = self.text(name);
        if name.is_empty() {
            return Err(self.malformed(id, "identifier without a name"));
        }
        self.printer.word(name);
        self.emit_annotation(type_annotation)
    }

    pub(super) fn emit_string(&mut self, value: Name, raw: Option<Name>) {
        match raw {
            Some(raw) => self.printer.token(self.text(raw)),
            None => {
                let quoted = quote_string(self.text(value), self.options.quotes);
                self.printer.token(&quoted);
            }
        }
    }

    pub(super) fn emit_number(&mut self, id: NodeId, value: f64, raw: Option<Name>) -> CodegenResult {
        let text = self.number_text(id, value, raw)?;
        self.printer.token(&text);
        Ok(())
    }

    fn number_text(&self, id: NodeId, value: f64, raw: Option<Name>) -> CodegenResult<String> {
        match raw {
            Some(raw) => Ok(self.text(raw).to_owned()),
            None => format_number(value).ok_or_else(|| self.malformed(id, "number has no literal spelling")),
        }
    }

    pub(super) fn emit_regexp(&mut self, pattern: Name, flags: Name) {
        let text = format!("/{}/{}", self.text(pattern), self.text(flags));
        self.printer.token(&text);
    }

    pub(super) fn emit_estree_literal(
        &mut self,
        id: NodeId,
        value: &LiteralValue,
        raw: Option<Name>,
    ) -> CodegenResult {
        if let Some(raw) = raw {
            self.printer.token(self.text(raw));
            return Ok(());
        }
        match value {
            LiteralValue::String(value) => self.emit_string(*value, None),
            LiteralValue::Number(value) => self.emit_number(id, *value, None)?,
            LiteralValue::BigInt(raw) => self.printer.token(self.text(*raw)),
            LiteralValue::Boolean(value) => self.printer.word(if *value { "true" } else { "false" }),
            LiteralValue::Null => self.printer.word("null"),
            LiteralValue::RegExp { pattern, flags } => self.emit_regexp(*pattern, *flags),
        }
        Ok(())
    }

    pub(super) fn emit_template(&mut self, quasis: &[NodeId], expressions: &[NodeId]) -> CodegenResult {
        self.printer.raw("`");
        for (i, &quasi) in quasis.iter().enumerate() {
            self.emit_node(quasi)?;
            if let Some(&expression) = expressions.get(i) {
                self.printer.raw("${");
                self.emit_expression(expression, precedence::SEQUENCE)?;
                self.printer.raw("}");
            }
        }
        self.printer.raw("`");
        Ok(())
    }

    /// Array literal or pattern elements. A trailing hole needs its own
    /// comma or it would be dropped on re-parse.
    pub(super) fn emit_elements(&mut self, elements: &[NodeId]) -> CodegenResult {
        self.printer.token("[");
        for (i, &element) in elements.iter().enumerate() {
            if i > 0 {
                self.printer.token(",");
            }
            if matches!(self.ast.kind(element), NodeKind::Hole) {
                continue;
            }
            if i > 0 {
                self.printer.space();
            }
            self.emit_expression(element, precedence::ASSIGN)?;
        }
        if elements
            .last()
            .is_some_and(|last| matches!(self.ast.kind(*last), NodeKind::Hole))
        {
            self.printer.token(",");
        }
        self.printer.token("]");
        Ok(())
    }

    /// `{ a, b: c }` on one line.
    pub(super) fn emit_object_pattern(
        &mut self,
        properties: &[NodeId],
        type_annotation: Option<NodeId>,
    ) -> CodegenResult {
        self.printer.token("{");
        if !properties.is_empty() {
            self.printer.space();
            for (i, &property) in properties.iter().enumerate() {
                if i > 0 {
                    self.printer.token(",");
                    self.printer.space();
                }
                self.emit_node(property)?;
            }
            self.printer.space();
        }
        self.printer.token("}");
        self.emit_annotation(type_annotation)
    }

    pub(super) fn emit_object_property(
        &mut self,
        computed: bool,
        shorthand: bool,
        key: NodeId,
        value: NodeId,
    ) -> CodegenResult {
        if shorthand && !computed && self.is_shorthand(key, value) {
            return self.emit_node(value);
        }
        self.emit_property_key(key, computed)?;
        self.printer.token(":");
        self.printer.space();
        self.emit_expression(value, precedence::ASSIGN)
    }

    /// `{ a }` and `{ a = 1 }` only print short when the value still binds
    /// the key's name.
    fn is_shorthand(&self, key: NodeId, value: NodeId) -> bool {
        let Some(key) = self.ast.identifier_name(key) else {
            return false;
        };
        let target = match self.ast.kind(value) {
            NodeKind::AssignmentPattern { left, .. } => *left,
            _ => value,
        };
        self.ast.identifier_name(target) == Some(key)
    }

    /// A property, method or class member key.
    pub(super) fn emit_property_key(&mut self, key: NodeId, computed: bool) -> CodegenResult {
        if computed {
            self.printer.token("[");
            self.emit_expression(key, precedence::ASSIGN)?;
            self.printer.token("]");
            return Ok(());
        }
        match self.ast.kind(key) {
            NodeKind::Identifier { name, .. } => self.emit_identifier(key, *name, None),
            _ => self.emit_node(key),
        }
    }

    /// `...argument` for spread elements and rest patterns.
    pub(super) fn emit_spread(&mut self, argument: NodeId, type_annotation: Option<NodeId>) -> CodegenResult {
        self.printer.token("...");
        self.emit_expression(argument, precedence::ASSIGN)?;
        self.emit_annotation(type_annotation)
    }

    pub(super) fn emit_unary(&mut self, operator: UnaryOp, argument: NodeId) -> CodegenResult {
        self.printer.token(operator.as_str());
        if operator.is_word() {
            self.printer.space();
        }
        self.emit_expression(argument, precedence::UNARY)
    }

    pub(super) fn emit_update(&mut self, operator: UpdateOp, prefix: bool, argument: NodeId) -> CodegenResult {
        if prefix {
            self.printer.token(operator.as_str());
            self.emit_expression(argument, precedence::UNARY)
        } else {
            self.emit_expression(argument, precedence::LEFT_HAND_SIDE)?;
            self.printer.token(operator.as_str());
            Ok(())
        }
    }

    pub(super) fn emit_binary(&mut self, operator: BinaryOp, left: NodeId, right: NodeId) -> CodegenResult {
        let level = precedence::binary(operator);
        let (left_min, right_min) = if operator.is_right_assoc() {
            (level + 1, level)
        } else {
            (level, level + 1)
        };
        // `-a ** b` is a syntax error; the base must be parenthesized.
        let unary_base = operator == BinaryOp::Exp
            && matches!(
                self.ast.kind(left),
                NodeKind::UnaryExpression { .. } | NodeKind::AwaitExpression { .. }
            );
        if unary_base {
            self.emit_parenthesized(left)?;
        } else {
            self.emit_expression(left, left_min)?;
        }
        self.emit_operator(operator.as_str());
        self.emit_expression(right, right_min)
    }

    pub(super) fn emit_logical(&mut self, operator: LogicalOp, left: NodeId, right: NodeId) -> CodegenResult {
        let level = precedence::logical(operator);
        for (i, (operand, min)) in [(left, level), (right, level + 1)].into_iter().enumerate() {
            if i > 0 {
                self.emit_operator(operator.as_str());
            }
            if mixes_nullish(operator, self.ast.kind(operand)) {
                self.emit_parenthesized(operand)?;
            } else {
                self.emit_expression(operand, min)?;
            }
        }
        Ok(())
    }

    pub(super) fn emit_conditional(&mut self, test: NodeId, consequent: NodeId, alternate: NodeId) -> CodegenResult {
        self.emit_expression(test, precedence::CONDITIONAL + 1)?;
        self.emit_operator("?");
        self.emit_expression(consequent, precedence::ASSIGN)?;
        self.emit_operator(":");
        self.emit_expression(alternate, precedence::ASSIGN)
    }

    pub(super) fn emit_call(&mut self, callee: NodeId, arguments: &[NodeId]) -> CodegenResult {
        self.emit_expression(callee, precedence::LEFT_HAND_SIDE)?;
        self.emit_arguments(arguments)
    }

    fn emit_arguments(&mut self, arguments: &[NodeId]) -> CodegenResult {
        self.printer.token("(");
        self.emit_comma_list(arguments)?;
        self.printer.token(")");
        Ok(())
    }

    /// `new` always prints an argument list so a following member access
    /// cannot be absorbed into the callee.
    pub(super) fn emit_new(&mut self, callee: NodeId, arguments: &[NodeId]) -> CodegenResult {
        self.printer.word("new");
        self.printer.space();
        if callee_contains_call(self.ast, callee) {
            self.emit_parenthesized(callee)?;
        } else {
            self.emit_expression(callee, precedence::LEFT_HAND_SIDE)?;
        }
        self.emit_arguments(arguments)
    }

    pub(super) fn emit_member(&mut self, object: NodeId, property: NodeId, computed: bool) -> CodegenResult {
        // `1.x` would read as the number `1.` followed by `x`.
        let integer_object = !computed && self.is_plain_integer_literal(object)?;
        if integer_object {
            self.emit_parenthesized(object)?;
        } else {
            self.emit_expression(object, precedence::LEFT_HAND_SIDE)?;
        }
        if computed {
            self.printer.token("[");
            self.emit_expression(property, precedence::SEQUENCE)?;
            self.printer.token("]");
            Ok(())
        } else {
            self.printer.token(".");
            self.emit_property_key(property, false)
        }
    }

    fn is_plain_integer_literal(&self, id: NodeId) -> CodegenResult<bool> {
        let (value, raw) = match self.ast.kind(id) {
            NodeKind::NumericLiteral { value, raw }
            | NodeKind::Literal {
                value: LiteralValue::Number(value),
                raw,
            } => (*value, *raw),
            _ => return Ok(false),
        };
        Ok(is_plain_integer(&self.number_text(id, value, raw)?))
    }

    pub(super) fn emit_yield(&mut self, delegate: bool, argument: Option<NodeId>) -> CodegenResult {
        self.printer.word("yield");
        if delegate {
            self.printer.token("*");
        }
        if let Some(argument) = argument {
            self.printer.space();
            self.emit_expression(argument, precedence::ASSIGN)?;
        }
        Ok(())
    }
}
