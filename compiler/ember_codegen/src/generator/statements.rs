//! Statements, blocks and declarations.

use ember_ir::{LiteralValue, Name, NodeId, NodeKind, VarKind};

use super::Generator;
use crate::precedence::{self, ends_with_open_if, starts_ambiguously, Start};
use crate::{CodegenResult, Quotes};

impl Generator<'_> {
    pub(super) fn emit_program(
        &mut self,
        interpreter: Option<Name>,
        directives: &[NodeId],
        body: &[NodeId],
    ) -> CodegenResult {
        if let Some(interpreter) = interpreter {
            self.printer.raw("#!");
            self.printer.raw(self.text(interpreter));
            self.printer.hard_newline();
        }
        for (i, &statement) in directives.iter().chain(body).enumerate() {
            if i > 0 {
                self.printer.newline();
            }
            self.emit_node(statement)?;
        }
        Ok(())
    }

    /// A prologue directive keeps its quotes as written. One built by a
    /// transform uses the configured quote unless the text contains it.
    pub(super) fn emit_directive(&mut self, value: Name, raw: Option<Name>) -> CodegenResult {
        match raw {
            Some(raw) => self.printer.token(self.text(raw)),
            None => {
                let value = self.text(value);
                let preferred = match self.options.quotes {
                    Quotes::Double => '"',
                    Quotes::Single => '\'',
                };
                let quote = if value.contains(preferred) {
                    if preferred == '"' { '\'' } else { '"' }
                } else {
                    preferred
                };
                self.printer.token(&format!("{quote}{value}{quote}"));
            }
        }
        self.printer.token(";");
        Ok(())
    }

    pub(super) fn emit_expression_statement(&mut self, expression: NodeId, is_directive: bool) -> CodegenResult {
        // An unparenthesized string at the top of a body would come back as
        // a directive.
        let is_string = match self.ast.kind(expression) {
            NodeKind::StringLiteral { .. } => true,
            NodeKind::Literal { value, .. } => matches!(value, LiteralValue::String(_)),
            _ => false,
        };
        if (is_string && !is_directive) || starts_ambiguously(self.ast, expression, Start::Statement) {
            self.emit_parenthesized(expression)?;
        } else {
            self.emit_expression(expression, precedence::SEQUENCE)?;
        }
        self.printer.token(";");
        Ok(())
    }

    pub(super) fn emit_block(&mut self, directives: &[NodeId], body: &[NodeId]) -> CodegenResult {
        self.emit_braced_lines(directives.iter().chain(body).copied(), "")
    }

    /// The body of a compound statement, after its head.
    fn emit_body(&mut self, body: NodeId) -> CodegenResult {
        if !matches!(self.ast.kind(body), NodeKind::EmptyStatement) {
            self.printer.space();
        }
        self.emit_node(body)
    }

    /// `(expression)` after a keyword.
    fn emit_head(&mut self, keyword: &str, expression: NodeId) -> CodegenResult {
        self.printer.word(keyword);
        self.printer.space();
        self.printer.token("(");
        self.emit_expression(expression, precedence::SEQUENCE)?;
        self.printer.token(")");
        Ok(())
    }

    pub(super) fn emit_with(&mut self, object: NodeId, body: NodeId) -> CodegenResult {
        self.emit_head("with", object)?;
        self.emit_body(body)
    }

    /// `return`/`throw` with an optional argument.
    pub(super) fn emit_keyword_argument(&mut self, keyword: &str, argument: Option<NodeId>) -> CodegenResult {
        self.printer.word(keyword);
        if let Some(argument) = argument {
            self.printer.space();
            self.emit_expression(argument, precedence::SEQUENCE)?;
        }
        self.printer.token(";");
        Ok(())
    }

    pub(super) fn emit_labeled(&mut self, label: NodeId, body: NodeId) -> CodegenResult {
        self.emit_node(label)?;
        self.printer.token(":");
        self.emit_body(body)
    }

    pub(super) fn emit_jump(&mut self, keyword: &str, label: Option<NodeId>) -> CodegenResult {
        self.printer.word(keyword);
        if let Some(label) = label {
            self.printer.space();
            self.emit_node(label)?;
        }
        self.printer.token(";");
        Ok(())
    }

    pub(super) fn emit_if(&mut self, test: NodeId, consequent: NodeId, alternate: Option<NodeId>) -> CodegenResult {
        self.emit_head("if", test)?;

        let braced = alternate.is_some() && ends_with_open_if(self.ast, consequent);
        if braced {
            self.printer.space();
            self.emit_braced_lines([consequent], "")?;
        } else {
            self.emit_body(consequent)?;
        }

        if let Some(alternate) = alternate {
            if braced || matches!(self.ast.kind(consequent), NodeKind::BlockStatement { .. }) {
                self.printer.space();
            } else {
                self.printer.newline();
            }
            self.printer.word("else");
            self.emit_body(alternate)?;
        }
        Ok(())
    }

    pub(super) fn emit_switch(&mut self, discriminant: NodeId, cases: &[NodeId]) -> CodegenResult {
        self.emit_head("switch", discriminant)?;
        self.printer.space();
        self.emit_braced_lines(cases.iter().copied(), "")
    }

    pub(super) fn emit_switch_case(&mut self, test: Option<NodeId>, consequent: &[NodeId]) -> CodegenResult {
        match test {
            Some(test) => {
                self.printer.word("case");
                self.printer.space();
                self.emit_expression(test, precedence::SEQUENCE)?;
            }
            None => self.printer.word("default"),
        }
        self.printer.token(":");
        self.printer.indent();
        for &statement in consequent {
            self.printer.newline();
            self.emit_node(statement)?;
        }
        self.printer.dedent();
        Ok(())
    }

    pub(super) fn emit_try(
        &mut self,
        block: NodeId,
        handler: Option<NodeId>,
        finalizer: Option<NodeId>,
    ) -> CodegenResult {
        self.printer.word("try");
        self.printer.space();
        self.emit_node(block)?;
        if let Some(handler) = handler {
            self.printer.space();
            self.emit_node(handler)?;
        }
        if let Some(finalizer) = finalizer {
            self.printer.space();
            self.printer.word("finally");
            self.printer.space();
            self.emit_node(finalizer)?;
        }
        Ok(())
    }

    pub(super) fn emit_catch(&mut self, param: Option<NodeId>, body: NodeId) -> CodegenResult {
        self.printer.word("catch");
        if let Some(param) = param {
            self.printer.space();
            self.printer.token("(");
            self.emit_node(param)?;
            self.printer.token(")");
        }
        self.printer.space();
        self.emit_node(body)
    }

    pub(super) fn emit_while(&mut self, test: NodeId, body: NodeId) -> CodegenResult {
        self.emit_head("while", test)?;
        self.emit_body(body)
    }

    pub(super) fn emit_do_while(&mut self, body: NodeId, test: NodeId) -> CodegenResult {
        self.printer.word("do");
        self.emit_body(body)?;
        if matches!(self.ast.kind(body), NodeKind::BlockStatement { .. }) {
            self.printer.space();
        } else {
            self.printer.newline();
        }
        self.emit_head("while", test)?;
        self.printer.token(";");
        Ok(())
    }

    pub(super) fn emit_for(
        &mut self,
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    ) -> CodegenResult {
        self.printer.word("for");
        self.printer.space();
        self.printer.token("(");
        if let Some(init) = init {
            self.no_in = true;
            let result = self.emit_for_left(init, precedence::SEQUENCE);
            self.no_in = false;
            result?;
        }
        self.printer.token(";");
        if let Some(test) = test {
            self.printer.space();
            self.emit_expression(test, precedence::SEQUENCE)?;
        }
        self.printer.token(";");
        if let Some(update) = update {
            self.printer.space();
            self.emit_expression(update, precedence::SEQUENCE)?;
        }
        self.printer.token(")");
        self.emit_body(body)
    }

    pub(super) fn emit_for_in_of(
        &mut self,
        is_await: bool,
        left: NodeId,
        operator: &str,
        right: NodeId,
        body: NodeId,
    ) -> CodegenResult {
        self.printer.word("for");
        if is_await {
            self.printer.word("await");
        }
        self.printer.space();
        self.printer.token("(");
        self.emit_for_left(left, precedence::LEFT_HAND_SIDE)?;
        self.printer.space();
        self.printer.word(operator);
        self.printer.space();
        // `for-of` takes an assignment expression, `for-in` any expression.
        let min = if operator == "of" {
            precedence::ASSIGN
        } else {
            precedence::SEQUENCE
        };
        self.emit_expression(right, min)?;
        self.printer.token(")");
        self.emit_body(body)
    }

    /// A loop head's declaration (printed without `;`) or expression.
    fn emit_for_left(&mut self, left: NodeId, min: precedence::Level) -> CodegenResult {
        match self.ast.kind(left) {
            NodeKind::VariableDeclaration { kind, declarations } => {
                self.emit_variable_declaration(left, *kind, declarations, false)
            }
            _ if starts_ambiguously(self.ast, left, Start::ForHead) => self.emit_parenthesized(left),
            _ => self.emit_expression(left, min),
        }
    }

    pub(super) fn emit_variable_declaration(
        &mut self,
        id: NodeId,
        kind: VarKind,
        declarations: &[NodeId],
        terminated: bool,
    ) -> CodegenResult {
        if declarations.is_empty() {
            return Err(self.malformed(id, "declaration without declarators"));
        }
        self.printer.word(kind.as_str());
        self.printer.space();
        for (i, &declarator) in declarations.iter().enumerate() {
            if i > 0 {
                self.printer.token(",");
                self.printer.space();
            }
            self.emit_node(declarator)?;
        }
        if terminated {
            self.printer.token(";");
        }
        Ok(())
    }

    pub(super) fn emit_declarator(&mut self, target: NodeId, init: Option<NodeId>) -> CodegenResult {
        self.emit_node(target)?;
        if let Some(init) = init {
            self.emit_operator("=");
            self.emit_expression(init, precedence::ASSIGN)?;
        }
        Ok(())
    }
}
