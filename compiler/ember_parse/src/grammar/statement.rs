//! Statements, blocks and directive prologues.

use ember_diagnostic::ErrorCode;
use ember_ir::{LiteralValue, NodeId, NodeKind, Span, TokenKind, VarKind};
use ember_stack::ensure_sufficient_stack;

use crate::context::ParseContext;
use crate::parser::Label;
use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// The whole input as a `Program`.
    pub(crate) fn parse_program(&mut self) -> ParseResult<NodeId> {
        let interpreter = self.hashbang().map(|text| self.ast.intern(text));
        let (directives, body) = self.parse_block_body(true, true, TokenKind::Eof)?;
        let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
        Ok(self.ast.alloc(
            NodeKind::Program {
                interpreter,
                directives,
                body,
                source_type: self.source_type(),
            },
            Span::new(0, end),
        ))
    }

    /// Statements up to `end` (left unconsumed). With `allow_directives`,
    /// leading string statements form the directive prologue; a
    /// `"use strict"` directive makes the rest of the body strict.
    pub(crate) fn parse_block_body(
        &mut self,
        allow_directives: bool,
        top_level: bool,
        end: TokenKind,
    ) -> ParseResult<(Vec<NodeId>, Vec<NodeId>)> {
        let mut directives = Vec::new();
        let mut body = Vec::new();
        let mut in_prologue = allow_directives;
        while !self.at(end) {
            let statement = self.parse_statement_with(true, top_level)?;
            if in_prologue {
                if let Some((value, raw)) = self.directive_text(statement) {
                    if value == "use strict" {
                        self.context = self.context.with(ParseContext::STRICT);
                    }
                    let value = self.ast.intern(&value);
                    if self.estree {
                        if let Some(NodeKind::ExpressionStatement { directive, .. }) = self.ast.kind_mut(statement) {
                            *directive = Some(value);
                        }
                        body.push(statement);
                    } else {
                        let raw = Some(self.ast.intern(&raw));
                        self.ast.replace_kind(statement, NodeKind::Directive { value, raw });
                        directives.push(statement);
                    }
                    continue;
                }
                in_prologue = false;
            }
            body.push(statement);
        }
        Ok((directives, body))
    }

    /// Text of a prologue string statement: the value between the quotes
    /// (escapes left as written) and the quoted source.
    fn directive_text(&self, statement: NodeId) -> Option<(String, String)> {
        let NodeKind::ExpressionStatement { expression, .. } = self.ast.kind(statement) else {
            return None;
        };
        let is_string = match self.ast.kind(*expression) {
            NodeKind::StringLiteral { .. } => true,
            NodeKind::Literal { value, .. } => matches!(value, LiteralValue::String(_)),
            _ => false,
        };
        if !is_string || self.is_parenthesized(*expression) {
            return None;
        }
        let raw = self.source.get(self.ast.span(*expression).to_range())?;
        let value = raw.get(1..raw.len().saturating_sub(1))?;
        Some((value.to_owned(), raw.to_owned()))
    }

    /// `{ ... }` as a `BlockStatement`.
    pub fn parse_block(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.expect(TokenKind::LBrace)?;
        let (_, body) = self.parse_block_body(false, false, TokenKind::RBrace)?;
        self.expect(TokenKind::RBrace)?;
        Ok(self.finish_node(
            NodeKind::BlockStatement {
                directives: Vec::new(),
                body,
            },
            start,
        ))
    }

    /// A statement or declaration.
    pub fn parse_statement(&mut self) -> ParseResult<NodeId> {
        self.parse_statement_with(true, false)
    }

    /// Statement in a position that does not allow lexical declarations,
    /// such as an `if` branch or a loop body.
    fn parse_sub_statement(&mut self) -> ParseResult<NodeId> {
        self.parse_statement_with(false, false)
    }

    pub(crate) fn parse_statement_with(&mut self, declaration: bool, top_level: bool) -> ParseResult<NodeId> {
        ensure_sufficient_stack(|| self.parse_statement_inner(declaration, top_level))
    }

    fn parse_statement_inner(&mut self, declaration: bool, top_level: bool) -> ParseResult<NodeId> {
        let plugins = self.plugins;
        for handler in plugins.extensions().statement.iter().rev() {
            if let Some(result) = handler(self) {
                return result;
            }
        }

        let start = self.start();
        match self.kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Semi => {
                self.bump()?;
                Ok(self.finish_node(NodeKind::EmptyStatement, start))
            }
            TokenKind::Var => self.parse_var_statement(VarKind::Var),
            TokenKind::Const if declaration => self.parse_var_statement(VarKind::Const),
            TokenKind::Function => {
                if !declaration && self.context.is_strict() {
                    return Err(self.error_at_token(
                        ErrorCode::E1006,
                        "In strict mode code, functions can only be declared at top level or inside a block",
                    ));
                }
                self.parse_function_statement(start, false, true)
            }
            TokenKind::Class if declaration => self.parse_class(start, true, true, Vec::new()),
            TokenKind::At if declaration => {
                let decorators = self.parse_decorators()?;
                if !self.at(TokenKind::Class) {
                    return Err(self.error_at_token(
                        ErrorCode::E1001,
                        "Leading decorators must be attached to a class declaration",
                    ));
                }
                self.parse_class(start, true, true, decorators)
            }
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break | TokenKind::Continue => self.parse_break_continue(),
            TokenKind::Throw => self.parse_throw(),
            TokenKind::Try => self.parse_try(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::With => self.parse_with(),
            TokenKind::Debugger => {
                self.bump()?;
                self.semicolon()?;
                Ok(self.finish_node(NodeKind::DebuggerStatement, start))
            }
            TokenKind::Import => {
                let next = self.lookahead()?;
                if matches!(next.kind, TokenKind::LParen | TokenKind::Dot) {
                    return self.parse_expression_statement();
                }
                self.check_module_item(top_level)?;
                self.parse_import()
            }
            TokenKind::Export => {
                self.check_module_item(top_level)?;
                self.parse_export()
            }
            TokenKind::Ident => {
                if self.is_contextual("let") && declaration {
                    let next = self.lookahead()?;
                    if matches!(next.kind, TokenKind::Ident | TokenKind::LBracket | TokenKind::LBrace) {
                        return self.parse_var_statement(VarKind::Let);
                    }
                }
                if self.is_contextual("async") {
                    let next = self.lookahead()?;
                    if next.kind == TokenKind::Function && !next.newline_before {
                        self.bump()?;
                        return self.parse_function_statement(start, true, true);
                    }
                }
                if self.lookahead()?.kind == TokenKind::Colon {
                    return self.parse_labeled_statement();
                }
                self.parse_expression_statement()
            }
            TokenKind::Const | TokenKind::Class | TokenKind::At => self.unexpected(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let expression = self.parse_expression()?;
        self.semicolon()?;
        Ok(self.finish_node(
            NodeKind::ExpressionStatement {
                expression,
                directive: None,
            },
            start,
        ))
    }

    /// `function` declaration, with `async` already consumed when
    /// `is_async`.
    pub(crate) fn parse_function_statement(&mut self, start: u32, is_async: bool, require_id: bool) -> ParseResult<NodeId> {
        self.expect(TokenKind::Function)?;
        let function = self.parse_function(is_async, require_id)?;
        Ok(self.finish_node(NodeKind::FunctionDeclaration(function), start))
    }

    fn parse_var_statement(&mut self, kind: VarKind) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let declarations = self.parse_var_declarators(kind, false)?;
        self.semicolon()?;
        Ok(self.finish_node(NodeKind::VariableDeclaration { kind, declarations }, start))
    }

    /// Declarators after `var`/`let`/`const`. Inside a `for` head the
    /// initializer may be omitted before `in`/`of`.
    fn parse_var_declarators(&mut self, kind: VarKind, is_for: bool) -> ParseResult<Vec<NodeId>> {
        let mut declarations = Vec::new();
        loop {
            let start = self.start();
            let id = self.parse_binding_atom()?;
            if kind != VarKind::Var && self.ast.identifier_name(id) == Some("let") {
                return Err(self.error_at_node(
                    ErrorCode::E1003,
                    "'let' is not allowed to be used as a name in 'let' or 'const' declarations.",
                    id,
                ));
            }
            self.attach_type_annotation(id)?;

            let init = if self.eat(TokenKind::Eq)? {
                Some(self.parse_maybe_assign()?)
            } else {
                let before_in_of = is_for && (self.at(TokenKind::In) || self.is_contextual("of"));
                if !before_in_of {
                    if kind == VarKind::Const {
                        return Err(self.error_at_token(ErrorCode::E1001, "Missing initializer in const declaration"));
                    }
                    if !matches!(self.ast.kind(id), NodeKind::Identifier { .. }) {
                        return Err(self.error_at_token(
                            ErrorCode::E1001,
                            "Complex binding patterns require an initialization value",
                        ));
                    }
                }
                None
            };
            declarations.push(self.finish_node(NodeKind::VariableDeclarator { id, init }, start));
            if !self.eat(TokenKind::Comma)? {
                return Ok(declarations);
            }
        }
    }

    fn parse_if(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let test = self.parse_paren_expression()?;
        let consequent = self.parse_sub_statement()?;
        let alternate = if self.eat(TokenKind::Else)? {
            Some(self.parse_sub_statement()?)
        } else {
            None
        };
        Ok(self.finish_node(
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            },
            start,
        ))
    }

    fn parse_paren_expression(&mut self) -> ParseResult<NodeId> {
        self.expect(TokenKind::LParen)?;
        let expr = self.allow_in(Self::parse_expression)?;
        self.expect(TokenKind::RParen)?;
        Ok(expr)
    }

    fn parse_loop_body(&mut self) -> ParseResult<NodeId> {
        let context = self.context.with(ParseContext::IN_LOOP);
        self.with_context(context, Self::parse_sub_statement)
    }

    fn parse_while(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let test = self.parse_paren_expression()?;
        let body = self.parse_loop_body()?;
        Ok(self.finish_node(NodeKind::WhileStatement { test, body }, start))
    }

    fn parse_do_while(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let body = self.parse_loop_body()?;
        self.expect(TokenKind::While)?;
        let test = self.parse_paren_expression()?;
        self.eat(TokenKind::Semi)?;
        Ok(self.finish_node(NodeKind::DoWhileStatement { body, test }, start))
    }

    fn parse_for(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let is_await = if self.context.in_async() && self.is_contextual("await") {
            self.require_plugin("asyncGenerators", "for await")?;
            self.bump()?;
            true
        } else {
            false
        };
        self.expect(TokenKind::LParen)?;

        if self.at(TokenKind::Semi) {
            if is_await {
                return self.unexpected();
            }
            return self.parse_for_rest(start, None);
        }

        let var_kind = match self.kind() {
            TokenKind::Var => Some(VarKind::Var),
            TokenKind::Const => Some(VarKind::Const),
            TokenKind::Ident if self.is_contextual("let") => {
                let next = self.lookahead()?;
                matches!(next.kind, TokenKind::Ident | TokenKind::LBracket | TokenKind::LBrace).then_some(VarKind::Let)
            }
            _ => None,
        };

        if let Some(kind) = var_kind {
            let init_start = self.start();
            self.bump()?;
            let context = self.context.with(ParseContext::NO_IN);
            let declarations = self.with_context(context, |p| p.parse_var_declarators(kind, true))?;
            let for_in_of = self.at(TokenKind::In) || self.is_contextual("of");
            if for_in_of && declarations.len() == 1 {
                if let NodeKind::VariableDeclarator { init: Some(_), .. } = self.ast.kind(declarations[0]) {
                    return Err(self.error_at_node(
                        ErrorCode::E1006,
                        "for-in/of loop variable declaration may not have an initializer",
                        declarations[0],
                    ));
                }
            }
            let init = self.finish_node(NodeKind::VariableDeclaration { kind, declarations }, init_start);
            if for_in_of {
                return self.parse_for_in_of(start, init, is_await);
            }
            if is_await {
                return self.unexpected();
            }
            return self.parse_for_rest(start, Some(init));
        }

        let outer = self.shorthand_init.take();
        let context = self.context.with(ParseContext::NO_IN);
        let init = self.with_context(context, |p| p.parse_expression_with(true))?;
        if self.at(TokenKind::In) || self.is_contextual("of") {
            self.to_assignable(init)?;
            self.shorthand_init = outer;
            return self.parse_for_in_of(start, init, is_await);
        }
        if let Some(position) = self.shorthand_init {
            return Err(self.error_at(ErrorCode::E1001, "Unexpected token", position, Span::point(position.offset)));
        }
        self.shorthand_init = outer;
        if is_await {
            return self.unexpected();
        }
        self.parse_for_rest(start, Some(init))
    }

    /// `; test; update) body` of a classic `for`.
    fn parse_for_rest(&mut self, start: u32, init: Option<NodeId>) -> ParseResult<NodeId> {
        self.expect(TokenKind::Semi)?;
        let test = if self.at(TokenKind::Semi) {
            None
        } else {
            Some(self.allow_in(Self::parse_expression)?)
        };
        self.expect(TokenKind::Semi)?;
        let update = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(self.allow_in(Self::parse_expression)?)
        };
        self.expect(TokenKind::RParen)?;
        let body = self.parse_loop_body()?;
        Ok(self.finish_node(
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            },
            start,
        ))
    }

    fn parse_for_in_of(&mut self, start: u32, left: NodeId, is_await: bool) -> ParseResult<NodeId> {
        let is_in = self.at(TokenKind::In);
        if is_in && is_await {
            return self.unexpected();
        }
        self.bump()?;
        let right = if is_in {
            self.allow_in(Self::parse_expression)?
        } else {
            self.allow_in(Self::parse_maybe_assign)?
        };
        self.expect(TokenKind::RParen)?;
        let body = self.parse_loop_body()?;
        let kind = if is_in {
            NodeKind::ForInStatement { left, right, body }
        } else {
            NodeKind::ForOfStatement {
                is_await,
                left,
                right,
                body,
            }
        };
        Ok(self.finish_node(kind, start))
    }

    fn parse_return(&mut self) -> ParseResult<NodeId> {
        if !self.context.in_function() && !self.options.allow_return_outside_function {
            return Err(self.error_at_token(ErrorCode::E1006, "'return' outside of function"));
        }
        let start = self.start();
        self.bump()?;
        let argument = if self.at(TokenKind::Semi) || self.can_insert_semicolon() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.semicolon()?;
        Ok(self.finish_node(NodeKind::ReturnStatement { argument }, start))
    }

    fn parse_break_continue(&mut self) -> ParseResult<NodeId> {
        let is_break = self.at(TokenKind::Break);
        let keyword = self.token.clone();
        let start = self.start();
        self.bump()?;
        let label = if self.at(TokenKind::Ident) && !self.token.newline_before {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.semicolon()?;

        let keyword_name = if is_break { "break" } else { "continue" };
        let problem = match label {
            Some(label) => {
                let name = self.ast.identifier_name(label).unwrap_or_default();
                match self.labels.iter().rev().find(|l| l.name == name) {
                    None => Some(format!("Unknown label '{name}'")),
                    Some(found) if !is_break && !found.is_loop => Some(format!("Unsyntactic {keyword_name}")),
                    Some(_) => None,
                }
            }
            None if is_break && !self.context.allows_break() => Some(format!("Unsyntactic {keyword_name}")),
            None if !is_break && !self.context.in_loop() => Some(format!("Unsyntactic {keyword_name}")),
            None => None,
        };
        if let Some(message) = problem {
            return Err(self.error_at(ErrorCode::E1008, message, keyword.start, keyword.span));
        }

        let kind = if is_break {
            NodeKind::BreakStatement { label }
        } else {
            NodeKind::ContinueStatement { label }
        };
        Ok(self.finish_node(kind, start))
    }

    fn parse_labeled_statement(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let label = self.parse_identifier()?;
        let name = self.ast.identifier_name(label).unwrap_or_default().to_owned();
        if self.labels.iter().any(|l| l.name == name) {
            return Err(self.error_at_node(
                ErrorCode::E1008,
                format!("Label '{name}' is already declared"),
                label,
            ));
        }
        self.expect(TokenKind::Colon)?;
        let is_loop = matches!(self.kind(), TokenKind::For | TokenKind::While | TokenKind::Do);
        self.labels.push(Label { name, is_loop });
        let body = self.parse_statement();
        self.labels.pop();
        let body = body?;
        Ok(self.finish_node(NodeKind::LabeledStatement { label, body }, start))
    }

    fn parse_throw(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        if self.token.newline_before {
            return Err(self.error_at(
                ErrorCode::E1001,
                "Illegal newline after throw",
                self.position_of(self.prev_end),
                Span::point(self.prev_end),
            ));
        }
        let argument = self.parse_expression()?;
        self.semicolon()?;
        Ok(self.finish_node(NodeKind::ThrowStatement { argument }, start))
    }

    fn parse_try(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let block = self.parse_block()?;

        let handler = if self.at(TokenKind::Catch) {
            let catch_start = self.start();
            self.bump()?;
            let param = if self.eat(TokenKind::LParen)? {
                let param = self.parse_binding_atom()?;
                for id in self.bound_identifiers(param) {
                    self.check_binding_name(id)?;
                }
                self.expect(TokenKind::RParen)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(self.finish_node(NodeKind::CatchClause { param, body }, catch_start))
        } else {
            None
        };
        let finalizer = if self.eat(TokenKind::Finally)? {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_at_token(ErrorCode::E1001, "Missing catch or finally clause"));
        }
        Ok(self.finish_node(
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            },
            start,
        ))
    }

    fn parse_switch(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let discriminant = self.parse_paren_expression()?;
        self.expect(TokenKind::LBrace)?;
        let context = self.context.with(ParseContext::IN_SWITCH);
        let cases = self.with_context(context, |p| {
            let mut cases = Vec::new();
            let mut seen_default = false;
            while !p.eat(TokenKind::RBrace)? {
                let case_start = p.start();
                let test = if p.eat(TokenKind::Case)? {
                    Some(p.allow_in(Self::parse_expression)?)
                } else if p.at(TokenKind::Default) {
                    if seen_default {
                        return Err(p.error_at_token(ErrorCode::E1001, "Multiple default clauses"));
                    }
                    seen_default = true;
                    p.bump()?;
                    None
                } else {
                    return p.unexpected();
                };
                p.expect(TokenKind::Colon)?;
                let mut consequent = Vec::new();
                while !matches!(p.kind(), TokenKind::Case | TokenKind::Default | TokenKind::RBrace) {
                    consequent.push(p.parse_statement()?);
                }
                cases.push(p.finish_node(NodeKind::SwitchCase { test, consequent }, case_start));
            }
            Ok(cases)
        })?;
        Ok(self.finish_node(NodeKind::SwitchStatement { discriminant, cases }, start))
    }

    fn parse_with(&mut self) -> ParseResult<NodeId> {
        if self.context.is_strict() {
            return Err(self.error_at_token(ErrorCode::E1006, "'with' in strict mode"));
        }
        let start = self.start();
        self.bump()?;
        let object = self.parse_paren_expression()?;
        let body = self.parse_sub_statement()?;
        Ok(self.finish_node(NodeKind::WithStatement { object, body }, start))
    }
}
