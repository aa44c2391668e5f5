//! Primary expressions: identifiers, literals, array and object literals,
//! `new`, `super` and parenthesized expressions.

use ember_diagnostic::ErrorCode;
use ember_ir::{LiteralValue, MethodKind, NodeId, NodeKind, Span, TokenKind, TokenValue};
use ember_lexer::{is_reserved_word, is_strict_bind_reserved_word, is_strict_reserved_word};

use crate::context::ParseContext;
use crate::{ParseResult, Parser};

impl Parser<'_> {
    pub(crate) fn parse_expr_atom(&mut self) -> ParseResult<NodeId> {
        let plugins = self.plugins;
        for handler in plugins.extensions().atom.iter().rev() {
            if let Some(result) = handler(self) {
                return result;
            }
        }

        let start = self.start();
        match self.kind() {
            TokenKind::Slash | TokenKind::SlashEq => {
                self.rescan_regex()?;
                self.parse_literal()
            }
            TokenKind::Super => self.parse_super(),
            TokenKind::Import => {
                self.require_plugin("dynamicImport", "import()")?;
                self.bump()?;
                if !self.at(TokenKind::LParen) {
                    return self.unexpected();
                }
                Ok(self.finish_node(NodeKind::Import, start))
            }
            TokenKind::This => {
                self.bump()?;
                Ok(self.finish_node(NodeKind::ThisExpression, start))
            }
            TokenKind::Ident => self.parse_identifier_atom(),
            TokenKind::Num
            | TokenKind::BigInt
            | TokenKind::Str
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => self.parse_literal(),
            TokenKind::NoSubstitutionTemplate | TokenKind::TemplateHead => self.parse_template(false),
            TokenKind::LParen => self.parse_paren_and_distinguish(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Function => {
                self.bump()?;
                let function = self.parse_function(false, false)?;
                Ok(self.finish_node(NodeKind::FunctionExpression(function), start))
            }
            TokenKind::Class => self.parse_class(start, false, false, Vec::new()),
            TokenKind::At => {
                let decorators = self.parse_decorators()?;
                if !self.at(TokenKind::Class) {
                    return self.unexpected();
                }
                self.parse_class(start, false, false, decorators)
            }
            TokenKind::New => self.parse_new(),
            _ => self.unexpected(),
        }
    }

    /// An identifier in expression position, or the start of an async
    /// function or arrow.
    fn parse_identifier_atom(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        if self.is_contextual("async") {
            let next = self.lookahead()?;
            if !next.newline_before {
                match next.kind {
                    TokenKind::Function => {
                        self.bump()?;
                        self.bump()?;
                        let function = self.parse_function(true, false)?;
                        return Ok(self.finish_node(NodeKind::FunctionExpression(function), start));
                    }
                    TokenKind::Ident => {
                        self.bump()?;
                        let param = self.parse_binding_identifier()?;
                        if !self.at(TokenKind::Arrow) || self.token.newline_before {
                            return self.unexpected();
                        }
                        return self.parse_arrow_body(start, vec![param], None, true);
                    }
                    TokenKind::LParen => {
                        if let Some(arrow) = self.try_parse_async_arrow(start)? {
                            return Ok(arrow);
                        }
                    }
                    _ => {}
                }
            }
        }

        let id = self.parse_identifier()?;
        if self.at(TokenKind::Arrow) && !self.token.newline_before {
            self.check_binding_name(id)?;
            return self.parse_arrow_body(start, vec![id], None, false);
        }
        Ok(id)
    }

    /// `( ... )`: arrow parameters when `=>` follows, otherwise a
    /// parenthesized expression.
    fn parse_paren_and_distinguish(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let snapshot = self.snapshot();
        match self.parse_arrow_head() {
            Ok(Some((params, return_type))) => {
                return self.parse_arrow_body(start, params, return_type, false);
            }
            Ok(None) | Err(_) => self.restore(snapshot),
        }

        self.bump()?;
        let expr = self.allow_in(Self::parse_expression)?;
        self.expect(TokenKind::RParen)?;
        self.parenthesized.insert(expr);
        Ok(expr)
    }

    fn parse_new(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;

        if self.at(TokenKind::Dot) {
            let meta = self.ast.identifier("new");
            self.ast.set_span(meta, Span::new(start, self.prev_end));
            self.bump()?;
            let property = self.parse_identifier_name()?;
            if self.ast.identifier_name(property) != Some("target") {
                return Err(self.error_at_node(
                    ErrorCode::E1001,
                    "The only valid meta property for new is new.target",
                    property,
                ));
            }
            if !self.context.in_function() {
                return Err(self.error_at_node(
                    ErrorCode::E1006,
                    "new.target can only be used in functions",
                    property,
                ));
            }
            return Ok(self.finish_node(NodeKind::MetaProperty { meta, property }, start));
        }

        let callee_start = self.start();
        let callee = self.parse_expr_atom()?;
        if matches!(self.ast.kind(callee), NodeKind::Import) {
            return Err(self.error_at_node(ErrorCode::E1001, "Cannot use new with import(...)", callee));
        }
        let callee = self.parse_subscripts(callee, callee_start, true)?;
        let arguments = if self.eat(TokenKind::LParen)? {
            self.parse_call_arguments()?
        } else {
            Vec::new()
        };
        Ok(self.finish_node(NodeKind::NewExpression { callee, arguments }, start))
    }

    fn parse_super(&mut self) -> ParseResult<NodeId> {
        if !self.context.has(ParseContext::ALLOW_SUPER) {
            return Err(self.error_at_token(ErrorCode::E1006, "'super' outside of function or class"));
        }
        let start = self.start();
        self.bump()?;
        match self.kind() {
            TokenKind::LParen if !self.context.has(ParseContext::ALLOW_SUPER_CALL) => Err(self.error_at(
                ErrorCode::E1006,
                "super() is only valid inside a class constructor",
                self.position_of(start),
                Span::new(start, self.prev_end),
            )),
            TokenKind::LParen | TokenKind::Dot | TokenKind::LBracket => {
                Ok(self.finish_node(NodeKind::Super, start))
            }
            _ => self.unexpected(),
        }
    }

    /// String, number, bigint, boolean, null and regex literals.
    ///
    /// With `estree` enabled every literal becomes a single `Literal` kind
    /// carrying its raw text.
    pub(crate) fn parse_literal(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let token = self.bump()?;
        let raw_text = token.raw(self.source);
        let value = match (token.kind, token.value) {
            (TokenKind::Str, TokenValue::Str(text)) => LiteralValue::String(self.ast.intern(&text)),
            (TokenKind::Str, _) => LiteralValue::String(self.ast.intern("")),
            (TokenKind::Num, TokenValue::Number(value)) => LiteralValue::Number(value),
            (TokenKind::BigInt, _) => LiteralValue::BigInt(self.ast.intern(raw_text)),
            (TokenKind::True, _) => LiteralValue::Boolean(true),
            (TokenKind::False, _) => LiteralValue::Boolean(false),
            (TokenKind::Null, _) => LiteralValue::Null,
            (TokenKind::Regex, TokenValue::Regex { pattern, flags }) => LiteralValue::RegExp {
                pattern: self.ast.intern(&pattern),
                flags: self.ast.intern(&flags),
            },
            _ => {
                return Err(self.error_at(
                    ErrorCode::E1002,
                    "Expected a literal",
                    token.start,
                    token.span,
                ))
            }
        };
        let raw = Some(self.ast.intern(raw_text));

        let kind = if self.estree {
            NodeKind::Literal { value, raw }
        } else {
            match value {
                LiteralValue::String(value) => NodeKind::StringLiteral { value, raw },
                LiteralValue::Number(value) => NodeKind::NumericLiteral { value, raw },
                LiteralValue::BigInt(raw) => NodeKind::BigIntLiteral { raw },
                LiteralValue::Boolean(value) => NodeKind::BooleanLiteral { value },
                LiteralValue::Null => NodeKind::NullLiteral,
                LiteralValue::RegExp { pattern, flags } => NodeKind::RegExpLiteral { pattern, flags },
            }
        };
        Ok(self.finish_node(kind, start))
    }

    fn parse_array_literal(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let elements = self.allow_in(|p| {
            let mut elements = Vec::new();
            while !p.eat(TokenKind::RBracket)? {
                if p.at(TokenKind::Comma) {
                    let hole = p.start();
                    p.bump()?;
                    elements.push(p.ast.alloc(NodeKind::Hole, Span::point(hole)));
                    continue;
                }
                let element = if p.at(TokenKind::Ellipsis) {
                    let spread = p.start();
                    p.bump()?;
                    let argument = p.parse_maybe_assign_with(true)?;
                    p.finish_node(NodeKind::SpreadElement { argument }, spread)
                } else {
                    p.parse_maybe_assign_with(true)?
                };
                elements.push(element);
                if !p.at(TokenKind::RBracket) {
                    p.expect(TokenKind::Comma)?;
                }
            }
            ParseResult::Ok(elements)
        })?;
        Ok(self.finish_node(NodeKind::ArrayExpression { elements }, start))
    }

    fn parse_object_literal(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let properties = self.allow_in(|p| {
            let mut properties = Vec::new();
            while !p.eat(TokenKind::RBrace)? {
                properties.push(p.parse_object_member()?);
                if !p.at(TokenKind::RBrace) {
                    p.expect(TokenKind::Comma)?;
                }
            }
            ParseResult::Ok(properties)
        })?;
        Ok(self.finish_node(NodeKind::ObjectExpression { properties }, start))
    }

    fn parse_object_member(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        if self.at(TokenKind::Ellipsis) {
            self.require_plugin("objectRestSpread", "object spread")?;
            self.bump()?;
            let argument = self.parse_maybe_assign_with(true)?;
            return Ok(self.finish_node(NodeKind::SpreadElement { argument }, start));
        }

        let modifiers = self.parse_method_modifiers()?;
        let key_kind = self.kind();
        let (key, computed) = self.parse_property_name()?;

        if modifiers.is_method() || self.at(TokenKind::LParen) {
            let context = self
                .context
                .enter_function(modifiers.is_async, modifiers.is_generator)
                .with(ParseContext::ALLOW_SUPER);
            let function = self.parse_method_function(context, &modifiers, start)?;
            return Ok(self.finish_node(
                NodeKind::ObjectMethod {
                    kind: modifiers.kind,
                    computed,
                    key,
                    function,
                },
                start,
            ));
        }

        if self.eat(TokenKind::Colon)? {
            let value = self.parse_maybe_assign_with(true)?;
            return Ok(self.finish_node(
                NodeKind::ObjectProperty {
                    computed,
                    shorthand: false,
                    key,
                    value,
                },
                start,
            ));
        }

        // Shorthand `{ a }` or `{ a = 1 }`; the latter is only valid once
        // the literal becomes a pattern.
        if computed || key_kind != TokenKind::Ident {
            return self.unexpected();
        }
        self.check_reference_name(key)?;
        let mut value = self.ast.clone_subtree(key);
        if self.at(TokenKind::Eq) {
            if self.shorthand_init.is_none() {
                self.shorthand_init = Some(self.token.start);
            }
            self.bump()?;
            let right = self.parse_maybe_assign()?;
            value = self.finish_node(NodeKind::AssignmentPattern { left: value, right }, start);
        }
        Ok(self.finish_node(
            NodeKind::ObjectProperty {
                computed: false,
                shorthand: true,
                key,
                value,
            },
            start,
        ))
    }

    /// Property key of an object member, class member or object pattern.
    /// Returns the key and whether it was computed.
    pub(crate) fn parse_property_name(&mut self) -> ParseResult<(NodeId, bool)> {
        match self.kind() {
            TokenKind::LBracket => {
                self.bump()?;
                let key = self.allow_in(Self::parse_maybe_assign)?;
                self.expect(TokenKind::RBracket)?;
                Ok((key, true))
            }
            TokenKind::Str | TokenKind::Num => Ok((self.parse_literal()?, false)),
            kind if kind.is_word() => Ok((self.parse_identifier_name()?, false)),
            _ => self.unexpected(),
        }
    }

    /// Leading `async`, `*`, `get` or `set` of a method definition.
    pub(crate) fn parse_method_modifiers(&mut self) -> ParseResult<MethodModifiers> {
        let mut modifiers = MethodModifiers::default();
        if self.is_contextual("async") {
            let next = self.lookahead()?;
            if !next.newline_before && (starts_property_name(next.kind) || next.kind == TokenKind::Star) {
                self.bump()?;
                modifiers.is_async = true;
            }
        }
        if self.at(TokenKind::Star) {
            if modifiers.is_async {
                self.require_plugin("asyncGenerators", "async generators")?;
            }
            self.bump()?;
            modifiers.is_generator = true;
        }
        if !modifiers.is_async && !modifiers.is_generator && (self.is_contextual("get") || self.is_contextual("set")) {
            let next = self.lookahead()?;
            if starts_property_name(next.kind) {
                modifiers.kind = if self.is_contextual("get") {
                    MethodKind::Get
                } else {
                    MethodKind::Set
                };
                self.bump()?;
            }
        }
        Ok(modifiers)
    }

    // Identifiers

    /// Any word, keywords included: property names after `.`, object keys
    /// and module specifier names.
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<NodeId> {
        if !self.kind().is_word() {
            return self.unexpected();
        }
        let start = self.start();
        let name = self.intern_current();
        self.bump()?;
        Ok(self.finish_node(
            NodeKind::Identifier {
                name,
                type_annotation: None,
            },
            start,
        ))
    }

    /// An identifier reference, rejecting reserved words for the current
    /// mode.
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<NodeId> {
        if !self.at(TokenKind::Ident) {
            return self.unexpected();
        }
        self.check_reserved_word()?;
        self.parse_identifier_name()
    }

    /// An identifier that introduces a binding.
    pub fn parse_binding_identifier(&mut self) -> ParseResult<NodeId> {
        let id = self.parse_identifier()?;
        self.check_binding_name(id)?;
        Ok(id)
    }

    fn intern_current(&mut self) -> ember_ir::Name {
        let text = self.current_text().to_owned();
        self.ast.intern(&text)
    }

    fn check_reserved_word(&self) -> ParseResult<()> {
        let word = self.current_text();
        if matches!(self.token.value, TokenValue::Str(_)) && is_reserved_word(word, ember_ir::SourceType::Script) {
            return Err(self.error_at_token(ErrorCode::E1003, format!("Escape sequence in keyword {word}")));
        }
        let message = match word {
            "await" if self.context.in_async() => {
                "Can not use 'await' as identifier inside an async function".to_owned()
            }
            "await" if self.source_type().is_module() => "The keyword 'await' is reserved".to_owned(),
            "yield" if self.context.in_generator() => {
                "Can not use 'yield' as identifier inside a generator".to_owned()
            }
            _ if self.context.is_strict() && is_strict_reserved_word(word, self.source_type()) => {
                format!("The keyword '{word}' is reserved")
            }
            _ => return Ok(()),
        };
        Err(self.error_at_token(ErrorCode::E1003, message))
    }

    /// A shorthand property is both a key and a reference.
    fn check_reference_name(&self, id: NodeId) -> ParseResult<()> {
        let Some(name) = self.ast.identifier_name(id) else {
            return Ok(());
        };
        let reserved = (name == "await" && (self.source_type().is_module() || self.context.in_async()))
            || (name == "yield" && self.context.in_generator())
            || (self.context.is_strict() && is_strict_reserved_word(name, self.source_type()));
        if reserved {
            return Err(self.error_at_node(
                ErrorCode::E1003,
                format!("The keyword '{name}' is reserved"),
                id,
            ));
        }
        Ok(())
    }

    /// `eval` and `arguments` cannot be bound in strict code.
    pub(crate) fn check_binding_name(&self, id: NodeId) -> ParseResult<()> {
        let Some(name) = self.ast.identifier_name(id) else {
            return Ok(());
        };
        if self.context.is_strict() && is_strict_bind_reserved_word(name, self.source_type()) {
            return Err(self.error_at_node(
                ErrorCode::E1003,
                format!("Binding {name} in strict mode"),
                id,
            ));
        }
        Ok(())
    }
}

/// Modifiers parsed ahead of a method key.
#[derive(Clone, Debug)]
pub(crate) struct MethodModifiers {
    pub(crate) is_async: bool,
    pub(crate) is_generator: bool,
    pub(crate) kind: MethodKind,
}

impl Default for MethodModifiers {
    fn default() -> Self {
        MethodModifiers {
            is_async: false,
            is_generator: false,
            kind: MethodKind::Method,
        }
    }
}

impl MethodModifiers {
    /// Modifiers that only a method may carry.
    pub(crate) fn is_method(&self) -> bool {
        self.is_async || self.is_generator || self.kind != MethodKind::Method
    }
}

fn starts_property_name(kind: TokenKind) -> bool {
    kind.is_word() || matches!(kind, TokenKind::Str | TokenKind::Num | TokenKind::LBracket)
}
