//! Classes, class members and decorators.

use ember_diagnostic::ErrorCode;
use ember_ir::{Class, MethodKind, NodeId, NodeKind, TokenKind};

use crate::context::ParseContext;
use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// Class declaration or expression at `class`. Class code is always
    /// strict.
    pub(crate) fn parse_class(
        &mut self,
        start: u32,
        is_statement: bool,
        require_id: bool,
        decorators: Vec<NodeId>,
    ) -> ParseResult<NodeId> {
        self.expect(TokenKind::Class)?;
        let context = self.context.with(ParseContext::STRICT);
        let (id, super_class, body) = self.with_context(context, |p| {
            let id = if p.at(TokenKind::Ident) {
                Some(p.parse_binding_identifier()?)
            } else if require_id {
                return p.unexpected();
            } else {
                None
            };
            let super_class = if p.eat(TokenKind::Extends)? {
                Some(p.parse_expr_subscripts()?)
            } else {
                None
            };
            let body = p.parse_class_body(super_class.is_some())?;
            Ok((id, super_class, body))
        })?;

        let class = Class {
            decorators,
            id,
            super_class,
            body,
        };
        let kind = if is_statement {
            NodeKind::ClassDeclaration(class)
        } else {
            NodeKind::ClassExpression(class)
        };
        Ok(self.finish_node(kind, start))
    }

    fn parse_class_body(&mut self, has_super: bool) -> ParseResult<NodeId> {
        let start = self.start();
        self.expect(TokenKind::LBrace)?;
        let context = self.context.with(ParseContext::IN_CLASS);
        let body = self.with_context(context, |p| {
            let mut body = Vec::new();
            let mut decorators = Vec::new();
            let mut has_constructor = false;
            while !p.eat(TokenKind::RBrace)? {
                if p.eat(TokenKind::Semi)? {
                    continue;
                }
                if p.at(TokenKind::At) {
                    decorators.extend(p.parse_decorators()?);
                    continue;
                }
                let member = p.parse_class_member(std::mem::take(&mut decorators), has_super, &mut has_constructor)?;
                body.push(member);
            }
            if let Some(&last) = decorators.last() {
                return Err(p.error_at_node(
                    ErrorCode::E1001,
                    "You have trailing decorators with no method",
                    last,
                ));
            }
            Ok(body)
        })?;
        Ok(self.finish_node(NodeKind::ClassBody { body }, start))
    }

    fn parse_class_member(
        &mut self,
        decorators: Vec<NodeId>,
        has_super: bool,
        has_constructor: &mut bool,
    ) -> ParseResult<NodeId> {
        let start = self.start();
        let mut is_static = false;
        if self.is_contextual("static") {
            let next = self.lookahead()?;
            if !matches!(
                next.kind,
                TokenKind::LParen | TokenKind::Eq | TokenKind::Semi | TokenKind::Colon | TokenKind::RBrace
            ) {
                self.bump()?;
                is_static = true;
            }
        }

        let mut modifiers = self.parse_method_modifiers()?;
        let key_start = self.start();
        let (key, computed) = self.parse_property_name()?;
        let named = |p: &Self, name: &str| !computed && p.property_key_is(key, name);

        if modifiers.is_method() || self.at(TokenKind::LParen) {
            let is_constructor = !is_static && named(self, "constructor");
            if is_constructor {
                let message = if modifiers.kind != MethodKind::Method {
                    Some("Constructor can't have get/set modifier")
                } else if modifiers.is_generator {
                    Some("Constructor can't be a generator")
                } else if modifiers.is_async {
                    Some("Constructor can't be an async function")
                } else if *has_constructor {
                    Some("Duplicate constructor in the same class")
                } else {
                    None
                };
                if let Some(message) = message {
                    return Err(self.error_at_node(ErrorCode::E1001, message, key));
                }
                *has_constructor = true;
                modifiers.kind = MethodKind::Constructor;
            }
            if is_static && named(self, "prototype") {
                return Err(self.error_at_node(
                    ErrorCode::E1001,
                    "Classes may not have static property named prototype",
                    key,
                ));
            }

            let context = self
                .context
                .enter_function(modifiers.is_async, modifiers.is_generator)
                .with(ParseContext::ALLOW_SUPER)
                .set(ParseContext::ALLOW_SUPER_CALL, is_constructor && has_super);
            let function = self.parse_method_function(context, &modifiers, key_start)?;
            return Ok(self.finish_node(
                NodeKind::ClassMethod {
                    decorators,
                    is_static,
                    kind: modifiers.kind,
                    computed,
                    key,
                    function,
                },
                start,
            ));
        }

        self.require_plugin("classProperties", "class properties")?;
        if named(self, "constructor") {
            return Err(self.error_at_node(
                ErrorCode::E1001,
                "Classes may not have a field named 'constructor'",
                key,
            ));
        }
        let type_annotation = self.maybe_type_annotation()?;
        let value = if self.eat(TokenKind::Eq)? {
            let context = self
                .context
                .enter_function(false, false)
                .with(ParseContext::ALLOW_SUPER);
            Some(self.with_context(context, Self::parse_maybe_assign)?)
        } else {
            None
        };
        self.semicolon()?;
        Ok(self.finish_node(
            NodeKind::ClassProperty {
                decorators,
                is_static,
                computed,
                key,
                type_annotation,
                value,
            },
            start,
        ))
    }

    /// A non-computed key spelled as `name`, as identifier or string.
    fn property_key_is(&self, key: NodeId, name: &str) -> bool {
        match self.ast.kind(key) {
            NodeKind::Identifier { name: key, .. } | NodeKind::StringLiteral { value: key, .. } => {
                self.ast.name(*key) == name
            }
            _ => false,
        }
    }

    /// One or more `@expression` decorators.
    pub(crate) fn parse_decorators(&mut self) -> ParseResult<Vec<NodeId>> {
        let mut decorators = Vec::new();
        while self.at(TokenKind::At) {
            self.require_plugin("decorators", "decorators")?;
            let start = self.start();
            self.bump()?;
            let expression = self.parse_expr_subscripts()?;
            decorators.push(self.finish_node(NodeKind::Decorator { expression }, start));
        }
        Ok(decorators)
    }
}
