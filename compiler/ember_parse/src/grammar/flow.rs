//! Flow type annotations.
//!
//! Covers the annotation forms used on bindings, parameters, return
//! types and class fields: named types with parameters, nullable, array
//! suffix, unions, intersections, string and number literals, object
//! types and parentheses. Function types and type parameters on
//! declarations are not parsed.

use ember_ir::{NodeId, NodeKind, TokenKind, TokenValue};
use ember_stack::ensure_sufficient_stack;

use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// The active plugin's annotation after a `:`, if a plugin provides
    /// one.
    pub(crate) fn maybe_type_annotation(&mut self) -> ParseResult<Option<NodeId>> {
        if !self.at(TokenKind::Colon) {
            return Ok(None);
        }
        match self.plugins.extensions().type_annotation {
            Some(handler) => handler(self).map(Some),
            None => Ok(None),
        }
    }

    /// `: Type`, returning a `TypeAnnotation` node.
    pub fn parse_flow_type_annotation(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.expect(TokenKind::Colon)?;
        let type_annotation = self.parse_flow_type()?;
        Ok(self.finish_node(NodeKind::TypeAnnotation { type_annotation }, start))
    }

    /// `type Name = Type;`
    pub fn parse_flow_type_alias(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.expect_contextual("type")?;
        let id = self.parse_binding_identifier()?;
        self.expect(TokenKind::Eq)?;
        let right = self.parse_flow_type()?;
        self.semicolon()?;
        Ok(self.finish_node(NodeKind::TypeAlias { id, right }, start))
    }

    fn parse_flow_type(&mut self) -> ParseResult<NodeId> {
        ensure_sufficient_stack(|| self.parse_flow_union())
    }

    fn parse_flow_union(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.eat(TokenKind::Pipe)?;
        let first = self.parse_flow_intersection()?;
        if !self.at(TokenKind::Pipe) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat(TokenKind::Pipe)? {
            types.push(self.parse_flow_intersection()?);
        }
        Ok(self.finish_node(NodeKind::UnionTypeAnnotation { types }, start))
    }

    fn parse_flow_intersection(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.eat(TokenKind::Amp)?;
        let first = self.parse_flow_prefix()?;
        if !self.at(TokenKind::Amp) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat(TokenKind::Amp)? {
            types.push(self.parse_flow_prefix()?);
        }
        Ok(self.finish_node(NodeKind::IntersectionTypeAnnotation { types }, start))
    }

    fn parse_flow_prefix(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        if self.eat(TokenKind::Question)? {
            let type_annotation = ensure_sufficient_stack(|| self.parse_flow_prefix())?;
            return Ok(self.finish_node(NodeKind::NullableTypeAnnotation { type_annotation }, start));
        }
        let mut ty = self.parse_flow_primary()?;
        while self.at(TokenKind::LBracket) && !self.token.newline_before {
            self.bump()?;
            self.expect(TokenKind::RBracket)?;
            ty = self.finish_node(NodeKind::ArrayTypeAnnotation { element_type: ty }, start);
        }
        Ok(ty)
    }

    fn parse_flow_primary(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        match self.kind() {
            TokenKind::LBrace => self.parse_flow_object_type(),
            TokenKind::LParen => {
                self.bump()?;
                let ty = self.parse_flow_type()?;
                self.expect(TokenKind::RParen)?;
                Ok(ty)
            }
            TokenKind::Str => {
                let raw = self.ast.intern(self.token.raw(self.source));
                self.bump()?;
                Ok(self.finish_node(NodeKind::StringLiteralTypeAnnotation { raw }, start))
            }
            TokenKind::Num => {
                let raw = self.ast.intern(self.token.raw(self.source));
                self.bump()?;
                Ok(self.finish_node(NodeKind::NumberLiteralTypeAnnotation { raw }, start))
            }
            TokenKind::Minus => {
                self.bump()?;
                if !self.at(TokenKind::Num) {
                    return self.unexpected();
                }
                let raw = format!("-{}", self.token.raw(self.source));
                let raw = self.ast.intern(&raw);
                self.bump()?;
                Ok(self.finish_node(NodeKind::NumberLiteralTypeAnnotation { raw }, start))
            }
            kind if kind.is_word() => self.parse_flow_generic(),
            _ => self.unexpected(),
        }
    }

    /// `A`, `A.B`, `A<T, U>`.
    fn parse_flow_generic(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let mut name = self.current_text().to_owned();
        self.bump()?;
        while self.at(TokenKind::Dot) {
            self.bump()?;
            if !self.kind().is_word() {
                return self.unexpected();
            }
            name.push('.');
            name.push_str(self.current_text());
            self.bump()?;
        }

        let mut type_parameters = Vec::new();
        if self.eat(TokenKind::Lt)? {
            loop {
                self.rescan_gt();
                if self.eat(TokenKind::Gt)? {
                    break;
                }
                type_parameters.push(self.parse_flow_type()?);
                self.rescan_gt();
                if !self.at(TokenKind::Gt) {
                    self.expect(TokenKind::Comma)?;
                }
            }
        }

        let id = self.ast.intern(&name);
        Ok(self.finish_node(NodeKind::GenericTypeAnnotation { id, type_parameters }, start))
    }

    /// `{ key: T, other?: U }`
    fn parse_flow_object_type(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let mut properties = Vec::new();
        while !self.eat(TokenKind::RBrace)? {
            let property_start = self.start();
            let key = match (&self.token.value, self.kind()) {
                (TokenValue::Str(text), TokenKind::Str) => text.clone(),
                (_, kind) if kind.is_word() => self.current_text().to_owned(),
                _ => return self.unexpected(),
            };
            self.bump()?;
            let optional = self.eat(TokenKind::Question)?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_flow_type()?;
            let key = self.ast.intern(&key);
            properties.push(self.finish_node(
                NodeKind::ObjectTypeProperty { key, optional, value },
                property_start,
            ));
            if !self.at(TokenKind::RBrace) && !self.eat(TokenKind::Comma)? && !self.eat(TokenKind::Semi)? {
                return self.unexpected();
            }
        }
        Ok(self.finish_node(NodeKind::ObjectTypeAnnotation { properties }, start))
    }
}
