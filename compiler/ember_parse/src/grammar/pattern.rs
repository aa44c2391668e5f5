//! Binding patterns and expression-to-pattern conversion.
//!
//! Declarations and parameters parse patterns directly. Assignment
//! targets are parsed as expressions first and converted in place by
//! [`Parser::to_assignable`] once the `=` shows up, keeping node ids.

use ember_diagnostic::ErrorCode;
use ember_ir::{NodeId, NodeKind, Span, TokenKind};
use ember_lexer::is_strict_bind_reserved_word;
use ember_stack::ensure_sufficient_stack;

use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// Identifier, array pattern or object pattern.
    pub(crate) fn parse_binding_atom(&mut self) -> ParseResult<NodeId> {
        match self.kind() {
            TokenKind::LBracket => self.parse_array_pattern(),
            TokenKind::LBrace => self.parse_object_pattern(),
            TokenKind::Ident => self.parse_binding_identifier(),
            _ => self.unexpected(),
        }
    }

    /// A binding atom with an optional annotation and default value.
    pub(crate) fn parse_binding_element(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let left = self.parse_binding_atom()?;
        self.attach_type_annotation(left)?;
        if !self.eat(TokenKind::Eq)? {
            return Ok(left);
        }
        let right = self.allow_in(Self::parse_maybe_assign)?;
        Ok(self.finish_node(NodeKind::AssignmentPattern { left, right }, start))
    }

    /// Comma-separated binding elements up to `close`, which is left
    /// unconsumed. A rest element must come last.
    pub(crate) fn parse_binding_list(&mut self, close: TokenKind) -> ParseResult<Vec<NodeId>> {
        let mut items = Vec::new();
        while !self.at(close) {
            if self.at(TokenKind::Ellipsis) {
                items.push(self.parse_rest_binding(close)?);
                break;
            }
            items.push(self.parse_binding_element()?);
            if !self.at(close) {
                self.expect(TokenKind::Comma)?;
            }
        }
        Ok(items)
    }

    fn parse_rest_binding(&mut self, close: TokenKind) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let argument = self.parse_binding_atom()?;
        let rest = self.finish_node(
            NodeKind::RestElement {
                argument,
                type_annotation: None,
            },
            start,
        );
        self.attach_type_annotation(rest)?;
        if !self.at(close) {
            return Err(self.error_at_token(ErrorCode::E1001, "Rest element must be last element"));
        }
        Ok(rest)
    }

    fn parse_array_pattern(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let mut elements = Vec::new();
        loop {
            match self.kind() {
                TokenKind::RBracket => break,
                TokenKind::Comma => {
                    let hole = self.start();
                    self.bump()?;
                    elements.push(self.ast.alloc(NodeKind::Hole, Span::point(hole)));
                    continue;
                }
                TokenKind::Ellipsis => {
                    elements.push(self.parse_rest_binding(TokenKind::RBracket)?);
                    break;
                }
                _ => elements.push(self.parse_binding_element()?),
            }
            if !self.at(TokenKind::RBracket) {
                self.expect(TokenKind::Comma)?;
            }
        }
        self.expect(TokenKind::RBracket)?;
        Ok(self.finish_node(
            NodeKind::ArrayPattern {
                elements,
                type_annotation: None,
            },
            start,
        ))
    }

    fn parse_object_pattern(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let mut properties = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.at(TokenKind::Ellipsis) {
                self.require_plugin("objectRestSpread", "object rest")?;
                let rest_start = self.start();
                self.bump()?;
                let argument = self.parse_binding_identifier()?;
                properties.push(self.finish_node(
                    NodeKind::RestElement {
                        argument,
                        type_annotation: None,
                    },
                    rest_start,
                ));
                if !self.at(TokenKind::RBrace) {
                    return Err(self.error_at_token(ErrorCode::E1001, "Rest element must be last element"));
                }
                break;
            }
            properties.push(self.parse_object_pattern_property()?);
            if !self.at(TokenKind::RBrace) {
                self.expect(TokenKind::Comma)?;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(self.finish_node(
            NodeKind::ObjectPattern {
                properties,
                type_annotation: None,
            },
            start,
        ))
    }

    fn parse_object_pattern_property(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let key_kind = self.kind();
        let key_token = self.token.clone();
        let (key, computed) = self.parse_property_name()?;

        if self.eat(TokenKind::Colon)? {
            let value = self.parse_binding_element()?;
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

        if computed || key_kind != TokenKind::Ident {
            return Err(self.error_at(ErrorCode::E1001, "Unexpected token", key_token.start, key_token.span));
        }
        let mut value = self.ast.clone_subtree(key);
        self.check_binding_name(value)?;
        if self.eat(TokenKind::Eq)? {
            let right = self.allow_in(Self::parse_maybe_assign)?;
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

    /// Attach a Flow annotation, if one follows, to a binding node.
    pub(crate) fn attach_type_annotation(&mut self, target: NodeId) -> ParseResult<()> {
        let Some(annotation) = self.maybe_type_annotation()? else {
            return Ok(());
        };
        if let Some(
            NodeKind::Identifier { type_annotation, .. }
            | NodeKind::ObjectPattern { type_annotation, .. }
            | NodeKind::ArrayPattern { type_annotation, .. }
            | NodeKind::RestElement { type_annotation, .. },
        ) = self.ast.kind_mut(target)
        {
            *type_annotation = Some(annotation);
        }
        let span = self.ast.span(target).merge(self.ast.span(annotation));
        self.ast.set_span(target, span);
        Ok(())
    }

    /// Convert an expression parsed ahead of `=` into an assignment
    /// pattern, in place.
    pub(crate) fn to_assignable(&mut self, node: NodeId) -> ParseResult<()> {
        ensure_sufficient_stack(|| self.to_assignable_inner(node))
    }

    fn to_assignable_inner(&mut self, node: NodeId) -> ParseResult<()> {
        let parenthesized = self.is_parenthesized(node);
        match self.ast.kind(node).clone() {
            NodeKind::Identifier { name, .. } => {
                let name = self.ast.name(name);
                if self.context.is_strict() && is_strict_bind_reserved_word(name, self.source_type()) {
                    return Err(self.error_at_node(
                        ErrorCode::E1003,
                        format!("Assigning to '{name}' in strict mode"),
                        node,
                    ));
                }
                Ok(())
            }
            NodeKind::MemberExpression { .. } => Ok(()),
            NodeKind::ObjectPattern { .. }
            | NodeKind::ArrayPattern { .. }
            | NodeKind::AssignmentPattern { .. }
            | NodeKind::RestElement { .. }
                if !parenthesized =>
            {
                Ok(())
            }
            NodeKind::ObjectExpression { properties } if !parenthesized => {
                let last = properties.len().saturating_sub(1);
                for (i, &property) in properties.iter().enumerate() {
                    match self.ast.kind(property).clone() {
                        NodeKind::ObjectProperty { value, .. } => self.to_assignable(value)?,
                        NodeKind::SpreadElement { argument } => {
                            self.spread_to_rest(property, argument, i == last)?;
                        }
                        _ => {
                            return Err(self.error_at_node(
                                ErrorCode::E1004,
                                "Object pattern can't contain getter or setter",
                                property,
                            ))
                        }
                    }
                }
                self.ast.replace_kind(
                    node,
                    NodeKind::ObjectPattern {
                        properties,
                        type_annotation: None,
                    },
                );
                Ok(())
            }
            NodeKind::ArrayExpression { elements } if !parenthesized => {
                let last = elements.len().saturating_sub(1);
                for (i, &element) in elements.iter().enumerate() {
                    match self.ast.kind(element).clone() {
                        NodeKind::Hole => {}
                        NodeKind::SpreadElement { argument } => {
                            self.spread_to_rest(element, argument, i == last)?;
                        }
                        _ => self.to_assignable(element)?,
                    }
                }
                self.ast.replace_kind(
                    node,
                    NodeKind::ArrayPattern {
                        elements,
                        type_annotation: None,
                    },
                );
                Ok(())
            }
            NodeKind::AssignmentExpression {
                operator: ember_ir::AssignOp::Assign,
                left,
                right,
            } if !parenthesized => {
                self.ast.replace_kind(node, NodeKind::AssignmentPattern { left, right });
                Ok(())
            }
            _ => Err(self.error_at_node(
                ErrorCode::E1004,
                "Invalid left-hand side in assignment expression",
                node,
            )),
        }
    }

    fn spread_to_rest(&mut self, node: NodeId, argument: NodeId, is_last: bool) -> ParseResult<()> {
        if !is_last {
            return Err(self.error_at_node(
                ErrorCode::E1004,
                "The rest element has to be the last element when destructuring",
                node,
            ));
        }
        self.to_assignable(argument)?;
        self.ast.replace_kind(
            node,
            NodeKind::RestElement {
                argument,
                type_annotation: None,
            },
        );
        Ok(())
    }

    /// Targets of update and compound assignment: identifiers and member
    /// expressions only.
    pub(crate) fn check_simple_target(&self, node: NodeId, what: &str) -> ParseResult<()> {
        match self.ast.kind(node) {
            NodeKind::Identifier { name, .. } => {
                let name = self.ast.name(*name);
                if self.context.is_strict() && is_strict_bind_reserved_word(name, self.source_type()) {
                    return Err(self.error_at_node(
                        ErrorCode::E1003,
                        format!("Assigning to '{name}' in strict mode"),
                        node,
                    ));
                }
                Ok(())
            }
            NodeKind::MemberExpression { .. } => Ok(()),
            _ => Err(self.error_at_node(
                ErrorCode::E1004,
                format!("Invalid left-hand side in {what}"),
                node,
            )),
        }
    }

    /// Identifier nodes a pattern binds, in source order.
    pub(crate) fn bound_identifiers(&self, pattern: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![pattern];
        while let Some(id) = stack.pop() {
            match self.ast.kind(id) {
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
}
