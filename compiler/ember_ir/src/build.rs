//! Constructors for synthesized nodes.
//!
//! Transforms use these to author new subtrees. Every node gets
//! [`Span::DUMMY`] and no raw text, so the generator prints it from its
//! value.

use crate::ast::NodeKind;
use crate::{Ast, NodeId, Span};

impl Ast {
    pub fn identifier(&mut self, name: &str) -> NodeId {
        let name = self.intern(name);
        self.alloc(
            NodeKind::Identifier {
                name,
                type_annotation: None,
            },
            Span::DUMMY,
        )
    }

    pub fn string_literal(&mut self, value: &str) -> NodeId {
        let value = self.intern(value);
        self.alloc(NodeKind::StringLiteral { value, raw: None }, Span::DUMMY)
    }

    pub fn numeric_literal(&mut self, value: f64) -> NodeId {
        self.alloc(NodeKind::NumericLiteral { value, raw: None }, Span::DUMMY)
    }

    pub fn boolean_literal(&mut self, value: bool) -> NodeId {
        self.alloc(NodeKind::BooleanLiteral { value }, Span::DUMMY)
    }

    pub fn null_literal(&mut self) -> NodeId {
        self.alloc(NodeKind::NullLiteral, Span::DUMMY)
    }

    /// Prologue directive such as `"use strict"`.
    pub fn directive(&mut self, value: &str) -> NodeId {
        let value = self.intern(value);
        self.alloc(NodeKind::Directive { value, raw: None }, Span::DUMMY)
    }

    pub fn expression_statement(&mut self, expression: NodeId) -> NodeId {
        self.alloc(
            NodeKind::ExpressionStatement {
                expression,
                directive: None,
            },
            Span::DUMMY,
        )
    }

    pub fn call_expression(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::CallExpression { callee, arguments }, Span::DUMMY)
    }

    /// `object.property` with a non-computed identifier property.
    pub fn member_expression(&mut self, object: NodeId, property: &str) -> NodeId {
        let property = self.identifier(property);
        self.alloc(
            NodeKind::MemberExpression {
                object,
                property,
                computed: false,
            },
            Span::DUMMY,
        )
    }
}
