//! Flow type annotations.

use ember_ir::{Name, NodeId, NodeKind};

use super::Generator;
use crate::literals::quote_string;
use crate::{CodegenResult, Quotes};

impl Generator<'_> {
    pub(super) fn emit_type_alias(&mut self, id: NodeId, right: NodeId) -> CodegenResult {
        self.printer.word("type");
        self.emit_node(id)?;
        self.emit_operator("=");
        self.emit_type(right)?;
        self.printer.token(";");
        Ok(())
    }

    pub(super) fn emit_type(&mut self, id: NodeId) -> CodegenResult {
        let ast = self.ast;
        match ast.kind(id) {
            NodeKind::GenericTypeAnnotation { id: name, type_parameters } => {
                self.printer.word(self.text(*name));
                if !type_parameters.is_empty() {
                    self.printer.token("<");
                    for (i, &parameter) in type_parameters.iter().enumerate() {
                        if i > 0 {
                            self.printer.token(",");
                            self.printer.space();
                        }
                        self.emit_type(parameter)?;
                    }
                    self.printer.token(">");
                }
                Ok(())
            }
            NodeKind::NullableTypeAnnotation { type_annotation } => {
                self.printer.token("?");
                self.emit_type_operand(*type_annotation, false)
            }
            NodeKind::ArrayTypeAnnotation { element_type } => {
                self.emit_type_operand(*element_type, true)?;
                self.printer.token("[]");
                Ok(())
            }
            NodeKind::UnionTypeAnnotation { types } => self.emit_type_list(types, "|"),
            NodeKind::IntersectionTypeAnnotation { types } => self.emit_type_list(types, "&"),
            NodeKind::StringLiteralTypeAnnotation { raw } | NodeKind::NumberLiteralTypeAnnotation { raw } => {
                self.printer.token(self.text(*raw));
                Ok(())
            }
            NodeKind::ObjectTypeAnnotation { properties } => {
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
                Ok(())
            }
            NodeKind::TypeAnnotation { type_annotation } => self.emit_type(*type_annotation),
            _ => Err(self.malformed(id, "expected a type")),
        }
    }

    /// Operand of a prefix `?` or suffix `[]`. Unions and intersections
    /// always need parentheses here; a nullable only under `[]`.
    fn emit_type_operand(&mut self, id: NodeId, array_element: bool) -> CodegenResult {
        let needs_parens = match self.ast.kind(id) {
            NodeKind::UnionTypeAnnotation { .. } | NodeKind::IntersectionTypeAnnotation { .. } => true,
            NodeKind::NullableTypeAnnotation { .. } => array_element,
            _ => false,
        };
        if needs_parens {
            self.printer.token("(");
            self.emit_type(id)?;
            self.printer.token(")");
            Ok(())
        } else {
            self.emit_type(id)
        }
    }

    fn emit_type_list(&mut self, types: &[NodeId], separator: &str) -> CodegenResult {
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                self.emit_operator(separator);
            }
            // A union inside an intersection, or any nested list of the
            // same kind, was parenthesized in the source.
            let nested = matches!(
                self.ast.kind(ty),
                NodeKind::UnionTypeAnnotation { .. }
            ) || (separator == "&" && matches!(self.ast.kind(ty), NodeKind::IntersectionTypeAnnotation { .. }));
            if nested {
                self.printer.token("(");
                self.emit_type(ty)?;
                self.printer.token(")");
            } else {
                self.emit_type(ty)?;
            }
        }
        Ok(())
    }

    pub(super) fn emit_object_type_property(&mut self, key: Name, optional: bool, value: NodeId) -> CodegenResult {
        let key = self.text(key);
        if is_identifier_name(key) {
            self.printer.word(key);
        } else {
            self.printer.token(&quote_string(key, Quotes::Double));
        }
        if optional {
            self.printer.token("?");
        }
        self.printer.token(":");
        self.printer.space();
        self.emit_type(value)
    }
}

fn is_identifier_name(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
