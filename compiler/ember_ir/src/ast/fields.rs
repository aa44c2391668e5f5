//! Uniform child access over [`NodeKind`].
//!
//! Every generic walk (traversal, subtree cloning, structural comparison,
//! scope crawling) goes through these three tables instead of matching on
//! node kinds itself. A field's index in the returned list is stable for a
//! given variant and is what traversal stores as a node's location.

use smallvec::{smallvec, SmallVec};

use super::{Class, Function, LiteralValue, NodeKind};
use crate::{Name, NodeId};

/// Read-only view of one child field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field<'a> {
    One(NodeId),
    Opt(Option<NodeId>),
    Many(&'a [NodeId]),
}

impl<'a> Field<'a> {
    /// Iterate the node ids stored in this field.
    pub fn ids(self) -> impl Iterator<Item = NodeId> + 'a {
        let (single, many): (Option<NodeId>, &'a [NodeId]) = match self {
            Field::One(id) => (Some(id), &[]),
            Field::Opt(id) => (id, &[]),
            Field::Many(ids) => (None, ids),
        };
        single.into_iter().chain(many.iter().copied())
    }

    pub fn is_list(self) -> bool {
        matches!(self, Field::Many(_))
    }
}

/// Mutable view of one child field.
#[derive(Debug)]
pub enum FieldMut<'a> {
    One(&'a mut NodeId),
    Opt(&'a mut Option<NodeId>),
    Many(&'a mut Vec<NodeId>),
}

impl FieldMut<'_> {
    /// Apply `f` to every id stored in this field.
    pub fn for_each_id(&mut self, mut f: impl FnMut(&mut NodeId)) {
        match self {
            FieldMut::One(id) => f(&mut **id),
            FieldMut::Opt(slot) => {
                if let Some(id) = slot.as_mut() {
                    f(id);
                }
            }
            FieldMut::Many(ids) => {
                for id in ids.iter_mut() {
                    f(id);
                }
            }
        }
    }
}

pub type Fields<'a> = SmallVec<[(&'static str, Field<'a>); 4]>;
pub type FieldsMut<'a> = SmallVec<[(&'static str, FieldMut<'a>); 4]>;

fn function_fields(f: &Function) -> [(&'static str, Field<'_>); 4] {
    [
        ("id", Field::Opt(f.id)),
        ("params", Field::Many(&f.params)),
        ("returnType", Field::Opt(f.return_type)),
        ("body", Field::One(f.body)),
    ]
}

fn function_fields_mut(f: &mut Function) -> [(&'static str, FieldMut<'_>); 4] {
    let Function {
        id,
        params,
        return_type,
        body,
        ..
    } = f;
    [
        ("id", FieldMut::Opt(id)),
        ("params", FieldMut::Many(params)),
        ("returnType", FieldMut::Opt(return_type)),
        ("body", FieldMut::One(body)),
    ]
}

fn class_fields(c: &Class) -> [(&'static str, Field<'_>); 4] {
    [
        ("decorators", Field::Many(&c.decorators)),
        ("id", Field::Opt(c.id)),
        ("superClass", Field::Opt(c.super_class)),
        ("body", Field::One(c.body)),
    ]
}

fn class_fields_mut(c: &mut Class) -> [(&'static str, FieldMut<'_>); 4] {
    let Class {
        decorators,
        id,
        super_class,
        body,
    } = c;
    [
        ("decorators", FieldMut::Many(decorators)),
        ("id", FieldMut::Opt(id)),
        ("superClass", FieldMut::Opt(super_class)),
        ("body", FieldMut::One(body)),
    ]
}

impl NodeKind {
    /// Child fields in source order, with their names.
    pub fn fields(&self) -> Fields<'_> {
        use Field::{Many, One, Opt};
        match self {
            NodeKind::Program {
                directives, body, ..
            }
            | NodeKind::BlockStatement { directives, body } => {
                smallvec![("directives", Many(directives)), ("body", Many(body))]
            }
            NodeKind::ExpressionStatement { expression, .. } => {
                smallvec![("expression", One(*expression))]
            }
            NodeKind::WithStatement { object, body } => {
                smallvec![("object", One(*object)), ("body", One(*body))]
            }
            NodeKind::ReturnStatement { argument } => smallvec![("argument", Opt(*argument))],
            NodeKind::LabeledStatement { label, body } => {
                smallvec![("label", One(*label)), ("body", One(*body))]
            }
            NodeKind::BreakStatement { label } | NodeKind::ContinueStatement { label } => {
                smallvec![("label", Opt(*label))]
            }
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => smallvec![
                ("test", One(*test)),
                ("consequent", One(*consequent)),
                ("alternate", Opt(*alternate)),
            ],
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            } => smallvec![("discriminant", One(*discriminant)), ("cases", Many(cases))],
            NodeKind::SwitchCase { test, consequent } => {
                smallvec![("test", Opt(*test)), ("consequent", Many(consequent))]
            }
            NodeKind::ThrowStatement { argument }
            | NodeKind::SpreadElement { argument }
            | NodeKind::AwaitExpression { argument } => smallvec![("argument", One(*argument))],
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            } => smallvec![
                ("block", One(*block)),
                ("handler", Opt(*handler)),
                ("finalizer", Opt(*finalizer)),
            ],
            NodeKind::CatchClause { param, body } => {
                smallvec![("param", Opt(*param)), ("body", One(*body))]
            }
            NodeKind::WhileStatement { test, body } => {
                smallvec![("test", One(*test)), ("body", One(*body))]
            }
            NodeKind::DoWhileStatement { body, test } => {
                smallvec![("body", One(*body)), ("test", One(*test))]
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => smallvec![
                ("init", Opt(*init)),
                ("test", Opt(*test)),
                ("update", Opt(*update)),
                ("body", One(*body)),
            ],
            NodeKind::ForInStatement { left, right, body }
            | NodeKind::ForOfStatement {
                left, right, body, ..
            } => smallvec![
                ("left", One(*left)),
                ("right", One(*right)),
                ("body", One(*body)),
            ],
            NodeKind::FunctionDeclaration(f) | NodeKind::FunctionExpression(f) => {
                SmallVec::from_iter(function_fields(f))
            }
            NodeKind::VariableDeclaration { declarations, .. } => {
                smallvec![("declarations", Many(declarations))]
            }
            NodeKind::VariableDeclarator { id, init } => {
                smallvec![("id", One(*id)), ("init", Opt(*init))]
            }
            NodeKind::ClassDeclaration(c) | NodeKind::ClassExpression(c) => {
                SmallVec::from_iter(class_fields(c))
            }
            NodeKind::TypeAlias { id, right } => {
                smallvec![("id", One(*id)), ("right", One(*right))]
            }
            NodeKind::ImportDeclaration { specifiers, source } => {
                smallvec![("specifiers", Many(specifiers)), ("source", One(*source))]
            }
            NodeKind::ImportSpecifier { imported, local } => {
                smallvec![("imported", One(*imported)), ("local", One(*local))]
            }
            NodeKind::ImportDefaultSpecifier { local }
            | NodeKind::ImportNamespaceSpecifier { local } => smallvec![("local", One(*local))],
            NodeKind::ExportNamedDeclaration {
                declaration,
                specifiers,
                source,
            } => smallvec![
                ("declaration", Opt(*declaration)),
                ("specifiers", Many(specifiers)),
                ("source", Opt(*source)),
            ],
            NodeKind::ExportSpecifier { local, exported } => {
                smallvec![("local", One(*local)), ("exported", One(*exported))]
            }
            NodeKind::ExportNamespaceSpecifier { exported } => {
                smallvec![("exported", One(*exported))]
            }
            NodeKind::ExportDefaultDeclaration { declaration } => {
                smallvec![("declaration", One(*declaration))]
            }
            NodeKind::ExportAllDeclaration { source } => smallvec![("source", One(*source))],
            NodeKind::ClassBody { body } => smallvec![("body", Many(body))],
            NodeKind::ClassMethod {
                decorators,
                key,
                function,
                ..
            } => {
                let mut fields: Fields<'_> =
                    smallvec![("decorators", Many(decorators)), ("key", One(*key))];
                fields.extend(function_fields(function));
                fields
            }
            NodeKind::ClassProperty {
                decorators,
                key,
                type_annotation,
                value,
                ..
            } => smallvec![
                ("decorators", Many(decorators)),
                ("key", One(*key)),
                ("typeAnnotation", Opt(*type_annotation)),
                ("value", Opt(*value)),
            ],
            NodeKind::Decorator { expression } => smallvec![("expression", One(*expression))],
            NodeKind::Identifier {
                type_annotation, ..
            } => smallvec![("typeAnnotation", Opt(*type_annotation))],
            NodeKind::TemplateLiteral {
                quasis,
                expressions,
            } => smallvec![("quasis", Many(quasis)), ("expressions", Many(expressions))],
            NodeKind::TaggedTemplateExpression { tag, quasi } => {
                smallvec![("tag", One(*tag)), ("quasi", One(*quasi))]
            }
            NodeKind::ArrayExpression { elements } => smallvec![("elements", Many(elements))],
            NodeKind::ObjectExpression { properties } => {
                smallvec![("properties", Many(properties))]
            }
            NodeKind::ObjectProperty { key, value, .. } => {
                smallvec![("key", One(*key)), ("value", One(*value))]
            }
            NodeKind::ObjectMethod { key, function, .. } => {
                let mut fields: Fields<'_> = smallvec![("key", One(*key))];
                fields.extend(function_fields(function));
                fields
            }
            NodeKind::ArrowFunctionExpression {
                params,
                return_type,
                body,
                ..
            } => smallvec![
                ("params", Many(params)),
                ("returnType", Opt(*return_type)),
                ("body", One(*body)),
            ],
            NodeKind::UnaryExpression { argument, .. }
            | NodeKind::UpdateExpression { argument, .. } => {
                smallvec![("argument", One(*argument))]
            }
            NodeKind::BinaryExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. }
            | NodeKind::AssignmentExpression { left, right, .. }
            | NodeKind::AssignmentPattern { left, right } => {
                smallvec![("left", One(*left)), ("right", One(*right))]
            }
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => smallvec![
                ("test", One(*test)),
                ("consequent", One(*consequent)),
                ("alternate", One(*alternate)),
            ],
            NodeKind::SequenceExpression { expressions } => {
                smallvec![("expressions", Many(expressions))]
            }
            NodeKind::CallExpression { callee, arguments }
            | NodeKind::NewExpression { callee, arguments } => {
                smallvec![("callee", One(*callee)), ("arguments", Many(arguments))]
            }
            NodeKind::MemberExpression {
                object, property, ..
            } => smallvec![("object", One(*object)), ("property", One(*property))],
            NodeKind::BindExpression { object, callee } => {
                smallvec![("object", Opt(*object)), ("callee", One(*callee))]
            }
            NodeKind::YieldExpression { argument, .. } => smallvec![("argument", Opt(*argument))],
            NodeKind::MetaProperty { meta, property } => {
                smallvec![("meta", One(*meta)), ("property", One(*property))]
            }
            NodeKind::DoExpression { body } => smallvec![("body", One(*body))],
            NodeKind::ObjectPattern {
                properties,
                type_annotation,
            } => smallvec![
                ("properties", Many(properties)),
                ("typeAnnotation", Opt(*type_annotation)),
            ],
            NodeKind::ArrayPattern {
                elements,
                type_annotation,
            } => smallvec![
                ("elements", Many(elements)),
                ("typeAnnotation", Opt(*type_annotation)),
            ],
            NodeKind::RestElement {
                argument,
                type_annotation,
            } => smallvec![
                ("argument", One(*argument)),
                ("typeAnnotation", Opt(*type_annotation)),
            ],
            NodeKind::TypeAnnotation { type_annotation }
            | NodeKind::NullableTypeAnnotation { type_annotation } => {
                smallvec![("typeAnnotation", One(*type_annotation))]
            }
            NodeKind::GenericTypeAnnotation {
                type_parameters, ..
            } => smallvec![("typeParameters", Many(type_parameters))],
            NodeKind::ArrayTypeAnnotation { element_type } => {
                smallvec![("elementType", One(*element_type))]
            }
            NodeKind::UnionTypeAnnotation { types }
            | NodeKind::IntersectionTypeAnnotation { types } => smallvec![("types", Many(types))],
            NodeKind::ObjectTypeAnnotation { properties } => {
                smallvec![("properties", Many(properties))]
            }
            NodeKind::ObjectTypeProperty { value, .. } => smallvec![("value", One(*value))],
            NodeKind::Directive { .. }
            | NodeKind::EmptyStatement
            | NodeKind::DebuggerStatement
            | NodeKind::StringLiteral { .. }
            | NodeKind::NumericLiteral { .. }
            | NodeKind::BigIntLiteral { .. }
            | NodeKind::BooleanLiteral { .. }
            | NodeKind::NullLiteral
            | NodeKind::RegExpLiteral { .. }
            | NodeKind::Literal { .. }
            | NodeKind::TemplateElement { .. }
            | NodeKind::ThisExpression
            | NodeKind::Super
            | NodeKind::Import
            | NodeKind::Hole
            | NodeKind::StringLiteralTypeAnnotation { .. }
            | NodeKind::NumberLiteralTypeAnnotation { .. } => SmallVec::new(),
        }
    }

    /// Mutable child fields, index-aligned with [`NodeKind::fields`].
    pub fn fields_mut(&mut self) -> FieldsMut<'_> {
        use FieldMut::{Many, One, Opt};
        match self {
            NodeKind::Program {
                directives, body, ..
            }
            | NodeKind::BlockStatement { directives, body } => {
                smallvec![("directives", Many(directives)), ("body", Many(body))]
            }
            NodeKind::ExpressionStatement { expression, .. } => {
                smallvec![("expression", One(expression))]
            }
            NodeKind::WithStatement { object, body } => {
                smallvec![("object", One(object)), ("body", One(body))]
            }
            NodeKind::ReturnStatement { argument } => smallvec![("argument", Opt(argument))],
            NodeKind::LabeledStatement { label, body } => {
                smallvec![("label", One(label)), ("body", One(body))]
            }
            NodeKind::BreakStatement { label } | NodeKind::ContinueStatement { label } => {
                smallvec![("label", Opt(label))]
            }
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => smallvec![
                ("test", One(test)),
                ("consequent", One(consequent)),
                ("alternate", Opt(alternate)),
            ],
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            } => smallvec![("discriminant", One(discriminant)), ("cases", Many(cases))],
            NodeKind::SwitchCase { test, consequent } => {
                smallvec![("test", Opt(test)), ("consequent", Many(consequent))]
            }
            NodeKind::ThrowStatement { argument }
            | NodeKind::SpreadElement { argument }
            | NodeKind::AwaitExpression { argument } => smallvec![("argument", One(argument))],
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            } => smallvec![
                ("block", One(block)),
                ("handler", Opt(handler)),
                ("finalizer", Opt(finalizer)),
            ],
            NodeKind::CatchClause { param, body } => {
                smallvec![("param", Opt(param)), ("body", One(body))]
            }
            NodeKind::WhileStatement { test, body } => {
                smallvec![("test", One(test)), ("body", One(body))]
            }
            NodeKind::DoWhileStatement { body, test } => {
                smallvec![("body", One(body)), ("test", One(test))]
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => smallvec![
                ("init", Opt(init)),
                ("test", Opt(test)),
                ("update", Opt(update)),
                ("body", One(body)),
            ],
            NodeKind::ForInStatement { left, right, body }
            | NodeKind::ForOfStatement {
                left, right, body, ..
            } => smallvec![
                ("left", One(left)),
                ("right", One(right)),
                ("body", One(body)),
            ],
            NodeKind::FunctionDeclaration(f) | NodeKind::FunctionExpression(f) => {
                SmallVec::from_iter(function_fields_mut(f))
            }
            NodeKind::VariableDeclaration { declarations, .. } => {
                smallvec![("declarations", Many(declarations))]
            }
            NodeKind::VariableDeclarator { id, init } => {
                smallvec![("id", One(id)), ("init", Opt(init))]
            }
            NodeKind::ClassDeclaration(c) | NodeKind::ClassExpression(c) => {
                SmallVec::from_iter(class_fields_mut(c))
            }
            NodeKind::TypeAlias { id, right } => {
                smallvec![("id", One(id)), ("right", One(right))]
            }
            NodeKind::ImportDeclaration { specifiers, source } => {
                smallvec![("specifiers", Many(specifiers)), ("source", One(source))]
            }
            NodeKind::ImportSpecifier { imported, local } => {
                smallvec![("imported", One(imported)), ("local", One(local))]
            }
            NodeKind::ImportDefaultSpecifier { local }
            | NodeKind::ImportNamespaceSpecifier { local } => smallvec![("local", One(local))],
            NodeKind::ExportNamedDeclaration {
                declaration,
                specifiers,
                source,
            } => smallvec![
                ("declaration", Opt(declaration)),
                ("specifiers", Many(specifiers)),
                ("source", Opt(source)),
            ],
            NodeKind::ExportSpecifier { local, exported } => {
                smallvec![("local", One(local)), ("exported", One(exported))]
            }
            NodeKind::ExportNamespaceSpecifier { exported } => {
                smallvec![("exported", One(exported))]
            }
            NodeKind::ExportDefaultDeclaration { declaration } => {
                smallvec![("declaration", One(declaration))]
            }
            NodeKind::ExportAllDeclaration { source } => smallvec![("source", One(source))],
            NodeKind::ClassBody { body } => smallvec![("body", Many(body))],
            NodeKind::ClassMethod {
                decorators,
                key,
                function,
                ..
            } => {
                let mut fields: FieldsMut<'_> =
                    smallvec![("decorators", Many(decorators)), ("key", One(key))];
                fields.extend(function_fields_mut(function));
                fields
            }
            NodeKind::ClassProperty {
                decorators,
                key,
                type_annotation,
                value,
                ..
            } => smallvec![
                ("decorators", Many(decorators)),
                ("key", One(key)),
                ("typeAnnotation", Opt(type_annotation)),
                ("value", Opt(value)),
            ],
            NodeKind::Decorator { expression } => smallvec![("expression", One(expression))],
            NodeKind::Identifier {
                type_annotation, ..
            } => smallvec![("typeAnnotation", Opt(type_annotation))],
            NodeKind::TemplateLiteral {
                quasis,
                expressions,
            } => smallvec![("quasis", Many(quasis)), ("expressions", Many(expressions))],
            NodeKind::TaggedTemplateExpression { tag, quasi } => {
                smallvec![("tag", One(tag)), ("quasi", One(quasi))]
            }
            NodeKind::ArrayExpression { elements } => smallvec![("elements", Many(elements))],
            NodeKind::ObjectExpression { properties } => {
                smallvec![("properties", Many(properties))]
            }
            NodeKind::ObjectProperty { key, value, .. } => {
                smallvec![("key", One(key)), ("value", One(value))]
            }
            NodeKind::ObjectMethod { key, function, .. } => {
                let mut fields: FieldsMut<'_> = smallvec![("key", One(key))];
                fields.extend(function_fields_mut(function));
                fields
            }
            NodeKind::ArrowFunctionExpression {
                params,
                return_type,
                body,
                ..
            } => smallvec![
                ("params", Many(params)),
                ("returnType", Opt(return_type)),
                ("body", One(body)),
            ],
            NodeKind::UnaryExpression { argument, .. }
            | NodeKind::UpdateExpression { argument, .. } => {
                smallvec![("argument", One(argument))]
            }
            NodeKind::BinaryExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. }
            | NodeKind::AssignmentExpression { left, right, .. }
            | NodeKind::AssignmentPattern { left, right } => {
                smallvec![("left", One(left)), ("right", One(right))]
            }
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => smallvec![
                ("test", One(test)),
                ("consequent", One(consequent)),
                ("alternate", One(alternate)),
            ],
            NodeKind::SequenceExpression { expressions } => {
                smallvec![("expressions", Many(expressions))]
            }
            NodeKind::CallExpression { callee, arguments }
            | NodeKind::NewExpression { callee, arguments } => {
                smallvec![("callee", One(callee)), ("arguments", Many(arguments))]
            }
            NodeKind::MemberExpression {
                object, property, ..
            } => smallvec![("object", One(object)), ("property", One(property))],
            NodeKind::BindExpression { object, callee } => {
                smallvec![("object", Opt(object)), ("callee", One(callee))]
            }
            NodeKind::YieldExpression { argument, .. } => smallvec![("argument", Opt(argument))],
            NodeKind::MetaProperty { meta, property } => {
                smallvec![("meta", One(meta)), ("property", One(property))]
            }
            NodeKind::DoExpression { body } => smallvec![("body", One(body))],
            NodeKind::ObjectPattern {
                properties,
                type_annotation,
            } => smallvec![
                ("properties", Many(properties)),
                ("typeAnnotation", Opt(type_annotation)),
            ],
            NodeKind::ArrayPattern {
                elements,
                type_annotation,
            } => smallvec![
                ("elements", Many(elements)),
                ("typeAnnotation", Opt(type_annotation)),
            ],
            NodeKind::RestElement {
                argument,
                type_annotation,
            } => smallvec![
                ("argument", One(argument)),
                ("typeAnnotation", Opt(type_annotation)),
            ],
            NodeKind::TypeAnnotation { type_annotation }
            | NodeKind::NullableTypeAnnotation { type_annotation } => {
                smallvec![("typeAnnotation", One(type_annotation))]
            }
            NodeKind::GenericTypeAnnotation {
                type_parameters, ..
            } => smallvec![("typeParameters", Many(type_parameters))],
            NodeKind::ArrayTypeAnnotation { element_type } => {
                smallvec![("elementType", One(element_type))]
            }
            NodeKind::UnionTypeAnnotation { types }
            | NodeKind::IntersectionTypeAnnotation { types } => smallvec![("types", Many(types))],
            NodeKind::ObjectTypeAnnotation { properties } => {
                smallvec![("properties", Many(properties))]
            }
            NodeKind::ObjectTypeProperty { value, .. } => smallvec![("value", One(value))],
            NodeKind::Directive { .. }
            | NodeKind::EmptyStatement
            | NodeKind::DebuggerStatement
            | NodeKind::StringLiteral { .. }
            | NodeKind::NumericLiteral { .. }
            | NodeKind::BigIntLiteral { .. }
            | NodeKind::BooleanLiteral { .. }
            | NodeKind::NullLiteral
            | NodeKind::RegExpLiteral { .. }
            | NodeKind::Literal { .. }
            | NodeKind::TemplateElement { .. }
            | NodeKind::ThisExpression
            | NodeKind::Super
            | NodeKind::Import
            | NodeKind::Hole
            | NodeKind::StringLiteralTypeAnnotation { .. }
            | NodeKind::NumberLiteralTypeAnnotation { .. } => SmallVec::new(),
        }
    }

    /// Mutable view of the field at `index` (see [`NodeKind::fields`]).
    pub fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        self.fields_mut().into_iter().nth(index).map(|(_, f)| f)
    }

    /// Index of the field called `name`, if this kind has one.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields().iter().position(|(n, _)| *n == name)
    }

    /// All direct children, in source order.
    pub fn children(&self) -> SmallVec<[NodeId; 8]> {
        self.fields()
            .into_iter()
            .flat_map(|(_, field)| field.ids())
            .collect()
    }

    /// Interned attributes that are not children.
    ///
    /// Used to re-home a node into another interner.
    pub fn names_mut(&mut self) -> SmallVec<[&mut Name; 2]> {
        match self {
            NodeKind::Program { interpreter, .. } => interpreter.iter_mut().collect(),
            NodeKind::Directive { value, raw } | NodeKind::StringLiteral { value, raw } => {
                let mut names: SmallVec<[&mut Name; 2]> = smallvec![value];
                names.extend(raw.iter_mut());
                names
            }
            NodeKind::ExpressionStatement { directive, .. } => directive.iter_mut().collect(),
            NodeKind::Identifier { name, .. } => smallvec![name],
            NodeKind::NumericLiteral { raw, .. } => raw.iter_mut().collect(),
            NodeKind::BigIntLiteral { raw }
            | NodeKind::StringLiteralTypeAnnotation { raw }
            | NodeKind::NumberLiteralTypeAnnotation { raw } => smallvec![raw],
            NodeKind::RegExpLiteral { pattern, flags } => smallvec![pattern, flags],
            NodeKind::Literal { value, raw } => {
                let mut names: SmallVec<[&mut Name; 2]> = match value {
                    LiteralValue::String(n) | LiteralValue::BigInt(n) => smallvec![n],
                    LiteralValue::RegExp { pattern, flags } => smallvec![pattern, flags],
                    LiteralValue::Number(_) | LiteralValue::Boolean(_) | LiteralValue::Null => {
                        SmallVec::new()
                    }
                };
                names.extend(raw.iter_mut());
                names
            }
            NodeKind::TemplateElement { raw, cooked, .. } => {
                let mut names: SmallVec<[&mut Name; 2]> = smallvec![raw];
                names.extend(cooked.iter_mut());
                names
            }
            NodeKind::GenericTypeAnnotation { id, .. } => smallvec![id],
            NodeKind::ObjectTypeProperty { key, .. } => smallvec![key],
            _ => SmallVec::new(),
        }
    }
}
