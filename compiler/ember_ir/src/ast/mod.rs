//! AST node kinds.
//!
//! The tree is flat: every child is a [`NodeId`] into the owning
//! [`Ast`](crate::Ast). [`NodeKind`] is a closed sum type over every node
//! shape the parser can produce, so traversal, analysis and generation all
//! match on it exhaustively. [`NodeType`] is the fieldless discriminant
//! used to key visitor handlers.
//!
//! Field order inside each variant follows source order; traversal visits
//! children in the order [`NodeKind::fields`] returns them.

mod fields;
mod operators;

pub use fields::{Field, FieldMut};
pub use operators::{
    AssignOp, BinaryOp, LogicalOp, MethodKind, SourceType, UnaryOp, UpdateOp, VarKind,
};

use crate::{Name, NodeId, Span};

/// An arena slot: the node's shape plus its source range.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/// Shared payload of function declarations, expressions and methods.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub id: Option<NodeId>,
    pub params: Vec<NodeId>,
    /// Flow return annotation.
    pub return_type: Option<NodeId>,
    /// Always a `BlockStatement`.
    pub body: NodeId,
    pub is_async: bool,
    pub is_generator: bool,
}

/// Shared payload of class declarations and expressions.
#[derive(Clone, Debug, PartialEq)]
pub struct Class {
    pub decorators: Vec<NodeId>,
    pub id: Option<NodeId>,
    pub super_class: Option<NodeId>,
    /// Always a `ClassBody`.
    pub body: NodeId,
}

/// Value of an estree-mode `Literal`.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    String(Name),
    Number(f64),
    BigInt(Name),
    Boolean(bool),
    Null,
    RegExp { pattern: Name, flags: Name },
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    // Program
    Program {
        /// Shebang line without the leading `#!`.
        interpreter: Option<Name>,
        directives: Vec<NodeId>,
        body: Vec<NodeId>,
        source_type: SourceType,
    },
    Directive {
        /// Directive text without quotes.
        value: Name,
        /// Quoted source text, if parsed.
        raw: Option<Name>,
    },

    // Statements
    ExpressionStatement {
        expression: NodeId,
        /// Directive text when estree mode keeps prologue strings as
        /// statements.
        directive: Option<Name>,
    },
    BlockStatement {
        directives: Vec<NodeId>,
        body: Vec<NodeId>,
    },
    EmptyStatement,
    DebuggerStatement,
    WithStatement {
        object: NodeId,
        body: NodeId,
    },
    ReturnStatement {
        argument: Option<NodeId>,
    },
    LabeledStatement {
        label: NodeId,
        body: NodeId,
    },
    BreakStatement {
        label: Option<NodeId>,
    },
    ContinueStatement {
        label: Option<NodeId>,
    },
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    SwitchStatement {
        discriminant: NodeId,
        cases: Vec<NodeId>,
    },
    SwitchCase {
        test: Option<NodeId>,
        consequent: Vec<NodeId>,
    },
    ThrowStatement {
        argument: NodeId,
    },
    TryStatement {
        block: NodeId,
        handler: Option<NodeId>,
        finalizer: Option<NodeId>,
    },
    CatchClause {
        param: Option<NodeId>,
        body: NodeId,
    },
    WhileStatement {
        test: NodeId,
        body: NodeId,
    },
    DoWhileStatement {
        body: NodeId,
        test: NodeId,
    },
    ForStatement {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    ForInStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    ForOfStatement {
        is_await: bool,
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },

    // Declarations
    FunctionDeclaration(Function),
    VariableDeclaration {
        kind: VarKind,
        declarations: Vec<NodeId>,
    },
    VariableDeclarator {
        id: NodeId,
        init: Option<NodeId>,
    },
    ClassDeclaration(Class),
    /// Flow `type Name = T;`
    TypeAlias {
        id: NodeId,
        right: NodeId,
    },

    // Modules
    ImportDeclaration {
        specifiers: Vec<NodeId>,
        source: NodeId,
    },
    ImportSpecifier {
        imported: NodeId,
        local: NodeId,
    },
    ImportDefaultSpecifier {
        local: NodeId,
    },
    ImportNamespaceSpecifier {
        local: NodeId,
    },
    ExportNamedDeclaration {
        declaration: Option<NodeId>,
        specifiers: Vec<NodeId>,
        source: Option<NodeId>,
    },
    ExportSpecifier {
        local: NodeId,
        exported: NodeId,
    },
    /// `export * as ns from "mod"`
    ExportNamespaceSpecifier {
        exported: NodeId,
    },
    ExportDefaultDeclaration {
        declaration: NodeId,
    },
    ExportAllDeclaration {
        source: NodeId,
    },

    // Classes
    ClassBody {
        body: Vec<NodeId>,
    },
    ClassMethod {
        decorators: Vec<NodeId>,
        is_static: bool,
        kind: MethodKind,
        computed: bool,
        key: NodeId,
        function: Function,
    },
    ClassProperty {
        decorators: Vec<NodeId>,
        is_static: bool,
        computed: bool,
        key: NodeId,
        type_annotation: Option<NodeId>,
        value: Option<NodeId>,
    },
    Decorator {
        expression: NodeId,
    },

    // Expressions
    Identifier {
        name: Name,
        /// Flow annotation on a binding identifier.
        type_annotation: Option<NodeId>,
    },
    StringLiteral {
        value: Name,
        raw: Option<Name>,
    },
    NumericLiteral {
        value: f64,
        raw: Option<Name>,
    },
    BigIntLiteral {
        /// Digits including the trailing `n`.
        raw: Name,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    RegExpLiteral {
        pattern: Name,
        flags: Name,
    },
    /// Estree-mode literal.
    Literal {
        value: LiteralValue,
        raw: Option<Name>,
    },
    TemplateLiteral {
        quasis: Vec<NodeId>,
        expressions: Vec<NodeId>,
    },
    TemplateElement {
        raw: Name,
        cooked: Option<Name>,
        tail: bool,
    },
    TaggedTemplateExpression {
        tag: NodeId,
        quasi: NodeId,
    },
    ThisExpression,
    Super,
    /// Callee of a dynamic `import(...)`.
    Import,
    ArrayExpression {
        elements: Vec<NodeId>,
    },
    /// Elided array element.
    Hole,
    ObjectExpression {
        properties: Vec<NodeId>,
    },
    ObjectProperty {
        computed: bool,
        shorthand: bool,
        key: NodeId,
        value: NodeId,
    },
    ObjectMethod {
        kind: MethodKind,
        computed: bool,
        key: NodeId,
        function: Function,
    },
    SpreadElement {
        argument: NodeId,
    },
    FunctionExpression(Function),
    ArrowFunctionExpression {
        is_async: bool,
        params: Vec<NodeId>,
        return_type: Option<NodeId>,
        body: NodeId,
        /// Body is an expression rather than a block.
        expression: bool,
    },
    ClassExpression(Class),
    UnaryExpression {
        operator: UnaryOp,
        argument: NodeId,
    },
    UpdateExpression {
        operator: UpdateOp,
        prefix: bool,
        argument: NodeId,
    },
    BinaryExpression {
        operator: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    LogicalExpression {
        operator: LogicalOp,
        left: NodeId,
        right: NodeId,
    },
    AssignmentExpression {
        operator: AssignOp,
        left: NodeId,
        right: NodeId,
    },
    ConditionalExpression {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    SequenceExpression {
        expressions: Vec<NodeId>,
    },
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    NewExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    MemberExpression {
        object: NodeId,
        property: NodeId,
        computed: bool,
    },
    /// `obj::func` / `::obj.func`
    BindExpression {
        object: Option<NodeId>,
        callee: NodeId,
    },
    YieldExpression {
        delegate: bool,
        argument: Option<NodeId>,
    },
    AwaitExpression {
        argument: NodeId,
    },
    /// `new.target`, `import.meta`
    MetaProperty {
        meta: NodeId,
        property: NodeId,
    },
    DoExpression {
        body: NodeId,
    },

    // Patterns
    ObjectPattern {
        properties: Vec<NodeId>,
        type_annotation: Option<NodeId>,
    },
    ArrayPattern {
        elements: Vec<NodeId>,
        type_annotation: Option<NodeId>,
    },
    RestElement {
        argument: NodeId,
        type_annotation: Option<NodeId>,
    },
    AssignmentPattern {
        left: NodeId,
        right: NodeId,
    },

    // Flow types
    TypeAnnotation {
        type_annotation: NodeId,
    },
    /// Named type, possibly qualified (`A.B`), with optional parameters.
    GenericTypeAnnotation {
        id: Name,
        type_parameters: Vec<NodeId>,
    },
    NullableTypeAnnotation {
        type_annotation: NodeId,
    },
    ArrayTypeAnnotation {
        element_type: NodeId,
    },
    UnionTypeAnnotation {
        types: Vec<NodeId>,
    },
    IntersectionTypeAnnotation {
        types: Vec<NodeId>,
    },
    StringLiteralTypeAnnotation {
        raw: Name,
    },
    NumberLiteralTypeAnnotation {
        raw: Name,
    },
    ObjectTypeAnnotation {
        properties: Vec<NodeId>,
    },
    ObjectTypeProperty {
        key: Name,
        optional: bool,
        value: NodeId,
    },
}

/// Fieldless discriminant of [`NodeKind`], used as a visitor key.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeType {
    Program,
    Directive,
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    WithStatement,
    ReturnStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    ThrowStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    FunctionDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    ClassDeclaration,
    TypeAlias,
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportNamedDeclaration,
    ExportSpecifier,
    ExportNamespaceSpecifier,
    ExportDefaultDeclaration,
    ExportAllDeclaration,
    ClassBody,
    ClassMethod,
    ClassProperty,
    Decorator,
    Identifier,
    StringLiteral,
    NumericLiteral,
    BigIntLiteral,
    BooleanLiteral,
    NullLiteral,
    RegExpLiteral,
    Literal,
    TemplateLiteral,
    TemplateElement,
    TaggedTemplateExpression,
    ThisExpression,
    Super,
    Import,
    ArrayExpression,
    Hole,
    ObjectExpression,
    ObjectProperty,
    ObjectMethod,
    SpreadElement,
    FunctionExpression,
    ArrowFunctionExpression,
    ClassExpression,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    ConditionalExpression,
    SequenceExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    BindExpression,
    YieldExpression,
    AwaitExpression,
    MetaProperty,
    DoExpression,
    ObjectPattern,
    ArrayPattern,
    RestElement,
    AssignmentPattern,
    TypeAnnotation,
    GenericTypeAnnotation,
    NullableTypeAnnotation,
    ArrayTypeAnnotation,
    UnionTypeAnnotation,
    IntersectionTypeAnnotation,
    StringLiteralTypeAnnotation,
    NumberLiteralTypeAnnotation,
    ObjectTypeAnnotation,
    ObjectTypeProperty,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Program => "Program",
            NodeType::Directive => "Directive",
            NodeType::ExpressionStatement => "ExpressionStatement",
            NodeType::BlockStatement => "BlockStatement",
            NodeType::EmptyStatement => "EmptyStatement",
            NodeType::DebuggerStatement => "DebuggerStatement",
            NodeType::WithStatement => "WithStatement",
            NodeType::ReturnStatement => "ReturnStatement",
            NodeType::LabeledStatement => "LabeledStatement",
            NodeType::BreakStatement => "BreakStatement",
            NodeType::ContinueStatement => "ContinueStatement",
            NodeType::IfStatement => "IfStatement",
            NodeType::SwitchStatement => "SwitchStatement",
            NodeType::SwitchCase => "SwitchCase",
            NodeType::ThrowStatement => "ThrowStatement",
            NodeType::TryStatement => "TryStatement",
            NodeType::CatchClause => "CatchClause",
            NodeType::WhileStatement => "WhileStatement",
            NodeType::DoWhileStatement => "DoWhileStatement",
            NodeType::ForStatement => "ForStatement",
            NodeType::ForInStatement => "ForInStatement",
            NodeType::ForOfStatement => "ForOfStatement",
            NodeType::FunctionDeclaration => "FunctionDeclaration",
            NodeType::VariableDeclaration => "VariableDeclaration",
            NodeType::VariableDeclarator => "VariableDeclarator",
            NodeType::ClassDeclaration => "ClassDeclaration",
            NodeType::TypeAlias => "TypeAlias",
            NodeType::ImportDeclaration => "ImportDeclaration",
            NodeType::ImportSpecifier => "ImportSpecifier",
            NodeType::ImportDefaultSpecifier => "ImportDefaultSpecifier",
            NodeType::ImportNamespaceSpecifier => "ImportNamespaceSpecifier",
            NodeType::ExportNamedDeclaration => "ExportNamedDeclaration",
            NodeType::ExportSpecifier => "ExportSpecifier",
            NodeType::ExportNamespaceSpecifier => "ExportNamespaceSpecifier",
            NodeType::ExportDefaultDeclaration => "ExportDefaultDeclaration",
            NodeType::ExportAllDeclaration => "ExportAllDeclaration",
            NodeType::ClassBody => "ClassBody",
            NodeType::ClassMethod => "ClassMethod",
            NodeType::ClassProperty => "ClassProperty",
            NodeType::Decorator => "Decorator",
            NodeType::Identifier => "Identifier",
            NodeType::StringLiteral => "StringLiteral",
            NodeType::NumericLiteral => "NumericLiteral",
            NodeType::BigIntLiteral => "BigIntLiteral",
            NodeType::BooleanLiteral => "BooleanLiteral",
            NodeType::NullLiteral => "NullLiteral",
            NodeType::RegExpLiteral => "RegExpLiteral",
            NodeType::Literal => "Literal",
            NodeType::TemplateLiteral => "TemplateLiteral",
            NodeType::TemplateElement => "TemplateElement",
            NodeType::TaggedTemplateExpression => "TaggedTemplateExpression",
            NodeType::ThisExpression => "ThisExpression",
            NodeType::Super => "Super",
            NodeType::Import => "Import",
            NodeType::ArrayExpression => "ArrayExpression",
            NodeType::Hole => "Hole",
            NodeType::ObjectExpression => "ObjectExpression",
            NodeType::ObjectProperty => "ObjectProperty",
            NodeType::ObjectMethod => "ObjectMethod",
            NodeType::SpreadElement => "SpreadElement",
            NodeType::FunctionExpression => "FunctionExpression",
            NodeType::ArrowFunctionExpression => "ArrowFunctionExpression",
            NodeType::ClassExpression => "ClassExpression",
            NodeType::UnaryExpression => "UnaryExpression",
            NodeType::UpdateExpression => "UpdateExpression",
            NodeType::BinaryExpression => "BinaryExpression",
            NodeType::LogicalExpression => "LogicalExpression",
            NodeType::AssignmentExpression => "AssignmentExpression",
            NodeType::ConditionalExpression => "ConditionalExpression",
            NodeType::SequenceExpression => "SequenceExpression",
            NodeType::CallExpression => "CallExpression",
            NodeType::NewExpression => "NewExpression",
            NodeType::MemberExpression => "MemberExpression",
            NodeType::BindExpression => "BindExpression",
            NodeType::YieldExpression => "YieldExpression",
            NodeType::AwaitExpression => "AwaitExpression",
            NodeType::MetaProperty => "MetaProperty",
            NodeType::DoExpression => "DoExpression",
            NodeType::ObjectPattern => "ObjectPattern",
            NodeType::ArrayPattern => "ArrayPattern",
            NodeType::RestElement => "RestElement",
            NodeType::AssignmentPattern => "AssignmentPattern",
            NodeType::TypeAnnotation => "TypeAnnotation",
            NodeType::GenericTypeAnnotation => "GenericTypeAnnotation",
            NodeType::NullableTypeAnnotation => "NullableTypeAnnotation",
            NodeType::ArrayTypeAnnotation => "ArrayTypeAnnotation",
            NodeType::UnionTypeAnnotation => "UnionTypeAnnotation",
            NodeType::IntersectionTypeAnnotation => "IntersectionTypeAnnotation",
            NodeType::StringLiteralTypeAnnotation => "StringLiteralTypeAnnotation",
            NodeType::NumberLiteralTypeAnnotation => "NumberLiteralTypeAnnotation",
            NodeType::ObjectTypeAnnotation => "ObjectTypeAnnotation",
            NodeType::ObjectTypeProperty => "ObjectTypeProperty",
        }
    }

    /// Function-like nodes: they introduce a function scope.
    pub const fn is_function(self) -> bool {
        matches!(
            self,
            NodeType::FunctionDeclaration
                | NodeType::FunctionExpression
                | NodeType::ArrowFunctionExpression
                | NodeType::ClassMethod
                | NodeType::ObjectMethod
        )
    }

    /// Statement and declaration nodes that may appear in a statement list.
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            NodeType::ExpressionStatement
                | NodeType::BlockStatement
                | NodeType::EmptyStatement
                | NodeType::DebuggerStatement
                | NodeType::WithStatement
                | NodeType::ReturnStatement
                | NodeType::LabeledStatement
                | NodeType::BreakStatement
                | NodeType::ContinueStatement
                | NodeType::IfStatement
                | NodeType::SwitchStatement
                | NodeType::ThrowStatement
                | NodeType::TryStatement
                | NodeType::WhileStatement
                | NodeType::DoWhileStatement
                | NodeType::ForStatement
                | NodeType::ForInStatement
                | NodeType::ForOfStatement
                | NodeType::FunctionDeclaration
                | NodeType::VariableDeclaration
                | NodeType::ClassDeclaration
                | NodeType::TypeAlias
                | NodeType::ImportDeclaration
                | NodeType::ExportNamedDeclaration
                | NodeType::ExportDefaultDeclaration
                | NodeType::ExportAllDeclaration
        )
    }

    /// Flow type nodes; analysis and codegen treat them as opaque.
    pub const fn is_flow_type(self) -> bool {
        matches!(
            self,
            NodeType::TypeAnnotation
                | NodeType::GenericTypeAnnotation
                | NodeType::NullableTypeAnnotation
                | NodeType::ArrayTypeAnnotation
                | NodeType::UnionTypeAnnotation
                | NodeType::IntersectionTypeAnnotation
                | NodeType::StringLiteralTypeAnnotation
                | NodeType::NumberLiteralTypeAnnotation
                | NodeType::ObjectTypeAnnotation
                | NodeType::ObjectTypeProperty
        )
    }

    /// Literal nodes whose value is known statically.
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            NodeType::StringLiteral
                | NodeType::NumericLiteral
                | NodeType::BigIntLiteral
                | NodeType::BooleanLiteral
                | NodeType::NullLiteral
                | NodeType::RegExpLiteral
                | NodeType::Literal
        )
    }

    /// Nodes that can stand where an expression is expected.
    pub const fn is_expression(self) -> bool {
        self.is_literal()
            || matches!(
                self,
                NodeType::Identifier
                    | NodeType::TemplateLiteral
                    | NodeType::TaggedTemplateExpression
                    | NodeType::ThisExpression
                    | NodeType::Super
                    | NodeType::Import
                    | NodeType::ArrayExpression
                    | NodeType::ObjectExpression
                    | NodeType::FunctionExpression
                    | NodeType::ArrowFunctionExpression
                    | NodeType::ClassExpression
                    | NodeType::UnaryExpression
                    | NodeType::UpdateExpression
                    | NodeType::BinaryExpression
                    | NodeType::LogicalExpression
                    | NodeType::AssignmentExpression
                    | NodeType::ConditionalExpression
                    | NodeType::SequenceExpression
                    | NodeType::CallExpression
                    | NodeType::NewExpression
                    | NodeType::MemberExpression
                    | NodeType::BindExpression
                    | NodeType::YieldExpression
                    | NodeType::AwaitExpression
                    | NodeType::MetaProperty
                    | NodeType::DoExpression
            )
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeKind {
    /// Discriminant of this node.
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Program { .. } => NodeType::Program,
            NodeKind::Directive { .. } => NodeType::Directive,
            NodeKind::ExpressionStatement { .. } => NodeType::ExpressionStatement,
            NodeKind::BlockStatement { .. } => NodeType::BlockStatement,
            NodeKind::EmptyStatement => NodeType::EmptyStatement,
            NodeKind::DebuggerStatement => NodeType::DebuggerStatement,
            NodeKind::WithStatement { .. } => NodeType::WithStatement,
            NodeKind::ReturnStatement { .. } => NodeType::ReturnStatement,
            NodeKind::LabeledStatement { .. } => NodeType::LabeledStatement,
            NodeKind::BreakStatement { .. } => NodeType::BreakStatement,
            NodeKind::ContinueStatement { .. } => NodeType::ContinueStatement,
            NodeKind::IfStatement { .. } => NodeType::IfStatement,
            NodeKind::SwitchStatement { .. } => NodeType::SwitchStatement,
            NodeKind::SwitchCase { .. } => NodeType::SwitchCase,
            NodeKind::ThrowStatement { .. } => NodeType::ThrowStatement,
            NodeKind::TryStatement { .. } => NodeType::TryStatement,
            NodeKind::CatchClause { .. } => NodeType::CatchClause,
            NodeKind::WhileStatement { .. } => NodeType::WhileStatement,
            NodeKind::DoWhileStatement { .. } => NodeType::DoWhileStatement,
            NodeKind::ForStatement { .. } => NodeType::ForStatement,
            NodeKind::ForInStatement { .. } => NodeType::ForInStatement,
            NodeKind::ForOfStatement { .. } => NodeType::ForOfStatement,
            NodeKind::FunctionDeclaration(_) => NodeType::FunctionDeclaration,
            NodeKind::VariableDeclaration { .. } => NodeType::VariableDeclaration,
            NodeKind::VariableDeclarator { .. } => NodeType::VariableDeclarator,
            NodeKind::ClassDeclaration(_) => NodeType::ClassDeclaration,
            NodeKind::TypeAlias { .. } => NodeType::TypeAlias,
            NodeKind::ImportDeclaration { .. } => NodeType::ImportDeclaration,
            NodeKind::ImportSpecifier { .. } => NodeType::ImportSpecifier,
            NodeKind::ImportDefaultSpecifier { .. } => NodeType::ImportDefaultSpecifier,
            NodeKind::ImportNamespaceSpecifier { .. } => NodeType::ImportNamespaceSpecifier,
            NodeKind::ExportNamedDeclaration { .. } => NodeType::ExportNamedDeclaration,
            NodeKind::ExportSpecifier { .. } => NodeType::ExportSpecifier,
            NodeKind::ExportNamespaceSpecifier { .. } => NodeType::ExportNamespaceSpecifier,
            NodeKind::ExportDefaultDeclaration { .. } => NodeType::ExportDefaultDeclaration,
            NodeKind::ExportAllDeclaration { .. } => NodeType::ExportAllDeclaration,
            NodeKind::ClassBody { .. } => NodeType::ClassBody,
            NodeKind::ClassMethod { .. } => NodeType::ClassMethod,
            NodeKind::ClassProperty { .. } => NodeType::ClassProperty,
            NodeKind::Decorator { .. } => NodeType::Decorator,
            NodeKind::Identifier { .. } => NodeType::Identifier,
            NodeKind::StringLiteral { .. } => NodeType::StringLiteral,
            NodeKind::NumericLiteral { .. } => NodeType::NumericLiteral,
            NodeKind::BigIntLiteral { .. } => NodeType::BigIntLiteral,
            NodeKind::BooleanLiteral { .. } => NodeType::BooleanLiteral,
            NodeKind::NullLiteral => NodeType::NullLiteral,
            NodeKind::RegExpLiteral { .. } => NodeType::RegExpLiteral,
            NodeKind::Literal { .. } => NodeType::Literal,
            NodeKind::TemplateLiteral { .. } => NodeType::TemplateLiteral,
            NodeKind::TemplateElement { .. } => NodeType::TemplateElement,
            NodeKind::TaggedTemplateExpression { .. } => NodeType::TaggedTemplateExpression,
            NodeKind::ThisExpression => NodeType::ThisExpression,
            NodeKind::Super => NodeType::Super,
            NodeKind::Import => NodeType::Import,
            NodeKind::ArrayExpression { .. } => NodeType::ArrayExpression,
            NodeKind::Hole => NodeType::Hole,
            NodeKind::ObjectExpression { .. } => NodeType::ObjectExpression,
            NodeKind::ObjectProperty { .. } => NodeType::ObjectProperty,
            NodeKind::ObjectMethod { .. } => NodeType::ObjectMethod,
            NodeKind::SpreadElement { .. } => NodeType::SpreadElement,
            NodeKind::FunctionExpression(_) => NodeType::FunctionExpression,
            NodeKind::ArrowFunctionExpression { .. } => NodeType::ArrowFunctionExpression,
            NodeKind::ClassExpression(_) => NodeType::ClassExpression,
            NodeKind::UnaryExpression { .. } => NodeType::UnaryExpression,
            NodeKind::UpdateExpression { .. } => NodeType::UpdateExpression,
            NodeKind::BinaryExpression { .. } => NodeType::BinaryExpression,
            NodeKind::LogicalExpression { .. } => NodeType::LogicalExpression,
            NodeKind::AssignmentExpression { .. } => NodeType::AssignmentExpression,
            NodeKind::ConditionalExpression { .. } => NodeType::ConditionalExpression,
            NodeKind::SequenceExpression { .. } => NodeType::SequenceExpression,
            NodeKind::CallExpression { .. } => NodeType::CallExpression,
            NodeKind::NewExpression { .. } => NodeType::NewExpression,
            NodeKind::MemberExpression { .. } => NodeType::MemberExpression,
            NodeKind::BindExpression { .. } => NodeType::BindExpression,
            NodeKind::YieldExpression { .. } => NodeType::YieldExpression,
            NodeKind::AwaitExpression { .. } => NodeType::AwaitExpression,
            NodeKind::MetaProperty { .. } => NodeType::MetaProperty,
            NodeKind::DoExpression { .. } => NodeType::DoExpression,
            NodeKind::ObjectPattern { .. } => NodeType::ObjectPattern,
            NodeKind::ArrayPattern { .. } => NodeType::ArrayPattern,
            NodeKind::RestElement { .. } => NodeType::RestElement,
            NodeKind::AssignmentPattern { .. } => NodeType::AssignmentPattern,
            NodeKind::TypeAnnotation { .. } => NodeType::TypeAnnotation,
            NodeKind::GenericTypeAnnotation { .. } => NodeType::GenericTypeAnnotation,
            NodeKind::NullableTypeAnnotation { .. } => NodeType::NullableTypeAnnotation,
            NodeKind::ArrayTypeAnnotation { .. } => NodeType::ArrayTypeAnnotation,
            NodeKind::UnionTypeAnnotation { .. } => NodeType::UnionTypeAnnotation,
            NodeKind::IntersectionTypeAnnotation { .. } => NodeType::IntersectionTypeAnnotation,
            NodeKind::StringLiteralTypeAnnotation { .. } => NodeType::StringLiteralTypeAnnotation,
            NodeKind::NumberLiteralTypeAnnotation { .. } => NodeType::NumberLiteralTypeAnnotation,
            NodeKind::ObjectTypeAnnotation { .. } => NodeType::ObjectTypeAnnotation,
            NodeKind::ObjectTypeProperty { .. } => NodeType::ObjectTypeProperty,
        }
    }

    /// Function payload of function-like nodes.
    pub fn function(&self) -> Option<&Function> {
        match self {
            NodeKind::FunctionDeclaration(f)
            | NodeKind::FunctionExpression(f)
            | NodeKind::ClassMethod { function: f, .. }
            | NodeKind::ObjectMethod { function: f, .. } => Some(f),
            _ => None,
        }
    }

    /// Class payload of class declarations and expressions.
    pub fn class(&self) -> Option<&Class> {
        match self {
            NodeKind::ClassDeclaration(c) | NodeKind::ClassExpression(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests;
