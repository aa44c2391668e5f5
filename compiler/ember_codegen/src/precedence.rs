//! Expression binding power.
//!
//! Each expression kind gets a level; a child printed where a higher level
//! is required gets parentheses. Binary and logical operators slot in
//! between `CONDITIONAL` and `UNARY` by operator precedence, so `??`
//! binds loosest and `**` tightest.

use ember_ir::{Ast, BinaryOp, LogicalOp, NodeId, NodeKind};

pub(crate) type Level = u8;

pub(crate) const SEQUENCE: Level = 0;
/// Assignment, arrow functions and `yield`.
pub(crate) const ASSIGN: Level = 1;
pub(crate) const CONDITIONAL: Level = 2;
/// Prefix operators, `await` and prefix updates.
pub(crate) const UNARY: Level = 16;
pub(crate) const POSTFIX: Level = 17;
/// Calls, `new`, member access and tagged templates.
pub(crate) const LEFT_HAND_SIDE: Level = 18;
pub(crate) const PRIMARY: Level = 19;

const OPERATOR_BASE: Level = 3;

pub(crate) const fn binary(op: BinaryOp) -> Level {
    OPERATOR_BASE + op.precedence()
}

pub(crate) const fn logical(op: LogicalOp) -> Level {
    OPERATOR_BASE + op.precedence()
}

pub(crate) fn level(kind: &NodeKind) -> Level {
    match kind {
        NodeKind::SequenceExpression { .. } => SEQUENCE,
        NodeKind::AssignmentExpression { .. }
        | NodeKind::ArrowFunctionExpression { .. }
        | NodeKind::YieldExpression { .. } => ASSIGN,
        NodeKind::ConditionalExpression { .. } => CONDITIONAL,
        NodeKind::LogicalExpression { operator, .. } => logical(*operator),
        NodeKind::BinaryExpression { operator, .. } => binary(*operator),
        NodeKind::UnaryExpression { .. }
        | NodeKind::AwaitExpression { .. }
        | NodeKind::UpdateExpression { prefix: true, .. } => UNARY,
        NodeKind::UpdateExpression { prefix: false, .. } => POSTFIX,
        NodeKind::CallExpression { .. }
        | NodeKind::NewExpression { .. }
        | NodeKind::MemberExpression { .. }
        | NodeKind::TaggedTemplateExpression { .. }
        | NodeKind::BindExpression { .. }
        | NodeKind::MetaProperty { .. } => LEFT_HAND_SIDE,
        _ => PRIMARY,
    }
}

/// `??` may not be mixed with `||` or `&&` without parentheses.
pub(crate) fn mixes_nullish(parent: LogicalOp, child: &NodeKind) -> bool {
    match child {
        NodeKind::LogicalExpression { operator, .. } => {
            (parent == LogicalOp::Nullish) != (*operator == LogicalOp::Nullish)
        }
        _ => false,
    }
}

/// Where an expression starts decides which leading tokens would be read
/// as something else.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Start {
    /// `{` opens a block; `function`, `class` and `do` start declarations
    /// or statements.
    Statement,
    /// `{` opens a function body.
    ArrowBody,
    /// `function` and `class` start default-exported declarations.
    ExportDefault,
    /// The init or left side of a `for` head. Only `let [` is ambiguous.
    ForHead,
}

/// Whether the expression at `id`, printed without parentheses, would
/// begin with a token that `start` reads differently.
pub(crate) fn starts_ambiguously(ast: &Ast, mut id: NodeId, start: Start) -> bool {
    loop {
        match ast.kind(id) {
            NodeKind::ObjectExpression { .. } | NodeKind::ObjectPattern { .. } => {
                return matches!(start, Start::Statement | Start::ArrowBody);
            }
            NodeKind::FunctionExpression(_) | NodeKind::ClassExpression(_) => {
                return matches!(start, Start::Statement | Start::ExportDefault);
            }
            NodeKind::DoExpression { .. } => return start == Start::Statement,
            // `let [` always begins a lexical declaration.
            NodeKind::MemberExpression {
                object, computed: true, ..
            } if ast.identifier_name(*object) == Some("let") => {
                return matches!(start, Start::Statement | Start::ForHead);
            }
            NodeKind::BinaryExpression { left, .. }
            | NodeKind::LogicalExpression { left, .. }
            | NodeKind::AssignmentExpression { left, .. } => id = *left,
            NodeKind::ConditionalExpression { test, .. } => id = *test,
            NodeKind::CallExpression { callee, .. } => id = *callee,
            NodeKind::TaggedTemplateExpression { tag, .. } => id = *tag,
            NodeKind::MemberExpression { object, .. } => id = *object,
            NodeKind::BindExpression { object: Some(object), .. } => id = *object,
            NodeKind::UpdateExpression {
                prefix: false,
                argument,
                ..
            } => id = *argument,
            NodeKind::SequenceExpression { expressions } => match expressions.first() {
                Some(first) => id = *first,
                None => return false,
            },
            _ => return false,
        }
    }
}

/// A `new` callee holding an unparenthesized call would pass the call's
/// arguments to `new` instead.
pub(crate) fn callee_contains_call(ast: &Ast, mut id: NodeId) -> bool {
    loop {
        match ast.kind(id) {
            NodeKind::CallExpression { .. } => return true,
            NodeKind::MemberExpression { object, .. } => id = *object,
            NodeKind::TaggedTemplateExpression { tag, .. } => id = *tag,
            _ => return false,
        }
    }
}

/// Whether `statement` ends in an `if` with no `else`, which would capture
/// an `else` printed after it.
pub(crate) fn ends_with_open_if(ast: &Ast, mut statement: NodeId) -> bool {
    loop {
        match ast.kind(statement) {
            NodeKind::IfStatement { alternate: None, .. } => return true,
            NodeKind::IfStatement {
                alternate: Some(alternate),
                ..
            } => statement = *alternate,
            NodeKind::WhileStatement { body, .. }
            | NodeKind::ForStatement { body, .. }
            | NodeKind::ForInStatement { body, .. }
            | NodeKind::ForOfStatement { body, .. }
            | NodeKind::WithStatement { body, .. }
            | NodeKind::LabeledStatement { body, .. } => statement = *body,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use ember_ir::{BinaryOp, LogicalOp};

    use super::{binary, logical, CONDITIONAL, UNARY};

    #[test]
    fn operator_levels_sit_between_conditional_and_unary() {
        assert!(logical(LogicalOp::Nullish) > CONDITIONAL);
        assert!(logical(LogicalOp::And) < binary(BinaryOp::BitOr));
        assert!(binary(BinaryOp::Exp) < UNARY);
    }
}
