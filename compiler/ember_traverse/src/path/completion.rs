//! Completion records.
//!
//! The completion records of a statement are the statements whose value
//! it evaluates to: the last statement of a block, both branches of an
//! `if`, the body of a loop, and so on down to the statements that
//! actually produce a value.

use ember_ir::{Ast, NodeId, NodeKind};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Record {
    pub(crate) node: NodeId,
    /// The record sits in a loop body, so its value is only the result
    /// once the loop ends.
    pub(crate) in_loop: bool,
}

/// Completion records of `node`. For a function, those of its body.
pub(crate) fn completion_records(ast: &Ast, node: NodeId) -> Vec<Record> {
    let start = match ast.kind(node) {
        NodeKind::ArrowFunctionExpression { body, .. } => *body,
        kind => kind.function().map_or(node, |function| function.body),
    };
    let mut out = Vec::new();
    collect(ast, start, false, &mut out);
    out
}

fn collect(ast: &Ast, node: NodeId, in_loop: bool, out: &mut Vec<Record>) {
    match ast.kind(node) {
        NodeKind::IfStatement {
            consequent, alternate, ..
        } => {
            collect(ast, *consequent, in_loop, out);
            if let Some(alternate) = alternate {
                collect(ast, *alternate, in_loop, out);
            }
        }
        NodeKind::WhileStatement { body, .. }
        | NodeKind::DoWhileStatement { body, .. }
        | NodeKind::ForStatement { body, .. }
        | NodeKind::ForInStatement { body, .. }
        | NodeKind::ForOfStatement { body, .. } => collect(ast, *body, true, out),
        NodeKind::DoExpression { body } | NodeKind::LabeledStatement { body, .. } | NodeKind::CatchClause { body, .. } => {
            collect(ast, *body, in_loop, out);
        }
        NodeKind::Program { body, .. } | NodeKind::BlockStatement { body, .. } => {
            if let Some(last) = body.last() {
                collect(ast, *last, in_loop, out);
            }
        }
        NodeKind::TryStatement {
            block,
            handler,
            finalizer,
        } => {
            collect(ast, *block, in_loop, out);
            for clause in handler.iter().chain(finalizer) {
                collect(ast, *clause, in_loop, out);
            }
        }
        NodeKind::SwitchStatement { cases, .. } => {
            for case in cases {
                let NodeKind::SwitchCase { consequent, .. } = ast.kind(*case) else {
                    continue;
                };
                // `x; break;` completes with `x`.
                let last = match consequent.as_slice() {
                    [.., value, last] if matches!(ast.kind(*last), NodeKind::BreakStatement { label: None }) => {
                        Some(*value)
                    }
                    [.., last] if !matches!(ast.kind(*last), NodeKind::BreakStatement { .. }) => Some(*last),
                    _ => None,
                };
                if let Some(last) = last {
                    collect(ast, last, in_loop, out);
                }
            }
        }
        _ => out.push(Record { node, in_loop }),
    }
}
