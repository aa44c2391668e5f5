use super::*;
use crate::ast::{BinaryOp, Function};

fn binary(ast: &mut Ast, left: &str, right: &str) -> NodeId {
    let left = ast.identifier(left);
    let right = ast.identifier(right);
    ast.alloc(
        NodeKind::BinaryExpression {
            operator: BinaryOp::Add,
            left,
            right,
        },
        Span::new(0, 5),
    )
}

#[test]
fn test_alloc_and_lookup() {
    let mut ast = Ast::new();
    let id = ast.identifier("answer");
    assert_eq!(ast.node_type(id), NodeType::Identifier);
    assert_eq!(ast.identifier_name(id), Some("answer"));
    assert_eq!(ast.span(id), Span::DUMMY);
    assert!(ast.get(NodeId::INVALID).is_none());
}

#[test]
fn test_descendants_preorder() {
    let mut ast = Ast::new();
    let sum = binary(&mut ast, "a", "b");
    let stmt = ast.expression_statement(sum);
    let order: Vec<NodeType> = ast
        .descendants(stmt)
        .into_iter()
        .map(|id| ast.node_type(id))
        .collect();
    assert_eq!(
        order,
        vec![
            NodeType::ExpressionStatement,
            NodeType::BinaryExpression,
            NodeType::Identifier,
            NodeType::Identifier,
        ]
    );
}

#[test]
fn test_clone_subtree_shares_nothing() {
    let mut ast = Ast::new();
    let sum = binary(&mut ast, "a", "b");
    let copy = ast.clone_subtree(sum);

    assert_ne!(copy, sum);
    assert!(ast.structurally_eq(sum, &ast, copy));
    let original_children = ast.kind(sum).children();
    let copied_children = ast.kind(copy).children();
    for (a, b) in original_children.iter().zip(copied_children.iter()) {
        assert_ne!(a, b);
    }
}

#[test]
fn test_structural_eq_ignores_spans_and_interners() {
    let mut left = Ast::new();
    let mut right = Ast::new();
    // Intern in a different order so name ids differ.
    right.intern("zzz");
    let a = binary(&mut left, "x", "y");
    let b = binary(&mut right, "x", "y");
    right.set_span(b, Span::new(40, 90));
    assert!(left.structurally_eq(a, &right, b));

    let c = binary(&mut right, "x", "z");
    assert!(!left.structurally_eq(a, &right, c));
}

#[test]
fn test_structural_eq_detects_attribute_change() {
    let mut ast = Ast::new();
    let a = binary(&mut ast, "x", "y");
    let b = binary(&mut ast, "x", "y");
    if let Some(NodeKind::BinaryExpression { operator, .. }) = ast.kind_mut(b) {
        *operator = BinaryOp::Sub;
    }
    assert!(!ast.structurally_eq(a, &ast, b));
}

#[test]
fn test_import_subtree_reinterns_names() {
    let mut source = Ast::new();
    let body = source.alloc(
        NodeKind::BlockStatement {
            directives: vec![],
            body: vec![],
        },
        Span::DUMMY,
    );
    let id = source.identifier("helper");
    let func = source.alloc(
        NodeKind::FunctionExpression(Function {
            id: Some(id),
            params: vec![],
            return_type: None,
            body,
            is_async: false,
            is_generator: false,
        }),
        Span::DUMMY,
    );

    let mut target = Ast::new();
    target.intern("unrelated");
    let imported = target.import_subtree(&source, func);
    assert!(source.structurally_eq(func, &target, imported));
    let Some(NodeKind::FunctionExpression(f)) = target.get(imported).map(|n| &n.kind) else {
        panic!("expected function expression");
    };
    assert_eq!(f.id.and_then(|id| target.identifier_name(id)), Some("helper"));
}

#[test]
fn test_truncate_discards_speculative_nodes() {
    let mut ast = Ast::new();
    ast.identifier("kept");
    let mark = ast.len();
    ast.identifier("dropped");
    ast.truncate(mark);
    assert_eq!(ast.len(), 1);
}
