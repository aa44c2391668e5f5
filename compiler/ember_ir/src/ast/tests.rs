use super::*;
use crate::Ast;

#[test]
fn test_fields_follow_source_order() {
    let kind = NodeKind::ForStatement {
        init: None,
        test: Some(NodeId::new(1)),
        update: Some(NodeId::new(2)),
        body: NodeId::new(3),
    };
    let names: Vec<&str> = kind.fields().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["init", "test", "update", "body"]);
    assert_eq!(
        kind.children().to_vec(),
        vec![NodeId::new(1), NodeId::new(2), NodeId::new(3)]
    );
}

#[test]
fn test_field_mut_aligns_with_fields() {
    let mut kind = NodeKind::IfStatement {
        test: NodeId::new(1),
        consequent: NodeId::new(2),
        alternate: None,
    };
    assert_eq!(kind.field_index("alternate"), Some(2));
    if let Some(FieldMut::Opt(slot)) = kind.field_mut(2) {
        *slot = Some(NodeId::new(9));
    }
    assert_eq!(kind.children().last().copied(), Some(NodeId::new(9)));
}

#[test]
fn test_method_fields_include_function_parts() {
    let kind = NodeKind::ClassMethod {
        decorators: vec![NodeId::new(0)],
        is_static: true,
        kind: MethodKind::Method,
        computed: false,
        key: NodeId::new(1),
        function: Function {
            id: None,
            params: vec![NodeId::new(2)],
            return_type: None,
            body: NodeId::new(3),
            is_async: false,
            is_generator: false,
        },
    };
    let names: Vec<&str> = kind.fields().iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        vec!["decorators", "key", "id", "params", "returnType", "body"]
    );
    assert_eq!(kind.children().len(), 4);
}

#[test]
fn test_leaf_nodes_have_no_fields() {
    for kind in [
        NodeKind::ThisExpression,
        NodeKind::Hole,
        NodeKind::NullLiteral,
        NodeKind::EmptyStatement,
    ] {
        assert!(kind.fields().is_empty(), "{:?}", kind.node_type());
    }
}

#[test]
fn test_names_mut_covers_literal_attributes() {
    let mut ast = Ast::new();
    let pattern = ast.intern("a+");
    let flags = ast.intern("g");
    let mut kind = NodeKind::RegExpLiteral { pattern, flags };
    let names: Vec<&str> = kind.names_mut().iter().map(|n| ast.name(**n)).collect();
    assert_eq!(names, vec!["a+", "g"]);
}

#[test]
fn test_node_type_predicates() {
    assert!(NodeType::ArrowFunctionExpression.is_function());
    assert!(NodeType::ClassMethod.is_function());
    assert!(!NodeType::ClassDeclaration.is_function());
    assert!(NodeType::TypeAlias.is_statement());
    assert!(!NodeType::Directive.is_statement());
    assert!(NodeType::UnionTypeAnnotation.is_flow_type());
    assert_eq!(NodeType::MemberExpression.to_string(), "MemberExpression");
}
