use ember_diagnostic::ErrorCode;
use ember_ir::{LiteralValue, NodeId, NodeKind, NodeType, TokenKind};
use pretty_assertions::assert_eq;

use super::{body, body_types, directives, parse_with_plugins, single_expression};
use crate::{parse, Extensions, ParseOptions, ParseResult, Parser, PluginRegistry};

fn gate_error(source: &str) -> String {
    let err = parse_with_plugins(source, &[]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1007, "{source}");
    err.message()
}

#[test]
fn test_gated_syntax_requires_plugin() {
    assert!(gate_error("class A { x = 1; }").contains("'classProperties'"));
    assert!(gate_error("@dec class A {}").contains("'decorators'"));
    assert!(gate_error("({ ...a });").contains("'objectRestSpread'"));
    assert!(gate_error("import('m');").contains("'dynamicImport'"));
    assert!(gate_error("async function* g() {}").contains("'asyncGenerators'"));
}

#[test]
fn test_class_properties() {
    let output = parse_with_plugins("class A { x = 1; static y; [z] = 2; }", &["classProperties"]).unwrap();
    let NodeKind::ClassDeclaration(class) = output.ast.kind(body(&output)[0]) else {
        panic!("expected class");
    };
    let NodeKind::ClassBody { body: members } = output.ast.kind(class.body) else {
        panic!("expected class body");
    };
    assert_eq!(members.len(), 3);
    assert!(matches!(
        output.ast.kind(members[1]),
        NodeKind::ClassProperty {
            is_static: true,
            value: None,
            ..
        }
    ));

    let err = parse_with_plugins("class A { constructor = 1; }", &["classProperties"]).unwrap_err();
    assert_eq!(err.message(), "Classes may not have a field named 'constructor'");
}

#[test]
fn test_decorators() {
    let output = parse_with_plugins("@a @b.c(1) class A { @d m() {} }", &["decorators"]).unwrap();
    let NodeKind::ClassDeclaration(class) = output.ast.kind(body(&output)[0]) else {
        panic!("expected class");
    };
    assert_eq!(class.decorators.len(), 2);
    let NodeKind::ClassBody { body: members } = output.ast.kind(class.body) else {
        panic!("expected class body");
    };
    let NodeKind::ClassMethod { decorators, .. } = output.ast.kind(members[0]) else {
        panic!("expected method");
    };
    assert_eq!(decorators.len(), 1);

    let err = parse_with_plugins("class A { @d }", &["decorators"]).unwrap_err();
    assert_eq!(err.message(), "You have trailing decorators with no method");
}

#[test]
fn test_do_expressions() {
    let output = parse_with_plugins("x = do { 1; };", &["doExpressions"]).unwrap();
    let NodeKind::AssignmentExpression { right, .. } = output.ast.kind(single_expression(&output)) else {
        panic!("expected assignment");
    };
    assert_eq!(output.ast.node_type(*right), NodeType::DoExpression);

    assert!(parse_with_plugins("x = do { 1; };", &[]).is_err());
}

#[test]
fn test_object_rest_spread() {
    let output = parse_with_plugins("({ a, ...rest } = obj); x = { ...y };", &["objectRestSpread"]).unwrap();
    assert_eq!(body(&output).len(), 2);
}

#[test]
fn test_export_namespace_from() {
    let registry = PluginRegistry::with_builtins();
    let options = ParseOptions::new(ember_ir::SourceType::Module);

    let err = parse("export * as ns from 'm';", &options, &registry.load(&[] as &[&str])).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1007);

    let output = parse("export * as ns from 'm';", &options, &registry.load(&["exportExtensions"])).unwrap();
    let NodeKind::ExportNamedDeclaration { specifiers, source, .. } = output.ast.kind(body(&output)[0]) else {
        panic!("expected named export");
    };
    assert_eq!(output.ast.node_type(specifiers[0]), NodeType::ExportNamespaceSpecifier);
    assert!(source.is_some());
}

#[test]
fn test_estree_literals_and_directives() {
    let output = parse_with_plugins("'use strict'; 1; /x/g;", &["estree"]).unwrap();
    assert!(directives(&output).is_empty());
    let statements = body(&output);
    assert_eq!(statements.len(), 3);

    let NodeKind::ExpressionStatement { expression, directive } = output.ast.kind(statements[0]) else {
        panic!("expected statement");
    };
    assert_eq!(directive.map(|d| output.ast.name(d)), Some("use strict"));
    assert!(matches!(
        output.ast.kind(*expression),
        NodeKind::Literal {
            value: LiteralValue::String(_),
            ..
        }
    ));

    let literal_types: Vec<NodeType> = statements
        .iter()
        .map(|&s| match output.ast.kind(s) {
            NodeKind::ExpressionStatement { expression, .. } => output.ast.node_type(*expression),
            _ => NodeType::EmptyStatement,
        })
        .collect();
    assert_eq!(literal_types, [NodeType::Literal, NodeType::Literal, NodeType::Literal]);

    // The directive still switches on strict mode.
    assert!(parse_with_plugins("'use strict'; with (a) {}", &["estree"]).is_err());
}

#[test]
fn test_flow_annotations() {
    let output = parse_with_plugins(
        "let x: number = 1; function f(a: ?string, b: Array<Map<K, V>>): { ok: boolean } {}",
        &["flow"],
    )
    .unwrap();
    let NodeKind::VariableDeclaration { declarations, .. } = output.ast.kind(body(&output)[0]) else {
        panic!("expected declaration");
    };
    let NodeKind::VariableDeclarator { id, .. } = output.ast.kind(declarations[0]) else {
        panic!("expected declarator");
    };
    assert!(matches!(
        output.ast.kind(*id),
        NodeKind::Identifier {
            type_annotation: Some(_),
            ..
        }
    ));

    let NodeKind::FunctionDeclaration(function) = output.ast.kind(body(&output)[1]) else {
        panic!("expected function");
    };
    assert!(function.return_type.is_some());
    let NodeKind::Identifier {
        type_annotation: Some(annotation),
        ..
    } = output.ast.kind(function.params[0])
    else {
        panic!("expected annotated param");
    };
    let NodeKind::TypeAnnotation { type_annotation } = output.ast.kind(*annotation) else {
        panic!("expected annotation");
    };
    assert_eq!(output.ast.node_type(*type_annotation), NodeType::NullableTypeAnnotation);
}

#[test]
fn test_flow_type_alias() {
    let output = parse_with_plugins("type A = 'a' | 'b' & C; type = 1;", &["flow"]).unwrap();
    assert_eq!(
        body_types(&output),
        [NodeType::TypeAlias, NodeType::ExpressionStatement]
    );
    let NodeKind::TypeAlias { right, .. } = output.ast.kind(body(&output)[0]) else {
        panic!("expected alias");
    };
    let NodeKind::UnionTypeAnnotation { types } = output.ast.kind(*right) else {
        panic!("expected union");
    };
    assert_eq!(output.ast.node_type(types[1]), NodeType::IntersectionTypeAnnotation);

    // Without the plugin `type` is an ordinary identifier.
    assert!(parse_with_plugins("type A = 1;", &[]).is_err());
}

#[test]
fn test_flow_arrow_annotations() {
    let output = parse_with_plugins("(x: number): string => x; a ? (b) : c;", &["flow"]).unwrap();
    assert_eq!(body(&output).len(), 2);
}

#[test]
fn test_wildcard_enables_legacy_syntax() {
    let output = parse_with_plugins("@dec class A { x = 1; } let y: T = do { 1; };", &["*"]).unwrap();
    assert_eq!(body(&output).len(), 2);
}

/// `debug;` as a debugger statement.
fn debug_keyword(parser: &mut Parser<'_>) -> Option<ParseResult<NodeId>> {
    if !parser.is_contextual("debug") {
        return None;
    }
    Some(parse_debug_keyword(parser, NodeKind::DebuggerStatement))
}

/// `debug;` as an empty statement.
fn debug_as_empty(parser: &mut Parser<'_>) -> Option<ParseResult<NodeId>> {
    if !parser.is_contextual("debug") {
        return None;
    }
    Some(parse_debug_keyword(parser, NodeKind::EmptyStatement))
}

fn parse_debug_keyword(parser: &mut Parser<'_>, kind: NodeKind) -> ParseResult<NodeId> {
    let start = parser.start();
    parser.bump()?;
    parser.eat(TokenKind::Semi)?;
    Ok(parser.finish_node(kind, start))
}

#[test]
fn test_custom_statement_handler() {
    let mut registry = PluginRegistry::with_builtins();
    registry.register("debugKeyword", |ext: &mut Extensions| ext.statement.push(debug_keyword));
    let options = ParseOptions::default();

    let output = parse("debug; x;", &options, &registry.load(&["debugKeyword"])).unwrap();
    assert_eq!(
        body_types(&output),
        [NodeType::DebuggerStatement, NodeType::ExpressionStatement]
    );

    let output = parse("debug;", &options, &registry.load(&[] as &[&str])).unwrap();
    assert_eq!(body_types(&output), [NodeType::ExpressionStatement]);
}

#[test]
fn test_later_plugin_handlers_win() {
    let mut registry = PluginRegistry::new();
    registry.register("first", |ext: &mut Extensions| ext.statement.push(debug_keyword));
    registry.register("second", |ext: &mut Extensions| ext.statement.push(debug_as_empty));
    let options = ParseOptions::default();

    let output = parse("debug;", &options, &registry.load(&["first", "second"])).unwrap();
    assert_eq!(body_types(&output), [NodeType::EmptyStatement]);

    let output = parse("debug;", &options, &registry.load(&["second", "first"])).unwrap();
    assert_eq!(body_types(&output), [NodeType::DebuggerStatement]);
}
