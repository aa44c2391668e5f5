use ember_diagnostic::ErrorCode;
use ember_ir::{NodeKind, NodeType, SourceType};
use pretty_assertions::assert_eq;

use super::{body, body_types, parse_module, parse_script, script_error};
use crate::{parse, ActivePlugins, ParseError, ParseOptions};

fn module_error(source: &str) -> ParseError {
    parse(source, &ParseOptions::new(SourceType::Module), &ActivePlugins::none()).unwrap_err()
}

#[test]
fn test_await_is_identifier_in_script() {
    let output = parse_script("var await = 1; await(2);");
    assert_eq!(
        body_types(&output),
        [NodeType::VariableDeclaration, NodeType::ExpressionStatement]
    );
}

#[test]
fn test_await_is_reserved_in_module() {
    let err = module_error("var await = 1;");
    assert_eq!(err.code(), ErrorCode::E1003);
    assert_eq!(err.message(), "The keyword 'await' is reserved");

    let err = module_error("await;");
    assert_eq!(err.code(), ErrorCode::E1003);
}

#[test]
fn test_await_inside_async_function() {
    let output = parse_script("async function f() { await x; }");
    let NodeKind::FunctionDeclaration(function) = output.ast.kind(body(&output)[0]) else {
        panic!("expected a function");
    };
    assert!(function.is_async);
    let types: Vec<NodeType> = output
        .ast
        .descendants(function.body)
        .into_iter()
        .map(|id| output.ast.node_type(id))
        .collect();
    assert!(types.contains(&NodeType::AwaitExpression));

    let err = script_error("async function f() { var await; }");
    assert_eq!(err.message(), "Can not use 'await' as identifier inside an async function");
}

#[test]
fn test_module_code_is_strict() {
    let err = module_error("with (a) {}");
    assert_eq!(err.code(), ErrorCode::E1006);

    let err = module_error("var static = 1;");
    assert_eq!(err.code(), ErrorCode::E1003);

    parse_script("with (a) {} var static = 1;");
}

#[test]
fn test_delete_identifier_in_strict_code() {
    let err = module_error("delete x;");
    assert_eq!(err.code(), ErrorCode::E1003);
    parse_script("delete x; delete o.p;");
}

#[test]
fn test_import_requires_module() {
    let err = script_error("import a from 'm';");
    assert_eq!(err.code(), ErrorCode::E1005);
    assert_eq!(err.message(), "'import' and 'export' may appear only with 'sourceType: module'");

    let err = module_error("{ import a from 'm'; }");
    assert_eq!(err.code(), ErrorCode::E1005);
    assert_eq!(err.message(), "'import' and 'export' may only appear at the top level");

    let options = ParseOptions::default().with_allow_import_export_everywhere(true);
    let output = parse("if (x) { import a from 'm'; }", &options, &ActivePlugins::none()).unwrap();
    assert_eq!(body_types(&output), [NodeType::IfStatement]);
}

#[test]
fn test_import_forms() {
    let output = parse_module(
        "import 'side-effect';
         import a, { b as c, d, default as e } from 'm';
         import * as ns from 'n';
         import f, * as g from 'o';",
    );
    let specifier_counts: Vec<usize> = body(&output)
        .into_iter()
        .map(|id| match output.ast.kind(id) {
            NodeKind::ImportDeclaration { specifiers, .. } => specifiers.len(),
            other => panic!("expected import, got {other:?}"),
        })
        .collect();
    assert_eq!(specifier_counts, [0, 4, 1, 2]);
}

#[test]
fn test_import_keyword_needs_alias() {
    let err = module_error("import { default } from 'm';");
    assert_eq!(err.code(), ErrorCode::E1003);
}

#[test]
fn test_export_forms() {
    let output = parse_module(
        "export default function () {}
         export const z = 1;
         export function f() {}
         export class C {}
         export { z as y, f };
         export { x } from 'm';
         export * from 'n';",
    );
    assert_eq!(
        body_types(&output),
        [
            NodeType::ExportDefaultDeclaration,
            NodeType::ExportNamedDeclaration,
            NodeType::ExportNamedDeclaration,
            NodeType::ExportNamedDeclaration,
            NodeType::ExportNamedDeclaration,
            NodeType::ExportNamedDeclaration,
            NodeType::ExportAllDeclaration,
        ]
    );

    let output = parse_module("export default a + b;");
    let NodeKind::ExportDefaultDeclaration { declaration } = output.ast.kind(body(&output)[0]) else {
        panic!("expected default export");
    };
    assert_eq!(output.ast.node_type(*declaration), NodeType::BinaryExpression);
}

#[test]
fn test_export_reserved_local() {
    let err = module_error("export { if };");
    assert_eq!(err.code(), ErrorCode::E1003);
    parse_module("export { if } from 'm';");
}

#[test]
fn test_export_requires_declaration() {
    let err = module_error("export a;");
    assert_eq!(err.code(), ErrorCode::E1001);
}

#[test]
fn test_lex_errors_pass_through() {
    let err = script_error("'abc");
    assert!(matches!(err, ParseError::Lex(_)));
    assert_eq!(err.code(), ErrorCode::E0001);
}

#[test]
fn test_error_position() {
    let err = script_error("a;\nb c;");
    let position = err.position();
    assert_eq!((position.line, position.column), (2, 2));
}
