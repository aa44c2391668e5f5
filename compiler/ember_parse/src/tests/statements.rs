use ember_diagnostic::ErrorCode;
use ember_ir::{NodeKind, NodeType, VarKind};
use pretty_assertions::assert_eq;

use super::{body, body_types, directives, parse_script, script_error};
use crate::{parse, ActivePlugins, ParseOptions};

#[test]
fn test_statement_kinds() {
    let output = parse_script("var a = 1; let b; if (a) {} else ; while (a) break; debugger;");
    assert_eq!(
        body_types(&output),
        [
            NodeType::VariableDeclaration,
            NodeType::VariableDeclaration,
            NodeType::IfStatement,
            NodeType::WhileStatement,
            NodeType::DebuggerStatement,
        ]
    );
}

#[test]
fn test_let_as_identifier_in_script() {
    let output = parse_script("let = 1;");
    assert_eq!(body_types(&output), [NodeType::ExpressionStatement]);
}

#[test]
fn test_var_declarators() {
    let output = parse_script("const a = 1, [b, c] = d;");
    let NodeKind::VariableDeclaration { kind, declarations } = output.ast.kind(body(&output)[0]) else {
        panic!("expected a declaration");
    };
    assert_eq!(*kind, VarKind::Const);
    assert_eq!(declarations.len(), 2);
    let NodeKind::VariableDeclarator { id, .. } = output.ast.kind(declarations[1]) else {
        panic!("expected a declarator");
    };
    assert_eq!(output.ast.node_type(*id), NodeType::ArrayPattern);
}

#[test]
fn test_declarator_requirements() {
    let err = script_error("const a;");
    assert_eq!(err.message(), "Missing initializer in const declaration");

    let err = script_error("var [a];");
    assert_eq!(err.message(), "Complex binding patterns require an initialization value");
}

#[test]
fn test_directives_split_from_body() {
    let output = parse_script("'use strict'; \"other\"; x; 'late';");
    let found = directives(&output);
    assert_eq!(found.len(), 2);
    let NodeKind::Directive { value, raw } = output.ast.kind(found[0]) else {
        panic!("expected a directive");
    };
    assert_eq!(output.ast.name(*value), "use strict");
    assert_eq!(raw.map(|raw| output.ast.name(raw)), Some("'use strict'"));
    assert_eq!(
        body_types(&output),
        [NodeType::ExpressionStatement, NodeType::ExpressionStatement]
    );
}

#[test]
fn test_parenthesized_string_is_not_a_directive() {
    let output = parse_script("('use strict'); with (a) {}");
    assert!(directives(&output).is_empty());
    assert_eq!(body(&output).len(), 2);
}

#[test]
fn test_use_strict_directive_makes_body_strict() {
    let err = script_error("'use strict'; with (a) {}");
    assert_eq!(err.code(), ErrorCode::E1006);

    let err = script_error("function f() { 'use strict'; var eval; }");
    assert_eq!(err.code(), ErrorCode::E1003);
    assert_eq!(err.message(), "Binding eval in strict mode");

    // Strictness ends with the function.
    parse_script("function f() { 'use strict'; } with (a) {}");
}

#[test]
fn test_hashbang_is_kept() {
    let output = parse_script("#!/usr/bin/env node\nx;");
    let NodeKind::Program { interpreter, .. } = output.ast.kind(output.root) else {
        panic!("expected a program");
    };
    assert_eq!(interpreter.map(|name| output.ast.name(name)), Some("/usr/bin/env node"));
    assert_eq!(body(&output).len(), 1);
}

#[test]
fn test_program_spans_whole_source() {
    let source = "  a;\n  b;  ";
    let output = parse_script(source);
    let span = output.ast.span(output.root);
    assert_eq!((span.start, span.end as usize), (0, source.len()));
}

#[test]
fn test_for_variants() {
    let output = parse_script(
        "for (var i = 0; i < n; i++) {}
         for (const k in o) {}
         for (let [a, b] of pairs) {}
         for ({ x } of list);
         for (;;) break;",
    );
    assert_eq!(
        body_types(&output),
        [
            NodeType::ForStatement,
            NodeType::ForInStatement,
            NodeType::ForOfStatement,
            NodeType::ForOfStatement,
            NodeType::ForStatement,
        ]
    );
    let NodeKind::ForOfStatement { left, .. } = output.ast.kind(body(&output)[3]) else {
        panic!("expected for-of");
    };
    assert_eq!(output.ast.node_type(*left), NodeType::ObjectPattern);
}

#[test]
fn test_in_operator_allowed_inside_for_parens() {
    let output = parse_script("for (var a = (b in c); a;) {}");
    assert_eq!(body_types(&output), [NodeType::ForStatement]);
}

#[test]
fn test_for_in_initializer_rejected() {
    let err = script_error("for (let i = 0 in o);");
    assert_eq!(err.code(), ErrorCode::E1006);
    assert_eq!(err.message(), "for-in/of loop variable declaration may not have an initializer");
}

#[test]
fn test_labels() {
    parse_script("outer: for (;;) { inner: while (x) { continue outer; break inner; } }");
    parse_script("block: { break block; }");

    let err = script_error("while (x) { break missing; }");
    assert_eq!(err.code(), ErrorCode::E1008);
    assert_eq!(err.message(), "Unknown label 'missing'");

    let err = script_error("a: a: ;");
    assert_eq!(err.code(), ErrorCode::E1008);

    let err = script_error("block: { continue block; }");
    assert_eq!(err.message(), "Unsyntactic continue");

    let err = script_error("continue;");
    assert_eq!(err.message(), "Unsyntactic continue");

    let err = script_error("break;");
    assert_eq!(err.message(), "Unsyntactic break");
}

#[test]
fn test_labels_do_not_cross_functions() {
    let err = script_error("outer: while (x) { (function () { break outer; }); }");
    assert_eq!(err.code(), ErrorCode::E1008);
}

#[test]
fn test_break_inside_switch() {
    let output = parse_script("switch (x) { case 1: f(); break; default: g(); }");
    let NodeKind::SwitchStatement { cases, .. } = output.ast.kind(body(&output)[0]) else {
        panic!("expected a switch");
    };
    assert_eq!(cases.len(), 2);
}

#[test]
fn test_multiple_default_clauses() {
    let err = script_error("switch (x) { default: default: }");
    assert_eq!(err.message(), "Multiple default clauses");
}

#[test]
fn test_return_outside_function() {
    let err = script_error("return 1;");
    assert_eq!(err.code(), ErrorCode::E1006);

    let options = ParseOptions::default().with_allow_return_outside_function(true);
    let output = parse("return 1;", &options, &ActivePlugins::none()).unwrap();
    assert_eq!(body_types(&output), [NodeType::ReturnStatement]);
}

#[test]
fn test_try_forms() {
    let output = parse_script("try {} catch (e) {} try {} finally {} try {} catch {}");
    let statements = body(&output);
    assert_eq!(statements.len(), 3);
    let NodeKind::TryStatement { handler, .. } = output.ast.kind(statements[2]) else {
        panic!("expected try");
    };
    let NodeKind::CatchClause { param, .. } = output.ast.kind(handler.unwrap()) else {
        panic!("expected catch");
    };
    assert!(param.is_none());

    let err = script_error("try {}");
    assert_eq!(err.message(), "Missing catch or finally clause");
}

#[test]
fn test_throw_requires_same_line() {
    let err = script_error("throw\nnew Error();");
    assert_eq!(err.message(), "Illegal newline after throw");
}

#[test]
fn test_semicolon_insertion() {
    let output = parse_script("a = 1\nb = 2\nreturn_ = a\n++b");
    assert_eq!(body(&output).len(), 4);

    let err = script_error("a = 1 b = 2");
    assert_eq!(err.code(), ErrorCode::E1001);
}
