#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use ember_diagnostic::{CodeFrameOptions, ErrorCode};
use ember_ir::{NodeType, SourceType};
use ember_parse::PluginRegistry;
use ember_traverse::{HandlerResult, NodePath, PluginOptions, TransformRegistry, TransformSpec, Visitor};
use pretty_assertions::assert_eq;
use rayon::prelude::*;

use crate::{compile, render_error, CompileOptions, CompileOutput, Compiler, ErrorKind};

fn binding_stats(output: &CompileOutput, name: &str) -> (u32, usize, bool) {
    let scopes = &output.scopes;
    let id = scopes
        .resolve(&output.ast, scopes.root(), name)
        .unwrap_or_else(|| panic!("`{name}` is not bound"));
    let binding = scopes.binding(id);
    (
        binding.references(),
        binding.constant_violations().len(),
        binding.is_constant(),
    )
}

fn transforms(names: &[&str]) -> CompileOptions {
    CompileOptions::default().with_transforms(names.iter().map(|name| TransformSpec::new(*name)).collect())
}

#[test]
fn test_compile_round_trips_source() {
    let output = compile("let y = 1; console.log(y + y);", &CompileOptions::default()).unwrap();
    assert_eq!(output.code, "let y = 1;\nconsole.log(y + y);");
    assert_eq!(binding_stats(&output, "y"), (2, 0, true));
}

#[test]
fn test_const_reassignment_is_a_violation() {
    let output = compile("const x = 1; x = 2;", &CompileOptions::default()).unwrap();
    assert_eq!(binding_stats(&output, "x"), (0, 1, false));
}

#[test]
fn test_strict_mode_is_idempotent() {
    let options = transforms(&["strict-mode"]);
    let once = compile("a();", &options).unwrap();
    assert_eq!(once.code, "\"use strict\";\na();");
    let twice = compile(&once.code, &options).unwrap();
    assert_eq!(twice.code, once.code);
}

#[test]
fn test_strict_mode_disabled_by_option() {
    let spec = TransformSpec::new("strict-mode").with_options(PluginOptions::new().with("strict", false));
    let output = compile("a();", &CompileOptions::default().with_transforms(vec![spec])).unwrap();
    assert_eq!(output.code, "a();");
}

#[test]
fn test_transforms_run_in_one_pass() {
    let output = compile(
        "const x = 1; f(x);",
        &transforms(&["inline-constants", "strict-mode", "inline-constants"]),
    )
    .unwrap();
    assert_eq!(output.code, "\"use strict\";\nconst x = 1;\nf(1);");
    assert_eq!(binding_stats(&output, "x"), (0, 0, true));
}

#[test]
fn test_syntax_plugins_and_generator_options() {
    let options = CompileOptions::default()
        .with_plugins(["flow"])
        .with_generator(ember_codegen::GeneratorOptions::default().with_compact(true));
    let output = compile("let x: ?number = 1; if (x) { f(x); }", &options).unwrap();
    assert_eq!(output.code, "let x:?number=1;if(x){f(x);}");
}

#[test]
fn test_await_depends_on_source_type() {
    let script = compile("await;", &CompileOptions::default()).unwrap();
    assert_eq!(script.code, "await;");

    let module = CompileOptions::default().with_source_type(SourceType::Module);
    let err = compile("await;", &module).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn test_syntax_error_renders_a_code_frame() {
    let source = "let a = 1;\nlet x = ;\nlet b = 2;";
    let err = compile(source, &CompileOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.code(), ErrorCode::E1001);
    let position = err.position().unwrap();
    assert_eq!((position.line, position.column), (2, 8));

    let rendered = render_error(source, &err, &CodeFrameOptions::default().with_context(1, 1));
    let (header, frame) = rendered.split_once('\n').unwrap();
    assert!(header.starts_with("E1001: Unexpected token"), "{header}");
    assert_eq!(frame, "  1 | let a = 1;\n> 2 | let x = ;\n    |         ^\n  3 | let b = 2;");
}

#[test]
fn test_lexical_error() {
    let err = compile("let s = 'abc", &CompileOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);
    assert_eq!(err.code(), ErrorCode::E0001);
    assert_eq!(err.message(), "Unterminated string constant");
    assert_eq!(err.to_diagnostic().code, ErrorCode::E0001);
}

#[test]
fn test_duplicate_binding() {
    let source = "var a;\nlet a;";
    let err = compile(source, &CompileOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateBinding);
    assert_eq!(err.code(), ErrorCode::E2001);
    assert!(err.position().is_none());
    assert!(err.span().is_some());

    let rendered = render_error(source, &err, &CodeFrameOptions::default());
    assert!(rendered.starts_with("E2001: Duplicate declaration \"a\"\n"), "{rendered}");
    assert!(rendered.contains("> 2 | let a;"), "{rendered}");
}

#[test]
fn test_unknown_transform() {
    let err = compile("a;", &transforms(&["nope"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transform);
    assert!(err.span().is_none());
    assert_eq!(
        render_error("a;", &err, &CodeFrameOptions::default()),
        "E3001: unknown transform `nope`"
    );
}

struct FailOnIdentifier;

impl Visitor for FailOnIdentifier {
    fn name(&self) -> &str {
        "fail"
    }

    fn enter(&mut self, path: &mut NodePath<'_>) -> HandlerResult {
        if path.node_type() == NodeType::Identifier {
            return Err("boom".into());
        }
        Ok(())
    }
}

#[test]
fn test_handler_failure_stops_the_unit() {
    let mut registry = TransformRegistry::with_builtins();
    registry.register("fail", |_| Box::new(FailOnIdentifier));
    let compiler = Compiler::new(Arc::new(PluginRegistry::with_builtins()), Arc::new(registry));

    let source = "1;\nfoo;";
    let err = compiler.compile(source, &transforms(&["fail"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transform);
    assert_eq!(err.code(), ErrorCode::E3001);
    assert_eq!(err.message(), "fail: boom");

    let rendered = render_error(source, &err, &CodeFrameOptions::default());
    assert_eq!(rendered, "E3001: fail: boom\n  1 | 1;\n> 2 | foo;\n    | ^");
}

#[test]
fn test_units_compile_in_parallel() {
    let compiler = Compiler::with_builtins();
    let options = transforms(&["strict-mode"]);
    let sources: Vec<String> = (0..32).map(|i| format!("let v{i} = {i};")).collect();
    let outputs: Vec<String> = sources
        .par_iter()
        .map(|source| compiler.compile(source, &options).unwrap().code)
        .collect();
    for (i, code) in outputs.iter().enumerate() {
        assert_eq!(code, &format!("\"use strict\";\nlet v{i} = {i};"));
    }
}
