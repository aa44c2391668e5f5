//! Parser tests.
//!
//! Tests are organized into modules by category:
//! - `statements`: statements, directives, labels and loops
//! - `expressions`: precedence, arrows, templates and patterns
//! - `modes`: script vs module, strict mode and module declarations
//! - `plugins`: plugin-gated syntax and custom extension handlers

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod modes;
mod plugins;
mod statements;

use ember_ir::{NodeId, NodeKind, NodeType, SourceType};

use crate::{parse, ActivePlugins, ParseError, ParseOptions, ParseOutput, PluginRegistry};

fn parse_script(source: &str) -> ParseOutput {
    parse(source, &ParseOptions::default(), &ActivePlugins::none()).expect("source should parse")
}

fn parse_module(source: &str) -> ParseOutput {
    parse(source, &ParseOptions::new(SourceType::Module), &ActivePlugins::none()).expect("source should parse")
}

fn parse_with_plugins(source: &str, plugins: &[&str]) -> Result<ParseOutput, ParseError> {
    let registry = PluginRegistry::with_builtins();
    parse(source, &ParseOptions::default(), &registry.load(plugins))
}

fn script_error(source: &str) -> ParseError {
    parse(source, &ParseOptions::default(), &ActivePlugins::none()).expect_err("source should not parse")
}

fn body(output: &ParseOutput) -> Vec<NodeId> {
    match output.ast.kind(output.root) {
        NodeKind::Program { body, .. } => body.clone(),
        other => panic!("expected a program, got {other:?}"),
    }
}

fn directives(output: &ParseOutput) -> Vec<NodeId> {
    match output.ast.kind(output.root) {
        NodeKind::Program { directives, .. } => directives.clone(),
        other => panic!("expected a program, got {other:?}"),
    }
}

fn body_types(output: &ParseOutput) -> Vec<NodeType> {
    body(output).into_iter().map(|id| output.ast.node_type(id)).collect()
}

/// Expression of the only statement in the program.
fn single_expression(output: &ParseOutput) -> NodeId {
    let statements = body(output);
    assert_eq!(statements.len(), 1, "expected one statement");
    match output.ast.kind(statements[0]) {
        NodeKind::ExpressionStatement { expression, .. } => *expression,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}
