//! Built-in syntax plugins.
//!
//! Most plugins gate syntax the core grammar already implements and
//! install nothing. `flow` and `doExpressions` contribute handlers.

use ember_ir::{NodeId, NodeKind, TokenKind};

use super::{Extensions, PluginRegistry};
use crate::{ParseResult, Parser};

/// Plugins that only switch on core syntax.
const GATE_PLUGINS: &[&str] = &[
    "estree",
    "jsx",
    "objectRestSpread",
    "decorators",
    "classProperties",
    "exportExtensions",
    "asyncGenerators",
    "functionBind",
    "functionSent",
    "dynamicImport",
];

pub(super) fn register_all(registry: &mut PluginRegistry) {
    for name in GATE_PLUGINS {
        registry.register(*name, |_: &mut Extensions| {});
    }
    registry.register("flow", install_flow);
    registry.register("doExpressions", install_do_expressions);
}

fn install_flow(extensions: &mut Extensions) {
    extensions.statement.push(flow_type_alias);
    extensions.type_annotation = Some(flow_type_annotation);
}

fn install_do_expressions(extensions: &mut Extensions) {
    extensions.atom.push(do_expression);
}

/// `type Name = Type;`
fn flow_type_alias(parser: &mut Parser<'_>) -> Option<ParseResult<NodeId>> {
    if !parser.is_contextual("type") {
        return None;
    }
    match parser.lookahead() {
        Ok(next) if next.kind == TokenKind::Ident && !next.newline_before => {}
        Ok(_) => return None,
        Err(err) => return Some(Err(err)),
    }
    Some(parser.parse_flow_type_alias())
}

fn flow_type_annotation(parser: &mut Parser<'_>) -> ParseResult<NodeId> {
    parser.parse_flow_type_annotation()
}

/// `do { ... }` in expression position.
fn do_expression(parser: &mut Parser<'_>) -> Option<ParseResult<NodeId>> {
    if !parser.at(TokenKind::Do) {
        return None;
    }
    Some(parse_do_expression(parser))
}

fn parse_do_expression(parser: &mut Parser<'_>) -> ParseResult<NodeId> {
    let start = parser.start();
    parser.bump()?;
    let body = parser.parse_block()?;
    Ok(parser.finish_node(NodeKind::DoExpression { body }, start))
}
