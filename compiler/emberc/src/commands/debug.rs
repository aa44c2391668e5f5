//! Debug commands: `lex` and `parse` for inspecting the front end.

use ember_diagnostic::span_utils::LineOffsetTable;
use ember_diagnostic::CodeFrameOptions;
use ember_ir::NodeKind;
use ember_parse::{parse, ParseOptions, PluginRegistry};

use super::{read_file, report, BuildArgs};

/// Tokenize a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let tokens = match ember_lexer::tokenize(&content) {
        Ok(tokens) => tokens,
        Err(err) => {
            report(&err.to_diagnostic(), path, &content, CodeFrameOptions::default());
            std::process::exit(1);
        }
    };

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!("  {:?} @ {}", token.kind, token.start);
    }
}

/// Parse a file and display a summary of its top-level statements.
pub fn parse_file(path: &str, args: &BuildArgs) {
    let content = read_file(path);
    let registry = PluginRegistry::with_builtins();
    let plugins = registry.load(&args.plugins);
    let output = match parse(&content, &ParseOptions::new(args.source_type), &plugins) {
        Ok(output) => output,
        Err(err) => {
            report(&err.to_diagnostic(), path, &content, CodeFrameOptions::default());
            std::process::exit(1);
        }
    };

    let (directives, body) = match output.ast.kind(output.root) {
        NodeKind::Program { directives, body, .. } => (directives.as_slice(), body.as_slice()),
        _ => (&[][..], &[][..]),
    };

    println!("Parse result for '{path}':");
    println!("  Source type: {:?}", args.source_type);
    println!("  Plugins: {}", plugins.names().join(", "));
    println!("  Nodes: {}", output.ast.len());
    println!("  Comments: {}", output.comments.len());
    println!("  Directives: {}", directives.len());
    println!("  Statements: {}", body.len());

    if !body.is_empty() {
        let table = LineOffsetTable::build(&content);
        println!();
        println!("Statements:");
        for &statement in body {
            let (line, col) = table.offset_to_line_col(&content, output.ast.span(statement).start);
            println!("  {} @ {line}:{col}", output.ast.node_type(statement));
        }
    }
}
