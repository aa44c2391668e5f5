//! Property tests for the generator.
//!
//! Random expressions are written fully parenthesized, so the source
//! spells out the intended tree. The printed code drops every parenthesis
//! it can; re-parsing it must give back the same tree, in both default
//! and compact output.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::disallowed_types,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    clippy::no_effect_replace,
    reason = "Proptest macros generate code with these patterns"
)]

use ember_codegen::{generate, GeneratorOptions};
use ember_ir::SourceType;
use ember_parse::{parse, ParseOptions, PluginRegistry};
use proptest::prelude::*;

// -- Expression Strategies --

fn leaf_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("1".to_string()),
        Just("1.5".to_string()),
        Just("'s'".to_string()),
        Just("this".to_string()),
    ]
}

fn binary_operator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("+"),
        Just("-"),
        Just("*"),
        Just("/"),
        Just("**"),
        Just("<"),
        Just("==="),
        Just("in"),
        Just("<<"),
        Just("&"),
        Just("|"),
        Just("&&"),
        Just("||"),
        Just("??"),
    ]
}

fn unary_operator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("-"), Just("+"), Just("!"), Just("typeof "), Just("void ")]
}

/// Every compound form wraps its operands in parentheses.
fn expression_strategy() -> impl Strategy<Value = String> {
    leaf_strategy().prop_recursive(4, 48, 3, |inner| {
        prop_oneof![
            (inner.clone(), binary_operator_strategy(), inner.clone())
                .prop_map(|(l, op, r)| format!("(({l}) {op} ({r}))")),
            (unary_operator_strategy(), inner.clone()).prop_map(|(op, e)| format!("({op}({e}))")),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(t, c, a)| format!("(({t}) ? ({c}) : ({a}))")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("(({a}), ({b}))")),
            (inner.clone(), prop::collection::vec(inner.clone(), 0..3)).prop_map(|(callee, args)| {
                let args: Vec<String> = args.iter().map(|arg| format!("({arg})")).collect();
                format!("(({callee})({}))", args.join(", "))
            }),
            (inner.clone(), prop::collection::vec(inner.clone(), 0..2)).prop_map(|(callee, args)| {
                let args: Vec<String> = args.iter().map(|arg| format!("({arg})")).collect();
                format!("(new ({callee})({}))", args.join(", "))
            }),
            inner.clone().prop_map(|e| format!("(({e}).p)")),
            inner.clone().prop_map(|e| format!("(x = ({e}))")),
            inner.clone().prop_map(|e| format!("((a) => ({e}))")),
            inner.clone().prop_map(|e| format!("({{ k: ({e}) }})")),
            (inner.clone(), inner).prop_map(|(a, b)| format!("[({a}), , ({b})]")),
        ]
    })
}

// -- Properties --

fn assert_round_trip(source: &str, options: &GeneratorOptions) {
    let registry = PluginRegistry::with_builtins();
    let plugins = registry.load::<&str>(&[]);
    let parse_options = ParseOptions::new(SourceType::Script);

    let first = parse(source, &parse_options, &plugins).unwrap();
    let code = generate(&first.ast, first.root, options).unwrap();
    let second = parse(&code, &parse_options, &plugins)
        .unwrap_or_else(|err| panic!("output of {source:?} does not parse: {code:?}: {err}"));
    assert!(
        first.ast.structurally_eq(first.root, &second.ast, second.root),
        "{source:?} printed as {code:?}, which parses differently"
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn printed_expressions_reparse_to_the_same_tree(expression in expression_strategy()) {
        let source = format!("({expression});");
        assert_round_trip(&source, &GeneratorOptions::default());
        assert_round_trip(&source, &GeneratorOptions::default().with_compact(true));
    }

    #[test]
    fn printed_statements_reparse_to_the_same_tree(
        test in expression_strategy(),
        body in expression_strategy(),
    ) {
        let source = format!("if ({test}) {{ ({body}); }} else for (;;) if (a) ({body});");
        assert_round_trip(&source, &GeneratorOptions::default());
        assert_round_trip(&source, &GeneratorOptions::default().with_compact(true));
    }
}
