use std::cell::RefCell;
use std::rc::Rc;

use ember_diagnostic::ErrorCode;
use ember_ir::{NodeId, NodeKind, NodeType, Span, VarKind};
use pretty_assertions::assert_eq;

use super::{path_error, Unit};
use crate::{matches_pattern, Handlers, HandlerResult, NodePath, PathError};

/// Run `handler` on the identifier named `name`.
fn on_identifier(
    unit: &mut Unit,
    name: &'static str,
    mut handler: impl FnMut(&mut NodePath<'_>) -> HandlerResult + 'static,
) -> Result<(), crate::TransformError> {
    let mut visitor = Handlers::new("test").on_enter(NodeType::Identifier, move |path| {
        if path.ast().identifier_name(path.node()) == Some(name) {
            handler(path)?;
        }
        Ok(())
    });
    unit.run(&mut [&mut visitor])
}

fn let_declaration(path: &mut NodePath<'_>, name: &str, value: f64) -> NodeId {
    let ast = path.ast_mut();
    let id = ast.identifier(name);
    let init = ast.numeric_literal(value);
    let declarator = ast.alloc(NodeKind::VariableDeclarator { id, init: Some(init) }, Span::DUMMY);
    ast.alloc(
        NodeKind::VariableDeclaration {
            kind: VarKind::Let,
            declarations: vec![declarator],
        },
        Span::DUMMY,
    )
}

fn statement_of(path: &mut NodePath<'_>, name: &str) -> NodeId {
    let ast = path.ast_mut();
    let id = ast.identifier(name);
    ast.expression_statement(id)
}

/// Name read by each statement in `ids`, or its type when it is not an
/// identifier statement.
fn statement_names(ast: &ember_ir::Ast, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|id| match ast.kind(*id) {
            NodeKind::ExpressionStatement { expression, .. } => {
                ast.identifier_name(*expression).unwrap_or_default().to_owned()
            }
            other => other.node_type().to_string(),
        })
        .collect()
}

// Introspection

#[test]
fn test_parent_key_and_siblings() {
    let mut unit = Unit::script("f(a, b, c);");
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    on_identifier(&mut unit, "b", move |path| {
        let sibling = path.get_sibling(2).unwrap();
        *sink.borrow_mut() = Some((
            path.parent_key(),
            path.list_index(),
            path.is_in_list(),
            path.ast().identifier_name(sibling).map(str::to_owned),
            path.ast().node_type(path.parent().unwrap()),
        ));
        Ok(())
    })
    .unwrap();
    assert_eq!(
        seen.borrow().clone(),
        Some((
            Some("arguments"),
            Some(1),
            true,
            Some("c".to_owned()),
            NodeType::CallExpression
        ))
    );
}

#[test]
fn test_prev_and_next_siblings() {
    let mut unit = Unit::script("a; b; c;");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut visitor = Handlers::new("test").on_enter(NodeType::ExpressionStatement, move |path| {
        let ast = path.ast();
        let prev = path.get_prev_sibling().map(|id| statement_names(ast, &[id]));
        let next = path.get_next_sibling().map(|id| statement_names(ast, &[id]));
        let rest = statement_names(ast, &path.get_all_next_siblings());
        sink.borrow_mut().push((prev, next, rest));
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    let names = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
    assert_eq!(
        *seen.borrow(),
        vec![
            (None, Some(names(&["b"])), names(&["b", "c"])),
            (Some(names(&["a"])), Some(names(&["c"])), names(&["c"])),
            (Some(names(&["b"])), None, Vec::new()),
        ]
    );
}

#[test]
fn test_siblings_outside_a_list() {
    let mut unit = Unit::script("a;");
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    on_identifier(&mut unit, "a", move |path| {
        *sink.borrow_mut() = Some((
            path.get_prev_sibling(),
            path.get_next_sibling(),
            path.get_all_next_siblings(),
        ));
        Ok(())
    })
    .unwrap();
    assert_eq!(*seen.borrow(), Some((None, None, Vec::new())));
}

#[test]
fn test_completion_records() {
    let source = "
        if (a) { b; } else { while (c) d; }
        function f() { try { e; } catch (err) { g; } finally { h; } }
        switch (x) { case 1: i; break; default: j; }
        label: { k; }
    ";
    let mut unit = Unit::script(source);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut visitor = Handlers::new("test");
    for node_type in [
        NodeType::Program,
        NodeType::IfStatement,
        NodeType::FunctionDeclaration,
        NodeType::SwitchStatement,
        NodeType::LabeledStatement,
    ] {
        let sink = Rc::clone(&seen);
        visitor = visitor.on_enter(node_type, move |path| {
            let records = path.get_completion_records();
            sink.borrow_mut().push(statement_names(path.ast(), &records));
            Ok(())
        });
    }
    unit.run(&mut [&mut visitor]).unwrap();
    let names = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
    assert_eq!(
        *seen.borrow(),
        vec![
            names(&["k"]),
            names(&["b", "d"]),
            names(&["e", "g", "h"]),
            names(&["i", "j"]),
            names(&["k"]),
        ]
    );
}

#[test]
fn test_references_import() {
    let source = "
        import def, { named as local } from \"mod\";
        import * as ns from \"mod\";
        import other from \"elsewhere\";
        let plain;
        def; local; ns; other; plain;
    ";
    let mut unit = Unit::module(source);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut visitor = Handlers::new("test").on_enter(NodeType::Identifier, move |path| {
        if !path.is_referenced_identifier() {
            return Ok(());
        }
        let name = path.ast().identifier_name(path.node()).unwrap_or_default().to_owned();
        let matches = [
            path.references_import("mod", None),
            path.references_import("mod", Some("default")),
            path.references_import("mod", Some("named")),
            path.references_import("mod", Some("*")),
            path.references_import("mod", Some("local")),
        ];
        sink.borrow_mut().push((name, matches));
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![
            ("def".to_owned(), [true, true, false, false, false]),
            ("local".to_owned(), [true, false, true, false, false]),
            ("ns".to_owned(), [true, false, false, true, false]),
            ("other".to_owned(), [false; 5]),
            ("plain".to_owned(), [false; 5]),
        ]
    );
}

#[test]
fn test_get_fields_by_name() {
    let mut unit = Unit::script("if (a) b; else c;");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut visitor = Handlers::new("test").on_enter(NodeType::IfStatement, move |path| {
        for field in ["test", "consequent", "alternate", "missing"] {
            let node = path.get_node(field).map(|id| path.ast().node_type(id));
            sink.borrow_mut().push(node);
        }
        assert!(path.get("alternate").is_some());
        assert!(path.get("missing").is_none());
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![
            Some(NodeType::Identifier),
            Some(NodeType::ExpressionStatement),
            Some(NodeType::ExpressionStatement),
            None
        ]
    );
}

#[test]
fn test_statement_parent_and_find_parent() {
    let mut unit = Unit::script("function f() { g(a + 1); }");
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    on_identifier(&mut unit, "a", move |path| {
        let statement = path.get_statement_parent().map(|id| path.ast().node_type(id));
        let function = path
            .find_parent(|ast, id| ast.node_type(id).is_function())
            .map(|id| path.ast().node_type(id));
        let call = path.find_parent(|ast, id| ast.node_type(id) == NodeType::CallExpression);
        *sink.borrow_mut() = Some((statement, function, call.is_some(), path.ancestors().len()));
        Ok(())
    })
    .unwrap();
    // BinaryExpression, CallExpression, ExpressionStatement, BlockStatement,
    // FunctionDeclaration, Program.
    assert_eq!(
        *seen.borrow(),
        Some((
            Some(NodeType::ExpressionStatement),
            Some(NodeType::FunctionDeclaration),
            true,
            6
        ))
    );
}

#[test]
fn test_matches_pattern() {
    let unit = Unit::script("process.env.NODE_ENV; a['b'].c; this.x; a[b].c; f().x;");
    let body = unit.body();
    let expression = |index: usize| match unit.ast.kind(body[index]) {
        NodeKind::ExpressionStatement { expression, .. } => *expression,
        other => panic!("expected an expression statement, got {other:?}"),
    };

    assert!(matches_pattern(&unit.ast, expression(0), "process.env.NODE_ENV", false));
    assert!(!matches_pattern(&unit.ast, expression(0), "process.env", false));
    assert!(!matches_pattern(&unit.ast, expression(0), "process.env.NODE_ENV.x", false));
    assert!(matches_pattern(&unit.ast, expression(0), "process.env.NODE_ENV.x", true));
    assert!(matches_pattern(&unit.ast, expression(1), "a.b.c", false));
    assert!(matches_pattern(&unit.ast, expression(2), "this.x", false));
    assert!(!matches_pattern(&unit.ast, expression(3), "a.b.c", false));
    assert!(!matches_pattern(&unit.ast, expression(4), "f.x", false));
}

#[test]
fn test_is_referenced_identifier() {
    let mut unit = Unit::script("obj.prop; ({ key: value }); label: for (;;) break label;");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut visitor = Handlers::new("test").on_enter(NodeType::Identifier, move |path| {
        let name = path.ast().identifier_name(path.node()).unwrap_or_default().to_owned();
        sink.borrow_mut().push((name, path.is_referenced_identifier()));
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    let expected: Vec<(String, bool)> = [
        ("obj", true),
        ("prop", false),
        ("key", false),
        ("value", true),
        ("label", false),
        ("label", false),
    ]
    .into_iter()
    .map(|(name, referenced)| (name.to_owned(), referenced))
    .collect();
    assert_eq!(*seen.borrow(), expected);
}

#[test]
fn test_scope_and_binding_lookup() {
    let mut unit = Unit::script("let a = 1; function f(a) { a; }");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    on_identifier(&mut unit, "a", move |path| {
        if path.is_referenced_identifier() {
            let binding = path.get_binding("a").unwrap();
            let kind = path.scopes().binding(binding).kind();
            let scope = path.scopes().scope(path.scope()).kind();
            sink.borrow_mut().push((kind, scope));
        }
        Ok(())
    })
    .unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![(ember_scope::BindingKind::Param, ember_scope::ScopeKind::Function)]
    );
}

#[test]
fn test_generate_uid_avoids_bound_names() {
    let mut unit = Unit::script("let _tmp = 1; tmp;");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    on_identifier(&mut unit, "tmp", move |path| {
        let first = path.generate_uid("tmp");
        let second = path.generate_uid("tmp");
        let names = [first, second].map(|name| path.ast().name(name).to_owned());
        sink.borrow_mut().extend(names);
        Ok(())
    })
    .unwrap();
    assert_eq!(*seen.borrow(), vec!["_tmp2", "_tmp3"]);
}

// Replacement

#[test]
fn test_replace_with_updates_references() {
    let mut unit = Unit::script("let x = 1; f(x, x);");
    let mut replaced = false;
    on_identifier(&mut unit, "x", move |path| {
        if path.is_referenced_identifier() && !replaced {
            replaced = true;
            let literal = path.ast_mut().numeric_literal(2.0);
            path.replace_with(literal)?;
        }
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "let x = 1;\nf(2, x);");
    assert_eq!(unit.references("x"), 1);
}

#[test]
fn test_replace_statement_with_expression_wraps_it() {
    let mut unit = Unit::script("debugger;");
    let mut visitor = Handlers::new("test").on_enter(NodeType::DebuggerStatement, |path| {
        let id = path.ast_mut().identifier("x");
        path.replace_with(id)?;
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    assert_eq!(unit.print(), "x;");
}

#[test]
fn test_replace_expression_with_statement_fails() {
    let mut unit = Unit::script("a;");
    let err = on_identifier(&mut unit, "a", |path| {
        let statement = path.ast_mut().alloc(NodeKind::DebuggerStatement, Span::DUMMY);
        path.replace_with(statement)?;
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(
        path_error(&err),
        PathError::StatementForExpression {
            node_type: NodeType::Identifier
        }
    ));
    assert_eq!(err.code(), ErrorCode::E3002);
}

#[test]
fn test_root_cannot_be_replaced_or_removed() {
    let mut unit = Unit::script("a;");
    let mut visitor = Handlers::new("test").on_enter(NodeType::Program, |path| {
        path.remove()?;
        Ok(())
    });
    let err = unit.run(&mut [&mut visitor]).unwrap_err();
    assert!(matches!(path_error(&err), PathError::Root("removed")));
}

#[test]
fn test_second_mutation_after_removal_fails() {
    let mut unit = Unit::script("f(a);");
    let err = on_identifier(&mut unit, "a", |path| {
        path.remove()?;
        let id = path.ast_mut().identifier("b");
        path.replace_with(id)?;
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(path_error(&err), PathError::Removed));
}

#[test]
fn test_replace_with_multiple_in_statement_list() {
    let mut unit = Unit::script("a; z;");
    let mut visitor = Handlers::new("test").on_enter(NodeType::ExpressionStatement, |path| {
        let NodeKind::ExpressionStatement { expression, .. } = path.kind() else {
            return Ok(());
        };
        if path.ast().identifier_name(*expression) == Some("a") {
            let b = path.ast_mut().identifier("b");
            let c = path.ast_mut().identifier("c");
            path.replace_with_multiple(vec![b, c])?;
        }
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    assert_eq!(unit.print(), "b;\nc;\nz;");
}

#[test]
fn test_replace_with_multiple_outside_list_fails() {
    let mut unit = Unit::script("a;");
    let err = on_identifier(&mut unit, "a", |path| {
        let b = path.ast_mut().identifier("b");
        let c = path.ast_mut().identifier("c");
        path.replace_with_multiple(vec![b, c])?;
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(
        path_error(&err),
        PathError::NotInList {
            node_type: NodeType::Identifier
        }
    ));
}

#[test]
fn test_replace_with_source_string() {
    let mut unit = Unit::script("let b; a;");
    on_identifier(&mut unit, "a", |path| {
        path.replace_with_source_string("b + c")?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "let b;\nb + c;");
    assert_eq!(unit.references("b"), 1);
    let c = unit.ast.interner().find("c").unwrap();
    assert!(unit.scopes.has_global(c));
}

#[test]
fn test_replace_with_source_string_reports_a_frame() {
    let mut unit = Unit::script("a;");
    let err = on_identifier(&mut unit, "a", |path| {
        path.replace_with_source_string("b +")?;
        Ok(())
    })
    .unwrap_err();
    let PathError::SourceString { message, frame } = path_error(&err) else {
        panic!("expected a source string error, got {err}");
    };
    assert!(!message.is_empty());
    assert!(err.to_string().contains("make sure this is an expression."));
    assert!(frame.starts_with("> 1 | (b +)"), "{frame}");
    assert!(frame.contains('^'));
}

#[test]
fn test_replace_with_attached_node_fails() {
    let mut unit = Unit::script("a; b;");
    let mut visitor = Handlers::new("test").on_enter(NodeType::ExpressionStatement, |path| {
        if let Some(next) = path.get_next_sibling() {
            path.replace_with(next)?;
        }
        Ok(())
    });
    let err = unit.run(&mut [&mut visitor]).unwrap_err();
    assert!(matches!(
        path_error(&err),
        PathError::AlreadyAttached {
            node_type: NodeType::ExpressionStatement
        }
    ));
    assert_eq!(err.code(), ErrorCode::E3002);
    assert_eq!(unit.print(), "a;\nb;");
}

#[test]
fn test_insert_attached_node_fails() {
    let mut unit = Unit::script("a; b;");
    let err = on_identifier(&mut unit, "a", |path| {
        let statement = path.parent().unwrap();
        path.insert_after(vec![statement])?;
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(path_error(&err), PathError::AlreadyAttached { .. }));

    let mut unit = Unit::script("f(a);");
    let mut visitor = Handlers::new("test").on_exit(NodeType::CallExpression, |path| {
        let callee = path.get_node("callee").unwrap();
        path.push_container("arguments", vec![callee])?;
        Ok(())
    });
    let err = unit.run(&mut [&mut visitor]).unwrap_err();
    assert!(matches!(
        path_error(&err),
        PathError::AlreadyAttached {
            node_type: NodeType::Identifier
        }
    ));
}

#[test]
fn test_replace_with_own_child_is_allowed() {
    let mut unit = Unit::script("x = !y;");
    let mut visitor = Handlers::new("test").on_exit(NodeType::UnaryExpression, |path| {
        let argument = path.get_node("argument").unwrap();
        path.replace_with(argument)?;
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    assert_eq!(unit.print(), "x = y;");
    let y = unit.ast.interner().find("y").unwrap();
    assert!(unit.scopes.has_global(y));
}

// Statements in expression position

#[test]
fn test_replace_expression_with_value_statements_folds_them() {
    let mut unit = Unit::script("x = f;");
    on_identifier(&mut unit, "f", |path| {
        let ast = path.ast_mut();
        let a = ast.identifier("a");
        let call = ast.call_expression(a, Vec::new());
        let first = ast.expression_statement(call);
        let empty = ast.alloc(NodeKind::EmptyStatement, Span::DUMMY);
        let b = ast.identifier("b");
        let second = ast.expression_statement(b);
        path.replace_expression_with_statements(vec![first, empty, second])?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "x = (a(), b);");
}

#[test]
fn test_replace_expression_with_if_becomes_conditional() {
    let mut unit = Unit::script("x = f;");
    on_identifier(&mut unit, "f", |path| {
        let test = path.ast_mut().identifier("t");
        let consequent = statement_of(path, "a");
        let statement = path.ast_mut().alloc(
            NodeKind::IfStatement {
                test,
                consequent,
                alternate: None,
            },
            Span::DUMMY,
        );
        path.replace_expression_with_statements(vec![statement])?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "x = t ? a : void 0;");
}

#[test]
fn test_replace_expression_with_declarations_hoists_vars() {
    let mut unit = Unit::script("x = f;");
    on_identifier(&mut unit, "f", |path| {
        let ast = path.ast_mut();
        let id = ast.identifier("y");
        let init = ast.numeric_literal(1.0);
        let declarator = ast.alloc(NodeKind::VariableDeclarator { id, init: Some(init) }, Span::DUMMY);
        let declaration = ast.alloc(
            NodeKind::VariableDeclaration {
                kind: VarKind::Var,
                declarations: vec![declarator],
            },
            Span::DUMMY,
        );
        let read = statement_of(path, "y");
        path.replace_expression_with_statements(vec![declaration, read])?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "var y;\nx = (() => {\n  y = 1;\n  return y;\n})();");
    let y = unit.scopes.resolve(&unit.ast, unit.scopes.root(), "y").unwrap();
    assert_eq!(unit.scopes.binding(y).references(), 1);
}

#[test]
fn test_replace_expression_with_loop_returns_last_value() {
    let mut unit = Unit::script("x = f;");
    on_identifier(&mut unit, "f", |path| {
        let test = path.ast_mut().identifier("t");
        let body = statement_of(path, "a");
        let statement = path
            .ast_mut()
            .alloc(NodeKind::WhileStatement { test, body }, Span::DUMMY);
        path.replace_expression_with_statements(vec![statement])?;
        Ok(())
    })
    .unwrap();
    assert_eq!(
        unit.print(),
        "x = (() => {\n  var _ret;\n  while (t) _ret = a;\n  return _ret;\n})();"
    );
}

#[test]
fn test_replace_statement_with_statements_fails() {
    let mut unit = Unit::script("a;");
    let mut visitor = Handlers::new("test").on_enter(NodeType::ExpressionStatement, |path| {
        let b = statement_of(path, "b");
        path.replace_expression_with_statements(vec![b])?;
        Ok(())
    });
    let err = unit.run(&mut [&mut visitor]).unwrap_err();
    assert!(matches!(
        path_error(&err),
        PathError::NotAnExpression {
            node_type: NodeType::ExpressionStatement
        }
    ));
}

#[test]
fn test_replace_inline_fits_the_position() {
    // A list entry takes every node.
    let mut unit = Unit::script("f(a, z);");
    on_identifier(&mut unit, "a", |path| {
        let b = path.ast_mut().identifier("b");
        let c = path.ast_mut().identifier("c");
        path.replace_inline(vec![b, c])?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "f(b, c, z);");

    // A single expression is a plain replacement.
    let mut unit = Unit::script("x = a;");
    on_identifier(&mut unit, "a", |path| {
        let b = path.ast_mut().identifier("b");
        path.replace_inline(vec![b])?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "x = b;");

    // Statements in expression position become their value.
    let mut unit = Unit::script("x = a;");
    on_identifier(&mut unit, "a", |path| {
        let b = statement_of(path, "b");
        let c = statement_of(path, "c");
        path.replace_inline(vec![b, c])?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "x = (b, c);");

    // Nothing removes the node.
    let mut unit = Unit::script("a; b;");
    on_identifier(&mut unit, "a", |path| {
        path.replace_inline(Vec::new())?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "b;");
}

// Removal

#[test]
fn test_remove_expression_removes_its_statement() {
    let mut unit = Unit::script("a; b;");
    on_identifier(&mut unit, "a", |path| {
        path.remove()?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "b;");
}

#[test]
fn test_remove_only_declarator_removes_declaration() {
    let mut unit = Unit::script("let x = 1; y;");
    let mut visitor = Handlers::new("test").on_enter(NodeType::VariableDeclarator, |path| {
        path.remove()?;
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    assert_eq!(unit.print(), "y;");
    assert_eq!(unit.scopes.resolve(&unit.ast, unit.scopes.root(), "x"), None);
}

#[test]
fn test_remove_one_of_several_declarators() {
    let mut unit = Unit::script("let x = 1, y = 2;");
    let mut visitor = Handlers::new("test").on_enter(NodeType::VariableDeclarator, |path| {
        let NodeKind::VariableDeclarator { id, .. } = path.kind() else {
            return Ok(());
        };
        if path.ast().identifier_name(*id) == Some("x") {
            path.remove()?;
        }
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    assert_eq!(unit.print(), "let y = 2;");
}

#[test]
fn test_remove_required_body_leaves_empty_block() {
    let mut unit = Unit::script("if (a) b;");
    on_identifier(&mut unit, "b", |path| {
        path.remove()?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "if (a) {}");
}

#[test]
fn test_remove_list_item_and_optional_field() {
    let mut unit = Unit::script("[a, b, c]; function f() { return d; }");
    let mut visitor = Handlers::new("test").on_enter(NodeType::Identifier, |path| {
        if matches!(path.ast().identifier_name(path.node()), Some("b" | "d")) {
            path.remove()?;
        }
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    assert_eq!(unit.print(), "[a, c];\nfunction f() {\n  return;\n}");
}

#[test]
fn test_remove_required_operand_fails() {
    let mut unit = Unit::script("a + b;");
    let err = on_identifier(&mut unit, "a", |path| {
        path.remove()?;
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(
        path_error(&err),
        PathError::CannotRemove {
            node_type: NodeType::Identifier,
            parent: NodeType::BinaryExpression,
            field: "left"
        }
    ));
}

#[test]
fn test_remove_write_restores_constant() {
    let mut unit = Unit::script("let x = 1; x = 2;");
    let mut visitor = Handlers::new("test").on_enter(NodeType::AssignmentExpression, |path| {
        path.remove()?;
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    let x = unit.scopes.resolve(&unit.ast, unit.scopes.root(), "x").unwrap();
    assert!(unit.scopes.binding(x).is_constant());
    assert_eq!(unit.print(), "let x = 1;");
}

// Insertion

#[test]
fn test_insert_from_expression_goes_through_its_statement() {
    let mut unit = Unit::script("a;");
    on_identifier(&mut unit, "a", |path| {
        let before = path.ast_mut().identifier("before");
        let after = path.ast_mut().identifier("after");
        path.insert_before(vec![before])?;
        path.insert_after(vec![after])?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "before;\na;\nafter;");
}

#[test]
fn test_insert_outside_list_fails() {
    let mut unit = Unit::script("if (a) {}");
    let err = on_identifier(&mut unit, "a", |path| {
        let b = path.ast_mut().identifier("b");
        path.insert_after(vec![b])?;
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(path_error(&err), PathError::NotInList { .. }));
}

#[test]
fn test_inserted_declarations_are_registered() {
    let mut unit = Unit::script("{ a; }");
    on_identifier(&mut unit, "a", |path| {
        let declaration = let_declaration(path, "y", 1.0);
        path.insert_before(vec![declaration])?;
        Ok(())
    })
    .unwrap();
    assert_eq!(unit.print(), "{\n  let y = 1;\n  a;\n}");
    let block = unit
        .scopes
        .scopes()
        .find(|scope| scope.kind() == ember_scope::ScopeKind::Block)
        .unwrap()
        .id();
    assert!(unit.scopes.resolve(&unit.ast, block, "y").is_some());
    assert_eq!(unit.scopes.resolve(&unit.ast, unit.scopes.root(), "y"), None);
}

#[test]
fn test_conflicting_insertion_fails_with_scope_error() {
    let mut unit = Unit::script("let y = 0; a;");
    let err = on_identifier(&mut unit, "a", |path| {
        let declaration = let_declaration(path, "y", 1.0);
        path.insert_after(vec![declaration])?;
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(path_error(&err), PathError::Scope(_)));
    assert_eq!(err.code(), ErrorCode::E2001);
}

#[test]
fn test_unshift_and_push_container() {
    let mut unit = Unit::script("f(b);");
    let mut visitor = Handlers::new("test").on_enter(NodeType::CallExpression, |path| {
        let a = path.ast_mut().identifier("a");
        let c = path.ast_mut().identifier("c");
        path.unshift_container("arguments", vec![a])?;
        path.push_container("arguments", vec![c])?;
        Ok(())
    });
    unit.run(&mut [&mut visitor]).unwrap();
    assert_eq!(unit.print(), "f(a, b, c);");
}

#[test]
fn test_container_field_must_be_a_list() {
    let mut unit = Unit::script("f(b);");
    let mut visitor = Handlers::new("test").on_enter(NodeType::CallExpression, |path| {
        let a = path.ast_mut().identifier("a");
        path.push_container("callee", vec![a])?;
        Ok(())
    });
    let err = unit.run(&mut [&mut visitor]).unwrap_err();
    assert!(matches!(
        path_error(&err),
        PathError::NoSuchList { node_type: NodeType::CallExpression, field } if field == "callee"
    ));
}
