use std::cell::RefCell;
use std::rc::Rc;

use ember_diagnostic::ErrorCode;
use ember_ir::{Ast, NodeKind, NodeType};
use ember_scope::ScopeTree;
use pretty_assertions::assert_eq;

use super::Unit;
use crate::{has_type, Handlers, HandlerResult, NodePath, Phase, TraverseOptions, Visitor};

/// Logs every visit as `"enter Type"` / `"exit Type"`.
struct Recorder {
    name: &'static str,
    log: Vec<String>,
}

impl Recorder {
    fn named(name: &'static str) -> Self {
        Recorder {
            name,
            log: Vec::new(),
        }
    }

    fn record(&mut self, path: &NodePath<'_>) {
        let phase = match path.phase() {
            Phase::Enter => "enter",
            Phase::Exit => "exit",
        };
        self.log.push(format!("{phase} {}", path.node_type()));
    }
}

impl Visitor for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn enter(&mut self, path: &mut NodePath<'_>) -> HandlerResult {
        self.record(path);
        Ok(())
    }

    fn exit(&mut self, path: &mut NodePath<'_>) -> HandlerResult {
        self.record(path);
        Ok(())
    }
}

/// Logs `pre`, `post` and identifier visits into a shared log as
/// `"name:hook"`.
struct Hooks {
    name: &'static str,
    log: Rc<RefCell<Vec<String>>>,
    fail_pre: bool,
}

impl Hooks {
    fn new(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
        Hooks {
            name,
            log: Rc::clone(log),
            fail_pre: false,
        }
    }

    fn push(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{}:{hook}", self.name));
    }
}

impl Visitor for Hooks {
    fn name(&self) -> &str {
        self.name
    }

    fn pre(&mut self, ast: &Ast, scopes: &ScopeTree) -> HandlerResult {
        assert!(scopes.resolve(ast, scopes.root(), "x").is_some());
        self.push("pre");
        if self.fail_pre {
            return Err("not ready".into());
        }
        Ok(())
    }

    fn post(&mut self, ast: &Ast, scopes: &ScopeTree) -> HandlerResult {
        let _ = (ast, scopes);
        self.push("post");
        Ok(())
    }

    fn enter(&mut self, path: &mut NodePath<'_>) -> HandlerResult {
        if let Some(name) = path.ast().identifier_name(path.node()) {
            self.push(&format!("enter {name}"));
            if name == "stop" {
                path.stop();
            }
        }
        Ok(())
    }
}

/// Names of identifiers entered, in order.
fn identifier_log() -> (Rc<RefCell<Vec<String>>>, Handlers) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let handlers = Handlers::new("identifiers").on_enter(NodeType::Identifier, move |path| {
        let name = path.ast().identifier_name(path.node()).unwrap_or_default().to_owned();
        sink.borrow_mut().push(name);
        Ok(())
    });
    (log, handlers)
}

fn statement_of(path: &mut NodePath<'_>, name: &str) -> ember_ir::NodeId {
    let ast = path.ast_mut();
    let id = ast.identifier(name);
    ast.expression_statement(id)
}

fn is_statement_of(path: &NodePath<'_>, name: &str) -> bool {
    match path.kind() {
        NodeKind::ExpressionStatement { expression, .. } => {
            path.ast().identifier_name(*expression) == Some(name)
        }
        _ => false,
    }
}

// Order

#[test]
fn test_enter_and_exit_order() {
    let mut unit = Unit::script("a;");
    let mut recorder = Recorder::named("recorder");
    unit.run(&mut [&mut recorder]).unwrap();
    assert_eq!(
        recorder.log,
        vec![
            "enter Program",
            "enter ExpressionStatement",
            "enter Identifier",
            "exit Identifier",
            "exit ExpressionStatement",
            "exit Program",
        ]
    );
}

#[test]
fn test_children_follow_field_order() {
    let mut unit = Unit::script("f(a, b);");
    let (log, mut handlers) = identifier_log();
    unit.run(&mut [&mut handlers]).unwrap();
    assert_eq!(*log.borrow(), vec!["f", "a", "b"]);
}

#[test]
fn test_visitors_run_in_registration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let first_log = Rc::clone(&log);
    let second_log = Rc::clone(&log);
    let mut first = Handlers::new("first").on_enter(NodeType::Identifier, move |_| {
        first_log.borrow_mut().push("first");
        Ok(())
    });
    let mut second = Handlers::new("second").on_enter(NodeType::Identifier, move |_| {
        second_log.borrow_mut().push("second");
        Ok(())
    });

    let mut unit = Unit::script("a; b;");
    unit.run(&mut [&mut first, &mut second]).unwrap();
    assert_eq!(*log.borrow(), vec!["first", "second", "first", "second"]);
}

#[test]
fn test_pre_and_post_bracket_the_walk_in_visitor_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut first = Hooks::new("a", &log);
    let mut second = Hooks::new("b", &log);
    let mut unit = Unit::script("var x; y;");
    unit.run(&mut [&mut first, &mut second]).unwrap();
    assert_eq!(
        *log.borrow(),
        vec!["a:pre", "b:pre", "a:enter x", "b:enter x", "a:enter y", "b:enter y", "a:post", "b:post"]
    );
}

#[test]
fn test_post_runs_after_stop() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut hooks = Hooks::new("a", &log);
    let mut unit = Unit::script("var x; stop; z;");
    unit.run(&mut [&mut hooks]).unwrap();
    assert_eq!(*log.borrow(), vec!["a:pre", "a:enter x", "a:enter stop", "a:post"]);
}

#[test]
fn test_failing_pre_aborts_before_the_walk() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut first = Hooks::new("a", &log);
    first.fail_pre = true;
    let mut second = Hooks::new("b", &log);
    let mut unit = Unit::script("var x;");
    let err = unit.run(&mut [&mut first, &mut second]).unwrap_err();
    assert_eq!(*log.borrow(), vec!["a:pre"]);
    assert_eq!(err.plugin, "a");
    assert_eq!(err.node_type, NodeType::Program);
    assert_eq!(err.to_string(), "a: not ready");
}

// Control

#[test]
fn test_skip_drops_children_and_exit() {
    let mut unit = Unit::script("a; b;");
    let mut skipper = Handlers::new("skip").on_enter(NodeType::ExpressionStatement, |path| {
        if is_statement_of(path, "a") {
            path.skip();
        }
        Ok(())
    });
    let mut recorder = Recorder::named("recorder");
    unit.run(&mut [&mut skipper, &mut recorder]).unwrap();

    // The skipping handler halts the node before the recorder sees it.
    assert_eq!(
        recorder.log,
        vec![
            "enter Program",
            "enter ExpressionStatement",
            "enter Identifier",
            "exit Identifier",
            "exit ExpressionStatement",
            "exit Program",
        ]
    );
}

#[test]
fn test_stop_ends_the_pass() {
    let mut unit = Unit::script("a; b; c;");
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let mut stopper = Handlers::new("stop").on_enter(NodeType::Identifier, move |path| {
        let name = path.ast().identifier_name(path.node()).unwrap_or_default().to_owned();
        if name == "b" {
            path.stop();
        }
        sink.borrow_mut().push(name);
        Ok(())
    });
    unit.run(&mut [&mut stopper]).unwrap();
    assert_eq!(*log.borrow(), vec!["a", "b"]);
}

#[test]
fn test_denylisted_types_are_skipped_with_their_subtree() {
    let mut unit = Unit::script("function f() { inner; } outer;");
    let (log, mut handlers) = identifier_log();
    let options = TraverseOptions::default().with_denylist(vec![NodeType::FunctionDeclaration]);
    unit.run_with(&mut [&mut handlers], &options).unwrap();
    assert_eq!(*log.borrow(), vec!["outer"]);
}

// Scheduling after mutation

#[test]
fn test_replacements_are_visited() {
    let mut unit = Unit::script("1;");
    let mut replacer = Handlers::new("replace").on_enter(NodeType::NumericLiteral, |path| {
        let id = path.ast_mut().identifier("one");
        path.replace_with(id)?;
        Ok(())
    });
    let (log, mut handlers) = identifier_log();
    unit.run(&mut [&mut replacer, &mut handlers]).unwrap();
    assert_eq!(*log.borrow(), vec!["one"]);
    assert_eq!(unit.print(), "one;");
}

#[test]
fn test_insertions_are_visited_after_the_subtree() {
    let mut unit = Unit::script("a;");
    let mut inserter = Handlers::new("insert").on_enter(NodeType::ExpressionStatement, |path| {
        if is_statement_of(path, "a") {
            let after = statement_of(path, "c");
            let before = statement_of(path, "b");
            path.insert_after(vec![after])?;
            path.insert_before(vec![before])?;
        }
        Ok(())
    });
    let (log, mut handlers) = identifier_log();
    unit.run(&mut [&mut inserter, &mut handlers]).unwrap();
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    assert_eq!(unit.print(), "b;\na;\nc;");
}

#[test]
fn test_container_inserts_on_exit_are_visited() {
    let mut unit = Unit::script("{ a; }");
    let mut pusher = Handlers::new("push").on_exit(NodeType::BlockStatement, |path| {
        let statement = statement_of(path, "z");
        path.push_container("body", vec![statement])?;
        Ok(())
    });
    let (log, mut handlers) = identifier_log();
    unit.run(&mut [&mut pusher, &mut handlers]).unwrap();
    assert_eq!(*log.borrow(), vec!["a", "z"]);
    assert_eq!(unit.print(), "{\n  a;\n  z;\n}");
}

#[test]
fn test_removed_siblings_are_not_visited() {
    let mut unit = Unit::script("a; b; c;");
    let mut remover = Handlers::new("remove").on_enter(NodeType::ExpressionStatement, |path| {
        if is_statement_of(path, "a") {
            let program = path.parent().unwrap();
            let next = path.get_sibling(1).unwrap();
            if let Some(NodeKind::Program { body, .. }) = path.ast_mut().kind_mut(program) {
                body.retain(|id| *id != next);
            }
        }
        Ok(())
    });
    let (log, mut handlers) = identifier_log();
    unit.run(&mut [&mut remover, &mut handlers]).unwrap();
    assert_eq!(*log.borrow(), vec!["a", "c"]);
}

// Errors

#[test]
fn test_handler_error_names_plugin_and_node() {
    let mut unit = Unit::script("a;");
    let mut failing = Handlers::new("failing").on_enter(NodeType::Identifier, |_| Err("boom".into()));
    let err = unit.run(&mut [&mut failing]).unwrap_err();
    assert_eq!(err.plugin, "failing");
    assert_eq!(err.node_type, NodeType::Identifier);
    assert_eq!(err.code(), ErrorCode::E3001);
    assert_eq!(err.to_string(), "failing: boom");
}

#[test]
fn test_handler_error_keeps_earlier_mutations() {
    let mut unit = Unit::script("1; b;");
    let mut replacer = Handlers::new("replace")
        .on_enter(NodeType::NumericLiteral, |path| {
            let id = path.ast_mut().identifier("a");
            path.replace_with(id)?;
            Ok(())
        })
        .on_enter(NodeType::Identifier, |path| {
            if path.ast().identifier_name(path.node()) == Some("b") {
                return Err("stop here".into());
            }
            Ok(())
        });
    assert!(unit.run(&mut [&mut replacer]).is_err());
    assert_eq!(unit.print(), "a;\nb;");
}

// has_type

#[test]
fn test_has_type() {
    let unit = Unit::script("function f() { return this; }");
    assert!(has_type(&unit.ast, unit.root, NodeType::ThisExpression, &[]));
    assert!(!has_type(&unit.ast, unit.root, NodeType::ThisExpression, &[NodeType::FunctionDeclaration]));
    assert!(!has_type(&unit.ast, unit.root, NodeType::CallExpression, &[]));
    assert!(!has_type(&unit.ast, unit.root, NodeType::Program, &[NodeType::Program]));
}
