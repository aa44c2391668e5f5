#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod engine;
mod path;

use ember_codegen::{generate, GeneratorOptions};
use ember_ir::{Ast, NodeId, NodeKind, SourceType};
use ember_parse::{parse, ParseOptions, PluginRegistry};
use ember_scope::{analyze, ScopeTree};

use crate::{traverse, PathError, TransformError, TraverseOptions, Visitor};

/// A parsed and analyzed unit.
pub(super) struct Unit {
    pub ast: Ast,
    pub root: NodeId,
    pub scopes: ScopeTree,
}

impl Unit {
    pub fn script(source: &str) -> Self {
        Self::with(source, SourceType::Script, &[])
    }

    pub fn module(source: &str) -> Self {
        Self::with(source, SourceType::Module, &[])
    }

    pub fn with(source: &str, source_type: SourceType, plugins: &[&str]) -> Self {
        let registry = PluginRegistry::with_builtins();
        let out = parse(source, &ParseOptions::new(source_type), &registry.load(plugins))
            .expect("source should parse");
        let scopes = analyze(&out.ast, out.root).expect("analysis should succeed");
        Unit {
            ast: out.ast,
            root: out.root,
            scopes,
        }
    }

    pub fn run(&mut self, visitors: &mut [&mut dyn Visitor]) -> Result<(), TransformError> {
        self.run_with(visitors, &TraverseOptions::default())
    }

    pub fn run_with(&mut self, visitors: &mut [&mut dyn Visitor], options: &TraverseOptions) -> Result<(), TransformError> {
        traverse(&mut self.ast, self.root, &mut self.scopes, visitors, options)
    }

    pub fn print(&self) -> String {
        generate(&self.ast, self.root, &GeneratorOptions::default()).expect("tree should print")
    }

    pub fn body(&self) -> Vec<NodeId> {
        match self.ast.kind(self.root) {
            NodeKind::Program { body, .. } => body.clone(),
            other => panic!("expected a program, got {other:?}"),
        }
    }

    pub fn references(&self, name: &str) -> u32 {
        let id = self
            .scopes
            .resolve(&self.ast, self.scopes.root(), name)
            .unwrap_or_else(|| panic!("`{name}` should be bound"));
        self.scopes.binding(id).references()
    }
}

/// The `PathError` behind a failed pass.
pub(super) fn path_error(err: &TransformError) -> &PathError {
    err.source
        .downcast_ref::<PathError>()
        .expect("handler should fail with a path error")
}
