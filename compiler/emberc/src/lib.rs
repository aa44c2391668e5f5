//! Ember pipeline driver.
//!
//! Runs one compilation unit through every stage: parse (with the
//! requested syntax plugins), scope analysis, the requested transforms and
//! code generation. The registries are built once and shared; each unit
//! gets its own tree, scope tree and plugin instances, so units can be
//! compiled in parallel.
//!
//! ```
//! use emberc::{compile, CompileOptions};
//! use ember_traverse::TransformSpec;
//!
//! let options = CompileOptions::default().with_transforms(vec![TransformSpec::new("strict-mode")]);
//! let output = compile("let a = 1;", &options).unwrap();
//! assert_eq!(output.code, "\"use strict\";\nlet a = 1;");
//! ```

pub mod commands;
mod error;
mod options;

#[cfg(test)]
mod tests;

use std::sync::{Arc, Once};

use ember_ir::{Ast, NodeId};
use ember_parse::{parse, ParseOptions, PluginRegistry};
use ember_scope::ScopeTree;
use ember_traverse::{traverse, TransformRegistry, TraverseOptions, Visitor};
use tracing::debug;

pub use error::{render_error, CompileError, ErrorKind};
pub use options::CompileOptions;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=ember_parse=debug`.
/// With `EMBER_LOG_TREE=1` spans are printed as an indented tree. Safe to
/// call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let registry = tracing_subscriber::registry().with(filter);
        if std::env::var("EMBER_LOG_TREE").is_ok_and(|value| value == "1") {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        } else {
            registry
                .with(fmt::layer().with_target(true).with_level(true))
                .init();
        }
    });
}

/// Result of compiling one unit.
#[derive(Clone, Debug)]
pub struct CompileOutput {
    pub code: String,
    /// The tree after transforms.
    pub ast: Ast,
    pub root: NodeId,
    /// Scopes of the transformed tree.
    pub scopes: ScopeTree,
}

/// Shared syntax and transform registries.
#[derive(Clone, Debug)]
pub struct Compiler {
    syntax: Arc<PluginRegistry>,
    transforms: Arc<TransformRegistry>,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::with_builtins()
    }
}

impl Compiler {
    pub fn new(syntax: Arc<PluginRegistry>, transforms: Arc<TransformRegistry>) -> Self {
        Compiler { syntax, transforms }
    }

    /// Every built-in syntax plugin and transform.
    pub fn with_builtins() -> Self {
        Compiler::new(
            Arc::new(PluginRegistry::with_builtins()),
            Arc::new(TransformRegistry::with_builtins()),
        )
    }

    pub fn syntax_plugins(&self) -> &PluginRegistry {
        &self.syntax
    }

    pub fn transforms(&self) -> &TransformRegistry {
        &self.transforms
    }

    /// Compile `source`, stopping at the first error of any stage.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len(), source_type = ?options.source_type))]
    pub fn compile(&self, source: &str, options: &CompileOptions) -> Result<CompileOutput, CompileError> {
        let plugins = self.syntax.load(&options.plugins);
        let parsed = parse(source, &ParseOptions::new(options.source_type), &plugins)?;
        let mut ast = parsed.ast;
        let root = parsed.root;

        let mut scopes = ember_scope::analyze(&ast, root)?;

        let mut instances = self.transforms.build(&options.transforms)?;
        if !instances.is_empty() {
            let mut visitors: Vec<&mut dyn Visitor> = Vec::with_capacity(instances.len());
            for visitor in &mut instances {
                visitors.push(visitor.as_mut());
            }
            traverse(&mut ast, root, &mut scopes, &mut visitors, &TraverseOptions::default())?;
        }

        let code = ember_codegen::generate(&ast, root, &options.generator)?;
        debug!(bytes = code.len(), transforms = instances.len(), "compiled unit");
        Ok(CompileOutput {
            code,
            ast,
            root,
            scopes,
        })
    }
}

/// Compile `source` with the built-in registries.
pub fn compile(source: &str, options: &CompileOptions) -> Result<CompileOutput, CompileError> {
    Compiler::with_builtins().compile(source, options)
}
