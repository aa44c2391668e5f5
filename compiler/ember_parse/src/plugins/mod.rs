//! Syntax plugin registry.
//!
//! A syntax plugin is a name plus an activation function. Activation
//! installs grammar extension handlers into an [`Extensions`] value; plugins
//! that only gate syntax the core grammar already knows (`classProperties`,
//! `decorators`, ...) install nothing and are checked with
//! [`ActivePlugins::has_plugin`].
//!
//! The registry is built once, frozen behind an `Arc`, and shared by every
//! compilation unit. [`PluginRegistry::load`] produces a fresh
//! [`ActivePlugins`] per unit.

mod builtin;

use std::fmt;
use std::sync::Arc;

use ember_ir::NodeId;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::{ParseResult, Parser};

/// Plugin names a `"*"` request reports as present, whether or not they
/// are registered.
pub const WILDCARD_LEGACY_PLUGINS: &[&str] = &[
    "jsx",
    "doExpressions",
    "objectRestSpread",
    "decorators",
    "classProperties",
    "exportExtensions",
    "asyncGenerators",
    "functionBind",
    "functionSent",
    "dynamicImport",
    "flow",
];

/// Parses a statement or expression atom at the current token, or
/// declines with `None` without consuming input.
pub type SyntaxHandler = fn(&mut Parser<'_>) -> Option<ParseResult<NodeId>>;

/// Parses a type annotation starting at `:`, returning a
/// `TypeAnnotation` node.
pub type TypeAnnotationHandler = fn(&mut Parser<'_>) -> ParseResult<NodeId>;

/// Grammar extension points.
///
/// Handlers are stored in activation order and consulted newest first, so
/// a later plugin overrides an earlier one.
#[derive(Clone, Default)]
pub struct Extensions {
    pub statement: Vec<SyntaxHandler>,
    pub atom: Vec<SyntaxHandler>,
    pub type_annotation: Option<TypeAnnotationHandler>,
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extensions")
            .field("statement", &self.statement.len())
            .field("atom", &self.atom.len())
            .field("type_annotation", &self.type_annotation.is_some())
            .finish()
    }
}

/// Activation function of a syntax plugin.
pub type PluginFactory = Arc<dyn Fn(&mut Extensions) + Send + Sync>;

#[derive(Clone, Default)]
pub struct PluginRegistry {
    /// Registration order matters for the wildcard.
    order: Vec<String>,
    factories: FxHashMap<String, PluginFactory>,
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry").field("plugins", &self.order).finish()
    }
}

impl PluginRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        PluginRegistry::default()
    }

    /// A registry with every built-in syntax plugin.
    pub fn with_builtins() -> Self {
        let mut registry = PluginRegistry::new();
        builtin::register_all(&mut registry);
        registry
    }

    /// Add a plugin, replacing any existing one with the same name.
    pub fn register(&mut self, name: impl Into<String>, factory: impl Fn(&mut Extensions) + Send + Sync + 'static) {
        let name = name.into();
        if !self.factories.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.factories.insert(name, Arc::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Activate plugins for one compilation unit.
    ///
    /// - `"*"` activates every registered plugin except `estree`, with
    ///   `flow` last, and reports the legacy list as present.
    /// - Otherwise `estree` is moved first and `flow` last.
    /// - Repeated names are activated once.
    /// - Unknown names are recorded but install nothing.
    ///
    /// ```
    /// use ember_parse::PluginRegistry;
    ///
    /// let registry = PluginRegistry::with_builtins();
    /// let active = registry.load(&["flow", "classProperties", "estree"]);
    /// assert_eq!(active.names(), ["estree", "classProperties", "flow"]);
    /// ```
    pub fn load<S: AsRef<str>>(&self, requested: &[S]) -> ActivePlugins {
        let requested: Vec<&str> = requested.iter().map(AsRef::as_ref).collect();

        let (order, wildcard) = if requested.contains(&"*") {
            let mut order: Vec<&str> = self
                .names()
                .filter(|name| *name != "flow" && *name != "estree")
                .collect();
            order.push("flow");
            (order, true)
        } else {
            let mut order: Vec<&str> = requested
                .iter()
                .copied()
                .filter(|name| *name != "flow" && *name != "estree")
                .collect();
            if requested.contains(&"flow") {
                order.push("flow");
            }
            if requested.contains(&"estree") {
                order.insert(0, "estree");
            }
            (order, false)
        };

        let mut active = ActivePlugins {
            names: Vec::new(),
            enabled: FxHashSet::default(),
            wildcard,
            extensions: Extensions::default(),
        };
        for name in order {
            if !active.enabled.insert(name.to_owned()) {
                continue;
            }
            active.names.push(name.to_owned());
            match self.factories.get(name) {
                Some(factory) => factory(&mut active.extensions),
                None => debug!(plugin = name, "unknown syntax plugin; nothing installed"),
            }
        }
        debug!(plugins = ?active.names, wildcard, "activated syntax plugins");
        active
    }
}

/// The plugins active for one compilation unit.
#[derive(Clone, Debug, Default)]
pub struct ActivePlugins {
    names: Vec<String>,
    enabled: FxHashSet<String>,
    wildcard: bool,
    extensions: Extensions,
}

impl ActivePlugins {
    /// No plugins: the core grammar only.
    pub fn none() -> Self {
        ActivePlugins::default()
    }

    /// Whether syntax gated on `name` is enabled.
    ///
    /// A wildcard load answers from the legacy list, not from the set of
    /// plugins it happened to activate.
    pub fn has_plugin(&self, name: &str) -> bool {
        if self.wildcard {
            return WILDCARD_LEGACY_PLUGINS.contains(&name);
        }
        self.enabled.contains(name)
    }

    /// Effective activation order.
    pub fn names(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}

#[cfg(test)]
mod tests;
