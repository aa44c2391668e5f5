//! Transform plugin registry.
//!
//! A [`TransformRegistry`] maps plugin names to factories. It is built
//! once, shared between units, and asked for fresh visitor instances per
//! unit through [`TransformRegistry::build`].

use std::fmt;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::transforms::{InlineConstants, StrictMode};
use crate::{RegistryError, Visitor};

/// A single plugin option value.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl OptionValue {
    /// Read a command-line value: `true`/`false`, a number, or text.
    pub fn parse(text: &str) -> Self {
        match text {
            "true" => OptionValue::Bool(true),
            "false" => OptionValue::Bool(false),
            _ => text
                .parse::<f64>()
                .map_or_else(|_| OptionValue::String(text.to_owned()), OptionValue::Number),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(value) => Some(*value),
            OptionValue::Number(_) | OptionValue::String(_) => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

/// Options passed to one transform plugin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PluginOptions {
    values: FxHashMap<String, OptionValue>,
}

impl PluginOptions {
    pub fn new() -> Self {
        PluginOptions::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(OptionValue::as_bool)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A transform requested by name, with its options.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformSpec {
    pub name: String,
    pub options: PluginOptions,
}

impl TransformSpec {
    pub fn new(name: impl Into<String>) -> Self {
        TransformSpec {
            name: name.into(),
            options: PluginOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PluginOptions) -> Self {
        self.options = options;
        self
    }
}

/// Builds a visitor for one unit from its options.
pub type TransformFactory = Arc<dyn Fn(&PluginOptions) -> Box<dyn Visitor> + Send + Sync>;

#[derive(Clone, Default)]
pub struct TransformRegistry {
    factories: FxHashMap<String, TransformFactory>,
}

impl TransformRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        TransformRegistry::default()
    }

    /// A registry holding `strict-mode` and `inline-constants`.
    pub fn with_builtins() -> Self {
        let mut registry = TransformRegistry::new();
        registry.register(StrictMode::NAME, |options| Box::new(StrictMode::new(options)));
        registry.register(InlineConstants::NAME, |_| Box::new(InlineConstants));
        registry
    }

    /// Register `factory` under `name`, replacing any earlier entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&PluginOptions) -> Box<dyn Visitor> + Send + Sync + 'static,
    ) {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate the requested transforms in order.
    ///
    /// A name requested twice is instantiated once, with the options of
    /// its first request.
    pub fn build(&self, specs: &[TransformSpec]) -> Result<Vec<Box<dyn Visitor>>, RegistryError> {
        let mut seen = FxHashSet::default();
        let mut visitors = Vec::with_capacity(specs.len());
        for spec in specs {
            if !seen.insert(spec.name.as_str()) {
                debug!(name = %spec.name, "transform requested twice");
                continue;
            }
            let factory = self
                .factories
                .get(&spec.name)
                .ok_or_else(|| RegistryError::UnknownTransform {
                    name: spec.name.clone(),
                })?;
            visitors.push(factory(&spec.options));
        }
        Ok(visitors)
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("names", &self.names())
            .finish()
    }
}
