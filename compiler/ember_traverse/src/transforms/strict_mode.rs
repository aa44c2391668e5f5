use ember_ir::{NodeKind, NodeType};
use tracing::trace;

use crate::registry::PluginOptions;
use crate::{HandlerResult, NodePath, Visitor};

const USE_STRICT: &str = "use strict";

/// Adds a `"use strict"` directive to programs that lack one.
///
/// Disabled by `strict: false` or `strictMode: false`. Running it twice
/// adds one directive.
#[derive(Clone, Debug)]
pub struct StrictMode {
    enabled: bool,
}

impl StrictMode {
    pub const NAME: &'static str = "strict-mode";

    pub fn new(options: &PluginOptions) -> Self {
        let enabled = options.get_bool("strict") != Some(false) && options.get_bool("strictMode") != Some(false);
        StrictMode { enabled }
    }
}

impl Visitor for StrictMode {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn enter(&mut self, path: &mut NodePath<'_>) -> HandlerResult {
        if !self.enabled || path.node_type() != NodeType::Program {
            return Ok(());
        }
        let NodeKind::Program { directives, body, .. } = path.kind() else {
            return Ok(());
        };

        let ast = path.ast();
        let in_directives = directives
            .iter()
            .any(|&id| matches!(ast.kind(id), NodeKind::Directive { value, .. } if ast.name(*value) == USE_STRICT));
        // Estree keeps the prologue as leading statements.
        let in_prologue = body
            .iter()
            .map_while(|&id| match ast.kind(id) {
                NodeKind::ExpressionStatement {
                    directive: Some(value),
                    ..
                } => Some(*value),
                _ => None,
            })
            .any(|value| ast.name(value) == USE_STRICT);
        if in_directives || in_prologue {
            return Ok(());
        }

        trace!("adding use strict directive");
        let directive = path.ast_mut().directive(USE_STRICT);
        path.unshift_container("directives", vec![directive])?;
        Ok(())
    }
}
