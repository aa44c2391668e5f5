use ember_ir::NodeKind;
use ember_scope::BindingKind;
use tracing::trace;

use crate::{HandlerResult, NodePath, Visitor};

/// Replaces reads of `const` bindings that hold a literal with a copy of
/// the literal.
///
/// Only bindings with no constant violations qualify. Each replaced read
/// is dereferenced, so a binding whose reads are all inlined ends up
/// unreferenced.
#[derive(Copy, Clone, Debug, Default)]
pub struct InlineConstants;

impl InlineConstants {
    pub const NAME: &'static str = "inline-constants";
}

impl Visitor for InlineConstants {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn enter(&mut self, path: &mut NodePath<'_>) -> HandlerResult {
        if !path.is_referenced_identifier() {
            return Ok(());
        }
        let parent = path.parent();
        if let Some(parent) = parent {
            if matches!(path.ast().kind(parent), NodeKind::ExportSpecifier { .. }) {
                return Ok(());
            }
        }
        let Some(binding) = path.scopes().binding_of_reference(path.node()) else {
            return Ok(());
        };
        let binding = path.scopes().binding(binding);
        if binding.kind() != BindingKind::Const || !binding.is_constant() {
            return Ok(());
        }
        let Some(literal) = binding.value() else {
            return Ok(());
        };

        trace!(name = path.ast().name(binding.name()), "inline constant");
        let copy = path.ast_mut().clone_subtree(literal);
        path.replace_with(copy)?;

        // `{ x }` becomes `{ x: 1 }`.
        if let Some(parent) = parent {
            if let Some(NodeKind::ObjectProperty { shorthand, .. }) = path.ast_mut().kind_mut(parent) {
                *shorthand = false;
            }
        }
        Ok(())
    }
}
