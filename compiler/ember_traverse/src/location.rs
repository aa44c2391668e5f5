//! Where a node sits in its parent.
//!
//! The engine records `(parent, field index)` for every node it queues.
//! List positions are never stored: they are looked up when needed, so
//! splices made by earlier handlers cannot leave a stale index behind.

use ember_ir::{Ast, Field, FieldMut, NodeId};
use rustc_hash::FxHashMap;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Location {
    pub(crate) parent: NodeId,
    pub(crate) field: usize,
}

pub(crate) type Links = FxHashMap<NodeId, Location>;

fn field(ast: &Ast, loc: Location) -> Option<Field<'_>> {
    ast.kind(loc.parent)
        .fields()
        .into_iter()
        .nth(loc.field)
        .map(|(_, field)| field)
}

pub(crate) fn field_name(ast: &Ast, loc: Location) -> &'static str {
    ast.kind(loc.parent)
        .fields()
        .into_iter()
        .nth(loc.field)
        .map_or("", |(name, _)| name)
}

pub(crate) fn is_list(ast: &Ast, loc: Location) -> bool {
    field(ast, loc).is_some_and(Field::is_list)
}

pub(crate) fn contains(ast: &Ast, loc: Location, node: NodeId) -> bool {
    field(ast, loc).is_some_and(|field| field.ids().any(|id| id == node))
}

/// Index of `node` in a list field.
pub(crate) fn position(ast: &Ast, loc: Location, node: NodeId) -> Option<usize> {
    match field(ast, loc)? {
        Field::Many(ids) => ids.iter().position(|id| *id == node),
        Field::One(_) | Field::Opt(_) => None,
    }
}

/// Items of a list field.
pub(crate) fn list(ast: &Ast, loc: Location) -> Option<Vec<NodeId>> {
    match field(ast, loc)? {
        Field::Many(ids) => Some(ids.to_vec()),
        Field::One(_) | Field::Opt(_) => None,
    }
}

/// Put `with` where `node` is. In a list, `with` may hold several nodes
/// or none; in a single or optional slot it must hold at most one.
pub(crate) fn replace(ast: &mut Ast, loc: Location, node: NodeId, with: &[NodeId]) -> bool {
    let Some(kind) = ast.kind_mut(loc.parent) else {
        return false;
    };
    match kind.field_mut(loc.field) {
        Some(FieldMut::Many(ids)) => match ids.iter().position(|id| *id == node) {
            Some(index) => {
                ids.splice(index..=index, with.iter().copied());
                true
            }
            None => false,
        },
        Some(FieldMut::One(slot)) if *slot == node => match with {
            [single] => {
                *slot = *single;
                true
            }
            _ => false,
        },
        Some(FieldMut::Opt(slot)) if *slot == Some(node) => match with {
            [] => {
                *slot = None;
                true
            }
            [single] => {
                *slot = Some(*single);
                true
            }
            _ => false,
        },
        _ => false,
    }
}

/// Insert into a list field at `index` (clamped to its length).
pub(crate) fn insert(ast: &mut Ast, loc: Location, index: usize, nodes: &[NodeId]) -> bool {
    let Some(kind) = ast.kind_mut(loc.parent) else {
        return false;
    };
    match kind.field_mut(loc.field) {
        Some(FieldMut::Many(ids)) => {
            let index = index.min(ids.len());
            ids.splice(index..index, nodes.iter().copied());
            true
        }
        _ => false,
    }
}

/// Whether `node` is still reachable from `root` through recorded links.
pub(crate) fn is_attached(ast: &Ast, links: &Links, root: NodeId, node: NodeId) -> bool {
    let mut current = node;
    while current != root {
        let Some(loc) = links.get(&current) else {
            return false;
        };
        if !contains(ast, *loc, current) {
            return false;
        }
        current = loc.parent;
    }
    true
}
