use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_estree_first_flow_last() {
    let registry = PluginRegistry::with_builtins();
    let active = registry.load(&["estree", "custom", "flow"]);
    assert_eq!(active.names(), ["estree", "custom", "flow"]);

    let active = registry.load(&["flow", "custom", "estree"]);
    assert_eq!(active.names(), ["estree", "custom", "flow"]);
}

#[test]
fn test_duplicates_activate_once() {
    let registry = PluginRegistry::with_builtins();
    let active = registry.load(&["flow", "decorators", "flow", "decorators"]);
    assert_eq!(active.names(), ["decorators", "flow"]);
    assert!(active.extensions().type_annotation.is_some());
    assert_eq!(active.extensions().statement.len(), 1);
}

#[test]
fn test_unknown_plugin_is_recorded_but_inert() {
    let registry = PluginRegistry::with_builtins();
    let active = registry.load(&["custom"]);
    assert!(active.has_plugin("custom"));
    assert!(active.extensions().statement.is_empty());
    assert!(active.extensions().atom.is_empty());
}

#[test]
fn test_wildcard_reports_legacy_list() {
    let registry = PluginRegistry::with_builtins();
    let active = registry.load(&["*"]);
    assert!(active.is_wildcard());
    for name in WILDCARD_LEGACY_PLUGINS {
        assert!(active.has_plugin(name), "{name}");
    }
    assert!(!active.has_plugin("estree"));
    let names = active.names();
    assert!(!names.contains(&"estree"));
    assert_eq!(names.last().copied(), Some("flow"));
}

#[test]
fn test_wildcard_excludes_unlisted_registrations() {
    let mut registry = PluginRegistry::with_builtins();
    registry.register("custom", |_: &mut Extensions| {});
    let active = registry.load(&["*"]);
    assert!(active.names().contains(&"custom"));
    assert!(!active.has_plugin("custom"));
}

#[test]
fn test_register_replaces_factory() {
    fn decline(_: &mut Parser<'_>) -> Option<ParseResult<NodeId>> {
        None
    }
    let mut registry = PluginRegistry::new();
    registry.register("p", |ext: &mut Extensions| ext.atom.push(decline));
    registry.register("p", |ext: &mut Extensions| {
        ext.statement.push(decline);
        ext.statement.push(decline);
    });
    assert_eq!(registry.names().collect::<Vec<_>>(), ["p"]);
    let active = registry.load(&["p"]);
    assert!(active.extensions().atom.is_empty());
    assert_eq!(active.extensions().statement.len(), 2);
}

#[test]
fn test_none_has_nothing() {
    let active = ActivePlugins::none();
    assert!(!active.has_plugin("flow"));
    assert!(active.names().is_empty());
}
