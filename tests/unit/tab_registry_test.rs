use prism_shell::managers::tab_registry::{CloseOutcome, TabRegistry, TabRegistryTrait};
use prism_shell::types::tab::TabPatch;

#[test]
fn test_create_tab_returns_monotonic_ids() {
    let mut reg = TabRegistry::new();
    let id1 = reg.create_tab("https://a.example", "A");
    let id2 = reg.create_tab("https://b.example", "B");
    assert!(id2 > id1);
    assert_eq!(reg.len(), 2);
}

#[test]
fn test_create_tab_does_not_activate() {
    let mut reg = TabRegistry::new();
    let id = reg.create_tab("https://a.example", "A");
    assert_eq!(reg.active_id(), None);
    assert!(reg.set_active(id));
    assert_eq!(reg.active_id(), Some(id));
}

#[test]
fn test_ids_never_reused_after_close() {
    let mut reg = TabRegistry::new();
    let id1 = reg.create_tab("https://a.example", "A");
    reg.close_tab(id1);
    let id2 = reg.create_tab("https://b.example", "B");
    assert_ne!(id1, id2);
}

#[test]
fn test_close_active_selects_left_neighbor() {
    let mut reg = TabRegistry::new();
    let id1 = reg.create_tab("https://a.example", "A");
    let id2 = reg.create_tab("https://b.example", "B");
    let id3 = reg.create_tab("https://c.example", "C");
    reg.set_active(id2);

    assert_eq!(
        reg.close_tab(id2),
        CloseOutcome::Closed { now_empty: false }
    );
    // The tab to the left of the closed one becomes active.
    assert_eq!(reg.active_id(), Some(id1));
    assert_eq!(reg.len(), 2);
    assert!(reg.get(id3).is_some());
}

#[test]
fn test_close_active_first_tab_selects_new_first() {
    let mut reg = TabRegistry::new();
    let id1 = reg.create_tab("https://a.example", "A");
    let id2 = reg.create_tab("https://b.example", "B");
    reg.set_active(id1);

    reg.close_tab(id1);
    assert_eq!(reg.active_id(), Some(id2));
}

#[test]
fn test_close_inactive_keeps_active() {
    let mut reg = TabRegistry::new();
    let id1 = reg.create_tab("https://a.example", "A");
    let id2 = reg.create_tab("https://b.example", "B");
    reg.set_active(id2);

    reg.close_tab(id1);
    assert_eq!(reg.active_id(), Some(id2));
}

#[test]
fn test_close_last_tab_reports_empty() {
    let mut reg = TabRegistry::new();
    let id = reg.create_tab("https://a.example", "A");
    reg.set_active(id);

    assert_eq!(reg.close_tab(id), CloseOutcome::Closed { now_empty: true });
    assert_eq!(reg.active_id(), None);
    assert!(reg.is_empty());
    // The registry does not replace the closed tab on its own.
    assert_eq!(reg.len(), 0);
}

#[test]
fn test_close_unknown_id_is_ignored() {
    let mut reg = TabRegistry::new();
    let id = reg.create_tab("https://a.example", "A");
    reg.set_active(id);

    assert_eq!(reg.close_tab(9999), CloseOutcome::Ignored);
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.active_id(), Some(id));
}

#[test]
fn test_set_active_unknown_id_is_ignored() {
    let mut reg = TabRegistry::new();
    let id = reg.create_tab("https://a.example", "A");
    reg.set_active(id);

    assert!(!reg.set_active(42));
    assert_eq!(reg.active_id(), Some(id));
}

#[test]
fn test_update_merges_patch_fields() {
    let mut reg = TabRegistry::new();
    let id = reg.create_tab("https://a.example", "A");

    assert!(reg.update(
        id,
        TabPatch {
            title: Some("Landing".to_string()),
            loading: Some(true),
            ..TabPatch::default()
        }
    ));

    let tab = reg.get(id).unwrap();
    assert_eq!(tab.title, "Landing");
    assert!(tab.loading);
    // Untouched fields keep their values.
    assert_eq!(tab.url, "https://a.example");
    assert!(!tab.can_go_back);
}

#[test]
fn test_update_unknown_id_changes_nothing() {
    let mut reg = TabRegistry::new();
    reg.create_tab("https://a.example", "A");

    assert!(!reg.update(
        777,
        TabPatch {
            title: Some("stale".to_string()),
            ..TabPatch::default()
        }
    ));
    assert_eq!(reg.tabs()[0].title, "A");
}

#[test]
fn test_insertion_order_preserved() {
    let mut reg = TabRegistry::new();
    let id1 = reg.create_tab("https://a.example", "A");
    let id2 = reg.create_tab("https://b.example", "B");
    let id3 = reg.create_tab("https://c.example", "C");
    reg.close_tab(id2);

    let order: Vec<_> = reg.tabs().iter().map(|t| t.id).collect();
    assert_eq!(order, vec![id1, id3]);
}
