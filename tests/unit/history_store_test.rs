use prism_shell::managers::history_store::{
    format_visit_day, HistoryStore, HistoryStoreTrait, HISTORY_CAP,
};
use prism_shell::persist::PersistentStore;

fn temp_store() -> PersistentStore {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_path_buf();
    // Leak the tempdir so it doesn't get cleaned up during the test
    std::mem::forget(dir);
    PersistentStore::new(Some(path))
}

fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[test]
fn test_record_inserts_newest_first() {
    let mut store = HistoryStore::in_memory();
    store.record_at("https://a.example", "A", 100);
    store.record_at("https://b.example", "B", 200);

    assert_eq!(store.len(), 2);
    assert_eq!(store.entries()[0].url, "https://b.example");
    assert_eq!(store.entries()[1].url, "https://a.example");
}

#[test]
fn test_revisit_dedupes_and_refreshes() {
    let mut store = HistoryStore::in_memory();
    store.record_at("https://a.example", "Old title", 100);
    store.record_at("https://b.example", "B", 200);
    store.record_at("https://a.example", "New title", 300);

    // One entry per url; the revisit moved it to the front with the new
    // title and timestamp.
    assert_eq!(store.len(), 2);
    let front = &store.entries()[0];
    assert_eq!(front.url, "https://a.example");
    assert_eq!(front.title, "New title");
    assert_eq!(front.visited_at, 300);
}

#[test]
fn test_cap_evicts_oldest() {
    let mut store = HistoryStore::in_memory();
    for i in 0..(HISTORY_CAP + 10) {
        store.record_at(&format!("https://site{}.example", i), "t", i as i64);
    }

    assert_eq!(store.len(), HISTORY_CAP);
    // The oldest entries fell off the back.
    assert_eq!(store.entries()[0].url, format!("https://site{}.example", HISTORY_CAP + 9));
    assert!(store
        .entries()
        .iter()
        .all(|e| e.url != "https://site0.example"));
}

#[test]
fn test_delete_requires_exact_match() {
    let mut store = HistoryStore::in_memory();
    store.record_at("https://a.example", "A", 100);

    // Same url, wrong timestamp: no-op.
    assert!(!store.delete("https://a.example", 999));
    // Same timestamp, different url: no-op.
    assert!(!store.delete("https://b.example", 100));
    assert_eq!(store.len(), 1);

    assert!(store.delete("https://a.example", 100));
    assert!(store.is_empty());
}

#[test]
fn test_query_matches_title_and_url() {
    let mut store = HistoryStore::in_memory();
    store.record_at("https://github.com/rust-lang", "Rust Language", 100);
    store.record_at("https://docs.example", "Documentation", 200);

    assert_eq!(store.query("RUST").len(), 1);
    assert_eq!(store.query("example").len(), 1);
    assert_eq!(store.query("nothing-matches").len(), 0);
    // Empty query returns everything.
    assert_eq!(store.query("").len(), 2);
}

#[test]
fn test_query_matches_day_label() {
    let mut store = HistoryStore::in_memory();
    store.record_at("https://a.example", "A", now());

    let results = store.query("today");
    assert_eq!(results.len(), 1);
}

#[test]
fn test_format_visit_day_today() {
    assert_eq!(format_visit_day(now()), "Today");
    assert_eq!(format_visit_day(now() - 86_400), "Yesterday");
    // A fixed past date formats as a full date.
    let label = format_visit_day(946_684_800); // 2000-01-01 UTC
    assert!(label.contains("2000") || label.contains("1999"));
}

#[test]
fn test_grouped_by_date_newest_first() {
    let mut store = HistoryStore::in_memory();
    let t = now();
    store.record_at("https://old.example", "Old", t - 3 * 86_400);
    store.record_at("https://a.example", "A", t);
    store.record_at("https://b.example", "B", t);

    let groups = store.grouped_by_date();
    assert_eq!(groups.len(), 2);
    // Newest date group first, two entries in it, recency order within.
    assert_eq!(groups[0].1.len(), 2);
    assert_eq!(groups[0].1[0].url, "https://b.example");
    assert_eq!(groups[1].1[0].url, "https://old.example");
    assert!(groups[0].0 > groups[1].0);
}

#[test]
fn test_persistence_roundtrip() {
    let persist = temp_store();
    {
        let mut store = HistoryStore::load(persist.clone());
        store.record_at("https://a.example", "A", 100);
        store.record_at("https://b.example", "B", 200);
    }

    let reloaded = HistoryStore::load(persist);
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.entries()[0].url, "https://b.example");
}

#[test]
fn test_clear_empties_log_and_file() {
    let persist = temp_store();
    let mut store = HistoryStore::load(persist.clone());
    store.record_at("https://a.example", "A", 100);
    store.clear();
    assert!(store.is_empty());

    let reloaded = HistoryStore::load(persist);
    assert!(reloaded.is_empty());
}

#[test]
fn test_malformed_file_loads_empty() {
    let persist = temp_store();
    std::fs::create_dir_all(persist.history_path().parent().unwrap()).unwrap();
    std::fs::write(persist.history_path(), "not json at all").unwrap();

    let store = HistoryStore::load(persist);
    assert!(store.is_empty());
}
