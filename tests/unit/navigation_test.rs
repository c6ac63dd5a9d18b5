use std::collections::HashMap;

use rstest::rstest;

use prism_shell::managers::history_store::{HistoryStore, HistoryStoreTrait};
use prism_shell::services::navigation::{
    NavigationCoordinator, SuggestionKind, ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN,
};
use prism_shell::surface::{ContentSurface, HeadlessSurface};
use prism_shell::types::settings::ShellSettings;
use prism_shell::types::tab::TabId;

fn settings() -> ShellSettings {
    ShellSettings::default()
}

// ─── normalize ───

#[test]
fn test_normalize_passes_through_absolute_urls() {
    let nav = NavigationCoordinator::new();
    let s = settings();
    assert_eq!(
        nav.normalize(&s, "https://example.com/path?q=1"),
        "https://example.com/path?q=1"
    );
    assert_eq!(nav.normalize(&s, "ftp://files.example"), "ftp://files.example");
    assert_eq!(
        nav.normalize(&s, "custom+scheme://thing"),
        "custom+scheme://thing"
    );
}

#[test]
fn test_normalize_prepends_https_for_hosts() {
    let nav = NavigationCoordinator::new();
    let s = settings();
    assert_eq!(nav.normalize(&s, "example.com"), "https://example.com");
    assert_eq!(nav.normalize(&s, "  example.com  "), "https://example.com");
    assert_eq!(nav.normalize(&s, "localhost"), "https://localhost");
    assert_eq!(nav.normalize(&s, "localhost:8080"), "https://localhost:8080");
}

#[test]
fn test_normalize_empty_resolves_to_home() {
    let nav = NavigationCoordinator::new();
    let s = settings();
    assert_eq!(nav.normalize(&s, ""), s.home_page);
    assert_eq!(nav.normalize(&s, "   "), s.home_page);
}

#[test]
fn test_normalize_searches_everything_else() {
    let nav = NavigationCoordinator::new();
    let s = settings();
    assert_eq!(
        nav.normalize(&s, "rust borrow checker"),
        "https://www.google.com/search?q=rust%20borrow%20checker"
    );
    // "localhost9000" is not localhost[:port].
    assert!(nav.normalize(&s, "localhost9000").contains("/search?q="));
}

#[test]
fn test_normalize_any_dot_means_host() {
    let nav = NavigationCoordinator::new();
    let s = settings();
    // A dot wins even with spaces around it; search needs a dotless phrase.
    assert_eq!(
        nav.normalize(&s, "what is example.com"),
        "https://what is example.com"
    );
}

#[rstest]
#[case("https://example.com", "https://example.com")]
#[case("http://example.com/a", "http://example.com/a")]
#[case("example.com", "https://example.com")]
#[case("sub.domain.example.com/path", "https://sub.domain.example.com/path")]
#[case("localhost", "https://localhost")]
#[case("localhost:3000", "https://localhost:3000")]
#[case("what is example.com", "https://what is example.com")]
#[case("hello", "https://www.google.com/search?q=hello")]
#[case("a b", "https://www.google.com/search?q=a%20b")]
#[case("c++ tutorial", "https://www.google.com/search?q=c%2B%2B%20tutorial")]
fn test_normalize_cases(#[case] input: &str, #[case] expected: &str) {
    let nav = NavigationCoordinator::new();
    assert_eq!(nav.normalize(&settings(), input), expected);
}

#[test]
fn test_normalize_custom_engine_template() {
    let nav = NavigationCoordinator::new();
    let mut s = settings();
    s.search_engine = "https://duckduckgo.com/?q={query}&ia=web".to_string();
    assert_eq!(
        nav.normalize(&s, "hello world"),
        "https://duckduckgo.com/?q=hello%20world&ia=web"
    );
}

#[test]
fn test_normalize_engine_without_placeholder_appends() {
    let nav = NavigationCoordinator::new();
    let mut s = settings();
    s.search_engine = "https://search.example/?q=".to_string();
    assert_eq!(
        nav.normalize(&s, "abc"),
        "https://search.example/?q=abc"
    );
}

// ─── suggestions ───

#[test]
fn test_suggestions_from_history_in_recency_order() {
    let nav = NavigationCoordinator::new();
    let s = settings();
    let mut history = HistoryStore::in_memory();
    history.record_at("https://rust-lang.org", "Rust", 100);
    history.record_at("https://docs.rs", "Rust docs", 200);
    history.record_at("https://example.com", "Unrelated", 300);

    let suggestions = nav.suggestions(&s, &history, "rust");
    assert_eq!(suggestions.len(), 2);
    assert!(suggestions.iter().all(|x| x.kind == SuggestionKind::History));
    // Recency order: the later visit first.
    assert_eq!(suggestions[0].url, "https://docs.rs");
    assert_eq!(suggestions[1].url, "https://rust-lang.org");
}

#[test]
fn test_suggestions_fall_back_to_search() {
    let nav = NavigationCoordinator::new();
    let s = settings();
    let history = HistoryStore::in_memory();

    let suggestions = nav.suggestions(&s, &history, "obscure query");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].kind, SuggestionKind::Search);
    assert_eq!(suggestions[0].title, "Search for \"obscure query\"");
    assert!(suggestions[0].url.contains("obscure%20query"));
}

#[test]
fn test_suggestions_empty_query_yields_nothing() {
    let nav = NavigationCoordinator::new();
    let s = settings();
    let mut history = HistoryStore::in_memory();
    history.record_at("https://a.example", "A", 100);

    assert!(nav.suggestions(&s, &history, "").is_empty());
    assert!(nav.suggestions(&s, &history, "   ").is_empty());
}

// ─── zoom ───

#[test]
fn test_zoom_defaults_to_100() {
    let nav = NavigationCoordinator::new();
    assert_eq!(nav.zoom_for(1), ZOOM_DEFAULT);
}

#[test]
fn test_zoom_clamps_to_bounds() {
    let mut nav = NavigationCoordinator::new();
    assert_eq!(nav.set_zoom(1, 1000), ZOOM_MAX);
    assert_eq!(nav.set_zoom(1, 1), ZOOM_MIN);
    assert_eq!(nav.set_zoom(1, 150), 150);
}

#[test]
fn test_adjust_zoom_saturates() {
    let mut nav = NavigationCoordinator::new();
    nav.set_zoom(1, 490);
    assert_eq!(nav.adjust_zoom(1, 25), ZOOM_MAX);
    nav.set_zoom(1, 30);
    assert_eq!(nav.adjust_zoom(1, -25), ZOOM_MIN);
}

#[test]
fn test_zoom_from_entry() {
    assert_eq!(NavigationCoordinator::zoom_from_entry("150"), 150);
    assert_eq!(NavigationCoordinator::zoom_from_entry("150%"), 150);
    assert_eq!(NavigationCoordinator::zoom_from_entry(" 80 "), 80);
    // Non-numeric coerces to the default before clamping.
    assert_eq!(NavigationCoordinator::zoom_from_entry("huge"), ZOOM_DEFAULT);
    assert_eq!(NavigationCoordinator::zoom_from_entry("9999"), ZOOM_MAX);
    assert_eq!(NavigationCoordinator::zoom_from_entry("0"), ZOOM_MIN);
}

#[test]
fn test_zoom_is_per_tab() {
    let mut nav = NavigationCoordinator::new();
    nav.set_zoom(1, 200);
    nav.set_zoom(2, 50);
    assert_eq!(nav.zoom_for(1), 200);
    assert_eq!(nav.zoom_for(2), 50);
    nav.forget_tab(1);
    assert_eq!(nav.zoom_for(1), ZOOM_DEFAULT);
}

#[test]
fn test_restore_zoom_applies_when_ready() {
    let mut nav = NavigationCoordinator::new();
    let mut surface = HeadlessSurface::new("https://a.example");
    surface.mark_ready();
    nav.set_zoom(1, 200);
    nav.restore_zoom(1, &mut surface);
    assert!((surface.zoom_factor() - 2.0).abs() < f64::EPSILON);
    assert!(!nav.has_pending_zoom(1));
}

#[test]
fn test_restore_zoom_retries_until_ready() {
    let mut nav = NavigationCoordinator::new();
    let tab: TabId = 1;
    let mut surfaces: HashMap<TabId, Box<dyn ContentSurface>> = HashMap::new();
    surfaces.insert(tab, Box::new(HeadlessSurface::new("https://a.example")));

    nav.set_zoom(tab, 300);
    nav.restore_zoom(tab, surfaces.get_mut(&tab).unwrap().as_mut());
    assert!(nav.has_pending_zoom(tab));

    // Surface still not ready: the retry backs off instead of applying.
    nav.tick(100, &mut surfaces);
    assert!(nav.has_pending_zoom(tab));
    assert!((surfaces.get(&tab).unwrap().zoom_factor() - 1.0).abs() < f64::EPSILON);

    // Once ready, the next due retry applies the stored zoom.
    surfaces.get_mut(&tab).unwrap().mark_ready();
    nav.tick(10_000, &mut surfaces);
    assert!(!nav.has_pending_zoom(tab));
    assert!((surfaces.get(&tab).unwrap().zoom_factor() - 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_zoom_retry_dropped_for_closed_tab() {
    let mut nav = NavigationCoordinator::new();
    let tab: TabId = 7;
    let mut surfaces: HashMap<TabId, Box<dyn ContentSurface>> = HashMap::new();
    surfaces.insert(tab, Box::new(HeadlessSurface::new("https://a.example")));

    nav.restore_zoom(tab, surfaces.get_mut(&tab).unwrap().as_mut());
    assert!(nav.has_pending_zoom(tab));

    surfaces.remove(&tab);
    nav.tick(100, &mut surfaces);
    assert!(!nav.has_pending_zoom(tab));
}

#[test]
fn test_zoom_retry_gives_up_eventually() {
    let mut nav = NavigationCoordinator::new();
    let tab: TabId = 1;
    let mut surfaces: HashMap<TabId, Box<dyn ContentSurface>> = HashMap::new();
    surfaces.insert(tab, Box::new(HeadlessSurface::new("https://a.example")));

    nav.restore_zoom(tab, surfaces.get_mut(&tab).unwrap().as_mut());
    // Never becomes ready; the retry budget runs out.
    for _ in 0..64 {
        nav.tick(1_000_000, &mut surfaces);
    }
    assert!(!nav.has_pending_zoom(tab));
}
