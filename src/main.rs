//! Prism Shell — the window, tab, and state-sync core of a desktop browser.
//!
//! Entry point: opens the wry/tao shell when built with the `gui` feature.
//! When built without it, runs a headless console demo against simulated
//! content surfaces.

/// A renderer fault must never take the whole shell down: log it, tell the
/// user, and keep the remaining windows alive.
fn install_fault_handler() {
    std::panic::set_hook(Box::new(|info| {
        log::error!("unhandled fault: {}", info);
        #[cfg(feature = "gui")]
        {
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Prism Shell")
                .set_description(format!("An internal error occurred:\n\n{}", info))
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
        }
    }));
}

#[cfg(feature = "gui")]
fn main() {
    env_logger::init();
    install_fault_handler();
    prism_shell::ui::shell_app::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    env_logger::init();
    install_fault_handler();

    println!();
    println!("Prism Shell v{} — headless demo", env!("CARGO_PKG_VERSION"));
    println!();

    demo_shell();
    demo_navigation();
    demo_history();

    println!();
    println!("Done. Build with --features gui for the real shell.");
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("── {} ──", name);
}

#[cfg(not(feature = "gui"))]
fn demo_shell() {
    use prism_shell::app::Shell;
    use prism_shell::managers::tab_registry::TabRegistryTrait;
    use prism_shell::surface::{HeadlessFactory, LifecycleEvent};
    use prism_shell::types::window::WindowKind;
    use prism_shell::window::router::OpenTabIntent;

    section("Shell core");

    let dir = std::env::temp_dir().join("prism-shell-demo");
    let mut shell = Shell::with_paths(
        Box::new(HeadlessFactory::new()),
        Some(dir.clone()),
        Some(dir.join("settings.json").to_string_lossy().to_string()),
    );

    let win = shell.create_window(WindowKind::Default);
    println!("  window {} opened with {} tab(s)", &win[..8], shell.tab_count());

    let (_, tab) = shell
        .open_tab(OpenTabIntent {
            origin: Some(win.clone()),
            url: "https://www.rust-lang.org".to_string(),
        })
        .unwrap();
    shell.handle_lifecycle(&win, tab, LifecycleEvent::LoadStarted);
    shell.handle_lifecycle(&win, tab, LifecycleEvent::Ready);
    shell.handle_lifecycle(&win, tab, LifecycleEvent::LoadFinished);
    println!("  opened and loaded tab {}, total tabs = {}", tab, shell.tab_count());

    let active = shell.window(&win).unwrap().tabs().active().unwrap();
    println!("  active tab: {} (loading={})", active.url, active.loading);

    shell.close_tab(&win, tab);
    println!("  closed tab, total tabs = {}", shell.tab_count());
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_navigation() {
    use prism_shell::managers::history_store::HistoryStore;
    use prism_shell::services::navigation::NavigationCoordinator;
    use prism_shell::types::settings::ShellSettings;

    section("Address-bar normalization");

    let nav = NavigationCoordinator::new();
    let settings = ShellSettings::default();
    let history = HistoryStore::in_memory();

    for input in ["rust-lang.org", "localhost:8080", "how do browsers work", ""] {
        println!("  {:?} -> {}", input, nav.normalize(&settings, input));
    }
    let suggestions = nav.suggestions(&settings, &history, "rust");
    println!("  suggestions for \"rust\": {} (search fallback)", suggestions.len());
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_history() {
    use prism_shell::managers::history_store::{HistoryStore, HistoryStoreTrait};

    section("History store");

    let mut history = HistoryStore::in_memory();
    history.record("https://github.com", "GitHub");
    history.record("https://www.rust-lang.org", "Rust");
    history.record("https://github.com", "GitHub — revisited");
    println!("  recorded 3 visits, {} unique entries", history.len());

    let results = history.query("rust");
    println!("  query \"rust\": {} result(s)", results.len());

    let groups = history.grouped_by_date();
    println!("  {} date group(s), newest first", groups.len());
}
