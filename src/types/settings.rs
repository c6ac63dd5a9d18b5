use serde::{Deserialize, Serialize};

/// Placeholder substituted with the percent-encoded query in
/// [`ShellSettings::search_engine`].
pub const SEARCH_QUERY_PLACEHOLDER: &str = "{query}";

/// Process-wide shell settings.
///
/// Loaded once at startup, mutated via explicit update calls, persisted on
/// each update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShellSettings {
    pub home_page: String,
    pub search_engine: String,
    pub theme: ThemeMode,
    pub show_bookmarks_bar: bool,
    pub show_status_bar: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            home_page: "https://www.google.com".to_string(),
            search_engine: "https://www.google.com/search?q={query}".to_string(),
            theme: ThemeMode::Dark,
            show_bookmarks_bar: true,
            show_status_bar: true,
        }
    }
}

/// Theme mode selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
    System,
}
