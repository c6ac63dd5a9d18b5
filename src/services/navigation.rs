//! Navigation Coordinator for Prism Shell.
//!
//! Translates address-bar input and suggestion selection into navigation
//! commands for the active content surface, and tracks per-tab zoom.
//!
//! Zoom is stored as an integer percentage in [25, 500] keyed by tab handle.
//! It survives navigation within the tab and is restored when switching
//! tabs — but zoom APIs are unavailable before the surface's first content
//! commit, so restoration against a pre-ready surface is queued and retried
//! with exponential backoff.

use std::collections::HashMap;

use crate::managers::history_store::{HistoryStore, HistoryStoreTrait};
use crate::surface::ContentSurface;
use crate::types::settings::{ShellSettings, SEARCH_QUERY_PLACEHOLDER};
use crate::types::tab::TabId;

pub const ZOOM_MIN: i32 = 25;
pub const ZOOM_MAX: i32 = 500;
pub const ZOOM_DEFAULT: i32 = 100;

/// First retry delay for zoom restoration against a pre-ready surface.
const ZOOM_RETRY_BASE_MS: u64 = 50;
/// Retries double up to this many attempts, then the restoration is dropped.
const ZOOM_RETRY_MAX_ATTEMPTS: u32 = 8;

/// An address-bar autocomplete candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    History,
    Search,
}

struct ZoomRetry {
    tab: TabId,
    attempts: u32,
    due_in_ms: u64,
}

/// Per-window navigation state: zoom percentages and pending zoom
/// restorations.
pub struct NavigationCoordinator {
    zoom: HashMap<TabId, i32>,
    pending: Vec<ZoomRetry>,
}

impl NavigationCoordinator {
    pub fn new() -> Self {
        Self {
            zoom: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Resolves address-bar text to a URL.
    ///
    /// Absolute URLs with a scheme pass through verbatim; host-looking input
    /// (contains a dot, or `localhost[:port]`) gets `https://` prepended;
    /// empty input resolves to the home page; everything else becomes a
    /// search through the configured engine template.
    pub fn normalize(&self, settings: &ShellSettings, input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return settings.home_page.clone();
        }
        if has_scheme(trimmed) {
            return trimmed.to_string();
        }
        if looks_like_host(trimmed) {
            return format!("https://{}", trimmed);
        }
        search_url(settings, trimmed)
    }

    /// Suggestion list for a partial query: history entries whose title or
    /// url contains the query (case-insensitive), in recency order, else a
    /// single synthetic search suggestion. No ranking beyond recency.
    pub fn suggestions(
        &self,
        settings: &ShellSettings,
        history: &HistoryStore,
        query: &str,
    ) -> Vec<Suggestion> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let needle = trimmed.to_lowercase();
        let matches: Vec<Suggestion> = history
            .entries()
            .iter()
            .filter(|e| {
                e.title.to_lowercase().contains(&needle) || e.url.to_lowercase().contains(&needle)
            })
            .map(|e| Suggestion {
                kind: SuggestionKind::History,
                title: e.title.clone(),
                url: e.url.clone(),
            })
            .collect();
        if !matches.is_empty() {
            return matches;
        }
        vec![Suggestion {
            kind: SuggestionKind::Search,
            title: format!("Search for \"{}\"", trimmed),
            url: search_url(settings, trimmed),
        }]
    }

    // ─── Zoom ───

    /// Stored zoom for a tab; tabs not found default to 100.
    pub fn zoom_for(&self, tab: TabId) -> i32 {
        self.zoom.get(&tab).copied().unwrap_or(ZOOM_DEFAULT)
    }

    /// Stores a zoom percentage, clamped to [25, 500]. Returns the stored value.
    pub fn set_zoom(&mut self, tab: TabId, percent: i32) -> i32 {
        let clamped = percent.clamp(ZOOM_MIN, ZOOM_MAX);
        self.zoom.insert(tab, clamped);
        clamped
    }

    /// Adjusts zoom by a signed delta (wheel or buttons), clamped.
    pub fn adjust_zoom(&mut self, tab: TabId, delta: i32) -> i32 {
        let next = self.zoom_for(tab) + delta;
        self.set_zoom(tab, next)
    }

    /// Parses direct numeric entry: non-numeric input coerces to 100 before
    /// clamping.
    pub fn zoom_from_entry(text: &str) -> i32 {
        let value = text
            .trim()
            .trim_end_matches('%')
            .parse::<i32>()
            .unwrap_or(ZOOM_DEFAULT);
        value.clamp(ZOOM_MIN, ZOOM_MAX)
    }

    /// Drops zoom state and pending restorations for a closed tab.
    pub fn forget_tab(&mut self, tab: TabId) {
        self.zoom.remove(&tab);
        self.pending.retain(|r| r.tab != tab);
    }

    /// Applies the tab's stored zoom to its surface, or queues a retry when
    /// the surface has not committed content yet.
    pub fn restore_zoom(&mut self, tab: TabId, surface: &mut dyn ContentSurface) {
        if surface.is_ready() {
            surface.set_zoom_factor(f64::from(self.zoom_for(tab)) / 100.0);
            self.pending.retain(|r| r.tab != tab);
            return;
        }
        if !self.pending.iter().any(|r| r.tab == tab) {
            self.pending.push(ZoomRetry {
                tab,
                attempts: 0,
                due_in_ms: ZOOM_RETRY_BASE_MS,
            });
        }
    }

    /// True if a zoom restoration is still queued for the tab.
    pub fn has_pending_zoom(&self, tab: TabId) -> bool {
        self.pending.iter().any(|r| r.tab == tab)
    }

    /// Advances pending restorations by `elapsed_ms`.
    ///
    /// Due retries against a ready surface apply and complete; against a
    /// still-unready surface they back off (delay doubles) until the attempt
    /// budget runs out. Retries whose tab has vanished are dropped silently.
    pub fn tick(
        &mut self,
        elapsed_ms: u64,
        surfaces: &mut HashMap<TabId, Box<dyn ContentSurface>>,
    ) {
        let mut retained = Vec::new();
        for mut retry in self.pending.drain(..) {
            let Some(surface) = surfaces.get_mut(&retry.tab) else {
                continue; // tab closed while the retry was queued
            };
            if retry.due_in_ms > elapsed_ms {
                retry.due_in_ms -= elapsed_ms;
                retained.push(retry);
                continue;
            }
            if surface.is_ready() {
                let percent = self.zoom.get(&retry.tab).copied().unwrap_or(ZOOM_DEFAULT);
                surface.set_zoom_factor(f64::from(percent) / 100.0);
                continue;
            }
            retry.attempts += 1;
            if retry.attempts >= ZOOM_RETRY_MAX_ATTEMPTS {
                log::debug!("zoom restore for tab {} gave up", retry.tab);
                continue;
            }
            retry.due_in_ms = ZOOM_RETRY_BASE_MS << retry.attempts;
            retained.push(retry);
        }
        self.pending = retained;
    }
}

impl Default for NavigationCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// True for input starting with `scheme://` where scheme is
/// `[a-z][a-z0-9+.-]*` (case-insensitive).
fn has_scheme(input: &str) -> bool {
    let Some(idx) = input.find("://") else {
        return false;
    };
    let scheme = &input[..idx];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '.' || c == '-')
}

/// Host-looking input: contains a dot, or `localhost[:port]`.
fn looks_like_host(input: &str) -> bool {
    if input.contains('.') {
        return true;
    }
    match input.strip_prefix("localhost") {
        Some("") => true,
        Some(rest) => {
            rest.starts_with(':') && rest.len() > 1 && rest[1..].chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Substitutes the percent-encoded query into the engine template. Templates
/// without the placeholder get the query appended (legacy suffix form).
fn search_url(settings: &ShellSettings, query: &str) -> String {
    let encoded = percent_encode(query);
    if settings.search_engine.contains(SEARCH_QUERY_PLACEHOLDER) {
        settings
            .search_engine
            .replace(SEARCH_QUERY_PLACEHOLDER, &encoded)
    } else {
        format!("{}{}", settings.search_engine, encoded)
    }
}

/// Percent-encodes everything outside the unreserved set; space becomes %20.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push(char::from(b"0123456789ABCDEF"[(b >> 4) as usize]));
                out.push(char::from(b"0123456789ABCDEF"[(b & 0xf) as usize]));
            }
        }
    }
    out
}
