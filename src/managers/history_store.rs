//! History Store for Prism Shell.
//!
//! Append-only log of visited URLs, newest first, with url de-duplication,
//! capped retention, and grouped/query views. Persisted as a whole-file
//! overwrite on every mutation; write failures are logged and skipped.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, NaiveDate, TimeZone};

use crate::persist::PersistentStore;
use crate::types::history::HistoryEntry;

/// Maximum number of retained entries; the oldest is evicted past the cap.
pub const HISTORY_CAP: usize = 1000;

/// Trait defining history store operations.
pub trait HistoryStoreTrait {
    fn record(&mut self, url: &str, title: &str);
    fn record_at(&mut self, url: &str, title: &str, visited_at: i64);
    fn query(&self, text: &str) -> Vec<&HistoryEntry>;
    fn grouped_by_date(&self) -> Vec<(NaiveDate, Vec<&HistoryEntry>)>;
    fn delete(&mut self, url: &str, visited_at: i64) -> bool;
    fn clear(&mut self);
    fn entries(&self) -> &[HistoryEntry];
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// In-memory history log with optional file persistence.
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    store: Option<PersistentStore>,
}

impl HistoryStore {
    /// Creates a store with no backing file (incognito demo, tests).
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            store: None,
        }
    }

    /// Loads the persisted log through `store`. Absent or malformed files
    /// yield an empty log.
    pub fn load(store: PersistentStore) -> Self {
        let entries = store.load_history();
        Self {
            entries,
            store: Some(store),
        }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save_history(&self.entries) {
                // Best-effort: skip on write failure, no synchronous retry.
                log::warn!("history save failed: {}", e);
            }
        }
    }

    fn visit_date(visited_at: i64) -> NaiveDate {
        Local
            .timestamp_opt(visited_at, 0)
            .single()
            .map(|dt| dt.date_naive())
            .unwrap_or_default()
    }
}

/// Human-readable day label for a visit timestamp:
/// "Today", "Yesterday", or a formatted date.
pub fn format_visit_day(visited_at: i64) -> String {
    let date = HistoryStore::visit_date(visited_at);
    let today = Local::now().date_naive();
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%B %-d, %Y").to_string()
    }
}

impl HistoryStoreTrait for HistoryStore {
    /// Records a visit with the current timestamp.
    fn record(&mut self, url: &str, title: &str) {
        self.record_at(url, title, Self::now());
    }

    /// Records a visit: any existing entry with the same url is removed,
    /// the new entry goes to the front, and the log is truncated to
    /// [`HISTORY_CAP`].
    fn record_at(&mut self, url: &str, title: &str, visited_at: i64) {
        self.entries.retain(|e| e.url != url);
        self.entries.insert(
            0,
            HistoryEntry {
                url: url.to_string(),
                title: title.to_string(),
                visited_at,
            },
        );
        self.entries.truncate(HISTORY_CAP);
        self.persist();
    }

    /// Case-insensitive substring match against title, url, and the
    /// human-formatted day of the visit. Results keep stored recency order.
    fn query(&self, text: &str) -> Vec<&HistoryEntry> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|e| {
                e.title.to_lowercase().contains(&needle)
                    || e.url.to_lowercase().contains(&needle)
                    || format_visit_day(e.visited_at)
                        .to_lowercase()
                        .contains(&needle)
            })
            .collect()
    }

    /// Partitions entries by visit date (not time), newest date first.
    /// Within a date the order is recency, which is insertion order.
    fn grouped_by_date(&self) -> Vec<(NaiveDate, Vec<&HistoryEntry>)> {
        let mut groups: Vec<(NaiveDate, Vec<&HistoryEntry>)> = Vec::new();
        for entry in &self.entries {
            let date = Self::visit_date(entry.visited_at);
            match groups.iter_mut().find(|(d, _)| *d == date) {
                Some((_, bucket)) => bucket.push(entry),
                None => groups.push((date, vec![entry])),
            }
        }
        groups.sort_by(|a, b| b.0.cmp(&a.0));
        groups
    }

    /// Removes the entry matching exactly (url, visited_at). Exact-match
    /// deletion keeps the operation idempotent under concurrent mutation.
    fn delete(&mut self, url: &str, visited_at: i64) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| e.url != url || e.visited_at != visited_at);
        let removed = self.entries.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
