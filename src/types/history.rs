use serde::{Deserialize, Serialize};

/// A single visited-page record.
///
/// The url is the uniqueness key at record time; `visited_at` (unix seconds)
/// participates in deletion so that removing one entry stays idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    pub visited_at: i64,
}
