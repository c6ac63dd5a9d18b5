//! Whole-file JSON persistence for window placement and browsing history.
//!
//! Every record is written as a single atomic overwrite (temp file + rename);
//! there are no partial or append-on-disk updates. Readers treat absent and
//! malformed files identically: fall back to defaults, never fail startup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::platform;
use crate::types::errors::PersistError;
use crate::types::history::HistoryEntry;
use crate::types::window::PersistedWindowState;

const WINDOW_STATE_FILE: &str = "window-state.json";
const HISTORY_FILE: &str = "history.json";

/// File-backed key-value store rooted at the platform data directory.
///
/// Cheap to clone — it only carries the root path. All writes across windows
/// serialize through the single orchestration thread, so one writer owns a
/// file at a time.
#[derive(Debug, Clone)]
pub struct PersistentStore {
    dir: PathBuf,
}

impl PersistentStore {
    /// Creates a store rooted at `dir_override`, or the platform data
    /// directory when `None`.
    pub fn new(dir_override: Option<PathBuf>) -> Self {
        let dir = dir_override.unwrap_or_else(platform::get_data_dir);
        Self { dir }
    }

    pub fn window_state_path(&self) -> PathBuf {
        self.dir.join(WINDOW_STATE_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// Reads the saved window placement. Absent or malformed ⇒ `None`.
    pub fn load_window_state(&self) -> Option<PersistedWindowState> {
        read_json(&self.window_state_path())
    }

    /// Writes the window placement record.
    pub fn save_window_state(&self, state: &PersistedWindowState) -> Result<(), PersistError> {
        write_json(&self.window_state_path(), state)
    }

    /// Reads the persisted history log. Absent or malformed ⇒ empty.
    pub fn load_history(&self) -> Vec<HistoryEntry> {
        read_json(&self.history_path()).unwrap_or_default()
    }

    /// Writes the full history log.
    pub fn save_history(&self, entries: &[HistoryEntry]) -> Result<(), PersistError> {
        write_json(&self.history_path(), &entries)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            // Malformed state is treated as absent, never fatal.
            log::warn!("malformed state file {}: {}", path.display(), e);
            None
        }
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| PersistError::Io(format!("create {}: {}", parent.display(), e)))?;
    }
    let json = serde_json::to_string(value)
        .map_err(|e| PersistError::Malformed(format!("serialize {}: {}", path.display(), e)))?;

    // Temp file + rename gives a single atomic overwrite.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| PersistError::Io(format!("write {}: {}", tmp.display(), e)))?;
    fs::rename(&tmp, path)
        .map_err(|e| PersistError::Io(format!("rename {}: {}", path.display(), e)))?;
    Ok(())
}
