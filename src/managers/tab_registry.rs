//! Tab Registry — the ordered tab collection of one window.
//!
//! Owns every `Tab` of its window plus the active-tab pointer. Insertion
//! order is the sole source of truth for "tab to the left/right" and is
//! preserved until explicit close.
//!
//! All operations taking a tab id are silent no-ops when the id is unknown.
//! That contract doubles as the cancellation mechanism: an async load event
//! arriving after its tab was closed simply lands nowhere.

use crate::types::tab::{Tab, TabId, TabPatch};

/// Result of a close operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The id was unknown; nothing changed.
    Ignored,
    /// The tab was removed. `now_empty` signals that the window is eligible
    /// for destruction — the registry itself has no destroy authority.
    Closed { now_empty: bool },
}

/// Trait defining the tab registry interface.
pub trait TabRegistryTrait {
    fn create_tab(&mut self, url: &str, title: &str) -> TabId;
    fn close_tab(&mut self, id: TabId) -> CloseOutcome;
    fn set_active(&mut self, id: TabId) -> bool;
    fn active(&self) -> Option<&Tab>;
    fn active_id(&self) -> Option<TabId>;
    fn get(&self, id: TabId) -> Option<&Tab>;
    fn update(&mut self, id: TabId, patch: TabPatch) -> bool;
    fn tabs(&self) -> &[Tab];
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// In-memory tab registry for one window.
pub struct TabRegistry {
    tabs: Vec<Tab>,
    active: Option<TabId>,
    next_id: TabId,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            next_id: 1,
        }
    }

    fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRegistryTrait for TabRegistry {
    /// Allocates the next monotonic id and appends the tab.
    ///
    /// Does NOT change the active tab — activation is the caller's decision.
    fn create_tab(&mut self, url: &str, title: &str) -> TabId {
        let id = self.next_id;
        self.next_id += 1;
        self.tabs.push(Tab {
            id,
            url: url.to_string(),
            title: title.to_string(),
            favicon: None,
            loading: false,
            can_go_back: false,
            can_go_forward: false,
        });
        id
    }

    /// Removes the tab. If it was active, the tab immediately to its left
    /// becomes active, falling back to the first remaining tab, falling back
    /// to no active tab when the registry is now empty.
    fn close_tab(&mut self, id: TabId) -> CloseOutcome {
        let Some(index) = self.index_of(id) else {
            return CloseOutcome::Ignored;
        };
        let was_active = self.active == Some(id);
        self.tabs.remove(index);

        if was_active {
            self.active = if self.tabs.is_empty() {
                None
            } else if index > 0 {
                Some(self.tabs[index - 1].id)
            } else {
                Some(self.tabs[0].id)
            };
        }

        CloseOutcome::Closed {
            now_empty: self.tabs.is_empty(),
        }
    }

    fn set_active(&mut self, id: TabId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        self.active = Some(id);
        true
    }

    fn active(&self) -> Option<&Tab> {
        self.active.and_then(|id| self.get(id))
    }

    fn active_id(&self) -> Option<TabId> {
        self.active
    }

    fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Merges non-`None` patch fields into the matching tab.
    ///
    /// Returns false (and changes nothing) for an unknown id — the normal
    /// case for a load event racing a tab close.
    fn update(&mut self, id: TabId, patch: TabPatch) -> bool {
        let Some(tab) = self.tabs.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if let Some(url) = patch.url {
            tab.url = url;
        }
        if let Some(title) = patch.title {
            tab.title = title;
        }
        if let Some(favicon) = patch.favicon {
            tab.favicon = Some(favicon);
        }
        if let Some(loading) = patch.loading {
            tab.loading = loading;
        }
        if let Some(back) = patch.can_go_back {
            tab.can_go_back = back;
        }
        if let Some(forward) = patch.can_go_forward {
            tab.can_go_forward = forward;
        }
        true
    }

    fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn len(&self) -> usize {
        self.tabs.len()
    }

    fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
