//! Cross-window routing for suppressed popups.
//!
//! Every popup and target=_blank navigation is denied at the view layer and
//! re-expressed as an [`OpenTabIntent`]. The router decides which live window
//! receives the tab: the originating window while it exists, otherwise the
//! primary window, otherwise nowhere (the intent is dropped).

use crate::types::window::WindowId;

/// A request to open `url` as a tab, carrying the window it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTabIntent {
    pub origin: Option<WindowId>,
    pub url: String,
}

/// Tracks the primary window and resolves tab-open intents.
///
/// The primary window is the first one created and survives reassignment:
/// when it closes, the oldest remaining window takes over.
pub struct CrossWindowRouter {
    primary: Option<WindowId>,
}

impl CrossWindowRouter {
    pub fn new() -> Self {
        Self { primary: None }
    }

    pub fn primary(&self) -> Option<&WindowId> {
        self.primary.as_ref()
    }

    /// Registers a newly created window; the first becomes primary.
    pub fn window_created(&mut self, id: &WindowId) {
        if self.primary.is_none() {
            self.primary = Some(id.clone());
        }
    }

    /// Drops the window from routing. If it was primary, the oldest
    /// remaining window (first in `remaining`) inherits the role.
    pub fn window_closed(&mut self, id: &WindowId, remaining: &[WindowId]) {
        if self.primary.as_ref() == Some(id) {
            self.primary = remaining.first().cloned();
        }
    }

    /// Picks the window that should receive a tab-open intent.
    ///
    /// Prefers the originating window if it is still alive, then the primary
    /// window. `None` means every candidate is gone and the intent drops.
    pub fn resolve(&self, origin: Option<&WindowId>, live: &[WindowId]) -> Option<WindowId> {
        if let Some(origin) = origin {
            if live.contains(origin) {
                return Some(origin.clone());
            }
        }
        match &self.primary {
            Some(p) if live.contains(p) => Some(p.clone()),
            _ => None,
        }
    }
}

impl Default for CrossWindowRouter {
    fn default() -> Self {
        Self::new()
    }
}
