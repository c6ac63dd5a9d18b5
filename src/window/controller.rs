//! Window Controller — lifecycle and state of one native window.
//!
//! Owns the window's tab registry, one content surface per tab, the
//! per-window navigation coordinator, and the window's placement state.
//! Placement changes are debounced before they hit disk; the pending save is
//! flushed unconditionally when the window closes.

use std::collections::HashMap;

use crate::ipc::ChromeNotification;
use crate::managers::tab_registry::{CloseOutcome, TabRegistry, TabRegistryTrait};
use crate::persist::PersistentStore;
use crate::services::navigation::NavigationCoordinator;
use crate::surface::{ContentSurface, LifecycleEvent, SurfaceFactory};
use crate::types::settings::ShellSettings;
use crate::types::tab::{TabId, TabPatch};
use crate::types::window::{PersistedWindowState, WindowBounds, WindowId, WindowKind};
use crate::window::router::OpenTabIntent;

/// Quiet period after the last move/resize before placement is persisted.
const SAVE_DEBOUNCE_MS: u64 = 500;

/// Result of closing a tab through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabCloseOutcome {
    /// Unknown id; nothing changed.
    Ignored,
    /// Tab closed, window still has tabs.
    Closed,
    /// Last tab closed; the window should now be destroyed.
    WindowEmpty,
}

/// A completed page visit, reported upward for history recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub url: String,
    pub title: String,
}

pub struct WindowController {
    id: WindowId,
    kind: WindowKind,
    tabs: TabRegistry,
    surfaces: HashMap<TabId, Box<dyn ContentSurface>>,
    nav: NavigationCoordinator,
    bounds: WindowBounds,
    maximized: bool,
    save_due_in: Option<u64>,
}

impl WindowController {
    /// Creates a controller seeded from the persisted placement record, or
    /// defaults when none exists. Only default-kind windows restore
    /// placement; incognito windows always open at the default size.
    pub fn new(id: WindowId, kind: WindowKind, store: &PersistentStore) -> Self {
        let (bounds, maximized) = match kind {
            WindowKind::Default => match store.load_window_state() {
                Some(state) => (state.bounds(), state.maximized),
                None => (WindowBounds::default(), false),
            },
            WindowKind::Incognito => (WindowBounds::default(), false),
        };
        Self {
            id,
            kind,
            tabs: TabRegistry::new(),
            surfaces: HashMap::new(),
            nav: NavigationCoordinator::new(),
            bounds,
            maximized,
            save_due_in: None,
        }
    }

    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn bounds(&self) -> WindowBounds {
        self.bounds
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn tabs(&self) -> &TabRegistry {
        &self.tabs
    }

    pub fn nav(&self) -> &NavigationCoordinator {
        &self.nav
    }

    // ─── Tabs ───

    /// Opens a tab at `url`: exactly one registry entry and one surface are
    /// created, and the tab becomes active.
    pub fn open_tab(&mut self, url: &str, factory: &mut dyn SurfaceFactory) -> TabId {
        let id = self.tabs.create_tab(url, "");
        let surface = factory.create(self.kind, url);
        self.surfaces.insert(id, surface);
        self.tabs.set_active(id);
        id
    }

    /// Closes a tab, dropping its surface and zoom state. When another tab
    /// becomes active its zoom is restored to its surface.
    pub fn close_tab(&mut self, id: TabId) -> TabCloseOutcome {
        match self.tabs.close_tab(id) {
            CloseOutcome::Ignored => TabCloseOutcome::Ignored,
            CloseOutcome::Closed { now_empty } => {
                self.surfaces.remove(&id);
                self.nav.forget_tab(id);
                if now_empty {
                    TabCloseOutcome::WindowEmpty
                } else {
                    self.restore_active_zoom();
                    TabCloseOutcome::Closed
                }
            }
        }
    }

    /// Switches the active tab. Unknown ids are ignored.
    pub fn activate_tab(&mut self, id: TabId) -> bool {
        if !self.tabs.set_active(id) {
            return false;
        }
        self.restore_active_zoom();
        true
    }

    fn restore_active_zoom(&mut self) {
        if let Some(active) = self.tabs.active_id() {
            if let Some(surface) = self.surfaces.get_mut(&active) {
                self.nav.restore_zoom(active, surface.as_mut());
            }
        }
    }

    // ─── Navigation ───

    /// Resolves address-bar input and loads it in the active tab.
    pub fn navigate(&mut self, input: &str, settings: &ShellSettings) {
        let url = self.nav.normalize(settings, input);
        let Some(active) = self.tabs.active_id() else {
            return;
        };
        if let Some(surface) = self.surfaces.get_mut(&active) {
            surface.load(&url);
        }
        self.tabs.update(
            active,
            TabPatch {
                url: Some(url),
                loading: Some(true),
                ..TabPatch::default()
            },
        );
    }

    pub fn go_back(&mut self) {
        self.with_active_surface(|s| s.go_back());
    }

    pub fn go_forward(&mut self) {
        self.with_active_surface(|s| s.go_forward());
    }

    pub fn reload(&mut self) {
        self.with_active_surface(|s| s.reload());
    }

    fn with_active_surface(&mut self, f: impl FnOnce(&mut dyn ContentSurface)) {
        if let Some(active) = self.tabs.active_id() {
            if let Some(surface) = self.surfaces.get_mut(&active) {
                f(surface.as_mut());
            }
        }
    }

    /// Sets the active tab's zoom percentage, clamped, and applies it.
    pub fn set_active_zoom(&mut self, percent: i32) {
        if let Some(active) = self.tabs.active_id() {
            self.nav.set_zoom(active, percent);
            if let Some(surface) = self.surfaces.get_mut(&active) {
                self.nav.restore_zoom(active, surface.as_mut());
            }
        }
    }

    /// Adjusts the active tab's zoom by a signed delta.
    pub fn adjust_active_zoom(&mut self, delta: i32) {
        if let Some(active) = self.tabs.active_id() {
            self.nav.adjust_zoom(active, delta);
            if let Some(surface) = self.surfaces.get_mut(&active) {
                self.nav.restore_zoom(active, surface.as_mut());
            }
        }
    }

    // ─── Surface lifecycle ───

    /// Applies a surface lifecycle event to the owning tab's state.
    ///
    /// Events for unknown tabs are silent no-ops (the load raced a close).
    /// Returns the completed [`Visit`] when a load finishes, for history
    /// recording by the caller.
    pub fn handle_lifecycle(&mut self, tab: TabId, event: LifecycleEvent) -> Option<Visit> {
        if self.tabs.get(tab).is_none() {
            return None;
        }
        match event {
            LifecycleEvent::LoadStarted | LifecycleEvent::LoadCommitted => {
                self.tabs.update(
                    tab,
                    TabPatch {
                        loading: Some(true),
                        ..TabPatch::default()
                    },
                );
                None
            }
            LifecycleEvent::LoadFinished => {
                let (url, title, back, forward) = {
                    let surface = self.surfaces.get(&tab)?;
                    (
                        surface.url(),
                        surface.title(),
                        surface.can_go_back(),
                        surface.can_go_forward(),
                    )
                };
                let favicon = origin_of(&url).map(|o| format!("{}/favicon.ico", o));
                self.tabs.update(
                    tab,
                    TabPatch {
                        url: Some(url.clone()),
                        title: Some(title.clone()),
                        favicon,
                        loading: Some(false),
                        can_go_back: Some(back),
                        can_go_forward: Some(forward),
                    },
                );
                Some(Visit { url, title })
            }
            LifecycleEvent::TitleUpdated(title) => {
                self.tabs.update(
                    tab,
                    TabPatch {
                        title: Some(title),
                        ..TabPatch::default()
                    },
                );
                None
            }
            LifecycleEvent::Navigated | LifecycleEvent::NavigatedInPage => {
                let (url, back, forward) = {
                    let surface = self.surfaces.get(&tab)?;
                    (surface.url(), surface.can_go_back(), surface.can_go_forward())
                };
                self.tabs.update(
                    tab,
                    TabPatch {
                        url: Some(url),
                        can_go_back: Some(back),
                        can_go_forward: Some(forward),
                        ..TabPatch::default()
                    },
                );
                None
            }
            LifecycleEvent::Ready => {
                if let Some(surface) = self.surfaces.get_mut(&tab) {
                    surface.mark_ready();
                    self.nav.restore_zoom(tab, surface.as_mut());
                }
                None
            }
        }
    }

    /// Converts a denied popup into a tab-open intent tagged with this
    /// window as origin.
    pub fn popup_request(&self, url: &str) -> OpenTabIntent {
        OpenTabIntent {
            origin: Some(self.id.clone()),
            url: url.to_string(),
        }
    }

    // ─── Placement ───

    /// Records new placement and arms the debounced save.
    pub fn moved_or_resized(&mut self, bounds: WindowBounds) {
        self.bounds = bounds;
        self.save_due_in = Some(SAVE_DEBOUNCE_MS);
    }

    /// Records a maximize-state change from the native window manager and
    /// returns the notification to broadcast to chrome.
    pub fn set_maximized(&mut self, maximized: bool) -> Option<ChromeNotification> {
        if self.maximized == maximized {
            return None;
        }
        self.maximized = maximized;
        self.save_due_in = Some(SAVE_DEBOUNCE_MS);
        Some(ChromeNotification::MaximizeStateChanged { maximized })
    }

    /// Toggles the maximize state (chrome button press). The notification is
    /// what chrome renders from.
    pub fn toggle_maximized(&mut self) -> ChromeNotification {
        self.maximized = !self.maximized;
        self.save_due_in = Some(SAVE_DEBOUNCE_MS);
        ChromeNotification::MaximizeStateChanged {
            maximized: self.maximized,
        }
    }

    /// Advances timers: pending placement save and queued zoom restores.
    pub fn tick(&mut self, elapsed_ms: u64, store: &PersistentStore) {
        self.nav.tick(elapsed_ms, &mut self.surfaces);
        if let Some(due) = self.save_due_in {
            if due > elapsed_ms {
                self.save_due_in = Some(due - elapsed_ms);
            } else {
                self.save_due_in = None;
                self.save_placement(store);
            }
        }
    }

    /// Flushes any pending placement save immediately (window closing).
    pub fn flush_placement(&mut self, store: &PersistentStore) {
        self.save_due_in = None;
        self.save_placement(store);
    }

    fn save_placement(&self, store: &PersistentStore) {
        if self.kind != WindowKind::Default {
            return;
        }
        let state = PersistedWindowState::from_bounds(self.bounds, self.maximized);
        if let Err(e) = store.save_window_state(&state) {
            // Best-effort, same as the history log.
            log::warn!("window placement save failed: {}", e);
        }
    }

    pub fn has_pending_save(&self) -> bool {
        self.save_due_in.is_some()
    }
}

/// Extracts `scheme://host[:port]` from a URL, for favicon derivation.
fn origin_of(url: &str) -> Option<String> {
    let scheme_end = url.find("://")?;
    let rest = &url[scheme_end + 3..];
    if rest.is_empty() {
        return None;
    }
    let host_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    if host_end == 0 {
        return None;
    }
    Some(format!("{}{}", &url[..scheme_end + 3], &rest[..host_end]))
}
