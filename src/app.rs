//! Shell Core for Prism Shell.
//!
//! Central struct owning settings, history, persistence, the cross-window
//! router, and one [`WindowController`] per live native window. All state
//! mutation funnels through this struct on the orchestration thread; the
//! view layer only delivers events and renders notifications.

use std::path::PathBuf;

use uuid::Uuid;

use crate::ipc::{ChromeNotification, ChromeRequest};
use crate::managers::history_store::{HistoryStore, HistoryStoreTrait};
use crate::managers::tab_registry::TabRegistryTrait;
use crate::persist::PersistentStore;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::surface::{LifecycleEvent, SurfaceFactory};
use crate::types::settings::ShellSettings;
use crate::types::tab::TabId;
use crate::types::window::{WindowId, WindowKind};
use crate::window::controller::{TabCloseOutcome, WindowController};
use crate::window::router::{CrossWindowRouter, OpenTabIntent};

/// Central shell struct holding all windows and shared services.
pub struct Shell {
    settings: SettingsEngine,
    history: HistoryStore,
    store: PersistentStore,
    router: CrossWindowRouter,
    windows: Vec<WindowController>,
    factory: Box<dyn SurfaceFactory>,
}

impl Shell {
    /// Creates a shell rooted at the platform directories.
    pub fn new(factory: Box<dyn SurfaceFactory>) -> Self {
        Self::with_paths(factory, None, None)
    }

    /// Creates a shell with explicit storage locations (tests, demos).
    pub fn with_paths(
        factory: Box<dyn SurfaceFactory>,
        data_dir: Option<PathBuf>,
        config_path: Option<String>,
    ) -> Self {
        let store = PersistentStore::new(data_dir);
        let mut settings = SettingsEngine::new(config_path);
        if let Err(e) = settings.load() {
            log::warn!("settings load failed, using defaults: {}", e);
        }
        let history = HistoryStore::load(store.clone());
        Self {
            settings,
            history,
            store,
            router: CrossWindowRouter::new(),
            windows: Vec::new(),
            factory,
        }
    }

    pub fn settings(&self) -> &ShellSettings {
        self.settings.get_settings()
    }

    pub fn settings_engine_mut(&mut self) -> &mut SettingsEngine {
        &mut self.settings
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    pub fn windows(&self) -> &[WindowController] {
        &self.windows
    }

    pub fn window(&self, id: &WindowId) -> Option<&WindowController> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn window_mut(&mut self, id: &WindowId) -> Option<&mut WindowController> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    pub fn primary_window(&self) -> Option<&WindowId> {
        self.router.primary()
    }

    fn live_ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(|w| w.id().clone()).collect()
    }

    // ─── Windows ───

    /// Creates a window of `kind` with one tab at the home page. The first
    /// window created becomes primary.
    pub fn create_window(&mut self, kind: WindowKind) -> WindowId {
        let id: WindowId = Uuid::new_v4().to_string();
        let mut window = WindowController::new(id.clone(), kind, &self.store);
        let home = self.settings.get_settings().home_page.clone();
        window.open_tab(&home, self.factory.as_mut());
        self.router.window_created(&id);
        self.windows.push(window);
        log::info!("created {:?} window {}", kind, id);
        id
    }

    /// Destroys a window: flushes its pending placement save, removes it,
    /// and reassigns the primary role if needed. Unknown ids are ignored.
    pub fn close_window(&mut self, id: &WindowId) {
        let Some(index) = self.windows.iter().position(|w| w.id() == id) else {
            return;
        };
        let mut window = self.windows.remove(index);
        window.flush_placement(&self.store);
        let remaining = self.live_ids();
        self.router.window_closed(id, &remaining);
        log::info!("closed window {}", id);
    }

    // ─── Tabs ───

    /// Routes a tab-open intent to a live window. Returns the receiving
    /// window and new tab, or `None` when no window can take it.
    pub fn open_tab(&mut self, intent: OpenTabIntent) -> Option<(WindowId, TabId)> {
        let live = self.live_ids();
        let target = self.router.resolve(intent.origin.as_ref(), &live)?;
        let factory = self.factory.as_mut();
        let window = self.windows.iter_mut().find(|w| w.id() == &target)?;
        let tab = window.open_tab(&intent.url, factory);
        Some((target, tab))
    }

    /// Closes a tab; a window whose last tab closes is destroyed.
    pub fn close_tab(&mut self, window_id: &WindowId, tab: TabId) {
        let Some(window) = self.window_mut(window_id) else {
            return;
        };
        if window.close_tab(tab) == TabCloseOutcome::WindowEmpty {
            let id = window_id.clone();
            self.close_window(&id);
        }
    }

    // ─── Events ───

    /// Delivers a surface lifecycle event. Events for destroyed windows are
    /// silent no-ops. Completed visits are recorded to history unless the
    /// window is incognito.
    pub fn handle_lifecycle(&mut self, window_id: &WindowId, tab: TabId, event: LifecycleEvent) {
        let Some(window) = self.windows.iter_mut().find(|w| w.id() == window_id) else {
            return;
        };
        let kind = window.kind();
        if let Some(visit) = window.handle_lifecycle(tab, event) {
            if kind != WindowKind::Incognito {
                self.history.record(&visit.url, &visit.title);
            }
        }
    }

    /// Dispatches a chrome command to the owning window, returning the
    /// notification to render and the window whose chrome should render it,
    /// if any. For most commands that is the requesting window;
    /// `CreateWindow` addresses the new window instead.
    pub fn handle_chrome(
        &mut self,
        window_id: &WindowId,
        request: ChromeRequest,
    ) -> Option<(WindowId, ChromeNotification)> {
        match request {
            // Minimize only touches the native window; the view layer
            // applies it.
            ChromeRequest::Minimize => None,
            ChromeRequest::MaximizeToggle => self
                .window_mut(window_id)
                .map(|w| (window_id.clone(), w.toggle_maximized())),
            ChromeRequest::QueryIsMaximized => self.window(window_id).map(|w| {
                (
                    window_id.clone(),
                    ChromeNotification::MaximizeStateChanged {
                        maximized: w.is_maximized(),
                    },
                )
            }),
            ChromeRequest::Close => {
                self.close_window(window_id);
                None
            }
            ChromeRequest::CreateWindow { kind } => {
                let new_id = self.create_window(kind);
                Some((new_id, ChromeNotification::WindowKindAssigned { kind }))
            }
            ChromeRequest::NewTab => {
                let home = self.settings.get_settings().home_page.clone();
                self.open_tab(OpenTabIntent {
                    origin: Some(window_id.clone()),
                    url: home,
                });
                None
            }
            ChromeRequest::Navigate { input } => {
                let settings = self.settings.get_settings().clone();
                if let Some(window) = self.windows.iter_mut().find(|w| w.id() == window_id) {
                    window.navigate(&input, &settings);
                }
                None
            }
            ChromeRequest::CloseTab { id } => {
                self.close_tab(window_id, id);
                None
            }
            ChromeRequest::SelectTab { id } => {
                if let Some(window) = self.window_mut(window_id) {
                    window.activate_tab(id);
                }
                None
            }
        }
    }

    /// Advances every window's timers (placement debounce, zoom retries).
    pub fn tick(&mut self, elapsed_ms: u64) {
        for window in &mut self.windows {
            window.tick(elapsed_ms, &self.store);
        }
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Total open tabs across all windows.
    pub fn tab_count(&self) -> usize {
        self.windows.iter().map(|w| w.tabs().len()).sum()
    }
}
