//! ContentSurface — the capability interface over one embedded web view.
//!
//! Each tab owns exactly one surface. The host runtime (wry in the gui
//! build, an in-process simulation otherwise) delivers [`LifecycleEvent`]s
//! for a surface in order start → commit → finish; events from different
//! surfaces interleave arbitrarily.
//!
//! A surface starts in the pre-ready state: zoom APIs are unavailable until
//! the first content commit, so callers must branch on [`ContentSurface::is_ready`]
//! instead of probing.

use crate::types::window::WindowKind;

/// Asynchronous load-lifecycle notification from a content surface.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    LoadStarted,
    LoadCommitted,
    LoadFinished,
    TitleUpdated(String),
    Navigated,
    NavigatedInPage,
    Ready,
}

/// Capability surface of one embedded view.
pub trait ContentSurface {
    fn load(&mut self, url: &str);
    fn reload(&mut self);
    /// Navigates back. Gated by `can_go_back`; a call without history is a no-op.
    fn go_back(&mut self);
    /// Navigates forward. Gated by `can_go_forward`; a call without forward
    /// history is a no-op.
    fn go_forward(&mut self);
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn url(&self) -> String;
    fn title(&self) -> String;
    /// True once the surface has committed content and zoom APIs are usable.
    fn is_ready(&self) -> bool;
    /// Transitions the surface to the post-ready state. Called by the host
    /// when it delivers [`LifecycleEvent::Ready`].
    fn mark_ready(&mut self);
    fn zoom_factor(&self) -> f64;
    /// Only valid post-ready; pre-ready calls are ignored by the host view.
    fn set_zoom_factor(&mut self, factor: f64);
}

/// Creates one surface per tab. The window kind selects the storage
/// partition: incognito surfaces share nothing with default ones.
pub trait SurfaceFactory {
    fn create(&mut self, kind: WindowKind, url: &str) -> Box<dyn ContentSurface>;
}

/// In-process surface with a simulated back/forward stack.
///
/// Used by the headless demo and by tests; no content is actually loaded.
pub struct HeadlessSurface {
    history: Vec<String>,
    position: usize,
    title: String,
    ready: bool,
    zoom: f64,
}

impl HeadlessSurface {
    pub fn new(url: &str) -> Self {
        Self {
            history: vec![url.to_string()],
            position: 0,
            title: String::new(),
            ready: false,
            zoom: 1.0,
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

impl ContentSurface for HeadlessSurface {
    fn load(&mut self, url: &str) {
        // Loading discards any forward history, like a real view.
        self.history.truncate(self.position + 1);
        self.history.push(url.to_string());
        self.position = self.history.len() - 1;
    }

    fn reload(&mut self) {}

    fn go_back(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    fn go_forward(&mut self) {
        if self.position + 1 < self.history.len() {
            self.position += 1;
        }
    }

    fn can_go_back(&self) -> bool {
        self.position > 0
    }

    fn can_go_forward(&self) -> bool {
        self.position + 1 < self.history.len()
    }

    fn url(&self) -> String {
        self.history[self.position].clone()
    }

    fn title(&self) -> String {
        if self.title.is_empty() {
            self.url()
        } else {
            self.title.clone()
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn mark_ready(&mut self) {
        self.ready = true;
    }

    fn zoom_factor(&self) -> f64 {
        self.zoom
    }

    fn set_zoom_factor(&mut self, factor: f64) {
        if self.ready {
            self.zoom = factor;
        }
    }
}

/// Factory producing [`HeadlessSurface`]s.
///
/// `start_ready` controls whether created surfaces begin post-ready, which
/// lets tests exercise the zoom retry path against pre-ready surfaces.
pub struct HeadlessFactory {
    pub start_ready: bool,
    created: usize,
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self {
            start_ready: true,
            created: 0,
        }
    }

    pub fn pre_ready() -> Self {
        Self {
            start_ready: false,
            created: 0,
        }
    }

    /// Number of surfaces created so far (one per tab).
    pub fn created_count(&self) -> usize {
        self.created
    }
}

impl Default for HeadlessFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceFactory for HeadlessFactory {
    fn create(&mut self, _kind: WindowKind, url: &str) -> Box<dyn ContentSurface> {
        self.created += 1;
        let mut surface = HeadlessSurface::new(url);
        if self.start_ready {
            surface.mark_ready();
        }
        Box::new(surface)
    }
}
