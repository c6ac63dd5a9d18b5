use serde::{Deserialize, Serialize};

/// Opaque window handle (uuid v4 string).
pub type WindowId = String;

/// Kind of a top-level window.
///
/// Incognito windows use an isolated storage partition: their surfaces share
/// no cookies or sessions with default windows, and their navigations are
/// never written to persisted history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Default,
    Incognito,
}

/// Current geometry of a top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowBounds {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 1400,
            height: 900,
        }
    }
}

/// On-disk window placement record.
///
/// Absent or unparsable state files are treated as "no saved state" and the
/// window falls back to [`WindowBounds::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedWindowState {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
}

impl PersistedWindowState {
    pub fn from_bounds(bounds: WindowBounds, maximized: bool) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            maximized,
        }
    }

    pub fn bounds(&self) -> WindowBounds {
        WindowBounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}
