//! Chrome IPC messages.
//!
//! The chrome layer (tab strip, address bar, window buttons) talks to the
//! shell over JSON messages. Requests carry a `cmd` discriminator;
//! notifications pushed back to the chrome carry an `event` discriminator.

use serde::{Deserialize, Serialize};

use crate::types::tab::TabId;
use crate::types::window::WindowKind;

/// A command sent from window chrome to the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ChromeRequest {
    Minimize,
    MaximizeToggle,
    Close,
    QueryIsMaximized,
    CreateWindow { kind: WindowKind },
    NewTab,
    Navigate { input: String },
    CloseTab { id: TabId },
    SelectTab { id: TabId },
}

/// A state notification pushed from the shell to window chrome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChromeNotification {
    /// The native maximize state flipped, whether via chrome buttons or the
    /// window manager. Chrome must re-render from this, never from its own
    /// toggle bookkeeping.
    MaximizeStateChanged { maximized: bool },
    /// Tells a fresh window's chrome which kind it hosts, so incognito
    /// windows can restyle.
    WindowKindAssigned { kind: WindowKind },
    /// A suppressed popup or target=_blank navigation, re-routed as a tab.
    OpenNewTab { url: String },
}
