//! Prism Shell — the window, tab, and state-sync core of a desktop browser.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod ipc;
pub mod managers;
pub mod persist;
pub mod platform;
pub mod services;
pub mod surface;
pub mod types;
pub mod window;

#[cfg(feature = "gui")]
pub mod ui;
