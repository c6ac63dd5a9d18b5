//! Prism Shell UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2 (Chromium-based)
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! Window chrome (tab strip, address bar, window buttons) is rendered as
//! HTML/CSS/JS inside the WebView. Chrome ↔ shell communication uses the
//! JSON messages in [`crate::ipc`] over wry IPC.

pub mod shell_app;
