// Prism Shell services
// Services provide address-bar navigation, per-tab zoom, and settings.

pub mod navigation;
pub mod settings_engine;
