// Prism Shell platform paths for Linux
// Config: ~/.config/prism-shell
// Data:   ~/.local/share/prism-shell

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for Prism Shell on Linux.
/// Uses `$XDG_CONFIG_HOME/prism-shell` if set, otherwise `~/.config/prism-shell`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("prism-shell")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("prism-shell")
    }
}

/// Returns the data directory for Prism Shell on Linux.
/// Uses `$XDG_DATA_HOME/prism-shell` if set, otherwise `~/.local/share/prism-shell`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("prism-shell")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("prism-shell")
    }
}
