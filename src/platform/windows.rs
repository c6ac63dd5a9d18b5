// Prism Shell platform paths for Windows
// Config and data both live under %APPDATA%/PrismShell

use std::env;
use std::path::PathBuf;

fn appdata_dir() -> PathBuf {
    let appdata = env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Temp"));
    PathBuf::from(appdata).join("PrismShell")
}

/// Returns the configuration directory for Prism Shell on Windows.
pub fn get_config_dir() -> PathBuf {
    appdata_dir()
}

/// Returns the data directory for Prism Shell on Windows.
pub fn get_data_dir() -> PathBuf {
    appdata_dir()
}
