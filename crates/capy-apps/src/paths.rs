//! Path helpers for XDG directories and config files.

use std::path::{Path, PathBuf};

/// Directory scanned for application descriptors.
pub const DEFAULT_APPLICATIONS_DIR: &str = "/usr/share/applications";

const APP_DIR_NAME: &str = "CapyLauncher";
const CONFIG_FILE: &str = "config.json";
const SETTINGS_FILE: &str = "launcher-applist.json";

/// Get the per-user config directory (~/.config/CapyLauncher).
pub fn get_config_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_default();
        PathBuf::from(home).join(".config")
    });

    base.join(APP_DIR_NAME)
}

/// Get the launcher config file path.
pub fn get_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE)
}

/// Get the settings file holding the saved app list.
pub fn get_settings_path() -> PathBuf {
    get_config_dir().join(SETTINGS_FILE)
}

/// Whether the path names a `.desktop` file.
pub fn is_desktop_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("desktop")
}

/// Identifier of a descriptor: its path as a string.
pub fn path_to_id(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_desktop_file() {
        assert!(is_desktop_file(Path::new("/usr/share/applications/firefox.desktop")));
        assert!(!is_desktop_file(Path::new("/usr/share/applications/mimeinfo.cache")));
        assert!(!is_desktop_file(Path::new("/usr/share/applications/desktop")));
    }

    #[test]
    fn test_settings_live_in_config_dir() {
        let settings = get_settings_path();
        assert!(settings.starts_with(get_config_dir()));
        assert!(settings.ends_with("CapyLauncher/launcher-applist.json"));
    }
}
