//! Launcher configuration.

use crate::launch::LaunchOptions;
use crate::paths::{DEFAULT_APPLICATIONS_DIR, get_config_path, get_settings_path};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level config, read from ~/.config/CapyLauncher/config.json.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Directory scanned (recursively) for .desktop files.
    pub applications_dir: PathBuf,
    /// Override for the settings file holding the saved list.
    pub settings_path: Option<PathBuf>,
    /// Rescan when the applications directory changes.
    pub watch: bool,
    pub dock: DockConfig,
    pub screenshot: ScreenshotConfig,
}

/// Where the dock service lives on the session bus.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    pub service: String,
    pub path: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    pub command: String,
    pub delay_ms: u32,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            applications_dir: PathBuf::from(DEFAULT_APPLICATIONS_DIR),
            settings_path: None,
            watch: true,
            dock: DockConfig::default(),
            screenshot: ScreenshotConfig::default(),
        }
    }
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            service: "org.cutefish.Dock".to_string(),
            path: "/Dock".to_string(),
        }
    }
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        let options = LaunchOptions::default();
        Self {
            command: options.screenshot_command,
            delay_ms: options.screenshot_delay_ms,
        }
    }
}

impl LauncherConfig {
    /// Load from the user config file, or defaults if absent.
    pub fn load_default() -> Self {
        Self::load(&get_config_path())
    }

    /// Load from a config file, or return default if not found or invalid.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                info!("No config at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Invalid config {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.settings_path.clone().unwrap_or_else(get_settings_path)
    }

    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            screenshot_command: self.screenshot.command.clone(),
            screenshot_delay_ms: self.screenshot.delay_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = LauncherConfig::load(Path::new("/nonexistent/capy/config.json"));
        assert_eq!(config.applications_dir, PathBuf::from("/usr/share/applications"));
        assert_eq!(config.dock.service, "org.cutefish.Dock");
        assert_eq!(config.dock.path, "/Dock");
        assert!(config.watch);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"applications_dir": "/tmp/apps", "screenshot": {"delay_ms": 500}}"#).unwrap();

        let config = LauncherConfig::load(&path);
        assert_eq!(config.applications_dir, PathBuf::from("/tmp/apps"));
        assert_eq!(config.screenshot.delay_ms, 500);
        assert_eq!(config.screenshot.command, "cutefish-screenshot");
        assert_eq!(config.launch_options().screenshot_delay_ms, 500);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ broken").unwrap();

        let config = LauncherConfig::load(&path);
        assert_eq!(config.applications_dir, PathBuf::from("/usr/share/applications"));
    }

    #[test]
    fn test_settings_path_override() {
        let config = LauncherConfig {
            settings_path: Some(PathBuf::from("/tmp/list.json")),
            ..Default::default()
        };
        assert_eq!(config.settings_path(), PathBuf::from("/tmp/list.json"));
    }
}
