//! capy-apps: Application launcher list for Linux desktops.
//!
//! Provides:
//! - Desktop entry parsing and the rules deciding which apps are shown
//! - An ordered, searchable, reorderable launcher list with change events
//! - Directory scanning and watching to keep the list in sync with disk
//! - Detached process launching and list persistence

mod config;
mod desktop_entry;
mod environment;
mod error;
mod item;
mod launch;
mod list;
mod paths;
mod scan;
mod store;
mod watcher;

pub use config::{DockConfig, LauncherConfig, ScreenshotConfig};
pub use desktop_entry::{DESKTOP_ENTRY_GROUP, DesktopProperties};
pub use environment::{UNKNOWN_DESKTOP, detect_desktop_environment, detect_locale};
pub use error::LauncherError;
pub use item::{AdmissionContext, LauncherItem, exec_to_args};
pub use launch::{LaunchOptions, spawn_detached};
pub use list::{EVENT_CHANNEL_CAPACITY, LauncherList, ListEvent, Role, ViewMode};
pub use paths::{DEFAULT_APPLICATIONS_DIR, get_config_path, get_settings_path, path_to_id};
pub use scan::{ScanDelta, diff, enumerate_desktop_files, scan};
pub use store::{LIST_KEY, SettingsStore};
pub use watcher::{DirectoryWatcher, watch_directory};
