//! Shared services for CapyLauncher.
//!
//! - `launcher` - the app list, owned by a single task
//! - dock client (capy-dock) for adding and removing dock entries
//! - directory watcher that triggers rescans

pub mod launcher;

use capy_apps::{AdmissionContext, DirectoryWatcher, LauncherConfig, LauncherList, SettingsStore, watch_directory};
use capy_dock::{DockClient, DockNotifier};
use launcher::LauncherHandle;
use log::{info, warn};
use std::sync::Arc;

/// Running services. Dropping this stops the directory watch.
pub struct Services {
    pub launcher: LauncherHandle,
    _watcher: Option<DirectoryWatcher>,
}

/// Start all shared services and kick off the first scan.
/// Call this once from main, inside the tokio runtime.
pub async fn start_all(config: &LauncherConfig) -> Services {
    info!("Starting shared services...");

    let dock = connect_dock(config).await;
    let list = LauncherList::new(AdmissionContext::from_env(), config.launch_options());
    let store = SettingsStore::new(config.settings_path());

    let launcher = launcher::start(list, config.applications_dir.clone(), store, dock);
    launcher.rescan();

    let watcher = if config.watch {
        start_watcher(config, &launcher)
    } else {
        None
    };

    Services {
        launcher,
        _watcher: watcher,
    }
}

async fn connect_dock(config: &LauncherConfig) -> Option<Arc<dyn DockNotifier>> {
    match DockClient::connect(&config.dock.service, &config.dock.path).await {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!("Dock unavailable: {}. Dock requests will be dropped.", e);
            None
        }
    }
}

fn start_watcher(config: &LauncherConfig, launcher: &LauncherHandle) -> Option<DirectoryWatcher> {
    let dir = &config.applications_dir;
    let handle = launcher.clone();

    match watch_directory(dir, move || handle.rescan()) {
        Ok(watcher) => {
            info!("Watching {} for changes", dir.display());
            Some(watcher)
        }
        Err(e) => {
            warn!("Cannot watch {}: {}", dir.display(), e);
            None
        }
    }
}
