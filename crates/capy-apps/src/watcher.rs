//! Change notifications for the applications directory.

use crate::error::LauncherError;
use log::{debug, warn};
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;

/// Keeps the directory watch alive until dropped.
pub struct DirectoryWatcher {
    _watcher: RecommendedWatcher,
}

/// Whether an event changes the set of files in the directory.
fn changes_listing(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    )
}

/// Watch the top level of `dir` and call `on_change` when entries come or go.
/// Subdirectories are not watched.
pub fn watch_directory<F>(dir: &Path, on_change: F) -> Result<DirectoryWatcher, LauncherError>
where
    F: Fn() + Send + 'static,
{
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if changes_listing(&event.kind) => {
            debug!("Applications directory changed: {:?}", event.paths);
            on_change();
        }
        Ok(_) => {}
        Err(e) => warn!("Directory watch error: {}", e),
    })?;

    watcher.watch(dir, RecursiveMode::NonRecursive)?;

    Ok(DirectoryWatcher { _watcher: watcher })
}
