//! Launcher list service.
//!
//! One task owns the [`LauncherList`]. Directory scans run on the blocking
//! pool and never touch the list: they send add/remove messages back, so
//! every mutation happens on the owner task in arrival order.

use capy_apps::{LauncherError, LauncherItem, LauncherList, ListEvent, SettingsStore, ViewMode, scan};
use capy_dock::{DockNotifier, DockRequest};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};

type Reply<T> = oneshot::Sender<Result<T, LauncherError>>;

/// Messages handled by the launcher task.
pub enum LauncherCommand {
    /// Scan the applications directory and sync the list with it.
    Rescan,
    /// Admit a descriptor found by a scan.
    Add(PathBuf),
    /// Drop an entry whose descriptor is gone.
    Remove(String),
    /// A scan finished sending its delta.
    Refreshed,
    Search(String),
    Move {
        from: usize,
        to: usize,
        page: usize,
        page_size: usize,
        reply: Reply<()>,
    },
    Launch {
        id: String,
        reply: Reply<()>,
    },
    SendToDock(String),
    RemoveFromDock(String),
    Save {
        reply: Reply<()>,
    },
    Snapshot {
        reply: Reply<ListSnapshot>,
    },
}

/// Visible rows at one point in time.
#[derive(Clone, Debug)]
pub struct ListSnapshot {
    pub mode: ViewMode,
    pub query: String,
    pub rows: Vec<LauncherItem>,
}

/// Cheap handle for talking to the launcher task.
#[derive(Clone)]
pub struct LauncherHandle {
    tx: mpsc::UnboundedSender<LauncherCommand>,
    events: broadcast::Sender<ListEvent>,
}

impl LauncherHandle {
    /// Subscribe to list changes.
    pub fn subscribe(&self) -> broadcast::Receiver<ListEvent> {
        self.events.subscribe()
    }

    pub fn rescan(&self) {
        self.send(LauncherCommand::Rescan);
    }

    pub fn search(&self, query: impl Into<String>) {
        self.send(LauncherCommand::Search(query.into()));
    }

    pub fn send_to_dock(&self, id: impl Into<String>) {
        self.send(LauncherCommand::SendToDock(id.into()));
    }

    pub fn remove_from_dock(&self, id: impl Into<String>) {
        self.send(LauncherCommand::RemoveFromDock(id.into()));
    }

    pub async fn move_item(
        &self,
        from: usize,
        to: usize,
        page: usize,
        page_size: usize,
    ) -> Result<(), LauncherError> {
        self.request(|reply| LauncherCommand::Move {
            from,
            to,
            page,
            page_size,
            reply,
        })
        .await
    }

    pub async fn launch(&self, id: impl Into<String>) -> Result<(), LauncherError> {
        let id = id.into();
        self.request(|reply| LauncherCommand::Launch { id, reply }).await
    }

    pub async fn save(&self) -> Result<(), LauncherError> {
        self.request(|reply| LauncherCommand::Save { reply }).await
    }

    pub async fn snapshot(&self) -> Result<ListSnapshot, LauncherError> {
        self.request(|reply| LauncherCommand::Snapshot { reply }).await
    }

    fn send(&self, command: LauncherCommand) {
        if self.tx.send(command).is_err() {
            warn!("Launcher service is gone, dropping command");
        }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Reply<T>) -> LauncherCommand,
    ) -> Result<T, LauncherError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .map_err(|_| LauncherError::ServiceUnavailable)?;
        rx.await.map_err(|_| LauncherError::ServiceUnavailable)?
    }
}

struct LauncherService {
    list: LauncherList,
    applications_dir: PathBuf,
    store: SettingsStore,
    dock: Option<Arc<dyn DockNotifier>>,
    tx: mpsc::WeakUnboundedSender<LauncherCommand>,
}

/// Spawn the launcher task. Must be called from within a tokio runtime.
pub fn start(
    list: LauncherList,
    applications_dir: PathBuf,
    store: SettingsStore,
    dock: Option<Arc<dyn DockNotifier>>,
) -> LauncherHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = LauncherHandle {
        tx: tx.clone(),
        events: list.event_sender(),
    };

    let service = LauncherService {
        list,
        applications_dir,
        store,
        dock,
        tx: tx.downgrade(),
    };
    tokio::spawn(service.run(rx));

    handle
}

impl LauncherService {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<LauncherCommand>) {
        info!("Launcher service started for {}", self.applications_dir.display());

        while let Some(command) = rx.recv().await {
            self.handle(command);
        }

        info!("Launcher service stopped");
    }

    fn handle(&mut self, command: LauncherCommand) {
        match command {
            LauncherCommand::Rescan => self.spawn_scan(),
            LauncherCommand::Add(path) => {
                self.list.add_app(&path);
            }
            LauncherCommand::Remove(id) => {
                self.list.remove_app(&id);
            }
            LauncherCommand::Refreshed => self.list.refreshed(),
            LauncherCommand::Search(query) => self.list.search(&query),
            LauncherCommand::Move {
                from,
                to,
                page,
                page_size,
                reply,
            } => {
                let _ = reply.send(self.list.move_item(from, to, page, page_size));
            }
            LauncherCommand::Launch { id, reply } => {
                let result = self.list.launch(&id);
                if let Err(e) = &result {
                    warn!("Launch failed: {}", e);
                }
                let _ = reply.send(result);
            }
            LauncherCommand::SendToDock(id) => self.forward_to_dock(DockRequest::Add, &id),
            LauncherCommand::RemoveFromDock(id) => self.forward_to_dock(DockRequest::Remove, &id),
            LauncherCommand::Save { reply } => {
                let _ = reply.send(self.list.save(&self.store));
            }
            LauncherCommand::Snapshot { reply } => {
                let _ = reply.send(Ok(ListSnapshot {
                    mode: self.list.mode(),
                    query: self.list.query().to_string(),
                    rows: self.list.visible_items(),
                }));
            }
        }
    }

    /// Diff the directory against the current ids off the owner task.
    /// Overlapping scans are allowed; admission drops duplicate adds.
    fn spawn_scan(&self) {
        let Some(tx) = self.tx.upgrade() else {
            return;
        };
        let known = self.list.ids();
        let dir = self.applications_dir.clone();

        tokio::task::spawn_blocking(move || {
            let delta = scan(&dir, &known);

            for path in delta.added {
                let _ = tx.send(LauncherCommand::Add(path));
            }
            for id in delta.removed {
                let _ = tx.send(LauncherCommand::Remove(id));
            }
            let _ = tx.send(LauncherCommand::Refreshed);
        });
    }

    fn forward_to_dock(&self, request: DockRequest, id: &str) {
        if !self.list.contains(id) {
            debug!("Ignoring dock {} for unknown entry {}", request, id);
            return;
        }

        match &self.dock {
            Some(dock) => dock.notify(request, id),
            None => warn!("Dock unavailable, dropping {} for {}", request, id),
        }
    }
}
