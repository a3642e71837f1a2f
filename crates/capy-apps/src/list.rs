//! The launcher list model.
//!
//! Owns the ordered entries and a search view over them. Every structural
//! change is published as a [`ListEvent`] so a UI layer can mirror the list.

use crate::error::LauncherError;
use crate::item::{AdmissionContext, LauncherItem};
use crate::launch::{LaunchOptions, spawn_detached};
use crate::paths::path_to_id;
use crate::store::SettingsStore;
use log::{debug, info};
use std::path::Path;
use tokio::sync::broadcast;

/// Broadcast channel capacity.
/// Lagging receivers skip old events and should re-read the list.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Which rows the list currently exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Normal,
    Search,
}

/// Events emitted when the list changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEvent {
    Inserted { row: usize, id: String },
    Removed { row: usize, id: String },
    Moved { from: usize, to: usize },
    /// Every row may have changed (after sorting).
    Reset,
    /// The visible rows changed (search mode switch or new query).
    LayoutChanged,
    /// A scan finished and the list was re-sorted.
    Refreshed,
    Launched { id: String },
}

/// Fields a UI layer can query per row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    AppId,
    Application,
    Name,
    GenericName,
    Comment,
    IconName,
    Categories,
    FilterInfo,
    Pinned,
    PinnedIndex,
}

impl Role {
    pub const ALL: [Role; 10] = [
        Role::AppId,
        Role::Application,
        Role::Name,
        Role::GenericName,
        Role::Comment,
        Role::IconName,
        Role::Categories,
        Role::FilterInfo,
        Role::Pinned,
        Role::PinnedIndex,
    ];

    /// Name the UI layer binds to.
    pub fn name(self) -> &'static str {
        match self {
            Role::AppId => "appId",
            Role::Application => "application",
            Role::Name => "name",
            Role::GenericName => "genericName",
            Role::Comment => "comment",
            Role::IconName => "iconName",
            Role::Categories => "categories",
            Role::FilterInfo => "filterInfo",
            Role::Pinned => "pinned",
            Role::PinnedIndex => "pinnedIndex",
        }
    }
}

/// Ordered collection of launcher entries.
pub struct LauncherList {
    items: Vec<LauncherItem>,
    mode: ViewMode,
    query: String,
    /// Rows of `items` matching `query`, in list order.
    search_rows: Vec<usize>,
    context: AdmissionContext,
    launch_options: LaunchOptions,
    event_tx: broadcast::Sender<ListEvent>,
}

impl LauncherList {
    pub fn new(context: AdmissionContext, launch_options: LaunchOptions) -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            items: Vec::new(),
            mode: ViewMode::Normal,
            query: String::new(),
            search_rows: Vec::new(),
            context,
            launch_options,
            event_tx: tx,
        }
    }

    /// Subscribe to list changes.
    pub fn subscribe(&self) -> broadcast::Receiver<ListEvent> {
        self.event_tx.subscribe()
    }

    /// Sender side of the event channel, for handing out subscriptions.
    pub fn event_sender(&self) -> broadcast::Sender<ListEvent> {
        self.event_tx.clone()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of visible rows.
    pub fn count(&self) -> usize {
        self.row_count()
    }

    /// Number of rows in the active view.
    pub fn row_count(&self) -> usize {
        match self.mode {
            ViewMode::Normal => self.items.len(),
            ViewMode::Search => self.search_rows.len(),
        }
    }

    /// Item at a row of the active view.
    pub fn row(&self, row: usize) -> Option<&LauncherItem> {
        match self.mode {
            ViewMode::Normal => self.items.get(row),
            ViewMode::Search => self.search_rows.get(row).and_then(|&i| self.items.get(i)),
        }
    }

    /// Rows of the active view, in order.
    pub fn visible_items(&self) -> Vec<LauncherItem> {
        (0..self.row_count())
            .filter_map(|row| self.row(row).cloned())
            .collect()
    }

    /// All entries in list order, regardless of view mode.
    pub fn items(&self) -> &[LauncherItem] {
        &self.items
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn role_names() -> Vec<(Role, &'static str)> {
        Role::ALL.iter().map(|&role| (role, role.name())).collect()
    }

    /// Value of a role for a visible row.
    /// Only id, name, icon name and filter info are exposed.
    pub fn data(&self, row: usize, role: Role) -> Option<String> {
        let item = self.row(row)?;

        match role {
            Role::AppId => Some(item.id.clone()),
            Role::Name => Some(item.name.clone()),
            Role::IconName => Some(item.icon_name.clone()),
            Role::FilterInfo => Some(item.filter_info()),
            _ => None,
        }
    }

    /// Admit the descriptor at `path` if it passes the admission rules.
    /// Returns whether an entry was added.
    pub fn add_app(&mut self, path: &Path) -> bool {
        if self.contains(&path_to_id(path)) {
            return false;
        }

        match LauncherItem::from_desktop_file(path, &self.context) {
            Some(item) => self.insert(item),
            None => false,
        }
    }

    /// Append an item unless its id is already present.
    pub fn insert(&mut self, item: LauncherItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }

        let row = self.items.len();
        debug!("added: {}", item.name);
        let id = item.id.clone();
        self.items.push(item);
        self.refresh_search();
        self.emit(ListEvent::Inserted { row, id });
        true
    }

    /// Drop the entry with this id. Unknown ids are ignored.
    pub fn remove_app(&mut self, id: &str) -> bool {
        let Some(row) = self.find_by_id(id) else {
            return false;
        };

        let item = self.items.remove(row);
        debug!("removed: {}", item.name);
        self.refresh_search();
        self.emit(ListEvent::Removed { row, id: item.id });
        true
    }

    /// Finish a scan: sort by display name, keeping ties in list order.
    pub fn refreshed(&mut self) {
        self.items.sort_by(|a, b| a.name.cmp(&b.name));
        self.refresh_search();
        info!("Launcher list refreshed: {} entries", self.items.len());
        self.emit(ListEvent::Reset);
        self.emit(ListEvent::Refreshed);
    }

    /// Filter rows by name or id, case-insensitively.
    /// An empty query shows the whole list again.
    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        self.mode = if query.is_empty() {
            ViewMode::Normal
        } else {
            ViewMode::Search
        };
        self.refresh_search();
        self.emit(ListEvent::LayoutChanged);
    }

    /// Move an entry within a paginated grid.
    /// Positions are offsets within `page`; `page_size` is the number of cells per page.
    pub fn move_item(
        &mut self,
        from: usize,
        to: usize,
        page: usize,
        page_size: usize,
    ) -> Result<(), LauncherError> {
        if from == to {
            return Ok(());
        }

        let len = self.items.len();
        let absolute = |pos: usize| page.checked_mul(page_size).and_then(|offset| offset.checked_add(pos));
        let (from, to) = match (absolute(from), absolute(to)) {
            (Some(from), Some(to)) if from < len && to < len => (from, to),
            (abs_from, abs_to) => {
                return Err(LauncherError::InvalidMove {
                    from: abs_from.unwrap_or(usize::MAX),
                    to: abs_to.unwrap_or(usize::MAX),
                    len,
                });
            }
        };

        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.refresh_search();
        self.emit(ListEvent::Moved { from, to });
        Ok(())
    }

    /// Start the entry's command as a detached process.
    pub fn launch(&self, id: &str) -> Result<(), LauncherError> {
        let row = self
            .find_by_id(id)
            .ok_or_else(|| LauncherError::UnknownEntry(id.to_string()))?;

        self.emit(ListEvent::Launched { id: id.to_string() });
        spawn_detached(id, &self.items[row].args, &self.launch_options)?;
        Ok(())
    }

    /// Save the ordered entries.
    pub fn save(&self, store: &SettingsStore) -> Result<(), LauncherError> {
        store.save_list(&self.items)
    }

    fn refresh_search(&mut self) {
        if self.mode == ViewMode::Normal {
            self.search_rows.clear();
            return;
        }

        let query = self.query.to_lowercase();
        self.search_rows = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                item.name.to_lowercase().contains(&query) || item.id.to_lowercase().contains(&query)
            })
            .map(|(row, _)| row)
            .collect();
    }

    fn emit(&self, event: ListEvent) {
        // No receivers is fine, e.g. before the UI subscribes.
        let _ = self.event_tx.send(event);
    }
}
