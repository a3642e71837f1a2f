//! Persisted launcher settings.
//!
//! Settings live in one JSON object file. The app list is stored under
//! [`LIST_KEY`]; other keys are left untouched by saves.

use crate::error::LauncherError;
use crate::item::LauncherItem;
use log::info;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings key holding the ordered app list.
pub const LIST_KEY: &str = "list";

/// Key/value settings backed by a JSON file.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value. A missing file reads as no value.
    pub fn value(&self, key: &str) -> Result<Option<Value>, LauncherError> {
        Ok(self.read_all()?.remove(key))
    }

    /// Write a value, keeping every other key.
    pub fn set_value(&self, key: &str, value: Value) -> Result<(), LauncherError> {
        let mut settings = self.read_all()?;
        settings.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Save the ordered app list.
    pub fn save_list(&self, items: &[LauncherItem]) -> Result<(), LauncherError> {
        self.set_value(LIST_KEY, serde_json::to_value(items)?)?;
        info!("Saved {} launcher entries to {}", items.len(), self.path.display());
        Ok(())
    }

    /// Load the saved app list; empty if nothing was saved.
    pub fn load_list(&self) -> Result<Vec<LauncherItem>, LauncherError> {
        match self.value(LIST_KEY)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    fn read_all(&self) -> Result<Map<String, Value>, LauncherError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str) -> LauncherItem {
        LauncherItem {
            id: id.to_string(),
            name: name.to_string(),
            args: vec![name.to_lowercase()],
            ..Default::default()
        }
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested/applist.json"));
        let items = vec![item("/a/z.desktop", "Zed"), item("/a/a.desktop", "Atom")];

        store.save_list(&items).unwrap();
        assert_eq!(store.load_list().unwrap(), items);
    }

    #[test]
    fn test_save_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("applist.json"));

        store.set_value("pageSize", Value::from(24)).unwrap();
        store.save_list(&[item("/a/a.desktop", "Atom")]).unwrap();

        assert_eq!(store.value("pageSize").unwrap(), Some(Value::from(24)));
        assert_eq!(store.load_list().unwrap().len(), 1);
    }

    #[test]
    fn test_load_without_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("missing.json"));
        assert!(store.load_list().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applist.json");
        fs::write(&path, "not json").unwrap();

        let store = SettingsStore::new(path);
        assert!(matches!(store.load_list(), Err(LauncherError::Json(_))));
    }
}
