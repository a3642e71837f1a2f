//! Directory scanning and diffing against the known entries.

use crate::paths::{is_desktop_file, path_to_id};
use log::info;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Entries to add and remove after a scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanDelta {
    /// Descriptor files on disk that the list does not hold yet.
    pub added: Vec<PathBuf>,
    /// Ids held by the list whose file is gone.
    pub removed: Vec<String>,
}

impl ScanDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// List every existing .desktop file below `dir`, recursively.
pub fn enumerate_desktop_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| is_desktop_file(path) && path.exists())
        .collect()
}

/// Compare the ids currently held against the files found on disk.
pub fn diff(known: &[String], on_disk: &[PathBuf]) -> ScanDelta {
    let known_set: HashSet<&str> = known.iter().map(String::as_str).collect();
    let disk_ids: HashSet<String> = on_disk.iter().map(|p| path_to_id(p)).collect();
    let mut seen = HashSet::new();

    let added = on_disk
        .iter()
        .filter(|path| {
            let id = path_to_id(path);
            !known_set.contains(id.as_str()) && seen.insert(id)
        })
        .cloned()
        .collect();

    let removed = known
        .iter()
        .filter(|id| !disk_ids.contains(id.as_str()))
        .cloned()
        .collect();

    ScanDelta { added, removed }
}

/// Scan `dir` and diff it against `known`.
pub fn scan(dir: &Path, known: &[String]) -> ScanDelta {
    let on_disk = enumerate_desktop_files(dir);
    let delta = diff(known, &on_disk);

    info!(
        "Scanned {}: {} files, {} new, {} gone",
        dir.display(),
        on_disk.len(),
        delta.added.len(),
        delta.removed.len()
    );

    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn ids(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|p| path_to_id(p)).collect()
    }

    #[test]
    fn test_enumerate_is_recursive_and_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("kde")).unwrap();
        fs::write(dir.path().join("a.desktop"), "").unwrap();
        fs::write(dir.path().join("kde/b.desktop"), "").unwrap();
        fs::write(dir.path().join("mimeinfo.cache"), "").unwrap();

        let found = enumerate_desktop_files(dir.path());
        assert_eq!(found, vec![dir.path().join("a.desktop"), dir.path().join("kde/b.desktop")]);
    }

    #[test]
    fn test_enumerate_missing_dir() {
        assert!(enumerate_desktop_files(Path::new("/nonexistent/capy-launcher")).is_empty());
    }

    #[test]
    fn test_diff_adds_and_removes() {
        let on_disk = vec![PathBuf::from("/apps/a.desktop"), PathBuf::from("/apps/b.desktop")];
        let known = vec!["/apps/b.desktop".to_string(), "/apps/c.desktop".to_string()];

        let delta = diff(&known, &on_disk);
        assert_eq!(delta.added, vec![PathBuf::from("/apps/a.desktop")]);
        assert_eq!(delta.removed, vec!["/apps/c.desktop".to_string()]);
    }

    #[test]
    fn test_diff_repeated_paths_are_added_once() {
        let on_disk = vec![
            PathBuf::from("/apps/a.desktop"),
            PathBuf::from("/apps/a.desktop"),
        ];

        let delta = diff(&[], &on_disk);
        assert_eq!(delta.added.len(), 1);
    }

    #[test]
    fn test_second_scan_without_changes_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.desktop"), "").unwrap();
        fs::write(dir.path().join("b.desktop"), "").unwrap();

        let first = scan(dir.path(), &[]);
        assert_eq!(first.added.len(), 2);

        let second = scan(dir.path(), &ids(&first.added));
        assert!(second.is_empty());
    }
}
