//! File-backed persistence gateway
//!
//! Stores the snapshot as a single JSON file, written atomically.

use std::path::PathBuf;

use super::file_io::{read_json_optional, write_json_atomic};
use super::snapshot::Snapshot;
use super::PersistenceGateway;

/// Snapshot stored in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl PersistenceGateway for JsonFileStore {
    fn load(&self) -> Option<Snapshot> {
        match read_json_optional(&self.path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable snapshot");
                None
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) {
        if let Err(e) = write_json_atomic(&self.path, snapshot) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to save snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Settings};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("snapshot.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("snapshot.json"));
        let snapshot = Snapshot::bootstrap(Settings::for_language(Language::En));

        store.save(&snapshot);
        assert_eq!(store.load(), Some(snapshot));
    }

    #[test]
    fn test_corrupt_file_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snapshot.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = JsonFileStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = temp_dir.path().join("snapshot.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let store = JsonFileStore::new(path);
        store.save(&Snapshot::bootstrap(Settings::for_language(Language::En)));
        assert!(store.load().is_none());
    }
}
