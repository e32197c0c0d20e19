//! Path management for DreamSpend
//!
//! ## Path Resolution Order
//!
//! 1. `DREAMSPEND_DATA_DIR` environment variable (if set)
//! 2. The platform data directory (`~/.local/share/dreamspend` on Linux,
//!    `~/Library/Application Support/dreamspend` on macOS, `%APPDATA%` on Windows)
//! 3. `./.dreamspend` when no home directory can be determined

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::DreamSpendError;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "DREAMSPEND_DATA_DIR";

/// Manages all paths used by DreamSpend
#[derive(Debug, Clone)]
pub struct DreamSpendPaths {
    base_dir: PathBuf,
}

impl DreamSpendPaths {
    /// Resolve the data directory
    ///
    /// # Errors
    ///
    /// Returns an error if `DREAMSPEND_DATA_DIR` is set but empty.
    pub fn new() -> Result<Self, DreamSpendError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if custom.is_empty() => {
                return Err(DreamSpendError::Config(format!("{} is empty", DATA_DIR_ENV)));
            }
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path(),
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// The persisted game snapshot
    pub fn snapshot_file(&self) -> PathBuf {
        self.base_dir.join("snapshot.json")
    }

    /// The event journal (JSONL)
    pub fn journal_file(&self) -> PathBuf {
        self.base_dir.join("journal.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), DreamSpendError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            DreamSpendError::Io(format!("Failed to create data directory: {}", e))
        })
    }

    /// Whether a game has been saved here
    pub fn is_initialized(&self) -> bool {
        self.snapshot_file().exists()
    }
}

fn resolve_default_path() -> PathBuf {
    ProjectDirs::from("", "", "dreamspend")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".dreamspend"))
}
