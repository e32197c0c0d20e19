//! Append-only journal writer
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{DreamSpendError, DreamSpendResult};

use super::entry::AuditEntry;

/// Writes journal entries to a JSONL file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> DreamSpendResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> DreamSpendResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| DreamSpendError::Io(format!("Failed to open journal: {}", e)))?;

        for entry in entries {
            let json = serde_json::to_string(entry).map_err(|e| {
                DreamSpendError::Json(format!("Failed to serialize journal entry: {}", e))
            })?;

            writeln!(file, "{}", json)
                .map_err(|e| DreamSpendError::Io(format!("Failed to write journal entry: {}", e)))?;
        }

        file.flush()
            .map_err(|e| DreamSpendError::Io(format!("Failed to flush journal: {}", e)))?;

        Ok(())
    }

    /// All entries, oldest first
    ///
    /// Lines that no longer decode (for example from an older event shape)
    /// are skipped with a warning.
    pub fn read_all(&self) -> DreamSpendResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| DreamSpendError::Io(format!("Failed to open journal: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                DreamSpendError::Io(format!("Failed to read journal line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(line = line_num + 1, error = %e, "Skipping unreadable journal line");
                }
            }
        }

        Ok(entries)
    }

    /// The most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> DreamSpendResult<Vec<AuditEntry>> {
        let mut all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries.split_off(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::EngineEvent;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("journal.log"));
        (logger, temp_dir)
    }

    fn filled(day_index: u32) -> AuditEntry {
        AuditEntry::new(EngineEvent::DayFilled {
            day_index,
            total: Money::from_minor(500),
        })
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&filled(1)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].change.name(), "day_filled");
    }

    #[test]
    fn test_log_batch_and_read_recent() {
        let (logger, _temp) = create_test_logger();
        let entries: Vec<AuditEntry> = (1..=10).map(filled).collect();
        logger.log_batch(&entries).unwrap();

        let recent = logger.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0], entries[7]);
        assert_eq!(recent[2], entries[9]);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_lines_are_skipped() {
        let (logger, temp) = create_test_logger();
        logger.log(&filled(1)).unwrap();
        let mut file = OpenOptions::new()
            .append(true)
            .open(temp.path().join("journal.log"))
            .unwrap();
        writeln!(file, "{{\"timestamp\": \"bad\"}}").unwrap();
        drop(file);
        logger.log(&filled(2)).unwrap();

        assert_eq!(logger.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger.log(&AuditEntry::new(EngineEvent::GameRestarted)).unwrap();

        let reopened = AuditLogger::new(temp.path().join("journal.log"));
        assert_eq!(reopened.read_all().unwrap().len(), 1);
    }
}
