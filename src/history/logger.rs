//! History logger
//!
//! Writes history entries to a line-delimited JSON file. Each entry is
//! flushed as soon as it is written.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{MergeError, MergeResult};

use super::entry::HistoryEntry;

/// Appends and reads copy history entries
pub struct HistoryLogger {
    log_path: PathBuf,
}

impl HistoryLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry as a single JSON line
    pub fn log(&self, entry: &HistoryEntry) -> MergeResult<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| MergeError::Io(format!("Failed to create history directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| MergeError::Io(format!("Failed to open history log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| MergeError::Json(format!("Failed to serialize history entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| MergeError::Io(format!("Failed to write history entry: {}", e)))?;

        file.flush()
            .map_err(|e| MergeError::Io(format!("Failed to flush history log: {}", e)))?;

        Ok(())
    }

    /// Read every entry, oldest first
    pub fn read_all(&self) -> MergeResult<Vec<HistoryEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| MergeError::Io(format!("Failed to open history log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                MergeError::Io(format!(
                    "Failed to read history line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: HistoryEntry = serde_json::from_str(&line).map_err(|e| {
                MergeError::Json(format!(
                    "Failed to parse history entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> MergeResult<Vec<HistoryEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CopyResult;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_logger() -> (HistoryLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("history.log");
        (HistoryLogger::new(log_path), temp_dir)
    }

    fn entry(profile: &str) -> HistoryEntry {
        let result = CopyResult {
            success: true,
            duration: Duration::from_millis(10),
            ..CopyResult::default()
        };
        HistoryEntry::from_result(profile, "/t/DATABASE", &result)
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry("Main Office")).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source_profile, "Main Office");
        assert!(entries[0].success);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        for i in 0..10 {
            logger.log(&entry(&format!("Profile {}", i))).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].source_profile, "Profile 7");
        assert_eq!(recent[2].source_profile, "Profile 9");

        assert_eq!(logger.read_recent(50).unwrap().len(), 10);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(!logger.path().exists());
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry("A")).unwrap();
        fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .unwrap()
            .write_all(b"\n\n")
            .unwrap();
        logger.log(&entry("B")).unwrap();

        assert_eq!(logger.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_line_is_json_error() {
        let (logger, _temp) = create_test_logger();
        fs::write(logger.path(), "{not json}\n").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(matches!(err, MergeError::Json(_)));
        assert!(err.to_string().contains("line 1"));
    }
}
