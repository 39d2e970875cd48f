//! History entry data structure

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CopyResult;

/// A single copy run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the run finished (UTC)
    pub timestamp: DateTime<Utc>,

    /// Name of the source profile
    pub source_profile: String,

    /// Target data directory
    pub target_dir: PathBuf,

    pub success: bool,

    /// File names copied, in processing order
    #[serde(default)]
    pub copied_files: Vec<String>,

    /// File names absent at the source
    #[serde(default)]
    pub skipped_files: Vec<String>,

    /// Archive created before the copy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl HistoryEntry {
    /// Build an entry from the outcome of a copy
    pub fn from_result(
        source_profile: impl Into<String>,
        target_dir: impl Into<PathBuf>,
        result: &CopyResult,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            source_profile: source_profile.into(),
            target_dir: target_dir.into(),
            success: result.success,
            copied_files: result.copied_files.clone(),
            skipped_files: result.skipped_files.clone(),
            backup_path: result.backup_path.clone(),
            error_message: result.error_message.clone(),
            duration_ms: u64::try_from(result.duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// One-line description for listings
    pub fn format_human_readable(&self) -> String {
        let status = if self.success { "OK" } else { "FAILED" };
        let mut line = format!(
            "{} {:<6} {} -> {} ({} copied, {} skipped, {} ms)",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            status,
            self.source_profile,
            self.target_dir.display(),
            self.copied_files.len(),
            self.skipped_files.len(),
            self.duration_ms
        );
        if let Some(message) = &self.error_message {
            line.push_str(&format!("\n    {}", message));
        }
        line
    }
}
