//! Copy result model
//!
//! Structured outcome of one copy operation. Every failure reaching the
//! orchestrator boundary is reported here rather than raised.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outcome of a copy operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyResult {
    /// Whether every selected file was processed
    pub success: bool,

    /// Failure reason, set only when `success` is false
    pub error_message: Option<String>,

    /// Archive created before copying, if any
    pub backup_path: Option<PathBuf>,

    /// File names copied, in processing order
    pub copied_files: Vec<String>,

    /// File names absent at the source, in processing order
    pub skipped_files: Vec<String>,

    /// Wall-clock time from call entry to return
    pub duration: Duration,

    /// Outcome of the automatic rollback after a copy-phase failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<Recovery>,
}

/// Result of rolling the target back after a failed copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recovery {
    /// The target was restored from the backup
    Restored,
    /// Restoring failed; the backup must be applied manually
    Failed,
}

impl CopyResult {
    /// A failed result carrying the given message
    pub fn failure(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            duration,
            ..Self::default()
        }
    }

    /// Human-readable summary of the outcome
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        if self.success {
            lines.push(format!(
                "Copy completed in {:.2}s.",
                self.duration.as_secs_f64()
            ));
        } else {
            lines.push(format!(
                "Copy failed: {}",
                self.error_message.as_deref().unwrap_or("unknown error")
            ));
        }

        lines.push(format!("Copied: {} file(s)", self.copied_files.len()));
        for name in &self.copied_files {
            lines.push(format!("  + {}", name));
        }

        if !self.skipped_files.is_empty() {
            lines.push(format!(
                "Skipped (not in source): {} file(s)",
                self.skipped_files.len()
            ));
            for name in &self.skipped_files {
                lines.push(format!("  - {}", name));
            }
        }

        if let Some(path) = &self.backup_path {
            lines.push(format!("Backup: {}", path.display()));
        }

        match self.recovery {
            Some(Recovery::Restored) => {
                lines.push("Recovery: target restored from backup.".to_string());
            }
            Some(Recovery::Failed) => {
                lines.push("Recovery: FAILED, restore manually from the backup above.".to_string());
            }
            None => {}
        }

        lines.join("\n")
    }
}
