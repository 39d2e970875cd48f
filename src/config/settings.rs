//! User settings for profile-merge
//!
//! Manages persisted preferences: backup retention, whether copies take a
//! backup by default, and the default log filter.

use serde::{Deserialize, Serialize};

use super::paths::MergePaths;
use crate::error::MergeError;

/// Backup retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of most recent archives to keep when pruning
    pub keep_count: usize,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self {
            keep_count: crate::backup::DEFAULT_KEEP_COUNT,
        }
    }
}

/// User settings for profile-merge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// Whether copy operations snapshot the target first
    #[serde(default = "default_create_backup")]
    pub create_backup: bool,

    /// Default tracing filter when `PROFILE_MERGE_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_create_backup() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_retention: BackupRetention::default(),
            create_backup: default_create_backup(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MergePaths) -> Result<Self, MergeError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| MergeError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MergeError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MergePaths) -> Result<(), MergeError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| MergeError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| MergeError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
