//! Path management for profile-merge
//!
//! Provides platform-aware path resolution for settings, backups, history and
//! selective-copy bookkeeping records.
//!
//! ## Path Resolution Order
//!
//! 1. `PROFILE_MERGE_HOME` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/profile-merge` on Linux, `%APPDATA%\profile-merge` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::MergeError;

/// Environment variable overriding the base directory
pub const HOME_ENV_VAR: &str = "PROFILE_MERGE_HOME";

/// Manages all paths used by profile-merge
#[derive(Debug, Clone)]
pub struct MergePaths {
    /// Base directory for all profile-merge state
    base_dir: PathBuf,
}

impl MergePaths {
    /// Create a new MergePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform config directory can be determined.
    pub fn new() -> Result<Self, MergeError> {
        let base_dir = if let Ok(custom) = std::env::var(HOME_ENV_VAR) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create MergePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the backup directory that holds every archive
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the operation history log
    pub fn history_log(&self) -> PathBuf {
        self.base_dir.join("history.log")
    }

    /// Get the path to the pending cleanup record
    pub fn pending_cleanup_file(&self) -> PathBuf {
        self.base_dir.join("pending_cleanup.json")
    }

    /// Get the directory holding saved profile manifests
    pub fn manifests_dir(&self) -> PathBuf {
        self.base_dir.join("manifests")
    }

    /// Get the manifest file for a named profile
    pub fn manifest_file(&self, profile_name: &str) -> PathBuf {
        self.manifests_dir()
            .join(format!("{}.json", sanitize_file_stem(profile_name)))
    }

    /// Ensure the base and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), MergeError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MergeError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| MergeError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, MergeError> {
    ProjectDirs::from("", "", "profile-merge")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| MergeError::Config("Could not determine a home directory".into()))
}

/// Replace characters that are not safe in a file name
fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "profile".to_string()
    } else {
        cleaned
    }
}
