//! Profile model
//!
//! A profile is a folder tree whose database directory holds the data-type
//! files. Discovering profiles on disk is the caller's job.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A source or target profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfo {
    /// Profile name, usually the profile folder name
    pub name: String,

    /// Database directory containing the data-type files
    pub data_directory: PathBuf,
}

impl ProfileInfo {
    /// Create a profile with an explicit name
    pub fn new(name: impl Into<String>, data_directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            data_directory: data_directory.into(),
        }
    }

    /// Create a profile named after the folder that contains its database directory
    pub fn from_data_directory(data_directory: impl Into<PathBuf>) -> Self {
        let data_directory = data_directory.into();
        let name = profile_folder_name(&data_directory);
        Self {
            name,
            data_directory,
        }
    }

    /// Database directory of this profile
    pub fn data_directory(&self) -> &Path {
        &self.data_directory
    }

    /// A profile is valid when its database directory exists
    pub fn is_valid(&self) -> bool {
        self.data_directory.is_dir()
    }
}

/// Name of the profile folder owning a database directory
///
/// Falls back to the directory's own name when it has no parent.
pub fn profile_folder_name(data_directory: &Path) -> String {
    data_directory
        .parent()
        .and_then(Path::file_name)
        .or_else(|| data_directory.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "profile".to_string())
}
