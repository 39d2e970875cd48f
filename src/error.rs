//! Custom error types for profile-merge
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for profile-merge operations
#[derive(Error, Debug)]
pub enum MergeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Archive encoding/decoding errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// Validation errors for caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Backup creation errors
    #[error("Backup error: {0}")]
    Backup(String),

    /// Backup restoration errors
    #[error("Restore error: {0}")]
    Restore(String),

    /// Storage errors for persisted records
    #[error("Storage error: {0}")]
    Storage(String),

    /// Post-restart cleanup errors
    #[error("Cleanup error: {0}")]
    Cleanup(String),
}

impl MergeError {
    /// Create a "not found" error for directories
    pub fn directory_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Directory",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for backup archives
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for data types
    pub fn data_type_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Data type",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for MergeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MergeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<zip::result::ZipError> for MergeError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

impl From<walkdir::Error> for MergeError {
    fn from(err: walkdir::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for profile-merge operations
pub type MergeResult<T> = Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MergeError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = MergeError::directory_not_found("/tmp/missing");
        assert_eq!(err.to_string(), "Directory not found: /tmp/missing");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_backup_not_found_error() {
        let err = MergeError::backup_not_found("Backup_Main_20250101_120000.zip");
        assert_eq!(
            err.to_string(),
            "Backup not found: Backup_Main_20250101_120000.zip"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let merge_err: MergeError = io_err.into();
        assert!(matches!(merge_err, MergeError::Io(_)));
    }

    #[test]
    fn test_from_zip_error() {
        let zip_err = zip::result::ZipError::FileNotFound;
        let merge_err: MergeError = zip_err.into();
        assert!(matches!(merge_err, MergeError::Archive(_)));
    }
}
