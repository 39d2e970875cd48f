//! Backup manager for profile-merge
//!
//! Creates zip snapshots of database directories and prunes old archives.
//! Archives are named `Backup_<profileFolder>_<yyyyMMdd_HHmmss>.zip` and hold
//! a single top-level folder named after the backed-up directory.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::paths::MergePaths;
use crate::error::{MergeError, MergeResult};
use crate::models::profile::profile_folder_name;

/// File name prefix shared by every archive
pub const BACKUP_PREFIX: &str = "Backup_";

/// Archive file extension
pub const BACKUP_EXTENSION: &str = "zip";

/// Number of archives kept when pruning without an explicit count
pub const DEFAULT_KEEP_COUNT: usize = 10;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Metadata about a backup archive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Archive filename
    pub filename: String,
    /// Full path to the archive
    pub path: PathBuf,
    /// Profile folder name embedded in the filename
    pub profile_name: String,
    /// Timestamp embedded in the filename
    pub timestamp: Option<NaiveDateTime>,
    /// When the archive file was created on disk
    pub created_at: DateTime<Local>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Manages backup creation and retention
#[derive(Debug, Clone)]
pub struct BackupManager {
    /// Path to the backup directory
    backup_dir: PathBuf,
}

impl BackupManager {
    /// Create a BackupManager writing to the given directory
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    /// Create a BackupManager for the configured backup directory
    pub fn from_paths(paths: &MergePaths) -> Self {
        Self::new(paths.backup_dir())
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Snapshot `source_dir` into a new archive
    ///
    /// Returns the absolute path to the created archive. A partially written
    /// archive is left in place if writing fails.
    pub fn create_backup(&self, source_dir: &Path) -> MergeResult<PathBuf> {
        if !source_dir.is_dir() {
            return Err(MergeError::directory_not_found(
                source_dir.display().to_string(),
            ));
        }

        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| MergeError::Io(format!("Failed to create backup directory: {}", e)))?;

        let filename = backup_file_name(
            &profile_folder_name(source_dir),
            &Local::now().format(TIMESTAMP_FORMAT).to_string(),
        );
        let archive_path = self.backup_dir.join(&filename);
        let root_name = source_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "root".to_string());

        let file = File::create(&archive_path)
            .map_err(|e| MergeError::Backup(format!("Failed to create archive file: {}", e)))?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.add_directory(format!("{}/", root_name), options)?;

        // Walk canonical paths so an archive folder nested in the source can be skipped
        let source_root = fs::canonicalize(source_dir)
            .map_err(|e| MergeError::Backup(format!("Failed to resolve source directory: {}", e)))?;
        let own_dir = fs::canonicalize(&self.backup_dir).ok();
        let walker = WalkDir::new(&source_root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                own_dir
                    .as_deref()
                    .map_or(true, |own| !entry.path().starts_with(own))
            });

        let mut file_count = 0usize;
        for entry in walker {
            let entry = entry?;
            let relative = entry.path().strip_prefix(&source_root).map_err(|_| {
                MergeError::Backup(format!(
                    "Entry outside source directory: {}",
                    entry.path().display()
                ))
            })?;
            let name = archive_entry_name(&root_name, relative);

            if entry.file_type().is_dir() {
                zip.add_directory(format!("{}/", name), options)?;
            } else if entry.file_type().is_file() {
                zip.start_file(name, options)?;
                let mut input = File::open(entry.path()).map_err(|e| {
                    MergeError::Backup(format!(
                        "Failed to read {}: {}",
                        entry.path().display(),
                        e
                    ))
                })?;
                io::copy(&mut input, &mut zip)
                    .map_err(|e| MergeError::Backup(format!("Failed to write archive: {}", e)))?;
                file_count += 1;
            } else {
                debug!(path = %entry.path().display(), "skipping non-regular entry");
            }
        }

        zip.finish()?
            .flush()
            .map_err(|e| MergeError::Backup(format!("Failed to flush archive: {}", e)))?;

        let archive_path = fs::canonicalize(&archive_path).unwrap_or(archive_path);
        info!(
            archive = %archive_path.display(),
            source = %source_dir.display(),
            files = file_count,
            "backup created"
        );

        Ok(archive_path)
    }

    /// List all archives in the backup directory, newest first
    pub fn list_backups(&self) -> MergeResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| MergeError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| MergeError::Io(format!("Failed to read directory entry: {}", e)))?;

            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.filename.cmp(&a.filename))
        });

        Ok(backups)
    }

    /// Get the most recent archive
    pub fn latest_backup(&self) -> MergeResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Get a specific archive by filename
    pub fn get_backup(&self, filename: &str) -> Option<BackupInfo> {
        parse_backup_info(&self.backup_dir.join(filename))
    }

    /// Delete every archive beyond the `keep_count` most recent
    ///
    /// Best effort: listing or deletion failures are logged and skipped.
    /// Returns the paths actually deleted.
    pub fn clean_old_backups(&self, keep_count: usize) -> Vec<PathBuf> {
        let backups = match self.list_backups() {
            Ok(backups) => backups,
            Err(err) => {
                warn!(
                    error = %err,
                    dir = %self.backup_dir.display(),
                    "failed to list backups for pruning"
                );
                return Vec::new();
            }
        };

        let mut deleted = Vec::new();
        for backup in backups.into_iter().skip(keep_count) {
            match fs::remove_file(&backup.path) {
                Ok(()) => {
                    debug!(archive = %backup.path.display(), "pruned old backup");
                    deleted.push(backup.path);
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        archive = %backup.path.display(),
                        "failed to delete old backup"
                    );
                }
            }
        }

        deleted
    }
}

/// Build the archive filename for a profile folder and timestamp
pub fn backup_file_name(profile_name: &str, timestamp: &str) -> String {
    format!(
        "{}{}_{}.{}",
        BACKUP_PREFIX, profile_name, timestamp, BACKUP_EXTENSION
    )
}

/// Join a relative path under the archive root using `/` separators
fn archive_entry_name(root_name: &str, relative: &Path) -> String {
    let mut name = root_name.to_string();
    for component in relative.components() {
        if let Component::Normal(segment) = component {
            name.push('/');
            name.push_str(&segment.to_string_lossy());
        }
    }
    name
}

/// Parse archive metadata, returning None for files that are not backups
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stem = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;

    let metadata = fs::metadata(path).ok()?;
    if !metadata.is_file() {
        return None;
    }

    let (profile_name, timestamp) = split_profile_and_timestamp(stem);
    let created = metadata.created().or_else(|_| metadata.modified()).ok()?;

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        profile_name,
        timestamp,
        created_at: DateTime::<Local>::from(created),
        size_bytes: metadata.len(),
    })
}

/// Split `<profile>_<yyyyMMdd>_<HHmmss>`; profile names may contain `_`
fn split_profile_and_timestamp(stem: &str) -> (String, Option<NaiveDateTime>) {
    let mut parts = stem.rsplitn(3, '_');
    let time = parts.next();
    let date = parts.next();
    let profile = parts.next();

    match (profile, date, time) {
        (Some(profile), Some(date), Some(time)) => {
            let parsed =
                NaiveDateTime::parse_from_str(&format!("{}_{}", date, time), TIMESTAMP_FORMAT)
                    .ok();
            match parsed {
                Some(ts) => (profile.to_string(), Some(ts)),
                None => (stem.to_string(), None),
            }
        }
        _ => (stem.to_string(), None),
    }
}
