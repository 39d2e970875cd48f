//! Backup restoration for profile-merge
//!
//! Restores an archive on top of a target directory. The archive is first
//! extracted to a private scratch directory, then every file is copied over
//! the target. Files in the target that the archive does not contain are
//! left alone.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::{MergeError, MergeResult};

/// Handles restoring from backups
#[derive(Debug, Clone)]
pub struct RestoreManager {
    /// Parent directory for scratch extraction folders
    scratch_root: PathBuf,
}

impl Default for RestoreManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RestoreManager {
    /// Create a RestoreManager extracting into the system temp directory
    pub fn new() -> Self {
        Self {
            scratch_root: std::env::temp_dir(),
        }
    }

    /// Create a RestoreManager extracting under a custom directory
    pub fn with_scratch_root(scratch_root: impl Into<PathBuf>) -> Self {
        Self {
            scratch_root: scratch_root.into(),
        }
    }

    /// Overlay the contents of `archive_path` onto `target_dir`
    ///
    /// Existing files are overwritten and intermediate directories created.
    /// The scratch directory is removed on every exit path.
    pub fn restore_backup(
        &self,
        archive_path: &Path,
        target_dir: &Path,
    ) -> MergeResult<RestoreResult> {
        if !archive_path.is_file() {
            return Err(MergeError::backup_not_found(
                archive_path.display().to_string(),
            ));
        }

        let scratch = ScratchDir::create(&self.scratch_root)?;
        extract_zip(archive_path, scratch.path())?;

        let (content_root, nested_root) = locate_content_root(scratch.path())?;
        if !nested_root {
            // Compatibility shim for archives not written by BackupManager
            debug!(
                archive = %archive_path.display(),
                "no single top-level folder in archive; using extraction root"
            );
        }

        let files_restored = overlay_tree(&content_root, target_dir)?;

        info!(
            archive = %archive_path.display(),
            target = %target_dir.display(),
            files = files_restored,
            "backup restored"
        );

        Ok(RestoreResult {
            files_restored,
            nested_root,
        })
    }
}

/// Result of a restore operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreResult {
    /// Number of files written into the target
    pub files_restored: usize,
    /// Whether content came from a single top-level folder in the archive
    pub nested_root: bool,
}

impl RestoreResult {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!("Restored {} file(s)", self.files_restored)
    }
}

/// Uniquely named scratch directory removed on drop
struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    fn create(root: &Path) -> MergeResult<Self> {
        let path = root.join(format!("profile-merge-restore-{}", Uuid::new_v4()));
        fs::create_dir_all(&path).map_err(|e| {
            MergeError::Restore(format!("Failed to create scratch directory: {}", e))
        })?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.path) {
            warn!(error = %err, path = %self.path.display(), "failed to remove scratch directory");
        }
    }
}

fn extract_zip(source: &Path, target: &Path) -> MergeResult<()> {
    let file = File::open(source)
        .map_err(|e| MergeError::Restore(format!("Failed to open archive: {}", e)))?;
    let mut archive = ZipArchive::new(file)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let destination = target.join(sanitize_archive_path(entry.name())?);

        if entry.is_dir() {
            fs::create_dir_all(&destination)?;
            continue;
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut output = File::create(&destination)?;
        io::copy(&mut entry, &mut output)?;
    }

    Ok(())
}

/// Reject absolute paths and parent segments in archive entry names
fn sanitize_archive_path(entry: &str) -> MergeResult<PathBuf> {
    let path = Path::new(entry);
    if path.is_absolute() {
        return Err(MergeError::Restore(format!(
            "Archive entry has an absolute path: {}",
            entry
        )));
    }

    let mut sanitized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(segment) => sanitized.push(segment),
            Component::CurDir => {}
            _ => {
                return Err(MergeError::Restore(format!(
                    "Archive entry escapes extraction root: {}",
                    entry
                )));
            }
        }
    }

    Ok(sanitized)
}

/// The single top-level folder of an extracted archive, or the root itself
fn locate_content_root(extracted: &Path) -> MergeResult<(PathBuf, bool)> {
    let mut directories = Vec::new();
    let mut has_files = false;

    for entry in fs::read_dir(extracted)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            directories.push(entry.path());
        } else {
            has_files = true;
        }
    }

    if directories.len() == 1 && !has_files {
        Ok((directories.remove(0), true))
    } else {
        Ok((extracted.to_path_buf(), false))
    }
}

/// Copy every file under `source` into `destination`, returning the file count
fn overlay_tree(source: &Path, destination: &Path) -> MergeResult<usize> {
    fs::create_dir_all(destination).map_err(|e| {
        MergeError::Restore(format!(
            "Failed to create {}: {}",
            destination.display(),
            e
        ))
    })?;

    let mut restored = 0usize;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source).map_err(|_| {
            MergeError::Restore(format!(
                "Entry outside extraction root: {}",
                entry.path().display()
            ))
        })?;
        let target_path = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)?;
            continue;
        }

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target_path).map_err(|e| {
            MergeError::Restore(format!(
                "Failed to restore {}: {}",
                target_path.display(),
                e
            ))
        })?;
        restored += 1;
    }

    Ok(restored)
}
