//! Manifest and pending-cleanup repositories
//!
//! Each record lives in its own JSON file under the profile-merge base
//! directory. The cleanup process that consumes `PendingCleanup` runs in a
//! separate session, so both files are written atomically.

use std::path::PathBuf;

use crate::config::paths::MergePaths;
use crate::error::MergeResult;
use crate::models::{PendingCleanup, ProfileManifest};

use super::file_io::{discard_record, load_record, save_record};

/// Saved profile manifests, one file per profile name
pub struct ManifestStore {
    paths: MergePaths,
}

impl ManifestStore {
    pub fn new(paths: MergePaths) -> Self {
        Self { paths }
    }

    /// Persist a manifest, replacing any previous one for the same profile
    pub fn save(&self, manifest: &ProfileManifest) -> MergeResult<PathBuf> {
        let path = self.paths.manifest_file(&manifest.profile_name);
        save_record(&path, manifest)?;
        Ok(path)
    }

    /// Load the manifest saved for a profile
    pub fn load(&self, profile_name: &str) -> MergeResult<Option<ProfileManifest>> {
        load_record(self.paths.manifest_file(profile_name))
    }

    /// Delete the manifest saved for a profile
    pub fn delete(&self, profile_name: &str) -> MergeResult<bool> {
        discard_record(self.paths.manifest_file(profile_name))
    }
}

/// The single pending cleanup awaiting a host restart
pub struct PendingCleanupStore {
    path: PathBuf,
}

impl PendingCleanupStore {
    pub fn new(paths: &MergePaths) -> Self {
        Self {
            path: paths.pending_cleanup_file(),
        }
    }

    /// Path of the persisted record
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Persist the record; empty records are not written
    pub fn save(&self, cleanup: &PendingCleanup) -> MergeResult<bool> {
        if cleanup.is_empty() {
            return Ok(false);
        }
        save_record(&self.path, cleanup)?;
        Ok(true)
    }

    /// Load the pending record, if any
    pub fn load(&self) -> MergeResult<Option<PendingCleanup>> {
        load_record(&self.path)
    }

    /// Remove the record once it has been applied
    pub fn clear(&self) -> MergeResult<bool> {
        discard_record(&self.path)
    }
}
