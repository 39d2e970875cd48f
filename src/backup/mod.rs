//! Backup system for profile-merge
//!
//! Snapshots a database directory before it is mutated, restores a snapshot
//! on top of a directory, and prunes old snapshots.
//!
//! # Architecture
//!
//! - `BackupManager`: creates, lists and prunes archives in the backup directory
//! - `RestoreManager`: overlays an archive's contents onto a target directory
//!
//! # Backup Format
//!
//! Each backup is a zip file named `Backup_<profileFolder>_<yyyyMMdd_HHmmss>.zip`.
//! Inside is a single top-level folder named after the backed-up directory
//! holding its full recursive file tree. Two backups of the same profile in the
//! same second share a name and the later one wins.
//!
//! # Example
//!
//! ```rust,ignore
//! use profile_merge::backup::{BackupManager, RestoreManager};
//! use profile_merge::config::MergePaths;
//!
//! let paths = MergePaths::new()?;
//! let backups = BackupManager::from_paths(&paths);
//!
//! let archive = backups.create_backup(target_dir)?;
//! backups.clean_old_backups(10);
//!
//! // Later, roll the directory back
//! let result = RestoreManager::new().restore_backup(&archive, target_dir)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{
    backup_file_name, BackupInfo, BackupManager, BACKUP_EXTENSION, BACKUP_PREFIX,
    DEFAULT_KEEP_COUNT,
};
pub use restore::{RestoreManager, RestoreResult};
