//! Copy service
//!
//! Runs one copy operation as a pseudo-transaction: validate, snapshot the
//! target, copy the selected files, and restore the snapshot if the copy phase
//! fails. Every outcome is reported as a `CopyResult`.
//!
//! The service holds no state between calls and takes no locks. Callers must
//! not run two copies against the same target directory at once.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::backup::{BackupManager, RestoreManager, DEFAULT_KEEP_COUNT};
use crate::error::{MergeError, MergeResult};
use crate::models::{CopyResult, DataTypeSelection, MergeOptions, ProfileInfo, Recovery};

use super::progress::{ProgressCallback, ProgressUpdate};

pub const INVALID_SOURCE_MESSAGE: &str = "Invalid source profile.";
pub const TARGET_NOT_FOUND_MESSAGE: &str = "Target DATABASE folder not found.";
pub const NO_SELECTION_MESSAGE: &str = "No data types selected for copying.";
pub const SAME_FOLDER_MESSAGE: &str = "Source and target are the same DATABASE folder.";

/// Service copying data-type files between profiles
pub struct CopyService<'a> {
    backups: BackupManager,
    restore: RestoreManager,
    keep_count: usize,
    progress: Option<ProgressCallback<'a>>,
}

impl<'a> CopyService<'a> {
    /// Create a copy service that snapshots into `backups`
    pub fn new(backups: BackupManager) -> Self {
        Self {
            backups,
            restore: RestoreManager::new(),
            keep_count: DEFAULT_KEEP_COUNT,
            progress: None,
        }
    }

    /// Use a specific restore manager for rollbacks
    pub fn with_restore_manager(mut self, restore: RestoreManager) -> Self {
        self.restore = restore;
        self
    }

    /// Number of archives kept after each new backup
    pub fn with_keep_count(mut self, keep_count: usize) -> Self {
        self.keep_count = keep_count;
        self
    }

    /// Subscribe to progress notifications
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ProgressUpdate) + 'a,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Copy the selected data-type files from `source` into `target_dir`
    ///
    /// Never returns an error: validation failures, backup failures and
    /// copy-phase failures are all reported through the result.
    pub fn copy_data(
        &mut self,
        source: Option<&ProfileInfo>,
        target_dir: &Path,
        options: &MergeOptions,
    ) -> CopyResult {
        let started = Instant::now();

        let source = match source {
            Some(profile) if profile.is_valid() => profile,
            _ => return CopyResult::failure(INVALID_SOURCE_MESSAGE, started.elapsed()),
        };

        if target_dir.as_os_str().is_empty() || !target_dir.is_dir() {
            return CopyResult::failure(TARGET_NOT_FOUND_MESSAGE, started.elapsed());
        }

        if same_directory(source.data_directory(), target_dir) {
            return CopyResult::failure(SAME_FOLDER_MESSAGE, started.elapsed());
        }

        let selections: Vec<&DataTypeSelection> = options.effective_selections().collect();
        if selections.is_empty() {
            return CopyResult::failure(NO_SELECTION_MESSAGE, started.elapsed());
        }

        let total_steps = selections.len() + usize::from(options.create_backup);
        let mut step = 0usize;
        let mut result = CopyResult::default();

        info!(
            source = %source.data_directory().display(),
            target = %target_dir.display(),
            data_types = selections.len(),
            backup = options.create_backup,
            "starting copy"
        );

        if options.create_backup {
            step += 1;
            self.notify("Creating backup of target folder...", step, total_steps);

            match self.backups.create_backup(target_dir) {
                Ok(path) => {
                    result.backup_path = Some(path);
                    self.backups.clean_old_backups(self.keep_count);
                }
                Err(err) => {
                    error!(
                        error = %err,
                        target = %target_dir.display(),
                        "backup failed; aborting copy"
                    );
                    self.notify("Copy aborted: backup failed.", total_steps, total_steps);
                    return CopyResult::failure(
                        format!("Failed to create backup: {}", err),
                        started.elapsed(),
                    );
                }
            }
        }

        let copied = self.copy_files(
            source.data_directory(),
            target_dir,
            &selections,
            &mut result,
            step,
            total_steps,
        );

        match copied {
            Ok(()) => {
                result.success = true;
                info!(
                    copied = result.copied_files.len(),
                    skipped = result.skipped_files.len(),
                    "copy completed"
                );
                self.notify("Copy complete.", total_steps, total_steps);
            }
            Err(err) => {
                error!(error = %err, target = %target_dir.display(), "copy failed");
                result.success = false;
                let mut message = format!("Error during copy: {}", err);

                if let Some(backup_path) = result.backup_path.clone() {
                    self.notify("Restoring target folder from backup...", total_steps, total_steps);
                    self.compensate(&backup_path, target_dir, &mut message, &mut result);
                }

                result.error_message = Some(message);
                self.notify("Copy failed.", total_steps, total_steps);
            }
        }

        result.duration = started.elapsed();
        result
    }

    fn copy_files(
        &mut self,
        source_dir: &Path,
        target_dir: &Path,
        selections: &[&DataTypeSelection],
        result: &mut CopyResult,
        steps_done: usize,
        total_steps: usize,
    ) -> MergeResult<()> {
        for (index, selection) in selections.iter().enumerate() {
            let file_name = selection.descriptor().file_name;
            self.notify(
                format!("Copying {}...", file_name),
                steps_done + index + 1,
                total_steps,
            );

            let source_path = source_dir.join(file_name);
            if !source_path.exists() {
                result.skipped_files.push(file_name.to_string());
                continue;
            }

            fs::copy(&source_path, target_dir.join(file_name))
                .map_err(|e| MergeError::Io(format!("Failed to copy {}: {}", file_name, e)))?;
            result.copied_files.push(file_name.to_string());
        }

        Ok(())
    }

    /// Roll the target back from the backup after a copy-phase failure
    fn compensate(
        &self,
        backup_path: &Path,
        target_dir: &Path,
        message: &mut String,
        result: &mut CopyResult,
    ) {
        match self.restore.restore_backup(backup_path, target_dir) {
            Ok(_) => {
                info!(archive = %backup_path.display(), "target restored after failed copy");
                message.push_str(" The target folder was automatically restored from backup.");
                result.recovery = Some(Recovery::Restored);
            }
            Err(restore_err) => {
                warn!(
                    error = %restore_err,
                    archive = %backup_path.display(),
                    "automatic restore failed"
                );
                message.push_str(&format!(
                    " Automatic restore failed: {}. Restore manually from backup: {}",
                    restore_err,
                    backup_path.display()
                ));
                result.recovery = Some(Recovery::Failed);
            }
        }
    }

    fn notify(&mut self, message: impl Into<String>, current_step: usize, total_steps: usize) {
        if let Some(callback) = self.progress.as_mut() {
            callback(&ProgressUpdate::new(message, current_step, total_steps));
        }
    }
}

/// Whether both paths resolve to the same directory on disk
fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataType;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct TestEnv {
        source: ProfileInfo,
        target: PathBuf,
        backup_dir: PathBuf,
        temp: TempDir,
    }

    fn create_test_env() -> TestEnv {
        let temp = TempDir::new().unwrap();
        let source_dir = temp.path().join("Source").join("DATABASE");
        let target = temp.path().join("Target").join("DATABASE");
        fs::create_dir_all(&source_dir).unwrap();
        fs::create_dir_all(&target).unwrap();

        fs::write(source_dir.join("PRICE.DAT"), b"source prices").unwrap();
        fs::write(source_dir.join("VENDOR.DAT"), b"source vendors").unwrap();
        fs::write(source_dir.join("ITEMS.DAT"), b"source items").unwrap();

        fs::write(target.join("PRICE.DAT"), b"target prices").unwrap();
        fs::write(target.join("VENDOR.DAT"), b"target vendors").unwrap();
        fs::write(target.join("A.MAP"), b"target map").unwrap();

        TestEnv {
            source: ProfileInfo::from_data_directory(source_dir),
            target,
            backup_dir: temp.path().join("backups"),
            temp,
        }
    }

    fn service<'a>(env: &TestEnv) -> CopyService<'a> {
        let scratch = env.temp.path().join("scratch");
        fs::create_dir_all(&scratch).unwrap();
        CopyService::new(BackupManager::new(&env.backup_dir))
            .with_restore_manager(RestoreManager::with_scratch_root(scratch))
    }

    fn archive_count(env: &TestEnv) -> usize {
        BackupManager::new(&env.backup_dir).list_backups().unwrap().len()
    }

    #[test]
    fn test_successful_copy_with_skip() {
        let env = create_test_env();
        let options = MergeOptions::for_data_types([
            DataType::PriceList,
            DataType::AttributeMap,
            DataType::Vendors,
        ]);

        let result = service(&env).copy_data(Some(&env.source), &env.target, &options);

        assert!(result.success, "{:?}", result.error_message);
        assert!(result.error_message.is_none());
        assert_eq!(result.copied_files, vec!["PRICE.DAT", "VENDOR.DAT"]);
        assert_eq!(result.skipped_files, vec!["A.MAP"]);
        assert_eq!(fs::read(env.target.join("PRICE.DAT")).unwrap(), b"source prices");
        assert_eq!(fs::read(env.target.join("VENDOR.DAT")).unwrap(), b"source vendors");
        // Skipped files are left as they were
        assert_eq!(fs::read(env.target.join("A.MAP")).unwrap(), b"target map");

        let backup = result.backup_path.unwrap();
        assert!(backup.exists());
        assert_eq!(archive_count(&env), 1);
    }

    #[test]
    fn test_copy_preserves_selection_order() {
        let env = create_test_env();
        let options = MergeOptions::for_data_types([
            DataType::Vendors,
            DataType::Items,
            DataType::PriceList,
        ])
        .with_backup(false);

        let result = service(&env).copy_data(Some(&env.source), &env.target, &options);
        assert_eq!(result.copied_files, vec!["VENDOR.DAT", "ITEMS.DAT", "PRICE.DAT"]);
    }

    #[test]
    fn test_no_backup_creates_no_archive() {
        let env = create_test_env();
        let options = MergeOptions::for_data_types([DataType::PriceList]).with_backup(false);

        let result = service(&env).copy_data(Some(&env.source), &env.target, &options);

        assert!(result.success);
        assert!(result.backup_path.is_none());
        assert!(!env.backup_dir.exists());
    }

    #[test]
    fn test_invalid_source() {
        let env = create_test_env();
        let options = MergeOptions::for_data_types([DataType::PriceList]);

        let result = service(&env).copy_data(None, &env.target, &options);
        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some(INVALID_SOURCE_MESSAGE));

        let missing = ProfileInfo::new("Ghost", env.temp.path().join("ghost"));
        let result = service(&env).copy_data(Some(&missing), &env.target, &options);
        assert_eq!(result.error_message.as_deref(), Some(INVALID_SOURCE_MESSAGE));
    }

    #[test]
    fn test_missing_target() {
        let env = create_test_env();
        let options = MergeOptions::for_data_types([DataType::PriceList]);

        let result = service(&env).copy_data(Some(&env.source), Path::new(""), &options);
        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some(TARGET_NOT_FOUND_MESSAGE));

        let result = service(&env).copy_data(
            Some(&env.source),
            &env.temp.path().join("nowhere"),
            &options,
        );
        assert_eq!(result.error_message.as_deref(), Some(TARGET_NOT_FOUND_MESSAGE));
        assert!(!env.backup_dir.exists());
    }

    #[test]
    fn test_same_source_and_target_is_rejected() {
        let env = create_test_env();
        let options = MergeOptions::for_data_types([DataType::PriceList]);
        let source_dir = env.source.data_directory().to_path_buf();

        let result = service(&env).copy_data(Some(&env.source), &source_dir, &options);
        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some(SAME_FOLDER_MESSAGE));

        // A different spelling of the same folder is caught too
        let dotted = source_dir.join("..").join("DATABASE");
        let result = service(&env).copy_data(Some(&env.source), &dotted, &options);
        assert_eq!(result.error_message.as_deref(), Some(SAME_FOLDER_MESSAGE));

        assert!(result.copied_files.is_empty());
        assert!(!env.backup_dir.exists());
        assert_eq!(fs::read(source_dir.join("PRICE.DAT")).unwrap(), b"source prices");
    }

    #[test]
    fn test_duplicate_selection_copies_once() {
        let env = create_test_env();
        let options = MergeOptions::for_data_types([
            DataType::PriceList,
            DataType::Vendors,
            DataType::PriceList,
        ])
        .with_backup(false);

        let result = service(&env).copy_data(Some(&env.source), &env.target, &options);
        assert!(result.success);
        assert_eq!(result.copied_files, vec!["PRICE.DAT", "VENDOR.DAT"]);
    }

    #[test]
    fn test_no_effective_selection_has_no_side_effects() {
        let env = create_test_env();
        let mut unavailable = DataTypeSelection::new(DataType::Vendors);
        unavailable.is_available = false;
        let options = MergeOptions::new(vec![
            DataTypeSelection::unselected(DataType::PriceList),
            unavailable,
        ]);

        let result = service(&env).copy_data(Some(&env.source), &env.target, &options);

        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some(NO_SELECTION_MESSAGE));
        assert!(!env.backup_dir.exists());
        assert_eq!(fs::read(env.target.join("PRICE.DAT")).unwrap(), b"target prices");
    }

    #[test]
    fn test_failed_copy_is_restored_from_backup() {
        let env = create_test_env();
        // A directory where ITEMS.DAT should go makes that copy fail
        fs::create_dir_all(env.target.join("ITEMS.DAT")).unwrap();

        let options = MergeOptions::for_data_types([
            DataType::AttributeMap,
            DataType::Vendors,
            DataType::Items,
        ]);

        let result = service(&env).copy_data(Some(&env.source), &env.target, &options);

        assert!(!result.success);
        let message = result.error_message.as_deref().unwrap();
        assert!(message.starts_with("Error during copy: "));
        assert!(message.contains("automatically restored"));
        assert_eq!(result.recovery, Some(Recovery::Restored));
        assert_eq!(result.skipped_files, vec!["A.MAP"]);

        // Pre-call state is back
        assert_eq!(fs::read(env.target.join("VENDOR.DAT")).unwrap(), b"target vendors");
        assert_eq!(fs::read(env.target.join("A.MAP")).unwrap(), b"target map");
        assert_eq!(fs::read(env.target.join("PRICE.DAT")).unwrap(), b"target prices");
        assert!(env.target.join("ITEMS.DAT").is_dir());
    }

    #[test]
    fn test_failed_copy_without_backup_is_not_restored() {
        let env = create_test_env();
        fs::create_dir_all(env.target.join("ITEMS.DAT")).unwrap();

        let options =
            MergeOptions::for_data_types([DataType::Vendors, DataType::Items]).with_backup(false);

        let result = service(&env).copy_data(Some(&env.source), &env.target, &options);

        assert!(!result.success);
        assert!(result.recovery.is_none());
        assert!(!result.error_message.unwrap().contains("restored"));
        assert_eq!(fs::read(env.target.join("VENDOR.DAT")).unwrap(), b"source vendors");
    }

    #[test]
    fn test_restore_failure_names_backup() {
        let env = create_test_env();
        fs::create_dir_all(env.target.join("ITEMS.DAT")).unwrap();

        // Scratch root is a file, so extraction cannot start
        let blocked = env.temp.path().join("blocked");
        fs::write(&blocked, b"file").unwrap();
        let mut service = CopyService::new(BackupManager::new(&env.backup_dir))
            .with_restore_manager(RestoreManager::with_scratch_root(&blocked));

        let options = MergeOptions::for_data_types([DataType::Items]);
        let result = service.copy_data(Some(&env.source), &env.target, &options);

        assert!(!result.success);
        assert_eq!(result.recovery, Some(Recovery::Failed));
        let message = result.error_message.unwrap();
        let backup = result.backup_path.unwrap();
        assert!(message.starts_with("Error during copy: "));
        assert!(message.contains("Automatic restore failed"));
        assert!(message.contains(&backup.display().to_string()));
    }

    #[test]
    fn test_backup_failure_aborts_before_copy() {
        let env = create_test_env();
        // Backup directory path is occupied by a file
        fs::write(&env.backup_dir, b"not a directory").unwrap();

        let options = MergeOptions::for_data_types([DataType::PriceList]);
        let result = service(&env).copy_data(Some(&env.source), &env.target, &options);

        assert!(!result.success);
        assert!(result
            .error_message
            .unwrap()
            .starts_with("Failed to create backup: "));
        assert!(result.copied_files.is_empty());
        assert!(result.backup_path.is_none());
        assert_eq!(fs::read(env.target.join("PRICE.DAT")).unwrap(), b"target prices");
    }

    #[test]
    fn test_copy_is_idempotent() {
        let env = create_test_env();
        let options = MergeOptions::for_data_types([
            DataType::PriceList,
            DataType::AttributeMap,
            DataType::Items,
        ]);

        let first = service(&env).copy_data(Some(&env.source), &env.target, &options);
        let after_first: Vec<_> = ["PRICE.DAT", "ITEMS.DAT", "A.MAP"]
            .iter()
            .map(|f| fs::read(env.target.join(f)).unwrap())
            .collect();

        let second = service(&env).copy_data(Some(&env.source), &env.target, &options);
        let after_second: Vec<_> = ["PRICE.DAT", "ITEMS.DAT", "A.MAP"]
            .iter()
            .map(|f| fs::read(env.target.join(f)).unwrap())
            .collect();

        assert!(first.success && second.success);
        assert_eq!(first.copied_files, second.copied_files);
        assert_eq!(first.skipped_files, second.skipped_files);
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_selected_items_still_copy_whole_file() {
        let env = create_test_env();
        let options = MergeOptions::new(vec![
            DataTypeSelection::new(DataType::Vendors).with_items(["Acme"])
        ])
        .with_backup(false);

        let result = service(&env).copy_data(Some(&env.source), &env.target, &options);
        assert!(result.success);
        assert_eq!(fs::read(env.target.join("VENDOR.DAT")).unwrap(), b"source vendors");
    }

    #[test]
    fn test_progress_notifications() {
        let env = create_test_env();
        let updates = RefCell::new(Vec::new());
        let options = MergeOptions::for_data_types([DataType::PriceList, DataType::AttributeMap]);

        let result = {
            let mut service = service(&env).on_progress(|u| updates.borrow_mut().push(u.clone()));
            service.copy_data(Some(&env.source), &env.target, &options)
        };
        assert!(result.success);

        let updates = updates.into_inner();
        let steps: Vec<_> = updates.iter().map(|u| (u.current_step, u.total_steps)).collect();
        assert_eq!(steps, vec![(1, 3), (2, 3), (3, 3), (3, 3)]);
        assert!(updates[0].message.contains("backup"));
        assert!(updates[1].message.contains("PRICE.DAT"));
        assert_eq!(updates.last().unwrap().message, "Copy complete.");
    }

    #[test]
    fn test_duration_is_measured() {
        let env = create_test_env();
        let options = MergeOptions::for_data_types([DataType::PriceList]);
        let started = Instant::now();

        let result = service(&env).copy_data(Some(&env.source), &env.target, &options);
        assert!(result.duration <= started.elapsed());
    }
}
