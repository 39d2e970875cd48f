//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::backup::{BackupManager, RestoreManager, BACKUP_EXTENSION};
use crate::config::paths::MergePaths;
use crate::config::settings::Settings;
use crate::display::format_backup_list;
use crate::error::{MergeError, MergeResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Archive a database directory into the backup folder
    Create {
        /// Directory to back up
        dir: PathBuf,
    },

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore a backup on top of a directory
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Directory to restore into
        dir: PathBuf,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete all but the most recent backups
    Prune {
        /// Number of backups to keep (defaults to the configured retention)
        #[arg(short, long)]
        keep: Option<usize>,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &MergePaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> MergeResult<()> {
    let manager = BackupManager::from_paths(paths);

    match cmd {
        BackupCommands::Create { dir } => {
            println!("Creating backup of {}...", dir.display());
            let backup_path = manager.create_backup(&dir)?;
            println!("Backup created: {}", display_name(&backup_path));
            println!("Location: {}", backup_path.display());
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;
            println!("{}", format_backup_list(&backups, verbose));
            if backups.is_empty() {
                println!("Create one with: profile-merge backup create <DIR>");
            }
        }

        BackupCommands::Restore { backup, dir, force } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;

            println!("Backup: {}", backup_path.display());
            println!("Target: {}", dir.display());
            println!();

            if !force {
                println!("WARNING: Target files also present in the backup will be overwritten!");
                println!("To proceed, run again with --force flag:");
                println!(
                    "  profile-merge backup restore {} {} --force",
                    backup,
                    dir.display()
                );
                return Ok(());
            }

            println!("Restoring from backup...");
            let result = RestoreManager::new().restore_backup(&backup_path, &dir)?;
            println!("Restore complete!");
            println!("{}", result.summary());
        }

        BackupCommands::Prune { keep } => {
            let keep = keep.unwrap_or(settings.backup_retention.keep_count);
            let total = manager.list_backups()?.len();

            if total <= keep {
                println!("No backups to prune.");
                println!("Keeping up to {} backup(s); you have {}.", keep, total);
                return Ok(());
            }

            let deleted = manager.clean_old_backups(keep);
            println!("Deleted {} backup(s).", deleted.len());
            for path in &deleted {
                println!("  - {}", display_name(path));
            }
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> MergeResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| MergeError::backup_not_found("latest"));
    }

    let path = PathBuf::from(backup);
    if path.is_file() {
        return Ok(path);
    }

    if let Some(info) = manager.get_backup(backup) {
        return Ok(info.path);
    }

    let with_ext = format!("{}.{}", backup, BACKUP_EXTENSION);
    if let Some(info) = manager.get_backup(&with_ext) {
        return Ok(info.path);
    }

    Err(MergeError::backup_not_found(backup))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
