//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod copy;
pub mod history;
pub mod manifest;
pub mod pending;
pub mod types;

pub use backup::{handle_backup_command, BackupCommands};
pub use copy::{handle_copy_command, CopyArgs};
pub use history::handle_history_command;
pub use manifest::{handle_manifest_command, ManifestCommands};
pub use pending::{handle_pending_command, PendingCommands};
pub use types::handle_types_command;
