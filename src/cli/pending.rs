//! Pending cleanup CLI commands

use clap::Subcommand;

use crate::config::paths::MergePaths;
use crate::display::format_pending_cleanup;
use crate::error::MergeResult;
use crate::storage::PendingCleanupStore;

/// Pending cleanup subcommands
#[derive(Subcommand)]
pub enum PendingCommands {
    /// Show the cleanup waiting for the host to restart
    Show,

    /// Discard the pending cleanup without applying it
    Clear,
}

/// Handle a pending cleanup command
pub fn handle_pending_command(paths: &MergePaths, cmd: PendingCommands) -> MergeResult<()> {
    let store = PendingCleanupStore::new(paths);

    match cmd {
        PendingCommands::Show => match store.load()? {
            Some(cleanup) => print!("{}", format_pending_cleanup(&cleanup)),
            None => println!("No pending cleanup."),
        },
        PendingCommands::Clear => {
            if store.clear()? {
                println!("Pending cleanup discarded.");
            } else {
                println!("No pending cleanup.");
            }
        }
    }

    Ok(())
}
