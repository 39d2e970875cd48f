//! Manifest CLI commands
//!
//! The host application exports a profile's item manifest as JSON; importing
//! it here lets `copy --keep-items` work out which items to delete later.

use clap::Subcommand;
use std::path::PathBuf;

use crate::config::paths::MergePaths;
use crate::display::format_manifest;
use crate::error::{MergeError, MergeResult};
use crate::models::ProfileManifest;
use crate::storage::{import_record, ManifestStore};

/// Manifest subcommands
#[derive(Subcommand)]
pub enum ManifestCommands {
    /// Import a manifest exported by the host application
    Import {
        /// Manifest JSON file
        file: PathBuf,
    },

    /// Show the saved manifest for a profile
    Show {
        /// Profile name
        profile: String,
    },

    /// Delete the saved manifest for a profile
    Delete {
        /// Profile name
        profile: String,
    },
}

/// Handle a manifest command
pub fn handle_manifest_command(paths: &MergePaths, cmd: ManifestCommands) -> MergeResult<()> {
    let store = ManifestStore::new(paths.clone());

    match cmd {
        ManifestCommands::Import { file } => {
            let manifest: ProfileManifest = import_record(&file)?;
            if manifest.profile_name.trim().is_empty() {
                return Err(MergeError::Validation("Manifest has no profile name".to_string()));
            }

            let saved = store.save(&manifest)?;
            let items: usize = manifest.data_types.values().map(Vec::len).sum();
            println!(
                "Imported manifest for '{}' ({} item(s))",
                manifest.profile_name, items
            );
            println!("Saved to: {}", saved.display());
        }

        ManifestCommands::Show { profile } => match store.load(&profile)? {
            Some(manifest) => print!("{}", format_manifest(&manifest)),
            None => println!("No manifest saved for '{}'.", profile),
        },

        ManifestCommands::Delete { profile } => {
            if store.delete(&profile)? {
                println!("Deleted manifest for '{}'.", profile);
            } else {
                println!("No manifest saved for '{}'.", profile);
            }
        }
    }

    Ok(())
}
