//! Copy CLI command
//!
//! Copies data-type files from one profile's database directory into
//! another's, then records the run in the history log.
//!
//! `--keep-items` makes the copy selective. Whole files are still copied, and
//! a pending cleanup listing the source manifest's other items is saved for
//! the host to apply after it restarts.

use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::backup::BackupManager;
use crate::config::paths::MergePaths;
use crate::config::settings::Settings;
use crate::display::format_selection_list;
use crate::error::{MergeError, MergeResult};
use crate::history::{HistoryEntry, HistoryLogger};
use crate::models::{
    CopyResult, DataType, DataTypeSelection, MergeOptions, PendingCleanup, ProfileInfo,
    ProfileManifest,
};
use crate::registry;
use crate::services::CopyService;
use crate::storage::{ManifestStore, PendingCleanupStore};

/// Arguments for the copy command
#[derive(Args, Debug)]
pub struct CopyArgs {
    /// Source profile's DATABASE directory
    pub source: PathBuf,

    /// Target profile's DATABASE directory
    pub target: PathBuf,

    /// Data types to copy, comma separated (name, file name or display name)
    #[arg(short, long, value_delimiter = ',')]
    pub types: Vec<String>,

    /// Items to keep for a data type, as TYPE=NAME;NAME (repeatable)
    #[arg(short = 'k', long = "keep-items", value_name = "TYPE=NAMES")]
    pub keep_items: Vec<String>,

    /// Skip the pre-copy backup of the target
    #[arg(long)]
    pub no_backup: bool,
}

/// Handle the copy command
///
/// Returns the copy outcome so the caller can choose the exit status.
pub fn handle_copy_command(
    paths: &MergePaths,
    settings: &Settings,
    args: CopyArgs,
) -> MergeResult<CopyResult> {
    let data_types = resolve_data_types(&args.types)?;
    let mut selections: Vec<DataTypeSelection> =
        data_types.into_iter().map(DataTypeSelection::new).collect();
    let source = ProfileInfo::from_data_directory(&args.source);

    let kept = resolve_kept_items(&args.keep_items)?;
    let manifest = if kept.is_empty() {
        None
    } else {
        let manifest = ManifestStore::new(paths.clone())
            .load(&source.name)?
            .ok_or_else(|| {
                MergeError::Validation(format!(
                    "No manifest saved for profile '{}'. Import one with: \
                     profile-merge manifest import <FILE>",
                    source.name
                ))
            })?;
        apply_kept_items(&mut selections, kept, &manifest)?;
        Some(manifest)
    };

    let mut plan = selections.clone();
    for selection in &mut plan {
        selection.refresh_availability(&args.source);
    }
    println!("Copying from {}", args.source.display());
    println!("         to {}", args.target.display());
    print!("{}", format_selection_list(&plan));
    println!();

    let create_backup = settings.create_backup && !args.no_backup;
    let options = MergeOptions::new(selections).with_backup(create_backup);

    let result = {
        let mut service = CopyService::new(BackupManager::from_paths(paths))
            .with_keep_count(settings.backup_retention.keep_count)
            .on_progress(|update| {
                println!("[{}/{}] {}", update.current_step, update.total_steps, update.message);
            });
        service.copy_data(Some(&source), &args.target, &options)
    };

    println!();
    println!("{}", result.summary());
    if result.success && options.requires_reload() {
        println!("Restart the host application to load the copied data.");
    }

    if let (true, Some(manifest)) = (result.success, &manifest) {
        let target = ProfileInfo::from_data_directory(&args.target);
        let cleanup = PendingCleanup::from_selections(
            manifest,
            &options.selected_data_types,
            &target.name,
            &args.target,
        );
        match PendingCleanupStore::new(paths).save(&cleanup) {
            Ok(true) => println!(
                "Pending cleanup saved: {} item(s) to delete after the host restarts.",
                cleanup.total_items()
            ),
            Ok(false) => {}
            Err(err) => warn!(error = %err, "failed to save pending cleanup"),
        }
    }

    let logger = HistoryLogger::new(paths.history_log());
    let entry = HistoryEntry::from_result(&source.name, &args.target, &result);
    if let Err(err) = logger.log(&entry) {
        warn!(error = %err, "failed to record copy history");
    }

    Ok(result)
}

/// Resolve `--types` values to data types; no values selects everything
fn resolve_data_types(queries: &[String]) -> MergeResult<Vec<DataType>> {
    if queries.is_empty() {
        return Ok(registry::all_descriptors()
            .iter()
            .map(|d| d.data_type)
            .collect());
    }

    let mut data_types = Vec::new();
    for query in queries.iter().map(|q| q.trim()).filter(|q| !q.is_empty()) {
        let descriptor =
            registry::find(query).ok_or_else(|| MergeError::data_type_not_found(query))?;
        if !data_types.contains(&descriptor.data_type) {
            data_types.push(descriptor.data_type);
        }
    }

    if data_types.is_empty() {
        return Err(MergeError::Validation(
            "No data types given to --types".to_string(),
        ));
    }

    Ok(data_types)
}

/// Parse `--keep-items` values into per-type allow-lists
fn resolve_kept_items(values: &[String]) -> MergeResult<Vec<(DataType, Vec<String>)>> {
    let mut kept: Vec<(DataType, Vec<String>)> = Vec::new();

    for value in values {
        let (query, names) = value.split_once('=').ok_or_else(|| {
            MergeError::Validation(format!("Expected TYPE=NAME;NAME, got '{}'", value))
        })?;
        let descriptor = registry::find(query.trim())
            .ok_or_else(|| MergeError::data_type_not_found(query.trim()))?;
        if !descriptor.allows_item_selection() {
            return Err(MergeError::Validation(format!(
                "{} does not support item selection",
                descriptor.display_name
            )));
        }

        let names = names
            .split(';')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        match kept.iter_mut().find(|(dt, _)| *dt == descriptor.data_type) {
            Some((_, existing)) => existing.extend(names),
            None => kept.push((descriptor.data_type, names.collect())),
        }
    }

    Ok(kept)
}

/// Attach allow-lists to their selections, with counts from the manifest
fn apply_kept_items(
    selections: &mut [DataTypeSelection],
    kept: Vec<(DataType, Vec<String>)>,
    manifest: &ProfileManifest,
) -> MergeResult<()> {
    for (data_type, names) in kept {
        let selection = selections
            .iter_mut()
            .find(|s| s.data_type == data_type)
            .ok_or_else(|| {
                MergeError::Validation(format!(
                    "{} is not among the selected data types",
                    data_type
                ))
            })?;

        if let Some(key) = selection.descriptor().manifest_key {
            selection.manifest_item_count = Some(manifest.item_count(key));
        }
        selection.selected_items = Some(names);
    }

    Ok(())
}
