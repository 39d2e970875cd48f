//! Manifest and pending-cleanup display formatting

use crate::models::{PendingCleanup, ProfileManifest};
use crate::registry;

/// Format a manifest as per-type item lists
pub fn format_manifest(manifest: &ProfileManifest) -> String {
    let mut output = format!(
        "Manifest for {} ({})\nGenerated {}\n",
        manifest.profile_name,
        manifest.database_path.display(),
        manifest.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );

    if manifest.data_types.is_empty() {
        output.push_str("\nNo items listed.\n");
        return output;
    }

    for (key, items) in &manifest.data_types {
        output.push('\n');
        output.push_str(&format!("{} ({})\n", label(key), items.len()));
        for item in items {
            match &item.group {
                Some(group) => output.push_str(&format!("  {} [{}]\n", item.name, group)),
                None => output.push_str(&format!("  {}\n", item.name)),
            }
        }
    }
    output
}

/// Format a pending cleanup record
pub fn format_pending_cleanup(cleanup: &PendingCleanup) -> String {
    let mut output = format!(
        "Pending cleanup for {} ({})\nCreated {}\n",
        cleanup.profile_name,
        cleanup.database_path.display(),
        cleanup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );

    for (key, names) in cleanup.items_to_delete.iter().filter(|(_, n)| !n.is_empty()) {
        output.push('\n');
        output.push_str(&format!("{}: delete {}\n", label(key), names.len()));
        for name in names {
            output.push_str(&format!("  {}\n", name));
        }
    }
    output.push_str(&format!("\nTotal: {} item(s)\n", cleanup.total_items()));
    output
}

fn label(key: &str) -> String {
    registry::by_manifest_key(key)
        .map(|d| d.display_name.to_string())
        .unwrap_or_else(|| key.to_string())
}
