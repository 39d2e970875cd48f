//! Manifest and pending-cleanup records
//!
//! A `ProfileManifest` lists the named items of each selectively-cleanable
//! data type in a profile. A `PendingCleanup` records which items must be
//! deleted from the target once the host application restarts. Both are
//! persisted as camelCase JSON and read by a separate process, so their shape
//! is a stable contract.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::selection::DataTypeSelection;

/// One named record inside a data file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestItem {
    /// Item name as reported by the host item store
    pub name: String,

    /// Optional grouping label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ManifestItem {
    /// Create an ungrouped item
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: None,
        }
    }

    /// Create an item inside a group
    pub fn grouped(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: Some(group.into()),
        }
    }
}

/// Snapshot of one profile's items at generation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileManifest {
    pub profile_name: String,
    pub database_path: PathBuf,
    pub generated_at: DateTime<Utc>,

    /// Items keyed by manifest key, in store order
    #[serde(default)]
    pub data_types: BTreeMap<String, Vec<ManifestItem>>,
}

impl ProfileManifest {
    /// Start an empty manifest stamped with the current time
    pub fn new(profile_name: impl Into<String>, database_path: impl Into<PathBuf>) -> Self {
        Self {
            profile_name: profile_name.into(),
            database_path: database_path.into(),
            generated_at: Utc::now(),
            data_types: BTreeMap::new(),
        }
    }

    /// Record the items of one data type, replacing any previous list
    pub fn set_items(&mut self, key: impl Into<String>, items: Vec<ManifestItem>) {
        self.data_types.insert(key.into(), items);
    }

    /// Items recorded under a manifest key
    pub fn items(&self, key: &str) -> &[ManifestItem] {
        self.data_types.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of items recorded under a manifest key
    pub fn item_count(&self, key: &str) -> usize {
        self.items(key).len()
    }

    /// Items not in `selected`, in manifest order
    pub fn items_to_delete(&self, key: &str, selected: &[String]) -> Vec<String> {
        self.items(key)
            .iter()
            .filter(|item| !selected.iter().any(|s| s == &item.name))
            .map(|item| item.name.clone())
            .collect()
    }
}

/// Deletions to apply after the host application restarts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCleanup {
    pub profile_name: String,
    pub database_path: PathBuf,
    pub created_at: DateTime<Utc>,

    /// Item names to remove, keyed by manifest key
    #[serde(default)]
    pub items_to_delete: BTreeMap<String, Vec<String>>,
}

impl PendingCleanup {
    /// Create an empty record for a target profile
    pub fn new(profile_name: impl Into<String>, database_path: impl Into<PathBuf>) -> Self {
        Self {
            profile_name: profile_name.into(),
            database_path: database_path.into(),
            created_at: Utc::now(),
            items_to_delete: BTreeMap::new(),
        }
    }

    /// Build the cleanup for a selective copy
    ///
    /// `manifest` describes the source profile (whose files were copied in
    /// full); the record targets `profile_name` / `database_path`. Only
    /// effective selections whose descriptor supports selective cleanup and
    /// that carry an item list contribute; keys with nothing to delete are
    /// omitted.
    pub fn from_selections(
        manifest: &ProfileManifest,
        selections: &[DataTypeSelection],
        profile_name: impl Into<String>,
        database_path: impl Into<PathBuf>,
    ) -> Self {
        let mut cleanup = Self::new(profile_name, database_path);

        for selection in selections.iter().filter(|s| s.is_effective()) {
            let (Some(key), Some(selected)) = (
                selection.descriptor().manifest_key,
                selection.effective_selected_items(),
            ) else {
                continue;
            };

            let doomed = manifest.items_to_delete(key, selected);
            if !doomed.is_empty() {
                cleanup.items_to_delete.insert(key.to_string(), doomed);
            }
        }

        cleanup
    }

    /// Whether there is anything to delete
    pub fn is_empty(&self) -> bool {
        self.items_to_delete.values().all(Vec::is_empty)
    }

    /// Total number of item deletions recorded
    pub fn total_items(&self) -> usize {
        self.items_to_delete.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataType;

    fn sample_manifest() -> ProfileManifest {
        let mut manifest = ProfileManifest::new("Source", "/profiles/Source/DATABASE");
        manifest.set_items(
            "vendors",
            vec![
                ManifestItem::new("Acme"),
                ManifestItem::grouped("Globex", "Preferred"),
                ManifestItem::new("Initech"),
            ],
        );
        manifest.set_items("items", vec![ManifestItem::new("Bolt")]);
        manifest
    }

    #[test]
    fn test_items_to_delete_preserves_manifest_order() {
        let manifest = sample_manifest();
        let doomed = manifest.items_to_delete("vendors", &["Globex".to_string()]);
        assert_eq!(doomed, vec!["Acme".to_string(), "Initech".to_string()]);
        assert!(manifest.items_to_delete("missing", &[]).is_empty());
        assert_eq!(manifest.item_count("vendors"), 3);
    }

    #[test]
    fn test_from_selections() {
        let manifest = sample_manifest();
        let selections = vec![
            DataTypeSelection::new(DataType::Vendors).with_items(["Acme"]),
            // Full copy: nothing to delete
            DataTypeSelection::new(DataType::Items),
            // No cleanup support: list is advisory
            DataTypeSelection::new(DataType::Units).with_items(["Feet"]),
            // Unselected: ignored
            DataTypeSelection::unselected(DataType::Customers).with_items(Vec::<String>::new()),
        ];

        let cleanup =
            PendingCleanup::from_selections(&manifest, &selections, "Target", "/t/DATABASE");

        assert_eq!(cleanup.profile_name, "Target");
        assert_eq!(cleanup.items_to_delete.len(), 1);
        assert_eq!(
            cleanup.items_to_delete["vendors"],
            vec!["Globex".to_string(), "Initech".to_string()]
        );
        assert_eq!(cleanup.total_items(), 2);
        assert!(!cleanup.is_empty());
    }

    #[test]
    fn test_selecting_everything_yields_empty_cleanup() {
        let manifest = sample_manifest();
        let selections =
            vec![DataTypeSelection::new(DataType::Items).with_items(["Bolt"])];

        let cleanup =
            PendingCleanup::from_selections(&manifest, &selections, "Target", "/t/DATABASE");
        assert!(cleanup.is_empty());
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let cleanup = PendingCleanup::new("Target", "/t/DATABASE");
        let json = serde_json::to_value(&cleanup).unwrap();

        assert!(json.get("profileName").is_some());
        assert!(json.get("databasePath").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("itemsToDelete").is_some());

        let manifest = serde_json::to_value(sample_manifest()).unwrap();
        assert!(manifest.get("generatedAt").is_some());
        assert!(manifest["dataTypes"]["vendors"][1].get("group").is_some());
        assert!(manifest["dataTypes"]["vendors"][0].get("group").is_none());
    }
}
