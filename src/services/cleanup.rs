//! Cleanup service
//!
//! Second phase of a selective copy. After the host application restarts, the
//! items recorded in a `PendingCleanup` are deleted through the host's item
//! store. The copy service never runs this; it only guarantees the files.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::error::{MergeError, MergeResult};
use crate::models::{DataType, PendingCleanup};
use crate::registry;
use crate::storage::PendingCleanupStore;

/// Host capability for enumerating and deleting named items in a data file
pub trait ItemStore {
    /// Names of the items currently stored for a data type
    fn list_items(&mut self, data_type: DataType) -> MergeResult<Vec<String>>;

    /// Delete the named items, returning how many were removed
    fn delete_items(&mut self, data_type: DataType, names: &[String]) -> MergeResult<usize>;

    /// Persist changes made to a data type
    fn save(&mut self, data_type: DataType) -> MergeResult<()>;
}

/// Outcome of applying a pending cleanup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Items deleted, keyed by manifest key
    pub deleted: BTreeMap<String, Vec<String>>,
    /// Requested items no longer present in the store
    pub missing: BTreeMap<String, Vec<String>>,
    /// Data types that could not be cleaned, with the reason
    pub failed: BTreeMap<String, String>,
}

impl CleanupReport {
    /// Whether every data type was processed without error
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_deleted(&self) -> usize {
        self.deleted.values().map(Vec::len).sum()
    }

    /// Get a summary of what was cleaned
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Deleted {} item(s) from {} data type(s)",
            self.total_deleted(),
            self.deleted.len()
        );
        let missing: usize = self.missing.values().map(Vec::len).sum();
        if missing > 0 {
            summary.push_str(&format!(", {} already gone", missing));
        }
        if !self.failed.is_empty() {
            let keys: Vec<&str> = self.failed.keys().map(String::as_str).collect();
            summary.push_str(&format!(", failed: {}", keys.join(", ")));
        }
        summary
    }
}

/// Applies pending cleanups through an item store
pub struct CleanupService<'a, S: ItemStore> {
    store: &'a mut S,
}

impl<'a, S: ItemStore> CleanupService<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Delete every recorded item that the store still holds
    ///
    /// A failing data type is recorded in the report and does not stop the
    /// remaining ones.
    pub fn run(&mut self, pending: &PendingCleanup) -> CleanupReport {
        let mut report = CleanupReport::default();

        for (key, names) in &pending.items_to_delete {
            if names.is_empty() {
                continue;
            }

            match self.clean_data_type(key, names) {
                Ok(outcome) => {
                    if let Some(reason) = outcome.shortfall {
                        warn!(key = %key, reason = %reason, "store kept items marked for deletion");
                        report.failed.insert(key.clone(), reason);
                    }
                    if !outcome.deleted.is_empty() {
                        report.deleted.insert(key.clone(), outcome.deleted);
                    }
                    if !outcome.missing.is_empty() {
                        report.missing.insert(key.clone(), outcome.missing);
                    }
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "cleanup failed for data type");
                    report.failed.insert(key.clone(), err.to_string());
                }
            }
        }

        info!(
            profile = %pending.profile_name,
            deleted = report.total_deleted(),
            failed = report.failed.len(),
            "pending cleanup applied"
        );

        report
    }

    /// Load, apply and clear the persisted pending cleanup
    ///
    /// The record is kept when any data type fails so the cleanup can be
    /// retried. Returns None when nothing was pending.
    pub fn run_pending(
        &mut self,
        records: &PendingCleanupStore,
    ) -> MergeResult<Option<CleanupReport>> {
        let Some(pending) = records.load()? else {
            return Ok(None);
        };

        let report = self.run(&pending);
        if report.is_complete() {
            records.clear()?;
        }

        Ok(Some(report))
    }

    fn clean_data_type(&mut self, key: &str, names: &[String]) -> MergeResult<TypeOutcome> {
        let descriptor = registry::by_manifest_key(key)
            .filter(|d| d.supports_selective_cleanup)
            .ok_or_else(|| {
                MergeError::Cleanup(format!("No selective-cleanup data type for key '{}'", key))
            })?;
        let data_type = descriptor.data_type;

        let present = self.store.list_items(data_type)?;
        let (doomed, missing): (Vec<String>, Vec<String>) = names
            .iter()
            .cloned()
            .partition(|name| present.contains(name));

        if doomed.is_empty() {
            return Ok(TypeOutcome {
                deleted: doomed,
                missing,
                shortfall: None,
            });
        }

        let removed = self.store.delete_items(data_type, &doomed)?;
        let mut outcome = TypeOutcome {
            deleted: doomed,
            missing,
            shortfall: None,
        };

        if removed < outcome.deleted.len() {
            // Re-list so the report names exactly what is gone
            let remaining = self.store.list_items(data_type)?;
            let (kept, deleted): (Vec<String>, Vec<String>) = outcome
                .deleted
                .into_iter()
                .partition(|name| remaining.contains(name));
            outcome.deleted = deleted;
            if !kept.is_empty() {
                outcome.shortfall = Some(format!(
                    "Store removed {} of {} item(s); still present: {}",
                    removed,
                    outcome.deleted.len() + kept.len(),
                    kept.join(", ")
                ));
            }
        }

        if !outcome.deleted.is_empty() {
            self.store.save(data_type)?;
        }

        Ok(outcome)
    }
}

/// Result of cleaning one data type
struct TypeOutcome {
    deleted: Vec<String>,
    missing: Vec<String>,
    /// Set when the store kept some of the items it was asked to delete
    shortfall: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MergePaths;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[derive(Default)]
    struct MemoryStore {
        items: HashMap<DataType, Vec<String>>,
        saved: Vec<DataType>,
        broken: Option<DataType>,
        /// Names that delete_items silently leaves in place
        stubborn: Vec<String>,
    }

    impl MemoryStore {
        fn with(mut self, data_type: DataType, names: &[&str]) -> Self {
            self.items
                .insert(data_type, names.iter().map(|n| n.to_string()).collect());
            self
        }
    }

    impl ItemStore for MemoryStore {
        fn list_items(&mut self, data_type: DataType) -> MergeResult<Vec<String>> {
            if self.broken == Some(data_type) {
                return Err(MergeError::Cleanup("store offline".into()));
            }
            Ok(self.items.get(&data_type).cloned().unwrap_or_default())
        }

        fn delete_items(&mut self, data_type: DataType, names: &[String]) -> MergeResult<usize> {
            let items = self.items.entry(data_type).or_default();
            let before = items.len();
            let stubborn = &self.stubborn;
            items.retain(|item| !names.contains(item) || stubborn.contains(item));
            Ok(before - items.len())
        }

        fn save(&mut self, data_type: DataType) -> MergeResult<()> {
            self.saved.push(data_type);
            Ok(())
        }
    }

    fn pending(entries: Vec<(&str, Vec<&str>)>) -> PendingCleanup {
        let mut cleanup = PendingCleanup::new("Target", "/t/DATABASE");
        for (key, names) in entries {
            cleanup.items_to_delete.insert(
                key.to_string(),
                names.iter().map(|n| n.to_string()).collect(),
            );
        }
        cleanup
    }

    #[test]
    fn test_deletes_only_present_items() {
        let mut store =
            MemoryStore::default().with(DataType::Vendors, &["Acme", "Globex", "Initech"]);
        let report = CleanupService::new(&mut store)
            .run(&pending(vec![("vendors", vec!["Globex", "Umbrella"])]));

        assert!(report.is_complete());
        assert_eq!(report.deleted["vendors"], vec!["Globex".to_string()]);
        assert_eq!(report.missing["vendors"], vec!["Umbrella".to_string()]);
        assert_eq!(store.items[&DataType::Vendors], vec!["Acme", "Initech"]);
        assert_eq!(store.saved, vec![DataType::Vendors]);
    }

    #[test]
    fn test_failure_does_not_block_other_types() {
        let mut store = MemoryStore {
            broken: Some(DataType::Items),
            ..MemoryStore::default()
        }
        .with(DataType::Vendors, &["Acme"]);

        let report = CleanupService::new(&mut store)
            .run(&pending(vec![("items", vec!["Bolt"]), ("vendors", vec!["Acme"])]));

        assert!(!report.is_complete());
        assert!(report.failed.contains_key("items"));
        assert_eq!(report.total_deleted(), 1);
        assert!(report.summary().contains("failed: items"));
    }

    #[test]
    fn test_partial_delete_is_reported() {
        let mut store = MemoryStore {
            stubborn: vec!["Initech".to_string()],
            ..MemoryStore::default()
        }
        .with(DataType::Vendors, &["Acme", "Globex", "Initech"]);

        let report = CleanupService::new(&mut store)
            .run(&pending(vec![("vendors", vec!["Globex", "Initech"])]));

        assert!(!report.is_complete());
        assert_eq!(report.deleted["vendors"], vec!["Globex".to_string()]);
        assert!(report.failed["vendors"].contains("Initech"));
        assert_eq!(report.total_deleted(), 1);
        assert_eq!(store.items[&DataType::Vendors], vec!["Acme", "Initech"]);
        assert_eq!(store.saved, vec![DataType::Vendors]);
    }

    #[test]
    fn test_unknown_key_fails() {
        let mut store = MemoryStore::default();
        let report = CleanupService::new(&mut store).run(&pending(vec![("units", vec!["Feet"])]));
        assert!(report.failed.contains_key("units"));
        assert!(store.saved.is_empty());
    }

    #[test]
    fn test_run_pending_clears_record_on_success() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MergePaths::with_base_dir(temp_dir.path().to_path_buf());
        let records = PendingCleanupStore::new(&paths);

        let mut store = MemoryStore::default().with(DataType::Crews, &["Night Shift"]);
        assert!(CleanupService::new(&mut store)
            .run_pending(&records)
            .unwrap()
            .is_none());

        records
            .save(&pending(vec![("crews", vec!["Night Shift"])]))
            .unwrap();
        let report = CleanupService::new(&mut store)
            .run_pending(&records)
            .unwrap()
            .unwrap();

        assert_eq!(report.total_deleted(), 1);
        assert!(records.load().unwrap().is_none());
    }

    #[test]
    fn test_run_pending_keeps_record_on_failure() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MergePaths::with_base_dir(temp_dir.path().to_path_buf());
        let records = PendingCleanupStore::new(&paths);
        records.save(&pending(vec![("crews", vec!["Night Shift"])])).unwrap();

        let mut store = MemoryStore {
            broken: Some(DataType::Crews),
            ..MemoryStore::default()
        };
        let report = CleanupService::new(&mut store)
            .run_pending(&records)
            .unwrap()
            .unwrap();

        assert!(!report.is_complete());
        assert!(records.load().unwrap().is_some());
    }
}
