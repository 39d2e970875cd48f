//! Per-session selection state
//!
//! Selection is a plain value keyed by data type identity, kept apart from
//! the immutable registry entry. Callers own observing their own changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::data_type::{DataType, DataTypeDescriptor};

/// Selection state for one data type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTypeSelection {
    /// Which data type this record selects
    pub data_type: DataType,

    /// Whether the operator picked this data type
    pub is_selected: bool,

    /// Whether the source profile has this data type's file
    pub is_available: bool,

    /// `None` copies everything; `Some` is the allow-list of item names to keep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_items: Option<Vec<String>>,

    /// Total item count from the source manifest, for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_item_count: Option<usize>,
}

impl DataTypeSelection {
    /// A selected, available record that copies every item
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            is_selected: true,
            is_available: true,
            selected_items: None,
            manifest_item_count: None,
        }
    }

    /// An unselected record
    pub fn unselected(data_type: DataType) -> Self {
        Self {
            is_selected: false,
            ..Self::new(data_type)
        }
    }

    /// Restrict the copy to the named items
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_items = Some(items.into_iter().map(Into::into).collect());
        self
    }

    /// Registry entry for this selection
    pub fn descriptor(&self) -> &'static DataTypeDescriptor {
        self.data_type.descriptor()
    }

    /// Whether the copy phase should process this record
    pub fn is_effective(&self) -> bool {
        self.is_selected && self.is_available
    }

    /// The allow-list that cleanup must honour
    ///
    /// Item lists on data types without selective cleanup are advisory only and
    /// resolve to `None` ("copy all").
    pub fn effective_selected_items(&self) -> Option<&[String]> {
        if !self.descriptor().allows_item_selection() {
            return None;
        }
        self.selected_items.as_deref()
    }

    /// Recompute `is_available` from the source database directory
    pub fn refresh_availability(&mut self, source_dir: &Path) {
        self.is_available = source_dir.join(self.descriptor().file_name).exists();
    }

    /// Short display string summarising the selection
    pub fn selection_indicator(&self) -> String {
        if !self.is_selected {
            return "-".to_string();
        }

        match (self.effective_selected_items(), self.manifest_item_count) {
            (Some(items), Some(total)) => format!("{} of {}", items.len(), total),
            (Some(items), None) => format!("{} items", items.len()),
            (None, _) => "All".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_effective_requires_selected_and_available() {
        let mut selection = DataTypeSelection::new(DataType::Vendors);
        assert!(selection.is_effective());

        selection.is_available = false;
        assert!(!selection.is_effective());

        let unselected = DataTypeSelection::unselected(DataType::Vendors);
        assert!(!unselected.is_effective());
    }

    #[test]
    fn test_items_ignored_without_cleanup_support() {
        let selection = DataTypeSelection::new(DataType::Units).with_items(["Feet", "Meters"]);
        assert!(selection.selected_items.is_some());
        assert!(selection.effective_selected_items().is_none());
        assert_eq!(selection.selection_indicator(), "All");
    }

    #[test]
    fn test_items_honoured_with_cleanup_support() {
        let mut selection = DataTypeSelection::new(DataType::Vendors).with_items(["Acme"]);
        assert_eq!(
            selection.effective_selected_items().unwrap(),
            &["Acme".to_string()]
        );
        assert_eq!(selection.selection_indicator(), "1 items");

        selection.manifest_item_count = Some(4);
        assert_eq!(selection.selection_indicator(), "1 of 4");
    }

    #[test]
    fn test_unselected_indicator() {
        let selection = DataTypeSelection::unselected(DataType::Items);
        assert_eq!(selection.selection_indicator(), "-");
    }

    #[test]
    fn test_refresh_availability() {
        let temp_dir = TempDir::new().unwrap();
        let mut selection = DataTypeSelection::new(DataType::AttributeMap);

        selection.refresh_availability(temp_dir.path());
        assert!(!selection.is_available);

        std::fs::write(temp_dir.path().join("A.MAP"), b"map").unwrap();
        selection.refresh_availability(temp_dir.path());
        assert!(selection.is_available);
    }
}
