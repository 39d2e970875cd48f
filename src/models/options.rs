//! Copy options
//!
//! Caller-constructed options for one copy operation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::data_type::DataType;
use super::selection::DataTypeSelection;

/// Options for a single copy operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Snapshot the target before copying
    pub create_backup: bool,

    /// Selections in the order files should be processed
    pub selected_data_types: Vec<DataTypeSelection>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            create_backup: true,
            selected_data_types: Vec::new(),
        }
    }
}

impl MergeOptions {
    /// Options copying the given selections with a backup
    pub fn new(selected_data_types: Vec<DataTypeSelection>) -> Self {
        Self {
            selected_data_types,
            ..Self::default()
        }
    }

    /// Options selecting every listed data type in full
    pub fn for_data_types<I>(data_types: I) -> Self
    where
        I: IntoIterator<Item = DataType>,
    {
        Self::new(data_types.into_iter().map(DataTypeSelection::new).collect())
    }

    /// Enable or disable the pre-copy backup
    pub fn with_backup(mut self, create_backup: bool) -> Self {
        self.create_backup = create_backup;
        self
    }

    /// Copied files only take effect after the host application restarts
    pub const fn requires_reload(&self) -> bool {
        true
    }

    /// Selections that are both selected and available, in caller order
    ///
    /// A data type listed more than once is yielded only for its first
    /// effective record.
    pub fn effective_selections(&self) -> impl Iterator<Item = &DataTypeSelection> {
        let mut seen = HashSet::new();
        self.selected_data_types
            .iter()
            .filter(|s| s.is_effective())
            .filter(move |s| seen.insert(s.data_type))
    }
}
