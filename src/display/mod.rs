//! Display formatting for terminal output
//!
//! Plain-text tables for the registry, selections, backups, history and
//! saved records.

pub mod backups;
pub mod data_types;
pub mod history;
pub mod records;

pub use backups::{format_age, format_backup_list, format_size};
pub use data_types::{format_data_type_list, format_selection_list};
pub use history::format_history;
pub use records::{format_manifest, format_pending_cleanup};
