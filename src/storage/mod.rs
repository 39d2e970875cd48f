//! Storage layer for profile-merge
//!
//! Persists the selective-copy bookkeeping records (manifests and the pending
//! cleanup) as JSON files with atomic writes.

pub mod file_io;
pub mod records;

pub use file_io::{discard_record, import_record, load_record, save_record};
pub use records::{ManifestStore, PendingCleanupStore};
