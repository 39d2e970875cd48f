//! Service layer for profile-merge
//!
//! The copy service runs the backup-and-copy transaction; the cleanup service
//! applies the post-restart half of a selective copy.

pub mod cleanup;
pub mod copy;
pub mod progress;

pub use cleanup::{CleanupReport, CleanupService, ItemStore};
pub use copy::CopyService;
pub use progress::{ProgressCallback, ProgressUpdate};
