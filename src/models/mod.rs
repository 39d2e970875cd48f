//! Core data models for profile-merge
//!
//! Data type identities and descriptors, per-session selection records,
//! copy options and results, and the manifest records used by selective copy.

pub mod data_type;
pub mod manifest;
pub mod options;
pub mod profile;
pub mod result;
pub mod selection;

pub use data_type::{DataType, DataTypeDescriptor, DataTypeGroup};
pub use manifest::{ManifestItem, PendingCleanup, ProfileManifest};
pub use options::MergeOptions;
pub use profile::ProfileInfo;
pub use result::{CopyResult, Recovery};
pub use selection::DataTypeSelection;
