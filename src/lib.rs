//! profile-merge - copy configuration data between application profiles
//!
//! A profile is a folder holding a `DATABASE` directory of data-type files
//! (price lists, vendors, layer maps and so on). This library copies a chosen
//! set of those files from one profile into another. The target is archived
//! first and restored automatically if the copy fails part-way.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `registry`: Fixed catalog of copyable data types
//! - `models`: Selections, options, results and manifest records
//! - `backup`: Zip snapshot, restore and retention
//! - `services`: Copy orchestration and post-restart cleanup
//! - `storage`: JSON persistence for manifests and pending cleanups
//! - `history`: Append-only log of copy runs
//! - `config`: Configuration and path management
//! - `cli` / `display`: Command handlers and terminal formatting
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! use profile_merge::backup::BackupManager;
//! use profile_merge::config::MergePaths;
//! use profile_merge::models::{DataType, MergeOptions, ProfileInfo};
//! use profile_merge::services::CopyService;
//!
//! let paths = MergePaths::new()?;
//! let source = ProfileInfo::from_data_directory("/profiles/Main/DATABASE");
//! let options = MergeOptions::for_data_types([DataType::PriceList, DataType::Vendors]);
//!
//! let result = CopyService::new(BackupManager::from_paths(&paths))
//!     .copy_data(Some(&source), Path::new("/profiles/Branch/DATABASE"), &options);
//! println!("{}", result.summary());
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod models;
pub mod registry;
pub mod services;
pub mod storage;

pub use error::{MergeError, MergeResult};
