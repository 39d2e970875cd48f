//! Configuration module for profile-merge
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::MergePaths;
pub use settings::Settings;
