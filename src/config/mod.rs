//! Configuration module for SB Viewer
//!
//! This module provides configuration management including:
//! - Settings directory and bundle path resolution
//! - User display preferences

pub mod paths;
pub mod settings;

pub use paths::{resolve_bundle_dir, ViewerPaths};
pub use settings::Settings;
