//! Path management for SB Viewer
//!
//! ## Path Resolution Order
//!
//! Settings directory:
//! 1. `SB_VIEWER_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/sb-viewer` on Linux)
//!
//! Bundle directory:
//! 1. `--bundle` flag / `SB_VIEWER_BUNDLE`
//! 2. `bundle_dir` in the settings file
//! 3. `./data`

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ViewerError;

/// Environment variable overriding the settings directory
pub const CONFIG_DIR_ENV: &str = "SB_VIEWER_CONFIG_DIR";

/// Bundle directory used when nothing else is configured
pub const DEFAULT_BUNDLE_DIR: &str = "data";

/// Name of the public parameter file inside a bundle
pub const ENCRYPTION_CONFIG_FILE: &str = "encryption_config.json";

/// Manages the paths SB Viewer reads from
#[derive(Debug, Clone)]
pub struct ViewerPaths {
    /// Directory holding `config.json`
    config_dir: PathBuf,
}

impl ViewerPaths {
    /// Create a new ViewerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is unset.
    pub fn new() -> Result<Self, ViewerError> {
        let config_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "sb-viewer")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    ViewerError::Config("Could not determine a config directory".into())
                })?
        };

        Ok(Self { config_dir })
    }

    /// Create ViewerPaths with a custom directory (useful for testing)
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}

/// Pick the bundle directory from the flag, the settings, or the default
pub fn resolve_bundle_dir(flag: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    flag.or(configured)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BUNDLE_DIR))
}
