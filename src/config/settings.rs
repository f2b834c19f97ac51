//! User settings for SB Viewer
//!
//! Display preferences and the default bundle location. The viewer never
//! writes this file; a missing file means defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ViewerPaths;
use crate::error::ViewerError;
use crate::models::Dataset;

/// User settings for SB Viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Bundle directory used when `--bundle` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_dir: Option<PathBuf>,

    /// Dataset shown when `--hourly` is not given
    #[serde(default)]
    pub default_dataset: Dataset,

    /// Width of the daily-view sparkline in columns
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,

    /// Number of comments shown in the case detail view
    #[serde(default = "default_comment_limit")]
    pub comment_limit: usize,

    /// Characters of post body shown before truncating
    #[serde(default = "default_body_preview_chars")]
    pub body_preview_chars: usize,

    /// Password prompts allowed per run in interactive mode
    #[serde(default = "default_max_unlock_attempts")]
    pub max_unlock_attempts: u32,
}

fn default_chart_width() -> usize {
    60
}

fn default_comment_limit() -> usize {
    10
}

fn default_body_preview_chars() -> usize {
    600
}

fn default_max_unlock_attempts() -> u32 {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bundle_dir: None,
            default_dataset: Dataset::default(),
            chart_width: default_chart_width(),
            comment_limit: default_comment_limit(),
            body_preview_chars: default_body_preview_chars(),
            max_unlock_attempts: default_max_unlock_attempts(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(paths: &ViewerPaths) -> Result<Self, ViewerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ViewerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ViewerError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ViewerError> {
        if self.chart_width == 0 {
            return Err(ViewerError::Config("chart_width must be at least 1".into()));
        }
        if self.max_unlock_attempts == 0 {
            return Err(ViewerError::Config(
                "max_unlock_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
