//! Datasets shipped in a bundle
//!
//! A bundle carries two separately encrypted datasets that share one
//! parameter file: the original daily ranking and the hourly-deduplicated
//! re-run.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// Views counted per raw page load
    #[default]
    Daily,
    /// Views deduplicated per user and hour
    Hourly,
}

impl Dataset {
    /// Encrypted case file name
    pub fn cases_file(&self) -> &'static str {
        match self {
            Self::Daily => "cases.encrypted",
            Self::Hourly => "hourly_cases.encrypted",
        }
    }

    /// Public overview file name
    pub fn metadata_file(&self) -> &'static str {
        match self {
            Self::Daily => "metadata.json",
            Self::Hourly => "hourly_metadata.json",
        }
    }

    /// Reduced top-20 table, only shipped for the hourly dataset
    pub fn top20_file(&self) -> Option<&'static str> {
        match self {
            Self::Daily => None,
            Self::Hourly => Some("hourly_top20.json"),
        }
    }

    /// The other dataset in the bundle
    pub fn other(&self) -> Self {
        match self {
            Self::Daily => Self::Hourly,
            Self::Hourly => Self::Daily,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily views"),
            Self::Hourly => write!(f, "Hourly dedup"),
        }
    }
}
