//! Bundle loader for SB Viewer
//!
//! A bundle is a directory of static files:
//!
//! - `encryption_config.json`: public PBKDF2/AES parameters
//! - `cases.encrypted`, `hourly_cases.encrypted`: base64 envelopes
//! - `metadata.json`, `hourly_metadata.json`, `hourly_top20.json`: public
//!   per-case overview

pub mod file_io;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::paths::ENCRYPTION_CONFIG_FILE;
use crate::crypto::{EncryptedEnvelope, EncryptionConfig};
use crate::error::ViewerResult;
use crate::models::{CaseSummary, Dataset};

pub use file_io::{json_file_valid, read_json_required, read_text};

/// Presence check for one bundle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub name: &'static str,
    pub present: bool,
    pub valid_json: bool,
}

/// Read-only view of a bundle directory
#[derive(Debug, Clone)]
pub struct Bundle {
    root: PathBuf,
}

impl Bundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file inside the bundle
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Load and validate the public encryption parameters
    pub fn load_config(&self) -> ViewerResult<EncryptionConfig> {
        let path = self.path(ENCRYPTION_CONFIG_FILE);
        debug!(path = %path.display(), "loading encryption config");
        let contents = read_text(&path)?;
        EncryptionConfig::from_json(&contents)
    }

    /// Load the encrypted envelope of a dataset
    pub fn load_envelope(&self, dataset: Dataset) -> ViewerResult<EncryptedEnvelope> {
        let path = self.path(dataset.cases_file());
        debug!(path = %path.display(), %dataset, "loading envelope");
        read_json_required(&path)
    }

    /// Whether the bundle ships an envelope for this dataset
    pub fn has_dataset(&self, dataset: Dataset) -> bool {
        self.path(dataset.cases_file()).exists()
    }

    /// Load the public overview of a dataset
    ///
    /// The hourly dataset falls back to its top-20 table when the full
    /// metadata file is absent.
    pub fn load_summaries(&self, dataset: Dataset) -> ViewerResult<Vec<CaseSummary>> {
        let metadata = self.path(dataset.metadata_file());
        let path = match dataset.top20_file() {
            Some(top20) if !metadata.exists() => self.path(top20),
            _ => metadata,
        };

        debug!(path = %path.display(), %dataset, "loading public overview");
        let mut summaries: Vec<CaseSummary> = read_json_required(&path)?;
        summaries.sort_by_key(|s| s.rank);
        Ok(summaries)
    }

    /// Presence and JSON validity of every file a bundle may contain
    pub fn inspect(&self) -> Vec<BundleFile> {
        let mut names = vec![ENCRYPTION_CONFIG_FILE];
        for dataset in [Dataset::Daily, Dataset::Hourly] {
            names.push(dataset.cases_file());
            names.push(dataset.metadata_file());
            if let Some(top20) = dataset.top20_file() {
                names.push(top20);
            }
        }

        names
            .into_iter()
            .map(|name| {
                let path = self.path(name);
                BundleFile {
                    name,
                    present: path.exists(),
                    valid_json: json_file_valid(&path),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewerError;
    use std::fs;
    use tempfile::TempDir;

    fn bundle_with_config(config: &str) -> (Bundle, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(ENCRYPTION_CONFIG_FILE), config).unwrap();
        (Bundle::new(temp_dir.path()), temp_dir)
    }

    #[test]
    fn test_load_config() {
        let (bundle, _temp) =
            bundle_with_config(r#"{"keySize": 256, "iterations": 100000, "hasher": "SHA256"}"#);
        let config = bundle.load_config().unwrap();
        assert_eq!(config.iterations, 100000);
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let (bundle, _temp) = bundle_with_config(r#"{"keySize": 256}"#);
        assert!(matches!(bundle.load_config(), Err(ViewerError::Config(_))));
    }

    #[test]
    fn test_missing_config_is_fetch_error() {
        let temp_dir = TempDir::new().unwrap();
        let bundle = Bundle::new(temp_dir.path());
        assert!(matches!(bundle.load_config(), Err(ViewerError::Fetch { .. })));
    }

    #[test]
    fn test_load_envelope() {
        let (bundle, temp) = bundle_with_config("{}");
        fs::write(
            temp.path().join("hourly_cases.encrypted"),
            r#"{"ciphertext": "AAAA", "iv": "BBBB", "salt": "CCCC"}"#,
        )
        .unwrap();

        assert!(bundle.has_dataset(Dataset::Hourly));
        assert!(!bundle.has_dataset(Dataset::Daily));
        let envelope = bundle.load_envelope(Dataset::Hourly).unwrap();
        assert_eq!(envelope.ciphertext, "AAAA");
    }

    #[test]
    fn test_summaries_sorted_and_top20_fallback() {
        let (bundle, temp) = bundle_with_config("{}");
        fs::write(
            temp.path().join("hourly_top20.json"),
            r#"[{"rank": 2, "title": "B"}, {"rank": 1, "title": "A"}]"#,
        )
        .unwrap();

        let summaries = bundle.load_summaries(Dataset::Hourly).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title, "A");

        assert!(bundle.load_summaries(Dataset::Daily).is_err());
    }

    #[test]
    fn test_inspect_lists_all_files() {
        let (bundle, _temp) = bundle_with_config(r#"{"keySize": 256, "iterations": 1}"#);
        let files = bundle.inspect();

        assert_eq!(files.len(), 6);
        assert!(files[0].present && files[0].valid_json);
        assert!(files.iter().skip(1).all(|f| !f.present));
    }
}
