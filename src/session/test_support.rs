//! Encrypted bundle fixtures shared by session tests

use std::fs;

use tempfile::TempDir;

use crate::bundle::Bundle;
use crate::config::paths::ENCRYPTION_CONFIG_FILE;
use crate::crypto::{encrypt, EncryptionConfig, HashAlgorithm};
use crate::models::Dataset;

pub const PASSWORD: &str = "ASTHMAPOSTS";

pub const DAILY_CASES: &str = r#"[
    {"rank": 2, "title": "Inhaler questions", "mechanism": "Comment revival", "comments": [{"user_id": "u1", "body": "bump", "date": "2020-01-01"}]},
    {"rank": 1, "title": "Night cough", "mechanism": "Prince post", "prince_post": {"post_id": 9, "title": "Linking back"}},
    {"rank": 3, "title": "Spacer tips", "mechanism": "Prince post"}
]"#;

pub const HOURLY_CASES: &str = r#"[{"rank": 1, "title": "Hourly case", "mechanism": "Seasonal"}]"#;

pub fn config() -> EncryptionConfig {
    EncryptionConfig::new(256, 10, HashAlgorithm::Sha256)
}

fn write_dataset(temp: &TempDir, dataset: Dataset, plaintext: &str) {
    let envelope = encrypt(plaintext.as_bytes(), PASSWORD, &config()).unwrap();
    fs::write(
        temp.path().join(dataset.cases_file()),
        serde_json::to_string(&envelope).unwrap(),
    )
    .unwrap();
}

/// Bundle with both datasets encrypted under [`PASSWORD`]
pub fn full_bundle() -> (Bundle, TempDir) {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(ENCRYPTION_CONFIG_FILE),
        serde_json::to_string(&config()).unwrap(),
    )
    .unwrap();
    write_dataset(&temp, Dataset::Daily, DAILY_CASES);
    write_dataset(&temp, Dataset::Hourly, HOURLY_CASES);
    (Bundle::new(temp.path()), temp)
}
