//! File reading utilities for bundle resources
//!
//! Every read failure becomes a [`ViewerError::Fetch`] naming the file, so a
//! missing bundle is reported the same way however it is missing.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{ViewerError, ViewerResult};

fn resource_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read a bundle file as text, returning a fetch error if it doesn't exist
pub fn read_text<P: AsRef<Path>>(path: P) -> ViewerResult<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ViewerError::fetch(resource_name(path), "file not found"));
    }

    std::fs::read_to_string(path).map_err(|e| ViewerError::fetch(resource_name(path), e))
}

/// Read JSON from a bundle file, returning a fetch error if it doesn't exist
pub fn read_json_required<T, P>(path: P) -> ViewerResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(ViewerError::fetch(resource_name(path), "file not found"));
    }

    let file = File::open(path).map_err(|e| ViewerError::fetch(resource_name(path), e))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        ViewerError::fetch(resource_name(path), format!("malformed JSON: {}", e))
    })
}

/// Check if a JSON file exists and is valid
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if !path.exists() {
        return false;
    }

    if let Ok(file) = File::open(path) {
        let reader = BufReader::new(file);
        serde_json::from_reader::<_, serde_json::Value>(reader).is_ok()
    } else {
        false
    }
}
