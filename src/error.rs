//! Custom error types for SB Viewer
//!
//! This module defines the error hierarchy for the viewer using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for SB Viewer operations
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Configuration-related errors (malformed or unsupported parameters)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A bundle file could not be read
    #[error("Failed to load {resource}: {reason}")]
    Fetch { resource: String, reason: String },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Low-level encryption/decryption errors
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// The dataset could not be unlocked with the supplied password.
    ///
    /// Covers wrong passwords and corrupted envelopes alike.
    #[error("Incorrect password")]
    IncorrectPassword,

    /// The gate has already produced a session
    #[error("Dataset is already unlocked")]
    AlreadyUnlocked,
}

impl ViewerError {
    /// Create a fetch error for a bundle resource
    pub fn fetch(resource: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a "not found" error for cases
    pub fn case_not_found(rank: u32) -> Self {
        Self::NotFound {
            entity_type: "Case",
            identifier: format!("rank {}", rank),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error means the password was rejected
    pub fn is_incorrect_password(&self) -> bool {
        matches!(self, Self::IncorrectPassword)
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for SB Viewer operations
pub type ViewerResult<T> = Result<T, ViewerError>;
