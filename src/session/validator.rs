//! Plaintext validation
//!
//! CBC has no authentication tag, so the only evidence that the password was
//! right is that the plaintext decodes as UTF-8 and parses as the case
//! schema. Every failure past the configuration check is reported as
//! [`ViewerError::IncorrectPassword`], whether the password was wrong or the
//! envelope was corrupted.

use tracing::debug;

use crate::crypto::{decrypt_with_password, EncryptedEnvelope, EncryptionConfig};
use crate::error::{ViewerError, ViewerResult};
use crate::models::CaseRecord;

/// Decode plaintext bytes into case records sorted by rank
pub fn validate_plaintext(plaintext: &[u8]) -> ViewerResult<Vec<CaseRecord>> {
    let text = std::str::from_utf8(plaintext)
        .map_err(|e| ViewerError::Validation(format!("Plaintext is not UTF-8: {}", e)))?;

    let mut cases: Vec<CaseRecord> = serde_json::from_str(text)?;
    cases.sort_by_key(|c| c.rank);
    Ok(cases)
}

fn reject(stage: &'static str, err: ViewerError) -> ViewerError {
    match err {
        ViewerError::Config(_) => err,
        _ => {
            debug!(stage, "envelope rejected");
            ViewerError::IncorrectPassword
        }
    }
}

/// Decrypt an envelope and validate its contents
///
/// Configuration errors stay fatal; everything else means the password is
/// not accepted.
pub fn open_envelope(
    envelope: &EncryptedEnvelope,
    password: &str,
    config: &EncryptionConfig,
) -> ViewerResult<Vec<CaseRecord>> {
    let plaintext = decrypt_with_password(envelope, password, config)
        .map_err(|e| reject("decrypt", e))?;
    validate_plaintext(&plaintext).map_err(|e| reject("parse", e))
}
