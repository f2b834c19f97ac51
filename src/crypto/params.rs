//! Public encryption parameters
//!
//! The bundle ships an unencrypted `encryption_config.json` describing how
//! the envelope was sealed. Only the salt and IV live in the envelope itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ViewerError, ViewerResult};

/// The only block mode the bundle format uses
pub const SUPPORTED_ALGORITHM: &str = "AES-CBC";

/// Hash function driving the PBKDF2 HMAC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HashAlgorithm {
    /// CryptoJS's PBKDF2 default
    Sha1,
    Sha224,
    /// Default when the parameter file omits `hasher`
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Parse a hasher name, ignoring case and `-`/`_` separators
    /// ("SHA256", "sha-256" and "Sha_256" are equivalent)
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "SHA1" => Some(Self::Sha1),
            "SHA224" => Some(Self::Sha224),
            "SHA256" => Some(Self::Sha256),
            "SHA384" => Some(Self::Sha384),
            "SHA512" => Some(Self::Sha512),
            _ => None,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => write!(f, "SHA1"),
            Self::Sha224 => write!(f, "SHA224"),
            Self::Sha256 => write!(f, "SHA256"),
            Self::Sha384 => write!(f, "SHA384"),
            Self::Sha512 => write!(f, "SHA512"),
        }
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = ViewerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
            .ok_or_else(|| ViewerError::Config(format!("Unsupported hasher: {}", value)))
    }
}

impl From<HashAlgorithm> for String {
    fn from(value: HashAlgorithm) -> Self {
        value.to_string()
    }
}

/// AES key width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Map a bit count from the parameter file
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            128 => Some(Self::Aes128),
            192 => Some(Self::Aes192),
            256 => Some(Self::Aes256),
            _ => None,
        }
    }

    /// Map a raw key length in bytes
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(Self::Aes128),
            24 => Some(Self::Aes192),
            32 => Some(Self::Aes256),
            _ => None,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            Self::Aes128 => 128,
            Self::Aes192 => 192,
            Self::Aes256 => 256,
        }
    }

    pub fn bytes(&self) -> usize {
        self.bits() as usize / 8
    }
}

/// Parameters read from `encryption_config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionConfig {
    /// Derived key size in bits
    pub key_size: u32,

    /// PBKDF2 iteration count
    pub iterations: u32,

    /// PBKDF2 hash function
    #[serde(default)]
    pub hasher: HashAlgorithm,

    /// Cipher and mode; informational, must be AES-CBC when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
}

impl EncryptionConfig {
    /// Create a config for AES-CBC with the given parameters
    pub fn new(key_size: u32, iterations: u32, hasher: HashAlgorithm) -> Self {
        Self {
            key_size,
            iterations,
            hasher,
            algorithm: Some(SUPPORTED_ALGORITHM.to_string()),
        }
    }

    /// Parse and validate a parameter file's contents
    ///
    /// Missing `keySize` or `iterations` is a configuration error.
    pub fn from_json(contents: &str) -> ViewerResult<Self> {
        let config: EncryptionConfig = serde_json::from_str(contents).map_err(|e| {
            ViewerError::Config(format!("Failed to parse encryption config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the parameters and return the AES key width they select
    pub fn validate(&self) -> ViewerResult<KeySize> {
        if self.iterations == 0 {
            return Err(ViewerError::Config(
                "PBKDF2 iterations must be at least 1".to_string(),
            ));
        }

        if let Some(ref algorithm) = self.algorithm {
            if !algorithm.eq_ignore_ascii_case(SUPPORTED_ALGORITHM) {
                return Err(ViewerError::Config(format!(
                    "Unsupported algorithm: {} (expected {})",
                    algorithm, SUPPORTED_ALGORITHM
                )));
            }
        }

        KeySize::from_bits(self.key_size).ok_or_else(|| {
            ViewerError::Config(format!(
                "Unsupported key size: {} bits (expected 128, 192 or 256)",
                self.key_size
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bundle_config() {
        let json = r#"{"iterations": 10000, "keySize": 256, "algorithm": "AES-CBC"}"#;
        let config = EncryptionConfig::from_json(json).unwrap();
        assert_eq!(config.iterations, 10000);
        assert_eq!(config.key_size, 256);
        assert_eq!(config.hasher, HashAlgorithm::Sha256);
    }

    #[test]
    fn test_parse_with_hasher() {
        let json = r#"{"keySize": 128, "iterations": 5, "hasher": "sha-512"}"#;
        let config = EncryptionConfig::from_json(json).unwrap();
        assert_eq!(config.hasher, HashAlgorithm::Sha512);
        assert_eq!(config.validate().unwrap(), KeySize::Aes128);
    }

    #[test]
    fn test_parse_sha1_hasher() {
        let json = r#"{"keySize": 256, "iterations": 1000, "hasher": "SHA1"}"#;
        let config = EncryptionConfig::from_json(json).unwrap();
        assert_eq!(config.hasher, HashAlgorithm::Sha1);
        assert_eq!(HashAlgorithm::parse("sha-1"), Some(HashAlgorithm::Sha1));
        assert_eq!(config.hasher.to_string(), "SHA1");
    }

    #[test]
    fn test_missing_iterations_is_config_error() {
        let err = EncryptionConfig::from_json(r#"{"keySize": 256}"#).unwrap_err();
        assert!(matches!(err, ViewerError::Config(_)));
    }

    #[test]
    fn test_missing_key_size_is_config_error() {
        let err = EncryptionConfig::from_json(r#"{"iterations": 10}"#).unwrap_err();
        assert!(matches!(err, ViewerError::Config(_)));
    }

    #[test]
    fn test_unsupported_hasher() {
        let err =
            EncryptionConfig::from_json(r#"{"keySize": 256, "iterations": 1, "hasher": "MD5"}"#)
                .unwrap_err();
        assert!(err.to_string().contains("MD5"));
    }

    #[test]
    fn test_unsupported_key_size() {
        let config = EncryptionConfig::new(512, 1, HashAlgorithm::Sha256);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = EncryptionConfig::new(256, 0, HashAlgorithm::Sha256);
        assert!(matches!(config.validate(), Err(ViewerError::Config(_))));
    }

    #[test]
    fn test_wrong_algorithm_rejected() {
        let json = r#"{"keySize": 256, "iterations": 1, "algorithm": "AES-GCM"}"#;
        assert!(EncryptionConfig::from_json(json).is_err());
    }

    #[test]
    fn test_hasher_serializes_as_name() {
        let config = EncryptionConfig::new(256, 100000, HashAlgorithm::Sha256);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["hasher"], "SHA256");
        assert_eq!(json["keySize"], 256);
    }

    #[test]
    fn test_key_size_lengths() {
        assert_eq!(KeySize::Aes256.bytes(), 32);
        assert_eq!(KeySize::from_len(24), Some(KeySize::Aes192));
        assert_eq!(KeySize::from_len(20), None);
    }
}
