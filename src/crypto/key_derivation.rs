//! Key derivation using PBKDF2-HMAC
//!
//! Derives AES keys from the viewer password and the envelope's salt. The
//! hash function, iteration count and key width come from the bundle's
//! public parameter file.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::error::{ViewerError, ViewerResult};

use super::params::{EncryptionConfig, HashAlgorithm, KeySize};

/// A derived encryption key, zeroed on drop
pub struct DerivedKey {
    key: Zeroizing<Vec<u8>>,
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// AES key width of this key
    pub fn key_size(&self) -> Option<KeySize> {
        KeySize::from_len(self.key.len())
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("len", &self.key.len())
            .finish()
    }
}

/// Derive an encryption key from a password and salt
pub fn derive_key(
    password: &str,
    salt: &[u8],
    config: &EncryptionConfig,
) -> ViewerResult<DerivedKey> {
    let key_size = config.validate()?;

    if salt.is_empty() {
        return Err(ViewerError::Encryption("Salt must not be empty".to_string()));
    }

    let mut key = Zeroizing::new(vec![0u8; key_size.bytes()]);
    let rounds = config.iterations;

    match config.hasher {
        HashAlgorithm::Sha1 => pbkdf2_hmac::<Sha1>(password.as_bytes(), salt, rounds, &mut key),
        HashAlgorithm::Sha224 => pbkdf2_hmac::<Sha224>(password.as_bytes(), salt, rounds, &mut key),
        HashAlgorithm::Sha256 => pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut key),
        HashAlgorithm::Sha384 => pbkdf2_hmac::<Sha384>(password.as_bytes(), salt, rounds, &mut key),
        HashAlgorithm::Sha512 => pbkdf2_hmac::<Sha512>(password.as_bytes(), salt, rounds, &mut key),
    }

    Ok(DerivedKey { key })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(iterations: u32) -> EncryptionConfig {
        EncryptionConfig::new(256, iterations, HashAlgorithm::Sha256)
    }

    #[test]
    fn test_known_vector_sha256() {
        // PBKDF2-HMAC-SHA256("password", "salt", 1, 32)
        let key = derive_key("password", b"salt", &config(1)).unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn test_known_vector_two_rounds() {
        // PBKDF2-HMAC-SHA256("password", "salt", 2, 32)
        let key = derive_key("password", b"salt", &config(2)).unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
        );
    }

    #[test]
    fn test_known_vector_sha1() {
        // PBKDF2-HMAC-SHA1("password", "salt", 1), first 16 bytes
        let config = EncryptionConfig::new(128, 1, HashAlgorithm::Sha1);
        let key = derive_key("password", b"salt", &config).unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "0c60c80f961f0e71f3a9b524af601206"
        );
    }

    #[test]
    fn test_same_inputs_same_key() {
        let salt = [7u8; 16];
        let key1 = derive_key("ASTHMAPOSTS", &salt, &config(10)).unwrap();
        let key2 = derive_key("ASTHMAPOSTS", &salt, &config(10)).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let salt = [7u8; 16];
        let key1 = derive_key("passphrase1", &salt, &config(10)).unwrap();
        let key2 = derive_key("passphrase2", &salt, &config(10)).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("same", &[1u8; 16], &config(10)).unwrap();
        let key2 = derive_key("same", &[2u8; 16], &config(10)).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_key_length_follows_config() {
        let config = EncryptionConfig::new(128, 3, HashAlgorithm::Sha512);
        let key = derive_key("pw", b"salty", &config).unwrap();
        assert_eq!(key.as_bytes().len(), 16);
        assert_eq!(key.key_size(), Some(KeySize::Aes128));
    }

    #[test]
    fn test_hasher_changes_key() {
        let sha256 = EncryptionConfig::new(256, 3, HashAlgorithm::Sha256);
        let sha384 = EncryptionConfig::new(256, 3, HashAlgorithm::Sha384);
        let key1 = derive_key("pw", b"salt", &sha256).unwrap();
        let key2 = derive_key("pw", b"salt", &sha384).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_salt_rejected() {
        assert!(derive_key("pw", b"", &config(1)).is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = derive_key("pw", b"salt", &config(0)).unwrap_err();
        assert!(matches!(err, ViewerError::Config(_)));
    }

    #[test]
    fn test_debug_hides_key() {
        let key = derive_key("pw", b"salt", &config(1)).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("len"));
        assert!(!debug.contains("120f"));
    }
}
