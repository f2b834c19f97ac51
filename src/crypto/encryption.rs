//! AES-CBC encryption/decryption
//!
//! The bundle envelope carries base64 ciphertext, IV and salt. Ciphertext is
//! AES in CBC mode with PKCS#7 padding; the key width follows the derived key.
//! There is no authentication tag, so a successful unpad does not prove the
//! key was right.

use base64::{engine::general_purpose::STANDARD, Engine};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{ViewerError, ViewerResult};

use super::key_derivation::{derive_key, DerivedKey};
use super::params::{EncryptionConfig, KeySize};

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Size of the CBC initialization vector in bytes
pub const IV_SIZE: usize = 16;

/// Size of the salt generated by [`encrypt`]
pub const SALT_SIZE: usize = 16;

/// Ciphertext plus the IV and salt needed to decrypt it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// The encrypted, padded payload (base64 encoded)
    pub ciphertext: String,
    /// CBC initialization vector (base64 encoded)
    pub iv: String,
    /// PBKDF2 salt (base64 encoded)
    pub salt: String,
}

impl EncryptedEnvelope {
    /// Create an envelope from raw bytes
    pub fn new(ciphertext: &[u8], iv: &[u8], salt: &[u8]) -> Self {
        Self {
            ciphertext: STANDARD.encode(ciphertext),
            iv: STANDARD.encode(iv),
            salt: STANDARD.encode(salt),
        }
    }

    /// Decode the ciphertext from base64
    pub fn decode_ciphertext(&self) -> ViewerResult<Vec<u8>> {
        STANDARD.decode(self.ciphertext.trim()).map_err(|e| {
            ViewerError::Encryption(format!("Invalid ciphertext encoding: {}", e))
        })
    }

    /// Decode the IV from base64
    pub fn decode_iv(&self) -> ViewerResult<Vec<u8>> {
        STANDARD
            .decode(self.iv.trim())
            .map_err(|e| ViewerError::Encryption(format!("Invalid IV encoding: {}", e)))
    }

    /// Decode the salt from base64
    pub fn decode_salt(&self) -> ViewerResult<Vec<u8>> {
        STANDARD
            .decode(self.salt.trim())
            .map_err(|e| ViewerError::Encryption(format!("Invalid salt encoding: {}", e)))
    }
}

macro_rules! cbc_decrypt {
    ($cipher:ty, $key:expr, $iv:expr, $data:expr) => {
        cbc::Decryptor::<$cipher>::new_from_slices($key, $iv)
            .map_err(|e| ViewerError::Encryption(format!("Failed to create cipher: {}", e)))?
            .decrypt_padded_vec_mut::<Pkcs7>($data)
            .map_err(|_| ViewerError::Encryption("Decryption failed: invalid padding".to_string()))
    };
}

macro_rules! cbc_encrypt {
    ($cipher:ty, $key:expr, $iv:expr, $data:expr) => {
        cbc::Encryptor::<$cipher>::new_from_slices($key, $iv)
            .map_err(|e| ViewerError::Encryption(format!("Failed to create cipher: {}", e)))?
            .encrypt_padded_vec_mut::<Pkcs7>($data)
    };
}

fn key_size_of(key: &DerivedKey) -> ViewerResult<KeySize> {
    key.key_size().ok_or_else(|| {
        ViewerError::Encryption(format!("Invalid key length: {} bytes", key.as_bytes().len()))
    })
}

/// Decrypt an envelope with an already derived key
///
/// Fails on malformed base64, a wrong-sized IV, ciphertext that is not a
/// whole number of blocks, or invalid padding.
pub fn decrypt(envelope: &EncryptedEnvelope, key: &DerivedKey) -> ViewerResult<Vec<u8>> {
    let iv = envelope.decode_iv()?;
    if iv.len() != IV_SIZE {
        return Err(ViewerError::Encryption(format!(
            "Invalid IV size: expected {}, got {}",
            IV_SIZE,
            iv.len()
        )));
    }

    let ciphertext = envelope.decode_ciphertext()?;
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(ViewerError::Encryption(format!(
            "Invalid ciphertext length: {} bytes",
            ciphertext.len()
        )));
    }

    let key_bytes = key.as_bytes();
    match key_size_of(key)? {
        KeySize::Aes128 => cbc_decrypt!(aes::Aes128, key_bytes, &iv, &ciphertext),
        KeySize::Aes192 => cbc_decrypt!(aes::Aes192, key_bytes, &iv, &ciphertext),
        KeySize::Aes256 => cbc_decrypt!(aes::Aes256, key_bytes, &iv, &ciphertext),
    }
}

/// Derive the key from the envelope's salt and decrypt in one step
pub fn decrypt_with_password(
    envelope: &EncryptedEnvelope,
    password: &str,
    config: &EncryptionConfig,
) -> ViewerResult<Vec<u8>> {
    let salt = envelope.decode_salt()?;
    let key = derive_key(password, &salt, config)?;
    decrypt(envelope, &key)
}

/// Encrypt with a given key and IV
pub fn encrypt_with_key(
    plaintext: &[u8],
    key: &DerivedKey,
    iv: &[u8; IV_SIZE],
    salt: &[u8],
) -> ViewerResult<EncryptedEnvelope> {
    let key_bytes = key.as_bytes();
    let ciphertext = match key_size_of(key)? {
        KeySize::Aes128 => cbc_encrypt!(aes::Aes128, key_bytes, iv, plaintext),
        KeySize::Aes192 => cbc_encrypt!(aes::Aes192, key_bytes, iv, plaintext),
        KeySize::Aes256 => cbc_encrypt!(aes::Aes256, key_bytes, iv, plaintext),
    };

    Ok(EncryptedEnvelope::new(&ciphertext, iv, salt))
}

/// Seal plaintext with a password, the inverse of [`decrypt_with_password`]
///
/// Generates a fresh random salt and IV for every call.
pub fn encrypt(
    plaintext: &[u8],
    password: &str,
    config: &EncryptionConfig,
) -> ViewerResult<EncryptedEnvelope> {
    let mut salt = [0u8; SALT_SIZE];
    let mut iv = [0u8; IV_SIZE];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut iv);

    let key = derive_key(password, &salt, config)?;
    encrypt_with_key(plaintext, &key, &iv, &salt)
}
