//! Cryptographic functions for SB Viewer
//!
//! PBKDF2-HMAC key derivation and AES-CBC decryption of the bundled
//! case-study envelopes, plus the matching encryptor used to build bundles
//! and test fixtures.

pub mod encryption;
pub mod key_derivation;
pub mod params;
pub mod secure_memory;

pub use encryption::{decrypt, decrypt_with_password, encrypt, encrypt_with_key, EncryptedEnvelope};
pub use key_derivation::{derive_key, DerivedKey};
pub use params::{EncryptionConfig, HashAlgorithm, KeySize};
pub use secure_memory::SecureString;
