//! SB Viewer - password-gated viewer for Sleeping Beauty case studies
//!
//! A bundle ships a ranked set of forum case studies (posts that stayed
//! dormant and later woke up) encrypted with a shared password. This library
//! derives the key, decrypts and validates the cases, and formats them for
//! the terminal.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings and path management
//! - `error`: Custom error types
//! - `crypto`: PBKDF2 key derivation and AES-CBC decryption
//! - `bundle`: Reading the public and encrypted bundle files
//! - `models`: Case records, summaries and mechanism classification
//! - `session`: The unlock gate and the unlocked session
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use sbviewer::bundle::Bundle;
//! use sbviewer::crypto::SecureString;
//! use sbviewer::models::Dataset;
//! use sbviewer::session::UnlockGate;
//!
//! let mut gate = UnlockGate::new(Bundle::new("data"), Dataset::Daily);
//! let mut session = gate.unlock(SecureString::new("password"))?;
//! let cases = session.cases(Dataset::Daily)?;
//! ```

pub mod bundle;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod session;

pub use error::{ViewerError, ViewerResult};
