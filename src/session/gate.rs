//! Unlock state machine
//!
//! `Locked -> Verifying -> Unlocked | Locked(error)`. Unlocking takes
//! `&mut self`, so a second submission cannot start while one is being
//! verified. `Unlocked` is terminal.

use tracing::{info, warn};

use crate::bundle::Bundle;
use crate::crypto::SecureString;
use crate::error::{ViewerError, ViewerResult};
use crate::models::Dataset;

use super::validator::open_envelope;
use super::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Waiting for a password; carries the message of the last failure
    Locked { last_error: Option<String> },
    Verifying,
    Unlocked,
}

/// Guards a bundle until a password opens its primary dataset
#[derive(Debug)]
pub struct UnlockGate {
    bundle: Bundle,
    dataset: Dataset,
    state: GateState,
    attempts: u32,
}

impl UnlockGate {
    pub fn new(bundle: Bundle, dataset: Dataset) -> Self {
        Self {
            bundle,
            dataset,
            state: GateState::Locked { last_error: None },
            attempts: 0,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Number of passwords submitted so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    /// Try a password against the primary dataset
    ///
    /// Bundle and configuration errors are returned as they are; anything
    /// that goes wrong after key derivation is [`ViewerError::IncorrectPassword`].
    pub fn unlock(&mut self, password: SecureString) -> ViewerResult<Session> {
        if self.is_unlocked() {
            return Err(ViewerError::AlreadyUnlocked);
        }

        self.state = GateState::Verifying;
        self.attempts += 1;

        let outcome = self.bundle.load_config().and_then(|config| {
            let envelope = self.bundle.load_envelope(self.dataset)?;
            let cases = open_envelope(&envelope, &password, &config)?;
            Ok((config, cases))
        });

        match outcome {
            Ok((config, cases)) => {
                info!(
                    dataset = %self.dataset,
                    cases = cases.len(),
                    attempt = self.attempts,
                    "bundle unlocked"
                );
                self.state = GateState::Unlocked;
                Ok(Session::new(
                    self.bundle.clone(),
                    config,
                    password,
                    self.dataset,
                    cases,
                ))
            }
            Err(err) => {
                warn!(dataset = %self.dataset, attempt = self.attempts, error = %err, "unlock failed");
                self.state = GateState::Locked {
                    last_error: Some(err.to_string()),
                };
                Err(err)
            }
        }
    }
}
