//! Password entry
//!
//! A password given on the command line or in the environment gets exactly
//! one attempt. Without one the user is prompted with hidden input and may
//! retry until the configured attempt limit.

use tracing::debug;

use crate::bundle::Bundle;
use crate::crypto::SecureString;
use crate::error::{ViewerError, ViewerResult};
use crate::models::Dataset;
use crate::session::{Session, UnlockGate};

/// Where the password comes from
pub enum PasswordSource {
    /// `--password` or `SB_VIEWER_PASSWORD`
    Provided(SecureString),
    /// Hidden terminal prompt
    Prompt { max_attempts: u32 },
}

impl PasswordSource {
    pub fn new(provided: Option<String>, max_attempts: u32) -> Self {
        match provided {
            Some(password) => Self::Provided(SecureString::from(password)),
            None => Self::Prompt { max_attempts },
        }
    }
}

/// Unlock a bundle with `dataset` as the primary dataset
pub fn open_session(bundle: Bundle, dataset: Dataset, source: PasswordSource) -> ViewerResult<Session> {
    let mut gate = UnlockGate::new(bundle, dataset);

    match source {
        PasswordSource::Provided(password) => {
            debug!("using provided password");
            gate.unlock(password)
        }
        PasswordSource::Prompt { max_attempts } => {
            unlock_interactive(&mut gate, max_attempts, || prompt_password("Password: "))
        }
    }
}

/// Keep asking for a password while it is rejected and attempts remain
///
/// Only [`ViewerError::IncorrectPassword`] is retried; a missing bundle or
/// broken configuration ends the loop at once.
pub fn unlock_interactive<F>(
    gate: &mut UnlockGate,
    max_attempts: u32,
    mut prompt: F,
) -> ViewerResult<Session>
where
    F: FnMut() -> ViewerResult<SecureString>,
{
    let max_attempts = max_attempts.max(1);

    loop {
        let password = prompt()?;
        match gate.unlock(password) {
            Ok(session) => return Ok(session),
            Err(e) if e.is_incorrect_password() && gate.attempts() < max_attempts => {
                eprintln!("{}. Try again ({} of {}).", e, gate.attempts(), max_attempts);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> ViewerResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| ViewerError::Io(format!("Failed to read password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::{full_bundle, PASSWORD};

    fn scripted(passwords: &[&'static str]) -> impl FnMut() -> ViewerResult<SecureString> {
        let mut queue = passwords.to_vec().into_iter();
        move || {
            queue
                .next()
                .map(SecureString::new)
                .ok_or_else(|| ViewerError::Io("no more input".to_string()))
        }
    }

    #[test]
    fn test_provided_password_single_attempt() {
        let (bundle, _temp) = full_bundle();
        let err = open_session(
            bundle.clone(),
            Dataset::Daily,
            PasswordSource::new(Some("wrong".to_string()), 3),
        )
        .err()
        .unwrap();
        assert!(err.is_incorrect_password());

        let session = open_session(
            bundle,
            Dataset::Daily,
            PasswordSource::new(Some(PASSWORD.to_string()), 3),
        )
        .unwrap();
        assert_eq!(session.primary_dataset(), Dataset::Daily);
    }

    #[test]
    fn test_interactive_retries_until_correct() {
        let (bundle, _temp) = full_bundle();
        let mut gate = UnlockGate::new(bundle, Dataset::Daily);

        let session = unlock_interactive(&mut gate, 3, scripted(&["nope", "still no", PASSWORD]));
        assert!(session.is_ok());
        assert_eq!(gate.attempts(), 3);
    }

    #[test]
    fn test_interactive_gives_up_after_limit() {
        let (bundle, _temp) = full_bundle();
        let mut gate = UnlockGate::new(bundle, Dataset::Daily);

        let err = unlock_interactive(&mut gate, 2, scripted(&["a", "b", PASSWORD]))
            .err()
            .unwrap();
        assert!(err.is_incorrect_password());
        assert_eq!(gate.attempts(), 2);
    }

    #[test]
    fn test_interactive_stops_on_fetch_error() {
        let (bundle, temp) = full_bundle();
        std::fs::remove_file(temp.path().join(Dataset::Daily.cases_file())).unwrap();
        let mut gate = UnlockGate::new(bundle, Dataset::Daily);

        let err = unlock_interactive(&mut gate, 3, scripted(&["a", "b", "c"]))
            .err()
            .unwrap();
        assert!(matches!(err, ViewerError::Fetch { .. }));
        assert_eq!(gate.attempts(), 1);
    }
}
