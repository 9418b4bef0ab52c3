//! Credential verification.
//!
//! The [`Authenticator`] trait is the seam where a real backend client would
//! plug in. [`SimulatedAuthenticator`] stands in for it: it sleeps for a
//! fixed latency and applies a placeholder rule.

use std::time::Duration;

use async_trait::async_trait;

use super::error::AuthError;
use crate::config::AuthSettings;

/// Verifies a pair of credentials.
///
/// Implementations must not block the runtime; network-backed
/// implementations should await their I/O.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns `Ok(())` if the credentials are accepted.
    async fn authenticate(&self, email: &str, password: &str) -> Result<(), AuthError>;
}

/// Placeholder validation rule.
///
/// Accepts any non-empty email together with a password of at least
/// `min_password_len` UTF-16 code units, the way a browser measures string
/// length. This is NOT credential verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    pub min_password_len: usize,
}

impl CredentialPolicy {
    pub fn accepts(&self, email: &str, password: &str) -> bool {
        !email.is_empty() && password.encode_utf16().count() >= self.min_password_len
    }
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_password_len: 6,
        }
    }
}

/// Local stand-in for a login API call.
#[derive(Debug, Clone)]
pub struct SimulatedAuthenticator {
    latency: Duration,
    policy: CredentialPolicy,
}

impl SimulatedAuthenticator {
    pub fn new(latency: Duration, policy: CredentialPolicy) -> Self {
        Self { latency, policy }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.simulated_latency(),
            CredentialPolicy {
                min_password_len: settings.min_password_len,
            },
        )
    }
}

impl Default for SimulatedAuthenticator {
    fn default() -> Self {
        Self::from_settings(&AuthSettings::default())
    }
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Result<(), AuthError> {
        tokio::time::sleep(self.latency).await;

        if self.policy.accepts(email, password) {
            Ok(())
        } else {
            tracing::debug!(email = %email, "Simulated authenticator rejected credentials");
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rules() {
        let policy = CredentialPolicy::default();
        assert!(policy.accepts("a@b.com", "secret1"));
        assert!(policy.accepts("a@b.com", "sixsix"));
        assert!(policy.accepts("not-an-email", "secret1"));
        assert!(!policy.accepts("a@b.com", "short"));
        assert!(!policy.accepts("", "secret1"));
        assert!(!policy.accepts("", ""));
    }

    #[test]
    fn test_policy_counts_utf16_units() {
        let policy = CredentialPolicy::default();
        // 5 units, 10 bytes
        assert!(!policy.accepts("a@b.com", "ééééé"));
        assert!(policy.accepts("a@b.com", "éééééé"));
        // astral characters are surrogate pairs: 3 characters, 6 units
        assert!(policy.accepts("a@b.com", "😀😀😀"));
        assert!(!policy.accepts("a@b.com", "😀😀"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_configured_latency() {
        let auth = SimulatedAuthenticator::default();
        let started = tokio::time::Instant::now();

        auth.authenticate("a@b.com", "secret1").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejects_short_password() {
        let auth = SimulatedAuthenticator::default();
        let err = auth.authenticate("a@b.com", "short").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
