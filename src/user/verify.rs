//! Credential comparison strategy.
//!
//! Authentication delegates the actual password check to a pluggable
//! [`CredentialVerifier`] so the handler does not care how credentials are
//! compared. The default strategy is bcrypt verification plus the banned-flag
//! check.

use tracing::warn;

use super::model::User;

/// Strategy for deciding whether a password authenticates a user.
pub trait CredentialVerifier: Send + Sync {
    /// Return true iff `password` authenticates `user`.
    fn verify(&self, user: &User, password: &str) -> bool;
}

/// Default verifier: bcrypt comparison, banned users always fail.
pub struct BcryptVerifier;

impl CredentialVerifier for BcryptVerifier {
    fn verify(&self, user: &User, password: &str) -> bool {
        if user.banned {
            return false;
        }

        match bcrypt::verify(password, &user.password_hash) {
            Ok(matches) => matches,
            Err(err) => {
                // A stored hash that bcrypt cannot parse is a data problem,
                // but from the client's view it is just a failed login.
                warn!("password verification error for {}: {}", user.email, err);
                false
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
