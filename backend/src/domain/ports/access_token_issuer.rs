//! Port for minting and verifying signed access tokens.

use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum AccessTokenError {
        /// The token could not be signed.
        Signing { message: String } => "access token signing failed: {message}",
        /// The token is malformed, forged, or names an invalid subject.
        Invalid { message: String } => "access token rejected: {message}",
    }
}

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: AccessToken,
    pub expires_at: DateTime<Utc>,
}

/// Signs tokens for authenticated users.
///
/// Verification checks the signature and extracts the subject only. Expiry is
/// decided by the session record against the service clock.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokenIssuer: Send + Sync {
    /// Sign a token for `user_id` issued at `issued_at`.
    fn issue(
        &self,
        user_id: &UserId,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AccessTokenError>;

    /// Verify a token's signature and return its subject.
    fn verify(&self, token: &AccessToken) -> Result<UserId, AccessTokenError>;
}
