//! Driving port for signing in and out.
//!
//! Inbound adapters call it with decoded header values and never see the
//! session store or token signer behind it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, Error, LoginCredentials, UserId};

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub user_id: UserId,
    pub access_token: AccessToken,
    pub expires_at: DateTime<Utc>,
}

/// Domain use-case port for session lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials, then issue and record an access token.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SignedIn, Error>;

    /// Close the session for `token` and return its owner.
    async fn sign_out(&self, token: &AccessToken) -> Result<UserId, Error>;
}
