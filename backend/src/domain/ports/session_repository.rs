//! Port for persisted sign-in sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, AuthSession};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session repository adapters.
    pub enum SessionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "session repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "session repository query failed: {message}",
    }
}

/// Storage of issued access tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Record a newly issued token.
    async fn create_session(&self, session: &AuthSession) -> Result<(), SessionRepositoryError>;

    /// Look up the session for a token.
    async fn get_session_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<AuthSession>, SessionRepositoryError>;

    /// Stamp `logout_at` on a session that is not yet signed out.
    ///
    /// Returns `false` when no open session matched.
    async fn sign_out_session(
        &self,
        token: &AccessToken,
        at: DateTime<Utc>,
    ) -> Result<bool, SessionRepositoryError>;
}
