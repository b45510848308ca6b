//! Resolution of access tokens to signed-in users.
//!
//! Every protected use case starts here. The checks run in a fixed order so
//! clients always see the same failure for the same state:
//!
//! 1. no session for the token, or a forged token: `ATHR-001`;
//! 2. session signed out or past `expires_at`: `ATHR-002`;
//! 3. session owner no longer exists: `ATHR-001`.

use std::sync::Arc;

use mockable::Clock;
use tracing::debug;

use super::failures::{self, AuthAction};
use super::ports::{AccessTokenIssuer, SessionRepository, UserRepository};
use super::repository_errors::{map_session_error, map_user_error};
use super::{AccessToken, Error, User};

/// Resolves bearer tokens into the calling [`User`].
#[derive(Clone)]
pub struct Authorizer {
    sessions: Arc<dyn SessionRepository>,
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn AccessTokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl Authorizer {
    /// Create an authorizer over the given adapters.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn AccessTokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            users,
            tokens,
            clock,
        }
    }

    /// Return the caller behind `token`, or the failure for `action`.
    pub async fn authorize(&self, token: &AccessToken, action: AuthAction) -> Result<User, Error> {
        let session = self
            .sessions
            .get_session_by_token(token)
            .await
            .map_err(map_session_error)?
            .ok_or_else(failures::not_signed_in)?;

        let subject = self.tokens.verify(token).map_err(|err| {
            debug!(error = %err, "stored access token failed verification");
            failures::not_signed_in()
        })?;
        if subject != session.user_id {
            debug!(%subject, session_user = %session.user_id, "token subject mismatch");
            return Err(failures::not_signed_in());
        }

        if !session.is_active_at(self.clock.utc()) {
            return Err(failures::signed_out(action));
        }

        self.users
            .get_user_by_id(&session.user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(failures::not_signed_in)
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.utc()
    }
}
