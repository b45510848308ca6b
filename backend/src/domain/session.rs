//! Persisted sign-in sessions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{AccessToken, UserId};

/// Record of an issued access token.
///
/// A session stays usable until it is signed out or `expires_at` passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub id: Uuid,
    pub user_id: UserId,
    pub token: AccessToken,
    pub login_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    /// Start a new session for `user_id`.
    pub fn start(
        user_id: UserId,
        token: AccessToken,
        login_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            login_at,
            expires_at,
            logout_at: None,
        }
    }

    /// Whether the user explicitly signed out.
    pub fn is_signed_out(&self) -> bool {
        self.logout_at.is_some()
    }

    /// Whether the token lifetime has elapsed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the session still authorises requests at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_signed_out() && !self.is_expired_at(now)
    }
}
