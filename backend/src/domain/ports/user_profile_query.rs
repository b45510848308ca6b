//! Driving port for reading another member's profile.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, User};

/// Domain use-case port for profile lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the account named by the `user_id` path segment on behalf of
    /// the token holder.
    async fn fetch_profile(&self, token: &AccessToken, user_id: &str) -> Result<User, Error>;
}
