//! Driving port for administrative account removal.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, UserId};

/// Admin-only user management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAdminCommand: Send + Sync {
    /// Delete the user named by the `user_id` path segment when the token
    /// holder is a signed-in admin.
    ///
    /// Checks run in a fixed order: session present, session open, caller is
    /// admin, target exists. A segment that is not a UUID names no user.
    async fn delete_user(&self, token: &AccessToken, user_id: &str) -> Result<UserId, Error>;
}
