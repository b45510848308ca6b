//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, UserId};

/// Registers new members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create a non-admin account and return its identifier.
    async fn signup(&self, registration: Registration) -> Result<UserId, Error>;
}
