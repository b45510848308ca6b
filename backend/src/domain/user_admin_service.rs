//! Profile lookup and administrative user deletion.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::failures::{self, AuthAction};
use super::ports::{UserAdminCommand, UserProfileQuery, UserRepository};
use super::repository_errors::map_user_error;
use super::{AccessToken, Authorizer, Error, User, UserId};

const NOT_ADMIN: &str = "Unauthorized Access, Entered user is not an admin";
const DELETE_TARGET_MISSING: &str = "User with entered uuid to be deleted does not exist";
const PROFILE_MISSING: &str = "User with entered uuid does not exist";

/// Service implementing [`UserProfileQuery`] and [`UserAdminCommand`].
#[derive(Clone)]
pub struct UserAdminService<U> {
    users: Arc<U>,
    authorizer: Authorizer,
}

impl<U> UserAdminService<U> {
    /// Create a new service.
    pub fn new(users: Arc<U>, authorizer: Authorizer) -> Self {
        Self { users, authorizer }
    }
}

#[async_trait]
impl<U> UserProfileQuery for UserAdminService<U>
where
    U: UserRepository,
{
    async fn fetch_profile(&self, token: &AccessToken, user_id: &str) -> Result<User, Error> {
        self.authorizer
            .authorize(token, AuthAction::ViewProfile)
            .await?;
        let user_id =
            UserId::new(user_id).map_err(|_| failures::user_not_found(PROFILE_MISSING))?;
        self.users
            .get_user_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| failures::user_not_found(PROFILE_MISSING))
    }
}

#[async_trait]
impl<U> UserAdminCommand for UserAdminService<U>
where
    U: UserRepository,
{
    async fn delete_user(&self, token: &AccessToken, user_id: &str) -> Result<UserId, Error> {
        let caller = self
            .authorizer
            .authorize(token, AuthAction::DeleteUser)
            .await?;
        if !caller.role.is_admin() {
            return Err(failures::not_permitted(NOT_ADMIN));
        }
        let user_id =
            UserId::new(user_id).map_err(|_| failures::user_not_found(DELETE_TARGET_MISSING))?;

        let deleted = self
            .users
            .delete_user(&user_id)
            .await
            .map_err(map_user_error)?;
        if !deleted {
            return Err(failures::user_not_found(DELETE_TARGET_MISSING));
        }

        info!(admin_id = %caller.id, %user_id, "user deleted by admin");
        Ok(user_id)
    }
}

#[cfg(test)]
#[path = "user_admin_service_tests.rs"]
mod tests;
