//! Signup, sign-in, and sign-out.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use super::failures;
use super::ports::{
    AccessTokenIssuer, LoginService, PasswordHasher, SessionRepository, SignedIn, SignupService,
    UserPersistenceError, UserRepository,
};
use super::repository_errors::{map_session_error, map_user_error};
use super::{
    AccessToken, AuthSession, Error, LoginCredentials, Registration, User, UserId, UserRole,
    Username,
};

/// Account lifecycle service implementing [`SignupService`] and
/// [`LoginService`].
#[derive(Clone)]
pub struct AccountService<U, S> {
    users: Arc<U>,
    sessions: Arc<S>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn AccessTokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl<U, S> AccountService<U, S> {
    /// Create a new service with the given adapters.
    pub fn new(
        users: Arc<U>,
        sessions: Arc<S>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn AccessTokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            tokens,
            clock,
        }
    }
}

fn map_create_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateUsername { .. } => failures::username_taken(),
        UserPersistenceError::DuplicateEmail { .. } => failures::email_taken(),
        other => map_user_error(other),
    }
}

#[async_trait]
impl<U, S> SignupService for AccountService<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    async fn signup(&self, registration: Registration) -> Result<UserId, Error> {
        if self
            .users
            .get_user_by_username(&registration.username)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(failures::username_taken());
        }
        if self
            .users
            .get_user_by_email(&registration.email)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(failures::email_taken());
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(|err| Error::internal(err.to_string()))?;

        let user = User {
            id: UserId::random(),
            username: registration.username.clone(),
            email: registration.email.clone(),
            profile: registration.profile.clone(),
            role: UserRole::NonAdmin,
            password_hash,
            created_at: self.clock.utc(),
        };
        // A concurrent signup can still win the unique constraint.
        self.users
            .create_user(&user)
            .await
            .map_err(map_create_error)?;

        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user.id)
    }
}

#[async_trait]
impl<U, S> LoginService for AccountService<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SignedIn, Error> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(failures::unknown_username());
        };
        let user = self
            .users
            .get_user_by_username(&username)
            .await
            .map_err(map_user_error)?
            .ok_or_else(failures::unknown_username)?;

        let matches = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .map_err(|err| Error::internal(err.to_string()))?;
        if !matches {
            debug!(user_id = %user.id, "password mismatch");
            return Err(failures::password_failed());
        }

        let now = self.clock.utc();
        let issued = self
            .tokens
            .issue(&user.id, now)
            .map_err(|err| Error::internal(err.to_string()))?;
        let session = AuthSession::start(user.id.clone(), issued.token.clone(), now, issued.expires_at);
        self.sessions
            .create_session(&session)
            .await
            .map_err(map_session_error)?;

        info!(user_id = %user.id, expires_at = %issued.expires_at, "user signed in");
        Ok(SignedIn {
            user_id: user.id,
            access_token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<UserId, Error> {
        let session = self
            .sessions
            .get_session_by_token(token)
            .await
            .map_err(map_session_error)?
            .filter(|session| !session.is_signed_out())
            .ok_or_else(failures::signout_without_session)?;

        let closed = self
            .sessions
            .sign_out_session(token, self.clock.utc())
            .await
            .map_err(map_session_error)?;
        if !closed {
            return Err(failures::signout_without_session());
        }

        info!(user_id = %session.user_id, "user signed out");
        Ok(session.user_id)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
