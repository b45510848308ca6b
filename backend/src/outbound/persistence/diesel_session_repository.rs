//! PostgreSQL-backed `SessionRepository` over the `user_auth` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{AccessToken, AuthSession, UserId};

use super::diesel_error_mapping::{StoreFailure, affected, classify};
use super::models::{NewUserAuthRow, UserAuthRow};
use super::pool::DbPool;
use super::schema::user_auth;

/// Diesel implementation of [`SessionRepository`].
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_port_error(failure: StoreFailure) -> SessionRepositoryError {
    match failure {
        StoreFailure::Connection(message) => SessionRepositoryError::connection(message),
        StoreFailure::Query(message) => SessionRepositoryError::query(message),
        StoreFailure::UniqueViolation { constraint }
        | StoreFailure::ForeignKeyViolation { constraint } => SessionRepositoryError::query(
            format!("constraint violated: {}", constraint.as_deref().unwrap_or("unknown")),
        ),
    }
}

fn row_to_session(row: UserAuthRow) -> AuthSession {
    AuthSession {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        token: AccessToken::new(row.access_token),
        login_at: row.login_at,
        expires_at: row.expires_at,
        logout_at: row.logout_at,
    }
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn create_session(&self, session: &AuthSession) -> Result<(), SessionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        let row = NewUserAuthRow {
            id: session.id,
            user_id: *session.user_id.as_uuid(),
            access_token: session.token.as_str(),
            login_at: session.login_at,
            expires_at: session.expires_at,
            logout_at: session.logout_at,
        };
        diesel::insert_into(user_auth::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| to_port_error(classify(err, "insert session")))
    }

    async fn get_session_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<AuthSession>, SessionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        let row = user_auth::table
            .filter(user_auth::access_token.eq(token.as_str()))
            .select(UserAuthRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| to_port_error(classify(err, "load session")))?;
        Ok(row.map(row_to_session))
    }

    async fn sign_out_session(
        &self,
        token: &AccessToken,
        at: DateTime<Utc>,
    ) -> Result<bool, SessionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        diesel::update(
            user_auth::table
                .filter(user_auth::access_token.eq(token.as_str()))
                .filter(user_auth::logout_at.is_null()),
        )
        .set(user_auth::logout_at.eq(Some(at)))
        .execute(&mut conn)
        .await
        .map(affected)
        .map_err(|err| to_port_error(classify(err, "sign out session")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    fn rows_keep_the_logout_stamp() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("date");
        let row = UserAuthRow {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            access_token: "jwt".to_owned(),
            login_at: at,
            expires_at: at + chrono::Duration::hours(8),
            logout_at: Some(at),
        };
        let session = row_to_session(row);
        assert!(session.is_signed_out());
        assert_eq!(session.token.as_str(), "jwt");
    }

    #[rstest]
    fn constraint_failures_become_query_errors() {
        let err = to_port_error(StoreFailure::ForeignKeyViolation { constraint: None });
        assert!(matches!(err, SessionRepositoryError::Query { .. }));
    }
}
