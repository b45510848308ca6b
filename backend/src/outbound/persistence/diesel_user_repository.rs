//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, PasswordDigest, User, UserId, UserProfile, UserRole, UserValidationError,
    Username,
};

use super::diesel_error_mapping::{StoreFailure, affected, classify};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

const USER_NAME_KEY: &str = "users_user_name_key";
const EMAIL_KEY: &str = "users_email_key";

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find(&self, lookup: Lookup<'_>) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into(), None))?;
        let query = users::table.select(UserRow::as_select()).into_boxed();
        let (query, operation) = match lookup {
            Lookup::Id(id) => (query.filter(users::id.eq(*id.as_uuid())), "load user by id"),
            Lookup::Name(name) => (
                query.filter(users::user_name.eq(name.as_ref().to_owned())),
                "load user by name",
            ),
            Lookup::Email(email) => (
                query.filter(users::email.eq(email.as_ref().to_owned())),
                "load user by email",
            ),
        };
        let row = query
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| to_port_error(classify(err, operation), None))?;
        row.map(row_to_user).transpose()
    }
}

enum Lookup<'a> {
    Id(&'a UserId),
    Name(&'a Username),
    Email(&'a EmailAddress),
}

fn to_port_error(failure: StoreFailure, user: Option<&User>) -> UserPersistenceError {
    if let Some(user) = user {
        if failure.violates(USER_NAME_KEY) {
            return UserPersistenceError::duplicate_username(user.username.as_ref());
        }
        if failure.violates(EMAIL_KEY) {
            return UserPersistenceError::duplicate_email(user.email.as_ref());
        }
    }
    match failure {
        StoreFailure::Connection(message) => UserPersistenceError::connection(message),
        StoreFailure::UniqueViolation { constraint } | StoreFailure::ForeignKeyViolation { constraint } => {
            UserPersistenceError::query(format!(
                "constraint violated: {}",
                constraint.as_deref().unwrap_or("unknown")
            ))
        }
        StoreFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn corrupt(id: uuid::Uuid, err: UserValidationError) -> UserPersistenceError {
    UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    let profile = UserProfile::new(row.first_name, row.last_name)
        .and_then(|profile| {
            profile.with_details(row.country, row.about_me, row.dob, row.contact_number)
        })
        .map_err(|err| corrupt(id, err))?;
    Ok(User {
        id: UserId::from_uuid(id),
        username: Username::new(row.user_name).map_err(|err| corrupt(id, err))?,
        email: EmailAddress::new(row.email).map_err(|err| corrupt(id, err))?,
        profile,
        role: row
            .role
            .parse::<UserRole>()
            .map_err(|err| corrupt(id, err))?,
        password_hash: PasswordDigest::new(row.password_hash),
        created_at: row.created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into(), None))?;
        let profile = &user.profile;
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            first_name: &profile.first_name,
            last_name: &profile.last_name,
            user_name: user.username.as_ref(),
            email: user.email.as_ref(),
            password_hash: user.password_hash.as_ref(),
            country: profile.country.as_deref(),
            about_me: profile.about_me.as_deref(),
            dob: profile.dob.as_deref(),
            contact_number: profile.contact_number.as_deref(),
            role: user.role.as_str(),
            created_at: user.created_at,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| to_port_error(classify(err, "insert user"), Some(user)))
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.find(Lookup::Id(id)).await
    }

    async fn get_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.find(Lookup::Name(username)).await
    }

    async fn get_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.find(Lookup::Email(email)).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into(), None))?;
        diesel::delete(users::table.filter(users::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map(affected)
            .map_err(|err| to_port_error(classify(err, "delete user"), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> UserRow {
        UserRow {
            id: uuid::Uuid::new_v4(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            user_name: "ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password_hash: "$argon2id$v=19$stub".to_owned(),
            country: Some("UK".to_owned()),
            about_me: None,
            dob: Some(" ".to_owned()),
            contact_number: None,
            role: "admin".to_owned(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("date"),
        }
    }

    #[rstest]
    fn rows_convert_to_users(row: UserRow) {
        let id = row.id;
        let user = row_to_user(row).expect("valid row");
        assert_eq!(user.id.as_uuid(), &id);
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.profile.country.as_deref(), Some("UK"));
        assert_eq!(user.profile.dob, None);
    }

    #[rstest]
    fn unknown_roles_are_query_errors(mut row: UserRow) {
        row.role = "superuser".to_owned();
        let err = row_to_user(row).expect_err("bad role");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    #[case(USER_NAME_KEY, true)]
    #[case(EMAIL_KEY, false)]
    fn unique_violations_name_the_taken_field(
        row: UserRow,
        #[case] constraint: &str,
        #[case] is_username: bool,
    ) {
        let user = row_to_user(row).expect("valid row");
        let failure = StoreFailure::UniqueViolation {
            constraint: Some(constraint.to_owned()),
        };
        let err = to_port_error(failure, Some(&user));
        if is_username {
            assert_eq!(err, UserPersistenceError::duplicate_username("ada"));
        } else {
            assert_eq!(err, UserPersistenceError::duplicate_email("ada@example.com"));
        }
    }

    #[rstest]
    fn connection_failures_stay_connection_failures() {
        let err = to_port_error(StoreFailure::Connection("down".to_owned()), None);
        assert_eq!(err, UserPersistenceError::connection("down"));
    }
}
