//! Diesel row structs.
//!
//! Internal to the persistence layer. Conversions into domain types live in
//! the repository that owns each table.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{answers, questions, user_auth, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub user_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub country: Option<&'a str>,
    pub about_me: Option<&'a str>,
    pub dob: Option<&'a str>,
    pub contact_number: Option<&'a str>,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_auth)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserAuthRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub access_token: String,
    pub login_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_auth)]
pub(crate) struct NewUserAuthRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub access_token: &'a str,
    pub login_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnswerRow {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub question_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Content is the only mutable column of a post.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = questions)]
pub(crate) struct QuestionUpdate<'a> {
    pub content: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = answers)]
pub(crate) struct AnswerUpdate<'a> {
    pub content: &'a str,
}
