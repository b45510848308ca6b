//! Diesel table definitions.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Unique login name (`users_user_name_key`).
        user_name -> Varchar,
        /// Unique, lower-cased (`users_email_key`).
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
        country -> Nullable<Varchar>,
        about_me -> Nullable<Text>,
        dob -> Nullable<Varchar>,
        contact_number -> Nullable<Varchar>,
        /// `admin` or `nonadmin`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per issued access token.
    user_auth (id) {
        id -> Uuid,
        user_id -> Uuid,
        access_token -> Text,
        login_at -> Timestamptz,
        expires_at -> Timestamptz,
        logout_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    questions (id) {
        id -> Uuid,
        content -> Varchar,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    answers (id) {
        id -> Uuid,
        content -> Text,
        user_id -> Uuid,
        question_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_auth -> users (user_id));
diesel::joinable!(questions -> users (user_id));
diesel::joinable!(answers -> questions (question_id));

diesel::allow_tables_to_appear_in_same_query!(users, user_auth, questions, answers);
