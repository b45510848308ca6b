//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::domain::ports::{
    MockAnswerCommand, MockAnswerQuery, MockLoginService, MockQuestionCommand, MockQuestionQuery,
    MockSignupService, MockUserAdminCommand, MockUserProfileQuery,
};
use crate::domain::{
    EmailAddress, PasswordDigest, User, UserId, UserProfile, UserRole, Username,
};

use super::state::{AccountPorts, ContentPorts, HttpState};

/// Driving-port mocks with no expectations set.
///
/// Tests configure only the ports the handler under test touches; a call to
/// any other port panics.
#[derive(Default)]
pub struct MockPorts {
    pub signup: MockSignupService,
    pub login: MockLoginService,
    pub profile: MockUserProfileQuery,
    pub admin: MockUserAdminCommand,
    pub questions: MockQuestionCommand,
    pub questions_query: MockQuestionQuery,
    pub answers: MockAnswerCommand,
    pub answers_query: MockAnswerQuery,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            AccountPorts {
                signup: Arc::new(self.signup),
                login: Arc::new(self.login),
                profile: Arc::new(self.profile),
                admin: Arc::new(self.admin),
            },
            ContentPorts {
                questions: Arc::new(self.questions),
                questions_query: Arc::new(self.questions_query),
                answers: Arc::new(self.answers),
                answers_query: Arc::new(self.answers_query),
            },
        ))
    }

    /// App with every route mounted over these mocks.
    pub fn into_app(
        self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.into_state())
            .configure(super::configure)
    }
}

pub const BEARER: &str = "Bearer header.payload.signature";

pub fn sample_user(name: &str) -> User {
    User {
        id: UserId::random(),
        username: Username::new(name).expect("user name"),
        email: EmailAddress::new(format!("{name}@example.com")).expect("email"),
        profile: UserProfile::new("Ada", "Lovelace")
            .expect("profile")
            .with_details(Some("UK".to_owned()), None, None, None)
            .expect("details"),
        role: UserRole::NonAdmin,
        password_hash: PasswordDigest::new("$argon2id$fixture"),
        created_at: Utc
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("timestamp"),
    }
}

/// Read a JSON response body.
pub async fn json_body(res: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_web::test::read_body(res).await;
    serde_json::from_slice(&body).expect("json body")
}

/// Quora failure code carried in an error body.
pub fn failure_code(body: &Value) -> Option<&str> {
    body.get("details")
        .and_then(|d| d.get("code"))
        .and_then(Value::as_str)
}
