//! Tests for the account service.

use std::sync::Arc;

use chrono::Duration;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    IssuedToken, MockAccessTokenIssuer, MockPasswordHasher, MockSessionRepository,
    MockUserRepository, SessionRepositoryError,
};
use crate::domain::service_test_helpers::{
    fixture_clock, fixture_now, make_user, open_session, token,
};
use crate::domain::{EmailAddress, ErrorCode, PasswordDigest, UserProfile};

struct Doubles {
    users: MockUserRepository,
    sessions: MockSessionRepository,
    hasher: MockPasswordHasher,
    tokens: MockAccessTokenIssuer,
}

impl Doubles {
    fn build(self) -> AccountService<MockUserRepository, MockSessionRepository> {
        AccountService::new(
            Arc::new(self.users),
            Arc::new(self.sessions),
            Arc::new(self.hasher),
            Arc::new(self.tokens),
            fixture_clock(),
        )
    }
}

#[fixture]
fn doubles() -> Doubles {
    Doubles {
        users: MockUserRepository::new(),
        sessions: MockSessionRepository::new(),
        hasher: MockPasswordHasher::new(),
        tokens: MockAccessTokenIssuer::new(),
    }
}

#[fixture]
fn registration() -> Registration {
    Registration::new(
        Username::new("ada").expect("user name"),
        EmailAddress::new("ada@example.com").expect("email"),
        UserProfile::new("Ada", "Lovelace").expect("profile"),
        "s3cret",
    )
    .expect("registration")
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts("ada", password).expect("credentials")
}

#[rstest]
#[tokio::test]
async fn signup_creates_a_non_admin_with_hashed_password(
    mut doubles: Doubles,
    registration: Registration,
) {
    doubles
        .users
        .expect_get_user_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    doubles
        .users
        .expect_get_user_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    doubles
        .hasher
        .expect_hash()
        .withf(|password| password == "s3cret")
        .times(1)
        .return_once(|_| Ok(PasswordDigest::new("$argon2id$hashed")));
    doubles
        .users
        .expect_create_user()
        .withf(|user| {
            user.role == UserRole::NonAdmin
                && user.password_hash.as_ref() == "$argon2id$hashed"
                && user.username.as_ref() == "ada"
                && user.created_at == fixture_now()
        })
        .times(1)
        .return_once(|_| Ok(()));

    let id = doubles
        .build()
        .signup(registration)
        .await
        .expect("signup succeeds");
    assert!(!id.as_ref().is_empty());
}

#[rstest]
#[tokio::test]
async fn signup_rejects_a_taken_username(mut doubles: Doubles, registration: Registration) {
    doubles
        .users
        .expect_get_user_by_username()
        .return_once(|_| Ok(Some(make_user("ada", UserRole::NonAdmin))));
    doubles.users.expect_get_user_by_email().never();
    doubles.users.expect_create_user().never();

    let err = doubles
        .build()
        .signup(registration)
        .await
        .expect_err("taken");
    assert_eq!(err.failure_code(), Some("SGR-001"));
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn signup_rejects_a_taken_email(mut doubles: Doubles, registration: Registration) {
    doubles
        .users
        .expect_get_user_by_username()
        .return_once(|_| Ok(None));
    doubles
        .users
        .expect_get_user_by_email()
        .return_once(|_| Ok(Some(make_user("other", UserRole::NonAdmin))));
    doubles.users.expect_create_user().never();

    let err = doubles
        .build()
        .signup(registration)
        .await
        .expect_err("taken");
    assert_eq!(err.failure_code(), Some("SGR-002"));
}

#[rstest]
#[tokio::test]
async fn signup_maps_a_lost_unique_race(mut doubles: Doubles, registration: Registration) {
    doubles
        .users
        .expect_get_user_by_username()
        .return_once(|_| Ok(None));
    doubles
        .users
        .expect_get_user_by_email()
        .return_once(|_| Ok(None));
    doubles
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordDigest::new("h")));
    doubles
        .users
        .expect_create_user()
        .return_once(|_| Err(UserPersistenceError::duplicate_email("ada@example.com")));

    let err = doubles
        .build()
        .signup(registration)
        .await
        .expect_err("race lost");
    assert_eq!(err.failure_code(), Some("SGR-002"));
}

#[rstest]
#[tokio::test]
async fn sign_in_issues_and_records_a_token(mut doubles: Doubles) {
    let user = make_user("ada", UserRole::NonAdmin);
    let user_id = user.id.clone();
    let expires_at = fixture_now() + Duration::hours(8);

    doubles
        .users
        .expect_get_user_by_username()
        .return_once(move |_| Ok(Some(user)));
    doubles
        .hasher
        .expect_verify()
        .withf(|password, _| password == "s3cret")
        .return_once(|_, _| Ok(true));
    doubles
        .tokens
        .expect_issue()
        .withf(|_, issued_at| *issued_at == fixture_now())
        .return_once(move |_, _| {
            Ok(IssuedToken {
                token: token(),
                expires_at,
            })
        });
    let expected_user = user_id.clone();
    doubles
        .sessions
        .expect_create_session()
        .withf(move |session| {
            session.user_id == expected_user
                && session.token == token()
                && session.login_at == fixture_now()
                && session.logout_at.is_none()
        })
        .times(1)
        .return_once(|_| Ok(()));

    let signed_in = doubles
        .build()
        .sign_in(&credentials("s3cret"))
        .await
        .expect("sign in");
    assert_eq!(signed_in.user_id, user_id);
    assert_eq!(signed_in.access_token, token());
    assert_eq!(signed_in.expires_at, expires_at);
}

#[rstest]
#[tokio::test]
async fn sign_in_rejects_an_unknown_username(mut doubles: Doubles) {
    doubles
        .users
        .expect_get_user_by_username()
        .return_once(|_| Ok(None));
    doubles.hasher.expect_verify().never();

    let err = doubles
        .build()
        .sign_in(&credentials("s3cret"))
        .await
        .expect_err("unknown");
    assert_eq!(err.failure_code(), Some("ATH-001"));
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn sign_in_rejects_a_malformed_username_as_unknown(doubles: Doubles) {
    let creds = LoginCredentials::try_from_parts("not valid", "pw").expect("credentials");
    let err = doubles
        .build()
        .sign_in(&creds)
        .await
        .expect_err("unknown");
    assert_eq!(err.failure_code(), Some("ATH-001"));
}

#[rstest]
#[tokio::test]
async fn sign_in_rejects_a_wrong_password(mut doubles: Doubles) {
    doubles
        .users
        .expect_get_user_by_username()
        .return_once(|_| Ok(Some(make_user("ada", UserRole::NonAdmin))));
    doubles
        .hasher
        .expect_verify()
        .return_once(|_, _| Ok(false));
    doubles.tokens.expect_issue().never();
    doubles.sessions.expect_create_session().never();

    let err = doubles
        .build()
        .sign_in(&credentials("wrong"))
        .await
        .expect_err("bad password");
    assert_eq!(err.failure_code(), Some("ATH-002"));
    assert_eq!(err.message(), "Password failed");
}

#[rstest]
#[tokio::test]
async fn sign_out_closes_an_open_session(mut doubles: Doubles) {
    let user_id = UserId::random();
    let session = open_session(&user_id);
    doubles
        .sessions
        .expect_get_session_by_token()
        .return_once(move |_| Ok(Some(session)));
    doubles
        .sessions
        .expect_sign_out_session()
        .withf(|_, at| *at == fixture_now())
        .times(1)
        .return_once(|_, _| Ok(true));

    let owner = doubles
        .build()
        .sign_out(&token())
        .await
        .expect("signed out");
    assert_eq!(owner, user_id);
}

#[rstest]
#[tokio::test]
async fn sign_out_without_session_is_rejected(mut doubles: Doubles) {
    doubles
        .sessions
        .expect_get_session_by_token()
        .return_once(|_| Ok(None));

    let err = doubles
        .build()
        .sign_out(&token())
        .await
        .expect_err("no session");
    assert_eq!(err.failure_code(), Some("SGR-001"));
    assert_eq!(err.message(), "User is not Signed in");
}

#[rstest]
#[tokio::test]
async fn sign_out_twice_is_rejected(mut doubles: Doubles) {
    let mut session = open_session(&UserId::random());
    session.logout_at = Some(fixture_now());
    doubles
        .sessions
        .expect_get_session_by_token()
        .return_once(move |_| Ok(Some(session)));
    doubles.sessions.expect_sign_out_session().never();

    let err = doubles
        .build()
        .sign_out(&token())
        .await
        .expect_err("already out");
    assert_eq!(err.failure_code(), Some("SGR-001"));
}

#[rstest]
#[tokio::test]
async fn sign_out_surfaces_store_outages(mut doubles: Doubles) {
    doubles
        .sessions
        .expect_get_session_by_token()
        .return_once(|_| Err(SessionRepositoryError::connection("refused")));

    let err = doubles
        .build()
        .sign_out(&token())
        .await
        .expect_err("outage");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
