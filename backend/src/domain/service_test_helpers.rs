//! Shared builders for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use super::ports::{MockAccessTokenIssuer, MockSessionRepository, MockUserRepository};
use super::{
    AccessToken, AuthSession, Authorizer, EmailAddress, PasswordDigest, User, UserId,
    UserProfile, UserRole, Username,
};

pub(crate) const TOKEN: &str = "header.payload.signature";

pub(crate) fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) struct FixtureClock(pub DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock(fixture_now()))
}

pub(crate) fn token() -> AccessToken {
    AccessToken::new(TOKEN)
}

pub(crate) fn make_user(name: &str, role: UserRole) -> User {
    User {
        id: UserId::random(),
        username: Username::new(name).expect("user name"),
        email: EmailAddress::new(format!("{name}@example.com")).expect("email"),
        profile: UserProfile::new("Test", "User").expect("profile"),
        role,
        password_hash: PasswordDigest::new("$argon2id$fixture"),
        created_at: fixture_now() - Duration::days(30),
    }
}

pub(crate) fn open_session(user_id: &UserId) -> AuthSession {
    AuthSession::start(
        user_id.clone(),
        token(),
        fixture_now() - Duration::hours(1),
        fixture_now() + Duration::hours(7),
    )
}

/// Authorizer whose token resolves to `caller` with an open session.
pub(crate) fn authorizer_for(caller: &User) -> Authorizer {
    let session = open_session(&caller.id);
    let caller = caller.clone();

    let mut sessions = MockSessionRepository::new();
    sessions
        .expect_get_session_by_token()
        .returning(move |_| Ok(Some(session.clone())));

    let subject = caller.id.clone();
    let mut tokens = MockAccessTokenIssuer::new();
    tokens.expect_verify().returning(move |_| Ok(subject.clone()));

    let mut users = MockUserRepository::new();
    users
        .expect_get_user_by_id()
        .returning(move |_| Ok(Some(caller.clone())));

    Authorizer::new(
        Arc::new(sessions),
        Arc::new(users),
        Arc::new(tokens),
        fixture_clock(),
    )
}

/// Authorizer that has no session for any token.
pub(crate) fn anonymous_authorizer() -> Authorizer {
    let mut sessions = MockSessionRepository::new();
    sessions
        .expect_get_session_by_token()
        .returning(|_| Ok(None));
    Authorizer::new(
        Arc::new(sessions),
        Arc::new(MockUserRepository::new()),
        Arc::new(MockAccessTokenIssuer::new()),
        fixture_clock(),
    )
}
