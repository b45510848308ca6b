//! In-memory adapters for integration tests.
//!
//! Compiled for unit tests and behind the `test-support` feature so the
//! end-to-end suites in `tests/` can drive the real domain services and HTTP
//! handlers without PostgreSQL. [`InMemoryStore`] mirrors the relational
//! constraints the Diesel adapters rely on: unique user names, emails, and
//! tokens, foreign keys on insert, and cascading deletes.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    AnswerRepository, AnswerRepositoryError, PasswordHasher, QuestionRepository,
    QuestionRepositoryError, SessionRepository, SessionRepositoryError, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    AccessToken, Answer, AnswerId, AuthSession, EmailAddress, Question, QuestionId, User, UserId,
    UserProfile, UserRole, Username,
};
use crate::inbound::http::state::{Adapters, HttpState};
use crate::outbound::security::{Argon2PasswordHasher, JwtAccessTokens};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    sessions: Vec<AuthSession>,
    questions: Vec<Question>,
    answers: Vec<Answer>,
}

/// Shared in-memory tables implementing every repository port.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, Tables>> {
        self.tables.lock().ok()
    }

    /// Number of stored sessions, open or closed.
    pub fn session_count(&self) -> usize {
        self.lock().map_or(0, |t| t.sessions.len())
    }

    /// Number of stored answers across all questions.
    pub fn answer_count(&self) -> usize {
        self.lock().map_or(0, |t| t.answers.len())
    }

    /// Number of stored questions.
    pub fn question_count(&self) -> usize {
        self.lock().map_or(0, |t| t.questions.len())
    }
}

fn ordered<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by_key(key);
    rows
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(UserPersistenceError::duplicate_username(user.username.as_ref()));
        }
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(tables.users.iter().find(|u| &u.id == id).cloned())
    }

    async fn get_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(tables.users.iter().find(|u| &u.username == username).cloned())
    }

    async fn get_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(tables.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn delete_user(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut tables = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        let before = tables.users.len();
        tables.users.retain(|u| &u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }
        let Tables {
            sessions,
            questions,
            answers,
            ..
        } = &mut *tables;
        sessions.retain(|s| &s.user_id != id);
        questions.retain(|q| &q.owner != id);
        answers.retain(|a| &a.owner != id && questions.iter().any(|q| q.id == a.question_id));
        Ok(true)
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn create_session(&self, session: &AuthSession) -> Result<(), SessionRepositoryError> {
        let mut tables = self.lock().ok_or_else(|| SessionRepositoryError::query(POISONED))?;
        if !tables.users.iter().any(|u| u.id == session.user_id) {
            return Err(SessionRepositoryError::query("user_auth_user_id_fkey"));
        }
        if tables.sessions.iter().any(|s| s.token == session.token) {
            return Err(SessionRepositoryError::query("user_auth_access_token_key"));
        }
        tables.sessions.push(session.clone());
        Ok(())
    }

    async fn get_session_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<AuthSession>, SessionRepositoryError> {
        let tables = self.lock().ok_or_else(|| SessionRepositoryError::query(POISONED))?;
        Ok(tables.sessions.iter().find(|s| &s.token == token).cloned())
    }

    async fn sign_out_session(
        &self,
        token: &AccessToken,
        at: DateTime<Utc>,
    ) -> Result<bool, SessionRepositoryError> {
        let mut tables = self.lock().ok_or_else(|| SessionRepositoryError::query(POISONED))?;
        match tables
            .sessions
            .iter_mut()
            .find(|s| &s.token == token && s.logout_at.is_none())
        {
            Some(session) => {
                session.logout_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn create_question(&self, question: &Question) -> Result<Question, QuestionRepositoryError> {
        let mut tables = self.lock().ok_or_else(|| QuestionRepositoryError::query(POISONED))?;
        if !tables.users.iter().any(|u| u.id == question.owner) {
            return Err(QuestionRepositoryError::missing_reference("questions_user_id_fkey"));
        }
        tables.questions.push(question.clone());
        Ok(question.clone())
    }

    async fn get_question_by_id(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let tables = self.lock().ok_or_else(|| QuestionRepositoryError::query(POISONED))?;
        Ok(tables.questions.iter().find(|q| &q.id == id).cloned())
    }

    async fn edit_question(&self, question: &Question) -> Result<Question, QuestionRepositoryError> {
        let mut tables = self.lock().ok_or_else(|| QuestionRepositoryError::query(POISONED))?;
        let stored = tables
            .questions
            .iter_mut()
            .find(|q| q.id == question.id)
            .ok_or_else(|| QuestionRepositoryError::not_found(question.id.to_string()))?;
        stored.content = question.content.clone();
        Ok(stored.clone())
    }

    async fn delete_question_by_uuid(&self, id: &QuestionId) -> Result<usize, QuestionRepositoryError> {
        let mut tables = self.lock().ok_or_else(|| QuestionRepositoryError::query(POISONED))?;
        let before = tables.questions.len();
        tables.questions.retain(|q| &q.id != id);
        let deleted = before - tables.questions.len();
        tables.answers.retain(|a| &a.question_id != id);
        Ok(deleted)
    }

    async fn get_all_questions(&self) -> Result<Vec<Question>, QuestionRepositoryError> {
        let tables = self.lock().ok_or_else(|| QuestionRepositoryError::query(POISONED))?;
        Ok(ordered(tables.questions.clone(), |q| {
            (q.created_at, *q.id.as_uuid())
        }))
    }

    async fn get_all_questions_by_user(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let tables = self.lock().ok_or_else(|| QuestionRepositoryError::query(POISONED))?;
        let rows = tables
            .questions
            .iter()
            .filter(|q| &q.owner == owner)
            .cloned()
            .collect();
        Ok(ordered(rows, |q: &Question| (q.created_at, *q.id.as_uuid())))
    }
}

#[async_trait]
impl AnswerRepository for InMemoryStore {
    async fn create_answer(&self, answer: &Answer) -> Result<Answer, AnswerRepositoryError> {
        let mut tables = self.lock().ok_or_else(|| AnswerRepositoryError::query(POISONED))?;
        if !tables.questions.iter().any(|q| q.id == answer.question_id) {
            return Err(AnswerRepositoryError::missing_reference("answers_question_id_fkey"));
        }
        if !tables.users.iter().any(|u| u.id == answer.owner) {
            return Err(AnswerRepositoryError::missing_reference("answers_user_id_fkey"));
        }
        tables.answers.push(answer.clone());
        Ok(answer.clone())
    }

    async fn get_answer_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerRepositoryError> {
        let tables = self.lock().ok_or_else(|| AnswerRepositoryError::query(POISONED))?;
        Ok(tables.answers.iter().find(|a| &a.id == id).cloned())
    }

    async fn edit_answer(&self, answer: &Answer) -> Result<Answer, AnswerRepositoryError> {
        let mut tables = self.lock().ok_or_else(|| AnswerRepositoryError::query(POISONED))?;
        let stored = tables
            .answers
            .iter_mut()
            .find(|a| a.id == answer.id)
            .ok_or_else(|| AnswerRepositoryError::not_found(answer.id.to_string()))?;
        stored.content = answer.content.clone();
        Ok(stored.clone())
    }

    async fn delete_answer_by_uuid(&self, id: &AnswerId) -> Result<usize, AnswerRepositoryError> {
        let mut tables = self.lock().ok_or_else(|| AnswerRepositoryError::query(POISONED))?;
        let before = tables.answers.len();
        tables.answers.retain(|a| &a.id != id);
        Ok(before - tables.answers.len())
    }

    async fn get_all_answers_to_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        let tables = self.lock().ok_or_else(|| AnswerRepositoryError::query(POISONED))?;
        let rows = tables
            .answers
            .iter()
            .filter(|a| &a.question_id == question_id)
            .cloned()
            .collect();
        Ok(ordered(rows, |a: &Answer| (a.created_at, *a.id.as_uuid())))
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
                .single()
                .unwrap_or_else(Utc::now),
        )
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.lock().map_or_else(|_| Utc::now(), |now| *now)
    }
}

/// Token lifetime used by [`TestBackend`].
pub const TEST_TOKEN_TTL_HOURS: i64 = 8;

/// Real domain services over [`InMemoryStore`], cheap Argon2 costs, and a
/// [`ManualClock`].
pub struct TestBackend {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<ManualClock>,
    hasher: Arc<Argon2PasswordHasher>,
    state: HttpState,
}

impl TestBackend {
    /// Assemble the backend.
    ///
    /// # Panics
    /// Panics if the fixed Argon2 test costs are rejected.
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(ManualClock::default());
        let hasher = Arc::new(
            Argon2PasswordHasher::with_costs(8, 1, 1).expect("test argon2 costs are valid"),
        );
        let state = HttpState::from_adapters(Adapters {
            users: store.clone(),
            sessions: store.clone(),
            questions: store.clone(),
            answers: store.clone(),
            hasher: hasher.clone(),
            tokens: Arc::new(JwtAccessTokens::new(
                &[7_u8; 64],
                Duration::hours(TEST_TOKEN_TTL_HOURS),
            )),
            clock: clock.clone(),
        });
        Self {
            store,
            clock,
            hasher,
            state,
        }
    }

    /// Handler state for `App::app_data`.
    pub fn http_state(&self) -> HttpState {
        self.state.clone()
    }

    /// Insert an admin directly; signup only ever creates members.
    ///
    /// # Panics
    /// Panics on invalid fixture input.
    pub async fn seed_admin(&self, username: &str, password: &str) -> UserId {
        let user = User {
            id: UserId::random(),
            username: Username::new(username).expect("admin user name"),
            email: EmailAddress::new(format!("{username}@example.com")).expect("admin email"),
            profile: UserProfile::new("Site", "Admin").expect("admin profile"),
            role: UserRole::Admin,
            password_hash: self.hasher.hash(password).expect("hash admin password"),
            created_at: self.clock.utc(),
        };
        let id = user.id.clone();
        self.store.create_user(&user).await.expect("seed admin");
        id
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}
