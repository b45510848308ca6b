//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccessTokenIssuer, AnswerCommand, AnswerQuery, AnswerRepository, LoginService,
    PasswordHasher, QuestionCommand, QuestionQuery, QuestionRepository, SessionRepository,
    SignupService, UserAdminCommand, UserProfileQuery, UserRepository,
};
use crate::domain::{AccountService, AnswerService, Authorizer, QuestionService, UserAdminService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub admin: Arc<dyn UserAdminCommand>,
    pub questions: Arc<dyn QuestionCommand>,
    pub questions_query: Arc<dyn QuestionQuery>,
    pub answers: Arc<dyn AnswerCommand>,
    pub answers_query: Arc<dyn AnswerQuery>,
}

/// Ports for the account endpoints.
#[derive(Clone)]
pub struct AccountPorts {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub admin: Arc<dyn UserAdminCommand>,
}

/// Ports for the question and answer endpoints.
#[derive(Clone)]
pub struct ContentPorts {
    pub questions: Arc<dyn QuestionCommand>,
    pub questions_query: Arc<dyn QuestionQuery>,
    pub answers: Arc<dyn AnswerCommand>,
    pub answers_query: Arc<dyn AnswerQuery>,
}

impl HttpState {
    /// Combine the account and content port bundles.
    ///
    /// Services that implement both halves of a command/query pair can be
    /// shared by cloning one `Arc` into both fields.
    pub fn new(accounts: AccountPorts, content: ContentPorts) -> Self {
        let AccountPorts {
            signup,
            login,
            profile,
            admin,
        } = accounts;
        let ContentPorts {
            questions,
            questions_query,
            answers,
            answers_query,
        } = content;
        Self {
            signup,
            login,
            profile,
            admin,
            questions,
            questions_query,
            answers,
            answers_query,
        }
    }
}

/// Driven adapters the domain services are built from.
pub struct Adapters<U, S, Q, A> {
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub questions: Arc<Q>,
    pub answers: Arc<A>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn AccessTokenIssuer>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Build every domain service over `adapters` and expose them as ports.
    pub fn from_adapters<U, S, Q, A>(adapters: Adapters<U, S, Q, A>) -> Self
    where
        U: UserRepository + 'static,
        S: SessionRepository + 'static,
        Q: QuestionRepository + 'static,
        A: AnswerRepository + 'static,
    {
        let Adapters {
            users,
            sessions,
            questions,
            answers,
            hasher,
            tokens,
            clock,
        } = adapters;

        let authorizer = Authorizer::new(
            sessions.clone(),
            users.clone(),
            tokens.clone(),
            clock.clone(),
        );
        let accounts = Arc::new(AccountService::new(
            users.clone(),
            sessions,
            hasher,
            tokens,
            clock,
        ));
        let admin = Arc::new(UserAdminService::new(users.clone(), authorizer.clone()));
        let question_service = Arc::new(QuestionService::new(
            questions.clone(),
            users,
            authorizer.clone(),
        ));
        let answer_service = Arc::new(AnswerService::new(answers, questions, authorizer));

        Self::new(
            AccountPorts {
                signup: accounts.clone(),
                login: accounts,
                profile: admin.clone(),
                admin,
            },
            ContentPorts {
                questions: question_service.clone(),
                questions_query: question_service,
                answers: answer_service.clone(),
                answers_query: answer_service,
            },
        )
    }
}
