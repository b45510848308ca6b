//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing, token signing) are implemented by
//! outbound adapters. Driving ports (commands and queries) are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod access_token_issuer;
mod answer_command;
mod answer_query;
mod answer_repository;
mod login_service;
mod password_hasher;
mod question_command;
mod question_query;
mod question_repository;
mod session_repository;
mod signup_service;
mod user_admin_command;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use access_token_issuer::MockAccessTokenIssuer;
pub use access_token_issuer::{AccessTokenError, AccessTokenIssuer, IssuedToken};
pub use answer_command::AnswerCommand;
#[cfg(test)]
pub use answer_command::MockAnswerCommand;
pub use answer_query::AnswerQuery;
#[cfg(test)]
pub use answer_query::MockAnswerQuery;
#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
pub use answer_repository::{AnswerRepository, AnswerRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginService, SignedIn};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use question_command::MockQuestionCommand;
pub use question_command::QuestionCommand;
#[cfg(test)]
pub use question_query::MockQuestionQuery;
pub use question_query::QuestionQuery;
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::{QuestionRepository, QuestionRepositoryError};
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionRepository, SessionRepositoryError};
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::SignupService;
#[cfg(test)]
pub use user_admin_command::MockUserAdminCommand;
pub use user_admin_command::UserAdminCommand;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
