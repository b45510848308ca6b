//! Domain primitives, services, and ports.
//!
//! Purpose: define the Q&A model (users, sessions, questions, answers) and
//! the use cases over it without depending on HTTP or Diesel. Inbound
//! adapters call the driving ports in [`ports`]; outbound adapters implement
//! the driven ones.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport agnostic failures. Quora failure
//!   codes ride in `details.code` (see [`failures`]).
//! - Identifiers and values: [`UserId`], [`QuestionId`], [`AnswerId`],
//!   [`Username`], [`EmailAddress`], [`PostContent`], [`AccessToken`].
//! - Services: [`AccountService`], [`UserAdminService`], [`QuestionService`],
//!   [`AnswerService`], all gated by the [`Authorizer`].

mod account_service;
mod answer;
mod answer_service;
mod auth;
mod authorization;
mod content;
pub mod error;
pub mod failures;
mod identifiers;
pub mod ports;
mod question;
mod question_service;
mod repository_errors;
mod session;
pub mod trace_id;
pub mod user;
mod user_admin_service;

#[cfg(test)]
pub(crate) mod service_test_helpers;

pub use self::account_service::AccountService;
pub use self::answer::{Answer, QuestionAnswers};
pub use self::answer_service::AnswerService;
pub use self::auth::{AccessToken, EmptyAccessToken, LoginCredentials, LoginValidationError};
pub use self::authorization::Authorizer;
pub use self::content::{
    ANSWER_CONTENT_MAX, ContentDraft, ContentKind, ContentValidationError, PostContent,
    QUESTION_CONTENT_MAX,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::failures::AuthAction;
pub use self::identifiers::{AnswerId, IdentifierError, QuestionId, UserId};
pub use self::question::Question;
pub use self::question_service::QuestionService;
pub use self::session::AuthSession;
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, PasswordDigest, ProfileField, Registration, User, UserProfile, UserRole,
    UserValidationError, Username,
};
pub use self::user_admin_service::UserAdminService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
