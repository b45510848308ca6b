//! Translation of repository port errors into domain errors.
//!
//! Connection failures become `service_unavailable`; everything else the
//! caller did not anticipate becomes `internal_error`.

use tracing::warn;

use super::Error;
use super::ports::{
    AnswerRepositoryError, QuestionRepositoryError, SessionRepositoryError, UserPersistenceError,
};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::internal(format!("unexpected duplicate user name: {username}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::internal(format!("unexpected duplicate email: {email}"))
        }
    }
}

pub(crate) fn map_session_error(error: SessionRepositoryError) -> Error {
    match error {
        SessionRepositoryError::Connection { message } => {
            warn!(%message, "session repository unavailable");
            Error::service_unavailable(format!("session repository unavailable: {message}"))
        }
        SessionRepositoryError::Query { message } => {
            Error::internal(format!("session repository error: {message}"))
        }
    }
}

pub(crate) fn map_question_error(error: QuestionRepositoryError) -> Error {
    match error {
        QuestionRepositoryError::Connection { message } => {
            warn!(%message, "question repository unavailable");
            Error::service_unavailable(format!("question repository unavailable: {message}"))
        }
        QuestionRepositoryError::Query { message }
        | QuestionRepositoryError::MissingReference { message } => {
            Error::internal(format!("question repository error: {message}"))
        }
        QuestionRepositoryError::NotFound { id } => {
            Error::internal(format!("question {id} vanished during update"))
        }
    }
}

pub(crate) fn map_answer_error(error: AnswerRepositoryError) -> Error {
    match error {
        AnswerRepositoryError::Connection { message } => {
            warn!(%message, "answer repository unavailable");
            Error::service_unavailable(format!("answer repository unavailable: {message}"))
        }
        AnswerRepositoryError::Query { message }
        | AnswerRepositoryError::MissingReference { message } => {
            Error::internal(format!("answer repository error: {message}"))
        }
        AnswerRepositoryError::NotFound { id } => {
            Error::internal(format!("answer {id} vanished during update"))
        }
    }
}
