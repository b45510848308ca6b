//! Quora failure codes and their client-facing messages.
//!
//! Every business rejection is a domain [`Error`] whose `details.code` holds
//! one of the short codes below. The [`ErrorCode`] picks the HTTP status.

use serde_json::json;

use super::{ContentValidationError, Error, ErrorCode};

/// Protected operations, each with its own signed-out wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    DeleteUser,
    ViewProfile,
    CreateQuestion,
    ListQuestions,
    EditQuestion,
    DeleteQuestion,
    ListQuestionsByUser,
    CreateAnswer,
    EditAnswer,
    DeleteAnswer,
    ListAnswers,
}

impl AuthAction {
    /// Message attached to `ATHR-002` for this action.
    pub fn signed_out_message(self) -> &'static str {
        match self {
            Self::DeleteUser => "User is signed out",
            Self::ViewProfile => "User is signed out.Sign in first to get user details",
            Self::CreateQuestion => "User is signed out.Sign in first to post a question",
            Self::ListQuestions => "User is signed out.Sign in first to get all questions",
            Self::EditQuestion => "User is signed out.Sign in first to edit the question",
            Self::DeleteQuestion => "User is signed out.Sign in first to delete a question",
            Self::ListQuestionsByUser => {
                "User is signed out.Sign in first to get all questions posted by a specific user"
            }
            Self::CreateAnswer => "User is signed out.Sign in first to post an answer",
            Self::EditAnswer => "User is signed out.Sign in first to edit an answer",
            Self::DeleteAnswer => "User is signed out.Sign in first to delete an answer",
            Self::ListAnswers => "User is signed out.Sign in first to get the answers",
        }
    }
}

fn coded(kind: ErrorCode, code: &'static str, message: &str) -> Error {
    Error::new(kind, message).with_details(json!({ "code": code }))
}

/// `ATHR-001`: no session for the presented token.
pub fn not_signed_in() -> Error {
    coded(ErrorCode::Forbidden, "ATHR-001", "User has not signed in")
}

/// `ATHR-002`: the session was signed out or has expired.
pub fn signed_out(action: AuthAction) -> Error {
    coded(ErrorCode::Forbidden, "ATHR-002", action.signed_out_message())
}

/// `ATHR-003`: signed in but not allowed to act on the resource.
pub fn not_permitted(message: &str) -> Error {
    coded(ErrorCode::Forbidden, "ATHR-003", message)
}

/// `USR-001`: target user does not exist.
pub fn user_not_found(message: &str) -> Error {
    coded(ErrorCode::NotFound, "USR-001", message)
}

/// `QUES-001`: target question does not exist.
pub fn question_not_found(message: &str) -> Error {
    coded(ErrorCode::NotFound, "QUES-001", message)
}

/// `ANS-001`: target answer does not exist.
pub fn answer_not_found(message: &str) -> Error {
    coded(ErrorCode::NotFound, "ANS-001", message)
}

/// `invalid_request` for a post body that fails the length rules.
///
/// `details` name the request `field` and a `code` of `empty_value` or
/// `too_long`.
pub fn invalid_content(field: &str, err: &ContentValidationError) -> Error {
    let code = match err {
        ContentValidationError::Empty => "empty_value",
        ContentValidationError::TooLong { .. } => "too_long",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// `SGR-001` on signup: the user name is already registered.
pub fn username_taken() -> Error {
    coded(
        ErrorCode::Conflict,
        "SGR-001",
        "Try any other Username, this Username has already been taken",
    )
}

/// `SGR-002` on signup: the email is already registered.
pub fn email_taken() -> Error {
    coded(
        ErrorCode::Conflict,
        "SGR-002",
        "This user has already been registered, try with any other emailId",
    )
}

/// `ATH-001` on signin.
pub fn unknown_username() -> Error {
    coded(ErrorCode::Unauthorized, "ATH-001", "This username does not exist")
}

/// `ATH-002` on signin.
pub fn password_failed() -> Error {
    coded(ErrorCode::Unauthorized, "ATH-002", "Password failed")
}

/// `SGR-001` on signout: nothing to sign out of.
pub fn signout_without_session() -> Error {
    coded(ErrorCode::Unauthorized, "SGR-001", "User is not Signed in")
}
