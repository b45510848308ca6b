//! Translation of request validation failures into `invalid_request` errors.
//!
//! Every failure names the offending `field` and a machine readable `code`
//! in `details`, so clients can highlight the right input.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;

use crate::domain::{
    ContentDraft, Error, LoginValidationError, ProfileField, UserValidationError,
};

/// Machine readable validation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    EmptyValue,
    TooLong,
    InvalidCharacters,
    InvalidEmail,
    InvalidBasicCredentials,
    InvalidJson,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyValue => "empty_value",
            Self::TooLong => "too_long",
            Self::InvalidCharacters => "invalid_characters",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidBasicCredentials => "invalid_basic_credentials",
            Self::InvalidJson => "invalid_json",
        }
    }
}

/// Request field name as clients spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

/// Require a post body taken from `field`.
///
/// Only presence is checked here; services validate the text once the caller
/// is authorized.
pub(crate) fn content_draft(value: Option<String>, field: FieldName) -> Result<ContentDraft, Error> {
    value
        .map(|text| ContentDraft::new(field.as_str(), text))
        .ok_or_else(|| missing_field_error(field))
}

fn profile_field_name(field: ProfileField) -> &'static str {
    match field {
        ProfileField::FirstName => "firstName",
        ProfileField::LastName => "lastName",
        ProfileField::Country => "country",
        ProfileField::Dob => "dob",
        ProfileField::ContactNumber => "contactNumber",
    }
}

/// Map signup validation failures to the request field they came from.
pub(crate) fn user_validation_error(err: UserValidationError) -> Error {
    let (field, code) = match &err {
        UserValidationError::EmptyUsername => ("userName", ValidationCode::EmptyValue),
        UserValidationError::UsernameTooLong { .. } => ("userName", ValidationCode::TooLong),
        UserValidationError::UsernameInvalidCharacters => {
            ("userName", ValidationCode::InvalidCharacters)
        }
        UserValidationError::EmptyEmail => ("emailAddress", ValidationCode::EmptyValue),
        UserValidationError::InvalidEmail => ("emailAddress", ValidationCode::InvalidEmail),
        UserValidationError::EmptyFirstName => ("firstName", ValidationCode::EmptyValue),
        UserValidationError::EmptyLastName => ("lastName", ValidationCode::EmptyValue),
        UserValidationError::ProfileFieldTooLong { field, .. } => {
            (profile_field_name(*field), ValidationCode::TooLong)
        }
        UserValidationError::EmptyPassword => ("password", ValidationCode::EmptyValue),
        UserValidationError::UnknownRole(_) => ("role", ValidationCode::InvalidCharacters),
    };
    field_error(FieldName::new(field), code, err.to_string())
}

/// `JsonConfig` error handler: undecodable bodies become `invalid_request`.
pub(crate) fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let error = Error::invalid_request(format!("request body is not valid JSON: {err}"))
        .with_details(json!({ "code": ValidationCode::InvalidJson.as_str() }));
    error.into()
}

/// Map a malformed `Basic` header to an `authorization` field error.
pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    let code = match err {
        LoginValidationError::EmptyUsername | LoginValidationError::EmptyPassword => {
            ValidationCode::EmptyValue
        }
        LoginValidationError::NotBasic
        | LoginValidationError::MalformedEncoding
        | LoginValidationError::MissingSeparator => ValidationCode::InvalidBasicCredentials,
    };
    field_error(FieldName::new("authorization"), code, err.to_string())
}
