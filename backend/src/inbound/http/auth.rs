//! Extractors for the `authorization` request header.
//!
//! Protected endpoints take a [`BearerToken`]; sign-in takes
//! [`BasicCredentials`]. Keeping header parsing here leaves handlers with
//! nothing but request and response mapping.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header::AUTHORIZATION};
use futures_util::future::{Ready, ready};

use crate::domain::{AccessToken, Error, LoginCredentials, failures};

use super::validation::{FieldName, login_validation_error, missing_field_error};

const AUTHORIZATION_FIELD: FieldName = FieldName::new("authorization");

fn header_value(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Access token presented by the caller.
///
/// A missing, blank, or non-ASCII header is treated like an unknown token,
/// so callers get `ATHR-001`.
#[derive(Debug, Clone)]
pub struct BearerToken(pub AccessToken);

impl BearerToken {
    pub fn into_inner(self) -> AccessToken {
        self.0
    }
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = header_value(req)
            .and_then(|value| AccessToken::from_header(value).ok())
            .map(BearerToken)
            .ok_or_else(failures::not_signed_in);
        ready(token)
    }
}

/// `Basic` credentials presented at sign-in.
#[derive(Debug, Clone)]
pub struct BasicCredentials(pub LoginCredentials);

impl FromRequest for BasicCredentials {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let credentials = header_value(req)
            .ok_or_else(|| missing_field_error(AUTHORIZATION_FIELD))
            .and_then(|value| {
                LoginCredentials::from_basic_header(value).map_err(login_validation_error)
            })
            .map(BasicCredentials);
        ready(credentials)
    }
}
