//! Account endpoints.
//!
//! ```text
//! POST /user/signup  {"firstName":"Ada","lastName":"Lovelace",...}
//! POST /user/signin  authorization: Basic YWRhOnNlY3JldA==
//! POST /user/signout authorization: Bearer <token>
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{EmailAddress, Error, Registration, UserId, UserProfile, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{BasicCredentials, BearerToken};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, user_validation_error};

/// Response header carrying the freshly issued access token.
pub const ACCESS_TOKEN_HEADER: &str = "access-token";

const REGISTERED: &str = "USER SUCCESSFULLY REGISTERED";
const SIGNED_IN: &str = "SIGNED IN SUCCESSFULLY";
const SIGNED_OUT: &str = "SIGNED OUT SUCCESSFULLY";

/// Signup request body for `POST /user/signup`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(FieldName::new(field)))
}

impl TryFrom<SignupRequest> for Registration {
    type Error = Error;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        let username = Username::new(required(value.user_name, "userName")?)
            .map_err(user_validation_error)?;
        let email = EmailAddress::new(required(value.email_address, "emailAddress")?)
            .map_err(user_validation_error)?;
        let profile = UserProfile::new(
            required(value.first_name, "firstName")?,
            required(value.last_name, "lastName")?,
        )
        .and_then(|profile| {
            profile.with_details(
                value.country,
                value.about_me,
                value.dob,
                value.contact_number,
            )
        })
        .map_err(user_validation_error)?;
        let password = required(value.password, "password")?;
        Registration::new(username, email, profile, &password).map_err(user_validation_error)
    }
}

/// `{id, status}` acknowledgement.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusResponse {
    pub id: String,
    pub status: String,
}

impl StatusResponse {
    pub fn new(id: impl ToString, status: &str) -> Self {
        Self {
            id: id.to_string(),
            status: status.to_owned(),
        }
    }
}

/// `{id, message}` acknowledgement used by sign-in and sign-out.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub id: String,
    pub message: String,
}

impl MessageResponse {
    fn new(id: &UserId, message: &str) -> Self {
        Self {
            id: id.to_string(),
            message: message.to_owned(),
        }
    }
}

/// Register a new member.
#[utoipa::path(
    post,
    path = "/user/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = StatusResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "User name or email taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/user/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let id = state.signup.signup(registration).await?;
    Ok(HttpResponse::Created().json(StatusResponse::new(&id, REGISTERED)))
}

/// Exchange Basic credentials for an access token.
#[utoipa::path(
    post,
    path = "/user/signin",
    responses(
        (status = 200, description = "Signed in", body = MessageResponse,
            headers(("access-token" = String, description = "Bearer token for later requests"))),
        (status = 400, description = "Malformed authorization header", body = ErrorSchema),
        (status = 401, description = "Unknown user or wrong password", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signin",
    security(("basic" = []))
)]
#[post("/user/signin")]
pub async fn signin(
    state: web::Data<HttpState>,
    credentials: BasicCredentials,
) -> ApiResult<HttpResponse> {
    let signed_in = state.login.sign_in(&credentials.0).await?;
    Ok(HttpResponse::Ok()
        .insert_header((ACCESS_TOKEN_HEADER, signed_in.access_token.as_str()))
        .json(MessageResponse::new(&signed_in.user_id, SIGNED_IN)))
}

/// Close the caller's session.
#[utoipa::path(
    post,
    path = "/user/signout",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse),
        (status = 401, description = "No open session", body = ErrorSchema),
        (status = 403, description = "Not signed in", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signout"
)]
#[post("/user/signout")]
pub async fn signout(state: web::Data<HttpState>, token: BearerToken) -> ApiResult<HttpResponse> {
    let user_id = state.login.sign_out(&token.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(&user_id, SIGNED_OUT)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::SignedIn;
    use crate::domain::{AccessToken, failures};
    use crate::inbound::http::test_utils::{BEARER, MockPorts, failure_code, json_body};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn signup_body() -> Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "userName": "ada",
            "emailAddress": "ada@example.com",
            "password": "secret",
            "country": "UK",
            "aboutMe": "  ",
        })
    }

    #[rstest]
    #[actix_web::test]
    async fn signup_returns_created_with_the_new_id(signup_body: Value) {
        let id = UserId::random();
        let expected = id.to_string();
        let mut ports = MockPorts::default();
        ports
            .signup
            .expect_signup()
            .withf(|r| {
                r.username.as_ref() == "ada"
                    && r.password() == "secret"
                    && r.profile.country.as_deref() == Some("UK")
                    && r.profile.about_me.is_none()
            })
            .times(1)
            .return_once(move |_| Ok(id));
        let app = actix_test::init_service(ports.into_app()).await;

        let req = actix_test::TestRequest::post()
            .uri("/user/signup")
            .set_json(&signup_body)
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body = json_body(res).await;
        assert_eq!(body["id"], Value::String(expected));
        assert_eq!(body["status"], "USER SUCCESSFULLY REGISTERED");
    }

    #[rstest]
    #[case::missing_user_name("userName", Value::Null, "missing_field")]
    #[case::bad_email("emailAddress", json!("not-an-email"), "invalid_email")]
    #[case::blank_first_name("firstName", json!("  "), "empty_value")]
    #[actix_web::test]
    async fn signup_rejects_invalid_fields(
        mut signup_body: Value,
        #[case] field: &str,
        #[case] value: Value,
        #[case] code: &str,
    ) {
        let mut ports = MockPorts::default();
        ports.signup.expect_signup().never();
        let app = actix_test::init_service(ports.into_app()).await;
        if value.is_null() {
            signup_body.as_object_mut().expect("object").remove(field);
        } else {
            signup_body[field] = value;
        }

        let req = actix_test::TestRequest::post()
            .uri("/user/signup")
            .set_json(&signup_body)
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json_body(res).await;
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }

    #[rstest]
    #[actix_web::test]
    async fn signup_conflict_keeps_the_failure_code(signup_body: Value) {
        let mut ports = MockPorts::default();
        ports
            .signup
            .expect_signup()
            .return_once(|_| Err(failures::username_taken()));
        let app = actix_test::init_service(ports.into_app()).await;

        let req = actix_test::TestRequest::post()
            .uri("/user/signup")
            .set_json(&signup_body)
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(failure_code(&json_body(res).await), Some("SGR-001"));
    }

    #[rstest]
    #[actix_web::test]
    async fn signin_sets_the_access_token_header() {
        let user_id = UserId::random();
        let expected = user_id.to_string();
        let mut ports = MockPorts::default();
        ports
            .login
            .expect_sign_in()
            .withf(|c| c.username() == "ada" && c.password() == "secret")
            .return_once(move |_| {
                Ok(SignedIn {
                    user_id,
                    access_token: AccessToken::new("issued.jwt.token"),
                    expires_at: Utc::now(),
                })
            });
        let app = actix_test::init_service(ports.into_app()).await;

        // base64("ada:secret")
        let req = actix_test::TestRequest::post()
            .uri("/user/signin")
            .insert_header(("authorization", "Basic YWRhOnNlY3JldA=="))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(ACCESS_TOKEN_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some("issued.jwt.token")
        );
        let body = json_body(res).await;
        assert_eq!(body["id"], Value::String(expected));
        assert_eq!(body["message"], "SIGNED IN SUCCESSFULLY");
    }

    #[rstest]
    #[actix_web::test]
    async fn signin_without_header_is_a_bad_request() {
        let mut ports = MockPorts::default();
        ports.login.expect_sign_in().never();
        let app = actix_test::init_service(ports.into_app()).await;

        let req = actix_test::TestRequest::post()
            .uri("/user/signin")
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await["details"]["field"], "authorization");
    }

    #[rstest]
    #[actix_web::test]
    async fn signout_reports_the_owner() {
        let user_id = UserId::random();
        let expected = user_id.to_string();
        let mut ports = MockPorts::default();
        ports
            .login
            .expect_sign_out()
            .withf(|t| t.as_str() == "header.payload.signature")
            .return_once(move |_| Ok(user_id));
        let app = actix_test::init_service(ports.into_app()).await;

        let req = actix_test::TestRequest::post()
            .uri("/user/signout")
            .insert_header(("authorization", BEARER))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["id"], Value::String(expected));
        assert_eq!(body["message"], "SIGNED OUT SUCCESSFULLY");
    }

    #[rstest]
    #[actix_web::test]
    async fn signout_without_session_is_unauthorized() {
        let mut ports = MockPorts::default();
        ports
            .login
            .expect_sign_out()
            .return_once(|_| Err(failures::signout_without_session()));
        let app = actix_test::init_service(ports.into_app()).await;

        let req = actix_test::TestRequest::post()
            .uri("/user/signout")
            .insert_header(("authorization", BEARER))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(failure_code(&json_body(res).await), Some("SGR-001"));
    }
}
