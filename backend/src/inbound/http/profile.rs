//! Profile lookup: `GET /userprofile/{userId}`.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Public profile fields.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        let User {
            username,
            email,
            profile,
            ..
        } = user;
        Self {
            user_name: username.into(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            email_address: email.into(),
            country: profile.country,
            about_me: profile.about_me,
            dob: profile.dob,
            contact_number: profile.contact_number,
        }
    }
}

/// Fetch another member's profile.
#[utoipa::path(
    get,
    path = "/userprofile/{userId}",
    params(("userId" = String, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 403, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "userProfile"
)]
#[get("/userprofile/{userId}")]
pub async fn user_profile(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user = state
        .profile
        .fetch_profile(&token.into_inner(), &path.into_inner())
        .await?;
    Ok(web::Json(user.into()))
}
