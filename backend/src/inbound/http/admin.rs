//! Administrative endpoints.
//!
//! ```text
//! DELETE /admin/user/3fa85f64-5717-4562-b3fc-2c963f66afa6
//! authorization: Bearer <admin token>
//! ```

use actix_web::{delete, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::StatusResponse;

const DELETED: &str = "USER SUCCESSFULLY DELETED";

/// Delete a user and everything they own. Admins only.
#[utoipa::path(
    delete,
    path = "/admin/user/{userId}",
    params(("userId" = String, Path, description = "UUID of the user to delete")),
    responses(
        (status = 200, description = "User deleted", body = StatusResponse),
        (status = 403, description = "Not signed in, signed out, or not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "deleteUser"
)]
#[delete("/admin/user/{userId}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<StatusResponse>> {
    let user_id = state
        .admin
        .delete_user(&token.into_inner(), &path.into_inner())
        .await?;
    Ok(web::Json(StatusResponse::new(&user_id, DELETED)))
}
