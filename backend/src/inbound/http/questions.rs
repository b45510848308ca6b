//! Question endpoints.
//!
//! ```text
//! POST   /question/create                {"content":"What is ownership?"}
//! GET    /question/all
//! PUT    /question/edit/{questionId}     {"content":"..."}
//! DELETE /question/delete/{questionId}
//! GET    /question/all/{userId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::Question;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::StatusResponse;
use crate::inbound::http::validation::{FieldName, content_draft};

const CONTENT: FieldName = FieldName::new("content");

/// Body for creating or editing a question.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct QuestionRequest {
    pub content: Option<String>,
}

/// Question as listed to clients.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuestionDetails {
    pub id: String,
    pub content: String,
}

impl From<Question> for QuestionDetails {
    fn from(question: Question) -> Self {
        Self {
            id: question.id.to_string(),
            content: question.content.into(),
        }
    }
}

fn listing(questions: Vec<Question>) -> web::Json<Vec<QuestionDetails>> {
    web::Json(questions.into_iter().map(QuestionDetails::from).collect())
}

/// Post a new question.
#[utoipa::path(
    post,
    path = "/question/create",
    request_body = QuestionRequest,
    responses(
        (status = 201, description = "Question created", body = StatusResponse),
        (status = 400, description = "Invalid content", body = ErrorSchema),
        (status = 403, description = "Not signed in", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "createQuestion"
)]
#[post("/question/create")]
pub async fn create_question(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<QuestionRequest>,
) -> ApiResult<HttpResponse> {
    let content = content_draft(payload.into_inner().content, CONTENT)?;
    let id = state
        .questions
        .create_question(&token.into_inner(), content)
        .await?;
    Ok(HttpResponse::Created().json(StatusResponse::new(&id, "QUESTION CREATED")))
}

/// List every question.
#[utoipa::path(
    get,
    path = "/question/all",
    responses(
        (status = 200, description = "All questions", body = [QuestionDetails]),
        (status = 403, description = "Not signed in", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "listQuestions"
)]
#[get("/question/all")]
pub async fn all_questions(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<Vec<QuestionDetails>>> {
    let questions = state
        .questions_query
        .all_questions(&token.into_inner())
        .await?;
    Ok(listing(questions))
}

/// Replace the content of a question the caller owns.
#[utoipa::path(
    put,
    path = "/question/edit/{questionId}",
    params(("questionId" = String, Path, description = "Question UUID")),
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Question edited", body = StatusResponse),
        (status = 400, description = "Missing or invalid content", body = ErrorSchema),
        (status = 403, description = "Not signed in or not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown question", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "editQuestion"
)]
#[put("/question/edit/{questionId}")]
pub async fn edit_question(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
    payload: web::Json<QuestionRequest>,
) -> ApiResult<web::Json<StatusResponse>> {
    let content = content_draft(payload.into_inner().content, CONTENT)?;
    let id = state
        .questions
        .edit_question(&token.into_inner(), &path.into_inner(), content)
        .await?;
    Ok(web::Json(StatusResponse::new(&id, "QUESTION EDITED")))
}

/// Delete a question. Owners and admins only.
#[utoipa::path(
    delete,
    path = "/question/delete/{questionId}",
    params(("questionId" = String, Path, description = "Question UUID")),
    responses(
        (status = 200, description = "Question deleted", body = StatusResponse),
        (status = 403, description = "Not signed in or not permitted", body = ErrorSchema),
        (status = 404, description = "Unknown question", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "deleteQuestion"
)]
#[delete("/question/delete/{questionId}")]
pub async fn delete_question(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<StatusResponse>> {
    let id = state
        .questions
        .delete_question(&token.into_inner(), &path.into_inner())
        .await?;
    Ok(web::Json(StatusResponse::new(&id, "QUESTION DELETED")))
}

/// List the questions a member has asked.
#[utoipa::path(
    get,
    path = "/question/all/{userId}",
    params(("userId" = String, Path, description = "Author UUID")),
    responses(
        (status = 200, description = "Questions by the user", body = [QuestionDetails]),
        (status = 403, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "listQuestionsByUser"
)]
#[get("/question/all/{userId}")]
pub async fn questions_by_user(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<QuestionDetails>>> {
    let questions = state
        .questions_query
        .questions_by_user(&token.into_inner(), &path.into_inner())
        .await?;
    Ok(listing(questions))
}
