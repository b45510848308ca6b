//! Answer endpoints.
//!
//! ```text
//! POST   /question/{questionId}/answer/create  {"answer":"Use Arc."}
//! PUT    /answer/edit/{answerId}               {"content":"..."}
//! DELETE /answer/delete/{answerId}
//! GET    /answer/all/{questionId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::QuestionAnswers;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::StatusResponse;
use crate::inbound::http::validation::{FieldName, content_draft};

/// Body for posting an answer.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AnswerRequest {
    pub answer: Option<String>,
}

/// Body for editing an answer.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AnswerEditRequest {
    pub content: Option<String>,
}

/// Answer listed together with the question it belongs to.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetails {
    pub id: String,
    pub question_content: String,
    pub answer_content: String,
}

fn listing(found: QuestionAnswers) -> Vec<AnswerDetails> {
    let QuestionAnswers { question, answers } = found;
    answers
        .into_iter()
        .map(|answer| AnswerDetails {
            id: answer.id.to_string(),
            question_content: question.content.to_string(),
            answer_content: answer.content.into(),
        })
        .collect()
}

/// Answer a question.
#[utoipa::path(
    post,
    path = "/question/{questionId}/answer/create",
    params(("questionId" = String, Path, description = "Question UUID")),
    request_body = AnswerRequest,
    responses(
        (status = 201, description = "Answer created", body = StatusResponse),
        (status = 400, description = "Missing or invalid content", body = ErrorSchema),
        (status = 403, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Unknown question", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "createAnswer"
)]
#[post("/question/{questionId}/answer/create")]
pub async fn create_answer(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
    payload: web::Json<AnswerRequest>,
) -> ApiResult<HttpResponse> {
    let content = content_draft(payload.into_inner().answer, FieldName::new("answer"))?;
    let id = state
        .answers
        .create_answer(&token.into_inner(), &path.into_inner(), content)
        .await?;
    Ok(HttpResponse::Created().json(StatusResponse::new(&id, "ANSWER CREATED")))
}

/// Replace the content of an answer the caller owns.
#[utoipa::path(
    put,
    path = "/answer/edit/{answerId}",
    params(("answerId" = String, Path, description = "Answer UUID")),
    request_body = AnswerEditRequest,
    responses(
        (status = 200, description = "Answer edited", body = StatusResponse),
        (status = 400, description = "Missing or invalid content", body = ErrorSchema),
        (status = 403, description = "Not signed in or not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown answer", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "editAnswer"
)]
#[put("/answer/edit/{answerId}")]
pub async fn edit_answer(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
    payload: web::Json<AnswerEditRequest>,
) -> ApiResult<web::Json<StatusResponse>> {
    let content = content_draft(payload.into_inner().content, FieldName::new("content"))?;
    let id = state
        .answers
        .edit_answer(&token.into_inner(), &path.into_inner(), content)
        .await?;
    Ok(web::Json(StatusResponse::new(&id, "ANSWER EDITED")))
}

/// Delete an answer. Owners and admins only.
#[utoipa::path(
    delete,
    path = "/answer/delete/{answerId}",
    params(("answerId" = String, Path, description = "Answer UUID")),
    responses(
        (status = 200, description = "Answer deleted", body = StatusResponse),
        (status = 403, description = "Not signed in or not permitted", body = ErrorSchema),
        (status = 404, description = "Unknown answer", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "deleteAnswer"
)]
#[delete("/answer/delete/{answerId}")]
pub async fn delete_answer(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<StatusResponse>> {
    let id = state
        .answers
        .delete_answer(&token.into_inner(), &path.into_inner())
        .await?;
    Ok(web::Json(StatusResponse::new(&id, "ANSWER DELETED")))
}

/// List the answers to a question.
#[utoipa::path(
    get,
    path = "/answer/all/{questionId}",
    params(("questionId" = String, Path, description = "Question UUID")),
    responses(
        (status = 200, description = "Answers with their question", body = [AnswerDetails]),
        (status = 403, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Unknown question", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["answers"],
    operation_id = "listAnswers"
)]
#[get("/answer/all/{questionId}")]
pub async fn answers_to_question(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<AnswerDetails>>> {
    let found = state
        .answers_query
        .answers_to_question(&token.into_inner(), &path.into_inner())
        .await?;
    Ok(web::Json(listing(found)))
}
