//! PostgreSQL-backed `AnswerRepository`.
//!
//! Each method checks out one pooled connection and issues a single
//! statement, so every call is its own implicit transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AnswerRepository, AnswerRepositoryError};
use crate::domain::{Answer, AnswerId, ContentKind, PostContent, QuestionId, UserId};

use super::diesel_error_mapping::{StoreFailure, classify};
use super::models::{AnswerRow, AnswerUpdate};
use super::pool::DbPool;
use super::schema::answers;

/// Diesel implementation of [`AnswerRepository`].
#[derive(Clone)]
pub struct DieselAnswerRepository {
    pool: DbPool,
}

impl DieselAnswerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_port_error(failure: StoreFailure) -> AnswerRepositoryError {
    match failure {
        StoreFailure::Connection(message) => AnswerRepositoryError::connection(message),
        StoreFailure::ForeignKeyViolation { constraint } => {
            let constraint = constraint.unwrap_or_else(|| "unknown".to_owned());
            warn!(%constraint, "answer references a missing row");
            AnswerRepositoryError::missing_reference(constraint)
        }
        StoreFailure::UniqueViolation { constraint } => AnswerRepositoryError::query(format!(
            "constraint violated: {}",
            constraint.as_deref().unwrap_or("unknown")
        )),
        StoreFailure::Query(message) => AnswerRepositoryError::query(message),
    }
}

fn row_to_answer(row: AnswerRow) -> Result<Answer, AnswerRepositoryError> {
    let content = PostContent::new(ContentKind::Answer, row.content).map_err(|err| {
        AnswerRepositoryError::query(format!("stored answer {} is invalid: {err}", row.id))
    })?;
    Ok(Answer {
        id: AnswerId::from_uuid(row.id),
        content,
        question_id: QuestionId::from_uuid(row.question_id),
        owner: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
    })
}

fn answer_to_row(answer: &Answer) -> AnswerRow {
    AnswerRow {
        id: *answer.id.as_uuid(),
        content: answer.content.as_ref().to_owned(),
        user_id: *answer.owner.as_uuid(),
        question_id: *answer.question_id.as_uuid(),
        created_at: answer.created_at,
    }
}

#[async_trait]
impl AnswerRepository for DieselAnswerRepository {
    async fn create_answer(&self, answer: &Answer) -> Result<Answer, AnswerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        let row = diesel::insert_into(answers::table)
            .values(&answer_to_row(answer))
            .returning(AnswerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| to_port_error(classify(err, "insert answer")))?;
        row_to_answer(row)
    }

    async fn get_answer_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        let row = answers::table
            .filter(answers::id.eq(id.as_uuid()))
            .select(AnswerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| to_port_error(classify(err, "load answer")))?;
        row.map(row_to_answer).transpose()
    }

    async fn edit_answer(&self, answer: &Answer) -> Result<Answer, AnswerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        let update = AnswerUpdate {
            content: answer.content.as_ref(),
        };
        let row = diesel::update(answers::table.filter(answers::id.eq(answer.id.as_uuid())))
            .set(&update)
            .returning(AnswerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| to_port_error(classify(err, "update answer")))?
            .ok_or_else(|| AnswerRepositoryError::not_found(answer.id.as_ref()))?;
        row_to_answer(row)
    }

    async fn delete_answer_by_uuid(&self, id: &AnswerId) -> Result<usize, AnswerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        diesel::delete(answers::table.filter(answers::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| to_port_error(classify(err, "delete answer")))
    }

    async fn get_all_answers_to_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        answers::table
            .filter(answers::question_id.eq(question_id.as_uuid()))
            .select(AnswerRow::as_select())
            .order_by((answers::created_at.asc(), answers::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| to_port_error(classify(err, "list answers")))?
            .into_iter()
            .map(row_to_answer)
            .collect()
    }
}
