//! PostgreSQL-backed `QuestionRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{QuestionRepository, QuestionRepositoryError};
use crate::domain::{ContentKind, PostContent, Question, QuestionId, UserId};

use super::diesel_error_mapping::{StoreFailure, classify};
use super::models::{QuestionRow, QuestionUpdate};
use super::pool::DbPool;
use super::schema::questions;

/// Diesel implementation of [`QuestionRepository`].
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_port_error(failure: StoreFailure) -> QuestionRepositoryError {
    match failure {
        StoreFailure::Connection(message) => QuestionRepositoryError::connection(message),
        StoreFailure::ForeignKeyViolation { constraint } => QuestionRepositoryError::missing_reference(
            constraint.unwrap_or_else(|| "questions_user_id_fkey".to_owned()),
        ),
        StoreFailure::UniqueViolation { constraint } => QuestionRepositoryError::query(format!(
            "constraint violated: {}",
            constraint.as_deref().unwrap_or("unknown")
        )),
        StoreFailure::Query(message) => QuestionRepositoryError::query(message),
    }
}

fn row_to_question(row: QuestionRow) -> Result<Question, QuestionRepositoryError> {
    let content = PostContent::new(ContentKind::Question, row.content).map_err(|err| {
        QuestionRepositoryError::query(format!("stored question {} is invalid: {err}", row.id))
    })?;
    Ok(Question {
        id: QuestionId::from_uuid(row.id),
        content,
        owner: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
    })
}

fn question_to_row(question: &Question) -> QuestionRow {
    QuestionRow {
        id: *question.id.as_uuid(),
        content: question.content.as_ref().to_owned(),
        user_id: *question.owner.as_uuid(),
        created_at: question.created_at,
    }
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn create_question(
        &self,
        question: &Question,
    ) -> Result<Question, QuestionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        let row = diesel::insert_into(questions::table)
            .values(&question_to_row(question))
            .returning(QuestionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| to_port_error(classify(err, "insert question")))?;
        row_to_question(row)
    }

    async fn get_question_by_id(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        let row = questions::table
            .filter(questions::id.eq(id.as_uuid()))
            .select(QuestionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| to_port_error(classify(err, "load question")))?;
        row.map(row_to_question).transpose()
    }

    async fn edit_question(
        &self,
        question: &Question,
    ) -> Result<Question, QuestionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        let update = QuestionUpdate {
            content: question.content.as_ref(),
        };
        let row = diesel::update(questions::table.filter(questions::id.eq(question.id.as_uuid())))
            .set(&update)
            .returning(QuestionRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| to_port_error(classify(err, "update question")))?
            .ok_or_else(|| QuestionRepositoryError::not_found(question.id.as_ref()))?;
        row_to_question(row)
    }

    async fn delete_question_by_uuid(
        &self,
        id: &QuestionId,
    ) -> Result<usize, QuestionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        diesel::delete(questions::table.filter(questions::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| to_port_error(classify(err, "delete question")))
    }

    async fn get_all_questions(&self) -> Result<Vec<Question>, QuestionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        questions::table
            .select(QuestionRow::as_select())
            .order_by((questions::created_at.asc(), questions::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| to_port_error(classify(err, "list questions")))?
            .into_iter()
            .map(row_to_question)
            .collect()
    }

    async fn get_all_questions_by_user(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(err.into()))?;
        questions::table
            .filter(questions::user_id.eq(owner.as_uuid()))
            .select(QuestionRow::as_select())
            .order_by((questions::created_at.asc(), questions::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| to_port_error(classify(err, "list questions by user")))?
            .into_iter()
            .map(row_to_question)
            .collect()
    }
}
