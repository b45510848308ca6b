//! Port for answer persistence.
//!
//! Adapters run each call in its own implicit transaction. Lookups report
//! absence as `None` or a zero count; only storage failures are errors.

use async_trait::async_trait;

use crate::domain::{Answer, AnswerId, QuestionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by answer repository adapters.
    pub enum AnswerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "answer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "answer repository query failed: {message}",
        /// The question or author referenced by the answer does not exist.
        MissingReference { message: String } => "answer references a missing row: {message}",
        /// An update targeted an answer that no longer exists.
        NotFound { id: String } => "answer {id} not found",
    }
}

/// Storage of answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Persist the answer and return it as stored.
    async fn create_answer(&self, answer: &Answer) -> Result<Answer, AnswerRepositoryError>;

    /// Fetch an answer, or `None` when no row matches.
    async fn get_answer_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerRepositoryError>;

    /// Overwrite the stored content of an existing answer.
    async fn edit_answer(&self, answer: &Answer) -> Result<Answer, AnswerRepositoryError>;

    /// Delete an answer; returns the number of rows deleted (0 or 1).
    async fn delete_answer_by_uuid(&self, id: &AnswerId) -> Result<usize, AnswerRepositoryError>;

    /// Every answer to `question_id`, ordered by creation time then id.
    async fn get_all_answers_to_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError>;
}
