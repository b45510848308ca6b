//! Port for question persistence.

use async_trait::async_trait;

use crate::domain::{Question, QuestionId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by question repository adapters.
    pub enum QuestionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "question repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "question repository query failed: {message}",
        /// The author referenced by the question does not exist.
        MissingReference { message: String } => "question references a missing row: {message}",
        /// An update targeted a question that no longer exists.
        NotFound { id: String } => "question {id} not found",
    }
}

/// Storage of questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist a question and return it.
    async fn create_question(&self, question: &Question)
    -> Result<Question, QuestionRepositoryError>;

    /// Fetch a question, or `None` when no row matches.
    async fn get_question_by_id(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError>;

    /// Overwrite the content of an existing question.
    async fn edit_question(&self, question: &Question)
    -> Result<Question, QuestionRepositoryError>;

    /// Delete a question and its answers; returns the rows deleted.
    async fn delete_question_by_uuid(&self, id: &QuestionId)
    -> Result<usize, QuestionRepositoryError>;

    /// Every question, oldest first.
    async fn get_all_questions(&self) -> Result<Vec<Question>, QuestionRepositoryError>;

    /// Questions written by `owner`, oldest first.
    async fn get_all_questions_by_user(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Question>, QuestionRepositoryError>;
}
