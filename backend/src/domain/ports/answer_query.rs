//! Driving port for reading the answers to a question.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, QuestionAnswers};

/// Answer read models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerQuery: Send + Sync {
    /// The question and all of its answers, oldest first.
    async fn answers_to_question(
        &self,
        token: &AccessToken,
        question_id: &str,
    ) -> Result<QuestionAnswers, Error>;
}
