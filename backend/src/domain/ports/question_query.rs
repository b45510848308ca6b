//! Driving port for listing questions.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, Question};

/// Question read models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionQuery: Send + Sync {
    /// Every question, oldest first.
    async fn all_questions(&self, token: &AccessToken) -> Result<Vec<Question>, Error>;

    /// Questions posted by the user named by the `user_id` path segment,
    /// oldest first.
    async fn questions_by_user(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> Result<Vec<Question>, Error>;
}
