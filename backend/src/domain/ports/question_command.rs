//! Driving port for writing questions.
//!
//! Like the answer port, ids and bodies are validated once the caller is
//! authorized.

use async_trait::async_trait;

use crate::domain::{AccessToken, ContentDraft, Error, QuestionId};

/// Question mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionCommand: Send + Sync {
    /// Post a question as the token holder.
    async fn create_question(
        &self,
        token: &AccessToken,
        content: ContentDraft,
    ) -> Result<QuestionId, Error>;

    /// Replace a question's content; only its owner may do so.
    async fn edit_question(
        &self,
        token: &AccessToken,
        question_id: &str,
        content: ContentDraft,
    ) -> Result<QuestionId, Error>;

    /// Delete a question; its owner or an admin may do so.
    async fn delete_question(
        &self,
        token: &AccessToken,
        question_id: &str,
    ) -> Result<QuestionId, Error>;
}
