//! Driving port for writing answers.
//!
//! Ids arrive as raw path segments and bodies as unvalidated drafts. Both are
//! checked after the caller is authorized; an id that does not parse is
//! reported like an unknown one.

use async_trait::async_trait;

use crate::domain::{AccessToken, AnswerId, ContentDraft, Error};

/// Answer mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerCommand: Send + Sync {
    /// Post an answer to `question_id` as the token holder.
    async fn create_answer(
        &self,
        token: &AccessToken,
        question_id: &str,
        content: ContentDraft,
    ) -> Result<AnswerId, Error>;

    /// Replace an answer's content; only its owner may do so.
    async fn edit_answer(
        &self,
        token: &AccessToken,
        answer_id: &str,
        content: ContentDraft,
    ) -> Result<AnswerId, Error>;

    /// Delete an answer; its owner or an admin may do so.
    async fn delete_answer(&self, token: &AccessToken, answer_id: &str) -> Result<AnswerId, Error>;
}
