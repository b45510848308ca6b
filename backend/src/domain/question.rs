//! Questions posted by users.

use chrono::{DateTime, Utc};

use super::{PostContent, QuestionId, UserId};

/// A question and its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub content: PostContent,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Draft a new question with a fresh identifier.
    pub fn draft(owner: UserId, content: PostContent, created_at: DateTime<Utc>) -> Self {
        Self {
            id: QuestionId::random(),
            content,
            owner,
            created_at,
        }
    }

    /// Whether `user_id` authored the question.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner == user_id
    }
}
