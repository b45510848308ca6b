//! Answers to questions.

use chrono::{DateTime, Utc};

use super::{AnswerId, PostContent, Question, QuestionId, UserId};

/// An answer, the question it responds to, and its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub id: AnswerId,
    pub content: PostContent,
    pub question_id: QuestionId,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    /// Draft a new answer with a fresh identifier.
    pub fn draft(
        question_id: QuestionId,
        owner: UserId,
        content: PostContent,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AnswerId::random(),
            content,
            question_id,
            owner,
            created_at,
        }
    }

    /// Whether `user_id` authored the answer.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner == user_id
    }
}

/// A question together with every answer posted to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAnswers {
    pub question: Question,
    pub answers: Vec<Answer>,
}
