//! Question use cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::failures::{self, AuthAction};
use super::ports::{
    QuestionCommand, QuestionQuery, QuestionRepository, QuestionRepositoryError, UserRepository,
};
use super::repository_errors::{map_question_error, map_user_error};
use super::{
    AccessToken, Authorizer, ContentDraft, ContentKind, Error, Question, QuestionId, UserId,
};

const QUESTION_MISSING: &str = "Entered question uuid does not exist";
const EDIT_NOT_OWNER: &str = "Only the question owner can edit the question";
const DELETE_NOT_PERMITTED: &str = "Only the question owner or admin can delete the question";
const AUTHOR_MISSING: &str =
    "User with entered uuid whose question details are to be seen does not exist";

/// Service implementing [`QuestionCommand`] and [`QuestionQuery`].
#[derive(Clone)]
pub struct QuestionService<Q, U> {
    questions: Arc<Q>,
    users: Arc<U>,
    authorizer: Authorizer,
}

impl<Q, U> QuestionService<Q, U> {
    /// Create a new service.
    pub fn new(questions: Arc<Q>, users: Arc<U>, authorizer: Authorizer) -> Self {
        Self {
            questions,
            users,
            authorizer,
        }
    }
}

impl<Q, U> QuestionService<Q, U>
where
    Q: QuestionRepository,
{
    async fn existing_question(&self, id: &str) -> Result<Question, Error> {
        let id = QuestionId::new(id).map_err(|_| failures::question_not_found(QUESTION_MISSING))?;
        self.questions
            .get_question_by_id(&id)
            .await
            .map_err(map_question_error)?
            .ok_or_else(|| failures::question_not_found(QUESTION_MISSING))
    }
}

#[async_trait]
impl<Q, U> QuestionCommand for QuestionService<Q, U>
where
    Q: QuestionRepository,
    U: UserRepository,
{
    async fn create_question(
        &self,
        token: &AccessToken,
        content: ContentDraft,
    ) -> Result<QuestionId, Error> {
        let caller = self
            .authorizer
            .authorize(token, AuthAction::CreateQuestion)
            .await?;
        let content = content.validate(ContentKind::Question)?;
        let draft = Question::draft(caller.id, content, self.authorizer.now());
        let stored = self
            .questions
            .create_question(&draft)
            .await
            .map_err(map_question_error)?;
        info!(question_id = %stored.id, owner = %stored.owner, "question created");
        Ok(stored.id)
    }

    async fn edit_question(
        &self,
        token: &AccessToken,
        question_id: &str,
        content: ContentDraft,
    ) -> Result<QuestionId, Error> {
        let caller = self
            .authorizer
            .authorize(token, AuthAction::EditQuestion)
            .await?;
        let mut question = self.existing_question(question_id).await?;
        if !question.is_owned_by(&caller.id) {
            return Err(failures::not_permitted(EDIT_NOT_OWNER));
        }

        question.content = content.validate(ContentKind::Question)?;
        let stored = self
            .questions
            .edit_question(&question)
            .await
            .map_err(|err| match err {
                QuestionRepositoryError::NotFound { .. } => {
                    failures::question_not_found(QUESTION_MISSING)
                }
                other => map_question_error(other),
            })?;
        info!(question_id = %stored.id, "question edited");
        Ok(stored.id)
    }

    async fn delete_question(
        &self,
        token: &AccessToken,
        question_id: &str,
    ) -> Result<QuestionId, Error> {
        let caller = self
            .authorizer
            .authorize(token, AuthAction::DeleteQuestion)
            .await?;
        let question = self.existing_question(question_id).await?;
        if !question.is_owned_by(&caller.id) && !caller.role.is_admin() {
            return Err(failures::not_permitted(DELETE_NOT_PERMITTED));
        }

        let deleted = self
            .questions
            .delete_question_by_uuid(&question.id)
            .await
            .map_err(map_question_error)?;
        if deleted == 0 {
            return Err(failures::question_not_found(QUESTION_MISSING));
        }
        info!(question_id = %question.id, by = %caller.id, "question deleted");
        Ok(question.id)
    }
}

#[async_trait]
impl<Q, U> QuestionQuery for QuestionService<Q, U>
where
    Q: QuestionRepository,
    U: UserRepository,
{
    async fn all_questions(&self, token: &AccessToken) -> Result<Vec<Question>, Error> {
        self.authorizer
            .authorize(token, AuthAction::ListQuestions)
            .await?;
        self.questions
            .get_all_questions()
            .await
            .map_err(map_question_error)
    }

    async fn questions_by_user(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> Result<Vec<Question>, Error> {
        self.authorizer
            .authorize(token, AuthAction::ListQuestionsByUser)
            .await?;
        let user_id =
            UserId::new(user_id).map_err(|_| failures::user_not_found(AUTHOR_MISSING))?;
        if self
            .users
            .get_user_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .is_none()
        {
            return Err(failures::user_not_found(AUTHOR_MISSING));
        }
        self.questions
            .get_all_questions_by_user(&user_id)
            .await
            .map_err(map_question_error)
    }
}

#[cfg(test)]
#[path = "question_service_tests.rs"]
mod tests;
