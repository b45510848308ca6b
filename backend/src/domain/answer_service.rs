//! Answer use cases layered over the answer repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::failures::{self, AuthAction};
use super::ports::{
    AnswerCommand, AnswerQuery, AnswerRepository, AnswerRepositoryError, QuestionRepository,
};
use super::repository_errors::{map_answer_error, map_question_error};
use super::{
    AccessToken, Answer, AnswerId, Authorizer, ContentDraft, ContentKind, Error, Question,
    QuestionAnswers, QuestionId,
};

const QUESTION_INVALID: &str = "The question entered is invalid";
const QUESTION_TO_LIST_MISSING: &str =
    "The question with entered uuid whose details are to be seen does not exist";
const ANSWER_MISSING: &str = "Entered answer uuid does not exist";
const EDIT_NOT_OWNER: &str = "Only the answer owner can edit the answer";
const DELETE_NOT_PERMITTED: &str = "Only the answer owner or admin can delete the answer";

/// Service implementing [`AnswerCommand`] and [`AnswerQuery`].
#[derive(Clone)]
pub struct AnswerService<A, Q> {
    answers: Arc<A>,
    questions: Arc<Q>,
    authorizer: Authorizer,
}

impl<A, Q> AnswerService<A, Q> {
    /// Create a new service.
    pub fn new(answers: Arc<A>, questions: Arc<Q>, authorizer: Authorizer) -> Self {
        Self {
            answers,
            questions,
            authorizer,
        }
    }
}

impl<A, Q> AnswerService<A, Q>
where
    A: AnswerRepository,
    Q: QuestionRepository,
{
    async fn question(&self, id: &str, missing: &str) -> Result<Question, Error> {
        let id = QuestionId::new(id).map_err(|_| failures::question_not_found(missing))?;
        self.questions
            .get_question_by_id(&id)
            .await
            .map_err(map_question_error)?
            .ok_or_else(|| failures::question_not_found(missing))
    }

    async fn existing_answer(&self, id: &str) -> Result<Answer, Error> {
        let id = AnswerId::new(id).map_err(|_| failures::answer_not_found(ANSWER_MISSING))?;
        self.answers
            .get_answer_by_id(&id)
            .await
            .map_err(map_answer_error)?
            .ok_or_else(|| failures::answer_not_found(ANSWER_MISSING))
    }
}

#[async_trait]
impl<A, Q> AnswerCommand for AnswerService<A, Q>
where
    A: AnswerRepository,
    Q: QuestionRepository,
{
    async fn create_answer(
        &self,
        token: &AccessToken,
        question_id: &str,
        content: ContentDraft,
    ) -> Result<AnswerId, Error> {
        let caller = self
            .authorizer
            .authorize(token, AuthAction::CreateAnswer)
            .await?;
        let question = self.question(question_id, QUESTION_INVALID).await?;
        let content = content.validate(ContentKind::Answer)?;

        let draft = Answer::draft(question.id, caller.id, content, self.authorizer.now());
        let stored = self
            .answers
            .create_answer(&draft)
            .await
            .map_err(|err| match err {
                // The question was deleted between the lookup and the insert.
                AnswerRepositoryError::MissingReference { .. } => {
                    failures::question_not_found(QUESTION_INVALID)
                }
                other => map_answer_error(other),
            })?;
        info!(answer_id = %stored.id, question_id = %stored.question_id, "answer created");
        Ok(stored.id)
    }

    async fn edit_answer(
        &self,
        token: &AccessToken,
        answer_id: &str,
        content: ContentDraft,
    ) -> Result<AnswerId, Error> {
        let caller = self
            .authorizer
            .authorize(token, AuthAction::EditAnswer)
            .await?;
        let mut answer = self.existing_answer(answer_id).await?;
        if !answer.is_owned_by(&caller.id) {
            return Err(failures::not_permitted(EDIT_NOT_OWNER));
        }

        answer.content = content.validate(ContentKind::Answer)?;
        let stored = self
            .answers
            .edit_answer(&answer)
            .await
            .map_err(|err| match err {
                AnswerRepositoryError::NotFound { .. } => failures::answer_not_found(ANSWER_MISSING),
                other => map_answer_error(other),
            })?;
        info!(answer_id = %stored.id, "answer edited");
        Ok(stored.id)
    }

    async fn delete_answer(
        &self,
        token: &AccessToken,
        answer_id: &str,
    ) -> Result<AnswerId, Error> {
        let caller = self
            .authorizer
            .authorize(token, AuthAction::DeleteAnswer)
            .await?;
        let answer = self.existing_answer(answer_id).await?;
        if !answer.is_owned_by(&caller.id) && !caller.role.is_admin() {
            return Err(failures::not_permitted(DELETE_NOT_PERMITTED));
        }

        let deleted = self
            .answers
            .delete_answer_by_uuid(&answer.id)
            .await
            .map_err(map_answer_error)?;
        if deleted == 0 {
            return Err(failures::answer_not_found(ANSWER_MISSING));
        }
        info!(answer_id = %answer.id, by = %caller.id, "answer deleted");
        Ok(answer.id)
    }
}

#[async_trait]
impl<A, Q> AnswerQuery for AnswerService<A, Q>
where
    A: AnswerRepository,
    Q: QuestionRepository,
{
    async fn answers_to_question(
        &self,
        token: &AccessToken,
        question_id: &str,
    ) -> Result<QuestionAnswers, Error> {
        self.authorizer
            .authorize(token, AuthAction::ListAnswers)
            .await?;
        let question = self.question(question_id, QUESTION_TO_LIST_MISSING).await?;
        let answers = self
            .answers
            .get_all_answers_to_question(&question.id)
            .await
            .map_err(map_answer_error)?;
        Ok(QuestionAnswers { question, answers })
    }
}

#[cfg(test)]
#[path = "answer_service_tests.rs"]
mod tests;
