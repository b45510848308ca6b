//! Free-text bodies of questions and answers.

use std::fmt;

use super::{Error, failures};

/// Maximum characters in a question.
pub const QUESTION_CONTENT_MAX: usize = 500;
/// Maximum characters in an answer.
pub const ANSWER_CONTENT_MAX: usize = 8000;

/// Which kind of post the text belongs to; selects the length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Question,
    Answer,
}

impl ContentKind {
    /// Upper bound on the number of characters.
    pub fn max_len(self) -> usize {
        match self {
            Self::Question => QUESTION_CONTENT_MAX,
            Self::Answer => ANSWER_CONTENT_MAX,
        }
    }
}

/// Validation errors for post bodies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentValidationError {
    #[error("content must not be empty")]
    Empty,
    #[error("content must be at most {max} characters")]
    TooLong { max: usize },
}

/// Non-blank, length-checked post body. Surrounding whitespace is trimmed.
///
/// # Examples
/// ```
/// use backend::domain::{ContentKind, PostContent};
///
/// let body = PostContent::new(ContentKind::Question, "  What is Rust?  ").unwrap();
/// assert_eq!(body.as_ref(), "What is Rust?");
/// assert!(PostContent::new(ContentKind::Answer, " ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// Validate `value` against the limits for `kind`.
    pub fn new(kind: ContentKind, value: impl Into<String>) -> Result<Self, ContentValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ContentValidationError::Empty);
        }
        let max = kind.max_len();
        if trimmed.chars().count() > max {
            return Err(ContentValidationError::TooLong { max });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PostContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PostContent> for String {
    fn from(value: PostContent) -> Self {
        value.0
    }
}

/// Post text as submitted, tagged with the request field it arrived in.
///
/// Services validate drafts only after the caller has been authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDraft {
    field: &'static str,
    text: String,
}

impl ContentDraft {
    pub fn new(field: &'static str, text: impl Into<String>) -> Self {
        Self {
            field,
            text: text.into(),
        }
    }

    /// Request field the text came from.
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check the text against the limits for `kind`.
    ///
    /// Failures are `invalid_request` errors naming the originating field.
    pub fn validate(self, kind: ContentKind) -> Result<PostContent, Error> {
        let field = self.field;
        PostContent::new(kind, self.text).map_err(|err| failures::invalid_content(field, &err))
    }
}
