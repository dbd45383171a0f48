use std::fmt;
use std::sync::Arc;

use crate::{AnswerKey, AnswerValue};

/// Predicate deciding whether a candidate answer is acceptable.
///
/// The candidate is `AnswerValue::Empty` when the user gave no answer and no
/// default applied.
pub type Validator = Arc<dyn Fn(&AnswerValue) -> bool + Send + Sync>;

/// Transform applied to an accepted answer before it is stored.
///
/// An `Err` aborts the session with `PromptError::Filter`.
pub type Filter = Arc<dyn Fn(AnswerValue) -> anyhow::Result<AnswerValue> + Send + Sync>;

/// A single question as supplied by the caller.
///
/// Only `text` is mandatory. Everything else has a default that is resolved
/// when the question is turned into a [`NormalizedQuestion`].
///
/// # Example
///
/// ```
/// use simple_prompt_types::{AnswerValue, Question};
///
/// let age = Question::new("Age")
///     .required()
///     .validate(|answer| answer.as_str().is_some_and(|s| s.parse::<u8>().is_ok()))
///     .filter(|answer| {
///         let text = answer.as_str().unwrap_or_default();
///         Ok(AnswerValue::Int(text.parse()?))
///     });
/// assert!(age.is_required());
/// ```
#[derive(Clone, Default)]
pub struct Question {
    /// The prompt text shown to the user.
    text: String,

    /// Explicit answer key.
    id: Option<String>,

    /// Whether an empty answer is rejected.
    required: bool,

    /// Substituted when the user gives no answer.
    default: Option<String>,

    validate: Option<Validator>,

    filter: Option<Filter>,

    /// Palette name or raw terminal style code.
    color: Option<String>,
}

impl Question {
    /// Create a new question with the given prompt text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Store the answer under `id` instead of the whitespace-stripped text.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Reject empty answers (after default substitution).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Use `value` when the user gives no answer.
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the validator. Rejected answers are asked again.
    pub fn validate(mut self, f: impl Fn(&AnswerValue) -> bool + Send + Sync + 'static) -> Self {
        self.validate = Some(Arc::new(f));
        self
    }

    /// Set the filter applied to the accepted answer.
    pub fn filter(
        mut self,
        f: impl Fn(AnswerValue) -> anyhow::Result<AnswerValue> + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(Arc::new(f));
        self
    }

    /// Render the label in a palette color (e.g. `"lightBlue"`) or raw style code (e.g. `"4;33"`).
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn get_default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn get_color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn normalize(&self) -> NormalizedQuestion {
        NormalizedQuestion::from(self)
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("text", &self.text)
            .field("id", &self.id)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("validate", &self.validate.is_some())
            .field("filter", &self.filter.is_some())
            .field("color", &self.color)
            .finish()
    }
}

/// A question with every optional field resolved.
///
/// Built once when the question is dequeued and never changed afterwards;
/// retry state lives in the sequencer, not here.
#[derive(Clone)]
pub struct NormalizedQuestion {
    text: String,
    id: Option<String>,
    required: bool,
    default: Option<String>,
    validate: Validator,
    filter: Option<Filter>,
    color: Option<String>,
}

impl From<&Question> for NormalizedQuestion {
    fn from(question: &Question) -> Self {
        let non_empty = |s: &Option<String>| s.clone().filter(|s| !s.is_empty());

        Self {
            text: question.text.clone(),
            id: non_empty(&question.id),
            required: question.required,
            default: non_empty(&question.default),
            validate: question
                .validate
                .clone()
                .unwrap_or_else(|| Arc::new(|_: &AnswerValue| true)),
            filter: question.filter.clone(),
            color: non_empty(&question.color),
        }
    }
}

impl NormalizedQuestion {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Run the validator on a candidate answer.
    pub fn accepts(&self, answer: &AnswerValue) -> bool {
        (self.validate)(answer)
    }

    /// Apply the filter, or pass the answer through when there is none.
    pub fn apply_filter(&self, answer: AnswerValue) -> anyhow::Result<AnswerValue> {
        match &self.filter {
            Some(filter) => filter(answer),
            None => Ok(answer),
        }
    }

    /// The key this question's answer is stored under.
    pub fn key(&self) -> AnswerKey {
        AnswerKey::derive(self.id(), &self.text)
    }

    /// Capture the fields needed to finish a retried question.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            id: self.id.clone(),
            text: self.text.clone(),
            default: self.default.clone(),
        }
    }
}

impl fmt::Debug for NormalizedQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedQuestion")
            .field("text", &self.text)
            .field("id", &self.id)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("filter", &self.filter.is_some())
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// The pristine identity of a question, taken at its first failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub id: Option<String>,
    pub text: String,
    pub default: Option<String>,
}

impl Snapshot {
    pub fn key(&self) -> AnswerKey {
        AnswerKey::derive(self.id.as_deref(), &self.text)
    }
}

/// Why a question is being asked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryTag {
    /// A required question got no answer.
    Required,
    /// The validator rejected the answer.
    Invalid,
}

impl RetryTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for RetryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
