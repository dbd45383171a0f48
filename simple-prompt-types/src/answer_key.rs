use std::borrow::Borrow;
use std::fmt;

/// The key an accepted answer is stored under, e.g. `"FirstName"`.
///
/// Derived once per question: an explicit id wins, otherwise the question
/// text with all whitespace removed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnswerKey {
    key: String,
}

impl AnswerKey {
    /// Create a key verbatim, without any whitespace stripping.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Derive the key for a question from its id and text.
    pub fn derive(id: Option<&str>, text: &str) -> Self {
        match id.filter(|id| !id.is_empty()) {
            Some(id) => Self::new(id),
            None => Self::new(text.chars().filter(|c| !c.is_whitespace()).collect::<String>()),
        }
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl From<&str> for AnswerKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AnswerKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl Borrow<str> for AnswerKey {
    fn borrow(&self) -> &str {
        &self.key
    }
}

impl AsRef<str> for AnswerKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}
