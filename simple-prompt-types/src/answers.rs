use indexmap::IndexMap;

use crate::{AnswerKey, AnswerValue};

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for key: {0}")]
    Missing(AnswerKey),

    #[error("Type mismatch at key '{key}': expected {expected}, got {actual}")]
    TypeMismatch {
        key: AnswerKey,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Answers collected by a prompt session.
///
/// Keys are kept in the order the questions were accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    values: IndexMap<AnswerKey, AnswerValue>,
}

impl Answers {
    /// Create a new empty answer mapping.
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Insert an answer under the given key.
    ///
    /// Returns the previous value if the key was already present; its position
    /// in the ordering is kept.
    pub fn insert(
        &mut self,
        key: impl Into<AnswerKey>,
        value: impl Into<AnswerValue>,
    ) -> Option<AnswerValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Get the answer stored under `key`.
    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    /// Check if an answer exists for the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Get an iterator over all key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&AnswerKey, &AnswerValue)> {
        self.values.iter()
    }

    /// Get an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &AnswerKey> {
        self.values.keys()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // === Convenience accessors ===

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a AnswerValue) -> Option<T>,
    ) -> Result<T, AnswerError> {
        let value = self
            .get(key)
            .ok_or_else(|| AnswerError::Missing(AnswerKey::new(key)))?;
        extract(value).ok_or_else(|| AnswerError::TypeMismatch {
            key: AnswerKey::new(key),
            expected,
            actual: value.type_name(),
        })
    }

    /// Get a string answer.
    pub fn get_string(&self, key: &str) -> Result<&str, AnswerError> {
        self.typed(key, "String", AnswerValue::as_str)
    }

    /// Get an integer answer.
    pub fn get_int(&self, key: &str) -> Result<i64, AnswerError> {
        self.typed(key, "Int", AnswerValue::as_int)
    }

    /// Get a float answer.
    pub fn get_float(&self, key: &str) -> Result<f64, AnswerError> {
        self.typed(key, "Float", AnswerValue::as_float)
    }

    /// Get a boolean answer.
    pub fn get_bool(&self, key: &str) -> Result<bool, AnswerError> {
        self.typed(key, "Bool", AnswerValue::as_bool)
    }

    /// Check if the answer for `key` exists and is not the empty sentinel.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_empty())
    }
}

impl IntoIterator for Answers {
    type Item = (AnswerKey, AnswerValue);
    type IntoIter = indexmap::map::IntoIter<AnswerKey, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a AnswerKey, &'a AnswerValue);
    type IntoIter = indexmap::map::Iter<'a, AnswerKey, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut answers = Answers::new();
        answers.insert("Name", "Alice");
        answers.insert("Age", AnswerValue::Int(30));

        assert_eq!(answers.get_string("Name").unwrap(), "Alice");
        assert_eq!(answers.get_int("Age").unwrap(), 30);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut answers = Answers::new();
        answers.insert("zeta", "1");
        answers.insert("alpha", "2");
        answers.insert("mid", "3");

        let keys: Vec<&str> = answers.keys().map(AnswerKey::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn type_mismatch_error() {
        let mut answers = Answers::new();
        answers.insert("Age", AnswerValue::Int(30));

        let result = answers.get_string("Age");
        assert!(matches!(result, Err(AnswerError::TypeMismatch { .. })));
        assert!(matches!(
            answers.get_bool("Nope"),
            Err(AnswerError::Missing(_))
        ));
    }

    #[test]
    fn empty_answer_has_no_value() {
        let mut answers = Answers::new();
        answers.insert("Nickname", AnswerValue::Empty);

        assert!(answers.contains("Nickname"));
        assert!(!answers.has_value("Nickname"));
    }
}
