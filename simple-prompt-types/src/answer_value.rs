/// A single answer value stored in `Answers`.
///
/// Raw terminal input is always `Empty` or `String`. The other variants only
/// appear when a question's filter converts the accepted answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnswerValue {
    /// No answer: an empty line, a whitespace-only line, or end of input.
    #[default]
    Empty,

    /// A text answer, trailing whitespace already trimmed.
    String(String),

    /// An integer value (from a filter).
    Int(i64),

    /// A floating-point value (from a filter).
    Float(f64),

    /// A boolean value (from a filter).
    Bool(bool),
}

impl AnswerValue {
    /// Build a raw answer from a terminal line.
    ///
    /// Trailing whitespace is trimmed; an empty result is the `Empty` sentinel.
    pub fn from_line(line: &str) -> Self {
        let trimmed = line.trim_end();
        if trimmed.trim_start().is_empty() {
            Self::Empty
        } else {
            Self::String(trimmed.to_string())
        }
    }

    /// Check if this is the "no answer" sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::String(_) => "String",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Bool(_) => "Bool",
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for AnswerValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for AnswerValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for AnswerValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
