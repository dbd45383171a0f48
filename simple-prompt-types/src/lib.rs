//! Core types for the simple-prompt crate.
//!
//! This crate provides the foundational types for a prompt session:
//! - `Question` and `NormalizedQuestion` - What to ask and how to check the answer
//! - `Answers`, `AnswerKey` and `AnswerValue` - The collected result
//! - `TerminalPort` - The line-oriented terminal a session talks to
//! - `PromptError` - Session-level failures

mod answer_key;
pub use answer_key::AnswerKey;

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::{AnswerError, Answers};

mod question;
pub use question::{Filter, NormalizedQuestion, Question, RetryTag, Snapshot, Validator};

mod error;
pub use error::PromptError;

mod port;
pub use port::{ReadOutcome, TerminalPort};
