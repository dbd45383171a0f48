use crate::{AnswerKey, Answers};

/// Error type for a prompt session.
///
/// Input problems (`required`, `invalid`) never show up here; they are retried
/// inside the session. Every variant carries the answers accepted before the
/// session stopped.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Input ended while a question still needed another attempt.
    #[error("Input closed before '{pending}' was answered")]
    InputClosed { pending: AnswerKey, partial: Answers },

    /// User cancelled the session (Ctrl+C).
    #[error("Prompt cancelled by user")]
    Cancelled { partial: Answers },

    /// A question's filter returned an error.
    #[error("Filter for '{key}' failed: {source}")]
    Filter {
        key: AnswerKey,
        partial: Answers,
        #[source]
        source: anyhow::Error,
    },

    /// Terminal failure (I/O error, closed device, etc.)
    #[error("Terminal error: {source}")]
    Terminal {
        partial: Answers,
        #[source]
        source: anyhow::Error,
    },
}

impl PromptError {
    /// Create a terminal error from any error type.
    pub fn terminal(err: impl Into<anyhow::Error>, partial: Answers) -> Self {
        Self::Terminal {
            partial,
            source: err.into(),
        }
    }

    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// The answers accepted before the session stopped.
    pub fn partial(&self) -> &Answers {
        match self {
            Self::InputClosed { partial, .. }
            | Self::Cancelled { partial }
            | Self::Filter { partial, .. }
            | Self::Terminal { partial, .. } => partial,
        }
    }

    /// Consume the error, keeping only the partial answers.
    pub fn into_partial(self) -> Answers {
        match self {
            Self::InputClosed { partial, .. }
            | Self::Cancelled { partial }
            | Self::Filter { partial, .. }
            | Self::Terminal { partial, .. } => partial,
        }
    }
}
