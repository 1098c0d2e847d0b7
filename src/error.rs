//! Error type shared by the quiz core.

use thiserror::Error;

use crate::model::AttemptStatus;

/// Error returned by a `SessionListener` that failed to take a result.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("invalid quiz definition: {0}")]
    InvalidQuizDefinition(String),

    #[error("cannot {operation} while session is {status}")]
    InvalidOperation {
        operation: &'static str,
        status: AttemptStatus,
    },

    #[error("question set is empty")]
    EmptyQuestionSet,

    #[error("option {index} out of range for question {question_id} ({count} options)")]
    OptionOutOfRange {
        question_id: String,
        index: usize,
        count: usize,
    },

    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error("result listener failed: {0}")]
    Listener(#[source] ListenerError),

    #[error("cannot parse quiz: {0}")]
    Parse(String),
}

impl QuizError {
    /// True for errors raised by calling an operation in the wrong state.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, QuizError::InvalidOperation { .. })
    }
}
