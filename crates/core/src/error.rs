use thiserror::Error;

use crate::session::SessionState;

/// The single failure kind a question fetch can end in.
///
/// Transport errors, non-2xx responses and malformed payloads all collapse
/// into this value; `reason` is kept for diagnostics only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not fetch quiz data: {reason}")]
pub struct FetchFailure {
    reason: String,
}

impl FetchFailure {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors emitted by `QuizSession` when an operation is not valid in its state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a question fetch is already in flight")]
    FetchInFlight,

    #[error("cannot {operation} while the session is {state}")]
    InvalidTransition {
        operation: &'static str,
        state: SessionState,
    },

    #[error("choice {index} is out of range ({len} choices)")]
    ChoiceOutOfRange { index: usize, len: usize },
}
