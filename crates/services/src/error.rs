//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::QuestionError;

/// Errors emitted by a `QuestionProvider`.
///
/// These never reach the session: `QuizLoopService` collapses every variant
/// into a single `FetchFailure`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("invalid question service url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed question payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("question service returned response code {0}")]
    ResponseCode(u8),
    #[error("question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}
