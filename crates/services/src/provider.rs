use async_trait::async_trait;
use serde::Deserialize;

use quiz_core::{Question, QuestionError};

use crate::error::ProviderError;

/// Source of question batches.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Fetch one batch, in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` for transport, status or payload failures.
    async fn fetch_batch(&self) -> Result<Vec<Question>, ProviderError>;
}

/// Wire shape of one question record.
///
/// Mirrors the provider JSON so the domain `Question` stays free of
/// serialization concerns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    pub category: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl QuestionRecord {
    /// Convert the record into a validated domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the record has no usable answers.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(
            self.category,
            self.difficulty,
            self.question,
            self.correct_answer,
            self.incorrect_answers,
        )
    }
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    #[serde(default)]
    response_code: u8,
    results: Vec<QuestionRecord>,
}

// Open Trivia DB response codes.
const RESPONSE_SUCCESS: u8 = 0;
const RESPONSE_NO_RESULTS: u8 = 1;

/// Decode a `{ "results": [...] }` body into questions.
///
/// # Errors
///
/// Returns `ProviderError::Decode` for malformed JSON,
/// `ProviderError::ResponseCode` for provider-side failures and
/// `ProviderError::InvalidQuestion` for records that fail validation.
pub fn decode_batch(body: &str) -> Result<Vec<Question>, ProviderError> {
    let response: BatchResponse = serde_json::from_str(body)?;

    match response.response_code {
        RESPONSE_SUCCESS => {}
        RESPONSE_NO_RESULTS => return Ok(Vec::new()),
        code => return Err(ProviderError::ResponseCode(code)),
    }

    response
        .results
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_question()
                .map_err(|source| ProviderError::InvalidQuestion { index, source })
        })
        .collect()
}
