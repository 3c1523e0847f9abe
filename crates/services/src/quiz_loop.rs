use std::sync::Arc;

use quiz_core::{FetchApplied, FetchFailure, FetchTicket, Question, QuizSession, SessionError};

use crate::provider::QuestionProvider;

/// Outcome of one fetch, still tagged with the ticket it was issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub outcome: Result<Vec<Question>, FetchFailure>,
}

/// Runs question fetches for a session and hands the results back.
///
/// The session itself is never held across the await: callers obtain a
/// ticket, await `fetch`, then `apply` the completion.
#[derive(Clone)]
pub struct QuizLoopService {
    provider: Arc<dyn QuestionProvider>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(provider: Arc<dyn QuestionProvider>) -> Self {
        Self { provider }
    }

    /// Run the provider once for `ticket`.
    ///
    /// Every provider error becomes the same `FetchFailure`; the cause is only logged.
    pub async fn fetch(&self, ticket: FetchTicket) -> FetchCompletion {
        tracing::info!(%ticket, "fetching question batch");
        let outcome = match self.provider.fetch_batch().await {
            Ok(questions) => {
                tracing::info!(%ticket, count = questions.len(), "question batch received");
                Ok(questions)
            }
            Err(err) => {
                tracing::warn!(%ticket, error = %err, "question fetch failed");
                Err(FetchFailure::new(err.to_string()))
            }
        };
        FetchCompletion { ticket, outcome }
    }

    /// Hand a completion to the session, dropping it if it is stale.
    pub fn apply(&self, session: &mut QuizSession, completion: FetchCompletion) -> FetchApplied {
        let ticket = completion.ticket;
        let applied = session.complete_fetch(ticket, completion.outcome);
        if applied == FetchApplied::Stale {
            tracing::debug!(
                %ticket,
                latest = session.generation(),
                state = %session.state(),
                "discarding stale question batch"
            );
        }
        applied
    }

    /// Start, run and apply a fetch for a session the caller holds across the await.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the session cannot start a fetch in its current state.
    pub async fn load(&self, session: &mut QuizSession) -> Result<FetchApplied, SessionError> {
        let ticket = session.start_fetch()?;
        let completion = self.fetch(ticket).await;
        Ok(self.apply(session, completion))
    }
}
