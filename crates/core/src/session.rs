use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{FetchFailure, SessionError};
use crate::model::{AnswerChoice, FetchTicket, Question};
use crate::shuffle::shuffle_with;

//
// ─── PUBLIC STATE ─────────────────────────────────────────────────────────────
//

/// Observable lifecycle of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    Loading,
    Active,
    Finished,
    Error,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Active => "active",
            SessionState::Finished => "finished",
            SessionState::Error => "in error",
        };
        f.write_str(label)
    }
}

/// Whether a fetch completion was applied or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    Applied,
    Stale,
}

/// Result of submitting one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

/// The question currently on screen together with its cached choice set.
#[derive(Debug, Clone, Copy)]
pub struct PresentedQuestion<'a> {
    pub question: &'a Question,
    /// 1-based position within the batch.
    pub number: usize,
    pub total: usize,
    pub choices: &'a [AnswerChoice],
}

//
// ─── INTERNALS ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
struct CachedChoices {
    index: usize,
    choices: Vec<AnswerChoice>,
}

#[derive(Debug, Clone)]
struct Round {
    questions: Vec<Question>,
    current_index: usize,
    correct_count: usize,
    choices: Option<CachedChoices>,
}

impl Round {
    fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_index: 0,
            correct_count: 0,
            choices: None,
        }
    }

    fn is_exhausted(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    fn ensure_choices(&mut self, rng: &mut StdRng) {
        let index = self.current_index;
        if self
            .choices
            .as_ref()
            .is_some_and(|cached| cached.index == index)
        {
            return;
        }
        let choices = shuffle_with(&self.questions[index].choices(), rng);
        self.choices = Some(CachedChoices { index, choices });
    }

    fn presented(&self) -> PresentedQuestion<'_> {
        let choices = self
            .choices
            .as_ref()
            .map_or(&[][..], |cached| cached.choices.as_slice());
        PresentedQuestion {
            question: &self.questions[self.current_index],
            number: self.current_index + 1,
            total: self.questions.len(),
            choices,
        }
    }

    fn record_answer(&mut self, choice_text: &str) -> bool {
        let correct = self.questions[self.current_index].is_correct(choice_text);
        if correct {
            self.correct_count += 1;
        }
        self.current_index += 1;
        self.choices = None;
        correct
    }

    fn score(&self) -> Score {
        Score {
            correct: self.correct_count,
            total: self.questions.len(),
        }
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Loading,
    Active(Round),
    Finished(Round),
    Error(FetchFailure),
}

impl Phase {
    fn state(&self) -> SessionState {
        match self {
            Phase::Idle => SessionState::Idle,
            Phase::Loading => SessionState::Loading,
            Phase::Active(_) => SessionState::Active,
            Phase::Finished(_) => SessionState::Finished,
            Phase::Error(_) => SessionState::Error,
        }
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// Owned quiz session: one batch of questions, a cursor and a running score.
///
/// The session is mutated only through its operations; every fetch is tagged
/// with a `FetchTicket` so a response that outlives a restart cannot land in
/// a newer session.
pub struct QuizSession {
    phase: Phase,
    generation: u64,
    rng: StdRng,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// A fresh idle session seeded from thread-local entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// A fresh idle session with deterministic choice shuffling.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
            rng,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.phase.state()
    }

    /// Generation of the most recently issued fetch ticket (0 before any fetch).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Enter `Loading` and issue a ticket for the fetch the caller will run.
    ///
    /// Allowed from `Idle`, `Finished` and `Error` (manual retry).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::FetchInFlight` while already loading.
    /// Returns `SessionError::InvalidTransition` while a quiz is in progress.
    pub fn start_fetch(&mut self) -> Result<FetchTicket, SessionError> {
        match self.phase {
            Phase::Loading => return Err(SessionError::FetchInFlight),
            Phase::Active(_) => {
                return Err(SessionError::InvalidTransition {
                    operation: "start a fetch",
                    state: SessionState::Active,
                });
            }
            Phase::Idle | Phase::Finished(_) | Phase::Error(_) => {}
        }

        self.generation += 1;
        self.phase = Phase::Loading;
        Ok(FetchTicket::new(self.generation))
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// Completions for an older generation, or arriving when the session is no
    /// longer loading, are reported as `Stale` and change nothing.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<Question>, FetchFailure>,
    ) -> FetchApplied {
        if !matches!(self.phase, Phase::Loading) || ticket.generation() != self.generation {
            return FetchApplied::Stale;
        }

        self.phase = match outcome {
            Ok(questions) if questions.is_empty() => Phase::Finished(Round::new(questions)),
            Ok(questions) => Phase::Active(Round::new(questions)),
            Err(failure) => Phase::Error(failure),
        };
        FetchApplied::Applied
    }

    /// The current question and its shuffled choices.
    ///
    /// The choice set is shuffled once per question and cached, so repeated
    /// calls return the same order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Active`.
    pub fn current_question(&mut self) -> Result<PresentedQuestion<'_>, SessionError> {
        let state = self.state();
        let Phase::Active(round) = &mut self.phase else {
            return Err(SessionError::InvalidTransition {
                operation: "present a question",
                state,
            });
        };
        round.ensure_choices(&mut self.rng);
        Ok(round.presented())
    }

    /// Submit an answer by its raw text and advance to the next question.
    ///
    /// The cursor always moves by exactly one; the score moves only when
    /// `choice_text` equals the raw correct answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Active`.
    pub fn submit_answer(&mut self, choice_text: &str) -> Result<AnswerOutcome, SessionError> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::Active(mut round) = phase else {
            let state = phase.state();
            self.phase = phase;
            return Err(SessionError::InvalidTransition {
                operation: "submit an answer",
                state,
            });
        };

        let correct = round.record_answer(choice_text);
        let finished = round.is_exhausted();
        self.phase = if finished {
            Phase::Finished(round)
        } else {
            Phase::Active(round)
        };

        Ok(AnswerOutcome { correct, finished })
    }

    /// Submit the `index`-th entry of the current (shuffled) choice set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ChoiceOutOfRange` if `index` is past the choice set;
    /// the session is left untouched in that case.
    /// Returns `SessionError::InvalidTransition` outside `Active`.
    pub fn submit_choice(&mut self, index: usize) -> Result<AnswerOutcome, SessionError> {
        let text = {
            let presented = self.current_question()?;
            let len = presented.choices.len();
            presented
                .choices
                .get(index)
                .map(|choice| choice.text.clone())
                .ok_or(SessionError::ChoiceOutOfRange { index, len })?
        };
        self.submit_answer(&text)
    }

    /// Drop all session data and return to `Idle`.
    ///
    /// Valid from `Finished` and `Error`, and from `Loading` to abandon an
    /// in-flight fetch (its completion will then be stale).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` from `Idle` or `Active`.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Finished(_) | Phase::Error(_) | Phase::Loading => {
                self.phase = Phase::Idle;
                Ok(())
            }
            Phase::Idle | Phase::Active(_) => Err(SessionError::InvalidTransition {
                operation: "restart",
                state: self.state(),
            }),
        }
    }

    fn round(&self) -> Option<&Round> {
        match &self.phase {
            Phase::Active(round) | Phase::Finished(round) => Some(round),
            Phase::Idle | Phase::Loading | Phase::Error(_) => None,
        }
    }

    /// Zero-based cursor; `None` when no batch is loaded.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.round().map(|round| round.current_index)
    }

    #[must_use]
    pub fn correct_count(&self) -> Option<usize> {
        self.round().map(|round| round.correct_count)
    }

    /// Number of questions in the loaded batch.
    #[must_use]
    pub fn total(&self) -> Option<usize> {
        self.round().map(|round| round.questions.len())
    }

    #[must_use]
    pub fn score(&self) -> Option<Score> {
        self.round().map(Round::score)
    }

    /// The failure that ended the last fetch, while in `Error`.
    #[must_use]
    pub fn failure(&self) -> Option<&FetchFailure> {
        match &self.phase {
            Phase::Error(failure) => Some(failure),
            _ => None,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("state", &self.state())
            .field("generation", &self.generation)
            .field("current_index", &self.current_index())
            .field("correct_count", &self.correct_count())
            .field("total", &self.total())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
