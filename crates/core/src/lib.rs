#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;
pub mod shuffle;
pub mod text;

pub use error::{FetchFailure, SessionError};
pub use model::{AnswerChoice, FetchTicket, Question, QuestionError};
pub use session::{
    AnswerOutcome, FetchApplied, PresentedQuestion, QuizSession, Score, SessionState,
};
pub use shuffle::{shuffle, shuffle_with};
pub use text::sanitize;
