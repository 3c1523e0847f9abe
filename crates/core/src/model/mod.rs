mod question;
mod ticket;

pub use question::{AnswerChoice, Question, QuestionError};
pub use ticket::FetchTicket;
