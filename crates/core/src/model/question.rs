use thiserror::Error;

use crate::text::sanitize;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("correct answer is empty")]
    EmptyCorrectAnswer,

    #[error("question has no incorrect answers")]
    NoIncorrectAnswers,
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// One multiple-choice trivia question as delivered by the provider.
///
/// All text fields are kept exactly as fetched (HTML-escaped); answer
/// comparison happens on these raw strings and sanitizing is a display concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    category: String,
    difficulty: String,
    question_text: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl Question {
    /// Build a question from provider fields.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyCorrectAnswer` if the correct answer is blank.
    /// Returns `QuestionError::NoIncorrectAnswers` if there is nothing to choose between.
    pub fn new(
        category: impl Into<String>,
        difficulty: impl Into<String>,
        question_text: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let correct_answer = correct_answer.into();
        if correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyCorrectAnswer);
        }
        if incorrect_answers.is_empty() {
            return Err(QuestionError::NoIncorrectAnswers);
        }

        Ok(Self {
            category: category.into(),
            difficulty: difficulty.into(),
            question_text: question_text.into(),
            correct_answer,
            incorrect_answers,
        })
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    /// Returns true if `text` is exactly the raw correct answer.
    #[must_use]
    pub fn is_correct(&self, text: &str) -> bool {
        self.correct_answer == text
    }

    /// The unshuffled choice set: correct answer first, then the incorrect ones.
    #[must_use]
    pub fn choices(&self) -> Vec<AnswerChoice> {
        std::iter::once(AnswerChoice::new(self.correct_answer.clone(), true))
            .chain(
                self.incorrect_answers
                    .iter()
                    .map(|answer| AnswerChoice::new(answer.clone(), false)),
            )
            .collect()
    }
}

//
// ─── ANSWER CHOICE ────────────────────────────────────────────────────────────
//

/// A single selectable answer, derived per question and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerChoice {
    pub text: String,
    pub is_correct: bool,
}

impl AnswerChoice {
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }

    /// Plain display string with entities decoded.
    #[must_use]
    pub fn display_text(&self) -> String {
        sanitize(&self.text)
    }
}
