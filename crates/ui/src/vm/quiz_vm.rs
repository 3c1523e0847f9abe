use quiz_core::{
    AnswerChoice, FetchApplied, FetchTicket, QuizSession, SessionState, sanitize,
};
use services::{FetchCompletion, QuizLoopService};

const WELCOME_HEADER: &str = "Welcome";
const IDLE_PROMPT: &str = "Press the button below to start";
const START_LABEL: &str = "Start";

const LOADING_HEADER: &str = "Loading";
const LOADING_PROMPT: &str = "Please wait a moment";

const FINISHED_PROMPT: &str = "Press the button below to try again";
const HOME_LABEL: &str = "Back to Home";

const ERROR_HEADER: &str = "Error";
const ERROR_PROMPT: &str = "Could not load quiz data";
const RETRY_LABEL: &str = "Retry";

/// Everything the user can ask the quiz screen to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    /// The single primary button: start, retry or back to home depending on state.
    Primary,
    /// Pick the answer at this position of the displayed choices.
    Choose(usize),
}

/// Display strings for one frame of the quiz screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreen {
    pub header: String,
    pub category: String,
    pub difficulty: String,
    pub question: String,
    pub choices: Vec<String>,
    pub primary_button: Option<&'static str>,
}

impl QuizScreen {
    fn message(header: impl Into<String>, body: &str, primary_button: Option<&'static str>) -> Self {
        Self {
            header: header.into(),
            category: String::new(),
            difficulty: String::new(),
            question: body.to_string(),
            choices: Vec::new(),
            primary_button,
        }
    }
}

/// Maps a `QuizSession` onto screen text and routes user intents back into it.
///
/// The screen is rebuilt after every mutation so rendering only ever reads.
pub struct QuizVm {
    session: QuizSession,
    choices: Vec<AnswerChoice>,
    screen: QuizScreen,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        let mut vm = Self {
            session,
            choices: Vec::new(),
            screen: QuizScreen::message(WELCOME_HEADER, IDLE_PROMPT, Some(START_LABEL)),
        };
        vm.refresh();
        vm
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn screen(&self) -> &QuizScreen {
        &self.screen
    }

    /// Position of the correct answer among the displayed choices.
    #[must_use]
    pub fn correct_choice_index(&self) -> Option<usize> {
        self.choices.iter().position(|choice| choice.is_correct)
    }

    /// Apply one user intent.
    ///
    /// Returns a ticket when the intent started a fetch; the caller runs it
    /// through `QuizLoopService::fetch` and hands the completion to `apply`.
    /// Intents that make no sense in the current state are ignored.
    pub fn dispatch(&mut self, intent: QuizIntent) -> Option<FetchTicket> {
        let state = self.session.state();
        let ticket = match (intent, state) {
            (QuizIntent::Primary, SessionState::Idle | SessionState::Error) => {
                match self.session.start_fetch() {
                    Ok(ticket) => Some(ticket),
                    Err(err) => {
                        tracing::warn!(error = %err, "could not start fetch");
                        None
                    }
                }
            }
            (QuizIntent::Primary, SessionState::Finished) => {
                if let Err(err) = self.session.restart() {
                    tracing::warn!(error = %err, "could not restart quiz");
                }
                None
            }
            (QuizIntent::Choose(index), SessionState::Active) => {
                match self.session.submit_choice(index) {
                    Ok(outcome) => {
                        tracing::debug!(
                            index,
                            correct = outcome.correct,
                            finished = outcome.finished,
                            "answer submitted"
                        );
                    }
                    Err(err) => tracing::debug!(error = %err, "ignoring answer"),
                }
                None
            }
            _ => {
                tracing::debug!(?intent, %state, "ignoring intent");
                None
            }
        };
        self.refresh();
        ticket
    }

    /// Deliver a finished fetch. Stale completions leave the screen untouched.
    pub fn apply(&mut self, quiz_loop: &QuizLoopService, completion: FetchCompletion) -> FetchApplied {
        let applied = quiz_loop.apply(&mut self.session, completion);
        if applied == FetchApplied::Applied {
            self.refresh();
        }
        applied
    }

    fn refresh(&mut self) {
        self.choices.clear();
        self.screen = match self.session.state() {
            SessionState::Idle => QuizScreen::message(WELCOME_HEADER, IDLE_PROMPT, Some(START_LABEL)),
            SessionState::Loading => QuizScreen::message(LOADING_HEADER, LOADING_PROMPT, None),
            SessionState::Error => QuizScreen::message(ERROR_HEADER, ERROR_PROMPT, Some(RETRY_LABEL)),
            SessionState::Finished => {
                let header = self.session.score().map_or_else(String::new, |score| {
                    format!("You got {}/{} correct", score.correct, score.total)
                });
                QuizScreen::message(header, FINISHED_PROMPT, Some(HOME_LABEL))
            }
            SessionState::Active => match self.session.current_question() {
                Ok(presented) => {
                    self.choices = presented.choices.to_vec();
                    QuizScreen {
                        header: format!("Question {}", presented.number),
                        category: format!("[Category] {}", sanitize(presented.question.category())),
                        difficulty: format!(
                            "[Difficulty] {}",
                            sanitize(presented.question.difficulty())
                        ),
                        question: sanitize(presented.question.question_text()),
                        choices: presented.choices.iter().map(AnswerChoice::display_text).collect(),
                        primary_button: None,
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "active session without a question");
                    QuizScreen::message(ERROR_HEADER, ERROR_PROMPT, None)
                }
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use quiz_core::{FetchFailure, Question};
    use services::{ProviderError, QuestionProvider};

    use super::*;

    struct NoProvider;

    #[async_trait]
    impl QuestionProvider for NoProvider {
        async fn fetch_batch(&self) -> Result<Vec<Question>, ProviderError> {
            Ok(Vec::new())
        }
    }

    fn quiz_loop() -> QuizLoopService {
        QuizLoopService::new(Arc::new(NoProvider))
    }

    fn question(text: &str) -> Question {
        Question::new(
            "Science &amp; Nature",
            "easy",
            text,
            "Mercury",
            vec!["Venus".into(), "Mars".into(), "Earth".into()],
        )
        .expect("valid question")
    }

    fn active_vm(questions: Vec<Question>) -> QuizVm {
        let mut vm = QuizVm::new(QuizSession::with_seed(11));
        let ticket = vm.dispatch(QuizIntent::Primary).expect("fetch started");
        vm.apply(
            &quiz_loop(),
            FetchCompletion {
                ticket,
                outcome: Ok(questions),
            },
        );
        vm
    }

    #[test]
    fn idle_screen_offers_start() {
        let vm = QuizVm::new(QuizSession::new());
        let screen = vm.screen();
        assert_eq!(screen.header, "Welcome");
        assert_eq!(screen.question, "Press the button below to start");
        assert_eq!(screen.primary_button, Some("Start"));
        assert!(screen.choices.is_empty());
    }

    #[test]
    fn primary_from_idle_starts_loading() {
        let mut vm = QuizVm::new(QuizSession::new());
        let ticket = vm.dispatch(QuizIntent::Primary);
        assert!(ticket.is_some());
        assert_eq!(vm.state(), SessionState::Loading);
        assert_eq!(vm.screen().header, "Loading");
        assert_eq!(vm.screen().primary_button, None);
    }

    #[test]
    fn primary_while_loading_is_ignored() {
        let mut vm = QuizVm::new(QuizSession::new());
        vm.dispatch(QuizIntent::Primary);
        let generation = vm.session().generation();
        assert_eq!(vm.dispatch(QuizIntent::Primary), None);
        assert_eq!(vm.session().generation(), generation);
        assert_eq!(vm.state(), SessionState::Loading);
    }

    #[test]
    fn active_screen_shows_sanitized_question() {
        let vm = active_vm(vec![question("Which planet is closest to the &quot;Sun&quot;?")]);
        let screen = vm.screen();
        assert_eq!(screen.header, "Question 1");
        assert_eq!(screen.category, "[Category] Science & Nature");
        assert_eq!(screen.difficulty, "[Difficulty] easy");
        assert_eq!(screen.question, "Which planet is closest to the \"Sun\"?");
        assert_eq!(screen.choices.len(), 4);
        assert!(screen.choices.iter().any(|choice| choice == "Mercury"));
        assert_eq!(screen.primary_button, None);
    }

    #[test]
    fn screen_is_stable_between_reads() {
        let vm = active_vm(vec![question("Q1")]);
        let first = vm.screen().clone();
        assert_eq!(vm.screen(), &first);
        let index = vm.correct_choice_index().expect("correct choice");
        assert_eq!(first.choices[index], "Mercury");
    }

    #[test]
    fn answering_every_question_reports_score() {
        let mut vm = active_vm(vec![question("Q1"), question("Q2")]);
        let correct = vm.correct_choice_index().expect("correct choice");
        vm.dispatch(QuizIntent::Choose(correct));
        assert_eq!(vm.screen().header, "Question 2");

        let wrong = (vm.correct_choice_index().expect("correct choice") + 1) % 4;
        vm.dispatch(QuizIntent::Choose(wrong));
        assert_eq!(vm.state(), SessionState::Finished);
        assert_eq!(vm.screen().header, "You got 1/2 correct");
        assert_eq!(vm.screen().question, "Press the button below to try again");
        assert_eq!(vm.screen().primary_button, Some("Back to Home"));
    }

    #[test]
    fn primary_from_finished_returns_home() {
        let mut vm = active_vm(vec![question("Q1")]);
        let correct = vm.correct_choice_index().expect("correct choice");
        vm.dispatch(QuizIntent::Choose(correct));
        assert_eq!(vm.dispatch(QuizIntent::Primary), None);
        assert_eq!(vm.state(), SessionState::Idle);
        assert_eq!(vm.screen().header, "Welcome");
    }

    #[test]
    fn out_of_range_choice_is_ignored() {
        let mut vm = active_vm(vec![question("Q1")]);
        let before = vm.screen().clone();
        assert_eq!(vm.dispatch(QuizIntent::Choose(9)), None);
        assert_eq!(vm.state(), SessionState::Active);
        assert_eq!(vm.screen(), &before);
    }

    #[test]
    fn choose_outside_active_is_ignored() {
        let mut vm = QuizVm::new(QuizSession::new());
        assert_eq!(vm.dispatch(QuizIntent::Choose(0)), None);
        assert_eq!(vm.state(), SessionState::Idle);
    }

    #[test]
    fn failed_fetch_offers_retry() {
        let mut vm = QuizVm::new(QuizSession::new());
        let ticket = vm.dispatch(QuizIntent::Primary).expect("fetch started");
        let applied = vm.apply(
            &quiz_loop(),
            FetchCompletion {
                ticket,
                outcome: Err(FetchFailure::new("connection refused")),
            },
        );
        assert_eq!(applied, FetchApplied::Applied);
        assert_eq!(vm.screen().header, "Error");
        assert_eq!(vm.screen().question, "Could not load quiz data");
        assert_eq!(vm.screen().primary_button, Some("Retry"));

        assert!(vm.dispatch(QuizIntent::Primary).is_some());
        assert_eq!(vm.state(), SessionState::Loading);
    }

    #[test]
    fn stale_completion_leaves_screen_alone() {
        let mut vm = QuizVm::new(QuizSession::new());
        let stale = vm.dispatch(QuizIntent::Primary).expect("fetch started");
        vm.apply(
            &quiz_loop(),
            FetchCompletion {
                ticket: stale,
                outcome: Err(FetchFailure::new("timeout")),
            },
        );
        let current = vm.dispatch(QuizIntent::Primary).expect("retry started");
        assert_ne!(stale, current);

        let applied = vm.apply(
            &quiz_loop(),
            FetchCompletion {
                ticket: stale,
                outcome: Ok(vec![question("late")]),
            },
        );
        assert_eq!(applied, FetchApplied::Stale);
        assert_eq!(vm.state(), SessionState::Loading);
        assert_eq!(vm.screen().header, "Loading");
    }

    #[test]
    fn empty_batch_finishes_immediately() {
        let vm = active_vm(Vec::new());
        assert_eq!(vm.state(), SessionState::Finished);
        assert_eq!(vm.screen().header, "You got 0/0 correct");
    }
}
