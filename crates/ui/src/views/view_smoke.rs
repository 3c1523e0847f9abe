use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::Question;
use services::{ProviderError, QuestionProvider};

use super::test_harness::{FailingProvider, StaticProvider, question, setup_view_harness};
use crate::vm::QuizIntent;

struct PendingProvider;

#[async_trait]
impl QuestionProvider for PendingProvider {
    async fn fetch_batch(&self) -> Result<Vec<Question>, ProviderError> {
        std::future::pending().await
    }
}

fn two_questions() -> Arc<StaticProvider> {
    Arc::new(StaticProvider::new(vec![
        question(
            "Science: Astronomy",
            "Which planet is known as the Red Planet?",
            "Mars",
            &["Venus", "Jupiter", "Saturn"],
        ),
        question(
            "Entertainment: Film",
            "Caf&eacute; Society was directed by whom?",
            "Woody Allen",
            &["Sofia Coppola", "Wes Anderson", "Greta Gerwig"],
        ),
    ]))
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_welcome() {
    let mut harness = setup_view_harness(two_questions());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Welcome"), "missing header in {html}");
    assert!(html.contains("Press the button below to start"), "missing prompt in {html}");
    assert!(html.contains("Start"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_loading_while_fetching() {
    let mut harness = setup_view_harness(Arc::new(PendingProvider));
    harness.rebuild();
    harness.dispatch(QuizIntent::Primary);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Loading"), "missing loading header in {html}");
    assert!(html.contains("Please wait a moment"), "missing loading prompt in {html}");
    assert!(!html.contains("quiz-primary"), "primary button shown while loading: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_plays_a_full_round() {
    let mut harness = setup_view_harness(two_questions());
    harness.rebuild();
    harness.dispatch(QuizIntent::Primary);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Question 1"), "missing question header in {html}");
    assert!(html.contains("[Category] Science: Astronomy"), "missing category in {html}");
    assert!(html.contains("[Difficulty] medium"), "missing difficulty in {html}");
    assert!(html.contains("Which planet is known as the Red Planet?"), "missing question in {html}");
    for answer in ["Mars", "Venus", "Jupiter", "Saturn"] {
        assert!(html.contains(answer), "missing {answer} in {html}");
    }

    let correct = harness.correct_choice();
    harness.dispatch(QuizIntent::Choose(correct));
    let html = harness.render();
    assert!(html.contains("Question 2"), "missing second question in {html}");
    assert!(html.contains("Café Society was directed by whom?"), "entity not decoded in {html}");

    let wrong = (harness.correct_choice() + 1) % 4;
    harness.dispatch(QuizIntent::Choose(wrong));
    let html = harness.render();
    assert!(html.contains("You got 1/2 correct"), "missing score in {html}");
    assert!(html.contains("Back to Home"), "missing home button in {html}");

    harness.dispatch(QuizIntent::Primary);
    let html = harness.render();
    assert!(html.contains("Welcome"), "missing welcome after restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_fetch_failure() {
    let mut harness = setup_view_harness(Arc::new(FailingProvider));
    harness.rebuild();
    harness.dispatch(QuizIntent::Primary);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Could not load quiz data"), "missing error text in {html}");
    assert!(html.contains("Retry"), "missing retry button in {html}");
}
