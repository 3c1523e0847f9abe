use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::Question;
use services::{ProviderError, QuestionProvider, QuizLoopService};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::views::quiz::QuizTestHandles;
use crate::vm::QuizIntent;

pub const TEST_SEED: u64 = 7;

pub struct StaticProvider {
    questions: Vec<Question>,
}

impl StaticProvider {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionProvider for StaticProvider {
    async fn fetch_batch(&self) -> Result<Vec<Question>, ProviderError> {
        Ok(self.questions.clone())
    }
}

pub struct FailingProvider;

#[async_trait]
impl QuestionProvider for FailingProvider {
    async fn fetch_batch(&self) -> Result<Vec<Question>, ProviderError> {
        Err(ProviderError::ResponseCode(2))
    }
}

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn choice_seed(&self) -> Option<u64> {
        Some(TEST_SEED)
    }
}

#[derive(Props, Clone)]
struct QuizHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for QuizHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for QuizHarnessProps {}

#[component]
fn QuizHarness(props: QuizHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Send an intent through the view's own dispatch callback.
    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        dispatch.call(intent);
        drive_dom(&mut self.dom);
    }

    pub fn correct_choice(&self) -> usize {
        let vm = self.handles.vm();
        self.dom
            .in_runtime(|| vm.peek().correct_choice_index())
            .expect("active question")
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(provider: Arc<dyn QuestionProvider>) -> ViewHarness {
    let app = Arc::new(TestApp {
        quiz_loop: Arc::new(QuizLoopService::new(provider)),
    });
    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        QuizHarness,
        QuizHarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, handles }
}

pub fn question(category: &str, text: &str, correct: &str, incorrect: &[&str]) -> Question {
    Question::new(
        category,
        "medium",
        text,
        correct,
        incorrect.iter().map(|answer| (*answer).to_string()).collect(),
    )
    .expect("valid question")
}
