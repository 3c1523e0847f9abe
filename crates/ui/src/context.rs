use std::sync::Arc;

use quiz_core::QuizSession;
use services::QuizLoopService;

pub trait UiApp: Send + Sync {
    fn quiz_loop(&self) -> Arc<QuizLoopService>;

    /// Fixed seed for the answer shuffle. `None` seeds from the OS.
    fn choice_seed(&self) -> Option<u64> {
        None
    }
}

#[derive(Clone)]
pub struct AppContext {
    quiz_loop: Arc<QuizLoopService>,
    choice_seed: Option<u64>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_loop: app.quiz_loop(),
            choice_seed: app.choice_seed(),
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    /// A fresh session in `Idle`, seeded per the app's configuration.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        self.choice_seed
            .map_or_else(QuizSession::new, QuizSession::with_seed)
    }
}

/// Context for `QuizView`; the binary provides it at launch.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
