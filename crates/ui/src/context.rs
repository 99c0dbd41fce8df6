use std::sync::Arc;

use services::{AppServices, FlashcardService, QuizService};
use study_core::model::UserId;
use study_core::quiz::QuizConfig;

pub trait UiApp: Send + Sync {
    fn user_id(&self) -> UserId;
    fn quiz_defaults(&self) -> QuizConfig;

    fn flashcards(&self) -> Arc<FlashcardService>;
    fn quiz(&self) -> Arc<QuizService>;
}

impl UiApp for AppServices {
    fn user_id(&self) -> UserId {
        AppServices::user_id(self).clone()
    }

    fn quiz_defaults(&self) -> QuizConfig {
        AppServices::quiz_defaults(self).clone()
    }

    fn flashcards(&self) -> Arc<FlashcardService> {
        AppServices::flashcards(self)
    }

    fn quiz(&self) -> Arc<QuizService> {
        AppServices::quiz(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    user_id: UserId,
    quiz_defaults: QuizConfig,

    flashcards: Arc<FlashcardService>,
    quiz: Arc<QuizService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            user_id: app.user_id(),
            quiz_defaults: app.quiz_defaults(),
            flashcards: app.flashcards(),
            quiz: app.quiz(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id.clone()
    }

    #[must_use]
    pub fn quiz_defaults(&self) -> QuizConfig {
        self.quiz_defaults.clone()
    }

    #[must_use]
    pub fn flashcards(&self) -> Arc<FlashcardService> {
        Arc::clone(&self.flashcards)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
