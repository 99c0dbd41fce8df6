use std::sync::Arc;

use storage::repository::Storage;
use study_core::model::UserId;
use study_core::quiz::QuizConfig;

use crate::Clock;
use crate::error::AppServicesError;
use crate::flashcard_service::FlashcardService;
use crate::quiz::QuizService;

/// Assembles app-facing services for one user.
#[derive(Clone)]
pub struct AppServices {
    user_id: UserId,
    quiz_defaults: QuizConfig,
    flashcards: Arc<FlashcardService>,
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        user_id: UserId,
        quiz_defaults: QuizConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, user_id, quiz_defaults))
    }

    /// Build services over an already constructed storage aggregate.
    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        user_id: UserId,
        quiz_defaults: QuizConfig,
    ) -> Self {
        let flashcards = Arc::new(FlashcardService::new(
            clock,
            Arc::clone(&storage.flashcards),
        ));
        let quiz = Arc::new(QuizService::new(Arc::clone(&storage.flashcards)));
        Self {
            user_id,
            quiz_defaults,
            flashcards,
            quiz,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn quiz_defaults(&self) -> &QuizConfig {
        &self.quiz_defaults
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
