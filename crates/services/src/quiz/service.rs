use std::sync::Arc;

use rand::Rng;
use storage::repository::FlashcardRepository;
use study_core::model::{Flashcard, UserId};
use study_core::quiz::{QuizConfig, QuizEffect, QuizSession};

use crate::error::QuizServiceError;

/// Builds quiz sessions from a user's stored flashcards.
#[derive(Clone)]
pub struct QuizService {
    flashcards: Arc<dyn FlashcardRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(flashcards: Arc<dyn FlashcardRepository>) -> Self {
        Self { flashcards }
    }

    /// Snapshot of every flashcard the user owns.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the store cannot be read.
    pub async fn snapshot(&self, user_id: &UserId) -> Result<Vec<Flashcard>, QuizServiceError> {
        Ok(self.flashcards.list_flashcards(user_id).await?)
    }

    /// Fetch the user's flashcards once and start a session over them.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the fetch fails and
    /// `QuizServiceError::Quiz` if no flashcard matches the subject filter.
    pub async fn start_session<R>(
        &self,
        user_id: &UserId,
        config: QuizConfig,
        rng: &mut R,
    ) -> Result<(QuizSession, Vec<QuizEffect>), QuizServiceError>
    where
        R: Rng + ?Sized,
    {
        let flashcards = self.snapshot(user_id).await?;
        tracing::debug!(
            user = %user_id,
            available = flashcards.len(),
            filter = %config.filter(),
            "starting quiz"
        );
        Ok(QuizSession::start(flashcards, config, rng)?)
    }
}
