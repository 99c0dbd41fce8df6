use std::collections::BTreeSet;
use std::sync::Arc;

use storage::repository::{FlashcardRepository, NewFlashcardRecord, StorageError};
use study_core::model::{Flashcard, FlashcardDraft, FlashcardId, UserId};

use crate::Clock;
use crate::error::FlashcardServiceError;

/// Starter deck written by `seed_samples`: `(subject, question, answer)`.
pub const SAMPLE_FLASHCARDS: &[(&str, &str, &str)] = &[
    ("Math", "What is 7 x 8?", "56"),
    ("Math", "What is the square root of 81?", "9"),
    ("Math", "What is 15% of 200?", "30"),
    ("Math", "How many degrees are in a triangle?", "180"),
    ("Science", "What is the chemical symbol for water?", "H2O"),
    ("Science", "Which planet is known as the red planet?", "Mars"),
    ("Science", "What gas do plants absorb from the air?", "Carbon dioxide"),
    ("History", "In which year did the Battle of Hastings take place?", "1066"),
    ("History", "Who was the first president of the United States?", "George Washington"),
    ("Geography", "What is the capital of France?", "Paris"),
    ("Geography", "What is the longest river in Africa?", "Nile"),
];

/// Orchestrates flashcard creation, listing and study tracking.
#[derive(Clone)]
pub struct FlashcardService {
    clock: Clock,
    flashcards: Arc<dyn FlashcardRepository>,
}

impl FlashcardService {
    #[must_use]
    pub fn new(clock: Clock, flashcards: Arc<dyn FlashcardRepository>) -> Self {
        Self { clock, flashcards }
    }

    /// Validate and persist a new flashcard.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardServiceError::Flashcard` for blank fields.
    /// Returns `FlashcardServiceError::Storage` if persistence fails.
    pub async fn create(
        &self,
        user_id: &UserId,
        draft: FlashcardDraft,
    ) -> Result<FlashcardId, FlashcardServiceError> {
        let validated = draft.validate(user_id.clone(), self.clock.now())?;
        let id = self
            .flashcards
            .insert_flashcard(NewFlashcardRecord::from_validated(&validated))
            .await?;
        tracing::debug!(user = %user_id, %id, subject = %validated.subject, "flashcard created");
        Ok(id)
    }

    /// All flashcards of the user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardServiceError::Storage` if the query fails.
    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Flashcard>, FlashcardServiceError> {
        Ok(self.flashcards.list_flashcards(user_id).await?)
    }

    /// Flashcards whose subject contains `filter_text`, ignoring case.
    ///
    /// Blank filter text keeps every card.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardServiceError::Storage` if the query fails.
    pub async fn list_filtered(
        &self,
        user_id: &UserId,
        filter_text: &str,
    ) -> Result<Vec<Flashcard>, FlashcardServiceError> {
        let needle = filter_text.trim().to_lowercase();
        let cards = self.list(user_id).await?;
        if needle.is_empty() {
            return Ok(cards);
        }
        Ok(cards
            .into_iter()
            .filter(|card| card.subject().to_lowercase().contains(&needle))
            .collect())
    }

    /// Remove one of the user's flashcards.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardServiceError::Storage` with `StorageError::NotFound`
    /// when the card does not exist for this user.
    pub async fn delete(
        &self,
        user_id: &UserId,
        id: FlashcardId,
    ) -> Result<(), FlashcardServiceError> {
        self.flashcards.delete_flashcard(user_id, id).await?;
        tracing::debug!(user = %user_id, %id, "flashcard deleted");
        Ok(())
    }

    /// Add `hours` of study time to a flashcard and return the updated card.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardServiceError::Flashcard` for a negative or non-finite
    /// amount, `FlashcardServiceError::Storage` if the card is missing.
    pub async fn record_study_time(
        &self,
        user_id: &UserId,
        id: FlashcardId,
        hours: f64,
    ) -> Result<Flashcard, FlashcardServiceError> {
        study_core::model::validate_study_hours(hours)?;
        self.flashcards.add_studied_hours(user_id, id, hours).await?;
        let card = self
            .flashcards
            .get_flashcard(user_id, id)
            .await?
            .ok_or(StorageError::NotFound)?;
        tracing::debug!(user = %user_id, %id, total = card.studied_hours(), "study time recorded");
        Ok(card)
    }

    /// Distinct subjects of the user's flashcards, sorted.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardServiceError::Storage` if the query fails.
    pub async fn subjects(&self, user_id: &UserId) -> Result<Vec<String>, FlashcardServiceError> {
        let cards = self.list(user_id).await?;
        let subjects: BTreeSet<String> = cards
            .iter()
            .map(|card| card.subject().to_owned())
            .collect();
        Ok(subjects.into_iter().collect())
    }

    /// Write the starter deck for a user who has no flashcards yet.
    ///
    /// Returns the number of cards created; zero when the user already has cards.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardServiceError` if listing or inserting fails.
    pub async fn seed_samples(&self, user_id: &UserId) -> Result<usize, FlashcardServiceError> {
        if !self.list(user_id).await?.is_empty() {
            tracing::info!(user = %user_id, "flashcards already present, skipping seed");
            return Ok(0);
        }

        for (subject, question, answer) in SAMPLE_FLASHCARDS {
            self.create(user_id, FlashcardDraft::new(*subject, *question, *answer))
                .await?;
        }
        tracing::info!(user = %user_id, count = SAMPLE_FLASHCARDS.len(), "seeded sample flashcards");
        Ok(SAMPLE_FLASHCARDS.len())
    }
}
