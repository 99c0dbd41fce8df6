use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use study_core::model::{
    Flashcard, FlashcardId, UserId, ValidatedFlashcard, validate_study_hours,
};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a flashcard whose id is assigned by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFlashcardRecord {
    pub user_id: UserId,
    pub subject: String,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl NewFlashcardRecord {
    #[must_use]
    pub fn from_validated(card: &ValidatedFlashcard) -> Self {
        Self {
            user_id: card.user_id.clone(),
            subject: card.subject.clone(),
            question: card.question.clone(),
            answer: card.answer.clone(),
            created_at: card.created_at,
        }
    }
}

/// Repository contract for a user's flashcards.
///
/// Every operation is scoped to one user; a card owned by another user is
/// reported as missing.
#[async_trait]
pub trait FlashcardRepository: Send + Sync {
    /// Persist a new flashcard and return its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the card cannot be stored.
    async fn insert_flashcard(&self, record: NewFlashcardRecord)
    -> Result<FlashcardId, StorageError>;

    /// All flashcards of a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_flashcards(&self, user_id: &UserId) -> Result<Vec<Flashcard>, StorageError>;

    /// Fetch one flashcard.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_flashcard(
        &self,
        user_id: &UserId,
        id: FlashcardId,
    ) -> Result<Option<Flashcard>, StorageError>;

    /// Remove one flashcard.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the card does not exist for this user.
    async fn delete_flashcard(&self, user_id: &UserId, id: FlashcardId)
    -> Result<(), StorageError>;

    /// Increment the studied time of a flashcard.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the card does not exist for this user,
    /// or `StorageError::InvalidInput` for a negative or non-finite increment.
    async fn add_studied_hours(
        &self,
        user_id: &UserId,
        id: FlashcardId,
        hours: f64,
    ) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    cards: Arc<Mutex<BTreeMap<FlashcardId, Flashcard>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_err<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl FlashcardRepository for InMemoryRepository {
    async fn insert_flashcard(
        &self,
        record: NewFlashcardRecord,
    ) -> Result<FlashcardId, StorageError> {
        let mut guard = self.cards.lock().map_err(lock_err)?;
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let id = FlashcardId::new(next);
        let card = Flashcard::from_persisted(
            id,
            record.user_id,
            record.subject,
            record.question,
            record.answer,
            0.0,
            record.created_at,
        )
        .map_err(|e| StorageError::InvalidInput(e.to_string()))?;
        guard.insert(id, card);
        Ok(id)
    }

    async fn list_flashcards(&self, user_id: &UserId) -> Result<Vec<Flashcard>, StorageError> {
        let guard = self.cards.lock().map_err(lock_err)?;
        let mut cards: Vec<Flashcard> = guard
            .values()
            .filter(|card| card.user_id() == user_id)
            .cloned()
            .collect();
        cards.sort_by_key(|card| (card.created_at(), card.id()));
        Ok(cards)
    }

    async fn get_flashcard(
        &self,
        user_id: &UserId,
        id: FlashcardId,
    ) -> Result<Option<Flashcard>, StorageError> {
        let guard = self.cards.lock().map_err(lock_err)?;
        Ok(guard
            .get(&id)
            .filter(|card| card.user_id() == user_id)
            .cloned())
    }

    async fn delete_flashcard(
        &self,
        user_id: &UserId,
        id: FlashcardId,
    ) -> Result<(), StorageError> {
        let mut guard = self.cards.lock().map_err(lock_err)?;
        let owned = guard.get(&id).is_some_and(|card| card.user_id() == user_id);
        if !owned {
            return Err(StorageError::NotFound);
        }
        guard.remove(&id);
        Ok(())
    }

    async fn add_studied_hours(
        &self,
        user_id: &UserId,
        id: FlashcardId,
        hours: f64,
    ) -> Result<(), StorageError> {
        validate_study_hours(hours).map_err(|e| StorageError::InvalidInput(e.to_string()))?;
        let mut guard = self.cards.lock().map_err(lock_err)?;
        let card = guard
            .get_mut(&id)
            .filter(|card| card.user_id() == user_id)
            .ok_or(StorageError::NotFound)?;
        card.record_study(hours)
            .map_err(|e| StorageError::InvalidInput(e.to_string()))
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub flashcards: Arc<dyn FlashcardRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let flashcards: Arc<dyn FlashcardRepository> = Arc::new(InMemoryRepository::new());
        Self { flashcards }
    }
}
