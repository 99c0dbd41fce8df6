use study_core::model::{Flashcard, FlashcardId, UserId, validate_study_hours};

use super::SqliteRepository;
use super::mapping::{flashcard_id_from_i64, flashcard_id_to_i64, map_flashcard_row};
use crate::repository::{FlashcardRepository, NewFlashcardRecord, StorageError};

fn conn_err(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl FlashcardRepository for SqliteRepository {
    async fn insert_flashcard(
        &self,
        record: NewFlashcardRecord,
    ) -> Result<FlashcardId, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO flashcards (user_id, subject, question, answer, studied_hours, created_at)
            VALUES (?1, ?2, ?3, ?4, 0, ?5)
            ",
        )
        .bind(record.user_id.as_str())
        .bind(&record.subject)
        .bind(&record.question)
        .bind(&record.answer)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(conn_err)?;

        flashcard_id_from_i64(result.last_insert_rowid())
    }

    async fn list_flashcards(&self, user_id: &UserId) -> Result<Vec<Flashcard>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, subject, question, answer, studied_hours, created_at
            FROM flashcards
            WHERE user_id = ?1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn_err)?;

        let mut cards = Vec::with_capacity(rows.len());
        for row in rows {
            cards.push(map_flashcard_row(&row)?);
        }
        Ok(cards)
    }

    async fn get_flashcard(
        &self,
        user_id: &UserId,
        id: FlashcardId,
    ) -> Result<Option<Flashcard>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, subject, question, answer, studied_hours, created_at
            FROM flashcards
            WHERE id = ?1 AND user_id = ?2
            ",
        )
        .bind(flashcard_id_to_i64(id)?)
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn_err)?;

        row.as_ref().map(map_flashcard_row).transpose()
    }

    async fn delete_flashcard(
        &self,
        user_id: &UserId,
        id: FlashcardId,
    ) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM flashcards WHERE id = ?1 AND user_id = ?2")
            .bind(flashcard_id_to_i64(id)?)
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(conn_err)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn add_studied_hours(
        &self,
        user_id: &UserId,
        id: FlashcardId,
        hours: f64,
    ) -> Result<(), StorageError> {
        validate_study_hours(hours).map_err(|e| StorageError::InvalidInput(e.to_string()))?;

        let result = sqlx::query(
            r"
            UPDATE flashcards
            SET studied_hours = studied_hours + ?1
            WHERE id = ?2 AND user_id = ?3
            ",
        )
        .bind(hours)
        .bind(flashcard_id_to_i64(id)?)
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(conn_err)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
