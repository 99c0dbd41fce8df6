use study_core::model::{Flashcard, FlashcardId, UserId};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn flashcard_id_from_i64(v: i64) -> Result<FlashcardId, StorageError> {
    u64::try_from(v)
        .map(FlashcardId::new)
        .map_err(|_| StorageError::Serialization("flashcard_id sign overflow".into()))
}

pub(crate) fn flashcard_id_to_i64(id: FlashcardId) -> Result<i64, StorageError> {
    i64::try_from(id.value())
        .map_err(|_| StorageError::Serialization("flashcard_id overflow".into()))
}

pub(crate) fn map_flashcard_row(row: &sqlx::sqlite::SqliteRow) -> Result<Flashcard, StorageError> {
    let user_id = UserId::new(row.try_get::<String, _>("user_id").map_err(ser)?).map_err(ser)?;

    Flashcard::from_persisted(
        flashcard_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        user_id,
        row.try_get::<String, _>("subject").map_err(ser)?,
        row.try_get::<String, _>("question").map_err(ser)?,
        row.try_get::<String, _>("answer").map_err(ser)?,
        row.try_get::<f64, _>("studied_hours").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}
