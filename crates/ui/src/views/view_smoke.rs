use study_core::model::{Flashcard, FlashcardDraft, FlashcardId, UserId};
use storage::repository::{FlashcardRepository, NewFlashcardRecord, StorageError};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_repo};

#[tokio::test(flavor = "current_thread")]
async fn flashcards_view_smoke_lists_cards() {
    let mut harness = setup_view_harness(ViewKind::Flashcards);
    harness
        .flashcards
        .create(
            &harness.user_id,
            FlashcardDraft::new("geography", "Capital of France?", "Paris"),
        )
        .await
        .expect("create");

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Add Flashcard"), "missing form in {html}");
    assert!(html.contains("Geography"), "missing subject in {html}");
    assert!(html.contains("Capital of France?"), "missing question in {html}");
    assert!(html.contains("Studied: 0.00 h"), "missing study time in {html}");
    assert!(html.contains("Delete"), "missing delete in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Flashcards);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No flashcards yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_idle_screen() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness
        .flashcards
        .create(&harness.user_id, FlashcardDraft::new("math", "2 + 2?", "4"))
        .await
        .expect("create");

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Start Quiz"), "missing start in {html}");
    assert!(html.contains(r#"id="subject-select""#), "missing selector in {html}");
    assert!(html.contains("Math"), "missing subject option in {html}");
}

struct FailingRepo;

#[async_trait::async_trait]
impl FlashcardRepository for FailingRepo {
    async fn insert_flashcard(
        &self,
        _record: NewFlashcardRecord,
    ) -> Result<FlashcardId, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_flashcards(&self, _user_id: &UserId) -> Result<Vec<Flashcard>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_flashcard(
        &self,
        _user_id: &UserId,
        _id: FlashcardId,
    ) -> Result<Option<Flashcard>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn delete_flashcard(&self, _user_id: &UserId, _id: FlashcardId) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn add_studied_hours(
        &self,
        _user_id: &UserId,
        _id: FlashcardId,
        _hours: f64,
    ) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_view_smoke_renders_error_state() {
    let mut harness =
        setup_view_harness_with_repo(ViewKind::Flashcards, std::sync::Arc::new(FailingRepo));
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
}
