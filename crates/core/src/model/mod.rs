mod flashcard;
mod ids;
mod subject;

pub use flashcard::{
    Flashcard, FlashcardDraft, FlashcardError, ValidatedFlashcard, validate_study_hours,
};
pub use ids::{FlashcardId, ParseIdError, UserId};
pub use subject::{ALL_SUBJECTS, SubjectFilter, normalize_subject};
