use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{FlashcardId, UserId};
use crate::model::subject::normalize_subject;

//
// ─── FLASHCARD TYPES ───────────────────────────────────────────────────────────
//

/// Raw user input for a new flashcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardDraft {
    pub subject: String,
    pub question: String,
    pub answer: String,
}

impl FlashcardDraft {
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Trim every field, reject blanks and normalize the subject casing.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardError` naming the first blank field.
    pub fn validate(
        self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<ValidatedFlashcard, FlashcardError> {
        let subject = normalize_subject(&self.subject).ok_or(FlashcardError::EmptySubject)?;
        let question = non_blank(&self.question).ok_or(FlashcardError::EmptyQuestion)?;
        let answer = non_blank(&self.answer).ok_or(FlashcardError::EmptyAnswer)?;

        Ok(ValidatedFlashcard {
            user_id,
            subject,
            question,
            answer,
            created_at: now,
        })
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// A draft that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFlashcard {
    pub user_id: UserId,
    pub subject: String,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// A subject/question/answer record belonging to one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Flashcard {
    id: FlashcardId,
    user_id: UserId,
    subject: String,
    question: String,
    answer: String,
    studied_hours: f64,
    created_at: DateTime<Utc>,
}

impl Flashcard {
    /// Rebuild a flashcard from stored fields.
    ///
    /// Stored text is taken as-is (no subject normalization) so older rows keep
    /// their original casing.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardError` for blank text or an invalid studied time.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: FlashcardId,
        user_id: UserId,
        subject: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        studied_hours: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, FlashcardError> {
        let subject = subject.into();
        let question = question.into();
        let answer = answer.into();
        if subject.trim().is_empty() {
            return Err(FlashcardError::EmptySubject);
        }
        if question.trim().is_empty() {
            return Err(FlashcardError::EmptyQuestion);
        }
        if answer.trim().is_empty() {
            return Err(FlashcardError::EmptyAnswer);
        }
        if !studied_hours.is_finite() || studied_hours < 0.0 {
            return Err(FlashcardError::InvalidStudyTime(studied_hours));
        }

        Ok(Self {
            id,
            user_id,
            subject,
            question,
            answer,
            studied_hours,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> FlashcardId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn studied_hours(&self) -> f64 {
        self.studied_hours
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Add study time to this card.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardError::InvalidStudyTime` for negative or non-finite hours.
    pub fn record_study(&mut self, hours: f64) -> Result<(), FlashcardError> {
        validate_study_hours(hours)?;
        self.studied_hours += hours;
        Ok(())
    }
}

/// Checks an increment of study time.
///
/// # Errors
///
/// Returns `FlashcardError::InvalidStudyTime` for negative or non-finite hours.
pub fn validate_study_hours(hours: f64) -> Result<(), FlashcardError> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(())
    } else {
        Err(FlashcardError::InvalidStudyTime(hours))
    }
}

//
// ─── FLASHCARD ERRORS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum FlashcardError {
    #[error("subject must not be empty")]
    EmptySubject,

    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("answer must not be empty")]
    EmptyAnswer,

    #[error("invalid study time: {0}")]
    InvalidStudyTime(f64),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn user() -> UserId {
        UserId::new("uid-1").unwrap()
    }

    #[test]
    fn draft_trims_and_normalizes_subject() {
        let validated = FlashcardDraft::new(" bIOLOGY ", " What is DNA? ", " A molecule ")
            .validate(user(), fixed_now())
            .unwrap();

        assert_eq!(validated.subject, "Biology");
        assert_eq!(validated.question, "What is DNA?");
        assert_eq!(validated.answer, "A molecule");
        assert_eq!(validated.created_at, fixed_now());
    }

    #[test]
    fn draft_rejects_blank_fields() {
        let err = FlashcardDraft::new("  ", "q", "a")
            .validate(user(), fixed_now())
            .unwrap_err();
        assert_eq!(err, FlashcardError::EmptySubject);

        let err = FlashcardDraft::new("Math", "", "a")
            .validate(user(), fixed_now())
            .unwrap_err();
        assert_eq!(err, FlashcardError::EmptyQuestion);

        let err = FlashcardDraft::new("Math", "q", "\t")
            .validate(user(), fixed_now())
            .unwrap_err();
        assert_eq!(err, FlashcardError::EmptyAnswer);
    }

    #[test]
    fn record_study_accumulates_hours() {
        let mut card = Flashcard::from_persisted(
            FlashcardId::new(1),
            user(),
            "Math",
            "2 + 2",
            "4",
            0.5,
            fixed_now(),
        )
        .unwrap();

        card.record_study(1.25).unwrap();
        assert!((card.studied_hours() - 1.75).abs() < f64::EPSILON);

        let err = card.record_study(-1.0).unwrap_err();
        assert!(matches!(err, FlashcardError::InvalidStudyTime(_)));
        assert!(card.record_study(f64::NAN).is_err());
    }

    #[test]
    fn persisted_card_rejects_negative_hours() {
        let err = Flashcard::from_persisted(
            FlashcardId::new(1),
            user(),
            "Math",
            "q",
            "a",
            -2.0,
            fixed_now(),
        )
        .unwrap_err();
        assert!(matches!(err, FlashcardError::InvalidStudyTime(_)));
    }
}
