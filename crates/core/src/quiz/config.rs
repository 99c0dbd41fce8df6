use std::num::{NonZeroU32, NonZeroUsize};

use crate::model::SubjectFilter;

use super::QuizError;

/// Seconds per question when the selector is unset or invalid.
pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 15;

/// Question count offered by default in the quiz setup.
pub const DEFAULT_QUESTION_COUNT: usize = 5;

/// Parameters of one quiz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    filter: SubjectFilter,
    question_count: NonZeroUsize,
    seconds_per_question: NonZeroU32,
}

impl QuizConfig {
    /// Build a config. A zero `seconds_per_question` falls back to
    /// [`DEFAULT_SECONDS_PER_QUESTION`].
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidQuestionCount` when `question_count` is zero.
    pub fn new(
        filter: SubjectFilter,
        question_count: usize,
        seconds_per_question: u32,
    ) -> Result<Self, QuizError> {
        let question_count = NonZeroUsize::new(question_count)
            .ok_or_else(|| QuizError::InvalidQuestionCount(question_count.to_string()))?;
        Ok(Self {
            filter,
            question_count,
            seconds_per_question: non_zero_seconds(seconds_per_question),
        })
    }

    #[must_use]
    pub fn filter(&self) -> &SubjectFilter {
        &self.filter
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count.get()
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question.get()
    }

    #[must_use]
    pub fn with_filter(mut self, filter: SubjectFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            filter: SubjectFilter::All,
            question_count: NonZeroUsize::new(DEFAULT_QUESTION_COUNT).unwrap_or(NonZeroUsize::MIN),
            seconds_per_question: non_zero_seconds(DEFAULT_SECONDS_PER_QUESTION),
        }
    }
}

/// Parses a seconds-per-question value, falling back to the default for
/// blank, malformed or zero input.
#[must_use]
pub fn seconds_or_default(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_SECONDS_PER_QUESTION)
}

fn non_zero_seconds(seconds: u32) -> NonZeroU32 {
    NonZeroU32::new(seconds)
        .or(NonZeroU32::new(DEFAULT_SECONDS_PER_QUESTION))
        .unwrap_or(NonZeroU32::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seconds_uses_default() {
        let config = QuizConfig::new(SubjectFilter::All, 3, 0).unwrap();
        assert_eq!(config.seconds_per_question(), DEFAULT_SECONDS_PER_QUESTION);
    }

    #[test]
    fn zero_questions_is_rejected() {
        let err = QuizConfig::new(SubjectFilter::All, 0, 10).unwrap_err();
        assert_eq!(err, QuizError::InvalidQuestionCount("0".into()));
    }

    #[test]
    fn seconds_parser_falls_back() {
        assert_eq!(seconds_or_default("20"), 20);
        assert_eq!(seconds_or_default(""), 15);
        assert_eq!(seconds_or_default("0"), 15);
        assert_eq!(seconds_or_default("-4"), 15);
    }
}
