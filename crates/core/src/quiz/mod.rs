//! Timed multiple-choice quiz built from a user's flashcards.
//!
//! The types here are pure: a [`QuizSession`] consumes [`QuizEvent`]s and
//! answers with [`QuizEffect`]s describing what the presentation surface and
//! the countdown owner must do. Nothing in this module touches a clock, a
//! timer or a screen.

mod config;
mod effects;
mod options;
mod session;

pub use config::{
    DEFAULT_QUESTION_COUNT, DEFAULT_SECONDS_PER_QUESTION, QuizConfig, seconds_or_default,
};
pub use effects::{
    COMPLETE_TITLE, NO_FLASHCARDS_MESSAGE, OptionMark, QuizEffect, Slot, TIME_UP_TEXT,
    final_score_text, idle_effects, no_data_effects, question_text, score_text, timer_text,
};
pub use options::{MAX_OPTIONS, build_options};
pub use session::{
    QuestionOutcome, QuestionState, QuizError, QuizEvent, QuizPhase, QuizSession, QuizSummary,
};
