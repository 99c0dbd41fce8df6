use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::model::{Flashcard, SubjectFilter};

use super::config::QuizConfig;
use super::effects::{
    COMPLETE_TITLE, OptionMark, QuizEffect, Slot, TIME_UP_TEXT, final_score_text, question_text,
    score_text, timer_text,
};
use super::options::build_options;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no flashcards available for subject `{0}`")]
    NoFlashcards(SubjectFilter),

    #[error("question count must be a positive integer, got `{0}`")]
    InvalidQuestionCount(String),
}

//
// ─── EVENTS AND STATE ──────────────────────────────────────────────────────────
//

/// Input to a running quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// The user picked the option at this index.
    Select(usize),
    /// One second of the countdown elapsed.
    Tick,
    Skip,
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    InProgress,
    Complete,
}

/// Resolution state of the question on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionState {
    AwaitingAnswer,
    Answered { chosen: usize, correct: bool },
    TimedOut,
}

/// How a question ended, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOutcome {
    Correct,
    Incorrect,
    TimedOut,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub timed_out: usize,
    pub skipped: usize,
}

impl fmt::Display for QuizSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.score, self.total)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveQuestion {
    index: usize,
    options: Vec<String>,
    state: QuestionState,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State of one quiz run, from start to completion.
///
/// Built by [`QuizSession::start`] from a snapshot of the user's flashcards;
/// every later transition goes through [`QuizSession::handle`]. At most one
/// answer is scored per question and a question that timed out can no longer
/// be answered.
#[derive(Debug, Clone)]
pub struct QuizSession {
    config: QuizConfig,
    candidates: Vec<Flashcard>,
    pool: Vec<Flashcard>,
    sequence: Vec<Flashcard>,
    cursor: usize,
    score: usize,
    time_remaining: u32,
    question: Option<ActiveQuestion>,
    outcomes: Vec<QuestionOutcome>,
}

impl QuizSession {
    /// Filter `flashcards` by the configured subject, draw a random sequence
    /// and present the first question.
    ///
    /// `flashcards` is the user's full collection; it also supplies the
    /// distractors for every question regardless of the subject filter.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoFlashcards` when no card matches the filter.
    pub fn start<R>(
        flashcards: Vec<Flashcard>,
        config: QuizConfig,
        rng: &mut R,
    ) -> Result<(Self, Vec<QuizEffect>), QuizError>
    where
        R: Rng + ?Sized,
    {
        let pool: Vec<Flashcard> = flashcards
            .iter()
            .filter(|card| config.filter().matches(card.subject()))
            .cloned()
            .collect();
        if pool.is_empty() {
            return Err(QuizError::NoFlashcards(config.filter().clone()));
        }

        let mut sequence = pool.clone();
        sequence.shuffle(rng);
        sequence.truncate(config.question_count());

        let time_remaining = config.seconds_per_question();
        let mut session = Self {
            config,
            candidates: flashcards,
            pool,
            sequence,
            cursor: 0,
            score: 0,
            time_remaining,
            question: None,
            outcomes: Vec::new(),
        };

        let mut effects = vec![
            QuizEffect::hide(Slot::Start),
            QuizEffect::hide(Slot::Restart),
            QuizEffect::show(Slot::Timer),
            QuizEffect::show(Slot::Question),
            QuizEffect::show(Slot::Options),
            QuizEffect::show(Slot::Score),
            QuizEffect::show(Slot::Skip),
        ];
        effects.extend(session.present(rng));
        Ok((session, effects))
    }

    /// Apply one event and return the effects it produced.
    ///
    /// Events that do not apply to the current state (a second answer, a
    /// tick after the question resolved, advancing before resolving) yield no
    /// effects.
    pub fn handle<R>(&mut self, event: QuizEvent, rng: &mut R) -> Vec<QuizEffect>
    where
        R: Rng + ?Sized,
    {
        match event {
            QuizEvent::Select(index) => self.select(index),
            QuizEvent::Tick => self.tick(),
            QuizEvent::Skip => self.skip(rng),
            QuizEvent::Advance => self.advance(rng),
        }
    }

    fn present<R>(&mut self, rng: &mut R) -> Vec<QuizEffect>
    where
        R: Rng + ?Sized,
    {
        let mut effects = vec![QuizEffect::CancelTimer, QuizEffect::hide(Slot::Next)];

        let Some(card) = self.sequence.get(self.cursor) else {
            self.question = None;
            self.time_remaining = 0;
            effects.extend([
                QuizEffect::text(Slot::Question, COMPLETE_TITLE),
                QuizEffect::text(Slot::Score, final_score_text(self.score, self.sequence.len())),
                QuizEffect::text(Slot::Timer, ""),
                QuizEffect::hide(Slot::Skip),
                QuizEffect::SetOptions(Vec::new()),
                QuizEffect::show(Slot::Restart),
            ]);
            return effects;
        };

        let options = build_options(card.answer(), &self.candidates, rng);
        let seconds = self.config.seconds_per_question();
        self.time_remaining = seconds;

        effects.extend([
            QuizEffect::text(Slot::Question, question_text(self.cursor + 1, card.question())),
            QuizEffect::SetOptions(options.clone()),
            QuizEffect::text(Slot::Score, score_text(self.score)),
            QuizEffect::text(Slot::Timer, timer_text(seconds)),
            QuizEffect::StartTimer { seconds },
        ]);
        self.question = Some(ActiveQuestion {
            index: self.cursor,
            options,
            state: QuestionState::AwaitingAnswer,
        });
        effects
    }

    fn select(&mut self, index: usize) -> Vec<QuizEffect> {
        let Some(question) = self.question.as_mut() else {
            return Vec::new();
        };
        if question.state != QuestionState::AwaitingAnswer {
            return Vec::new();
        }
        let Some(chosen) = question.options.get(index) else {
            return Vec::new();
        };

        let correct = self
            .sequence
            .get(question.index)
            .is_some_and(|card| card.answer() == chosen);
        question.state = QuestionState::Answered {
            chosen: index,
            correct,
        };

        let mark = if correct {
            self.score += 1;
            self.outcomes.push(QuestionOutcome::Correct);
            OptionMark::Correct
        } else {
            self.outcomes.push(QuestionOutcome::Incorrect);
            OptionMark::Incorrect
        };

        vec![
            QuizEffect::CancelTimer,
            QuizEffect::MarkOption { index, mark },
            QuizEffect::DisableOptions,
            QuizEffect::text(Slot::Score, score_text(self.score)),
            QuizEffect::show(Slot::Next),
        ]
    }

    fn tick(&mut self) -> Vec<QuizEffect> {
        let Some(question) = self.question.as_mut() else {
            return Vec::new();
        };
        if question.state != QuestionState::AwaitingAnswer {
            return Vec::new();
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return vec![QuizEffect::text(Slot::Timer, timer_text(self.time_remaining))];
        }

        question.state = QuestionState::TimedOut;
        self.outcomes.push(QuestionOutcome::TimedOut);
        vec![
            QuizEffect::CancelTimer,
            QuizEffect::DisableOptions,
            QuizEffect::show(Slot::Next),
            QuizEffect::text(Slot::Timer, TIME_UP_TEXT),
        ]
    }

    fn skip<R>(&mut self, rng: &mut R) -> Vec<QuizEffect>
    where
        R: Rng + ?Sized,
    {
        let Some(state) = self.question.as_ref().map(|q| q.state) else {
            return Vec::new();
        };
        if state == QuestionState::AwaitingAnswer {
            self.outcomes.push(QuestionOutcome::Skipped);
        }

        let mut effects = vec![QuizEffect::CancelTimer, QuizEffect::DisableOptions];
        self.cursor += 1;
        effects.extend(self.present(rng));
        effects
    }

    fn advance<R>(&mut self, rng: &mut R) -> Vec<QuizEffect>
    where
        R: Rng + ?Sized,
    {
        match self.question.as_ref().map(|q| q.state) {
            None | Some(QuestionState::AwaitingAnswer) => Vec::new(),
            Some(_) => {
                self.cursor += 1;
                self.present(rng)
            }
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.is_complete() {
            QuizPhase::Complete
        } else {
            QuizPhase::InProgress
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.sequence.len()
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Flashcards matching the subject filter.
    #[must_use]
    pub fn pool(&self) -> &[Flashcard] {
        &self.pool
    }

    /// Questions of this run, in presentation order.
    #[must_use]
    pub fn sequence(&self) -> &[Flashcard] {
        &self.sequence
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Flashcard> {
        self.question
            .as_ref()
            .and_then(|q| self.sequence.get(q.index))
    }

    #[must_use]
    pub fn current_options(&self) -> &[String] {
        match &self.question {
            Some(question) => &question.options,
            None => &[],
        }
    }

    #[must_use]
    pub fn question_state(&self) -> Option<QuestionState> {
        self.question.as_ref().map(|q| q.state)
    }

    #[must_use]
    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn summary(&self) -> QuizSummary {
        let count = |wanted: QuestionOutcome| self.outcomes.iter().filter(|o| **o == wanted).count();
        QuizSummary {
            score: self.score,
            total: self.sequence.len(),
            correct: count(QuestionOutcome::Correct),
            incorrect: count(QuestionOutcome::Incorrect),
            timed_out: count(QuestionOutcome::TimedOut),
            skipped: count(QuestionOutcome::Skipped),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
