use std::fmt;

/// Shown when the filtered pool is empty.
pub const NO_FLASHCARDS_MESSAGE: &str =
    "No flashcards available for quiz. Please add some flashcards first!";

/// Question slot text once every question has been presented.
pub const COMPLETE_TITLE: &str = "Quiz Complete!";

/// Timer slot text after the countdown reached zero.
pub const TIME_UP_TEXT: &str = "Time's up!";

/// Named region of the quiz screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Question,
    Options,
    Timer,
    Score,
    Next,
    Skip,
    Start,
    Restart,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::Question,
        Slot::Options,
        Slot::Timer,
        Slot::Score,
        Slot::Next,
        Slot::Skip,
        Slot::Start,
        Slot::Restart,
    ];

    /// Element id used by the rendered page.
    #[must_use]
    pub fn element_id(self) -> &'static str {
        match self {
            Slot::Question => "question-text",
            Slot::Options => "answer-buttons",
            Slot::Timer => "timer-text",
            Slot::Score => "score-text",
            Slot::Next => "next-btn",
            Slot::Skip => "skip-btn",
            Slot::Start => "start-btn",
            Slot::Restart => "restart-btn",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    Incorrect,
}

/// Instruction emitted by a quiz transition.
///
/// Rendering effects target a [`Slot`]; `StartTimer`/`CancelTimer` are for
/// whoever owns the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEffect {
    SetText { slot: Slot, text: String },
    SetVisible { slot: Slot, visible: bool },
    /// Replace the option controls; every control starts enabled and unmarked.
    SetOptions(Vec<String>),
    MarkOption { index: usize, mark: OptionMark },
    DisableOptions,
    StartTimer { seconds: u32 },
    CancelTimer,
}

impl QuizEffect {
    pub(crate) fn text(slot: Slot, text: impl Into<String>) -> Self {
        Self::SetText {
            slot,
            text: text.into(),
        }
    }

    pub(crate) fn show(slot: Slot) -> Self {
        Self::SetVisible {
            slot,
            visible: true,
        }
    }

    pub(crate) fn hide(slot: Slot) -> Self {
        Self::SetVisible {
            slot,
            visible: false,
        }
    }
}

#[must_use]
pub fn question_text(number: usize, question: &str) -> String {
    format!("Q{number}: {question}")
}

#[must_use]
pub fn timer_text(seconds: u32) -> String {
    format!("Time left: {seconds} seconds")
}

#[must_use]
pub fn score_text(score: usize) -> String {
    format!("Score: {score}")
}

#[must_use]
pub fn final_score_text(score: usize, total: usize) -> String {
    format!("Your Score: {score} / {total}")
}

/// Screen layout before a quiz starts: only the start control is visible.
#[must_use]
pub fn idle_effects() -> Vec<QuizEffect> {
    vec![
        QuizEffect::CancelTimer,
        QuizEffect::SetOptions(Vec::new()),
        QuizEffect::text(Slot::Question, ""),
        QuizEffect::text(Slot::Timer, ""),
        QuizEffect::text(Slot::Score, ""),
        QuizEffect::hide(Slot::Question),
        QuizEffect::hide(Slot::Options),
        QuizEffect::hide(Slot::Timer),
        QuizEffect::hide(Slot::Score),
        QuizEffect::hide(Slot::Next),
        QuizEffect::hide(Slot::Skip),
        QuizEffect::hide(Slot::Restart),
        QuizEffect::show(Slot::Start),
    ]
}

/// Idle layout plus the empty-pool message in the question slot.
#[must_use]
pub fn no_data_effects() -> Vec<QuizEffect> {
    let mut effects = idle_effects();
    effects.push(QuizEffect::show(Slot::Question));
    effects.push(QuizEffect::text(Slot::Question, NO_FLASHCARDS_MESSAGE));
    effects
}
