mod flashcards;
mod quiz;
mod state;

pub use flashcards::FlashcardsView;
pub use quiz::{QuizIntent, QuizScreen, QuizScreenState, QuizSetup, QuizView, SignalSurface};
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
