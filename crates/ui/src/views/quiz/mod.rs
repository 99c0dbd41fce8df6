mod screen;
mod state;
mod surface;
mod view;

pub use screen::{QuizScreen, QuizSetup, ScreenAction};
pub use state::{OptionView, QuizScreenState};
pub use surface::SignalSurface;
pub use view::{QuizIntent, QuizView};

#[cfg(test)]
mod screen_smoke;
