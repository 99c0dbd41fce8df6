use dioxus::prelude::*;
use services::{QuizSurface, SurfaceError};
use study_core::quiz::{OptionMark, Slot};

use super::state::QuizScreenState;

/// Quiz surface that writes into a component signal.
#[derive(Clone, Copy)]
pub struct SignalSurface {
    state: Signal<QuizScreenState>,
}

impl SignalSurface {
    #[must_use]
    pub fn new(state: Signal<QuizScreenState>) -> Self {
        Self { state }
    }
}

impl QuizSurface for SignalSurface {
    fn set_text(&mut self, slot: Slot, text: &str) -> Result<(), SurfaceError> {
        self.state.write().set_text(slot, text)
    }

    fn set_visible(&mut self, slot: Slot, visible: bool) -> Result<(), SurfaceError> {
        self.state.write().set_visible(slot, visible)
    }

    fn set_options(&mut self, options: &[String]) -> Result<(), SurfaceError> {
        self.state.write().set_options(options)
    }

    fn mark_option(&mut self, index: usize, mark: OptionMark) -> Result<(), SurfaceError> {
        self.state.write().mark_option(index, mark)
    }

    fn disable_options(&mut self) -> Result<(), SurfaceError> {
        self.state.write().disable_options()
    }
}
