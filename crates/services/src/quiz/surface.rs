use study_core::quiz::{OptionMark, Slot};

use crate::error::SurfaceError;

/// Presentation target of a quiz.
///
/// Each method mirrors one render effect. Returning `SurfaceError` makes the
/// engine drop the rest of the current batch.
pub trait QuizSurface {
    /// Replace the text of a slot.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError::MissingSlot` if the slot is not rendered.
    fn set_text(&mut self, slot: Slot, text: &str) -> Result<(), SurfaceError>;

    /// Show or hide a slot.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError::MissingSlot` if the slot is not rendered.
    fn set_visible(&mut self, slot: Slot, visible: bool) -> Result<(), SurfaceError>;

    /// Replace the answer controls, all enabled and unmarked.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError::MissingSlot` if the options container is absent.
    fn set_options(&mut self, options: &[String]) -> Result<(), SurfaceError>;

    /// Flag the chosen answer control.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError::MissingOption` if no control exists at `index`.
    fn mark_option(&mut self, index: usize, mark: OptionMark) -> Result<(), SurfaceError>;

    /// Disable every answer control.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError::MissingSlot` if the options container is absent.
    fn disable_options(&mut self) -> Result<(), SurfaceError>;
}
