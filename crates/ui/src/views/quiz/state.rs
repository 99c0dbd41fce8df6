use std::collections::HashSet;

use services::{QuizSurface, SurfaceError};
use study_core::quiz::{OptionMark, Slot};

/// One rendered answer control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub mark: Option<OptionMark>,
}

impl OptionView {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.mark {
            None => "btn option",
            Some(OptionMark::Correct) => "btn option correct",
            Some(OptionMark::Incorrect) => "btn option incorrect",
        }
    }
}

/// Everything the quiz screen shows, rebuilt from engine effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreenState {
    pub question: String,
    pub timer: String,
    pub score: String,
    pub options: Vec<OptionView>,
    pub options_disabled: bool,
    visible: HashSet<Slot>,
}

impl Default for QuizScreenState {
    fn default() -> Self {
        Self {
            question: String::new(),
            timer: String::new(),
            score: String::new(),
            options: Vec::new(),
            options_disabled: false,
            visible: HashSet::from([Slot::Start]),
        }
    }
}

impl QuizScreenState {
    #[must_use]
    pub fn is_visible(&self, slot: Slot) -> bool {
        self.visible.contains(&slot)
    }

    fn text_mut(&mut self, slot: Slot) -> Result<&mut String, SurfaceError> {
        match slot {
            Slot::Question => Ok(&mut self.question),
            Slot::Timer => Ok(&mut self.timer),
            Slot::Score => Ok(&mut self.score),
            // Controls carry fixed labels.
            Slot::Options | Slot::Next | Slot::Skip | Slot::Start | Slot::Restart => {
                Err(SurfaceError::MissingSlot(slot))
            }
        }
    }
}

impl QuizSurface for QuizScreenState {
    fn set_text(&mut self, slot: Slot, text: &str) -> Result<(), SurfaceError> {
        let target = self.text_mut(slot)?;
        target.clear();
        target.push_str(text);
        Ok(())
    }

    fn set_visible(&mut self, slot: Slot, visible: bool) -> Result<(), SurfaceError> {
        if visible {
            self.visible.insert(slot);
        } else {
            self.visible.remove(&slot);
        }
        Ok(())
    }

    fn set_options(&mut self, options: &[String]) -> Result<(), SurfaceError> {
        self.options = options
            .iter()
            .map(|label| OptionView {
                label: label.clone(),
                mark: None,
            })
            .collect();
        self.options_disabled = false;
        Ok(())
    }

    fn mark_option(&mut self, index: usize, mark: OptionMark) -> Result<(), SurfaceError> {
        let option = self
            .options
            .get_mut(index)
            .ok_or(SurfaceError::MissingOption(index))?;
        option.mark = Some(mark);
        Ok(())
    }

    fn disable_options(&mut self) -> Result<(), SurfaceError> {
        self.options_disabled = true;
        Ok(())
    }
}
