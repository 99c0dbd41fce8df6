use dioxus::prelude::*;
use study_core::model::ALL_SUBJECTS;
use study_core::quiz::Slot;

use super::state::QuizScreenState;

pub const QUESTION_COUNT_CHOICES: [usize; 4] = [5, 10, 15, 20];
pub const SECONDS_CHOICES: [u32; 5] = [10, 15, 20, 30, 60];

/// Selector values chosen before a quiz starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSetup {
    pub subject: String,
    pub question_count: usize,
    pub seconds: u32,
}

/// A control activated on the quiz screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenAction {
    Start,
    Select(usize),
    Next,
    Skip,
    Restart,
}

/// Choices for a selector, keeping `current` selectable even when it is not
/// one of the presets.
fn choices_with<T: Copy + Ord>(presets: &[T], current: T) -> Vec<T> {
    let mut values = presets.to_vec();
    if !values.contains(&current) {
        values.push(current);
        values.sort_unstable();
    }
    values
}

fn slot_class(state: &QuizScreenState, slot: Slot, base: &str) -> String {
    if state.is_visible(slot) {
        base.to_string()
    } else {
        format!("{base} hidden")
    }
}

#[component]
pub fn QuizScreen(
    state: QuizScreenState,
    subjects: Vec<String>,
    setup: QuizSetup,
    on_setup: EventHandler<QuizSetup>,
    on_action: EventHandler<ScreenAction>,
) -> Element {
    let counts = choices_with(&QUESTION_COUNT_CHOICES, setup.question_count);
    let seconds = choices_with(&SECONDS_CHOICES, setup.seconds);

    let subject_setup = setup.clone();
    let count_setup = setup.clone();
    let seconds_setup = setup.clone();

    rsx! {
        div { class: "quiz",
            div { class: "quiz-setup",
                label { r#for: "subject-select", "Subject" }
                select {
                    id: "subject-select",
                    onchange: move |evt| {
                        on_setup.call(QuizSetup { subject: evt.value(), ..subject_setup.clone() });
                    },
                    option { value: ALL_SUBJECTS, selected: setup.subject == ALL_SUBJECTS, "All subjects" }
                    for subject in subjects {
                        option {
                            key: "{subject}",
                            value: "{subject}",
                            selected: setup.subject == subject,
                            "{subject}"
                        }
                    }
                }

                label { r#for: "num-questions", "Questions" }
                select {
                    id: "num-questions",
                    onchange: move |evt| {
                        if let Ok(question_count) = evt.value().parse() {
                            on_setup.call(QuizSetup { question_count, ..count_setup.clone() });
                        }
                    },
                    for count in counts {
                        option {
                            key: "{count}",
                            value: "{count}",
                            selected: count == setup.question_count,
                            "{count}"
                        }
                    }
                }

                label { r#for: "question-timer", "Seconds per question" }
                select {
                    id: "question-timer",
                    onchange: move |evt| {
                        if let Ok(seconds) = evt.value().parse() {
                            on_setup.call(QuizSetup { seconds, ..seconds_setup.clone() });
                        }
                    },
                    for value in seconds {
                        option {
                            key: "{value}",
                            value: "{value}",
                            selected: value == setup.seconds,
                            "{value}"
                        }
                    }
                }
            }

            p {
                id: Slot::Timer.element_id(),
                class: slot_class(&state, Slot::Timer, "timer"),
                "{state.timer}"
            }
            h3 {
                id: Slot::Question.element_id(),
                class: slot_class(&state, Slot::Question, "question"),
                "{state.question}"
            }
            div {
                id: Slot::Options.element_id(),
                class: slot_class(&state, Slot::Options, "options"),
                for (index, option) in state.options.iter().cloned().enumerate() {
                    button {
                        key: "{index}",
                        class: option.class(),
                        disabled: state.options_disabled,
                        onclick: move |_| on_action.call(ScreenAction::Select(index)),
                        "{option.label}"
                    }
                }
            }
            p {
                id: Slot::Score.element_id(),
                class: slot_class(&state, Slot::Score, "score"),
                "{state.score}"
            }

            div { class: "quiz-controls",
                button {
                    id: Slot::Start.element_id(),
                    class: slot_class(&state, Slot::Start, "btn primary"),
                    onclick: move |_| on_action.call(ScreenAction::Start),
                    "Start Quiz"
                }
                button {
                    id: Slot::Next.element_id(),
                    class: slot_class(&state, Slot::Next, "btn"),
                    onclick: move |_| on_action.call(ScreenAction::Next),
                    "Next"
                }
                button {
                    id: Slot::Skip.element_id(),
                    class: slot_class(&state, Slot::Skip, "btn"),
                    onclick: move |_| on_action.call(ScreenAction::Skip),
                    "Skip"
                }
                button {
                    id: Slot::Restart.element_id(),
                    class: slot_class(&state, Slot::Restart, "btn primary"),
                    onclick: move |_| on_action.call(ScreenAction::Restart),
                    "Restart Quiz"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_value_is_always_selectable() {
        assert_eq!(choices_with(&QUESTION_COUNT_CHOICES, 10), vec![5, 10, 15, 20]);
        assert_eq!(choices_with(&QUESTION_COUNT_CHOICES, 3), vec![3, 5, 10, 15, 20]);
        assert_eq!(choices_with(&SECONDS_CHOICES, 45), vec![10, 15, 20, 30, 45, 60]);
    }

    #[test]
    fn hidden_slots_get_hidden_class() {
        let state = QuizScreenState::default();
        assert_eq!(slot_class(&state, Slot::Start, "btn"), "btn");
        assert_eq!(slot_class(&state, Slot::Next, "btn"), "btn hidden");
    }
}
