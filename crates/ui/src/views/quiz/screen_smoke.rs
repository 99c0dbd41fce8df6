use dioxus::prelude::*;
use services::QuizSurface;
use study_core::quiz::{OptionMark, Slot, idle_effects};

use super::screen::{QuizScreen, QuizSetup};
use super::state::QuizScreenState;

#[derive(Props, Clone, PartialEq)]
struct ScreenHarnessProps {
    state: QuizScreenState,
}

#[component]
fn ScreenHarness(props: ScreenHarnessProps) -> Element {
    rsx! {
        QuizScreen {
            state: props.state.clone(),
            subjects: vec!["History".to_string(), "Math".to_string()],
            setup: QuizSetup {
                subject: "Math".to_string(),
                question_count: 5,
                seconds: 15,
            },
            on_setup: move |_| {},
            on_action: move |_| {},
        }
    }
}

fn render(state: QuizScreenState) -> String {
    let mut dom = VirtualDom::new_with_props(ScreenHarness, ScreenHarnessProps { state });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[test]
fn idle_screen_shows_start_and_subjects() {
    let html = render(QuizScreenState::default());
    assert!(html.contains("Start Quiz"), "missing start in {html}");
    assert!(html.contains("All subjects"), "missing sentinel in {html}");
    assert!(html.contains("History"), "missing subject in {html}");
    assert!(html.contains(r#"id="next-btn""#), "missing next slot in {html}");
    assert!(html.contains("btn hidden"), "next should be hidden in {html}");
}

#[test]
fn answered_question_renders_marks_and_score() {
    let mut state = QuizScreenState::default();
    state.set_visible(Slot::Start, false).unwrap();
    for slot in [Slot::Question, Slot::Options, Slot::Score, Slot::Timer, Slot::Next] {
        state.set_visible(slot, true).unwrap();
    }
    state.set_text(Slot::Question, "Q1: Capital of France?").unwrap();
    state.set_text(Slot::Score, "Score: 1").unwrap();
    state
        .set_options(&["Rome".to_string(), "Paris".to_string()])
        .unwrap();
    state.mark_option(1, OptionMark::Correct).unwrap();
    state.disable_options().unwrap();

    let html = render(state);
    assert!(html.contains("Q1: Capital of France?"), "missing question in {html}");
    assert!(html.contains("btn option correct"), "missing mark in {html}");
    assert!(html.contains("Score: 1"), "missing score in {html}");
    assert!(html.contains("disabled"), "options not disabled in {html}");
}

#[test]
fn idle_effects_render_the_same_as_default() {
    let mut state = QuizScreenState::default();
    state.set_text(Slot::Question, "stale").unwrap();
    for effect in idle_effects() {
        match effect {
            study_core::quiz::QuizEffect::SetText { slot, text } => {
                state.set_text(slot, &text).unwrap();
            }
            study_core::quiz::QuizEffect::SetVisible { slot, visible } => {
                state.set_visible(slot, visible).unwrap();
            }
            study_core::quiz::QuizEffect::SetOptions(options) => {
                state.set_options(&options).unwrap();
            }
            _ => {}
        }
    }
    assert_eq!(state, QuizScreenState::default());
    assert_eq!(render(state), render(QuizScreenState::default()));
}
