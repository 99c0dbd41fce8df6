use dioxus::prelude::*;
use futures_util::StreamExt;
use services::{FilterChange, QuizEngine, TickReceiver};
use study_core::model::SubjectFilter;
use study_core::quiz::{QuizConfig, QuizEvent};

use super::screen::{QuizScreen, QuizSetup, ScreenAction};
use super::state::QuizScreenState;
use super::surface::SignalSurface;
use crate::context::AppContext;
use crate::views::{ViewState, view_state_from_resource, ViewError};

/// Message sent from the quiz screen to the engine task.
#[derive(Clone, Debug, PartialEq)]
pub enum QuizIntent {
    Start(QuizConfig),
    Event(QuizEvent),
    ChangeSubject(SubjectFilter),
    Restart,
}

impl QuizSetup {
    fn from_config(config: &QuizConfig) -> Self {
        Self {
            subject: config.filter().as_str().to_string(),
            question_count: config.question_count(),
            seconds: config.seconds_per_question(),
        }
    }

    fn to_config(&self) -> Option<QuizConfig> {
        QuizConfig::new(
            SubjectFilter::parse(&self.subject),
            self.question_count,
            self.seconds,
        )
        .inspect_err(|err| tracing::warn!(%err, "invalid quiz setup"))
        .ok()
    }
}

/// Shown while a subject change waits for the running quiz to end.
pub const SUBJECT_DEFERRED_NOTICE: &str = "The new subject applies to the next quiz.";

fn notice_for(change: FilterChange) -> Option<&'static str> {
    match change {
        FilterChange::Deferred => Some(SUBJECT_DEFERRED_NOTICE),
        FilterChange::Reset => None,
    }
}

async fn drive_quiz(
    mut engine: QuizEngine<SignalSurface>,
    mut ticks: TickReceiver,
    mut intents: UnboundedReceiver<QuizIntent>,
    mut notice: Signal<Option<&'static str>>,
) {
    engine.show_idle();
    loop {
        tokio::select! {
            intent = intents.next() => {
                let Some(intent) = intent else { break };
                match intent {
                    QuizIntent::Start(config) => {
                        notice.set(None);
                        engine.start_with(config).await;
                    }
                    QuizIntent::Event(event) => engine.handle(event),
                    QuizIntent::ChangeSubject(filter) => {
                        notice.set(notice_for(engine.set_filter(filter)));
                    }
                    QuizIntent::Restart => {
                        notice.set(None);
                        engine.restart();
                    }
                }
            }
            Some(tick) = ticks.recv() => engine.on_tick(tick),
        }
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let defaults = ctx.quiz_defaults();
    let screen = use_signal(QuizScreenState::default);
    let notice = use_signal(|| None::<&'static str>);
    let mut setup = use_signal(|| QuizSetup::from_config(&defaults));

    let subjects_resource = {
        let flashcards = ctx.flashcards();
        let user_id = ctx.user_id();
        use_resource(move || {
            let flashcards = flashcards.clone();
            let user_id = user_id.clone();
            async move {
                flashcards
                    .subjects(&user_id)
                    .await
                    .map_err(|_| ViewError::Unknown)
            }
        })
    };
    let subjects = match view_state_from_resource(&subjects_resource) {
        ViewState::Ready(subjects) => subjects,
        ViewState::Idle | ViewState::Loading | ViewState::Error(_) => Vec::new(),
    };

    let engine = {
        let ctx = ctx.clone();
        use_coroutine(move |intents: UnboundedReceiver<QuizIntent>| {
            let (engine, ticks) = QuizEngine::new(
                ctx.user_id(),
                ctx.quiz(),
                SignalSurface::new(screen),
                ctx.quiz_defaults(),
            );
            drive_quiz(engine, ticks, intents, notice)
        })
    };

    let on_setup = use_callback(move |next: QuizSetup| {
        let subject_changed = next.subject != setup.peek().subject;
        if subject_changed {
            engine.send(QuizIntent::ChangeSubject(SubjectFilter::parse(&next.subject)));
        }
        setup.set(next);
    });

    let on_action = use_callback(move |action: ScreenAction| {
        let intent = match action {
            ScreenAction::Start => match setup.peek().to_config() {
                Some(config) => QuizIntent::Start(config),
                None => return,
            },
            ScreenAction::Select(index) => QuizIntent::Event(QuizEvent::Select(index)),
            ScreenAction::Next => QuizIntent::Event(QuizEvent::Advance),
            ScreenAction::Skip => QuizIntent::Event(QuizEvent::Skip),
            ScreenAction::Restart => QuizIntent::Restart,
        };
        engine.send(intent);
    });

    rsx! {
        div { class: "page",
            h2 { "Quiz" }
            if let Some(text) = notice() {
                p { class: "notice", "{text}" }
            }
            QuizScreen {
                state: screen(),
                subjects,
                setup: setup(),
                on_setup,
                on_action,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_deferred_subject_changes_show_a_notice() {
        assert_eq!(
            notice_for(FilterChange::Deferred),
            Some(SUBJECT_DEFERRED_NOTICE)
        );
        assert_eq!(notice_for(FilterChange::Reset), None);
    }
}
