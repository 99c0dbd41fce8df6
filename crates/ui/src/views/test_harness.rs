use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{Clock, FlashcardService, QuizService};
use storage::repository::{FlashcardRepository, Storage};
use study_core::model::UserId;
use study_core::quiz::QuizConfig;
use study_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::{FlashcardsView, QuizView};

#[derive(Clone)]
struct TestApp {
    user_id: UserId,
    flashcards: Arc<FlashcardService>,
    quiz: Arc<QuizService>,
}

impl UiApp for TestApp {
    fn user_id(&self) -> UserId {
        self.user_id.clone()
    }

    fn quiz_defaults(&self) -> QuizConfig {
        QuizConfig::default()
    }

    fn flashcards(&self) -> Arc<FlashcardService> {
        Arc::clone(&self.flashcards)
    }

    fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Flashcards,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Flashcards => rsx! { FlashcardsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub user_id: UserId,
    pub flashcards: Arc<FlashcardService>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_repo(view, Arc::clone(&Storage::in_memory().flashcards))
}

pub fn setup_view_harness_with_repo(
    view: ViewKind,
    repo: Arc<dyn FlashcardRepository>,
) -> ViewHarness {
    let user_id = UserId::new("tester").expect("user id");
    let flashcards = Arc::new(FlashcardService::new(
        Clock::fixed(fixed_now()),
        Arc::clone(&repo),
    ));
    let quiz = Arc::new(QuizService::new(repo));

    let app = Arc::new(TestApp {
        user_id: user_id.clone(),
        flashcards: Arc::clone(&flashcards),
        quiz,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        user_id,
        flashcards,
    }
}
