use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{FlashcardsView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/flashcards", FlashcardsView)] Flashcards {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "StudyMate" }
            ul {
                li { Link { to: Route::Quiz {}, "Quiz" } }
                li { Link { to: Route::Flashcards {}, "Flashcards" } }
            }
        }
    }
}
