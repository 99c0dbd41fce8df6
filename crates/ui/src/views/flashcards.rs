use dioxus::prelude::*;
use services::FlashcardServiceError;
use storage::repository::StorageError;
use study_core::model::{Flashcard, FlashcardDraft, FlashcardId};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Hours credited by one "studied" click.
const STUDY_INCREMENT_HOURS: f64 = 0.25;

fn view_error(err: &FlashcardServiceError) -> ViewError {
    match err {
        FlashcardServiceError::Flashcard(_) => ViewError::Invalid,
        FlashcardServiceError::Storage(StorageError::NotFound) => ViewError::NotFound,
        _ => ViewError::Unknown,
    }
}

#[derive(Clone, Debug, PartialEq)]
struct FlashcardRow {
    id: FlashcardId,
    subject: String,
    question: String,
    answer: String,
    studied_hours: f64,
}

impl From<&Flashcard> for FlashcardRow {
    fn from(card: &Flashcard) -> Self {
        Self {
            id: card.id(),
            subject: card.subject().to_string(),
            question: card.question().to_string(),
            answer: card.answer().to_string(),
            studied_hours: card.studied_hours(),
        }
    }
}

#[component]
pub fn FlashcardsView() -> Element {
    let ctx = use_context::<AppContext>();
    let flashcards = ctx.flashcards();
    let user_id = ctx.user_id();

    let mut subject = use_signal(String::new);
    let mut question = use_signal(String::new);
    let mut answer = use_signal(String::new);
    let mut filter = use_signal(String::new);
    let mut action_error = use_signal(|| None::<ViewError>);
    let mut revision = use_signal(|| 0_u32);

    let resource = {
        let flashcards = flashcards.clone();
        let user_id = user_id.clone();
        use_resource(move || {
            let flashcards = flashcards.clone();
            let user_id = user_id.clone();
            let filter_text = filter();
            let _ = revision();
            async move {
                let cards = flashcards
                    .list_filtered(&user_id, &filter_text)
                    .await
                    .map_err(|err| view_error(&err))?;
                Ok::<_, ViewError>(cards.iter().map(FlashcardRow::from).collect::<Vec<_>>())
            }
        })
    };
    let state = view_state_from_resource(&resource);

    let on_add = {
        let flashcards = flashcards.clone();
        let user_id = user_id.clone();
        use_callback(move |()| {
            let flashcards = flashcards.clone();
            let user_id = user_id.clone();
            let draft = FlashcardDraft::new(subject(), question(), answer());
            spawn(async move {
                match flashcards.create(&user_id, draft).await {
                    Ok(_) => {
                        subject.set(String::new());
                        question.set(String::new());
                        answer.set(String::new());
                        action_error.set(None);
                        revision += 1;
                    }
                    Err(err) => {
                        tracing::warn!(%err, "flashcard not created");
                        action_error.set(Some(view_error(&err)));
                    }
                }
            });
        })
    };

    let on_study = {
        let flashcards = flashcards.clone();
        let user_id = user_id.clone();
        use_callback(move |id: FlashcardId| {
            let flashcards = flashcards.clone();
            let user_id = user_id.clone();
            spawn(async move {
                match flashcards
                    .record_study_time(&user_id, id, STUDY_INCREMENT_HOURS)
                    .await
                {
                    Ok(card) => {
                        tracing::debug!(%id, hours = card.studied_hours(), "study time updated");
                        action_error.set(None);
                    }
                    Err(err) => {
                        tracing::warn!(%err, %id, "study time not recorded");
                        action_error.set(Some(view_error(&err)));
                    }
                }
                revision += 1;
            });
        })
    };

    let on_delete = use_callback(move |id: FlashcardId| {
        let flashcards = flashcards.clone();
        let user_id = user_id.clone();
        spawn(async move {
            match flashcards.delete(&user_id, id).await {
                Ok(()) => action_error.set(None),
                Err(err) => {
                    tracing::warn!(%err, %id, "flashcard not deleted");
                    action_error.set(Some(view_error(&err)));
                }
            }
            revision += 1;
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Flashcards" }

            form {
                class: "flashcard-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_add.call(());
                },
                input {
                    id: "flashcard-subject",
                    placeholder: "Subject",
                    value: "{subject}",
                    oninput: move |evt| subject.set(evt.value()),
                }
                input {
                    id: "flashcard-question",
                    placeholder: "Question",
                    value: "{question}",
                    oninput: move |evt| question.set(evt.value()),
                }
                input {
                    id: "flashcard-answer",
                    placeholder: "Answer",
                    value: "{answer}",
                    oninput: move |evt| answer.set(evt.value()),
                }
                button { class: "btn primary", r#type: "submit", "Add Flashcard" }
            }

            if let Some(err) = action_error() {
                p { class: "error", "{err.message()}" }
            }

            input {
                id: "flashcard-filter",
                placeholder: "Filter by subject",
                value: "{filter}",
                oninput: move |evt| filter.set(evt.value()),
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { "No flashcards yet." }
                    } else {
                        ul { class: "flashcard-list",
                            for row in rows {
                                FlashcardItem { key: "{row.id}", row, on_study, on_delete }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn FlashcardItem(
    row: FlashcardRow,
    on_study: EventHandler<FlashcardId>,
    on_delete: EventHandler<FlashcardId>,
) -> Element {
    let id = row.id;
    let studied = format!("{:.2}", row.studied_hours);
    rsx! {
        li { class: "flashcard",
            p { class: "flashcard-subject", strong { "Subject: " } "{row.subject}" }
            p { class: "flashcard-question", strong { "Q: " } "{row.question}" }
            p { class: "flashcard-answer", strong { "A: " } "{row.answer}" }
            p { class: "flashcard-studied", "Studied: {studied} h" }
            button {
                class: "btn",
                onclick: move |_| on_study.call(id),
                "+15 min"
            }
            button {
                class: "btn danger",
                onclick: move |_| on_delete.call(id),
                "Delete"
            }
        }
    }
}
