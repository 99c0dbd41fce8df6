#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod flashcard_service;
pub mod quiz;

pub use study_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, FlashcardServiceError, QuizServiceError, SurfaceError};
pub use flashcard_service::{FlashcardService, SAMPLE_FLASHCARDS};
pub use quiz::{
    Countdown, FilterChange, QuizEngine, QuizService, QuizSurface, TickReceiver, TimerTick,
};
