//! Quiz orchestration: store-backed session start, the countdown and the
//! event loop driver that renders effects onto a surface.

mod engine;
mod service;
mod surface;
mod timer;

pub use engine::{FilterChange, QuizEngine};
pub use service::QuizService;
pub use surface::QuizSurface;
pub use timer::{Countdown, TickReceiver, TimerTick};
