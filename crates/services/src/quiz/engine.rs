use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use study_core::model::{SubjectFilter, UserId};
use study_core::quiz::{
    QuizConfig, QuizEffect, QuizEvent, QuizPhase, QuizSession, QuizSummary, idle_effects,
    no_data_effects,
};

use super::service::QuizService;
use super::surface::QuizSurface;
use super::timer::{Countdown, TickReceiver, TimerTick};
use crate::error::{QuizServiceError, SurfaceError};

/// What a subject change did to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    /// No quiz was running; the idle screen was shown again.
    Reset,
    /// A quiz is running; the new subject applies from the next start.
    Deferred,
}

/// Drives a quiz: owns the session and the countdown, and renders every
/// transition onto a [`QuizSurface`].
///
/// The engine never surfaces errors. An empty pool or a failed fetch shows
/// the empty-state message and leaves the engine idle. A missing surface slot
/// is logged, ends the current render batch and abandons the quiz it belonged
/// to, so no question is left on screen without its countdown or controls.
pub struct QuizEngine<S: QuizSurface> {
    user_id: UserId,
    quiz: Arc<QuizService>,
    surface: S,
    config: QuizConfig,
    session: Option<QuizSession>,
    countdown: Countdown,
    rng: StdRng,
}

impl<S: QuizSurface> QuizEngine<S> {
    /// Create an idle engine. Ticks of its countdown arrive on the returned
    /// receiver and must be fed back through [`QuizEngine::on_tick`].
    #[must_use]
    pub fn new(
        user_id: UserId,
        quiz: Arc<QuizService>,
        surface: S,
        config: QuizConfig,
    ) -> (Self, TickReceiver) {
        let (countdown, ticks) = Countdown::channel();
        let engine = Self {
            user_id,
            quiz,
            surface,
            config,
            session: None,
            countdown,
            rng: StdRng::from_os_rng(),
        };
        (engine, ticks)
    }

    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Render the idle screen.
    pub fn show_idle(&mut self) {
        self.render_best_effort(idle_effects());
    }

    /// Start a quiz with the current configuration.
    ///
    /// The flashcard fetch is the only suspension point. Any running quiz is
    /// discarded first.
    pub async fn start(&mut self) -> QuizPhase {
        self.countdown.cancel();
        self.session = None;

        let started = self
            .quiz
            .start_session(&self.user_id, self.config.clone(), &mut self.rng)
            .await;

        match started {
            Ok((session, effects)) => {
                tracing::info!(
                    user = %self.user_id,
                    questions = session.total(),
                    filter = %self.config.filter(),
                    "quiz started"
                );
                self.session = Some(session);
                if self.apply(effects).is_err() {
                    self.abandon();
                }
            }
            Err(QuizServiceError::Storage(err)) => {
                tracing::warn!(user = %self.user_id, %err, "flashcard fetch failed, treating pool as empty");
                let _ = self.apply(no_data_effects());
            }
            Err(QuizServiceError::Quiz(err)) => {
                tracing::info!(user = %self.user_id, %err, "quiz not started");
                let _ = self.apply(no_data_effects());
            }
        }
        self.phase()
    }

    /// Replace the configuration and start a quiz with it.
    pub async fn start_with(&mut self, config: QuizConfig) -> QuizPhase {
        self.config = config;
        self.start().await
    }

    /// Feed a user action to the running quiz. Ignored while idle.
    pub fn handle(&mut self, event: QuizEvent) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(?event, "event ignored while idle");
            return;
        };
        let was_complete = session.is_complete();
        let effects = session.handle(event, &mut self.rng);
        let finished = (!was_complete && session.is_complete()).then(|| session.summary());

        if self.apply(effects).is_err() {
            self.abandon();
            return;
        }
        if let Some(summary) = finished {
            tracing::info!(
                user = %self.user_id,
                score = summary.score,
                total = summary.total,
                timed_out = summary.timed_out,
                skipped = summary.skipped,
                "quiz complete"
            );
        }
    }

    /// Feed a countdown tick. Ticks from a cancelled or replaced countdown
    /// are dropped.
    pub fn on_tick(&mut self, tick: TimerTick) {
        if !self.countdown.accepts(tick) {
            tracing::trace!("stale tick dropped");
            return;
        }
        self.handle(QuizEvent::Tick);
    }

    /// Drop the current quiz and return to the idle screen.
    pub fn restart(&mut self) {
        self.countdown.cancel();
        self.session = None;
        let _ = self.apply(idle_effects());
    }

    /// Change the subject filter. Outside a running quiz this also resets to
    /// the idle screen; a running quiz keeps its questions.
    pub fn set_filter(&mut self, filter: SubjectFilter) -> FilterChange {
        self.config = self.config.clone().with_filter(filter);
        if self.phase() == QuizPhase::InProgress {
            tracing::debug!(filter = %self.config.filter(), "subject change deferred");
            FilterChange::Deferred
        } else {
            self.restart();
            FilterChange::Reset
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.session
            .as_ref()
            .map_or(QuizPhase::Idle, QuizSession::phase)
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        self.session.as_ref().map(QuizSession::summary)
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.countdown.is_running()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run effects in order, stopping at the first surface failure.
    fn apply(&mut self, effects: Vec<QuizEffect>) -> Result<(), SurfaceError> {
        for effect in effects {
            if let Err(err) = self.run(effect) {
                tracing::error!(%err, "render batch aborted");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Drop a quiz whose screen could not be rendered and fall back to the
    /// idle layout as far as the surface allows.
    fn abandon(&mut self) {
        self.countdown.cancel();
        if self.session.take().is_some() {
            tracing::warn!(user = %self.user_id, "quiz abandoned after a render failure");
        }
        self.render_best_effort(idle_effects());
    }

    fn render_best_effort(&mut self, effects: Vec<QuizEffect>) {
        for effect in effects {
            if let Err(err) = self.run(effect) {
                tracing::debug!(%err, "idle effect skipped");
            }
        }
    }

    fn run(&mut self, effect: QuizEffect) -> Result<(), SurfaceError> {
        match effect {
            QuizEffect::StartTimer { seconds } => {
                self.countdown.start(seconds);
                Ok(())
            }
            QuizEffect::CancelTimer => {
                self.countdown.cancel();
                Ok(())
            }
            QuizEffect::SetText { slot, text } => self.surface.set_text(slot, &text),
            QuizEffect::SetVisible { slot, visible } => self.surface.set_visible(slot, visible),
            QuizEffect::SetOptions(options) => self.surface.set_options(&options),
            QuizEffect::MarkOption { index, mark } => self.surface.mark_option(index, mark),
            QuizEffect::DisableOptions => self.surface.disable_options(),
        }
    }
}
