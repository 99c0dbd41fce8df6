use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

/// One elapsed second of a countdown.
///
/// Carries the generation of the countdown that produced it so ticks queued
/// before a cancel or restart can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    generation: u64,
}

/// Receiving half of a countdown's tick channel.
#[derive(Debug)]
pub struct TickReceiver {
    rx: mpsc::UnboundedReceiver<TimerTick>,
}

impl TickReceiver {
    /// Wait for the next tick. Returns `None` once the countdown is dropped.
    pub async fn recv(&mut self) -> Option<TimerTick> {
        self.rx.recv().await
    }
}

/// A restartable one-second countdown backed by a tokio task.
///
/// At most one task is live. Starting again or cancelling aborts the current
/// task and invalidates every tick it already queued.
#[derive(Debug)]
pub struct Countdown {
    tx: mpsc::UnboundedSender<TimerTick>,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    #[must_use]
    pub fn channel() -> (Self, TickReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let countdown = Self {
            tx,
            generation: 0,
            handle: None,
        };
        (countdown, TickReceiver { rx })
    }

    /// Emit `seconds` ticks, one per second, replacing any running countdown.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, seconds: u32) {
        self.cancel();
        let generation = self.generation;
        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            for _ in 0..seconds {
                interval.tick().await;
                if tx.send(TimerTick { generation }).is_err() {
                    return;
                }
            }
        }));
        tracing::trace!(generation, seconds, "countdown started");
    }

    /// Stop the running countdown, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Whether `tick` came from the current countdown.
    #[must_use]
    pub fn accepts(&self, tick: TimerTick) -> bool {
        self.handle.is_some() && tick.generation == self.generation
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_then_stops() {
        let (mut countdown, mut ticks) = Countdown::channel();
        let started = Instant::now();
        countdown.start(3);

        for _ in 0..3 {
            let tick = ticks.recv().await.expect("tick");
            assert!(countdown.accepts(tick));
        }
        assert_eq!(started.elapsed(), Duration::from_secs(3));

        let more = time::timeout(Duration::from_secs(5), ticks.recv()).await;
        assert!(more.is_err());
        assert!(!countdown.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks_and_invalidates_queued_ones() {
        let (mut countdown, mut ticks) = Countdown::channel();
        countdown.start(10);
        let first = ticks.recv().await.expect("tick");
        assert!(countdown.is_running());

        countdown.cancel();
        assert!(!countdown.accepts(first));
        assert!(!countdown.is_running());

        let more = time::timeout(Duration::from_secs(5), ticks.recv()).await;
        assert!(more.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_rejects_ticks_from_the_previous_run() {
        let (mut countdown, mut ticks) = Countdown::channel();
        countdown.start(10);
        let old = ticks.recv().await.expect("tick");

        countdown.start(10);
        assert!(!countdown.accepts(old));
        let fresh = ticks.recv().await.expect("tick");
        assert!(countdown.accepts(fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_accepted_before_start() {
        let (countdown, _ticks) = Countdown::channel();
        assert!(!countdown.accepts(TimerTick { generation: 0 }));
    }
}
