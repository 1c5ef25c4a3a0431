//! Exit watcher
//!
//! Waits for the alert to start, then polls the player until playback ends.
//! Its return value is the process exit decision; nothing here calls
//! `process::exit`.

use std::sync::Arc;
use std::time::Duration;

use crate::alert::AlertPlayer;
use crate::signal::Signal;

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Countdown completed and the alert finished playing
    AlertFinished,
    /// The user interrupted the countdown
    Aborted,
}

impl ExitReason {
    pub fn exit_code(&self) -> u8 {
        match self {
            ExitReason::AlertFinished => 0,
            ExitReason::Aborted => 130,
        }
    }
}

/// Poll delay growth while waiting for playback to end.
///
/// The delay for poll `n` is `first × factor^n`, clamped to `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollBackoff {
    pub first: Duration,
    pub max: Duration,
    pub factor: f64,
}

impl Default for PollBackoff {
    fn default() -> Self {
        Self {
            first: Duration::from_millis(5),
            max: Duration::from_millis(100),
            factor: 2.0,
        }
    }
}

impl PollBackoff {
    pub fn next(&self, attempt: u32) -> Duration {
        let exp = attempt.min(i32::MAX as u32) as i32;
        let nanos = self.first.as_nanos() as f64 * self.factor.powi(exp);
        if !nanos.is_finite() || nanos < 0.0 || nanos > self.max.as_nanos() as f64 {
            self.max
        } else {
            Duration::from_nanos(nanos as u64)
        }
    }
}

pub struct ExitWatcher {
    alert_started: Signal,
    abort: Signal,
    player: Arc<dyn AlertPlayer>,
    backoff: PollBackoff,
}

impl ExitWatcher {
    pub fn new(
        alert_started: Signal,
        abort: Signal,
        player: Arc<dyn AlertPlayer>,
        backoff: PollBackoff,
    ) -> Self {
        Self {
            alert_started,
            abort,
            player,
            backoff,
        }
    }

    /// Block until the alert has started and then stopped, or until abort.
    ///
    /// Termination needs a `true` observation followed by a `false` one. A
    /// player that never reports playback keeps this waiting forever.
    pub async fn run(self) -> ExitReason {
        tokio::select! {
            biased;
            _ = self.abort.wait() => return ExitReason::Aborted,
            _ = self.alert_started.wait() => {}
        }
        tracing::debug!("alert started, polling playback");

        let mut seen_playing = false;
        let mut attempt = 0u32;
        loop {
            if self.player.is_playing() {
                seen_playing = true;
            } else if seen_playing {
                tracing::info!("alert finished");
                return ExitReason::AlertFinished;
            }

            let delay = self.backoff.next(attempt);
            attempt = attempt.saturating_add(1);
            tokio::select! {
                biased;
                _ = self.abort.wait() => return ExitReason::Aborted,
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
