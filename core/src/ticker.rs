//! Countdown ticker
//!
//! [`Countdown`] is the pure state machine; [`run_ticker`] drives it from a
//! fixed-interval timer and publishes every value it produces.
//!
//! # Lifecycle
//!
//! 1. Publish the full duration immediately
//! 2. Once per tick, publish `remaining - 1`
//! 3. After publishing 0, fire the completion signal and stop

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::duration::DurationSecs;
use crate::remaining::RemainingSender;
use crate::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running(DurationSecs),
    Done,
}

/// Remaining-seconds state machine
#[derive(Debug, Clone)]
pub struct Countdown {
    state: CountdownState,
}

impl Countdown {
    pub fn new(duration: DurationSecs) -> Self {
        let state = if duration == 0 {
            CountdownState::Done
        } else {
            CountdownState::Running(duration)
        };
        Self { state }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining(&self) -> DurationSecs {
        match self.state {
            CountdownState::Running(remaining) => remaining,
            CountdownState::Done => 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == CountdownState::Done
    }

    /// Advance one tick and return the value to publish.
    /// Returns `None` once the countdown is done.
    pub fn tick(&mut self) -> Option<DurationSecs> {
        match self.state {
            CountdownState::Running(remaining) => {
                let next = remaining.saturating_sub(1);
                self.state = if next == 0 {
                    CountdownState::Done
                } else {
                    CountdownState::Running(next)
                };
                Some(next)
            }
            CountdownState::Done => None,
        }
    }
}

/// How the ticker's unit of execution ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerOutcome {
    /// Reached zero and fired completion
    Completed,
    /// Stopped early by the abort signal; completion was not fired
    Aborted,
}

/// Run a countdown to completion, publishing into `remaining`.
///
/// Fires `completion` right after publishing 0. Dropping `remaining` on return
/// tells readers that no further values will arrive.
pub async fn run_ticker(
    duration: DurationSecs,
    remaining: RemainingSender,
    completion: Signal,
    abort: Signal,
    tick: Duration,
) -> TickerOutcome {
    let mut countdown = Countdown::new(duration);
    remaining.publish(duration);
    tracing::debug!(remaining = duration, "countdown started");

    if abort.is_fired() {
        tracing::info!(remaining = duration, "countdown aborted before start");
        return TickerOutcome::Aborted;
    }
    if countdown.is_done() {
        completion.fire();
        tracing::info!("countdown complete");
        return TickerOutcome::Completed;
    }

    let mut interval = interval_at(Instant::now() + tick, tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = abort.wait() => {
                tracing::info!(remaining = countdown.remaining(), "countdown aborted");
                return TickerOutcome::Aborted;
            }
            _ = interval.tick() => {
                let Some(value) = countdown.tick() else {
                    break;
                };
                remaining.publish(value);
                tracing::debug!(remaining = value, "tick");
                if countdown.is_done() {
                    break;
                }
            }
        }
    }

    if abort.is_fired() {
        tracing::info!("countdown aborted at zero");
        return TickerOutcome::Aborted;
    }
    completion.fire();
    tracing::info!("countdown complete");
    TickerOutcome::Completed
}

#[cfg(test)]
#[path = "ticker_tests.rs"]
mod tests;
