//! Render loop
//!
//! Runs on its own thread at a fixed frame cadence. Each cycle it starts the
//! alert once the countdown completes, picks up the newest remaining time if
//! one was published, and draws either the clock or the alert indicator.
//! Nothing in a cycle blocks.

use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::alert::AlertPlayer;
use crate::duration::DurationSecs;
use crate::remaining::RemainingReceiver;
use crate::signal::Signal;

const SECS_PER_HOUR: u64 = 60 * 60;
const SECS_PER_MINUTE: u64 = 60;

/// Remaining time split for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Clock {
    pub fn from_secs(total: DurationSecs) -> Self {
        Self {
            hours: total / SECS_PER_HOUR,
            minutes: total % SECS_PER_HOUR / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// What a cycle drew
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Time(Clock),
    Alert,
}

/// Drawing hooks supplied by the display layer, called once per cycle
pub trait Readout {
    fn draw_time(&mut self, clock: Clock);

    fn draw_alert(&mut self);

    /// Called once after the last cycle
    fn finish(&mut self) {}
}

pub struct RenderLoop {
    remaining: RemainingReceiver,
    retained: DurationSecs,
    completion: Signal,
    alert_started: Signal,
    abort: Signal,
    player: Arc<dyn AlertPlayer>,
    show_alert_text: bool,
}

impl RenderLoop {
    /// `initial` is shown until the first value arrives from the ticker
    pub fn new(
        remaining: RemainingReceiver,
        initial: DurationSecs,
        completion: Signal,
        alert_started: Signal,
        abort: Signal,
        player: Arc<dyn AlertPlayer>,
    ) -> Self {
        Self {
            remaining,
            retained: initial,
            completion,
            alert_started,
            abort,
            player,
            show_alert_text: true,
        }
    }

    pub fn with_alert_text(mut self, show: bool) -> Self {
        self.show_alert_text = show;
        self
    }

    /// Remaining time currently on display
    pub fn retained(&self) -> DurationSecs {
        self.retained
    }

    /// One render cycle
    pub fn cycle<R: Readout + ?Sized>(&mut self, readout: &mut R) -> Frame {
        // The render loop is the only writer of alert_started, so this runs once.
        // An aborted session never starts the alert.
        if self.completion.is_fired()
            && !self.alert_started.is_fired()
            && !self.abort.is_fired()
        {
            self.player.rewind();
            self.player.play();
            self.alert_started.fire();
            tracing::info!("alert started");
        }

        if let Some(value) = self.remaining.try_latest() {
            self.retained = value;
        }

        if self.show_alert_text && self.player.is_playing() {
            readout.draw_alert();
            Frame::Alert
        } else {
            let clock = Clock::from_secs(self.retained);
            readout.draw_time(clock);
            Frame::Time(clock)
        }
    }

    /// Cycle every `frame` until `stop` or abort fires, then let the readout finish.
    pub fn run<R: Readout + ?Sized>(mut self, readout: &mut R, frame: Duration, stop: &Signal) {
        tracing::debug!(frame_ms = frame.as_millis() as u64, "render loop started");
        while !stop.is_fired() && !self.abort.is_fired() {
            self.cycle(readout);
            thread::sleep(frame);
        }
        readout.finish();
        tracing::debug!(retained = self.retained, "render loop stopped");
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
