//! Countdown session
//!
//! Owns everything one countdown needs and wires the three units of
//! execution together:
//!
//! ```text
//!   ticker task ──remaining──▶ render thread ──alert_started──▶ exit watcher task
//!        │                          ▲                                  │
//!        └────────completion────────┘                                  ▼
//!                                                              ExitReason ─▶ shutdown
//! ```
//!
//! `run` returns only after the exit watcher has decided, the render thread
//! has been stopped and joined, and the ticker has finished.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ding_types::DisplaySettings;

use crate::alert::AlertPlayer;
use crate::duration::DurationSecs;
use crate::error::SessionError;
use crate::exit::{ExitReason, ExitWatcher, PollBackoff};
use crate::remaining::remaining_channel;
use crate::render::{Readout, RenderLoop};
use crate::signal::Signal;
use crate::ticker::{TickerOutcome, run_ticker};

/// Engine timing knobs
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Countdown step
    pub tick: Duration,
    /// Render cadence
    pub frame: Duration,
    pub poll: PollBackoff,
    pub show_alert_text: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            frame: Duration::from_millis(16),
            poll: PollBackoff::default(),
            show_alert_text: true,
        }
    }
}

impl EngineConfig {
    pub fn from_display(display: &DisplaySettings) -> Self {
        Self {
            frame: Duration::from_millis(display.frame_interval_ms.max(1)),
            show_alert_text: display.show_alert_text,
            ..Self::default()
        }
    }
}

/// The one-shot signals shared by a session's units
#[derive(Debug, Clone)]
pub struct SessionSignals {
    /// Remaining time reached zero
    pub completion: Signal,
    /// The render loop started the alert
    pub alert_started: Signal,
    /// User requested early termination
    pub abort: Signal,
    /// Exit decision made; the render loop stops
    pub shutdown: Signal,
}

impl SessionSignals {
    pub fn new() -> Self {
        Self {
            completion: Signal::new("completion"),
            alert_started: Signal::new("alert_started"),
            abort: Signal::new("abort"),
            shutdown: Signal::new("shutdown"),
        }
    }
}

impl Default for SessionSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles for a running session's units
#[derive(Default)]
pub struct SessionTasks {
    pub ticker: Option<tokio::task::JoinHandle<TickerOutcome>>,
    pub exit_watcher: Option<tokio::task::JoinHandle<ExitReason>>,
    pub render: Option<JoinHandle<()>>,
}

impl SessionTasks {
    /// Abort the async units. The render thread stops via the shutdown signal.
    pub fn abort_all(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
        if let Some(handle) = self.exit_watcher.take() {
            handle.abort();
        }
    }
}

pub struct CountdownSession {
    duration: DurationSecs,
    player: Arc<dyn AlertPlayer>,
    config: EngineConfig,
    signals: SessionSignals,
}

impl CountdownSession {
    pub fn new(duration: DurationSecs, player: Arc<dyn AlertPlayer>, config: EngineConfig) -> Self {
        Self {
            duration,
            player,
            config,
            signals: SessionSignals::new(),
        }
    }

    pub fn signals(&self) -> &SessionSignals {
        &self.signals
    }

    /// Run the countdown until the alert has played (or the session is aborted).
    ///
    /// Must be called from within a tokio runtime. The readout is driven from a
    /// dedicated render thread.
    pub async fn run<R>(self, readout: R) -> Result<ExitReason, SessionError>
    where
        R: Readout + Send + 'static,
    {
        let Self {
            duration,
            player,
            config,
            signals,
        } = self;

        tracing::info!(
            duration,
            tick_ms = config.tick.as_millis() as u64,
            "countdown session starting"
        );

        let (remaining_tx, remaining_rx) = remaining_channel();
        let mut tasks = SessionTasks::default();

        tasks.ticker = Some(tokio::spawn(run_ticker(
            duration,
            remaining_tx,
            signals.completion.clone(),
            signals.abort.clone(),
            config.tick,
        )));

        let watcher = ExitWatcher::new(
            signals.alert_started.clone(),
            signals.abort.clone(),
            Arc::clone(&player),
            config.poll,
        );
        tasks.exit_watcher = Some(tokio::spawn(watcher.run()));

        let render_loop = RenderLoop::new(
            remaining_rx,
            duration,
            signals.completion.clone(),
            signals.alert_started.clone(),
            signals.abort.clone(),
            player,
        )
        .with_alert_text(config.show_alert_text);
        let shutdown = signals.shutdown.clone();
        let frame = config.frame;
        let spawned = thread::Builder::new()
            .name("ding-render".to_string())
            .spawn(move || {
                let mut readout = readout;
                render_loop.run(&mut readout, frame, &shutdown);
            });
        match spawned {
            Ok(handle) => tasks.render = Some(handle),
            Err(e) => {
                tasks.abort_all();
                return Err(SessionError::SpawnRender(e));
            }
        }

        let reason = match tasks.exit_watcher.take() {
            Some(handle) => handle.await,
            None => Ok(ExitReason::Aborted),
        };
        signals.shutdown.fire();

        let reason = match reason {
            Ok(reason) => reason,
            Err(e) => {
                tasks.abort_all();
                join_render(tasks.render.take()).await?;
                return Err(SessionError::Join(e));
            }
        };

        if reason == ExitReason::Aborted {
            signals.abort.fire();
        }
        if let Some(ticker) = tasks.ticker.take() {
            let outcome = ticker.await?;
            tracing::debug!(?outcome, "ticker finished");
        }
        join_render(tasks.render.take()).await?;

        tracing::info!(?reason, "countdown session finished");
        Ok(reason)
    }
}

async fn join_render(handle: Option<JoinHandle<()>>) -> Result<(), SessionError> {
    let Some(handle) = handle else {
        return Ok(());
    };
    tokio::task::spawn_blocking(move || handle.join())
        .await?
        .map_err(|_| SessionError::RenderPanicked)
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
