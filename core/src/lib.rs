//! Countdown-coordination engine for the `ding` timer.
//!
//! ```text
//! duration ─▶ ticker ─(remaining)─▶ render loop ─(alert_started)─▶ exit watcher
//!               │                        ▲                              │
//!               └──────(completion)──────┘                              ▼
//!                                                                  ExitReason
//! ```
//!
//! Units communicate only through one-shot [`Signal`]s and the
//! most-recent-value remaining-time slot; [`CountdownSession`] owns them all.

pub mod alert;
pub mod config;
pub mod duration;
pub mod error;
pub mod exit;
pub mod remaining;
pub mod render;
pub mod session;
pub mod signal;
pub mod ticker;

pub use alert::AlertPlayer;
pub use config::{AppConfig, AppConfigExt, TimeUnit};
pub use duration::{DurationSecs, compute_duration};
pub use error::{ConfigError, DurationError, SessionError};
pub use exit::{ExitReason, ExitWatcher, PollBackoff};
pub use remaining::{RemainingReceiver, RemainingSender, remaining_channel};
pub use render::{Clock, Frame, Readout, RenderLoop};
pub use session::{CountdownSession, EngineConfig, SessionSignals, SessionTasks};
pub use signal::Signal;
pub use ticker::{Countdown, CountdownState, TickerOutcome, run_ticker};
