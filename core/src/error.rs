//! Error types for the countdown engine

use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while turning user input into a countdown duration
#[derive(Debug, Error)]
pub enum DurationError {
    #[error("could not read value for timer: '{input}'")]
    InvalidNumber {
        input: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("timer value must not be negative: '{input}'")]
    Negative { input: String },

    #[error("timer value must be a finite number: '{input}'")]
    NotFinite { input: String },

    #[error("timer value is too large: '{input}'")]
    TooLarge { input: String },
}

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to load configuration from {path}")]
    LoadPath {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },
}

/// Errors while running a countdown session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to spawn render thread")]
    SpawnRender(#[source] std::io::Error),

    #[error("render thread panicked")]
    RenderPanicked,

    #[error("background task failed")]
    Join(#[from] tokio::task::JoinError),
}
