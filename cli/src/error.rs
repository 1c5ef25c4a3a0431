//! Startup and runtime errors for the ding binary

use std::path::PathBuf;

use thiserror::Error;

use ding_core::{ConfigError, DurationError, SessionError};

/// Errors loading or opening the alert sound
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("alert sound '{name}' not found (searched {searched:?})")]
    NotFound { name: String, searched: Vec<PathBuf> },

    #[error("failed to read alert sound {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode alert sound {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("failed to open audio output device")]
    Device(#[source] rodio::StreamError),

    #[error("failed to create audio sink")]
    Sink(#[source] rodio::PlayError),

    #[error("failed to start audio thread")]
    Thread(#[source] std::io::Error),

    #[error("audio thread exited before the output was ready")]
    ThreadExited,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("no timer value given")]
    MissingValue,
}
