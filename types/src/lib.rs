//! Shared configuration types for ding
//!
//! This crate contains serializable configuration types that are shared between
//! the countdown engine (ding-core) and the command line frontend (ding-cli).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Duration Units
// ─────────────────────────────────────────────────────────────────────────────

/// Unit a user-supplied countdown value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hours,
    Minutes,
    #[default]
    Seconds,
}

impl TimeUnit {
    /// Number of seconds in one of this unit
    pub fn seconds_multiplier(&self) -> f64 {
        match self {
            TimeUnit::Hours => 3600.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Seconds => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Alert Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Alert sound selection and playback volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSettings {
    /// User sound directory; files here override the bundled sounds.
    /// `None` means `<config dir>/ding/sounds`.
    #[serde(default)]
    pub sounds_dir: Option<PathBuf>,

    /// Sound played when the countdown completes
    #[serde(default = "default_bell_sound")]
    pub bell_sound: String,

    /// Sound played instead of `bell_sound` when a louder alert is requested
    #[serde(default = "default_loud_sound")]
    pub loud_sound: String,

    /// Volume level (0-100)
    #[serde(default = "default_volume")]
    pub volume: u8,
}

fn default_bell_sound() -> String {
    "hand-bell.wav".to_string()
}

fn default_loud_sound() -> String {
    "alarm.wav".to_string()
}

fn default_volume() -> u8 {
    80
}

impl AlertSettings {
    /// File name of the sound to play for the given loudness
    pub fn sound_for(&self, loud: bool) -> &str {
        if loud {
            &self.loud_sound
        } else {
            &self.bell_sound
        }
    }
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            sounds_dir: None,
            bell_sound: default_bell_sound(),
            loud_sound: default_loud_sound(),
            volume: default_volume(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display Settings
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Render cadence in milliseconds (16 ≈ 60 FPS)
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Show the alert indicator while the alert is playing
    #[serde(default = "default_true")]
    pub show_alert_text: bool,
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_true() -> bool {
    true
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            show_alert_text: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Persistent application configuration.
///
/// Persistence (load/save) is provided by ding-core via the `AppConfigExt`
/// trait, which owns the `confy` dependency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Unit used when a bare value is given without a unit subcommand
    #[serde(default)]
    pub default_unit: TimeUnit,
    #[serde(default)]
    pub alert: AlertSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}
