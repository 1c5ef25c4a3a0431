//! Application configuration
//!
//! Re-exports the shared types from ding-types and provides persistence for
//! `AppConfig` through `confy`.

use std::path::{Path, PathBuf};

pub use ding_types::{AlertSettings, AppConfig, DisplaySettings, TimeUnit};

use crate::error::ConfigError;

pub const APP_NAME: &str = "ding";
const CONFIG_NAME: &str = "config";

/// Per-user application directory (`~/.config/ding` on Linux)
pub fn app_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Directory searched first for alert sounds
pub fn user_sounds_dir(settings: &AlertSettings) -> Option<PathBuf> {
    settings
        .sounds_dir
        .clone()
        .or_else(|| app_dir().map(|dir| dir.join("sounds")))
}

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    /// Load from the platform config location, creating it with defaults if missing
    fn load() -> Result<Self, ConfigError>;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn config_path() -> Option<PathBuf>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Result<Self, ConfigError> {
        let config = confy::load(APP_NAME, CONFIG_NAME)?;
        tracing::debug!(path = ?Self::config_path(), "configuration loaded");
        Ok(config)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = confy::load_path(path).map_err(|source| ConfigError::LoadPath {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(?path, "configuration loaded");
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ding-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn load_from_reads_file() {
        let path = scratch_file("custom.toml");
        std::fs::write(
            &path,
            "default_unit = \"hours\"\n\n[alert]\nvolume = 30\n\n[display]\nframe_interval_ms = 33\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.default_unit, TimeUnit::Hours);
        assert_eq!(config.alert.volume, 30);
        assert_eq!(config.alert.bell_sound, "hand-bell.wav");
        assert_eq!(config.display.frame_interval_ms, 33);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = scratch_file("missing.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = scratch_file("broken.toml");
        std::fs::write(&path, "[alert\nvolume = loud").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::LoadPath { .. }));
    }

    #[test]
    fn explicit_sounds_dir_wins() {
        let settings = AlertSettings {
            sounds_dir: Some(PathBuf::from("/opt/sounds")),
            ..AlertSettings::default()
        };
        assert_eq!(
            user_sounds_dir(&settings),
            Some(PathBuf::from("/opt/sounds"))
        );
    }
}
