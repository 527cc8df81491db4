use crate::{CONFIG_DIRECTORY, CONFIG_FILE, expand_tilde};
use anyhow::Result;
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

const DEFAULT_POSITION_INTERVAL_MS: u64 = 1000;
const LOG_FILE: &str = "kinescope.log";

/// How the play state is kept steady across a seek.
#[derive(Debug, Default, Deserialize, PartialEq, Eq, Copy, Clone)]
#[serde(rename_all = "snake_case")]
pub enum SeekPolicy {
    /// Pause a playing item for the seek and resume once it completes.
    #[default]
    PauseWhileSeeking,
    /// Seek without touching the play state.
    InPlace,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct Settings {
    pub position_interval_ms: u64,
    pub seek_policy: SeekPolicy,
    pub scrub_step_secs: f64,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            position_interval_ms: DEFAULT_POSITION_INTERVAL_MS,
            seek_policy: SeekPolicy::default(),
            scrub_step_secs: 5.0,
            log_file: None,
        }
    }
}

impl Settings {
    /// Read `config.toml` from the user config directory, falling back to
    /// defaults when there is none.
    pub fn load() -> Result<Self> {
        match dirs::config_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(CONFIG_FILE)) {
            Some(path) if path.exists() => Self::load_from_file(path),
            _ => Ok(Settings::default()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_str = std::fs::read_to_string(path.as_ref())?;
        let settings = toml::from_str::<Settings>(&file_str)?;
        Ok(settings)
    }

    pub fn position_interval(&self) -> Duration {
        match self.position_interval_ms {
            0 => Duration::from_millis(DEFAULT_POSITION_INTERVAL_MS),
            ms => Duration::from_millis(ms),
        }
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(path) => expand_tilde(path).ok(),
            None => dirs::cache_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(LOG_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings = toml::from_str("scrub_step_secs = 10.0").unwrap();

        assert_eq!(settings.scrub_step_secs, 10.0);
        assert_eq!(settings.position_interval(), Duration::from_secs(1));
        assert_eq!(settings.seek_policy, SeekPolicy::PauseWhileSeeking);
    }

    #[test]
    fn reads_policy_and_interval_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "position_interval_ms = 250\nseek_policy = \"in_place\"\nlog_file = \"/tmp/k.log\"\n",
        )
        .unwrap();

        let settings = Settings::load_from_file(&path).unwrap();
        assert_eq!(settings.position_interval(), Duration::from_millis(250));
        assert_eq!(settings.seek_policy, SeekPolicy::InPlace);
        assert_eq!(settings.log_path(), Some(PathBuf::from("/tmp/k.log")));
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        let settings = Settings {
            position_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(settings.position_interval(), Duration::from_secs(1));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "seek_policy = \"sideways\"").unwrap();

        assert!(Settings::load_from_file(&path).is_err());
    }
}
