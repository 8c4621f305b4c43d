//! Shell configuration: TOML file with CLI overrides.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// File read when `--config` is not given, if present.
pub const DEFAULT_CONFIG_FILE: &str = "tictactoe.toml";

/// Configuration for the terminal shell.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Ring the bell for move, win, and tie tones.
    sound: bool,

    /// Ring the bell in the rhythm of each cue's vibration pattern.
    haptics: bool,

    /// How long a freshly placed mark stays highlighted.
    move_flash_ms: u64,

    /// How long the board flashes after a win or tie.
    game_over_flash_ms: u64,

    /// How long the board stays dimmed after a reset.
    reset_fade_ms: u64,

    /// Where tracing output goes (the terminal belongs to the UI).
    log_file: PathBuf,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            sound: false,
            haptics: true,
            move_flash_ms: 150,
            game_over_flash_ms: 500,
            reset_fade_ms: 200,
            log_file: PathBuf::from("tictactoe_tui.log"),
        }
    }
}

/// Values supplied on the command line; `None` keeps the file's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Replaces `sound`.
    pub sound: Option<bool>,
    /// Replaces `haptics`.
    pub haptics: Option<bool>,
    /// Replaces `log_file`.
    pub log_file: Option<PathBuf>,
}

/// Animation lengths derived from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Highlight after a move.
    pub move_flash: Duration,
    /// Board flash after a win or tie.
    pub game_over_flash: Duration,
    /// Board dim after a reset.
    pub reset_fade: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        ShellConfig::default().timings()
    }
}

impl ShellConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(sound = config.sound, haptics = config.haptics, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else defaults.
    ///
    /// An explicitly named file that cannot be read is an error.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(sound) = overrides.sound {
            self.sound = sound;
        }
        if let Some(haptics) = overrides.haptics {
            self.haptics = haptics;
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = log_file;
        }
        self
    }

    /// Animation lengths as durations.
    pub fn timings(&self) -> Timings {
        Timings {
            move_flash: Duration::from_millis(self.move_flash_ms),
            game_over_flash: Duration::from_millis(self.game_over_flash_ms),
            reset_fade: Duration::from_millis(self.reset_fade_ms),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ShellConfig = toml::from_str("sound = true\nmove_flash_ms = 90\n").unwrap();
        assert!(*config.sound());
        assert!(*config.haptics());
        assert_eq!(config.timings().move_flash, Duration::from_millis(90));
        assert_eq!(config.timings().reset_fade, Duration::from_millis(200));
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let config = ShellConfig::default().with_overrides(Overrides {
            sound: Some(true),
            haptics: None,
            log_file: Some(PathBuf::from("other.log")),
        });
        assert!(*config.sound());
        assert!(*config.haptics());
        assert_eq!(config.log_file(), &PathBuf::from("other.log"));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(toml::from_str::<ShellConfig>("sound = \"loud\"").is_err());
    }
}
