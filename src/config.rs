//! Match configuration loaded from TOML.

use crate::ai::Difficulty;
use crate::controller::GameMode;
use crate::stats::DEFAULT_STATS_PATH;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default path of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "ultimate_tictactoe.toml";

/// Configuration for a match session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Delay before the computer plays, in milliseconds.
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,

    /// Where cumulative statistics are stored.
    #[serde(default = "default_stats_path")]
    stats_path: PathBuf,

    /// Seed for the computer's random choices. Entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Computer opponent; human vs human when absent.
    #[serde(default)]
    opponent: Option<Difficulty>,
}

fn default_think_delay_ms() -> u64 {
    1000
}

fn default_stats_path() -> PathBuf {
    PathBuf::from(DEFAULT_STATS_PATH)
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            think_delay_ms: default_think_delay_ms(),
            stats_path: default_stats_path(),
            seed: None,
            opponent: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(mode = %config.mode(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, else the default file if it exists, else
    /// defaults.
    ///
    /// An explicitly named file must exist and parse.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The think delay as a [`Duration`].
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// The configured game mode.
    pub fn mode(&self) -> GameMode {
        match self.opponent {
            Some(difficulty) => GameMode::HumanVsComputer(difficulty),
            None => GameMode::HumanVsHuman,
        }
    }

    /// Overrides the game mode.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.opponent = match mode {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsComputer(difficulty) => Some(difficulty),
        };
        self
    }

    /// Overrides the think delay.
    pub fn with_think_delay(mut self, delay: Duration) -> Self {
        self.think_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Overrides the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
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
    fn test_defaults_from_empty_toml() {
        let config: GameConfig = toml::from_str("").expect("parses");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.think_delay(), Duration::from_secs(1));
        assert_eq!(config.mode(), GameMode::HumanVsHuman);
    }

    #[test]
    fn test_full_toml() {
        let config: GameConfig = toml::from_str(
            r#"
            think_delay_ms = 250
            stats_path = "stats.json"
            seed = 7
            opponent = "medium"
            "#,
        )
        .expect("parses");
        assert_eq!(*config.think_delay_ms(), 250);
        assert_eq!(config.stats_path(), &PathBuf::from("stats.json"));
        assert_eq!(*config.seed(), Some(7));
        assert_eq!(config.mode(), GameMode::HumanVsComputer(Difficulty::Medium));
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        assert!(toml::from_str::<GameConfig>(r#"opponent = "expert""#).is_err());
    }

    #[test]
    fn test_think_delay_override_saturates() {
        let config = GameConfig::default().with_think_delay(Duration::from_millis(250));
        assert_eq!(*config.think_delay_ms(), 250);

        let config = GameConfig::default().with_think_delay(Duration::MAX);
        assert_eq!(*config.think_delay_ms(), u64::MAX);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = GameConfig::load(Some(Path::new("/nonexistent/ultimate.toml"))).unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }
}
