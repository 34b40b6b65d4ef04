//! Game configuration.
//!
//! Durations are `Duration` in code and fractional seconds in files:
//!
//! ```toml
//! initial_duration = 45.0
//! steal_duration = 15.0
//! settle_delay = 1.5
//! save_key = "quizGameSaveState"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default key under which the game is persisted.
pub const DEFAULT_SAVE_KEY: &str = "quizGameSaveState";

/// Tunable game parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Time the team on turn has to answer (default: 45 s).
    #[serde(with = "seconds")]
    pub initial_duration: Duration,

    /// Time each stealing team has to answer (default: 15 s).
    #[serde(with = "seconds")]
    pub steal_duration: Duration,

    /// Pause between resolving a question and returning to the board
    /// (default: 1.5 s). Zero returns to the board immediately.
    #[serde(with = "seconds")]
    pub settle_delay: Duration,

    /// Storage key for the saved game.
    pub save_key: String,

    /// Expected number of categories. Only used to warn on load.
    pub expected_categories: usize,

    /// Expected questions per category. Only used to warn on load.
    pub expected_questions_per_category: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_duration: Duration::from_secs(45),
            steal_duration: Duration::from_secs(15),
            settle_delay: Duration::from_millis(1500),
            save_key: DEFAULT_SAVE_KEY.to_string(),
            expected_categories: 5,
            expected_questions_per_category: 6,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    #[must_use]
    pub fn with_initial_duration(mut self, duration: Duration) -> Self {
        self.initial_duration = duration;
        self
    }

    #[must_use]
    pub fn with_steal_duration(mut self, duration: Duration) -> Self {
        self.steal_duration = duration;
        self
    }

    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    #[must_use]
    pub fn with_save_key(mut self, key: impl Into<String>) -> Self {
        self.save_key = key.into();
        self
    }

    /// Set the board shape that loads are checked against.
    #[must_use]
    pub fn with_expected_shape(mut self, categories: usize, per_category: usize) -> Self {
        self.expected_categories = categories;
        self.expected_questions_per_category = per_category;
        self
    }
}

mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
