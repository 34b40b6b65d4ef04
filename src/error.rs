//! Error types.
//!
//! Each boundary has its own enum. Only `LoadError` and `ConfigError` ever
//! stop a game from starting; persistence failures degrade to warnings and
//! out-of-state commands are ignored.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::question::QuestionRef;

/// Team or question sources could not produce a playable game.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No teams found in the team source")]
    NoTeams,

    #[error("No valid questions found in the question source")]
    NoQuestions,
}

/// Saving or restoring the game failed.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to write saved game: {0}")]
    Write(String),

    #[error("Failed to read saved game: {0}")]
    Read(String),

    #[error("Saved game is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Saved game is inconsistent: {0}")]
    Corrupt(String),
}

impl PersistenceError {
    /// Whether this error came from reading a saved game (as opposed to
    /// writing one).
    pub fn is_read_error(&self) -> bool {
        !matches!(self, PersistenceError::Write(_))
    }
}

/// The configuration file could not be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A command arrived in a state that cannot accept it.
///
/// Never surfaced as a failure: the machine logs it and ignores the command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTransition {
    #[error("{command} is not accepted while {state}")]
    WrongState {
        command: &'static str,
        state: &'static str,
    },

    #[error("Question {0} does not exist")]
    UnknownQuestion(QuestionRef),

    #[error("Question {0} was already answered")]
    AlreadyAnswered(QuestionRef),

    #[error("No team left to steal")]
    StealQueueEmpty,

    #[error("Timer {0} is not pending")]
    StaleTimer(u64),
}
