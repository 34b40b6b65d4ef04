//! # trivia-board
//!
//! A turn-based team trivia engine. Teams take turns picking point-valued
//! questions from a board of categories; a team that misses or runs out of
//! time opens the question to the other teams, one at a time, in turn order.
//!
//! ## Design Principles
//!
//! 1. **One owner**: all state lives in a [`GameSession`]. No globals.
//!
//! 2. **Commands in, events out**: the UI forwards [`Command`]s and renders
//!    the [`UiEvent`]s it gets back. The engine never draws anything.
//!
//! 3. **Injected time**: countdowns go through a [`TimerService`], so tests
//!    drive the clock by hand with a [`CountdownTimer`].
//!
//! 4. **Never crash**: bad input rows are skipped, unreadable saves fall back
//!    to a fresh game, failed writes become warnings and out-of-order UI
//!    events are ignored.
//!
//! ## Modules
//!
//! - `core`: Teams, questions, board, turn rotation, game data, configuration
//! - `steal`: Steal queue ordering
//! - `timer`: Countdown capability and implementations
//! - `machine`: Question-resolution state machine, commands and UI events
//! - `persistence`: Saved-game format and key-value stores
//! - `loader`: Team and question sources
//! - `session`: The session that wires everything together
//! - `error`: Error types

pub mod core;
pub mod error;
pub mod loader;
pub mod machine;
pub mod persistence;
pub mod session;
pub mod steal;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{
    Board, GameConfig, GameData, GameProgress, Question, QuestionRef, Ranking, Team, TeamId,
    TeamMap, TeamScore, TurnManager,
};

pub use crate::error::{ConfigError, InvalidTransition, LoadError, PersistenceError};

pub use crate::loader::{
    parse_questions, parse_teams, FileSource, GameSource, MalformedRecord, QuestionSet, TextSource,
};

pub use crate::machine::{
    ActiveQuestion, Command, Feedback, MachineContext, QuestionResolutionMachine, QuestionState,
    Transition, UiEvent,
};

pub use crate::persistence::{FileStore, GameSaver, GameStore, MemoryStore, PersistenceGateway, SavedGame};

pub use crate::session::{GameSession, StartKind, Step};

pub use crate::steal::StealQueue;

pub use crate::timer::{format_countdown, CountdownTimer, TimerHandle, TimerService, WallClockTimer};
