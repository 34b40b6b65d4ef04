//! Core game types: teams, questions, board, turn rotation, game data and
//! configuration.
//!
//! Nothing in here knows about timers, storage or the UI. The machine and
//! session layers build on these types.

pub mod team;
pub mod question;
pub mod turn;
pub mod config;
pub mod state;

pub use team::{Team, TeamId, TeamMap};
pub use question::{Board, BoardView, CategoryColumn, CellView, Question, QuestionRef, OPTION_COUNT};
pub use turn::TurnManager;
pub use config::{GameConfig, DEFAULT_SAVE_KEY};
pub use state::{GameData, GameProgress, Ranking, TeamScore};
