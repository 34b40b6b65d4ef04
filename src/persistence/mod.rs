//! Saving and resuming games.
//!
//! The whole game is stored as one JSON document under a single key:
//!
//! ```json
//! {
//!   "teams": ["Red", "Blue"],
//!   "scores": [200, 0],
//!   "currentPlayerIndex": 1,
//!   "questions": [[{ "category": "Geo", "points": 200, "text": "...",
//!                    "options": ["a", "b", "c", "d"],
//!                    "correctAnswerIndex": 1, "answered": true }]],
//!   "questionsAnsweredCount": 1
//! }
//! ```
//!
//! [`GameStore`] abstracts the key-value backend; [`PersistenceGateway`]
//! owns the format.

mod gateway;
mod store;

pub use gateway::{GameSaver, PersistenceGateway, SavedGame};
pub use store::{FileStore, GameStore, MemoryStore};
