//! Saved-game format and the gateway that reads and writes it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::store::GameStore;
use crate::core::{Board, GameData, Question, Team, TeamId, TeamMap, OPTION_COUNT};
use crate::error::PersistenceError;

/// JSON shape of a saved game.
///
/// Missing fields fall back to empty lists and zero so older or partial
/// saves still decode; [`SavedGame::into_game_data`] then decides whether
/// the result is playable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedGame {
    pub teams: Vec<String>,
    pub scores: Vec<u32>,
    pub current_player_index: usize,
    pub questions: Vec<Vec<Question>>,
    pub questions_answered_count: usize,
}

impl SavedGame {
    /// Capture the persistent part of a game.
    pub fn from_game_data(data: &GameData) -> Self {
        Self {
            teams: data.teams().values().map(|t| t.name.clone()).collect(),
            scores: data.teams().values().map(|t| t.score).collect(),
            current_player_index: data.current_team().index(),
            questions: data.board().categories().to_vec(),
            questions_answered_count: data.questions_answered_count(),
        }
    }

    /// Validate and rebuild the game.
    pub fn into_game_data(self) -> Result<GameData, PersistenceError> {
        if self.teams.is_empty() {
            return Err(PersistenceError::Corrupt("no teams".into()));
        }
        if self.scores.len() != self.teams.len() {
            return Err(PersistenceError::Corrupt(format!(
                "{} scores for {} teams",
                self.scores.len(),
                self.teams.len()
            )));
        }
        if self.current_player_index >= self.teams.len() {
            return Err(PersistenceError::Corrupt(format!(
                "current team {} out of range for {} teams",
                self.current_player_index,
                self.teams.len()
            )));
        }
        if let Some(q) = self
            .questions
            .iter()
            .flatten()
            .find(|q| q.correct_answer_index >= OPTION_COUNT)
        {
            return Err(PersistenceError::Corrupt(format!(
                "question {:?} has answer index {}",
                q.text, q.correct_answer_index
            )));
        }

        let board = Board::new(self.questions);
        if board.total_questions() == 0 {
            return Err(PersistenceError::Corrupt("no questions".into()));
        }

        // Answered flags are authoritative over the counter.
        let answered = board.answered_questions();
        if answered != self.questions_answered_count {
            warn!(
                saved = self.questions_answered_count,
                flagged = answered,
                "answered counter disagrees with board, using board"
            );
        }

        let teams = TeamMap::from_vec(
            self.teams
                .into_iter()
                .zip(self.scores)
                .map(|(name, score)| Team { name, score })
                .collect(),
        );
        Ok(GameData::from_parts(
            teams,
            board,
            TeamId::new(self.current_player_index),
            answered,
        ))
    }
}

/// Anything that can persist a game after a question resolves.
pub trait GameSaver {
    fn save_game(&mut self, data: &GameData) -> Result<(), PersistenceError>;
}

/// Reads and writes the saved game under a single key.
#[derive(Debug)]
pub struct PersistenceGateway<S> {
    store: S,
    key: String,
}

impl<S: GameStore> PersistenceGateway<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serialize `data` and write it.
    pub fn save(&mut self, data: &GameData) -> Result<(), PersistenceError> {
        debug!(key = %self.key, "saving game");
        let json = serde_json::to_string(&SavedGame::from_game_data(data))
            .map_err(|e| PersistenceError::Write(e.to_string()))?;
        match self.store.set(&self.key, &json) {
            Ok(()) => {
                info!(
                    key = %self.key,
                    answered = data.questions_answered_count(),
                    "game saved"
                );
                Ok(())
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to save game");
                Err(e)
            }
        }
    }

    /// Whether something is stored under the key. A store that cannot be
    /// read counts as holding a save so the caller gets to see the error
    /// on [`load`](Self::load).
    #[must_use]
    pub fn has_saved_game(&self) -> bool {
        !matches!(self.store.get(&self.key), Ok(None))
    }

    /// Read and rebuild the saved game. `Ok(None)` when nothing is saved.
    pub fn load(&self) -> Result<Option<GameData>, PersistenceError> {
        let Some(json) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "no saved game");
            return Ok(None);
        };
        let saved: SavedGame = serde_json::from_str(&json)?;
        let data = saved.into_game_data()?;
        info!(
            key = %self.key,
            teams = data.team_count(),
            answered = data.questions_answered_count(),
            "saved game loaded"
        );
        Ok(Some(data))
    }

    /// Delete the saved game.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        info!(key = %self.key, "removing saved game");
        self.store.remove(&self.key)
    }
}

impl<S: GameStore> GameSaver for PersistenceGateway<S> {
    fn save_game(&mut self, data: &GameData) -> Result<(), PersistenceError> {
        self.save(data)
    }
}
