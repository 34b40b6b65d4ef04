//! Turn rotation.
//!
//! The turn passes to the next team exactly once per resolved question.
//! Steal attempts never move the turn.

use serde::{Deserialize, Serialize};

use super::team::TeamId;

/// Tracks whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnManager {
    current: TeamId,
    team_count: usize,
}

impl TurnManager {
    /// Start with the first team.
    ///
    /// `team_count` must be non-zero; a game without teams never starts.
    #[must_use]
    pub fn new(team_count: usize) -> Self {
        Self::starting_at(TeamId::new(0), team_count)
    }

    /// Resume with a specific team on turn.
    #[must_use]
    pub fn starting_at(current: TeamId, team_count: usize) -> Self {
        debug_assert!(team_count > 0, "TurnManager needs at least one team");
        debug_assert!(current.index() < team_count.max(1));
        Self {
            current,
            team_count,
        }
    }

    /// The team whose turn it is.
    #[must_use]
    pub fn current(&self) -> TeamId {
        self.current
    }

    #[must_use]
    pub fn team_count(&self) -> usize {
        self.team_count
    }

    /// Pass the turn to the next team and return it.
    pub fn advance(&mut self) -> TeamId {
        self.current = self.current.next(self.team_count);
        self.current
    }
}
