//! Game data: teams, scores, the board and progress counters.
//!
//! `GameData` is the persistent part of a session. Everything the machine
//! does to a game that must survive a restart goes through here.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::question::{Board, Question, QuestionRef};
use super::team::{Team, TeamId, TeamMap};
use super::turn::TurnManager;
use crate::error::LoadError;

/// Turn and answered-question counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProgress {
    pub current_player_index: TeamId,
    pub questions_answered_count: usize,
}

/// A team's line on the scoreboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub team: TeamId,
    pub name: String,
    pub score: u32,
}

/// A team's place in the final standings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    /// 1-based place.
    pub position: usize,
    pub team: TeamId,
    pub name: String,
    pub score: u32,
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}: {} pts", self.position, self.name, self.score)
    }
}

/// Teams, board and progress of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameData {
    teams: TeamMap<Team>,
    board: Board,
    turns: TurnManager,
    questions_answered_count: usize,
}

impl GameData {
    /// Start a fresh game: zero scores, first team on turn.
    pub fn new(team_names: Vec<String>, board: Board) -> Result<Self, LoadError> {
        if team_names.is_empty() {
            return Err(LoadError::NoTeams);
        }
        if board.total_questions() == 0 {
            return Err(LoadError::NoQuestions);
        }
        let teams = TeamMap::from_vec(team_names.into_iter().map(Team::new).collect());
        let turns = TurnManager::new(teams.team_count());
        Ok(Self {
            teams,
            board,
            turns,
            questions_answered_count: 0,
        })
    }

    /// Reassemble a game from saved parts.
    ///
    /// Callers are expected to have validated the parts (non-empty teams,
    /// `current` in range).
    pub(crate) fn from_parts(
        teams: TeamMap<Team>,
        board: Board,
        current: TeamId,
        questions_answered_count: usize,
    ) -> Self {
        let turns = TurnManager::starting_at(current, teams.team_count());
        Self {
            teams,
            board,
            turns,
            questions_answered_count,
        }
    }

    // === Teams ===

    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.team_count()
    }

    #[must_use]
    pub fn teams(&self) -> &TeamMap<Team> {
        &self.teams
    }

    #[must_use]
    pub fn team(&self, team: TeamId) -> Option<&Team> {
        self.teams.get(team)
    }

    /// Display name of a team; empty for an unknown ID.
    #[must_use]
    pub fn team_name(&self, team: TeamId) -> &str {
        self.teams.get(team).map_or("", |t| t.name.as_str())
    }

    #[must_use]
    pub fn score(&self, team: TeamId) -> Option<u32> {
        self.teams.get(team).map(|t| t.score)
    }

    /// Add `points` to a team's score. Returns the new score, or `None`
    /// (and changes nothing) for an unknown team.
    pub fn apply_score(&mut self, team: TeamId, points: u32) -> Option<u32> {
        match self.teams.get_mut(team) {
            Some(entry) => {
                entry.score = entry.score.saturating_add(points);
                Some(entry.score)
            }
            None => {
                warn!(%team, points, "score for unknown team ignored");
                None
            }
        }
    }

    /// Scoreboard lines in team order.
    #[must_use]
    pub fn scoreboard(&self) -> Vec<TeamScore> {
        self.teams
            .iter()
            .map(|(team, t)| TeamScore {
                team,
                name: t.name.clone(),
                score: t.score,
            })
            .collect()
    }

    /// Teams by score, highest first. Ties keep team order.
    #[must_use]
    pub fn final_rankings(&self) -> Vec<Ranking> {
        let mut ranked: Vec<(TeamId, &Team)> = self.teams.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.score.cmp(&a.1.score));
        ranked
            .into_iter()
            .enumerate()
            .map(|(i, (team, t))| Ranking {
                position: i + 1,
                team,
                name: t.name.clone(),
                score: t.score,
            })
            .collect()
    }

    // === Board ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn question(&self, at: QuestionRef) -> Option<&Question> {
        self.board.get(at)
    }

    /// Flag a question as answered and count it.
    ///
    /// Returns `false` without touching the counter when the question does
    /// not exist or was already answered.
    pub fn mark_answered(&mut self, at: QuestionRef) -> bool {
        match self.board.get_mut(at) {
            Some(question) if !question.answered => {
                question.answered = true;
                self.questions_answered_count += 1;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.board.total_questions()
    }

    #[must_use]
    pub fn questions_answered_count(&self) -> usize {
        self.questions_answered_count
    }

    /// True once every question on a non-empty board has been resolved.
    #[must_use]
    pub fn is_game_complete(&self) -> bool {
        let total = self.total_questions();
        total > 0 && self.questions_answered_count >= total
    }

    // === Turns ===

    /// The team whose turn it is.
    #[must_use]
    pub fn current_team(&self) -> TeamId {
        self.turns.current()
    }

    /// Pass the turn to the next team.
    pub fn advance_turn(&mut self) -> TeamId {
        self.turns.advance()
    }

    #[must_use]
    pub fn progress(&self) -> GameProgress {
        GameProgress {
            current_player_index: self.turns.current(),
            questions_answered_count: self.questions_answered_count,
        }
    }
}
