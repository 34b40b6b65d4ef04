//! Steal queue: the order in which other teams get to answer.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::TeamId;

/// Teams waiting for a steal attempt, front first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealQueue {
    teams: VecDeque<TeamId>,
}

impl StealQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every team except `current`, clockwise starting right after it.
    ///
    /// Walks `team_count - 1` steps from `current + 1`, skipping `current`
    /// and wrapping around. The result is always relative to the team whose
    /// turn it is, not to whoever is attempting at the moment.
    ///
    /// ```
    /// use trivia_board::core::TeamId;
    /// use trivia_board::steal::StealQueue;
    ///
    /// let queue = StealQueue::build(TeamId::new(2), 4);
    /// assert_eq!(queue.to_vec(), vec![TeamId::new(3), TeamId::new(0), TeamId::new(1)]);
    /// ```
    pub fn build(current: TeamId, team_count: usize) -> Self {
        let mut teams = VecDeque::with_capacity(team_count.saturating_sub(1));
        if team_count == 0 {
            return Self { teams };
        }

        let mut next = current.next(team_count);
        for _ in 0..team_count - 1 {
            if next != current {
                teams.push_back(next);
            }
            next = next.next(team_count);
        }
        Self { teams }
    }

    /// Take the next team in line.
    pub fn pop(&mut self) -> Option<TeamId> {
        self.teams.pop_front()
    }

    /// The team that would steal next.
    #[must_use]
    pub fn peek(&self) -> Option<TeamId> {
        self.teams.front().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Remaining teams, front first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<TeamId> {
        self.teams.iter().copied().collect()
    }
}
