//! Team identification and per-team data storage.
//!
//! ## TeamId
//!
//! Stable 0-based index into the ordered team list. Teams are never removed
//! during a game, so an index stays valid for the whole session.
//!
//! ## TeamMap
//!
//! Per-team data backed by a `Vec` for O(1) access by `TeamId`.

use serde::{Deserialize, Serialize};

/// Team identifier: position in the ordered team list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub usize);

impl TeamId {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw team index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// The team that follows this one in turn order.
    ///
    /// ```
    /// use trivia_board::core::TeamId;
    ///
    /// assert_eq!(TeamId::new(1).next(4), TeamId::new(2));
    /// assert_eq!(TeamId::new(3).next(4), TeamId::new(0));
    /// ```
    #[must_use]
    pub const fn next(self, team_count: usize) -> Self {
        Self((self.0 + 1) % team_count)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// A named team and its running score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub score: u32,
}

impl Team {
    /// Create a team with a zero score.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }
}

/// Per-team data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use trivia_board::core::{TeamId, TeamMap};
///
/// let mut scores = TeamMap::from_vec(vec![0u32, 0, 0]);
/// if let Some(score) = scores.get_mut(TeamId::new(1)) {
///     *score += 200;
/// }
/// assert_eq!(scores.get(TeamId::new(1)), Some(&200));
/// assert_eq!(scores.get(TeamId::new(3)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamMap<T> {
    data: Vec<T>,
}

impl<T> TeamMap<T> {
    /// Wrap an existing vector, one entry per team in order.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of teams.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.data.len()
    }

    /// Get a team's entry, or `None` for an out-of-range ID.
    #[must_use]
    pub fn get(&self, team: TeamId) -> Option<&T> {
        self.data.get(team.index())
    }

    /// Get a mutable reference to a team's entry.
    pub fn get_mut(&mut self, team: TeamId) -> Option<&mut T> {
        self.data.get_mut(team.index())
    }

    /// Iterate over (TeamId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (TeamId, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (TeamId(i), v))
    }

    /// Iterate over the values in team order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}
