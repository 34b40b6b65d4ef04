//! Machine states and the open-question context.

use serde::{Deserialize, Serialize};

use crate::core::{QuestionRef, TeamId};
use crate::steal::StealQueue;

/// Where a question is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionState {
    /// No question open; the board accepts selections.
    #[default]
    Idle,
    /// The team on turn is answering.
    InitialAttempt,
    /// The last attempt failed and another team may try.
    StealAvailable,
    /// A team from the steal queue is answering.
    Stealing,
    /// The question is finished; waiting out the settle delay.
    Resolved { correct: bool },
}

impl QuestionState {
    /// Short name for logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            QuestionState::Idle => "idle",
            QuestionState::InitialAttempt => "initial_attempt",
            QuestionState::StealAvailable => "steal_available",
            QuestionState::Stealing => "stealing",
            QuestionState::Resolved { .. } => "resolved",
        }
    }

    /// Whether a team is currently on the clock.
    #[must_use]
    pub fn is_answering(&self) -> bool {
        matches!(self, QuestionState::InitialAttempt | QuestionState::Stealing)
    }
}

impl std::fmt::Display for QuestionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The question currently open. Exists only between `start` and resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveQuestion {
    pub at: QuestionRef,
    pub points: u32,
    pub correct_answer_index: usize,
    /// Team answering now (or that answered last while a steal is offered).
    pub attempt_team: TeamId,
    pub steal_queue: StealQueue,
}
