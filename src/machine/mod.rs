//! Question resolution.
//!
//! [`QuestionResolutionMachine`] owns the lifecycle of the open question:
//! the initial timed attempt, steal rounds, scoring and the hand-off back
//! to the board. It holds no game data itself; every operation borrows the
//! collaborators it needs through a [`MachineContext`].
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use trivia_board::core::{Board, GameConfig, GameData, Question, TeamId};
//! use trivia_board::machine::{Command, MachineContext, QuestionResolutionMachine, QuestionState};
//! use trivia_board::persistence::{MemoryStore, PersistenceGateway};
//! use trivia_board::timer::CountdownTimer;
//!
//! let question = Question::new(
//!     "Geography", 200, "Largest ocean?",
//!     ["Atlantic".into(), "Pacific".into(), "Indian".into(), "Arctic".into()],
//!     1,
//! );
//! let mut data = GameData::new(
//!     vec!["Red".into(), "Blue".into()],
//!     Board::new(vec![vec![question]]),
//! ).unwrap();
//! let config = GameConfig::default().with_settle_delay(Duration::ZERO);
//! let mut machine = QuestionResolutionMachine::new(&config);
//! let mut timer = CountdownTimer::new();
//! let mut saver = PersistenceGateway::new(MemoryStore::new(), "save");
//! let mut events = Vec::new();
//!
//! let mut ctx = MachineContext {
//!     data: &mut data,
//!     timer: &mut timer,
//!     saver: &mut saver,
//!     events: &mut events,
//! };
//! machine.handle(&mut ctx, Command::SelectQuestion { category: 0, question: 0 });
//! machine.handle(&mut ctx, Command::SubmitAnswer(1));
//!
//! assert_eq!(machine.state(), QuestionState::Idle);
//! assert_eq!(data.score(TeamId::new(0)), Some(200));
//! assert!(data.is_game_complete());
//! ```

mod event;
mod resolution;
mod state;

pub use event::{Command, Feedback, UiEvent};
pub use resolution::QuestionResolutionMachine;
pub use state::{ActiveQuestion, QuestionState};

use crate::core::GameData;
use crate::error::InvalidTransition;
use crate::persistence::GameSaver;
use crate::timer::TimerService;

/// Collaborators borrowed for the duration of one command.
pub struct MachineContext<'a> {
    pub data: &'a mut GameData,
    pub timer: &'a mut dyn TimerService,
    pub saver: &'a mut dyn GameSaver,
    /// UI output produced by the command, in order.
    pub events: &'a mut Vec<UiEvent>,
}

/// Outcome of feeding a command to the machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The command was accepted; the machine is now in this state.
    Applied(QuestionState),
    /// The command did not fit the current state and changed nothing.
    Ignored(InvalidTransition),
}

impl Transition {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }
}
