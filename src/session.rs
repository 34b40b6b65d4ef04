//! A game session: the single owner of all game state.
//!
//! The UI adapter talks to a [`GameSession`] only: it forwards
//! [`Command`]s through [`handle`](GameSession::handle) and renders the
//! [`UiEvent`]s that come back.

use std::time::Duration;

use tracing::{info, warn};

use crate::core::{GameConfig, GameData};
use crate::error::LoadError;
use crate::loader::GameSource;
use crate::machine::{
    Command, MachineContext, QuestionResolutionMachine, QuestionState, Transition, UiEvent,
};
use crate::persistence::{GameStore, PersistenceGateway};
use crate::timer::{CountdownTimer, TimerService, WallClockTimer};

/// What one command did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub transition: Transition,
    pub events: Vec<UiEvent>,
}

/// How the session came to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartKind {
    /// Built from the team and question sources.
    Fresh,
    /// Restored from the saved game.
    Resumed,
}

/// Owns the game data, the machine and their collaborators.
pub struct GameSession<T, S> {
    config: GameConfig,
    data: GameData,
    machine: QuestionResolutionMachine,
    timer: T,
    persistence: PersistenceGateway<S>,
}

impl<T: TimerService, S: GameStore> GameSession<T, S> {
    /// Wrap already-loaded game data.
    pub fn new(config: GameConfig, data: GameData, timer: T, store: S) -> Self {
        let machine = QuestionResolutionMachine::new(&config);
        let persistence = PersistenceGateway::new(store, config.save_key.clone());
        Self {
            config,
            data,
            machine,
            timer,
            persistence,
        }
    }

    /// Start a game, resuming the saved one if there is one and
    /// `confirm_resume` agrees.
    ///
    /// - A saved game that cannot be read is removed and replaced by a fresh
    ///   game, with a warning event.
    /// - Declining to resume removes the saved game.
    /// - A fresh game with no teams or no questions fails with `LoadError`.
    ///
    /// The returned events draw the initial screen.
    pub fn bootstrap(
        config: GameConfig,
        timer: T,
        store: S,
        source: &impl GameSource,
        confirm_resume: impl FnOnce() -> bool,
    ) -> Result<(Self, StartKind, Vec<UiEvent>), LoadError> {
        let mut persistence = PersistenceGateway::new(store, config.save_key.clone());
        let mut events = Vec::new();
        let mut resumed = None;

        if persistence.has_saved_game() {
            if confirm_resume() {
                match persistence.load() {
                    Ok(data) => resumed = data,
                    Err(e) => {
                        warn!(error = %e, "saved game unusable, starting fresh");
                        events.push(UiEvent::Warning(format!(
                            "The saved game could not be loaded ({e}). Starting a new game."
                        )));
                        discard(&mut persistence);
                    }
                }
            } else {
                info!("resume declined");
                discard(&mut persistence);
            }
        }

        let (data, kind) = match resumed {
            Some(data) => (data, StartKind::Resumed),
            None => {
                let teams = source.teams()?;
                let questions = source.questions()?;
                questions.check_shape(
                    config.expected_categories,
                    config.expected_questions_per_category,
                );
                (GameData::new(teams, questions.board)?, StartKind::Fresh)
            }
        };
        info!(
            ?kind,
            teams = data.team_count(),
            questions = data.total_questions(),
            turn = data.team_name(data.current_team()),
            "game ready"
        );

        let machine = QuestionResolutionMachine::new(&config);
        let session = Self {
            config,
            data,
            machine,
            timer,
            persistence,
        };
        events.extend(session.overview());
        Ok((session, kind, events))
    }

    /// Feed one command to the machine.
    pub fn handle(&mut self, command: Command) -> Step {
        let mut events = Vec::new();
        let mut ctx = MachineContext {
            data: &mut self.data,
            timer: &mut self.timer,
            saver: &mut self.persistence,
            events: &mut events,
        };
        let transition = self.machine.handle(&mut ctx, command);
        Step { transition, events }
    }

    /// Events that redraw the whole screen from current state.
    #[must_use]
    pub fn overview(&self) -> Vec<UiEvent> {
        let current = self.data.current_team();
        let mut events = vec![
            UiEvent::RenderScoreboard(self.data.scoreboard()),
            UiEvent::RenderBoard(self.data.board().view()),
            UiEvent::TurnIndicator {
                team: current,
                name: self.data.team_name(current).to_string(),
            },
        ];
        if self.data.is_game_complete() {
            events.push(UiEvent::ShowFinalRankings(self.data.final_rankings()));
        }
        events
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &GameData {
        &self.data
    }

    #[must_use]
    pub fn machine(&self) -> &QuestionResolutionMachine {
        &self.machine
    }

    #[must_use]
    pub fn state(&self) -> QuestionState {
        self.machine.state()
    }

    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Time left on the countdown the machine is waiting on.
    #[must_use]
    pub fn time_remaining(&self) -> Option<Duration> {
        self.machine
            .pending_timer()
            .and_then(|handle| self.timer.remaining(handle))
    }

    #[must_use]
    pub fn persistence(&self) -> &PersistenceGateway<S> {
        &self.persistence
    }
}

impl<S: GameStore> GameSession<CountdownTimer, S> {
    /// Move the manual clock forward and deliver an expiry if one happens.
    pub fn advance_clock(&mut self, elapsed: Duration) -> Option<Step> {
        let handle = self.timer.advance(elapsed)?;
        Some(self.handle(Command::TimerExpired(handle)))
    }
}

impl<S: GameStore> GameSession<WallClockTimer, S> {
    /// Deliver the pending expiry if its deadline has passed.
    pub fn poll_timer(&mut self) -> Option<Step> {
        let handle = self.timer.poll()?;
        Some(self.handle(Command::TimerExpired(handle)))
    }
}

fn discard<S: GameStore>(persistence: &mut PersistenceGateway<S>) {
    if let Err(e) = persistence.clear() {
        warn!(error = %e, "failed to remove saved game");
    }
}
