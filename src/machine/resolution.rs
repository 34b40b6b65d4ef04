//! The question-resolution state machine.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::event::{Command, Feedback, UiEvent};
use super::state::{ActiveQuestion, QuestionState};
use super::{MachineContext, Transition};
use crate::core::{GameConfig, QuestionRef, TeamId};
use crate::error::InvalidTransition;
use crate::steal::StealQueue;
use crate::timer::TimerHandle;

/// Drives one question at a time from selection to resolution.
///
/// ```text
/// Idle ─start─▶ InitialAttempt ─correct──────────────────────▶ Resolved(true)
///                    │ wrong / timeout                              ▲
///                    ▼                                              │ correct
///              StealAvailable ─request_steal─▶ Stealing ────────────┘
///                    ▲                            │ wrong / timeout
///                    └────── queue not empty ─────┤
///                                                 └ queue empty ─▶ Resolved(false)
/// Resolved ─settle delay─▶ Idle
/// ```
///
/// Every operation checks the current state first. A command that does not
/// fit is logged and returns [`Transition::Ignored`] without touching
/// anything, so duplicate clicks and late timer expiries are harmless.
#[derive(Clone, Debug)]
pub struct QuestionResolutionMachine {
    state: QuestionState,
    active: Option<ActiveQuestion>,
    timer: Option<TimerHandle>,
    initial_duration: Duration,
    steal_duration: Duration,
    settle_delay: Duration,
}

impl QuestionResolutionMachine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: QuestionState::Idle,
            active: None,
            timer: None,
            initial_duration: config.initial_duration,
            steal_duration: config.steal_duration,
            settle_delay: config.settle_delay,
        }
    }

    #[must_use]
    pub fn state(&self) -> QuestionState {
        self.state
    }

    /// The open question, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ActiveQuestion> {
        self.active.as_ref()
    }

    /// Team currently answering, or the last one to try while a steal is on offer.
    #[must_use]
    pub fn attempt_team(&self) -> Option<TeamId> {
        self.active.as_ref().map(|a| a.attempt_team)
    }

    /// Handle of the countdown the machine is waiting on.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Dispatch a UI command.
    pub fn handle(&mut self, ctx: &mut MachineContext<'_>, command: Command) -> Transition {
        let result = match command {
            Command::SelectQuestion { category, question } => {
                self.start(ctx, QuestionRef::new(category, question))
            }
            Command::SubmitAnswer(option) => self.submit_answer(ctx, option),
            Command::RequestSteal => self.request_steal(ctx),
            Command::TimerExpired(handle) => self.on_timer_expired(ctx, handle),
        };
        if let Transition::Ignored(reason) = &result {
            debug!(command = command.name(), state = %self.state, %reason, "command ignored");
        }
        result
    }

    /// Open a question for the team on turn.
    pub fn start(&mut self, ctx: &mut MachineContext<'_>, at: QuestionRef) -> Transition {
        if self.state != QuestionState::Idle {
            return self.wrong_state("start");
        }
        let Some(question) = ctx.data.question(at) else {
            return Transition::Ignored(InvalidTransition::UnknownQuestion(at));
        };
        if question.answered {
            return Transition::Ignored(InvalidTransition::AlreadyAnswered(at));
        }

        let team = ctx.data.current_team();
        let event = UiEvent::ShowQuestion {
            question: at,
            text: question.text.clone(),
            options: question.options.clone(),
            team,
            team_name: ctx.data.team_name(team).to_string(),
            duration: self.initial_duration,
            stealing: false,
        };
        self.active = Some(ActiveQuestion {
            at,
            points: question.points,
            correct_answer_index: question.correct_answer_index,
            attempt_team: team,
            steal_queue: StealQueue::new(),
        });
        info!(%at, points = question.points, %team, "question opened");

        self.state = QuestionState::InitialAttempt;
        self.timer = Some(ctx.timer.schedule(self.initial_duration));
        ctx.events.push(event);
        Transition::Applied(self.state)
    }

    /// The attempting team picked `option`.
    pub fn submit_answer(&mut self, ctx: &mut MachineContext<'_>, option: usize) -> Transition {
        if !self.state.is_answering() {
            return self.wrong_state("submit_answer");
        }
        let Some(active) = self.active.as_ref() else {
            return self.wrong_state("submit_answer");
        };
        let team = active.attempt_team;
        let points = active.points;
        let correct = option == active.correct_answer_index;
        self.stop_timer(ctx);

        info!(%team, option, correct, state = %self.state, "answer submitted");
        let team_name = ctx.data.team_name(team).to_string();

        if correct {
            ctx.data.apply_score(team, points);
            ctx.events.push(UiEvent::ShowFeedback(Feedback::Correct {
                team,
                team_name,
                points,
            }));
            ctx.events.push(UiEvent::RenderScoreboard(ctx.data.scoreboard()));
            return self.resolve(ctx, true);
        }

        ctx.events
            .push(UiEvent::ShowFeedback(Feedback::Incorrect { team, team_name }));
        if self.state == QuestionState::InitialAttempt {
            self.open_steals(ctx)
        } else {
            self.pass_steal(ctx)
        }
    }

    /// The team on turn ran out of time.
    pub fn on_initial_timeout(&mut self, ctx: &mut MachineContext<'_>) -> Transition {
        if self.state != QuestionState::InitialAttempt {
            return self.wrong_state("initial_timeout");
        }
        self.stop_timer(ctx);
        self.push_time_up(ctx);
        self.open_steals(ctx)
    }

    /// Give the question to the next team in the steal queue.
    pub fn request_steal(&mut self, ctx: &mut MachineContext<'_>) -> Transition {
        if self.state != QuestionState::StealAvailable {
            return self.wrong_state("request_steal");
        }
        let Some(active) = self.active.as_mut() else {
            return self.wrong_state("request_steal");
        };
        let Some(question) = ctx.data.question(active.at) else {
            return Transition::Ignored(InvalidTransition::UnknownQuestion(active.at));
        };
        let Some(team) = active.steal_queue.pop() else {
            return Transition::Ignored(InvalidTransition::StealQueueEmpty);
        };
        active.attempt_team = team;

        let event = UiEvent::ShowQuestion {
            question: active.at,
            text: question.text.clone(),
            options: question.options.clone(),
            team,
            team_name: ctx.data.team_name(team).to_string(),
            duration: self.steal_duration,
            stealing: true,
        };
        info!(%team, remaining = active.steal_queue.len(), "steal attempt");

        self.state = QuestionState::Stealing;
        self.timer = Some(ctx.timer.schedule(self.steal_duration));
        ctx.events.push(event);
        Transition::Applied(self.state)
    }

    /// The stealing team ran out of time.
    pub fn on_steal_timeout(&mut self, ctx: &mut MachineContext<'_>) -> Transition {
        if self.state != QuestionState::Stealing {
            return self.wrong_state("steal_timeout");
        }
        self.stop_timer(ctx);
        self.push_time_up(ctx);
        self.pass_steal(ctx)
    }

    /// Route an expired countdown to the transition it belongs to.
    pub fn on_timer_expired(&mut self, ctx: &mut MachineContext<'_>, handle: TimerHandle) -> Transition {
        if self.timer != Some(handle) {
            return Transition::Ignored(InvalidTransition::StaleTimer(handle.raw()));
        }
        match self.state {
            QuestionState::InitialAttempt => self.on_initial_timeout(ctx),
            QuestionState::Stealing => self.on_steal_timeout(ctx),
            QuestionState::Resolved { .. } => self.finish_settle(ctx),
            QuestionState::Idle | QuestionState::StealAvailable => self.wrong_state("timer_expired"),
        }
    }

    /// Leave `Resolved` and hand the board back to the UI.
    pub fn finish_settle(&mut self, ctx: &mut MachineContext<'_>) -> Transition {
        if !matches!(self.state, QuestionState::Resolved { .. }) {
            return self.wrong_state("finish_settle");
        }
        self.stop_timer(ctx);
        self.state = QuestionState::Idle;
        ctx.events.push(UiEvent::RenderBoard(ctx.data.board().view()));
        Transition::Applied(self.state)
    }

    // === Internals ===

    fn open_steals(&mut self, ctx: &mut MachineContext<'_>) -> Transition {
        let Some(active) = self.active.as_mut() else {
            return self.wrong_state("open_steals");
        };
        active.steal_queue = StealQueue::build(ctx.data.current_team(), ctx.data.team_count());
        debug!(queue = ?active.steal_queue.to_vec(), "steal queue built");

        self.offer_next_or_resolve(ctx)
    }

    fn pass_steal(&mut self, ctx: &mut MachineContext<'_>) -> Transition {
        self.offer_next_or_resolve(ctx)
    }

    fn offer_next_or_resolve(&mut self, ctx: &mut MachineContext<'_>) -> Transition {
        let next = self.active.as_ref().and_then(|a| a.steal_queue.peek());
        match next {
            Some(team) => {
                self.state = QuestionState::StealAvailable;
                ctx.events.push(UiEvent::OfferSteal {
                    team,
                    team_name: ctx.data.team_name(team).to_string(),
                });
                Transition::Applied(self.state)
            }
            None => {
                debug!("no team left to steal");
                self.resolve(ctx, false)
            }
        }
    }

    fn resolve(&mut self, ctx: &mut MachineContext<'_>, correct: bool) -> Transition {
        let Some(active) = self.active.take() else {
            return self.wrong_state("resolve");
        };
        self.stop_timer(ctx);
        ctx.data.mark_answered(active.at);
        let next = ctx.data.advance_turn();
        self.state = QuestionState::Resolved { correct };

        info!(
            at = %active.at,
            correct,
            answered = ctx.data.questions_answered_count(),
            next_team = %next,
            "question resolved"
        );
        ctx.events.push(UiEvent::QuestionResolved {
            question: active.at,
            correct,
        });

        if let Err(e) = ctx.saver.save_game(ctx.data) {
            warn!(error = %e, "continuing without a saved copy");
            ctx.events.push(UiEvent::Warning(format!(
                "Progress could not be saved ({e}). The game continues but will not survive a restart."
            )));
        }

        ctx.events.push(UiEvent::TurnIndicator {
            team: next,
            name: ctx.data.team_name(next).to_string(),
        });
        if ctx.data.is_game_complete() {
            info!("all questions answered, game over");
            ctx.events
                .push(UiEvent::ShowFinalRankings(ctx.data.final_rankings()));
        }

        if self.settle_delay.is_zero() {
            return self.finish_settle(ctx);
        }
        self.timer = Some(ctx.timer.schedule(self.settle_delay));
        Transition::Applied(self.state)
    }

    fn push_time_up(&self, ctx: &mut MachineContext<'_>) {
        if let Some(team) = self.attempt_team() {
            info!(%team, state = %self.state, "time up");
            ctx.events.push(UiEvent::ShowFeedback(Feedback::TimeUp {
                team,
                team_name: ctx.data.team_name(team).to_string(),
            }));
        }
    }

    fn stop_timer(&mut self, ctx: &mut MachineContext<'_>) {
        if let Some(handle) = self.timer.take() {
            ctx.timer.cancel(handle);
        }
    }

    fn wrong_state(&self, command: &'static str) -> Transition {
        Transition::Ignored(InvalidTransition::WrongState {
            command,
            state: self.state.name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, GameData, Question};
    use crate::error::PersistenceError;
    use crate::persistence::GameSaver;
    use crate::timer::{CountdownTimer, TimerService};

    #[derive(Default)]
    struct RecordingSaver {
        saves: Vec<usize>,
        fail: bool,
    }

    impl GameSaver for RecordingSaver {
        fn save_game(&mut self, data: &GameData) -> Result<(), PersistenceError> {
            if self.fail {
                return Err(PersistenceError::Write("disk full".into()));
            }
            self.saves.push(data.questions_answered_count());
            Ok(())
        }
    }

    struct Harness {
        machine: QuestionResolutionMachine,
        data: GameData,
        timer: CountdownTimer,
        saver: RecordingSaver,
        events: Vec<UiEvent>,
    }

    impl Harness {
        fn new(teams: usize, config: GameConfig) -> Self {
            let q = |p| {
                Question::new(
                    "Cat",
                    p,
                    "Q?",
                    ["a".into(), "b".into(), "c".into(), "d".into()],
                    1,
                )
            };
            let data = GameData::new(
                (0..teams).map(|i| format!("T{i}")).collect(),
                Board::new(vec![vec![q(100), q(200)]]),
            )
            .unwrap();
            Self {
                machine: QuestionResolutionMachine::new(&config),
                data,
                timer: CountdownTimer::new(),
                saver: RecordingSaver::default(),
                events: Vec::new(),
            }
        }

        fn run(&mut self, command: Command) -> Transition {
            let mut ctx = MachineContext {
                data: &mut self.data,
                timer: &mut self.timer,
                saver: &mut self.saver,
                events: &mut self.events,
            };
            self.machine.handle(&mut ctx, command)
        }

        fn expire(&mut self) -> Transition {
            let handle = self.timer.run_out().expect("a pending timer");
            self.run(Command::TimerExpired(handle))
        }
    }

    fn instant() -> GameConfig {
        GameConfig::default().with_settle_delay(Duration::ZERO)
    }

    const SELECT: Command = Command::SelectQuestion { category: 0, question: 1 };

    #[test]
    fn test_start_schedules_initial_timer() {
        let mut h = Harness::new(3, instant());
        assert!(h.run(SELECT).is_applied());
        assert_eq!(h.machine.state(), QuestionState::InitialAttempt);

        let handle = h.machine.pending_timer().unwrap();
        assert_eq!(h.timer.remaining(handle), Some(Duration::from_secs(45)));
        assert!(matches!(h.events[0], UiEvent::ShowQuestion { stealing: false, .. }));
    }

    #[test]
    fn test_correct_initial_answer() {
        let mut h = Harness::new(3, instant());
        h.run(SELECT);
        h.run(Command::SubmitAnswer(1));

        assert_eq!(h.machine.state(), QuestionState::Idle);
        assert_eq!(h.data.score(TeamId::new(0)), Some(200));
        assert_eq!(h.data.current_team(), TeamId::new(1));
        assert_eq!(h.saver.saves, vec![1]);
        assert!(h.machine.active().is_none());
        assert!(h.timer.pending().is_none());
    }

    #[test]
    fn test_double_start_ignored() {
        let mut h = Harness::new(2, instant());
        h.run(SELECT);
        let again = h.run(Command::SelectQuestion { category: 0, question: 0 });
        assert!(matches!(again, Transition::Ignored(InvalidTransition::WrongState { .. })));
        assert_eq!(h.machine.active().unwrap().at, QuestionRef::new(0, 1));
    }

    #[test]
    fn test_unknown_and_answered_questions_rejected() {
        let mut h = Harness::new(2, instant());
        let missing = h.run(Command::SelectQuestion { category: 4, question: 0 });
        assert!(matches!(missing, Transition::Ignored(InvalidTransition::UnknownQuestion(_))));

        h.run(SELECT);
        h.run(Command::SubmitAnswer(1));
        let replay = h.run(SELECT);
        assert!(matches!(replay, Transition::Ignored(InvalidTransition::AlreadyAnswered(_))));
    }

    #[test]
    fn test_wrong_answer_offers_steal() {
        let mut h = Harness::new(3, instant());
        h.run(SELECT);
        h.run(Command::SubmitAnswer(0));

        assert_eq!(h.machine.state(), QuestionState::StealAvailable);
        assert_eq!(
            h.machine.active().unwrap().steal_queue.to_vec(),
            vec![TeamId::new(1), TeamId::new(2)]
        );
        assert!(h.machine.pending_timer().is_none());
        assert!(h.events.iter().any(|e| matches!(
            e,
            UiEvent::OfferSteal { team, .. } if *team == TeamId::new(1)
        )));
    }

    #[test]
    fn test_initial_timeout_matches_wrong_answer() {
        let mut h = Harness::new(3, instant());
        h.run(SELECT);
        h.expire();

        assert_eq!(h.machine.state(), QuestionState::StealAvailable);
        assert!(h.events.iter().any(|e| matches!(e, UiEvent::ShowFeedback(Feedback::TimeUp { .. }))));
    }

    #[test]
    fn test_steal_uses_short_timer() {
        let mut h = Harness::new(3, instant());
        h.run(SELECT);
        h.run(Command::SubmitAnswer(0));
        h.run(Command::RequestSteal);

        assert_eq!(h.machine.state(), QuestionState::Stealing);
        assert_eq!(h.machine.attempt_team(), Some(TeamId::new(1)));
        let handle = h.machine.pending_timer().unwrap();
        assert_eq!(h.timer.remaining(handle), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_wrong_steal_passes_to_next_team() {
        let mut h = Harness::new(3, instant());
        h.run(SELECT);
        h.run(Command::SubmitAnswer(0));
        h.run(Command::RequestSteal);
        h.run(Command::SubmitAnswer(3));

        assert_eq!(h.machine.state(), QuestionState::StealAvailable);
        assert_eq!(h.machine.active().unwrap().steal_queue.to_vec(), vec![TeamId::new(2)]);
    }

    #[test]
    fn test_exhausted_steals_resolve_incorrect() {
        let mut h = Harness::new(2, instant());
        h.run(SELECT);
        h.run(Command::SubmitAnswer(0));
        h.run(Command::RequestSteal);
        h.expire();

        assert_eq!(h.machine.state(), QuestionState::Idle);
        assert_eq!(h.data.score(TeamId::new(1)), Some(0));
        assert_eq!(h.data.questions_answered_count(), 1);
        assert!(h.events.iter().any(|e| matches!(
            e,
            UiEvent::QuestionResolved { correct: false, .. }
        )));
    }

    #[test]
    fn test_stale_timer_ignored() {
        let mut h = Harness::new(3, instant());
        h.run(SELECT);
        let initial = h.machine.pending_timer().unwrap();
        h.run(Command::SubmitAnswer(0));
        h.run(Command::RequestSteal);

        let late = h.run(Command::TimerExpired(initial));
        assert!(matches!(late, Transition::Ignored(InvalidTransition::StaleTimer(_))));
        assert_eq!(h.machine.state(), QuestionState::Stealing);
    }

    #[test]
    fn test_settle_delay_holds_resolved() {
        let mut h = Harness::new(2, GameConfig::default());
        h.run(SELECT);
        h.run(Command::SubmitAnswer(1));

        assert_eq!(h.machine.state(), QuestionState::Resolved { correct: true });
        assert!(!h.run(Command::SelectQuestion { category: 0, question: 0 }).is_applied());

        let handle = h.machine.pending_timer().unwrap();
        assert_eq!(h.timer.remaining(handle), Some(Duration::from_millis(1500)));
        h.expire();
        assert_eq!(h.machine.state(), QuestionState::Idle);
        assert!(matches!(h.events.last(), Some(UiEvent::RenderBoard(_))));
    }

    #[test]
    fn test_save_failure_becomes_warning() {
        let mut h = Harness::new(2, instant());
        h.saver.fail = true;
        h.run(SELECT);
        h.run(Command::SubmitAnswer(1));

        assert_eq!(h.machine.state(), QuestionState::Idle);
        assert_eq!(h.data.questions_answered_count(), 1);
        assert!(h.events.iter().any(|e| matches!(e, UiEvent::Warning(_))));
    }

    #[test]
    fn test_answers_outside_attempt_ignored() {
        let mut h = Harness::new(2, instant());
        assert!(!h.run(Command::SubmitAnswer(1)).is_applied());
        assert!(!h.run(Command::RequestSteal).is_applied());

        h.run(SELECT);
        h.run(Command::SubmitAnswer(0));
        assert!(!h.run(Command::SubmitAnswer(1)).is_applied());
        assert_eq!(h.data.score(TeamId::new(0)), Some(0));
    }

    #[test]
    fn test_failed_steal_lookup_leaves_queue_untouched() {
        let mut h = Harness::new(3, instant());
        h.run(SELECT);
        h.run(Command::SubmitAnswer(0));

        // Swap in a board that no longer has the open question.
        h.data = GameData::new(
            vec!["T0".into(), "T1".into(), "T2".into()],
            Board::new(vec![vec![Question::new(
                "Cat",
                100,
                "Q?",
                ["a".into(), "b".into(), "c".into(), "d".into()],
                1,
            )]]),
        )
        .unwrap();

        let steal = h.run(Command::RequestSteal);
        assert!(matches!(steal, Transition::Ignored(InvalidTransition::UnknownQuestion(_))));
        assert_eq!(h.machine.state(), QuestionState::StealAvailable);
        assert_eq!(h.machine.attempt_team(), Some(TeamId::new(0)));
        assert_eq!(
            h.machine.active().unwrap().steal_queue.to_vec(),
            vec![TeamId::new(1), TeamId::new(2)]
        );
        assert!(h.machine.pending_timer().is_none());
    }
}
