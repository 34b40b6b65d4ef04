//! Commands into the machine and events out to the UI.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{BoardView, QuestionRef, Ranking, TeamId, TeamScore, OPTION_COUNT};
use crate::timer::TimerHandle;

/// Something the UI (or its timer) asks the game to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// A board cell was picked.
    SelectQuestion { category: usize, question: usize },
    /// An answer option was picked by the attempting team.
    SubmitAnswer(usize),
    /// Hand the question to the next team in the steal queue.
    RequestSteal,
    /// A countdown handed out by the timer service ran out.
    TimerExpired(TimerHandle),
}

impl Command {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::SelectQuestion { .. } => "select_question",
            Command::SubmitAnswer(_) => "submit_answer",
            Command::RequestSteal => "request_steal",
            Command::TimerExpired(_) => "timer_expired",
        }
    }
}

/// Result feedback shown after an attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Correct { team: TeamId, team_name: String, points: u32 },
    Incorrect { team: TeamId, team_name: String },
    TimeUp { team: TeamId, team_name: String },
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feedback::Correct { team_name, points, .. } => {
                write!(f, "Correct! {team_name} earns {points} pts")
            }
            Feedback::Incorrect { team_name, .. } => write!(f, "Incorrect, {team_name}!"),
            Feedback::TimeUp { team_name, .. } => write!(f, "Time's up for {team_name}!"),
        }
    }
}

/// Output the UI is expected to render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    /// Redraw the board; answered cells are disabled.
    RenderBoard(BoardView),

    /// Redraw all team scores.
    RenderScoreboard(Vec<TeamScore>),

    /// Whose turn it is.
    TurnIndicator { team: TeamId, name: String },

    /// Show a question to the attempting team and start the countdown.
    ShowQuestion {
        question: QuestionRef,
        text: String,
        options: [String; OPTION_COUNT],
        team: TeamId,
        team_name: String,
        duration: Duration,
        stealing: bool,
    },

    /// Outcome of the last attempt.
    ShowFeedback(Feedback),

    /// Offer the "next team" action for `team`.
    OfferSteal { team: TeamId, team_name: String },

    /// The open question is finished and will not be played again.
    QuestionResolved { question: QuestionRef, correct: bool },

    /// Every question has been played.
    ShowFinalRankings(Vec<Ranking>),

    /// Non-fatal problem the players should know about.
    Warning(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_display() {
        let correct = Feedback::Correct {
            team: TeamId::new(0),
            team_name: "Red".into(),
            points: 300,
        };
        assert_eq!(correct.to_string(), "Correct! Red earns 300 pts");

        let late = Feedback::TimeUp {
            team: TeamId::new(1),
            team_name: "Blue".into(),
        };
        assert_eq!(late.to_string(), "Time's up for Blue!");
    }

    #[test]
    fn test_command_name() {
        assert_eq!(Command::RequestSteal.name(), "request_steal");
        assert_eq!(
            Command::SelectQuestion { category: 0, question: 1 }.name(),
            "select_question"
        );
    }
}
