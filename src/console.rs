//! Console adapter: argument parsing, the play loop, input parsing and text
//! rendering.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use clap::Parser;
use trivia_board::core::{BoardView, OPTION_COUNT};
use trivia_board::persistence::GameStore;
use trivia_board::timer::format_countdown;
use trivia_board::{Command, GameSession, QuestionState, Transition, UiEvent, WallClockTimer};

/// How often the countdown is checked while waiting for input.
const TICK: Duration = Duration::from_millis(200);

/// CLI arguments for trivia-board
#[derive(Parser, Debug)]
#[command(name = "trivia-board")]
#[command(version, about = "Team trivia with timed attempts and steal rounds")]
#[command(long_about = r#"
Teams take turns picking questions from the board. A team that answers
wrong or runs out of time lets the other teams steal, one at a time.

Commands during play:
  pick <category> <row>   open a question (1-based)
  answer <option>         answer with option 1-4 (or a-d)
  steal                   hand the question to the next team
  board                   redraw the board and scores
  quit                    leave; progress is already saved
"#)]
pub struct Cli {
    /// Team list, one name per line
    #[arg(long, value_name = "PATH", default_value = "teams.txt")]
    pub teams: PathBuf,

    /// Question list, `Category | Points | Question | A | B | C | D | CorrectIndex`
    #[arg(long, value_name = "PATH", default_value = "questions.txt")]
    pub questions: PathBuf,

    /// Directory holding the saved game
    #[arg(long, value_name = "DIR", default_value = ".trivia")]
    pub save_dir: PathBuf,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start a new game without offering to resume
    #[arg(long)]
    pub fresh: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// A parsed line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Play(Command),
    Redraw,
    Quit,
}

/// Parse one line typed at the prompt. Board coordinates and options are 1-based.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("type a command, or `quit`".into());
    };
    let args: Vec<&str> = words.collect();

    match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("pick" | "p", [category, row]) => Ok(Input::Play(Command::SelectQuestion {
            category: one_based(category)?,
            question: one_based(row)?,
        })),
        ("answer" | "a", [option]) => Ok(Input::Play(Command::SubmitAnswer(option_index(option)?))),
        ("steal" | "s", []) => Ok(Input::Play(Command::RequestSteal)),
        ("board" | "b", []) => Ok(Input::Redraw),
        ("quit" | "q" | "exit", []) => Ok(Input::Quit),
        _ => Err(format!("unrecognised command `{}`", line.trim())),
    }
}

fn one_based(word: &str) -> Result<usize, String> {
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("`{word}` is not a position (1, 2, 3...)")),
    }
}

fn option_index(word: &str) -> Result<usize, String> {
    let letter = match word.to_ascii_lowercase().as_str() {
        "a" => Some(0),
        "b" => Some(1),
        "c" => Some(2),
        "d" => Some(3),
        _ => None,
    };
    letter
        .or_else(|| one_based(word).ok())
        .filter(|&i| i < OPTION_COUNT)
        .ok_or_else(|| format!("`{word}` is not an option (1-4 or a-d)"))
}

/// Formats engine events for a terminal.
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format(event: &UiEvent) -> String {
        match event {
            UiEvent::RenderBoard(view) => Self::format_board(view),
            UiEvent::RenderScoreboard(scores) => {
                let line = scores
                    .iter()
                    .map(|s| format!("{}: {}", s.name, s.score))
                    .collect::<Vec<_>>()
                    .join("  |  ");
                format!("Scores  {line}")
            }
            UiEvent::TurnIndicator { name, .. } => format!("Current turn: {name}"),
            UiEvent::ShowQuestion {
                text,
                options,
                team_name,
                duration,
                stealing,
                ..
            } => {
                let mut out = String::new();
                if *stealing {
                    out.push_str(&format!("STEAL for {team_name}!\n"));
                } else {
                    out.push_str(&format!("{team_name}, your question:\n"));
                }
                out.push_str(&format!("  {text}\n"));
                for (i, option) in options.iter().enumerate() {
                    out.push_str(&format!("  {}) {option}\n", i + 1));
                }
                out.push_str(&format!("  Time: {}", format_countdown(*duration)));
                out
            }
            UiEvent::ShowFeedback(feedback) => feedback.to_string(),
            UiEvent::OfferSteal { team_name, .. } => {
                format!("{team_name} may steal. Type `steal` to continue.")
            }
            UiEvent::QuestionResolved { correct, .. } => {
                if *correct {
                    "Question closed.".to_string()
                } else {
                    "Nobody got it. Question closed.".to_string()
                }
            }
            UiEvent::ShowFinalRankings(rankings) => {
                let mut out = String::from("Game over! Final rankings:");
                for ranking in rankings {
                    out.push_str(&format!("\n  {ranking}"));
                }
                out
            }
            UiEvent::Warning(message) => format!("warning: {message}"),
        }
    }

    pub fn format_board(view: &BoardView) -> String {
        const WIDTH: usize = 14;
        let mut out = String::new();
        for (i, column) in view.columns.iter().enumerate() {
            let title: String = column.title.chars().take(WIDTH - 4).collect();
            out.push_str(&format!("{:<WIDTH$}", format!("{}. {title}", i + 1)));
        }
        for row in 0..view.rows() {
            out.push('\n');
            for column in &view.columns {
                let cell = match column.cells.get(row) {
                    Some(c) if c.answered => "--".to_string(),
                    Some(c) => c.points.to_string(),
                    None => String::new(),
                };
                out.push_str(&format!("{cell:<WIDTH$}"));
            }
        }
        out
    }
}

/// Run commands from `input` until the game ends, the player quits or
/// input closes. Timer expiries are delivered between lines.
pub fn play<S: GameStore>(
    session: &mut GameSession<WallClockTimer, S>,
    input: &Receiver<String>,
    out: &mut impl Write,
) -> io::Result<()> {
    if !finished(session) {
        prompt(session, out)?;
    }
    while !finished(session) {
        if let Some(step) = session.poll_timer() {
            writeln!(out)?;
            print_events(&step.events, out)?;
            if finished(session) {
                break;
            }
            prompt(session, out)?;
        }

        let line = match input.recv_timeout(TICK) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Redraw) => print_events(&session.overview(), out)?,
            Ok(Input::Play(command)) => {
                let step = session.handle(command);
                if let Transition::Ignored(reason) = &step.transition {
                    writeln!(out, "({reason})")?;
                }
                print_events(&step.events, out)?;
            }
            Err(message) => writeln!(out, "{message}")?,
        }
        if !finished(session) {
            prompt(session, out)?;
        }
    }
    writeln!(out, "Bye!")
}

fn finished<S: GameStore>(session: &GameSession<WallClockTimer, S>) -> bool {
    session.data().is_game_complete() && session.state() == QuestionState::Idle
}

pub fn print_events(events: &[UiEvent], out: &mut impl Write) -> io::Result<()> {
    for event in events {
        writeln!(out, "{}", ConsoleFormatter::format(event))?;
    }
    Ok(())
}

fn prompt<S: GameStore>(session: &GameSession<WallClockTimer, S>, out: &mut impl Write) -> io::Result<()> {
    let clock = session
        .time_remaining()
        .map(|left| format!("[{}] ", format_countdown(left)))
        .unwrap_or_default();
    write!(out, "{clock}> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use trivia_board::core::{CategoryColumn, CellView, GameConfig, TeamId};
    use trivia_board::loader::TextSource;
    use trivia_board::persistence::MemoryStore;

    fn one_question_game() -> GameSession<WallClockTimer, MemoryStore> {
        let config = GameConfig::default().with_settle_delay(Duration::ZERO);
        let (session, _, _) = GameSession::bootstrap(
            config,
            WallClockTimer::new(),
            MemoryStore::new(),
            &TextSource::new("Solo\n", "Misc | 100 | Q | a | b | c | d | 0\n"),
            || false,
        )
        .unwrap();
        session
    }

    #[test]
    fn test_play_returns_at_once_for_finished_game() {
        let mut session = one_question_game();
        session.handle(Command::SelectQuestion { category: 0, question: 0 });
        session.handle(Command::SubmitAnswer(0));
        assert!(session.data().is_game_complete());

        // The sender stays open: nothing but the finished check can end the loop.
        let (_tx, rx) = mpsc::channel::<String>();
        let mut out = Vec::new();
        play(&mut session, &rx, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Bye!\n");
    }

    #[test]
    fn test_play_runs_commands_until_game_over() {
        let mut session = one_question_game();
        let (tx, rx) = mpsc::channel();
        for line in ["pick 1 1", "answer a"] {
            tx.send(line.to_string()).unwrap();
        }

        let mut out = Vec::new();
        play(&mut session, &rx, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Correct! Solo earns 100 pts"));
        assert!(text.contains("Game over!"));
        assert!(text.ends_with("Bye!\n"));
        assert_eq!(session.data().score(TeamId::new(0)), Some(100));
    }

    #[test]
    fn test_parse_pick_is_one_based() {
        assert_eq!(
            parse_input("pick 2 3"),
            Ok(Input::Play(Command::SelectQuestion { category: 1, question: 2 }))
        );
        assert!(parse_input("pick 0 1").is_err());
        assert!(parse_input("pick 1").is_err());
    }

    #[test]
    fn test_parse_answer_letters_and_numbers() {
        assert_eq!(parse_input("answer b"), Ok(Input::Play(Command::SubmitAnswer(1))));
        assert_eq!(parse_input("a 4"), Ok(Input::Play(Command::SubmitAnswer(3))));
        assert!(parse_input("answer 5").is_err());
    }

    #[test]
    fn test_parse_simple_verbs() {
        assert_eq!(parse_input("STEAL"), Ok(Input::Play(Command::RequestSteal)));
        assert_eq!(parse_input("  quit "), Ok(Input::Quit));
        assert_eq!(parse_input("board"), Ok(Input::Redraw));
        assert!(parse_input("").is_err());
        assert!(parse_input("dance").is_err());
    }

    #[test]
    fn test_board_marks_answered_cells() {
        let view = BoardView {
            columns: vec![CategoryColumn {
                title: "Science".into(),
                cells: vec![
                    CellView { points: 100, answered: true },
                    CellView { points: 200, answered: false },
                ],
            }],
        };
        let text = ConsoleFormatter::format_board(&view);
        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        assert_eq!(lines, vec!["1. Science", "--", "200"]);
    }
}
