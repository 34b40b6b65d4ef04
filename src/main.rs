//! Console entrypoint for trivia-board
//!
//! Wires the file-backed sources and store, a wall-clock timer and the
//! terminal together around a [`GameSession`].

mod console;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trivia_board::persistence::FileStore;
use trivia_board::{FileSource, GameConfig, GameSession, StartKind, WallClockTimer};

use console::{play, print_events, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    info!(?config, "configuration loaded");

    // === Dependency Injection ===
    let source = FileSource::new(&cli.teams, &cli.questions);
    let store = FileStore::new(&cli.save_dir);
    let input = spawn_input_reader();

    let fresh = cli.fresh;
    let (mut session, kind, events) =
        GameSession::bootstrap(config, WallClockTimer::new(), store, &source, || {
            !fresh && ask_yes_no("A saved game was found. Resume it? [Y/n] ", &input)
        })
        .context("could not start a game")?;

    println!();
    println!("+============================================================+");
    println!("|                     Trivia Board                           |");
    println!("+============================================================+");
    if kind == StartKind::Resumed {
        println!("Resumed saved game.");
    }
    println!();

    let mut out = io::stdout();
    print_events(&events, &mut out)?;
    play(&mut session, &input, &mut out)?;
    Ok(())
}

fn ask_yes_no(question: &str, input: &Receiver<String>) -> bool {
    print!("{question}");
    let _ = io::stdout().flush();
    match input.recv() {
        Ok(answer) => !answer.trim().to_ascii_lowercase().starts_with('n'),
        Err(_) => false,
    }
}

/// Read stdin on a background thread so the countdown can be polled.
fn spawn_input_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
