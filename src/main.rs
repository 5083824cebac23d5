//! Strictly Ultimate - terminal front end.
//!
//! Plays a match over stdin/stdout and manages the statistics file.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{self, BufRead, Write};
use std::time::Instant;
use strictly_ultimate::{
    GameConfig, GameController, GameStats, GameStatus, JsonStatsStore, Move, StatsStore,
    Transition, load_or_default,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GameConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play { mode, seed } => {
            let mut config = config;
            if let Some(mode) = mode {
                config = config.with_mode(mode.into());
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            run_play(&config)
        }
        Command::Stats => show_stats(&config),
        Command::ClearStats => clear_stats(&config),
    }
}

/// One line of player input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Reset,
    Play(Move),
    Invalid(String),
}

/// Parses `q`, `r`, or four coordinates such as `0 0 1 1` or `0011`.
fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed {
        "q" | "quit" => return Input::Quit,
        "r" | "reset" => return Input::Reset,
        _ => {}
    }

    let digits: Vec<usize> = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| c.to_digit(10).map(|d| d as usize))
        .collect::<Option<_>>()
        .unwrap_or_default();

    match digits.as_slice() {
        [mr, mc, sr, sc] => match Move::new(*mr, *mc, *sr, *sc) {
            Ok(mv) => Input::Play(mv),
            Err(e) => Input::Invalid(e.to_string()),
        },
        _ => Input::Invalid(format!(
            "Expected four coordinates 0-2 (meta row, meta col, row, col), got '{}'",
            trimmed
        )),
    }
}

/// Runs an interactive match until stdin closes or the player quits.
#[instrument(skip(config))]
fn run_play(config: &GameConfig) -> Result<()> {
    let store = JsonStatsStore::new(config.stats_path().clone());
    let mut game = GameController::new(config, store);
    if let Some(warning) = game.last_warning() {
        eprintln!("warning: {}", warning);
    }
    info!(mode = %game.mode(), "Starting match");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    println!("{} - type four digits to move, r to reset, q to quit\n", game.mode());
    println!("{}", game.state().display());

    loop {
        if let Some(status) = game.thinking(Instant::now()) {
            println!("Computer is thinking...");
            std::thread::sleep(*status.remaining());
            if let Some(mv) = game.tick(Instant::now())? {
                println!("Computer plays {}\n", mv);
                println!("{}", game.state().display());
                report_outcome(&game);
            }
            continue;
        }

        if game.state().status().is_terminal() {
            print!("Match over. r for a new match, q to quit: ");
        } else {
            print!("{} to move: ", game.state().current_player());
        }
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match parse_input(&line?) {
            Input::Quit => break,
            Input::Reset => {
                game.reset();
                println!("\n{}", game.state().display());
            }
            Input::Play(mv) => match game.play(mv, Instant::now()) {
                Ok(transition) => {
                    println!("\n{}", game.state().display());
                    if matches!(transition, Transition::Finished(_)) {
                        report_outcome(&game);
                    }
                }
                Err(e) => println!("{}", e),
            },
            Input::Invalid(message) => println!("{}", message),
        }
    }

    Ok(())
}

fn report_outcome<S: StatsStore>(game: &GameController<S>) {
    let line = match game.state().status() {
        GameStatus::XWins => "X wins the match!",
        GameStatus::OWins => "O wins the match!",
        GameStatus::Tie => "The match is a tie.",
        GameStatus::Playing => return,
    };
    println!("{}", line);
    print_stats(game.stats());
    if let Some(warning) = game.last_warning() {
        eprintln!("warning: {}", warning);
    }
}

fn print_stats(stats: &GameStats) {
    println!(
        "X wins: {}  O wins: {}  Ties: {}  Total: {}",
        stats.x_wins(),
        stats.o_wins(),
        stats.ties(),
        stats.total_games()
    );
}

#[instrument(skip(config))]
fn show_stats(config: &GameConfig) -> Result<()> {
    let store = JsonStatsStore::new(config.stats_path().clone());
    print_stats(&load_or_default(&store));
    Ok(())
}

#[instrument(skip(config))]
fn clear_stats(config: &GameConfig) -> Result<()> {
    let mut store = JsonStatsStore::new(config.stats_path().clone());
    store
        .save(&GameStats::default())
        .with_context(|| format!("Clearing {}", config.stats_path().display()))?;
    println!("Statistics cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_input(" q "), Input::Quit);
        assert_eq!(parse_input("reset"), Input::Reset);
    }

    #[test]
    fn test_parse_move_forms() {
        let expected = Input::Play(Move::new(0, 2, 1, 1).expect("valid"));
        assert_eq!(parse_input("0 2 1 1"), expected);
        assert_eq!(parse_input("0211"), expected);
        assert_eq!(parse_input("0,2,1,1"), expected);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(parse_input("0 2 1"), Input::Invalid(_)));
        assert!(matches!(parse_input("0 2 1 5"), Input::Invalid(_)));
        assert!(matches!(parse_input("a b c d"), Input::Invalid(_)));
    }
}
