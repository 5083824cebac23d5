//! Command-line interface for strictly_ultimate.

use clap::{Parser, Subcommand, ValueEnum};
use strictly_ultimate::{Difficulty, GameMode};

/// Strictly Ultimate - ultimate tic-tac-toe with computer opponents
#[derive(Parser, Debug)]
#[command(name = "strictly_ultimate")]
#[command(about = "Ultimate tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match, reading moves from stdin
    Play {
        /// Opponent; overrides the config file
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show cumulative statistics
    Stats,

    /// Reset cumulative statistics to zero
    ClearStats,
}

/// Game mode as typed on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Two humans at one terminal
    Human,
    /// Computer plays random moves
    Easy,
    /// Computer plays by priority rules
    Medium,
    /// Computer searches with minimax
    Hard,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Human => GameMode::HumanVsHuman,
            ModeArg::Easy => GameMode::HumanVsComputer(Difficulty::Easy),
            ModeArg::Medium => GameMode::HumanVsComputer(Difficulty::Medium),
            ModeArg::Hard => GameMode::HumanVsComputer(Difficulty::Hard),
        }
    }
}
