//! Strictly Ultimate library - ultimate tic-tac-toe with checked rules
//!
//! Nine tic-tac-toe boards arranged in a 3x3 grid. Winning a small board
//! claims the matching cell of the meta board; three claimed cells in a row
//! win the match.
//!
//! # Architecture
//!
//! - **Games**: Copyable [`GameState`] with contract-checked moves and
//!   invariants over the two board levels
//! - **AI**: Random, heuristic and minimax opponents behind [`Strategy`]
//! - **Controller**: One match session with turn scheduling and statistics
//! - **Stats**: Cumulative results persisted through a [`StatsStore`]
//!
//! # Example
//!
//! ```
//! use strictly_ultimate::{GameState, GameStatus, Move};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut state = GameState::new();
//! state.play(Move::new(1, 1, 1, 1)?)?;
//! assert_eq!(state.status(), GameStatus::Playing);
//! assert_eq!(state.legal_moves().len(), 80);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod ai;
mod config;
mod controller;
mod stats;

pub mod games;

// Crate-level exports - Game types
pub use games::ultimate::{
    Cell, GameState, GameStatus, Mark, MetaBoard, Move, MoveError, Player, SubBoard, SubOutcome,
    Transition,
};

// Crate-level exports - Computer opponents
pub use ai::evaluator::{board_weight, evaluate};
pub use ai::{
    COMPUTER, Difficulty, HeuristicStrategy, MinimaxStrategy, RandomStrategy, SEARCH_DEPTH,
    SearchEngine, Strategy, WIN_SCORE,
};

// Crate-level exports - Session
pub use controller::{ControllerError, GameController, GameMode, ThinkingStatus};

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, GameConfig};

// Crate-level exports - Statistics
pub use stats::{
    DEFAULT_STATS_PATH, GameStats, JsonStatsStore, MemoryStatsStore, StatsError, StatsStore,
    load_or_default,
};
