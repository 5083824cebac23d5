//! Computer opponents.
//!
//! Three interchangeable [`Strategy`] implementations, one per
//! [`Difficulty`], driven by a [`SearchEngine`] that owns the random source.

pub mod evaluator;
mod heuristic;
mod minimax;
mod random;
mod search;

pub use heuristic::HeuristicStrategy;
pub use minimax::{MinimaxStrategy, SEARCH_DEPTH, WIN_SCORE};
pub use random::RandomStrategy;
pub use search::{COMPUTER, Difficulty, SearchEngine};

use crate::games::ultimate::{GameState, Move, Player};
use rand::RngCore;

/// A move-selection policy for the computer side.
pub trait Strategy {
    /// Picks a move for `player`, or `None` when no legal move exists.
    ///
    /// Implementations explore hypothetical moves on copies of `state`.
    fn select_move(&self, state: &GameState, player: Player, rng: &mut dyn RngCore)
    -> Option<Move>;

    /// Returns the strategy's display name.
    fn name(&self) -> &'static str;
}
