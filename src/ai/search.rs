//! Difficulty selection and the random source behind the strategies.

use super::{HeuristicStrategy, MinimaxStrategy, RandomStrategy, Strategy};
use crate::games::ultimate::{GameState, Move, Player};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The computer always plays O.
pub const COMPUTER: Player = Player::O;

/// Skill tier of the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random moves.
    Easy,
    /// Priority-ordered one-ply rules.
    Medium,
    /// Depth-2 alpha-beta minimax.
    Hard,
}

/// Picks computer moves for a given [`Difficulty`].
///
/// Owns the random source shared by the random and heuristic strategies;
/// seed it to make matches reproducible.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    rng: ChaCha8Rng,
    strategies: Strategies,
}

/// One strategy per difficulty, kept apart from the RNG so a strategy can be
/// borrowed while the RNG is borrowed mutably.
#[derive(Debug, Clone, Copy, Default)]
struct Strategies {
    random: RandomStrategy,
    heuristic: HeuristicStrategy,
    minimax: MinimaxStrategy,
}

impl Strategies {
    fn get(&self, difficulty: Difficulty) -> &dyn Strategy {
        match difficulty {
            Difficulty::Easy => &self.random,
            Difficulty::Medium => &self.heuristic,
            Difficulty::Hard => &self.minimax,
        }
    }
}

impl SearchEngine {
    /// Creates an engine seeded with `seed`, or from OS entropy when `None`.
    #[instrument]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            rng,
            strategies: Strategies::default(),
        }
    }

    /// Returns the strategy used for `difficulty`.
    pub fn strategy(&self, difficulty: Difficulty) -> &dyn Strategy {
        self.strategies.get(difficulty)
    }

    /// Picks a move for the computer side.
    ///
    /// Returns `None` iff `state` has no legal move. The live state is only
    /// read; strategies explore on copies.
    #[instrument(skip(self, state), fields(status = %state.status()))]
    pub fn select_move(&mut self, state: &GameState, difficulty: Difficulty) -> Option<Move> {
        let strategy = self.strategies.get(difficulty);
        let choice = strategy.select_move(state, COMPUTER, &mut self.rng);
        debug!(strategy = strategy.name(), choice = ?choice, "Computer move selected");
        choice
    }
}
