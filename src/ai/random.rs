//! Uniformly random play.

use super::Strategy;
use crate::games::ultimate::{GameState, Move, Player};
use rand::RngCore;
use rand::seq::SliceRandom;
use tracing::instrument;

/// Picks uniformly among the legal moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    #[instrument(skip_all)]
    fn select_move(
        &self,
        state: &GameState,
        _player: Player,
        rng: &mut dyn RngCore,
    ) -> Option<Move> {
        state.legal_moves().choose(rng).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
