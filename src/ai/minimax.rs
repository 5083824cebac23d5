//! Depth-limited minimax with alpha-beta pruning.

use super::Strategy;
use super::evaluator::evaluate;
use crate::games::ultimate::{GameState, GameStatus, Move, Player};
use rand::RngCore;
use tracing::{debug, instrument};

/// Plies searched by the hard computer opponent.
pub const SEARCH_DEPTH: u32 = 2;

/// Base score of a won match; the remaining depth is added so that faster
/// wins and slower losses are preferred.
pub const WIN_SCORE: f64 = 100.0;

/// Alpha-beta minimax over [`GameState::legal_moves`].
///
/// Deterministic: root candidates are compared with a strict `>`, so the
/// first move in legal-move order wins ties.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxStrategy {
    depth: u32,
}

impl MinimaxStrategy {
    /// Creates a minimax strategy searching `depth` plies.
    pub fn new(depth: u32) -> Self {
        Self { depth }
    }

    /// Returns the search depth in plies.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Scores `state` for `player`, searching `depth` more plies.
    ///
    /// `maximizing` is true when `player` is the one to move in `state`.
    #[instrument(level = "trace", skip(self, state))]
    pub fn alphabeta(
        &self,
        state: &GameState,
        player: Player,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        let win = WIN_SCORE + f64::from(depth);
        match state.status() {
            GameStatus::XWins => return if player == Player::X { win } else { -win },
            GameStatus::OWins => return if player == Player::O { win } else { -win },
            GameStatus::Tie => return evaluate(state, player),
            GameStatus::Playing if depth == 0 => return evaluate(state, player),
            GameStatus::Playing => {}
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return evaluate(state, player);
        }

        let mover = if maximizing { player } else { player.opponent() };
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for mv in moves {
            let mut child = *state;
            if child.apply_move(mv, mover).is_err() {
                continue;
            }
            let score = self.alphabeta(&child, player, depth - 1, alpha, beta, !maximizing);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::new(SEARCH_DEPTH)
    }
}

impl Strategy for MinimaxStrategy {
    #[instrument(skip(self, state, _rng), fields(depth = self.depth))]
    fn select_move(
        &self,
        state: &GameState,
        player: Player,
        _rng: &mut dyn RngCore,
    ) -> Option<Move> {
        let mut best_move = None;
        let mut best_score = f64::NEG_INFINITY;

        for mv in state.legal_moves() {
            let mut child = *state;
            if child.apply_move(mv, player).is_err() {
                continue;
            }
            let score = self.alphabeta(
                &child,
                player,
                self.depth.saturating_sub(1),
                f64::NEG_INFINITY,
                f64::INFINITY,
                false,
            );
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }

        if let Some(mv) = best_move {
            debug!(%mv, score = best_score, depth = self.depth, "Minimax move chosen");
        }
        best_move
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}
