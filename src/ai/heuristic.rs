//! One-ply rule-based play.

use super::Strategy;
use crate::games::ultimate::rules::check_winner;
use crate::games::ultimate::{Cell, GameState, Move, Player, SubOutcome};
use rand::RngCore;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Tiers tried in order; the first with any matching move decides.
const TIERS: [Tier; 5] = [
    Tier::WinMatch,
    Tier::BlockMatch,
    Tier::WinBoard,
    Tier::BlockBoard,
    Tier::SubCenter,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    WinMatch,
    BlockMatch,
    WinBoard,
    BlockBoard,
    SubCenter,
}

impl Tier {
    fn matches(self, state: &GameState, mv: Move, player: Player) -> bool {
        match self {
            Tier::WinMatch => completes_match(state, mv, player),
            Tier::BlockMatch => completes_match(state, mv, player.opponent()),
            Tier::WinBoard => completes_board(state, mv, player),
            Tier::BlockBoard => completes_board(state, mv, player.opponent()),
            Tier::SubCenter => mv.is_sub_center(),
        }
    }
}

/// True if `player` marking `mv` would win its sub-board.
fn completes_board(state: &GameState, mv: Move, player: Player) -> bool {
    let mut cells = *state.boards()[mv.board_index()].cells();
    cells[mv.cell_index()] = Cell::Occupied(player);
    check_winner(&cells) == Some(player)
}

/// True if `player` marking `mv` would win its sub-board and with it the match.
fn completes_match(state: &GameState, mv: Move, player: Player) -> bool {
    if !completes_board(state, mv, player) {
        return false;
    }
    let mut meta = *state.meta().cells();
    meta[mv.board_index()] = SubOutcome::Won(player);
    check_winner(&meta) == Some(player)
}

/// Priority-ordered rules: win the match, block the match, win a sub-board,
/// block a sub-board, take a sub-board centre, else anything.
///
/// Ties inside a tier are broken uniformly at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicStrategy;

impl Strategy for HeuristicStrategy {
    #[instrument(skip(self, state, rng))]
    fn select_move(
        &self,
        state: &GameState,
        player: Player,
        rng: &mut dyn RngCore,
    ) -> Option<Move> {
        let moves = state.legal_moves();

        for tier in TIERS {
            let candidates: Vec<Move> = moves
                .iter()
                .copied()
                .filter(|mv| tier.matches(state, *mv, player))
                .collect();
            if let Some(mv) = candidates.choose(rng) {
                debug!(?tier, %mv, candidates = candidates.len(), "Heuristic tier matched");
                return Some(*mv);
            }
        }

        moves.choose(rng).copied()
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn place(state: &mut GameState, board: usize, cell: usize, player: Player) {
        state
            .apply_move(Move::from_indices(board, cell), player)
            .expect("legal");
    }

    #[test]
    fn test_completes_board() {
        let mut state = GameState::new();
        place(&mut state, 5, 0, Player::O);
        place(&mut state, 5, 1, Player::O);
        assert!(completes_board(&state, Move::from_indices(5, 2), Player::O));
        assert!(!completes_board(&state, Move::from_indices(5, 2), Player::X));
        assert!(!completes_board(&state, Move::from_indices(5, 8), Player::O));
    }

    #[test]
    fn test_blocks_sub_board_threat() {
        let mut state = GameState::new();
        place(&mut state, 7, 0, Player::X);
        place(&mut state, 7, 4, Player::X);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mv = HeuristicStrategy
            .select_move(&state, Player::O, &mut rng)
            .expect("moves available");
        assert_eq!(mv, Move::from_indices(7, 8));
    }

    #[test]
    fn test_prefers_own_board_win_over_block() {
        let mut state = GameState::new();
        place(&mut state, 7, 0, Player::X);
        place(&mut state, 7, 4, Player::X);
        place(&mut state, 3, 3, Player::O);
        place(&mut state, 3, 5, Player::O);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mv = HeuristicStrategy
            .select_move(&state, Player::O, &mut rng)
            .expect("moves available");
        assert_eq!(mv, Move::from_indices(3, 4));
    }

    #[test]
    fn test_blocks_match_threat_before_winning_board() {
        let mut state = GameState::new();
        // X owns boards 0 and 1 and threatens board 2.
        for board in [0, 1] {
            for cell in [0, 1, 2] {
                place(&mut state, board, cell, Player::X);
            }
        }
        place(&mut state, 2, 6, Player::X);
        place(&mut state, 2, 7, Player::X);
        // O can win board 4, which does not win the match.
        place(&mut state, 4, 0, Player::O);
        place(&mut state, 4, 1, Player::O);

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mv = HeuristicStrategy
            .select_move(&state, Player::O, &mut rng)
            .expect("moves available");
        assert_eq!(mv, Move::from_indices(2, 8));
    }

    #[test]
    fn test_takes_a_center_on_quiet_board() {
        let state = GameState::new();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..10 {
            let mv = HeuristicStrategy
                .select_move(&state, Player::O, &mut rng)
                .expect("moves available");
            assert!(mv.is_sub_center());
        }
    }
}
