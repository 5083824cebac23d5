//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{GameState, Player};
use super::Invariant;

/// Invariant: Players alternate turns.
///
/// X moves first, so X has either as many marks as O or exactly one more.
/// While the match is running, the player to move is the one behind.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let x_count = state.mark_count(Player::X);
        let o_count = state.mark_count(Player::O);

        if x_count != o_count && x_count != o_count + 1 {
            return false;
        }

        if state.status().is_terminal() {
            return true;
        }

        let expected_next = if x_count == o_count {
            Player::X
        } else {
            Player::O
        };
        state.current_player() == expected_next
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
