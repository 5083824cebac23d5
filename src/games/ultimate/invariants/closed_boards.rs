//! Closed boards invariant: recorded outcomes agree with the cells.

use super::super::rules::{check_winner, is_full};
use super::super::{GameState, SubOutcome};
use super::Invariant;

/// Invariant: every sub-board outcome is what its cells say, and the
/// meta-board mirrors those outcomes.
///
/// A board is `Won(p)` exactly when `p` holds a line in it, `Drawn` when it
/// filled up without one, `Open` otherwise.
pub struct ClosedBoardsInvariant;

impl Invariant<GameState> for ClosedBoardsInvariant {
    fn holds(state: &GameState) -> bool {
        state
            .boards()
            .iter()
            .zip(state.meta().cells())
            .all(|(board, meta_cell)| {
                let derived = match check_winner(board.cells()) {
                    Some(player) => SubOutcome::Won(player),
                    None if is_full(board.cells()) => SubOutcome::Drawn,
                    None => SubOutcome::Open,
                };
                board.outcome() == derived && *meta_cell == derived
            })
    }

    fn description() -> &'static str {
        "Sub-board outcomes match their cells and the meta-board"
    }
}
