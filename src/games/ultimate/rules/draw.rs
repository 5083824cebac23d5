//! Fullness detection shared by sub-boards and the meta-board.

use super::super::Mark;

/// Checks if no slot of the grid can be played into any more.
///
/// A full grid with no winner is drawn: a sub-board becomes
/// [`SubOutcome::Drawn`](super::super::SubOutcome::Drawn), the meta-board
/// ends the match in a tie.
pub fn is_full<M: Mark>(cells: &[M; 9]) -> bool {
    cells.iter().all(|cell| !cell.is_open())
}
