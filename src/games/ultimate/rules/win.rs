//! Win detection shared by sub-boards and the meta-board.

use super::super::{Mark, Player};

/// The eight winning lines of a 3x3 grid: rows, then columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the grid.
///
/// Returns the owner of the first homogeneous line in [`LINES`] order. Slots
/// without an owner (empty cells, open or drawn sub-boards) never complete a
/// line.
pub fn check_winner<M: Mark>(cells: &[M; 9]) -> Option<Player> {
    LINES.iter().find_map(|&[a, b, c]| {
        let owner = cells[a].owner()?;
        (cells[b].owner() == Some(owner) && cells[c].owner() == Some(owner)).then_some(owner)
    })
}
