//! Static position scoring used by the minimax strategy.
//!
//! Scores count open lines: a line a player can still complete is worth
//! more the more of it they already hold, and the meta-board is weighted ten
//! times a sub-board. The centre sub-board and the corners get a bonus.

use crate::games::ultimate::{GameState, Mark, Player, rules::LINES};
use tracing::instrument;

/// Weight of meta-board lines relative to sub-board lines.
pub const META_WEIGHT: f64 = 10.0;

/// Weight of a sub-board by index (meta_row * 3 + meta_col).
pub fn board_weight(index: usize) -> f64 {
    match index {
        4 => 1.5,
        0 | 2 | 6 | 8 => 1.3,
        _ => 1.0,
    }
}

/// Scores one line of three slots from `player`'s perspective.
pub fn score_line<M: Mark>(line: [M; 3], player: Player) -> f64 {
    let mine = line.iter().filter(|m| m.owner() == Some(player)).count();
    let theirs = line
        .iter()
        .filter(|m| m.owner() == Some(player.opponent()))
        .count();
    let empty = line.iter().filter(|m| m.is_open()).count();

    match (mine, theirs, empty) {
        (3, _, _) => 50.0,
        (2, _, 1) => 10.0,
        (1, _, 2) => 1.0,
        (_, 3, _) => -50.0,
        (_, 2, 1) => -10.0,
        (_, 1, 2) => -1.0,
        _ => 0.0,
    }
}

/// Sums [`score_line`] over the eight lines of a grid.
pub fn score_grid<M: Mark>(cells: &[M; 9], player: Player) -> f64 {
    LINES
        .iter()
        .map(|&[a, b, c]| score_line([cells[a], cells[b], cells[c]], player))
        .sum()
}

/// Scores the whole position from `player`'s perspective.
///
/// Antisymmetric: `evaluate(s, X) == -evaluate(s, O)` for every state.
#[instrument(level = "trace", skip(state))]
pub fn evaluate(state: &GameState, player: Player) -> f64 {
    let meta = META_WEIGHT * score_grid(state.meta().cells(), player);
    let boards: f64 = state
        .boards()
        .iter()
        .enumerate()
        .map(|(index, board)| score_grid(board.cells(), player) * board_weight(index))
        .sum();
    meta + boards
}
