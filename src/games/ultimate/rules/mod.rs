//! Game rules for ultimate tic-tac-toe.
//!
//! Pure functions over a 3x3 grid of [`Mark`](super::Mark)s. The same scans
//! decide a sub-board and the meta-board, so the two granularities can never
//! disagree about what a line is.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};
