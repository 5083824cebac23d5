//! First-class action types for ultimate tic-tac-toe.
//!
//! Moves are domain events, not side effects. They carry the four
//! coordinates of a cell and can be validated independently of execution.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: a cell addressed by its sub-board and its position inside it.
///
/// Each coordinate is in `0..=2`. Construct with [`Move::new`], which rejects
/// out-of-range values. Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMove")]
pub struct Move {
    meta_row: u8,
    meta_col: u8,
    sub_row: u8,
    sub_col: u8,
}

/// Unchecked wire form of [`Move`].
#[derive(Deserialize)]
struct RawMove {
    meta_row: usize,
    meta_col: usize,
    sub_row: usize,
    sub_col: usize,
}

impl TryFrom<RawMove> for Move {
    type Error = MoveError;

    fn try_from(raw: RawMove) -> Result<Self, Self::Error> {
        Move::new(raw.meta_row, raw.meta_col, raw.sub_row, raw.sub_col)
    }
}

impl Move {
    /// Creates a move from meta and sub coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] if any coordinate exceeds 2.
    #[instrument]
    pub fn new(
        meta_row: usize,
        meta_col: usize,
        sub_row: usize,
        sub_col: usize,
    ) -> Result<Self, MoveError> {
        for coord in [meta_row, meta_col, sub_row, sub_col] {
            if coord > 2 {
                return Err(MoveError::OutOfBounds(coord));
            }
        }
        Ok(Self::from_indices(meta_row * 3 + meta_col, sub_row * 3 + sub_col))
    }

    /// Builds a move from a board index and a cell index, both in `0..9`.
    pub(crate) fn from_indices(board: usize, cell: usize) -> Self {
        debug_assert!(board < 9 && cell < 9);
        Self {
            meta_row: (board / 3) as u8,
            meta_col: (board % 3) as u8,
            sub_row: (cell / 3) as u8,
            sub_col: (cell % 3) as u8,
        }
    }

    /// Row of the target sub-board on the meta-board.
    pub fn meta_row(&self) -> usize {
        self.meta_row as usize
    }

    /// Column of the target sub-board on the meta-board.
    pub fn meta_col(&self) -> usize {
        self.meta_col as usize
    }

    /// Row of the target cell inside its sub-board.
    pub fn sub_row(&self) -> usize {
        self.sub_row as usize
    }

    /// Column of the target cell inside its sub-board.
    pub fn sub_col(&self) -> usize {
        self.sub_col as usize
    }

    /// Index of the target sub-board (meta_row * 3 + meta_col).
    pub fn board_index(&self) -> usize {
        self.meta_row() * 3 + self.meta_col()
    }

    /// Index of the target cell inside its sub-board (sub_row * 3 + sub_col).
    pub fn cell_index(&self) -> usize {
        self.sub_row() * 3 + self.sub_col()
    }

    /// True if the move targets the centre cell of its sub-board.
    pub fn is_sub_center(&self) -> bool {
        self.sub_row == 1 && self.sub_col == 1
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{},{},{})",
            self.meta_row, self.meta_col, self.sub_row, self.sub_col
        )
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// A coordinate was outside `0..=2`.
    #[display("Coordinate {} is out of bounds (must be 0-2)", _0)]
    OutOfBounds(usize),

    /// The match is already over.
    #[display("Game is already over")]
    GameOver,

    /// The target sub-board is already won or drawn.
    #[display("Sub-board ({}, {}) is closed", meta_row, meta_col)]
    BoardClosed {
        /// Meta row of the closed sub-board.
        meta_row: usize,
        /// Meta column of the closed sub-board.
        meta_col: usize,
    },

    /// The target cell is already occupied.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Move),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
