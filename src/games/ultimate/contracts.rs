//! Contract-based validation for ultimate tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::invariants::{InvariantSet, UltimateInvariants};
use super::{Cell, GameState};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The match must still be running.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`MoveError::GameOver`] once the status is terminal.
    pub fn check(_mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.status().is_terminal() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: The target sub-board must still be open.
pub struct BoardIsOpen;

impl BoardIsOpen {
    /// Fails with [`MoveError::BoardClosed`] for a won or drawn sub-board.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.meta().cells()[mov.board_index()].is_closed() {
            Err(MoveError::BoardClosed {
                meta_row: mov.meta_row(),
                meta_col: mov.meta_col(),
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: The target cell must be empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`MoveError::CellOccupied`] for a taken cell.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.boards()[mov.board_index()].is_empty(mov.cell_index()) {
            Ok(())
        } else {
            Err(MoveError::CellOccupied(*mov))
        }
    }
}

/// Composite precondition: the match is running, the sub-board is open and
/// the cell is empty.
///
/// Any open sub-board may be targeted; the previous move does not restrict
/// where the next one goes.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        GameNotOver::check(mov, state)?;
        BoardIsOpen::check(mov, state)?;
        CellIsEmpty::check(mov, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for moves played by the player to move.
///
/// Preconditions:
/// - Match still running
/// - Sub-board open
/// - Cell empty
///
/// Postconditions:
/// - Exactly one empty cell was filled and nothing else changed
/// - Outcomes, turn order and status satisfy [`UltimateInvariants`]
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(state: &GameState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        if !MonotonicMarks::holds(before, after) {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: marks are not monotonic".to_string(),
            ));
        }
        UltimateInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

/// Transition property: a move fills exactly one empty cell and overwrites
/// nothing.
pub struct MonotonicMarks;

impl MonotonicMarks {
    /// Compares two consecutive states cell by cell.
    #[instrument(skip(before, after))]
    pub fn holds(before: &GameState, after: &GameState) -> bool {
        let mut filled = 0;
        for (old, new) in before
            .boards()
            .iter()
            .flat_map(|b| b.cells().iter())
            .zip(after.boards().iter().flat_map(|b| b.cells().iter()))
        {
            match (old, new) {
                (Cell::Empty, Cell::Occupied(_)) => filled += 1,
                (a, b) if a == b => {}
                _ => {
                    warn!(?old, ?new, "Cell overwritten");
                    return false;
                }
            }
        }
        if filled != 1 {
            warn!(filled, "Expected exactly one new mark");
        }
        filled == 1
    }
}
