//! Terminal status invariant: the match status follows the meta-board.

use super::super::rules::{check_winner, is_full};
use super::super::{GameState, GameStatus};
use super::Invariant;

/// Invariant: the status is `XWins`/`OWins` iff that player holds a meta
/// line, `Tie` iff the meta-board is closed without one, else `Playing`.
pub struct TerminalStatusInvariant;

impl Invariant<GameState> for TerminalStatusInvariant {
    fn holds(state: &GameState) -> bool {
        let meta = state.meta().cells();
        let expected = match check_winner(meta) {
            Some(player) => GameStatus::won_by(player),
            None if is_full(meta) => GameStatus::Tie,
            None => GameStatus::Playing,
        };
        state.status() == expected
    }

    fn description() -> &'static str {
        "Match status agrees with the meta-board"
    }
}
