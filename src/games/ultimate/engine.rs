//! Rules engine: move enumeration and application across both board levels.

use super::action::{Move, MoveError};
use super::contracts::{Contract, LegalMove, MoveContract};
use super::rules::{check_winner, is_full};
use super::types::{Cell, GameState, GameStatus, Player, SubOutcome};
use tracing::{debug, info, instrument};

/// What an accepted move did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The match goes on.
    Continued,
    /// This move ended the match. Reported exactly once per match, on the
    /// move that leaves `Playing`.
    Finished(GameStatus),
}

impl GameState {
    /// Returns every legal move, meta cells major and sub cells minor.
    ///
    /// The order is stable (row-major over boards, then over cells) and the
    /// search strategies rely on it for first-encountered tie-breaks. A
    /// finished match has no legal moves.
    #[instrument(level = "trace", skip_all)]
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status().is_terminal() {
            return Vec::new();
        }
        let mut moves = Vec::with_capacity(81);
        for (board_index, board) in self.boards().iter().enumerate() {
            if board.outcome().is_closed() {
                continue;
            }
            for (cell_index, cell) in board.cells().iter().enumerate() {
                if *cell == Cell::Empty {
                    moves.push(Move::from_indices(board_index, cell_index));
                }
            }
        }
        moves
    }

    /// Returns true if `mv` would be accepted in this state.
    pub fn is_legal(&self, mv: Move) -> bool {
        LegalMove::check(&mv, self).is_ok()
    }

    /// Places `player`'s mark and resolves both board levels.
    ///
    /// This is the raw rule application used by the search strategies on
    /// their private copies: it does not require `player` to be the player to
    /// move, and sets the player to move to `player.opponent()` afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the match is over, the target sub-board is
    /// closed or the target cell is occupied. The state is untouched on error.
    #[instrument(level = "trace", skip(self))]
    pub fn apply_move(&mut self, mv: Move, player: Player) -> Result<Transition, MoveError> {
        LegalMove::check(&mv, self)?;

        let index = mv.board_index();
        let board = self.board_mut(index);
        board.set(mv.cell_index(), Cell::Occupied(player));

        // A closed sub-board never reaches this point again, so its outcome
        // is written once and stays.
        let outcome = if let Some(winner) = check_winner(board.cells()) {
            SubOutcome::Won(winner)
        } else if is_full(board.cells()) {
            SubOutcome::Drawn
        } else {
            SubOutcome::Open
        };
        if outcome.is_closed() {
            board.close(outcome);
            self.meta_mut().set(index, outcome);
        }
        self.set_last_move(mv);

        let status = if let Some(winner) = check_winner(self.meta().cells()) {
            GameStatus::won_by(winner)
        } else if is_full(self.meta().cells()) {
            GameStatus::Tie
        } else {
            GameStatus::Playing
        };

        if status.is_terminal() {
            self.set_status(status);
            Ok(Transition::Finished(status))
        } else {
            self.set_current_player(player.opponent());
            Ok(Transition::Continued)
        }
    }

    /// Plays `mv` for the player to move.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always ([`LegalMove`])
    /// - Postconditions checked in debug builds only
    ///
    /// The move is applied to a copy and committed only once every check has
    /// passed.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the move is illegal or breaks an invariant.
    #[instrument(skip(self), fields(player = %self.current_player()))]
    pub fn play(&mut self, mv: Move) -> Result<Transition, MoveError> {
        MoveContract::pre(self, &mv)?;

        let mut next = *self;
        let transition = next.apply_move(mv, self.current_player())?;

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        *self = next;
        match transition {
            Transition::Continued => {
                debug!(%mv, next = %self.current_player(), "Move accepted");
            }
            Transition::Finished(status) => {
                info!(%mv, %status, "Match finished");
            }
        }
        Ok(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(mr: usize, mc: usize, sr: usize, sc: usize) -> Move {
        Move::new(mr, mc, sr, sc).expect("valid coordinates")
    }

    #[test]
    fn test_initial_legal_moves() {
        let state = GameState::new();
        let moves = state.legal_moves();
        assert_eq!(moves.len(), 81);
        assert_eq!(moves[0], mv(0, 0, 0, 0));
        assert_eq!(moves[1], mv(0, 0, 0, 1));
        assert_eq!(moves[9], mv(0, 1, 0, 0));
        assert_eq!(moves[80], mv(2, 2, 2, 2));
    }

    #[test]
    fn test_apply_flips_player() {
        let mut state = GameState::new();
        let transition = state.apply_move(mv(0, 0, 1, 1), Player::X);
        assert_eq!(transition, Ok(Transition::Continued));
        assert_eq!(state.current_player(), Player::O);
        assert_eq!(state.last_move(), Some(mv(0, 0, 1, 1)));
        assert_eq!(state.legal_moves().len(), 80);
    }

    #[test]
    fn test_occupied_cell_rejected_without_mutation() {
        let mut state = GameState::new();
        state.apply_move(mv(1, 1, 0, 0), Player::X).expect("legal");
        let before = state;
        assert_eq!(
            state.apply_move(mv(1, 1, 0, 0), Player::O),
            Err(MoveError::CellOccupied(mv(1, 1, 0, 0)))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_sub_board_win_closes_board() {
        let mut state = GameState::new();
        for col in 0..3 {
            state.apply_move(mv(0, 2, 0, col), Player::O).expect("legal");
        }
        assert_eq!(state.boards()[2].outcome(), SubOutcome::Won(Player::O));
        assert_eq!(state.meta().get(0, 2), Some(SubOutcome::Won(Player::O)));
        assert_eq!(
            state.apply_move(mv(0, 2, 2, 2), Player::X),
            Err(MoveError::BoardClosed {
                meta_row: 0,
                meta_col: 2
            })
        );
        assert!(state.legal_moves().iter().all(|m| m.board_index() != 2));
    }

    #[test]
    fn test_sub_board_draw_writes_tie_marker() {
        let mut state = GameState::new();
        for (cell, player) in DRAW_SEQUENCE {
            state
                .apply_move(Move::from_indices(4, cell), player)
                .expect("legal");
        }
        assert_eq!(state.boards()[4].outcome(), SubOutcome::Drawn);
        assert_eq!(state.meta().get(1, 1), Some(SubOutcome::Drawn));
        assert_eq!(state.status(), GameStatus::Playing);
    }

    /// X O X / O X X / O X O, in an order that forms no line early.
    const DRAW_SEQUENCE: [(usize, Player); 9] = [
        (0, Player::X),
        (1, Player::O),
        (2, Player::X),
        (3, Player::O),
        (4, Player::X),
        (6, Player::O),
        (5, Player::X),
        (8, Player::O),
        (7, Player::X),
    ];

    #[test]
    fn test_all_boards_drawn_is_tie() {
        let mut state = GameState::new();
        let mut transitions = Vec::new();
        for board in 0..9 {
            for (cell, player) in DRAW_SEQUENCE {
                transitions.push(
                    state
                        .apply_move(Move::from_indices(board, cell), player)
                        .expect("legal"),
                );
            }
            if board == 2 {
                // A meta line of drawn boards belongs to nobody.
                assert_eq!(state.status(), GameStatus::Playing);
            }
        }

        let (last, earlier) = transitions.split_last().expect("moves played");
        assert_eq!(*last, Transition::Finished(GameStatus::Tie));
        assert!(earlier.iter().all(|t| *t == Transition::Continued));
        assert!(state.meta().cells().iter().all(|c| *c == SubOutcome::Drawn));
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn test_play_rejects_after_game_over() {
        let mut state = GameState::new();
        for board in [0, 4, 8] {
            for cell in [0, 1, 2] {
                state
                    .apply_move(Move::from_indices(board, cell), Player::X)
                    .expect("legal");
            }
        }
        assert_eq!(state.status(), GameStatus::XWins);
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.play(mv(1, 0, 0, 0)), Err(MoveError::GameOver));
    }
}
