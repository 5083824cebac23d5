//! Property tests over random playouts.

use proptest::prelude::*;
use strictly_ultimate::games::ultimate::invariants::{InvariantSet, UltimateInvariants};
use strictly_ultimate::{Cell, GameState, Player, SubOutcome, evaluate};

/// Plays `picks` as indices into the legal move list until the match ends
/// or the picks run out, checking every intermediate state.
fn playout(picks: &[usize]) -> Vec<GameState> {
    let mut states = vec![GameState::new()];
    let mut state = GameState::new();
    for pick in picks {
        let moves = state.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[pick % moves.len()];
        state.play(mv).unwrap();
        states.push(state);
    }
    states
}

proptest! {
    #[test]
    fn invariants_hold_along_playouts(picks in prop::collection::vec(any::<usize>(), 0..81)) {
        for state in playout(&picks) {
            prop_assert!(UltimateInvariants::check_all(&state).is_ok());
        }
    }

    #[test]
    fn legal_moves_target_open_empty_cells(picks in prop::collection::vec(any::<usize>(), 0..81)) {
        let states = playout(&picks);
        let state = states[states.len() - 1];
        for mv in state.legal_moves() {
            let board = state.board(mv.board_index()).unwrap();
            prop_assert_eq!(board.outcome(), SubOutcome::Open);
            prop_assert_eq!(board.cells()[mv.cell_index()], Cell::Empty);
        }
    }

    #[test]
    fn marks_alternate(picks in prop::collection::vec(any::<usize>(), 0..81)) {
        for state in playout(&picks) {
            let x = state.mark_count(Player::X);
            let o = state.mark_count(Player::O);
            prop_assert!(x == o || x == o + 1);
        }
    }

    #[test]
    fn evaluation_is_antisymmetric(picks in prop::collection::vec(any::<usize>(), 0..81)) {
        let states = playout(&picks);
        let state = states[states.len() - 1];
        prop_assert_eq!(evaluate(&state, Player::X), -evaluate(&state, Player::O));
    }
}
