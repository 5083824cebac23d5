//! Tests for the computer opponents on positions reached through play.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use strictly_ultimate::{
    Difficulty, GameState, GameStatus, HeuristicStrategy, MinimaxStrategy, Move, Player,
    RandomStrategy, SearchEngine, Strategy, Transition, WIN_SCORE, evaluate,
};

fn at(board: usize, cell: usize) -> Move {
    Move::new(board / 3, board % 3, cell / 3, cell % 3).unwrap()
}

/// O owns boards 0 and 1 and holds cells 0 and 1 of board 2; X owns boards
/// 3 and 4 and has a corner in each of boards 6, 7 and 8. O to move.
fn o_one_move_from_winning() -> GameState {
    let x_moves = [
        at(3, 0),
        at(3, 1),
        at(3, 2),
        at(4, 0),
        at(4, 1),
        at(4, 2),
        at(6, 0),
        at(7, 0),
        at(8, 0),
    ];
    let o_moves = [
        at(0, 0),
        at(0, 1),
        at(0, 2),
        at(1, 0),
        at(1, 1),
        at(1, 2),
        at(2, 0),
        at(2, 1),
    ];

    let mut state = GameState::new();
    for (i, x) in x_moves.iter().enumerate() {
        state.play(*x).unwrap();
        if let Some(o) = o_moves.get(i) {
            state.play(*o).unwrap();
        }
    }
    assert_eq!(state.current_player(), Player::O);
    assert_eq!(state.status(), GameStatus::Playing);
    state
}

#[test]
fn test_minimax_takes_match_win() {
    let state = o_one_move_from_winning();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let mv = MinimaxStrategy::default()
        .select_move(&state, Player::O, &mut rng)
        .unwrap();
    assert_eq!(mv, Move::new(0, 2, 0, 2).unwrap());

    let mut next = state;
    assert_eq!(
        next.play(mv).unwrap(),
        Transition::Finished(GameStatus::OWins)
    );
}

#[test]
fn test_winning_line_scores_above_win_score() {
    let state = o_one_move_from_winning();
    let minimax = MinimaxStrategy::default();
    let mut after = state;
    after.apply_move(at(2, 2), Player::O).unwrap();

    let score = minimax.alphabeta(
        &after,
        Player::O,
        minimax.depth() - 1,
        f64::NEG_INFINITY,
        f64::INFINITY,
        false,
    );
    assert_eq!(score, WIN_SCORE + 1.0);
}

#[test]
fn test_heuristic_takes_match_win() {
    let state = o_one_move_from_winning();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mv = HeuristicStrategy
        .select_move(&state, Player::O, &mut rng)
        .unwrap();
    assert_eq!(mv, at(2, 2));
}

#[test]
fn test_search_does_not_touch_live_state() {
    let state = o_one_move_from_winning();
    let snapshot = state;
    let mut engine = SearchEngine::new(Some(9));
    engine.select_move(&state, Difficulty::Hard).unwrap();
    engine.select_move(&state, Difficulty::Medium).unwrap();
    assert_eq!(state, snapshot);
}

#[test]
fn test_evaluation_is_antisymmetric() {
    let state = o_one_move_from_winning();
    assert_eq!(evaluate(&state, Player::X), -evaluate(&state, Player::O));
    assert_eq!(evaluate(&GameState::new(), Player::X), 0.0);
}

#[test]
fn test_random_stays_legal_through_a_match() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut state = GameState::new();
    while !state.status().is_terminal() {
        let player = state.current_player();
        let mv = RandomStrategy.select_move(&state, player, &mut rng).unwrap();
        assert!(state.is_legal(mv));
        state.play(mv).unwrap();
    }
    assert!(RandomStrategy
        .select_move(&state, Player::X, &mut rng)
        .is_none());
}
