//! Ultimate tic-tac-toe: nine sub-boards under one meta board.

mod action;
mod engine;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

pub use action::{Move, MoveError};
pub use engine::Transition;
pub use types::{Cell, GameState, GameStatus, Mark, MetaBoard, Player, SubBoard, SubOutcome};
