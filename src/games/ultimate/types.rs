//! Core domain types for ultimate tic-tac-toe.

use super::action::Move;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second, and is the computer side).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A single cell of a sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

/// Outcome of a sub-board, which is also the content of a meta-board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubOutcome {
    /// Still accepting moves.
    #[default]
    Open,
    /// Closed by a completed line.
    Won(Player),
    /// Closed by filling up without a line. Never counts towards a meta line.
    Drawn,
}

impl SubOutcome {
    /// Returns true once the sub-board no longer accepts moves.
    pub fn is_closed(self) -> bool {
        !matches!(self, SubOutcome::Open)
    }
}

/// Content of one slot of a 3x3 grid, at either granularity.
///
/// The line scan and the evaluator are written once against this trait and
/// run over both sub-board cells and meta-board outcomes.
pub trait Mark: Copy {
    /// The player owning this slot, if any.
    fn owner(self) -> Option<Player>;

    /// True if the slot can still be played into.
    fn is_open(self) -> bool;
}

impl Mark for Cell {
    fn owner(self) -> Option<Player> {
        match self {
            Cell::Occupied(player) => Some(player),
            Cell::Empty => None,
        }
    }

    fn is_open(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl Mark for SubOutcome {
    fn owner(self) -> Option<Player> {
        match self {
            SubOutcome::Won(player) => Some(player),
            SubOutcome::Open | SubOutcome::Drawn => None,
        }
    }

    fn is_open(self) -> bool {
        matches!(self, SubOutcome::Open)
    }
}

/// One of the nine local 3x3 boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubBoard {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
    outcome: SubOutcome,
}

impl SubBoard {
    /// Creates an empty, open sub-board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell at the given row and column.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < 3 && col < 3 {
            Some(self.cells[row * 3 + col])
        } else {
            None
        }
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Returns the sub-board outcome.
    pub fn outcome(&self) -> SubOutcome {
        self.outcome
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(Cell::Empty))
    }

    pub(super) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    pub(super) fn close(&mut self, outcome: SubOutcome) {
        self.outcome = outcome;
    }
}

/// The 3x3 grid of sub-board outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetaBoard {
    cells: [SubOutcome; 9],
}

impl MetaBoard {
    /// Creates a meta-board with every cell open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the outcome at the given meta row and column.
    pub fn get(&self, row: usize, col: usize) -> Option<SubOutcome> {
        if row < 3 && col < 3 {
            Some(self.cells[row * 3 + col])
        } else {
            None
        }
    }

    /// Returns all meta cells in row-major order.
    pub fn cells(&self) -> &[SubOutcome; 9] {
        &self.cells
    }

    pub(super) fn set(&mut self, index: usize, outcome: SubOutcome) {
        self.cells[index] = outcome;
    }
}

/// Status of the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
pub enum GameStatus {
    /// Moves are still accepted.
    #[default]
    Playing,
    /// X completed a meta line.
    XWins,
    /// O completed a meta line.
    OWins,
    /// Every meta cell closed without a line.
    Tie,
}

impl GameStatus {
    /// Status for a match won by `player`.
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::X => GameStatus::XWins,
            Player::O => GameStatus::OWins,
        }
    }

    /// Returns true for every status other than `Playing`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    /// The winning player, if the match was won.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::XWins => Some(Player::X),
            GameStatus::OWins => Some(Player::O),
            GameStatus::Playing | GameStatus::Tie => None,
        }
    }
}

/// Complete match state.
///
/// Every field is a fixed-size value, so the whole state is `Copy`: search
/// explores hypothetical moves on stack snapshots and never touches the live
/// match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    boards: [SubBoard; 9],
    meta: MetaBoard,
    current_player: Player,
    status: GameStatus,
    last_move: Option<Move>,
}

impl GameState {
    /// Creates a new match: all cells empty, all boards open, X to move.
    pub fn new() -> Self {
        Self {
            boards: [SubBoard::new(); 9],
            meta: MetaBoard::new(),
            current_player: Player::X,
            status: GameStatus::Playing,
            last_move: None,
        }
    }

    /// Returns the sub-board at `index` (meta_row * 3 + meta_col).
    pub fn board(&self, index: usize) -> Option<&SubBoard> {
        self.boards.get(index)
    }

    /// Returns all nine sub-boards.
    pub fn boards(&self) -> &[SubBoard; 9] {
        &self.boards
    }

    /// Returns the meta-board.
    pub fn meta(&self) -> &MetaBoard {
        &self.meta
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the match status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the most recently accepted move.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Number of cells occupied by `player` across all sub-boards.
    pub fn mark_count(&self, player: Player) -> usize {
        self.boards
            .iter()
            .flat_map(|board| board.cells().iter())
            .filter(|cell| **cell == Cell::Occupied(player))
            .count()
    }

    pub(super) fn board_mut(&mut self, index: usize) -> &mut SubBoard {
        &mut self.boards[index]
    }

    pub(super) fn meta_mut(&mut self) -> &mut MetaBoard {
        &mut self.meta
    }

    pub(super) fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    pub(super) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub(super) fn set_last_move(&mut self, mv: Move) {
        self.last_move = Some(mv);
    }

    /// Formats the match as a 9x9 text grid.
    ///
    /// Closed sub-boards are drawn filled with their owner's symbol, or `-`
    /// when drawn, so the meta-board reads at a glance.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for meta_row in 0..3 {
            for sub_row in 0..3 {
                for meta_col in 0..3 {
                    let board = &self.boards[meta_row * 3 + meta_col];
                    for sub_col in 0..3 {
                        let symbol = match board.outcome() {
                            SubOutcome::Won(Player::X) => 'X',
                            SubOutcome::Won(Player::O) => 'O',
                            SubOutcome::Drawn => '-',
                            SubOutcome::Open => match board.cells[sub_row * 3 + sub_col] {
                                Cell::Empty => '.',
                                Cell::Occupied(Player::X) => 'x',
                                Cell::Occupied(Player::O) => 'o',
                            },
                        };
                        result.push(symbol);
                    }
                    if meta_col < 2 {
                        result.push_str(" | ");
                    }
                }
                result.push('\n');
            }
            if meta_row < 2 {
                result.push_str("----+-----+----\n");
            }
        }
        result
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
