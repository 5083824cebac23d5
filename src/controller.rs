//! Match controller: turn sequencing, computer scheduling and statistics.
//!
//! The controller is the single writer of the live [`GameState`]. Input
//! arrives one event at a time ([`GameController::play`] for human moves,
//! [`GameController::tick`] once per loop iteration) and each event is
//! processed to completion. Time is passed in by the caller, so the think
//! delay is a plain comparison against a timer the controller owns.

use crate::ai::{COMPUTER, Difficulty, SearchEngine};
use crate::config::GameConfig;
use crate::games::ultimate::{GameState, Move, MoveError, Player, Transition};
use crate::stats::{GameStats, StatsStore};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Who controls the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Both sides are humans sharing the input.
    HumanVsHuman,
    /// X is human, O is the computer at the given difficulty.
    HumanVsComputer(Difficulty),
}

impl GameMode {
    /// True if `player` is played by the computer in this mode.
    pub fn is_computer(self, player: Player) -> bool {
        match self {
            GameMode::HumanVsHuman => false,
            GameMode::HumanVsComputer(_) => player == COMPUTER,
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::HumanVsHuman => write!(f, "human vs human"),
            GameMode::HumanVsComputer(difficulty) => {
                write!(f, "human vs computer ({})", difficulty)
            }
        }
    }
}

/// Progress of a pending computer move, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct ThinkingStatus {
    /// Time since the computer's turn began.
    elapsed: Duration,
    /// Time left before the computer plays.
    remaining: Duration,
}

/// Delay gate for the computer's move.
#[derive(Debug, Clone, Copy)]
struct ThinkTimer {
    delay: Duration,
    started: Option<Instant>,
}

impl ThinkTimer {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: None,
        }
    }

    fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    fn cancel(&mut self) {
        self.started = None;
    }

    fn is_pending(&self) -> bool {
        self.started.is_some()
    }

    fn status(&self, now: Instant) -> Option<ThinkingStatus> {
        let started = self.started?;
        let elapsed = now.saturating_duration_since(started);
        Some(ThinkingStatus::new(
            elapsed,
            self.delay.saturating_sub(elapsed),
        ))
    }

    fn is_ready(&self, now: Instant) -> bool {
        self.status(now)
            .is_some_and(|status| status.elapsed >= self.delay)
    }
}

/// Errors surfaced to the input layer.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ControllerError {
    /// The move broke a rule; the match is unchanged.
    #[display("Illegal move: {}", _0)]
    IllegalMove(MoveError),

    /// The computer was asked to move in a position without legal moves.
    #[display("No legal move available for the computer")]
    NoLegalMove,

    /// Human input arrived while the computer is to move.
    #[display("It is not a human player's turn")]
    NotHumanTurn,
}

impl From<MoveError> for ControllerError {
    fn from(err: MoveError) -> Self {
        ControllerError::IllegalMove(err)
    }
}

/// Owns one live match, the computer opponent and the statistics context.
#[derive(Debug)]
pub struct GameController<S: StatsStore> {
    state: GameState,
    mode: GameMode,
    search: SearchEngine,
    stats: GameStats,
    store: S,
    timer: ThinkTimer,
    last_warning: Option<String>,
}

impl<S: StatsStore> GameController<S> {
    /// Creates a controller and loads statistics from `store`.
    ///
    /// A failed load starts from zeroed statistics and is reported through
    /// [`GameController::last_warning`].
    #[instrument(skip(config, store), fields(mode = %config.mode()))]
    pub fn new(config: &GameConfig, store: S) -> Self {
        let (stats, last_warning) = match store.load() {
            Ok(stats) => (stats, None),
            Err(e) => {
                warn!(error = %e, "Could not load statistics, starting from zero");
                (GameStats::default(), Some(e.to_string()))
            }
        };
        info!(total_games = stats.total_games(), "Controller ready");
        Self {
            state: GameState::new(),
            mode: config.mode(),
            search: SearchEngine::new(*config.seed()),
            stats,
            store,
            timer: ThinkTimer::new(config.think_delay()),
            last_warning,
        }
    }

    /// Read-only snapshot of the live match.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The current game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Cumulative statistics.
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// The statistics store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The most recent non-fatal persistence problem, if any.
    pub fn last_warning(&self) -> Option<&str> {
        self.last_warning.as_deref()
    }

    /// True while a computer move is scheduled.
    pub fn is_computer_thinking(&self) -> bool {
        self.timer.is_pending()
    }

    /// Elapsed and remaining think time while a computer move is scheduled.
    pub fn thinking(&self, now: Instant) -> Option<ThinkingStatus> {
        self.timer.status(now)
    }

    /// Plays a human move.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::NotHumanTurn`] while the computer is to move
    /// - [`ControllerError::IllegalMove`] if the rules reject the move
    #[instrument(skip(self, now), fields(%mv))]
    pub fn play(&mut self, mv: Move, now: Instant) -> Result<Transition, ControllerError> {
        if self.timer.is_pending()
            || (!self.state.status().is_terminal()
                && self.mode.is_computer(self.state.current_player()))
        {
            warn!("Human input during the computer's turn");
            return Err(ControllerError::NotHumanTurn);
        }
        self.accept(mv, now)
    }

    /// Advances the computer's turn.
    ///
    /// Plays and returns the computer's move once the think delay has
    /// elapsed; returns `Ok(None)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NoLegalMove`] if search finds nothing to
    /// play, which correct status transitions rule out.
    #[instrument(skip(self, now))]
    pub fn tick(&mut self, now: Instant) -> Result<Option<Move>, ControllerError> {
        if !self.timer.is_ready(now) {
            return Ok(None);
        }
        self.timer.cancel();

        let GameMode::HumanVsComputer(difficulty) = self.mode else {
            return Ok(None);
        };
        let mv = self
            .search
            .select_move(&self.state, difficulty)
            .ok_or(ControllerError::NoLegalMove)?;
        self.accept(mv, now)?;
        Ok(Some(mv))
    }

    /// Starts a fresh match. Statistics are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state = GameState::new();
        self.timer.cancel();
        info!("Match reset");
    }

    /// Switches mode and starts a fresh match.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) {
        info!(%mode, "Game mode changed");
        self.mode = mode;
        self.reset();
    }

    /// Zeroes the statistics and saves them.
    #[instrument(skip(self))]
    pub fn clear_stats(&mut self) {
        self.stats = GameStats::default();
        info!("Statistics cleared");
        self.persist();
    }

    fn accept(&mut self, mv: Move, now: Instant) -> Result<Transition, ControllerError> {
        let transition = self.state.play(mv)?;
        match transition {
            Transition::Finished(status) => {
                self.stats.record(status);
                info!(%status, total_games = self.stats.total_games(), "Outcome recorded");
                self.persist();
            }
            Transition::Continued => {
                if self.mode.is_computer(self.state.current_player()) {
                    debug!("Computer turn scheduled");
                    self.timer.start(now);
                }
            }
        }
        Ok(transition)
    }

    fn persist(&mut self) {
        match self.store.save(&self.stats) {
            Ok(()) => self.last_warning = None,
            Err(e) => {
                warn!(error = %e, "Could not save statistics");
                self.last_warning = Some(e.to_string());
            }
        }
    }
}
