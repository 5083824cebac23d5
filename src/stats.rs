//! Cumulative match statistics and their persistence.

use crate::games::ultimate::GameStatus;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Default location of the statistics file.
pub const DEFAULT_STATS_PATH: &str = "ultimate_tictactoe_stats.json";

/// Counters across all finished matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameStats {
    /// Matches won by X.
    x_wins: u32,
    /// Matches won by O.
    o_wins: u32,
    /// Matches tied.
    ties: u32,
    /// All finished matches.
    total_games: u32,
}

impl GameStats {
    /// Counts one finished match. `Playing` is ignored.
    #[instrument]
    pub fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::XWins => self.x_wins += 1,
            GameStatus::OWins => self.o_wins += 1,
            GameStatus::Tie => self.ties += 1,
            GameStatus::Playing => return,
        }
        self.total_games += 1;
    }
}

/// Statistics persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Stats error: {} at {}:{}", message, file, line)]
pub struct StatsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StatsError {
    /// Creates a new statistics error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Where statistics live between runs: one record, read at startup and
/// overwritten after every finished match and on clear.
pub trait StatsStore {
    /// Reads the stored record.
    fn load(&self) -> Result<GameStats, StatsError>;

    /// Overwrites the stored record.
    fn save(&mut self, stats: &GameStats) -> Result<(), StatsError>;
}

/// Loads statistics, falling back to zeroed counters on any failure.
#[instrument(skip(store))]
pub fn load_or_default<S: StatsStore>(store: &S) -> GameStats {
    match store.load() {
        Ok(stats) => stats,
        Err(e) => {
            warn!(error = %e, "Could not load statistics, starting from zero");
            GameStats::default()
        }
    }
}

/// Statistics stored as a single JSON object in a file.
#[derive(Debug, Clone, new)]
pub struct JsonStatsStore {
    path: PathBuf,
}

impl JsonStatsStore {
    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsStore for JsonStatsStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<GameStats, StatsError> {
        if !self.path.exists() {
            debug!("No statistics file yet");
            return Ok(GameStats::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StatsError::new(format!("Failed to read statistics: {}", e)))?;
        let stats: GameStats = serde_json::from_str(&content)
            .map_err(|e| StatsError::new(format!("Failed to parse statistics: {}", e)))?;
        info!(total_games = stats.total_games, "Statistics loaded");
        Ok(stats)
    }

    #[instrument(skip(self, stats), fields(path = %self.path.display()))]
    fn save(&mut self, stats: &GameStats) -> Result<(), StatsError> {
        let content = serde_json::to_string(stats)
            .map_err(|e| StatsError::new(format!("Failed to encode statistics: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| StatsError::new(format!("Failed to write statistics: {}", e)))?;
        debug!(total_games = stats.total_games, "Statistics saved");
        Ok(())
    }
}

/// Statistics kept in memory, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsStore {
    stored: GameStats,
    saves: usize,
}

impl MemoryStatsStore {
    /// Creates a store already holding `stats`.
    pub fn with_stats(stats: GameStats) -> Self {
        Self {
            stored: stats,
            saves: 0,
        }
    }

    /// The last saved record.
    pub fn stored(&self) -> &GameStats {
        &self.stored
    }

    /// How many times `save` was called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl StatsStore for MemoryStatsStore {
    fn load(&self) -> Result<GameStats, StatsError> {
        Ok(self.stored)
    }

    fn save(&mut self, stats: &GameStats) -> Result<(), StatsError> {
        self.stored = *stats;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_outcomes() {
        let mut stats = GameStats::default();
        stats.record(GameStatus::XWins);
        stats.record(GameStatus::Tie);
        stats.record(GameStatus::OWins);
        stats.record(GameStatus::XWins);
        stats.record(GameStatus::Playing);
        assert_eq!(*stats.x_wins(), 2);
        assert_eq!(*stats.o_wins(), 1);
        assert_eq!(*stats.ties(), 1);
        assert_eq!(*stats.total_games(), 4);
    }

    #[test]
    fn test_json_layout() {
        let mut stats = GameStats::default();
        stats.record(GameStatus::OWins);
        let json = serde_json::to_string(&stats).expect("encodes");
        assert_eq!(json, r#"{"x_wins":0,"o_wins":1,"ties":0,"total_games":1}"#);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStatsStore::default();
        let mut stats = GameStats::default();
        stats.record(GameStatus::Tie);
        store.save(&stats).expect("memory save");
        assert_eq!(load_or_default(&store), stats);
        assert_eq!(store.saves(), 1);
    }
}
