//! High score and leaderboard records
//!
//! Persisted through a `Storage` backend, tracks the top 10 games plus the
//! all-time high score.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEADERBOARD_ENTRIES;
use crate::game::GameSummary;
use crate::persistence::{self, KEY_HIGH_SCORE, KEY_LEADERBOARD, PersistError, Storage};
use crate::sim::{Difficulty, Mode};

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Final snake length
    pub length: usize,
    pub mode: Mode,
    pub difficulty: Difficulty,
    /// When the game ended (ms)
    pub timestamp_ms: u64,
}

impl From<&GameSummary> for LeaderboardEntry {
    fn from(summary: &GameSummary) -> Self {
        Self {
            score: summary.score,
            level: summary.level,
            length: summary.length,
            mode: summary.mode,
            difficulty: summary.difficulty,
            timestamp_ms: summary.timestamp_ms,
        }
    }
}

/// Top games, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a finished game. Ties rank below earlier entries.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let rank = self.potential_rank(entry.score)?;
        self.entries.insert(rank - 1, entry);
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let board: Self = persistence::load_or_default(storage, KEY_LEADERBOARD);
        log::info!("Loaded {} leaderboard entries", board.entries.len());
        board
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), PersistError> {
        persistence::save_json(storage, KEY_LEADERBOARD, self)?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }
}

pub fn load_high_score<S: Storage + ?Sized>(storage: &S) -> u64 {
    persistence::load_or_default(storage, KEY_HIGH_SCORE)
}

/// Outcome of recording a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    pub new_high_score: bool,
    pub rank: Option<usize>,
}

/// Record a finished game: leaderboard insert, and high score when beaten
pub fn record_game<S: Storage + ?Sized>(
    storage: &mut S,
    summary: &GameSummary,
) -> Result<Recorded, PersistError> {
    let mut board = Leaderboard::load(storage);
    let rank = board.add(LeaderboardEntry::from(summary));
    board.save(storage)?;

    let high = load_high_score(storage);
    let new_high_score = summary.score > high;
    if new_high_score {
        persistence::save_json(storage, KEY_HIGH_SCORE, &summary.score)?;
        log::info!("New high score: {}", summary.score);
    }

    Ok(Recorded { new_high_score, rank })
}
