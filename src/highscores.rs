//! High score ledger
//!
//! Append-only list of per-player results persisted as JSON:
//!
//! ```json
//! { "players": [ { "name": "ala", "score": 3.0 } ], "high_score": 3.0 }
//! ```
//!
//! The ledger never fails a load: a missing or corrupt file reads as an
//! empty board. Appends report errors so the caller can log them, but a
//! failed append never affects the finished round.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::LEADERBOARD_SIZE;
use crate::persistence::{self, PersistenceError};

/// A single recorded result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: f32,
}

/// All recorded results plus the derived global high score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScoreBoard {
    #[serde(default)]
    pub players: Vec<ScoreRecord>,
    #[serde(default)]
    pub high_score: f32,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

fn by_score_desc(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and refresh the high score
    pub fn push(&mut self, name: &str, score: f32) {
        self.players.push(ScoreRecord {
            name: name.to_string(),
            score,
        });
        self.recompute_high_score();
    }

    /// High score = max over all records (0 when empty)
    pub fn recompute_high_score(&mut self) {
        self.high_score = self
            .players
            .iter()
            .map(|p| p.score)
            .fold(0.0, f32::max);
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Best `n` records, highest first
    pub fn top(&self, n: usize) -> Vec<ScoreRecord> {
        let mut sorted = self.players.clone();
        sorted.sort_by(by_score_desc);
        sorted.truncate(n);
        sorted
    }

    /// Case-insensitive substring search, highest first
    ///
    /// An empty needle matches every record.
    pub fn query(&self, needle: &str) -> Vec<ScoreRecord> {
        let needle = needle.to_lowercase();
        let mut matches: Vec<_> = self
            .players
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(by_score_desc);
        matches
    }

    /// Each player's best score, highest first, limited to `n` players
    pub fn best_per_player(&self, n: usize) -> Vec<ScoreRecord> {
        let mut best: HashMap<&str, f32> = HashMap::new();
        for p in &self.players {
            let entry = best.entry(p.name.as_str()).or_insert(p.score);
            if p.score > *entry {
                *entry = p.score;
            }
        }

        let mut ranked: Vec<_> = best
            .into_iter()
            .map(|(name, score)| ScoreRecord {
                name: name.to_string(),
                score,
            })
            .collect();
        // Name as tiebreak keeps the output stable across HashMap orderings
        ranked.sort_by(|a, b| by_score_desc(a, b).then_with(|| a.name.cmp(&b.name)));
        ranked.truncate(n);
        ranked
    }

    /// Mean score rounded to two decimals (0 when empty)
    pub fn average_score(&self) -> f32 {
        if self.players.is_empty() {
            return 0.0;
        }
        let total: f64 = self.players.iter().map(|p| f64::from(p.score)).sum();
        let mean = total / self.players.len() as f64;
        ((mean * 100.0).round() / 100.0) as f32
    }
}

/// File-backed score ledger
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    path: PathBuf,
}

impl ScoreLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record; missing or corrupt data yields an empty board
    pub fn load_all(&self) -> ScoreBoard {
        match persistence::read_json::<ScoreBoard>(&self.path) {
            Ok(mut board) => {
                // Older files may lack or misreport the derived field
                board.recompute_high_score();
                log::info!(
                    "Loaded {} scores (high score {})",
                    board.players.len(),
                    board.high_score
                );
                board
            }
            Err(e) if e.is_not_found() => {
                log::info!("No scores found, starting fresh");
                ScoreBoard::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable score file: {e}");
                ScoreBoard::new()
            }
        }
    }

    /// Append a result and rewrite the file
    ///
    /// A missing or malformed file is replaced by a fresh board; any other
    /// read failure is returned without touching the file.
    pub fn append(&self, name: &str, score: f32) -> Result<(), LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::EmptyName);
        }

        // Only a missing or malformed file may be replaced; any other read
        // failure would otherwise overwrite existing records
        let mut board = match persistence::read_json::<ScoreBoard>(&self.path) {
            Ok(mut board) => {
                board.recompute_high_score();
                board
            }
            Err(e) if e.is_not_found() => ScoreBoard::new(),
            Err(e @ PersistenceError::Json { .. }) => {
                log::warn!("Replacing unreadable score file: {e}");
                ScoreBoard::new()
            }
            Err(e) => return Err(e.into()),
        };
        board.push(name, score);
        persistence::write_json(&self.path, &board)?;
        log::info!(
            "Score {} saved for {} ({} entries)",
            score,
            name,
            board.players.len()
        );
        Ok(())
    }

    /// Records whose name contains `needle` (case-insensitive), highest first
    pub fn query(&self, needle: &str) -> Vec<ScoreRecord> {
        self.load_all().query(needle)
    }

    /// The "all players" view
    pub fn leaderboard(&self) -> Vec<ScoreRecord> {
        self.load_all().top(LEADERBOARD_SIZE)
    }
}
