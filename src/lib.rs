//! Flappy Core - A deterministic Flappy Bird simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipes, collisions, scoring)
//! - `settings`: Game configuration loaded from JSON
//! - `highscores`: Append-only per-player score ledger
//! - `persistence`: JSON file helpers shared by settings and scores

pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use highscores::{ScoreBoard, ScoreLedger, ScoreRecord};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Horizontal position of the bird's left edge (pixels)
    pub const BIRD_X: f32 = 100.0;
    /// Side length of the bird's square bounding box (pixels)
    pub const BIRD_SIZE: f32 = 30.0;

    /// Gap-top range for freshly spawned pipe pairs (inclusive, pixels)
    pub const GAP_TOP_MIN: i32 = 200;
    pub const GAP_TOP_MAX: i32 = 400;

    /// Wall-clock interval between pipe spawns
    pub const SPAWN_INTERVAL_MS: u32 = 1500;

    /// Score awarded per individual pipe passed (a pair is worth 1.0)
    pub const SCORE_PER_PIPE: f32 = 0.5;

    /// Number of entries in the leaderboard views
    pub const LEADERBOARD_SIZE: usize = 10;
}
