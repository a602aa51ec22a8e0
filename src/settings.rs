//! Game settings
//!
//! Loaded from a JSON file at startup. Any key missing from the file keeps its
//! default value, so a partial `config.json` is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SPAWN_INTERVAL_MS;
use crate::persistence::{self, PersistenceError};

/// Game configuration (screen, physics and pipe tuning)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    /// Screen width in pixels (pipes spawn at this x)
    pub width: u32,
    /// Screen height in pixels (floor boundary)
    pub height: u32,
    /// Background color used by renderers
    pub bg_color: [u8; 3],

    // === Bird ===
    /// Downward acceleration (pixels/tick²)
    pub gravity: f32,
    /// Upward speed set by a jump (pixels/tick)
    pub jump_force: f32,

    // === Pipes ===
    pub pipe_width: u32,
    /// Vertical opening between the two pipes of a pair
    pub pipe_gap: u32,
    /// Leftward scroll per tick (pixels)
    pub pipe_speed: f32,

    /// Simulation ticks per second
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 600,
            bg_color: [0, 0, 139],

            gravity: 0.25,
            jump_force: 7.0,

            pipe_width: 60,
            pipe_gap: 150,
            pipe_speed: 3.0,

            fps: 60,
        }
    }
}

impl Settings {
    /// Bird's starting y (top edge), vertically centred on integer pixels
    pub fn bird_start_y(&self) -> f32 {
        (self.height / 2) as f32
    }

    /// Pipe spawn interval expressed in simulation ticks (at least 1)
    pub fn spawn_period_ticks(&self) -> u32 {
        let ticks = (u64::from(SPAWN_INTERVAL_MS) * u64::from(self.fps) + 500) / 1000;
        ticks.clamp(1, u64::from(u32::MAX)) as u32
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match persistence::read_json::<Settings>(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => {
                log::info!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::write_json(path, self)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.width, 400);
        assert_eq!(s.height, 600);
        assert_eq!(s.gravity, 0.25);
        assert_eq!(s.jump_force, 7.0);
        assert_eq!(s.pipe_width, 60);
        assert_eq!(s.pipe_gap, 150);
        assert_eq!(s.pipe_speed, 3.0);
        assert_eq!(s.fps, 60);
    }

    #[test]
    fn test_spawn_period_ticks() {
        let mut s = Settings::default();
        assert_eq!(s.spawn_period_ticks(), 90);

        s.fps = 30;
        assert_eq!(s.spawn_period_ticks(), 45);

        // Never zero, even for a degenerate frame rate
        s.fps = 0;
        assert_eq!(s.spawn_period_ticks(), 1);
    }

    #[test]
    fn test_bird_start_y_uses_integer_halving() {
        let mut s = Settings::default();
        assert_eq!(s.bird_start_y(), 300.0);
        s.height = 651;
        assert_eq!(s.bird_start_y(), 325.0);
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "height": 650, "gravity": 0.5 }"#).unwrap();

        let s = Settings::load(&path);
        assert_eq!(s.height, 650);
        assert_eq!(s.gravity, 0.5);
        assert_eq!(s.width, 400);
        assert_eq!(s.pipe_gap, 150);
    }

    #[test]
    fn test_missing_or_corrupt_file_gives_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(Settings::load(&dir.path().join("absent.json")), Settings::default());

        let path = dir.path().join("config.json");
        fs::write(&path, "][").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let s = Settings {
            jump_force: 8.0,
            pipe_speed: 4.0,
            ..Default::default()
        };

        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path), s);
    }
}
