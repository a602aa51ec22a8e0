//! Game state and core simulation types
//!
//! A `GameState` lives for the whole session and hosts any number of rounds.
//! Everything that can influence a round (RNG, spawn clock, physics
//! constants) is owned here so runs are reproducible from a seed.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::pipes::PipeField;
use crate::consts::{BIRD_SIZE, BIRD_X};
use crate::settings::Settings;

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Menus, name entry, between rounds
    Inactive,
    /// A round is being played
    Active,
}

/// What ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Pipe,
    Ceiling,
    Floor,
}

/// Notifications for renderers, audio and score keeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The bird flapped (play the jump sound)
    Jumped,
    /// A new pipe pair entered from the right
    PipesSpawned { gap_top: f32 },
    /// Score went up this tick
    Scored { score: f32 },
    /// The round ended
    RoundOver {
        final_score: f32,
        cause: DeathCause,
        new_high_score: bool,
    },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was built from
    pub seed: u64,
    pub rng: Pcg32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub bird: Bird,
    pub pipes: PipeField,
    /// Pipes passed this round (0.5 per pipe, 1.0 per pair)
    pub score: f32,
    /// Best score seen, seeded from the score ledger
    pub high_score: f32,
    pub phase: RoundPhase,
    /// Ticks simulated this session, active or not
    pub time_ticks: u64,
    /// Pending events, newest last
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session; call `start_round` to play
    pub fn new(settings: &Settings, seed: u64, high_score: f32) -> Self {
        let bird = Bird::new(
            BIRD_X,
            settings.bird_start_y(),
            BIRD_SIZE,
            settings.gravity,
            settings.jump_force,
        );
        let pipes = PipeField::new(
            settings.pipe_width as f32,
            settings.pipe_gap as f32,
            settings.pipe_speed,
            settings.spawn_period_ticks(),
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen_width: settings.width as f32,
            screen_height: settings.height as f32,
            bird,
            pipes,
            score: 0.0,
            high_score,
            phase: RoundPhase::Inactive,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    /// Reset bird, pipes and score, then go live
    ///
    /// The spawn clock is left alone so pipe timing continues from the idle
    /// period.
    pub fn start_round(&mut self) {
        self.bird.reset();
        self.pipes.reset();
        self.score = 0.0;
        self.phase = RoundPhase::Active;
        log::info!("Round started (high score {})", self.high_score);
    }

    /// Flap if a round is active. Returns false (and does nothing) otherwise.
    pub fn jump(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.bird.jump();
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Abandon the current round without a result (back to the menu)
    pub fn quit_round(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.phase = RoundPhase::Inactive;
        log::info!("Round abandoned at score {}", self.score);
        true
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
