//! Pipe pairs: spawning, scrolling, pruning, collision and pass scoring

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Bounded, Rect};
use crate::consts::{GAP_TOP_MAX, GAP_TOP_MIN, SCORE_PER_PIPE};

/// Which half of a pair a pipe is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeSide {
    /// Hangs from the ceiling down to the gap
    Top,
    /// Rises from the gap to the floor
    Bottom,
}

/// A single scrolling pipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// May be negative for a top pipe when the gap top sits above the gap size
    pub height: f32,
    pub side: PipeSide,
}

impl Bounded for Pipe {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Tick counter that fires once every `period` ticks
///
/// Armed when the field is built and never reset by rounds, so spawn timing
/// carries across the idle time between rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnClock {
    period: u32,
    elapsed: u32,
}

impl SpawnClock {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            elapsed: 0,
        }
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Ticks counted since the last firing
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Count one tick; true when the period has elapsed
    pub fn advance(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

/// All live pipes plus the spawn clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeField {
    pub pipe_width: f32,
    pub gap: f32,
    pub speed: f32,
    /// Insertion order (bottom then top per spawn), not spatial order
    pub pipes: Vec<Pipe>,
    pub clock: SpawnClock,
}

impl PipeField {
    pub fn new(pipe_width: f32, gap: f32, speed: f32, spawn_period: u32) -> Self {
        Self {
            pipe_width,
            gap,
            speed,
            pipes: Vec::new(),
            clock: SpawnClock::new(spawn_period),
        }
    }

    /// Spawn a pair with a random gap top; returns the gap top used
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        screen_width: f32,
        screen_height: f32,
    ) -> f32 {
        let gap_top = rng.random_range(GAP_TOP_MIN..=GAP_TOP_MAX) as f32;
        self.spawn_at(gap_top, screen_width, screen_height);
        gap_top
    }

    /// Spawn a pair just off the right edge with the gap's lower edge at `gap_top`
    pub fn spawn_at(&mut self, gap_top: f32, screen_width: f32, screen_height: f32) {
        let bottom = Pipe {
            x: screen_width,
            y: gap_top,
            width: self.pipe_width,
            height: screen_height - gap_top,
            side: PipeSide::Bottom,
        };
        let top = Pipe {
            x: screen_width,
            y: 0.0,
            width: self.pipe_width,
            height: gap_top - self.gap,
            side: PipeSide::Top,
        };
        if top.height < 0.0 {
            log::debug!("Degenerate top pipe (height {}) at gap top {}", top.height, gap_top);
        }
        self.pipes.push(bottom);
        self.pipes.push(top);
    }

    /// Prune pipes that have left the screen, then scroll the rest
    ///
    /// The prune test uses positions from before this tick's scroll.
    pub fn advance(&mut self) {
        let min_x = -self.pipe_width;
        self.pipes.retain(|p| p.x > min_x);
        for pipe in &mut self.pipes {
            pipe.x -= self.speed;
        }
    }

    pub fn collides<B: Bounded + ?Sized>(&self, body: &B) -> bool {
        let bounds = body.bounds();
        self.pipes.iter().any(|p| p.bounds().overlaps(&bounds))
    }

    /// Score earned this tick: 0.5 per pipe whose trailing edge sits exactly at `body_x`
    ///
    /// This is an exact float comparison. Pipes only score when the scroll
    /// lands their right edge precisely on the bird's x; a speed that steps
    /// over that value means the pipe is never counted.
    pub fn score_delta(&self, body_x: f32) -> f32 {
        let passed = self
            .pipes
            .iter()
            .filter(|p| p.x + self.pipe_width == body_x)
            .count();
        SCORE_PER_PIPE * passed as f32
    }

    /// Remove every pipe. The spawn clock keeps its phase.
    pub fn reset(&mut self) {
        self.pipes.clear();
    }
}
