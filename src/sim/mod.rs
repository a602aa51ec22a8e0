//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` per frame)
//! - Seeded RNG only
//! - Stable iteration order (pipes in spawn order)
//! - No rendering, audio or platform dependencies

pub mod bird;
pub mod collision;
pub mod pipes;
pub mod state;
pub mod tick;

pub use bird::Bird;
pub use collision::{Bounded, Rect};
pub use pipes::{Pipe, PipeField, PipeSide, SpawnClock};
pub use state::{DeathCause, GameEvent, GameState, RoundPhase};
pub use tick::{TickInput, TickOutcome, autopilot_wants_jump, tick};
