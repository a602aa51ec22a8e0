//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one frame. Units are per tick:
//! the caller drives `tick` at the configured fps.

use super::collision::Bounded;
use super::state::{DeathCause, GameEvent, GameState, RoundPhase};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (space/click)
    pub jump: bool,
    /// Idle/demo mode - autopilot decides when to flap
    pub idle_mode: bool,
}

/// Result of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No round in progress; only the spawn clock moved
    Idle,
    /// Round continues with this score
    Continue { score: f32 },
    /// Round ended this tick; hand `final_score` to the score ledger
    Terminated { final_score: f32, cause: DeathCause },
}

/// How far above the gap's lower edge the autopilot lets the bird sink
const AUTOPILOT_MARGIN: f32 = 8.0;

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    state.time_ticks += 1;

    // The spawn clock runs whether or not a round is live
    let spawn_due = state.pipes.clock.advance();

    if !state.is_active() {
        if spawn_due {
            log::trace!("Spawn dropped (no active round)");
        }
        return TickOutcome::Idle;
    }

    if spawn_due {
        let gap_top = state
            .pipes
            .spawn(&mut state.rng, state.screen_width, state.screen_height);
        log::debug!("Pipes spawned with gap top {}", gap_top);
        state.events.push(GameEvent::PipesSpawned { gap_top });
    }

    if input.jump || (input.idle_mode && autopilot_wants_jump(state)) {
        state.jump();
    }

    state.bird.advance();
    state.pipes.advance();

    if let Some(cause) = terminal_cause(state) {
        return end_round(state, cause);
    }

    let delta = state.pipes.score_delta(state.bird.x);
    if delta > 0.0 {
        state.score += delta;
        state.events.push(GameEvent::Scored { score: state.score });
    }

    TickOutcome::Continue { score: state.score }
}

/// Pipe contact first, then the screen edges (touching either edge loses)
fn terminal_cause(state: &GameState) -> Option<DeathCause> {
    if state.pipes.collides(&state.bird) {
        Some(DeathCause::Pipe)
    } else if state.bird.top() <= 0.0 {
        Some(DeathCause::Ceiling)
    } else if state.bird.bottom() >= state.screen_height {
        Some(DeathCause::Floor)
    } else {
        None
    }
}

fn end_round(state: &mut GameState, cause: DeathCause) -> TickOutcome {
    let final_score = state.score;
    let new_high_score = final_score > state.high_score;
    if new_high_score {
        state.high_score = final_score;
    }
    state.phase = RoundPhase::Inactive;
    state.events.push(GameEvent::RoundOver {
        final_score,
        cause,
        new_high_score,
    });
    log::info!(
        "Round over ({:?}) score {} high score {}",
        cause,
        final_score,
        state.high_score
    );
    TickOutcome::Terminated { final_score, cause }
}

/// Flap when falling past the lower edge of the next gap
///
/// Aims for the nearest pair the bird has not yet cleared, or the middle of
/// the screen when no pipes are ahead.
pub fn autopilot_wants_jump(state: &GameState) -> bool {
    let bird = &state.bird;
    if bird.velocity <= 0.0 {
        return false;
    }

    let floor = state
        .pipes
        .pipes
        .iter()
        .filter(|p| p.bounds().right() > bird.x && p.bounds().bottom() >= state.screen_height)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        .map(|p| p.y)
        .unwrap_or(state.screen_height * 0.6);

    bird.bottom() + bird.velocity >= floor - AUTOPILOT_MARGIN
}
