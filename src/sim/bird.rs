//! The player's bird
//!
//! Vertical-only kinematics in per-tick units: velocity accumulates gravity,
//! position accumulates velocity. Negative velocity moves the bird up.

use serde::{Deserialize, Serialize};

use super::collision::{Bounded, Rect};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Left edge (fixed for the whole session)
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Vertical velocity (pixels/tick, positive = down)
    pub velocity: f32,
    /// Side of the square bounding box
    pub size: f32,
    pub gravity: f32,
    pub jump_force: f32,
    initial_y: f32,
}

impl Bird {
    pub fn new(x: f32, y: f32, size: f32, gravity: f32, jump_force: f32) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            size,
            gravity,
            jump_force,
            initial_y: y,
        }
    }

    /// Starting y restored by `reset`
    pub fn initial_y(&self) -> f32 {
        self.initial_y
    }

    /// Replace the current velocity with an upward impulse
    pub fn jump(&mut self) {
        self.velocity = -self.jump_force;
    }

    /// Integrate one tick. No clamping; bounds are the round's concern.
    pub fn advance(&mut self) {
        self.velocity += self.gravity;
        self.y += self.velocity;
    }

    pub fn reset(&mut self) {
        self.y = self.initial_y;
        self.velocity = 0.0;
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.size
    }
}

impl Bounded for Bird {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bird() -> Bird {
        Bird::new(100.0, 300.0, 30.0, 0.25, 7.0)
    }

    #[test]
    fn test_jump_sets_velocity() {
        let mut b = bird();
        b.jump();
        assert_eq!(b.velocity, -7.0);

        // Jump overrides, it does not add
        b.advance();
        b.advance();
        b.jump();
        assert_eq!(b.velocity, -7.0);
    }

    #[test]
    fn test_jump_moves_bird_up() {
        let mut b = bird();
        b.jump();
        b.advance();
        assert!(b.y < 300.0);
        assert_eq!(b.velocity, -6.75);
        assert_eq!(b.y, 293.25);
    }

    #[test]
    fn test_advance_has_no_bounds() {
        let mut b = bird();
        for _ in 0..200 {
            b.advance();
        }
        // Well past any screen; the bird itself does not care
        assert!(b.y > 5000.0);
    }

    #[test]
    fn test_reset() {
        let mut b = bird();
        b.jump();
        b.advance();
        b.advance();
        b.reset();
        assert_eq!(b.y, 300.0);
        assert_eq!(b.velocity, 0.0);
        assert_eq!(b.initial_y(), 300.0);
    }

    #[test]
    fn test_bounds() {
        let b = bird();
        let r = b.bounds();
        assert_eq!(r, Rect::new(100.0, 300.0, 30.0, 30.0));
        assert_eq!(b.bottom(), 330.0);
    }

    proptest! {
        #[test]
        fn prop_gravity_integration(n in 0u32..400, g in 0.05f32..2.0) {
            let mut b = Bird::new(100.0, 300.0, 30.0, g, 7.0);
            for _ in 0..n {
                b.advance();
            }
            let n_f = n as f64;
            let g_f = g as f64;
            let expected_v = n_f * g_f;
            let expected_y = 300.0 + g_f * n_f * (n_f + 1.0) / 2.0;
            let tol = 1e-3 * (1.0 + expected_y.abs());
            prop_assert!((b.velocity as f64 - expected_v).abs() <= 1e-3 * (1.0 + expected_v));
            prop_assert!((b.y as f64 - expected_y).abs() <= tol);
        }

        #[test]
        fn prop_jump_ignores_prior_velocity(v in -50.0f32..50.0, force in 0.1f32..20.0) {
            let mut b = Bird::new(100.0, 300.0, 30.0, 0.25, force);
            b.velocity = v;
            b.jump();
            prop_assert_eq!(b.velocity, -force);
        }
    }
}
