//! Scalar tweens driven by elapsed time.
//!
//! A [`Tween`] interpolates one value from `from` to `to` over a fixed
//! duration using the `power1.out` curve (`1 - (1 - t)^2`). It has no
//! callbacks: owners advance it each frame and check [`Tween::is_finished`],
//! so sequencing lives in explicit state machines instead of nested
//! completion handlers.

use serde::{Deserialize, Serialize};

/// Timed interpolation of a single `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl Tween {
    /// Starts a tween. A non-positive duration finishes immediately.
    #[must_use]
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advances by `dt` seconds and returns the time left over past the end.
    ///
    /// Negative `dt` is treated as zero.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        let remaining = self.duration - self.elapsed;
        if dt >= remaining {
            self.elapsed = self.duration;
            dt - remaining
        } else {
            self.elapsed += dt;
            0.0
        }
    }

    /// Current interpolated value. Exactly `to` once finished.
    #[must_use]
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed / self.duration;
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from + (self.to - self.from) * eased
    }

    /// Start value.
    #[must_use]
    pub const fn start(&self) -> f32 {
        self.from
    }

    /// End value.
    #[must_use]
    pub const fn end(&self) -> f32 {
        self.to
    }

    /// Returns `true` once the full duration has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lands_exactly_on_end_value() {
        let mut tween = Tween::new(1.0, 0.2, 0.3);
        for _ in 0..10 {
            tween.advance(0.1);
        }
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 0.2);
    }

    #[test]
    fn endpoints_survive_advancing() {
        let mut tween = Tween::new(1.0, 1.5, 0.3);
        tween.advance(0.1);
        assert_eq!(tween.start(), 1.0);
        assert_eq!(tween.end(), 1.5);
    }

    #[test]
    fn eases_out() {
        let mut tween = Tween::new(0.0, 1.0, 1.0);
        tween.advance(0.5);
        assert!((tween.value() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn returns_leftover_time() {
        let mut tween = Tween::new(0.0, 1.0, 0.25);
        assert_eq!(tween.advance(0.125), 0.0);
        assert_eq!(tween.advance(0.5), 0.375);
    }

    #[test]
    fn zero_duration_is_finished_immediately() {
        let tween = Tween::new(3.0, 5.0, 0.0);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 5.0);
    }

    #[test]
    fn negative_dt_does_not_rewind() {
        let mut tween = Tween::new(0.0, 1.0, 1.0);
        tween.advance(0.5);
        let before = tween.value();
        tween.advance(-1.0);
        assert_eq!(tween.value(), before);
    }
}
