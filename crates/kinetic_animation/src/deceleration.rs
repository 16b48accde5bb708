//! Deceleration trajectories
//!
//! A [`Deceleration`] records where and when a coasting motion started and
//! where it must come to rest. The trajectory itself is closed-form, so the
//! state at any clock time is computed from the start values rather than
//! integrated frame by frame.

use kinetic_core::Point;

use crate::motion::{deceleration_at, deceleration_duration, Kinematics};

/// A constant-deceleration trajectory toward a fixed end offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deceleration {
    /// Clock time (ms) the trajectory started at
    pub start_time: f64,
    pub start_offset: Point,
    pub start_velocity: Point,
    /// Rest position
    pub end_offset: Point,
    /// Deceleration magnitude (px/ms²)
    pub rate: f32,
    /// Solved time (ms) from start to rest
    pub duration: f32,
}

/// Result of advancing a deceleration to a clock time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecelerationStep {
    /// Still moving
    Moving(Kinematics),
    /// Reached `end_offset`; velocity is zero
    Finished(Point),
}

impl Deceleration {
    /// Solve a trajectory from `(offset, velocity)` to `end_offset` at `rate`
    pub fn new(start_time: f64, offset: Point, velocity: Point, end_offset: Point, rate: f32) -> Self {
        let duration = deceleration_duration(rate, offset, velocity, end_offset);
        tracing::trace!(
            "deceleration ({:.1}, {:.1}) -> ({:.1}, {:.1}) rate={} duration={:.1}ms",
            offset.x,
            offset.y,
            end_offset.x,
            end_offset.y,
            rate,
            duration
        );
        Self {
            start_time,
            start_offset: offset,
            start_velocity: velocity,
            end_offset,
            rate,
            duration,
        }
    }

    /// Clock time at which the trajectory comes to rest
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration as f64
    }

    /// True when the trajectory has nowhere to go
    pub fn is_trivial(&self) -> bool {
        self.start_offset == self.end_offset
    }

    /// State of the trajectory at clock time `now`
    pub fn step(&self, now: f64) -> DecelerationStep {
        if now >= self.end_time() {
            return DecelerationStep::Finished(self.end_offset);
        }
        let elapsed = (now - self.start_time).max(0.0) as f32;
        let k = deceleration_at(
            elapsed,
            self.rate,
            self.start_offset,
            self.start_velocity,
            self.end_offset,
        );
        if k.offset == self.end_offset && k.velocity.is_zero() {
            DecelerationStep::Finished(self.end_offset)
        } else {
            DecelerationStep::Moving(k)
        }
    }

    /// The same trajectory shifted by `delta` in space
    pub fn translated(&self, delta: Point) -> Self {
        Self {
            start_offset: self.start_offset + delta,
            end_offset: self.end_offset + delta,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::DECELERATION_RATE_STRONG;

    #[test]
    fn test_step_reaches_end() {
        let d = Deceleration::new(
            1000.0,
            Point::new(-100.0, 0.0),
            Point::ZERO,
            Point::new(-750.0, 0.0),
            DECELERATION_RATE_STRONG,
        );
        assert!(d.duration > 0.0);

        match d.step(1000.0 + d.duration as f64 / 2.0) {
            DecelerationStep::Moving(k) => {
                assert!(k.offset.x < -100.0 && k.offset.x > -750.0);
                assert!(k.velocity.x < 0.0);
            }
            other => panic!("expected moving, got {:?}", other),
        }

        assert_eq!(
            d.step(d.end_time()),
            DecelerationStep::Finished(Point::new(-750.0, 0.0))
        );
    }

    #[test]
    fn test_step_before_start_clamps_elapsed() {
        let d = Deceleration::new(
            500.0,
            Point::new(0.0, -10.0),
            Point::ZERO,
            Point::new(0.0, -60.0),
            DECELERATION_RATE_STRONG,
        );
        match d.step(0.0) {
            DecelerationStep::Moving(k) => assert_eq!(k.offset, Point::new(0.0, -10.0)),
            other => panic!("expected moving, got {:?}", other),
        }
    }

    #[test]
    fn test_trivial_and_translated() {
        let at_rest = Deceleration::new(0.0, Point::ZERO, Point::ZERO, Point::ZERO, 0.04);
        assert!(at_rest.is_trivial());
        assert_eq!(at_rest.duration, 0.0);
        assert_eq!(at_rest.step(0.0), DecelerationStep::Finished(Point::ZERO));

        let d = Deceleration::new(0.0, Point::ZERO, Point::ZERO, Point::new(-100.0, 0.0), 0.04);
        let shifted = d.translated(Point::new(-4500.0, 0.0));
        assert_eq!(shifted.start_offset, Point::new(-4500.0, 0.0));
        assert_eq!(shifted.end_offset, Point::new(-4600.0, 0.0));
        assert_eq!(shifted.duration, d.duration);
        assert_eq!(shifted.start_time, d.start_time);
    }
}
