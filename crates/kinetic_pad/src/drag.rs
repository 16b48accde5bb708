//! Drag tracking
//!
//! Pointer input arrives as three gestures: a start carrying the initial
//! pointer velocity, moves carrying the cumulative translation since the
//! start, and an end. A [`DragSession`] remembers where the drag began and
//! which axes it may move.

use kinetic_core::{AxisMask, Point, Size};
use kinetic_animation::motion::adjusted_bounce_offset;

/// Pointer press that begins a drag
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragStart {
    /// Pointer velocity at the press (px/ms)
    pub velocity: Point,
}

/// Pointer movement during a drag
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragMove {
    /// Total pointer travel since the drag started
    pub translation: Point,
    /// Time since the previous sample, in milliseconds
    pub interval: f32,
}

/// An in-progress drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Content offset when the drag started
    pub start_offset: Point,
    /// Axes this drag is allowed to move
    pub direction: AxisMask,
}

impl DragSession {
    /// Begin a drag at `offset`. With the directional lock the drag follows
    /// only the axis with the larger initial speed.
    pub fn begin(offset: Point, velocity: Point, directional_lock: bool) -> Self {
        Self {
            start_offset: offset,
            direction: Self::lock_direction(velocity, directional_lock),
        }
    }

    /// Axes a drag starting with `velocity` may move. Equal speeds lock to Y.
    pub fn lock_direction(velocity: Point, directional_lock: bool) -> AxisMask {
        if !directional_lock {
            return AxisMask::BOTH;
        }
        if velocity.x.abs() > velocity.y.abs() {
            AxisMask::new(true, false)
        } else {
            AxisMask::new(false, true)
        }
    }

    /// Offset under `translation`, before the bounce rule
    pub fn candidate_offset(&self, translation: Point) -> Point {
        self.start_offset + self.direction.apply(translation)
    }

    /// New offset and velocity after a move sample.
    ///
    /// The velocity is the displacement since the previous offset over the
    /// sample interval; a sample without a positive interval keeps
    /// `previous_velocity`.
    pub fn track(
        &self,
        sample: DragMove,
        previous_offset: Point,
        previous_velocity: Point,
        bounce: AxisMask,
        size: Size,
        content_size: Size,
    ) -> (Point, Point) {
        let translation = sample.translation.sanitized();
        let offset =
            adjusted_bounce_offset(self.candidate_offset(translation), bounce, size, content_size);

        let velocity = if sample.interval > 0.0 && sample.interval.is_finite() {
            (offset - previous_offset) * (1.0 / sample.interval)
        } else {
            previous_velocity
        };
        (offset, velocity)
    }

    /// The same drag with its origin shifted by `delta`, so later moves
    /// continue from a programmatically changed offset
    pub fn rebased(&self, delta: Point) -> Self {
        Self {
            start_offset: self.start_offset + delta,
            ..*self
        }
    }
}
