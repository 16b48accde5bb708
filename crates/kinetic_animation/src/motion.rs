//! Scroll motion math
//!
//! Stateless helpers computing clamped offsets, page snapping, velocity caps,
//! deceleration end points and closed-form positions under constant
//! deceleration. Offsets follow the pad convention: valid values lie in
//! `[min(size - content_size, 0), 0]` per axis.
//!
//! Rates are deceleration magnitudes in px/ms². When a rate is applied to a
//! 2D motion it is split across the axes in proportion to each axis's share
//! of the motion vector, so the combined motion decelerates along a straight
//! line.

use kinetic_core::{Axis, AxisMask, Point, Rect, Size};

/// Rate used for paging snaps, bounce-back and programmatic scrolls (px/ms²)
pub const DECELERATION_RATE_STRONG: f32 = 0.04;

/// Rate used for free coasting after a flick (px/ms²)
pub const DECELERATION_RATE_WEAK: f32 = 0.004;

/// Split `rate` across the axes by each axis's share of `direction`.
///
/// Components are non-negative; a zero direction yields zero on both axes.
pub fn axis_rates(rate: f32, direction: Point) -> Point {
    let length = direction.length();
    if length == 0.0 || !length.is_finite() {
        return Point::ZERO;
    }
    Point::new(
        rate * (direction.x.abs() / length),
        rate * (direction.y.abs() / length),
    )
}

#[inline]
fn clamp_axis(offset: f32, size: f32, content_size: f32) -> f32 {
    let min = (size - content_size).min(0.0);
    offset.min(0.0).max(min)
}

#[inline]
fn page_axis(offset: f32, size: f32) -> f32 {
    if size > 0.0 {
        size * (offset / size).round()
    } else {
        0.0
    }
}

/// Clamp `offset` so the content never reveals space beyond its own bounds.
///
/// Content smaller than the viewport has exactly one valid offset, `0`.
pub fn adjusted_offset(offset: Point, size: Size, content_size: Size) -> Point {
    Point::new(
        clamp_axis(offset.x, size.width, content_size.width),
        clamp_axis(offset.y, size.height, content_size.height),
    )
}

/// Snap each axis to the nearest multiple of the viewport extent
pub fn adjusted_paging_offset(offset: Point, size: Size) -> Point {
    Point::new(
        page_axis(offset.x, size.width),
        page_axis(offset.y, size.height),
    )
}

/// Rest position for `offset`: clamped, then page-snapped when paging
pub fn adjusted_content_offset(
    offset: Point,
    size: Size,
    content_size: Size,
    paging_enabled: bool,
) -> Point {
    let clamped = adjusted_offset(offset, size, content_size);
    if !paging_enabled {
        return clamped;
    }
    adjusted_offset(adjusted_paging_offset(clamped, size), size, content_size)
}

/// Apply the bounce rule to a candidate drag offset.
///
/// Axes where bouncing is disabled are hard-clamped to the content bounds;
/// the others may move past them (the drag end re-targets into bounds).
pub fn adjusted_bounce_offset(
    offset: Point,
    bounce: AxisMask,
    size: Size,
    content_size: Size,
) -> Point {
    let clamped = adjusted_offset(offset, size, content_size);
    Point::new(
        if bounce.x { offset.x } else { clamped.x },
        if bounce.y { offset.y } else { clamped.y },
    )
}

/// Cap a release velocity so the stop distance at `rate` stays within half
/// a viewport on every axis.
pub fn adjusted_velocity(velocity: Point, size: Size, rate: f32) -> Point {
    let rates = axis_rates(rate, velocity);
    let cap = |v: f32, a: f32, extent: f32| {
        if a <= 0.0 {
            return 0.0;
        }
        v.signum() * v.abs().min((a * extent.max(0.0)).sqrt())
    };
    Point::new(
        cap(velocity.x, rates.x, size.width),
        cap(velocity.y, rates.y, size.height),
    )
}

/// Where constant deceleration at `rate` from `(offset, velocity)` comes to
/// rest, re-targeted into bounds.
///
/// An axis whose natural stop falls outside the content bounds is sent to
/// the nearest boundary. Otherwise, with paging enabled, it snaps to the
/// nearest page boundary that is still within bounds.
pub fn deceleration_end_offset(
    offset: Point,
    velocity: Point,
    size: Size,
    content_size: Size,
    paging_enabled: bool,
    rate: f32,
) -> Point {
    let rates = axis_rates(rate, velocity);
    let solve = |axis: Axis| {
        let x = offset.get(axis);
        let v = velocity.get(axis);
        let a = rates.get(axis);
        let extent = size.extent(axis);
        let content = content_size.extent(axis);

        let natural = if a > 0.0 { x + 0.5 * v * v.abs() / a } else { x };
        let bounded = clamp_axis(natural, extent, content);

        if bounded != natural || !paging_enabled {
            bounded
        } else {
            clamp_axis(page_axis(natural, extent), extent, content)
        }
    };
    Point::new(solve(Axis::X), solve(Axis::Y))
}

/// Position and velocity at a point of a trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub offset: Point,
    pub velocity: Point,
}

/// Single-axis trajectory expressed in a frame where the target lies in the
/// positive direction.
#[derive(Debug, Clone, Copy)]
enum AxisProfile {
    /// Already at the target
    Rest,
    /// Uniform braking at `accel` until the target is reached
    Brake {
        speed: f32,
        accel: f32,
        distance: f32,
        duration: f32,
    },
    /// Accelerate toward the target until `peak_time`, then brake at the
    /// same magnitude, stopping exactly on it
    Tent {
        speed: f32,
        accel: f32,
        distance: f32,
        peak_time: f32,
        duration: f32,
    },
}

impl AxisProfile {
    fn solve(accel: f32, offset: f32, velocity: f32, end: f32) -> (AxisProfile, f32) {
        let displacement = end - offset;
        let distance = displacement.abs();
        if distance == 0.0 || accel <= 0.0 || !accel.is_finite() {
            return (AxisProfile::Rest, 1.0);
        }

        let sign = displacement.signum();
        let speed = velocity * sign;

        // Natural stop would overshoot: brake harder to land on the target.
        if speed > 0.0 && speed * speed > 2.0 * accel * distance {
            let brake = speed * speed / (2.0 * distance);
            return (
                AxisProfile::Brake {
                    speed,
                    accel: brake,
                    distance,
                    duration: 2.0 * distance / speed,
                },
                sign,
            );
        }

        let peak_speed = (0.5 * speed * speed + accel * distance).sqrt();
        (
            AxisProfile::Tent {
                speed,
                accel,
                distance,
                peak_time: (peak_speed - speed) / accel,
                duration: (2.0 * peak_speed - speed) / accel,
            },
            sign,
        )
    }

    fn duration(&self) -> f32 {
        match *self {
            AxisProfile::Rest => 0.0,
            AxisProfile::Brake { duration, .. } | AxisProfile::Tent { duration, .. } => duration,
        }
    }

    /// Distance covered and speed toward the target at time `t`.
    /// Only valid for `t < duration`.
    fn at(&self, t: f32) -> (f32, f32) {
        match *self {
            AxisProfile::Rest => (0.0, 0.0),
            AxisProfile::Brake {
                speed,
                accel,
                distance,
                ..
            } => (
                (speed * t - 0.5 * accel * t * t).min(distance),
                speed - accel * t,
            ),
            AxisProfile::Tent {
                speed,
                accel,
                distance,
                peak_time,
                duration,
            } => {
                if t <= peak_time {
                    (speed * t + 0.5 * accel * t * t, speed + accel * t)
                } else {
                    let remaining = duration - t;
                    (distance - 0.5 * accel * remaining * remaining, accel * remaining)
                }
            }
        }
    }
}

fn axis_profiles(rate: f32, offset: Point, velocity: Point, end_offset: Point) -> [(AxisProfile, f32); 2] {
    let rates = axis_rates(rate, end_offset - offset);
    [
        AxisProfile::solve(rates.x, offset.x, velocity.x, end_offset.x),
        AxisProfile::solve(rates.y, offset.y, velocity.y, end_offset.y),
    ]
}

/// Time (ms) for a deceleration from `(offset, velocity)` at `rate` to come
/// to rest on `end_offset`.
pub fn deceleration_duration(rate: f32, offset: Point, velocity: Point, end_offset: Point) -> f32 {
    let [(x, _), (y, _)] = axis_profiles(rate, offset, velocity, end_offset);
    x.duration().max(y.duration())
}

/// Closed-form state `interval` ms into a deceleration toward `end_offset`.
///
/// The deceleration is directed along the offset-to-target vector. Once the
/// solved stop time is reached the result is exactly `end_offset` at rest.
/// An axis with no displacement is treated as already at rest on its target.
pub fn deceleration_at(
    interval: f32,
    rate: f32,
    offset: Point,
    velocity: Point,
    end_offset: Point,
) -> Kinematics {
    let profiles = axis_profiles(rate, offset, velocity, end_offset);
    let axis = |(profile, sign): (AxisProfile, f32), start: f32, end: f32| {
        if interval >= profile.duration() {
            return (end, 0.0);
        }
        let (distance, speed) = profile.at(interval.max(0.0));
        (start + sign * distance, sign * speed)
    };

    let (x, vx) = axis(profiles[0], offset.x, end_offset.x);
    let (y, vy) = axis(profiles[1], offset.y, end_offset.y);
    Kinematics {
        offset: Point::new(x, y),
        velocity: Point::new(vx, vy),
    }
}

/// How a rect is aligned within the viewport on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Leading edges coincide
    Start,
    /// Centers coincide
    Center,
    /// Trailing edges coincide
    End,
    /// Scroll the minimum amount: nothing if fully visible, otherwise the
    /// nearer edge
    #[default]
    Auto,
}

/// Per-axis alignment for [`rect_offset_for_alignment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectAlign {
    pub x: Align,
    pub y: Align,
}

impl From<Align> for RectAlign {
    fn from(align: Align) -> Self {
        Self { x: align, y: align }
    }
}

/// Offset bringing `rect` (content coordinates) into view
pub fn rect_offset_for_alignment(
    rect: Rect,
    align: RectAlign,
    current_offset: Point,
    viewport_size: Size,
) -> Point {
    let solve = |axis: Axis, align: Align| {
        let visible_start = -current_offset.get(axis);
        let visible_extent = viewport_size.extent(axis);
        let start = rect.start(axis);
        let end = rect.end(axis);

        match align {
            Align::Start => -start,
            Align::End => -(end - visible_extent),
            Align::Center => -(0.5 * (start + end) - 0.5 * visible_extent),
            Align::Auto => {
                if start >= visible_start && end <= visible_start + visible_extent {
                    current_offset.get(axis)
                } else if start < visible_start || end - start > visible_extent {
                    -start
                } else {
                    -(end - visible_extent)
                }
            }
        }
    };

    Point::new(solve(Axis::X, align.x), solve(Axis::Y, align.y))
}
