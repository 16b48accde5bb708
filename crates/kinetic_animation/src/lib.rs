//! Kinetic Motion System
//!
//! Deceleration physics and frame scheduling for kinetic scrolling.
//!
//! # Features
//!
//! - **Motion math**: offset clamping, page snapping, velocity caps and
//!   deceleration end points
//! - **Closed-form trajectories**: position and velocity at any time under
//!   constant deceleration, finishing exactly on the target
//! - **Deterministic scheduling**: frame and timeout timers driven by an
//!   explicit clock

pub mod deceleration;
pub mod motion;
pub mod scheduler;

pub use deceleration::{Deceleration, DecelerationStep};
pub use motion::{
    Align, Kinematics, RectAlign, DECELERATION_RATE_STRONG, DECELERATION_RATE_WEAK,
};
pub use scheduler::{run_until, SchedulerHandle, TimerId, TimerKind, TimerScheduler};
