//! Kinetic Core
//!
//! Foundational types shared by the kinetic scrolling crates:
//!
//! - **Geometry**: points, sizes, rects and axis selection
//! - **Events**: pad notifications and their dispatcher
//! - **Errors**: configuration error types

pub mod error;
pub mod events;
pub mod geometry;

pub use error::{ConfigError, Result};
pub use events::{EventBatch, EventDispatcher, EventHandler, EventKind, PadEvent, PadSnapshot};
pub use geometry::{Axis, AxisMask, Point, Rect, Size};
