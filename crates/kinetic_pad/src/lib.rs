//! Kinetic Pad
//!
//! Touch and drag driven scrolling with natural deceleration, paging,
//! edge bounce and an infinitely looping carousel.
//!
//! # Example
//!
//! ```
//! use kinetic_animation::{run_until, TimerScheduler};
//! use kinetic_core::{Point, Size};
//! use kinetic_pad::{DragMove, DragStart, Pad, PadConfig};
//!
//! let scheduler = TimerScheduler::shared();
//! let mut pad = Pad::new(PadConfig::paged(), scheduler.clone());
//! pad.set_size(Size::new(750.0, 1000.0));
//! pad.set_content_size(Size::new(3000.0, 1000.0));
//!
//! pad.on_drag_start(DragStart { velocity: Point::new(-1.0, 0.0) });
//! pad.on_drag_move(DragMove { translation: Point::new(-400.0, 0.0), interval: 8.0 });
//! pad.on_drag_end();
//!
//! run_until(&scheduler, 1000.0, |id| {
//!     pad.handle_timer(id);
//! });
//! assert_eq!(pad.content_offset(), Point::new(-750.0, 0.0));
//! ```

pub mod config;
pub mod drag;
pub mod pad;
pub mod player;

pub use config::{PadConfig, PlayerConfig, DEFAULT_AUTOPLAY_INTERVAL_MS};
pub use drag::{DragMove, DragSession, DragStart};
pub use pad::{Motion, Pad, PadState, ScrollTo, ScrollToRect};
pub use player::{loop_adjusted_offset, loop_count_for, playback_offset, LoopState, Player};
