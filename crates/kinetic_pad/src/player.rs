//! Looping carousel player
//!
//! A [`Player`] drives a paging [`Pad`] whose content is `loop_count`
//! identical replicas of one item laid out along the carousel axis. Whenever
//! the offset drifts out of the central one-item window it is shifted by
//! exactly one item extent, which looks identical because the replicas are.
//! A wrap that would leave the pad resting off a page boundary is skipped, so
//! paged looping needs an item that spans a whole number of pages.
//! An autoplay timer advances one page at a time while the pad is idle and
//! not hovered.

use kinetic_animation::motion::adjusted_content_offset;
use kinetic_animation::{SchedulerHandle, TimerId};
use kinetic_core::{Axis, EventKind, PadEvent, Point, Size};

use crate::config::PlayerConfig;
use crate::drag::{DragMove, DragStart};
use crate::pad::{Motion, Pad, ScrollTo, ScrollToRect};

/// Replication state of the looped item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopState {
    /// Number of item replicas in the content
    pub loop_count: usize,
    /// Accumulated wraps, used to keep replica keys stable across shifts
    pub loop_offset: i64,
}

impl Default for LoopState {
    fn default() -> Self {
        Self {
            loop_count: 1,
            loop_offset: 0,
        }
    }
}

/// Replicas needed so one spare item always sits beyond each viewport edge
pub fn loop_count_for(viewport_extent: f32, item_extent: f32) -> usize {
    if !(viewport_extent > 0.0 && item_extent > 0.0) {
        return 1;
    }
    2 + (viewport_extent / item_extent).floor() as usize
}

/// Shift `offset` back into the central one-item window of the replicated
/// content. Returns the new offset and the wrap delta (`+1` when shifted
/// forward, `-1` when shifted back, `0` when already inside).
pub fn loop_adjusted_offset(
    offset: Point,
    size: Size,
    content_size: Size,
    loop_count: usize,
    axis: Axis,
) -> (Point, i64) {
    if loop_count <= 1 {
        return (offset, 0);
    }
    let content = content_size.extent(axis);
    let viewport = size.extent(axis);
    let item = content / loop_count as f32;
    if !(item > 0.0) {
        return (offset, 0);
    }

    let buffer = 0.5 * (content - viewport - item);
    let max = -buffer;
    let min = -(content - viewport) + buffer;

    let x = offset.get(axis);
    let delta = if x < min {
        1
    } else if x > max {
        -1
    } else {
        0
    };
    if delta == 0 {
        return (offset, 0);
    }
    (offset.with(axis, x + delta as f32 * item), delta)
}

/// Target offset for advancing `delta` pages along `axis`.
///
/// Without looping the target is clamped to the first and last reachable
/// page.
pub fn playback_offset(
    delta: i32,
    offset: Point,
    size: Size,
    content_size: Size,
    paging_enabled: bool,
    loop_count: usize,
    axis: Axis,
) -> Point {
    let page = size.extent(axis);
    let mut x = offset.get(axis) - delta as f32 * page;

    if loop_count <= 1 {
        let mut min = (page - content_size.extent(axis)).min(0.0);
        if paging_enabled && page > 0.0 {
            min = page * (min / page).ceil();
        }
        x = x.min(0.0).max(min);
    }
    offset.with(axis, x)
}

/// Looping, autoplaying carousel on top of a [`Pad`]
pub struct Player {
    config: PlayerConfig,
    pad: Pad,
    scheduler: SchedulerHandle,
    loop_state: LoopState,
    /// Size of one replica, when the player lays out the content itself
    item_size: Option<Size>,
    mouse_entered: bool,
    autoplay: Option<TimerId>,
    disposed: bool,
}

impl Player {
    pub fn new(config: PlayerConfig, scheduler: SchedulerHandle) -> Self {
        let config = config.normalized();
        let mut pad = Pad::new(config.effective_pad(), scheduler.clone());
        pad.enable_journal();

        let mut player = Self {
            config,
            pad,
            scheduler,
            loop_state: LoopState::default(),
            item_size: None,
            mouse_entered: false,
            autoplay: None,
            disposed: false,
        };
        player.start_playing();
        player
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn pad(&self) -> &Pad {
        &self.pad
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    /// Pending autoplay timer, if any
    pub fn autoplay_timer(&self) -> Option<TimerId> {
        self.autoplay
    }

    /// Register a handler for pad notifications
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&PadEvent) + 'static,
    {
        self.pad.on(kind, handler);
    }

    pub fn set_config(&mut self, config: PlayerConfig) {
        let config = config.normalized();
        let previous = std::mem::replace(&mut self.config, config);
        self.pad.set_config(config.effective_pad());

        if previous.loop_enabled != config.loop_enabled || previous.direction != config.direction {
            if !config.loop_enabled {
                self.loop_state = LoopState::default();
            }
            self.update_loop_count();
        }

        if previous.autoplay_enabled != config.autoplay_enabled
            || previous.autoplay_interval != config.autoplay_interval
        {
            if config.autoplay_enabled {
                self.start_playing();
            } else {
                self.stop_playing();
            }
        }
        self.sync();
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn set_size(&mut self, size: Size) {
        self.pad.set_size(size);
        self.sync();
    }

    /// Set the content size directly. Hosts that lay out the replicas
    /// themselves read [`Player::loop_state`] to know how many to render.
    pub fn set_content_size(&mut self, content_size: Size) {
        self.pad.set_content_size(content_size);
        self.sync();
    }

    /// Set the size of one replica and let the player size the content
    pub fn set_item_size(&mut self, item_size: Size) {
        self.item_size = Some(item_size.sanitized());
        self.update_loop_count();
        self.sync();
    }

    fn item_extent(&self) -> f32 {
        let axis = self.config.direction;
        match self.item_size {
            Some(item) => item.extent(axis),
            None => self.pad.content_size().extent(axis) / self.loop_state.loop_count as f32,
        }
    }

    /// Number of pages in one replica
    pub fn page_count(&self) -> usize {
        let page = self.pad.size().extent(self.config.direction);
        let item = self.item_extent();
        if !(page > 0.0 && item > 0.0) {
            return 0;
        }
        (item / page).ceil() as usize
    }

    /// Index of the page currently shown, within one replica
    pub fn active_index(&self) -> usize {
        let count = self.page_count();
        let page = self.pad.size().extent(self.config.direction);
        if count == 0 {
            return 0;
        }
        let current = (-self.pad.content_offset().get(self.config.direction) / page).round() as i64;
        current.rem_euclid(count as i64) as usize
    }

    /// Stable identity for the replica at `index`, unchanged by wraps
    pub fn item_key(&self, index: usize) -> i64 {
        index as i64 + self.loop_state.loop_offset
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn on_drag_start(&mut self, start: DragStart) {
        self.pad.on_drag_start(start);
        self.sync();
    }

    pub fn on_drag_move(&mut self, sample: DragMove) {
        self.pad.on_drag_move(sample);
        self.sync();
    }

    pub fn on_drag_end(&mut self) {
        self.pad.on_drag_end();
        self.sync();
    }

    pub fn on_drag_cancel(&mut self) {
        self.pad.on_drag_cancel();
        self.sync();
    }

    /// Pointer entered the carousel: pause autoplay
    pub fn on_mouse_enter(&mut self) {
        self.mouse_entered = true;
        self.stop_playing();
    }

    pub fn on_mouse_leave(&mut self) {
        self.mouse_entered = false;
        self.start_playing();
    }

    pub fn scroll_to(&mut self, request: ScrollTo) {
        self.pad.scroll_to(request);
        self.sync();
    }

    pub fn scroll_to_rect(&mut self, request: ScrollToRect) {
        self.pad.scroll_to_rect(request);
        self.sync();
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Advance `delta` pages. Ignored unless the pad is idle.
    pub fn go(&mut self, delta: i32, animated: bool) {
        if !self.pad.is_idle() {
            tracing::debug!("ignoring playback while the pad is moving");
            return;
        }
        let s = self.pad.snapshot();
        let offset = playback_offset(
            delta,
            s.content_offset,
            s.size,
            s.content_size,
            self.pad.config().paging_enabled,
            self.loop_state.loop_count,
            self.config.direction,
        );
        self.pad.scroll_to(ScrollTo {
            offset,
            animated,
            carry_motion: false,
        });
        self.sync();
    }

    pub fn rewind(&mut self) {
        self.go(-1, true);
    }

    pub fn forward(&mut self) {
        self.go(1, true);
    }

    /// Show page `index` of the item, moving the shortest way within the
    /// current replica
    pub fn slide_to(&mut self, index: usize, animated: bool) {
        let delta = index as i64 - self.active_index() as i64;
        self.go(delta as i32, animated);
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Handle a fired timer for this player or its pad. Returns false when
    /// the timer belongs to neither.
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.autoplay == Some(id) {
            self.autoplay = None;
            tracing::debug!("autoplay advance");
            self.forward();
            // Nothing moved, so no deceleration end will re-arm the timer
            if self.pad.is_idle() {
                self.start_playing();
            }
            return true;
        }

        let handled = self.pad.handle_timer(id);
        if handled {
            self.sync();
        }
        handled
    }

    fn start_playing(&mut self) {
        if self.disposed || !self.config.autoplay_enabled {
            return;
        }
        if !self.pad.is_idle() || self.mouse_entered {
            return;
        }
        let mut scheduler = self.scheduler.borrow_mut();
        if let Some(id) = self.autoplay.take() {
            scheduler.cancel(id);
        }
        self.autoplay = Some(scheduler.set_timeout(self.config.autoplay_interval));
    }

    fn stop_playing(&mut self) {
        if let Some(id) = self.autoplay.take() {
            match self.scheduler.try_borrow_mut() {
                Ok(mut scheduler) => {
                    scheduler.cancel(id);
                }
                Err(_) => tracing::warn!("scheduler busy, autoplay timer {:?} left pending", id),
            }
        }
    }

    /// Cancel the autoplay timer and dispose the pad
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.stop_playing();
        self.pad.dispose();
        self.disposed = true;
    }

    // =========================================================================
    // Pad observation
    // =========================================================================

    /// React to everything the pad emitted until it settles
    fn sync(&mut self) {
        loop {
            let events = self.pad.take_events();
            if events.is_empty() {
                break;
            }
            for event in &events {
                self.observe(event);
            }
        }
    }

    fn observe(&mut self, event: &PadEvent) {
        match event {
            PadEvent::Scroll(_) => {
                if self.config.loop_enabled {
                    self.renormalize();
                }
            }
            PadEvent::Resize(_) | PadEvent::ContentResize(_) => {
                if self.config.loop_enabled {
                    self.update_loop_count();
                }
            }
            PadEvent::DragStart(_) | PadEvent::DecelerationStart(_) => {
                if self.config.autoplay_enabled {
                    self.stop_playing();
                }
            }
            PadEvent::DragEnd(_) | PadEvent::DecelerationEnd(_) => {
                if self.config.autoplay_enabled {
                    self.start_playing();
                }
            }
        }
    }

    fn update_loop_count(&mut self) {
        let axis = self.config.direction;
        let count = if self.config.loop_enabled {
            loop_count_for(self.pad.size().extent(axis), self.item_extent())
        } else {
            1
        };

        let changed = count != self.loop_state.loop_count;
        if changed {
            tracing::debug!(
                "loop count {} -> {}",
                self.loop_state.loop_count,
                count
            );
            self.loop_state = LoopState {
                loop_count: count,
                loop_offset: 0,
            };
        }

        if let Some(item) = self.item_size {
            let content = item.with_extent(axis, item.extent(axis) * count as f32);
            self.pad.set_content_size(content);
        }
        if !changed {
            self.renormalize();
        }
    }

    fn renormalize(&mut self) {
        let s = self.pad.snapshot();
        let (offset, delta) = loop_adjusted_offset(
            s.content_offset,
            s.size,
            s.content_size,
            self.loop_state.loop_count,
            self.config.direction,
        );
        if delta == 0 {
            return;
        }

        // Moving by one item must keep the pad's rest valid, otherwise paging
        // re-targets it out of the window and the wrap never settles
        let shift = offset - s.content_offset;
        let rest = match self.pad.state().motion {
            Motion::Dragging(_) => None,
            Motion::Idle => Some(offset),
            Motion::Decelerating(d) => Some(d.end_offset + shift),
        };
        if let Some(rest) = rest {
            let paging = self.pad.config().paging_enabled;
            if adjusted_content_offset(rest, s.size, s.content_size, paging) != rest {
                tracing::trace!("skipping loop wrap, ({:.1}, {:.1}) is not a rest", rest.x, rest.y);
                return;
            }
        }

        tracing::debug!(
            "loop wrap {:+} to ({:.1}, {:.1})",
            delta,
            offset.x,
            offset.y
        );
        self.loop_state.loop_offset += delta;
        self.pad
            .scroll_to(ScrollTo::instant(offset).carrying_motion());
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_count() {
        assert_eq!(loop_count_for(750.0, 4500.0), 2);
        assert_eq!(loop_count_for(750.0, 125.0), 8);
        assert_eq!(loop_count_for(750.0, 750.0), 3);
        assert_eq!(loop_count_for(0.0, 4500.0), 1);
        assert_eq!(loop_count_for(750.0, 0.0), 1);
    }

    #[test]
    fn test_loop_window_two_replicas() {
        let size = Size::new(750.0, 400.0);
        let content = Size::new(9000.0, 400.0);

        // Window is [-6375, -1875]
        let inside = Point::new(-6375.0, 0.0);
        assert_eq!(loop_adjusted_offset(inside, size, content, 2, Axis::X), (inside, 0));
        let inside = Point::new(-1875.0, 0.0);
        assert_eq!(loop_adjusted_offset(inside, size, content, 2, Axis::X), (inside, 0));

        assert_eq!(
            loop_adjusted_offset(Point::new(-6400.0, 0.0), size, content, 2, Axis::X),
            (Point::new(-1900.0, 0.0), 1)
        );
        assert_eq!(
            loop_adjusted_offset(Point::new(-750.0, 0.0), size, content, 2, Axis::X),
            (Point::new(-5250.0, 0.0), -1)
        );
    }

    #[test]
    fn test_loop_window_many_replicas_stays_in_bounds() {
        let size = Size::new(750.0, 400.0);
        let content = Size::new(1000.0, 400.0);

        // 8 replicas of 125: bounds [-250, 0], window [-187.5, -62.5]
        let (offset, delta) =
            loop_adjusted_offset(Point::new(-200.0, 0.0), size, content, 8, Axis::X);
        assert_eq!((offset, delta), (Point::new(-75.0, 0.0), 1));

        let (offset, delta) =
            loop_adjusted_offset(Point::new(-10.0, 0.0), size, content, 8, Axis::X);
        assert_eq!((offset, delta), (Point::new(-135.0, 0.0), -1));
    }

    #[test]
    fn test_loop_uses_scroll_axis() {
        let size = Size::new(400.0, 750.0);
        let content = Size::new(400.0, 9000.0);
        let (offset, delta) =
            loop_adjusted_offset(Point::new(0.0, -6400.0), size, content, 2, Axis::Y);
        assert_eq!((offset, delta), (Point::new(0.0, -1900.0), 1));
    }

    #[test]
    fn test_playback_clamps_without_loop() {
        let size = Size::new(750.0, 400.0);
        let content = Size::new(2250.0, 400.0);

        let last = Point::new(-1500.0, 0.0);
        assert_eq!(
            playback_offset(1, last, size, content, true, 1, Axis::X),
            last
        );
        assert_eq!(
            playback_offset(-1, Point::ZERO, size, content, true, 1, Axis::X),
            Point::ZERO
        );
        assert_eq!(
            playback_offset(1, Point::ZERO, size, content, true, 1, Axis::X),
            Point::new(-750.0, 0.0)
        );
    }

    #[test]
    fn test_playback_paging_min_rounds_toward_zero() {
        let size = Size::new(750.0, 400.0);
        let content = Size::new(2000.0, 400.0);
        // Last full page is at -750 even though the content reaches -1250
        assert_eq!(
            playback_offset(5, Point::ZERO, size, content, true, 1, Axis::X),
            Point::new(-750.0, 0.0)
        );
        assert_eq!(
            playback_offset(5, Point::ZERO, size, content, false, 1, Axis::X),
            Point::new(-1250.0, 0.0)
        );
    }

    #[test]
    fn test_playback_looping_does_not_clamp() {
        let size = Size::new(750.0, 400.0);
        let content = Size::new(9000.0, 400.0);
        assert_eq!(
            playback_offset(-1, Point::new(-1875.0, 0.0), size, content, true, 2, Axis::X),
            Point::new(-1125.0, 0.0)
        );
    }
}
