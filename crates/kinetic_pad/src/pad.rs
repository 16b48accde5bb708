//! Kinetic scroll pad
//!
//! A [`Pad`] owns the scroll state of one viewport: its size, its content
//! size, the content offset and velocity, and what is currently moving it.
//! The pad is always in exactly one motion phase:
//!
//! ```text
//!            drag start              drag end (target != offset)
//!   Idle ──────────────► Dragging ─────────────────────────────► Decelerating
//!    ▲  ◄────────────────────┘  drag end (target == offset)           │
//!    │                                                                │
//!    └──────────────────────── reached target ◄───────────────────────┘
//! ```
//!
//! Every change goes through a single commit step that diffs the previous
//! and next state and emits [`PadEvent`]s in a fixed order: scroll, content
//! resize, resize, phase ends, phase starts. After each commit an idle pad
//! whose offset is not a valid rest position starts a strong deceleration
//! toward the nearest valid one.
//!
//! Deceleration advances on animation frames requested from the shared
//! [`TimerScheduler`](kinetic_animation::TimerScheduler). The host routes
//! fired timers back through [`Pad::handle_timer`].

use kinetic_animation::motion::{
    adjusted_bounce_offset, adjusted_content_offset, adjusted_offset, adjusted_velocity,
    deceleration_end_offset, rect_offset_for_alignment,
};
use kinetic_animation::{
    Deceleration, DecelerationStep, RectAlign, SchedulerHandle, TimerId,
    DECELERATION_RATE_STRONG, DECELERATION_RATE_WEAK,
};
use kinetic_core::{EventBatch, EventDispatcher, EventKind, PadEvent, PadSnapshot, Point, Rect, Size};

use crate::config::PadConfig;
use crate::drag::{DragMove, DragSession, DragStart};

/// What is currently moving the content
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Motion {
    #[default]
    Idle,
    /// Following the pointer
    Dragging(DragSession),
    /// Coasting toward a rest position
    Decelerating(Deceleration),
}

/// Complete scroll state of a pad
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PadState {
    pub content_offset: Point,
    pub content_velocity: Point,
    pub size: Size,
    pub content_size: Size,
    pub motion: Motion,
}

impl PadState {
    pub fn is_dragging(&self) -> bool {
        matches!(self.motion, Motion::Dragging(_))
    }

    pub fn is_decelerating(&self) -> bool {
        matches!(self.motion, Motion::Decelerating(_))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.motion, Motion::Idle)
    }

    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(-self.content_offset, self.size)
    }

    pub fn snapshot(&self) -> PadSnapshot {
        PadSnapshot {
            content_offset: self.content_offset,
            content_velocity: self.content_velocity,
            size: self.size,
            content_size: self.content_size,
            dragging: self.is_dragging(),
            decelerating: self.is_decelerating(),
        }
    }
}

/// Programmatic scroll request
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollTo {
    pub offset: Point,
    /// Decelerate to the target instead of jumping
    pub animated: bool,
    /// When jumping during a deceleration, shift the live trajectory by the
    /// same amount instead of cancelling it
    pub carry_motion: bool,
}

impl ScrollTo {
    pub fn animated(offset: Point) -> Self {
        Self {
            offset,
            animated: true,
            carry_motion: false,
        }
    }

    pub fn instant(offset: Point) -> Self {
        Self {
            offset,
            animated: false,
            carry_motion: false,
        }
    }

    pub fn carrying_motion(mut self) -> Self {
        self.carry_motion = true;
        self
    }
}

/// Request to bring a content rect into view
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollToRect {
    pub rect: Rect,
    pub align: RectAlign,
    pub animated: bool,
}

/// Diff two states into the notifications they imply, in delivery order
fn transition_events(prev: &PadState, next: &PadState) -> EventBatch {
    let mut events = EventBatch::new();
    let snapshot = next.snapshot();

    if prev.content_offset != next.content_offset
        || prev.content_velocity != next.content_velocity
    {
        events.push(PadEvent::Scroll(snapshot));
    }
    if prev.content_size != next.content_size {
        events.push(PadEvent::ContentResize(next.content_size));
    }
    if prev.size != next.size {
        events.push(PadEvent::Resize(next.size));
    }

    if prev.is_dragging() && !next.is_dragging() {
        events.push(PadEvent::DragEnd(snapshot));
    }
    if prev.is_decelerating() && !next.is_decelerating() {
        events.push(PadEvent::DecelerationEnd(snapshot));
    }
    if !prev.is_dragging() && next.is_dragging() {
        events.push(PadEvent::DragStart(snapshot));
    }
    if !prev.is_decelerating() && next.is_decelerating() {
        events.push(PadEvent::DecelerationStart(snapshot));
    }

    events
}

/// A kinetic scroll pad
pub struct Pad {
    config: PadConfig,
    state: PadState,
    scheduler: SchedulerHandle,
    /// Pending animation frame while decelerating
    frame: Option<TimerId>,
    dispatcher: EventDispatcher,
    /// Copy of every emitted event, kept for an owning controller
    journal: Option<Vec<PadEvent>>,
    disposed: bool,
}

impl Pad {
    pub fn new(config: PadConfig, scheduler: SchedulerHandle) -> Self {
        Self {
            config,
            state: PadState::default(),
            scheduler,
            frame: None,
            dispatcher: EventDispatcher::new(),
            journal: None,
            disposed: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn state(&self) -> &PadState {
        &self.state
    }

    pub fn snapshot(&self) -> PadSnapshot {
        self.state.snapshot()
    }

    pub fn size(&self) -> Size {
        self.state.size
    }

    pub fn content_size(&self) -> Size {
        self.state.content_size
    }

    pub fn content_offset(&self) -> Point {
        self.state.content_offset
    }

    pub fn content_velocity(&self) -> Point {
        self.state.content_velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn is_decelerating(&self) -> bool {
        self.state.is_decelerating()
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    /// Rectangle of content shown by the viewport
    pub fn visible_rect(&self) -> Rect {
        self.state.visible_rect()
    }

    /// Animation frame the pad is waiting on, if any
    pub fn pending_frame(&self) -> Option<TimerId> {
        self.frame
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Register a handler for one kind of notification
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&PadEvent) + 'static,
    {
        self.dispatcher.register(kind, handler);
    }

    /// Start recording emitted events for [`Pad::take_events`]
    pub fn enable_journal(&mut self) {
        if self.journal.is_none() {
            self.journal = Some(Vec::new());
        }
    }

    /// Drain the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<PadEvent> {
        self.journal.as_mut().map(std::mem::take).unwrap_or_default()
    }

    // =========================================================================
    // Geometry and configuration
    // =========================================================================

    /// Set the viewport size. Negative or non-finite dimensions become zero.
    pub fn set_size(&mut self, size: Size) {
        let size = size.sanitized();
        if size == self.state.size {
            return;
        }
        self.commit(PadState { size, ..self.state });
    }

    /// Set the content size. Negative or non-finite dimensions become zero.
    pub fn set_content_size(&mut self, content_size: Size) {
        let content_size = content_size.sanitized();
        if content_size == self.state.content_size {
            return;
        }
        self.commit(PadState {
            content_size,
            ..self.state
        });
    }

    pub fn set_config(&mut self, config: PadConfig) {
        let previous = std::mem::replace(&mut self.config, config);

        if previous.scroll_enabled && !config.scroll_enabled && self.is_dragging() {
            tracing::debug!("scrolling disabled mid-drag, cancelling drag");
            self.on_drag_cancel();
        }
        if previous.paging_enabled != config.paging_enabled {
            self.adjust_content_offset_if_needed();
        }
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    pub fn on_drag_start(&mut self, start: DragStart) {
        if self.disposed || !self.config.scroll_enabled {
            return;
        }
        let velocity = start.velocity.sanitized();
        let session = DragSession::begin(
            self.state.content_offset,
            velocity,
            self.config.directional_lock_enabled,
        );
        tracing::debug!(
            "drag start at ({:.1}, {:.1}) direction={:?}",
            session.start_offset.x,
            session.start_offset.y,
            session.direction
        );

        self.commit(PadState {
            content_velocity: session.direction.apply(velocity),
            motion: Motion::Dragging(session),
            ..self.state
        });
    }

    pub fn on_drag_move(&mut self, sample: DragMove) {
        let Motion::Dragging(session) = self.state.motion else {
            return;
        };
        let (content_offset, content_velocity) = session.track(
            sample,
            self.state.content_offset,
            self.state.content_velocity,
            self.config.bounce(),
            self.state.size,
            self.state.content_size,
        );
        tracing::trace!(
            "drag move offset=({:.1}, {:.1}) velocity=({:.3}, {:.3})",
            content_offset.x,
            content_offset.y,
            content_velocity.x,
            content_velocity.y
        );

        self.commit(PadState {
            content_offset,
            content_velocity,
            ..self.state
        });
    }

    /// Release the drag and coast to a rest position
    pub fn on_drag_end(&mut self) {
        if !self.is_dragging() {
            return;
        }
        let s = self.state;
        let velocity = adjusted_velocity(s.content_velocity, s.size, DECELERATION_RATE_STRONG);
        let in_bounds = adjusted_offset(s.content_offset, s.size, s.content_size) == s.content_offset;
        let rate = if self.config.paging_enabled || !in_bounds {
            DECELERATION_RATE_STRONG
        } else {
            DECELERATION_RATE_WEAK
        };
        let end = deceleration_end_offset(
            s.content_offset,
            velocity,
            s.size,
            s.content_size,
            self.config.paging_enabled,
            rate,
        );
        tracing::debug!(
            "drag end velocity=({:.3}, {:.3}) target=({:.1}, {:.1})",
            velocity.x,
            velocity.y,
            end.x,
            end.y
        );

        let base = PadState {
            content_velocity: velocity,
            motion: Motion::Idle,
            ..s
        };
        let next = self.decelerating(base, end, rate);
        self.commit(next);
    }

    /// Abandon the drag and return to the rest position nearest to where it
    /// started
    pub fn on_drag_cancel(&mut self) {
        let Motion::Dragging(session) = self.state.motion else {
            return;
        };
        let s = self.state;
        let end = adjusted_content_offset(
            session.start_offset,
            s.size,
            s.content_size,
            self.config.paging_enabled,
        );
        tracing::debug!("drag cancelled");

        let base = PadState {
            motion: Motion::Idle,
            ..s
        };
        let next = self.decelerating(base, end, DECELERATION_RATE_STRONG);
        self.commit(next);
    }

    // =========================================================================
    // Programmatic scrolling
    // =========================================================================

    pub fn scroll_to(&mut self, request: ScrollTo) {
        if self.disposed {
            return;
        }
        let offset = request.offset.sanitized();
        let s = self.state;

        if request.animated {
            if self.is_dragging() {
                tracing::debug!("ignoring animated scroll while dragging");
                return;
            }
            let end = adjusted_content_offset(
                offset,
                s.size,
                s.content_size,
                self.config.paging_enabled,
            );
            if s.is_idle() && end == s.content_offset {
                return;
            }
            let next = self.decelerating(s, end, DECELERATION_RATE_STRONG);
            self.commit(next);
            return;
        }

        let next = match s.motion {
            Motion::Dragging(session) => {
                // Keep following the pointer from the new position
                let content_offset =
                    adjusted_bounce_offset(offset, self.config.bounce(), s.size, s.content_size);
                let delta = content_offset - s.content_offset;
                PadState {
                    content_offset,
                    motion: Motion::Dragging(session.rebased(delta)),
                    ..s
                }
            }
            Motion::Decelerating(deceleration) if request.carry_motion => {
                let delta = offset - s.content_offset;
                PadState {
                    content_offset: offset,
                    motion: Motion::Decelerating(deceleration.translated(delta)),
                    ..s
                }
            }
            _ => PadState {
                content_offset: adjusted_offset(offset, s.size, s.content_size),
                content_velocity: Point::ZERO,
                motion: Motion::Idle,
                ..s
            },
        };
        self.commit(next);
    }

    /// Scroll so `rect` (content coordinates) is aligned in the viewport
    pub fn scroll_to_rect(&mut self, request: ScrollToRect) {
        let offset = rect_offset_for_alignment(
            request.rect,
            request.align,
            self.state.content_offset,
            self.state.size,
        );
        self.scroll_to(ScrollTo {
            offset,
            animated: request.animated,
            carry_motion: false,
        });
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Handle a fired timer. Returns false when the timer is not this pad's.
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.frame != Some(id) {
            return false;
        }
        self.frame = None;
        self.advance_deceleration();
        true
    }

    fn advance_deceleration(&mut self) {
        let Motion::Decelerating(deceleration) = self.state.motion else {
            return;
        };
        let now = self.scheduler.borrow().now();

        let next = match deceleration.step(now) {
            DecelerationStep::Moving(k) => PadState {
                content_offset: k.offset,
                content_velocity: k.velocity,
                ..self.state
            },
            DecelerationStep::Finished(end) => {
                tracing::debug!("deceleration finished at ({:.1}, {:.1})", end.x, end.y);
                PadState {
                    content_offset: end,
                    content_velocity: Point::ZERO,
                    motion: Motion::Idle,
                    ..self.state
                }
            }
        };
        self.commit(next);
    }

    /// Cancel the pending frame and stop emitting events
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(id) = self.frame.take() {
            match self.scheduler.try_borrow_mut() {
                Ok(mut scheduler) => {
                    scheduler.cancel(id);
                }
                Err(_) => tracing::warn!("scheduler busy, frame {:?} left pending on dispose", id),
            }
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // =========================================================================
    // State transitions
    // =========================================================================

    /// `base` set decelerating toward `end`, or idle at `end` when there is
    /// nowhere to go
    fn decelerating(&self, base: PadState, end: Point, rate: f32) -> PadState {
        if base.content_offset == end {
            return PadState {
                content_velocity: Point::ZERO,
                motion: Motion::Idle,
                ..base
            };
        }
        let now = self.scheduler.borrow().now();
        PadState {
            motion: Motion::Decelerating(Deceleration::new(
                now,
                base.content_offset,
                base.content_velocity,
                end,
                rate,
            )),
            ..base
        }
    }

    fn commit(&mut self, next: PadState) {
        if self.disposed {
            return;
        }
        let prev = std::mem::replace(&mut self.state, next);

        for event in transition_events(&prev, &next) {
            if let Some(journal) = self.journal.as_mut() {
                journal.push(event);
            }
            self.dispatcher.dispatch(&event);
        }

        self.sync_frame(&prev.motion);
        self.adjust_content_offset_if_needed();
    }

    /// Keep exactly one frame pending while decelerating
    fn sync_frame(&mut self, prev: &Motion) {
        match self.state.motion {
            Motion::Decelerating(current) => {
                let superseded = !matches!(prev, Motion::Decelerating(d) if *d == current);
                if superseded {
                    self.cancel_frame();
                }
                if self.frame.is_none() {
                    self.frame = Some(self.scheduler.borrow_mut().request_frame());
                }
            }
            _ => self.cancel_frame(),
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.frame.take() {
            self.scheduler.borrow_mut().cancel(id);
        }
    }

    /// Send an idle pad resting on an invalid offset, or a deceleration
    /// heading to one, toward the nearest valid rest position
    fn adjust_content_offset_if_needed(&mut self) {
        let s = self.state;
        let paging = self.config.paging_enabled;

        let end = match s.motion {
            Motion::Dragging(_) => return,
            Motion::Idle => {
                let end = adjusted_content_offset(s.content_offset, s.size, s.content_size, paging);
                if end == s.content_offset {
                    return;
                }
                end
            }
            Motion::Decelerating(deceleration) => {
                let valid =
                    adjusted_content_offset(deceleration.end_offset, s.size, s.content_size, paging);
                if valid == deceleration.end_offset {
                    return;
                }
                let end = if deceleration.rate == DECELERATION_RATE_STRONG {
                    deceleration.end_offset
                } else {
                    deceleration_end_offset(
                        s.content_offset,
                        s.content_velocity,
                        s.size,
                        s.content_size,
                        paging,
                        DECELERATION_RATE_STRONG,
                    )
                };
                adjusted_content_offset(end, s.size, s.content_size, paging)
            }
        };

        tracing::debug!(
            "re-targeting to valid offset ({:.1}, {:.1})",
            end.x,
            end.y
        );
        let next = self.decelerating(s, end, DECELERATION_RATE_STRONG);
        self.commit(next);
    }
}

impl Drop for Pad {
    fn drop(&mut self) {
        self.dispose();
    }
}
