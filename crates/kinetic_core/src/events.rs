//! Pad notifications
//!
//! Every state transition of a scroll pad is reported as one or more
//! [`PadEvent`]s, delivered synchronously and in transition order.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::geometry::{Point, Rect, Size};

/// Notification kind, used as the registration key for handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    DragStart,
    DragEnd,
    DecelerationStart,
    DecelerationEnd,
    Resize,
    ContentResize,
}

/// Full state snapshot carried by scroll/drag/deceleration notifications
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PadSnapshot {
    pub content_offset: Point,
    pub content_velocity: Point,
    pub size: Size,
    pub content_size: Size,
    pub dragging: bool,
    pub decelerating: bool,
}

impl PadSnapshot {
    /// The rectangle of content currently shown by the viewport
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(-self.content_offset, self.size)
    }

    pub fn is_idle(&self) -> bool {
        !self.dragging && !self.decelerating
    }
}

/// A pad notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadEvent {
    Scroll(PadSnapshot),
    DragStart(PadSnapshot),
    DragEnd(PadSnapshot),
    DecelerationStart(PadSnapshot),
    DecelerationEnd(PadSnapshot),
    /// Viewport size changed
    Resize(Size),
    /// Content size changed
    ContentResize(Size),
}

impl PadEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PadEvent::Scroll(_) => EventKind::Scroll,
            PadEvent::DragStart(_) => EventKind::DragStart,
            PadEvent::DragEnd(_) => EventKind::DragEnd,
            PadEvent::DecelerationStart(_) => EventKind::DecelerationStart,
            PadEvent::DecelerationEnd(_) => EventKind::DecelerationEnd,
            PadEvent::Resize(_) => EventKind::Resize,
            PadEvent::ContentResize(_) => EventKind::ContentResize,
        }
    }

    /// Snapshot carried by the event, if any
    pub fn snapshot(&self) -> Option<&PadSnapshot> {
        match self {
            PadEvent::Scroll(s)
            | PadEvent::DragStart(s)
            | PadEvent::DragEnd(s)
            | PadEvent::DecelerationStart(s)
            | PadEvent::DecelerationEnd(s) => Some(s),
            PadEvent::Resize(_) | PadEvent::ContentResize(_) => None,
        }
    }
}

/// Events produced by a single transition, in delivery order
pub type EventBatch = SmallVec<[PadEvent; 4]>;

/// Event handler function type
pub type EventHandler = Box<dyn FnMut(&PadEvent)>;

/// Dispatches pad events to registered handlers
pub struct EventDispatcher {
    handlers: FxHashMap<EventKind, Vec<EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register a handler for an event kind
    pub fn register<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&PadEvent) + 'static,
    {
        self.handlers
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    /// Remove every handler registered for `kind`
    pub fn clear(&mut self, kind: EventKind) {
        self.handlers.remove(&kind);
    }

    /// Dispatch an event to all handlers registered for its kind
    pub fn dispatch(&mut self, event: &PadEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for handler in handlers.iter_mut() {
                handler(event);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
