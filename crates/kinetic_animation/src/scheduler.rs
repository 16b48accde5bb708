//! Timer scheduler
//!
//! Owns the clock and every pending animation-frame and timeout callback of
//! the pads sharing it. Timers are identified by [`TimerId`]; firing is
//! driven explicitly by the host through [`run_until`], so tests can replace
//! real time with a deterministic clock.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TimerId;
}

/// Frame interval at 60 fps, in milliseconds
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Next animation frame
    Frame,
    /// One-shot delayed callback
    Timeout,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: f64,
    kind: TimerKind,
    /// Insertion sequence, breaks ties between timers due at the same time
    seq: u64,
}

/// The scheduler shared by pads and players
pub struct TimerScheduler {
    timers: SlotMap<TimerId, Timer>,
    now: f64,
    next_seq: u64,
}

/// Shared handle to a scheduler
pub type SchedulerHandle = Rc<RefCell<TimerScheduler>>;

impl TimerScheduler {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now: 0.0,
            next_seq: 0,
        }
    }

    /// Create a scheduler wrapped in a shareable handle
    pub fn shared() -> SchedulerHandle {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Current clock time in milliseconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock forward. The clock never runs backwards.
    pub fn set_now(&mut self, now: f64) {
        if now > self.now {
            self.now = now;
        }
    }

    fn insert(&mut self, due: f64, kind: TimerKind) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Timer { due, kind, seq })
    }

    /// Schedule a callback for the next animation frame
    pub fn request_frame(&mut self) -> TimerId {
        self.insert(self.now + FRAME_INTERVAL_MS, TimerKind::Frame)
    }

    /// Schedule a one-shot callback `delay_ms` from now
    pub fn set_timeout(&mut self, delay_ms: f64) -> TimerId {
        let delay = if delay_ms.is_finite() { delay_ms.max(0.0) } else { 0.0 };
        self.insert(self.now + delay, TimerKind::Timeout)
    }

    /// Cancel a pending timer. Cancelling a fired or unknown timer is a no-op.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Kind of a pending timer
    pub fn kind(&self, id: TimerId) -> Option<TimerKind> {
        self.timers.get(id).map(|t| t.kind)
    }

    /// Due time of a pending timer
    pub fn due(&self, id: TimerId) -> Option<f64> {
        self.timers.get(id).map(|t| t.due)
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// advancing the clock to its due time.
    pub fn pop_due(&mut self, until: f64) -> Option<TimerId> {
        let (id, timer) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(id, t)| (id, *t))?;

        self.timers.remove(id);
        self.set_now(timer.due);
        Some(id)
    }

    /// Number of pending timers
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Check if any timers are pending
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Fire every timer due up to `until` in due order, then set the clock to
/// `until`. Timers scheduled by `fire` are honoured if they also fall due
/// before `until`.
///
/// The scheduler is not borrowed while `fire` runs, so callbacks may
/// schedule or cancel timers.
pub fn run_until(handle: &SchedulerHandle, until: f64, mut fire: impl FnMut(TimerId)) {
    loop {
        let next = handle.borrow_mut().pop_due(until);
        match next {
            Some(id) => fire(id),
            None => break,
        }
    }
    handle.borrow_mut().set_now(until);
}
