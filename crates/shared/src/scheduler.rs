//! Frame scheduling: coalesce any number of requests into one callback per
//! display tick.
//!
//! The display refresh primitive sits behind [`FrameClock`], so the scheduler
//! runs the same against `requestAnimationFrame` in the browser and against
//! [`ManualClock`] in tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Source of display ticks.
///
/// `request` must never run the callback synchronously. Dropping the returned
/// handle cancels the callback if it has not fired yet.
pub trait FrameClock {
    type Handle: 'static;

    fn request(&self, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// At most one pending frame at a time.
pub struct FrameScheduler<C: FrameClock> {
    clock: C,
    pending: Rc<RefCell<Option<C::Handle>>>,
}

impl<C: FrameClock> FrameScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Schedule `render` for the next tick. If a frame is already pending the
    /// call is dropped; the pending frame reads whatever state is current when
    /// it fires. Returns whether a new frame was scheduled.
    pub fn request_frame(&self, render: impl FnOnce() + 'static) -> bool {
        if self.pending.borrow().is_some() {
            return false;
        }
        let pending = Rc::clone(&self.pending);
        let handle = self.clock.request(Box::new(move || {
            // Clear first so `render` may schedule the next frame.
            pending.borrow_mut().take();
            render();
        }));
        *self.pending.borrow_mut() = Some(handle);
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Drop the pending frame, if any, without running it.
    pub fn cancel(&self) {
        let handle = self.pending.borrow_mut().take();
        drop(handle);
    }
}

impl<C: FrameClock> Drop for FrameScheduler<C> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<C: FrameClock> std::fmt::Debug for FrameScheduler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("pending", &self.is_pending())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Manual clock
// ---------------------------------------------------------------------------

struct QueuedFrame {
    cancelled: Rc<Cell<bool>>,
    callback: Box<dyn FnOnce()>,
}

/// Deterministic clock: frames run only when [`ManualClock::tick`] is called.
#[derive(Clone, Default)]
pub struct ManualClock {
    queue: Rc<RefCell<Vec<QueuedFrame>>>,
    ticks: Rc<Cell<u64>>,
}

/// Handle for a frame queued on a [`ManualClock`].
#[derive(Debug)]
pub struct ManualFrame {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualFrame {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every frame queued before this call. Frames requested from inside a
    /// callback wait for the next tick. Returns how many callbacks ran.
    pub fn tick(&self) -> usize {
        self.ticks.set(self.ticks.get() + 1);
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let mut ran = 0;
        for frame in due {
            if frame.cancelled.get() {
                continue;
            }
            (frame.callback)();
            ran += 1;
        }
        ran
    }

    /// Frames still waiting to run.
    pub fn queued(&self) -> usize {
        self.queue
            .borrow()
            .iter()
            .filter(|f| !f.cancelled.get())
            .count()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }
}

impl FrameClock for ManualClock {
    type Handle = ManualFrame;

    fn request(&self, callback: Box<dyn FnOnce()>) -> ManualFrame {
        let cancelled = Rc::new(Cell::new(false));
        self.queue.borrow_mut().push(QueuedFrame {
            cancelled: Rc::clone(&cancelled),
            callback,
        });
        ManualFrame { cancelled }
    }
}

impl std::fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualClock")
            .field("queued", &self.queued())
            .field("ticks", &self.ticks())
            .finish()
    }
}
