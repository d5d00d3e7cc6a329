//! Visible-area reporting.
//!
//! Hosts that expose a fine-grained visual viewport (which also tracks mobile
//! toolbars showing and hiding) report that; others fall back to the window's
//! inner size. Both paths produce the same [`VisibleSize`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::models::VisibleSize;

/// Which signal produced a size sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSource {
    VisualViewport,
    Window,
}

/// Prefer the visual viewport when present.
pub fn resolve_visible_size(
    visual_viewport: Option<(f64, f64)>,
    window_inner: (f64, f64),
) -> (VisibleSize, SizeSource) {
    match visual_viewport {
        Some((w, h)) => (VisibleSize::new(w, h), SizeSource::VisualViewport),
        None => (
            VisibleSize::new(window_inner.0, window_inner.1),
            SizeSource::Window,
        ),
    }
}

/// Drops samples equal to the last one passed on. Scroll and toolbar events
/// fire without the visible size changing, and each accepted sample resets the
/// viewport.
#[derive(Debug, Default)]
pub struct SizeChangeFilter {
    last: Cell<Option<VisibleSize>>,
}

impl SizeChangeFilter {
    /// Start from a size the receiver already knows about.
    pub fn seeded(size: VisibleSize) -> Self {
        Self {
            last: Cell::new(Some(size)),
        }
    }

    /// Whether `size` differs from the last accepted sample. Records it if so.
    pub fn accept(&self, size: VisibleSize) -> bool {
        if self.last.get() == Some(size) {
            return false;
        }
        self.last.set(Some(size));
        true
    }
}

/// Reports the current visible area and pushes changes.
pub trait ViewportSizeProvider {
    /// Keeps the listener registered; dropping it unsubscribes.
    type Subscription;

    fn current_size(&self) -> VisibleSize;

    fn on_change(&self, callback: Box<dyn Fn(VisibleSize)>) -> Self::Subscription;
}

type Listeners = RefCell<Vec<(u64, Rc<dyn Fn(VisibleSize)>)>>;

/// Provider whose size is set by hand. Used by tests and by hosts without a
/// window (the size is then pushed from outside).
#[derive(Clone)]
pub struct ManualSizeProvider {
    size: Rc<Cell<VisibleSize>>,
    listeners: Rc<Listeners>,
    next_id: Rc<Cell<u64>>,
}

pub struct ManualSubscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Drop for ManualSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl ManualSizeProvider {
    pub fn new(size: VisibleSize) -> Self {
        Self {
            size: Rc::new(Cell::new(size)),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Change the size and notify subscribers. Unchanged sizes are not pushed.
    pub fn set_size(&self, size: VisibleSize) {
        if self.size.get() == size {
            return;
        }
        self.size.set(size);
        // Snapshot so callbacks may (un)subscribe.
        let callbacks: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for cb in callbacks {
            cb(size);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ViewportSizeProvider for ManualSizeProvider {
    type Subscription = ManualSubscription;

    fn current_size(&self) -> VisibleSize {
        self.size.get()
    }

    fn on_change(&self, callback: Box<dyn Fn(VisibleSize)>) -> ManualSubscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::from(callback)));
        ManualSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }
}

impl std::fmt::Debug for ManualSizeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualSizeProvider")
            .field("size", &self.size.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
