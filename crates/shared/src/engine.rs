use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{PanBoundary, ViewportState, VisibleSize};
use crate::scheduler::{FrameClock, FrameScheduler};
use crate::viewport::{Phase, ViewportController, ViewportGeometry, ViewportInput};

/// Controller wired to a frame scheduler.
///
/// Operations mutate the target state synchronously; the committed state is
/// published to `on_commit` at most once per tick, carrying the net effect of
/// everything that happened since the previous frame.
pub struct ViewportEngine<C: FrameClock> {
    controller: Rc<RefCell<ViewportController>>,
    scheduler: FrameScheduler<C>,
    on_commit: Rc<dyn Fn(ViewportState)>,
}

impl<C: FrameClock> ViewportEngine<C> {
    pub fn new(
        controller: ViewportController,
        clock: C,
        on_commit: impl Fn(ViewportState) + 'static,
    ) -> Self {
        Self {
            controller: Rc::new(RefCell::new(controller)),
            scheduler: FrameScheduler::new(clock),
            on_commit: Rc::new(on_commit),
        }
    }

    pub fn dispatch(&self, input: ViewportInput) -> bool {
        let changed = self.controller.borrow_mut().dispatch(input);
        if changed {
            self.request_commit();
        }
        changed
    }

    pub fn zoom_in(&self) -> bool {
        self.dispatch(ViewportInput::ZoomIn)
    }

    pub fn zoom_out(&self) -> bool {
        self.dispatch(ViewportInput::ZoomOut)
    }

    pub fn reset(&self) -> bool {
        self.dispatch(ViewportInput::Reset)
    }

    pub fn rotate(&self) -> bool {
        self.dispatch(ViewportInput::Rotate)
    }

    pub fn drag_by(&self, dx: f64, dy: f64) -> bool {
        self.dispatch(ViewportInput::DragBy { dx, dy })
    }

    /// Re-initialise for a new visible size.
    pub fn resize(&self, visible: VisibleSize) -> bool {
        let changed = self.controller.borrow_mut().on_resize(visible);
        if changed {
            self.request_commit();
        }
        changed
    }

    pub fn phase(&self) -> Phase {
        self.controller.borrow().phase()
    }

    pub fn target(&self) -> ViewportState {
        self.controller.borrow().target()
    }

    pub fn committed(&self) -> ViewportState {
        self.controller.borrow().committed()
    }

    pub fn geometry(&self) -> Option<ViewportGeometry> {
        self.controller.borrow().geometry()
    }

    pub fn boundaries(&self) -> Option<PanBoundary> {
        self.controller.borrow().boundaries()
    }

    pub fn frame_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Cancel the pending frame so nothing fires against a disposed view.
    pub fn teardown(&self) {
        self.scheduler.cancel();
    }

    fn request_commit(&self) {
        let controller = Rc::clone(&self.controller);
        let on_commit = Rc::clone(&self.on_commit);
        self.scheduler.request_frame(move || {
            let state = controller.borrow_mut().commit();
            on_commit(state);
        });
    }
}

impl<C: FrameClock> std::fmt::Debug for ViewportEngine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportEngine")
            .field("controller", &self.controller.borrow())
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ViewportConfig, MAP_CONTENT};
    use crate::scheduler::ManualClock;

    fn engine() -> (ViewportEngine<ManualClock>, ManualClock, Rc<RefCell<Vec<ViewportState>>>) {
        let clock = ManualClock::new();
        let renders = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&renders);
        let engine = ViewportEngine::new(
            ViewportController::new(MAP_CONTENT, ViewportConfig::default()),
            clock.clone(),
            move |state| sink.borrow_mut().push(state),
        );
        (engine, clock, renders)
    }

    #[test]
    fn test_many_mutations_one_render() {
        let (engine, clock, renders) = engine();
        engine.resize(VisibleSize::new(800.0, 600.0));
        engine.zoom_in();
        engine.zoom_in();
        engine.drag_by(12.0, -7.0);
        engine.rotate();

        assert_eq!(clock.tick(), 1);
        let renders = renders.borrow();
        assert_eq!(renders.len(), 1);
        assert_eq!(renders[0], engine.target());
        assert_eq!(engine.committed(), engine.target());
    }

    #[test]
    fn test_noop_does_not_schedule() {
        let (engine, clock, renders) = engine();
        engine.resize(VisibleSize::new(800.0, 600.0));
        clock.tick();
        assert!(!engine.zoom_out());
        assert!(!engine.drag_by(0.0, 0.0));
        assert!(!engine.frame_pending());
        assert_eq!(clock.tick(), 0);
        assert_eq!(renders.borrow().len(), 1);
    }

    #[test]
    fn test_committed_lags_target_until_tick() {
        let (engine, clock, _renders) = engine();
        engine.resize(VisibleSize::new(800.0, 600.0));
        clock.tick();
        let before = engine.committed();
        engine.zoom_in();
        assert_eq!(engine.committed(), before);
        assert_ne!(engine.target(), before);
        clock.tick();
        assert_eq!(engine.committed(), engine.target());
    }

    #[test]
    fn test_teardown_cancels_pending_commit() {
        let (engine, clock, renders) = engine();
        engine.resize(VisibleSize::new(800.0, 600.0));
        engine.teardown();
        assert_eq!(clock.tick(), 0);
        assert!(renders.borrow().is_empty());
    }

    #[test]
    fn test_initializing_engine_ignores_operations() {
        let (engine, clock, renders) = engine();
        assert_eq!(engine.phase(), Phase::Initializing);
        assert!(!engine.zoom_in());
        assert!(!engine.rotate());
        assert_eq!(clock.tick(), 0);
        assert!(renders.borrow().is_empty());
    }
}
