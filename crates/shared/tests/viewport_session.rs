use std::cell::RefCell;
use std::rc::Rc;

use pinmap_shared::config::{ReadinessConfig, ViewportConfig, MAP_CONTENT};
use pinmap_shared::engine::ViewportEngine;
use pinmap_shared::gesture::{GestureAdapter, PointerInput, SiblingSignal};
use pinmap_shared::models::{ViewportState, VisibleSize};
use pinmap_shared::readiness::ReadinessGate;
use pinmap_shared::scheduler::{FrameScheduler, ManualClock};
use pinmap_shared::size::{ManualSizeProvider, ViewportSizeProvider};
use pinmap_shared::viewport::{Phase, ViewportController};

const EPS: f64 = 1e-6;

struct Session {
    clock: ManualClock,
    provider: ManualSizeProvider,
    engine: Rc<ViewportEngine<ManualClock>>,
    renders: Rc<RefCell<Vec<ViewportState>>>,
}

fn session(width: f64, height: f64) -> Session {
    let clock = ManualClock::new();
    let renders = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&renders);
    let engine = Rc::new(ViewportEngine::new(
        ViewportController::new(MAP_CONTENT, ViewportConfig::default()),
        clock.clone(),
        move |state| sink.borrow_mut().push(state),
    ));
    let provider = ManualSizeProvider::new(VisibleSize::new(width, height));
    engine.resize(provider.current_size());
    Session {
        clock,
        provider,
        engine,
        renders,
    }
}

fn assert_in_bounds(engine: &ViewportEngine<ManualClock>) {
    let state = engine.target();
    let b = engine.boundaries().unwrap();
    assert!(b.contains(state.pan_x, state.pan_y), "{state:?} outside {b:?}");
}

#[test]
fn test_full_session() {
    let s = session(800.0, 600.0);
    assert_eq!(s.engine.phase(), Phase::Ready);
    assert_eq!(s.clock.tick(), 1);
    let floor = 800.0 / 731.0;
    assert!((s.renders.borrow()[0].scale - floor).abs() < EPS);

    // Drag at the floor: x is locked, y moves up to the edge.
    let mut gestures = GestureAdapter::new();
    for input in [
        PointerInput::MouseDown { x: 400.0, y: 300.0 },
        PointerInput::MouseMove { x: 450.0, y: 320.0 },
        PointerInput::MouseMove { x: 500.0, y: 400.0 },
        PointerInput::MouseUp,
    ] {
        if let Some(op) = gestures.handle(input) {
            s.engine.dispatch(op);
        }
    }
    let state = s.engine.target();
    assert_eq!(state.pan_x, 0.0);
    assert!((state.pan_y - (623.0 * floor - 600.0) / 2.0).abs() < EPS);
    assert_eq!(s.clock.tick(), 1);

    // Two wheel-ups then one wheel-down in the same tick: one render.
    for delta in [-100.0, -100.0, 100.0] {
        if let Some(op) = gestures.wheel(delta) {
            s.engine.dispatch(op);
        }
    }
    assert_eq!(s.clock.tick(), 1);
    assert_eq!(s.renders.borrow().len(), 3);
    assert!((s.engine.committed().scale - floor * 1.2).abs() < EPS);
    assert_in_bounds(&s.engine);

    s.engine.rotate();
    assert_eq!(s.engine.target().rotation, 90);
    assert_in_bounds(&s.engine);

    s.engine.reset();
    s.clock.tick();
    assert_eq!(s.engine.committed(), s.renders.borrow().last().copied().unwrap());
    assert_eq!(s.engine.committed().rotation, 0);
    assert_eq!((s.engine.committed().pan_x, s.engine.committed().pan_y), (0.0, 0.0));

    s.engine.zoom_in();
    s.engine.teardown();
    assert_eq!(s.clock.tick(), 0);
}

#[test]
fn test_resize_reinitialises_through_provider() {
    let s = session(800.0, 600.0);
    let engine = Rc::clone(&s.engine);
    let _sub = s.provider.on_change(Box::new(move |size| {
        engine.resize(size);
    }));
    s.engine.zoom_in();
    s.engine.drag_by(30.0, 30.0);
    s.clock.tick();

    s.provider.set_size(VisibleSize::new(390.0, 700.0));
    let state = s.engine.target();
    assert!((state.scale - 700.0 / 623.0).abs() < EPS);
    assert_eq!((state.pan_x, state.pan_y), (0.0, 0.0));
    assert_eq!(s.clock.tick(), 1);
}

#[test]
fn test_sibling_animation_blocks_gestures() {
    let s = session(800.0, 600.0);
    s.clock.tick();
    let mut gestures = GestureAdapter::new();
    gestures.handle(PointerInput::TouchStart { first: Some((10.0, 10.0)) });
    gestures.on_sibling(SiblingSignal::AnimationStarted);
    assert_eq!(gestures.handle(PointerInput::TouchMove { first: Some((10.0, 90.0)) }), None);
    assert_eq!(gestures.wheel(-1.0), None);
    assert!(!s.engine.frame_pending());
}

#[test]
fn test_readiness_follows_commits() {
    let s = session(800.0, 600.0);
    let gate = Rc::new(RefCell::new(ReadinessGate::new(ReadinessConfig::default())));
    let pump = Rc::new(FrameScheduler::new(s.clock.clone()));

    gate.borrow_mut().update_data(true, 0);
    s.clock.tick();
    gate.borrow_mut().transform_committed();
    gate.borrow_mut().update_data(false, 4);

    // Pump the gate one tick at a time until nothing is counting down.
    fn schedule(gate: &Rc<RefCell<ReadinessGate>>, pump: &Rc<FrameScheduler<ManualClock>>) {
        let g = Rc::clone(gate);
        let p = Rc::clone(pump);
        pump.request_frame(move || {
            g.borrow_mut().tick();
            if g.borrow().needs_tick() {
                schedule(&g, &p);
            }
        });
    }
    schedule(&gate, &pump);

    s.clock.tick();
    assert!(gate.borrow().overlay_visible());
    s.clock.tick();
    assert!(!gate.borrow().overlay_visible());
    assert!(!pump.is_pending());
}

#[test]
fn test_unchanged_size_keeps_user_transform() {
    let s = session(390.0, 700.0);
    s.clock.tick();
    s.engine.zoom_in();
    s.engine.zoom_in();
    s.engine.drag_by(40.0, 40.0);
    s.clock.tick();
    let before = s.engine.committed();

    assert!(!s.engine.resize(VisibleSize::new(390.0, 700.0)));
    assert!(!s.engine.frame_pending());
    assert_eq!(s.engine.target(), before);
}
