use std::cell::RefCell;
use std::rc::Rc;

use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use pinmap_shared::config::{ReadinessConfig, ViewportConfig, MAP_CONTENT};
use pinmap_shared::engine::ViewportEngine;
use pinmap_shared::gesture::{GestureAdapter, PointerInput, SiblingSignal};
use pinmap_shared::marker::{MapEvent, MarkerLayer, MarkerMode};
use pinmap_shared::models::{MarkerEntity, ViewportState};
use pinmap_shared::readiness::ReadinessGate;
use pinmap_shared::scheduler::FrameScheduler;
use pinmap_shared::size::ViewportSizeProvider;
use pinmap_shared::viewport::{ViewportController, ViewportInput};

use crate::components::loading_overlay::LoadingOverlay;
use crate::components::map_controls::MapControls;
use crate::components::marker_pin::MarkerPin;
use crate::dom::{self, BrowserSizeProvider, RafClock, MAP_CONTAINER_ID};

const MAP_IMAGE: Asset = asset!("/assets/map.svg");

type Engine = ViewportEngine<RafClock>;
type Gestures = Rc<RefCell<GestureAdapter>>;

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

fn first_touch(evt: &Event<TouchData>) -> Option<(f64, f64)> {
    evt.data().touches().first().map(|t| {
        let c = t.client_coordinates();
        (c.x, c.y)
    })
}

/// Keep ticking the readiness gate, one frame at a time, while a countdown runs.
fn pump_readiness(gate: Signal<ReadinessGate>, pump: Rc<FrameScheduler<RafClock>>) {
    if !gate.peek().needs_tick() {
        return;
    }
    let next = Rc::clone(&pump);
    pump.request_frame(move || {
        let mut gate = gate;
        gate.write().tick();
        pump_readiness(gate, next);
    });
}

/// Feed a pointer event through the gesture adapter into the engine, keeping
/// the drag flag and the body scroll lock in step with the session.
fn feed_pointer(
    input: PointerInput,
    gestures: &Gestures,
    engine: &Engine,
    mut dragging: Signal<bool>,
) {
    let op = gestures.borrow_mut().handle(input);
    if let Some(op) = op {
        engine.dispatch(op);
    }
    let active = gestures.borrow().is_dragging();
    if active != *dragging.peek() {
        dom::set_body_scroll_locked(active);
        dragging.set(active);
    }
}

/// The pannable, zoomable, rotatable map with its pins.
///
/// `markers` is the list to draw; `sheet_animating` pauses gestures while a
/// sibling sheet slides. Marker clicks and admin drops come out of `on_event`.
#[component]
pub fn MapView(
    markers: ReadSignal<Vec<MarkerEntity>>,
    is_loading: ReadSignal<bool>,
    mode: MarkerMode,
    sheet_animating: ReadSignal<bool>,
    on_event: EventHandler<MapEvent>,
) -> Element {
    let committed = use_signal(ViewportState::default);
    let gate = use_signal(|| ReadinessGate::new(ReadinessConfig::default()));
    let dragging = use_signal(|| false);

    let pump = use_hook(|| Rc::new(FrameScheduler::new(RafClock)));

    let engine = use_hook(|| {
        let pump = Rc::clone(&pump);
        Rc::new(ViewportEngine::new(
            ViewportController::new(MAP_CONTENT, ViewportConfig::default()),
            RafClock,
            move |state| {
                let mut committed = committed;
                let mut gate = gate;
                committed.set(state);
                gate.write().transform_committed();
                pump_readiness(gate, Rc::clone(&pump));
            },
        ))
    });

    // Initial sample plus a live subscription, both against the same provider.
    let _size_subscription = use_hook(|| {
        let provider = BrowserSizeProvider;
        engine.resize(provider.current_size());
        let engine = Rc::clone(&engine);
        Rc::new(provider.on_change(Box::new(move |size| {
            engine.resize(size);
        })))
    });

    let gestures: Gestures = use_hook(|| Rc::new(RefCell::new(GestureAdapter::new())));
    gestures.borrow_mut().set_admin_mode(mode.is_admin());

    {
        let pump = Rc::clone(&pump);
        use_effect(move || {
            let loading = is_loading();
            let count = markers.read().len();
            let mut gate = gate;
            gate.write().update_data(loading, count);
            pump_readiness(gate, Rc::clone(&pump));
        });
    }

    {
        let gestures = Rc::clone(&gestures);
        use_effect(move || {
            let signal = if sheet_animating() {
                SiblingSignal::AnimationStarted
            } else {
                SiblingSignal::AnimationEnded
            };
            gestures.borrow_mut().on_sibling(signal);
            let mut dragging = dragging;
            if *dragging.peek() && !gestures.borrow().is_dragging() {
                dom::set_body_scroll_locked(false);
                dragging.set(false);
            }
        });
    }

    {
        let engine = Rc::clone(&engine);
        let pump = Rc::clone(&pump);
        use_drop(move || {
            engine.teardown();
            pump.cancel();
            dom::set_body_scroll_locked(false);
        });
    }

    let state = committed();
    let ready = gate.read().transform_ready();
    let overlay = gate.read().overlay_visible();
    let layer = MarkerLayer::new(mode.clone());
    let draggable = layer.is_draggable();

    let content_style = format!(
        "width: {}px; height: {}px; transform: {}; opacity: {};",
        MAP_CONTENT.width,
        MAP_CONTENT.height,
        state.css_transform(),
        if ready { 1 } else { 0 },
    );
    let surface_class = if dragging() {
        "map-surface dragging"
    } else {
        "map-surface"
    };

    let e_wheel = Rc::clone(&engine);
    let e_down = Rc::clone(&engine);
    let e_move = Rc::clone(&engine);
    let e_up = Rc::clone(&engine);
    let e_leave = Rc::clone(&engine);
    let e_tstart = Rc::clone(&engine);
    let e_tmove = Rc::clone(&engine);
    let e_tend = Rc::clone(&engine);
    let e_controls = Rc::clone(&engine);
    let g_wheel = Rc::clone(&gestures);
    let g_down = Rc::clone(&gestures);
    let g_move = Rc::clone(&gestures);
    let g_up = Rc::clone(&gestures);
    let g_leave = Rc::clone(&gestures);
    let g_tstart = Rc::clone(&gestures);
    let g_tmove = Rc::clone(&gestures);
    let g_tend = Rc::clone(&gestures);

    rsx! {
        div { class: "map-view",
            LoadingOverlay { visible: overlay }

            div {
                class: "{surface_class}",

                onwheel: move |evt: Event<WheelData>| {
                    evt.prevent_default();
                    let delta_y = wheel_delta_y(evt.data().delta());
                    let op = g_wheel.borrow().wheel(delta_y);
                    if let Some(op) = op {
                        e_wheel.dispatch(op);
                    }
                },
                onmousedown: move |evt: Event<MouseData>| {
                    if evt.trigger_button() != Some(MouseButton::Primary) {
                        return;
                    }
                    let c = evt.client_coordinates();
                    feed_pointer(PointerInput::MouseDown { x: c.x, y: c.y }, &g_down, &e_down, dragging);
                },
                onmousemove: move |evt: Event<MouseData>| {
                    let c = evt.client_coordinates();
                    feed_pointer(PointerInput::MouseMove { x: c.x, y: c.y }, &g_move, &e_move, dragging);
                },
                onmouseup: move |_evt: Event<MouseData>| {
                    feed_pointer(PointerInput::MouseUp, &g_up, &e_up, dragging);
                },
                onmouseleave: move |_evt: Event<MouseData>| {
                    feed_pointer(PointerInput::MouseLeave, &g_leave, &e_leave, dragging);
                },
                ontouchstart: move |evt: Event<TouchData>| {
                    let first = first_touch(&evt);
                    feed_pointer(PointerInput::TouchStart { first }, &g_tstart, &e_tstart, dragging);
                },
                ontouchmove: move |evt: Event<TouchData>| {
                    evt.prevent_default();
                    let first = first_touch(&evt);
                    feed_pointer(PointerInput::TouchMove { first }, &g_tmove, &e_tmove, dragging);
                },
                ontouchend: move |_evt: Event<TouchData>| {
                    feed_pointer(PointerInput::TouchEnd, &g_tend, &e_tend, dragging);
                },

                div {
                    class: "map-content",
                    style: "{content_style}",

                    img { class: "map-image", src: MAP_IMAGE, draggable: "false" }

                    div {
                        id: MAP_CONTAINER_ID,
                        "data-map-container": "true",
                        class: "map-pins",
                        for marker in markers.read().iter().cloned() {
                            MarkerPin {
                                key: "{marker.id}",
                                marker: marker,
                                layer: layer.clone(),
                                draggable: draggable,
                                on_event: on_event,
                            }
                        }
                    }
                }
            }

            MapControls {
                on_input: move |input: ViewportInput| {
                    e_controls.dispatch(input);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_delta_pixels_pass_through() {
        assert_eq!(wheel_delta_y(WheelDelta::pixels(0.0, -53.0, 0.0)), -53.0);
    }

    #[test]
    fn test_wheel_delta_lines_scale_up() {
        assert_eq!(wheel_delta_y(WheelDelta::lines(0.0, 3.0, 0.0)), 120.0);
    }
}
