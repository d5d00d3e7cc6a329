//! Viewport controller: pure state transitions plus the two-slot
//! (target / committed) state holder.
//!
//! Every transition finalises the scale first, then derives the pan boundary
//! for that scale and re-clamps pan into it.

use crate::calc;
use crate::config::ViewportConfig;
use crate::models::{ContentSize, PanBoundary, ViewportState, VisibleSize};

/// Everything the transitions need besides the state itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    pub visible: VisibleSize,
    pub content: ContentSize,
    pub config: ViewportConfig,
}

impl ViewportGeometry {
    pub fn new(visible: VisibleSize, content: ContentSize, config: ViewportConfig) -> Self {
        Self {
            visible,
            content,
            config: config.validated(),
        }
    }

    /// Scale floor for the content as rotated by `rotation`.
    pub fn min_scale(&self, rotation: i32) -> f64 {
        calc::min_scale(self.visible, calc::rotated_content(self.content, rotation))
    }

    /// Scale ceiling. The floor wins if a huge viewport pushes it above `max_scale`.
    pub fn max_scale(&self, rotation: i32) -> f64 {
        self.config.max_scale.max(self.min_scale(rotation))
    }

    pub fn boundaries(&self, scale: f64, rotation: i32) -> PanBoundary {
        calc::pan_boundaries(
            scale,
            self.visible,
            calc::rotated_content(self.content, rotation),
        )
    }
}

/// A state mutation requested by controls or gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportInput {
    ZoomIn,
    ZoomOut,
    Reset,
    Rotate,
    DragBy { dx: f64, dy: f64 },
}

// ---------------------------------------------------------------------------
// Pure transitions
// ---------------------------------------------------------------------------

/// Centred, unrotated, at the scale floor.
pub fn initial_state(geometry: &ViewportGeometry) -> ViewportState {
    ViewportState {
        scale: geometry.min_scale(0),
        pan_x: 0.0,
        pan_y: 0.0,
        rotation: 0,
    }
}

/// Commit `scale`, then re-clamp the existing pan against the boundary for it.
fn with_scale(state: ViewportState, geometry: &ViewportGeometry, scale: f64) -> ViewportState {
    let boundary = geometry.boundaries(scale, state.rotation);
    let (pan_x, pan_y) = boundary.clamp(state.pan_x, state.pan_y);
    ViewportState {
        scale,
        pan_x,
        pan_y,
        ..state
    }
}

pub fn zoom_in(state: ViewportState, geometry: &ViewportGeometry) -> ViewportState {
    let ceiling = geometry.max_scale(state.rotation);
    let floor = geometry.min_scale(state.rotation);
    let scale = (state.scale * geometry.config.zoom_step).min(ceiling).max(floor);
    with_scale(state, geometry, scale)
}

/// No-op at (or below) the floor; otherwise one step down, never past the floor.
pub fn zoom_out(state: ViewportState, geometry: &ViewportGeometry) -> ViewportState {
    let floor = geometry.min_scale(state.rotation);
    if state.scale <= floor {
        return state;
    }
    let ceiling = geometry.max_scale(state.rotation);
    let scale = (state.scale / geometry.config.zoom_step).min(ceiling).max(floor);
    with_scale(state, geometry, scale)
}

pub fn reset(geometry: &ViewportGeometry) -> ViewportState {
    initial_state(geometry)
}

/// Quarter turn clockwise. The rotated bounding box has swapped axes, so the
/// scale is raised to the rotated floor if needed and pan is re-clamped.
pub fn rotate(state: ViewportState, geometry: &ViewportGeometry) -> ViewportState {
    let rotation = state.rotation + 90;
    let scale = state.scale.max(geometry.min_scale(rotation));
    with_scale(ViewportState { rotation, ..state }, geometry, scale)
}

/// Pan by a screen-space delta, clamped against the boundary of the current scale.
pub fn drag_by(state: ViewportState, geometry: &ViewportGeometry, dx: f64, dy: f64) -> ViewportState {
    let dx = calc::finite_or_zero(dx);
    let dy = calc::finite_or_zero(dy);
    if dx == 0.0 && dy == 0.0 {
        return state;
    }
    let boundary = geometry.boundaries(state.scale, state.rotation);
    let (pan_x, pan_y) = boundary.clamp(state.pan_x + dx, state.pan_y + dy);
    ViewportState {
        pan_x,
        pan_y,
        ..state
    }
}

pub fn apply(state: ViewportState, geometry: &ViewportGeometry, input: ViewportInput) -> ViewportState {
    match input {
        ViewportInput::ZoomIn => zoom_in(state, geometry),
        ViewportInput::ZoomOut => zoom_out(state, geometry),
        ViewportInput::Reset => reset(geometry),
        ViewportInput::Rotate => rotate(state, geometry),
        ViewportInput::DragBy { dx, dy } => drag_by(state, geometry, dx, dy),
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No usable visible size yet; every operation is a no-op.
    Initializing,
    Ready,
}

/// Owns the viewport state.
///
/// `target` is written synchronously by every operation; `committed` is what
/// the renderer last saw and only moves on [`ViewportController::commit`],
/// which the frame scheduler calls at most once per tick.
#[derive(Debug, Clone)]
pub struct ViewportController {
    content: ContentSize,
    config: ViewportConfig,
    visible: Option<VisibleSize>,
    target: ViewportState,
    committed: ViewportState,
}

impl ViewportController {
    pub fn new(content: ContentSize, config: ViewportConfig) -> Self {
        Self {
            content,
            config: config.validated(),
            visible: None,
            target: ViewportState::default(),
            committed: ViewportState::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.visible.is_some() {
            Phase::Ready
        } else {
            Phase::Initializing
        }
    }

    pub fn geometry(&self) -> Option<ViewportGeometry> {
        self.visible
            .map(|visible| ViewportGeometry::new(visible, self.content, self.config))
    }

    pub fn target(&self) -> ViewportState {
        self.target
    }

    pub fn committed(&self) -> ViewportState {
        self.committed
    }

    /// Pan boundary for the current target scale, if ready.
    pub fn boundaries(&self) -> Option<PanBoundary> {
        self.geometry()
            .map(|g| g.boundaries(self.target.scale, self.target.rotation))
    }

    /// Full re-initialisation against a new visible size. Degenerate sizes and
    /// the size already in use are ignored. Returns whether the target changed.
    pub fn on_resize(&mut self, visible: VisibleSize) -> bool {
        if visible.is_degenerate() {
            tracing::debug!(
                width = visible.width,
                height = visible.height,
                "ignoring degenerate viewport size"
            );
            return false;
        }
        if self.visible == Some(visible) {
            return false;
        }
        let first = self.visible.is_none();
        self.visible = Some(visible);
        let geometry = ViewportGeometry::new(visible, self.content, self.config);
        let next = initial_state(&geometry);
        tracing::debug!(
            width = visible.width,
            height = visible.height,
            scale = next.scale,
            "viewport re-initialised"
        );
        let changed = first || next != self.target;
        self.target = next;
        changed
    }

    /// Apply one operation to the target. Returns whether the target changed.
    pub fn dispatch(&mut self, input: ViewportInput) -> bool {
        let Some(geometry) = self.geometry() else {
            return false;
        };
        let next = apply(self.target, &geometry, input);
        if next == self.target {
            return false;
        }
        self.target = next;
        true
    }

    /// Copy target into committed and return it.
    pub fn commit(&mut self) -> ViewportState {
        self.committed = self.target;
        self.committed
    }
}
