//! Pointer normalisation: mouse and single-touch input become one drag session
//! producing incremental pan deltas, and wheel input becomes zoom steps.

use crate::viewport::ViewportInput;

/// Raw pointer input as delivered by the host. Touch variants carry the first
/// active touch point, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    MouseDown { x: f64, y: f64 },
    MouseMove { x: f64, y: f64 },
    MouseUp,
    MouseLeave,
    TouchStart { first: Option<(f64, f64)> },
    TouchMove { first: Option<(f64, f64)> },
    TouchEnd,
}

/// Signal from a sibling overlay whose transitions should not compete with
/// map gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingSignal {
    AnimationStarted,
    AnimationEnded,
}

/// Ephemeral state between pointer-down and pointer-up/leave.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSession {
    pub active: bool,
    pub last_x: f64,
    pub last_y: f64,
}

#[derive(Debug, Clone, Default)]
pub struct GestureAdapter {
    session: DragSession,
    admin_mode: bool,
    sibling_animating: bool,
}

impl GestureAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Administrative edit mode turns map dragging off. Wheel zoom stays on.
    pub fn set_admin_mode(&mut self, admin: bool) {
        self.admin_mode = admin;
        if admin {
            self.drag_end();
        }
    }

    /// While a sibling overlay animates, drags and wheel zoom are suppressed.
    /// A drag in progress is ended.
    pub fn on_sibling(&mut self, signal: SiblingSignal) {
        self.sibling_animating = signal == SiblingSignal::AnimationStarted;
        if self.sibling_animating {
            self.drag_end();
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.admin_mode && !self.sibling_animating
    }

    pub fn is_dragging(&self) -> bool {
        self.session.active
    }

    pub fn session(&self) -> DragSession {
        self.session
    }

    /// Start a drag session. A hanging session is replaced.
    pub fn drag_start(&mut self, x: f64, y: f64) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.session = DragSession {
            active: true,
            last_x: x,
            last_y: y,
        };
        true
    }

    /// Delta since the last pointer position, or `None` outside a session.
    pub fn drag_move(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.session.active || !self.is_enabled() {
            return None;
        }
        let delta = (x - self.session.last_x, y - self.session.last_y);
        self.session.last_x = x;
        self.session.last_y = y;
        Some(delta)
    }

    pub fn drag_end(&mut self) {
        self.session = DragSession::default();
    }

    /// Feed one pointer event; returns the pan to apply, if any.
    pub fn handle(&mut self, input: PointerInput) -> Option<ViewportInput> {
        match input {
            PointerInput::MouseDown { x, y } => {
                self.drag_start(x, y);
                None
            }
            PointerInput::TouchStart { first: Some((x, y)) } => {
                self.drag_start(x, y);
                None
            }
            PointerInput::MouseMove { x, y } | PointerInput::TouchMove { first: Some((x, y)) } => {
                self.drag_move(x, y)
                    .map(|(dx, dy)| ViewportInput::DragBy { dx, dy })
            }
            PointerInput::MouseUp | PointerInput::MouseLeave | PointerInput::TouchEnd => {
                self.drag_end();
                None
            }
            PointerInput::TouchStart { first: None } | PointerInput::TouchMove { first: None } => None,
        }
    }

    /// Wheel: up zooms in, down zooms out, zero is ignored. Only a sibling
    /// animation suppresses it.
    pub fn wheel(&self, delta_y: f64) -> Option<ViewportInput> {
        if self.sibling_animating {
            return None;
        }
        if delta_y < 0.0 {
            Some(ViewportInput::ZoomIn)
        } else if delta_y > 0.0 {
            Some(ViewportInput::ZoomOut)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_drag_produces_incremental_deltas() {
        let mut g = GestureAdapter::new();
        assert_eq!(g.handle(PointerInput::MouseDown { x: 10.0, y: 10.0 }), None);
        assert_eq!(
            g.handle(PointerInput::MouseMove { x: 15.0, y: 8.0 }),
            Some(ViewportInput::DragBy { dx: 5.0, dy: -2.0 })
        );
        assert_eq!(
            g.handle(PointerInput::MouseMove { x: 16.0, y: 8.0 }),
            Some(ViewportInput::DragBy { dx: 1.0, dy: 0.0 })
        );
        g.handle(PointerInput::MouseUp);
        assert!(!g.is_dragging());
        assert_eq!(g.handle(PointerInput::MouseMove { x: 30.0, y: 30.0 }), None);
    }

    #[test]
    fn test_touch_uses_first_point() {
        let mut g = GestureAdapter::new();
        g.handle(PointerInput::TouchStart { first: Some((100.0, 100.0)) });
        assert_eq!(
            g.handle(PointerInput::TouchMove { first: Some((90.0, 120.0)) }),
            Some(ViewportInput::DragBy { dx: -10.0, dy: 20.0 })
        );
        assert_eq!(g.handle(PointerInput::TouchMove { first: None }), None);
        g.handle(PointerInput::TouchEnd);
        assert!(!g.is_dragging());
    }

    #[test]
    fn test_move_without_start_is_ignored() {
        let mut g = GestureAdapter::new();
        assert_eq!(g.handle(PointerInput::MouseMove { x: 5.0, y: 5.0 }), None);
    }

    #[test]
    fn test_leave_aborts_session() {
        let mut g = GestureAdapter::new();
        g.drag_start(0.0, 0.0);
        g.handle(PointerInput::MouseLeave);
        assert_eq!(g.drag_move(10.0, 10.0), None);
    }

    #[test]
    fn test_new_start_replaces_hanging_session() {
        let mut g = GestureAdapter::new();
        g.drag_start(0.0, 0.0);
        g.drag_start(50.0, 50.0);
        assert_eq!(g.drag_move(55.0, 50.0), Some((5.0, 0.0)));
    }

    #[test]
    fn test_admin_mode_disables_drag_but_not_wheel() {
        let mut g = GestureAdapter::new();
        g.drag_start(0.0, 0.0);
        g.set_admin_mode(true);
        assert!(!g.is_dragging());
        assert!(!g.drag_start(1.0, 1.0));
        assert_eq!(g.wheel(-1.0), Some(ViewportInput::ZoomIn));
        assert_eq!(g.wheel(1.0), Some(ViewportInput::ZoomOut));

        g.on_sibling(SiblingSignal::AnimationStarted);
        assert_eq!(g.wheel(-1.0), None);
    }

    #[test]
    fn test_sibling_animation_suppresses_and_ends_drag() {
        let mut g = GestureAdapter::new();
        g.drag_start(0.0, 0.0);
        g.on_sibling(SiblingSignal::AnimationStarted);
        assert!(!g.is_dragging());
        assert_eq!(g.wheel(3.0), None);
        assert!(!g.drag_start(1.0, 1.0));

        g.on_sibling(SiblingSignal::AnimationEnded);
        assert!(g.is_enabled());
        assert_eq!(g.wheel(3.0), Some(ViewportInput::ZoomOut));
    }

    #[test]
    fn test_wheel_direction() {
        let g = GestureAdapter::new();
        assert_eq!(g.wheel(-120.0), Some(ViewportInput::ZoomIn));
        assert_eq!(g.wheel(53.0), Some(ViewportInput::ZoomOut));
        assert_eq!(g.wheel(0.0), None);
    }
}
