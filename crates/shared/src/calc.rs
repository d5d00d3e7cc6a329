use crate::models::{ContentSize, PanBoundary, VisibleSize};

/// Smallest scale at which the content still covers the viewport.
///
/// Prefers filling the viewport vertically, but switches to fit-width if the
/// fit-height scale would leave empty space on the horizontal edges.
pub fn min_scale(visible: VisibleSize, content: ContentSize) -> f64 {
    if content.width <= 0.0 || content.height <= 0.0 {
        return 1.0;
    }

    let scale_by_height = visible.height / content.height;
    let scale_by_width = visible.width / content.width;

    let mut scale = scale_by_height;
    if content.width * scale < visible.width {
        scale = scale_by_width;
    }
    scale
}

/// Legal pan range at `scale`. The content is centred, so any overflow is split
/// evenly on both sides; an axis without overflow is locked at 0.
pub fn pan_boundaries(scale: f64, visible: VisibleSize, content: ContentSize) -> PanBoundary {
    let overflow_x = (content.width * scale - visible.width).max(0.0);
    let overflow_y = (content.height * scale - visible.height).max(0.0);

    let max_x = overflow_x / 2.0;
    let max_y = overflow_y / 2.0;

    PanBoundary {
        min_x: -max_x,
        max_x,
        min_y: -max_y,
        max_y,
    }
}

/// Number of clockwise quarter turns in `rotation` degrees, in `0..4`.
pub fn quarter_turns(rotation: i32) -> i32 {
    rotation.div_euclid(90).rem_euclid(4)
}

/// Screen-space bounding box of the content after `rotation`.
pub fn rotated_content(content: ContentSize, rotation: i32) -> ContentSize {
    if quarter_turns(rotation) % 2 == 1 {
        content.transposed()
    } else {
        content
    }
}

/// Replace NaN/infinite values with 0 so they never reach the transform.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
