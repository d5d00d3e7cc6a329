//! Marker placement inside the content box, plus the admin drag-to-reposition
//! path.
//!
//! Markers sit at percentage coordinates of the content box. The box itself
//! carries the scale/pan/rotation transform, so nothing here depends on the
//! current viewport state.

use crate::calc;
use crate::error::RepositionError;
use crate::models::MarkerEntity;

/// Bounding rectangle of the content box in client coordinates, as reported by
/// the host after the transform has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }
}

/// How the marker layer behaves.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MarkerMode {
    /// Markers are clickable and open the detail view.
    #[default]
    Browse,
    /// Administrative editing. With `editing_id` set only that marker is
    /// shown; with `preview` set it is drawn there and cannot be dragged.
    AdminEdit {
        editing_id: Option<String>,
        preview: Option<(f64, f64)>,
    },
}

impl MarkerMode {
    pub fn is_admin(&self) -> bool {
        matches!(self, MarkerMode::AdminEdit { .. })
    }
}

/// A new position for one marker, in percent of the content box.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionProposal {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Notifications the marker layer emits to its siblings.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    MarkerSelected(MarkerEntity),
    PositionProposed(PositionProposal),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerLayer {
    mode: MarkerMode,
}

impl MarkerLayer {
    pub fn new(mode: MarkerMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> &MarkerMode {
        &self.mode
    }

    pub fn set_mode(&mut self, mode: MarkerMode) {
        self.mode = mode;
    }

    /// Admin mode without a preview override.
    pub fn is_draggable(&self) -> bool {
        matches!(self.mode, MarkerMode::AdminEdit { preview: None, .. })
    }

    /// Markers to draw, with the preview override applied.
    pub fn displayed(&self, markers: &[MarkerEntity]) -> Vec<MarkerEntity> {
        match &self.mode {
            MarkerMode::Browse => markers.to_vec(),
            MarkerMode::AdminEdit {
                editing_id: None, ..
            } => markers.to_vec(),
            MarkerMode::AdminEdit {
                editing_id: Some(id),
                preview,
            } => markers
                .iter()
                .filter(|m| &m.id == id)
                .map(|m| {
                    let mut m = m.clone();
                    if let Some((x, y)) = preview {
                        m.normalized_x = calc::finite_or_zero(*x).clamp(0.0, 100.0);
                        m.normalized_y = calc::finite_or_zero(*y).clamp(0.0, 100.0);
                    }
                    m
                })
                .collect(),
        }
    }

    /// Click on a marker. Only browse mode selects.
    pub fn click(&self, marker: &MarkerEntity) -> Option<MapEvent> {
        match self.mode {
            MarkerMode::Browse => Some(MapEvent::MarkerSelected(marker.clone())),
            MarkerMode::AdminEdit { .. } => None,
        }
    }

    /// Drop a dragged marker at a client point.
    pub fn drop_at(
        &self,
        id: &str,
        client_x: f64,
        client_y: f64,
        rect: ContainerRect,
    ) -> Result<PositionProposal, RepositionError> {
        if !self.is_draggable() {
            tracing::warn!(marker = id, "drop rejected: markers are not draggable");
            return Err(RepositionError::NotDraggable);
        }
        let (x, y) = drop_to_percent(client_x, client_y, rect).ok_or_else(|| {
            tracing::warn!(marker = id, ?rect, "drop rejected: degenerate container");
            RepositionError::DegenerateContainer
        })?;
        Ok(PositionProposal {
            id: id.to_string(),
            x,
            y,
        })
    }
}

/// Client point to percent of `rect`, clamped to `[0, 100]`.
pub fn drop_to_percent(client_x: f64, client_y: f64, rect: ContainerRect) -> Option<(f64, f64)> {
    if rect.is_degenerate() {
        return None;
    }
    let x = (client_x - rect.left) / rect.width * 100.0;
    let y = (client_y - rect.top) / rect.height * 100.0;
    Some((
        calc::finite_or_zero(x).clamp(0.0, 100.0),
        calc::finite_or_zero(y).clamp(0.0, 100.0),
    ))
}

/// Parse a manually entered coordinate. Anything unparsable or non-finite is 0.
pub fn coerce_coordinate(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .map(calc::finite_or_zero)
        .unwrap_or(0.0)
}

/// Inline style placing a pin at its percentage position, anchored at the
/// bottom centre of the icon.
pub fn pin_style(marker: &MarkerEntity) -> String {
    format!(
        "left: {}%; top: {}%; transform: translate(-50%, -100%);",
        marker.normalized_x, marker.normalized_y
    )
}
