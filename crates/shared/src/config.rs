use serde::{Deserialize, Serialize};

use crate::models::ContentSize;

/// Background surface dimensions (the map SVG's viewBox is `0 0 731 623`).
pub const MAP_CONTENT: ContentSize = ContentSize::new(731.0, 623.0);

/// Zoom limits and step for the viewport controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Multiplicative factor applied by one zoom-in / zoom-out step.
    pub zoom_step: f64,
    /// Hard ceiling for the scale.
    pub max_scale: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_step: 1.2,
            max_scale: 5.0,
        }
    }
}

impl ViewportConfig {
    /// Replace unusable fields with their defaults. A step must be finite and
    /// above 1 so zoom-out shrinks; the ceiling must be finite and positive.
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let zoom_step = if self.zoom_step.is_finite() && self.zoom_step > 1.0 {
            self.zoom_step
        } else {
            tracing::warn!(zoom_step = self.zoom_step, "invalid zoom step, using default");
            defaults.zoom_step
        };
        let max_scale = if self.max_scale.is_finite() && self.max_scale > 0.0 {
            self.max_scale
        } else {
            tracing::warn!(max_scale = self.max_scale, "invalid max scale, using default");
            defaults.max_scale
        };
        Self {
            zoom_step,
            max_scale,
        }
    }
}

/// Delays used by the readiness gate, counted in scheduler ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReadinessConfig {
    pub settle_ticks: u8,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self { settle_ticks: 2 }
    }
}
