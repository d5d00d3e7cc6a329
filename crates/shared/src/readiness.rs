use crate::config::ReadinessConfig;

/// Decides when the loading overlay can go away.
///
/// The overlay stays up until the data has loaded, the initial transform has
/// been committed, and the marker set has had time to reach the screen. Both
/// delays are counted in scheduler ticks so an unscaled surface or a
/// half-drawn marker set is never flashed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessGate {
    settle_ticks: u8,
    data_loaded: bool,
    transform_ready: bool,
    content_settled: bool,
    transform_countdown: Option<u8>,
    settle_countdown: Option<u8>,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new(ReadinessConfig::default())
    }
}

impl ReadinessGate {
    pub fn new(config: ReadinessConfig) -> Self {
        Self {
            settle_ticks: config.settle_ticks,
            data_loaded: false,
            transform_ready: false,
            content_settled: false,
            transform_countdown: None,
            settle_countdown: None,
        }
    }

    /// The initial scale has been committed. Later calls are ignored.
    pub fn transform_committed(&mut self) {
        if self.transform_ready || self.transform_countdown.is_some() {
            return;
        }
        if self.settle_ticks == 0 {
            self.transform_ready = true;
        } else {
            self.transform_countdown = Some(self.settle_ticks);
        }
    }

    /// Report the data collaborator's loading flag and current marker count.
    pub fn update_data(&mut self, is_loading: bool, marker_count: usize) {
        let loaded = !is_loading;
        if !loaded {
            // A fresh load: the next marker set has to settle again.
            self.content_settled = false;
            self.settle_countdown = None;
        }
        self.data_loaded = loaded;

        if loaded && marker_count > 0 && !self.content_settled && self.settle_countdown.is_none() {
            if self.settle_ticks == 0 {
                self.content_settled = true;
            } else {
                self.settle_countdown = Some(self.settle_ticks);
            }
        }
    }

    /// Advance one scheduler tick. Returns whether a flag flipped.
    pub fn tick(&mut self) -> bool {
        let mut flipped = false;
        if let Some(left) = self.transform_countdown {
            if left <= 1 {
                self.transform_countdown = None;
                self.transform_ready = true;
                flipped = true;
            } else {
                self.transform_countdown = Some(left - 1);
            }
        }
        if let Some(left) = self.settle_countdown {
            if left <= 1 {
                self.settle_countdown = None;
                self.content_settled = true;
                flipped = true;
            } else {
                self.settle_countdown = Some(left - 1);
            }
        }
        flipped
    }

    /// Whether a countdown is still running.
    pub fn needs_tick(&self) -> bool {
        self.transform_countdown.is_some() || self.settle_countdown.is_some()
    }

    pub fn data_loaded(&self) -> bool {
        self.data_loaded
    }

    /// Whether the transformed surface may be shown.
    pub fn transform_ready(&self) -> bool {
        self.transform_ready
    }

    pub fn content_settled(&self) -> bool {
        self.content_settled
    }

    pub fn overlay_visible(&self) -> bool {
        !(self.data_loaded && self.transform_ready && self.content_settled)
    }
}
