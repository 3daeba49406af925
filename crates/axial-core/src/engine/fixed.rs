use crate::interval::Interval;
use crate::scale_div::ScaleDiv;

use super::linear::LinearScaleEngine;
use super::{shifted, AutoScale, EngineSettings, StreamingHint};

/// Relative width factor requested while the start value keeps moving.
const STREAMING_FACTOR: f64 = 0.1;

/// Linear engine computing ticks relative to a moving start value.
///
/// Used for sliding windows over streamed data: ticks are placed at the same
/// offsets from the start value on every update, only their labels change.
/// An optional maximum width caps the visible span.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedScaleEngine {
    settings: EngineSettings,
    start_value: f64,
    max_interval_width: Option<f64>,
}

impl FixedScaleEngine {
    /// Create an engine starting at 0 without a width cap.
    #[must_use]
    pub const fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            start_value: 0.0,
            max_interval_width: None,
        }
    }

    /// Cap the interval width.
    #[must_use]
    pub const fn with_max_interval_width(mut self, width: f64) -> Self {
        self.max_interval_width = Some(width);
        self
    }

    /// Shared settings.
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Mutable shared settings.
    pub fn settings_mut(&mut self) -> &mut EngineSettings {
        &mut self.settings
    }

    /// Current start value.
    #[must_use]
    pub const fn start_value(&self) -> f64 {
        self.start_value
    }

    /// Set the start value.
    pub fn set_start_value(&mut self, start: f64) {
        self.start_value = start;
    }

    /// Width cap, if any.
    #[must_use]
    pub const fn max_interval_width(&self) -> Option<f64> {
        self.max_interval_width
    }

    /// Set or clear the width cap.
    pub fn set_max_interval_width(&mut self, width: Option<f64>) {
        self.max_interval_width = width;
    }

    fn exceeds_max_width(&self, width: f64) -> Option<f64> {
        self.max_interval_width.filter(|&max| width > max)
    }

    const fn linear(&self) -> LinearScaleEngine {
        LinearScaleEngine::new(self.settings)
    }

    /// Scale starting exactly at `x1`, its width rounded by the linear rules.
    #[must_use]
    pub fn auto_scale(&self, max_steps: usize, x1: f64, x2: f64) -> AutoScale {
        let width = x2 - x1;
        let width = self.exceeds_max_width(width).unwrap_or(width);
        let auto = self.linear().auto_scale(max_steps, 0.0, width);
        AutoScale {
            x1,
            x2: auto.x2 + x1,
            step: auto.step,
        }
    }

    /// Linear division of `[x1, x2]` computed relative to the start value.
    #[must_use]
    pub fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major: usize,
        max_minor: usize,
        step: f64,
    ) -> ScaleDiv {
        let upper = x2 - self.start_value;
        let lower = match self.exceeds_max_width(x2 - x1) {
            Some(max) => upper - max,
            None => x1 - self.start_value,
        };
        let div = self
            .linear()
            .divide_scale(lower, upper, max_major, max_minor, step);
        shifted(&div, self.start_value)
    }

    /// Move the start value to the items' minimum, or to `max - cap` when the
    /// items are wider than the cap. Streaming optimization stays on while
    /// the start value moves.
    pub fn on_compute_scale_div(&mut self, items: &Interval) -> StreamingHint {
        let hint = if self.start_value == items.min_value() {
            StreamingHint::Disable
        } else {
            StreamingHint::Enable {
                factor: STREAMING_FACTOR,
            }
        };

        self.start_value = match self.exceeds_max_width(items.width()) {
            Some(max) => items.max_value() - max,
            None => items.min_value(),
        };
        hint
    }
}
