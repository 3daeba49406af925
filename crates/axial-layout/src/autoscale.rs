//! Per-axis scale state: engine, current division and the streaming
//! optimization that keeps a scale steady while data arrives quickly.

use std::time::Duration;

use axial_core::{
    Interval, ScaleConfig, ScaleDiv, ScaleEngine, ScaleMap, StreamingConfig, StreamingHint,
};
use tracing::debug;

/// Scale of one axis.
///
/// [`AxisScale::compute`] turns a data interval into a [`ScaleDiv`]. Time is
/// passed in by the caller so the fast update window is deterministic.
#[derive(Debug, Clone)]
pub struct AxisScale {
    config: ScaleConfig,
    engine: ScaleEngine,
    streaming: StreamingConfig,
    div: ScaleDiv,
    computed: Interval,
    last_width: f64,
    last_update: Option<Duration>,
    generation: u64,
}

impl Default for AxisScale {
    fn default() -> Self {
        Self::new(ScaleConfig::default())
    }
}

impl AxisScale {
    /// Scale built from `config`, with an empty division.
    #[must_use]
    pub fn new(config: ScaleConfig) -> Self {
        Self {
            engine: config.build_engine(),
            streaming: config.streaming,
            config,
            div: ScaleDiv::default(),
            computed: Interval::default(),
            last_width: 0.0,
            last_update: None,
            generation: 0,
        }
    }

    /// Configuration the scale was built from.
    #[must_use]
    pub const fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// Engine.
    #[must_use]
    pub const fn engine(&self) -> &ScaleEngine {
        &self.engine
    }

    /// Mutable engine. The next [`AxisScale::compute`] recomputes the
    /// division.
    pub fn engine_mut(&mut self) -> &mut ScaleEngine {
        self.computed = Interval::default();
        &mut self.engine
    }

    /// Current streaming parameters, possibly changed by the engine.
    #[must_use]
    pub const fn streaming(&self) -> &StreamingConfig {
        &self.streaming
    }

    /// Turn the streaming optimization on or off.
    pub fn set_streaming(&mut self, enabled: bool, factor: f64) {
        self.streaming.enabled = enabled;
        if enabled && factor.is_finite() {
            self.streaming.factor = factor;
        }
    }

    /// Whether the division follows the data.
    #[must_use]
    pub const fn is_auto_scale(&self) -> bool {
        self.config.auto_scale
    }

    /// Enable or disable auto scaling. Enabling forces the next
    /// computation.
    pub fn set_auto_scale(&mut self, enabled: bool) {
        if self.config.auto_scale != enabled {
            self.config.auto_scale = enabled;
            self.computed = Interval::default();
        }
    }

    /// Current division.
    #[must_use]
    pub const fn scale_div(&self) -> &ScaleDiv {
        &self.div
    }

    /// Replace the division. Returns whether it changed.
    pub fn set_scale_div(&mut self, div: ScaleDiv) -> bool {
        if self.div == div {
            return false;
        }
        self.div = div;
        self.generation = self.generation.wrapping_add(1);
        true
    }

    /// Counter bumped on every division change.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Data interval of the last computation.
    #[must_use]
    pub const fn computed_interval(&self) -> &Interval {
        &self.computed
    }

    /// Map from the division bounds, through the engine transform, onto a
    /// unit paint interval.
    #[must_use]
    pub fn scale_map(&self) -> ScaleMap {
        let mut map = ScaleMap::new();
        map.set_transformation(self.engine.transformation());
        map.set_scale_interval(self.div.lower_bound(), self.div.upper_bound());
        map
    }

    /// Recompute the division for a data interval. Returns whether the
    /// division changed.
    ///
    /// Nothing happens when auto scaling is off, the interval is invalid,
    /// or it equals the interval of the last computation.
    pub fn compute(&mut self, data: &Interval, now: Duration) -> bool {
        if !self.config.auto_scale || !data.is_valid() || *data == self.computed {
            return false;
        }

        let mut bounds = *data;
        if bounds.width() == 0.0 {
            bounds = Interval::new(bounds.min_value() - 0.5, bounds.max_value() + 0.5);
        }

        let might_stream = self.computed.is_valid() && self.streaming.enabled;
        self.computed = *data;

        let (fast_update, keep_width) = if might_stream {
            self.track_update(bounds.width(), now)
        } else {
            (false, false)
        };

        let max_major = self.config.max_major;
        let auto = self
            .engine
            .auto_scale(max_major, bounds.min_value(), bounds.max_value());
        let (mut x1, mut x2) = (auto.x1, auto.x2);
        if fast_update {
            x1 = bounds.min_value();
            x2 = bounds.max_value();
        }
        if keep_width {
            x2 = x1 + self.last_width;
        }
        if x1 == x2 {
            x2 = x1 + 1.0;
        }

        match self
            .engine
            .on_compute_scale_div(&Interval::new(x1, x2), &self.div)
        {
            Some(StreamingHint::Enable { factor }) => self.set_streaming(true, factor),
            Some(StreamingHint::Disable) => self.set_streaming(false, f64::NAN),
            None => {}
        }

        let mut div = self
            .engine
            .divide_scale(x1, x2, max_major, self.config.max_minor, auto.step);

        let factor = self.config.item_interval_factor;
        if factor != 0.0 && !self.streaming.enabled {
            let pad = bounds.width() * factor;
            let lower = (bounds.min_value() - pad).min(x1);
            let upper = (bounds.max_value() + pad).max(x2);
            div.set_interval(lower, upper);
        }

        let changed = self.set_scale_div(div);
        if changed {
            debug!(
                lower = self.div.lower_bound(),
                upper = self.div.upper_bound(),
                fast_update,
                keep_width,
                "scale division recomputed"
            );
        }
        changed
    }

    /// Returns `(fast_update, keep_previous_width)`.
    fn track_update(&mut self, width: f64, now: Duration) -> (bool, bool) {
        let Some(previous) = self.last_update.replace(now) else {
            self.last_width = width;
            return (false, false);
        };

        let fast = now.saturating_sub(previous) < self.streaming.fast_update_window();
        if !fast {
            return (false, false);
        }

        let change = (width - self.last_width).abs() / self.last_width;
        if change < self.streaming.factor && self.last_width > width {
            (true, true)
        } else {
            self.last_width = width;
            (true, false)
        }
    }
}
