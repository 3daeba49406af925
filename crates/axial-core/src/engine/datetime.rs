use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::scale_div::ScaleDiv;

use super::linear::LinearScaleEngine;
use super::{shifted, AutoScale, EngineSettings};

/// How time values are shown on the scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTimeMode {
    /// Absolute dates; ticks follow the linear rules.
    #[default]
    Absolute,
    /// Durations elapsed since a start value; the scale starts exactly at
    /// the smallest value.
    SinceStart,
}

/// Linear engine for time values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateTimeScaleEngine {
    settings: EngineSettings,
    mode: DateTimeMode,
    fixed_start: bool,
    start_value: f64,
}

impl DateTimeScaleEngine {
    /// Create an engine in [`DateTimeMode::Absolute`] mode.
    #[must_use]
    pub const fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            mode: DateTimeMode::Absolute,
            fixed_start: false,
            start_value: 0.0,
        }
    }

    /// Select the display mode. With `fixed_start`, ticks are computed
    /// relative to the start value instead of the lower bound.
    #[must_use]
    pub const fn with_mode(mut self, mode: DateTimeMode, fixed_start: bool) -> Self {
        self.mode = mode;
        self.fixed_start = fixed_start;
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

    /// Display mode.
    #[must_use]
    pub const fn mode(&self) -> DateTimeMode {
        self.mode
    }

    /// Whether ticks are re-based on the start value.
    #[must_use]
    pub const fn fixed_start(&self) -> bool {
        self.fixed_start
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

    const fn linear(&self) -> LinearScaleEngine {
        LinearScaleEngine::new(self.settings)
    }

    /// Linear auto-scaling. In [`DateTimeMode::SinceStart`] mode the scale
    /// starts exactly at `x1`.
    #[must_use]
    pub fn auto_scale(&self, max_steps: usize, x1: f64, x2: f64) -> AutoScale {
        match self.mode {
            DateTimeMode::Absolute => self.linear().auto_scale(max_steps, x1, x2),
            DateTimeMode::SinceStart => {
                let auto = self.linear().auto_scale(max_steps, 0.0, x2 - x1);
                AutoScale {
                    x1,
                    x2: auto.x2 + x1,
                    step: auto.step,
                }
            }
        }
    }

    /// Linear division. In [`DateTimeMode::SinceStart`] mode ticks are placed
    /// relative to the start value (fixed start) or to `x1`.
    #[must_use]
    pub fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major: usize,
        max_minor: usize,
        step: f64,
    ) -> ScaleDiv {
        let linear = self.linear();
        match (self.mode, self.fixed_start) {
            (DateTimeMode::Absolute, _) => linear.divide_scale(x1, x2, max_major, max_minor, step),
            (DateTimeMode::SinceStart, true) => {
                let start = self.start_value;
                let div = linear.divide_scale(x1 - start, x2 - start, max_major, max_minor, step);
                shifted(&div, start)
            }
            (DateTimeMode::SinceStart, false) => {
                let div = linear.divide_scale(0.0, x2 - x1, max_major, max_minor, step);
                shifted(&div, x1)
            }
        }
    }

    /// Update the start value: the items' minimum, except for a floating
    /// start in [`DateTimeMode::SinceStart`] mode, which follows the lower
    /// bound of the current division.
    pub fn on_compute_scale_div(&mut self, items: &Interval, current: &ScaleDiv) {
        self.start_value = match (self.mode, self.fixed_start) {
            (DateTimeMode::SinceStart, false) => current.bounds().min_value(),
            _ => items.min_value(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale_div::TickType;

    #[test]
    fn test_absolute_matches_linear() {
        let engine = DateTimeScaleEngine::default();
        let linear = LinearScaleEngine::default();
        assert_eq!(engine.auto_scale(10, 3.0, 97.0), linear.auto_scale(10, 3.0, 97.0));
        assert_eq!(
            engine.divide_scale(3.0, 97.0, 10, 5, 0.0),
            linear.divide_scale(3.0, 97.0, 10, 5, 0.0)
        );
    }

    #[test]
    fn test_since_start_anchors_at_minimum() {
        let engine = DateTimeScaleEngine::default().with_mode(DateTimeMode::SinceStart, false);
        let auto = engine.auto_scale(10, 1_000.5, 1_093.0);
        assert_eq!(auto.x1, 1_000.5);

        let div = engine.divide_scale(1_000.5, 1_100.5, 10, 0, 0.0);
        assert_eq!(div.ticks(TickType::Major)[0], 1_000.5);
        assert!((div.ticks(TickType::Major)[1] - 1_010.5).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_start_rebases_on_start_value() {
        let mut engine = DateTimeScaleEngine::default().with_mode(DateTimeMode::SinceStart, true);
        engine.on_compute_scale_div(&Interval::new(1_000.0, 1_100.0), &ScaleDiv::default());
        assert_eq!(engine.start_value(), 1_000.0);

        let div = engine.divide_scale(1_005.0, 1_100.0, 10, 0, 10.0);
        assert_eq!(div.ticks(TickType::Major)[0], 1_010.0);
    }

    #[test]
    fn test_floating_start_follows_current_division() {
        let mut engine = DateTimeScaleEngine::default().with_mode(DateTimeMode::SinceStart, false);
        engine.on_compute_scale_div(&Interval::new(5.0, 6.0), &ScaleDiv::new(40.0, 20.0));
        assert_eq!(engine.start_value(), 20.0);
    }
}
