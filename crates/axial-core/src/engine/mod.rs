//! Scale engines.
//!
//! An engine turns a data interval into a "nice" boundary interval and step
//! ([`ScaleEngine::auto_scale`]) and then into a [`ScaleDiv`]
//! ([`ScaleEngine::divide_scale`]). The set of engines is closed, so they are
//! dispatched through the [`ScaleEngine`] enum.
//!
//! # Example
//!
//! ```
//! use axial_core::{ScaleEngine, TickType};
//!
//! let engine = ScaleEngine::linear();
//! let auto = engine.auto_scale(10, 0.3, 9.7);
//! let div = engine.divide_scale(auto.x1, auto.x2, 10, 5, auto.step);
//! assert_eq!(div.lower_bound(), 0.0);
//! assert_eq!(div.upper_bound(), 10.0);
//! assert_eq!(div.ticks(TickType::Major).len(), 11);
//! ```

mod datetime;
mod fixed;
mod linear;
mod log10;

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::interval::Interval;
use crate::math::{ceil_125, divide_eps, fuzzy_compare};
use crate::scale_div::{ScaleDiv, TickType};
use crate::transform::{LogTransform, ValueTransform};

pub use datetime::{DateTimeMode, DateTimeScaleEngine};
pub use fixed::FixedScaleEngine;
pub use linear::LinearScaleEngine;
pub use log10::Log10ScaleEngine;

/// Engine flags applied by `auto_scale`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineAttributes {
    /// Extend the interval to contain the reference value.
    pub include_reference: bool,
    /// Make the interval symmetric around the reference value.
    pub symmetric: bool,
    /// Keep the data bounds instead of aligning them to the step.
    pub floating: bool,
    /// Swap the resulting bounds.
    pub inverted: bool,
}

/// Attributes, reference value and margins shared by all engines.
///
/// Margins are in scale units; the log engine reads them in decades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Attribute flags.
    pub attributes: EngineAttributes,
    /// Reference value for `symmetric` and `include_reference`.
    pub reference: f64,
    lower_margin: f64,
    upper_margin: f64,
}

impl EngineSettings {
    /// Settings with the given attributes and no margins.
    #[must_use]
    pub const fn with_attributes(attributes: EngineAttributes) -> Self {
        Self {
            attributes,
            reference: 0.0,
            lower_margin: 0.0,
            upper_margin: 0.0,
        }
    }

    /// Margin below the smallest enclosed value.
    #[must_use]
    pub const fn lower_margin(&self) -> f64 {
        self.lower_margin
    }

    /// Margin above the greatest enclosed value.
    #[must_use]
    pub const fn upper_margin(&self) -> f64 {
        self.upper_margin
    }

    /// Set both margins. Negative values are clamped to 0.
    pub fn set_margins(&mut self, lower: f64, upper: f64) {
        self.lower_margin = lower.max(0.0);
        self.upper_margin = upper.max(0.0);
    }
}

/// Boundary interval and step computed by [`ScaleEngine::auto_scale`].
///
/// `x1 > x2` and a negative step describe an inverted scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScale {
    /// First bound
    pub x1: f64,
    /// Second bound
    pub x2: f64,
    /// Major step
    pub step: f64,
}

/// Streaming optimization change requested by an engine before a division
/// is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamingHint {
    /// Turn streaming optimization on with the given relative width factor.
    Enable {
        /// Relative width change below which the previous width is kept.
        factor: f64,
    },
    /// Turn streaming optimization off.
    Disable,
}

/// Engine discriminant, used by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleEngineKind {
    /// [`LinearScaleEngine`]
    #[default]
    Linear,
    /// [`Log10ScaleEngine`]
    Log10,
    /// [`FixedScaleEngine`]
    Fixed,
    /// [`DateTimeScaleEngine`]
    DateTime,
}

/// One of the available scale engines.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleEngine {
    /// Arithmetic scale.
    Linear(LinearScaleEngine),
    /// Base 10 logarithmic scale.
    Log10(Log10ScaleEngine),
    /// Linear scale re-based on a moving start value.
    Fixed(FixedScaleEngine),
    /// Linear scale for time values.
    DateTime(DateTimeScaleEngine),
}

impl Default for ScaleEngine {
    fn default() -> Self {
        Self::linear()
    }
}

impl ScaleEngine {
    /// Linear engine with default settings.
    #[must_use]
    pub fn linear() -> Self {
        Self::Linear(LinearScaleEngine::default())
    }

    /// Log10 engine with default settings.
    #[must_use]
    pub fn log10() -> Self {
        Self::Log10(Log10ScaleEngine::default())
    }

    /// Default engine of the given kind.
    #[must_use]
    pub fn from_kind(kind: ScaleEngineKind, settings: EngineSettings) -> Self {
        match kind {
            ScaleEngineKind::Linear => Self::Linear(LinearScaleEngine::new(settings)),
            ScaleEngineKind::Log10 => Self::Log10(Log10ScaleEngine::new(settings)),
            ScaleEngineKind::Fixed => Self::Fixed(FixedScaleEngine::new(settings)),
            ScaleEngineKind::DateTime => Self::DateTime(DateTimeScaleEngine::new(settings)),
        }
    }

    /// Engine discriminant.
    #[must_use]
    pub const fn kind(&self) -> ScaleEngineKind {
        match self {
            Self::Linear(_) => ScaleEngineKind::Linear,
            Self::Log10(_) => ScaleEngineKind::Log10,
            Self::Fixed(_) => ScaleEngineKind::Fixed,
            Self::DateTime(_) => ScaleEngineKind::DateTime,
        }
    }

    /// Shared settings.
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        match self {
            Self::Linear(e) => e.settings(),
            Self::Log10(e) => e.settings(),
            Self::Fixed(e) => e.settings(),
            Self::DateTime(e) => e.settings(),
        }
    }

    /// Mutable shared settings.
    pub fn settings_mut(&mut self) -> &mut EngineSettings {
        match self {
            Self::Linear(e) => e.settings_mut(),
            Self::Log10(e) => e.settings_mut(),
            Self::Fixed(e) => e.settings_mut(),
            Self::DateTime(e) => e.settings_mut(),
        }
    }

    /// Value transform a [`crate::ScaleMap`] should use for this engine.
    #[must_use]
    pub fn transformation(&self) -> Option<Arc<dyn ValueTransform>> {
        match self {
            Self::Log10(_) => Some(Arc::new(LogTransform)),
            Self::Linear(_) | Self::Fixed(_) | Self::DateTime(_) => None,
        }
    }

    /// Compute a boundary interval and a step for `[x1, x2]`.
    ///
    /// Non-finite bounds are replaced by the other bound, or by 0.
    #[must_use]
    pub fn auto_scale(&self, max_steps: usize, x1: f64, x2: f64) -> AutoScale {
        let (x1, x2) = sanitize(x1, x2);
        match self {
            Self::Linear(e) => e.auto_scale(max_steps, x1, x2),
            Self::Log10(e) => e.auto_scale(max_steps, x1, x2),
            Self::Fixed(e) => e.auto_scale(max_steps, x1, x2),
            Self::DateTime(e) => e.auto_scale(max_steps, x1, x2),
        }
    }

    /// Build a scale division for `[x1, x2]`. A zero `step` lets the engine
    /// pick one from `max_major`.
    #[must_use]
    pub fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major: usize,
        max_minor: usize,
        step: f64,
    ) -> ScaleDiv {
        let (x1, x2) = sanitize(x1, x2);
        let step = if step.is_finite() { step } else { 0.0 };
        let div = match self {
            Self::Linear(e) => e.divide_scale(x1, x2, max_major, max_minor, step),
            Self::Log10(e) => e.divide_scale(x1, x2, max_major, max_minor, step),
            Self::Fixed(e) => e.divide_scale(x1, x2, max_major, max_minor, step),
            Self::DateTime(e) => e.divide_scale(x1, x2, max_major, max_minor, step),
        };
        trace!(
            kind = ?self.kind(),
            lower = div.lower_bound(),
            upper = div.upper_bound(),
            major = div.ticks(TickType::Major).len(),
            "divided scale"
        );
        div
    }

    /// Hook run by an axis right before its division is recomputed, with the
    /// data interval of its items and its current division.
    pub fn on_compute_scale_div(
        &mut self,
        items: &Interval,
        current: &ScaleDiv,
    ) -> Option<StreamingHint> {
        match self {
            Self::Linear(_) | Self::Log10(_) => None,
            Self::Fixed(e) => Some(e.on_compute_scale_div(items)),
            Self::DateTime(e) => {
                e.on_compute_scale_div(items, current);
                None
            }
        }
    }
}

fn sanitize(x1: f64, x2: f64) -> (f64, f64) {
    if !(x1.is_finite() && x2.is_finite()) {
        debug!(x1, x2, "non-finite scale bounds replaced");
    }
    match (x1.is_finite(), x2.is_finite()) {
        (true, true) => (x1, x2),
        (true, false) => (x1, x1),
        (false, true) => (x2, x2),
        (false, false) => (0.0, 0.0),
    }
}

/// Step size for `interval_size` split in at most `num_steps` steps, rounded
/// up to `{1, 2, 5} * 10^n`. Zero steps give a zero step.
#[must_use]
pub fn divide_interval(interval_size: f64, num_steps: usize) -> f64 {
    if num_steps == 0 {
        return 0.0;
    }
    ceil_125(divide_eps(interval_size, num_steps as f64))
}

/// Interval containment with the relative scale tolerance.
pub(crate) fn fuzzy_contains(interval: &Interval, value: f64) -> bool {
    if !interval.is_valid() {
        return false;
    }
    let width = interval.width();
    fuzzy_compare(value, interval.min_value(), width) != Ordering::Less
        && fuzzy_compare(value, interval.max_value(), width) != Ordering::Greater
}

/// Drop the ticks lying outside `interval`.
pub(crate) fn strip(ticks: Vec<f64>, interval: &Interval) -> Vec<f64> {
    if !interval.is_valid() || ticks.is_empty() {
        return Vec::new();
    }
    let first = ticks[0];
    let last = ticks[ticks.len() - 1];
    if fuzzy_contains(interval, first) && fuzzy_contains(interval, last) {
        return ticks;
    }
    ticks
        .into_iter()
        .filter(|&v| fuzzy_contains(interval, v))
        .collect()
}

/// Interval around a single value: `[-0.5, 0.5]` for 0, otherwise
/// `[v - |v| / 2, v + |v| / 2]`, kept inside the finite range.
pub(crate) fn build_interval(v: f64) -> Interval {
    let delta = if v == 0.0 { 0.5 } else { (0.5 * v).abs() };
    if f64::MAX - delta < v {
        return Interval::new(f64::MAX - delta, f64::MAX);
    }
    if -f64::MAX + delta > v {
        return Interval::new(-f64::MAX, -f64::MAX + delta);
    }
    Interval::new(v - delta, v + delta)
}

/// Shift every tick and both bounds of a division by `offset`.
pub(crate) fn shifted(div: &ScaleDiv, offset: f64) -> ScaleDiv {
    let bounds = div.bounds();
    let ticks = TickType::ALL
        .map(|t| div.ticks(t).iter().map(|v| v + offset).collect());
    ScaleDiv::with_ticks(bounds.min_value() + offset, bounds.max_value() + offset, ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_interval() {
        assert_eq!(divide_interval(10.0, 0), 0.0);
        assert!((divide_interval(1.0, 10) - 0.1).abs() < 1e-15);
        assert!((divide_interval(7.0, 5) - 2.0).abs() < 1e-15);
        assert!((divide_interval(100.0, 3) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_build_interval() {
        assert_eq!(build_interval(0.0), Interval::new(-0.5, 0.5));
        assert_eq!(build_interval(4.0), Interval::new(2.0, 6.0));
        assert_eq!(build_interval(-4.0), Interval::new(-6.0, -2.0));
        let big = build_interval(f64::MAX);
        assert_eq!(big.max_value(), f64::MAX);
        assert!(big.is_valid());
    }

    #[test]
    fn test_strip() {
        let interval = Interval::new(0.0, 1.0);
        assert_eq!(strip(vec![0.0, 0.5, 1.0], &interval), vec![0.0, 0.5, 1.0]);
        assert_eq!(strip(vec![-0.5, 0.5, 1.5], &interval), vec![0.5]);
        assert!(strip(vec![0.5], &Interval::default()).is_empty());
        // tolerance of 1e-6 of the width
        assert_eq!(strip(vec![1.000_000_1], &interval), vec![1.000_000_1]);
    }

    #[test]
    fn test_settings_margins_clamped() {
        let mut s = EngineSettings::default();
        s.set_margins(-1.0, 2.0);
        assert_eq!(s.lower_margin(), 0.0);
        assert_eq!(s.upper_margin(), 2.0);
    }

    #[test]
    fn test_sanitize_non_finite() {
        let engine = ScaleEngine::linear();
        let auto = engine.auto_scale(10, f64::NAN, f64::NAN);
        assert_eq!((auto.x1, auto.x2), (-0.5, 0.5));
        let auto = engine.auto_scale(10, 2.0, f64::INFINITY);
        assert!(auto.x1.is_finite() && auto.x2.is_finite());
        assert!(auto.x1 <= 2.0 && auto.x2 >= 2.0);
    }

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            ScaleEngineKind::Linear,
            ScaleEngineKind::Log10,
            ScaleEngineKind::Fixed,
            ScaleEngineKind::DateTime,
        ] {
            assert_eq!(ScaleEngine::from_kind(kind, EngineSettings::default()).kind(), kind);
        }
        assert!(ScaleEngine::log10().transformation().is_some());
        assert!(ScaleEngine::linear().transformation().is_none());
    }
}
