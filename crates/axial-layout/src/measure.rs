//! Contracts with the rendering and data layers.
//!
//! Layout only knows how thick an axis is through [`MeasureExtent`], and
//! auto-scaling only sees data through [`DataIntervals`]. Both are
//! implemented for closures so callers can plug in font metrics and data
//! bounds without wrapper types.

use std::collections::HashMap;

use axial_core::Interval;

use crate::axis::AxisId;

/// Thickness an axis needs to draw its backbone, ticks, labels and title.
pub trait MeasureExtent {
    /// Thickness of `axis` when it is `length` units long.
    fn extent(&self, axis: AxisId, length: f64) -> f64;

    /// Extra space the first and last labels of `axis` need beyond its
    /// ends, as `(start, end)`.
    fn border_dist_hint(&self, _axis: AxisId) -> (f64, f64) {
        (0.0, 0.0)
    }
}

impl<F> MeasureExtent for F
where
    F: Fn(AxisId, f64) -> f64,
{
    fn extent(&self, axis: AxisId, length: f64) -> f64 {
        self(axis, length)
    }
}

/// Source of the data interval of every axis.
pub trait DataIntervals {
    /// Union of the bounding intervals of the visible, auto-scaled items
    /// attached to `axis`. An invalid interval means no data.
    fn data_interval(&self, axis: AxisId) -> Interval;
}

impl<F> DataIntervals for F
where
    F: Fn(AxisId) -> Interval,
{
    fn data_interval(&self, axis: AxisId) -> Interval {
        self(axis)
    }
}

/// Constant extents and border hints per axis.
#[derive(Debug, Clone, Default)]
pub struct ExtentTable {
    extents: HashMap<AxisId, f64>,
    hints: HashMap<AxisId, (f64, f64)>,
}

impl ExtentTable {
    /// Create an empty table. Unknown axes measure 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extent of an axis.
    #[must_use]
    pub fn with_extent(mut self, axis: AxisId, extent: f64) -> Self {
        self.extents.insert(axis, extent);
        self
    }

    /// Set the border distance hint of an axis.
    #[must_use]
    pub fn with_hint(mut self, axis: AxisId, start: f64, end: f64) -> Self {
        self.hints.insert(axis, (start, end));
        self
    }

    /// Set the extent of an axis in place.
    pub fn set_extent(&mut self, axis: AxisId, extent: f64) {
        self.extents.insert(axis, extent);
    }
}

impl MeasureExtent for ExtentTable {
    fn extent(&self, axis: AxisId, _length: f64) -> f64 {
        self.extents.get(&axis).copied().unwrap_or(0.0)
    }

    fn border_dist_hint(&self, axis: AxisId) -> (f64, f64) {
        self.hints.get(&axis).copied().unwrap_or((0.0, 0.0))
    }
}
