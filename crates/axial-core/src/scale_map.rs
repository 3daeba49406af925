//! Mapping between scale values and paint-device coordinates.

use std::sync::Arc;

use crate::transform::ValueTransform;

/// Maps a scale interval `[s1, s2]` onto a paint interval `[p1, p2]`,
/// optionally through a [`ValueTransform`].
///
/// The conversion factor is cached and recomputed whenever one of the two
/// intervals or the transform changes.
#[derive(Debug, Clone)]
pub struct ScaleMap {
    s1: f64,
    s2: f64,
    p1: f64,
    p2: f64,
    ts1: f64,
    cnv: f64,
    degenerate: bool,
    transform: Option<Arc<dyn ValueTransform>>,
}

impl Default for ScaleMap {
    fn default() -> Self {
        let mut map = Self {
            s1: 0.0,
            s2: 1.0,
            p1: 0.0,
            p2: 1.0,
            ts1: 0.0,
            cnv: 1.0,
            degenerate: false,
            transform: None,
        };
        map.update_factor();
        map
    }
}

impl ScaleMap {
    /// Identity map over `[0, 1]`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from both intervals at once.
    #[must_use]
    pub fn with_intervals(s1: f64, s2: f64, p1: f64, p2: f64) -> Self {
        let mut map = Self::default();
        map.set_scale_interval(s1, s2);
        map.set_paint_interval(p1, p2);
        map
    }

    /// Install (or remove) the value transform.
    pub fn set_transformation(&mut self, transform: Option<Arc<dyn ValueTransform>>) {
        self.transform = transform;
        self.set_scale_interval(self.s1, self.s2);
    }

    /// The value transform, if any.
    #[must_use]
    pub fn transformation(&self) -> Option<&Arc<dyn ValueTransform>> {
        self.transform.as_ref()
    }

    /// Set the scale interval. With a transform, both borders are first
    /// clamped into the transform's domain.
    pub fn set_scale_interval(&mut self, s1: f64, s2: f64) {
        let (s1, s2) = match &self.transform {
            Some(t) => (t.bounded(s1), t.bounded(s2)),
            None => (s1, s2),
        };
        self.s1 = s1;
        self.s2 = s2;
        self.update_factor();
    }

    /// Set the paint interval.
    pub fn set_paint_interval(&mut self, p1: f64, p2: f64) {
        self.p1 = p1;
        self.p2 = p2;
        self.update_factor();
    }

    fn forward(&self, s: f64) -> f64 {
        match &self.transform {
            Some(t) => t.transform(s),
            None => s,
        }
    }

    fn backward(&self, s: f64) -> f64 {
        match &self.transform {
            Some(t) => t.inv_transform(s),
            None => s,
        }
    }

    fn update_factor(&mut self) {
        self.ts1 = self.forward(self.s1);
        let ts2 = self.forward(self.s2);
        self.degenerate = self.ts1 == ts2;
        self.cnv = if self.degenerate {
            1.0
        } else {
            (self.p2 - self.p1) / (ts2 - self.ts1)
        };
    }

    /// Scale value to paint coordinate.
    #[must_use]
    pub fn transform(&self, s: f64) -> f64 {
        if self.degenerate {
            return self.p1;
        }
        self.p1 + (self.forward(s) - self.ts1) * self.cnv
    }

    /// Paint coordinate to scale value.
    #[must_use]
    pub fn inv_transform(&self, p: f64) -> f64 {
        if self.degenerate {
            return self.s1;
        }
        self.backward(self.ts1 + (p - self.p1) / self.cnv)
    }

    /// Unsigned distance in paint units between `s` and the scale origin `s1`.
    #[must_use]
    pub fn distance_to_origin(&self, s: f64) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        (self.forward(s) - self.ts1) * self.cnv.abs()
    }

    /// Inverse of [`ScaleMap::distance_to_origin`].
    #[must_use]
    pub fn inv_distance_to_origin(&self, p: f64) -> f64 {
        if self.degenerate {
            return self.s1;
        }
        self.backward(self.ts1 + p / self.cnv.abs())
    }

    /// True when the paint interval runs against the scale interval.
    #[must_use]
    pub fn is_inverting(&self) -> bool {
        (self.p1 < self.p2) != (self.s1 < self.s2)
    }

    /// First border of the scale interval.
    #[must_use]
    pub const fn s1(&self) -> f64 {
        self.s1
    }

    /// Second border of the scale interval.
    #[must_use]
    pub const fn s2(&self) -> f64 {
        self.s2
    }

    /// First border of the paint interval.
    #[must_use]
    pub const fn p1(&self) -> f64 {
        self.p1
    }

    /// Second border of the paint interval.
    #[must_use]
    pub const fn p2(&self) -> f64 {
        self.p2
    }

    /// `|p2 - p1|`
    #[must_use]
    pub fn p_dist(&self) -> f64 {
        (self.p2 - self.p1).abs()
    }

    /// `|s2 - s1|`
    #[must_use]
    pub fn s_dist(&self) -> f64 {
        (self.s2 - self.s1).abs()
    }
}
