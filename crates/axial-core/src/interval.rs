//! Numeric intervals with inclusive or exclusive borders.
//!
//! Comparisons in this module are exact. Tolerances only appear one layer up,
//! in [`crate::ScaleDiv`] and the scale engines.

use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Which borders of an interval are excluded from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorderFlags {
    /// Both limits are inside the interval.
    #[default]
    IncludeBorders,
    /// The minimum is not part of the interval.
    ExcludeMinimum,
    /// The maximum is not part of the interval.
    ExcludeMaximum,
    /// Neither limit is part of the interval.
    ExcludeBorders,
}

impl BorderFlags {
    /// Build flags from the two exclusion bits.
    #[must_use]
    pub const fn from_exclusions(exclude_min: bool, exclude_max: bool) -> Self {
        match (exclude_min, exclude_max) {
            (false, false) => Self::IncludeBorders,
            (true, false) => Self::ExcludeMinimum,
            (false, true) => Self::ExcludeMaximum,
            (true, true) => Self::ExcludeBorders,
        }
    }

    /// Whether the minimum is excluded.
    #[must_use]
    pub const fn excludes_min(self) -> bool {
        matches!(self, Self::ExcludeMinimum | Self::ExcludeBorders)
    }

    /// Whether the maximum is excluded.
    #[must_use]
    pub const fn excludes_max(self) -> bool {
        matches!(self, Self::ExcludeMaximum | Self::ExcludeBorders)
    }

    /// Swap the minimum and maximum exclusions.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self::from_exclusions(self.excludes_max(), self.excludes_min())
    }
}

/// A closed, open or half-open range `[min, max]`.
///
/// An interval with `min > max` is inverted and reported invalid; see
/// [`Interval::normalized`]. The default interval is the invalid `[0, -1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    min: f64,
    max: f64,
    #[serde(default)]
    flags: BorderFlags,
}

impl Default for Interval {
    fn default() -> Self {
        Self::new(0.0, -1.0)
    }
}

impl Interval {
    /// Create an interval including both borders.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            flags: BorderFlags::IncludeBorders,
        }
    }

    /// Create an interval with explicit border flags.
    #[must_use]
    pub const fn with_flags(min: f64, max: f64, flags: BorderFlags) -> Self {
        Self { min, max, flags }
    }

    /// Lower limit.
    #[must_use]
    pub const fn min_value(&self) -> f64 {
        self.min
    }

    /// Upper limit.
    #[must_use]
    pub const fn max_value(&self) -> f64 {
        self.max
    }

    /// Border flags.
    #[must_use]
    pub const fn border_flags(&self) -> BorderFlags {
        self.flags
    }

    /// Set the lower limit.
    pub fn set_min_value(&mut self, min: f64) {
        self.min = min;
    }

    /// Set the upper limit.
    pub fn set_max_value(&mut self, max: f64) {
        self.max = max;
    }

    /// Set the border flags.
    pub fn set_border_flags(&mut self, flags: BorderFlags) {
        self.flags = flags;
    }

    /// Reset to the invalid interval `[0, -1]`.
    pub fn invalidate(&mut self) {
        self.min = 0.0;
        self.max = -1.0;
    }

    /// `min <= max`, or `min < max` as soon as one border is excluded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.flags == BorderFlags::IncludeBorders {
            self.min <= self.max
        } else {
            self.min < self.max
        }
    }

    /// Valid with `min >= max`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.is_valid() && self.min >= self.max
    }

    /// `max - min`, or 0 for invalid intervals.
    #[must_use]
    pub fn width(&self) -> f64 {
        if self.is_valid() {
            self.max - self.min
        } else {
            0.0
        }
    }

    /// Swap the limits when the interval is inverted.
    #[must_use]
    pub fn normalized(&self) -> Self {
        if self.min > self.max {
            return self.inverted();
        }
        if self.min == self.max && self.flags == BorderFlags::ExcludeMinimum {
            return self.inverted();
        }
        *self
    }

    /// Swap the limits together with their exclusion flags.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self::with_flags(self.max, self.min, self.flags.swapped())
    }

    /// Test if a value lies inside the interval, honouring excluded borders.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        if !self.is_valid() {
            return false;
        }
        if value < self.min || value > self.max {
            return false;
        }
        if value == self.min && self.flags.excludes_min() {
            return false;
        }
        if value == self.max && self.flags.excludes_max() {
            return false;
        }
        true
    }

    /// Smallest interval covering both operands.
    ///
    /// An invalid operand is ignored; two invalid operands give the default
    /// invalid interval. A border stays excluded only if the operand that
    /// supplied it excludes it, or, on a tie, if both operands do.
    #[must_use]
    pub fn unite(&self, other: &Self) -> Self {
        if !self.is_valid() {
            return if other.is_valid() {
                *other
            } else {
                Self::default()
            };
        }
        if !other.is_valid() {
            return *self;
        }

        let (min, exclude_min) = if self.min < other.min {
            (self.min, self.flags.excludes_min())
        } else if other.min < self.min {
            (other.min, other.flags.excludes_min())
        } else {
            (
                self.min,
                self.flags.excludes_min() && other.flags.excludes_min(),
            )
        };

        let (max, exclude_max) = if self.max > other.max {
            (self.max, self.flags.excludes_max())
        } else if other.max > self.max {
            (other.max, other.flags.excludes_max())
        } else {
            (
                self.max,
                self.flags.excludes_max() && other.flags.excludes_max(),
            )
        };

        Self::with_flags(min, max, BorderFlags::from_exclusions(exclude_min, exclude_max))
    }

    /// Order two intervals so that the first one starts first. On equal
    /// minimums the one excluding its minimum goes second.
    fn ordered<'a>(a: &'a Self, b: &'a Self) -> (&'a Self, &'a Self) {
        if a.min > b.min || (a.min == b.min && a.flags.excludes_min()) {
            (b, a)
        } else {
            (a, b)
        }
    }

    /// Overlap of both operands, invalid when they are disjoint.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        if !self.is_valid() || !other.is_valid() {
            return Self::default();
        }

        let (i1, i2) = Self::ordered(self, other);

        if i1.max < i2.min {
            return Self::default();
        }
        if i1.max == i2.min && (i1.flags.excludes_max() || i2.flags.excludes_min()) {
            return Self::default();
        }

        let exclude_min = i2.flags.excludes_min();
        let (max, exclude_max) = if i1.max < i2.max {
            (i1.max, i1.flags.excludes_max())
        } else if i2.max < i1.max {
            (i2.max, i2.flags.excludes_max())
        } else {
            (i1.max, i1.flags.excludes_max() && i2.flags.excludes_max())
        };

        Self::with_flags(i2.min, max, BorderFlags::from_exclusions(exclude_min, exclude_max))
    }

    /// Test if both operands overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }

        let (i1, i2) = Self::ordered(self, other);

        if i1.max > i2.min {
            return true;
        }
        if i1.max == i2.min {
            return !(i1.flags.excludes_max() || i2.flags.excludes_min());
        }
        false
    }

    /// Recenter the interval on `value`, keeping the larger half-width.
    #[must_use]
    pub fn symmetrize(&self, value: f64) -> Self {
        if !self.is_valid() {
            return *self;
        }
        let delta = (value - self.max).abs().max((value - self.min).abs());
        Self::new(value - delta, value + delta)
    }

    /// Clamp both limits into `[lower, upper]`, keeping the border flags.
    #[must_use]
    pub fn limited(&self, lower: f64, upper: f64) -> Self {
        if !self.is_valid() || lower > upper {
            return Self::default();
        }
        let min = self.min.max(lower).min(upper);
        let max = self.max.max(lower).min(upper);
        Self::with_flags(min, max, self.flags)
    }

    /// Widen the interval to include `value`. An invalid interval becomes
    /// `[value, value]`.
    #[must_use]
    pub fn extend(&self, value: f64) -> Self {
        if !self.is_valid() {
            return Self::with_flags(value, value, self.flags);
        }
        Self::with_flags(self.min.min(value), self.max.max(value), self.flags)
    }
}

impl BitOr for Interval {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.unite(&rhs)
    }
}

impl BitOrAssign for Interval {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.unite(&rhs);
    }
}

impl BitOr<f64> for Interval {
    type Output = Self;

    fn bitor(self, rhs: f64) -> Self::Output {
        self.extend(rhs)
    }
}

impl BitAnd for Interval {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersect(&rhs)
    }
}

impl BitAndAssign for Interval {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersect(&rhs);
    }
}
