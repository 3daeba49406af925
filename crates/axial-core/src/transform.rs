//! Value transforms applied between scale values and paint coordinates.
//!
//! With `p1, p2` the paint interval and `s1, s2` the scale interval a
//! [`crate::ScaleMap`] computes
//! `p = p1 + (p2 - p1) * (T(s) - T(s1)) / (T(s2) - T(s1))`.

use std::fmt::Debug;

use crate::math::LOG_MIN;

/// Smallest value a [`LogTransform`] keeps on its scale interval.
pub const LOG_TRANSFORM_MIN: f64 = 1.0e-150;

/// Largest value a [`LogTransform`] keeps on its scale interval.
pub const LOG_TRANSFORM_MAX: f64 = 1.0e150;

/// A monotonic transform `T` and its inverse.
pub trait ValueTransform: Debug + Send + Sync {
    /// Forward transform.
    fn transform(&self, value: f64) -> f64;

    /// Inverse of [`ValueTransform::transform`].
    fn inv_transform(&self, value: f64) -> f64;

    /// Clamp `value` into the domain where the transform is defined.
    fn bounded(&self, value: f64) -> f64 {
        value
    }
}

/// Logarithmic transform. The base does not matter for the mapping, so the
/// natural logarithm is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogTransform;

impl ValueTransform for LogTransform {
    fn transform(&self, value: f64) -> f64 {
        value.max(LOG_MIN).ln()
    }

    fn inv_transform(&self, value: f64) -> f64 {
        value.exp()
    }

    fn bounded(&self, value: f64) -> f64 {
        value.clamp(LOG_TRANSFORM_MIN, LOG_TRANSFORM_MAX)
    }
}

/// Root transform preserving the sign, so scales can include negative values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerTransform {
    exponent: f64,
}

impl PowerTransform {
    /// Create a power transform. `transform` takes the `exponent`-th root and
    /// `inv_transform` raises back to `exponent`.
    #[must_use]
    pub const fn new(exponent: f64) -> Self {
        Self { exponent }
    }

    /// The exponent.
    #[must_use]
    pub const fn exponent(&self) -> f64 {
        self.exponent
    }
}

impl ValueTransform for PowerTransform {
    fn transform(&self, value: f64) -> f64 {
        if value < 0.0 {
            -(-value).powf(1.0 / self.exponent)
        } else {
            value.powf(1.0 / self.exponent)
        }
    }

    fn inv_transform(&self, value: f64) -> f64 {
        if value < 0.0 {
            -(-value).powf(self.exponent)
        } else {
            value.powf(self.exponent)
        }
    }
}
