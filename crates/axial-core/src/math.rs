//! Scale arithmetic: tolerant comparison, epsilon rounding and the 1-2-5 rule.

use std::cmp::Ordering;

/// Relative tolerance used by scale computations.
pub const SCALE_EPS: f64 = 1.0e-6;

/// Smallest value accepted on a logarithmic scale.
pub const LOG_MIN: f64 = 1.0e-100;

/// Largest value accepted on a logarithmic scale.
pub const LOG_MAX: f64 = 1.0e100;

/// Compare two values with a tolerance of `|1e-6 * interval_size|`.
#[must_use]
pub fn fuzzy_compare(value1: f64, value2: f64, interval_size: f64) -> Ordering {
    let eps = (SCALE_EPS * interval_size).abs();
    if value2 - value1 > eps {
        Ordering::Less
    } else if value1 - value2 > eps {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Ceil `value` to a multiple of `interval_size`, ignoring overshoots below
/// the relative tolerance.
#[must_use]
pub fn ceil_eps(value: f64, interval_size: f64) -> f64 {
    let eps = SCALE_EPS * interval_size;
    ((value - eps) / interval_size).ceil() * interval_size
}

/// Floor `value` to a multiple of `interval_size`, ignoring undershoots below
/// the relative tolerance.
#[must_use]
pub fn floor_eps(value: f64, interval_size: f64) -> f64 {
    let eps = SCALE_EPS * interval_size;
    ((value + eps) / interval_size).floor() * interval_size
}

/// `(interval_size - eps * interval_size) / num_steps`, 0 for empty input.
#[must_use]
pub fn divide_eps(interval_size: f64, num_steps: f64) -> f64 {
    if num_steps == 0.0 || interval_size == 0.0 {
        return 0.0;
    }
    (interval_size - SCALE_EPS * interval_size) / num_steps
}

/// Split `|x|` into its power of ten and the mantissa in `[1, 10)`.
fn decompose(x: f64) -> (f64, f64) {
    let lx = x.abs().log10();
    let p10 = lx.floor();
    (10f64.powf(lx - p10), p10)
}

/// Smallest value of the form `{1, 2, 5} * 10^n` greater than or equal to `x`.
#[must_use]
pub fn ceil_125(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    let sign = if x > 0.0 { 1.0 } else { -1.0 };
    let (fr, p10) = decompose(x);
    let fr = if fr <= 1.0 {
        1.0
    } else if fr <= 2.0 {
        2.0
    } else if fr <= 5.0 {
        5.0
    } else {
        10.0
    };
    sign * fr * 10f64.powf(p10)
}

/// Largest value of the form `{1, 2, 5} * 10^n` smaller than or equal to `x`.
#[must_use]
pub fn floor_125(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    let sign = if x > 0.0 { 1.0 } else { -1.0 };
    let (fr, p10) = decompose(x);
    let fr = if fr >= 10.0 {
        10.0
    } else if fr >= 5.0 {
        5.0
    } else if fr >= 2.0 {
        2.0
    } else {
        1.0
    };
    sign * fr * 10f64.powf(p10)
}
