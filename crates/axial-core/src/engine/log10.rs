use std::cmp::Ordering;

use crate::interval::Interval;
use crate::math::{ceil_eps, floor_eps, fuzzy_compare, LOG_MAX, LOG_MIN};
use crate::scale_div::ScaleDiv;

use super::linear::LinearScaleEngine;
use super::{build_interval, divide_interval, strip, AutoScale, EngineSettings};

const MAX_MAJOR_TICKS: usize = 10_000;

/// Base 10 logarithmic scale engine.
///
/// Margins are measured in decades. Below one decade the engine switches to
/// the linear rules; the step it then reports is `log10` of the linear step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Log10ScaleEngine {
    settings: EngineSettings,
}

impl Log10ScaleEngine {
    /// Create an engine.
    #[must_use]
    pub const fn new(settings: EngineSettings) -> Self {
        Self { settings }
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

    const fn linear(&self) -> LinearScaleEngine {
        LinearScaleEngine::new(self.settings)
    }

    /// Align and divide `[x1, x2]` in decades.
    #[must_use]
    pub fn auto_scale(&self, max_steps: usize, x1: f64, x2: f64) -> AutoScale {
        let attributes = self.settings.attributes;
        let (x1, x2) = clamp_to_log_domain(x1.min(x2), x1.max(x2));

        let mut interval = Interval::new(
            x1 / 10f64.powf(self.settings.lower_margin()),
            x2 * 10f64.powf(self.settings.upper_margin()),
        );

        if interval.max_value() / interval.min_value() < 10.0 {
            let auto = self.linear().auto_scale(max_steps, x1, x2);
            return AutoScale {
                step: encode_linear_step(auto.step),
                ..auto
            };
        }

        let reference = self.settings.reference;
        let log_ref = if reference > LOG_MIN / 2.0 {
            reference.min(LOG_MAX / 2.0)
        } else {
            1.0
        };

        if attributes.symmetric {
            let delta = (interval.max_value() / log_ref).max(log_ref / interval.min_value());
            interval = Interval::new(log_ref / delta, log_ref * delta);
        }
        if attributes.include_reference {
            interval = interval.extend(log_ref);
        }

        interval = interval.limited(LOG_MIN, LOG_MAX);
        if interval.width() == 0.0 {
            interval = build_interval(interval.min_value());
        }

        replace_log_min(&mut interval, max_steps);
        floor_lower_bound(&mut interval);

        let mut step = divide_interval(log10(&interval).width(), max_steps.max(1)).max(1.0);
        if !attributes.floating {
            interval = Self::align(&interval, step);
        }

        let (mut x1, mut x2) = (interval.min_value(), interval.max_value());
        if attributes.inverted {
            std::mem::swap(&mut x1, &mut x2);
            step = -step;
        }
        AutoScale { x1, x2, step }
    }

    /// Build a division for `[x1, x2]`. `step` is in decades, or the value
    /// reported by [`Log10ScaleEngine::auto_scale`] below one decade.
    #[must_use]
    pub fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major: usize,
        max_minor: usize,
        step: f64,
    ) -> ScaleDiv {
        let (x1, x2) = if x1 <= 0.0 {
            clamp_to_log_domain(x1, x2)
        } else {
            (x1, x2)
        };

        let mut interval = Interval::new(x1, x2).normalized().limited(LOG_MIN, LOG_MAX);
        if interval.width() <= 0.0 {
            return ScaleDiv::default();
        }

        replace_log_min(&mut interval, max_major);

        if interval.max_value() / interval.min_value() < 10.0 {
            let step = if step == 0.0 {
                0.0
            } else {
                decode_linear_step(step)
            };
            return self.linear().divide_scale(x1, x2, max_major, max_minor, step);
        }

        let mut step = step.abs();
        if step == 0.0 {
            // one decade at least
            step = divide_interval(log10(&interval).width(), max_major.max(1)).max(1.0);
        }

        let ticks = Self::build_ticks(&interval, step, max_minor);
        let mut div = ScaleDiv::from_interval(&interval, ticks);
        if x1 > x2 {
            div.invert();
        }
        div
    }

    fn build_ticks(interval: &Interval, step: f64, max_minor: usize) -> [Vec<f64>; 3] {
        let bounding = Self::align(interval, step);
        let major = Self::build_major_ticks(&bounding, step);
        let minor = if max_minor > 0 {
            Self::build_minor_ticks(&major, max_minor, step)
        } else {
            Vec::new()
        };
        [minor, Vec::new(), major].map(|ticks| strip(ticks, interval))
    }

    fn build_major_ticks(interval: &Interval, step: f64) -> Vec<f64> {
        let width = log10(interval).width();
        let count = ((width / step).round() as usize + 1).min(MAX_MAJOR_TICKS);

        let lmin = interval.min_value().ln();
        let lmax = interval.max_value().ln();
        let lstep = (lmax - lmin) / (count.max(2) - 1) as f64;

        let mut ticks = Vec::with_capacity(count + 2);
        ticks.push(interval.min_value());
        for i in 1..count.saturating_sub(1) {
            ticks.push((lmin + i as f64 * lstep).exp());
        }
        ticks.push(interval.max_value());
        ticks
    }

    fn build_minor_ticks(major: &[f64], max_minor: usize, step: f64) -> Vec<f64> {
        if step < 1.1 {
            // one decade per major step: fixed multipliers
            let (k0, kmax, kstep) = match max_minor {
                8.. => (2, 9, 1),
                4..=7 => (2, 8, 2),
                2..=3 => (2, 5, 3),
                _ => (5, 5, 1),
            };
            return major
                .iter()
                .flat_map(|&v| (k0..=kmax).step_by(kstep).map(move |k| v * f64::from(k)))
                .collect();
        }

        let min_step = divide_interval(step, max_minor);
        if min_step == 0.0 {
            return Vec::new();
        }
        let min_step = min_step.max(1.0);

        let mut count = (step / min_step).round() as i64 - 1;
        if fuzzy_compare((count + 1) as f64 * min_step, step.abs(), step) == Ordering::Greater {
            count = 0;
        }
        if count < 1 {
            return Vec::new();
        }

        let factor = 10f64.powf(min_step).max(10.0);
        let mut minor = Vec::with_capacity(major.len() * count as usize);
        for &tick in major {
            let mut value = tick;
            for _ in 0..count {
                value *= factor;
                minor.push(value);
            }
        }
        minor
    }

    /// Align both limits on whole multiples of `step` decades.
    fn align(interval: &Interval, step: f64) -> Interval {
        let logs = log10(interval);

        let mut x1 = floor_eps(logs.min_value(), step);
        if fuzzy_compare(logs.min_value(), x1, step) == Ordering::Equal {
            x1 = logs.min_value();
        }
        let mut x2 = ceil_eps(logs.max_value(), step);
        if fuzzy_compare(logs.max_value(), x2, step) == Ordering::Equal {
            x2 = logs.max_value();
        }
        Interval::new(10f64.powf(x1), 10f64.powf(x2))
    }
}

/// Non-positive lower bounds become `LOG_MIN`; an interval lying entirely
/// at or below 0 becomes `[LOG_MIN, 10]`.
fn clamp_to_log_domain(x1: f64, x2: f64) -> (f64, f64) {
    if x1 > 0.0 {
        return (x1, x2);
    }
    if x2 > 0.0 {
        (LOG_MIN, x2)
    } else {
        (LOG_MIN, 10.0)
    }
}

/// A lower bound stuck at `LOG_MIN` spans a hundred decades; pull it up so
/// that `max_steps` decades end at the upper bound.
fn replace_log_min(interval: &mut Interval, max_steps: usize) {
    if interval.min_value() != LOG_MIN || interval.max_value() <= 0.0 {
        return;
    }
    let upper_power = interval.max_value().log10().ceil();
    let missing = (max_steps as f64 - upper_power).max(0.0);
    let min = 10f64.powf(-missing);
    if min < interval.max_value() {
        interval.set_min_value(min);
    }
}

fn floor_lower_bound(interval: &mut Interval) {
    let floor = if interval.max_value() >= 1000.0 {
        0.1
    } else if interval.max_value() >= 100.0 {
        0.01
    } else if interval.max_value() >= 10.0 {
        0.001
    } else {
        return;
    };
    interval.set_min_value(interval.min_value().max(floor));
}

fn log10(interval: &Interval) -> Interval {
    Interval::new(interval.min_value().log10(), interval.max_value().log10())
}

fn encode_linear_step(step: f64) -> f64 {
    step.abs().log10()
}

fn decode_linear_step(step: f64) -> f64 {
    10f64.powf(step)
}
