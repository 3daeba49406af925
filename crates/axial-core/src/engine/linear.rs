use std::cmp::Ordering;

use crate::interval::Interval;
use crate::math::{ceil_eps, floor_eps, fuzzy_compare};
use crate::scale_div::ScaleDiv;

use super::{build_interval, divide_interval, strip, AutoScale, EngineSettings};

/// Upper limit on the number of major ticks of one division.
const MAX_MAJOR_TICKS: usize = 10_000;

/// Arithmetic scale engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearScaleEngine {
    settings: EngineSettings,
}

impl LinearScaleEngine {
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

    /// Align and divide `[x1, x2]`.
    ///
    /// Margins, then symmetry and reference inclusion are applied to the
    /// normalized interval. A zero-width result is widened around its value.
    #[must_use]
    pub fn auto_scale(&self, max_steps: usize, x1: f64, x2: f64) -> AutoScale {
        let attributes = self.settings.attributes;
        let mut interval = Interval::new(x1, x2).normalized();

        interval.set_min_value(interval.min_value() - self.settings.lower_margin());
        interval.set_max_value(interval.max_value() + self.settings.upper_margin());

        if attributes.symmetric {
            interval = interval.symmetrize(self.settings.reference);
        }
        if attributes.include_reference {
            interval = interval.extend(self.settings.reference);
        }
        if interval.width() == 0.0 {
            interval = build_interval(interval.min_value());
        }

        let mut step = divide_interval(interval.width(), max_steps.max(1));
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

    /// Build a division for `[x1, x2]`; `x1 > x2` gives an inverted division.
    #[must_use]
    pub fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major: usize,
        max_minor: usize,
        step: f64,
    ) -> ScaleDiv {
        let interval = Interval::new(x1, x2).normalized();
        if interval.width() <= 0.0 {
            return ScaleDiv::default();
        }

        let mut step = step.abs();
        if step == 0.0 {
            step = divide_interval(interval.width(), max_major.max(1));
        }

        let mut div = ScaleDiv::default();
        if step != 0.0 {
            let ticks = Self::build_ticks(&interval, step, max_minor);
            div = ScaleDiv::from_interval(&interval, ticks);
        }
        if x1 > x2 {
            div.invert();
        }
        div
    }

    fn build_ticks(interval: &Interval, step: f64, max_minor: usize) -> [Vec<f64>; 3] {
        let bounding = Self::align(interval, step);
        let major = Self::build_major_ticks(&bounding, step);
        let (minor, medium) = if max_minor > 0 {
            Self::build_minor_ticks(&major, max_minor, step)
        } else {
            (Vec::new(), Vec::new())
        };

        [minor, medium, major].map(|ticks| {
            strip(ticks, interval)
                .into_iter()
                .map(|v| snap_to_zero(v, step))
                .collect()
        })
    }

    fn build_major_ticks(interval: &Interval, step: f64) -> Vec<f64> {
        let count = ((interval.width() / step).round() as usize + 1).min(MAX_MAJOR_TICKS);

        let mut ticks = Vec::with_capacity(count + 2);
        ticks.push(interval.min_value());
        for i in 1..count.saturating_sub(1) {
            ticks.push(interval.min_value() + i as f64 * step);
        }
        ticks.push(interval.max_value());
        ticks
    }

    fn build_minor_ticks(major: &[f64], max_minor: usize, step: f64) -> (Vec<f64>, Vec<f64>) {
        let mut min_step = divide_interval(step, max_minor);
        if min_step == 0.0 {
            return (Vec::new(), Vec::new());
        }

        let mut count = (step / min_step).abs().ceil() as usize;
        count = count.saturating_sub(1);

        // subticks must fit in one major step
        if fuzzy_compare((count + 1) as f64 * min_step.abs(), step.abs(), step)
            == Ordering::Greater
        {
            count = 1;
            min_step = step * 0.5;
        }

        let medium_index = (count % 2 == 1).then_some(count / 2);

        let mut minor = Vec::with_capacity(major.len() * count);
        let mut medium = Vec::with_capacity(major.len());
        for &tick in major {
            let mut value = tick;
            for k in 0..count {
                value += min_step;
                let aligned = snap_to_zero(value, step);
                if Some(k) == medium_index {
                    medium.push(aligned);
                } else {
                    minor.push(aligned);
                }
            }
        }
        (minor, medium)
    }

    /// Align both limits of `interval` on multiples of `step`, keeping a limit
    /// that is already within tolerance of a multiple.
    pub(crate) fn align(interval: &Interval, step: f64) -> Interval {
        let mut x1 = interval.min_value();
        let mut x2 = interval.max_value();

        if -f64::MAX + step <= x1 {
            let x = floor_eps(x1, step);
            if fuzzy_compare(x1, x, step) != Ordering::Equal {
                x1 = x;
            }
        }
        if f64::MAX - step >= x2 {
            let x = ceil_eps(x2, step);
            if fuzzy_compare(x2, x, step) != Ordering::Equal {
                x2 = x;
            }
        }
        Interval::new(x1, x2)
    }
}

/// Values within the tolerance of 0 become exactly 0.
fn snap_to_zero(value: f64, step: f64) -> f64 {
    if fuzzy_compare(value, 0.0, step) == Ordering::Equal {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineAttributes;
    use crate::scale_div::TickType;

    #[test]
    fn test_auto_scale_aligns_bounds() {
        let engine = LinearScaleEngine::default();
        let auto = engine.auto_scale(5, 0.3, 9.2);
        assert_eq!(auto.step, 2.0);
        assert_eq!(auto.x1, 0.0);
        assert_eq!(auto.x2, 10.0);
    }

    #[test]
    fn test_auto_scale_single_point() {
        let auto = LinearScaleEngine::default().auto_scale(10, 0.0, 0.0);
        assert_eq!(auto.x1, -0.5);
        assert_eq!(auto.x2, 0.5);
        assert!((auto.step - 0.1).abs() < 1e-15);
    }

    #[test]
    fn test_auto_scale_floating_keeps_bounds() {
        let engine = LinearScaleEngine::new(EngineSettings::with_attributes(EngineAttributes {
            floating: true,
            ..EngineAttributes::default()
        }));
        let auto = engine.auto_scale(5, 0.3, 9.2);
        assert_eq!((auto.x1, auto.x2), (0.3, 9.2));
    }

    #[test]
    fn test_auto_scale_inverted() {
        let engine = LinearScaleEngine::new(EngineSettings::with_attributes(EngineAttributes {
            inverted: true,
            ..EngineAttributes::default()
        }));
        let auto = engine.auto_scale(5, 0.3, 9.2);
        assert_eq!((auto.x1, auto.x2), (10.0, 0.0));
        assert_eq!(auto.step, -2.0);
    }

    #[test]
    fn test_auto_scale_symmetric_and_reference() {
        let mut settings = EngineSettings::with_attributes(EngineAttributes {
            symmetric: true,
            ..EngineAttributes::default()
        });
        settings.reference = 0.0;
        let auto = LinearScaleEngine::new(settings).auto_scale(10, 2.0, 8.0);
        assert_eq!(auto.x1, -auto.x2);
        assert!(auto.x2 >= 8.0);

        let mut settings = EngineSettings::with_attributes(EngineAttributes {
            include_reference: true,
            ..EngineAttributes::default()
        });
        settings.reference = 0.0;
        let auto = LinearScaleEngine::new(settings).auto_scale(10, 2.0, 8.0);
        assert_eq!(auto.x1, 0.0);
    }

    #[test]
    fn test_auto_scale_margins() {
        let mut settings = EngineSettings::default();
        settings.set_margins(1.0, 1.0);
        let auto = LinearScaleEngine::new(settings).auto_scale(10, 0.0, 10.0);
        assert!(auto.x1 <= -1.0);
        assert!(auto.x2 >= 11.0);
    }

    #[test]
    fn test_divide_scale_ticks() {
        let div = LinearScaleEngine::default().divide_scale(0.0, 10.0, 5, 4, 0.0);
        assert_eq!(div.ticks(TickType::Major), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        // 2 / 4 = 0.5 -> three subticks per step, the middle one is medium
        assert_eq!(div.ticks(TickType::Medium), &[1.0, 3.0, 5.0, 7.0, 9.0]);
        assert_eq!(div.ticks(TickType::Minor).len(), 10);
        assert_eq!(div.ticks(TickType::Minor)[0], 0.5);
    }

    #[test]
    fn test_divide_scale_strips_outside_ticks() {
        let div = LinearScaleEngine::default().divide_scale(0.3, 9.2, 5, 0, 2.0);
        assert_eq!(div.ticks(TickType::Major), &[2.0, 4.0, 6.0, 8.0]);
        assert!(div.ticks(TickType::Minor).is_empty());
        assert_eq!(div.lower_bound(), 0.3);
        assert_eq!(div.upper_bound(), 9.2);
    }

    #[test]
    fn test_divide_scale_inverted() {
        let div = LinearScaleEngine::default().divide_scale(10.0, 0.0, 5, 0, 0.0);
        assert_eq!(div.lower_bound(), 10.0);
        assert_eq!(div.upper_bound(), 0.0);
        assert_eq!(div.ticks(TickType::Major)[0], 0.0);
    }

    #[test]
    fn test_divide_scale_empty_interval() {
        let div = LinearScaleEngine::default().divide_scale(1.0, 1.0, 5, 5, 0.0);
        assert!(div.is_empty());
        assert!(div.ticks(TickType::Major).is_empty());
    }

    #[test]
    fn test_zero_tick_snapped() {
        let div = LinearScaleEngine::default().divide_scale(-0.3, 0.3, 10, 0, 0.1);
        assert!(div.ticks(TickType::Major).contains(&0.0));
    }

    #[test]
    fn test_major_tick_count_capped() {
        let div = LinearScaleEngine::default().divide_scale(0.0, 1.0e6, 10, 0, 1.0);
        assert_eq!(div.ticks(TickType::Major).len(), MAX_MAJOR_TICKS);
    }
}
