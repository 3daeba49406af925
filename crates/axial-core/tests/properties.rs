//! Property tests for intervals, divisions and scale engines.

use axial_core::{
    divide_interval, BorderFlags, FixedScaleEngine, Interval, LinearScaleEngine,
    Log10ScaleEngine, ScaleEngine, TickType,
};
use proptest::prelude::*;

fn border_flags() -> impl Strategy<Value = BorderFlags> {
    prop_oneof![
        Just(BorderFlags::IncludeBorders),
        Just(BorderFlags::ExcludeMinimum),
        Just(BorderFlags::ExcludeMaximum),
        Just(BorderFlags::ExcludeBorders),
    ]
}

fn interval() -> impl Strategy<Value = Interval> {
    (-100i32..100, -100i32..100, border_flags())
        .prop_map(|(a, b, flags)| Interval::with_flags(f64::from(a), f64::from(b), flags))
}

fn valid_interval() -> impl Strategy<Value = Interval> {
    interval().prop_filter("valid", Interval::is_valid)
}

/// Candidate points: integers hit the borders, halves fall between them.
fn point() -> impl Strategy<Value = f64> {
    (-220i32..220).prop_map(|v| f64::from(v) / 2.0)
}

fn on_border(i: &Interval, x: f64) -> bool {
    x == i.min_value() || x == i.max_value()
}

// =============================================================================
// Interval
// =============================================================================

proptest! {
    #[test]
    fn prop_union_contains_operands(a in valid_interval(), b in valid_interval(), x in point()) {
        let u = a.unite(&b);
        if a.contains(x) || b.contains(x) {
            prop_assert!(u.contains(x));
        }
    }

    #[test]
    fn prop_intersection_matches_operands(a in valid_interval(), b in valid_interval(), x in point()) {
        prop_assume!(!on_border(&a, x) && !on_border(&b, x));
        let i = a.intersect(&b);
        prop_assert_eq!(i.contains(x), a.contains(x) && b.contains(x));
    }

    #[test]
    fn prop_intersects_agrees_with_intersect(a in valid_interval(), b in valid_interval()) {
        prop_assert_eq!(a.intersects(&b), a.intersect(&b).is_valid());
    }

    #[test]
    fn prop_double_inversion_roundtrip(a in interval()) {
        prop_assert_eq!(a.inverted().inverted(), a);
    }

    #[test]
    fn prop_normalized_is_valid(a in interval()) {
        prop_assume!(a.min_value() != a.max_value() || a.border_flags() == BorderFlags::IncludeBorders);
        prop_assert!(a.normalized().is_valid());
    }
}

// =============================================================================
// Step sizes and divisions
// =============================================================================

fn is_125(step: f64) -> bool {
    let mantissa = step / 10f64.powf(step.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .any(|m| (mantissa - m).abs() < 1e-9)
}

proptest! {
    #[test]
    fn prop_divide_interval_is_125(width in 1e-6f64..1e6, n in 1usize..50) {
        let step = divide_interval(width, n);
        prop_assert!(step > 0.0);
        prop_assert!(is_125(step));
        prop_assert!(step * n as f64 >= width * (1.0 - 1e-6) * (1.0 - 1e-12));
    }

    #[test]
    fn prop_linear_ticks_inside_division(
        x1 in -1e6f64..1e6,
        x2 in -1e6f64..1e6,
        max_major in 1usize..20,
        max_minor in 0usize..10,
    ) {
        let engine = ScaleEngine::linear();
        let auto = engine.auto_scale(max_major, x1, x2);
        let div = engine.divide_scale(auto.x1, auto.x2, max_major, max_minor, auto.step);
        for t in TickType::ALL {
            for &v in div.ticks(t) {
                prop_assert!(div.contains(v), "{v} outside {div:?}");
            }
        }
        prop_assert!(div.contains(x1.min(x2)));
        prop_assert!(div.contains(x1.max(x2)));
    }

    #[test]
    fn prop_log_ticks_inside_division(
        x1 in 1e-3f64..1e3,
        decades in 0.1f64..8.0,
        max_major in 1usize..12,
        max_minor in 0usize..10,
    ) {
        let engine = ScaleEngine::log10();
        let x2 = x1 * 10f64.powf(decades);
        let auto = engine.auto_scale(max_major, x1, x2);
        let div = engine.divide_scale(auto.x1, auto.x2, max_major, max_minor, auto.step);
        for t in TickType::ALL {
            for &v in div.ticks(t) {
                prop_assert!(div.contains(v), "{v} outside {div:?}");
            }
        }
    }

    #[test]
    fn prop_log_below_one_decade_delegates_to_linear(
        x1 in 1e-3f64..1e3,
        ratio in 1.001f64..9.99,
        max_major in 1usize..12,
        max_minor in 0usize..10,
    ) {
        let x2 = x1 * ratio;
        let log = Log10ScaleEngine::default().divide_scale(x1, x2, max_major, max_minor, 0.0);
        let linear = LinearScaleEngine::default().divide_scale(x1, x2, max_major, max_minor, 0.0);
        prop_assert_eq!(log, linear);
    }

    #[test]
    fn prop_fixed_engine_keeps_tick_offsets(
        start in -1e3f64..1e3,
        width in 1.0f64..100.0,
        shift in 0.0f64..0.5,
    ) {
        let mut engine = FixedScaleEngine::default();
        let ticks_from_lower = |engine: &FixedScaleEngine, lo: f64, hi: f64| {
            let div = engine.divide_scale(lo, hi, 10, 0, 0.0);
            div.ticks(TickType::Major)
                .iter()
                .map(|v| v - div.lower_bound())
                .collect::<Vec<_>>()
        };

        engine.on_compute_scale_div(&Interval::new(start, start + width));
        let first = ticks_from_lower(&engine, start, start + width);

        let moved = start + shift * width;
        engine.on_compute_scale_div(&Interval::new(moved, moved + width));
        let second = ticks_from_lower(&engine, moved, moved + width);

        prop_assert_eq!(first.len(), second.len());
        let tolerance = 1e-9 * (start.abs() + width);
        for (a, b) in first.iter().zip(&second) {
            prop_assert!((a - b).abs() <= tolerance);
        }
    }
}
