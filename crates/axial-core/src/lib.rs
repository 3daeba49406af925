#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
//! Core scale types for Axial plots.
//!
//! This crate provides the pure computations behind an axis:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Margins`]
//! - Numeric ranges with inclusive/exclusive borders: [`Interval`]
//! - Value to paint-coordinate mapping: [`ScaleMap`], [`ValueTransform`]
//! - Tick generation: [`ScaleEngine`] producing a [`ScaleDiv`]
//! - Configuration: [`ScaleConfig`] loaded from YAML
//!
//! Nothing here fails on bad numeric input: degenerate intervals are
//! normalized to a nearby valid one.

mod config;
mod engine;
mod error;
mod geometry;
mod interval;
pub mod math;
mod scale_div;
mod scale_map;
mod transform;

pub use config::{EngineConfig, ScaleConfig, StreamingConfig};
pub use engine::{
    divide_interval, AutoScale, DateTimeMode, DateTimeScaleEngine, EngineAttributes,
    EngineSettings, FixedScaleEngine, LinearScaleEngine, Log10ScaleEngine, ScaleEngine,
    ScaleEngineKind, StreamingHint,
};
pub use error::ConfigError;
pub use geometry::{Margins, Point, Rect, Size};
pub use interval::{BorderFlags, Interval};
pub use scale_div::{ScaleDiv, TickType};
pub use scale_map::ScaleMap;
pub use transform::{LogTransform, PowerTransform, ValueTransform, LOG_TRANSFORM_MAX, LOG_TRANSFORM_MIN};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // END-TO-END: engine -> division -> map
    // ==========================================================================

    #[test]
    fn test_single_point_scale() {
        let engine = ScaleEngine::linear();
        let auto = engine.auto_scale(10, 0.0, 0.0);
        assert_eq!((auto.x1, auto.x2), (-0.5, 0.5));

        let div = engine.divide_scale(auto.x1, auto.x2, 10, 5, auto.step);
        let major = div.ticks(TickType::Major);
        assert_eq!(major.len(), 11);
        assert_eq!(major[0], -0.5);
        assert_eq!(major[10], 0.5);
        assert!(major.contains(&0.0));
        assert!(major.iter().all(|&v| div.contains(v)));
    }

    #[test]
    fn test_log_division_through_map() {
        let engine = ScaleEngine::log10();
        let auto = engine.auto_scale(10, 1.0, 1000.0);
        let div = engine.divide_scale(auto.x1, auto.x2, 10, 9, auto.step);

        let mut map = ScaleMap::new();
        map.set_transformation(engine.transformation());
        map.set_scale_interval(div.lower_bound(), div.upper_bound());
        map.set_paint_interval(0.0, 300.0);

        let positions: Vec<f64> = div
            .ticks(TickType::Major)
            .iter()
            .map(|&v| map.transform(v))
            .collect();
        for (i, p) in positions.iter().enumerate() {
            assert!((p - 100.0 * i as f64).abs() < 1e-6);
        }
    }

    #[test]
    fn test_inverted_attribute_flips_division() {
        let settings = EngineSettings::with_attributes(EngineAttributes {
            inverted: true,
            ..EngineAttributes::default()
        });
        let engine = ScaleEngine::from_kind(ScaleEngineKind::Linear, settings);
        let auto = engine.auto_scale(5, 0.0, 10.0);
        let div = engine.divide_scale(auto.x1, auto.x2, 5, 0, auto.step);
        assert!(!div.is_increasing());
        assert_eq!(div.ticks(TickType::Major), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }
}
