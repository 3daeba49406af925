//! Error types for axial-layout.

use axial_core::ConfigError;
use thiserror::Error;

use crate::axis::AxisId;

/// Errors raised while configuring a plot area.
///
/// Layout itself never fails: invalid geometry is a no-op and stale
/// intersections are ignored. These errors only surface when a caller
/// configures something that can be rejected up front.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Scale or area configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No axis with this id in the area.
    #[error("Unknown axis: {0}")]
    UnknownAxis(AxisId),

    /// An axis cannot intersect itself.
    #[error("Axis {0} cannot intersect itself")]
    SelfIntersection(AxisId),

    /// Intersecting axes must be perpendicular.
    #[error("Axis {axis} cannot intersect parallel axis {target}")]
    ParallelIntersection {
        /// Axis being configured
        axis: AxisId,
        /// Requested target
        target: AxisId,
    },

    /// Following intersection targets from `target` leads back to `axis`.
    #[error("Intersection of {axis} with {target} creates a cycle")]
    IntersectionCycle {
        /// Axis being configured
        axis: AxisId,
        /// Requested target
        target: AxisId,
    },
}

impl From<serde_yaml_ng::Error> for LayoutError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Config(err.into())
    }
}
