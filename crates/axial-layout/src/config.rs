//! Plot area configuration loaded from YAML.
//!
//! Axis ids are positions in the `axes` list, so intersections and
//! synchronization groups refer to axes by index:
//!
//! ```yaml
//! bounds: { x: 0, y: 0, width: 640, height: 480 }
//! margins: { left: 4, top: 4, right: 4, bottom: 4 }
//! axes:
//!   - alignment: bottom
//!   - alignment: left
//!     scale:
//!       engine: { kind: log10 }
//!   - alignment: left
//!     intersection: { target: 0, value: 0.5, value_type: relative }
//! sync_groups: [[1, 2]]
//! ```

use axial_core::{Margins, Rect, ScaleConfig};
use serde::{Deserialize, Serialize};

use crate::area::PlotArea;
use crate::axis::{Alignment, AxisId, BorderAxis, Intersection};
use crate::border::ConvergencePolicy;
use crate::error::LayoutError;

/// One axis of an [`AreaConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Side
    pub alignment: Alignment,
    /// Stacking rank
    pub canvas_proximity: i32,
    /// Span the corners
    pub expand_to_corners: bool,
    /// Visibility
    pub visible: bool,
    /// Excluded from layout
    pub ignore_geometry: bool,
    /// Scale of the axis
    pub scale: ScaleConfig,
    /// Optional intersection
    pub intersection: Option<Intersection>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            alignment: Alignment::default(),
            canvas_proximity: 0,
            expand_to_corners: false,
            visible: true,
            ignore_geometry: false,
            scale: ScaleConfig::default(),
            intersection: None,
        }
    }
}

impl AxisConfig {
    fn build(&self) -> BorderAxis {
        let mut axis = BorderAxis::new(self.alignment)
            .with_proximity(self.canvas_proximity)
            .with_expand_to_corners(self.expand_to_corners)
            .with_scale(self.scale.clone());
        axis.set_visible(self.visible);
        axis.set_ignore_geometry(self.ignore_geometry);
        axis
    }
}

/// Complete description of a [`PlotArea`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// Bounding rectangle
    pub bounds: Rect,
    /// Outer margins
    pub margins: Margins,
    /// Layout convergence
    pub policy: ConvergencePolicy,
    /// Axes, in stacking order for equal proximities
    pub axes: Vec<AxisConfig>,
    /// Axes sharing one division
    pub sync_groups: Vec<Vec<AxisId>>,
}

impl AreaConfig {
    /// Parse a configuration. Use [`AreaConfig::build`] to validate it.
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, LayoutError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails.
    pub fn to_yaml(&self) -> Result<String, LayoutError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Validate the configuration and build the area.
    ///
    /// # Errors
    ///
    /// Fails on an invalid scale configuration, an invalid intersection or
    /// a synchronization group naming an unknown axis.
    pub fn build(&self) -> Result<PlotArea, LayoutError> {
        let mut area = PlotArea::new(self.bounds);
        area.set_margins(self.margins);
        area.set_policy(self.policy);

        for axis in &self.axes {
            axis.scale.validate()?;
            area.add_axis(axis.build());
        }
        for (index, axis) in self.axes.iter().enumerate() {
            if axis.intersection.is_some() {
                let id = AxisId::new(u32::try_from(index).unwrap_or(u32::MAX));
                area.set_intersection(id, axis.intersection)?;
            }
        }
        for group in &self.sync_groups {
            area.synchronize(group)?;
        }
        Ok(area)
    }
}
