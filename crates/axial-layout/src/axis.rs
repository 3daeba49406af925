//! Border axis model: identity, side, stacking rank and intersection.

use std::fmt;

use axial_core::{ScaleConfig, ScaleMap};
use serde::{Deserialize, Serialize};

use crate::autoscale::AxisScale;

/// Stable identifier of an axis inside a [`crate::PlotArea`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisId(u32);

impl AxisId {
    /// Create an id from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Left to right
    Horizontal,
    /// Bottom to top
    Vertical,
}

/// Side of the canvas an axis is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Left side, vertical
    #[default]
    Left,
    /// Right side, vertical
    Right,
    /// Top side, horizontal
    Top,
    /// Bottom side, horizontal
    Bottom,
}

impl Alignment {
    /// All sides.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Direction of an axis on this side.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Vertical,
            Self::Top | Self::Bottom => Orientation::Horizontal,
        }
    }

    /// Check if an axis on this side is vertical.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self.orientation(), Orientation::Vertical)
    }
}

/// How an intersection value is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// A scale value of the target axis.
    #[default]
    Absolute,
    /// A fraction of the target axis length, 0 at its start.
    Relative,
}

/// Places an axis at a value of another axis instead of stacking it
/// against the canvas edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    /// Axis providing the coordinate.
    pub target: AxisId,
    /// Position along the target.
    pub value: f64,
    /// Interpretation of `value`.
    #[serde(default)]
    pub value_type: ValueType,
}

impl Intersection {
    /// Intersection at a scale value of `target`.
    #[must_use]
    pub const fn absolute(target: AxisId, value: f64) -> Self {
        Self {
            target,
            value,
            value_type: ValueType::Absolute,
        }
    }

    /// Intersection at a fraction of the length of `target`.
    #[must_use]
    pub const fn relative(target: AxisId, fraction: f64) -> Self {
        Self {
            target,
            value: fraction,
            value_type: ValueType::Relative,
        }
    }
}

/// Layout input for one axis, captured before a layout pass.
#[derive(Debug, Clone)]
pub struct AxisSpec {
    /// Axis id
    pub id: AxisId,
    /// Side
    pub alignment: Alignment,
    /// Stacking rank, lower is closer to the canvas
    pub canvas_proximity: i32,
    /// Span the corners formed by perpendicular axes
    pub expand_to_corners: bool,
    /// Hidden axes take no space
    pub visible: bool,
    /// Excluded from layout entirely
    pub ignore_geometry: bool,
    /// Requested intersection
    pub intersection: Option<Intersection>,
    /// Scale interval and transform, used when other axes intersect this one
    pub scale: ScaleMap,
}

impl AxisSpec {
    /// Visible axis on `alignment` with an identity scale.
    #[must_use]
    pub fn new(id: AxisId, alignment: Alignment) -> Self {
        Self {
            id,
            alignment,
            canvas_proximity: 0,
            expand_to_corners: false,
            visible: true,
            ignore_geometry: false,
            intersection: None,
            scale: ScaleMap::new(),
        }
    }

    /// Check if the axis participates in layout.
    #[must_use]
    pub const fn is_laid_out(&self) -> bool {
        self.visible && !self.ignore_geometry
    }
}

/// An axis attached to one side of a plot area.
#[derive(Debug, Clone)]
pub struct BorderAxis {
    alignment: Alignment,
    canvas_proximity: i32,
    expand_to_corners: bool,
    visible: bool,
    ignore_geometry: bool,
    intersection: Option<Intersection>,
    scale: AxisScale,
}

impl BorderAxis {
    /// Visible axis with a default linear scale.
    #[must_use]
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            canvas_proximity: 0,
            expand_to_corners: false,
            visible: true,
            ignore_geometry: false,
            intersection: None,
            scale: AxisScale::default(),
        }
    }

    /// Set the stacking rank.
    #[must_use]
    pub const fn with_proximity(mut self, proximity: i32) -> Self {
        self.canvas_proximity = proximity;
        self
    }

    /// Span the corners.
    #[must_use]
    pub const fn with_expand_to_corners(mut self, expand: bool) -> Self {
        self.expand_to_corners = expand;
        self
    }

    /// Replace the scale configuration.
    #[must_use]
    pub fn with_scale(mut self, config: ScaleConfig) -> Self {
        self.scale = AxisScale::new(config);
        self
    }

    /// Side.
    #[must_use]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Move the axis to another side.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Stacking rank.
    #[must_use]
    pub const fn canvas_proximity(&self) -> i32 {
        self.canvas_proximity
    }

    /// Set the stacking rank.
    pub fn set_canvas_proximity(&mut self, proximity: i32) {
        self.canvas_proximity = proximity;
    }

    /// Whether the axis spans the corners.
    #[must_use]
    pub const fn expand_to_corners(&self) -> bool {
        self.expand_to_corners
    }

    /// Span the corners or not.
    pub fn set_expand_to_corners(&mut self, expand: bool) {
        self.expand_to_corners = expand;
    }

    /// Visibility.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the axis.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether layout skips this axis.
    #[must_use]
    pub const fn ignore_geometry(&self) -> bool {
        self.ignore_geometry
    }

    /// Exclude the axis from layout.
    pub fn set_ignore_geometry(&mut self, ignore: bool) {
        self.ignore_geometry = ignore;
    }

    /// Requested intersection.
    #[must_use]
    pub const fn intersection(&self) -> Option<&Intersection> {
        self.intersection.as_ref()
    }

    pub(crate) fn set_intersection(&mut self, intersection: Option<Intersection>) {
        self.intersection = intersection;
    }

    /// Scale state.
    #[must_use]
    pub const fn scale(&self) -> &AxisScale {
        &self.scale
    }

    /// Mutable scale state.
    pub fn scale_mut(&mut self) -> &mut AxisScale {
        &mut self.scale
    }

    /// Snapshot used by a layout pass.
    #[must_use]
    pub fn spec(&self, id: AxisId) -> AxisSpec {
        AxisSpec {
            id,
            alignment: self.alignment,
            canvas_proximity: self.canvas_proximity,
            expand_to_corners: self.expand_to_corners,
            visible: self.visible,
            ignore_geometry: self.ignore_geometry,
            intersection: self.intersection,
            scale: self.scale.scale_map(),
        }
    }
}
