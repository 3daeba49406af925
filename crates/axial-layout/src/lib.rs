#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::suboptimal_flops)]
//! Border axis layout for Axial plot areas.
//!
//! A [`PlotArea`] owns the axes attached to the four sides of a canvas.
//! Each frame the caller drives two explicit passes:
//!
//! - [`PlotArea::update_scales`] recomputes the division of every
//!   auto-scaled axis from the data, honouring synchronization groups and
//!   the streaming optimization.
//! - [`PlotArea::layout`] measures the axes through [`MeasureExtent`] and
//!   places them with [`compute_border_geometry`], reporting which axes
//!   moved or were resized.
//!
//! Sibling areas can share canvas edges with [`layout_aligned`].
//!
//! ```
//! use axial_core::Rect;
//! use axial_layout::{Alignment, BorderAxis, ExtentTable, PlotArea};
//!
//! let mut area = PlotArea::new(Rect::new(0.0, 0.0, 400.0, 300.0));
//! let left = area.add_axis(BorderAxis::new(Alignment::Left));
//! let bottom = area.add_axis(BorderAxis::new(Alignment::Bottom));
//!
//! let measure = ExtentTable::new().with_extent(left, 40.0).with_extent(bottom, 20.0);
//! area.layout(&measure).unwrap();
//! assert_eq!(area.inner_rect(), Rect::new(40.0, 0.0, 360.0, 280.0));
//! ```

mod align;
mod area;
mod autoscale;
mod axis;
mod border;
mod cache;
mod config;
mod error;
mod intersection;
mod measure;

pub use align::{layout_aligned, AlignmentGroups};
pub use area::{GeometryChange, GeometryKind, PlotArea};
pub use autoscale::AxisScale;
pub use axis::{Alignment, AxisId, AxisSpec, BorderAxis, Intersection, Orientation, ValueType};
pub use border::{compute_border_geometry, AxisGeometry, BorderLayout, ConvergencePolicy};
pub use cache::{CachedMeasure, ExtentCache, ExtentKey};
pub use config::{AreaConfig, AxisConfig};
pub use error::LayoutError;
pub use intersection::{placement_order, resolve_intersections};
pub use measure::{DataIntervals, ExtentTable, MeasureExtent};
