//! Border geometry: places every axis of a plot area around its canvas.
//!
//! The layout is a sequential pipeline over an immutable snapshot of the
//! axes:
//!
//! 1. Side totals are accumulated from the extent of each stacked axis,
//!    measured at the length the current inner rectangle gives it. The
//!    inner rectangle is recomputed after each pass.
//! 2. Border distance hints widen the margins where the totals are too
//!    small for the end labels of perpendicular axes.
//! 3. Axes sharing a side are stacked by canvas proximity, then by index.
//! 4. Intersected axes are placed at a coordinate of their target.
//! 5. Axes expanding to the corners are widened by the perpendicular
//!    totals.

use axial_core::{Margins, Rect};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::axis::{Alignment, AxisId, AxisSpec, Intersection, ValueType};
use crate::intersection::{placement_order, resolve_intersections};
use crate::measure::MeasureExtent;

/// Tolerance used to decide that side totals stopped changing.
const TOTALS_EPS: f64 = 1e-9;

/// How many accumulation passes run before axes are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConvergencePolicy {
    /// Exactly two passes.
    #[default]
    TwoPass,
    /// Repeat until the side totals stop changing, at most
    /// `max_iterations` times.
    FixedPoint {
        /// Upper bound on the number of passes
        max_iterations: usize,
    },
}

impl ConvergencePolicy {
    const fn max_passes(self) -> usize {
        match self {
            Self::TwoPass => 2,
            Self::FixedPoint { max_iterations } => {
                if max_iterations == 0 {
                    1
                } else {
                    max_iterations
                }
            }
        }
    }

    const fn stops_when_stable(self) -> bool {
        matches!(self, Self::FixedPoint { .. })
    }
}

/// Final placement of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisGeometry {
    /// Axis id
    pub id: AxisId,
    /// Rectangle in the area's coordinates, corners included
    pub rect: Rect,
    /// Rectangle without the corner expansion
    pub rect_no_corners: Rect,
    /// Thickness
    pub extent: f64,
    /// Distance from the inner rectangle edge
    pub offset: f64,
    /// Placed by an intersection instead of stacking
    pub intersected: bool,
}

/// Result of [`compute_border_geometry`].
#[derive(Debug, Clone, PartialEq)]
pub struct BorderLayout {
    /// Bounding rectangle minus the margins
    pub outer: Rect,
    /// Canvas left for plotting
    pub inner: Rect,
    /// Space taken by stacked axes on each side
    pub totals: Margins,
    /// Margins actually applied, border hints included
    pub margins: Margins,
    /// Number of accumulation passes run
    pub passes: usize,
    /// Geometry of every laid out axis, in input order
    pub axes: Vec<AxisGeometry>,
}

impl BorderLayout {
    /// Geometry of one axis.
    #[must_use]
    pub fn axis(&self, id: AxisId) -> Option<&AxisGeometry> {
        self.axes.iter().find(|g| g.id == id)
    }
}

/// Lay out `axes` around `bounds` shrunk by `margins`.
///
/// Returns `None` without measuring anything when the outer rectangle has
/// no area.
pub fn compute_border_geometry<M: MeasureExtent + ?Sized>(
    bounds: Rect,
    margins: Margins,
    axes: &[AxisSpec],
    measure: &M,
    policy: ConvergencePolicy,
) -> Option<BorderLayout> {
    if !bounds.shrunk(&margins).is_valid() {
        debug!(?bounds, ?margins, "invalid outer rectangle, layout skipped");
        return None;
    }

    let targets = resolve_intersections(axes);
    let stacked: Vec<usize> = (0..axes.len())
        .filter(|&i| axes[i].is_laid_out() && targets[i].is_none())
        .collect();

    let mut extents = vec![0.0; axes.len()];
    let mut totals = Margins::ZERO;
    let mut hints = Margins::ZERO;
    let (mut outer, mut inner) = rects(bounds, &margins, &totals);
    let mut passes = 0;

    for pass in 0..policy.max_passes() {
        let mut next = Margins::ZERO;
        for &i in &stacked {
            let axis = &axes[i];
            let available = if axis.expand_to_corners { outer } else { inner };
            let extent = sanitize(measure.extent(axis.id, along(axis.alignment, &available)));
            extents[i] = extent;

            let (start, end) = measure.border_dist_hint(axis.id);
            let (start, end) = (sanitize(start), sanitize(end));
            match axis.alignment {
                Alignment::Left | Alignment::Right => {
                    hints.bottom = hints.bottom.max(start);
                    hints.top = hints.top.max(end);
                }
                Alignment::Top | Alignment::Bottom => {
                    hints.left = hints.left.max(start);
                    hints.right = hints.right.max(end);
                }
            }
            *side_mut(&mut next, axis.alignment) += extent;
        }

        passes = pass + 1;
        let stable = close(&next, &totals);
        totals = next;
        (outer, inner) = rects(bounds, &margins, &totals);
        trace!(
            pass,
            left = totals.left,
            top = totals.top,
            right = totals.right,
            bottom = totals.bottom,
            "accumulated border extents"
        );
        if stable && policy.stops_when_stable() {
            break;
        }
    }

    let mut effective = margins;
    for side in Alignment::ALL {
        let hint = *side_mut(&mut hints, side);
        let total = *side_mut(&mut totals, side);
        if hint > total {
            *side_mut(&mut effective, side) += hint - total;
        }
    }
    (outer, inner) = rects(bounds, &effective, &totals);
    if !outer.is_valid() {
        debug!(?outer, "outer rectangle emptied by border hints, layout skipped");
        return None;
    }

    let mut placed: Vec<Option<AxisGeometry>> = vec![None; axes.len()];
    for &i in &stacked {
        let axis = &axes[i];
        let offset = stack_offset(axes, &stacked, &extents, i);
        let rect = stacked_rect(axis.alignment, &inner, extents[i], offset);
        placed[i] = Some(finish(axis, rect, extents[i], offset, false, &totals));
    }

    for i in placement_order(&targets) {
        let (Some(target), Some(intersection)) = (targets[i], axes[i].intersection.as_ref())
        else {
            continue;
        };
        let Some(target_geometry) = placed[target] else {
            continue;
        };
        let axis = &axes[i];
        let extent = sanitize(measure.extent(axis.id, along(axis.alignment, &inner)));
        let coordinate = target_coordinate(&axes[target], &target_geometry, intersection);
        let rect = intersected_rect(axis.alignment, &inner, extent, coordinate);
        placed[i] = Some(finish(axis, rect, extent, 0.0, true, &totals));
    }

    Some(BorderLayout {
        outer,
        inner,
        totals,
        margins: effective,
        passes,
        axes: placed.into_iter().flatten().collect(),
    })
}

fn rects(bounds: Rect, margins: &Margins, totals: &Margins) -> (Rect, Rect) {
    let outer = bounds.shrunk(margins);
    (outer, outer.shrunk(totals))
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn close(a: &Margins, b: &Margins) -> bool {
    (a.left - b.left).abs() <= TOTALS_EPS
        && (a.top - b.top).abs() <= TOTALS_EPS
        && (a.right - b.right).abs() <= TOTALS_EPS
        && (a.bottom - b.bottom).abs() <= TOTALS_EPS
}

/// Length of an axis on `alignment` spanning `rect`.
fn along(alignment: Alignment, rect: &Rect) -> f64 {
    if alignment.is_vertical() {
        rect.height
    } else {
        rect.width
    }
}

fn side_mut(margins: &mut Margins, alignment: Alignment) -> &mut f64 {
    match alignment {
        Alignment::Left => &mut margins.left,
        Alignment::Right => &mut margins.right,
        Alignment::Top => &mut margins.top,
        Alignment::Bottom => &mut margins.bottom,
    }
}

fn stack_offset(axes: &[AxisSpec], stacked: &[usize], extents: &[f64], index: usize) -> f64 {
    let axis = &axes[index];
    stacked
        .iter()
        .filter(|&&j| {
            let other = &axes[j];
            j != index
                && other.alignment == axis.alignment
                && (other.canvas_proximity < axis.canvas_proximity
                    || (other.canvas_proximity == axis.canvas_proximity && j < index))
        })
        .map(|&j| extents[j])
        .sum()
}

fn stacked_rect(alignment: Alignment, inner: &Rect, extent: f64, offset: f64) -> Rect {
    let length = along(alignment, inner).max(0.0);
    match alignment {
        Alignment::Left => Rect::new(inner.left() - extent - offset, inner.top(), extent, length),
        Alignment::Right => Rect::new(inner.right() + offset, inner.top(), extent, length),
        Alignment::Top => Rect::new(inner.left(), inner.top() - extent - offset, length, extent),
        Alignment::Bottom => Rect::new(inner.left(), inner.bottom() + offset, length, extent),
    }
}

fn intersected_rect(alignment: Alignment, inner: &Rect, extent: f64, coordinate: f64) -> Rect {
    let length = along(alignment, inner).max(0.0);
    match alignment {
        Alignment::Left => Rect::new(coordinate - extent, inner.top(), extent, length),
        Alignment::Right => Rect::new(coordinate, inner.top(), extent, length),
        Alignment::Top => Rect::new(inner.left(), coordinate - extent, length, extent),
        Alignment::Bottom => Rect::new(inner.left(), coordinate, length, extent),
    }
}

/// Paint coordinate of the intersection value along the target's backbone.
fn target_coordinate(target: &AxisSpec, geometry: &AxisGeometry, intersection: &Intersection) -> f64 {
    let r = &geometry.rect_no_corners;
    // Vertical scales grow upward
    let (p1, p2) = if target.alignment.is_vertical() {
        (r.bottom(), r.top())
    } else {
        (r.left(), r.right())
    };
    match intersection.value_type {
        ValueType::Absolute => {
            let mut map = target.scale.clone();
            map.set_paint_interval(p1, p2);
            map.transform(intersection.value)
        }
        ValueType::Relative => p1 + (p2 - p1) * intersection.value,
    }
}

fn finish(
    axis: &AxisSpec,
    rect: Rect,
    extent: f64,
    offset: f64,
    intersected: bool,
    totals: &Margins,
) -> AxisGeometry {
    let expanded = if !axis.expand_to_corners {
        rect
    } else if axis.alignment.is_vertical() {
        Rect::new(rect.x, rect.y - totals.top, rect.width, rect.height + totals.top + totals.bottom)
    } else {
        Rect::new(rect.x - totals.left, rect.y, rect.width + totals.left + totals.right, rect.height)
    };
    AxisGeometry {
        id: axis.id,
        rect: expanded,
        rect_no_corners: rect,
        extent,
        offset,
        intersected,
    }
}
