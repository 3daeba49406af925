//! Alignment of the canvases of sibling plot areas.
//!
//! Areas aligned horizontally share the top and bottom edges of their
//! inner rectangles; areas aligned vertically share the left and right
//! edges. Each area is laid out on its own first, then members whose edges
//! differ from the group edge receive an aligned margin and are laid out
//! once more.

use std::collections::HashMap;

use axial_core::math::fuzzy_compare;
use axial_core::Rect;
use tracing::debug;

use crate::area::{GeometryChange, PlotArea};
use crate::axis::{AxisId, Orientation};
use crate::border::AxisGeometry;
use crate::measure::MeasureExtent;

/// Sets of area indices sharing canvas edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentGroups {
    horizontal: Vec<Vec<usize>>,
    vertical: Vec<Vec<usize>>,
}

impl AlignmentGroups {
    /// No groups.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group. [`Orientation::Horizontal`] aligns top and bottom
    /// edges of areas laid side by side.
    pub fn add(&mut self, orientation: Orientation, members: impl IntoIterator<Item = usize>) {
        let mut group: Vec<usize> = Vec::new();
        for member in members {
            if !group.contains(&member) {
                group.push(member);
            }
        }
        if group.len() > 1 {
            match orientation {
                Orientation::Horizontal => self.horizontal.push(group),
                Orientation::Vertical => self.vertical.push(group),
            }
        }
    }

    /// Groups of one orientation.
    #[must_use]
    pub fn groups(&self, orientation: Orientation) -> &[Vec<usize>] {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    /// Check if `area` belongs to a group of `orientation`.
    #[must_use]
    pub fn contains(&self, orientation: Orientation, area: usize) -> bool {
        self.groups(orientation).iter().any(|g| g.contains(&area))
    }

    /// Check if no group is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }
}

/// Lay out every area with `measures[i]`, then align the grouped ones.
///
/// Returns the geometry changes of each area relative to its geometry
/// before the call, `None` for an area whose layout was skipped.
pub fn layout_aligned(
    areas: &mut [PlotArea],
    groups: &AlignmentGroups,
    measures: &[&dyn MeasureExtent],
) -> Vec<Option<Vec<GeometryChange>>> {
    let before: Vec<HashMap<AxisId, AxisGeometry>> = areas.iter().map(snapshot).collect();

    let mut inners: Vec<Option<Rect>> = Vec::with_capacity(areas.len());
    for (index, area) in areas.iter_mut().enumerate() {
        let margins = area.aligned_margins_mut();
        if groups.contains(Orientation::Horizontal, index) {
            margins.top = 0.0;
            margins.bottom = 0.0;
        }
        if groups.contains(Orientation::Vertical, index) {
            margins.left = 0.0;
            margins.right = 0.0;
        }
        let inner = measures
            .get(index)
            .and_then(|measure| area.layout(*measure))
            .map(|_| area.inner_rect());
        inners.push(inner);
    }

    let mut adjusted = vec![false; areas.len()];
    for group in groups.groups(Orientation::Horizontal) {
        let edges = shared_edges(group, &inners, Rect::top, Rect::bottom);
        let Some((top, bottom)) = edges else { continue };
        for &index in group {
            let Some(inner) = inners.get(index).copied().flatten() else {
                continue;
            };
            let margins = areas[index].aligned_margins_mut();
            margins.top = gap(top, inner.top(), top - inner.top());
            margins.bottom = gap(bottom, inner.bottom(), inner.bottom() - bottom);
            adjusted[index] |= margins.top != 0.0 || margins.bottom != 0.0;
        }
    }
    for group in groups.groups(Orientation::Vertical) {
        let edges = shared_edges(group, &inners, Rect::left, Rect::right);
        let Some((left, right)) = edges else { continue };
        for &index in group {
            let Some(inner) = inners.get(index).copied().flatten() else {
                continue;
            };
            let margins = areas[index].aligned_margins_mut();
            margins.left = gap(left, inner.left(), left - inner.left());
            margins.right = gap(right, inner.right(), inner.right() - right);
            adjusted[index] |= margins.left != 0.0 || margins.right != 0.0;
        }
    }

    for (index, area) in areas.iter_mut().enumerate() {
        if !adjusted[index] {
            continue;
        }
        if let Some(measure) = measures.get(index) {
            debug!(area = index, margins = ?area.aligned_margins(), "aligned area laid out again");
            area.layout(*measure);
        }
    }

    areas
        .iter()
        .zip(&before)
        .zip(&inners)
        .map(|((area, previous), inner)| inner.map(|_| diff(previous, area)))
        .collect()
}

fn snapshot(area: &PlotArea) -> HashMap<AxisId, AxisGeometry> {
    area.axes()
        .filter_map(|(id, _)| area.geometry(id).map(|g| (id, *g)))
        .collect()
}

fn diff(previous: &HashMap<AxisId, AxisGeometry>, area: &PlotArea) -> Vec<GeometryChange> {
    area.axes()
        .filter_map(|(id, _)| {
            let geometry = area.geometry(id)?;
            GeometryChange::between(previous.get(&id), geometry)
        })
        .collect()
}

/// Innermost start edge and innermost end edge across the laid out members.
fn shared_edges(
    group: &[usize],
    inners: &[Option<Rect>],
    start: fn(&Rect) -> f64,
    end: fn(&Rect) -> f64,
) -> Option<(f64, f64)> {
    group
        .iter()
        .filter_map(|&i| inners.get(i).copied().flatten())
        .fold(None, |acc, r| match acc {
            None => Some((start(&r), end(&r))),
            Some((s, e)) => Some((s.max(start(&r)), e.min(end(&r)))),
        })
}

/// `amount` unless `edge` already matches `shared`.
fn gap(shared: f64, edge: f64, amount: f64) -> f64 {
    if fuzzy_compare(shared, edge, shared.abs().max(edge.abs())).is_eq() {
        0.0
    } else {
        amount
    }
}
