//! Plot area: an arena of border axes around a canvas.

use std::collections::HashMap;
use std::time::Duration;

use axial_core::{Interval, Margins, Rect, ScaleDiv, Size};
use tracing::debug;

use crate::axis::{AxisId, BorderAxis, Intersection};
use crate::border::{compute_border_geometry, AxisGeometry, ConvergencePolicy};
use crate::cache::{CachedMeasure, ExtentCache};
use crate::error::LayoutError;
use crate::measure::{DataIntervals, MeasureExtent};

/// What changed in the geometry of an axis after a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Same size, new position
    Moved,
    /// Same position, new size
    Resized,
    /// Both changed
    MovedAndResized,
}

/// Geometry change reported by [`PlotArea::layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryChange {
    /// Axis id
    pub id: AxisId,
    /// Kind of change
    pub kind: GeometryKind,
    /// New geometry
    pub geometry: AxisGeometry,
}

impl GeometryChange {
    /// Classify the difference between two geometries. An axis seen for
    /// the first time counts as moved and resized.
    pub(crate) fn between(previous: Option<&AxisGeometry>, next: &AxisGeometry) -> Option<Self> {
        let kind = match previous {
            None => GeometryKind::MovedAndResized,
            Some(previous) => {
                let moved = previous.rect.origin() != next.rect.origin();
                let resized =
                    previous.rect.size() != next.rect.size() || previous.extent != next.extent;
                match (moved, resized) {
                    (false, false) => return None,
                    (true, false) => GeometryKind::Moved,
                    (false, true) => GeometryKind::Resized,
                    (true, true) => GeometryKind::MovedAndResized,
                }
            }
        };
        Some(Self {
            id: next.id,
            kind,
            geometry: *next,
        })
    }
}

/// Axes attached to one canvas, with their scales and last layout.
///
/// Axis ids are slot indices and are never reused after removal.
#[derive(Debug, Clone, Default)]
pub struct PlotArea {
    bounds: Rect,
    margins: Margins,
    aligned_margins: Margins,
    policy: ConvergencePolicy,
    slots: Vec<Option<BorderAxis>>,
    sync_groups: Vec<Vec<AxisId>>,
    geometry: HashMap<AxisId, AxisGeometry>,
    inner: Rect,
    outer: Rect,
    cache: ExtentCache,
    measured_generations: HashMap<AxisId, u64>,
}

impl PlotArea {
    /// Empty area covering `bounds`.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Bounding rectangle.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Resize the area.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Resize the area, keeping its top-left corner.
    pub fn set_size(&mut self, size: Size) {
        self.bounds = Rect::new(self.bounds.x, self.bounds.y, size.width, size.height);
    }

    /// Margins between the bounding rectangle and the outer axes.
    #[must_use]
    pub const fn margins(&self) -> Margins {
        self.margins
    }

    /// Set the margins.
    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    /// Extra margins added by alignment groups.
    #[must_use]
    pub const fn aligned_margins(&self) -> Margins {
        self.aligned_margins
    }

    pub(crate) fn aligned_margins_mut(&mut self) -> &mut Margins {
        &mut self.aligned_margins
    }

    /// Convergence policy of the layout.
    #[must_use]
    pub const fn policy(&self) -> ConvergencePolicy {
        self.policy
    }

    /// Set the convergence policy.
    pub fn set_policy(&mut self, policy: ConvergencePolicy) {
        self.policy = policy;
    }

    // =========================================================================
    // Axes
    // =========================================================================

    /// Attach an axis.
    pub fn add_axis(&mut self, axis: BorderAxis) -> AxisId {
        let id = AxisId::new(u32::try_from(self.slots.len()).unwrap_or(u32::MAX));
        self.slots.push(Some(axis));
        id
    }

    /// Detach an axis. It leaves its synchronization group; intersections
    /// targeting it are ignored from then on.
    pub fn remove_axis(&mut self, id: AxisId) -> Option<BorderAxis> {
        let axis = self.slots.get_mut(id.index())?.take()?;
        for group in &mut self.sync_groups {
            group.retain(|&member| member != id);
        }
        self.sync_groups.retain(|group| group.len() > 1);
        self.geometry.remove(&id);
        self.measured_generations.remove(&id);
        self.cache.invalidate_axis(id);
        Some(axis)
    }

    /// An axis by id.
    #[must_use]
    pub fn axis(&self, id: AxisId) -> Option<&BorderAxis> {
        self.slots.get(id.index())?.as_ref()
    }

    /// A mutable axis by id.
    pub fn axis_mut(&mut self, id: AxisId) -> Option<&mut BorderAxis> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    /// All axes in insertion order.
    pub fn axes(&self) -> impl Iterator<Item = (AxisId, &BorderAxis)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let id = AxisId::new(u32::try_from(i).ok()?);
            slot.as_ref().map(|axis| (id, axis))
        })
    }

    /// Number of attached axes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Check if no axis is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn require(&self, id: AxisId) -> Result<&BorderAxis, LayoutError> {
        self.axis(id).ok_or(LayoutError::UnknownAxis(id))
    }

    /// Place `id` at a coordinate of another axis, or back on its side
    /// with `None`.
    ///
    /// # Errors
    ///
    /// Rejects unknown axes, self intersections, parallel axes and
    /// intersections that would close a cycle.
    pub fn set_intersection(
        &mut self,
        id: AxisId,
        intersection: Option<Intersection>,
    ) -> Result<(), LayoutError> {
        let axis = self.require(id)?;
        if let Some(intersection) = &intersection {
            let target = intersection.target;
            if target == id {
                return Err(LayoutError::SelfIntersection(id));
            }
            let target_axis = self.require(target)?;
            if target_axis.alignment().orientation() == axis.alignment().orientation() {
                return Err(LayoutError::ParallelIntersection { axis: id, target });
            }
            if self.reaches(target, id) {
                return Err(LayoutError::IntersectionCycle { axis: id, target });
            }
        }
        if let Some(axis) = self.axis_mut(id) {
            axis.set_intersection(intersection);
        }
        Ok(())
    }

    /// Check if following intersection targets from `from` leads to `to`.
    fn reaches(&self, from: AxisId, to: AxisId) -> bool {
        let mut current = from;
        for _ in 0..self.slots.len() {
            let Some(next) = self
                .axis(current)
                .and_then(BorderAxis::intersection)
                .map(|i| i.target)
            else {
                return false;
            };
            if next == to {
                return true;
            }
            current = next;
        }
        false
    }

    // =========================================================================
    // Scales
    // =========================================================================

    /// Share one division between `ids`. Members leave their previous
    /// group.
    ///
    /// # Errors
    ///
    /// Fails if one of the ids is unknown.
    pub fn synchronize(&mut self, ids: &[AxisId]) -> Result<(), LayoutError> {
        for &id in ids {
            self.require(id)?;
        }
        let mut group: Vec<AxisId> = Vec::with_capacity(ids.len());
        for &id in ids {
            if !group.contains(&id) {
                group.push(id);
            }
        }
        for existing in &mut self.sync_groups {
            existing.retain(|member| !group.contains(member));
        }
        self.sync_groups.retain(|g| g.len() > 1);
        if group.len() > 1 {
            self.sync_groups.push(group);
        }
        Ok(())
    }

    /// Synchronization group of an axis.
    #[must_use]
    pub fn sync_group(&self, id: AxisId) -> Option<&[AxisId]> {
        self.sync_groups
            .iter()
            .find(|group| group.contains(&id))
            .map(Vec::as_slice)
    }

    /// Recompute every auto-scaled division from the data. Synchronized
    /// axes are computed once on the union of their data intervals.
    ///
    /// Returns the axes whose division changed.
    pub fn update_scales<D: DataIntervals + ?Sized>(&mut self, data: &D, now: Duration) -> Vec<AxisId> {
        let ids: Vec<AxisId> = self.axes().map(|(id, _)| id).collect();
        let mut done: Vec<AxisId> = Vec::new();
        let mut changed = Vec::new();

        for id in ids {
            if done.contains(&id) {
                continue;
            }
            let group: Vec<AxisId> = self
                .sync_group(id)
                .map_or_else(|| vec![id], <[AxisId]>::to_vec);
            done.extend(&group);

            let interval = group
                .iter()
                .map(|&member| data.data_interval(member))
                .fold(Interval::default(), |acc, i| acc.unite(&i));

            let Some(leader) = self.axis_mut(id) else {
                continue;
            };
            if !leader.scale_mut().compute(&interval, now) {
                continue;
            }
            let div = leader.scale().scale_div().clone();
            changed.extend(self.propagate(id, &group, &div));
        }
        changed
    }

    /// Replace the division of `id` and of its synchronization group.
    ///
    /// Returns the axes whose division changed.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn set_scale_div(&mut self, id: AxisId, div: ScaleDiv) -> Result<Vec<AxisId>, LayoutError> {
        self.require(id)?;
        let group = self
            .sync_group(id)
            .map_or_else(|| vec![id], <[AxisId]>::to_vec);
        let mut changed = Vec::new();
        for &member in &group {
            if let Some(axis) = self.axis_mut(member) {
                if axis.scale_mut().set_scale_div(div.clone()) {
                    changed.push(member);
                }
            }
        }
        Ok(changed)
    }

    /// Copy `div` to every member of `group` and report the leader plus the
    /// members that changed.
    fn propagate(&mut self, leader: AxisId, group: &[AxisId], div: &ScaleDiv) -> Vec<AxisId> {
        let mut changed = Vec::with_capacity(group.len());
        for &member in group {
            let Some(axis) = self.axis_mut(member) else {
                continue;
            };
            if member == leader || axis.scale_mut().set_scale_div(div.clone()) {
                changed.push(member);
            }
        }
        changed
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Lay the axes out around the canvas.
    ///
    /// Returns the axes whose geometry changed, or `None` when the bounding
    /// rectangle minus the margins has no area. In that case the previous
    /// geometry is kept.
    pub fn layout<M: MeasureExtent + ?Sized>(&mut self, measure: &M) -> Option<Vec<GeometryChange>> {
        self.drop_stale_extents();
        let specs: Vec<_> = self.axes().map(|(id, axis)| axis.spec(id)).collect();
        let margins = self.margins + self.aligned_margins;

        let result = {
            let cached = CachedMeasure::new(measure, &mut self.cache);
            compute_border_geometry(self.bounds, margins, &specs, &cached, self.policy)
        };
        self.cache.advance_frame();
        let layout = result?;

        let mut changes = Vec::new();
        let mut next = HashMap::with_capacity(layout.axes.len());
        for geometry in layout.axes {
            if let Some(change) = GeometryChange::between(self.geometry.get(&geometry.id), &geometry) {
                debug!(axis = %geometry.id, kind = ?change.kind, rect = ?geometry.rect, "axis geometry changed");
                changes.push(change);
            }
            next.insert(geometry.id, geometry);
        }
        self.geometry = next;
        self.inner = layout.inner;
        self.outer = layout.outer;
        Some(changes)
    }

    /// Invalidate the cached extents of axes whose division changed since
    /// they were last measured, whichever path changed it.
    fn drop_stale_extents(&mut self) {
        let current: HashMap<AxisId, u64> = self
            .axes()
            .map(|(id, axis)| (id, axis.scale().generation()))
            .collect();
        for (&id, &generation) in &current {
            if self.measured_generations.get(&id) != Some(&generation) {
                self.cache.invalidate_axis(id);
            }
        }
        self.measured_generations = current;
    }

    /// Canvas left after the last layout.
    #[must_use]
    pub const fn inner_rect(&self) -> Rect {
        self.inner
    }

    /// Outer rectangle of the last layout.
    #[must_use]
    pub const fn outer_rect(&self) -> Rect {
        self.outer
    }

    /// Geometry of an axis after the last layout.
    #[must_use]
    pub fn geometry(&self, id: AxisId) -> Option<&AxisGeometry> {
        self.geometry.get(&id)
    }

    /// Extent cache statistics.
    #[must_use]
    pub const fn cache(&self) -> &ExtentCache {
        &self.cache
    }

    /// Forget the cached extents of `id`. Call this when its measurement
    /// changes for another reason than its division, a new font for
    /// example.
    pub fn invalidate_extent(&mut self, id: AxisId) {
        self.cache.invalidate_axis(id);
    }

    /// Forget every cached extent.
    pub fn clear_extent_cache(&mut self) {
        self.cache.clear();
    }
}
