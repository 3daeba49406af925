//! Integration tests for axial-layout.
//!
//! These tests drive whole plot areas: scales from data, then layout.

use std::cell::Cell;
use std::time::Duration;

use axial_core::{EngineConfig, Interval, Margins, Rect, ScaleConfig, TickType};
use axial_layout::{
    compute_border_geometry, layout_aligned, Alignment, AlignmentGroups, AreaConfig, AxisId,
    AxisSpec, BorderAxis, ConvergencePolicy, ExtentTable, GeometryKind, Intersection,
    MeasureExtent, Orientation, PlotArea,
};

fn id(raw: u32) -> AxisId {
    AxisId::new(raw)
}

/// Thickness proportional to the number of major ticks, like labels would.
struct TickLabels<'a> {
    area: &'a PlotArea,
}

impl MeasureExtent for TickLabels<'_> {
    fn extent(&self, axis: AxisId, _length: f64) -> f64 {
        self.area.axis(axis).map_or(0.0, |a| {
            let ticks = a.scale().scale_div().ticks(TickType::Major).len();
            10.0 + 2.0 * ticks as f64
        })
    }
}

// =============================================================================
// Stacking
// =============================================================================

#[test]
fn test_two_left_axes_stack_by_proximity() {
    let mut area = PlotArea::new(Rect::new(0.0, 0.0, 500.0, 400.0));
    let near = area.add_axis(BorderAxis::new(Alignment::Left));
    let far = area.add_axis(BorderAxis::new(Alignment::Left).with_proximity(1));
    let measure = ExtentTable::new().with_extent(near, 40.0).with_extent(far, 30.0);

    area.layout(&measure).unwrap();

    assert_eq!(area.geometry(far).unwrap().offset, 40.0);
    assert_eq!(area.geometry(near).unwrap().offset, 0.0);
    assert_eq!(area.inner_rect().left(), 70.0);
}

#[test]
fn test_four_sides_inner_is_outer_minus_totals() {
    let mut area = PlotArea::new(Rect::new(10.0, 20.0, 600.0, 400.0));
    area.set_margins(Margins::uniform(5.0));
    let mut measure = ExtentTable::new();
    let extents = [
        (Alignment::Left, 31.0),
        (Alignment::Left, 12.0),
        (Alignment::Right, 25.0),
        (Alignment::Top, 18.0),
        (Alignment::Bottom, 22.0),
        (Alignment::Bottom, 9.0),
    ];
    for (alignment, extent) in extents {
        let axis = area.add_axis(BorderAxis::new(alignment));
        measure.set_extent(axis, extent);
    }

    area.layout(&measure).unwrap();

    let outer = area.outer_rect();
    let inner = area.inner_rect();
    assert_eq!(outer, Rect::new(15.0, 25.0, 590.0, 390.0));
    assert_eq!(inner.left() - outer.left(), 43.0);
    assert_eq!(outer.right() - inner.right(), 25.0);
    assert_eq!(inner.top() - outer.top(), 18.0);
    assert_eq!(outer.bottom() - inner.bottom(), 31.0);
    assert!(outer.contains_rect(&inner));
}

#[test]
fn test_layout_is_idempotent() {
    let mut area = PlotArea::new(Rect::new(0.0, 0.0, 640.0, 480.0));
    for alignment in Alignment::ALL {
        area.add_axis(BorderAxis::new(alignment));
    }
    let measure = |axis: AxisId, length: f64| 5.0 + f64::from(axis.get()) + length / 100.0;

    let first = area.layout(&measure).unwrap();
    assert_eq!(first.len(), 4);
    let inner = area.inner_rect();

    let second = area.layout(&measure).unwrap();
    assert!(second.is_empty());
    assert_eq!(area.inner_rect(), inner);
}

#[test]
fn test_expand_to_corners_spans_outer_width() {
    let mut area = PlotArea::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let title = area.add_axis(BorderAxis::new(Alignment::Top).with_expand_to_corners(true));
    let left = area.add_axis(BorderAxis::new(Alignment::Left));
    let right = area.add_axis(BorderAxis::new(Alignment::Right));
    let measure = ExtentTable::new()
        .with_extent(title, 20.0)
        .with_extent(left, 45.0)
        .with_extent(right, 15.0);

    area.layout(&measure).unwrap();

    let geometry = area.geometry(title).unwrap();
    assert_eq!(geometry.rect.width, area.outer_rect().width);
    assert_eq!(geometry.rect_no_corners.width, area.inner_rect().width);
}

// =============================================================================
// Intersections
// =============================================================================

#[test]
fn test_left_axis_at_zero_of_bottom_axis() {
    let mut area = PlotArea::new(Rect::new(0.0, 0.0, 420.0, 300.0));
    let bottom = area.add_axis(BorderAxis::new(Alignment::Bottom));
    let left = area.add_axis(BorderAxis::new(Alignment::Left));
    area.set_intersection(left, Some(Intersection::absolute(bottom, 0.0)))
        .unwrap();

    let data = |axis: AxisId| {
        if axis == bottom {
            Interval::new(-10.0, 10.0)
        } else {
            Interval::new(0.0, 1.0)
        }
    };
    area.update_scales(&data, Duration::ZERO);
    let measure = ExtentTable::new().with_extent(bottom, 20.0).with_extent(left, 30.0);
    area.layout(&measure).unwrap();

    let geometry = area.geometry(left).unwrap();
    assert!(geometry.intersected);
    assert_eq!(geometry.rect.right(), 210.0);
    assert_eq!(area.inner_rect().left(), 0.0);
}

#[test]
fn test_intersected_axis_follows_target_division() {
    let mut area = PlotArea::new(Rect::new(0.0, 0.0, 420.0, 300.0));
    let bottom = area.add_axis(BorderAxis::new(Alignment::Bottom));
    let left = area.add_axis(BorderAxis::new(Alignment::Left));
    area.set_intersection(left, Some(Intersection::absolute(bottom, 0.0)))
        .unwrap();
    let measure = ExtentTable::new().with_extent(bottom, 20.0).with_extent(left, 30.0);

    area.update_scales(&|_: AxisId| Interval::new(-10.0, 10.0), Duration::ZERO);
    area.layout(&measure).unwrap();
    assert_eq!(area.geometry(left).unwrap().rect.right(), 210.0);

    let changed = area.update_scales(&|_: AxisId| Interval::new(0.0, 20.0), Duration::from_secs(1));
    assert!(changed.contains(&bottom));
    let changes = area.layout(&measure).unwrap();

    let moved = changes.iter().find(|c| c.id == left).unwrap();
    assert_eq!(moved.kind, GeometryKind::Moved);
    assert_eq!(moved.geometry.rect.right(), 0.0);
    assert!(changes.iter().all(|c| c.id != bottom));
}

#[test]
fn test_mutual_intersection_is_ignored() {
    let bounds = Rect::new(0.0, 0.0, 400.0, 300.0);
    let mut bottom = AxisSpec::new(id(0), Alignment::Bottom);
    bottom.intersection = Some(Intersection::relative(id(1), 0.5));
    let mut left = AxisSpec::new(id(1), Alignment::Left);
    left.intersection = Some(Intersection::relative(id(0), 0.5));
    let measure = ExtentTable::new().with_extent(id(0), 20.0).with_extent(id(1), 40.0);

    let layout = compute_border_geometry(
        bounds,
        Margins::ZERO,
        &[bottom, left],
        &measure,
        ConvergencePolicy::TwoPass,
    )
    .unwrap();

    assert_eq!(layout.inner, Rect::new(40.0, 0.0, 360.0, 280.0));
    assert!(layout.axes.iter().all(|g| !g.intersected));
}

// =============================================================================
// Failure semantics
// =============================================================================

#[test]
fn test_invalid_bounds_is_a_noop() {
    let mut area = PlotArea::new(Rect::new(0.0, 0.0, 300.0, 200.0));
    let left = area.add_axis(BorderAxis::new(Alignment::Left));
    let calls = Cell::new(0);
    let measure = |_: AxisId, _: f64| {
        calls.set(calls.get() + 1);
        25.0
    };
    area.layout(&measure).unwrap();
    let before = *area.geometry(left).unwrap();
    let measured = calls.get();

    area.set_bounds(Rect::new(0.0, 0.0, 300.0, -5.0));
    assert!(area.layout(&measure).is_none());
    assert_eq!(calls.get(), measured);
    assert_eq!(*area.geometry(left).unwrap(), before);
}

#[test]
fn test_fixed_point_terminates_on_oscillating_extents() {
    let mut area = PlotArea::new(Rect::new(0.0, 0.0, 300.0, 300.0));
    area.set_policy(ConvergencePolicy::FixedPoint { max_iterations: 32 });
    area.add_axis(BorderAxis::new(Alignment::Left));
    area.add_axis(BorderAxis::new(Alignment::Bottom));
    // Long axes want thick labels, which make them short again.
    let measure = |_: AxisId, length: f64| if length > 250.0 { 120.0 } else { 0.0 };

    assert!(area.layout(&measure).is_some());
    let inner = area.inner_rect();
    assert!(inner.width > 0.0 && inner.height > 0.0);
}

// =============================================================================
// Scales feeding layout
// =============================================================================

#[test]
fn test_division_change_resizes_axis() {
    let mut area = PlotArea::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let left = area.add_axis(BorderAxis::new(Alignment::Left));

    let narrow = |_: AxisId| Interval::new(0.0, 2.0);
    assert_eq!(area.update_scales(&narrow, Duration::ZERO), vec![left]);
    let measure = TickLabels { area: &area }.extent(left, 300.0);
    let table = ExtentTable::new().with_extent(left, measure);
    area.layout(&table).unwrap();

    let wide = |_: AxisId| Interval::new(0.0, 7.3);
    assert_eq!(area.update_scales(&wide, Duration::from_secs(1)), vec![left]);
    let measure = TickLabels { area: &area }.extent(left, 300.0);
    let table = ExtentTable::new().with_extent(left, measure);
    let changes = area.layout(&table).unwrap();

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind, GeometryKind::Resized);
}

#[test]
fn test_streaming_keeps_previous_width() {
    let mut config = ScaleConfig::default();
    config.streaming.enabled = true;
    let mut area = PlotArea::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let bottom = area.add_axis(BorderAxis::new(Alignment::Bottom).with_scale(config));

    let window = |lo: f64, hi: f64| move |_: AxisId| Interval::new(lo, hi);
    area.update_scales(&window(0.0, 100.0), Duration::ZERO);
    area.update_scales(&window(0.0, 100.0 + 1e-3), Duration::from_millis(1000));
    area.update_scales(&window(5.0, 104.5), Duration::from_millis(1100));

    let div = area.axis(bottom).unwrap().scale().scale_div();
    assert_eq!(div.lower_bound(), 5.0);
    assert!((div.upper_bound() - (105.0 + 1e-3)).abs() < 1e-9);
}

#[test]
fn test_fixed_engine_slides_with_data() {
    let config = ScaleConfig {
        engine: EngineConfig::Fixed {
            max_interval_width: Some(10.0),
        },
        ..ScaleConfig::default()
    };
    let mut area = PlotArea::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let bottom = area.add_axis(BorderAxis::new(Alignment::Bottom).with_scale(config));

    area.update_scales(&|_: AxisId| Interval::new(5.0, 30.0), Duration::ZERO);
    let div = area.axis(bottom).unwrap().scale().scale_div();
    assert!((div.lower_bound() - 5.0).abs() < 1e-9);
    assert!((div.upper_bound() - 15.0).abs() < 1e-9);
    assert!(area.axis(bottom).unwrap().scale().streaming().enabled);
}

#[test]
fn test_sync_group_uses_union_of_data() {
    let mut area = PlotArea::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let left = area.add_axis(BorderAxis::new(Alignment::Left));
    let right = area.add_axis(BorderAxis::new(Alignment::Right));
    area.synchronize(&[left, right]).unwrap();

    let data = |axis: AxisId| {
        if axis == left {
            Interval::new(0.0, 3.0)
        } else {
            Interval::new(-8.0, -1.0)
        }
    };
    let changed = area.update_scales(&data, Duration::ZERO);
    assert_eq!(changed, vec![left, right]);

    let div = area.axis(right).unwrap().scale().scale_div();
    let leader = area.axis(left).unwrap().scale().scale_div();
    assert_eq!(div.bounds(), leader.bounds());
    assert_eq!(div.ticks(TickType::Major), leader.ticks(TickType::Major));
    assert!(div.contains(-8.0) && div.contains(3.0));
}

// =============================================================================
// Alignment and configuration
// =============================================================================

#[test]
fn test_side_by_side_areas_share_canvas_edges() {
    let mut a = PlotArea::new(Rect::new(0.0, 0.0, 300.0, 200.0));
    let a_bottom = a.add_axis(BorderAxis::new(Alignment::Bottom));
    let mut b = PlotArea::new(Rect::new(300.0, 0.0, 300.0, 200.0));
    let b_bottom = b.add_axis(BorderAxis::new(Alignment::Bottom));
    let b_top = b.add_axis(BorderAxis::new(Alignment::Top));

    let ma = ExtentTable::new().with_extent(a_bottom, 30.0);
    let mb = ExtentTable::new().with_extent(b_bottom, 18.0).with_extent(b_top, 12.0);
    let mut areas = [a, b];
    let mut groups = AlignmentGroups::new();
    groups.add(Orientation::Horizontal, [0, 1]);

    let changes = layout_aligned(&mut areas, &groups, &[&ma, &mb]);

    assert_eq!(changes.len(), 2);
    assert_eq!(areas[0].inner_rect().top(), areas[1].inner_rect().top());
    assert_eq!(areas[0].inner_rect().bottom(), areas[1].inner_rect().bottom());
    assert_eq!(areas[0].inner_rect().top(), 12.0);
    assert_eq!(areas[0].inner_rect().bottom(), 170.0);
}

#[test]
fn test_area_from_yaml() {
    let yaml = r"
bounds: { x: 0, y: 0, width: 500, height: 300 }
axes:
  - alignment: bottom
  - alignment: left
    scale:
      engine: { kind: log10 }
  - alignment: right
    intersection: { target: 0, value: 1.0, value_type: relative }
";
    let mut area = AreaConfig::from_yaml(yaml).unwrap().build().unwrap();
    let measure = ExtentTable::new()
        .with_extent(id(0), 20.0)
        .with_extent(id(1), 50.0)
        .with_extent(id(2), 10.0);
    area.layout(&measure).unwrap();

    assert_eq!(area.inner_rect(), Rect::new(50.0, 0.0, 450.0, 280.0));
    let right = area.geometry(id(2)).unwrap();
    assert!(right.intersected);
    assert_eq!(right.rect.left(), 500.0);
}
