//! Resolution of axis intersections before a layout pass.
//!
//! Every axis has at most one target, so the relation is a functional
//! graph. Targets that are missing, hidden, parallel or the axis itself
//! are dropped, then every cycle is dropped as a whole. Dropped axes are
//! laid out as ordinary stacked axes.

use tracing::debug;

use crate::axis::AxisSpec;

/// Index of the resolved target of each axis, `None` for stacked axes.
#[must_use]
pub fn resolve_intersections(axes: &[AxisSpec]) -> Vec<Option<usize>> {
    let mut targets: Vec<Option<usize>> = axes
        .iter()
        .enumerate()
        .map(|(i, axis)| direct_target(axes, i, axis))
        .collect();
    break_cycles(axes, &mut targets);
    targets
}

/// Intersected axes ordered so that every target comes before the axes
/// that intersect it.
#[must_use]
pub fn placement_order(targets: &[Option<usize>]) -> Vec<usize> {
    let mut placed = vec![false; targets.len()];
    let mut order = Vec::new();
    let mut chain = Vec::new();

    for start in 0..targets.len() {
        let mut current = start;
        while !placed[current] {
            let Some(next) = targets[current] else { break };
            chain.push(current);
            current = next;
        }
        while let Some(i) = chain.pop() {
            if !placed[i] {
                placed[i] = true;
                order.push(i);
            }
        }
    }
    order
}

fn direct_target(axes: &[AxisSpec], index: usize, axis: &AxisSpec) -> Option<usize> {
    let intersection = axis.intersection.as_ref()?;
    if !axis.is_laid_out() {
        return None;
    }
    let Some(target) = axes.iter().position(|a| a.id == intersection.target) else {
        debug!(axis = %axis.id, target = %intersection.target, "intersection target missing, ignored");
        return None;
    };
    let target_axis = &axes[target];
    if target == index {
        debug!(axis = %axis.id, "self intersection ignored");
        None
    } else if !target_axis.is_laid_out() {
        debug!(axis = %axis.id, target = %target_axis.id, "intersection target hidden, ignored");
        None
    } else if target_axis.alignment.orientation() == axis.alignment.orientation() {
        debug!(axis = %axis.id, target = %target_axis.id, "parallel intersection ignored");
        None
    } else {
        Some(target)
    }
}

fn break_cycles(axes: &[AxisSpec], targets: &mut [Option<usize>]) {
    const UNVISITED: usize = usize::MAX;
    let mut walk = vec![UNVISITED; targets.len()];

    for start in 0..targets.len() {
        if walk[start] != UNVISITED {
            continue;
        }
        let mut path: Vec<usize> = Vec::new();
        let mut current = start;
        loop {
            if walk[current] == start {
                let cycle_start = path.iter().position(|&i| i == current).unwrap_or(0);
                for &i in &path[cycle_start..] {
                    debug!(axis = %axes[i].id, "cyclic intersection ignored");
                    targets[i] = None;
                }
                break;
            }
            if walk[current] != UNVISITED {
                break;
            }
            walk[current] = start;
            path.push(current);
            match targets[current] {
                Some(next) => current = next,
                None => break,
            }
        }
    }
}
