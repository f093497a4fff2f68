//! Orientation restore and row ordering.
//!
//! Clipped segments come out of the rotated frame the sweep was built in.
//! This module rotates them back about the same centroid and fixes one
//! traversal order for them.
//!
//! ## Ordering rule
//!
//! Segments are sorted by ascending midpoint Y in the original frame.
//! Midpoints within [`ORDER_TOLERANCE`] of their neighbour in that order form
//! a tie group, and each tie group keeps sweep order.
//!
//! Known limitation: for driving angles far from horizontal the rows are not
//! aligned with Y after the inverse rotation, so consecutive lines in this
//! order need not be neighbouring rows. At exactly 90 degrees every row has
//! the same midpoint Y and the sweep order is kept as is.

use tracing::debug;

use crate::geometry::{Line, Point};
use crate::kernel::GeometryKernel;

/// Midpoint Y values closer than this sort as equal.
pub const ORDER_TOLERANCE: f64 = 1e-9;

/// Sort key for a guidance line: its midpoint Y.
#[inline]
pub fn order_key(line: &Line) -> f64 {
    line.midpoint().y
}

/// Rotate clipped segments back by `+angle_degrees` about `centroid` and
/// sort them into traversal order.
///
/// `centroid` must be the anchor the forward rotation used (the original
/// field's centroid), otherwise the restored lines drift.
pub fn restore_and_order<K: GeometryKernel + ?Sized>(
    kernel: &K,
    clipped: &[Line],
    centroid: Point,
    angle_degrees: f64,
) -> Vec<Line> {
    let lines: Vec<Line> = clipped
        .iter()
        .map(|line| kernel.rotate_line(*line, angle_degrees, centroid))
        .collect();

    let ordered = order_lines(lines, ORDER_TOLERANCE);
    debug!(lines = ordered.len(), angle = angle_degrees, "restored and ordered guidance lines");
    ordered
}

/// Stable sort by midpoint Y where keys within `tolerance` of each other
/// count as equal.
///
/// Sorting on the raw key first keeps the comparator total. Runs whose
/// consecutive keys differ by at most `tolerance` are then put back into
/// insertion order.
pub fn order_lines(lines: Vec<Line>, tolerance: f64) -> Vec<Line> {
    let mut keyed: Vec<(usize, f64, Line)> = lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| (index, order_key(&line), line))
        .collect();
    keyed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut start = 0;
    for end in 1..=keyed.len() {
        if end == keyed.len() || keyed[end].1 - keyed[end - 1].1 > tolerance {
            keyed[start..end].sort_by_key(|(index, _, _)| *index);
            start = end;
        }
    }

    keyed.into_iter().map(|(_, _, line)| line).collect()
}
