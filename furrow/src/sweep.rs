//! Sweep line generation.
//!
//! Turns the general-angle sweep into an axis-aligned one: the field is
//! rotated by `-angle` about its centroid so the driving direction lies
//! along +X, then horizontal candidate lines are laid out every tool width
//! across the rotated extent plus the headland margin.

use tracing::debug;

use crate::error::{PlanError, PlanResult};
use crate::geometry::{FieldPolygon, Line, Point, bounding_box_of};
use crate::kernel::GeometryKernel;
use crate::params::Parameters;

/// Everything the later stages need from the sweep setup.
///
/// All coordinates are in the rotated frame except `centroid`, which is the
/// shared anchor of the forward and inverse rotations.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepFrame {
    /// Centroid of the original field; rotations in both directions pivot here.
    pub centroid: Point,
    /// Driving angle the frame was rotated by (negated).
    pub angle_degrees: f64,
    /// Field ring rotated by `-angle_degrees` about `centroid`.
    pub rotated_field: Vec<Point>,
    /// `headland_passes * tool_width`.
    pub headland_distance: f64,
    /// Full-span horizontal candidates, bottom row first.
    pub candidates: Vec<Line>,
}

/// Number of rows `y = start + i * spacing` with `y <= end` (within `tolerance`).
///
/// Returns `None` when the count is not representable.
pub fn sweep_row_count(start: f64, end: f64, spacing: f64, tolerance: f64) -> Option<usize> {
    let steps = ((end - start + tolerance) / spacing).floor();
    if !steps.is_finite() || steps < 0.0 || steps >= usize::MAX as f64 {
        return None;
    }
    Some(steps as usize + 1)
}

/// Generate the sweep frame and its candidate lines.
///
/// Rows start at `min_y - h` and step by the tool width until they pass
/// `max_y + h`; each spans `[min_x - 2h, max_x + 2h]` so every row reaches
/// across the buffered field whatever its shape. Rows are placed by index,
/// so spacing is exact and does not drift over long sweeps.
///
/// Fails with [`PlanError::InvalidParameter`] for invalid parameters and
/// [`PlanError::ResourceLimitExceeded`] when more than `max_lines` rows
/// would be needed.
pub fn generate_sweep_lines<K: GeometryKernel + ?Sized>(
    kernel: &K,
    field: &FieldPolygon,
    params: &Parameters,
    max_lines: usize,
) -> PlanResult<SweepFrame> {
    params.validate()?;

    let angle = params.driving_angle_degrees;
    let spacing = params.tool_width;
    let headland = params.headland_distance();

    let centroid = kernel.centroid(field.vertices())?;
    let rotated_field = kernel.rotate(field.vertices(), -angle, centroid);

    let Some((min_x, min_y, max_x, max_y)) = bounding_box_of(&rotated_field) else {
        return Err(PlanError::InvalidPolygon("field has no vertices".to_string()));
    };

    let first_y = min_y - headland;
    let last_y = max_y + headland;
    let rows = sweep_row_count(first_y, last_y, spacing, kernel.tolerance()).unwrap_or(usize::MAX);
    if rows > max_lines {
        return Err(PlanError::ResourceLimitExceeded {
            required: rows,
            limit: max_lines,
        });
    }

    let start_x = min_x - headland * 2.0;
    let end_x = max_x + headland * 2.0;

    let candidates: Vec<Line> = (0..rows)
        .map(|i| {
            let y = first_y + i as f64 * spacing;
            Line::new(start_x, y, end_x, y)
        })
        .collect();

    debug!(
        rows,
        angle,
        headland,
        width = max_x - min_x,
        height = max_y - min_y,
        "generated sweep candidates"
    );

    Ok(SweepFrame {
        centroid,
        angle_degrees: angle,
        rotated_field,
        headland_distance: headland,
        candidates,
    })
}

// ============================================================================
// TESTS
// ============================================================================
