//! Line clipping against headland regions.
//!
//! Two layers live here:
//! - [`line_region_spans`], the even-odd span clipper that backs the
//!   planar kernel's `intersect` primitive.
//! - [`clip_sweep_lines`], the Clipper stage: run every sweep candidate
//!   through a kernel and keep the traversable pieces.

use tracing::trace;

use crate::geometry::{Line, Point, Region};
use crate::kernel::GeometryKernel;

// ============================================================================
// POINT IN POLYGON (Ray Casting Algorithm)
// ============================================================================

/// Test if a point is inside a polygon using ray casting.
///
/// Casts a ray to the right and counts edge crossings.
/// Odd crossings = inside, even = outside.
#[inline]
pub fn point_in_polygon(px: f64, py: f64, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// Distance from `p` to the closed segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Inside the region (even-odd over all rings) or within `tolerance` of
/// one of its edges.
pub fn point_in_region(p: Point, region: &Region, tolerance: f64) -> bool {
    let on_boundary = region.rings().iter().any(|ring| {
        let n = ring.len();
        (0..n).any(|i| distance_to_segment(p, ring[i], ring[(i + 1) % n]) <= tolerance)
    });
    if on_boundary {
        return true;
    }

    let crossings = region
        .rings()
        .iter()
        .filter(|ring| point_in_polygon(p.x, p.y, ring))
        .count();
    crossings % 2 == 1
}

// ============================================================================
// LINE-REGION CLIPPING
// ============================================================================

/// Clip a segment to a region, boundary included.
///
/// Works in the segment's own frame: `u` runs along the segment from its
/// start, `v` is the signed offset from it. Ring edges that cross `v = 0`
/// (half-open rule, so a vertex lying on the line is counted once) give
/// crossing positions that pair up into inside spans. Edges lying on the
/// line within `tolerance` add their extent as boundary spans.
///
/// Returned pieces keep the input's direction and are ordered along it.
/// Spans no longer than `tolerance` (touch points) are dropped.
pub fn line_region_spans(line: Line, region: &Region, tolerance: f64) -> Vec<Line> {
    let length = line.length();
    if !(length > tolerance) {
        return Vec::new();
    }

    // Fast bounding box rejection
    if let Some((min_x, min_y, max_x, max_y)) = region.bounding_box() {
        let line_min_x = line.x1.min(line.x2);
        let line_max_x = line.x1.max(line.x2);
        let line_min_y = line.y1.min(line.y2);
        let line_max_y = line.y1.max(line.y2);

        if line_max_x < min_x - tolerance
            || line_min_x > max_x + tolerance
            || line_max_y < min_y - tolerance
            || line_min_y > max_y + tolerance
        {
            return Vec::new();
        }
    } else {
        return Vec::new();
    }

    let dir_x = (line.x2 - line.x1) / length;
    let dir_y = (line.y2 - line.y1) / length;
    let to_local = |p: Point| -> (f64, f64) {
        let rx = p.x - line.x1;
        let ry = p.y - line.y1;
        (rx * dir_x + ry * dir_y, ry * dir_x - rx * dir_y)
    };

    let mut crossings: Vec<f64> = Vec::new();
    let mut spans: Vec<(f64, f64)> = Vec::new();

    for ring in region.rings() {
        let n = ring.len();
        for i in 0..n {
            let (ua, va) = to_local(ring[i]);
            let (ub, vb) = to_local(ring[(i + 1) % n]);

            if va.abs() <= tolerance && vb.abs() <= tolerance {
                spans.push((ua.min(ub), ua.max(ub)));
            }

            if (va > 0.0) != (vb > 0.0) {
                let t = va / (va - vb);
                crossings.push(ua + t * (ub - ua));
            }
        }
    }

    crossings.sort_by(f64::total_cmp);
    spans.extend(crossings.chunks_exact(2).map(|pair| (pair[0], pair[1])));
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 + tolerance => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    merged
        .into_iter()
        .filter_map(|(start, end)| {
            let start = start.max(0.0);
            let end = end.min(length);
            (end - start > tolerance).then(|| {
                Line::new(
                    line.x1 + dir_x * start,
                    line.y1 + dir_y * start,
                    line.x1 + dir_x * end,
                    line.y1 + dir_y * end,
                )
            })
        })
        .collect()
}

// ============================================================================
// CLIPPER STAGE
// ============================================================================

/// Intersect every sweep candidate with the headland region.
///
/// A candidate outside the region disappears; a candidate split by a
/// concavity yields one guidance line per piece, in order along the row.
/// Degenerate pieces (shorter than the kernel tolerance) are discarded as
/// non-traversable.
pub fn clip_sweep_lines<K: GeometryKernel + ?Sized>(
    kernel: &K,
    candidates: &[Line],
    headland: &Region,
) -> Vec<Line> {
    let tolerance = kernel.tolerance();

    candidates
        .iter()
        .enumerate()
        .flat_map(|(row, candidate)| {
            let pieces = kernel.intersect(*candidate, headland);
            if pieces.is_empty() {
                trace!(row, "sweep candidate misses headland region");
            }
            pieces
        })
        .filter(|piece| piece.length() > tolerance)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
