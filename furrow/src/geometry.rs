//! Core geometry types for furrow.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = duplicate the value (`Copy` for small stack values only)
//! - `PartialEq` = compare with `==`
//! - `Serialize` / `Deserialize` = serde support for JSON and YAML output

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// A 2D point with x,y coordinates.
///
/// Coordinates are caller-defined planar units (metres, or lon/lat degrees
/// when the caller works directly in geographic coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A waypoint carries nothing beyond its position; its index in the
/// waypoint path encodes traversal order.
pub type Waypoint = Point;

/// A line segment defined by two endpoints.
///
/// Guidance lines are `Line`s: one pass of the implement, from `(x1, y1)`
/// to `(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
pub type Bounds = (f64, f64, f64, f64);

/// A validated field boundary: a simple ring with at least three distinct
/// vertices.
///
/// The ring is stored open (the closing vertex is not repeated). Use
/// [`FieldPolygon::ring`] for the closed form. A `FieldPolygon` can only be
/// built through [`FieldPolygon::new`], so holding one means the boundary
/// already passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPolygon {
    vertices: Vec<Point>,
}

/// A headland area as produced by the kernel's buffer: one or more rings,
/// interpreted with the even-odd rule (exteriors and holes alike).
///
/// Rings are stored open, like [`FieldPolygon`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    rings: Vec<Vec<Point>>,
}

// ============================================================================
// IMPLEMENTATIONS (methods)
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Get the start point of the line.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the end point of the line.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Get the midpoint of the line.
    #[inline]
    pub fn midpoint(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }

    /// The same segment traversed end to start.
    #[inline]
    pub fn reversed(&self) -> Line {
        Line::new(self.x2, self.y2, self.x1, self.y1)
    }
}

impl FieldPolygon {
    /// Validate and build a field boundary.
    ///
    /// Accepts the ring either closed (first == last) or open; an open ring
    /// is closed implicitly. Consecutive duplicate vertices are collapsed.
    ///
    /// Fails with [`PlanError::InvalidPolygon`] when a coordinate is not
    /// finite, when fewer than three distinct vertices remain, or when any
    /// two edges cross or touch other than at their shared vertex.
    pub fn new(points: Vec<Point>) -> PlanResult<Self> {
        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            return Err(PlanError::InvalidPolygon(format!(
                "vertex {} has a non-finite coordinate",
                bad
            )));
        }

        let mut vertices: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            if vertices.last() != Some(&p) {
                vertices.push(p);
            }
        }
        // Drop the closing vertex (and any repeats of it) so the ring is open.
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        if vertices.len() < 3 {
            return Err(PlanError::InvalidPolygon(format!(
                "need at least 3 distinct vertices, got {}",
                vertices.len()
            )));
        }

        if let Some((i, j)) = first_self_intersection(&vertices) {
            return Err(PlanError::InvalidPolygon(format!(
                "ring is self-intersecting (edges {} and {})",
                i, j
            )));
        }

        Ok(Self { vertices })
    }

    /// Open ring of distinct vertices.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Closed ring (first vertex repeated at the end).
    pub fn ring(&self) -> Vec<Point> {
        let mut ring = self.vertices.clone();
        ring.push(self.vertices[0]);
        ring
    }

    /// Get the bounding box as (min_x, min_y, max_x, max_y).
    pub fn bounding_box(&self) -> Bounds {
        // A validated polygon always has vertices, so there is always a box.
        bounding_box_of(&self.vertices).unwrap_or((0.0, 0.0, 0.0, 0.0))
    }

    /// Signed area via the shoelace formula (positive = counter-clockwise).
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area_of_points(&self.vertices)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}

impl Region {
    /// Build a region from open or closed rings. Rings with fewer than three
    /// distinct points are dropped.
    pub fn from_rings(rings: Vec<Vec<Point>>) -> Self {
        let rings = rings
            .into_iter()
            .map(|mut ring| {
                while ring.len() > 1 && ring.first() == ring.last() {
                    ring.pop();
                }
                ring
            })
            .filter(|ring| ring.len() >= 3)
            .collect();
        Self { rings }
    }

    #[inline]
    pub fn rings(&self) -> &[Vec<Point>] {
        &self.rings
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn bounding_box(&self) -> Option<Bounds> {
        let all: Vec<Point> = self.rings.iter().flatten().copied().collect();
        bounding_box_of(&all)
    }
}

impl From<&FieldPolygon> for Region {
    fn from(field: &FieldPolygon) -> Self {
        Region {
            rings: vec![field.vertices.clone()],
        }
    }
}

/// Bounding box of a point sequence, `None` when empty.
pub fn bounding_box_of(points: &[Point]) -> Option<Bounds> {
    if points.is_empty() {
        return None;
    }

    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    Some((min_x, min_y, max_x, max_y))
}

/// Calculate signed area of a point sequence using the shoelace formula.
///
/// Returns:
/// - Positive value for counter-clockwise winding
/// - Negative value for clockwise winding
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

// ============================================================================
// SIMPLICITY CHECKS
// ============================================================================

/// Twice the signed area of triangle (a, b, c).
#[inline]
fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// `p` is assumed collinear with `a`-`b`; true when it lies within the segment.
#[inline]
fn within_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// True if closed segments `a1-a2` and `b1-b2` share at least one point.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    let straddles = |p: f64, q: f64| (p > 0.0 && q < 0.0) || (p < 0.0 && q > 0.0);
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    (d1 == 0.0 && within_segment(b1, b2, a1))
        || (d2 == 0.0 && within_segment(b1, b2, a2))
        || (d3 == 0.0 && within_segment(a1, a2, b1))
        || (d4 == 0.0 && within_segment(a1, a2, b2))
}

/// Find the first pair of edges that violates simplicity.
///
/// Edge `i` runs from `ring[i]` to `ring[(i + 1) % n]`. Adjacent edges may
/// only share their common vertex; a collinear fold-back between adjacent
/// edges counts as an intersection.
pub fn first_self_intersection(ring: &[Point]) -> Option<(usize, usize)> {
    let n = ring.len();
    let edge = |i: usize| (ring[i], ring[(i + 1) % n]);

    for i in 0..n {
        let (a1, a2) = edge(i);
        for j in (i + 1)..n {
            let (b1, b2) = edge(j);

            if j == i + 1 {
                // shared vertex a2 == b1
                if folds_back(a1, a2, b2) {
                    return Some((i, j));
                }
            } else if i == 0 && j == n - 1 {
                // shared vertex b2 == a1
                if folds_back(b1, a1, a2) {
                    return Some((i, j));
                }
            } else if segments_intersect(a1, a2, b1, b2) {
                return Some((i, j));
            }
        }
    }

    None
}

/// Path `a -> shared -> c` doubles back along itself.
#[inline]
fn folds_back(a: Point, shared: Point, c: Point) -> bool {
    if orientation(a, shared, c) != 0.0 {
        return false;
    }
    let dot = (a.x - shared.x) * (c.x - shared.x) + (a.y - shared.y) * (c.y - shared.y);
    dot > 0.0
}

// ============================================================================
// TESTS
// ============================================================================
