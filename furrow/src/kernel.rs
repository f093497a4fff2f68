//! Geometry kernel: the primitives the planning pipeline is built on.
//!
//! The pipeline never does polygon geometry directly. It asks a
//! [`GeometryKernel`] to rotate, buffer, intersect and find centroids, so a
//! different kernel (higher precision, a GIS library binding, a test double)
//! can be swapped in without touching the stages.
//!
//! ## Rust Lesson #22: Traits as Seams
//!
//! A trait is an interface. Functions written against `K: GeometryKernel`
//! are compiled once per concrete kernel (monomorphization), so the
//! abstraction costs nothing at runtime.

use geo::{Buffer, Coord, LineString};

use crate::clip::line_region_spans;
use crate::error::{KernelError, KernelResult};
use crate::geometry::{Line, Point, Region, signed_area_of_points};

/// Default absolute tolerance for near-degenerate comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Trig results smaller than this are snapped to zero so quarter turns stay
/// exactly axis-aligned.
const TRIG_SNAP: f64 = 2.5e-16;

/// The capability set the planner needs from a geometry library.
pub trait GeometryKernel {
    /// Absolute tolerance the kernel applies to near-degenerate cases.
    fn tolerance(&self) -> f64;

    /// Area centroid of a simple ring.
    fn centroid(&self, ring: &[Point]) -> KernelResult<Point>;

    /// Rotate points about `about`; positive angles are counter-clockwise.
    fn rotate(&self, points: &[Point], angle_degrees: f64, about: Point) -> Vec<Point>;

    /// Offset a simple ring outward by a non-negative distance.
    fn buffer_outward(&self, ring: &[Point], distance: f64) -> KernelResult<Region>;

    /// Pieces of `line` inside (or on the boundary of) `region`, ordered
    /// along the line and keeping its direction.
    fn intersect(&self, line: Line, region: &Region) -> Vec<Line>;

    /// Rotate both endpoints of a line.
    fn rotate_line(&self, line: Line, angle_degrees: f64, about: Point) -> Line {
        let rotated = self.rotate(&[line.start(), line.end()], angle_degrees, about);
        Line::from_points(rotated[0], rotated[1])
    }
}

/// Planar kernel: closed-form rotation and centroid, span clipping for
/// intersections, and the `geo` crate for outward buffering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarKernel {
    tolerance: f64,
}

impl Default for PlanarKernel {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl PlanarKernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different tolerance. Fields given in lon/lat degrees carry
    /// coordinate noise far above `1e-9` of a metre-scale field, so boundary
    /// rows may need a coarser value to count as on the edge.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }
}

impl GeometryKernel for PlanarKernel {
    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn centroid(&self, ring: &[Point]) -> KernelResult<Point> {
        if ring.len() < 3 {
            return Err(KernelError::Degenerate(format!(
                "centroid needs at least 3 points, got {}",
                ring.len()
            )));
        }

        let area = signed_area_of_points(ring);
        if !area.is_finite() || area.abs() <= self.tolerance * self.tolerance {
            return Err(KernelError::Degenerate("ring has zero area".to_string()));
        }

        // Shift to the first vertex to keep the products small.
        let origin = ring[0];
        let n = ring.len();
        let (mut cx, mut cy) = (0.0, 0.0);
        for i in 0..n {
            let a = Point::new(ring[i].x - origin.x, ring[i].y - origin.y);
            let b = Point::new(ring[(i + 1) % n].x - origin.x, ring[(i + 1) % n].y - origin.y);
            let cross = a.x * b.y - b.x * a.y;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }

        Ok(Point::new(
            origin.x + cx / (6.0 * area),
            origin.y + cy / (6.0 * area),
        ))
    }

    fn rotate(&self, points: &[Point], angle_degrees: f64, about: Point) -> Vec<Point> {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let sin = if sin.abs() < TRIG_SNAP { 0.0 } else { sin };
        let cos = if cos.abs() < TRIG_SNAP { 0.0 } else { cos };

        points
            .iter()
            .map(|p| {
                let dx = p.x - about.x;
                let dy = p.y - about.y;
                Point::new(
                    about.x + dx * cos - dy * sin,
                    about.y + dx * sin + dy * cos,
                )
            })
            .collect()
    }

    fn buffer_outward(&self, ring: &[Point], distance: f64) -> KernelResult<Region> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(KernelError::InvalidArgument(format!(
                "buffer distance must be finite and non-negative, got {}",
                distance
            )));
        }
        if ring.len() < 3 {
            return Err(KernelError::Degenerate(format!(
                "buffer needs at least 3 points, got {}",
                ring.len()
            )));
        }

        // Buffering a valid polygon by zero gives the polygon back.
        if distance == 0.0 {
            return Ok(Region::from_rings(vec![ring.to_vec()]));
        }

        let exterior: LineString<f64> = ring
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect::<Vec<_>>()
            .into();
        let buffered = geo::Polygon::new(exterior, vec![]).buffer(distance);

        let rings: Vec<Vec<Point>> = buffered
            .0
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
            .map(|ring| ring.coords().map(|c| Point::new(c.x, c.y)).collect())
            .collect();

        let region = Region::from_rings(rings);
        if region.is_empty() {
            return Err(KernelError::EmptyResult("buffer"));
        }
        Ok(region)
    }

    fn intersect(&self, line: Line, region: &Region) -> Vec<Line> {
        line_region_spans(line, region, self.tolerance)
    }
}
