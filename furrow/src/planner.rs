//! The coverage planning pipeline.
//!
//! Five stages, each a pure function of its inputs:
//!
//! ```text
//! kernel -> sweep lines -> clip to headland -> restore & order -> waypoints
//! ```
//!
//! [`CoveragePlanner`] holds the only configuration that is not part of a
//! single run: the geometry kernel, the sweep-line safety limit and the
//! traversal pattern.

use serde::Serialize;
use tracing::debug;

use crate::clip::clip_sweep_lines;
use crate::error::PlanResult;
use crate::geometry::{FieldPolygon, Line, Waypoint};
use crate::kernel::{GeometryKernel, PlanarKernel};
use crate::order::restore_and_order;
use crate::params::Parameters;
use crate::sweep::generate_sweep_lines;
use crate::waypoints::{TraversalPattern, sequence_with_pattern, transit_distance, working_distance};

/// Default upper bound on sweep candidates per run.
pub const DEFAULT_MAX_SWEEP_LINES: usize = 100_000;

/// Summary numbers for a finished plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanStats {
    /// Name of the traversal pattern the waypoints follow.
    pub pattern: &'static str,
    /// Full-span candidates laid out by the sweep stage.
    pub candidate_lines: usize,
    /// Guidance lines that survived clipping (pieces counted separately).
    pub guidance_lines: usize,
    /// Waypoints in the path (always twice the guidance lines).
    pub waypoints: usize,
    /// Summed guidance line length.
    pub working_distance: f64,
    /// Travel between lines along the planned path.
    pub transit_distance: f64,
    /// Travel between lines if every line were driven the same way.
    pub same_side_transit_distance: f64,
}

/// Result of one planning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoveragePlan {
    pub parameters: Parameters,
    /// Ordered guidance lines in the field's own frame.
    pub lines: Vec<Line>,
    /// Waypoint path over `lines` (boustrophedon unless the planner was
    /// given another pattern).
    pub waypoints: Vec<Waypoint>,
    pub stats: PlanStats,
}

/// Runs the pipeline against a geometry kernel.
#[derive(Debug, Clone)]
pub struct CoveragePlanner<K = PlanarKernel> {
    kernel: K,
    max_sweep_lines: usize,
    pattern: TraversalPattern,
}

impl Default for CoveragePlanner<PlanarKernel> {
    fn default() -> Self {
        Self::with_kernel(PlanarKernel::default())
    }
}

impl CoveragePlanner<PlanarKernel> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: GeometryKernel> CoveragePlanner<K> {
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            max_sweep_lines: DEFAULT_MAX_SWEEP_LINES,
            pattern: TraversalPattern::default(),
        }
    }

    /// Change the sweep-line safety limit.
    pub fn with_max_sweep_lines(mut self, max_sweep_lines: usize) -> Self {
        self.max_sweep_lines = max_sweep_lines;
        self
    }

    /// Change how consecutive lines are driven.
    pub fn with_pattern(mut self, pattern: TraversalPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn pattern(&self) -> TraversalPattern {
        self.pattern
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn max_sweep_lines(&self) -> usize {
        self.max_sweep_lines
    }

    /// Stages 1-4: the ordered guidance line set.
    pub fn guidance_lines(&self, field: &FieldPolygon, params: &Parameters) -> PlanResult<Vec<Line>> {
        self.run_stages(field, params).map(|(_, lines)| lines)
    }

    /// The whole pipeline: guidance lines plus the waypoint path.
    pub fn plan(&self, field: &FieldPolygon, params: &Parameters) -> PlanResult<CoveragePlan> {
        let (candidate_lines, lines) = self.run_stages(field, params)?;
        let waypoints = sequence_with_pattern(&lines, self.pattern);

        let stats = PlanStats {
            pattern: self.pattern.name(),
            candidate_lines,
            guidance_lines: lines.len(),
            waypoints: waypoints.len(),
            working_distance: working_distance(&lines),
            transit_distance: transit_distance(&waypoints),
            same_side_transit_distance: transit_distance(&sequence_with_pattern(
                &lines,
                TraversalPattern::SameSide,
            )),
        };

        debug!(
            pattern = stats.pattern,
            lines = stats.guidance_lines,
            waypoints = stats.waypoints,
            transit = stats.transit_distance,
            "coverage plan complete"
        );

        Ok(CoveragePlan {
            parameters: *params,
            lines,
            waypoints,
            stats,
        })
    }

    fn run_stages(&self, field: &FieldPolygon, params: &Parameters) -> PlanResult<(usize, Vec<Line>)> {
        let frame = generate_sweep_lines(&self.kernel, field, params, self.max_sweep_lines)?;

        let headland = self
            .kernel
            .buffer_outward(&frame.rotated_field, frame.headland_distance)?;

        let clipped = clip_sweep_lines(&self.kernel, &frame.candidates, &headland);
        debug!(
            candidates = frame.candidates.len(),
            clipped = clipped.len(),
            "clipped sweep candidates to headland"
        );

        let lines = restore_and_order(&self.kernel, &clipped, frame.centroid, frame.angle_degrees);
        Ok((frame.candidates.len(), lines))
    }
}

/// Guidance lines for a field using the default planner.
pub fn generate_guidance_lines(field: &FieldPolygon, params: &Parameters) -> PlanResult<Vec<Line>> {
    CoveragePlanner::new().guidance_lines(field, params)
}

/// Full coverage plan for a field using the default planner.
pub fn plan_coverage(field: &FieldPolygon, params: &Parameters) -> PlanResult<CoveragePlan> {
    CoveragePlanner::new().plan(field, params)
}

// ============================================================================
// TESTS
// ============================================================================
