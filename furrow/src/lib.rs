//! # furrow
//!
//! Field coverage planning: parallel guidance lines across a field and the
//! boustrophedon waypoint path that drives them.
//!
//! ## Rust Lesson #7: Modules
//!
//! Each pipeline stage lives in its own module and the crate root re-exports
//! the handful of types most callers need:
//! - `pub mod foo;` = load from `foo.rs` and export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! ```text
//! kernel -> sweep -> clip -> order -> waypoints
//!                 planner glues them
//! ```

pub mod clip;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod order;
pub mod params;
pub mod planner;
pub mod sweep;
pub mod waypoints;

// Re-export common types at crate root for convenience.
pub use error::{KernelError, PlanError, PlanResult};
pub use geometry::{FieldPolygon, Line, Point, Region, Waypoint};
pub use kernel::{GeometryKernel, PlanarKernel};
pub use params::{Parameters, parse_headland_passes};
pub use planner::{
    CoveragePlan, CoveragePlanner, DEFAULT_MAX_SWEEP_LINES, PlanStats, generate_guidance_lines,
    plan_coverage,
};
pub use waypoints::{TraversalPattern, sequence_waypoints};
