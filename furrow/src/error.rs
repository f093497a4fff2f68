//! Error types for coverage planning.
//!
//! Every stage of the pipeline reports failures through [`PlanError`].
//! Failures are returned to the caller as soon as the stage that first
//! observes them runs; no partial plan is ever produced.

use thiserror::Error;

/// Errors that can occur while planning coverage for a field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// The field boundary is not a usable simple closed ring.
    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    /// A planning parameter is outside its valid domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The sweep would need more candidate lines than the planner allows.
    #[error("Sweep needs {required} candidate lines, limit is {limit}")]
    ResourceLimitExceeded { required: usize, limit: usize },

    /// The geometry kernel could not complete a primitive operation.
    #[error("Geometry kernel failure: {0}")]
    GeometryKernelFailure(#[from] KernelError),
}

/// Failures reported by a [`GeometryKernel`](crate::kernel::GeometryKernel).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// The input geometry has no area or too few points for the operation.
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    /// A distance or angle argument was not usable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation produced no geometry where some was required.
    #[error("empty result from {0}")]
    EmptyResult(&'static str),
}

impl PlanError {
    /// Shorthand for building an [`PlanError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        PlanError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type alias for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Result type alias for kernel primitives.
pub type KernelResult<T> = Result<T, KernelError>;
