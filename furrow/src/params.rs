//! Planning parameters.
//!
//! One immutable [`Parameters`] value configures one planning run. There is
//! no process-wide configuration: callers build (or deserialize) a value and
//! pass it into the planner.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PlanError, PlanResult};

/// Largest accepted driving angle (exclusive), in degrees.
pub const MAX_DRIVING_ANGLE: f64 = 180.0;

/// Configuration for a single planning run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Operating width of the implement. Sweep rows are this far apart.
    pub tool_width: f64,

    /// Implement widths of margin reserved around the boundary.
    #[serde(deserialize_with = "deserialize_headland_passes")]
    pub headland_passes: u32,

    /// Direction of the primary sweep, counter-clockwise from the +X axis,
    /// in `[0, 180)`.
    #[serde(alias = "driving_angle")]
    pub driving_angle_degrees: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            tool_width: 5.0,
            headland_passes: 2,
            driving_angle_degrees: 90.0,
        }
    }
}

impl Parameters {
    pub fn new(tool_width: f64, headland_passes: u32, driving_angle_degrees: f64) -> Self {
        Self {
            tool_width,
            headland_passes,
            driving_angle_degrees,
        }
    }

    /// Headland offset: `headland_passes * tool_width`, never negative for
    /// validated parameters.
    #[inline]
    pub fn headland_distance(&self) -> f64 {
        self.headland_passes as f64 * self.tool_width
    }

    /// Check every parameter against its domain.
    pub fn validate(&self) -> PlanResult<()> {
        if !self.tool_width.is_finite() || self.tool_width <= 0.0 {
            return Err(PlanError::invalid_parameter(
                "tool_width",
                format!("must be a positive number, got {}", self.tool_width),
            ));
        }

        let angle = self.driving_angle_degrees;
        if !angle.is_finite() || !(0.0..MAX_DRIVING_ANGLE).contains(&angle) {
            return Err(PlanError::invalid_parameter(
                "driving_angle_degrees",
                format!("must be in [0, {}), got {}", MAX_DRIVING_ANGLE, angle),
            ));
        }

        if !self.headland_distance().is_finite() {
            return Err(PlanError::invalid_parameter(
                "headland_passes",
                format!("headland distance overflows for {} passes", self.headland_passes),
            ));
        }

        Ok(())
    }
}

/// Parse a headland pass count supplied as text.
///
/// Callers that accept free-form input (forms, command lines) go through
/// this so that negative counts are reported as [`PlanError::InvalidParameter`]
/// rather than as a generic parse failure.
pub fn parse_headland_passes(text: &str) -> PlanResult<u32> {
    let value: i64 = text.trim().parse().map_err(|_| {
        PlanError::invalid_parameter("headland_passes", format!("not an integer: '{}'", text.trim()))
    })?;
    headland_passes_from(value)
}

fn headland_passes_from(value: i64) -> PlanResult<u32> {
    if value < 0 {
        return Err(PlanError::invalid_parameter(
            "headland_passes",
            format!("must not be negative, got {}", value),
        ));
    }

    u32::try_from(value).map_err(|_| {
        PlanError::invalid_parameter("headland_passes", format!("too large: {}", value))
    })
}

/// Signed counts in config files get the same checks as text input.
fn deserialize_headland_passes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    headland_passes_from(value).map_err(serde::de::Error::custom)
}
