//! YAML job files.
//!
//! A job bundles a field, the planning parameters and where to write the
//! result, so a run can be repeated without retyping flags:
//!
//! ```yaml
//! field:
//!   coordinates:        # lat, lon pairs
//!     - [0, 0]
//!     - [0, 100]
//!     - [50, 100]
//!     - [50, 0]
//! parameters:
//!   tool_width: 5
//!   headland_passes: 2
//!   driving_angle: 90
//! output:
//!   format: svg
//!   path: field.svg
//! ```
//!
//! Exactly one of `coordinates`, `geojson` (inline) or `geojson_file` must be
//! set. Relative `geojson_file` paths resolve against the job file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use furrow::{FieldPolygon, Parameters, Point};

use super::input::{FieldSource, field_from_geojson};
use super::output::OutputFormat;

/// A complete planning job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub field: FieldSpec,

    #[serde(default)]
    pub parameters: Parameters,

    #[serde(default)]
    pub output: OutputSpec,
}

/// Field boundary, given one of three ways.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSpec {
    /// `[lat, lon]` pairs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<[f64; 2]>>,

    /// Inline GeoJSON feature or polygon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geojson: Option<serde_json::Value>,

    /// Path to a GeoJSON file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geojson_file: Option<PathBuf>,
}

/// Output section of a job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSpec {
    #[serde(default)]
    pub format: OutputFormat,

    /// Output file; stdout when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Job {
    /// Load a job from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read job file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("in job file {}", path.display()))
    }

    /// Parse a job from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let job: Job = serde_yaml::from_str(yaml).context("invalid job YAML")?;
        Ok(job)
    }

    /// Resolve the field, reading `geojson_file` relative to `base_dir`.
    pub fn load_field(&self, base_dir: &Path) -> Result<FieldPolygon> {
        let spec = &self.field;
        let given = [
            spec.coordinates.is_some(),
            spec.geojson.is_some(),
            spec.geojson_file.is_some(),
        ];
        match given.iter().filter(|set| **set).count() {
            0 => bail!("job has no field: set coordinates, geojson or geojson_file"),
            1 => {}
            _ => bail!("job field must use only one of coordinates, geojson, geojson_file"),
        }

        if let Some(pairs) = &spec.coordinates {
            let points = pairs.iter().map(|[lat, lon]| Point::new(*lon, *lat)).collect();
            return Ok(FieldPolygon::new(points)?);
        }
        if let Some(value) = &spec.geojson {
            return field_from_geojson(value);
        }
        match &spec.geojson_file {
            Some(file) => FieldSource::GeoJson(base_dir.join(file)).load(),
            None => bail!("job has no field"),
        }
    }
}
