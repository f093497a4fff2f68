//! Field boundary ingestion.
//!
//! Two text formats are accepted:
//! - manual coordinates, one `lat, lon` pair per line
//! - GeoJSON: a `Feature`, a bare `Polygon`, or a `FeatureCollection` whose
//!   first feature is a polygon
//!
//! Coordinates are stored as `x = lon`, `y = lat`. Only the exterior ring of
//! a GeoJSON polygon is used.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;

use furrow::{FieldPolygon, Point};

/// Where a field boundary comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSource {
    Coordinates(PathBuf),
    GeoJson(PathBuf),
}

impl FieldSource {
    /// Pick a source by file extension: `.geojson` / `.json` are GeoJSON,
    /// anything else is a coordinate list.
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.ends_with(".geojson") || lower.ends_with(".json") {
            FieldSource::GeoJson(PathBuf::from(path))
        } else {
            FieldSource::Coordinates(PathBuf::from(path))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FieldSource::Coordinates(path) | FieldSource::GeoJson(path) => path,
        }
    }

    /// Read and parse the field.
    pub fn load(&self) -> Result<FieldPolygon> {
        let text = fs::read_to_string(self.path())
            .with_context(|| format!("failed to read {}", self.path().display()))?;
        let field = match self {
            FieldSource::Coordinates(_) => parse_coordinates(&text),
            FieldSource::GeoJson(_) => parse_geojson(&text),
        };
        field.with_context(|| format!("in {}", self.path().display()))
    }
}

/// Parse `lat, lon` lines into a field polygon. Blank lines are skipped and
/// the ring is closed automatically.
pub fn parse_coordinates(text: &str) -> Result<FieldPolygon> {
    let mut points = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        let [lat, lon] = parts.as_slice() else {
            bail!("line {}: expected 'lat, lon', got '{}'", index + 1, line);
        };
        let lat: f64 = lat
            .parse()
            .with_context(|| format!("line {}: bad latitude '{}'", index + 1, lat))?;
        let lon: f64 = lon
            .parse()
            .with_context(|| format!("line {}: bad longitude '{}'", index + 1, lon))?;

        points.push(Point::new(lon, lat));
    }

    Ok(FieldPolygon::new(points)?)
}

/// Parse a GeoJSON polygon feature (or bare geometry) into a field polygon.
pub fn parse_geojson(text: &str) -> Result<FieldPolygon> {
    let value: Value = serde_json::from_str(text).context("invalid JSON")?;
    field_from_geojson(&value)
}

/// Extract the exterior ring of a GeoJSON polygon value.
pub fn field_from_geojson(value: &Value) -> Result<FieldPolygon> {
    let geometry = polygon_geometry(value)?;

    let ring = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .and_then(|rings| rings.first())
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("polygon has no exterior ring"))?;

    let points = ring
        .iter()
        .enumerate()
        .map(|(i, position)| {
            let pair = position
                .as_array()
                .filter(|p| p.len() >= 2)
                .ok_or_else(|| anyhow!("position {} is not [lon, lat]", i))?;
            match (pair[0].as_f64(), pair[1].as_f64()) {
                (Some(lon), Some(lat)) => Ok(Point::new(lon, lat)),
                _ => Err(anyhow!("position {} has non-numeric coordinates", i)),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FieldPolygon::new(points)?)
}

fn polygon_geometry(value: &Value) -> Result<&Value> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("GeoJSON object has no 'type'"))?;

    match kind {
        "Polygon" => Ok(value),
        "Feature" => {
            let geometry = value
                .get("geometry")
                .filter(|g| !g.is_null())
                .ok_or_else(|| anyhow!("feature has no geometry"))?;
            polygon_geometry(geometry)
        }
        "FeatureCollection" => {
            let first = value
                .get("features")
                .and_then(Value::as_array)
                .and_then(|features| features.first())
                .ok_or_else(|| anyhow!("feature collection is empty"))?;
            polygon_geometry(first)
        }
        other => bail!("expected a Polygon, got {}", other),
    }
}
