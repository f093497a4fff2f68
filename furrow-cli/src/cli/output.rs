//! Output writers for a finished plan.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use furrow::{CoveragePlan, FieldPolygon, Point};

/// Output format for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Waypoints as `lon,lat` rows.
    Csv,
    /// Parameters, lines, waypoints and stats.
    Json,
    /// Preview drawing of field, lines and waypoints.
    #[default]
    Svg,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name.to_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }

    /// Render `plan` for `field` in this format.
    pub fn render(&self, plan: &CoveragePlan, field: &FieldPolygon) -> Result<String> {
        match self {
            OutputFormat::Csv => Ok(waypoints_to_csv(&plan.waypoints)),
            OutputFormat::Json => plan_to_json(plan),
            OutputFormat::Svg => Ok(plan_to_svg(plan, field)),
        }
    }
}

/// Waypoints as CSV with a `lon,lat` header, in path order.
pub fn waypoints_to_csv(waypoints: &[Point]) -> String {
    let mut csv = String::from("lon,lat\n");
    for wp in waypoints {
        csv.push_str(&format!("{},{}\n", wp.x, wp.y));
    }
    csv
}

/// Pretty-printed JSON of the whole plan.
pub fn plan_to_json(plan: &CoveragePlan) -> Result<String> {
    serde_json::to_string_pretty(plan).context("failed to serialize plan")
}

/// SVG preview: field boundary in green, guidance lines in red, waypoints
/// as blue dots.
///
/// Y points up in field coordinates, so the drawing is flipped inside the
/// viewBox. The viewBox keeps the aspect ratio equal on both axes.
pub fn plan_to_svg(plan: &CoveragePlan, field: &FieldPolygon) -> String {
    let (mut min_x, mut min_y, mut max_x, mut max_y) = field.bounding_box();
    for wp in &plan.waypoints {
        min_x = min_x.min(wp.x);
        min_y = min_y.min(wp.y);
        max_x = max_x.max(wp.x);
        max_y = max_y.max(wp.y);
    }

    let extent = (max_x - min_x).max(max_y - min_y).max(f64::EPSILON);
    let margin = extent * 0.05;
    let stroke = extent / 400.0;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">
<g transform="translate(0 {}) scale(1 -1)">
"#,
        min_x - margin,
        min_y - margin,
        max_x - min_x + 2.0 * margin,
        max_y - min_y + 2.0 * margin,
        min_y + max_y,
    ));

    let boundary: String = field
        .ring()
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");
    svg.push_str(&format!(
        "<polyline id=\"boundary\" points=\"{}\" stroke=\"green\" stroke-width=\"{}\" fill=\"none\"/>\n",
        boundary,
        stroke * 2.0
    ));

    svg.push_str(&format!(
        "<g id=\"guidance\" stroke=\"red\" stroke-width=\"{}\" fill=\"none\">\n",
        stroke
    ));
    for line in &plan.lines {
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>\n",
            line.x1, line.y1, line.x2, line.y2
        ));
    }
    svg.push_str("</g>\n");

    svg.push_str("<g id=\"waypoints\" fill=\"blue\">\n");
    for wp in &plan.waypoints {
        svg.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\"/>\n",
            wp.x,
            wp.y,
            stroke * 2.0
        ));
    }
    svg.push_str("</g>\n");

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Write rendered output to `path`, or stdout when `path` is `None` or `-`.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        _ => print!("{}", content),
    }
    Ok(())
}
