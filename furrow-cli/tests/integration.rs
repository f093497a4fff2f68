//! Integration tests for furrow CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn furrow(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_furrow"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn write_rectangle_coords(dir: &Path) -> String {
    // lat, lon: a 100 (lon) x 50 (lat) rectangle
    let path = dir.join("field.txt");
    fs::write(&path, "0, 0\n0, 100\n50, 100\n50, 0\n").unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn help_lists_commands() {
    let output = furrow(&["help"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("plan"), "Should list 'plan'");
    assert!(stderr.contains("demo"), "Should list 'demo'");
}

#[test]
fn unknown_command_fails() {
    let output = furrow(&["frobnicate"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn plan_coordinates_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let field = write_rectangle_coords(dir.path());

    let output = furrow(&["plan", &field, "-w", "5", "-n", "0", "-a", "0", "-f", "csv"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows[0], "lon,lat");
    // 11 rows along x, two waypoints each
    assert_eq!(rows.len(), 1 + 22);
    assert_eq!(rows[1], "0,0");
    assert_eq!(rows[2], "100,0");
    assert_eq!(rows[3], "100,5");
    assert_eq!(rows[4], "0,5");
}

#[test]
fn plan_logs_to_stderr_not_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let field = write_rectangle_coords(dir.path());

    let output = furrow(&["plan", &field, "-f", "csv"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("guidance lines"), "stderr: {}", stderr);
    assert!(!stdout.contains("guidance lines"));
}

#[test]
fn plan_geojson_to_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let field = dir.path().join("field.geojson");
    fs::write(
        &field,
        r#"{"type": "Feature", "properties": {}, "geometry": {"type": "Polygon",
            "coordinates": [[[0, 0], [100, 0], [100, 50], [0, 50], [0, 0]]]}}"#,
    )
    .unwrap();
    let out = dir.path().join("plan.json");

    let output = furrow(&[
        "plan",
        field.to_str().unwrap(),
        "-w", "5", "-n", "0", "-a", "90",
        "-f", "json",
        "-o", out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let lines = json["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 21);
    assert_eq!(json["waypoints"].as_array().unwrap().len(), 42);
    assert_eq!(json["parameters"]["driving_angle_degrees"], 90.0);
}

#[test]
fn plan_job_file_with_flag_override() {
    let dir = tempfile::tempdir().unwrap();
    let job = dir.path().join("job.yaml");
    fs::write(
        &job,
        r#"
field:
  coordinates: [[0, 0], [0, 100], [50, 100], [50, 0]]
parameters:
  tool_width: 5
  headland_passes: 0
  driving_angle: 90
output:
  format: json
"#,
    )
    .unwrap();

    // Flag overrides the job's angle
    let output = furrow(&["plan", "--job", job.to_str().unwrap(), "-a", "0"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["lines"].as_array().unwrap().len(), 11);
    assert_eq!(json["parameters"]["driving_angle_degrees"], 0.0);
}

#[test]
fn plan_rejects_self_intersecting_field() {
    let dir = tempfile::tempdir().unwrap();
    let field = dir.path().join("bowtie.txt");
    fs::write(&field, "0,0\n10,10\n0,10\n10,0\n").unwrap();

    let output = furrow(&["plan", field.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid polygon"), "stderr: {}", stderr);
}

#[test]
fn plan_rejects_bad_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let field = write_rectangle_coords(dir.path());

    let output = furrow(&["plan", &field, "-w", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("tool_width"));

    let output = furrow(&["plan", &field, "-n", "-2"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("headland_passes"));
}

#[test]
fn plan_enforces_line_limit() {
    let dir = tempfile::tempdir().unwrap();
    let field = write_rectangle_coords(dir.path());

    let output = furrow(&["plan", &field, "-w", "0.001", "--max-lines", "1000"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("limit is 1000"));
}

#[test]
fn demo_produces_svg() {
    let output = furrow(&["demo"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert!(stdout.contains("<line"), "Should have guidance lines");
    assert!(stdout.contains("<circle"), "Should have waypoints");
    assert!(stdout.contains("</svg>"), "Should close SVG element");
}

#[test]
fn demo_csv_waypoints_pair_up() {
    let output = furrow(&["demo", "-f", "csv"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let data_rows = stdout.lines().count() - 1;
    assert!(data_rows > 0);
    assert_eq!(data_rows % 2, 0);
}

#[test]
fn plan_same_side_pattern_drives_every_row_one_way() {
    let dir = tempfile::tempdir().unwrap();
    let field = write_rectangle_coords(dir.path());

    let output = furrow(&[
        "plan", &field, "-w", "5", "-n", "0", "-a", "0", "--pattern", "same-side", "-f", "json",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stats"]["pattern"], "same-side");
    let waypoints = json["waypoints"].as_array().unwrap();
    assert_eq!(waypoints.len(), 22);
    for pair in waypoints.chunks_exact(2) {
        assert_eq!(pair[0]["x"], 0.0);
        assert_eq!(pair[1]["x"], 100.0);
    }
}

#[test]
fn plan_output_named_like_a_flag_does_not_turn_on_debug() {
    let dir = tempfile::tempdir().unwrap();
    let field = write_rectangle_coords(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_furrow"))
        .current_dir(dir.path())
        .args(["plan", &field, "-f", "csv", "-o", "-v"])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    assert!(dir.path().join("-v").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("DEBUG"), "stderr: {}", stderr);
}
