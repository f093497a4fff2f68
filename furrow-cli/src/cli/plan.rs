//! `plan` and `demo` command implementations.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use tracing::info;

use furrow::{
    CoveragePlan, CoveragePlanner, DEFAULT_MAX_SWEEP_LINES, FieldPolygon, Parameters, PlanarKernel,
    Point, TraversalPattern, parse_headland_passes,
};

use super::init_logging;
use super::input::FieldSource;
use super::job::Job;
use super::output::{OutputFormat, write_output};

/// Options for the `plan` command. Anything left `None` falls back to the
/// job file, then to the defaults.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlanOptions {
    pub field: Option<FieldSource>,
    pub job: Option<PathBuf>,
    pub tool_width: Option<f64>,
    pub headland_passes: Option<u32>,
    pub angle: Option<f64>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub max_lines: Option<usize>,
    pub pattern: Option<TraversalPattern>,
    pub tolerance: Option<f64>,
    pub verbose: bool,
    pub help: bool,
}

impl PlanOptions {
    /// Parse command arguments (everything after the subcommand name).
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut options = PlanOptions::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--coords" => {
                    options.field = Some(FieldSource::Coordinates(PathBuf::from(value(args, &mut i)?)));
                }
                "--geojson" => {
                    options.field = Some(FieldSource::GeoJson(PathBuf::from(value(args, &mut i)?)));
                }
                "--job" => {
                    options.job = Some(PathBuf::from(value(args, &mut i)?));
                }
                "-w" | "--tool-width" => {
                    let text = value(args, &mut i)?;
                    options.tool_width =
                        Some(text.parse().with_context(|| format!("bad tool width '{}'", text))?);
                }
                "-n" | "--headland" => {
                    options.headland_passes = Some(parse_headland_passes(value(args, &mut i)?)?);
                }
                "-a" | "--angle" => {
                    let text = value(args, &mut i)?;
                    options.angle = Some(text.parse().with_context(|| format!("bad angle '{}'", text))?);
                }
                "-f" | "--format" => {
                    let text = value(args, &mut i)?;
                    options.format = Some(OutputFormat::from_name(text).ok_or_else(|| {
                        anyhow!("unknown format: {}. Use 'csv', 'json' or 'svg'.", text)
                    })?);
                }
                "-o" | "--output" => {
                    options.output = Some(PathBuf::from(value(args, &mut i)?));
                }
                "--max-lines" => {
                    let text = value(args, &mut i)?;
                    options.max_lines =
                        Some(text.parse().with_context(|| format!("bad line limit '{}'", text))?);
                }
                "-p" | "--pattern" => {
                    options.pattern = Some(parse_pattern(value(args, &mut i)?)?);
                }
                "--tolerance" => {
                    options.tolerance = Some(parse_tolerance(value(args, &mut i)?)?);
                }
                "-v" | "--verbose" => {
                    options.verbose = true;
                }
                "-h" | "--help" => {
                    options.help = true;
                }
                path if !path.starts_with('-') => {
                    if options.field.is_some() {
                        bail!("more than one field given: {}", path);
                    }
                    options.field = Some(FieldSource::from_path(path));
                }
                unknown => bail!("unknown option: {}", unknown),
            }
            i += 1;
        }

        Ok(options)
    }
}

fn parse_pattern(text: &str) -> Result<TraversalPattern> {
    TraversalPattern::from_name(text).ok_or_else(|| {
        let known: Vec<&str> = TraversalPattern::all().iter().map(TraversalPattern::name).collect();
        anyhow!("unknown pattern: {}. Use one of: {}", text, known.join(", "))
    })
}

fn parse_tolerance(text: &str) -> Result<f64> {
    let tolerance: f64 = text.parse().with_context(|| format!("bad tolerance '{}'", text))?;
    if !tolerance.is_finite() || tolerance <= 0.0 {
        bail!("tolerance must be a positive number, got {}", text);
    }
    Ok(tolerance)
}

/// Take the value following the flag at `args[*i]`.
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} needs a value", flag))
}

/// Execute the plan command.
pub fn cmd_plan(args: &[String]) -> Result<()> {
    let options = PlanOptions::parse(args)?;
    if options.help {
        print_usage();
        return Ok(());
    }
    init_logging(options.verbose);

    let job = options.job.as_deref().map(Job::from_file).transpose()?;

    let field = match (&options.field, &job, &options.job) {
        (Some(source), _, _) => {
            info!("loading field from {}", source.path().display());
            source.load()?
        }
        (None, Some(job), Some(job_path)) => {
            let base = job_path.parent().unwrap_or(Path::new("."));
            job.load_field(base)?
        }
        _ => {
            print_usage();
            bail!("field required: give a coordinates file, --geojson or --job");
        }
    };

    let mut params = job.as_ref().map(|j| j.parameters).unwrap_or_default();
    if let Some(width) = options.tool_width {
        params.tool_width = width;
    }
    if let Some(passes) = options.headland_passes {
        params.headland_passes = passes;
    }
    if let Some(angle) = options.angle {
        params.driving_angle_degrees = angle;
    }

    let format = options
        .format
        .or(job.as_ref().map(|j| j.output.format))
        .unwrap_or_default();
    let output = options
        .output
        .or_else(|| job.as_ref().and_then(|j| j.output.path.clone()));
    let kernel = options
        .tolerance
        .map(PlanarKernel::with_tolerance)
        .unwrap_or_default();
    let planner = CoveragePlanner::with_kernel(kernel)
        .with_max_sweep_lines(options.max_lines.unwrap_or(DEFAULT_MAX_SWEEP_LINES))
        .with_pattern(options.pattern.unwrap_or_default());

    let plan = run_planner(&planner, &field, &params)?;
    let rendered = format.render(&plan, &field)?;
    write_output(&rendered, output.as_deref())
}

/// Execute the demo command: the 100 x 50 example field with vertical passes.
pub fn cmd_demo(args: &[String]) -> Result<()> {
    let mut format = OutputFormat::Svg;
    let mut output: Option<PathBuf> = None;
    let mut verbose = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--format" => {
                let text = value(args, &mut i)?;
                format = OutputFormat::from_name(text)
                    .ok_or_else(|| anyhow!("unknown format: {}. Use 'csv', 'json' or 'svg'.", text))?;
            }
            "-o" | "--output" => {
                output = Some(PathBuf::from(value(args, &mut i)?));
            }
            "-v" | "--verbose" => {
                verbose = true;
            }
            unknown => bail!("unknown option: {}", unknown),
        }
        i += 1;
    }
    init_logging(verbose);

    let field = demo_field()?;
    let plan = run_planner(&CoveragePlanner::new(), &field, &Parameters::default())?;
    let rendered = format.render(&plan, &field)?;
    write_output(&rendered, output.as_deref())
}

/// The 100 x 50 rectangle used by `furrow demo`.
pub fn demo_field() -> Result<FieldPolygon> {
    Ok(FieldPolygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 50.0),
        Point::new(0.0, 50.0),
    ])?)
}

fn run_planner(
    planner: &CoveragePlanner,
    field: &FieldPolygon,
    params: &Parameters,
) -> Result<CoveragePlan> {
    info!(
        "planning {} vertex field: tool width {}, {} headland passes, angle {}, {} pattern",
        field.vertices().len(),
        params.tool_width,
        params.headland_passes,
        params.driving_angle_degrees,
        planner.pattern().name()
    );

    let start = Instant::now();
    let plan = planner.plan(field, params)?;
    let elapsed = start.elapsed();

    let stats = &plan.stats;
    info!(
        "generated {} guidance lines, {} waypoints in {:?}",
        stats.guidance_lines, stats.waypoints, elapsed
    );
    if planner.pattern() == TraversalPattern::Boustrophedon {
        let saved = stats.same_side_transit_distance - stats.transit_distance;
        info!(
            "working distance {:.1}, transit {:.1} ({:.1} saved by alternating)",
            stats.working_distance, stats.transit_distance, saved
        );
    } else {
        info!(
            "working distance {:.1}, transit {:.1}",
            stats.working_distance, stats.transit_distance
        );
    }

    Ok(plan)
}

fn print_usage() {
    eprintln!("Usage: furrow plan [FIELD] [options]");
    eprintln!();
    eprintln!("FIELD is a coordinates file (one 'lat, lon' per line) or a .geojson/.json file.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --coords <file>         Field as 'lat, lon' lines");
    eprintln!("  --geojson <file>        Field as a GeoJSON polygon feature");
    eprintln!("  --job <file.yaml>       Job file (field, parameters, output)");
    eprintln!("  -w, --tool-width <n>    Implement width (default: 5)");
    eprintln!("  -n, --headland <n>      Headland passes (default: 2)");
    eprintln!("  -a, --angle <deg>       Driving angle in [0, 180) (default: 90)");
    eprintln!("  -f, --format <fmt>      Output format: csv, json, svg (default: svg)");
    eprintln!("  -o, --output <file>     Output file (default: stdout)");
    eprintln!("  -p, --pattern <name>    Line traversal: boustrophedon, same-side (default: boustrophedon)");
    eprintln!("  --tolerance <n>         Geometry tolerance in field units (default: 1e-9)");
    eprintln!("  --max-lines <n>         Sweep line limit (default: {})", DEFAULT_MAX_SWEEP_LINES);
    eprintln!("  -v, --verbose           Debug logging");
    eprintln!();
    eprintln!("Command line flags override job file values.");
}
