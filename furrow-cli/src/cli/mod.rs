//! CLI command implementations.
//!
//! - `plan` - Plan guidance lines and waypoints for a field
//! - `demo` - Plan the built-in example field
//!
//! Supporting modules read fields (`input`, `job`) and write results
//! (`output`).

pub mod input;
pub mod job;
pub mod output;
pub mod plan;

pub use plan::{cmd_demo, cmd_plan};

use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays clean for CSV/JSON/SVG output.
/// `RUST_LOG` wins over the default level. Commands call this once their
/// own flags are parsed, so `-v` only counts where it is a flag.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second call (tests run commands in one process) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
