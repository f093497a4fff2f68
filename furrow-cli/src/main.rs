//! furrow - field coverage planning from the command line
//!
//! Usage:
//!   furrow plan <field> [options]    Plan guidance lines and waypoints
//!   furrow demo [-f fmt] [-o file]   Plan the built-in 100 x 50 example field
//!   furrow help                      Show usage
//!
//! Data goes to stdout (or `-o`); logs go to stderr.

mod cli;

use std::env;

use anyhow::Result;

use cli::{cmd_demo, cmd_plan};

fn main() {
    let args: Vec<String> = env::args().collect();

    if let Err(err) = run(&args) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let prog = args.first().map(String::as_str).unwrap_or("furrow");

    match args.get(1).map(String::as_str) {
        Some("plan") => cmd_plan(&args[2..]),
        Some("demo") => cmd_demo(&args[2..]),
        Some("help" | "--help" | "-h") => {
            print_usage(prog);
            Ok(())
        }
        Some(other) => {
            print_usage(prog);
            anyhow::bail!("unknown command: {}", other)
        }
        None => {
            print_usage(prog);
            anyhow::bail!("no command given")
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("furrow - guidance lines and boustrophedon waypoints for field coverage");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} plan <field> [options]   Plan a field (see '{} plan --help')", prog, prog);
    eprintln!("  {} demo [-f fmt] [-o file]  Plan the 100 x 50 example field", prog);
    eprintln!("  {} help                     Show this message", prog);
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} plan field.txt -w 6 -n 1 -a 30 -f csv -o waypoints.csv", prog);
    eprintln!("  {} plan field.geojson -f json", prog);
    eprintln!("  {} plan --job survey.yaml -v", prog);
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=furrow=trace) for finer logging.");
}
