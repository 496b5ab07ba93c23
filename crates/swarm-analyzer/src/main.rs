//! Swarm Topology Analysis CLI
//!
//! Runs the full (density x range) batch over swarm snapshots.
//!
//! Usage:
//!   swarm-analyze --input-dir data --output-dir outputs \
//!                 --ranges 20000,40000,60000

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use swarm_analyzer::{pipeline, AnalyzerConfig, DEFAULT_BINS, DEFAULT_RANGES_M};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "swarm-analyze",
    about = "Connectivity analysis of simulated satellite swarms"
)]
struct Args {
    /// Directory holding topology_{low,avg,high}.csv snapshots
    #[arg(short, long, default_value = "data")]
    input_dir: PathBuf,

    /// Directory for per-case plots and reports
    #[arg(short, long, default_value = "outputs")]
    output_dir: PathBuf,

    /// Communication ranges to evaluate, in meters
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_RANGES_M)]
    ranges: Vec<f64>,

    /// Draw swarm plots flattened onto the x/y plane instead of 3D
    #[arg(long)]
    flat: bool,

    /// Histogram bin count
    #[arg(long, default_value_t = DEFAULT_BINS)]
    bins: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{}", "=".repeat(60));
    info!("Swarm Topology Analyzer");
    info!("{}", "=".repeat(60));

    let config = AnalyzerConfig {
        input_dir: args.input_dir,
        output_dir: args.output_dir,
        ranges_m: args.ranges,
        flat: args.flat,
        bins: args.bins,
    };

    let summary = pipeline::run(&config)?;

    info!("\n{}", "=".repeat(60));
    info!("SUMMARY");
    info!("{}", "=".repeat(60));
    info!(
        "Cases completed: {}/{}",
        summary.completed.len(),
        summary.case_count()
    );
    for (density, range_m, reason) in &summary.failed {
        info!("  FAILED ({}, {} m): {}", density, range_m, reason);
    }

    if !summary.all_ok() {
        anyhow::bail!("{} case(s) failed", summary.failed.len());
    }

    Ok(())
}
