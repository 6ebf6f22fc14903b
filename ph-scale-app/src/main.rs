use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

mod config;
mod workflow;

/// Runs a scripted pH scale experiment and reports how the solution evolved.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Scenario YAML file.
    scenario: PathBuf,

    /// Extra solute definitions added to the built-in catalog.
    #[arg(long)]
    solutes: Option<PathBuf>,

    /// Directory for the time series and summary. Defaults to a timestamped run directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log engine decisions (same as RUST_LOG=debug).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = config::RunConfig::load(&args.scenario, args.solutes.as_deref())?;
    let scenario_id = config.scenario.scenario_id.clone();

    let output_dir = args.output_dir.unwrap_or_else(|| {
        PathBuf::from(format!(
            "./data/runs/{}_{}",
            scenario_id,
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        ))
    });
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    // Keep the scenario next to its results for traceability.
    fs::copy(&args.scenario, output_dir.join("scenario.yaml"))
        .context("Failed to copy scenario into the output directory")?;

    let summary = workflow::run_scenario(config, &output_dir)?;
    workflow::print_summary_report(&scenario_id, &summary);

    println!("\nResults are in {:?}", output_dir);
    Ok(())
}
