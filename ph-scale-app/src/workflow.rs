use crate::config::RunConfig;
use anyhow::{Context, Result};
use ph_scale_core::{
    analysis::{self, RunSummary},
    simulation::builder::SimulationBuilder,
};
use std::path::Path;

/// Runs the configured scenario, writing the time series and its summary into `output_dir`.
pub fn run_scenario(config: RunConfig, output_dir: &Path) -> Result<RunSummary> {
    let scenario_id = config.scenario.scenario_id.clone();
    let log_path = output_dir.join(format!("{}.csv", scenario_id));
    let log_path = log_path
        .to_str()
        .context("Output path is not valid UTF-8")?
        .to_string();

    log::info!("[Workflow] Running scenario '{}'", scenario_id);
    let mut engine = SimulationBuilder::new()
        .with_scenario(config.scenario)
        .with_catalog(config.catalog)
        .with_timeseries_logging_to_file(&log_path)
        .build()?;

    engine.run()?;

    let summary = analysis::summarize_run(&log_path)?;
    let summary_path = output_dir.join("summary.json");
    analysis::write_summary(
        summary_path.to_str().context("Output path is not valid UTF-8")?,
        &summary,
    )?;

    Ok(summary)
}

fn format_ph(ph: Option<f64>) -> String {
    ph.map_or_else(|| "--".to_string(), |ph| format!("{:.2}", ph))
}

pub fn print_summary_report(scenario_id: &str, summary: &RunSummary) {
    println!("\n--- [Summary Report: {}] ---", scenario_id);
    println!("========================================");
    println!("  - Ticks simulated:     {}", summary.final_tick);
    println!("  - Final solute:        {}", summary.final_solute_id);
    println!("  - Final pH:            {}", format_ph(summary.final_ph));
    println!(
        "  - pH range:            {} .. {}",
        format_ph(summary.min_ph),
        format_ph(summary.max_ph)
    );
    println!("  - Final volume:        {:.2} L", summary.final_total_volume_l);
    println!("  - Peak volume:         {:.2} L", summary.peak_total_volume_l);
    println!("  - Ticks empty:         {}", summary.empty_rows);
    println!("  - Rules fired:         {}", summary.rules_fired);
    println!("========================================");
}
