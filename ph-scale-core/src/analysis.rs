//! Summaries computed from a finished run's time-series log.

use crate::{error::PhScaleError, logger::LogEntry, simulation::state::SimulationEvent};
use serde::Serialize;
use std::fs;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Rows in the log, including the initial state.
    pub rows: u64,
    pub final_tick: u64,
    pub min_ph: Option<f64>,
    pub max_ph: Option<f64>,
    pub final_ph: Option<f64>,
    pub final_solute_id: String,
    pub peak_total_volume_l: f64,
    pub final_total_volume_l: f64,
    /// Rows at which the beaker held nothing.
    pub empty_rows: u64,
    pub rules_fired: u64,
}

pub fn summarize_run(log_path: &str) -> Result<RunSummary, PhScaleError> {
    let mut reader = csv::Reader::from_path(log_path)
        .map_err(|e| PhScaleError::CsvError(log_path.to_string(), e))?;
    let mut summary = RunSummary::default();

    for result in reader.deserialize() {
        let record: LogEntry = result.map_err(|e| PhScaleError::CsvError(log_path.to_string(), e))?;
        summary.rows += 1;
        summary.final_tick = record.tick;
        summary.final_ph = record.ph;
        summary.final_solute_id = record.solute_id;
        summary.final_total_volume_l = record.total_volume_l;
        summary.peak_total_volume_l = summary.peak_total_volume_l.max(record.total_volume_l);

        match record.ph {
            Some(ph) => {
                summary.min_ph = Some(summary.min_ph.map_or(ph, |min| min.min(ph)));
                summary.max_ph = Some(summary.max_ph.map_or(ph, |max| max.max(ph)));
            }
            None => summary.empty_rows += 1,
        }

        let events: Vec<SimulationEvent> = serde_json::from_str(&record.events_json)?;
        summary.rules_fired += events
            .iter()
            .filter(|e| matches!(e, SimulationEvent::RuleFired { .. }))
            .count() as u64;
    }

    Ok(summary)
}

pub fn write_summary(path: &str, summary: &RunSummary) -> Result<(), PhScaleError> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json).map_err(|e| PhScaleError::FileIO(path.to_string(), e))
}
