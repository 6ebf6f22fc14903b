use crate::simulation::state::SimulationState;
use crate::solution::Solution;
use csv::Writer;
use ph_scale_schemas::color::RgbColor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// One CSV row of the time-series log.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub tick: u64,
    pub elapsed_seconds: f64,
    pub solute_id: String,
    pub solute_volume_l: f64,
    pub water_volume_l: f64,
    pub total_volume_l: f64,
    pub ph: Option<f64>,
    pub color: String,
    pub concentration_h2o: Option<f64>,
    pub concentration_h3o: Option<f64>,
    pub concentration_oh: Option<f64>,
    pub quantity_h2o: f64,
    pub quantity_h3o: f64,
    pub quantity_oh: f64,
    pub particles_h2o: f64,
    pub particles_h3o: f64,
    pub particles_oh: f64,
    pub events_json: String,
}

pub struct TimeSeriesLogger {
    writer: Writer<fs::File>,
}

impl TimeSeriesLogger {
    pub fn new(path: &str) -> Result<Self, io::Error> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    pub fn log_state(&mut self, state: &SimulationState, solution: &Solution) -> Result<(), anyhow::Error> {
        let derived = solution.derived();
        let color = solution.color();
        let entry = LogEntry {
            tick: state.tick,
            elapsed_seconds: state.elapsed_seconds,
            solute_id: solution.solute().id().to_string(),
            solute_volume_l: solution.solute_volume(),
            water_volume_l: solution.water_volume(),
            total_volume_l: solution.total_volume(),
            ph: derived.ph,
            color: RgbColor::new(color.red, color.green, color.blue).to_hex(),
            concentration_h2o: derived.concentration.h2o,
            concentration_h3o: derived.concentration.h3o,
            concentration_oh: derived.concentration.oh,
            quantity_h2o: derived.quantity.h2o,
            quantity_h3o: derived.quantity.h3o,
            quantity_oh: derived.quantity.oh,
            particles_h2o: derived.particle_count.h2o,
            particles_h3o: derived.particle_count.h3o,
            particles_oh: derived.particle_count.oh,
            events_json: serde_json::to_string(&state.events)?,
        };

        self.writer.serialize(entry)?;
        self.writer.flush()?;
        Ok(())
    }
}
