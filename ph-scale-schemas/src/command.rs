use crate::graph::{GraphUnits, IndicatorSpecies};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    AddSolute {
        liters: f64,
    },
    AddWater {
        liters: f64,
    },
    Drain {
        liters: f64,
    },
    SetSolute {
        solute_id: String,
    },
    SetDropperDispensing {
        dispensing: bool,
    },
    SetWaterFaucetFlow {
        liters_per_second: f64,
    },
    SetDrainFaucetFlow {
        liters_per_second: f64,
    },
    ApplyPh {
        ph: f64,
    },
    DragIndicator {
        species: IndicatorSpecies,
        units: GraphUnits,
        /// Vertical offset in pixels from the top of the graph's scale.
        y: f64,
    },
    Reset,
}
