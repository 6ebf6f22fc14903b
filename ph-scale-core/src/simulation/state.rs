use ph_scale_schemas::graph::IndicatorSpecies;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimulationEvent {
    RuleFired { rule: String },
    SoluteChanged { solute_id: String },
    PhApplied { ph: f64 },
    IndicatorDragged { species: IndicatorSpecies, ph: f64 },
    IgnoredOnEmptyBeaker { rule: String },
    InvalidPhIgnored { rule: String },
    Reset,
}

#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub tick: u64,
    pub elapsed_seconds: f64,
    pub events: Vec<SimulationEvent>,
}
