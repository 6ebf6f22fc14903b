use crate::{measurement::Measurement, rule::Rule};
use serde::Deserialize;

/// Flow rates of the beaker's faucets and dropper.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlowSettings {
    pub dropper_rate: Measurement<f64>,
    #[serde(default)]
    pub dropper_dispensing: bool,
    pub water_faucet_max_rate: Measurement<f64>,
    #[serde(default)]
    pub water_faucet_rate: f64,
    pub drain_faucet_max_rate: Measurement<f64>,
    #[serde(default)]
    pub drain_faucet_rate: f64,
}

/// A scripted experiment: an initial beaker plus the rules that act on it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    pub scenario_id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub solute_id: String,
    pub solute_volume: Measurement<f64>,
    pub water_volume: Measurement<f64>,
    pub max_volume: Measurement<f64>,
    pub time_step_seconds: f64,
    pub ticks: u64,
    pub flows: FlowSettings,
    #[serde(default)]
    pub rules: Vec<Rule>,
}
