use crate::{
    beaker::Beaker,
    error::PhScaleError,
    flow::{Dropper, Faucet},
    graph::LogarithmicScale,
    logger::TimeSeriesLogger,
    simulation::{engine::SimulationEngine, state::SimulationState},
    solute::SoluteCatalog,
    solution::Solution,
};
use ph_scale_schemas::{measurement::Measurement, scenario::Scenario};

/// A fluent builder for constructing a `SimulationEngine`.
///
/// Only the scenario is required; the catalog defaults to the built-in solutes
/// and the graph to the default logarithmic scale.
#[derive(Default)]
pub struct SimulationBuilder {
    scenario: Option<Scenario>,
    catalog: Option<SoluteCatalog>,
    scale: Option<LogarithmicScale>,
    log_path: Option<String>,
}

fn liters(name: &str, measurement: &Measurement<f64>) -> Result<f64, PhScaleError> {
    measurement.as_liters().ok_or_else(|| {
        PhScaleError::ConfigError(format!("{name} has non-volume unit '{}'", measurement.unit))
    })
}

fn liters_per_second(name: &str, measurement: &Measurement<f64>) -> Result<f64, PhScaleError> {
    measurement.as_liters_per_second().ok_or_else(|| {
        PhScaleError::ConfigError(format!("{name} has non-flow unit '{}'", measurement.unit))
    })
}

impl SimulationBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scenario to run: the initial beaker, its flows and its rules.
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Sets the solute catalog scenario ids are resolved against.
    pub fn with_catalog(mut self, catalog: SoluteCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the logarithmic scale that graph drags are interpreted on.
    pub fn with_scale(mut self, scale: LogarithmicScale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Configures the simulation to write time-series data to the specified CSV file.
    pub fn with_timeseries_logging_to_file(mut self, path: &str) -> Self {
        self.log_path = Some(path.to_string());
        self
    }

    /// Consumes the builder and returns a fully configured `SimulationEngine`.
    ///
    /// # Errors
    ///
    /// Returns a `PhScaleError` if no scenario was given, the scenario names an
    /// unknown solute, uses non-volume units, or its initial volumes do not fit
    /// the beaker.
    pub fn build(self) -> Result<SimulationEngine, PhScaleError> {
        let scenario = self.scenario.ok_or(PhScaleError::ScenarioNotDefined)?;
        let catalog = self.catalog.unwrap_or_default();

        if scenario.time_step_seconds <= 0.0 {
            return Err(PhScaleError::ConfigError(format!(
                "time step must be positive, got {} s",
                scenario.time_step_seconds
            )));
        }

        let solute = catalog.get(&scenario.solute_id)?.clone();
        let solution = Solution::new(
            solute,
            liters("solute_volume", &scenario.solute_volume)?,
            liters("water_volume", &scenario.water_volume)?,
            liters("max_volume", &scenario.max_volume)?,
        )?;

        let flows = &scenario.flows;
        let mut dropper = Dropper::new(liters_per_second("dropper_rate", &flows.dropper_rate)?);
        dropper.set_dispensing(flows.dropper_dispensing);
        let mut water_faucet = Faucet::new(liters_per_second(
            "water_faucet_max_rate",
            &flows.water_faucet_max_rate,
        )?);
        water_faucet.set_flow_rate(flows.water_faucet_rate);
        let mut drain_faucet = Faucet::new(liters_per_second(
            "drain_faucet_max_rate",
            &flows.drain_faucet_max_rate,
        )?);
        drain_faucet.set_flow_rate(flows.drain_faucet_rate);

        let logger = match self.log_path {
            Some(path) => Some(
                TimeSeriesLogger::new(&path).map_err(|e| PhScaleError::FileIO(path.clone(), e))?,
            ),
            None => None,
        };

        log::info!(
            "scenario '{}': {} in a {} L beaker, {} ticks of {} s",
            scenario.scenario_id,
            scenario.solute_id,
            solution.max_volume(),
            scenario.ticks,
            scenario.time_step_seconds
        );

        Ok(SimulationEngine {
            state: SimulationState::default(),
            beaker: Beaker::new(solution, dropper, water_faucet, drain_faucet),
            catalog,
            scale: self.scale.unwrap_or_default(),
            time_step_seconds: scenario.time_step_seconds,
            total_ticks: scenario.ticks,
            rules: scenario.rules,
            retired_rules: Vec::new(),
            logger,
        })
    }
}
