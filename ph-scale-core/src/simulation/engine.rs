use super::state::{SimulationEvent, SimulationState};
use crate::{
    beaker::Beaker,
    error::PhScaleError,
    graph::{self, LogarithmicScale},
    logger::TimeSeriesLogger,
    solute::SoluteCatalog,
    solution::Solution,
};
use ph_scale_schemas::{
    command::Command,
    rule::{ComparisonOperator, Condition, Rule, SolutionParameter},
};

pub struct SimulationEngine {
    pub(super) state: SimulationState,
    pub(super) beaker: Beaker,
    pub(super) catalog: SoluteCatalog,
    pub(super) scale: LogarithmicScale,
    pub(super) time_step_seconds: f64,
    pub(super) total_ticks: u64,
    pub(super) rules: Vec<Rule>,
    pub(super) retired_rules: Vec<String>,
    pub(super) logger: Option<TimeSeriesLogger>,
}

impl SimulationEngine {
    pub fn run(&mut self) -> Result<(), PhScaleError> {
        if let Some(logger) = &mut self.logger {
            logger.log_state(&self.state, &self.beaker.solution)?;
        }

        while self.tick()? {}

        log::info!(
            "simulation complete after {} ticks, pH {:?}",
            self.state.tick,
            self.beaker.solution.displayed_ph()
        );
        Ok(())
    }

    /// Advances one tick. Returns `false` once the scenario has run all its ticks.
    pub fn tick(&mut self) -> Result<bool, PhScaleError> {
        if self.state.tick >= self.total_ticks {
            return Ok(false);
        }

        self.state.events.clear();
        self.state.tick += 1;
        self.state.elapsed_seconds = self.state.tick as f64 * self.time_step_seconds;

        self.beaker.step(self.time_step_seconds);

        let mut command_queue: Vec<(String, Command)> = Vec::new();
        for rule in &self.rules {
            if self.retired_rules.contains(&rule.name) {
                continue;
            }
            if self.evaluate_condition(&rule.condition) {
                command_queue.push((rule.name.clone(), rule.action.clone()));
            }
        }

        for (rule_name, command) in command_queue {
            log::debug!("tick {}: rule '{}' fired", self.state.tick, rule_name);
            self.state.events.push(SimulationEvent::RuleFired {
                rule: rule_name.clone(),
            });
            if self.rules.iter().any(|r| r.name == rule_name && r.once) {
                self.retired_rules.push(rule_name.clone());
            }
            self.execute_command(&rule_name, command)?;
        }

        if let Some(logger) = &mut self.logger {
            logger.log_state(&self.state, &self.beaker.solution)?;
        }

        Ok(true)
    }

    fn execute_command(&mut self, rule_name: &str, command: Command) -> Result<(), PhScaleError> {
        let solution = &mut self.beaker.solution;
        match command {
            Command::AddSolute { liters } => solution.add_solute(liters),
            Command::AddWater { liters } => solution.add_water(liters),
            Command::Drain { liters } => solution.drain_solution(liters),
            Command::SetSolute { solute_id } => {
                let solute = self.catalog.get(&solute_id)?.clone();
                solution.set_solute(solute);
                self.state.events.push(SimulationEvent::SoluteChanged { solute_id });
            }
            Command::SetDropperDispensing { dispensing } => {
                self.beaker.dropper.set_dispensing(dispensing)
            }
            Command::SetWaterFaucetFlow { liters_per_second } => {
                self.beaker.water_faucet.set_flow_rate(liters_per_second)
            }
            Command::SetDrainFaucetFlow { liters_per_second } => {
                self.beaker.drain_faucet.set_flow_rate(liters_per_second)
            }
            Command::ApplyPh { ph } if !ph.is_finite() => {
                log::warn!(
                    "tick {}: rule '{}' applies non-finite pH {}, ignored",
                    self.state.tick,
                    rule_name,
                    ph
                );
                self.state.events.push(SimulationEvent::InvalidPhIgnored {
                    rule: rule_name.to_string(),
                });
            }
            Command::ApplyPh { ph } => {
                if solution.apply_ph(ph) {
                    self.state.events.push(SimulationEvent::PhApplied {
                        ph: solution.solute().ph(),
                    });
                } else {
                    self.ignored(rule_name);
                }
            }
            Command::DragIndicator { species, units, y } => {
                match graph::apply_indicator_drag(solution, &self.scale, y, species, units) {
                    Some(ph) => self
                        .state
                        .events
                        .push(SimulationEvent::IndicatorDragged { species, ph }),
                    None => self.ignored(rule_name),
                }
            }
            Command::Reset => {
                self.beaker.reset();
                self.state.events.push(SimulationEvent::Reset);
            }
        }
        Ok(())
    }

    fn ignored(&mut self, rule_name: &str) {
        log::warn!(
            "tick {}: rule '{}' needs a non-empty beaker, ignored",
            self.state.tick,
            rule_name
        );
        self.state.events.push(SimulationEvent::IgnoredOnEmptyBeaker {
            rule: rule_name.to_string(),
        });
    }

    fn evaluate_condition(&self, condition: &Condition) -> bool {
        let solution = &self.beaker.solution;
        match condition {
            Condition::AtTick { tick } => self.state.tick == *tick,
            Condition::EveryTicks { interval } => *interval > 0 && self.state.tick % interval == 0,
            Condition::SolutionValue {
                parameter,
                operator,
                value,
            } => {
                let current_value = match parameter {
                    SolutionParameter::Ph => match solution.ph() {
                        Some(ph) => ph,
                        None => return false,
                    },
                    SolutionParameter::TotalVolume => solution.total_volume(),
                    SolutionParameter::SoluteVolume => solution.solute_volume(),
                    SolutionParameter::WaterVolume => solution.water_volume(),
                };
                match operator {
                    ComparisonOperator::LessThan => current_value < *value,
                    ComparisonOperator::GreaterThan => current_value > *value,
                    ComparisonOperator::EqualTo => (current_value - value).abs() < f64::EPSILON,
                    ComparisonOperator::NotEqualTo => (current_value - value).abs() >= f64::EPSILON,
                }
            }
            Condition::BeakerEmpty => solution.is_empty(),
            Condition::BeakerFull => solution.is_full(),
        }
    }

    pub fn get_tick(&self) -> u64 {
        self.state.tick
    }

    pub fn get_events(&self) -> &[SimulationEvent] {
        &self.state.events
    }

    pub fn get_solution(&self) -> &Solution {
        &self.beaker.solution
    }

    pub fn get_solution_mut(&mut self) -> &mut Solution {
        &mut self.beaker.solution
    }

    pub fn get_beaker(&self) -> &Beaker {
        &self.beaker
    }

    pub fn get_scale(&self) -> &LogarithmicScale {
        &self.scale
    }
}
