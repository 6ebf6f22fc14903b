//! Scenario runs through the simulation engine, including the CSV log and
//! the summary computed from it.

use approx::assert_relative_eq;
use ph_scale_core::{
    analysis,
    simulation::{builder::SimulationBuilder, state::SimulationEvent},
    PhScaleError,
};
use ph_scale_schemas::file_formats::ScenarioFile;
use tempfile::TempDir;

fn scenario(yaml: &str) -> ph_scale_schemas::scenario::Scenario {
    serde_yaml::from_str::<ScenarioFile>(yaml).unwrap().scenario
}

const FILL_AND_DRAIN: &str = r#"
schema_version: "1.0"
scenario:
  scenario_id: fill-and-drain
  solute_id: battery_acid
  solute_volume: { value: 0.5, unit: L }
  water_volume: { value: 0, unit: L }
  max_volume: { value: 1.2, unit: L }
  time_step_seconds: 0.1
  ticks: 80
  flows:
    dropper_rate: { value: 5, unit: mL/s }
    water_faucet_max_rate: { value: 0.25, unit: L/s }
    water_faucet_rate: 0.25
    drain_faucet_max_rate: { value: 0.25, unit: L/s }
  rules:
    - name: drain-when-full
      condition: { type: beaker_full }
      action: { type: set_drain_faucet_flow, liters_per_second: 0.25 }
      once: true
    - name: stop-water-when-full
      condition: { type: beaker_full }
      action: { type: set_water_faucet_flow, liters_per_second: 0 }
      once: true
"#;

#[test]
fn filling_dilutes_and_draining_preserves_ph() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let log_path = tmp.path().join("fill_and_drain.csv");
    let mut engine = SimulationBuilder::new()
        .with_scenario(scenario(FILL_AND_DRAIN))
        .with_timeseries_logging_to_file(log_path.to_str().unwrap())
        .build()
        .unwrap();

    let mut full_ph = None;
    while engine.tick().unwrap() {
        if engine
            .get_events()
            .iter()
            .any(|e| matches!(e, SimulationEvent::RuleFired { rule } if rule == "drain-when-full"))
        {
            full_ph = engine.get_solution().ph();
        }
    }

    assert_eq!(engine.get_tick(), 80);
    let full_ph = full_ph.expect("beaker should have filled");
    assert!(full_ph > 1.0 && full_ph < 2.0);

    let solution = engine.get_solution();
    assert!(solution.total_volume() < 1.2);
    if let Some(ph) = solution.ph() {
        assert_relative_eq!(ph, full_ph, max_relative = 1e-9);
    }

    let summary = analysis::summarize_run(log_path.to_str().unwrap()).unwrap();
    assert_eq!(summary.rows, 81);
    assert_eq!(summary.final_tick, 80);
    assert_eq!(summary.min_ph, Some(1.0));
    assert_relative_eq!(summary.peak_total_volume_l, 1.2, max_relative = 1e-9);
    assert_eq!(summary.rules_fired, 2);
}

const DRAG_AND_RESET: &str = r#"
schema_version: "1.0"
scenario:
  scenario_id: drag-and-reset
  solute_id: coffee
  solute_volume: { value: 0.3, unit: L }
  water_volume: { value: 0.2, unit: L }
  max_volume: { value: 1.2, unit: L }
  time_step_seconds: 0.5
  ticks: 6
  flows:
    dropper_rate: { value: 0.005, unit: L/s }
    water_faucet_max_rate: { value: 0.25, unit: L/s }
    drain_faucet_max_rate: { value: 0.25, unit: L/s }
  rules:
    - name: drag-h3o
      condition: { type: at_tick, tick: 2 }
      action: { type: drag_indicator, species: h3o, units: concentration, y: 250 }
    - name: swap
      condition: { type: at_tick, tick: 4 }
      action: { type: set_solute, solute_id: drain_cleaner }
    - name: reset
      condition: { type: at_tick, tick: 6 }
      action: { type: reset }
"#;

#[test]
fn drag_swap_and_reset_sequence() {
    let mut engine = SimulationBuilder::new()
        .with_scenario(scenario(DRAG_AND_RESET))
        .build()
        .unwrap();

    engine.tick().unwrap();
    engine.tick().unwrap();
    let dragged = engine
        .get_events()
        .iter()
        .find_map(|e| match e {
            SimulationEvent::IndicatorDragged { ph, .. } => Some(*ph),
            _ => None,
        })
        .expect("drag should apply");
    assert!(engine.get_solution().solute().is_custom());
    assert_eq!(engine.get_solution().ph(), Some(dragged));
    assert_relative_eq!(engine.get_solution().total_volume(), 0.5, max_relative = 1e-12);

    engine.tick().unwrap();
    engine.tick().unwrap();
    assert_eq!(engine.get_solution().solute().id(), "drain_cleaner");
    assert_eq!(engine.get_solution().solute_volume(), 0.3);
    assert_eq!(engine.get_solution().water_volume(), 0.2);

    engine.run().unwrap();
    assert_eq!(engine.get_solution().solute().id(), "coffee");
    assert!(!engine.tick().unwrap());
}

#[test]
fn apply_ph_on_empty_beaker_is_ignored() {
    let yaml = DRAG_AND_RESET
        .replace("value: 0.3, unit: L", "value: 0, unit: L")
        .replace("value: 0.2, unit: L", "value: 0, unit: L");
    let mut engine = SimulationBuilder::new().with_scenario(scenario(&yaml)).build().unwrap();
    engine.tick().unwrap();
    engine.tick().unwrap();
    assert!(engine
        .get_events()
        .iter()
        .any(|e| matches!(e, SimulationEvent::IgnoredOnEmptyBeaker { .. })));
    assert_eq!(engine.get_solution().solute().id(), "coffee");
}

#[test]
fn build_rejects_bad_configuration() {
    assert!(matches!(
        SimulationBuilder::new().build(),
        Err(PhScaleError::ScenarioNotDefined)
    ));

    let unknown = DRAG_AND_RESET.replace("solute_id: coffee", "solute_id: lava");
    assert!(matches!(
        SimulationBuilder::new().with_scenario(scenario(&unknown)).build(),
        Err(PhScaleError::SoluteNotFound(_))
    ));

    let overfull = DRAG_AND_RESET.replace("value: 0.3, unit: L", "value: 1.1, unit: L");
    assert!(matches!(
        SimulationBuilder::new().with_scenario(scenario(&overfull)).build(),
        Err(PhScaleError::ConfigError(_))
    ));

    let grams = DRAG_AND_RESET.replace("value: 0.3, unit: L", "value: 0.3, unit: g");
    assert!(matches!(
        SimulationBuilder::new().with_scenario(scenario(&grams)).build(),
        Err(PhScaleError::ConfigError(_))
    ));
}

const NON_FINITE_PH: &str = r#"
schema_version: "1.0"
scenario:
  scenario_id: non-finite-ph
  solute_id: soda
  solute_volume: { value: 0.3, unit: L }
  water_volume: { value: 0.3, unit: L }
  max_volume: { value: 1.2, unit: L }
  time_step_seconds: 0.5
  ticks: 4
  flows:
    dropper_rate: { value: 0.005, unit: L/s }
    water_faucet_max_rate: { value: 0.25, unit: L/s }
    drain_faucet_max_rate: { value: 0.25, unit: L/s }
  rules:
    - name: nan-ph
      condition: { type: at_tick, tick: 1 }
      action: { type: apply_ph, ph: .nan }
    - name: infinite-ph
      condition: { type: at_tick, tick: 2 }
      action: { type: apply_ph, ph: .inf }
    - name: drag-far-below
      condition: { type: at_tick, tick: 3 }
      action: { type: drag_indicator, species: h3o, units: concentration, y: 9000 }
"#;

#[test]
fn non_finite_ph_commands_are_ignored_and_far_drags_clamp() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let log_path = tmp.path().join("non_finite_ph.csv");
    let mut engine = SimulationBuilder::new()
        .with_scenario(scenario(NON_FINITE_PH))
        .with_timeseries_logging_to_file(log_path.to_str().unwrap())
        .build()
        .unwrap();
    let initial_ph = engine.get_solution().ph();

    engine.tick().unwrap();
    assert!(engine
        .get_events()
        .iter()
        .any(|e| matches!(e, SimulationEvent::InvalidPhIgnored { rule } if rule == "nan-ph")));
    assert_eq!(engine.get_solution().solute().id(), "soda");
    assert_eq!(engine.get_solution().ph(), initial_ph);

    engine.tick().unwrap();
    assert!(engine
        .get_events()
        .iter()
        .any(|e| matches!(e, SimulationEvent::InvalidPhIgnored { rule } if rule == "infinite-ph")));
    assert_eq!(engine.get_solution().solute().id(), "soda");

    engine.tick().unwrap();
    assert!(engine.get_solution().solute().is_custom());
    assert_eq!(engine.get_solution().ph(), Some(15.0));

    engine.run().unwrap();
    let summary = analysis::summarize_run(log_path.to_str().unwrap()).unwrap();
    assert_eq!(summary.rows, 5);
    assert_eq!(summary.max_ph, Some(15.0));
    assert_eq!(summary.rules_fired, 3);
}
