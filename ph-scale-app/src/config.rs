use anyhow::{Context, Result};
use ph_scale_core::solute::SoluteCatalog;
use ph_scale_schemas::{
    file_formats::{ScenarioFile, SoluteFile},
    scenario::Scenario,
};
use std::{fs, path::Path};

/// Scenario file version this build understands.
const SCHEMA_VERSION: &str = "1.0";

/// Everything a run needs that is read from disk.
pub struct RunConfig {
    pub scenario: Scenario,
    pub catalog: SoluteCatalog,
}

impl RunConfig {
    /// Loads a scenario and, optionally, extra solutes on top of the built-in catalog.
    pub fn load(scenario_path: &Path, solutes_path: Option<&Path>) -> Result<Self> {
        log::info!("Loading scenario from {:?}", scenario_path);
        let scenario_file: ScenarioFile = load_yaml(scenario_path)?;
        check_version(&scenario_file.schema_version, scenario_path);

        let mut catalog = SoluteCatalog::builtin();
        if let Some(path) = solutes_path {
            let solute_file: SoluteFile = load_yaml(path)?;
            check_version(&solute_file.schema_version, path);
            catalog
                .extend(&solute_file.solutes)
                .with_context(|| format!("Invalid solute definition in {:?}", path))?;
            log::info!("Loaded {} extra solutes from {:?}", solute_file.solutes.len(), path);
        }

        Ok(Self {
            scenario: scenario_file.scenario,
            catalog,
        })
    }
}

fn check_version(version: &str, path: &Path) {
    if version != SCHEMA_VERSION {
        log::warn!(
            "{:?} declares schema version {}, expected {}",
            path,
            version,
            SCHEMA_VERSION
        );
    }
}

/// Reads and parses a single YAML file.
fn load_yaml<F>(path: &Path) -> Result<F>
where
    F: for<'de> serde::Deserialize<'de>,
{
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse YAML from {:?}", path))
}
