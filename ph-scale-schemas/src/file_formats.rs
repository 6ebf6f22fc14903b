use crate::{scenario::Scenario, solute::SoluteDefinition};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SoluteFile {
    pub schema_version: String,
    pub solutes: Vec<SoluteDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioFile {
    pub schema_version: String,
    pub scenario: Scenario,
}
