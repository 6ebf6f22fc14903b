use serde::{Deserialize, Serialize};

/// Units shown on the logarithmic graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphUnits {
    /// Concentration, mol/L.
    Concentration,
    /// Quantity, mol.
    Quantity,
}

/// The species whose indicator is being dragged on the graph.
///
/// Water is plotted but its indicator cannot be dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorSpecies {
    #[serde(rename = "h3o")]
    H3O,
    #[serde(rename = "oh")]
    OH,
}
