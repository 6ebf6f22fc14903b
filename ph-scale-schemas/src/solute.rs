//! File representation of a solute. The engine validates these into immutable
//! `Solute` values when a catalog is loaded.

use crate::color::RgbColor;
use serde::{Deserialize, Serialize};

/// An intermediate color used to make dilution non-linear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStopDefinition {
    pub color: RgbColor,
    /// Solute-to-total volume ratio at which the stop color is reached, in (0, 1).
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoluteDefinition {
    /// Machine-readable identifier used by scenarios (e.g. "battery_acid").
    pub solute_id: String,
    /// Human-readable name (e.g. "Battery Acid").
    pub name: String,
    pub ph: f64,
    pub stock_color: RgbColor,
    /// Color approached as the solute is diluted. Defaults to the color of water.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diluted_color: Option<RgbColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_stop: Option<ColorStopDefinition>,
}
