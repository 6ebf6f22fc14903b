use serde::{Deserialize, Serialize};

/// A value paired with the unit it was written in (e.g. `{ value: 0.5, unit: "L" }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement<T> {
    pub value: T,
    pub unit: String,
}

impl Measurement<f64> {
    pub fn liters(value: f64) -> Self {
        Self {
            value,
            unit: "L".to_string(),
        }
    }

    /// Returns the value converted to liters, or `None` if the unit is not a volume unit.
    pub fn as_liters(&self) -> Option<f64> {
        match self.unit.as_str() {
            "L" | "l" => Some(self.value),
            "mL" | "ml" => Some(self.value / 1000.0),
            _ => None,
        }
    }

    /// Returns the value converted to liters per second, or `None` for unknown units.
    pub fn as_liters_per_second(&self) -> Option<f64> {
        match self.unit.as_str() {
            "L/s" | "l/s" => Some(self.value),
            "mL/s" | "ml/s" => Some(self.value / 1000.0),
            _ => None,
        }
    }
}
