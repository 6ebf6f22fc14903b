use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhScaleError {
    #[error("Solute '{name}' has pH {ph}, outside the valid range [{min}, {max}]")]
    InvalidSolutePh { name: String, ph: f64, min: f64, max: f64 },

    #[error("Solute color stop for '{0}' must have a ratio strictly between 0 and 1")]
    InvalidColorStop(String),

    #[error("Solute '{0}' not found in catalog")]
    SoluteNotFound(String),

    #[error("Scenario definition is missing")]
    ScenarioNotDefined,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("JSON error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("An error occurred during logging: {0}")]
    LoggingError(#[from] anyhow::Error),
}
