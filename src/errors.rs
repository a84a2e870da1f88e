use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by the forecasting core, config layer, and persistence helpers.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Invalid {record}: {reason}")]
    Validation { record: String, reason: String },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, ForecastError>;

impl ForecastError {
    pub fn validation(record: impl Into<String>, reason: impl Into<String>) -> Self {
        ForecastError::Validation {
            record: record.into(),
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ForecastError::Validation { .. })
    }
}

impl From<std::io::Error> for ForecastError {
    fn from(err: std::io::Error) -> Self {
        ForecastError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            // Well-formed JSON whose records do not match the expected shape.
            Category::Data => ForecastError::validation("input record", err.to_string()),
            _ => ForecastError::Serde(err.to_string()),
        }
    }
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ForecastError),
    #[error("{0}")]
    Usage(String),
}
