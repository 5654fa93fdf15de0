//! CLI error types

use pricer_models::analytical::AnalyticalError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `impvol` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] AnalyticalError),

    #[error("Did not converge after {iterations} iterations: vol = {value}, error = {residual}")]
    NotConverged {
        value: f64,
        iterations: usize,
        residual: f64,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
