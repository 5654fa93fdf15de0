//! Solver configuration management
//!
//! Handles loading settings from TOML files, `IMPVOL_*` environment variables
//! and CLI arguments.

use pricer_core::math::solvers::SolverConfig;
use pricer_models::implied_vol::{ImpliedVolSolver, UpdateMethod, DEFAULT_LEARNING_RATE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default configuration file, read when present in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "impvol.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid method: {0}. Must be one of: fixed-step, newton")]
    InvalidMethod(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels accepted by `--log-level` and `IMPVOL_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Volatility update rule selected in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodKind {
    #[default]
    FixedStep,
    Newton,
}

impl FromStr for MethodKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "fixed-step" | "fixed" | "relaxation" => Ok(MethodKind::FixedStep),
            "newton" | "newton-raphson" => Ok(MethodKind::Newton),
            _ => Err(ConfigError::InvalidMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MethodKind::FixedStep => write!(f, "fixed-step"),
            MethodKind::Newton => write!(f, "newton"),
        }
    }
}

/// Effective solver settings.
///
/// Every field is optional in the TOML file; missing fields keep their
/// defaults, which reproduce the reference scenario (tolerance 1e-6,
/// 1000 iterations, initial volatility 0.2, fixed step 0.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Absolute pricing error at which the solve stops
    pub tolerance: f64,
    /// Iteration budget
    pub max_iterations: usize,
    /// Starting volatility
    pub initial_vol: f64,
    /// Update rule
    #[serde(deserialize_with = "deserialize_method")]
    pub method: MethodKind,
    /// Fixed-step multiplier (ignored by Newton)
    pub learning_rate: f64,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_method<'de, D>(deserializer: D) -> Result<MethodKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    MethodKind::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 1000,
            initial_vol: 0.2,
            method: MethodKind::FixedStep,
            learning_rate: DEFAULT_LEARNING_RATE,
            log_level: LogLevel::Warn,
        }
    }
}

impl SolverSettings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from the `IMPVOL_*` variables returned by `lookup`.
    ///
    /// Only variables that are set are applied.
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("IMPVOL_TOLERANCE") {
            self.tolerance = parse_env("IMPVOL_TOLERANCE", &value)?;
        }
        if let Some(value) = lookup("IMPVOL_MAX_ITERATIONS") {
            self.max_iterations = parse_env("IMPVOL_MAX_ITERATIONS", &value)?;
        }
        if let Some(value) = lookup("IMPVOL_INITIAL_VOL") {
            self.initial_vol = parse_env("IMPVOL_INITIAL_VOL", &value)?;
        }
        if let Some(value) = lookup("IMPVOL_METHOD") {
            self.method = MethodKind::from_str(&value)?;
        }
        if let Some(value) = lookup("IMPVOL_LEARNING_RATE") {
            self.learning_rate = parse_env("IMPVOL_LEARNING_RATE", &value)?;
        }
        if let Some(value) = lookup("IMPVOL_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&value)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(tolerance) = cli.tolerance {
            self.tolerance = tolerance;
        }
        if let Some(max_iterations) = cli.max_iterations {
            self.max_iterations = max_iterations;
        }
        if let Some(initial_vol) = cli.initial_vol {
            self.initial_vol = initial_vol;
        }
        if let Some(method) = &cli.method {
            self.method = MethodKind::from_str(method)?;
        }
        if let Some(learning_rate) = cli.learning_rate {
            self.learning_rate = learning_rate;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "tolerance",
                message: format!("must be non-negative, got {}", self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_iterations",
                message: "must be at least 1".to_string(),
            });
        }
        if !(self.initial_vol.is_finite() && self.initial_vol > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "initial_vol",
                message: format!("must be positive and finite, got {}", self.initial_vol),
            });
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "learning_rate",
                message: format!("must be positive and finite, got {}", self.learning_rate),
            });
        }
        Ok(())
    }

    /// Update rule described by these settings
    pub fn update_method(&self) -> UpdateMethod {
        match self.method {
            MethodKind::FixedStep => UpdateMethod::FixedStep {
                learning_rate: self.learning_rate,
            },
            MethodKind::Newton => UpdateMethod::Newton,
        }
    }

    /// Build the solver described by these settings
    pub fn solver(&self) -> ImpliedVolSolver {
        ImpliedVolSolver::new(
            SolverConfig::new(self.tolerance, self.max_iterations),
            self.update_method(),
        )
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} is not a valid number", key, value)))
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Tolerance override
    pub tolerance: Option<f64>,
    /// Iteration budget override
    pub max_iterations: Option<usize>,
    /// Initial volatility override
    pub initial_vol: Option<f64>,
    /// Update rule override
    pub method: Option<String>,
    /// Learning rate override
    pub learning_rate: Option<f64>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build settings from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (`--config`, else `impvol.toml` if it exists)
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<SolverSettings, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<SolverSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match &cli.config_file {
        Some(path) => SolverSettings::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                SolverSettings::from_file(default_path)?
            } else {
                SolverSettings::default()
            }
        }
    };

    settings.apply_vars(lookup)?;
    settings.merge_with_cli(cli)?;
    settings.validate()?;

    Ok(settings)
}
