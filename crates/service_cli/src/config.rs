//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command line flags.
//!
//! # Example file
//!
//! ```toml
//! log_level = "debug"
//! step = 0.01
//! parallel_threshold = 256
//!
//! [[sweep]]
//! parameter = "spot"
//! spot = 100.0
//! volatility = 0.3
//! rate = 0.08
//! carry = 0.08
//! option_type = "call"
//! strike = 100.0
//! maturity = 0.25
//! mesh = { start = 80.0, end = 120.0, step = 5.0 }
//!
//! [[row]]
//! values = [110.0, 0.1, 0.1, 0.02, -1.0, 100.0]
//! ```

use pricer_core::math::grid::mesh;
use pricer_core::types::GridError;
use pricer_models::instruments::OptionType;
use pricer_risk::parallel::DEFAULT_PARALLEL_THRESHOLD;
use pricer_risk::scenarios::{BaseScenario, SweepParameter};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default finite-difference spot bump
pub const DEFAULT_STEP: f64 = 0.01;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid finite-difference step: {0}. Must be positive and finite")]
    InvalidStep(f64),

    #[error("Invalid sweep #{index}: {reason}")]
    InvalidSweep { index: usize, reason: String },

    #[error("Invalid sweep grid: {0}")]
    Grid(#[from] GridError),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
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

/// Evenly spaced sweep values, expanded with [`mesh`]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MeshSpec {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

/// One `[[sweep]]` table: a base scenario plus the values of one parameter.
///
/// Leaving out `maturity` makes the base a perpetual American option.
/// Exactly one of `values` and `mesh` must be given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SweepSpec {
    pub parameter: SweepParameter,
    pub spot: f64,
    pub volatility: f64,
    pub rate: f64,
    pub carry: f64,
    pub option_type: OptionType,
    pub strike: f64,
    #[serde(default)]
    pub maturity: Option<f64>,
    #[serde(default)]
    pub values: Option<Vec<f64>>,
    #[serde(default)]
    pub mesh: Option<MeshSpec>,
}

impl SweepSpec {
    /// Base scenario the sweep varies
    pub fn base(&self) -> BaseScenario {
        BaseScenario {
            spot: self.spot,
            volatility: self.volatility,
            rate: self.rate,
            carry: self.carry,
            option_type: self.option_type,
            strike: self.strike,
            maturity: self.maturity,
        }
    }

    /// Values taken by the swept parameter
    pub fn points(&self, index: usize) -> Result<Vec<f64>, ConfigError> {
        match (&self.values, &self.mesh) {
            (Some(values), None) => Ok(values.clone()),
            (None, Some(grid)) => Ok(mesh(grid.start, grid.end, grid.step)?),
            (Some(_), Some(_)) => Err(ConfigError::InvalidSweep {
                index,
                reason: "give either `values` or `mesh`, not both".to_string(),
            }),
            (None, None) => Err(ConfigError::InvalidSweep {
                index,
                reason: "missing `values` or `mesh`".to_string(),
            }),
        }
    }
}

/// One `[[row]]` table: a raw 6- or 7-value scenario tuple
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RowSpec {
    pub values: Vec<f64>,
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    pub log_level: LogLevel,

    /// Spot bump used for finite-difference Greeks
    pub step: f64,

    /// Row count from which batch evaluation runs in parallel
    pub parallel_threshold: usize,

    /// Parameter sweeps
    #[serde(rename = "sweep")]
    pub sweeps: Vec<SweepSpec>,

    /// Raw scenario rows
    #[serde(rename = "row")]
    pub rows: Vec<RowSpec>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            step: DEFAULT_STEP,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            sweeps: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse config: {}", e)))
    }

    /// Override fields from environment variables
    ///
    /// - `PRICER_LOG_LEVEL`: Log level
    /// - `PRICER_FD_STEP`: Finite-difference step
    /// - `PRICER_PARALLEL_THRESHOLD`: Parallel threshold
    ///
    /// `lookup` returns the value of a variable if it is set.
    pub fn merge_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("PRICER_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(step) = lookup("PRICER_FD_STEP") {
            self.step = step.parse().map_err(|_| {
                ConfigError::EnvError(format!("PRICER_FD_STEP is not a number: {}", step))
            })?;
        }
        if let Some(threshold) = lookup("PRICER_PARALLEL_THRESHOLD") {
            self.parallel_threshold = threshold.parse().map_err(|_| {
                ConfigError::EnvError(format!(
                    "PRICER_PARALLEL_THRESHOLD is not a count: {}",
                    threshold
                ))
            })?;
        }
        Ok(())
    }

    /// Override fields from command line flags
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(step) = cli.step {
            self.step = step;
        }
        if let Some(threshold) = cli.parallel_threshold {
            self.parallel_threshold = threshold;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ConfigError::InvalidStep(self.step));
        }
        for (index, sweep) in self.sweeps.iter().enumerate() {
            sweep.points(index)?;
        }
        Ok(())
    }
}

/// Command line overrides
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Finite-difference step override
    pub step: Option<f64>,
    /// Parallel threshold override
    pub parallel_threshold: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(config_path) = &cli.config_file {
        CliConfig::from_file(config_path)?
    } else {
        CliConfig::default()
    };

    config.merge_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}
