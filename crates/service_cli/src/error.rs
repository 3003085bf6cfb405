//! CLI error types

use pricer_core::types::PricingError;
use pricer_risk::scenarios::ScenarioError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `pricer` binary
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pricing failed for a single-instrument command
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Scenario matrix construction failed
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// Command line arguments are inconsistent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

impl From<pricer_models::instruments::InstrumentError> for CliError {
    fn from(err: pricer_models::instruments::InstrumentError) -> Self {
        CliError::Pricing(err.into())
    }
}
