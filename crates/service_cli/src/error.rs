//! Error types for the chooser CLI.

use pricer_core::types::PricingError;
use pricer_validation::ValidationError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Bad command line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Pricing failure
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Backtest failure
    #[error("Backtest error: {0}")]
    Validation(#[from] ValidationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias used by every command.
pub type Result<T> = std::result::Result<T, CliError>;
