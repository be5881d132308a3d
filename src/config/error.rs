//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Consistency threshold must be in (0, 1], got {0}")]
    InvalidConsistencyThreshold(f64),

    #[error("Weight tolerance must be in (0, 0.01], got {0}")]
    InvalidWeightTolerance(f64),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
