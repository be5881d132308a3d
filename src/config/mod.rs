//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AHP_ADVISOR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use ahp_advisor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Consistency threshold: {}", config.ahp.consistency_threshold);
//! ```

mod ahp;
mod error;
mod logging;

pub use ahp::AhpConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable config.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Weighting and scoring settings
    #[serde(default)]
    pub ahp: AhpConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AHP_ADVISOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AHP_ADVISOR__AHP__CONSISTENCY_THRESHOLD=0.1` -> `ahp.consistency_threshold = 0.1`
    /// - `AHP_ADVISOR__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AHP_ADVISOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ahp.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("AHP_ADVISOR__AHP__CONSISTENCY_THRESHOLD");
        env::remove_var("AHP_ADVISOR__AHP__REQUIRED_ALTERNATIVES");
        env::remove_var("AHP_ADVISOR__AHP__WEIGHT_TOLERANCE");
        env::remove_var("AHP_ADVISOR__LOGGING__LEVEL");
        env::remove_var("AHP_ADVISOR__LOGGING__JSON");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ahp.consistency_threshold, 0.1);
        assert_eq!(config.ahp.required_alternatives, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AHP_ADVISOR__AHP__CONSISTENCY_THRESHOLD", "0.15");
        env::set_var("AHP_ADVISOR__AHP__REQUIRED_ALTERNATIVES", "0");
        env::set_var("AHP_ADVISOR__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ahp.consistency_threshold, 0.15);
        assert_eq!(config.ahp.required_alternatives, 0);
        assert!(config.logging.json);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("AHP_ADVISOR__AHP__CONSISTENCY_THRESHOLD", "2.0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidConsistencyThreshold(2.0))
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
