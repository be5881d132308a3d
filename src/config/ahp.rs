//! AHP computation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::ahp::{
    AhpProcessor, DEFAULT_CONSISTENCY_THRESHOLD, DEFAULT_WEIGHT_TOLERANCE,
};

/// Tuning for the weighting and scoring pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct AhpConfig {
    /// Consistency ratios above this value are rejected
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,

    /// Number of alternatives a match must score (0 disables the check)
    #[serde(default = "default_required_alternatives")]
    pub required_alternatives: usize,

    /// Allowed deviation of weight sums from 1.0
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,
}

impl Default for AhpConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: default_consistency_threshold(),
            required_alternatives: default_required_alternatives(),
            weight_tolerance: default_weight_tolerance(),
        }
    }
}

fn default_consistency_threshold() -> f64 {
    DEFAULT_CONSISTENCY_THRESHOLD
}

fn default_required_alternatives() -> usize {
    5
}

fn default_weight_tolerance() -> f64 {
    DEFAULT_WEIGHT_TOLERANCE
}

impl AhpConfig {
    /// Builds the per-context processor from this configuration
    pub fn processor(&self) -> AhpProcessor {
        AhpProcessor::new(self.consistency_threshold, self.weight_tolerance)
    }

    /// Validate AHP configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let threshold = self.consistency_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ValidationError::InvalidConsistencyThreshold(threshold));
        }

        let tolerance = self.weight_tolerance;
        if !(tolerance > 0.0 && tolerance <= 0.01) {
            return Err(ValidationError::InvalidWeightTolerance(tolerance));
        }

        Ok(())
    }
}
