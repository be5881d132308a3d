//! Error taxonomy for the weighting and scoring pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{CriterionId, DomainError, ErrorCode};

/// Where in the pipeline a failure happened.
///
/// Rankings are scoped to the criterion whose children they order: the goal
/// for the main-criteria ranking, a main criterion for a sub-criteria ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextId {
    Criterion(CriterionId),
    Scoring,
}

impl From<CriterionId> for ContextId {
    fn from(id: CriterionId) -> Self {
        ContextId::Criterion(id)
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextId::Criterion(id) => write!(f, "context {}", id),
            ContextId::Scoring => write!(f, "scoring"),
        }
    }
}

/// Failures raised by the AHP components.
///
/// Every component fails fast; none of them degrade to partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    /// Malformed input: empty or duplicate rankings, identifiers that do not
    /// belong to the context, missing weights for scored criteria.
    #[error("Invalid input for {context}: {reason}")]
    InvalidInput { context: ContextId, reason: String },

    /// The ranking's consistency ratio exceeds the acceptance threshold.
    #[error("Preferences for {context} are inconsistent (CR: {ratio:.4}, threshold: {threshold})")]
    InconsistentPreferences {
        context: ContextId,
        ratio: f64,
        threshold: f64,
    },

    /// Numerical degeneracy while deriving weights.
    #[error("Computation fault in {context}: {reason}")]
    ComputationFault { context: ContextId, reason: String },
}

impl AhpError {
    /// Creates an invalid input error.
    pub fn invalid_input(context: impl Into<ContextId>, reason: impl Into<String>) -> Self {
        AhpError::InvalidInput {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Creates an inconsistent preferences error.
    pub fn inconsistent(context: impl Into<ContextId>, ratio: f64, threshold: f64) -> Self {
        AhpError::InconsistentPreferences {
            context: context.into(),
            ratio,
            threshold,
        }
    }

    /// Creates a computation fault.
    pub fn computation_fault(context: impl Into<ContextId>, reason: impl Into<String>) -> Self {
        AhpError::ComputationFault {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Returns the context the failure belongs to.
    pub fn context(&self) -> ContextId {
        match self {
            AhpError::InvalidInput { context, .. }
            | AhpError::InconsistentPreferences { context, .. }
            | AhpError::ComputationFault { context, .. } => *context,
        }
    }

    /// Returns the consistency ratio for inconsistency failures.
    pub fn ratio(&self) -> Option<f64> {
        match self {
            AhpError::InconsistentPreferences { ratio, .. } => Some(*ratio),
            _ => None,
        }
    }

    /// Returns the matching domain error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            AhpError::InvalidInput { .. } => ErrorCode::InvalidInput,
            AhpError::InconsistentPreferences { .. } => ErrorCode::InconsistentPreferences,
            AhpError::ComputationFault { .. } => ErrorCode::ComputationFault,
        }
    }

    /// Returns true if new input from the user can resolve the failure.
    pub fn is_user_correctable(&self) -> bool {
        self.code().is_user_correctable()
    }
}

impl From<AhpError> for DomainError {
    fn from(err: AhpError) -> Self {
        let context = match err.context() {
            ContextId::Criterion(id) => id.to_string(),
            ContextId::Scoring => "scoring".to_string(),
        };
        let domain = DomainError::new(err.code(), err.to_string()).with_detail("context", context);
        match err {
            AhpError::InconsistentPreferences {
                ratio, threshold, ..
            } => domain
                .with_detail("ratio", ratio.to_string())
                .with_detail("threshold", threshold.to_string()),
            _ => domain,
        }
    }
}
