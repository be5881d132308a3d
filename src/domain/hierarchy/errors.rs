//! Hierarchy construction errors.

use thiserror::Error;

use crate::domain::foundation::{CriterionId, DomainError, ErrorCode};

/// Violations of the goal → main → sub tree shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("Hierarchy has no goal criterion")]
    NoGoal,

    #[error("Hierarchy has more than one goal criterion: {0:?}")]
    MultipleGoals(Vec<CriterionId>),

    #[error("Duplicate criterion id {0}")]
    DuplicateId(CriterionId),

    #[error("Duplicate criterion code '{0}'")]
    DuplicateCode(String),

    #[error("Criterion {criterion} references unknown parent {parent}")]
    UnknownParent {
        criterion: CriterionId,
        parent: CriterionId,
    },

    #[error("Criterion {0} is nested deeper than sub-criterion level")]
    TooDeep(CriterionId),

    #[error("Hierarchy has no main criteria")]
    NoMainCriteria,

    #[error("Main criterion {0} has no sub-criteria")]
    MainWithoutSubCriteria(CriterionId),
}

impl From<HierarchyError> for DomainError {
    fn from(err: HierarchyError) -> Self {
        DomainError::new(ErrorCode::InvalidHierarchy, err.to_string())
    }
}
