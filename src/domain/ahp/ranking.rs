//! Ranking - ordinal preference over sibling criteria.

use serde::Serialize;
use std::collections::HashSet;

use super::AhpError;
use crate::domain::foundation::CriterionId;
use crate::domain::hierarchy::CriteriaHierarchy;

/// An ordered, duplicate-free sequence of sibling criteria.
///
/// Position encodes importance: index 0 is the most important. The context
/// is the criterion whose children are being ranked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranking {
    context: CriterionId,
    items: Vec<CriterionId>,
}

impl Ranking {
    /// Creates a ranking, rejecting empty or duplicate sequences.
    pub fn new(context: CriterionId, items: Vec<CriterionId>) -> Result<Self, AhpError> {
        if items.is_empty() {
            return Err(AhpError::invalid_input(context, "ranking cannot be empty"));
        }

        let mut seen = HashSet::with_capacity(items.len());
        if let Some(duplicate) = items.iter().find(|id| !seen.insert(**id)) {
            return Err(AhpError::invalid_input(
                context,
                format!("criterion {} appears more than once", duplicate),
            ));
        }

        Ok(Self { context, items })
    }

    /// Checks that the ranking orders exactly the children of its context.
    pub fn validate_against(&self, hierarchy: &CriteriaHierarchy) -> Result<(), AhpError> {
        let children = hierarchy.children_of(&self.context);
        if children.is_empty() {
            return Err(AhpError::invalid_input(
                self.context,
                format!("criterion {} has no children to rank", self.context),
            ));
        }

        if let Some(stranger) = self.items.iter().find(|id| !children.contains(*id)) {
            return Err(AhpError::invalid_input(
                self.context,
                format!(
                    "criterion {} is not a child of {}",
                    stranger, self.context
                ),
            ));
        }

        if let Some(missing) = children.iter().find(|id| !self.items.contains(*id)) {
            return Err(AhpError::invalid_input(
                self.context,
                format!("criterion {} is missing from the ranking", missing),
            ));
        }

        Ok(())
    }

    /// Returns the criterion whose children are ranked.
    pub fn context(&self) -> CriterionId {
        self.context
    }

    /// Returns the ranked criteria, most important first.
    pub fn items(&self) -> &[CriterionId] {
        &self.items
    }

    /// Returns the zero-based rank of a criterion.
    pub fn position_of(&self, id: &CriterionId) -> Option<usize> {
        self.items.iter().position(|item| item == id)
    }

    /// Returns the number of ranked criteria.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed ranking.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
