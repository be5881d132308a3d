//! SubmitAlternativesHandler - Command handler for a match's alternative scores.

use std::sync::Arc;
use tracing::info;

use crate::application::{MatchGuard, MatchLocks};
use crate::domain::ahp::AlternativeScores;
use crate::domain::foundation::{DomainError, ErrorCode, MatchId};
use crate::domain::hierarchy::{CriteriaHierarchy, CriterionLevel};
use crate::ports::MatchStore;

/// Command to submit the alternative scores of a match.
#[derive(Debug, Clone)]
pub struct SubmitAlternativesCommand {
    pub match_id: MatchId,
    pub scores: AlternativeScores,
}

/// Result of accepted alternative scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAlternativesResult {
    pub alternative_count: usize,
}

/// Handler for submitting alternative scores.
///
/// Every alternative must score every sub-criterion of the hierarchy and
/// nothing else.
pub struct SubmitAlternativesHandler {
    store: Arc<dyn MatchStore>,
    locks: Arc<MatchLocks>,
    hierarchy: Arc<CriteriaHierarchy>,
    /// 0 accepts any number of alternatives.
    required_alternatives: usize,
}

impl SubmitAlternativesHandler {
    pub fn new(
        store: Arc<dyn MatchStore>,
        locks: Arc<MatchLocks>,
        hierarchy: Arc<CriteriaHierarchy>,
        required_alternatives: usize,
    ) -> Self {
        Self {
            store,
            locks,
            hierarchy,
            required_alternatives,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAlternativesCommand,
    ) -> Result<SubmitAlternativesResult, DomainError> {
        let guard = self.locks.acquire(&cmd.match_id).await;
        self.handle_locked(cmd, &guard).await
    }

    /// Runs the command under a lock the caller already holds for its match.
    pub async fn handle_locked(
        &self,
        cmd: SubmitAlternativesCommand,
        guard: &MatchGuard,
    ) -> Result<SubmitAlternativesResult, DomainError> {
        debug_assert_eq!(guard.match_id(), cmd.match_id);

        // 1. Validate the score sheet
        cmd.scores.validate()?;
        self.check_alternative_count(&cmd.scores)?;
        self.check_criteria(&cmd.scores)?;

        // 2. Replace previous scores; the old recommendation is now stale
        let alternative_count = cmd.scores.alternative_count();
        self.store
            .replace_alternative_scores(&cmd.match_id, cmd.scores)
            .await?;
        self.store.clear_recommendation(&cmd.match_id).await?;

        info!(match_id = %cmd.match_id, alternative_count, "Alternatives accepted");

        Ok(SubmitAlternativesResult { alternative_count })
    }

    fn check_alternative_count(&self, scores: &AlternativeScores) -> Result<(), DomainError> {
        let count = scores.alternative_count();
        if self.required_alternatives > 0 && count != self.required_alternatives {
            return Err(DomainError::new(
                ErrorCode::InvalidInput,
                format!(
                    "Exactly {} alternatives are required, got {}",
                    self.required_alternatives, count
                ),
            )
            .with_detail("required", self.required_alternatives.to_string())
            .with_detail("actual", count.to_string()));
        }
        Ok(())
    }

    fn check_criteria(&self, scores: &AlternativeScores) -> Result<(), DomainError> {
        for alternative in scores.alternatives() {
            let Some(row) = scores.scores_for(&alternative) else {
                continue;
            };
            if let Some(criterion) = row
                .keys()
                .find(|c| self.hierarchy.level_of(c) != Some(CriterionLevel::Sub))
            {
                return Err(DomainError::new(
                    ErrorCode::InvalidInput,
                    format!(
                        "Alternative {} is scored against {}, which is not a sub-criterion",
                        alternative, criterion
                    ),
                )
                .with_detail("alternative_id", alternative.to_string())
                .with_detail("criterion_id", criterion.to_string()));
            }
            if let Some(unscored) = self
                .hierarchy
                .sub_criteria()
                .into_iter()
                .find(|c| !row.contains_key(c))
            {
                return Err(DomainError::new(
                    ErrorCode::InvalidInput,
                    format!(
                        "Alternative {} has no score for sub-criterion {}",
                        alternative, unscored
                    ),
                )
                .with_detail("alternative_id", alternative.to_string())
                .with_detail("criterion_id", unscored.to_string()));
            }
        }
        Ok(())
    }
}
