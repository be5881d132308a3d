//! SubmitPreferencesHandler - Command handler for a match's criteria rankings.

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::{MatchGuard, MatchLocks};
use crate::domain::ahp::{HierarchyEvaluator, HierarchyWeights, PreferenceSet};
use crate::domain::foundation::{DomainError, MatchId};
use crate::domain::hierarchy::CriteriaHierarchy;
use crate::ports::MatchStore;

/// Command to submit the rankings of a match.
#[derive(Debug, Clone)]
pub struct SubmitPreferencesCommand {
    pub match_id: MatchId,
    pub preferences: PreferenceSet,
}

/// Result of accepted preferences.
#[derive(Debug, Clone)]
pub struct SubmitPreferencesResult {
    pub weights: HierarchyWeights,
}

/// Handler for submitting preferences.
///
/// Rejected submissions leave previously accepted weights untouched.
pub struct SubmitPreferencesHandler {
    store: Arc<dyn MatchStore>,
    locks: Arc<MatchLocks>,
    hierarchy: Arc<CriteriaHierarchy>,
    evaluator: HierarchyEvaluator,
}

impl SubmitPreferencesHandler {
    pub fn new(
        store: Arc<dyn MatchStore>,
        locks: Arc<MatchLocks>,
        hierarchy: Arc<CriteriaHierarchy>,
        evaluator: HierarchyEvaluator,
    ) -> Self {
        Self {
            store,
            locks,
            hierarchy,
            evaluator,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitPreferencesCommand,
    ) -> Result<SubmitPreferencesResult, DomainError> {
        let guard = self.locks.acquire(&cmd.match_id).await;
        self.handle_locked(cmd, &guard).await
    }

    /// Runs the command under a lock the caller already holds for its match.
    pub async fn handle_locked(
        &self,
        cmd: SubmitPreferencesCommand,
        guard: &MatchGuard,
    ) -> Result<SubmitPreferencesResult, DomainError> {
        debug_assert_eq!(guard.match_id(), cmd.match_id);

        // 1. Derive and gate weights for every ranked context
        let weights = self
            .evaluator
            .evaluate(&self.hierarchy, &cmd.preferences)
            .map_err(|err| {
                warn!(match_id = %cmd.match_id, error = %err, "Preferences rejected");
                DomainError::from(err)
            })?;

        // 2. Replace previous weights; the old recommendation is now stale
        self.store
            .replace_weights(&cmd.match_id, weights.clone())
            .await?;
        self.store.clear_recommendation(&cmd.match_id).await?;

        info!(
            match_id = %cmd.match_id,
            contexts = weights.consistency.len(),
            worst_ratio = weights.worst_ratio(),
            "Preferences accepted"
        );

        Ok(SubmitPreferencesResult { weights })
    }
}
