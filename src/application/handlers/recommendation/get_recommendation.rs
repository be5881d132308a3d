//! GetRecommendationHandler - Query handler that scores a match's alternatives.

use std::sync::Arc;
use tracing::info;

use crate::application::{MatchGuard, MatchLocks};
use crate::domain::ahp::AlternativeScorer;
use crate::domain::foundation::{DomainError, ErrorCode, MatchId};
use crate::domain::recommendation::Recommendation;
use crate::ports::MatchStore;

/// Query for the recommendation of a match.
#[derive(Debug, Clone)]
pub struct GetRecommendationQuery {
    pub match_id: MatchId,
}

/// Handler computing recommendations.
///
/// Always recomputes from the stored weights and scores and replaces any
/// previous recommendation.
pub struct GetRecommendationHandler {
    store: Arc<dyn MatchStore>,
    locks: Arc<MatchLocks>,
}

impl GetRecommendationHandler {
    pub fn new(store: Arc<dyn MatchStore>, locks: Arc<MatchLocks>) -> Self {
        Self { store, locks }
    }

    pub async fn handle(&self, query: GetRecommendationQuery) -> Result<Recommendation, DomainError> {
        let guard = self.locks.acquire(&query.match_id).await;
        self.handle_locked(query, &guard).await
    }

    /// Runs the query under a lock the caller already holds for its match.
    pub async fn handle_locked(
        &self,
        query: GetRecommendationQuery,
        guard: &MatchGuard,
    ) -> Result<Recommendation, DomainError> {
        debug_assert_eq!(guard.match_id(), query.match_id);

        // 1. Load inputs
        let weights = self.store.weights(&query.match_id).await?;
        let scores = self.store.alternative_scores(&query.match_id).await?;
        let (weights, scores) = match (weights, scores) {
            (Some(weights), Some(scores)) => (weights, scores),
            (None, None) => {
                return Err(missing(ErrorCode::MatchNotFound, &query.match_id, "Match not found"))
            }
            (None, Some(_)) => {
                return Err(missing(
                    ErrorCode::PreferencesMissing,
                    &query.match_id,
                    "Preferences for this match must be submitted first",
                ))
            }
            (Some(_), None) => {
                return Err(missing(
                    ErrorCode::AlternativesMissing,
                    &query.match_id,
                    "Alternatives for this match must be submitted first",
                ))
            }
        };

        // 2. Score and replace the stored recommendation
        let outcome = AlternativeScorer::score(&scores, &weights.global)?;
        let recommendation = Recommendation::new(query.match_id, outcome);
        self.store
            .replace_recommendation(recommendation.clone())
            .await?;

        info!(
            match_id = %query.match_id,
            alternatives = recommendation.rankings.len(),
            best = ?recommendation.best(),
            "Recommendation computed"
        );

        Ok(recommendation)
    }
}

fn missing(code: ErrorCode, match_id: &MatchId, message: &str) -> DomainError {
    DomainError::new(code, message).with_detail("match_id", match_id.to_string())
}
