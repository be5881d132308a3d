//! Advisor - runs the preference, alternative and recommendation handlers
//! for one match in protocol order, under a single match lock.

use serde::Serialize;
use std::sync::Arc;

use super::{
    GetRecommendationHandler, GetRecommendationQuery, MatchLocks, SubmitAlternativesCommand,
    SubmitAlternativesHandler, SubmitPreferencesCommand, SubmitPreferencesHandler,
};
use crate::config::AhpConfig;
use crate::domain::ahp::{AlternativeScores, HierarchyEvaluator, HierarchyWeights, PreferenceSet};
use crate::domain::foundation::{DomainError, MatchId};
use crate::domain::hierarchy::CriteriaHierarchy;
use crate::domain::recommendation::Recommendation;
use crate::ports::MatchStore;

/// Weights and recommendation produced for one match.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisorOutcome {
    pub weights: HierarchyWeights,
    pub recommendation: Recommendation,
}

/// Handler set sharing one store and one lock registry.
///
/// The match stays locked from the preference submission until the
/// recommendation is stored, so the returned weights are exactly the ones
/// the recommendation was scored with.
pub struct Advisor {
    locks: Arc<MatchLocks>,
    submit_preferences: SubmitPreferencesHandler,
    submit_alternatives: SubmitAlternativesHandler,
    get_recommendation: GetRecommendationHandler,
}

impl Advisor {
    pub fn new(
        store: Arc<dyn MatchStore>,
        hierarchy: Arc<CriteriaHierarchy>,
        config: &AhpConfig,
    ) -> Self {
        let locks = Arc::new(MatchLocks::new());
        Self {
            submit_preferences: SubmitPreferencesHandler::new(
                Arc::clone(&store),
                Arc::clone(&locks),
                Arc::clone(&hierarchy),
                HierarchyEvaluator::new(config.processor()),
            ),
            submit_alternatives: SubmitAlternativesHandler::new(
                Arc::clone(&store),
                Arc::clone(&locks),
                hierarchy,
                config.required_alternatives,
            ),
            get_recommendation: GetRecommendationHandler::new(store, Arc::clone(&locks)),
            locks,
        }
    }

    /// Submits preferences and scores, then computes the recommendation.
    pub async fn evaluate(
        &self,
        match_id: MatchId,
        preferences: PreferenceSet,
        scores: AlternativeScores,
    ) -> Result<AdvisorOutcome, DomainError> {
        let guard = self.locks.acquire(&match_id).await;

        let weights = self
            .submit_preferences
            .handle_locked(
                SubmitPreferencesCommand {
                    match_id,
                    preferences,
                },
                &guard,
            )
            .await?
            .weights;
        self.submit_alternatives
            .handle_locked(SubmitAlternativesCommand { match_id, scores }, &guard)
            .await?;
        let recommendation = self
            .get_recommendation
            .handle_locked(GetRecommendationQuery { match_id }, &guard)
            .await?;

        Ok(AdvisorOutcome {
            weights,
            recommendation,
        })
    }
}
