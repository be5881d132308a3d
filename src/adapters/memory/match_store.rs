//! In-memory match store implementation.
//!
//! This adapter provides an in-memory implementation of the `MatchStore` port.
//! Useful for:
//! - The command-line advisor, which evaluates one request per run
//! - Development and testing environments
//!
//! Nothing is persisted across restarts.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::ahp::{AlternativeScores, HierarchyWeights};
use crate::domain::foundation::{DomainError, MatchId};
use crate::domain::recommendation::Recommendation;
use crate::ports::MatchStore;

#[derive(Debug, Default)]
struct MatchRecord {
    weights: Option<HierarchyWeights>,
    scores: Option<AlternativeScores>,
    recommendation: Option<Recommendation>,
}

/// In-memory implementation of the MatchStore port.
///
/// Thread-safe via an internal `RwLock`.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryMatchStore::new();
/// store.replace_weights(&match_id, weights).await?;
/// assert!(store.weights(&match_id).await?.is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    matches: RwLock<HashMap<MatchId, MatchRecord>>,
}

impl InMemoryMatchStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of matches with any stored state.
    pub async fn len(&self) -> usize {
        self.matches.read().await.len()
    }

    /// Returns true if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.matches.read().await.is_empty()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn replace_weights(
        &self,
        match_id: &MatchId,
        weights: HierarchyWeights,
    ) -> Result<(), DomainError> {
        let mut matches = self.matches.write().await;
        matches.entry(*match_id).or_default().weights = Some(weights);
        Ok(())
    }

    async fn weights(&self, match_id: &MatchId) -> Result<Option<HierarchyWeights>, DomainError> {
        let matches = self.matches.read().await;
        Ok(matches.get(match_id).and_then(|r| r.weights.clone()))
    }

    async fn replace_alternative_scores(
        &self,
        match_id: &MatchId,
        scores: AlternativeScores,
    ) -> Result<(), DomainError> {
        let mut matches = self.matches.write().await;
        matches.entry(*match_id).or_default().scores = Some(scores);
        Ok(())
    }

    async fn alternative_scores(
        &self,
        match_id: &MatchId,
    ) -> Result<Option<AlternativeScores>, DomainError> {
        let matches = self.matches.read().await;
        Ok(matches.get(match_id).and_then(|r| r.scores.clone()))
    }

    async fn replace_recommendation(
        &self,
        recommendation: Recommendation,
    ) -> Result<(), DomainError> {
        let match_id = recommendation.match_id;
        let mut matches = self.matches.write().await;
        matches.entry(match_id).or_default().recommendation = Some(recommendation);
        Ok(())
    }

    async fn recommendation(
        &self,
        match_id: &MatchId,
    ) -> Result<Option<Recommendation>, DomainError> {
        let matches = self.matches.read().await;
        Ok(matches.get(match_id).and_then(|r| r.recommendation.clone()))
    }

    async fn clear_recommendation(&self, match_id: &MatchId) -> Result<(), DomainError> {
        let mut matches = self.matches.write().await;
        if let Some(record) = matches.get_mut(match_id) {
            record.recommendation = None;
        }
        Ok(())
    }
}
