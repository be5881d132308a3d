//! Match store port.
//!
//! Defines the contract for keeping the per-match state of the
//! replace-then-recompute protocol: the latest weights, the latest
//! alternative scores and the latest recommendation.
//!
//! # Design
//!
//! - **Replace, never merge**: every write supersedes the previous value
//! - **Match-scoped**: all reads and writes are keyed by `MatchId`

use crate::domain::ahp::{AlternativeScores, HierarchyWeights};
use crate::domain::foundation::{DomainError, MatchId};
use crate::domain::recommendation::Recommendation;
use async_trait::async_trait;

/// Storage port for match state.
///
/// Callers serialize writes for the same match; implementations only need
/// each individual call to be atomic.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Replace the weights derived from the latest accepted preferences.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn replace_weights(
        &self,
        match_id: &MatchId,
        weights: HierarchyWeights,
    ) -> Result<(), DomainError>;

    /// Find the current weights of a match.
    ///
    /// Returns `None` if no preferences were accepted yet.
    async fn weights(&self, match_id: &MatchId) -> Result<Option<HierarchyWeights>, DomainError>;

    /// Replace the alternative scores of a match.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn replace_alternative_scores(
        &self,
        match_id: &MatchId,
        scores: AlternativeScores,
    ) -> Result<(), DomainError>;

    /// Find the current alternative scores of a match.
    async fn alternative_scores(
        &self,
        match_id: &MatchId,
    ) -> Result<Option<AlternativeScores>, DomainError>;

    /// Replace the recommendation of its match.
    async fn replace_recommendation(
        &self,
        recommendation: Recommendation,
    ) -> Result<(), DomainError>;

    /// Find the last computed recommendation of a match.
    async fn recommendation(&self, match_id: &MatchId)
        -> Result<Option<Recommendation>, DomainError>;

    /// Drop a stale recommendation after its inputs changed.
    async fn clear_recommendation(&self, match_id: &MatchId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn match_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn MatchStore) {}
    }
}
