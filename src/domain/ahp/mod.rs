//! AHP Module - Pure domain services for the Analytic Hierarchy Process.
//!
//! Turns ordinal rankings of criteria into consistency-checked weights and
//! combines those weights with alternative scores into a final ranking.
//!
//! # Components
//!
//! - `Ranking` - Ordered, duplicate-free sibling criteria under one context
//! - `ComparisonMatrix` - Reciprocal pairwise matrix from rank distances
//! - `PriorityVectorSolver` - Principal-eigenvector local weights
//! - `ConsistencyChecker` - Saaty consistency ratio against the random index
//! - `AhpProcessor` - Builder, gate and solver for one context
//! - `WeightAggregator` - Local → global sub-criterion weights
//! - `AlternativeScorer` - Weighted-sum scoring and ranking of alternatives
//! - `HierarchyEvaluator` - Full preference submission → hierarchy weights
//!
//! # Design Philosophy
//!
//! All components are synchronous and stateless. They take plain values and
//! return plain values or an `AhpError` naming the failing context.

mod aggregation;
mod comparison_matrix;
mod consistency;
mod errors;
mod evaluation;
mod priority_vector;
mod processor;
mod ranking;
mod scoring;

pub use aggregation::WeightAggregator;
pub use comparison_matrix::{
    rank_distance_importance, ComparisonMatrix, PrincipalEigenpair, MAX_IMPORTANCE,
};
pub use consistency::{random_index, ConsistencyChecker, ConsistencyReport, RANDOM_INDEX};
pub use errors::{AhpError, ContextId};
pub use evaluation::{HierarchyEvaluator, HierarchyWeights, PreferenceSet};
pub use priority_vector::{PriorityVectorSolver, WeightMap};
pub use processor::{
    AhpProcessor, ContextWeights, DEFAULT_CONSISTENCY_THRESHOLD, DEFAULT_WEIGHT_TOLERANCE,
};
pub use ranking::Ranking;
pub use scoring::{
    AlternativeScorer, AlternativeScores, AlternativeScoresBuilder, Judgement, RankedAlternative,
    ScoringOutcome,
};
