//! AHP Processor - ranking → comparison matrix → gated local weights.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    AhpError, ComparisonMatrix, ConsistencyChecker, ConsistencyReport, PriorityVectorSolver,
    Ranking, WeightMap,
};
use crate::domain::foundation::CriterionId;

/// Consistency ratios above this value are rejected.
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.1;

/// Allowed deviation of a weight sum from 1.0.
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 1e-6;

/// Local weights of one context that passed the consistency gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextWeights {
    pub context: CriterionId,
    pub weights: WeightMap,
    pub consistency: ConsistencyReport,
}

impl ContextWeights {
    /// Returns the consistency ratio of the context.
    pub fn ratio(&self) -> f64 {
        self.consistency.ratio
    }

    /// Returns the local weight of a criterion.
    pub fn weight_of(&self, id: &CriterionId) -> Option<f64> {
        self.weights.get(id).copied()
    }
}

/// Runs the builder, the consistency gate and the solver for one context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AhpProcessor {
    threshold: f64,
    tolerance: f64,
}

impl Default for AhpProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_CONSISTENCY_THRESHOLD, DEFAULT_WEIGHT_TOLERANCE)
    }
}

impl AhpProcessor {
    pub fn new(threshold: f64, tolerance: f64) -> Self {
        Self {
            threshold,
            tolerance,
        }
    }

    /// Returns the consistency threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the weight-sum tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Derives local weights for a ranking.
    ///
    /// Fails with `InconsistentPreferences` when the consistency ratio
    /// exceeds the threshold; no weights are computed in that case.
    pub fn build_and_score(&self, ranking: &Ranking) -> Result<ContextWeights, AhpError> {
        self.score_matrix(&ComparisonMatrix::from_ranking(ranking))
    }

    /// Derives local weights for an already built comparison matrix.
    pub fn score_matrix(&self, matrix: &ComparisonMatrix) -> Result<ContextWeights, AhpError> {
        let context = matrix.context();
        let consistency = ConsistencyChecker::check(matrix)?;

        if !consistency.is_acceptable(self.threshold) {
            warn!(
                context = %context,
                n = matrix.order(),
                ratio = consistency.ratio,
                threshold = self.threshold,
                "Rejecting inconsistent preferences"
            );
            return Err(AhpError::inconsistent(
                context,
                consistency.ratio,
                self.threshold,
            ));
        }

        let weights = PriorityVectorSolver::solve(matrix)?;
        let total: f64 = weights.values().sum();
        if (total - 1.0).abs() > self.tolerance {
            return Err(AhpError::computation_fault(
                context,
                format!("local weights sum to {total}"),
            ));
        }

        debug!(
            context = %context,
            n = matrix.order(),
            ratio = consistency.ratio,
            lambda_max = consistency.lambda_max,
            "Derived local weights"
        );

        Ok(ContextWeights {
            context,
            weights,
            consistency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::ContextId;

    fn ranking_of_order(n: i64) -> Ranking {
        Ranking::new(
            CriterionId::new(1),
            (100..100 + n).map(CriterionId::new).collect(),
        )
        .unwrap()
    }

    #[test]
    fn default_uses_standard_threshold() {
        let processor = AhpProcessor::default();
        assert_eq!(processor.threshold(), 0.1);
        assert_eq!(processor.tolerance(), 1e-6);
    }

    #[test]
    fn accepts_seven_item_ranking() {
        let result = AhpProcessor::default()
            .build_and_score(&ranking_of_order(7))
            .unwrap();

        assert_eq!(result.context, CriterionId::new(1));
        assert_eq!(result.weights.len(), 7);
        assert!(result.ratio() < 0.1);
        let total: f64 = result.weights.values().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_eight_item_ranking_with_its_ratio() {
        let err = AhpProcessor::default()
            .build_and_score(&ranking_of_order(8))
            .unwrap_err();

        match err {
            AhpError::InconsistentPreferences {
                context,
                ratio,
                threshold,
            } => {
                assert_eq!(context, ContextId::Criterion(CriterionId::new(1)));
                assert!((ratio - 0.1214).abs() < 1e-3);
                assert_eq!(threshold, 0.1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn relaxed_threshold_accepts_eight_items() {
        let processor = AhpProcessor::new(0.15, DEFAULT_WEIGHT_TOLERANCE);
        let result = processor.build_and_score(&ranking_of_order(8)).unwrap();
        assert_eq!(result.weights.len(), 8);
    }

    #[test]
    fn two_item_context_always_passes() {
        let processor = AhpProcessor::new(0.0001, DEFAULT_WEIGHT_TOLERANCE);
        let result = processor.build_and_score(&ranking_of_order(2)).unwrap();

        assert_eq!(result.ratio(), 0.0);
        assert!((result.weight_of(&CriterionId::new(100)).unwrap() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn single_item_context_gets_full_weight() {
        let result = AhpProcessor::default()
            .build_and_score(&ranking_of_order(1))
            .unwrap();
        assert_eq!(result.weight_of(&CriterionId::new(100)), Some(1.0));
    }

    #[test]
    fn scores_explicit_judgement_matrix() {
        let matrix = ComparisonMatrix::from_judgements(
            CriterionId::new(3),
            vec![CriterionId::new(4), CriterionId::new(5)],
            vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        )
        .unwrap();

        let result = AhpProcessor::default().score_matrix(&matrix).unwrap();
        assert!((result.weight_of(&CriterionId::new(4)).unwrap() - 0.5).abs() < 1e-9);
    }
}
