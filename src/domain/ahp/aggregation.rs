//! Hierarchical Weight Aggregator - local weights → global sub-criterion weights.

use std::collections::{BTreeMap, HashMap};

use super::{AhpError, WeightMap, DEFAULT_WEIGHT_TOLERANCE};
use crate::domain::foundation::CriterionId;

/// Propagates local weights down the goal → main → sub hierarchy.
///
/// # Algorithm
/// `global(sub) = local(sub | parent) × local(parent | goal)`; the goal has
/// weight 1.0 so a main criterion's global weight equals its local weight.
///
/// # Edge Cases
/// - Every weight map must be non-empty, strictly positive and sum to 1.0
///   within the tolerance
/// - A sub-ranking whose parent has no main weight is invalid input
/// - A sub-criterion listed under two parents is invalid input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightAggregator {
    tolerance: f64,
}

impl Default for WeightAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_TOLERANCE)
    }
}

impl WeightAggregator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Computes global weights for every sub-criterion.
    ///
    /// `goal` names the context of `main_weights` in error reports.
    pub fn aggregate_global(
        &self,
        goal: CriterionId,
        main_weights: &WeightMap,
        sub_weights_by_parent: &BTreeMap<CriterionId, WeightMap>,
    ) -> Result<WeightMap, AhpError> {
        self.check_distribution(goal, main_weights)?;

        let mut owners: HashMap<CriterionId, CriterionId> = HashMap::new();
        let mut global = WeightMap::new();

        for (parent, local_weights) in sub_weights_by_parent {
            let parent_weight = main_weights.get(parent).copied().ok_or_else(|| {
                AhpError::invalid_input(
                    *parent,
                    format!("criterion {parent} has no main-criteria weight"),
                )
            })?;
            self.check_distribution(*parent, local_weights)?;

            for (sub, local) in local_weights {
                if let Some(owner) = owners.insert(*sub, *parent) {
                    return Err(AhpError::invalid_input(
                        *parent,
                        format!("criterion {sub} is already weighted under {owner}"),
                    ));
                }
                global.insert(*sub, local * parent_weight);
            }
        }

        Ok(global)
    }

    fn check_distribution(&self, context: CriterionId, weights: &WeightMap) -> Result<(), AhpError> {
        if weights.is_empty() {
            return Err(AhpError::invalid_input(context, "weight map is empty"));
        }
        if let Some((id, weight)) = weights.iter().find(|(_, w)| !w.is_finite() || **w <= 0.0) {
            return Err(AhpError::invalid_input(
                context,
                format!("criterion {id} has invalid weight {weight}"),
            ));
        }

        let total: f64 = weights.values().sum();
        if (total - 1.0).abs() > self.tolerance {
            return Err(AhpError::invalid_input(
                context,
                format!("weights sum to {total}, expected 1.0"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::ContextId;
    use proptest::prelude::*;

    fn id(raw: i64) -> CriterionId {
        CriterionId::new(raw)
    }

    fn weights(pairs: &[(i64, f64)]) -> WeightMap {
        pairs.iter().map(|(raw, w)| (id(*raw), *w)).collect()
    }

    const GOAL: i64 = 1;
    const A: i64 = 10;
    const B: i64 = 20;

    #[test]
    fn multiplies_local_by_parent_weight() {
        let main = weights(&[(A, 0.6), (B, 0.4)]);
        let subs = BTreeMap::from([
            (id(A), weights(&[(11, 0.5), (12, 0.5)])),
            (id(B), weights(&[(21, 0.25), (22, 0.75)])),
        ]);

        let global = WeightAggregator::default()
            .aggregate_global(id(GOAL), &main, &subs)
            .unwrap();

        assert!((global[&id(11)] - 0.3).abs() < 1e-12);
        assert!((global[&id(12)] - 0.3).abs() < 1e-12);
        assert!((global[&id(21)] - 0.1).abs() < 1e-12);
        assert!((global[&id(22)] - 0.3).abs() < 1e-12);
        let total: f64 = global.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn single_parent_yields_its_subtree_only() {
        let main = weights(&[(A, 0.6), (B, 0.4)]);
        let subs = BTreeMap::from([(id(A), weights(&[(11, 0.5), (12, 0.5)]))]);

        let global = WeightAggregator::default()
            .aggregate_global(id(GOAL), &main, &subs)
            .unwrap();

        assert_eq!(global.len(), 2);
        assert!((global[&id(11)] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn rejects_parent_without_main_weight() {
        let main = weights(&[(A, 1.0)]);
        let subs = BTreeMap::from([(id(B), weights(&[(21, 1.0)]))]);

        let err = WeightAggregator::default()
            .aggregate_global(id(GOAL), &main, &subs)
            .unwrap_err();

        assert_eq!(err.context(), ContextId::Criterion(id(B)));
        assert!(err.to_string().contains("has no main-criteria weight"));
    }

    #[test]
    fn rejects_sub_criterion_under_two_parents() {
        let main = weights(&[(A, 0.5), (B, 0.5)]);
        let subs = BTreeMap::from([
            (id(A), weights(&[(11, 1.0)])),
            (id(B), weights(&[(11, 1.0)])),
        ]);

        let err = WeightAggregator::default()
            .aggregate_global(id(GOAL), &main, &subs)
            .unwrap_err();
        assert!(err.to_string().contains("already weighted under 10"));
    }

    #[test]
    fn rejects_main_weights_not_summing_to_one() {
        let main = weights(&[(A, 0.6), (B, 0.6)]);

        let err = WeightAggregator::default()
            .aggregate_global(id(GOAL), &main, &BTreeMap::new())
            .unwrap_err();

        assert_eq!(err.context(), ContextId::Criterion(id(GOAL)));
        assert!(err.to_string().contains("expected 1.0"));
    }

    #[test]
    fn rejects_non_positive_local_weight() {
        let main = weights(&[(A, 1.0)]);
        let subs = BTreeMap::from([(id(A), weights(&[(11, 1.5), (12, -0.5)]))]);

        let err = WeightAggregator::default()
            .aggregate_global(id(GOAL), &main, &subs)
            .unwrap_err();
        assert!(err.to_string().contains("invalid weight -0.5"));
    }

    #[test]
    fn rejects_empty_main_weights() {
        let err = WeightAggregator::default()
            .aggregate_global(id(GOAL), &WeightMap::new(), &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, AhpError::InvalidInput { .. }));
    }

    fn normalised(raw: Vec<f64>) -> Vec<f64> {
        let total: f64 = raw.iter().sum();
        raw.into_iter().map(|w| w / total).collect()
    }

    proptest! {
        #[test]
        fn global_sub_weights_sum_to_one(
            main_raw in prop::collection::vec(0.1f64..10.0, 1..6),
            sub_raw in prop::collection::vec(prop::collection::vec(0.1f64..10.0, 1..6), 6),
        ) {
            let main_weights: WeightMap = normalised(main_raw)
                .into_iter()
                .enumerate()
                .map(|(i, w)| (id(10 * (i as i64 + 1)), w))
                .collect();
            let subs: BTreeMap<CriterionId, WeightMap> = main_weights
                .keys()
                .zip(sub_raw)
                .map(|(parent, raw)| {
                    let local = normalised(raw)
                        .into_iter()
                        .enumerate()
                        .map(|(j, w)| (id(parent.value() + j as i64 + 1), w))
                        .collect();
                    (*parent, local)
                })
                .collect();

            let global = WeightAggregator::default()
                .aggregate_global(id(GOAL), &main_weights, &subs)
                .unwrap();
            let total: f64 = global.values().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }
    }
}
