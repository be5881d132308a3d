//! Hierarchy Evaluator - one preference submission → gated hierarchy weights.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AhpError, AhpProcessor, ConsistencyReport, Ranking, WeightAggregator, WeightMap};
use crate::domain::foundation::CriterionId;
use crate::domain::hierarchy::CriteriaHierarchy;

/// A user's rankings for one match.
///
/// `main` ranks the children of the goal; each `sub` entry ranks the
/// children of the main criterion used as its key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSet {
    pub main: Vec<CriterionId>,
    #[serde(default)]
    pub sub: BTreeMap<CriterionId, Vec<CriterionId>>,
}

/// Weights derived from one preference submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyWeights {
    /// Local weights of the main criteria, equal to their global weights.
    pub main: WeightMap,
    /// Local weights of sub-criteria, keyed by their main criterion.
    pub local: BTreeMap<CriterionId, WeightMap>,
    /// Global weights of sub-criteria.
    pub global: WeightMap,
    /// Consistency report per ranked context.
    pub consistency: BTreeMap<CriterionId, ConsistencyReport>,
}

impl HierarchyWeights {
    /// Returns the global weight of any main or sub-criterion.
    pub fn global_weight(&self, id: &CriterionId) -> Option<f64> {
        self.global.get(id).or_else(|| self.main.get(id)).copied()
    }

    /// Returns the highest consistency ratio across all contexts.
    pub fn worst_ratio(&self) -> f64 {
        self.consistency
            .values()
            .map(|report| report.ratio)
            .fold(0.0, f64::max)
    }
}

/// Evaluates a full preference submission against a hierarchy.
///
/// # Algorithm
/// 1. Rank the main criteria under the goal and gate the ratio
/// 2. Rank the sub-criteria of every main criterion and gate each ratio
/// 3. Aggregate into global sub-criterion weights, which sum to 1.0
///
/// # Edge Cases
/// - Any context failing validation or the gate fails the whole submission
/// - A main criterion without a sub-ranking, or with an empty one, is
///   invalid input
/// - A sub-ranking keyed by a criterion that is not a ranked main criterion
///   is invalid input
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyEvaluator {
    processor: AhpProcessor,
}

impl HierarchyEvaluator {
    pub fn new(processor: AhpProcessor) -> Self {
        Self { processor }
    }

    pub fn evaluate(
        &self,
        hierarchy: &CriteriaHierarchy,
        preferences: &PreferenceSet,
    ) -> Result<HierarchyWeights, AhpError> {
        let goal = hierarchy.goal_id();
        let mut consistency = BTreeMap::new();

        let main_ranking = Ranking::new(goal, preferences.main.clone())?;
        main_ranking.validate_against(hierarchy)?;
        let main = self.processor.build_and_score(&main_ranking)?;
        consistency.insert(goal, main.consistency);

        if let Some(stranger) = preferences
            .sub
            .keys()
            .find(|parent| main.weight_of(parent).is_none())
        {
            return Err(AhpError::invalid_input(
                *stranger,
                format!("criterion {stranger} is not a main criterion"),
            ));
        }

        let mut local = BTreeMap::new();
        for parent in hierarchy.main_criteria() {
            let items = preferences
                .sub
                .get(parent)
                .filter(|items| !items.is_empty())
                .ok_or_else(|| {
                    AhpError::invalid_input(
                        *parent,
                        format!("criterion {parent} has no sub-criteria ranking"),
                    )
                })?;

            let ranking = Ranking::new(*parent, items.clone())?;
            ranking.validate_against(hierarchy)?;
            let scored = self.processor.build_and_score(&ranking)?;
            consistency.insert(*parent, scored.consistency);
            local.insert(*parent, scored.weights);
        }

        let global = WeightAggregator::new(self.processor.tolerance()).aggregate_global(
            goal,
            &main.weights,
            &local,
        )?;

        Ok(HierarchyWeights {
            main: main.weights,
            local,
            global,
            consistency,
        })
    }
}
