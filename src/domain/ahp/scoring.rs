//! Alternative Scorer - weighted-sum scoring of alternatives.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AhpError, ContextId, WeightMap};
use crate::domain::foundation::{AlternativeId, CriterionId};

/// Raw scores of alternatives against sub-criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlternativeScores {
    scores: BTreeMap<AlternativeId, BTreeMap<CriterionId, f64>>,
}

impl AlternativeScores {
    /// Creates an empty score sheet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing score sheets.
    pub fn builder() -> AlternativeScoresBuilder {
        AlternativeScoresBuilder::new()
    }

    /// Records one score, replacing any previous value for the cell.
    pub fn insert(&mut self, alternative: AlternativeId, criterion: CriterionId, score: f64) {
        self.scores
            .entry(alternative)
            .or_default()
            .insert(criterion, score);
    }

    /// Gets the score of an alternative against a criterion.
    pub fn get(&self, alternative: &AlternativeId, criterion: &CriterionId) -> Option<f64> {
        self.scores
            .get(alternative)
            .and_then(|row| row.get(criterion))
            .copied()
    }

    /// Returns the scores of one alternative.
    pub fn scores_for(&self, alternative: &AlternativeId) -> Option<&BTreeMap<CriterionId, f64>> {
        self.scores.get(alternative)
    }

    /// Iterates over the alternatives in id order.
    pub fn alternatives(&self) -> impl Iterator<Item = AlternativeId> + '_ {
        self.scores.keys().copied()
    }

    /// Returns the number of alternatives.
    pub fn alternative_count(&self) -> usize {
        self.scores.len()
    }

    /// Returns true if no alternative has been scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Checks that every score is finite and strictly positive.
    pub fn validate(&self) -> Result<(), AhpError> {
        if self.is_empty() {
            return Err(AhpError::invalid_input(
                ContextId::Scoring,
                "no alternatives to score",
            ));
        }

        for (alternative, row) in &self.scores {
            if row.is_empty() {
                return Err(AhpError::invalid_input(
                    ContextId::Scoring,
                    format!("alternative {alternative} has no scores"),
                ));
            }
            if let Some((criterion, score)) =
                row.iter().find(|(_, s)| !s.is_finite() || **s <= 0.0)
            {
                return Err(AhpError::invalid_input(
                    ContextId::Scoring,
                    format!(
                        "alternative {alternative} has invalid score {score} for criterion {criterion}"
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Builder for constructing AlternativeScores instances.
#[derive(Debug, Default)]
pub struct AlternativeScoresBuilder {
    scores: AlternativeScores,
}

impl AlternativeScoresBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one score.
    pub fn score(mut self, alternative: i64, criterion: i64, score: f64) -> Self {
        self.scores.insert(
            AlternativeId::new(alternative),
            CriterionId::new(criterion),
            score,
        );
        self
    }

    /// Adds a full row of scores for one alternative.
    pub fn row(mut self, alternative: i64, scores: &[(i64, f64)]) -> Self {
        for (criterion, score) in scores {
            self.scores.insert(
                AlternativeId::new(alternative),
                CriterionId::new(*criterion),
                *score,
            );
        }
        self
    }

    /// Builds the score sheet.
    pub fn build(self) -> AlternativeScores {
        self.scores
    }
}

/// One alternative's position in the final ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    /// 1-based.
    pub rank: usize,
    pub alternative_id: AlternativeId,
    pub final_score: f64,
}

/// Contribution of one score cell to an alternative's final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgement {
    pub alternative_id: AlternativeId,
    pub criterion_id: CriterionId,
    pub score: f64,
    pub global_weight: f64,
    pub weighted_score: f64,
}

/// Result of scoring a set of alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringOutcome {
    /// Best first.
    pub rankings: Vec<RankedAlternative>,
    /// Ordered by alternative, then criterion.
    pub judgements: Vec<Judgement>,
}

impl ScoringOutcome {
    /// Returns the top-ranked alternative.
    pub fn best(&self) -> Option<&RankedAlternative> {
        self.rankings.first()
    }
}

/// Combines global weights with alternative scores.
///
/// # Algorithm
/// `final(a) = Σ_c score(a, c) × global(c)`, then sort descending.
///
/// # Edge Cases
/// - A scored criterion without a global weight fails the whole operation
/// - An alternative without a score for a weighted criterion fails the whole
///   operation
/// - Equal final scores are ordered by ascending alternative id
pub struct AlternativeScorer;

impl AlternativeScorer {
    pub fn score(
        scores: &AlternativeScores,
        global_weights: &WeightMap,
    ) -> Result<ScoringOutcome, AhpError> {
        scores.validate()?;
        Self::validate_weights(global_weights)?;

        let mut totals = Vec::with_capacity(scores.alternative_count());
        let mut judgements = Vec::new();

        for (alternative, row) in &scores.scores {
            if let Some(unweighted) = row.keys().find(|c| !global_weights.contains_key(*c)) {
                return Err(AhpError::invalid_input(
                    ContextId::Scoring,
                    format!("criterion {unweighted} is scored but has no global weight"),
                ));
            }
            if let Some(unscored) = global_weights.keys().find(|c| !row.contains_key(*c)) {
                return Err(AhpError::invalid_input(
                    ContextId::Scoring,
                    format!("alternative {alternative} has no score for criterion {unscored}"),
                ));
            }

            let mut total = 0.0;
            for (criterion, score) in row {
                let global_weight = global_weights[criterion];
                let weighted_score = score * global_weight;
                total += weighted_score;
                judgements.push(Judgement {
                    alternative_id: *alternative,
                    criterion_id: *criterion,
                    score: *score,
                    global_weight,
                    weighted_score,
                });
            }
            totals.push((*alternative, total));
        }

        totals.sort_by(|(a_id, a_total), (b_id, b_total)| {
            b_total.total_cmp(a_total).then_with(|| a_id.cmp(b_id))
        });

        let rankings = totals
            .into_iter()
            .enumerate()
            .map(|(index, (alternative_id, final_score))| RankedAlternative {
                rank: index + 1,
                alternative_id,
                final_score,
            })
            .collect();

        Ok(ScoringOutcome {
            rankings,
            judgements,
        })
    }

    fn validate_weights(global_weights: &WeightMap) -> Result<(), AhpError> {
        if global_weights.is_empty() {
            return Err(AhpError::invalid_input(
                ContextId::Scoring,
                "no global weights available",
            ));
        }
        if let Some((criterion, weight)) = global_weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(AhpError::invalid_input(
                ContextId::Scoring,
                format!("criterion {criterion} has invalid global weight {weight}"),
            ));
        }
        Ok(())
    }
}
