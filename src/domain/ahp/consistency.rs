//! Consistency Checker - Saaty consistency ratio of a comparison matrix.

use serde::{Deserialize, Serialize};

use super::{AhpError, ComparisonMatrix};

/// Saaty random consistency index for N = 1..=15.
pub const RANDOM_INDEX: [f64; 15] = [
    0.0, 0.0, 0.52, 0.89, 1.11, 1.25, 1.35, 1.40, 1.45, 1.49, 1.51, 1.54, 1.56, 1.57, 1.58,
];

/// Returns the random index for a matrix of the given order.
///
/// Orders beyond the table reuse its last entry.
pub fn random_index(order: usize) -> f64 {
    match order {
        0 => 0.0,
        n => RANDOM_INDEX[n.min(RANDOM_INDEX.len()) - 1],
    }
}

/// Outcome of a consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub order: usize,
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub random_index: f64,
    /// Consistency ratio, `CI / RI`.
    pub ratio: f64,
}

impl ConsistencyReport {
    /// Report for matrices of order ≤ 2, which are always consistent.
    pub fn trivial(order: usize) -> Self {
        Self {
            order,
            lambda_max: order as f64,
            consistency_index: 0.0,
            random_index: random_index(order),
            ratio: 0.0,
        }
    }

    /// Returns true if the ratio does not exceed `threshold`.
    pub fn is_acceptable(&self, threshold: f64) -> bool {
        self.ratio <= threshold
    }
}

/// Computes consistency ratios.
///
/// # Algorithm
/// - N ≤ 2: ratio 0
/// - `lambda_max` = largest real part among the eigenvalues
/// - `CI = (lambda_max - N) / (N - 1)`
/// - `CR = CI / RI(N)`
///
/// # Edge Cases
/// - Roundoff can push `lambda_max` a hair below N for a perfectly
///   consistent matrix; the resulting negative ratio is reported as 0
/// - A non-finite ratio is a computation fault
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    pub fn check(matrix: &ComparisonMatrix) -> Result<ConsistencyReport, AhpError> {
        let n = matrix.order();
        if n <= 2 {
            return Ok(ConsistencyReport::trivial(n));
        }

        let lambda_max = matrix.principal_eigenvalue()?;
        let consistency_index = (lambda_max - n as f64) / (n as f64 - 1.0);
        let random_index = random_index(n);
        let ratio = if random_index == 0.0 {
            0.0
        } else {
            (consistency_index / random_index).max(0.0)
        };

        if !ratio.is_finite() {
            return Err(AhpError::computation_fault(
                matrix.context(),
                format!("consistency ratio is not finite ({ratio})"),
            ));
        }

        Ok(ConsistencyReport {
            order: n,
            lambda_max,
            consistency_index,
            random_index,
            ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::Ranking;
    use crate::domain::foundation::CriterionId;

    fn matrix_of_order(n: i64) -> ComparisonMatrix {
        let ranking = Ranking::new(
            CriterionId::new(0),
            (1..=n).map(CriterionId::new).collect(),
        )
        .unwrap();
        ComparisonMatrix::from_ranking(&ranking)
    }

    // ══════════════════════════════════════════════════════════════
    // Random Index Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn random_index_follows_table() {
        assert_eq!(random_index(1), 0.0);
        assert_eq!(random_index(2), 0.0);
        assert_eq!(random_index(3), 0.52);
        assert_eq!(random_index(9), 1.45);
        assert_eq!(random_index(15), 1.58);
    }

    #[test]
    fn random_index_saturates_beyond_table() {
        assert_eq!(random_index(16), 1.58);
        assert_eq!(random_index(40), 1.58);
    }

    // ══════════════════════════════════════════════════════════════
    // Ratio Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn small_matrices_are_always_consistent() {
        for n in 1..=2 {
            let report = ConsistencyChecker::check(&matrix_of_order(n)).unwrap();
            assert_eq!(report.ratio, 0.0);
            assert!(report.is_acceptable(0.1));
        }
    }

    #[test]
    fn three_item_ranking_ratio_matches_reference() {
        let report = ConsistencyChecker::check(&matrix_of_order(3)).unwrap();

        assert_eq!(report.order, 3);
        assert!((report.lambda_max - 3.0385).abs() < 1e-3);
        assert!((report.ratio - 0.0370).abs() < 1e-3);
    }

    #[test]
    fn seven_item_ranking_is_accepted() {
        let report = ConsistencyChecker::check(&matrix_of_order(7)).unwrap();

        assert!((report.ratio - 0.0961).abs() < 1e-3, "ratio = {}", report.ratio);
        assert!(report.is_acceptable(0.1));
    }

    #[test]
    fn eight_item_ranking_is_rejected() {
        let report = ConsistencyChecker::check(&matrix_of_order(8)).unwrap();

        assert!((report.ratio - 0.1214).abs() < 1e-3, "ratio = {}", report.ratio);
        assert!(!report.is_acceptable(0.1));
    }

    #[test]
    fn ratio_grows_with_order() {
        let ratios: Vec<f64> = (3..=9)
            .map(|n| ConsistencyChecker::check(&matrix_of_order(n)).unwrap().ratio)
            .collect();
        assert!(ratios.windows(2).all(|pair| pair[0] < pair[1]), "{ratios:?}");
    }

    #[test]
    fn perfectly_consistent_judgements_have_zero_ratio() {
        // w = (4, 2, 1): m[i][j] = w[i] / w[j]
        let matrix = ComparisonMatrix::from_judgements(
            CriterionId::new(0),
            vec![CriterionId::new(1), CriterionId::new(2), CriterionId::new(3)],
            vec![
                vec![1.0, 2.0, 4.0],
                vec![0.5, 1.0, 2.0],
                vec![0.25, 0.5, 1.0],
            ],
        )
        .unwrap();

        let report = ConsistencyChecker::check(&matrix).unwrap();
        assert!(report.ratio < 1e-9);
        assert!((report.lambda_max - 3.0).abs() < 1e-9);
    }

    #[test]
    fn contradictory_judgements_are_flagged() {
        // 1 > 2 and 2 > 3 strongly, yet 3 > 1 strongly.
        let matrix = ComparisonMatrix::from_judgements(
            CriterionId::new(0),
            vec![CriterionId::new(1), CriterionId::new(2), CriterionId::new(3)],
            vec![
                vec![1.0, 5.0, 1.0 / 5.0],
                vec![1.0 / 5.0, 1.0, 5.0],
                vec![5.0, 1.0 / 5.0, 1.0],
            ],
        )
        .unwrap();

        let report = ConsistencyChecker::check(&matrix).unwrap();
        assert!(!report.is_acceptable(0.1), "ratio = {}", report.ratio);
    }
}
