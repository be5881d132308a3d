//! Comparison Matrix - reciprocal pairwise judgements derived from a ranking.
//!
//! The matrix also owns the eigen-decomposition shared by the priority
//! vector solver and the consistency checker.

use nalgebra::linalg::{Schur, SVD};
use nalgebra::{Complex, DMatrix};

use super::{AhpError, Ranking};
use crate::domain::foundation::CriterionId;

/// Upper bound of the Saaty importance scale.
pub const MAX_IMPORTANCE: f64 = 9.0;

/// Iteration cap for the Schur and SVD decompositions.
const DECOMPOSITION_MAX_ITERATIONS: usize = 10_000;

/// Tolerance for the reciprocity and unit diagonal checks on supplied judgements.
const JUDGEMENT_TOLERANCE: f64 = 1e-9;

/// Maps a rank distance to a Saaty importance: 1 → 3, 2 → 5, 3 → 7, ≥4 → 9.
///
/// This is a simplified, fixed scale; it is not derived from pairwise surveys.
pub fn rank_distance_importance(distance: usize) -> f64 {
    distance
        .saturating_mul(2)
        .saturating_add(1)
        .min(MAX_IMPORTANCE as usize) as f64
}

/// The eigenvalue with the largest real part and its real eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct PrincipalEigenpair {
    pub value: f64,
    /// Unnormalised; the sign is arbitrary.
    pub vector: Vec<f64>,
}

/// N×N positive reciprocal matrix with unit diagonal.
///
/// Row and column `i` refer to `ids()[i]`. When built from a ranking, index
/// order equals rank order, so `get(i, j) > 1` for every `i < j`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonMatrix {
    context: CriterionId,
    ids: Vec<CriterionId>,
    /// Row-major.
    values: Vec<f64>,
}

impl ComparisonMatrix {
    /// Builds the comparison matrix for a ranking.
    ///
    /// # Algorithm
    /// For every pair `i < j` in rank order:
    /// `importance = min(1 + 2·(j - i), 9)`, `m[i][j] = importance`,
    /// `m[j][i] = 1 / importance`. The diagonal is 1.
    pub fn from_ranking(ranking: &Ranking) -> Self {
        let n = ranking.len();
        let mut values = vec![1.0; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let importance = rank_distance_importance(j - i);
                values[i * n + j] = importance;
                values[j * n + i] = 1.0 / importance;
            }
        }

        Self {
            context: ranking.context(),
            ids: ranking.items().to_vec(),
            values,
        }
    }

    /// Builds a matrix from explicit pairwise judgements.
    ///
    /// Rows must form a square reciprocal matrix over `ids` with unit
    /// diagonal and entries on the Saaty scale `[1/9, 9]`.
    pub fn from_judgements(
        context: CriterionId,
        ids: Vec<CriterionId>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, AhpError> {
        let ids = Ranking::new(context, ids)?.items().to_vec();
        let n = ids.len();

        if rows.len() != n || rows.iter().any(|row| row.len() != n) {
            return Err(AhpError::invalid_input(
                context,
                format!("judgement matrix must be {n}x{n}"),
            ));
        }

        let min_importance = 1.0 / MAX_IMPORTANCE - JUDGEMENT_TOLERANCE;
        let max_importance = MAX_IMPORTANCE + JUDGEMENT_TOLERANCE;
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < min_importance || value > max_importance {
                    return Err(AhpError::invalid_input(
                        context,
                        format!("judgement [{i}][{j}] = {value} is outside the 1/9..9 scale"),
                    ));
                }
                if i == j && (value - 1.0).abs() > JUDGEMENT_TOLERANCE {
                    return Err(AhpError::invalid_input(
                        context,
                        format!("diagonal judgement [{i}][{i}] must be 1, got {value}"),
                    ));
                }
                if (value * rows[j][i] - 1.0).abs() > JUDGEMENT_TOLERANCE {
                    return Err(AhpError::invalid_input(
                        context,
                        format!("judgements [{i}][{j}] and [{j}][{i}] are not reciprocal"),
                    ));
                }
            }
        }

        Ok(Self {
            context,
            ids,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Returns the criterion whose children the matrix compares.
    pub fn context(&self) -> CriterionId {
        self.context
    }

    /// Returns the compared criteria in row order.
    pub fn ids(&self) -> &[CriterionId] {
        &self.ids
    }

    /// Returns N.
    pub fn order(&self) -> usize {
        self.ids.len()
    }

    /// Returns the entry at row `i`, column `j`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let n = self.order();
        assert!(i < n && j < n, "index ({i}, {j}) out of bounds for order {n}");
        self.values[i * n + j]
    }

    /// Returns row `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.order();
        &self.values[i * n..(i + 1) * n]
    }

    /// Checks `m[i][j] · m[j][i] = 1` and a unit diagonal within `tolerance`.
    pub fn is_reciprocal(&self, tolerance: f64) -> bool {
        let n = self.order();
        (0..n).all(|i| {
            (self.get(i, i) - 1.0).abs() <= tolerance
                && (0..n).all(|j| (self.get(i, j) * self.get(j, i) - 1.0).abs() <= tolerance)
        })
    }

    fn to_dmatrix(&self) -> DMatrix<f64> {
        let n = self.order();
        DMatrix::from_row_slice(n, n, &self.values)
    }

    /// Computes all eigenvalues.
    ///
    /// Roundoff can leave small imaginary parts even where the exact
    /// eigenvalue is real, so the result is complex.
    pub fn eigenvalues(&self) -> Result<Vec<Complex<f64>>, AhpError> {
        let schur = Schur::try_new(
            self.to_dmatrix(),
            f64::EPSILON,
            DECOMPOSITION_MAX_ITERATIONS,
        )
        .ok_or_else(|| {
            AhpError::computation_fault(self.context, "Schur decomposition did not converge")
        })?;

        Ok(schur.complex_eigenvalues().iter().copied().collect())
    }

    /// Returns the largest real part among the eigenvalues (`lambda_max`).
    pub fn principal_eigenvalue(&self) -> Result<f64, AhpError> {
        let lambda_max = self
            .eigenvalues()?
            .iter()
            .map(|eigenvalue| eigenvalue.re)
            .fold(f64::NEG_INFINITY, f64::max);

        if !lambda_max.is_finite() {
            return Err(AhpError::computation_fault(
                self.context,
                format!("principal eigenvalue is not finite ({lambda_max})"),
            ));
        }
        Ok(lambda_max)
    }

    /// Computes the principal eigenpair.
    ///
    /// The eigenvector is the null space of `A - lambda_max·I`, read off the
    /// right singular vector with the smallest singular value.
    pub fn principal_eigenpair(&self) -> Result<PrincipalEigenpair, AhpError> {
        let n = self.order();
        let value = self.principal_eigenvalue()?;
        let shifted = self.to_dmatrix() - DMatrix::<f64>::identity(n, n) * value;

        let svd = SVD::try_new(
            shifted,
            false,
            true,
            f64::EPSILON,
            DECOMPOSITION_MAX_ITERATIONS,
        )
        .ok_or_else(|| AhpError::computation_fault(self.context, "SVD did not converge"))?;

        let v_t = svd.v_t.as_ref().ok_or_else(|| {
            AhpError::computation_fault(self.context, "SVD returned no right singular vectors")
        })?;
        let (null_index, _) = svd
            .singular_values
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .ok_or_else(|| AhpError::computation_fault(self.context, "empty spectrum"))?;

        Ok(PrincipalEigenpair {
            value,
            vector: v_t.row(null_index).iter().copied().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ranking(raw: &[i64]) -> Ranking {
        Ranking::new(
            CriterionId::new(1),
            raw.iter().copied().map(CriterionId::new).collect(),
        )
        .unwrap()
    }

    #[test]
    fn importance_follows_simplified_saaty_scale() {
        assert_eq!(rank_distance_importance(0), 1.0);
        assert_eq!(rank_distance_importance(1), 3.0);
        assert_eq!(rank_distance_importance(2), 5.0);
        assert_eq!(rank_distance_importance(3), 7.0);
        assert_eq!(rank_distance_importance(4), 9.0);
        assert_eq!(rank_distance_importance(12), 9.0);
        assert_eq!(rank_distance_importance(usize::MAX), 9.0);
    }

    #[test]
    fn three_item_ranking_builds_expected_matrix() {
        let matrix = ComparisonMatrix::from_ranking(&ranking(&[30, 10, 20]));

        assert_eq!(matrix.order(), 3);
        assert_eq!(
            matrix.ids(),
            &[CriterionId::new(30), CriterionId::new(10), CriterionId::new(20)]
        );
        assert_eq!(matrix.row(0), &[1.0, 3.0, 5.0]);
        assert_eq!(matrix.get(1, 2), 3.0);
        assert_eq!(matrix.get(2, 0), 1.0 / 5.0);
        assert_eq!(matrix.get(2, 1), 1.0 / 3.0);
    }

    #[test]
    fn single_item_matrix_is_identity() {
        let matrix = ComparisonMatrix::from_ranking(&ranking(&[5]));
        assert_eq!(matrix.order(), 1);
        assert_eq!(matrix.get(0, 0), 1.0);
    }

    #[test]
    fn importance_is_capped_at_nine() {
        let matrix = ComparisonMatrix::from_ranking(&ranking(&[1, 2, 3, 4, 5, 6]));
        assert_eq!(matrix.get(0, 4), 9.0);
        assert_eq!(matrix.get(0, 5), 9.0);
        assert_eq!(matrix.get(5, 0), 1.0 / 9.0);
    }

    #[test]
    fn same_ranking_yields_same_matrix() {
        let a = ComparisonMatrix::from_ranking(&ranking(&[4, 2, 9, 7]));
        let b = ComparisonMatrix::from_ranking(&ranking(&[4, 2, 9, 7]));
        assert_eq!(a, b);
    }

    #[test]
    fn consistent_two_by_two_has_lambda_equal_to_order() {
        let matrix = ComparisonMatrix::from_ranking(&ranking(&[1, 2]));
        let lambda = matrix.principal_eigenvalue().unwrap();
        assert!((lambda - 2.0).abs() < 1e-9, "lambda = {lambda}");
    }

    #[test]
    fn three_item_lambda_max_matches_reference() {
        let matrix = ComparisonMatrix::from_ranking(&ranking(&[1, 2, 3]));
        let lambda = matrix.principal_eigenvalue().unwrap();
        assert!((lambda - 3.0385).abs() < 1e-3, "lambda = {lambda}");
    }

    #[test]
    fn principal_eigenvector_has_uniform_sign() {
        let matrix = ComparisonMatrix::from_ranking(&ranking(&[1, 2, 3, 4, 5]));
        let pair = matrix.principal_eigenpair().unwrap();

        assert_eq!(pair.vector.len(), 5);
        let positive = pair.vector.iter().all(|v| *v > 0.0);
        let negative = pair.vector.iter().all(|v| *v < 0.0);
        assert!(positive || negative, "mixed signs: {:?}", pair.vector);
    }

    #[test]
    fn from_judgements_accepts_valid_matrix() {
        let matrix = ComparisonMatrix::from_judgements(
            CriterionId::new(1),
            vec![CriterionId::new(2), CriterionId::new(3)],
            vec![vec![1.0, 4.0], vec![0.25, 1.0]],
        )
        .unwrap();

        assert_eq!(matrix.get(0, 1), 4.0);
        assert!(matrix.is_reciprocal(1e-12));
    }

    #[test]
    fn from_judgements_rejects_non_square_rows() {
        let err = ComparisonMatrix::from_judgements(
            CriterionId::new(1),
            vec![CriterionId::new(2), CriterionId::new(3)],
            vec![vec![1.0, 4.0]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be 2x2"));
    }

    #[test]
    fn from_judgements_rejects_non_reciprocal_pair() {
        let err = ComparisonMatrix::from_judgements(
            CriterionId::new(1),
            vec![CriterionId::new(2), CriterionId::new(3)],
            vec![vec![1.0, 4.0], vec![0.5, 1.0]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("not reciprocal"));
    }

    #[test]
    fn from_judgements_rejects_values_off_scale() {
        let err = ComparisonMatrix::from_judgements(
            CriterionId::new(1),
            vec![CriterionId::new(2), CriterionId::new(3)],
            vec![vec![1.0, 12.0], vec![1.0 / 12.0, 1.0]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("outside the 1/9..9 scale"));
    }

    #[test]
    fn from_judgements_rejects_bad_diagonal() {
        let err = ComparisonMatrix::from_judgements(
            CriterionId::new(1),
            vec![CriterionId::new(2)],
            vec![vec![2.0]],
        )
        .unwrap_err();
        assert!(matches!(err, AhpError::InvalidInput { .. }));
    }

    #[test]
    fn from_judgements_rejects_duplicate_ids() {
        let err = ComparisonMatrix::from_judgements(
            CriterionId::new(1),
            vec![CriterionId::new(2), CriterionId::new(2)],
            vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("appears more than once"));
    }

    proptest! {
        #[test]
        fn ranking_matrix_is_reciprocal_with_unit_diagonal(n in 1usize..=15) {
            let items: Vec<i64> = (100..100 + n as i64).collect();
            let matrix = ComparisonMatrix::from_ranking(&ranking(&items));

            for i in 0..n {
                prop_assert_eq!(matrix.get(i, i), 1.0);
                for j in 0..n {
                    prop_assert!((matrix.get(i, j) - 1.0 / matrix.get(j, i)).abs() < 1e-12);
                    prop_assert!(matrix.get(i, j) > 0.0);
                }
            }
        }
    }
}
