//! Priority Vector Solver - local weights from the principal eigenvector.

use std::collections::BTreeMap;

use super::{AhpError, ComparisonMatrix};
use crate::domain::foundation::CriterionId;

/// Weight per criterion, ordered by id.
pub type WeightMap = BTreeMap<CriterionId, f64>;

/// Derives local weights from a comparison matrix.
///
/// # Algorithm
/// 1. N = 1: the single criterion gets weight 1.0
/// 2. Otherwise take the eigenvector of the eigenvalue with the largest real part
/// 3. Divide by its sum; this also fixes the arbitrary sign of the vector
/// 4. Map each weight back to the criterion at the same position
///
/// # Edge Cases
/// - A zero or non-finite normalisation sum is a computation fault
/// - Any resulting weight that is not finite and strictly positive is a
///   computation fault; weights are never replaced with uniform ones
pub struct PriorityVectorSolver;

impl PriorityVectorSolver {
    pub fn solve(matrix: &ComparisonMatrix) -> Result<WeightMap, AhpError> {
        if matrix.order() == 1 {
            return Ok(matrix.ids().iter().map(|id| (*id, 1.0)).collect());
        }

        let eigenvector = matrix.principal_eigenpair()?.vector;
        let sum: f64 = eigenvector.iter().sum();
        if !sum.is_finite() || sum.abs() <= f64::EPSILON {
            return Err(AhpError::computation_fault(
                matrix.context(),
                format!("eigenvector sum {sum} cannot be normalised"),
            ));
        }

        let mut weights = WeightMap::new();
        for (id, component) in matrix.ids().iter().zip(eigenvector) {
            let weight = component / sum;
            if !weight.is_finite() || weight <= 0.0 {
                return Err(AhpError::computation_fault(
                    matrix.context(),
                    format!("criterion {id} received weight {weight}"),
                ));
            }
            weights.insert(*id, weight);
        }

        Ok(weights)
    }
}
