//! Utility Scorer - Weighted scoring of alternatives.

use crate::domain::foundation::{precision, ValidationError};

use super::{AnalysisError, DecisionMatrix, UtilityScores, WeightVector};

/// Weighted-sum scoring functions.
pub struct UtilityScorer;

impl UtilityScorer {
    /// Computes each alternative's utility.
    ///
    /// # Algorithm
    /// For each alternative: score = Σ(payoff[criterion] × weight[criterion]),
    /// rounded to 2 decimals.
    ///
    /// # Errors
    /// - `WeightMismatch` if the weight count differs from the criterion count
    /// - `InvalidMatrix` if a row is missing or has the wrong length
    pub fn compute_scores(
        matrix: &DecisionMatrix,
        weights: &WeightVector,
    ) -> Result<UtilityScores, AnalysisError> {
        if weights.len() != matrix.criterion_count() {
            return Err(AnalysisError::WeightMismatch {
                expected: matrix.criterion_count(),
                actual: weights.len(),
            });
        }

        let mut scores = UtilityScores::new();
        for (i, alternative) in matrix.alternatives.iter().enumerate() {
            let row = matrix.payoffs.get(i).ok_or_else(|| {
                ValidationError::dimension_mismatch(
                    "payoffs",
                    matrix.alternative_count(),
                    matrix.payoffs.len(),
                )
            })?;
            if row.len() != weights.len() {
                return Err(ValidationError::dimension_mismatch(
                    format!("payoffs[{}]", i),
                    weights.len(),
                    row.len(),
                )
                .into());
            }

            let utility: f64 = row
                .iter()
                .zip(weights.values())
                .map(|(&score, weight)| f64::from(score) * weight)
                .sum();
            scores.insert(alternative.clone(), precision::round2(utility));
        }

        Ok(scores)
    }

    /// The alternative with the highest utility; the earliest row wins ties.
    pub fn leader(scores: &UtilityScores) -> Option<&str> {
        scores.argmax()
    }
}
