//! Stability & Confidence Assessor - Robustness scores for the baseline ranking.

use serde::Serialize;

use crate::domain::foundation::precision;

use super::{DecisionMatrix, UtilityScores};

/// Stability reported when fewer than two alternatives leave no margin to measure.
const SINGLE_ALTERNATIVE_STABILITY: f64 = 0.5;

/// Prediction accuracy reported when fewer than two alternatives exist.
const SINGLE_ALTERNATIVE_ACCURACY: f64 = 75.0;

/// Confidence bundle, each component in [0, 100], 1 decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceMetrics {
    pub overall: f64,
    pub data_quality: f64,
    pub model_reliability: f64,
    pub market_stability: f64,
    pub prediction_accuracy: f64,
}

/// Derives the stability index and confidence metrics.
pub struct StabilityAssessor;

impl StabilityAssessor {
    /// Stability of the baseline leader in [0, 1], 3 decimals.
    ///
    /// # Algorithm
    /// 1. No tipping points: 1.0
    /// 2. Fewer than two alternatives: 0.5
    /// 3. Otherwise: min(1, margin / 10) × max(0.1, 1 − 0.1 × tipping_points)
    pub fn stability_index(scores: &UtilityScores, tipping_point_count: usize) -> f64 {
        if tipping_point_count == 0 {
            return 1.0;
        }

        let Some(margin) = scores.top_margin() else {
            return SINGLE_ALTERNATIVE_STABILITY;
        };

        let margin_stability = (margin / 10.0).min(1.0);
        let vulnerability = (1.0 - 0.1 * tipping_point_count as f64).max(0.1);
        precision::round3(margin_stability * vulnerability)
    }

    /// Computes the confidence bundle.
    ///
    /// `overall` is 0.25 × data quality + 0.20 × model reliability
    /// + 0.30 × market stability + 0.25 × prediction accuracy.
    pub fn confidence_metrics(
        matrix: &DecisionMatrix,
        scores: &UtilityScores,
        tipping_point_count: usize,
    ) -> ConfidenceMetrics {
        let size = (matrix.alternative_count() * matrix.criterion_count()) as f64;

        let data_quality = (60.0 + (payoff_variance(matrix) / 10.0) * 40.0).min(100.0);
        let model_reliability = (50.0 + size * 2.0).min(100.0);
        let market_stability = (100.0 - 15.0 * tipping_point_count as f64).max(20.0);
        let prediction_accuracy = match scores.top_margin() {
            Some(margin) => (50.0 + 10.0 * margin).min(100.0),
            None => SINGLE_ALTERNATIVE_ACCURACY,
        };

        let overall = 0.25 * data_quality
            + 0.20 * model_reliability
            + 0.30 * market_stability
            + 0.25 * prediction_accuracy;

        ConfidenceMetrics {
            overall: precision::round1(overall),
            data_quality: precision::round1(data_quality),
            model_reliability: precision::round1(model_reliability),
            market_stability: precision::round1(market_stability),
            prediction_accuracy: precision::round1(prediction_accuracy),
        }
    }
}

/// Population variance of every payoff entry; 0 for an empty matrix.
fn payoff_variance(matrix: &DecisionMatrix) -> f64 {
    let values: Vec<f64> = matrix.all_scores().map(f64::from).collect();
    if values.is_empty() {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
