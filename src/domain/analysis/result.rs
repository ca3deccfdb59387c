//! Analysis Result - The engine's sole output.

use serde::Serialize;

use super::{
    CompetitiveGaps, ConfidenceMetrics, CriteriaSensitivity, FocalInsights, MarketShares,
    ProductContext, RiskAssessment, ScenarioResult, TippingPoint, UtilityScores, WeightSource,
    WeightVector,
};

/// Everything one analysis call produces.
///
/// Built once by [`super::SensitivityEngine::analyze`] and never mutated.
/// Field names follow the established camelCase wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Effective weights, in criterion order.
    pub weights: WeightVector,
    pub weight_source: WeightSource,
    #[serde(rename = "baseScores")]
    pub utility_scores: UtilityScores,
    #[serde(rename = "optimalChoice")]
    pub leader: String,
    pub market_share: MarketShares,
    pub tipping_points: Vec<TippingPoint>,
    pub risk_assessment: RiskAssessment,
    pub stability_index: f64,
    pub competitive_gaps: CompetitiveGaps,
    pub product_context: ProductContext,
    pub confidence_metrics: ConfidenceMetrics,
    pub criteria_sensitivity: CriteriaSensitivity,
    #[serde(rename = "scenarioAnalysis")]
    pub scenarios: Vec<ScenarioResult>,
    pub focal: FocalInsights,
}

impl AnalysisResult {
    /// Utility score of the leader.
    pub fn leader_score(&self) -> f64 {
        self.utility_scores.get(&self.leader).unwrap_or_default()
    }

    /// Market share of the leader, in percent.
    pub fn leader_share(&self) -> f64 {
        self.market_share.get(&self.leader).unwrap_or_default()
    }

    /// Highest utility score, 0 when empty.
    pub fn max_score(&self) -> f64 {
        self.utility_scores.max_value().unwrap_or_default()
    }
}
