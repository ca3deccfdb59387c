//! Analysis Module - Multi-criteria sensitivity analysis engine.
//!
//! Scores alternatives against weighted criteria, estimates market share,
//! and measures how far the weights must move before the leader changes.
//!
//! # Components
//!
//! - `DecisionMatrix` - Alternatives × criteria payoff table
//! - `WeightVector` - Normalized criterion weights with perturb-and-renormalize
//! - `UtilityScorer` / `MarketShareEstimator` - Baseline ranking and softmax shares
//! - `SensitivityExplorer` - Tipping points, criteria sensitivity, scenarios
//! - `StabilityAssessor` - Stability index and confidence metrics
//! - `CompetitiveGapAnalyzer` - Pairwise average gaps
//! - `FocalInsightGenerator` - Strengths, weaknesses, investments, position
//! - `SensitivityEngine` - Orchestrates the above into an `AnalysisResult`
//!
//! # Design Philosophy
//!
//! All functions are pure and stateless. No ports or adapters are needed
//! since there's no I/O; the engine only emits `tracing` events.

mod competitive_gaps;
mod context;
mod decision_matrix;
mod engine;
mod errors;
mod focal_insights;
mod labeled_values;
mod market_share;
mod result;
mod risk;
mod sensitivity;
mod stability;
mod utility_scorer;
mod weights;

pub use competitive_gaps::{CompetitiveGapAnalyzer, CompetitiveGaps};
pub use context::{ProductContext, ProductContextCatalog, ProductContextRule};
pub use decision_matrix::{DecisionMatrix, DecisionMatrixBuilder, ScoreRange};
pub use engine::{EngineOptions, SensitivityEngine};
pub use errors::AnalysisError;
pub use focal_insights::{
    FocalInsightGenerator, FocalInsights, FocalPositionSummary, FocalSelection, InvestmentArea,
    InvestmentPriority, MarketPosition, StrengthArea, WeaknessArea,
};
pub use labeled_values::{CriteriaSensitivity, LabeledValues, MarketShares, UtilityScores};
pub use market_share::MarketShareEstimator;
pub use result::AnalysisResult;
pub use risk::{RiskAssessment, RiskLevel};
pub use sensitivity::{
    scenario_catalog, ScenarioResult, ScenarioSpec, SensitivityExplorer, TippingPoint,
    SCENARIO_BOOSTS, SENSITIVITY_DELTAS, TIPPING_POINT_DELTAS,
};
pub use stability::{ConfidenceMetrics, StabilityAssessor};
pub use utility_scorer::UtilityScorer;
pub use weights::{
    CriterionWeight, Perturbation, WeightBounds, WeightSource, WeightVector, DOMAIN_CRITERIA,
    DOMAIN_WEIGHTS, PERTURBATION_BOUNDS,
};
