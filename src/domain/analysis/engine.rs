//! Sensitivity Engine - Runs the full analysis for one decision matrix.
//!
//! # Pipeline
//!
//! 1. Validate the matrix (and optionally the declared score range)
//! 2. Resolve the effective weights (override, domain default, or uniform)
//! 3. Score, pick the leader, estimate market share
//! 4. Tipping points, criteria sensitivity, scenarios
//! 5. Competitive gaps, stability, confidence
//! 6. Focal diagnostics, risk, product context
//!
//! Each call is a pure function of its input. The engine holds only
//! read-only options and is safe to share across threads.

use tracing::debug;

use crate::domain::foundation::ValidationError;

use super::sensitivity::scenario_catalog;
use super::{
    AnalysisError, AnalysisResult, CompetitiveGapAnalyzer, DecisionMatrix, FocalInsightGenerator,
    MarketShareEstimator, ProductContextCatalog, RiskAssessment, ScoreRange, SensitivityExplorer,
    StabilityAssessor, UtilityScorer, WeightSource, WeightVector,
};

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOptions {
    /// Declared payoff bounds.
    pub score_range: ScoreRange,
    /// Reject payoffs outside `score_range` instead of analyzing them as-is.
    pub enforce_score_range: bool,
    /// Rules for product context labelling.
    pub context_catalog: ProductContextCatalog,
}

/// Stateless analysis orchestrator.
#[derive(Debug, Clone, Default)]
pub struct SensitivityEngine {
    options: EngineOptions,
}

impl SensitivityEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Resolves the effective weights for `matrix`.
    ///
    /// An explicit override takes precedence; otherwise the domain defaults
    /// apply when the criteria match them, and uniform weights when not.
    pub fn resolve_weights(
        matrix: &DecisionMatrix,
    ) -> Result<(WeightVector, WeightSource), AnalysisError> {
        match &matrix.weight_override {
            Some(overrides) => Ok((
                WeightVector::from_override(&matrix.criteria, overrides)?,
                WeightSource::Override,
            )),
            None => WeightVector::default_for(&matrix.criteria),
        }
    }

    /// Runs the complete analysis.
    ///
    /// # Errors
    /// - `InvalidMatrix` for malformed shape or labels
    /// - `ScoreOutOfRange` when range enforcement is enabled
    /// - `WeightMismatch`, `UnknownCriterion`, `InvalidWeight` for a bad override
    /// - `ZeroWeightTotal` if a weight vector cannot be renormalized
    pub fn analyze(&self, matrix: &DecisionMatrix) -> Result<AnalysisResult, AnalysisError> {
        matrix.validate()?;
        if self.options.enforce_score_range {
            matrix.check_score_range(self.options.score_range)?;
        }

        let (weights, weight_source) = Self::resolve_weights(matrix)?;
        debug!(
            alternatives = matrix.alternative_count(),
            criteria = matrix.criterion_count(),
            weight_source = ?weight_source,
            weights = ?weights,
            "Resolved effective weights"
        );

        let utility_scores = UtilityScorer::compute_scores(matrix, &weights)?;
        let leader = UtilityScorer::leader(&utility_scores)
            .ok_or_else(|| ValidationError::empty_field("rowLabels"))?
            .to_string();
        let market_share = MarketShareEstimator::estimate(&utility_scores);
        debug!(
            leader = %leader,
            scores = ?utility_scores,
            "Computed baseline utility scores"
        );

        let explorer = SensitivityExplorer::new(matrix, &weights, &utility_scores, &leader);
        let tipping_points = explorer.tipping_points()?;
        let criteria_sensitivity = explorer.criteria_sensitivity()?;
        let scenarios = explorer.scenarios(&scenario_catalog(&matrix.criteria))?;
        debug!(
            tipping_points = tipping_points.len(),
            scenarios = scenarios.len(),
            "Completed sensitivity searches"
        );

        let competitive_gaps = CompetitiveGapAnalyzer::analyze(matrix);
        let stability_index =
            StabilityAssessor::stability_index(&utility_scores, tipping_points.len());
        let confidence_metrics =
            StabilityAssessor::confidence_metrics(matrix, &utility_scores, tipping_points.len());

        let focal = FocalInsightGenerator::generate(
            matrix,
            &utility_scores,
            &market_share,
            self.options.score_range,
        )
        .ok_or_else(|| ValidationError::empty_field("rowLabels"))?;
        if focal.selection.substituted {
            debug!(
                requested = ?focal.selection.requested,
                analyzed = %focal.selection.analyzed,
                "Focal alternative substituted with first row"
            );
        }

        let risk_assessment =
            RiskAssessment::assess(stability_index, tipping_points.len(), &utility_scores);
        let product_context = self
            .options
            .context_catalog
            .detect(matrix, &focal.selection.analyzed);

        debug!(
            stability_index,
            risk_level = ?risk_assessment.level,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            weights,
            weight_source,
            utility_scores,
            leader,
            market_share,
            tipping_points,
            risk_assessment,
            stability_index,
            competitive_gaps,
            product_context,
            confidence_metrics,
            criteria_sensitivity,
            scenarios,
            focal,
        })
    }
}
