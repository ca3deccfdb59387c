//! Template-based advisory generator.
//!
//! Builds the report from fixed sentence templates filled with analysis
//! figures. Needs no external service and never fails, which makes it the
//! fallback for every other generator.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::analysis::{AnalysisResult, DecisionMatrix};
use crate::ports::{AdvisoryError, AdvisoryGenerator, AdvisoryReport, AdvisorySource};

/// Reasoning score the template reports for itself.
const TEMPLATE_REASONING_SCORE: f64 = 80.0;

/// How many criteria the sensitivity paragraph names.
const CRITICAL_FACTOR_COUNT: usize = 3;

/// Deterministic implementation of AdvisoryGenerator.
#[derive(Debug, Clone, Default)]
pub struct TemplateAdvisoryGenerator;

impl TemplateAdvisoryGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Builds the report synchronously.
    pub fn build(&self, matrix: &DecisionMatrix, result: &AnalysisResult) -> AdvisoryReport {
        let entity = if matrix.entity_name.trim().is_empty() {
            "Your company"
        } else {
            matrix.entity_name.as_str()
        };

        let executive_summary = format!(
            "{} currently leads with {}, holding {:.1}% predicted market share. Stability index: {:.3}.",
            entity,
            result.leader,
            result.leader_share(),
            result.stability_index
        );

        let strategic_advisory = format!(
            "Focus on strengthening competitive advantages in key criteria. {} sensitivity points identified that could shift market dynamics.",
            result.tipping_points.len()
        );

        let critical_factors = matrix
            .criteria
            .iter()
            .take(CRITICAL_FACTOR_COUNT)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let sensitivity_analysis = format!(
            "Market position shows {} risk. Critical factors: {}. Monitor competitor moves in these areas.",
            result.risk_assessment.level, critical_factors
        );

        let mut recommendations = Vec::with_capacity(5);
        if let Some(weakest) = Self::weakest_criterion(matrix, &result.focal.selection.analyzed) {
            recommendations.push(format!(
                "Strengthen performance in lowest-scoring criteria: {}",
                weakest
            ));
        }
        recommendations.extend(
            [
                "Monitor competitor improvements that could trigger market shifts",
                "Invest in criteria with highest consumer weight sensitivity",
                "Develop contingency plans for identified tipping points",
                "Regular market research to track consumer preference changes",
            ]
            .iter()
            .map(|r| r.to_string()),
        );

        AdvisoryReport {
            executive_summary,
            strategic_advisory,
            sensitivity_analysis,
            recommendations,
            self_reported_game_value: result.max_score(),
            internal_reasoning_score: TEMPLATE_REASONING_SCORE,
            source: AdvisorySource::Template,
            generated_at: Utc::now(),
        }
    }

    /// The focal alternative's lowest-scoring criterion; earliest column wins ties.
    fn weakest_criterion<'a>(matrix: &'a DecisionMatrix, focal: &str) -> Option<&'a str> {
        let row = matrix.alternative_index(focal)?;
        let mut weakest: Option<(usize, i32)> = None;
        for j in 0..matrix.criterion_count() {
            let score = matrix.score(row, j)?;
            if weakest.map_or(true, |(_, lowest)| score < lowest) {
                weakest = Some((j, score));
            }
        }
        weakest.and_then(|(j, _)| matrix.criteria.get(j).map(String::as_str))
    }
}

#[async_trait]
impl AdvisoryGenerator for TemplateAdvisoryGenerator {
    async fn generate(
        &self,
        matrix: &DecisionMatrix,
        result: &AnalysisResult,
    ) -> Result<AdvisoryReport, AdvisoryError> {
        Ok(self.build(matrix, result))
    }
}
