//! Failure-isolating advisory generator.
//!
//! Wraps an optional primary generator. Any primary failure is logged and
//! answered with the template report, so callers always get a report.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::domain::analysis::{AnalysisResult, DecisionMatrix};
use crate::ports::{AdvisoryError, AdvisoryGenerator, AdvisoryReport};

use super::TemplateAdvisoryGenerator;

/// Primary generator with a template fallback.
pub struct ResilientAdvisoryGenerator {
    primary: Option<Arc<dyn AdvisoryGenerator>>,
    fallback: TemplateAdvisoryGenerator,
}

impl ResilientAdvisoryGenerator {
    pub fn new(primary: Arc<dyn AdvisoryGenerator>) -> Self {
        Self {
            primary: Some(primary),
            fallback: TemplateAdvisoryGenerator::new(),
        }
    }

    /// Always uses the template.
    pub fn template_only() -> Self {
        Self {
            primary: None,
            fallback: TemplateAdvisoryGenerator::new(),
        }
    }

    /// Generates a report; never fails.
    pub async fn generate_or_fallback(
        &self,
        matrix: &DecisionMatrix,
        result: &AnalysisResult,
    ) -> AdvisoryReport {
        let Some(primary) = &self.primary else {
            return self.fallback.build(matrix, result);
        };

        match primary.generate(matrix, result).await {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %err, leader = %result.leader, "Advisory generation failed, using template");
                self.fallback.build(matrix, result)
            }
        }
    }
}

#[async_trait]
impl AdvisoryGenerator for ResilientAdvisoryGenerator {
    async fn generate(
        &self,
        matrix: &DecisionMatrix,
        result: &AnalysisResult,
    ) -> Result<AdvisoryReport, AdvisoryError> {
        Ok(self.generate_or_fallback(matrix, result).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::advisory::LlmAdvisoryGenerator;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::analysis::SensitivityEngine;
    use crate::ports::{AIError, AdvisorySource};

    fn fixture() -> (DecisionMatrix, AnalysisResult) {
        let matrix = DecisionMatrix::builder()
            .alternatives(vec!["A", "B"])
            .criteria(vec!["X", "Y"])
            .row(vec![8, 6])
            .row(vec![5, 7])
            .entity("Acme")
            .market("Widgets")
            .build();
        let result = SensitivityEngine::default().analyze(&matrix).unwrap();
        (matrix, result)
    }

    fn llm(provider: MockAIProvider) -> Arc<dyn AdvisoryGenerator> {
        Arc::new(LlmAdvisoryGenerator::new(Arc::new(provider)))
    }

    #[tokio::test]
    async fn uses_primary_when_it_succeeds() {
        let (matrix, result) = fixture();
        let provider = MockAIProvider::new().with_response(
            r#"{"executiveSummary":"a","strategicAdvisory":"b","sensitivityAnalysis":"c","recommendations":["d"]}"#,
        );
        let generator = ResilientAdvisoryGenerator::new(llm(provider));

        let report = generator.generate(&matrix, &result).await.unwrap();
        assert_eq!(report.source, AdvisorySource::Ai);
        assert_eq!(report.executive_summary, "a");
    }

    #[tokio::test]
    async fn falls_back_on_provider_error() {
        let (matrix, result) = fixture();
        let provider = MockAIProvider::new().with_error(AIError::unavailable("down"));
        let generator = ResilientAdvisoryGenerator::new(llm(provider));

        let report = generator.generate(&matrix, &result).await.unwrap();
        assert_eq!(report.source, AdvisorySource::Template);
        assert!(report.executive_summary.starts_with("Acme currently leads with A"));
    }

    #[tokio::test]
    async fn falls_back_on_malformed_reply() {
        let (matrix, result) = fixture();
        let provider = MockAIProvider::new().with_response("not json at all");
        let generator = ResilientAdvisoryGenerator::new(llm(provider));

        let report = generator.generate(&matrix, &result).await.unwrap();
        assert_eq!(report.source, AdvisorySource::Template);
    }

    #[tokio::test]
    async fn template_only_never_calls_a_provider() {
        let (matrix, result) = fixture();
        let report = ResilientAdvisoryGenerator::template_only()
            .generate_or_fallback(&matrix, &result)
            .await;
        assert_eq!(report.source, AdvisorySource::Template);
    }

    #[tokio::test]
    async fn fallback_leaves_result_untouched() {
        let (matrix, result) = fixture();
        let before = result.clone();
        let provider = MockAIProvider::new().with_error(AIError::AuthenticationFailed);
        ResilientAdvisoryGenerator::new(llm(provider))
            .generate_or_fallback(&matrix, &result)
            .await;
        assert_eq!(result, before);
    }
}
