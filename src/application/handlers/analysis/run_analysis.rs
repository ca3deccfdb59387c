//! RunAnalysisHandler - Command handler for one sensitivity analysis.
//!
//! Runs the engine, then asks the advisory generator for a narrative.
//! The advisory step is isolated: its failure leaves the computed result
//! intact and is reported as a missing advisory.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::analysis::{AnalysisError, AnalysisResult, DecisionMatrix, SensitivityEngine};
use crate::ports::{AdvisoryGenerator, AdvisoryReport};

/// Command to analyze a decision matrix.
#[derive(Debug, Clone)]
pub struct RunAnalysisCommand {
    pub matrix: DecisionMatrix,
}

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct RunAnalysisResult {
    pub results: AnalysisResult,
    /// `None` only when the advisory generator failed.
    pub advisory: Option<AdvisoryReport>,
}

/// Handler for running analyses.
pub struct RunAnalysisHandler {
    engine: Arc<SensitivityEngine>,
    advisor: Arc<dyn AdvisoryGenerator>,
}

impl RunAnalysisHandler {
    pub fn new(engine: Arc<SensitivityEngine>, advisor: Arc<dyn AdvisoryGenerator>) -> Self {
        Self { engine, advisor }
    }

    pub async fn handle(&self, cmd: RunAnalysisCommand) -> Result<RunAnalysisResult, AnalysisError> {
        let results = self.engine.analyze(&cmd.matrix)?;
        info!(
            leader = %results.leader,
            alternatives = cmd.matrix.alternative_count(),
            criteria = cmd.matrix.criterion_count(),
            tipping_points = results.tipping_points.len(),
            "Analysis completed"
        );

        let advisory = match self.advisor.generate(&cmd.matrix, &results).await {
            Ok(report) => Some(report),
            Err(err) => {
                warn!(error = %err, "Advisory unavailable for completed analysis");
                None
            }
        };

        Ok(RunAnalysisResult { results, advisory })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{AIError, AdvisoryError, AdvisorySource};
    use async_trait::async_trait;
    use chrono::Utc;

    // ─────────────────────────────────────────────────────────────────────
    // Mock Implementation
    // ─────────────────────────────────────────────────────────────────────

    struct StubAdvisor {
        fail: bool,
    }

    #[async_trait]
    impl AdvisoryGenerator for StubAdvisor {
        async fn generate(
            &self,
            _matrix: &DecisionMatrix,
            result: &AnalysisResult,
        ) -> Result<AdvisoryReport, AdvisoryError> {
            if self.fail {
                return Err(AIError::unavailable("down").into());
            }
            Ok(AdvisoryReport {
                executive_summary: format!("{} leads", result.leader),
                strategic_advisory: String::new(),
                sensitivity_analysis: String::new(),
                recommendations: vec![],
                self_reported_game_value: result.max_score(),
                internal_reasoning_score: 50.0,
                source: AdvisorySource::Ai,
                generated_at: Utc::now(),
            })
        }
    }

    fn handler(fail: bool) -> RunAnalysisHandler {
        RunAnalysisHandler::new(
            Arc::new(SensitivityEngine::default()),
            Arc::new(StubAdvisor { fail }),
        )
    }

    fn command() -> RunAnalysisCommand {
        RunAnalysisCommand {
            matrix: DecisionMatrix::builder()
                .alternatives(vec!["A", "B"])
                .criteria(vec!["X", "Y"])
                .row(vec![9, 7])
                .row(vec![4, 6])
                .build(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn returns_results_and_advisory() {
        let result = handler(false).handle(command()).await.unwrap();
        assert_eq!(result.results.leader, "A");
        assert_eq!(result.advisory.unwrap().executive_summary, "A leads");
    }

    #[tokio::test]
    async fn advisory_failure_keeps_results() {
        let result = handler(true).handle(command()).await.unwrap();
        assert_eq!(result.results.leader, "A");
        assert!(result.advisory.is_none());
    }

    #[tokio::test]
    async fn invalid_matrix_is_rejected() {
        let mut cmd = command();
        cmd.matrix.payoffs.pop();
        assert!(matches!(
            handler(false).handle(cmd).await,
            Err(AnalysisError::InvalidMatrix(_))
        ));
    }
}
