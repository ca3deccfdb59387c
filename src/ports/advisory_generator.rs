//! Advisory Generator Port - Narrative reports over analysis results.
//!
//! The engine never calls this port. The application layer invokes it after
//! an `AnalysisResult` exists, so a failing generator cannot invalidate
//! computed metrics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::analysis::{AnalysisResult, DecisionMatrix};

use super::AIError;

/// Port for turning an analysis into a narrative report.
///
/// # Contract
///
/// Implementations must:
/// - Treat `matrix` and `result` as read-only input
/// - Return a complete report or an error, never a partial report
#[async_trait]
pub trait AdvisoryGenerator: Send + Sync {
    /// Generate a report for one analysis.
    ///
    /// # Errors
    ///
    /// Returns `AdvisoryError` if the backing provider fails or returns
    /// output that cannot be read as a report.
    async fn generate(
        &self,
        matrix: &DecisionMatrix,
        result: &AnalysisResult,
    ) -> Result<AdvisoryReport, AdvisoryError>;
}

/// Who wrote the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorySource {
    Ai,
    Template,
}

/// Narrative report for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryReport {
    pub executive_summary: String,
    pub strategic_advisory: String,
    pub sensitivity_analysis: String,
    pub recommendations: Vec<String>,
    /// Value the author assigns to the leading position.
    pub self_reported_game_value: f64,
    /// Author's confidence in its own reasoning, 0..=100.
    pub internal_reasoning_score: f64,
    pub source: AdvisorySource,
    pub generated_at: DateTime<Utc>,
}

/// Advisory generation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisoryError {
    #[error("advisory provider failed: {0}")]
    Provider(#[from] AIError),

    #[error("advisory response is malformed: {0}")]
    MalformedResponse(String),

    #[error("AI advisory is not configured")]
    NotConfigured,
}
