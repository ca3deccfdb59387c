//! LLM-backed advisory generator.
//!
//! Renders a consultant prompt from the matrix and analysis result, sends
//! it through an `AIProvider`, and reads the JSON report from the reply.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::domain::analysis::{AnalysisResult, DecisionMatrix};
use crate::ports::{
    AIProvider, AdvisoryError, AdvisoryGenerator, AdvisoryReport, AdvisorySource,
    CompletionRequest, MessageRole, RequestMetadata,
};

/// Tipping points quoted in the prompt.
const PROMPT_TIPPING_POINTS: usize = 3;

const MAX_TOKENS: u32 = 1500;
const TEMPERATURE: f32 = 0.4;

/// Reasoning score assumed when the model omits one.
const DEFAULT_REASONING_SCORE: f64 = 88.0;

const SYSTEM_PROMPT: &str = "You are a Senior Business Strategy Consultant. \
Answer with a single JSON object and no Markdown formatting.";

/// AdvisoryGenerator that delegates writing to an AI provider.
pub struct LlmAdvisoryGenerator {
    provider: Arc<dyn AIProvider>,
}

impl LlmAdvisoryGenerator {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    /// Renders the analysis as a prompt.
    pub fn build_prompt(matrix: &DecisionMatrix, result: &AnalysisResult) -> Result<String, AdvisoryError> {
        let to_json = |value: serde_json::Result<String>| {
            value.map_err(|e| AdvisoryError::MalformedResponse(format!("prompt encoding failed: {}", e)))
        };

        let product = result.focal.selection.analyzed.as_str();
        let tipping_points = if result.tipping_points.is_empty() {
            "No major vulnerabilities detected".to_string()
        } else {
            let top: Vec<_> = result
                .tipping_points
                .iter()
                .take(PROMPT_TIPPING_POINTS)
                .collect();
            to_json(serde_json::to_string(&top))?
        };

        Ok(format!(
            r#"Analyze market positioning for {entity}'s {product} in the {market} market.

PRODUCT CONTEXT:
Company: {entity}
Your Product: {product}
Market: {market}
Segment: {segment}

MARKET ANALYSIS DATA:
Products/Options: {alternatives}
Evaluation Criteria: {criteria}
Performance Matrix: {payoffs}

SENSITIVITY ANALYSIS RESULTS:
Current Market Leader: {leader}
Utility Scores: {scores}
Market Share Predictions: {shares}
Market Stability Index: {stability}/1.0
Risk Level: {risk}

CRITICAL TIPPING POINTS:
{tipping_points}

COMPETITIVE POSITIONING:
{gaps}

YOUR PRODUCT POSITION:
{position}

Respond with this JSON object, focused on {product}:
{{
  "executiveSummary": "Is {product}'s position in the {market} market secure or vulnerable?",
  "strategicAdvisory": "The 2-3 most critical strategic moves for {entity}.",
  "sensitivityAnalysis": "Which factors pose the biggest risk to {product}'s position?",
  "recommendations": ["4-5 specific, actionable recommendations"],
  "selfReportedGameValue": {game_value},
  "internalReasoningScore": {reasoning}
}}"#,
            entity = matrix.entity_name,
            product = product,
            market = matrix.market_name,
            segment = result.product_context.segment,
            alternatives = matrix.alternatives.join(", "),
            criteria = matrix.criteria.join(", "),
            payoffs = to_json(serde_json::to_string(&matrix.payoffs))?,
            leader = result.leader,
            scores = to_json(serde_json::to_string(&result.utility_scores))?,
            shares = to_json(serde_json::to_string(&result.market_share))?,
            stability = result.stability_index,
            risk = result.risk_assessment.level,
            tipping_points = tipping_points,
            gaps = to_json(serde_json::to_string(&result.competitive_gaps))?,
            position = result.focal.position.detail,
            game_value = result.max_score(),
            reasoning = DEFAULT_REASONING_SCORE,
        ))
    }

    /// Parses a model reply into a report.
    ///
    /// Accepts the object bare or wrapped in a Markdown code fence.
    pub fn parse_reply(content: &str, result: &AnalysisResult) -> Result<AdvisoryReport, AdvisoryError> {
        let payload: ReplyPayload = serde_json::from_str(strip_code_fence(content))
            .map_err(|e| AdvisoryError::MalformedResponse(e.to_string()))?;

        Ok(AdvisoryReport {
            executive_summary: payload.executive_summary,
            strategic_advisory: payload.strategic_advisory,
            sensitivity_analysis: payload.sensitivity_analysis,
            recommendations: payload.recommendations,
            self_reported_game_value: payload
                .self_reported_game_value
                .unwrap_or_else(|| result.max_score()),
            internal_reasoning_score: payload
                .internal_reasoning_score
                .unwrap_or(DEFAULT_REASONING_SCORE),
            source: AdvisorySource::Ai,
            generated_at: Utc::now(),
        })
    }
}

#[async_trait]
impl AdvisoryGenerator for LlmAdvisoryGenerator {
    async fn generate(
        &self,
        matrix: &DecisionMatrix,
        result: &AnalysisResult,
    ) -> Result<AdvisoryReport, AdvisoryError> {
        let prompt = Self::build_prompt(matrix, result)?;
        let metadata = RequestMetadata::for_analysis();
        debug!(
            trace_id = %metadata.trace_id,
            prompt_tokens = self.provider.estimate_tokens(&prompt),
            provider = %self.provider.provider_info().name,
            "Requesting AI advisory"
        );

        let request = CompletionRequest::new(metadata)
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE);

        let response = self.provider.complete(request).await?;
        Self::parse_reply(&response.content, result)
    }
}

/// Removes a surrounding ```json / ``` fence, if present.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyPayload {
    executive_summary: String,
    strategic_advisory: String,
    sensitivity_analysis: String,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    self_reported_game_value: Option<f64>,
    #[serde(default)]
    internal_reasoning_score: Option<f64>,
}
