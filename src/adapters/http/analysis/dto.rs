//! HTTP DTOs for analysis endpoints.
//!
//! Request DTOs keep the camelCase wire names clients already send.
//! The result types are serialized directly from the domain.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::analysis::{AnalysisResult, DecisionMatrix};
use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::AdvisoryReport;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Decision matrix as submitted by clients.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionMatrixDto {
    /// Declared row count; must equal `row_labels.len()` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    /// Declared column count; must equal `col_labels.len()` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<usize>,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub payoffs: Vec<Vec<i32>>,
    #[serde(default)]
    pub entity_a_name: String,
    #[serde(default)]
    pub entity_b_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<String, f64>>,
}

impl DecisionMatrixDto {
    /// Converts into a domain matrix, checking the declared dimensions.
    pub fn into_matrix(self) -> Result<DecisionMatrix, ValidationError> {
        if let Some(rows) = self.rows {
            if rows != self.row_labels.len() {
                return Err(ValidationError::dimension_mismatch(
                    "rows",
                    self.row_labels.len(),
                    rows,
                ));
            }
        }
        if let Some(cols) = self.cols {
            if cols != self.col_labels.len() {
                return Err(ValidationError::dimension_mismatch(
                    "cols",
                    self.col_labels.len(),
                    cols,
                ));
            }
        }

        Ok(DecisionMatrix {
            alternatives: self.row_labels,
            criteria: self.col_labels,
            payoffs: self.payoffs,
            entity_name: self.entity_a_name,
            market_name: self.entity_b_name,
            focal_alternative: self.your_product.filter(|p| !p.trim().is_empty()),
            weight_override: self.weights,
        })
    }
}

/// Request body for `POST /analyze`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub matrix_data: DecisionMatrixDto,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response body for `POST /analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub results: AnalysisResult,
    /// Null only when no advisory could be produced.
    pub advisory: Option<AdvisoryReport>,
}

/// Service banner for `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceBanner {
    pub message: &'static str,
    pub version: &'static str,
    pub focus: &'static str,
}

/// Liveness payload for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        let details = if err.details.is_empty() {
            None
        } else {
            let map: BTreeMap<_, _> = err.details.into_iter().collect();
            serde_json::to_value(map).ok()
        };
        Self {
            code: err.code.to_string(),
            message: err.message,
            details,
        }
    }
}
