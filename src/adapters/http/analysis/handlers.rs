//! HTTP handlers for analysis endpoints.
//!
//! These handlers connect Axum routes to the application layer command handler.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::error;

use crate::application::handlers::{RunAnalysisCommand, RunAnalysisHandler};
use crate::domain::analysis::AnalysisError;
use crate::domain::foundation::{DomainError, ValidationError};

use super::dto::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse, ServiceBanner};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Analysis API error that implements IntoResponse.
#[derive(Debug)]
pub enum AnalysisApiError {
    /// The submitted matrix or weights were rejected.
    BadRequest(DomainError),
    /// The engine could not complete the computation.
    Internal { error: DomainError, verbose: bool },
}

impl AnalysisApiError {
    fn from_analysis(err: AnalysisError, verbose: bool) -> Self {
        if err.is_input_error() {
            AnalysisApiError::BadRequest(err.into())
        } else {
            AnalysisApiError::Internal {
                error: err.into(),
                verbose,
            }
        }
    }
}

impl From<ValidationError> for AnalysisApiError {
    fn from(err: ValidationError) -> Self {
        AnalysisApiError::BadRequest(err.into())
    }
}

impl IntoResponse for AnalysisApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AnalysisApiError::BadRequest(err) => (StatusCode::BAD_REQUEST, ErrorResponse::from(err)),
            AnalysisApiError::Internal { error, verbose } => {
                error!(code = %error.code, message = %error.message, "Analysis failed");
                let body = if verbose {
                    ErrorResponse::from(error)
                } else {
                    ErrorResponse::internal("Analysis failed")
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        (status, Json(body)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing analysis dependencies.
#[derive(Clone)]
pub struct AnalysisAppState {
    pub handler: Arc<RunAnalysisHandler>,
    /// Expose engine failure details in 500 responses.
    pub verbose_errors: bool,
}

impl AnalysisAppState {
    pub fn new(handler: Arc<RunAnalysisHandler>) -> Self {
        Self {
            handler,
            verbose_errors: false,
        }
    }

    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /
pub async fn service_banner() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        message: "Strategix Business Sensitivity Analysis API",
        version: env!("CARGO_PKG_VERSION"),
        focus: "Multi-criteria decision analysis for business strategy",
    })
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "Business Sensitivity Analysis API",
    })
}

/// POST /analyze
pub async fn analyze(
    State(state): State<AnalysisAppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, AnalysisApiError> {
    let matrix = request.matrix_data.into_matrix()?;

    let output = state
        .handler
        .handle(RunAnalysisCommand { matrix })
        .await
        .map_err(|err| AnalysisApiError::from_analysis(err, state.verbose_errors))?;

    Ok((
        StatusCode::OK,
        Json(AnalyzeResponse {
            results: output.results,
            advisory: output.advisory,
        }),
    ))
}
