//! HTTP routes for analysis endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{analyze, health_check, service_banner, AnalysisAppState};

/// Creates the analysis router with all routes.
pub fn analysis_routes(state: AnalysisAppState) -> Router {
    Router::new()
        // GET /
        .route("/", get(service_banner))
        // GET /health
        .route("/health", get(health_check))
        // POST /analyze
        .route("/analyze", post(analyze))
        .with_state(state)
}
