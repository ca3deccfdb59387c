//! Integration tests for the analysis HTTP endpoints.
//!
//! These drive the full router (DTO parsing, command handler, engine and
//! advisory fallback) with in-process requests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use strategix::adapters::advisory::{LlmAdvisoryGenerator, ResilientAdvisoryGenerator};
use strategix::adapters::ai::MockAIProvider;
use strategix::adapters::http::{analysis_routes, AnalysisAppState};
use strategix::application::RunAnalysisHandler;
use strategix::domain::analysis::SensitivityEngine;
use strategix::ports::AIError;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn router_with(advisor: ResilientAdvisoryGenerator) -> Router {
    let handler = RunAnalysisHandler::new(Arc::new(SensitivityEngine::default()), Arc::new(advisor));
    analysis_routes(AnalysisAppState::new(Arc::new(handler)))
}

fn template_router() -> Router {
    router_with(ResilientAdvisoryGenerator::template_only())
}

fn analyze_body() -> Value {
    json!({
        "matrixData": {
            "rows": 3,
            "cols": 5,
            "rowLabels": ["Baleno", "Polo", "i20"],
            "colLabels": ["Fuel", "Safety", "Tech", "Service", "Price"],
            "payoffs": [[8, 9, 7, 8, 6], [7, 8, 9, 7, 7], [9, 6, 8, 6, 9]],
            "entityAName": "Maruti Suzuki",
            "entityBName": "Compact Car Segment",
            "yourProduct": "Baleno"
        }
    })
}

async fn post_analyze(router: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// Service Endpoints
// =============================================================================

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = get_json(template_router(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Business Sensitivity Analysis API");
}

#[tokio::test]
async fn root_returns_service_banner() {
    let (status, body) = get_json(template_router(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Strategix Business Sensitivity Analysis API");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// POST /analyze
// =============================================================================

#[tokio::test]
async fn analyze_returns_results_and_template_advisory() {
    let (status, body) = post_analyze(template_router(), analyze_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"]["optimalChoice"], "Baleno");
    assert_eq!(body["results"]["baseScores"]["Baleno"], 7.85);
    assert_eq!(body["advisory"]["source"], "template");
    assert!(body["advisory"]["executiveSummary"]
        .as_str()
        .unwrap()
        .contains("Baleno"));
}

#[tokio::test]
async fn analyze_uses_ai_advisory_when_provider_replies() {
    let reply = json!({
        "executiveSummary": "Baleno holds the lead.",
        "strategicAdvisory": "Defend safety.",
        "sensitivityAnalysis": "Price is the swing factor.",
        "recommendations": ["Invest in tech"]
    });
    let provider = MockAIProvider::new().with_response(reply.to_string());
    let advisor = ResilientAdvisoryGenerator::new(Arc::new(LlmAdvisoryGenerator::new(Arc::new(provider))));

    let (status, body) = post_analyze(router_with(advisor), analyze_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["advisory"]["source"], "ai");
    assert_eq!(body["advisory"]["executiveSummary"], "Baleno holds the lead.");
}

#[tokio::test]
async fn provider_failure_falls_back_to_template() {
    let provider = MockAIProvider::new().with_error(AIError::unavailable("maintenance"));
    let advisor = ResilientAdvisoryGenerator::new(Arc::new(LlmAdvisoryGenerator::new(Arc::new(provider))));

    let (status, body) = post_analyze(router_with(advisor), analyze_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"]["optimalChoice"], "Baleno");
    assert_eq!(body["advisory"]["source"], "template");
}

#[tokio::test]
async fn jagged_matrix_is_bad_request() {
    let mut body = analyze_body();
    body["matrixData"]["payoffs"][1] = json!([7, 8]);

    let (status, error) = post_analyze(template_router(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn mismatched_declared_rows_is_bad_request() {
    let mut body = analyze_body();
    body["matrixData"]["rows"] = json!(4);

    let (status, _) = post_analyze(template_router(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_weight_criterion_is_bad_request() {
    let mut body = analyze_body();
    body["matrixData"]["weights"] =
        json!({"fuel": 0.3, "safety": 0.25, "tech": 0.2, "service": 0.15, "speed": 0.1});

    let (status, error) = post_analyze(template_router(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "WEIGHT_MISMATCH");
}

#[tokio::test]
async fn weight_override_is_applied() {
    let mut body = analyze_body();
    body["matrixData"]["weights"] =
        json!({"fuel": 0.1, "safety": 0.1, "tech": 0.1, "service": 0.1, "price": 0.6});

    let (status, result) = post_analyze(template_router(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["results"]["weightSource"], "override");
    assert_eq!(result["results"]["optimalChoice"], "i20");
}
