//! Analysis HTTP adapter module.
//!
//! Provides the REST endpoints for running sensitivity analyses.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{AnalyzeRequest, AnalyzeResponse, DecisionMatrixDto, ErrorResponse};
pub use handlers::{AnalysisApiError, AnalysisAppState};
pub use routes::analysis_routes;
