//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Chat-completion providers behind the `AIProvider` port
//! - `advisory` - Narrative generators behind the `AdvisoryGenerator` port
//! - `http` - Axum REST endpoints

pub mod advisory;
pub mod ai;
pub mod http;

pub use advisory::{LlmAdvisoryGenerator, ResilientAdvisoryGenerator, TemplateAdvisoryGenerator};
pub use ai::{ChatCompletionsConfig, ChatCompletionsProvider, MockAIProvider};
pub use http::{analysis_routes, AnalysisAppState};
