//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Text generation backends
//! - `AdvisoryGenerator` - Narrative reports over analysis results

mod advisory_generator;
mod ai_provider;

pub use advisory_generator::{AdvisoryError, AdvisoryGenerator, AdvisoryReport, AdvisorySource};
pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
