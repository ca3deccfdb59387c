//! Advisory Adapters - Implementations of the AdvisoryGenerator port.
//!
//! - `LlmAdvisoryGenerator` - Prompted report from an AI provider
//! - `TemplateAdvisoryGenerator` - Deterministic templated report
//! - `ResilientAdvisoryGenerator` - Primary generator with template fallback

mod llm_advisor;
mod resilient;
mod template_advisor;

pub use llm_advisor::LlmAdvisoryGenerator;
pub use resilient::ResilientAdvisoryGenerator;
pub use template_advisor::TemplateAdvisoryGenerator;
