//! Analysis handlers.

mod run_analysis;

pub use run_analysis::{RunAnalysisCommand, RunAnalysisHandler, RunAnalysisResult};
