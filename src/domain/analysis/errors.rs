//! Analysis engine errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Failures raised by the sensitivity-analysis engine.
///
/// Input problems are reported before any computation starts; the only
/// computation-time failure is a degenerate weight vector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid decision matrix: {0}")]
    InvalidMatrix(#[from] ValidationError),

    #[error("weight vector has {actual} entries but the matrix declares {expected} criteria")]
    WeightMismatch { expected: usize, actual: usize },

    #[error("weight override names unknown criterion '{0}'")]
    UnknownCriterion(String),

    #[error("weight for criterion '{criterion}' must be a finite non-negative number, got {value}")]
    InvalidWeight { criterion: String, value: f64 },

    #[error("weights sum to zero and cannot be renormalized")]
    ZeroWeightTotal,

    #[error(
        "score {score} for '{alternative}' on '{criterion}' is outside the declared range {min}..={max}"
    )]
    ScoreOutOfRange {
        alternative: String,
        criterion: String,
        score: i32,
        min: i32,
        max: i32,
    },
}

impl AnalysisError {
    /// Returns true if the error was caused by the caller's input.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, AnalysisError::ZeroWeightTotal)
    }
}

impl From<AnalysisError> for DomainError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidMatrix(inner) => inner.into(),
            AnalysisError::WeightMismatch { expected, actual } => DomainError::new(
                ErrorCode::WeightMismatch,
                err.to_string(),
            )
            .with_detail("expected", expected.to_string())
            .with_detail("actual", actual.to_string()),
            AnalysisError::UnknownCriterion(ref criterion) => {
                DomainError::new(ErrorCode::WeightMismatch, err.to_string())
                    .with_detail("criterion", criterion.clone())
            }
            AnalysisError::InvalidWeight { ref criterion, .. } => {
                DomainError::validation("weights", err.to_string())
                    .with_detail("criterion", criterion.clone())
            }
            AnalysisError::ZeroWeightTotal => {
                DomainError::new(ErrorCode::ZeroWeightTotal, err.to_string())
            }
            AnalysisError::ScoreOutOfRange {
                ref alternative,
                ref criterion,
                ..
            } => DomainError::new(ErrorCode::OutOfRange, err.to_string())
                .with_detail("alternative", alternative.clone())
                .with_detail("criterion", criterion.clone()),
        }
    }
}
