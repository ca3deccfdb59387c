//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary and numeric helpers shared by the
//! Strategix domain.

mod errors;
pub mod precision;

pub use errors::{DomainError, ErrorCode, ValidationError};
