//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, numeric rounding)
//! - `analysis` - The sensitivity-analysis engine (pure, no I/O)

pub mod analysis;
pub mod foundation;
