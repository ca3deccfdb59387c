//! Strategix - Business Sensitivity Analysis
//!
//! This crate scores competing alternatives against weighted criteria,
//! predicts market share, and reports how robust the market leader is to
//! shifts in criterion importance.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
