//! Fixed-precision rounding helpers shared by the analysis services.
//!
//! Every reported metric is rounded to a documented number of decimals so
//! that identical input always serializes to identical output.

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Two decimals (utility scores, gaps).
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// One decimal (shares, percentages, confidence).
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Three decimals (weights, stability).
pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}
