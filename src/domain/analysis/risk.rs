//! Risk assessment of the baseline leader.

use serde::Serialize;
use std::fmt;

use super::UtilityScores;

const STABILITY_THRESHOLD: f64 = 0.7;
const TIPPING_POINT_THRESHOLD: usize = 5;
const NARROW_MARGIN: f64 = 2.0;

/// Qualitative risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// High for two or more factors, Medium for one, Low for none.
    pub fn from_factor_count(count: usize) -> Self {
        match count {
            0 => RiskLevel::Low,
            1 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        };
        write!(f, "{}", s)
    }
}

/// Risk factors and the resulting recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub factors: Vec<String>,
    pub recommendation: String,
}

impl RiskAssessment {
    /// Collects the risk factors.
    ///
    /// The narrow-advantage factor needs at least two alternatives.
    pub fn assess(stability_index: f64, tipping_point_count: usize, scores: &UtilityScores) -> Self {
        let mut factors = Vec::new();

        if stability_index < STABILITY_THRESHOLD {
            factors.push("Market position vulnerable to weight shifts".to_string());
        }
        if tipping_point_count > TIPPING_POINT_THRESHOLD {
            factors.push("Multiple sensitivity points detected".to_string());
        }
        if scores.top_margin().is_some_and(|margin| margin < NARROW_MARGIN) {
            factors.push("Narrow competitive advantage".to_string());
        }

        let recommendation = if factors.is_empty() {
            "Maintain current strategy"
        } else {
            "Focus on strengthening weak criteria"
        };

        Self {
            level: RiskLevel::from_factor_count(factors.len()),
            factors,
            recommendation: recommendation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: &[(&str, f64)]) -> UtilityScores {
        values.iter().map(|(l, v)| (l.to_string(), *v)).collect()
    }

    #[test]
    fn stable_wide_margin_is_low_risk() {
        let risk = RiskAssessment::assess(1.0, 0, &scores(&[("A", 9.0), ("B", 5.0)]));
        assert_eq!(risk.level, RiskLevel::Low);
        assert!(risk.factors.is_empty());
        assert_eq!(risk.recommendation, "Maintain current strategy");
    }

    #[test]
    fn narrow_margin_alone_is_medium_risk() {
        let risk = RiskAssessment::assess(1.0, 0, &scores(&[("A", 7.85), ("B", 7.65)]));
        assert_eq!(risk.level, RiskLevel::Medium);
        assert_eq!(risk.factors, vec!["Narrow competitive advantage"]);
        assert_eq!(risk.recommendation, "Focus on strengthening weak criteria");
    }

    #[test]
    fn all_factors_are_high_risk() {
        let risk = RiskAssessment::assess(0.02, 8, &scores(&[("A", 7.85), ("B", 7.65)]));
        assert_eq!(risk.level, RiskLevel::High);
        assert_eq!(risk.factors.len(), 3);
    }

    #[test]
    fn single_alternative_has_no_margin_factor() {
        let risk = RiskAssessment::assess(1.0, 0, &scores(&[("Solo", 4.0)]));
        assert_eq!(risk.level, RiskLevel::Low);
    }

    #[test]
    fn level_displays_capitalized() {
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
    }

    #[test]
    fn exactly_five_tipping_points_is_not_a_factor() {
        let risk = RiskAssessment::assess(0.9, 5, &scores(&[("A", 9.0), ("B", 2.0)]));
        assert!(risk.factors.is_empty());
    }
}
