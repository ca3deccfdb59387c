//! Market Share Estimator - Softmax over utility scores.

use crate::domain::foundation::precision;

use super::{MarketShares, UtilityScores};

/// Converts utility scores to predicted market shares.
pub struct MarketShareEstimator;

impl MarketShareEstimator {
    /// Applies a numerically stable softmax and expresses it in percent.
    ///
    /// The maximum score is subtracted before exponentiating. Each share is
    /// rounded to 1 decimal independently, so the total is only
    /// approximately 100.
    ///
    /// # Edge Cases
    /// - Empty scores: Returns empty shares
    /// - Single alternative: 100%
    pub fn estimate(scores: &UtilityScores) -> MarketShares {
        let Some(max_score) = scores.max_value() else {
            return MarketShares::new();
        };

        let exps: Vec<(&str, f64)> = scores
            .iter()
            .map(|(label, score)| (label, (score - max_score).exp()))
            .collect();
        let total: f64 = exps.iter().map(|(_, e)| e).sum();

        exps.into_iter()
            .map(|(label, e)| (label.to_string(), precision::round1(e / total * 100.0)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: &[(&str, f64)]) -> UtilityScores {
        values
            .iter()
            .map(|(l, v)| (l.to_string(), *v))
            .collect()
    }

    #[test]
    fn empty_scores_give_empty_shares() {
        assert!(MarketShareEstimator::estimate(&UtilityScores::new()).is_empty());
    }

    #[test]
    fn single_alternative_takes_everything() {
        let shares = MarketShareEstimator::estimate(&scores(&[("A", 7.3)]));
        assert_eq!(shares.get("A"), Some(100.0));
    }

    #[test]
    fn equal_scores_split_evenly() {
        let shares = MarketShareEstimator::estimate(&scores(&[("A", 5.0), ("B", 5.0)]));
        assert_eq!(shares.get("A"), Some(50.0));
        assert_eq!(shares.get("B"), Some(50.0));
    }

    #[test]
    fn shares_follow_utility_ordering() {
        let shares = MarketShareEstimator::estimate(&scores(&[
            ("Baleno", 7.85),
            ("Polo", 7.65),
            ("i20", 7.6),
        ]));
        let baleno = shares.get("Baleno").unwrap();
        let polo = shares.get("Polo").unwrap();
        let i20 = shares.get("i20").unwrap();
        assert!(baleno > polo && polo > i20);
        assert!((shares.total() - 100.0).abs() <= 0.3);
    }

    #[test]
    fn large_scores_do_not_overflow() {
        let shares = MarketShareEstimator::estimate(&scores(&[("A", 1000.0), ("B", 990.0)]));
        assert!(shares.values().all(|s| s.is_finite() && s >= 0.0));
        assert_eq!(shares.get("A"), Some(100.0));
    }
}
