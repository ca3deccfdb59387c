//! Competitive Gap Analyzer - Pairwise criterion-averaged score gaps.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::foundation::precision;

use super::{DecisionMatrix, LabeledValues};

/// Alternative → (other alternative → average gap), in row order.
///
/// Antisymmetric: `gap(a, b) == -gap(b, a)`. Holds no self-entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompetitiveGaps {
    rows: Vec<(String, LabeledValues)>,
}

impl CompetitiveGaps {
    /// Gap of `from` over `to`, if both are known and distinct.
    pub fn gap(&self, from: &str, to: &str) -> Option<f64> {
        self.row(from).and_then(|row| row.get(to))
    }

    /// All gaps from one alternative.
    pub fn row(&self, from: &str) -> Option<&LabeledValues> {
        self.rows.iter().find(|(l, _)| l == from).map(|(_, row)| row)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabeledValues)> {
        self.rows.iter().map(|(l, row)| (l.as_str(), row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Serialize for CompetitiveGaps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (label, row) in &self.rows {
            map.serialize_entry(label, row)?;
        }
        map.end()
    }
}

/// Computes competitive gaps between alternatives.
pub struct CompetitiveGapAnalyzer;

impl CompetitiveGapAnalyzer {
    /// Computes the gap for every ordered pair of distinct alternatives.
    ///
    /// # Algorithm
    /// gap(a, b) = mean over criteria of (payoff[a] − payoff[b]), 2 decimals.
    ///
    /// # Edge Cases
    /// - Single alternative: one entry with no gaps
    /// - No criteria: every gap is 0
    pub fn analyze(matrix: &DecisionMatrix) -> CompetitiveGaps {
        let criteria = matrix.criterion_count();
        let empty = Vec::new();

        let rows = matrix
            .alternatives
            .iter()
            .enumerate()
            .map(|(i, alternative)| {
                let own = matrix.payoffs.get(i).unwrap_or(&empty);
                let gaps = matrix
                    .alternatives
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(j, other)| {
                        let theirs = matrix.payoffs.get(j).unwrap_or(&empty);
                        let total: i64 = own
                            .iter()
                            .zip(theirs)
                            .map(|(&a, &b)| i64::from(a) - i64::from(b))
                            .sum();
                        let gap = if criteria == 0 {
                            0.0
                        } else {
                            total as f64 / criteria as f64
                        };
                        (other.clone(), precision::round2(gap))
                    })
                    .collect();
                (alternative.clone(), gaps)
            })
            .collect();

        CompetitiveGaps { rows }
    }
}
