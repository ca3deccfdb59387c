//! Decision Matrix - Alternatives scored against weighted criteria.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::domain::foundation::ValidationError;

use super::AnalysisError;

/// Declared bounds for payoff scores.
///
/// The classification thresholds (strength at 8, investment below 7) assume
/// the default 0..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: i32,
    pub max: i32,
}

impl ScoreRange {
    /// Creates a score range.
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Returns true if `score` lies within the range (inclusive).
    pub fn contains(&self, score: i32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self::new(0, 10)
    }
}

/// Alternatives (rows) scored against criteria (columns).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionMatrix {
    /// Ordered alternative labels.
    pub alternatives: Vec<String>,
    /// Ordered criterion labels.
    pub criteria: Vec<String>,
    /// `payoffs[alternative][criterion]`.
    pub payoffs: Vec<Vec<i32>>,
    /// The evaluating entity (e.g. the company).
    pub entity_name: String,
    /// The market or segment under analysis.
    pub market_name: String,
    /// Alternative the diagnostics are produced for.
    pub focal_alternative: Option<String>,
    /// Explicit criterion weights, keyed by criterion label.
    pub weight_override: Option<BTreeMap<String, f64>>,
}

impl DecisionMatrix {
    /// Creates a builder for constructing a decision matrix.
    pub fn builder() -> DecisionMatrixBuilder {
        DecisionMatrixBuilder::new()
    }

    /// Returns the number of alternatives.
    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Returns the number of criteria.
    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Looks up an alternative's row index by label.
    pub fn alternative_index(&self, label: &str) -> Option<usize> {
        self.alternatives.iter().position(|a| a == label)
    }

    /// Score of alternative `alt` on criterion `criterion`, by index.
    pub fn score(&self, alt: usize, criterion: usize) -> Option<i32> {
        self.payoffs.get(alt).and_then(|row| row.get(criterion)).copied()
    }

    /// All payoff entries in row-major order.
    pub fn all_scores(&self) -> impl Iterator<Item = i32> + '_ {
        self.payoffs.iter().flat_map(|row| row.iter().copied())
    }

    /// Checks the structural invariants of the matrix.
    ///
    /// # Errors
    /// - Empty alternative or criterion lists
    /// - Blank or duplicate labels
    /// - Row count different from the alternative count
    /// - Any row whose length differs from the criterion count
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.alternatives.is_empty() {
            return Err(ValidationError::empty_field("rowLabels"));
        }
        if self.criteria.is_empty() {
            return Err(ValidationError::empty_field("colLabels"));
        }

        Self::check_labels("rowLabels", &self.alternatives, false)?;
        Self::check_labels("colLabels", &self.criteria, true)?;

        if self.payoffs.len() != self.alternatives.len() {
            return Err(ValidationError::dimension_mismatch(
                "payoffs",
                self.alternatives.len(),
                self.payoffs.len(),
            ));
        }

        for (i, row) in self.payoffs.iter().enumerate() {
            if row.len() != self.criteria.len() {
                return Err(ValidationError::dimension_mismatch(
                    format!("payoffs[{}]", i),
                    self.criteria.len(),
                    row.len(),
                ));
            }
        }

        Ok(())
    }

    /// Rejects any payoff outside `range`.
    pub fn check_score_range(&self, range: ScoreRange) -> Result<(), AnalysisError> {
        for (i, row) in self.payoffs.iter().enumerate() {
            for (j, &score) in row.iter().enumerate() {
                if !range.contains(score) {
                    return Err(AnalysisError::ScoreOutOfRange {
                        alternative: self.alternatives.get(i).cloned().unwrap_or_default(),
                        criterion: self.criteria.get(j).cloned().unwrap_or_default(),
                        score,
                        min: range.min,
                        max: range.max,
                    });
                }
            }
        }
        Ok(())
    }

    /// Criterion labels are compared ignoring case, since weight overrides
    /// and domain defaults match them that way.
    fn check_labels(
        field: &str,
        labels: &[String],
        ignore_case: bool,
    ) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for label in labels {
            if label.trim().is_empty() {
                return Err(ValidationError::invalid_format(field, "labels cannot be blank"));
            }
            let key = if ignore_case {
                label.to_ascii_lowercase()
            } else {
                label.clone()
            };
            if !seen.insert(key) {
                return Err(ValidationError::duplicate(field, label.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for constructing DecisionMatrix instances.
#[derive(Debug, Default)]
pub struct DecisionMatrixBuilder {
    matrix: DecisionMatrix,
}

impl DecisionMatrixBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alternatives.
    pub fn alternatives(mut self, labels: Vec<impl Into<String>>) -> Self {
        self.matrix.alternatives = labels.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Sets the criteria.
    pub fn criteria(mut self, labels: Vec<impl Into<String>>) -> Self {
        self.matrix.criteria = labels.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Appends one row of scores.
    pub fn row(mut self, scores: Vec<i32>) -> Self {
        self.matrix.payoffs.push(scores);
        self
    }

    /// Replaces the whole payoff matrix.
    pub fn payoffs(mut self, payoffs: Vec<Vec<i32>>) -> Self {
        self.matrix.payoffs = payoffs;
        self
    }

    /// Sets the evaluating entity.
    pub fn entity(mut self, name: impl Into<String>) -> Self {
        self.matrix.entity_name = name.into();
        self
    }

    /// Sets the market or segment.
    pub fn market(mut self, name: impl Into<String>) -> Self {
        self.matrix.market_name = name.into();
        self
    }

    /// Sets the focal alternative.
    pub fn focal(mut self, label: impl Into<String>) -> Self {
        self.matrix.focal_alternative = Some(label.into());
        self
    }

    /// Adds one explicit criterion weight.
    pub fn weight(mut self, criterion: impl Into<String>, weight: f64) -> Self {
        self.matrix
            .weight_override
            .get_or_insert_with(BTreeMap::new)
            .insert(criterion.into(), weight);
        self
    }

    /// Builds the decision matrix. Validation happens at analysis time.
    pub fn build(self) -> DecisionMatrix {
        self.matrix
    }
}
