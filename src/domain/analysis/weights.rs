//! Weight Vector - Normalized criterion importance.
//!
//! Weights are keyed by criterion label, kept in the matrix's column order,
//! and always sum to 1. Every mutation produces a new, renormalized vector;
//! the baseline is never modified in place.

use serde::Serialize;
use std::collections::BTreeMap;

use super::AnalysisError;

/// Criterion keys of the built-in automotive domain, in column order.
pub const DOMAIN_CRITERIA: [&str; 5] = ["fuel", "safety", "tech", "service", "price"];

/// Default weights for [`DOMAIN_CRITERIA`].
pub const DOMAIN_WEIGHTS: [f64; 5] = [0.30, 0.25, 0.20, 0.15, 0.10];

/// Clamp applied to a perturbed weight before renormalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBounds {
    pub min: f64,
    pub max: f64,
}

/// Bounds used by every sensitivity search.
pub const PERTURBATION_BOUNDS: WeightBounds = WeightBounds {
    min: 0.01,
    max: 0.50,
};

impl WeightBounds {
    /// Clamps `value` into the bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Where the effective weights came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    /// Caller-supplied override.
    Override,
    /// Criteria matched the built-in domain defaults.
    DomainDefault,
    /// Equal weight per criterion.
    Uniform,
}

/// One criterion's weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionWeight {
    pub criterion: String,
    pub weight: f64,
}

/// Normalized criterion → weight mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightVector {
    entries: Vec<CriterionWeight>,
}

/// Result of perturbing one criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct Perturbation {
    /// Clamped weight assigned to the criterion before renormalization.
    pub raw_weight: f64,
    /// The renormalized vector.
    pub weights: WeightVector,
}

impl WeightVector {
    /// Builds a normalized vector from raw (criterion, weight) pairs.
    ///
    /// # Errors
    /// - `InvalidWeight` for negative, NaN or infinite weights
    /// - `ZeroWeightTotal` if the weights sum to zero
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        for (criterion, weight) in pairs {
            let criterion = criterion.into();
            if !weight.is_finite() || weight < 0.0 {
                return Err(AnalysisError::InvalidWeight {
                    criterion,
                    value: weight,
                });
            }
            entries.push(CriterionWeight { criterion, weight });
        }
        Self::normalized(entries)
    }

    /// Equal weight for every criterion.
    pub fn uniform(criteria: &[String]) -> Result<Self, AnalysisError> {
        Self::from_pairs(criteria.iter().map(|c| (c.clone(), 1.0)))
    }

    /// Returns true if `criteria` are the built-in domain criteria, in order
    /// (case-insensitive).
    pub fn matches_domain(criteria: &[String]) -> bool {
        criteria.len() == DOMAIN_CRITERIA.len()
            && criteria
                .iter()
                .zip(DOMAIN_CRITERIA.iter())
                .all(|(c, d)| c.trim().eq_ignore_ascii_case(d))
    }

    /// Default weights for a criteria set: the domain constants when the
    /// criteria match them, otherwise uniform.
    pub fn default_for(criteria: &[String]) -> Result<(Self, WeightSource), AnalysisError> {
        if Self::matches_domain(criteria) {
            let weights = Self::from_pairs(
                criteria
                    .iter()
                    .cloned()
                    .zip(DOMAIN_WEIGHTS.iter().copied()),
            )?;
            Ok((weights, WeightSource::DomainDefault))
        } else {
            Ok((Self::uniform(criteria)?, WeightSource::Uniform))
        }
    }

    /// Resolves an explicit override against the matrix criteria.
    ///
    /// The override must name every criterion exactly once. A key matches its
    /// criterion exactly, or failing that ignoring ASCII case. The result
    /// follows `criteria` order and labels.
    pub fn from_override(
        criteria: &[String],
        overrides: &BTreeMap<String, f64>,
    ) -> Result<Self, AnalysisError> {
        if overrides.len() != criteria.len() {
            return Err(AnalysisError::WeightMismatch {
                expected: criteria.len(),
                actual: overrides.len(),
            });
        }

        for key in overrides.keys() {
            if !criteria.iter().any(|c| c.eq_ignore_ascii_case(key)) {
                return Err(AnalysisError::UnknownCriterion(key.clone()));
            }
        }

        let mut pairs = Vec::with_capacity(criteria.len());
        for criterion in criteria {
            let weight = overrides
                .get(criterion)
                .copied()
                .or_else(|| {
                    overrides
                        .iter()
                        .find(|(k, _)| k.eq_ignore_ascii_case(criterion))
                        .map(|(_, w)| *w)
                })
                .ok_or_else(|| AnalysisError::UnknownCriterion(criterion.clone()))?;
            pairs.push((criterion.clone(), weight));
        }

        Self::from_pairs(pairs)
    }

    /// Sets `criterion` to `bounds.clamp(current + delta)` and renormalizes.
    ///
    /// # Errors
    /// - `UnknownCriterion` if the index is out of range
    /// - `ZeroWeightTotal` if the adjusted weights cannot be renormalized
    pub fn perturbed(
        &self,
        criterion: usize,
        delta: f64,
        bounds: WeightBounds,
    ) -> Result<Perturbation, AnalysisError> {
        let current = self
            .entries
            .get(criterion)
            .map(|e| e.weight)
            .ok_or_else(|| AnalysisError::UnknownCriterion(format!("#{}", criterion)))?;

        let raw_weight = bounds.clamp(current + delta);
        let mut entries = self.entries.clone();
        entries[criterion].weight = raw_weight;

        Ok(Perturbation {
            raw_weight,
            weights: Self::normalized(entries)?,
        })
    }

    /// Weight at column index.
    pub fn weight_at(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|e| e.weight)
    }

    /// Weight for a criterion label.
    pub fn get(&self, criterion: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.criterion == criterion)
            .map(|e| e.weight)
    }

    /// Criterion labels in column order.
    pub fn criteria(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.criterion.as_str())
    }

    /// Weights in column order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.weight)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the weights (1 within floating tolerance).
    pub fn sum(&self) -> f64 {
        self.values().sum()
    }

    fn normalized(mut entries: Vec<CriterionWeight>) -> Result<Self, AnalysisError> {
        let total: f64 = entries.iter().map(|e| e.weight).sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(AnalysisError::ZeroWeightTotal);
        }
        for entry in &mut entries {
            entry.weight /= total;
        }
        Ok(Self { entries })
    }
}
