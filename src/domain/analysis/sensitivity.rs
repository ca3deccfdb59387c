//! Sensitivity Explorer - Weight perturbation searches around a baseline.
//!
//! All three searches share one primitive: clamp one criterion's weight
//! after adding a delta, renormalize, rescore, and find the new leader.
//! Each trial works on its own copy of the weights.

use serde::Serialize;

use crate::domain::foundation::precision;

use super::weights::{DOMAIN_CRITERIA, PERTURBATION_BOUNDS};
use super::{
    AnalysisError, CriteriaSensitivity, DecisionMatrix, MarketShareEstimator, MarketShares,
    UtilityScorer, UtilityScores, WeightVector,
};

/// Deltas tested per criterion when searching for tipping points.
pub const TIPPING_POINT_DELTAS: [f64; 6] = [-0.15, -0.10, -0.05, 0.05, 0.10, 0.15];

/// Deltas tested per criterion when measuring criteria sensitivity.
///
/// A separate, wider grid than [`TIPPING_POINT_DELTAS`].
pub const SENSITIVITY_DELTAS: [f64; 8] = [-0.20, -0.15, -0.10, -0.05, 0.05, 0.10, 0.15, 0.20];

/// Boost magnitudes of the scenario catalog, in catalog order.
pub const SCENARIO_BOOSTS: [f64; 5] = [0.20, 0.25, 0.15, 0.18, 0.12];

/// Named scenarios for the built-in domain: (name, criterion key, boost).
const DOMAIN_SCENARIOS: [(&str, &str, f64); 5] = [
    ("Safety Focus (+20%)", "safety", 0.20),
    ("Tech Innovation (+25%)", "tech", 0.25),
    ("Price Sensitivity (+15%)", "price", 0.15),
    ("Fuel Economy (+18%)", "fuel", 0.18),
    ("Service Quality (+12%)", "service", 0.12),
];

/// A weight perturbation that changes the leader.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TippingPoint {
    pub criterion: String,
    /// Signed delta applied to the baseline weight.
    pub weight_change: f64,
    /// Clamped weight before renormalization, 3 decimals.
    pub new_weight: f64,
    /// The criterion's weight after renormalization, 3 decimals.
    pub normalized_weight: f64,
    pub previous_leader: String,
    pub new_leader: String,
    /// New leader's perturbed score minus the baseline leader's baseline score.
    pub score_change: f64,
    pub market_impact: String,
}

/// A what-if scenario: boost one criterion by a fixed magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSpec {
    pub name: String,
    pub criterion: usize,
    pub boost: f64,
}

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub criterion: String,
    pub boost: f64,
    pub new_leader: String,
    pub market_share: MarketShares,
    /// |new leader's score − baseline leader's score|, 2 decimals.
    pub impact_score: f64,
}

/// One perturbed evaluation.
#[derive(Debug, Clone)]
struct Trial {
    raw_weight: f64,
    weights: WeightVector,
    scores: UtilityScores,
    leader: String,
}

/// Runs perturbation searches against a fixed baseline.
pub struct SensitivityExplorer<'a> {
    matrix: &'a DecisionMatrix,
    baseline: &'a WeightVector,
    baseline_scores: &'a UtilityScores,
    baseline_leader: &'a str,
}

impl<'a> SensitivityExplorer<'a> {
    /// Creates an explorer around a scored baseline.
    pub fn new(
        matrix: &'a DecisionMatrix,
        baseline: &'a WeightVector,
        baseline_scores: &'a UtilityScores,
        baseline_leader: &'a str,
    ) -> Self {
        Self {
            matrix,
            baseline,
            baseline_scores,
            baseline_leader,
        }
    }

    /// Perturb-and-renormalize, then rescore.
    fn trial(&self, criterion: usize, delta: f64) -> Result<Trial, AnalysisError> {
        let perturbation = self
            .baseline
            .perturbed(criterion, delta, PERTURBATION_BOUNDS)?;
        let scores = UtilityScorer::compute_scores(self.matrix, &perturbation.weights)?;
        let leader = UtilityScorer::leader(&scores)
            .unwrap_or(self.baseline_leader)
            .to_string();

        Ok(Trial {
            raw_weight: perturbation.raw_weight,
            weights: perturbation.weights,
            scores,
            leader,
        })
    }

    fn baseline_leader_score(&self) -> f64 {
        self.baseline_scores
            .get(self.baseline_leader)
            .unwrap_or_default()
    }

    /// Every (criterion, delta) from [`TIPPING_POINT_DELTAS`] that flips the leader.
    pub fn tipping_points(&self) -> Result<Vec<TippingPoint>, AnalysisError> {
        let mut points = Vec::new();
        let leader_score = self.baseline_leader_score();

        for (index, criterion) in self.matrix.criteria.iter().enumerate() {
            for &delta in &TIPPING_POINT_DELTAS {
                let trial = self.trial(index, delta)?;
                if trial.leader == self.baseline_leader {
                    continue;
                }

                let new_score = trial.scores.get(&trial.leader).unwrap_or_default();
                points.push(TippingPoint {
                    criterion: criterion.clone(),
                    weight_change: delta,
                    new_weight: precision::round3(trial.raw_weight),
                    normalized_weight: precision::round3(
                        trial.weights.weight_at(index).unwrap_or_default(),
                    ),
                    previous_leader: self.baseline_leader.to_string(),
                    new_leader: trial.leader,
                    score_change: precision::round2(new_score - leader_score),
                    market_impact: format!(
                        "{} importance shifts market leadership",
                        title_case(criterion)
                    ),
                });
            }
        }

        Ok(points)
    }

    /// Percentage of [`SENSITIVITY_DELTAS`] that flip the leader, per criterion.
    pub fn criteria_sensitivity(&self) -> Result<CriteriaSensitivity, AnalysisError> {
        let mut sensitivity = CriteriaSensitivity::new();

        for (index, criterion) in self.matrix.criteria.iter().enumerate() {
            let mut flips = 0usize;
            for &delta in &SENSITIVITY_DELTAS {
                if self.trial(index, delta)?.leader != self.baseline_leader {
                    flips += 1;
                }
            }
            let pct = flips as f64 / SENSITIVITY_DELTAS.len() as f64 * 100.0;
            sensitivity.insert(criterion.clone(), precision::round1(pct));
        }

        Ok(sensitivity)
    }

    /// Runs each scenario with its single fixed boost.
    pub fn scenarios(&self, catalog: &[ScenarioSpec]) -> Result<Vec<ScenarioResult>, AnalysisError> {
        let leader_score = self.baseline_leader_score();

        catalog
            .iter()
            .map(|spec| {
                let trial = self.trial(spec.criterion, spec.boost)?;
                let new_score = trial.scores.get(&trial.leader).unwrap_or_default();
                Ok(ScenarioResult {
                    scenario_name: spec.name.clone(),
                    criterion: self
                        .matrix
                        .criteria
                        .get(spec.criterion)
                        .cloned()
                        .unwrap_or_default(),
                    boost: spec.boost,
                    market_share: MarketShareEstimator::estimate(&trial.scores),
                    new_leader: trial.leader,
                    impact_score: precision::round2((new_score - leader_score).abs()),
                })
            })
            .collect()
    }
}

/// Builds the scenario catalog for a criteria set.
///
/// The built-in domain criteria get their named scenarios. Any other set
/// gets one "<Criterion> Focus" scenario per criterion, with boosts taken
/// from [`SCENARIO_BOOSTS`] by position.
pub fn scenario_catalog(criteria: &[String]) -> Vec<ScenarioSpec> {
    if WeightVector::matches_domain(criteria) {
        return DOMAIN_SCENARIOS
            .iter()
            .filter_map(|(name, key, boost)| {
                DOMAIN_CRITERIA
                    .iter()
                    .position(|c| c == key)
                    .map(|criterion| ScenarioSpec {
                        name: name.to_string(),
                        criterion,
                        boost: *boost,
                    })
            })
            .collect();
    }

    criteria
        .iter()
        .enumerate()
        .map(|(index, criterion)| {
            let boost = SCENARIO_BOOSTS[index % SCENARIO_BOOSTS.len()];
            ScenarioSpec {
                name: format!(
                    "{} Focus (+{}%)",
                    title_case(criterion),
                    (boost * 100.0).round() as i64
                ),
                criterion: index,
                boost,
            }
        })
        .collect()
}

fn title_case(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
