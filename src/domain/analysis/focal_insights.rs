//! Focal Insight Generator - Diagnostics for the designated alternative.
//!
//! Every criterion is compared against the competitors (all other rows).
//! A criterion is a strength or a weakness, never both; an investment
//! priority is evaluated independently and may accompany either.

use serde::Serialize;

use crate::domain::foundation::precision;

use super::{DecisionMatrix, MarketShares, ScoreRange, UtilityScores};

/// Minimum focal score for a strength.
const STRENGTH_THRESHOLD: i32 = 8;

/// Focal scores below this are investment candidates.
const INVESTMENT_THRESHOLD: i32 = 7;

/// Minimum deficit for a weakness.
const WEAKNESS_GAP: i64 = 1;

/// Deficit that makes a criterion an investment candidate.
const INVESTMENT_GAP: i64 = 2;

/// Which alternative the diagnostics describe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocalSelection {
    /// Label supplied by the caller, if any.
    pub requested: Option<String>,
    /// Label actually analyzed.
    pub analyzed: String,
    /// True when the requested label was absent or unknown and the first
    /// row was used instead.
    pub substituted: bool,
}

impl FocalSelection {
    /// Resolves the focal alternative, falling back to the first row.
    ///
    /// Returns `None` only for a matrix without alternatives.
    pub fn resolve(matrix: &DecisionMatrix) -> Option<(Self, usize)> {
        let first = matrix.alternatives.first()?;
        let requested = matrix.focal_alternative.clone();

        let found = requested
            .as_deref()
            .and_then(|label| matrix.alternative_index(label));

        let selection = match found {
            Some(index) => (
                Self {
                    analyzed: matrix.alternatives[index].clone(),
                    requested,
                    substituted: false,
                },
                index,
            ),
            None => (
                Self {
                    analyzed: first.clone(),
                    requested,
                    substituted: true,
                },
                0,
            ),
        };
        Some(selection)
    }
}

/// A criterion where the focal alternative leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthArea {
    pub criterion: String,
    pub score: i32,
    pub competitor_best: i32,
    pub recommendation: String,
}

/// A criterion where a competitor outscores the focal alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaknessArea {
    pub criterion: String,
    pub score: i32,
    pub competitor_best: i32,
    pub gap: i64,
    pub recommendation: String,
}

/// Urgency of an investment area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvestmentPriority {
    High,
    Medium,
    Low,
}

impl InvestmentPriority {
    /// High for a gap of 3 or more, Medium for 2, Low otherwise.
    pub fn from_gap(gap: i64) -> Self {
        if gap >= 3 {
            InvestmentPriority::High
        } else if gap >= 2 {
            InvestmentPriority::Medium
        } else {
            InvestmentPriority::Low
        }
    }
}

/// A criterion worth investing in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentArea {
    pub criterion: String,
    pub current_score: i32,
    pub target_score: i32,
    pub priority: InvestmentPriority,
    pub recommendation: String,
}

/// Qualitative market position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketPosition {
    #[serde(rename = "Leader")]
    Leader,
    #[serde(rename = "Strong Challenger")]
    StrongChallenger,
    #[serde(rename = "Competitive Underdog")]
    CompetitiveUnderdog,
}

impl MarketPosition {
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            1 => MarketPosition::Leader,
            2 => MarketPosition::StrongChallenger,
            _ => MarketPosition::CompetitiveUnderdog,
        }
    }
}

/// Where the focal alternative stands in the baseline ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocalPositionSummary {
    pub alternative: String,
    pub rank: usize,
    pub total_alternatives: usize,
    pub score: f64,
    pub share: f64,
    pub leader: String,
    pub gap_to_leader: f64,
    pub ahead_of: Vec<String>,
    pub behind: Vec<String>,
    pub position: MarketPosition,
    pub is_leader: bool,
    pub detail: String,
}

/// All focal diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocalInsights {
    pub selection: FocalSelection,
    pub strengths: Vec<StrengthArea>,
    pub weaknesses: Vec<WeaknessArea>,
    pub investment_areas: Vec<InvestmentArea>,
    pub position: FocalPositionSummary,
}

/// Produces diagnostics for one alternative.
pub struct FocalInsightGenerator;

impl FocalInsightGenerator {
    /// Builds the full diagnostics for the resolved focal alternative.
    ///
    /// Returns `None` only for a matrix without alternatives.
    pub fn generate(
        matrix: &DecisionMatrix,
        scores: &UtilityScores,
        shares: &MarketShares,
        score_range: ScoreRange,
    ) -> Option<FocalInsights> {
        let (selection, focal) = FocalSelection::resolve(matrix)?;
        let (strengths, weaknesses, investment_areas) =
            Self::classify(matrix, focal, score_range);
        let position = Self::position(&selection.analyzed, scores, shares);

        Some(FocalInsights {
            selection,
            strengths,
            weaknesses,
            investment_areas,
            position,
        })
    }

    /// Classifies every criterion for the alternative at row `focal`.
    ///
    /// # Rules
    /// With `s` the focal score and `best` the best competitor score
    /// (0 without competitors):
    /// - Strength: `s >= 8` and `s >= best`
    /// - Weakness: otherwise, when `best - s >= 1`
    /// - Investment: `s < 7` or `best - s >= 2`; target is `best + 1`
    ///   capped at the range maximum
    pub fn classify(
        matrix: &DecisionMatrix,
        focal: usize,
        score_range: ScoreRange,
    ) -> (Vec<StrengthArea>, Vec<WeaknessArea>, Vec<InvestmentArea>) {
        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();
        let mut investments = Vec::new();

        for (j, criterion) in matrix.criteria.iter().enumerate() {
            let Some(score) = matrix.score(focal, j) else {
                continue;
            };
            let best = (0..matrix.alternative_count())
                .filter(|&i| i != focal)
                .filter_map(|i| matrix.score(i, j))
                .max()
                .unwrap_or(0);
            let gap = i64::from(best) - i64::from(score);
            let name = criterion.to_lowercase();

            if score >= STRENGTH_THRESHOLD && score >= best {
                strengths.push(StrengthArea {
                    criterion: criterion.clone(),
                    score,
                    competitor_best: best,
                    recommendation: format!(
                        "Leverage your strong {} performance in marketing. You lead competitors here!",
                        name
                    ),
                });
            } else if gap >= WEAKNESS_GAP {
                weaknesses.push(WeaknessArea {
                    criterion: criterion.clone(),
                    score,
                    competitor_best: best,
                    gap,
                    recommendation: format!(
                        "Competitors outscore you by {} points in {}. Consider improvements.",
                        gap, name
                    ),
                });
            }

            if score < INVESTMENT_THRESHOLD || gap >= INVESTMENT_GAP {
                investments.push(InvestmentArea {
                    criterion: criterion.clone(),
                    current_score: score,
                    target_score: best.saturating_add(1).min(score_range.max),
                    priority: InvestmentPriority::from_gap(gap.max(0)),
                    recommendation: format!("Invest in {} to close the competitive gap", name),
                });
            }
        }

        (strengths, weaknesses, investments)
    }

    /// Ranks `focal` in the baseline scores.
    ///
    /// Ranking is by descending score; equal scores keep row order.
    pub fn position(focal: &str, scores: &UtilityScores, shares: &MarketShares) -> FocalPositionSummary {
        let ranked = scores.ranked();
        let rank = ranked
            .iter()
            .position(|(label, _)| *label == focal)
            .map_or(1, |i| i + 1);
        let (leader, leader_score) = ranked
            .first()
            .map(|(label, score)| (label.to_string(), *score))
            .unwrap_or_else(|| (focal.to_string(), 0.0));

        let score = scores.get(focal).unwrap_or_default();
        let share = shares.get(focal).unwrap_or_default();
        let is_leader = rank == 1;
        let gap_to_leader = if is_leader {
            0.0
        } else {
            precision::round2(leader_score - score)
        };

        let ahead_of = scores
            .iter()
            .filter(|(label, s)| *label != focal && *s < score)
            .map(|(label, _)| label.to_string())
            .collect();
        let behind = scores
            .iter()
            .filter(|(label, s)| *label != focal && *s > score)
            .map(|(label, _)| label.to_string())
            .collect();

        let position = MarketPosition::from_rank(rank);
        let detail = match position {
            MarketPosition::Leader => format!(
                "{} currently leads the market with {:.1}% predicted share.",
                focal, share
            ),
            MarketPosition::StrongChallenger => format!(
                "{} is the #2 player, {:.2} points behind {}.",
                focal, gap_to_leader, leader
            ),
            MarketPosition::CompetitiveUnderdog => format!(
                "{} ranks #{}, needs strategic improvements to compete.",
                focal, rank
            ),
        };

        FocalPositionSummary {
            alternative: focal.to_string(),
            rank,
            total_alternatives: scores.len(),
            score,
            share,
            leader,
            gap_to_leader,
            ahead_of,
            behind,
            position,
            is_leader,
            detail,
        }
    }
}
