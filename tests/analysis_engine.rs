//! Property and scenario tests for the sensitivity engine.
//!
//! These run the engine end-to-end on generated matrices and check the
//! invariants every analysis must satisfy regardless of input.

use proptest::prelude::*;

use strategix::domain::analysis::{
    DecisionMatrix, SensitivityEngine, StabilityAssessor, UtilityScorer, WeightSource,
    WeightVector, PERTURBATION_BOUNDS, TIPPING_POINT_DELTAS,
};
use strategix::domain::foundation::precision::round2;

// =============================================================================
// Strategies
// =============================================================================

fn matrix_with_scores<S>(score: S) -> impl Strategy<Value = DecisionMatrix>
where
    S: Strategy<Value = i32> + Clone + 'static,
{
    (1usize..=5, 1usize..=6)
        .prop_flat_map(move |(alts, crits)| {
            (
                Just(alts),
                Just(crits),
                prop::collection::vec(prop::collection::vec(score.clone(), crits), alts),
            )
        })
        .prop_map(|(alts, crits, payoffs)| {
            DecisionMatrix::builder()
                .alternatives((0..alts).map(|i| format!("Alt{}", i)).collect())
                .criteria((0..crits).map(|j| format!("C{}", j)).collect())
                .payoffs(payoffs)
                .entity("Acme")
                .market("Widgets")
                .focal("Alt0")
                .build()
        })
}

fn matrix_strategy() -> impl Strategy<Value = DecisionMatrix> {
    matrix_with_scores(0i32..=10)
}

/// Payoffs off the 0..=10 scale, including the `i32` extremes.
fn unscaled_matrix_strategy() -> impl Strategy<Value = DecisionMatrix> {
    matrix_with_scores(prop_oneof![
        Just(i32::MIN),
        Just(i32::MAX),
        -50i32..=50,
        any::<i32>(),
    ])
}

fn weighted_matrix_strategy() -> impl Strategy<Value = DecisionMatrix> {
    matrix_strategy().prop_flat_map(|matrix| {
        let n = matrix.criterion_count();
        (Just(matrix), prop::collection::vec(0.05f64..1.0, n))
    })
    .prop_map(|(mut matrix, weights)| {
        matrix.weight_override = Some(
            matrix
                .criteria
                .iter()
                .cloned()
                .zip(weights)
                .collect(),
        );
        matrix
    })
}

fn engine() -> SensitivityEngine {
    SensitivityEngine::default()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn effective_weights_sum_to_one(matrix in weighted_matrix_strategy()) {
        let result = engine().analyze(&matrix).unwrap();
        prop_assert_eq!(result.weight_source, WeightSource::Override);
        prop_assert!((result.weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn perturbed_weights_sum_to_one(
        raw in prop::collection::vec(0.01f64..1.0, 1..8),
        delta in -0.2f64..0.2,
        pick in any::<prop::sample::Index>(),
    ) {
        let weights = WeightVector::from_pairs(
            raw.iter().enumerate().map(|(i, w)| (format!("C{}", i), *w)),
        ).unwrap();
        let index = pick.index(weights.len());

        let perturbed = weights.perturbed(index, delta, PERTURBATION_BOUNDS).unwrap();
        prop_assert!((perturbed.weights.sum() - 1.0).abs() < 1e-9);
        prop_assert!(perturbed.raw_weight >= 0.01 && perturbed.raw_weight <= 0.50);
        prop_assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn market_shares_are_non_negative_and_sum_to_about_100(matrix in matrix_strategy()) {
        let result = engine().analyze(&matrix).unwrap();
        let n = result.market_share.len() as f64;

        prop_assert!(result.market_share.values().all(|s| s >= 0.0));
        prop_assert!((result.market_share.total() - 100.0).abs() <= 0.1 * n + 1e-9);
    }

    #[test]
    fn ranking_is_invariant_to_uniform_weight_scaling(
        matrix in weighted_matrix_strategy(),
        exponent in -2i32..=3,
    ) {
        let k = 2f64.powi(exponent);
        let mut scaled = matrix.clone();
        if let Some(weights) = scaled.weight_override.as_mut() {
            for value in weights.values_mut() {
                *value *= k;
            }
        }

        let base = engine().analyze(&matrix).unwrap();
        let rescaled = engine().analyze(&scaled).unwrap();
        prop_assert_eq!(base.utility_scores.ranked(), rescaled.utility_scores.ranked());
        prop_assert_eq!(base.leader, rescaled.leader);
    }

    #[test]
    fn tipping_points_are_exactly_the_leader_flips(matrix in matrix_strategy()) {
        let result = engine().analyze(&matrix).unwrap();
        let leader_score = result.leader_score();

        let mut flips = 0;
        for index in 0..matrix.criterion_count() {
            for &delta in &TIPPING_POINT_DELTAS {
                let perturbed = result.weights.perturbed(index, delta, PERTURBATION_BOUNDS).unwrap();
                let scores = UtilityScorer::compute_scores(&matrix, &perturbed.weights).unwrap();
                let leader = UtilityScorer::leader(&scores).unwrap();
                if leader != result.leader {
                    flips += 1;
                    let point = result
                        .tipping_points
                        .iter()
                        .find(|p| p.criterion == matrix.criteria[index] && p.weight_change == delta)
                        .unwrap();
                    prop_assert_eq!(point.new_leader.as_str(), leader);
                    let expected = round2(scores.get(leader).unwrap() - leader_score);
                    prop_assert_eq!(point.score_change, expected);
                }
            }
        }
        prop_assert_eq!(flips, result.tipping_points.len());
        prop_assert!(result.tipping_points.iter().all(|p| p.new_leader != p.previous_leader));
    }

    #[test]
    fn stability_never_increases_with_more_tipping_points(
        matrix in matrix_strategy(),
        count in 0usize..20,
    ) {
        let result = engine().analyze(&matrix).unwrap();
        let fewer = StabilityAssessor::stability_index(&result.utility_scores, count);
        let more = StabilityAssessor::stability_index(&result.utility_scores, count + 1);
        prop_assert!(more <= fewer);
        prop_assert!((0.0..=1.0).contains(&more));
    }

    #[test]
    fn unscaled_payoffs_analyze_to_finite_metrics(matrix in unscaled_matrix_strategy()) {
        let result = engine().analyze(&matrix).unwrap();

        prop_assert!((result.weights.sum() - 1.0).abs() < 1e-9);
        prop_assert!(result.utility_scores.values().all(f64::is_finite));
        prop_assert!(result.market_share.values().all(|s| s.is_finite() && s >= 0.0));
        prop_assert!((0.0..=1.0).contains(&result.stability_index));
        prop_assert!(result.confidence_metrics.overall.is_finite());
        prop_assert!(result.focal.weaknesses.iter().all(|w| w.gap >= 1));
        for (_, row) in result.competitive_gaps.iter() {
            prop_assert!(row.values().all(f64::is_finite));
        }
    }

    #[test]
    fn repeated_analysis_is_byte_identical(matrix in matrix_strategy()) {
        let first = serde_json::to_string(&engine().analyze(&matrix).unwrap()).unwrap();
        let second = serde_json::to_string(&engine().analyze(&matrix).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn gap_matrix_is_antisymmetric_without_self_entries(matrix in matrix_strategy()) {
        let result = engine().analyze(&matrix).unwrap();
        for a in &matrix.alternatives {
            prop_assert!(result.competitive_gaps.gap(a, a).is_none());
            for b in matrix.alternatives.iter().filter(|b| *b != a) {
                let ab = result.competitive_gaps.gap(a, b).unwrap();
                let ba = result.competitive_gaps.gap(b, a).unwrap();
                prop_assert!((ab + ba).abs() < 1e-9);
            }
        }
    }
}

// =============================================================================
// Worked Examples
// =============================================================================

fn compact_car_matrix() -> DecisionMatrix {
    DecisionMatrix::builder()
        .alternatives(vec!["Baleno", "Polo", "i20"])
        .criteria(vec!["Fuel", "Safety", "Tech", "Service", "Price"])
        .row(vec![8, 9, 7, 8, 6])
        .row(vec![7, 8, 9, 7, 7])
        .row(vec![9, 6, 8, 6, 9])
        .entity("Maruti Suzuki")
        .market("Compact Car Segment")
        .focal("Baleno")
        .build()
}

#[test]
fn compact_car_example_ranks_by_utility() {
    let result = engine().analyze(&compact_car_matrix()).unwrap();

    assert_eq!(result.weight_source, WeightSource::DomainDefault);
    assert_eq!(result.utility_scores.get("Baleno"), Some(7.85));
    assert_eq!(result.utility_scores.get("Polo"), Some(7.65));
    assert_eq!(result.utility_scores.get("i20"), Some(7.6));
    assert_eq!(result.leader, "Baleno");

    let baleno = result.market_share.get("Baleno").unwrap();
    let polo = result.market_share.get("Polo").unwrap();
    let i20 = result.market_share.get("i20").unwrap();
    assert!(baleno > polo && polo > i20);
}

#[test]
fn compact_car_example_reports_focal_position() {
    let result = engine().analyze(&compact_car_matrix()).unwrap();
    let focal = &result.focal;

    assert!(!focal.selection.substituted);
    assert_eq!(focal.selection.analyzed, "Baleno");
    assert!(focal.position.is_leader);
    assert_eq!(focal.position.rank, 1);
    assert_eq!(result.product_context.segment, "Compact Car Segment");
}

#[test]
fn results_serialize_with_wire_names() {
    let result = engine().analyze(&compact_car_matrix()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["optimalChoice"], "Baleno");
    assert_eq!(json["baseScores"]["Baleno"], 7.85);
    assert!(json["scenarioAnalysis"].is_array());
    assert!(json["competitiveGaps"]["Baleno"]["Polo"].is_number());
}

#[test]
fn extreme_payoffs_are_analyzed_without_overflow() {
    let matrix = DecisionMatrix::builder()
        .alternatives(vec!["Mine", "Theirs"])
        .criteria(vec!["Reach", "Price"])
        .row(vec![i32::MIN, 5])
        .row(vec![i32::MAX, 5])
        .focal("Mine")
        .build();

    let result = engine().analyze(&matrix).unwrap();

    assert_eq!(result.leader, "Theirs");
    let weakness = &result.focal.weaknesses[0];
    assert_eq!(weakness.criterion, "Reach");
    assert_eq!(weakness.gap, i64::from(i32::MAX) - i64::from(i32::MIN));
    assert_eq!(result.focal.investment_areas[0].target_score, 10);
}
