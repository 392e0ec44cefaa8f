//! Property-based tests for the distance rules.
//!
//! Symmetry, identity and the ordering between the grid rules must hold for
//! any pair of positions on any valid grid.

use proptest::prelude::*;
use pythagoras_distance::{
    DistanceRule, GridConfig, Position, RankOrder, Token, dmg_distance, euclidean_distance,
    measure, phb_distance, rank_targets,
};

const EPSILON: f64 = 1e-9;

fn arb_position() -> impl Strategy<Value = Position> {
    (-5000.0f64..5000.0, -5000.0f64..5000.0, -500.0f64..500.0)
        .prop_map(|(x, y, elevation)| Position::new(x, y, elevation))
}

fn arb_grid() -> impl Strategy<Value = GridConfig> {
    (1.0f64..200.0, prop::sample::select(vec![1.0, 1.5, 2.0, 5.0, 10.0]))
        .prop_map(|(cell, unit)| GridConfig::new(cell, unit, "ft").unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        ..ProptestConfig::default()
    })]

    #[test]
    fn every_rule_is_symmetric(a in arb_position(), b in arb_position(), grid in arb_grid()) {
        for rule in DistanceRule::ALL {
            let forward = rule.distance(a, b, &grid);
            let backward = rule.distance(b, a, &grid);
            prop_assert!((forward - backward).abs() < EPSILON, "{} not symmetric", rule);
        }
    }

    #[test]
    fn distance_to_self_is_zero(a in arb_position(), grid in arb_grid()) {
        prop_assert_eq!(euclidean_distance(a, a, &grid), 0.0);
        prop_assert_eq!(phb_distance(a, a, &grid), 0.0);
        prop_assert_eq!(dmg_distance(a, a, &grid), 0.0);
    }

    #[test]
    fn distances_are_non_negative(a in arb_position(), b in arb_position(), grid in arb_grid()) {
        let result = measure(a, b, &grid);
        prop_assert!(result.euclid >= 0.0);
        prop_assert!(result.phb >= 0.0);
        prop_assert!(result.dmg >= 0.0);
    }

    #[test]
    fn dmg_never_below_phb(a in arb_position(), b in arb_position(), grid in arb_grid()) {
        let result = measure(a, b, &grid);
        prop_assert!(result.dmg >= result.phb);
    }

    #[test]
    fn grid_rules_are_whole_spaces(a in arb_position(), b in arb_position(), grid in arb_grid()) {
        let result = measure(a, b, &grid);
        for value in [result.phb, result.dmg] {
            let spaces = value / grid.unit_distance();
            prop_assert!((spaces - spaces.round()).abs() < 1e-6, "{} is not whole spaces", value);
        }
    }

    #[test]
    fn ranking_is_sorted(
        source in arb_position(),
        positions in prop::collection::vec(arb_position(), 0..12),
        grid in arb_grid(),
    ) {
        let source = Token::new("source", source).unwrap();
        let targets: Vec<Token> = positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| Token::new(format!("t{i}"), p).unwrap())
            .collect();

        let ranked = rank_targets(&source, &targets, &grid, RankOrder::Euclidean);
        prop_assert_eq!(ranked.len(), targets.len());
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].distances.euclid <= pair[1].distances.euclid);
        }
    }
}

#[test]
fn degenerate_grid_is_rejected() {
    assert!(GridConfig::new(0.0, 5.0, "ft").is_err());
    assert!(GridConfig::new(100.0, 0.0, "ft").is_err());
    assert!(GridConfig::new(f64::NAN, 5.0, "ft").is_err());
}
