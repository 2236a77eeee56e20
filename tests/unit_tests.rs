// Unit tests for Listing Match

use listing_match::core::{
    distance::{distance, haversine_distance},
    scoring::{calculate_compatibility, features_compatibility, location_score, price_compatibility, NEUTRAL_SCORE},
    stats::{quality_label, QualityBand},
};
use listing_match::models::{Coordinate, Dimension, Item, Weights};

fn coords() -> Vec<Coordinate> {
    vec![
        Coordinate::new(41.0082, 28.9784),
        Coordinate::new(39.9334, 32.8597),
        Coordinate::new(-33.8688, 151.2093),
        Coordinate::new(0.0, 0.0),
        Coordinate::new(89.9, -179.9),
    ]
}

#[test]
fn test_distance_symmetry() {
    for a in coords() {
        for b in coords() {
            let there = distance(Some(&a), Some(&b));
            let back = distance(Some(&b), Some(&a));
            assert!((there - back).abs() < 1e-9, "{:?} {:?}", a, b);
            assert!(there >= 0.0);
        }
    }
}

#[test]
fn test_distance_to_self_is_zero() {
    for a in coords() {
        assert_eq!(distance(Some(&a), Some(&a)), 0.0);
    }
}

#[test]
fn test_missing_coordinate_is_infinite_and_scores_neutral() {
    for a in coords() {
        assert_eq!(distance(Some(&a), None), f64::INFINITY);
        assert_eq!(location_score(Some(&a), None), NEUTRAL_SCORE);
    }
}

#[test]
fn test_haversine_istanbul_to_ankara() {
    let d = haversine_distance(41.0082, 28.9784, 39.9334, 32.8597);
    assert!((d - 350.0).abs() < 15.0, "Expected ~350km, got {}", d);
}

#[test]
fn test_price_identical_is_full_score() {
    for p in [1.0, 99.99, 1_000_000.0, 3.5e9] {
        assert_eq!(price_compatibility(Some(p), Some(p), 20.0), 100.0);
    }
}

#[test]
fn test_price_symmetry() {
    let prices = [50.0, 100.0, 119.0, 180.0, 900_000.0];
    for p1 in prices {
        for p2 in prices {
            assert_eq!(
                price_compatibility(Some(p1), Some(p2), 20.0),
                price_compatibility(Some(p2), Some(p1), 20.0)
            );
        }
    }
}

#[test]
fn test_price_score_at_tolerance_edge() {
    // 90 vs 110: diff 20 over average 100 = exactly the tolerance
    assert!((price_compatibility(Some(90.0), Some(110.0), 20.0) - 80.0).abs() < 1e-9);
}

#[test]
fn test_features_empty_sets_neutral() {
    let empty: Vec<String> = Vec::new();
    assert_eq!(features_compatibility(Some(empty.as_slice()), Some(empty.as_slice())), 50.0);
    assert_eq!(features_compatibility(None, None), 50.0);
}

#[test]
fn test_features_identical_sets_full() {
    let set = vec!["balcony".to_string(), "garden".to_string(), "elevator".to_string()];
    assert_eq!(features_compatibility(Some(set.as_slice()), Some(set.as_slice())), 100.0);
}

#[test]
fn test_property_type_detail_follows_category() {
    let base = Item::new("a")
        .with_price(250_000.0)
        .with_location(41.0, 29.0)
        .with_features(["garden"]);

    let sale = base.clone().with_category("sale");
    let rent = base.clone().with_category("rent");

    let same = calculate_compatibility(&sale, &sale.clone(), &Weights::default());
    let differ = calculate_compatibility(&sale, &rent, &Weights::default());

    assert_eq!(same.details.get(Dimension::PropertyType), 100);
    assert_eq!(differ.details.get(Dimension::PropertyType), 0);
}

#[test]
fn test_missing_fields_never_produce_nan() {
    let bare = Item::new("bare");
    let result = calculate_compatibility(&bare, &bare.clone(), &Weights::default());

    // 50*0.30 + 0*0.25 + 50*0.20 + 0*0.15 + 100*0.10
    assert_eq!(result.overall_score, 35);
    assert_eq!(result.details.price, 0);
    assert_eq!(result.details.location, 50);
    assert_eq!(result.details.features, 50);
}

#[test]
fn test_quality_bands() {
    assert_eq!(quality_label(95.0), QualityBand::Excellent);
    assert_eq!(quality_label(85.0), QualityBand::VeryGood);
    assert_eq!(quality_label(75.0), QualityBand::Good);
    assert_eq!(quality_label(65.0), QualityBand::Fair);
    assert_eq!(quality_label(55.0), QualityBand::Low);
    assert_eq!(quality_label(5.0), QualityBand::Poor);
}
