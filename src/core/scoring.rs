use std::collections::HashSet;

use chrono::NaiveDate;

use crate::core::distance::distance;
use crate::models::{CompatibilityResult, Coordinate, DimensionScores, Item, WeightOverrides, Weights};

/// Score used when a dimension cannot be evaluated for lack of data
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Default price tolerance in percent
pub const DEFAULT_PRICE_TOLERANCE: f64 = 20.0;

/// Compare two items across all dimensions
///
/// Scoring formula:
/// overall = (
///     location * weights.location +          # 0 at 10 km apart
///     price * weights.price +                # within tolerance = high
///     features * weights.features +          # shared / union
///     property_type * weights.property_type +  # exact category match
///     timing * weights.timing                # 0 at 100 days apart
/// )
///
/// This is a weighted sum, not a weighted average: with weights summing
/// above 1.0 the overall score can exceed 100. Dimension scores are rounded
/// individually for `details`; the overall score is rounded from the
/// unrounded dimension scores.
pub fn calculate_compatibility(a: &Item, b: &Item, weights: &Weights) -> CompatibilityResult {
    let location = location_score(a.location.as_ref(), b.location.as_ref());
    let price = price_compatibility(a.price, b.price, DEFAULT_PRICE_TOLERANCE);
    let features = features_compatibility(a.features.as_deref(), b.features.as_deref());
    let property_type = category_score(a.category.as_deref(), b.category.as_deref());
    let timing = timing_score(a.available_from, b.available_from);

    let overall = location * weights.location
        + price * weights.price
        + features * weights.features
        + property_type * weights.property_type
        + timing * weights.timing;

    CompatibilityResult {
        overall_score: round_score(overall),
        details: DimensionScores {
            location: round_score(location),
            price: round_score(price),
            features: round_score(features),
            property_type: round_score(property_type),
            timing: round_score(timing),
        },
        weights: *weights,
    }
}

/// Compare two items with overrides shallow-merged onto the default weights
pub fn score_pair(a: &Item, b: &Item, overrides: &WeightOverrides) -> CompatibilityResult {
    calculate_compatibility(a, b, &Weights::default().merge(overrides))
}

/// Same as [`calculate_compatibility`] but with weights rescaled to sum to 1.0
pub fn calculate_compatibility_normalized(a: &Item, b: &Item, weights: &Weights) -> CompatibilityResult {
    calculate_compatibility(a, b, &weights.normalized())
}

/// Location score (0-100)
/// Linear falloff, reaching zero at 10 km. Neutral when a location is missing.
pub fn location_score(a: Option<&Coordinate>, b: Option<&Coordinate>) -> f64 {
    let distance_km = distance(a, b);
    if !distance_km.is_finite() {
        return NEUTRAL_SCORE;
    }

    (100.0 - distance_km * 10.0).max(0.0)
}

/// Price score (0-100)
///
/// The difference is taken as a percentage of the average price. Inside the
/// tolerance the score drops one point per percent, past it two points per
/// percent over the tolerance. A missing or non-positive price scores 0.
pub fn price_compatibility(p1: Option<f64>, p2: Option<f64>, tolerance: f64) -> f64 {
    let (p1, p2) = match (p1, p2) {
        (Some(p1), Some(p2)) if p1 > 0.0 && p2 > 0.0 => (p1, p2),
        _ => return 0.0,
    };

    let average = (p1 + p2) / 2.0;
    let percentage_diff = (p1 - p2).abs() / average * 100.0;

    if percentage_diff <= tolerance {
        100.0 - percentage_diff
    } else {
        (100.0 - (percentage_diff - tolerance) * 2.0).max(0.0)
    }
}

/// Features score (0-100)
/// Shared features over all distinct features. Neutral when either side has none.
pub fn features_compatibility(a: Option<&[String]>, b: Option<&[String]>) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => (a, b),
        _ => return NEUTRAL_SCORE,
    };

    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let shared = a.intersection(&b).count() as f64;
    let union = a.union(&b).count() as f64;

    shared / union * 100.0
}

/// Category score: 100 on an exact match, otherwise 0
#[inline]
pub fn category_score(a: Option<&str>, b: Option<&str>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => 100.0,
        _ => 0.0,
    }
}

/// Timing score (0-100)
///
/// One point lost per day between availability dates. Neutral when only one
/// side has a date; two undated items carry no timing constraint and match fully.
pub fn timing_score(a: Option<NaiveDate>, b: Option<NaiveDate>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => {
            let days = (a - b).num_days().abs() as f64;
            (100.0 - days).max(0.0)
        }
        (None, None) => 100.0,
        _ => NEUTRAL_SCORE,
    }
}

#[inline]
fn round_score(score: f64) -> i64 {
    score.round() as i64
}
