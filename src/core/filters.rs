use crate::core::distance::distance;
use crate::models::{Item, RankedItem};

/// Keep entries scoring at least `min_score`
#[inline]
pub fn meets_min_score(entry: &RankedItem, min_score: Option<i64>) -> bool {
    match min_score {
        Some(min) => entry.overall_score() >= min,
        None => true,
    }
}

/// Keep candidates within `max_distance_km` of the query item
///
/// A candidate is kept when either side has no usable location, since the
/// distance cannot be known.
#[inline]
pub fn within_distance(query: &Item, candidate: &Item, max_distance_km: Option<f64>) -> bool {
    let Some(max) = max_distance_km else {
        return true;
    };

    let distance_km = distance(query.location.as_ref(), candidate.location.as_ref());
    !distance_km.is_finite() || distance_km <= max
}

/// Keep candidates priced inside the bounds
///
/// Candidates without a price (or priced at zero) are kept.
#[inline]
pub fn within_price_bounds(candidate: &Item, min_price: Option<f64>, max_price: Option<f64>) -> bool {
    let price = match candidate.price {
        Some(price) if price > 0.0 => price,
        _ => return true,
    };

    if let Some(min) = min_price {
        if price < min {
            return false;
        }
    }

    if let Some(max) = max_price {
        if price > max {
            return false;
        }
    }

    true
}
