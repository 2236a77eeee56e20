// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod stats;

pub use distance::{distance, haversine_distance};
pub use filters::{meets_min_score, within_distance, within_price_bounds};
pub use matcher::{Matcher, DEFAULT_MAX_RESULTS};
pub use scoring::{
    calculate_compatibility, calculate_compatibility_normalized, category_score,
    features_compatibility, location_score, price_compatibility, score_pair, timing_score,
    DEFAULT_PRICE_TOLERANCE, NEUTRAL_SCORE,
};
pub use stats::{quality_label, summarize, QualityBand};
