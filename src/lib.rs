//! Listing Match - compatibility scoring and ranking for property listings
//!
//! This library scores how well candidate listings fit a query listing along
//! location, price, features, property type and timing, then ranks, filters
//! and caps the candidates. The core is pure and synchronous; `services`
//! adds an optional async actor for staleness reminders around it.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::{distance, haversine_distance},
    scoring::calculate_compatibility,
    stats::{quality_label, summarize, QualityBand},
    Matcher,
};
pub use crate::error::{MatchError, Result};
pub use crate::models::{
    CompatibilityResult, Coordinate, Item, Preferences, RankedItem, Stats, WeightOverrides,
    Weights,
};
