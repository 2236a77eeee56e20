// Model exports
pub mod de;
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CompatibilityResult, Coordinate, Dimension, DimensionScores, Item, RankedItem,
    WeightOverrides, Weights,
};
pub use requests::Preferences;
pub use responses::Stats;
