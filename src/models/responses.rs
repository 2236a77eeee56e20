use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::domain::RankedItem;

/// Distribution summary over a scored set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_portfolios: usize,
    pub average_score: i64,
    /// "80-89" style bucket label to count
    pub score_distribution: BTreeMap<String, usize>,
    pub top_matches: Vec<RankedItem>,
}
