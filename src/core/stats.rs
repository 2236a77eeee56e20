use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{RankedItem, Stats};

/// Minimum overall score for an entry to count as a top match
pub const TOP_MATCH_THRESHOLD: i64 = 80;

/// Number of top matches kept in a summary
pub const TOP_MATCH_LIMIT: usize = 5;

/// Discrete quality band of a compatibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityBand {
    #[serde(rename = "poor")]
    Poor,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "fair")]
    Fair,
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "very good")]
    VeryGood,
    #[serde(rename = "excellent")]
    Excellent,
}

impl QualityBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityBand::Poor => "poor",
            QualityBand::Low => "low",
            QualityBand::Fair => "fair",
            QualityBand::Good => "good",
            QualityBand::VeryGood => "very good",
            QualityBand::Excellent => "excellent",
        }
    }
}

impl std::fmt::Display for QualityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a score to its quality band; each band includes its lower bound
pub fn quality_label(score: f64) -> QualityBand {
    if score >= 90.0 {
        QualityBand::Excellent
    } else if score >= 80.0 {
        QualityBand::VeryGood
    } else if score >= 70.0 {
        QualityBand::Good
    } else if score >= 60.0 {
        QualityBand::Fair
    } else if score >= 50.0 {
        QualityBand::Low
    } else {
        QualityBand::Poor
    }
}

/// Aggregate distribution statistics over scored entries
pub fn summarize(scored: &[RankedItem]) -> Stats {
    if scored.is_empty() {
        return Stats::default();
    }

    let total: i64 = scored.iter().map(RankedItem::overall_score).sum();
    let average_score = (total as f64 / scored.len() as f64).round() as i64;

    let mut score_distribution = BTreeMap::new();
    for entry in scored {
        *score_distribution.entry(bucket_label(entry.overall_score())).or_insert(0) += 1;
    }

    let top_matches = scored
        .iter()
        .filter(|entry| entry.overall_score() >= TOP_MATCH_THRESHOLD)
        .take(TOP_MATCH_LIMIT)
        .cloned()
        .collect();

    Stats {
        total_portfolios: scored.len(),
        average_score,
        score_distribution,
        top_matches,
    }
}

/// "80-89" style label of the ten-point bucket holding `score`
fn bucket_label(score: i64) -> String {
    let bucket = score.div_euclid(10) * 10;
    format!("{}-{}", bucket, bucket + 9)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompatibilityResult, DimensionScores, Item, Weights};

    fn entry(id: &str, score: i64) -> RankedItem {
        RankedItem {
            item: Item::new(id),
            compatibility: CompatibilityResult {
                overall_score: score,
                details: DimensionScores {
                    location: score,
                    price: score,
                    features: score,
                    property_type: score,
                    timing: score,
                },
                weights: Weights::default(),
            },
        }
    }

    #[test]
    fn test_quality_label_boundaries() {
        assert_eq!(quality_label(100.0), QualityBand::Excellent);
        assert_eq!(quality_label(90.0), QualityBand::Excellent);
        assert_eq!(quality_label(89.9), QualityBand::VeryGood);
        assert_eq!(quality_label(80.0), QualityBand::VeryGood);
        assert_eq!(quality_label(70.0), QualityBand::Good);
        assert_eq!(quality_label(60.0), QualityBand::Fair);
        assert_eq!(quality_label(50.0), QualityBand::Low);
        assert_eq!(quality_label(49.99), QualityBand::Poor);
        assert_eq!(quality_label(-10.0), QualityBand::Poor);
        assert_eq!(quality_label(f64::NAN), QualityBand::Poor);
    }

    #[test]
    fn test_quality_label_text() {
        assert_eq!(QualityBand::VeryGood.to_string(), "very good");
        assert_eq!(serde_json::to_value(QualityBand::VeryGood).unwrap(), "very good");
    }

    #[test]
    fn test_summarize_empty() {
        let stats = summarize(&[]);
        assert_eq!(stats.total_portfolios, 0);
        assert_eq!(stats.average_score, 0);
        assert!(stats.score_distribution.is_empty());
        assert!(stats.top_matches.is_empty());
    }

    #[test]
    fn test_summarize_buckets() {
        let scored = vec![entry("a", 95), entry("b", 82), entry("c", 80), entry("d", 41)];
        let stats = summarize(&scored);

        assert_eq!(stats.total_portfolios, 4);
        // (95 + 82 + 80 + 41) / 4 = 74.5
        assert_eq!(stats.average_score, 75);
        assert_eq!(stats.score_distribution.get("90-99"), Some(&1));
        assert_eq!(stats.score_distribution.get("80-89"), Some(&2));
        assert_eq!(stats.score_distribution.get("40-49"), Some(&1));

        let top: Vec<&str> = stats.top_matches.iter().map(|e| e.item.id.as_str()).collect();
        assert_eq!(top, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_summarize_caps_top_matches_in_input_order() {
        let scored: Vec<RankedItem> = (0..10).map(|i| entry(&i.to_string(), 82)).collect();
        let stats = summarize(&scored);

        assert_eq!(stats.score_distribution.len(), 1);
        assert_eq!(stats.score_distribution.get("80-89"), Some(&10));

        let top: Vec<&str> = stats.top_matches.iter().map(|e| e.item.id.as_str()).collect();
        assert_eq!(top, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_bucket_label() {
        assert_eq!(bucket_label(0), "0-9");
        assert_eq!(bucket_label(100), "100-109");
        assert_eq!(bucket_label(-5), "-10--1");
    }
}
