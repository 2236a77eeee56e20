use serde_json::Value;
use validator::Validate;

use crate::config::Settings;
use crate::core::{
    filters::{meets_min_score, within_distance, within_price_bounds},
    scoring::calculate_compatibility,
};
use crate::error::{MatchError, Result};
use crate::models::{Item, Preferences, RankedItem, Weights};

/// Result cap used when neither preferences nor settings name one
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Key the score annotation is serialized under, next to the item's own fields
const COMPATIBILITY_KEY: &str = "compatibility";

/// Ranking orchestrator - scores a candidate set against one query item
///
/// # Pipeline Stages
/// 1. Weight resolution (preference overrides merged onto base weights)
/// 2. Scoring of every candidate
/// 3. Stable sort by overall score, descending
/// 4. Minimum score, distance and price filters
/// 5. Truncation to the result cap
///
/// The matcher holds no mutable state; one instance can be shared freely.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: Weights,
    normalize_weights: bool,
    max_results: usize,
}

impl Matcher {
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            normalize_weights: false,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(Weights::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.scoring.weights.into())
            .with_normalized_weights(settings.scoring.normalize_weights)
            .with_max_results(settings.ranking.max_results)
    }

    /// Rescale resolved weights to sum to 1.0 before scoring
    pub fn with_normalized_weights(mut self, normalize: bool) -> Self {
        self.normalize_weights = normalize;
        self
    }

    /// Result cap applied when preferences do not set `maxResults`
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Weights used for a call with these preferences
    pub fn resolve_weights(&self, preferences: &Preferences) -> Weights {
        let merged = self.weights.merge(&preferences.weight_overrides());
        if self.normalize_weights {
            merged.normalized()
        } else {
            merged
        }
    }

    /// Rank candidates against a query item
    ///
    /// # Arguments
    /// * `query` - The item candidates are compared to; `None` yields no results
    /// * `candidates` - Candidate items, left untouched
    /// * `preferences` - Weight overrides, filters and result cap
    ///
    /// # Returns
    /// Annotated copies of the surviving candidates, best first. Equal scores
    /// keep their input order.
    pub fn rank(
        &self,
        query: Option<&Item>,
        candidates: &[Item],
        preferences: &Preferences,
    ) -> Vec<RankedItem> {
        let query = match query {
            Some(query) if !candidates.is_empty() => query,
            _ => return Vec::new(),
        };

        let weights = self.resolve_weights(preferences);
        let max_results = preferences.max_results.unwrap_or(self.max_results);

        let mut ranked: Vec<RankedItem> = candidates
            .iter()
            .map(|candidate| {
                let compatibility = calculate_compatibility(query, candidate, &weights);
                tracing::trace!(
                    "Scored candidate {} against {}: {}",
                    candidate.id,
                    query.id,
                    compatibility.overall_score
                );
                let mut item = candidate.clone();
                // A passthrough field of the same name would serialize as a duplicate key
                item.extra.remove(COMPATIBILITY_KEY);
                RankedItem { item, compatibility }
            })
            .collect();

        // sort_by is stable, so ties keep input order
        ranked.sort_by(|a, b| b.overall_score().cmp(&a.overall_score()));

        let ranked: Vec<RankedItem> = ranked
            .into_iter()
            .filter(|entry| meets_min_score(entry, preferences.min_compatibility_score))
            .filter(|entry| within_distance(query, &entry.item, preferences.max_distance))
            .filter(|entry| {
                within_price_bounds(&entry.item, preferences.min_price, preferences.max_price)
            })
            .take(max_results)
            .collect();

        tracing::debug!(
            "Ranked {} of {} candidates for {} (cap {})",
            ranked.len(),
            candidates.len(),
            query.id,
            max_results
        );

        ranked
    }

    /// Rank loosely shaped JSON records
    ///
    /// Fails with [`MatchError::InvalidInput`] when `candidates` is not an
    /// array or holds a non-object entry, and with
    /// [`MatchError::Validation`] when preferences are out of range. A null
    /// query yields no results.
    pub fn rank_value(
        &self,
        query: &Value,
        candidates: &Value,
        preferences: &Value,
    ) -> Result<Vec<RankedItem>> {
        let raw_candidates = candidates.as_array().ok_or_else(|| {
            MatchError::InvalidInput(format!(
                "candidates must be an array, got {}",
                json_kind(candidates)
            ))
        })?;

        let candidates = raw_candidates
            .iter()
            .enumerate()
            .map(|(index, raw)| parse_item(raw, &format!("candidate {}", index)))
            .collect::<Result<Vec<Item>>>()?;

        let query = match query {
            Value::Null => None,
            raw => Some(parse_item(raw, "query item")?),
        };

        let preferences: Preferences = match preferences {
            Value::Null => Preferences::default(),
            raw => serde_json::from_value(raw.clone())?,
        };
        preferences.validate()?;

        Ok(self.rank(query.as_ref(), &candidates, &preferences))
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn parse_item(raw: &Value, what: &str) -> Result<Item> {
    if !raw.is_object() {
        return Err(MatchError::InvalidInput(format!(
            "{} must be an object, got {}",
            what,
            json_kind(raw)
        )));
    }

    serde_json::from_value(raw.clone())
        .map_err(|e| MatchError::InvalidInput(format!("{} is malformed: {}", what, e)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
