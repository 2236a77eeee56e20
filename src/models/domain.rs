use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::stats::{quality_label, QualityBand};
use crate::models::de;

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both components are finite numbers
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A listing record, used both as the query item and as a candidate
///
/// Every scored field is optional. Unknown fields are kept in `extra` and
/// serialized back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "de::lenient_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::lenient_number")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::lenient_location")]
    pub location: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::lenient_features")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::lenient_category")]
    pub category: Option<String>,
    #[serde(
        rename = "availableFrom",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_date"
    )]
    pub available_from: Option<NaiveDate>,
    /// Last time the owner touched the listing; only the reminder policy reads it
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(Coordinate::new(latitude, longitude));
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_available_from(mut self, date: NaiveDate) -> Self {
        self.available_from = Some(date);
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }
}

/// The five scored dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Location,
    Price,
    Features,
    PropertyType,
    Timing,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Location,
        Dimension::Price,
        Dimension::Features,
        Dimension::PropertyType,
        Dimension::Timing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Location => "location",
            Dimension::Price => "price",
            Dimension::Features => "features",
            Dimension::PropertyType => "propertyType",
            Dimension::Timing => "timing",
        }
    }
}

/// Scoring weights
///
/// Combined as a plain weighted sum. Weights that do not add up to 1.0 are
/// accepted and push the overall score outside 0-100; use
/// [`Weights::normalized`] to opt into rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weights {
    pub location: f64,
    pub price: f64,
    pub features: f64,
    pub property_type: f64,
    pub timing: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            location: 0.30,
            price: 0.25,
            features: 0.20,
            property_type: 0.15,
            timing: 0.10,
        }
    }
}

impl Weights {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Location => self.location,
            Dimension::Price => self.price,
            Dimension::Features => self.features,
            Dimension::PropertyType => self.property_type,
            Dimension::Timing => self.timing,
        }
    }

    pub fn sum(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    /// Shallow merge: named overrides replace, the rest keep their value
    pub fn merge(&self, overrides: &WeightOverrides) -> Weights {
        Weights {
            location: overrides.location.unwrap_or(self.location),
            price: overrides.price.unwrap_or(self.price),
            features: overrides.features.unwrap_or(self.features),
            property_type: overrides.property_type.unwrap_or(self.property_type),
            timing: overrides.timing.unwrap_or(self.timing),
        }
    }

    /// Rescale so the weights sum to 1.0. A zero sum is returned unchanged.
    pub fn normalized(&self) -> Weights {
        let sum = self.sum();
        if sum <= 0.0 || !sum.is_finite() {
            return *self;
        }

        Weights {
            location: self.location / sum,
            price: self.price / sum,
            features: self.features / sum,
            property_type: self.property_type / sum,
            timing: self.timing / sum,
        }
    }
}

/// Per-call weight overrides; `None` keeps the base weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightOverrides {
    pub location: Option<f64>,
    pub price: Option<f64>,
    pub features: Option<f64>,
    pub property_type: Option<f64>,
    pub timing: Option<f64>,
}

/// Rounded score of each dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScores {
    pub location: i64,
    pub price: i64,
    pub features: i64,
    pub property_type: i64,
    pub timing: i64,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> i64 {
        match dimension {
            Dimension::Location => self.location,
            Dimension::Price => self.price,
            Dimension::Features => self.features,
            Dimension::PropertyType => self.property_type,
            Dimension::Timing => self.timing,
        }
    }
}

/// Outcome of comparing two items
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    /// Rounded weighted sum; may exceed 100 with weights summing above 1.0
    pub overall_score: i64,
    pub details: DimensionScores,
    pub weights: Weights,
}

/// A candidate annotated with its compatibility against the query item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    #[serde(flatten)]
    pub item: Item,
    pub compatibility: CompatibilityResult,
}

impl RankedItem {
    pub fn overall_score(&self) -> i64 {
        self.compatibility.overall_score
    }

    pub fn quality(&self) -> QualityBand {
        quality_label(self.compatibility.overall_score as f64)
    }
}
