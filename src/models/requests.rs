use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::WeightOverrides;

/// Per-call ranking preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[validate(range(min = 0.0))]
    pub location_weight: Option<f64>,
    #[validate(range(min = 0.0))]
    pub price_weight: Option<f64>,
    #[validate(range(min = 0.0))]
    pub features_weight: Option<f64>,
    #[validate(range(min = 0.0))]
    pub property_type_weight: Option<f64>,
    #[validate(range(min = 0.0))]
    pub timing_weight: Option<f64>,
    #[validate(range(min = 0))]
    pub min_compatibility_score: Option<i64>,
    /// Kilometers
    #[validate(range(min = 0.0))]
    pub max_distance: Option<f64>,
    #[validate(range(min = 0.0))]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub max_price: Option<f64>,
    /// Falls back to the matcher's configured cap (20 unless configured)
    pub max_results: Option<usize>,
}

impl Preferences {
    /// Weight overrides named by this preference set
    pub fn weight_overrides(&self) -> WeightOverrides {
        WeightOverrides {
            location: self.location_weight,
            price: self.price_weight,
            features: self.features_weight,
            property_type: self.property_type_weight,
            timing: self.timing_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_fields() {
        let prefs: Preferences = serde_json::from_value(json!({
            "priceWeight": 0.5,
            "minCompatibilityScore": 60,
            "maxResults": 5
        }))
        .unwrap();

        assert_eq!(prefs.price_weight, Some(0.5));
        assert_eq!(prefs.min_compatibility_score, Some(60));
        assert_eq!(prefs.max_results, Some(5));
        assert_eq!(prefs.weight_overrides().location, None);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let prefs = Preferences {
            timing_weight: Some(-0.1),
            ..Default::default()
        };
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn test_empty_preferences_valid() {
        assert!(Preferences::default().validate().is_ok());
    }
}
