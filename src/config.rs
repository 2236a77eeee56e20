use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::DEFAULT_MAX_RESULTS;
use crate::models::Weights;

/// Engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub reminders: ReminderSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    /// Rescale weights to sum to 1.0 before scoring
    #[serde(default)]
    pub normalize_weights: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_price_weight")]
    pub price: f64,
    #[serde(default = "default_features_weight")]
    pub features: f64,
    #[serde(default = "default_property_type_weight")]
    pub property_type: f64,
    #[serde(default = "default_timing_weight")]
    pub timing: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            location: default_location_weight(),
            price: default_price_weight(),
            features: default_features_weight(),
            property_type: default_property_type_weight(),
            timing: default_timing_weight(),
        }
    }
}

impl From<WeightsConfig> for Weights {
    fn from(config: WeightsConfig) -> Self {
        Weights {
            location: config.location,
            price: config.price,
            features: config.features,
            property_type: config.property_type,
            timing: config.timing,
        }
    }
}

fn default_location_weight() -> f64 { 0.30 }
fn default_price_weight() -> f64 { 0.25 }
fn default_features_weight() -> f64 { 0.20 }
fn default_property_type_weight() -> f64 { 0.15 }
fn default_timing_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize { DEFAULT_MAX_RESULTS }

#[derive(Debug, Clone, Deserialize)]
pub struct ReminderSettings {
    /// Days since the last update at which a reminder is due
    #[serde(default = "default_reminder_days")]
    pub reminder_days: Vec<u32>,
    /// Listings untouched this many days are hidden from ranking
    #[serde(default = "default_hide_after_days")]
    pub hide_after_days: u32,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            reminder_days: default_reminder_days(),
            hide_after_days: default_hide_after_days(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_reminder_days() -> Vec<u32> { vec![10, 20, 30, 45] }
fn default_hide_after_days() -> u32 { 45 }
fn default_poll_interval_secs() -> u64 { 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MATCH__), `.env` included
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCH__SCORING__WEIGHTS__PRICE -> scoring.weights.price
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Parse configuration from an in-memory TOML document
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        toml::from_str(document).map_err(|e| ConfigError::Message(e.to_string()))
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("MATCH")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("reminders.reminder_days")
        .try_parsing(true)
}
