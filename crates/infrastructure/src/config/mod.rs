//! Application configuration
//!
//! Aggregates the integration configs and the local state-file settings.
//! Values load from an optional `config` file (TOML/YAML/JSON) and are
//! overridden by `FARELANE_`-prefixed environment variables, e.g.
//! `FARELANE_MAPS_API_KEY`.

use ai_trip::TripAiConfig;
use integration_maps::MapsConfig;
use serde::{Deserialize, Serialize};

/// Local state-file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Path of the JSON file holding settings, history, and the stored
    /// maps credential
    #[serde(default = "default_state_path")]
    pub path: String,
}

fn default_state_path() -> String {
    "farelane_state.json".to_string()
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generative trip estimation configuration
    #[serde(default)]
    pub ai: TripAiConfig,

    /// Maps integration configuration; absent when no credential is
    /// configured (routing then runs on the straight-line fallback)
    #[serde(default)]
    pub maps: Option<MapsConfig>,

    /// Local state-file settings
    #[serde(default)]
    pub state: StateConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("FARELANE")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
