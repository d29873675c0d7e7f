//! Configuration for the generative trip estimator

use serde::{Deserialize, Serialize};

/// Configuration for the generative trip estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripAiConfig {
    /// API key for the generative service
    ///
    /// Without a key the provider serves the built-in demo estimation and
    /// never goes on the network.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the generative API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

impl Default for TripAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl TripAiConfig {
    /// Config pointing at a local test server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            base_url: base_url.into(),
            model: default_model(),
            timeout_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_key() {
        let config = TripAiConfig::default();
        assert!(config.api_key.is_none());
        assert!(config.base_url.contains("generativelanguage"));
        assert_eq!(config.model, "gemini-3-flash-preview");
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: TripAiConfig = serde_json::from_str("{}").expect("parse");
        assert_eq!(config.timeout_ms, 30000);
    }
}
