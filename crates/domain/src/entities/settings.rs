//! Persisted user settings

use serde::{Deserialize, Serialize};

/// UI theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// User-tunable application settings
///
/// Stored as a small JSON document; readers must tolerate absence (first
/// run) by substituting these defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Currency symbol used as a fare prefix
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Fare rate per kilometer
    #[serde(default = "default_rate_per_km")]
    pub rate_per_km: f64,
    /// UI theme
    #[serde(default)]
    pub theme: Theme,
}

fn default_currency() -> String {
    "\u{20a6}".to_string() // Nigerian naira
}

const fn default_rate_per_km() -> f64 {
    500.0
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            rate_per_km: default_rate_per_km(),
            theme: Theme::default(),
        }
    }
}

impl AppSettings {
    /// Toggle the theme in place
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}
