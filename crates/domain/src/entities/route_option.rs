//! Route option entity - one AI-suggested way of driving a trip

use serde::{Deserialize, Serialize};

/// Congestion level reported for a route option
///
/// Serialized with capitalized variant names ("Low", "Moderate", "Heavy") to
/// match the estimation provider's wire schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficLevel {
    /// Free-flowing traffic
    Low,
    /// Some congestion expected
    Moderate,
    /// Significant congestion expected
    Heavy,
}

impl TrafficLevel {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Heavy => "Heavy",
        }
    }
}

impl std::fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single route candidate within a trip estimation
///
/// `distance_km` and `duration_min` start out as AI estimates and are
/// overwritten in place with measured values once a real route is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOption {
    /// Identifier, unique within its trip estimation (e.g. "r1")
    pub id: String,
    /// Short route name (e.g. "Via Airport Road")
    pub name: String,
    /// One-line rationale for the route
    pub description: String,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Expected congestion
    pub traffic_level: TrafficLevel,
    /// Freeform short labels (e.g. "Fastest", "Shortest", "Alternative")
    pub tags: Vec<String>,
}

impl RouteOption {
    /// Check whether a tag is present (case-sensitive)
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
