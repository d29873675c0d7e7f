//! Directions service port
//!
//! Interface to the third-party driving-directions service.

use std::fmt;

use async_trait::async_trait;
use domain::{Coordinates, PathAlternative, Place};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// A routable endpoint: either free text or a resolved point
///
/// Coordinates take priority over text when both are known for a place.
#[derive(Debug, Clone, PartialEq)]
pub enum Waypoint {
    /// Free-text address or place name
    Address(String),
    /// Resolved coordinates
    Point(Coordinates),
}

impl Waypoint {
    /// Build the waypoint for a place, preferring coordinates over text
    #[must_use]
    pub fn from_place(place: &Place) -> Self {
        place
            .coordinates()
            .map_or_else(|| Self::Address(place.label().to_string()), Self::Point)
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{address}"),
            Self::Point(point) => write!(f, "{:.6},{:.6}", point.latitude(), point.longitude()),
        }
    }
}

/// A driving-directions request
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    /// Trip origin
    pub origin: Waypoint,
    /// Trip destination
    pub destination: Waypoint,
    /// Whether alternative routes should be returned
    pub alternatives: bool,
}

impl DirectionsRequest {
    /// A driving request with alternatives enabled
    #[must_use]
    pub const fn driving(origin: Waypoint, destination: Waypoint) -> Self {
        Self {
            origin,
            destination,
            alternatives: true,
        }
    }
}

/// Typed failure categories of the directions service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingFailure {
    /// The service refused the request (credential/permission issue)
    #[error("Directions access denied: {0}")]
    Denied(String),

    /// No drivable path exists between the endpoints
    #[error("No drivable route from {from} to {to}")]
    NotFound {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// Request quota exhausted; no automatic retry is attempted
    #[error("Directions quota exceeded")]
    QuotaExceeded,

    /// Transport error or an unrecognized service status
    #[error("Directions request failed: {0}")]
    Other(String),
}

impl RoutingFailure {
    /// Dismissible notice text shown to the user
    #[must_use]
    pub fn user_notice(&self) -> String {
        match self {
            Self::Denied(_) => "Directions API disabled. Check Cloud Console.".to_string(),
            Self::NotFound { .. } => "No driving route found. Try specific addresses.".to_string(),
            Self::QuotaExceeded => "API Quota exceeded.".to_string(),
            Self::Other(status) => format!("Route calculation failed: {status}"),
        }
    }
}

/// Port for the directions service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectionsPort: Send + Sync {
    /// Fetch driving directions, ranked best-first
    ///
    /// A successful response carries at least the primary route; when
    /// `alternatives` was requested the service may append more.
    async fn route(
        &self,
        request: DirectionsRequest,
    ) -> Result<Vec<PathAlternative>, RoutingFailure>;
}
