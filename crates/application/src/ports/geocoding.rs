//! Geocoding service port
//!
//! Interface for resolving free-text addresses to coordinates and back.

use async_trait::async_trait;
use domain::Coordinates;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// A rectangular map viewport used to bias geocoding results
///
/// Biasing toward the current viewport prefers local matches over
/// globally-similar place names ("Bosso" in Minna, not elsewhere).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// South-west corner
    pub southwest: Coordinates,
    /// North-east corner
    pub northeast: Coordinates,
}

impl Viewport {
    /// Create a viewport from its corners
    #[must_use]
    pub const fn new(southwest: Coordinates, northeast: Coordinates) -> Self {
        Self {
            southwest,
            northeast,
        }
    }

    /// A square viewport centered on a point, `half_span` degrees per side
    #[must_use]
    pub fn around(center: Coordinates, half_span: f64) -> Self {
        Self {
            southwest: Coordinates::new_unchecked(
                (center.latitude() - half_span).max(-90.0),
                (center.longitude() - half_span).max(-180.0),
            ),
            northeast: Coordinates::new_unchecked(
                (center.latitude() + half_span).min(90.0),
                (center.longitude() + half_span).min(180.0),
            ),
        }
    }
}

/// Geocoding failure categories
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeFailure {
    /// The address could not be resolved to coordinates
    #[error("Address not found: {0}")]
    NotFound(String),

    /// Transport or service error
    #[error("Geocoding request failed: {0}")]
    Service(String),
}

/// Port for the geocoding service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a free-text address to coordinates
    ///
    /// When `bias` is given, results inside that viewport are preferred.
    async fn geocode(
        &self,
        address: &str,
        bias: Option<Viewport>,
    ) -> Result<Coordinates, GeocodeFailure>;

    /// Resolve coordinates to a human-readable address
    async fn reverse_geocode(&self, point: Coordinates) -> Result<String, GeocodeFailure>;
}
