//! Device location port

use async_trait::async_trait;
use domain::Coordinates;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Device location failure categories
///
/// Always non-fatal: a failed lookup surfaces as a transient message and
/// blocks nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationFailure {
    /// The user denied the location permission
    #[error("Location permission denied")]
    PermissionDenied,

    /// No position could be determined
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Port for the device's positioning capability
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeviceLocationPort: Send + Sync {
    /// Get the device's current position
    async fn current_position(&self) -> Result<Coordinates, LocationFailure>;
}
