//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::ports::StateStoreError;

/// Errors that can occur in the application layer
///
/// Routing and geocoding failures are not listed here: they stay typed as
/// [`crate::services::ResolutionError`] on the trip session, where they are
/// dismissible rather than propagated. Every variant is recoverable by user
/// action.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Persisted client state could not be read or written
    #[error(transparent)]
    Store(#[from] StateStoreError),

    /// Device location is unavailable or was denied
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),
}
