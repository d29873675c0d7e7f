//! Persisted client state ports
//!
//! Key-value style persistence for settings, trip history, and the optional
//! stored maps credential. Loaders return `None` on first run; callers
//! substitute defaults. There is no schema versioning.

use async_trait::async_trait;
use domain::{AppSettings, TripHistory};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Errors from the client-state store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateStoreError {
    /// Reading or writing the backing store failed
    #[error("State store I/O failed: {0}")]
    Io(String),

    /// Stored state could not be encoded or decoded
    #[error("State store serialization failed: {0}")]
    Serialization(String),
}

/// Port for persisted user settings
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the persisted settings; `None` on first run
    async fn load_settings(&self) -> Result<Option<AppSettings>, StateStoreError>;

    /// Persist the settings, replacing any previous value
    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StateStoreError>;
}

/// Port for the persisted trip history
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the persisted history; `None` on first run
    async fn load_history(&self) -> Result<Option<TripHistory>, StateStoreError>;

    /// Persist the history, replacing any previous value
    async fn save_history(&self, history: &TripHistory) -> Result<(), StateStoreError>;
}

/// Port for the optionally stored maps API credential
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the stored credential, if any
    async fn load_credential(&self) -> Result<Option<String>, StateStoreError>;

    /// Persist the credential, replacing any previous value
    async fn save_credential(&self, credential: &str) -> Result<(), StateStoreError>;
}
