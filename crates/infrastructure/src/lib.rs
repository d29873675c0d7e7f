//! Infrastructure layer - adapters for external systems
//!
//! Implements the persistence ports defined in the application layer and
//! hosts the configuration loader and telemetry setup.

pub mod config;
pub mod persistence;
pub mod telemetry;

pub use config::{AppConfig, StateConfig};
pub use persistence::JsonClientStateStore;
pub use telemetry::init_telemetry;
