//! Domain layer for FareLane
//!
//! Contains the trip estimation entities, value objects, fare calculation,
//! and domain errors. This layer has no I/O dependencies and defines the
//! ubiquitous language of the fare estimator.

pub mod entities;
pub mod errors;
pub mod fare;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
