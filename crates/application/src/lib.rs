//! Application layer for FareLane
//!
//! Defines the ports (external collaborator interfaces) and the services
//! that reconcile AI route estimations, resolved map paths, and user
//! selection into one consistent trip state.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::{
    Resolution, ResolutionError, ResolutionTicket, ResolverConfig, RouteResolver, RouteSyncState,
    TripSession,
};
