//! Application services

mod route_resolver;
mod trip_session;

pub use route_resolver::{
    FALLBACK_MIN_PER_KM, Resolution, ResolutionError, ResolverConfig, RouteResolver,
};
pub use trip_session::{ResolutionTicket, RouteSyncState, TripSession};
