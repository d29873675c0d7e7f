//! Domain entities

mod resolved_path;
mod route_option;
mod settings;
mod trip_estimation;
mod trip_history;

pub use resolved_path::{PathAlternative, ResolvedPath};
pub use route_option::{RouteOption, TrafficLevel};
pub use settings::{AppSettings, Theme};
pub use trip_estimation::{
    STATS_DISTANCE_EPSILON_KM, STATS_DURATION_EPSILON_MIN, TripEstimation,
};
pub use trip_history::{HISTORY_CAPACITY, TripHistory};
