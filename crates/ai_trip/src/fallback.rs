//! Built-in demo estimation
//!
//! Served whenever the generative API is unconfigured, unreachable, or
//! returns something unusable. The three routes model a typical Minna trip
//! and line up with the distances the fare examples are quoted against.

use domain::{RouteOption, TrafficLevel, TripEstimation};

/// Build the demo estimation for the given endpoints
#[must_use]
pub fn demo_estimation(pickup: &str, dropoff: &str) -> TripEstimation {
    TripEstimation::new(pickup, dropoff, demo_routes(), "r1")
}

fn demo_routes() -> Vec<RouteOption> {
    vec![
        RouteOption {
            id: "r1".to_string(),
            name: "Via Airport Road".to_string(),
            description: "The fastest route avoiding major city congestion.".to_string(),
            distance_km: 12.5,
            duration_min: 22.0,
            traffic_level: TrafficLevel::Low,
            tags: vec!["Fastest".to_string(), "Recommended".to_string()],
        },
        RouteOption {
            id: "r2".to_string(),
            name: "Via Ahmsdu Bahago Road/Mu'azu Mohammed Road".to_string(),
            description: "Direct route through the commercial district.".to_string(),
            distance_km: 13.2,
            duration_min: 26.0,
            traffic_level: TrafficLevel::Moderate,
            tags: vec!["Alternative".to_string()],
        },
        RouteOption {
            id: "r3".to_string(),
            name: "Via Minna - Zungeru Rd/Tegina-Akusu-Minna Rd".to_string(),
            description: "Shortest physical distance but encounters local traffic.".to_string(),
            distance_km: 9.3,
            duration_min: 18.0,
            traffic_level: TrafficLevel::Heavy,
            tags: vec!["Shortest".to_string()],
        },
    ]
}
