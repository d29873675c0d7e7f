//! Trip estimation aggregate
//!
//! One AI-generated set of route candidates for a pickup/dropoff pair.
//! Immutable after creation except for the in-place overwrite of a route's
//! distance/duration with measured values from a resolved path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::RouteOption;

/// Distance delta below which a measured-stats update is ignored (km)
///
/// Tunable heuristic: suppresses state churn from floating-point jitter
/// across repeated resolutions of the same route.
pub const STATS_DISTANCE_EPSILON_KM: f64 = 0.05;

/// Duration delta below which a measured-stats update is ignored (minutes)
pub const STATS_DURATION_EPSILON_MIN: f64 = 1.0;

/// A trip estimation: ordered route candidates plus the provider's pick
///
/// Route order is the provider's return order and is significant: the Nth
/// directions-service alternative is assumed to correspond to the Nth route
/// option. That positional alignment is a known approximation carried over
/// from the original design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripEstimation {
    /// Unique identifier for this calculation
    pub id: String,
    /// Pickup label as entered by the user
    pub pickup: String,
    /// Dropoff label as entered by the user
    pub dropoff: String,
    /// Route candidates in provider order
    pub routes: Vec<RouteOption>,
    /// Id of the provider-recommended route; empty when `routes` is empty
    pub recommended_route_id: String,
    /// When this estimation was created
    pub timestamp: DateTime<Utc>,
}

impl TripEstimation {
    /// Create a new estimation with a fresh id and current timestamp
    #[must_use]
    pub fn new(
        pickup: impl Into<String>,
        dropoff: impl Into<String>,
        routes: Vec<RouteOption>,
        recommended_route_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pickup: pickup.into(),
            dropoff: dropoff.into(),
            routes,
            recommended_route_id: recommended_route_id.into(),
            timestamp: Utc::now(),
        }
    }

    /// Look up a route by id
    #[must_use]
    pub fn route(&self, route_id: &str) -> Option<&RouteOption> {
        self.routes.iter().find(|r| r.id == route_id)
    }

    /// Position of a route within the candidate list
    #[must_use]
    pub fn route_index(&self, route_id: &str) -> Option<usize> {
        self.routes.iter().position(|r| r.id == route_id)
    }

    /// Whether a route with this id exists
    #[must_use]
    pub fn contains_route(&self, route_id: &str) -> bool {
        self.route(route_id).is_some()
    }

    /// The recommended route, when the id references an existing route
    #[must_use]
    pub fn recommended_route(&self) -> Option<&RouteOption> {
        self.route(&self.recommended_route_id)
    }

    /// Invariant check: a non-empty estimation must recommend one of its
    /// own routes
    #[must_use]
    pub fn has_valid_recommendation(&self) -> bool {
        if self.routes.is_empty() {
            self.recommended_route_id.is_empty()
        } else {
            self.contains_route(&self.recommended_route_id)
        }
    }

    /// Overwrite a route's stats with measured values from a resolved path
    ///
    /// Ignores updates within the noise thresholds so repeated resolutions
    /// of the same path do not churn state. Returns `true` if the route was
    /// actually modified; unknown ids are a no-op.
    pub fn apply_measured_stats(
        &mut self,
        route_id: &str,
        distance_km: f64,
        duration_min: f64,
    ) -> bool {
        let Some(route) = self.routes.iter_mut().find(|r| r.id == route_id) else {
            return false;
        };

        if (route.distance_km - distance_km).abs() < STATS_DISTANCE_EPSILON_KM
            && (route.duration_min - duration_min).abs() < STATS_DURATION_EPSILON_MIN
        {
            return false;
        }

        route.distance_km = distance_km;
        route.duration_min = duration_min;
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::entities::TrafficLevel;

    use super::*;

    fn route(id: &str, distance_km: f64, duration_min: f64) -> RouteOption {
        RouteOption {
            id: id.to_string(),
            name: format!("Route {id}"),
            description: String::new(),
            distance_km,
            duration_min,
            traffic_level: TrafficLevel::Low,
            tags: vec![],
        }
    }

    fn sample_trip() -> TripEstimation {
        TripEstimation::new(
            "Tunga",
            "Bosso",
            vec![route("r1", 12.5, 22.0), route("r2", 13.2, 26.0)],
            "r1",
        )
    }

    #[test]
    fn new_trip_has_unique_id_and_valid_recommendation() {
        let a = sample_trip();
        let b = sample_trip();
        assert_ne!(a.id, b.id);
        assert!(a.has_valid_recommendation());
    }

    #[test]
    fn empty_routes_require_empty_recommendation() {
        let trip = TripEstimation::new("A", "B", vec![], "");
        assert!(trip.has_valid_recommendation());

        let bad = TripEstimation::new("A", "B", vec![], "r1");
        assert!(!bad.has_valid_recommendation());
    }

    #[test]
    fn dangling_recommendation_is_invalid() {
        let trip = TripEstimation::new("A", "B", vec![route("r1", 1.0, 1.0)], "r9");
        assert!(!trip.has_valid_recommendation());
    }

    #[test]
    fn route_lookup_by_id_and_index() {
        let trip = sample_trip();
        assert_eq!(trip.route("r2").map(|r| r.id.as_str()), Some("r2"));
        assert_eq!(trip.route_index("r2"), Some(1));
        assert!(trip.route("r9").is_none());
        assert_eq!(trip.route_index("r9"), None);
    }

    #[test]
    fn measured_stats_overwrite_in_place() {
        let mut trip = sample_trip();
        assert!(trip.apply_measured_stats("r1", 11.8, 19.0));
        let r1 = trip.route("r1").expect("r1 exists");
        assert!((r1.distance_km - 11.8).abs() < f64::EPSILON);
        assert!((r1.duration_min - 19.0).abs() < f64::EPSILON);
    }

    #[test]
    fn measured_stats_within_noise_threshold_are_ignored() {
        let mut trip = sample_trip();
        assert!(!trip.apply_measured_stats("r1", 12.51, 22.4));
        let r1 = trip.route("r1").expect("r1 exists");
        assert!((r1.distance_km - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn measured_stats_distance_alone_crosses_threshold() {
        let mut trip = sample_trip();
        assert!(trip.apply_measured_stats("r1", 12.6, 22.0));
    }

    #[test]
    fn measured_stats_duration_alone_crosses_threshold() {
        let mut trip = sample_trip();
        assert!(trip.apply_measured_stats("r1", 12.5, 24.0));
    }

    #[test]
    fn measured_stats_unknown_route_is_noop() {
        let mut trip = sample_trip();
        assert!(!trip.apply_measured_stats("r9", 1.0, 1.0));
        assert!((trip.route("r1").expect("r1").distance_km - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_apply_is_idempotent() {
        let mut trip = sample_trip();
        assert!(trip.apply_measured_stats("r1", 11.8, 19.0));
        assert!(!trip.apply_measured_stats("r1", 11.8, 19.0));
    }

    #[test]
    fn serialization_roundtrip_preserves_route_order() {
        let trip = sample_trip();
        let json = serde_json::to_string(&trip).expect("serialize");
        assert!(json.contains("recommendedRouteId"));

        let back: TripEstimation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, trip);
        assert_eq!(back.routes[0].id, "r1");
        assert_eq!(back.routes[1].id, "r2");
    }
}
