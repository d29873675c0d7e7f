//! Route resolver
//!
//! Turns a pickup/dropoff pair into an actual drivable path. Tries the
//! directions service first; when that fails for any reason, falls back to
//! a straight-line path built from known coordinates or from viewport-biased
//! geocoding of both endpoint labels. A successful resolution always replaces
//! the previous path wholesale; there is no partial result.

use std::{fmt, sync::Arc};

use domain::{Coordinates, Place, ResolvedPath};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::ports::{
    DirectionsPort, DirectionsRequest, GeocodeFailure, GeocodingPort, RoutingFailure, Viewport,
    Waypoint,
};

/// Minutes of travel assumed per straight-line kilometer
///
/// Tunable heuristic: no traffic data exists in fallback mode, so duration
/// is derived as a fixed multiple of the great-circle distance.
pub const FALLBACK_MIN_PER_KM: f64 = 2.0;

/// Resolver tuning knobs
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Minutes per kilometer for the fallback duration estimate
    pub fallback_min_per_km: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback_min_per_km: FALLBACK_MIN_PER_KM,
        }
    }
}

/// Why a resolution could not produce a path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The directions service failed and no fallback was possible
    #[error(transparent)]
    Routing(RoutingFailure),

    /// Fallback geocoding of an endpoint failed; the original routing
    /// failure is retained for diagnostics
    #[error("Route calculation failed: could not geocode '{address}' ({cause}); routing had failed with: {routing}")]
    GeocodingFailed {
        /// The endpoint label that failed to geocode
        address: String,
        /// The geocoding failure
        cause: GeocodeFailure,
        /// The routing failure that triggered the fallback
        routing: RoutingFailure,
    },
}

impl ResolutionError {
    /// Dismissible notice text shown to the user
    ///
    /// A fallback-geocoding failure surfaces the notice for the original
    /// routing status; the geocoding detail stays in the error for logs.
    #[must_use]
    pub fn user_notice(&self) -> String {
        match self {
            Self::Routing(failure) => failure.user_notice(),
            Self::GeocodingFailed { routing, .. } => routing.user_notice(),
        }
    }
}

/// Outcome of a resolution attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// At least one endpoint is not yet usable; nothing was attempted
    NotReady,
    /// A path was produced (real directions or straight-line fallback)
    Path(ResolvedPath),
}

/// Resolves endpoints into drivable paths with a straight-line fallback
#[derive(Clone)]
pub struct RouteResolver {
    directions: Arc<dyn DirectionsPort>,
    geocoding: Arc<dyn GeocodingPort>,
    config: ResolverConfig,
}

impl fmt::Debug for RouteResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RouteResolver {
    /// Create a resolver over the given directions and geocoding services
    #[must_use]
    pub fn new(directions: Arc<dyn DirectionsPort>, geocoding: Arc<dyn GeocodingPort>) -> Self {
        Self {
            directions,
            geocoding,
            config: ResolverConfig::default(),
        }
    }

    /// Override the resolver configuration
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve a pickup/dropoff pair into a path
    ///
    /// Returns [`Resolution::NotReady`] without touching the network when
    /// either endpoint lacks both coordinates and a usable label.
    #[instrument(
        skip_all,
        fields(pickup = %pickup.label(), dropoff = %dropoff.label())
    )]
    pub async fn resolve(
        &self,
        pickup: &Place,
        dropoff: &Place,
        viewport: Option<Viewport>,
    ) -> Result<Resolution, ResolutionError> {
        if !pickup.is_routable() || !dropoff.is_routable() {
            debug!("Endpoints not usable yet, skipping resolution");
            return Ok(Resolution::NotReady);
        }

        let request = DirectionsRequest::driving(
            Waypoint::from_place(pickup),
            Waypoint::from_place(dropoff),
        );

        let routing_failure = match self.directions.route(request).await {
            Ok(alternatives) if !alternatives.is_empty() => {
                debug!(count = alternatives.len(), "Directions resolved");
                return Ok(Resolution::Path(ResolvedPath::Directions(alternatives)));
            },
            Ok(_) => RoutingFailure::NotFound {
                from: pickup.label().to_string(),
                to: dropoff.label().to_string(),
            },
            Err(failure) => failure,
        };

        warn!(failure = %routing_failure, "Directions failed, attempting straight-line fallback");
        self.fallback(pickup, dropoff, viewport, routing_failure).await
    }

    /// Resolve coordinates to a display label, for device-location pickup
    pub async fn reverse_label(&self, point: Coordinates) -> Result<String, GeocodeFailure> {
        self.geocoding.reverse_geocode(point).await
    }

    /// Build a straight-line path after a routing failure
    ///
    /// Uses known coordinates directly; otherwise geocodes both labels with
    /// the viewport bias. If the fallback is impossible, the original
    /// routing failure is surfaced.
    async fn fallback(
        &self,
        pickup: &Place,
        dropoff: &Place,
        viewport: Option<Viewport>,
        routing: RoutingFailure,
    ) -> Result<Resolution, ResolutionError> {
        let (start, end) = match (pickup.coordinates(), dropoff.coordinates()) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                if pickup.label().is_empty() || dropoff.label().is_empty() {
                    return Err(ResolutionError::Routing(routing));
                }
                let start = self
                    .geocode_endpoint(pickup.label(), viewport, &routing)
                    .await?;
                let end = self
                    .geocode_endpoint(dropoff.label(), viewport, &routing)
                    .await?;
                (start, end)
            },
        };

        let distance_km = start.great_circle_km(&end);
        let duration_min = (distance_km * self.config.fallback_min_per_km).round();
        info!(distance_km, duration_min, "Using straight-line fallback path");

        Ok(Resolution::Path(ResolvedPath::StraightLine {
            start,
            end,
            distance_km,
            duration_min,
        }))
    }

    async fn geocode_endpoint(
        &self,
        address: &str,
        viewport: Option<Viewport>,
        routing: &RoutingFailure,
    ) -> Result<Coordinates, ResolutionError> {
        self.geocoding
            .geocode(address, viewport)
            .await
            .map_err(|cause| ResolutionError::GeocodingFailed {
                address: address.to_string(),
                cause,
                routing: routing.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use domain::PathAlternative;
    use mockall::predicate::eq;

    use crate::ports::{MockDirectionsPort, MockGeocodingPort};

    use super::*;

    fn alternative(distance_meters: f64, duration_seconds: f64) -> PathAlternative {
        PathAlternative {
            start: Coordinates::tunga(),
            end: Coordinates::bosso(),
            distance_meters,
            duration_seconds,
            points: vec![],
        }
    }

    fn resolver(
        directions: MockDirectionsPort,
        geocoding: MockGeocodingPort,
    ) -> RouteResolver {
        RouteResolver::new(Arc::new(directions), Arc::new(geocoding))
    }

    fn no_route() -> RoutingFailure {
        RoutingFailure::NotFound {
            from: "Tunga".to_string(),
            to: "Bosso".to_string(),
        }
    }

    #[tokio::test]
    async fn unusable_endpoints_skip_resolution() {
        let mut directions = MockDirectionsPort::new();
        directions.expect_route().times(0);
        let resolver = resolver(directions, MockGeocodingPort::new());

        let outcome = resolver
            .resolve(&Place::from_label("ab"), &Place::from_label("Bosso"), None)
            .await
            .expect("resolution");
        assert_eq!(outcome, Resolution::NotReady);
    }

    #[tokio::test]
    async fn primary_success_returns_all_alternatives() {
        let mut directions = MockDirectionsPort::new();
        directions
            .expect_route()
            .times(1)
            .returning(|_| Ok(vec![alternative(12500.0, 1320.0), alternative(13200.0, 1560.0)]));
        let resolver = resolver(directions, MockGeocodingPort::new());

        let outcome = resolver
            .resolve(&Place::from_label("Tunga"), &Place::from_label("Bosso"), None)
            .await
            .expect("resolution");
        match outcome {
            Resolution::Path(ResolvedPath::Directions(alternatives)) => {
                assert_eq!(alternatives.len(), 2);
            },
            other => unreachable!("expected directions, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn coordinates_prefer_point_waypoints() {
        let mut directions = MockDirectionsPort::new();
        directions
            .expect_route()
            .withf(|request| {
                request.origin == Waypoint::Point(Coordinates::tunga())
                    && request.destination == Waypoint::Address("Bosso".to_string())
                    && request.alternatives
            })
            .times(1)
            .returning(|_| Ok(vec![alternative(1000.0, 120.0)]));
        let resolver = resolver(directions, MockGeocodingPort::new());

        resolver
            .resolve(
                &Place::resolved("Tunga", Coordinates::tunga()),
                &Place::from_label("Bosso"),
                None,
            )
            .await
            .expect("resolution");
    }

    #[tokio::test]
    async fn fallback_uses_known_coordinates_without_geocoding() {
        let mut directions = MockDirectionsPort::new();
        directions.expect_route().returning(|_| Err(no_route()));
        let mut geocoding = MockGeocodingPort::new();
        geocoding.expect_geocode().times(0);
        let resolver = resolver(directions, geocoding);

        let outcome = resolver
            .resolve(
                &Place::resolved("Tunga", Coordinates::tunga()),
                &Place::resolved("Bosso", Coordinates::bosso()),
                None,
            )
            .await
            .expect("resolution");

        let expected_km = Coordinates::tunga().great_circle_km(&Coordinates::bosso());
        match outcome {
            Resolution::Path(ResolvedPath::StraightLine {
                start,
                end,
                distance_km,
                duration_min,
            }) => {
                assert_eq!(start, Coordinates::tunga());
                assert_eq!(end, Coordinates::bosso());
                assert!((distance_km - expected_km).abs() < 1e-9);
                assert!((duration_min - (expected_km * 2.0).round()).abs() < f64::EPSILON);
            },
            other => unreachable!("expected straight line, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fallback_geocodes_both_labels_with_viewport_bias() {
        let mut directions = MockDirectionsPort::new();
        directions.expect_route().returning(|_| Err(no_route()));

        let viewport = Viewport::around(Coordinates::nigeria(), 0.5);
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_geocode()
            .with(eq("Tunga"), eq(Some(viewport)))
            .times(1)
            .returning(|_, _| Ok(Coordinates::tunga()));
        geocoding
            .expect_geocode()
            .with(eq("Bosso"), eq(Some(viewport)))
            .times(1)
            .returning(|_, _| Ok(Coordinates::bosso()));
        let resolver = resolver(directions, geocoding);

        let outcome = resolver
            .resolve(
                &Place::from_label("Tunga"),
                &Place::from_label("Bosso"),
                Some(viewport),
            )
            .await
            .expect("resolution");
        assert!(matches!(
            outcome,
            Resolution::Path(ResolvedPath::StraightLine { .. })
        ));
    }

    #[tokio::test]
    async fn failed_fallback_geocoding_keeps_routing_status() {
        let mut directions = MockDirectionsPort::new();
        directions.expect_route().returning(|_| Err(no_route()));
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_geocode()
            .returning(|address, _| Err(GeocodeFailure::NotFound(address.to_string())));
        let resolver = resolver(directions, geocoding);

        let error = resolver
            .resolve(&Place::from_label("Tunga"), &Place::from_label("Bosso"), None)
            .await
            .expect_err("should fail");

        match &error {
            ResolutionError::GeocodingFailed {
                address, routing, ..
            } => {
                assert_eq!(address, "Tunga");
                assert_eq!(routing, &no_route());
            },
            other => unreachable!("expected geocoding failure, got {other:?}"),
        }
        // The notice reflects the original routing failure
        assert_eq!(error.user_notice(), "No driving route found. Try specific addresses.");
    }

    #[tokio::test]
    async fn empty_alternatives_trigger_fallback() {
        let mut directions = MockDirectionsPort::new();
        directions.expect_route().returning(|_| Ok(vec![]));
        let mut geocoding = MockGeocodingPort::new();
        geocoding.expect_geocode().times(0);
        let resolver = resolver(directions, geocoding);

        let outcome = resolver
            .resolve(
                &Place::resolved("Tunga", Coordinates::tunga()),
                &Place::resolved("Bosso", Coordinates::bosso()),
                None,
            )
            .await
            .expect("resolution");
        assert!(matches!(
            outcome,
            Resolution::Path(ResolvedPath::StraightLine { .. })
        ));
    }

    #[tokio::test]
    async fn denied_routing_without_fallback_material_surfaces_denied() {
        let mut directions = MockDirectionsPort::new();
        directions
            .expect_route()
            .returning(|_| Err(RoutingFailure::Denied("key restricted".to_string())));
        let mut geocoding = MockGeocodingPort::new();
        // One usable coordinate pair is missing and one label is empty
        geocoding.expect_geocode().times(0);
        let resolver = resolver(directions, geocoding);

        let error = resolver
            .resolve(
                &Place::resolved("", Coordinates::tunga()),
                &Place::from_label("Bosso"),
                None,
            )
            .await
            .expect_err("should fail");
        assert!(matches!(
            error,
            ResolutionError::Routing(RoutingFailure::Denied(_))
        ));
    }
}
