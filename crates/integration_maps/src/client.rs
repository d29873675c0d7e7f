//! Google Maps HTTP clients
//!
//! Adapters for the directions and geocoding ports. Both talk to the same
//! host with the same credential, so they share one configuration.

use async_trait::async_trait;
use domain::{Coordinates, PathAlternative};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use application::ports::{
    DirectionsPort, DirectionsRequest, GeocodeFailure, GeocodingPort, RoutingFailure, Viewport,
};

use crate::{
    models::{DirectionsResponse, GeocodeResponse, Leg},
    polyline,
};

/// Maps client construction errors
#[derive(Debug, Error)]
pub enum MapsError {
    /// The underlying HTTP client could not be initialized
    #[error("Maps client initialization failed: {0}")]
    Init(String),
}

/// Maps service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// API key for the maps services
    pub api_key: String,

    /// Base URL of the maps host (default: <https://maps.googleapis.com>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl MapsConfig {
    /// Config with the given credential and default host
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }

    /// Config pointing at a local test server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            api_key: "test-key".to_string(),
            base_url: base_url.into(),
            timeout_secs: 5,
        }
    }

    fn build_client(&self) -> Result<Client, MapsError> {
        Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| MapsError::Init(e.to_string()))
    }
}

/// Directions adapter over the Google Directions web API
#[derive(Debug)]
pub struct GoogleDirectionsClient {
    client: Client,
    config: MapsConfig,
}

impl GoogleDirectionsClient {
    /// Create a directions client with the given configuration
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    fn directions_url(&self) -> String {
        format!("{}/maps/api/directions/json", self.config.base_url)
    }
}

#[async_trait]
impl DirectionsPort for GoogleDirectionsClient {
    #[instrument(skip(self), fields(origin = %request.origin, destination = %request.destination))]
    async fn route(
        &self,
        request: DirectionsRequest,
    ) -> Result<Vec<PathAlternative>, RoutingFailure> {
        let origin = request.origin.to_string();
        let destination = request.destination.to_string();

        debug!("Requesting driving directions");

        let response = self
            .client
            .get(self.directions_url())
            .query(&[
                ("origin", origin.as_str()),
                ("destination", destination.as_str()),
                ("mode", "driving"),
                ("alternatives", if request.alternatives { "true" } else { "false" }),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| RoutingFailure::Other(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RoutingFailure::Other(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: DirectionsResponse = response
            .json()
            .await
            .map_err(|e| RoutingFailure::Other(e.to_string()))?;

        match body.status.as_str() {
            "OK" => {
                let alternatives: Vec<PathAlternative> =
                    body.routes.iter().filter_map(to_alternative).collect();
                if alternatives.is_empty() {
                    warn!("Directions response had status OK but no usable routes");
                    return Err(RoutingFailure::NotFound {
                        from: origin,
                        to: destination,
                    });
                }
                debug!(alternatives = alternatives.len(), "Directions resolved");
                Ok(alternatives)
            },
            "ZERO_RESULTS" | "NOT_FOUND" => Err(RoutingFailure::NotFound {
                from: origin,
                to: destination,
            }),
            "REQUEST_DENIED" => Err(RoutingFailure::Denied(
                body.error_message.unwrap_or(body.status),
            )),
            "OVER_QUERY_LIMIT" => Err(RoutingFailure::QuotaExceeded),
            other => Err(RoutingFailure::Other(other.to_string())),
        }
    }
}

fn to_alternative(route: &crate::models::ApiRoute) -> Option<PathAlternative> {
    let first = route.legs.first()?;
    let last = route.legs.last()?;
    let distance_meters: f64 = route.legs.iter().map(|leg: &Leg| leg.distance.value).sum();
    let duration_seconds: f64 = route.legs.iter().map(|leg: &Leg| leg.duration.value).sum();

    Some(PathAlternative {
        start: Coordinates::new(first.start_location.lat, first.start_location.lng).ok()?,
        end: Coordinates::new(last.end_location.lat, last.end_location.lng).ok()?,
        distance_meters,
        duration_seconds,
        points: polyline::decode(&route.overview_polyline.points),
    })
}

/// Geocoding adapter over the Google Geocoding web API
#[derive(Debug)]
pub struct GoogleGeocodingClient {
    client: Client,
    config: MapsConfig,
}

impl GoogleGeocodingClient {
    /// Create a geocoding client with the given configuration
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    fn geocode_url(&self) -> String {
        format!("{}/maps/api/geocode/json", self.config.base_url)
    }

    async fn fetch(
        &self,
        params: &[(&str, &str)],
    ) -> Result<GeocodeResponse, GeocodeFailure> {
        let response = self
            .client
            .get(self.geocode_url())
            .query(params)
            .send()
            .await
            .map_err(|e| GeocodeFailure::Service(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocodeFailure::Service(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GeocodeFailure::Service(e.to_string()))
    }
}

#[async_trait]
impl GeocodingPort for GoogleGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(
        &self,
        address: &str,
        bias: Option<Viewport>,
    ) -> Result<Coordinates, GeocodeFailure> {
        let bounds = bias.map(|viewport| {
            format!(
                "{:.6},{:.6}|{:.6},{:.6}",
                viewport.southwest.latitude(),
                viewport.southwest.longitude(),
                viewport.northeast.latitude(),
                viewport.northeast.longitude()
            )
        });

        let mut params = vec![
            ("address", address),
            ("key", self.config.api_key.as_str()),
        ];
        if let Some(bounds) = bounds.as_deref() {
            params.push(("bounds", bounds));
        }

        let body = self.fetch(&params).await?;
        match body.status.as_str() {
            "OK" => {
                let location = body
                    .results
                    .first()
                    .ok_or_else(|| GeocodeFailure::NotFound(address.to_string()))?
                    .geometry
                    .location;
                Coordinates::new(location.lat, location.lng)
                    .map_err(|e| GeocodeFailure::Service(e.to_string()))
            },
            "ZERO_RESULTS" => Err(GeocodeFailure::NotFound(address.to_string())),
            other => Err(GeocodeFailure::Service(
                body.error_message.unwrap_or_else(|| other.to_string()),
            )),
        }
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, point: Coordinates) -> Result<String, GeocodeFailure> {
        let latlng = format!("{:.6},{:.6}", point.latitude(), point.longitude());
        let params = [
            ("latlng", latlng.as_str()),
            ("key", self.config.api_key.as_str()),
        ];

        let body = self.fetch(&params).await?;
        match body.status.as_str() {
            "OK" => body
                .results
                .into_iter()
                .next()
                .map(|result| result.formatted_address)
                .ok_or_else(|| GeocodeFailure::NotFound(latlng)),
            "ZERO_RESULTS" => Err(GeocodeFailure::NotFound(latlng)),
            other => Err(GeocodeFailure::Service(
                body.error_message.unwrap_or_else(|| other.to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_google_host() {
        let config = MapsConfig::new("key");
        assert_eq!(config.base_url, "https://maps.googleapis.com");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: MapsConfig = serde_json::from_str(r#"{ "api_key": "k" }"#).expect("parse");
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, "https://maps.googleapis.com");
    }
}
