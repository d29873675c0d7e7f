//! Wire models for the Google Maps web APIs

use serde::Deserialize;

/// Directions API response envelope
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<ApiRoute>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// One route in a directions response
#[derive(Debug, Deserialize)]
pub struct ApiRoute {
    #[serde(default)]
    pub legs: Vec<Leg>,
    pub overview_polyline: OverviewPolyline,
}

/// One leg of a route; single-leg for requests without intermediate stops
#[derive(Debug, Deserialize)]
pub struct Leg {
    pub distance: Measured,
    pub duration: Measured,
    pub start_location: LatLng,
    pub end_location: LatLng,
}

/// A measured quantity; `value` is meters for distances, seconds for
/// durations
#[derive(Debug, Deserialize)]
pub struct Measured {
    pub value: f64,
}

/// A latitude/longitude pair as the API spells it
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// The route's overall geometry as an encoded polyline
#[derive(Debug, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

/// Geocoding API response envelope
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// One geocoding match
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

/// Geometry of a geocoding match
#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}
