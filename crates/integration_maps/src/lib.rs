//! Google Maps integration
//!
//! HTTP adapters for the application's directions and geocoding ports,
//! backed by the Google Maps Directions and Geocoding web APIs. Service
//! status codes are mapped to the typed failure categories the application
//! layer reasons about; route geometry arrives as encoded polylines and is
//! decoded here.

pub mod client;
mod models;
pub mod polyline;

pub use client::{GoogleDirectionsClient, GoogleGeocodingClient, MapsConfig, MapsError};
