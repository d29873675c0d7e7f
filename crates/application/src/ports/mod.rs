//! Ports (external collaborator interfaces) for the application layer

mod device_location;
mod directions;
mod geocoding;
mod state;
mod trip_estimation;

pub use device_location::{DeviceLocationPort, LocationFailure};
pub use directions::{DirectionsPort, DirectionsRequest, RoutingFailure, Waypoint};
pub use geocoding::{GeocodeFailure, GeocodingPort, Viewport};
pub use state::{CredentialStore, HistoryStore, SettingsStore, StateStoreError};
pub use trip_estimation::TripEstimationPort;

#[cfg(test)]
pub use device_location::MockDeviceLocationPort;
#[cfg(test)]
pub use directions::MockDirectionsPort;
#[cfg(test)]
pub use geocoding::MockGeocodingPort;
#[cfg(test)]
pub use state::{MockCredentialStore, MockHistoryStore, MockSettingsStore};
#[cfg(test)]
pub use trip_estimation::MockTripEstimationPort;
