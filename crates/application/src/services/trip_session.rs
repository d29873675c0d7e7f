//! Trip session
//!
//! The coordinating state machine for one trip: owns the current
//! estimation, the user's route selection, the endpoints, the resolved map
//! path, and the persisted settings/history. Reconciles the three loosely
//! coupled inputs (user place edits, the AI estimation, the resolved path)
//! so that the highlighted route and its displayed stats always agree.
//!
//! Per-trip lifecycle: `Idle` → `Resolving` (valid endpoints) →
//! `{Resolved | FallbackResolved | Failed}`. Any endpoint change returns to
//! `Idle` and supersedes in-flight resolutions via a monotonically
//! increasing token; a stale resolution completing late is discarded.
//! Selection changes never issue network requests; they only re-run the
//! stats-sync step against the already-resolved path.

use std::{fmt, sync::Arc};

use domain::{
    AppSettings, Coordinates, DomainError, Place, ResolvedPath, RouteOption, TripEstimation,
    TripHistory, fare,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{DeviceLocationPort, HistoryStore, SettingsStore, TripEstimationPort, Viewport},
    services::route_resolver::{Resolution, ResolutionError, RouteResolver},
};

/// Where the session stands with respect to the resolved map path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSyncState {
    /// No usable endpoints; nothing resolved or in flight
    Idle,
    /// A resolution has been started and not yet completed
    Resolving,
    /// A real directions path is active
    Resolved,
    /// The approximate straight-line path is active
    FallbackResolved,
    /// The last resolution failed; a dismissible notice is available
    Failed,
}

/// Handle for one resolution attempt
///
/// Completing with a ticket older than the latest issued one is ignored,
/// which is what guarantees that out-of-order completions cannot overwrite
/// newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionTicket {
    token: u64,
}

/// The trip-session coordinator
pub struct TripSession {
    provider: Arc<dyn TripEstimationPort>,
    resolver: RouteResolver,
    settings_store: Arc<dyn SettingsStore>,
    history_store: Arc<dyn HistoryStore>,
    device_location: Option<Arc<dyn DeviceLocationPort>>,
    viewport: Option<Viewport>,

    settings: AppSettings,
    history: TripHistory,
    pickup: Place,
    dropoff: Place,
    buffer_active: bool,
    trip: Option<TripEstimation>,
    selected_route_id: Option<String>,
    path: Option<ResolvedPath>,
    state: RouteSyncState,
    last_error: Option<ResolutionError>,
    resolution_seq: u64,
}

impl fmt::Debug for TripSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripSession")
            .field("state", &self.state)
            .field("pickup", &self.pickup)
            .field("dropoff", &self.dropoff)
            .field("selected_route_id", &self.selected_route_id)
            .field("buffer_active", &self.buffer_active)
            .finish_non_exhaustive()
    }
}

impl TripSession {
    /// Create a session over the given collaborators
    #[must_use]
    pub fn new(
        provider: Arc<dyn TripEstimationPort>,
        resolver: RouteResolver,
        settings_store: Arc<dyn SettingsStore>,
        history_store: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            provider,
            resolver,
            settings_store,
            history_store,
            device_location: None,
            viewport: None,
            settings: AppSettings::default(),
            history: TripHistory::new(),
            pickup: Place::default(),
            dropoff: Place::default(),
            buffer_active: false,
            trip: None,
            selected_route_id: None,
            path: None,
            state: RouteSyncState::Idle,
            last_error: None,
            resolution_seq: 0,
        }
    }

    /// Attach a device location source
    #[must_use]
    pub fn with_device_location(mut self, port: Arc<dyn DeviceLocationPort>) -> Self {
        self.device_location = Some(port);
        self
    }

    /// Set the viewport used to bias fallback geocoding
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Seed the endpoints (e.g. demo defaults) without going through the
    /// user-edit path
    #[must_use]
    pub fn with_endpoints(mut self, pickup: Place, dropoff: Place) -> Self {
        self.pickup = pickup;
        self.dropoff = dropoff;
        self
    }

    /// Load persisted settings and history, substituting defaults when
    /// nothing is stored yet
    pub async fn restore(&mut self) -> Result<(), ApplicationError> {
        if let Some(settings) = self.settings_store.load_settings().await? {
            self.settings = settings;
        }
        if let Some(history) = self.history_store.load_history().await? {
            self.history = history;
        }
        Ok(())
    }

    // --- Endpoint changes -------------------------------------------------

    /// Apply a user edit to the pickup label
    ///
    /// Clears any previously resolved pickup coordinates and invalidates
    /// the displayed path.
    pub fn set_pickup_label(&mut self, label: impl Into<String>) {
        self.pickup.edit_label(label);
        self.invalidate_path();
    }

    /// Apply a user edit to the dropoff label
    pub fn set_dropoff_label(&mut self, label: impl Into<String>) {
        self.dropoff.edit_label(label);
        self.invalidate_path();
    }

    /// Replace the pickup with an autocomplete-style selection
    pub fn set_pickup_place(&mut self, place: Place) {
        self.pickup = place;
        self.invalidate_path();
    }

    /// Replace the dropoff with an autocomplete-style selection
    pub fn set_dropoff_place(&mut self, place: Place) {
        self.dropoff = place;
        self.invalidate_path();
    }

    /// Exchange pickup and dropoff labels, dropping both coordinate sets
    pub fn swap_endpoints(&mut self) {
        let pickup_label = self.pickup.label().to_string();
        let dropoff_label = self.dropoff.label().to_string();
        self.pickup = Place::from_label(dropoff_label);
        self.dropoff = Place::from_label(pickup_label);
        self.invalidate_path();
    }

    /// Clear the whole dashboard: trip, selection, endpoints, buffer, path
    pub fn reset(&mut self) {
        self.trip = None;
        self.selected_route_id = None;
        self.pickup = Place::default();
        self.dropoff = Place::default();
        self.buffer_active = false;
        self.invalidate_path();
    }

    /// Use the device position as the pickup point
    ///
    /// The label comes from reverse geocoding, falling back to a plain
    /// "lat, lon" rendering. Failure is non-fatal and leaves the session
    /// untouched.
    pub async fn use_device_location(&mut self) -> Result<(), ApplicationError> {
        let Some(port) = self.device_location.clone() else {
            return Err(ApplicationError::LocationUnavailable(
                "no location source configured".to_string(),
            ));
        };
        let position = port
            .current_position()
            .await
            .map_err(|failure| ApplicationError::LocationUnavailable(failure.to_string()))?;

        let label = match self.resolver.reverse_label(position).await {
            Ok(address) => address,
            Err(failure) => {
                debug!(%failure, "Reverse geocoding failed, using raw coordinates label");
                position.display_label()
            },
        };

        info!(%position, "Pickup set from device location");
        self.pickup = Place::resolved(label, position);
        self.invalidate_path();
        Ok(())
    }

    // --- Estimation -------------------------------------------------------

    /// Ask the estimation provider for route options for the current
    /// endpoints
    ///
    /// The new estimation supersedes the previous one wholesale, the
    /// selection defaults to the recommended route, and the trip is pushed
    /// into the bounded history. Does not touch the resolved path: the path
    /// depends only on the endpoints.
    #[instrument(skip(self), fields(pickup = %self.pickup.label(), dropoff = %self.dropoff.label()))]
    pub async fn calculate(&mut self) -> Result<(), ApplicationError> {
        if self.pickup.label().is_empty() || self.dropoff.label().is_empty() {
            return Err(
                DomainError::ValidationError("pickup and dropoff are required".to_string()).into(),
            );
        }

        let trip = self
            .provider
            .estimate(self.pickup.label(), self.dropoff.label())
            .await;
        info!(trip_id = %trip.id, routes = trip.routes.len(), "Trip estimation received");

        self.selected_route_id = if trip.routes.is_empty() {
            None
        } else {
            Some(trip.recommended_route_id.clone())
        };

        if self.history.insert(trip.clone())
            && let Err(error) = self.history_store.save_history(&self.history).await
        {
            warn!(%error, "Failed to persist trip history");
        }

        self.trip = Some(trip);
        self.sync_selected_stats();
        Ok(())
    }

    /// Restore a past estimation from the history
    ///
    /// Endpoints take the stored labels with no coordinates, the selection
    /// returns to the recommended route, and the buffer is switched off.
    pub fn select_history_entry(&mut self, trip_id: &str) -> bool {
        let Some(trip) = self.history.get(trip_id).cloned() else {
            return false;
        };
        self.pickup = Place::from_label(trip.pickup.clone());
        self.dropoff = Place::from_label(trip.dropoff.clone());
        self.selected_route_id = if trip.routes.is_empty() {
            None
        } else {
            Some(trip.recommended_route_id.clone())
        };
        self.trip = Some(trip);
        self.buffer_active = false;
        self.invalidate_path();
        true
    }

    // --- Selection --------------------------------------------------------

    /// Select a route by id
    ///
    /// Ids not present in the current estimation are ignored. Selecting
    /// re-runs the stats sync against the active path; it never issues a
    /// network request.
    pub fn select_route(&mut self, route_id: &str) -> bool {
        let known = self
            .trip
            .as_ref()
            .is_some_and(|trip| trip.contains_route(route_id));
        if !known {
            debug!(route_id, "Ignoring selection of unknown route");
            return false;
        }
        self.selected_route_id = Some(route_id.to_string());
        self.sync_selected_stats();
        true
    }

    /// Write the active path's measured stats into the selected route
    ///
    /// The highlighted alternative is the one at the selected route's
    /// position in the candidate list (clamped when the service returned
    /// fewer alternatives); updates within the noise thresholds are
    /// suppressed. Returns `true` if the route actually changed.
    fn sync_selected_stats(&mut self) -> bool {
        let Some(selected_id) = self.selected_route_id.clone() else {
            return false;
        };
        let Some(path) = self.path.as_ref() else {
            return false;
        };
        let Some(trip) = self.trip.as_mut() else {
            return false;
        };

        let index = trip.route_index(&selected_id).unwrap_or(0);
        let Some((distance_km, duration_min)) = path.stats_at(index) else {
            return false;
        };

        let changed = trip.apply_measured_stats(&selected_id, distance_km, duration_min);
        if changed {
            debug!(route_id = %selected_id, distance_km, duration_min, "Synced measured route stats");
        }
        changed
    }

    // --- Resolution -------------------------------------------------------

    /// Start a resolution attempt, superseding any in-flight one
    pub fn begin_resolution(&mut self) -> ResolutionTicket {
        self.resolution_seq += 1;
        self.state = if self.pickup.is_routable() && self.dropoff.is_routable() {
            RouteSyncState::Resolving
        } else {
            RouteSyncState::Idle
        };
        ResolutionTicket {
            token: self.resolution_seq,
        }
    }

    /// Apply a completed resolution
    ///
    /// Returns `false` when the ticket is stale (a newer resolution has
    /// started since); stale outcomes are discarded without touching state.
    pub fn complete_resolution(
        &mut self,
        ticket: ResolutionTicket,
        outcome: Result<Resolution, ResolutionError>,
    ) -> bool {
        if ticket.token != self.resolution_seq {
            debug!(
                ticket = ticket.token,
                current = self.resolution_seq,
                "Discarding stale resolution"
            );
            return false;
        }

        match outcome {
            Ok(Resolution::NotReady) => {
                self.path = None;
                self.state = RouteSyncState::Idle;
            },
            Ok(Resolution::Path(path)) => {
                self.state = if path.is_approximate() {
                    RouteSyncState::FallbackResolved
                } else {
                    RouteSyncState::Resolved
                };
                self.path = Some(path);
                self.last_error = None;
                self.sync_selected_stats();
            },
            Err(error) => {
                warn!(%error, "Route resolution failed");
                self.path = None;
                self.state = RouteSyncState::Failed;
                self.last_error = Some(error);
            },
        }
        true
    }

    /// Resolve the current endpoints end to end
    ///
    /// Convenience wrapper around [`Self::begin_resolution`] /
    /// [`Self::complete_resolution`] for callers that drive the session
    /// sequentially.
    pub async fn refresh_route(&mut self) -> RouteSyncState {
        let ticket = self.begin_resolution();
        if self.state == RouteSyncState::Idle {
            return self.state;
        }
        let outcome = self
            .resolver
            .resolve(&self.pickup, &self.dropoff, self.viewport)
            .await;
        self.complete_resolution(ticket, outcome);
        self.state
    }

    /// Dismiss the current routing notice, if any
    pub fn dismiss_error(&mut self) {
        if self.last_error.take().is_some() {
            self.state = RouteSyncState::Idle;
        }
    }

    fn invalidate_path(&mut self) {
        self.path = None;
        self.last_error = None;
        self.state = RouteSyncState::Idle;
        // Supersede any in-flight resolution
        self.resolution_seq += 1;
    }

    // --- Buffer & fare ----------------------------------------------------

    /// Toggle the fixed fare buffer; returns the new state
    ///
    /// Never triggers re-resolution: the buffer only affects the displayed
    /// fare and the map annulus.
    pub fn toggle_buffer(&mut self) -> bool {
        self.buffer_active = !self.buffer_active;
        self.buffer_active
    }

    /// Center of the buffer annulus, when the buffer is active
    ///
    /// Precedence: the active path's start point (at the selected
    /// alternative), then the raw pickup coordinates, then nothing.
    #[must_use]
    pub fn buffer_center(&self) -> Option<Coordinates> {
        if !self.buffer_active {
            return None;
        }
        let index = self
            .trip
            .as_ref()
            .zip(self.selected_route_id.as_deref())
            .and_then(|(trip, id)| trip.route_index(id))
            .unwrap_or(0);
        self.path
            .as_ref()
            .and_then(|path| path.start_point(index))
            .or_else(|| self.pickup.coordinates())
    }

    /// Distance shown to the user: selected route plus the active buffer
    #[must_use]
    pub fn displayed_distance_km(&self) -> f64 {
        let distance = self.selected_route().map_or(0.0, |route| route.distance_km);
        fare::billable_distance_km(distance, self.buffer_active)
    }

    /// Formatted fare for the selected route at the configured rate
    ///
    /// A zero fare is shown when nothing is selected.
    #[must_use]
    pub fn fare_display(&self) -> String {
        let amount = self.selected_route().map_or(0.0, |route| {
            fare::fare_amount(route.distance_km, self.buffer_active, self.settings.rate_per_km)
        });
        fare::format_fare(amount, &self.settings.currency)
    }

    // --- Settings ---------------------------------------------------------

    /// Replace the settings and persist them
    pub async fn update_settings(
        &mut self,
        settings: AppSettings,
    ) -> Result<(), ApplicationError> {
        self.settings = settings;
        self.settings_store.save_settings(&self.settings).await?;
        Ok(())
    }

    /// Toggle the theme and persist the settings
    pub async fn toggle_theme(&mut self) -> Result<(), ApplicationError> {
        self.settings.toggle_theme();
        self.settings_store.save_settings(&self.settings).await?;
        Ok(())
    }

    // --- Accessors ----------------------------------------------------------

    /// Current state of the path/selection reconciliation
    #[must_use]
    pub const fn state(&self) -> RouteSyncState {
        self.state
    }

    /// The current estimation, if any
    #[must_use]
    pub const fn trip(&self) -> Option<&TripEstimation> {
        self.trip.as_ref()
    }

    /// Id of the selected route, if any
    #[must_use]
    pub fn selected_route_id(&self) -> Option<&str> {
        self.selected_route_id.as_deref()
    }

    /// The selected route, if any
    #[must_use]
    pub fn selected_route(&self) -> Option<&RouteOption> {
        let trip = self.trip.as_ref()?;
        trip.route(self.selected_route_id.as_deref()?)
    }

    /// Whether the selected route is the provider's recommendation
    #[must_use]
    pub fn selection_is_recommended(&self) -> bool {
        match (&self.trip, &self.selected_route_id) {
            (Some(trip), Some(selected)) => &trip.recommended_route_id == selected,
            _ => false,
        }
    }

    /// The active resolved path, if any
    #[must_use]
    pub const fn path(&self) -> Option<&ResolvedPath> {
        self.path.as_ref()
    }

    /// The last resolution error, if not dismissed
    #[must_use]
    pub const fn last_error(&self) -> Option<&ResolutionError> {
        self.last_error.as_ref()
    }

    /// Dismissible notice text for the last resolution error
    #[must_use]
    pub fn user_notice(&self) -> Option<String> {
        self.last_error.as_ref().map(ResolutionError::user_notice)
    }

    /// Current settings
    #[must_use]
    pub const fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Trip history, newest first
    #[must_use]
    pub const fn history(&self) -> &TripHistory {
        &self.history
    }

    /// Current pickup endpoint
    #[must_use]
    pub const fn pickup(&self) -> &Place {
        &self.pickup
    }

    /// Current dropoff endpoint
    #[must_use]
    pub const fn dropoff(&self) -> &Place {
        &self.dropoff
    }

    /// Whether the fare buffer is active
    #[must_use]
    pub const fn buffer_active(&self) -> bool {
        self.buffer_active
    }
}
