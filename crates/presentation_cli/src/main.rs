//! FareLane CLI
//!
//! Command-line front end for the trip-fare estimator: estimate routes
//! between two places, inspect the saved trip history, and manage settings
//! and the stored maps credential.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use anyhow::Context;
use application::{RouteSyncState, TripSession, ports::CredentialStore, services::RouteResolver};
use clap::{Parser, Subcommand};
use domain::{Place, Theme};
use infrastructure::{AppConfig, JsonClientStateStore, init_telemetry};

/// FareLane CLI
#[derive(Parser)]
#[command(name = "farelane")]
#[command(author, version, about = "FareLane trip-fare estimator", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate routes and fare between two places
    Estimate {
        /// Pickup place
        pickup: String,

        /// Dropoff place
        dropoff: String,

        /// Include the fixed fare buffer
        #[arg(short, long)]
        buffer: bool,

        /// Select a route by id instead of the recommendation
        #[arg(short, long)]
        route: Option<String>,

        /// Print the estimation as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the saved trip history, newest first
    History {
        /// Print the history as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the persisted settings
    Settings {
        /// Currency symbol shown before fares
        #[arg(long)]
        currency: Option<String>,

        /// Fare rate per kilometer
        #[arg(long)]
        rate: Option<f64>,

        /// Switch between the light and dark theme
        #[arg(long)]
        toggle_theme: bool,
    },

    /// Store the maps API credential
    SetMapsKey {
        /// The API key to store
        api_key: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    init_telemetry(default_filter);

    let config = AppConfig::load().context("Failed to load configuration")?;
    let store = Arc::new(JsonClientStateStore::new(config.state.path.clone()));

    match cli.command {
        Commands::Estimate {
            pickup,
            dropoff,
            buffer,
            route,
            json,
        } => estimate(&config, &store, pickup, dropoff, buffer, route, json).await,
        Commands::History { json } => history(&config, &store, json).await,
        Commands::Settings {
            currency,
            rate,
            toggle_theme,
        } => settings(&config, &store, currency, rate, toggle_theme).await,
        Commands::SetMapsKey { api_key } => {
            store
                .save_credential(&api_key)
                .await
                .context("Failed to store the maps credential")?;
            println!("Maps credential stored");
            Ok(())
        },
    }
}

async fn build_session(
    config: &AppConfig,
    store: &Arc<JsonClientStateStore>,
) -> anyhow::Result<TripSession> {
    let provider = ai_trip::GeminiTripProvider::new(config.ai.clone())
        .context("Failed to initialize the trip estimation provider")?;

    // Config takes precedence over the stored credential. Without any key
    // the maps services answer with a denial and routing degrades to the
    // straight-line fallback.
    let maps_config = match config.maps.clone() {
        Some(maps) => maps,
        None => {
            let stored = store.load_credential().await.unwrap_or_default();
            integration_maps::MapsConfig::new(stored.unwrap_or_default())
        },
    };
    let directions = integration_maps::GoogleDirectionsClient::new(maps_config.clone())
        .context("Failed to initialize the directions client")?;
    let geocoding = integration_maps::GoogleGeocodingClient::new(maps_config)
        .context("Failed to initialize the geocoding client")?;

    let resolver = RouteResolver::new(Arc::new(directions), Arc::new(geocoding));
    let mut session = TripSession::new(
        Arc::new(provider),
        resolver,
        Arc::clone(store) as Arc<dyn application::ports::SettingsStore>,
        Arc::clone(store) as Arc<dyn application::ports::HistoryStore>,
    );
    session
        .restore()
        .await
        .context("Failed to load persisted state")?;
    Ok(session)
}

#[allow(clippy::fn_params_excessive_bools)]
async fn estimate(
    config: &AppConfig,
    store: &Arc<JsonClientStateStore>,
    pickup: String,
    dropoff: String,
    buffer: bool,
    route: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = build_session(config, store).await?;
    session.set_pickup_place(Place::from_label(pickup));
    session.set_dropoff_place(Place::from_label(dropoff));

    session.calculate().await.context("Estimation failed")?;
    let state = session.refresh_route().await;

    if buffer {
        session.toggle_buffer();
    }
    if let Some(route_id) = route
        && !session.select_route(&route_id)
    {
        anyhow::bail!("Unknown route id: {route_id}");
    }

    if json {
        let trip = session.trip().context("No estimation available")?;
        println!("{}", serde_json::to_string_pretty(trip)?);
        return Ok(());
    }

    let trip = session.trip().context("No estimation available")?;
    println!("{} -> {}", trip.pickup, trip.dropoff);
    for option in &trip.routes {
        let marker = if session.selected_route_id() == Some(option.id.as_str()) {
            "*"
        } else {
            " "
        };
        let tags = if option.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", option.tags.join(", "))
        };
        println!(
            "{marker} {}: {} - {:.1} km, {:.0} min, {} traffic{tags}",
            option.id, option.name, option.distance_km, option.duration_min, option.traffic_level
        );
    }

    println!();
    if buffer {
        println!("Distance incl. buffer: {:.1} km", session.displayed_distance_km());
    }
    println!("Fare: {}", session.fare_display());

    match state {
        RouteSyncState::FallbackResolved => {
            println!("(straight-line approximation; directions service unavailable)");
        },
        RouteSyncState::Failed => {
            if let Some(notice) = session.user_notice() {
                println!("({notice})");
            }
        },
        _ => {},
    }
    Ok(())
}

async fn history(
    config: &AppConfig,
    store: &Arc<JsonClientStateStore>,
    json: bool,
) -> anyhow::Result<()> {
    let session = build_session(config, store).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(session.history())?);
        return Ok(());
    }

    if session.history().is_empty() {
        println!("No saved trips");
        return Ok(());
    }
    for trip in session.history().iter() {
        println!(
            "{}  {} -> {}  ({} routes)  {}",
            trip.timestamp.format("%Y-%m-%d %H:%M"),
            trip.pickup,
            trip.dropoff,
            trip.routes.len(),
            trip.id
        );
    }
    Ok(())
}

async fn settings(
    config: &AppConfig,
    store: &Arc<JsonClientStateStore>,
    currency: Option<String>,
    rate: Option<f64>,
    toggle_theme: bool,
) -> anyhow::Result<()> {
    let mut session = build_session(config, store).await?;

    let mut updated = session.settings().clone();
    let mut changed = false;
    if let Some(currency) = currency {
        updated.currency = currency;
        changed = true;
    }
    if let Some(rate) = rate {
        updated.rate_per_km = rate;
        changed = true;
    }
    if toggle_theme {
        updated.theme = updated.theme.toggled();
        changed = true;
    }
    if changed {
        session
            .update_settings(updated)
            .await
            .context("Failed to save settings")?;
    }

    let current = session.settings();
    println!("Currency: {}", current.currency);
    println!("Rate per km: {}", current.rate_per_km);
    println!(
        "Theme: {}",
        match current.theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    );
    Ok(())
}
