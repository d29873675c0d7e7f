//! Gemini-backed trip estimation provider
//!
//! Talks to the `generateContent` endpoint with a JSON response schema so
//! the model answers with machine-readable route options. The provider never
//! fails: a missing key, empty input, transport error, bad status, or
//! unparseable completion all fall back to the demo estimation.

use std::time::Duration;

use application::ports::TripEstimationPort;
use async_trait::async_trait;
use domain::{RouteOption, TripEstimation};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::{config::TripAiConfig, error::TripAiError, fallback::demo_estimation};

/// Trip estimation provider backed by a Gemini-style generative API
#[derive(Debug)]
pub struct GeminiTripProvider {
    client: Client,
    config: TripAiConfig,
}

impl GeminiTripProvider {
    /// Create a provider with the given configuration
    pub fn new(config: TripAiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            has_key = config.api_key.is_some(),
            "Initialized trip estimation provider"
        );

        Ok(Self { client, config })
    }

    /// The configured model name
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn generate_url(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={api_key}",
            self.config.base_url, self.config.model
        )
    }

    fn prompt(pickup: &str, dropoff: &str) -> String {
        format!(
            "Generate 3 realistic driving route options from \"{pickup}\" to \"{dropoff}\". \
             Prioritize real-world road networks and accurate distances for the specific \
             location (e.g. Minna, Nigeria). \
             Route 1: Recommended/Fastest. Route 2: Shortest Distance. Route 3: Alternative. \
             Return realistic distances in KM and durations in Minutes."
        )
    }

    async fn request_routes(
        &self,
        api_key: &str,
        pickup: &str,
        dropoff: &str,
    ) -> Result<EstimationPayload, TripAiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::prompt(pickup, dropoff),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: route_schema(),
            },
        };

        debug!("Sending route generation request");

        let response = self
            .client
            .post(self.generate_url(api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TripAiError::ServerError(format!("{status}: {body}")));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TripAiError::InvalidResponse(e.to_string()))?;

        let text = completion
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(TripAiError::EmptyCompletion)?;

        serde_json::from_str(&text).map_err(|e| TripAiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl TripEstimationPort for GeminiTripProvider {
    #[instrument(skip(self))]
    async fn estimate(&self, pickup: &str, dropoff: &str) -> TripEstimation {
        let Some(api_key) = self.config.api_key.clone() else {
            debug!("No API key configured, serving demo estimation");
            return demo_estimation(pickup, dropoff);
        };
        if pickup.is_empty() || dropoff.is_empty() {
            return demo_estimation(pickup, dropoff);
        }

        match self.request_routes(&api_key, pickup, dropoff).await {
            Ok(payload) if !payload.routes.is_empty() => {
                let recommended = if payload.recommended_route_id.is_empty() {
                    payload.routes[0].id.clone()
                } else {
                    payload.recommended_route_id
                };
                info!(routes = payload.routes.len(), "Generated trip estimation");
                TripEstimation::new(pickup, dropoff, payload.routes, recommended)
            },
            Ok(_) => {
                warn!("Generative API returned no routes, serving demo estimation");
                demo_estimation(pickup, dropoff)
            },
            Err(error) => {
                warn!(%error, "Trip estimation request failed, serving demo estimation");
                demo_estimation(pickup, dropoff)
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// The structured completion the model is asked to produce
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EstimationPayload {
    #[serde(default)]
    routes: Vec<RouteOption>,
    #[serde(default)]
    recommended_route_id: String,
}

fn route_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "routes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "name": { "type": "STRING", "description": "e.g., Via Main St" },
                        "description": { "type": "STRING", "description": "Short rationale" },
                        "distanceKm": { "type": "NUMBER" },
                        "durationMin": { "type": "NUMBER" },
                        "trafficLevel": { "type": "STRING", "enum": ["Low", "Moderate", "Heavy"] },
                        "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": [
                        "id", "name", "distanceKm", "durationMin",
                        "trafficLevel", "tags", "description"
                    ]
                }
            },
            "recommendedRouteId": { "type": "STRING" }
        },
        "required": ["routes", "recommendedRouteId"]
    })
}
