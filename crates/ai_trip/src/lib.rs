//! AI trip estimation
//!
//! Generative route estimation behind the application's
//! [`TripEstimationPort`](application::TripEstimationPort). The provider asks
//! a Gemini-style generative API for structured route options and degrades to
//! a built-in demo estimation whenever the service cannot be used, so the
//! port stays infallible.

pub mod config;
pub mod error;
pub mod fallback;
pub mod gemini;

pub use config::TripAiConfig;
pub use fallback::demo_estimation;
pub use gemini::GeminiTripProvider;
