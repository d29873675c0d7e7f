//! Persistence adapters

mod client_state;

pub use client_state::JsonClientStateStore;
