//! Trip estimation port
//!
//! Interface to the generative-AI service that proposes route options.

use async_trait::async_trait;
use domain::TripEstimation;
#[cfg(test)]
use mockall::automock;

/// Port for the AI trip estimation provider
///
/// Infallible by design: adapters must degrade to a deterministic local
/// fallback estimation on missing credentials, transport failures, or
/// unparseable responses. Callers never observe a provider error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TripEstimationPort: Send + Sync {
    /// Estimate route options for a pickup/dropoff pair
    ///
    /// Both labels are expected to be non-empty. The returned estimation
    /// keeps the provider's route order, and its `recommended_route_id`
    /// references one of the routes whenever the route list is non-empty.
    async fn estimate(&self, pickup: &str, dropoff: &str) -> TripEstimation;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn TripEstimationPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn TripEstimationPort>();
    }
}
