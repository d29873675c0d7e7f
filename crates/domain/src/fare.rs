//! Fare calculation
//!
//! Pure functions over the selected route's distance and the user's rate.
//! No error states: missing selections are represented by a zero distance.

/// Extra distance added when the buffer toggle is active (km)
///
/// Tunable constant; the map layer draws a matching annulus of
/// [`BUFFER_RADIUS_METERS`] around the trip start when active.
pub const BUFFER_KM: f64 = 2.0;

/// Radius of the buffer annulus drawn on the map (meters)
pub const BUFFER_RADIUS_METERS: f64 = 2000.0;

/// Billable distance: route distance plus the buffer when active
#[must_use]
pub fn billable_distance_km(distance_km: f64, buffer_active: bool) -> f64 {
    if buffer_active {
        distance_km + BUFFER_KM
    } else {
        distance_km
    }
}

/// Fare amount for a distance at a per-kilometer rate
#[must_use]
pub fn fare_amount(distance_km: f64, buffer_active: bool, rate_per_km: f64) -> f64 {
    billable_distance_km(distance_km, buffer_active) * rate_per_km
}

/// Format a fare with the currency symbol prefix and two decimal places
#[must_use]
pub fn format_fare(amount: f64, currency: &str) -> String {
    format!("{currency}{amount:.2}")
}

/// Convenience: compute and format in one step
#[must_use]
pub fn display_fare(
    distance_km: f64,
    buffer_active: bool,
    rate_per_km: f64,
    currency: &str,
) -> String {
    format_fare(fare_amount(distance_km, buffer_active, rate_per_km), currency)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn fare_for_recommended_demo_route() {
        // r1 at 12.5km and the default 500/km rate
        let fare = fare_amount(12.5, false, 500.0);
        assert!((fare - 6250.0).abs() < f64::EPSILON);
        assert_eq!(format_fare(fare, "\u{20a6}"), "\u{20a6}6250.00");
    }

    #[test]
    fn buffer_adds_two_kilometers() {
        assert!((billable_distance_km(12.5, true) - 14.5).abs() < f64::EPSILON);
        assert_eq!(display_fare(12.5, true, 500.0, "\u{20a6}"), "\u{20a6}7250.00");
    }

    #[test]
    fn zero_distance_is_a_zero_fare() {
        assert_eq!(display_fare(0.0, false, 500.0, "\u{20a6}"), "\u{20a6}0.00");
    }

    #[test]
    fn formats_two_decimal_places() {
        assert_eq!(format_fare(6250.0, "$"), "$6250.00");
        assert_eq!(format_fare(1234.567, "$"), "$1234.57");
    }

    proptest! {
        #[test]
        fn fare_is_never_negative(distance in 0.0f64..10_000.0, rate in 0.0f64..100_000.0) {
            prop_assert!(fare_amount(distance, false, rate) >= 0.0);
            prop_assert!(fare_amount(distance, true, rate) >= 0.0);
        }

        #[test]
        fn buffer_never_lowers_the_fare(distance in 0.0f64..10_000.0, rate in 0.0f64..100_000.0) {
            prop_assert!(fare_amount(distance, true, rate) >= fare_amount(distance, false, rate));
        }

        #[test]
        fn formatted_fare_has_currency_prefix(amount in 0.0f64..1e12) {
            let formatted = format_fare(amount, "\u{20a6}");
            prop_assert!(formatted.starts_with('\u{20a6}'), "missing currency prefix: {formatted}");
            prop_assert!(formatted.contains('.'), "missing decimals: {formatted}");
        }
    }
}
