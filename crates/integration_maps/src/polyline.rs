//! Encoded polyline decoding
//!
//! Google's polyline algorithm: each coordinate is a zig-zag encoded delta
//! against the previous point, split into 5-bit chunks offset by 63, at
//! 1e-5 degree precision.

use domain::Coordinates;

/// Decode an encoded polyline into a coordinate sequence
///
/// Truncated or corrupt trailing input ends the decode early; points
/// outside the valid coordinate ranges are dropped.
#[must_use]
pub fn decode(encoded: &str) -> Vec<Coordinates> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        let Some((delta_lat, next)) = next_delta(bytes, index) else {
            break;
        };
        let Some((delta_lng, after)) = next_delta(bytes, next) else {
            break;
        };
        index = after;
        lat += delta_lat;
        lng += delta_lng;

        #[allow(clippy::cast_precision_loss)]
        if let Ok(point) = Coordinates::new(lat as f64 * 1e-5, lng as f64 * 1e-5) {
            points.push(point);
        }
    }
    points
}

fn next_delta(bytes: &[u8], mut index: usize) -> Option<(i64, usize)> {
    let mut result: i64 = 0;
    let mut shift = 0u32;
    loop {
        let byte = *bytes.get(index)?;
        if !(63..=126).contains(&byte) {
            return None;
        }
        index += 1;
        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    // Zig-zag decode
    let delta = if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    };
    Some((delta, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference vector from the polyline algorithm documentation
    #[test]
    fn decodes_reference_polyline() {
        let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        assert_eq!(points.len(), 3);
        assert!((points[0].latitude() - 38.5).abs() < 1e-9);
        assert!((points[0].longitude() - -120.2).abs() < 1e-9);
        assert!((points[1].latitude() - 40.7).abs() < 1e-9);
        assert!((points[1].longitude() - -120.95).abs() < 1e-9);
        assert!((points[2].latitude() - 43.252).abs() < 1e-9);
        assert!((points[2].longitude() - -126.453).abs() < 1e-9);
    }

    #[test]
    fn empty_input_decodes_to_nothing() {
        assert!(decode("").is_empty());
    }

    #[test]
    fn truncated_input_keeps_complete_points() {
        // Drop the last byte of the reference vector: the final point is
        // incomplete and must not be emitted.
        let full = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";
        let points = decode(&full[..full.len() - 1]);
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn invalid_bytes_end_the_decode() {
        let points = decode("_p~iF~ps|U\u{1}\u{1}");
        assert_eq!(points.len(), 1);
    }
}
