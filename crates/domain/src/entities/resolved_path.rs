//! Resolved path - what the directions layer actually produced for a trip

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinates;

/// One drivable alternative returned by a directions service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAlternative {
    /// Where the driving leg starts
    pub start: Coordinates,
    /// Where the driving leg ends
    pub end: Coordinates,
    /// Measured leg distance in meters
    pub distance_meters: f64,
    /// Measured leg duration in seconds
    pub duration_seconds: f64,
    /// Decoded path geometry; may be empty when the service returned none
    pub points: Vec<Coordinates>,
}

impl PathAlternative {
    /// Leg distance in kilometers
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    /// Leg duration in whole minutes
    #[must_use]
    pub fn duration_min(&self) -> f64 {
        (self.duration_seconds / 60.0).round()
    }
}

/// The active path for the current endpoints
///
/// Either a ranked multi-alternative directions result, positionally aligned
/// with the trip's route options (Nth alternative ↔ Nth route option), or a
/// two-point straight-line fallback when routing failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolvedPath {
    /// Ranked alternatives from the directions service
    Directions(Vec<PathAlternative>),
    /// Approximate straight-line fallback
    StraightLine {
        /// Resolved pickup point
        start: Coordinates,
        /// Resolved dropoff point
        end: Coordinates,
        /// Great-circle distance between the endpoints in kilometers
        distance_km: f64,
        /// Derived duration estimate in minutes
        duration_min: f64,
    },
}

impl ResolvedPath {
    /// Whether this path is the approximate straight-line fallback
    #[must_use]
    pub const fn is_approximate(&self) -> bool {
        matches!(self, Self::StraightLine { .. })
    }

    /// Number of selectable alternatives (a straight line has exactly one)
    #[must_use]
    pub fn alternative_count(&self) -> usize {
        match self {
            Self::Directions(alternatives) => alternatives.len(),
            Self::StraightLine { .. } => 1,
        }
    }

    /// Clamp a route-option position to a highlightable alternative index
    ///
    /// Out-of-range positions fall back to the first alternative.
    #[must_use]
    pub fn clamp_index(&self, index: usize) -> usize {
        if index < self.alternative_count() { index } else { 0 }
    }

    /// The alternative at a (clamped) route-option position
    #[must_use]
    pub fn alternative(&self, index: usize) -> Option<&PathAlternative> {
        match self {
            Self::Directions(alternatives) => {
                alternatives.get(self.clamp_index(index)).or_else(|| alternatives.first())
            },
            Self::StraightLine { .. } => None,
        }
    }

    /// Measured (distance km, duration min) at a route-option position
    ///
    /// The straight-line fallback reports its single estimate regardless of
    /// position.
    #[must_use]
    pub fn stats_at(&self, index: usize) -> Option<(f64, f64)> {
        match self {
            Self::Directions(_) => self
                .alternative(index)
                .map(|alt| (alt.distance_km(), alt.duration_min())),
            Self::StraightLine {
                distance_km,
                duration_min,
                ..
            } => Some((*distance_km, *duration_min)),
        }
    }

    /// Start point of the path at a route-option position
    #[must_use]
    pub fn start_point(&self, index: usize) -> Option<Coordinates> {
        match self {
            Self::Directions(_) => self.alternative(index).map(|alt| alt.start),
            Self::StraightLine { start, .. } => Some(*start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternative(distance_meters: f64, duration_seconds: f64) -> PathAlternative {
        PathAlternative {
            start: Coordinates::tunga(),
            end: Coordinates::bosso(),
            distance_meters,
            duration_seconds,
            points: vec![],
        }
    }

    fn directions() -> ResolvedPath {
        ResolvedPath::Directions(vec![alternative(12500.0, 1320.0), alternative(13200.0, 1560.0)])
    }

    fn straight_line() -> ResolvedPath {
        ResolvedPath::StraightLine {
            start: Coordinates::tunga(),
            end: Coordinates::bosso(),
            distance_km: 4.2,
            duration_min: 8.0,
        }
    }

    #[test]
    fn alternative_stats_convert_units() {
        let alt = alternative(12500.0, 1320.0);
        assert!((alt.distance_km() - 12.5).abs() < f64::EPSILON);
        assert!((alt.duration_min() - 22.0).abs() < f64::EPSILON);
    }

    #[test]
    fn duration_rounds_to_whole_minutes() {
        let alt = alternative(1000.0, 1359.0); // 22.65 min
        assert!((alt.duration_min() - 23.0).abs() < f64::EPSILON);
    }

    #[test]
    fn only_straight_line_is_approximate() {
        assert!(!directions().is_approximate());
        assert!(straight_line().is_approximate());
    }

    #[test]
    fn out_of_range_index_clamps_to_first() {
        let path = directions();
        assert_eq!(path.clamp_index(1), 1);
        assert_eq!(path.clamp_index(5), 0);

        let stats = path.stats_at(5).expect("stats");
        assert!((stats.0 - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_follow_the_selected_alternative() {
        let path = directions();
        let (distance, duration) = path.stats_at(1).expect("stats");
        assert!((distance - 13.2).abs() < f64::EPSILON);
        assert!((duration - 26.0).abs() < f64::EPSILON);
    }

    #[test]
    fn straight_line_reports_same_stats_for_any_index() {
        let path = straight_line();
        assert_eq!(path.stats_at(0), path.stats_at(7));
        assert_eq!(path.alternative_count(), 1);
    }

    #[test]
    fn start_point_precedence() {
        assert_eq!(directions().start_point(0), Some(Coordinates::tunga()));
        assert_eq!(straight_line().start_point(3), Some(Coordinates::tunga()));
    }

    #[test]
    fn empty_directions_have_no_stats() {
        let path = ResolvedPath::Directions(vec![]);
        assert!(path.stats_at(0).is_none());
        assert!(path.start_point(0).is_none());
    }
}
