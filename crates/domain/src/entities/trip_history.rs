//! Trip history - bounded, newest-first list of past estimations

use serde::{Deserialize, Serialize};

use crate::entities::TripEstimation;

/// Maximum number of retained estimations
pub const HISTORY_CAPACITY: usize = 10;

/// Capped history of trip estimations, newest first, de-duplicated by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripHistory {
    entries: Vec<TripEstimation>,
}

impl TripHistory {
    /// Create an empty history
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert an estimation at the front, evicting the oldest entry when
    /// the capacity is exceeded
    ///
    /// Inserting an id that is already present is a no-op (no reorder, no
    /// length change). Returns `true` if the history changed.
    pub fn insert(&mut self, trip: TripEstimation) -> bool {
        if self.entries.iter().any(|t| t.id == trip.id) {
            return false;
        }
        self.entries.insert(0, trip);
        self.entries.truncate(HISTORY_CAPACITY);
        true
    }

    /// Look up an estimation by id
    #[must_use]
    pub fn get(&self, trip_id: &str) -> Option<&TripEstimation> {
        self.entries.iter().find(|t| t.id == trip_id)
    }

    /// Iterate entries, newest first
    pub fn iter(&self) -> impl Iterator<Item = &TripEstimation> {
        self.entries.iter()
    }

    /// Number of retained entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(pickup: &str) -> TripEstimation {
        TripEstimation::new(pickup, "Bosso", vec![], "")
    }

    #[test]
    fn insert_is_newest_first() {
        let mut history = TripHistory::new();
        let first = trip("A");
        let second = trip("B");
        assert!(history.insert(first.clone()));
        assert!(history.insert(second.clone()));

        let ids: Vec<_> = history.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    }

    #[test]
    fn duplicate_id_is_noop() {
        let mut history = TripHistory::new();
        let entry = trip("A");
        assert!(history.insert(entry.clone()));
        assert!(history.insert(trip("B")));

        assert!(!history.insert(entry.clone()));
        assert_eq!(history.len(), 2);
        // No reorder: the duplicate stays where it was
        assert_eq!(history.iter().nth(1).map(|t| t.id.as_str()), Some(entry.id.as_str()));
    }

    #[test]
    fn eleventh_entry_evicts_oldest() {
        let mut history = TripHistory::new();
        let oldest = trip("first");
        history.insert(oldest.clone());
        for i in 0..HISTORY_CAPACITY {
            history.insert(trip(&format!("trip {i}")));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert!(history.get(&oldest.id).is_none());
    }

    #[test]
    fn get_by_id() {
        let mut history = TripHistory::new();
        let entry = trip("A");
        history.insert(entry.clone());
        assert_eq!(history.get(&entry.id).map(|t| t.pickup.as_str()), Some("A"));
        assert!(history.get("missing").is_none());
    }

    #[test]
    fn serializes_as_bare_list() {
        let mut history = TripHistory::new();
        history.insert(trip("A"));
        let json = serde_json::to_string(&history).expect("serialize");
        assert!(json.starts_with('['));

        let back: TripHistory = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, history);
    }
}
