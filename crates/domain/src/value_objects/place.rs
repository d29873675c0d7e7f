//! Trip endpoint value object
//!
//! A place is a user-entered label with optional resolved coordinates.
//! The label is always kept for display; coordinates, when present, take
//! priority during route resolution. Editing the label clears the
//! coordinates so stale text/coordinate pairs can never be routed.

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinates;

/// Minimum label length, in characters, for an endpoint without
/// coordinates to be routable
pub const MIN_ROUTABLE_LABEL_LEN: usize = 3;

/// A trip endpoint: free-text label plus optional resolved coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<Coordinates>,
}

impl Place {
    /// Create a place from a free-text label with no coordinates
    #[must_use]
    pub fn from_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            coordinates: None,
        }
    }

    /// Create a place from an autocomplete-style selection that carries
    /// both a display label and resolved coordinates
    #[must_use]
    pub fn resolved(label: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            label: label.into(),
            coordinates: Some(coordinates),
        }
    }

    /// The display label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The resolved coordinates, if any
    #[must_use]
    pub const fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Replace the label with user-edited text
    ///
    /// Clears the coordinates: edited text no longer matches whatever
    /// point was previously resolved for this endpoint.
    pub fn edit_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.coordinates = None;
    }

    /// Attach resolved coordinates, keeping the current label
    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = Some(coordinates);
    }

    /// Drop the resolved coordinates, keeping the label
    pub fn clear_coordinates(&mut self) {
        self.coordinates = None;
    }

    /// Reset to an empty place
    pub fn clear(&mut self) {
        self.label.clear();
        self.coordinates = None;
    }

    /// Whether this endpoint can be routed: it has coordinates, or its
    /// label is long enough to be worth sending to a directions service
    ///
    /// The length gate counts characters, not bytes, so short non-ASCII
    /// labels are treated the same as short ASCII ones.
    #[must_use]
    pub fn is_routable(&self) -> bool {
        self.coordinates.is_some() || self.label.chars().count() >= MIN_ROUTABLE_LABEL_LEN
    }

    /// Whether the place is empty (no label, no coordinates)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.label.is_empty() && self.coordinates.is_none()
    }
}
