//! Geographic primitives shared across the workspace.

use serde::{Deserialize, Serialize};

/// A `(latitude, longitude)` pair in decimal degrees (WGS84).
///
/// Ranges are not validated: extraction may yield out-of-range values and
/// they are passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
