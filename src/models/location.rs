//! Location model.

use serde::{Deserialize, Serialize};

index_handle!(
    /// Handle of a [`Location`] inside its [`Problem`](super::Problem).
    LocationId
);

/// A named place with coordinates.
///
/// Coordinates may be placeholders when no geocoding is available for
/// the point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Registry handle.
    pub id: LocationId,
    /// Identifier (point-of-interest or city name).
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(id: LocationId, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            latitude,
            longitude,
        }
    }
}
