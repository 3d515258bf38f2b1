use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Used for any name missing from [`KNOWN_LOCATIONS`] (New York).
pub const DEFAULT_COORDINATES: Coordinates = Coordinates::new(40.7128, -74.0060);

pub const KNOWN_LOCATIONS: [(&str, Coordinates); 6] = [
    ("new york", Coordinates::new(40.7128, -74.0060)),
    ("london", Coordinates::new(51.5074, -0.1278)),
    ("tokyo", Coordinates::new(35.6762, 139.6503)),
    ("paris", Coordinates::new(48.8566, 2.3522)),
    ("sydney", Coordinates::new(-33.8688, 151.2093)),
    ("san francisco", Coordinates::new(37.7749, -122.4194)),
];

/// Table lookup, ignoring case and surrounding whitespace.
pub fn lookup(location: &str) -> Option<Coordinates> {
    let key = location.trim().to_lowercase();
    KNOWN_LOCATIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, coordinates)| *coordinates)
}

/// Like [`lookup`], but unknown names resolve to [`DEFAULT_COORDINATES`].
pub fn resolve(location: &str) -> Coordinates {
    lookup(location).unwrap_or_else(|| {
        warn!(
            "Unknown location '{}', falling back to default coordinates ({}, {})",
            location, DEFAULT_COORDINATES.latitude, DEFAULT_COORDINATES.longitude
        );
        DEFAULT_COORDINATES
    })
}
