//! Location distance lookup.
//!
//! The distance term of the compatibility score resolves location keys
//! through the [`DistanceProvider`] trait. [`LocationTable`] is the provided
//! implementation: a coordinate table keyed by upper-cased location names,
//! measuring great-circle kilometers between entries.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{GroupingError, Result};

/// Mean earth radius in kilometers (IUGG).
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Distance in kilometers between two location keys.
///
/// Keys are matched case-insensitively. An absent key is
/// [`GroupingError::UnknownLocation`]; providers never guess.
pub trait DistanceProvider: Send + Sync {
    /// Great-circle (or provider-defined) distance in km.
    fn distance_km(&self, from: &str, to: &str) -> Result<f64>;
}

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// In-memory coordinate table with haversine distances.
///
/// ```
/// use u_grouping::geo::{DistanceProvider, LocationTable};
///
/// let table = LocationTable::new()
///     .with_location("Bishan", 1.3513, 103.8487)
///     .with_location("Clementi", 1.3151, 103.7652);
///
/// let km = table.distance_km("bishan", "CLEMENTI").unwrap();
/// assert!(km > 5.0 && km < 15.0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationTable {
    locations: HashMap<String, Coordinates>,
}

impl LocationTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a location, replacing any existing entry with the same
    /// (case-insensitive) name.
    pub fn insert(&mut self, name: impl AsRef<str>, latitude: f64, longitude: f64) {
        self.locations.insert(
            name.as_ref().to_uppercase(),
            Coordinates {
                latitude,
                longitude,
            },
        );
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_location(mut self, name: impl AsRef<str>, latitude: f64, longitude: f64) -> Self {
        self.insert(name, latitude, longitude);
        self
    }

    /// Number of known locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Whether a location key is known.
    pub fn contains(&self, name: &str) -> bool {
        self.locations.contains_key(&name.to_uppercase())
    }

    fn resolve(&self, name: &str) -> Result<Coordinates> {
        self.locations
            .get(&name.to_uppercase())
            .copied()
            .ok_or_else(|| GroupingError::UnknownLocation(name.to_string()))
    }
}

impl DistanceProvider for LocationTable {
    fn distance_km(&self, from: &str, to: &str) -> Result<f64> {
        let a = self.resolve(from)?;
        let b = self.resolve(to)?;
        Ok(haversine_km(a, b))
    }
}

/// Great-circle distance between two coordinates.
fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
