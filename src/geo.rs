//! Great-circle geometry for delivery planning.
//!
//! Distances are straight-line haversine estimates. They ignore the road
//! network, so a real drive is usually longer than what is reported here.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Warehouse location used when no depot is configured.
pub const DEFAULT_DEPOT: GeoPoint = GeoPoint {
    latitude: -1.2921,
    longitude: 36.8219,
};

/// A validated latitude/longitude pair in degrees.
///
/// The only way to obtain a `GeoPoint` is through [`GeoPoint::new`] (or
/// deserialization, which goes through the same check), so every point
/// handed to the distance functions is in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = ValidationError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Builds a point, rejecting out-of-range or NaN coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl TryFrom<(f64, f64)> for GeoPoint {
    type Error = ValidationError;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self, Self::Error> {
        GeoPoint::new(latitude, longitude)
    }
}

/// Calculate haversine distance between two points in kilometers.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points.
    let c = 2.0 * a.min(1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}
