//! Geographic math
//!
//! Haversine distance, forward azimuth bearing, and bearing → octant
//! classification on a spherical Earth. All functions are pure.

use serde::{Deserialize, Serialize};

use crate::error::{KippoError, Result};
use crate::fortune::directions::Octant;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create validated coordinates
    ///
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180]; NaN and
    /// infinite values are rejected.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(KippoError::invalid_input(format!(
                "latitude {} out of range [-90, 90]",
                lat
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(KippoError::invalid_input(format!(
                "longitude {} out of range [-180, 180]",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }
}

/// Distance and direction of a point relative to a query center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceDirection {
    pub distance_km: f64,
    pub bearing: f64,
    pub direction8: Octant,
}

/// Great-circle distance between two points in kilometers
///
/// Haversine formula with a fixed Earth radius of 6371 km, rounded half-up
/// to 2 decimal places.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    let distance = EARTH_RADIUS_KM * c;
    (distance * 100.0).round() / 100.0
}

/// Forward azimuth from one point to another, in degrees [0, 360)
///
/// 0 = due north, increasing clockwise.
pub fn bearing_degrees(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let y = delta_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Classify a bearing into one of the eight 45°-wide octants
///
/// Arcs are centered on each octant's nominal bearing with half-open
/// boundaries: the lower bound belongs to the arc, the upper does not, so
/// 22.5° is NE and the N arc wraps [337.5, 360) ∪ [0, 22.5).
pub fn to_octant(bearing: f64) -> Octant {
    let normalized = bearing.rem_euclid(360.0);
    let index = ((normalized + 22.5) / 45.0).floor() as usize % 8;
    Octant::ALL[index]
}

/// Distance, bearing, and octant of `to` relative to `from`
pub fn distance_and_direction(from: Coordinates, to: Coordinates) -> DistanceDirection {
    let distance_km = distance_km(from, to);
    let bearing = bearing_degrees(from, to);
    DistanceDirection {
        distance_km,
        bearing,
        direction8: to_octant(bearing),
    }
}
