//! Great-circle geometry shared by every distance computation in the crate.
//!
//! Scheduled route lengths, proximity filtering, and the degree radius used to
//! query the spatial index all reduce to [`haversine_km`].

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Large enough to cover the whole latitude/longitude plane from any centre.
const MAX_QUERY_RADIUS_DEGREES: f64 = 405.0;

/// Geographic point in degrees (WGS84-like, no datum correction).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another location in kilometres.
    pub fn distance_to(&self, other: &Location) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between two locations in kilometres.
pub fn haversine_km(from: Location, to: Location) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng * 0.5).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Degree radius that contains every point within `max_distance_km` of a
/// target at `latitude`.
///
/// Every point of the great-circle disc lies within `d / R` of the target in
/// latitude and within `asin(sin(d / R) / cos(latitude))` in longitude. A disc
/// that reaches a pole spans every longitude and gets the whole plane. The
/// two deltas are combined with `hypot`, so the circle encloses the bounding
/// box; callers must re-filter candidates by true distance.
pub fn search_radius_degrees(max_distance_km: f64, latitude: f64) -> f64 {
    let angular = max_distance_km / EARTH_RADIUS_KM;
    let lat_delta = angular.to_degrees();
    if latitude.abs() + lat_delta >= 90.0 {
        return MAX_QUERY_RADIUS_DEGREES;
    }

    let ratio = angular.sin() / latitude.to_radians().cos();
    let lng_delta = ratio.min(1.0).asin().to_degrees();
    lat_delta.hypot(lng_delta).min(MAX_QUERY_RADIUS_DEGREES)
}
