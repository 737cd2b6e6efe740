//! Great-circle distance for the radius filter.

use crate::types::Coordinates;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometres.
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Whether `point` lies within `radius_km` of `center`.
#[must_use]
pub fn within_radius(center: Coordinates, point: Coordinates, radius_km: f64) -> bool {
    haversine_km(center, point) <= radius_km
}
